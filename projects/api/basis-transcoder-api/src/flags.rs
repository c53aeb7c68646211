//! Per-call transcode options.

use bitflags::bitflags;

bitflags! {
    /// Flags accepted by [`Transcoder::transcode_image_level`](crate::Transcoder::transcode_image_level).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct DecodeFlags: u32 {
        /// For files with alpha, write the alpha channel into the colour
        /// channels of formats that have no alpha (ETC1, BC1, BC4, RGB565 ...).
        const TRANSCODE_ALPHA_TO_OPAQUE_FORMATS = 2;
        /// Accepted for compatibility. Has no effect.
        const OUTPUT_HAS_ALPHA_INDICES = 4;
    }
}
