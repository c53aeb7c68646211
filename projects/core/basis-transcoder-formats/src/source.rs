//! Per-family view of one stored 4x4 block.

use basis_transcoder_common::{decoded_4x4_block::Decoded4x4Block, etc1::Etc1Block};

/// One source block, as produced by a source family decoder (ETC1S or UASTC).
pub trait SourceBlock {
    /// Decodes the block to RGBA texels.
    fn decode(&self) -> Decoded4x4Block;

    /// Returns the block as an exact ETC1 block, if the family stores ETC1 data.
    ///
    /// Families without an exact mapping return `None` and get re-encoded.
    fn to_etc1(&self) -> Option<Etc1Block> {
        None
    }
}

impl SourceBlock for Decoded4x4Block {
    #[inline]
    fn decode(&self) -> Decoded4x4Block {
        *self
    }
}
