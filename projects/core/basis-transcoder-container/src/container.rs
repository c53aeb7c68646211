//! # Container
//!
//! [`Container`] is a validated view over the caller's `.basis` bytes.
//!
//! Validation happens once, in [`Container::parse_with`]. After it succeeds
//! every offset and count in the header and slice table is known to lie
//! inside the buffer, so the queries below never fail on the file itself,
//! only on out of range image or level indices.

use crate::{
    constants::*,
    error::{ContainerError, IndexError},
    header::{BasisHeader, HeaderFlags},
    slice::SliceDesc,
    texture::{SourceFormat, TextureType},
};
use alloc::{vec, vec::Vec};
use basis_transcoder_common::crc16::crc16;
use basis_transcoder_etc1s::Etc1sSections;
use likely_stable::unlikely;
use tracing::warn;

/// Options for [`Container::parse_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParseOptions {
    /// Skip the data and per-slice CRC-16 checks. The header CRC is always checked.
    pub skip_crc: bool,
}

/// Identifies the file a transcoding session was started on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContainerFingerprint {
    /// File length in bytes.
    pub len: usize,
    /// Header CRC-16.
    pub header_crc16: u16,
    /// Data CRC-16.
    pub data_crc16: u16,
}

/// Location and shape of one mip level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LevelDescriptor {
    /// Width in pixels.
    pub orig_width: u32,
    /// Height in pixels.
    pub orig_height: u32,
    /// 4x4 blocks per row.
    pub num_blocks_x: u32,
    /// 4x4 block rows.
    pub num_blocks_y: u32,
    /// `num_blocks_x * num_blocks_y`.
    pub total_blocks: u32,
    /// Index of the level's colour slice. The alpha slice, if any, follows it.
    pub first_slice_index: u32,
    /// The level has alpha.
    pub alpha_flag: bool,
    /// The level is a video I-frame.
    pub iframe_flag: bool,
}

impl LevelDescriptor {
    fn from_slice(desc: &SliceDesc, first_slice_index: u32, has_alpha_slices: bool) -> Self {
        Self {
            orig_width: desc.orig_width as u32,
            orig_height: desc.orig_height as u32,
            num_blocks_x: desc.num_blocks_x as u32,
            num_blocks_y: desc.num_blocks_y as u32,
            total_blocks: desc.total_blocks(),
            first_slice_index,
            alpha_flag: has_alpha_slices || desc.has_alpha(),
            iframe_flag: desc.is_iframe(),
        }
    }

    /// Width padded to whole blocks.
    #[inline]
    pub fn width(&self) -> u32 {
        self.num_blocks_x * 4
    }

    /// Height padded to whole blocks.
    #[inline]
    pub fn height(&self) -> u32 {
        self.num_blocks_y * 4
    }
}

/// Level 0 of an image, plus its mip count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[allow(missing_docs)]
pub struct ImageInfo {
    pub image_index: u32,
    pub total_levels: u32,
    pub orig_width: u32,
    pub orig_height: u32,
    pub width: u32,
    pub height: u32,
    pub num_blocks_x: u32,
    pub num_blocks_y: u32,
    pub total_blocks: u32,
    pub first_slice_index: u32,
    pub alpha_flag: bool,
    pub iframe_flag: bool,
}

/// One mip level of one image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[allow(missing_docs)]
pub struct ImageLevelInfo {
    pub image_index: u32,
    pub level_index: u32,
    pub orig_width: u32,
    pub orig_height: u32,
    pub width: u32,
    pub height: u32,
    pub num_blocks_x: u32,
    pub num_blocks_y: u32,
    pub total_blocks: u32,
    pub first_slice_index: u32,
    pub alpha_flag: bool,
    pub iframe_flag: bool,
}

/// File wide information.
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct FileInfo {
    pub version: u32,
    pub total_header_size: u32,
    pub total_selectors: u32,
    pub selector_codebook_size: u32,
    pub total_endpoints: u32,
    pub endpoint_codebook_size: u32,
    pub tables_size: u32,
    /// Sum of all slice data sizes. ETC1S slices may share data, so this
    /// can exceed the file length.
    pub slices_size: u64,
    pub texture_type: TextureType,
    pub us_per_frame: u32,
    pub total_images: u32,
    pub total_slices: u32,
    pub source_format: SourceFormat,
    pub has_alpha_slices: bool,
    pub y_flipped: bool,
    pub srgb: bool,
    pub userdata0: u32,
    pub userdata1: u32,
    /// Mip level count of every image.
    pub image_mipmap_levels: Vec<u32>,
}

/// A validated `.basis` file.
#[derive(Debug, Clone)]
pub struct Container<'a> {
    bytes: &'a [u8],
    header: BasisHeader,
    texture_type: TextureType,
    source_format: SourceFormat,
    slices: Vec<SliceDesc>,
    image_levels: Vec<u32>,
}

/// Returns `bytes[offset..offset + size]` if it lies inside `bytes`.
#[inline]
fn section(bytes: &[u8], offset: u32, size: usize) -> Option<&[u8]> {
    let start = offset as usize;
    bytes.get(start..start.checked_add(size)?)
}

impl<'a> Container<'a> {
    /// Parses and validates `bytes` with CRC checks enabled.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError`] describing the first check that failed.
    #[inline]
    pub fn parse(bytes: &'a [u8]) -> Result<Self, ContainerError> {
        Self::parse_with(bytes, ParseOptions::default())
    }

    /// Parses and validates `bytes`.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError`] describing the first check that failed.
    pub fn parse_with(bytes: &'a [u8], options: ParseOptions) -> Result<Self, ContainerError> {
        let result = Self::validate(bytes, options);
        if let Err(error) = &result {
            warn!(len = bytes.len(), %error, "rejected .basis container");
        }
        result
    }

    fn validate(bytes: &'a [u8], options: ParseOptions) -> Result<Self, ContainerError> {
        let header = BasisHeader::read(bytes).ok_or(ContainerError::TooSmall {
            actual: bytes.len(),
        })?;

        if unlikely(header.sig as u32 != BASIS_SIGNATURE) {
            return Err(ContainerError::BadSignature(header.sig));
        }
        if unlikely(!(MIN_VERSION..=MAX_VERSION).contains(&(header.version as u32))) {
            return Err(ContainerError::UnsupportedVersion(header.version));
        }
        if unlikely(header.header_size as usize != HEADER_SIZE) {
            return Err(ContainerError::HeaderSize(header.header_size));
        }

        let computed = crc16(&bytes[HEADER_CRC_START..HEADER_SIZE], 0);
        if unlikely(computed != header.header_crc16) {
            return Err(ContainerError::HeaderCrcMismatch {
                stored: header.header_crc16,
                computed,
            });
        }

        let data = &bytes[HEADER_SIZE..];
        if unlikely(header.data_size as usize != data.len()) {
            return Err(ContainerError::DataSizeMismatch {
                declared: header.data_size as usize,
                actual: data.len(),
            });
        }
        if !options.skip_crc {
            let computed = crc16(data, 0);
            if unlikely(computed != header.data_crc16) {
                return Err(ContainerError::DataCrcMismatch {
                    stored: header.data_crc16,
                    computed,
                });
            }
        }

        if header.total_slices == 0 {
            return Err(ContainerError::NoSlices);
        }
        if header.total_images == 0 {
            return Err(ContainerError::NoImages);
        }

        let texture_type =
            TextureType::try_from(header.tex_type).map_err(ContainerError::UnknownTextureType)?;
        let source_format =
            SourceFormat::try_from(header.tex_format).map_err(ContainerError::UnknownSourceFormat)?;
        if texture_type == TextureType::CubemapArray && header.total_images % 6 != 0 {
            return Err(ContainerError::CubemapImageCount(header.total_images));
        }

        if source_format == SourceFormat::Etc1s {
            for (name, offset, size) in [
                ("endpoint codebook", header.endpoint_cb_file_ofs, header.endpoint_cb_file_size),
                ("selector codebook", header.selector_cb_file_ofs, header.selector_cb_file_size),
                ("tables", header.tables_file_ofs, header.tables_file_size),
            ] {
                if section(bytes, offset, size as usize).is_none() {
                    return Err(ContainerError::SectionOutOfBounds {
                        section: name,
                        offset: offset as usize,
                        size: size as usize,
                    });
                }
            }
        }

        let total_slices = header.total_slices as usize;
        let table = total_slices
            .checked_mul(SLICE_DESC_SIZE)
            .and_then(|size| section(bytes, header.slice_desc_file_ofs, size))
            .ok_or(ContainerError::SliceTableOutOfBounds {
            offset: header.slice_desc_file_ofs as usize,
            count: total_slices,
        })?;

        let mut slices = Vec::with_capacity(total_slices);
        for (index, entry) in table.chunks_exact(SLICE_DESC_SIZE).enumerate() {
            let index = index as u32;
            let desc = SliceDesc::read(entry).ok_or(ContainerError::SliceTableOutOfBounds {
                offset: header.slice_desc_file_ofs as usize,
                count: total_slices,
            })?;
            Self::validate_slice(bytes, &header, source_format, index, &desc, options)?;
            slices.push(desc);
        }

        let has_alpha_slices = source_format == SourceFormat::Etc1s
            && header.flags.contains(HeaderFlags::HAS_ALPHA_SLICES);
        if has_alpha_slices {
            Self::validate_alpha_pairs(&slices)?;
        }

        let image_levels = Self::count_levels(&slices, header.total_images, has_alpha_slices)?;

        Ok(Self {
            bytes,
            header,
            texture_type,
            source_format,
            slices,
            image_levels,
        })
    }

    fn validate_slice(
        bytes: &[u8],
        header: &BasisHeader,
        source_format: SourceFormat,
        index: u32,
        desc: &SliceDesc,
        options: ParseOptions,
    ) -> Result<(), ContainerError> {
        let data = section(bytes, desc.file_ofs, desc.file_size as usize)
            .ok_or(ContainerError::SliceOutOfBounds { index })?;

        if unlikely(desc.image_index >= header.total_images) {
            return Err(ContainerError::SliceImageIndex {
                index,
                image_index: desc.image_index,
                total_images: header.total_images,
            });
        }

        let blocks_x = (desc.orig_width as u32).div_ceil(4);
        let blocks_y = (desc.orig_height as u32).div_ceil(4);
        if unlikely(
            desc.num_blocks_x == 0
                || desc.num_blocks_y == 0
                || blocks_x != desc.num_blocks_x as u32
                || blocks_y != desc.num_blocks_y as u32,
        ) {
            return Err(ContainerError::SliceBlockCounts {
                index,
                width: desc.orig_width,
                height: desc.orig_height,
            });
        }

        if source_format == SourceFormat::Uastc4x4 {
            let expected = desc.total_blocks() as usize * UASTC_BLOCK_BYTES;
            if unlikely(data.len() != expected) {
                return Err(ContainerError::UastcSliceSize {
                    index,
                    expected,
                    actual: data.len(),
                });
            }
        }

        if !options.skip_crc && unlikely(crc16(data, 0) != desc.crc16) {
            return Err(ContainerError::SliceCrcMismatch { index });
        }
        Ok(())
    }

    /// Every colour slice must be followed by the alpha slice of the same level.
    fn validate_alpha_pairs(slices: &[SliceDesc]) -> Result<(), ContainerError> {
        if slices.len() % 2 != 0 {
            return Err(ContainerError::AlphaSlicePairing {
                index: slices.len() as u32 - 1,
            });
        }
        for (pair_index, pair) in slices.chunks_exact(2).enumerate() {
            let (colour, alpha) = (&pair[0], &pair[1]);
            let paired = alpha.has_alpha()
                && alpha.image_index == colour.image_index
                && alpha.level_index == colour.level_index
                && alpha.num_blocks_x == colour.num_blocks_x
                && alpha.num_blocks_y == colour.num_blocks_y;
            if !paired {
                return Err(ContainerError::AlphaSlicePairing {
                    index: pair_index as u32 * 2,
                });
            }
        }
        Ok(())
    }

    /// Mip counts per image. The colour slices of every image must list
    /// levels `0..n` exactly once each.
    fn count_levels(
        slices: &[SliceDesc],
        total_images: u32,
        has_alpha_slices: bool,
    ) -> Result<Vec<u32>, ContainerError> {
        // Bounds the allocation below by the validated slice table.
        if unlikely(total_images as usize > slices.len()) {
            return Err(ContainerError::MissingImage {
                image: slices.len() as u32,
            });
        }

        let step = if has_alpha_slices { 2 } else { 1 };
        let mut keys: Vec<(u32, u32)> = slices
            .iter()
            .step_by(step)
            .map(|desc| (desc.image_index, u32::from(desc.level_index)))
            .collect();
        keys.sort_unstable();

        let mut levels = vec![0u32; total_images as usize];
        for (image, level) in keys {
            let next = &mut levels[image as usize];
            if unlikely(level != *next) {
                return Err(ContainerError::LevelSequence {
                    image,
                    expected: *next,
                    found: level,
                });
            }
            *next += 1;
        }

        match levels.iter().position(|&count| count == 0) {
            Some(image) => Err(ContainerError::MissingImage {
                image: image as u32,
            }),
            None => Ok(levels),
        }
    }

    /// The parsed header.
    #[inline]
    pub fn header(&self) -> &BasisHeader {
        &self.header
    }

    /// The bytes this container was parsed from.
    #[inline]
    pub fn bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Texture topology.
    #[inline]
    pub fn texture_type(&self) -> TextureType {
        self.texture_type
    }

    /// Compression family of the slices.
    #[inline]
    pub fn source_format(&self) -> SourceFormat {
        self.source_format
    }

    /// Number of images.
    #[inline]
    pub fn total_images(&self) -> u32 {
        self.header.total_images
    }

    /// Number of slices, alpha slices included.
    #[inline]
    pub fn total_slices(&self) -> u32 {
        self.header.total_slices
    }

    /// Whether every colour slice is followed by an alpha slice.
    #[inline]
    pub fn has_alpha_slices(&self) -> bool {
        self.source_format == SourceFormat::Etc1s
            && self.header.flags.contains(HeaderFlags::HAS_ALPHA_SLICES)
    }

    /// Microseconds per video frame.
    #[inline]
    pub fn us_per_frame(&self) -> u32 {
        self.header.us_per_frame
    }

    /// Identity of the underlying file.
    #[inline]
    pub fn fingerprint(&self) -> ContainerFingerprint {
        ContainerFingerprint {
            len: self.bytes.len(),
            header_crc16: self.header.header_crc16,
            data_crc16: self.header.data_crc16,
        }
    }

    fn check_image(&self, image_index: u32) -> Result<(), IndexError> {
        if image_index >= self.header.total_images {
            return Err(IndexError::ImageIndex {
                index: image_index,
                total: self.header.total_images,
            });
        }
        Ok(())
    }

    /// Number of mip levels of `image_index`.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::ImageIndex`] if the image does not exist.
    pub fn total_levels(&self, image_index: u32) -> Result<u32, IndexError> {
        self.check_image(image_index)?;
        Ok(self.image_levels[image_index as usize])
    }

    /// Index of the colour slice storing `(image_index, level_index)`.
    pub fn find_slice(&self, image_index: u32, level_index: u32) -> Option<u32> {
        let step = if self.has_alpha_slices() { 2 } else { 1 };
        self.slices
            .iter()
            .enumerate()
            .step_by(step)
            .find(|(_, d)| d.image_index == image_index && d.level_index as u32 == level_index)
            .map(|(index, _)| index as u32)
    }

    /// Describes one mip level.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError`] if the image or level does not exist.
    pub fn level_descriptor(
        &self,
        image_index: u32,
        level_index: u32,
    ) -> Result<LevelDescriptor, IndexError> {
        self.check_image(image_index)?;
        let index = self
            .find_slice(image_index, level_index)
            .ok_or(IndexError::LevelIndex {
                image: image_index,
                index: level_index,
                total: self.image_levels[image_index as usize],
            })?;
        let desc = &self.slices[index as usize];
        Ok(LevelDescriptor::from_slice(
            desc,
            index,
            self.has_alpha_slices(),
        ))
    }

    /// Describes level 0 of an image.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::ImageIndex`] if the image does not exist.
    pub fn image_info(&self, image_index: u32) -> Result<ImageInfo, IndexError> {
        let level = self.level_descriptor(image_index, 0)?;
        Ok(ImageInfo {
            image_index,
            total_levels: self.image_levels[image_index as usize],
            orig_width: level.orig_width,
            orig_height: level.orig_height,
            width: level.width(),
            height: level.height(),
            num_blocks_x: level.num_blocks_x,
            num_blocks_y: level.num_blocks_y,
            total_blocks: level.total_blocks,
            first_slice_index: level.first_slice_index,
            alpha_flag: level.alpha_flag,
            iframe_flag: level.iframe_flag,
        })
    }

    /// Describes one mip level of an image.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError`] if the image or level does not exist.
    pub fn image_level_info(
        &self,
        image_index: u32,
        level_index: u32,
    ) -> Result<ImageLevelInfo, IndexError> {
        let level = self.level_descriptor(image_index, level_index)?;
        Ok(ImageLevelInfo {
            image_index,
            level_index,
            orig_width: level.orig_width,
            orig_height: level.orig_height,
            width: level.width(),
            height: level.height(),
            num_blocks_x: level.num_blocks_x,
            num_blocks_y: level.num_blocks_y,
            total_blocks: level.total_blocks,
            first_slice_index: level.first_slice_index,
            alpha_flag: level.alpha_flag,
            iframe_flag: level.iframe_flag,
        })
    }

    /// File wide information.
    pub fn file_info(&self) -> FileInfo {
        let header = &self.header;
        FileInfo {
            version: header.version as u32,
            total_header_size: header
                .total_slices
                .saturating_mul(SLICE_DESC_SIZE as u32)
                .saturating_add(HEADER_SIZE as u32),
            total_selectors: header.total_selectors as u32,
            selector_codebook_size: header.selector_cb_file_size,
            total_endpoints: header.total_endpoints as u32,
            endpoint_codebook_size: header.endpoint_cb_file_size,
            tables_size: header.tables_file_size,
            slices_size: self.slices.iter().map(|s| s.file_size as u64).sum(),
            texture_type: self.texture_type,
            us_per_frame: header.us_per_frame,
            total_images: header.total_images,
            total_slices: header.total_slices,
            source_format: self.source_format,
            has_alpha_slices: self.has_alpha_slices(),
            y_flipped: header.flags.contains(HeaderFlags::Y_FLIPPED),
            srgb: header.flags.contains(HeaderFlags::SRGB),
            userdata0: header.userdata0,
            userdata1: header.userdata1,
            image_mipmap_levels: self.image_levels.clone(),
        }
    }

    /// Descriptor of slice `index`.
    #[inline]
    pub fn slice(&self, index: u32) -> Option<&SliceDesc> {
        self.slices.get(index as usize)
    }

    /// All slice descriptors in file order.
    #[inline]
    pub fn slices(&self) -> &[SliceDesc] {
        &self.slices
    }

    /// Data of slice `index`.
    #[inline]
    pub fn slice_data(&self, index: u32) -> Option<&'a [u8]> {
        let desc = self.slices.get(index as usize)?;
        self.bytes.get(desc.data_range())
    }

    /// The alpha slice paired with colour slice `first_slice_index`, if the file has alpha slices.
    #[inline]
    pub fn alpha_slice_index(&self, first_slice_index: u32) -> Option<u32> {
        self.has_alpha_slices().then_some(first_slice_index + 1)
    }

    /// Codebook and table sections of an ETC1S file.
    pub fn etc1s_sections(&self) -> Option<Etc1sSections<'a>> {
        if self.source_format != SourceFormat::Etc1s {
            return None;
        }
        let header = &self.header;
        Some(Etc1sSections {
            endpoint_data: section(
                self.bytes,
                header.endpoint_cb_file_ofs,
                header.endpoint_cb_file_size as usize,
            )?,
            num_endpoints: header.total_endpoints as u32,
            selector_data: section(
                self.bytes,
                header.selector_cb_file_ofs,
                header.selector_cb_file_size as usize,
            )?,
            num_selectors: header.total_selectors as u32,
            table_data: section(
                self.bytes,
                header.tables_file_ofs,
                header.tables_file_size as usize,
            )?,
        })
    }
}
