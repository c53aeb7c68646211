//! Common test imports and `.basis` fixtures for the transcoder tests.
#![allow(unused_imports)]

pub use alloc::{vec, vec::Vec};
pub use rstest::rstest;

pub use basis_transcoder_container::test_prelude::{
    slice_color, uastc_solid_block, ContainerBuilder, Etc1sPayload, HeaderFlags, SliceFlags,
    SliceSpec, SourceFormat, TextureType,
};
use basis_transcoder_etc1s::{test_utils::Etc1sFixture, SliceGrid};

/// A single-image, single-level UASTC 2D texture of solid blocks.
pub fn uastc_2d(width: u16, height: u16) -> Vec<u8> {
    ContainerBuilder::uastc(TextureType::Texture2D)
        .slice(SliceSpec::uastc(0, 0, width, height))
        .build()
}

/// Builds ETC1S slices with palettes from [`Etc1sFixture`].
pub struct Etc1sFile {
    pub fixture: Etc1sFixture,
    builder: ContainerBuilder,
}

impl Etc1sFile {
    pub fn new(tex_type: TextureType) -> Self {
        let fixture = Etc1sFixture::new(4, 4, 0);
        let payload = Etc1sPayload::new(
            fixture.endpoint_palette(),
            fixture.num_endpoints as u16,
            fixture.selector_palette(),
            fixture.num_selectors as u16,
            fixture.tables(),
        );
        Self {
            builder: ContainerBuilder::etc1s(tex_type, payload),
            fixture,
        }
    }

    /// Adds a slice whose block `i` uses endpoint and selector `indices[i]`.
    pub fn slice(
        self,
        image_index: u32,
        level_index: u32,
        width: u16,
        height: u16,
        indices: &[(u32, u32)],
    ) -> Self {
        self.push(image_index, level_index, width, height, indices, SliceFlags::empty())
    }

    /// Adds the alpha slice paired with the previous colour slice.
    pub fn alpha_slice(
        self,
        image_index: u32,
        level_index: u32,
        width: u16,
        height: u16,
        indices: &[(u32, u32)],
    ) -> Self {
        self.push(image_index, level_index, width, height, indices, SliceFlags::HAS_ALPHA)
    }

    fn push(
        mut self,
        image_index: u32,
        level_index: u32,
        width: u16,
        height: u16,
        indices: &[(u32, u32)],
        flags: SliceFlags,
    ) -> Self {
        let grid = SliceGrid {
            num_blocks_x: width.div_ceil(4) as u32,
            num_blocks_y: height.div_ceil(4) as u32,
        };
        let data = self.fixture.explicit_slice(grid, indices);
        let slice = SliceSpec::new(image_index, level_index, width, height, data).flags(flags);
        self.builder = self.builder.slice(slice);
        self
    }

    pub fn alpha_slices(mut self) -> Self {
        self.builder = self.builder.alpha_slices();
        self
    }

    pub fn build(&self) -> Vec<u8> {
        self.builder.build()
    }
}
