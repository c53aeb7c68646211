//! `.basis` fixtures shared by the integration tests.
#![allow(dead_code)]

pub use basis_transcoder_container::test_prelude::{
    slice_color, ContainerBuilder, Etc1sPayload, SliceSpec, TextureType,
};
use basis_transcoder_etc1s::{test_utils::Etc1sFixture, SliceGrid};

/// UASTC file with one image of `levels` mip levels, halving down from `width` x `height`.
pub fn uastc_mipmapped(tex_type: TextureType, width: u16, height: u16, levels: u32) -> Vec<u8> {
    uastc_images(tex_type, 1, width, height, levels)
}

/// UASTC file with `images` images sharing dimensions and mip count.
pub fn uastc_images(
    tex_type: TextureType,
    images: u32,
    width: u16,
    height: u16,
    levels: u32,
) -> Vec<u8> {
    let mut builder = ContainerBuilder::uastc(tex_type).images(images);
    for image in 0..images {
        for level in 0..levels {
            let w = (width >> level).max(1);
            let h = (height >> level).max(1);
            builder = builder.slice(SliceSpec::uastc(image, level, w, h));
        }
    }
    builder.build()
}

/// ETC1S file with one `width` x `height` image whose blocks cycle through the palettes.
pub fn etc1s_2d(width: u16, height: u16) -> Vec<u8> {
    let fixture = Etc1sFixture::new(8, 8, 0);
    let grid = SliceGrid {
        num_blocks_x: width.div_ceil(4) as u32,
        num_blocks_y: height.div_ceil(4) as u32,
    };
    let indices: Vec<(u32, u32)> = (0..grid.total_blocks())
        .map(|i| (i % fixture.num_endpoints, (i * 3) % fixture.num_selectors))
        .collect();
    let payload = Etc1sPayload::new(
        fixture.endpoint_palette(),
        fixture.num_endpoints as u16,
        fixture.selector_palette(),
        fixture.num_selectors as u16,
        fixture.tables(),
    );
    ContainerBuilder::etc1s(TextureType::Texture2D, payload)
        .slice(SliceSpec::new(0, 0, width, height, fixture.explicit_slice(grid, &indices)))
        .build()
}
