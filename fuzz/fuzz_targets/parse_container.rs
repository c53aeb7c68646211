#![no_main]

// Arbitrary bytes must either be rejected or yield a container whose queries agree.

use basis_transcoder_container::{Container, ParseOptions};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    for options in [ParseOptions::default(), ParseOptions { skip_crc: true }] {
        let Ok(container) = Container::parse_with(data, options) else {
            continue;
        };

        let info = container.file_info();
        assert_eq!(info.total_images, container.total_images());
        assert_eq!(info.image_mipmap_levels.len(), info.total_images as usize);

        for image in 0..container.total_images() {
            let levels = container.total_levels(image).unwrap();
            let image_info = container.image_info(image).unwrap();
            assert_eq!(image_info.total_levels, levels);

            for level in 0..levels {
                let level_info = container.image_level_info(image, level).unwrap();
                assert_eq!(
                    level_info.total_blocks,
                    level_info.num_blocks_x * level_info.num_blocks_y
                );
                assert!(container.slice_data(level_info.first_slice_index).is_some());
            }
            assert!(container.image_level_info(image, levels).is_err());
        }
        assert!(container.image_info(container.total_images()).is_err());
    }
});
