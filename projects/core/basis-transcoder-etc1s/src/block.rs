//! ETC1S blocks as seen by the output packers.

use crate::{endpoint::Endpoint, selector::Selector};
use basis_transcoder_common::{
    decoded_4x4_block::Decoded4x4Block,
    etc1::{apply_modifier, expand5, Etc1Block, LINEAR_TO_ETC1_SELECTOR},
};
use basis_transcoder_formats::SourceBlock;

/// One decoded ETC1S block: a palette endpoint and a palette selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Etc1sBlock {
    /// Base colour and intensity table.
    pub endpoint: Endpoint,
    /// Linear selectors.
    pub selector: Selector,
}

impl Etc1sBlock {
    /// Pairs an endpoint with a selector.
    #[inline]
    pub const fn new(endpoint: Endpoint, selector: Selector) -> Self {
        Self { endpoint, selector }
    }
}

impl SourceBlock for Etc1sBlock {
    fn decode(&self) -> Decoded4x4Block {
        let base = self.endpoint.color5.map(expand5);
        let mut block = Decoded4x4Block::default();
        for y in 0..4 {
            for x in 0..4 {
                let color = apply_modifier(base, self.endpoint.inten, self.selector.get(x, y));
                block.set_pixel(x, y, color);
            }
        }
        block
    }

    /// ETC1S is a subset of ETC1: differential mode with a zero delta and
    /// one intensity table for both subblocks.
    fn to_etc1(&self) -> Option<Etc1Block> {
        let mut block = Etc1Block::default();
        block.set_diff_bit(true);
        block.set_flip_bit(false);
        block.set_base5_color(self.endpoint.color5);
        block.set_inten_table(0, self.endpoint.inten);
        block.set_inten_table(1, self.endpoint.inten);
        for y in 0..4 {
            for x in 0..4 {
                let linear = self.selector.get(x, y);
                block.set_selector(x, y, LINEAR_TO_ETC1_SELECTOR[linear as usize]);
            }
        }
        Some(block)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use basis_transcoder_common::color_8888::Color8888;
    use rstest::rstest;

    fn gradient() -> Selector {
        let mut s = Selector::default();
        for y in 0..4 {
            for x in 0..4 {
                s.set(x, y, ((x + y) % 4) as u8);
            }
        }
        s
    }

    #[rstest]
    #[case(Endpoint::new([16, 8, 4], 0))]
    #[case(Endpoint::new([31, 0, 17], 5))]
    #[case(Endpoint::new([0, 0, 0], 7))]
    fn exact_etc1_decodes_like_source(#[case] endpoint: Endpoint) {
        let block = Etc1sBlock::new(endpoint, gradient());
        let etc1 = block.to_etc1().unwrap();
        assert!(etc1.diff_bit());
        assert_eq!(etc1.decode(), block.decode());
    }

    #[test]
    fn applies_intensity_modifier() {
        let mut selector = Selector::default();
        selector.set(2, 1, 3);
        let block = Etc1sBlock::new(Endpoint::new([16, 16, 16], 0), selector);
        let decoded = block.decode();
        // expand5(16) = 132; table 0 spans -8..=8.
        assert_eq!(decoded.get_pixel(0, 0), Color8888::new(124, 124, 124, 255));
        assert_eq!(decoded.get_pixel(2, 1), Color8888::new(140, 140, 140, 255));
    }
}
