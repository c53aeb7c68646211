//! # Decoded 4x4 Block
//!
//! [`Decoded4x4Block`] is the common currency between the source decoders
//! (ETC1S, UASTC) and the output block packers. Pixels are stored in
//! row-major order:
//!
//! ```text
//! [ 0] [ 1] [ 2] [ 3]
//! [ 4] [ 5] [ 6] [ 7]
//! [ 8] [ 9] [10] [11]
//! [12] [13] [14] [15]
//! ```

use crate::color_8888::Color8888;

/// A decoded 4x4 block of RGBA texels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoded4x4Block {
    /// The 16 pixels in the block (row-major order)
    /// (i.e. `pixels[0]` is top-left, `pixels[3]` is top-right, etc.)
    pub pixels: [Color8888; 16],
}

impl Default for Decoded4x4Block {
    fn default() -> Self {
        Self::new(Color8888::BLACK)
    }
}

impl Decoded4x4Block {
    /// Constructs a block where every pixel is `pixel`.
    ///
    /// ```
    /// use basis_transcoder_common::color_8888::Color8888;
    /// use basis_transcoder_common::decoded_4x4_block::Decoded4x4Block;
    ///
    /// let pixel = Color8888::new(255, 0, 0, 255);
    /// let block = Decoded4x4Block::new(pixel);
    /// assert!(block.pixels.iter().all(|&p| p == pixel));
    /// ```
    pub const fn new(pixel: Color8888) -> Self {
        Self {
            pixels: [pixel; 16],
        }
    }

    /// Gets the pixel at column `x`, row `y`.
    #[inline]
    pub fn get_pixel(&self, x: usize, y: usize) -> Color8888 {
        self.pixels[y * 4 + x]
    }

    /// Sets the pixel at column `x`, row `y`.
    #[inline]
    pub fn set_pixel(&mut self, x: usize, y: usize, pixel: Color8888) {
        self.pixels[y * 4 + x] = pixel;
    }

    /// Returns true if all pixels are identical.
    #[inline]
    pub fn has_identical_pixels(&self) -> bool {
        let first = self.pixels[0];
        self.pixels.iter().all(|&p| p == first)
    }

    /// Returns true if every pixel is fully opaque.
    #[inline]
    pub fn is_opaque(&self) -> bool {
        self.pixels.iter().all(|p| p.a == 255)
    }

    /// Sets alpha to 255 for every pixel.
    pub fn make_opaque(&mut self) {
        for p in &mut self.pixels {
            p.a = 255;
        }
    }

    /// Replaces each pixel's alpha with the green channel of `alpha_source`.
    ///
    /// Alpha slices store their values in the colour channels, so green carries them.
    pub fn merge_alpha_from(&mut self, alpha_source: &Decoded4x4Block) {
        for (p, a) in self.pixels.iter_mut().zip(alpha_source.pixels.iter()) {
            p.a = a.g;
        }
    }

    /// Replaces RGB with the alpha value of each pixel, keeping the block opaque.
    pub fn alpha_to_rgb(&mut self) {
        for p in &mut self.pixels {
            *p = Color8888::new(p.a, p.a, p.a, 255);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_accessors_are_row_major() {
        let mut block = Decoded4x4Block::default();
        let red = Color8888::new(255, 0, 0, 255);
        block.set_pixel(3, 1, red);
        assert_eq!(block.pixels[7], red);
        assert_eq!(block.get_pixel(3, 1), red);
        assert!(!block.has_identical_pixels());
    }

    #[test]
    fn merges_alpha_from_green() {
        let mut color = Decoded4x4Block::new(Color8888::new(10, 20, 30, 255));
        let alpha = Decoded4x4Block::new(Color8888::new(0, 77, 0, 255));
        color.merge_alpha_from(&alpha);
        assert!(color.pixels.iter().all(|p| *p == Color8888::new(10, 20, 30, 77)));
        assert!(!color.is_opaque());
    }

    #[test]
    fn alpha_to_rgb_replicates() {
        let mut block = Decoded4x4Block::new(Color8888::new(1, 2, 3, 99));
        block.alpha_to_rgb();
        assert_eq!(block.pixels[0], Color8888::new(99, 99, 99, 255));
    }
}
