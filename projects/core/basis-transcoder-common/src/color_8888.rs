/// A single RGBA8888 texel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Color8888 {
    /// Red component (0-255)
    pub r: u8,
    /// Green component (0-255)
    pub g: u8,
    /// Blue component (0-255)
    pub b: u8,
    /// Alpha component (0-255)
    pub a: u8,
}

impl Color8888 {
    /// Opaque black.
    pub const BLACK: Self = Self::new(0, 0, 0, 255);

    /// Constructs a new [`Color8888`] from the specified red, green, blue, and alpha components.
    ///
    /// # Examples
    ///
    /// ```
    /// use basis_transcoder_common::color_8888::Color8888;
    ///
    /// let pixel = Color8888::new(255, 0, 0, 255);
    /// assert_eq!(pixel.r, 255);
    /// assert_eq!(pixel.a, 255);
    /// ```
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Returns the channel at `index` (0 = red, 3 = alpha).
    #[inline]
    pub fn channel(&self, index: usize) -> u8 {
        match index {
            0 => self.r,
            1 => self.g,
            2 => self.b,
            _ => self.a,
        }
    }

    /// Sets the channel at `index` (0 = red, 3 = alpha).
    #[inline]
    pub fn set_channel(&mut self, index: usize, value: u8) {
        match index {
            0 => self.r = value,
            1 => self.g = value,
            2 => self.b = value,
            _ => self.a = value,
        }
    }

    /// Rec. 601 style integer luma, used to order colours along a block's axis.
    #[inline]
    pub fn luma(&self) -> u32 {
        (self.r as u32 * 77 + self.g as u32 * 150 + self.b as u32 * 29) >> 8
    }

    /// Returns the colour with alpha replaced.
    #[inline]
    pub fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }
}
