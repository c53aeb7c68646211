use crate::color_8888::Color8888;

/// Represents a 16-bit RGB565 color (5 bits red, 6 bits green, 5 bits blue)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Color565 {
    value: u16,
}

impl Color565 {
    /// Creates a new [`Color565`] from the raw 16-bit value
    #[inline]
    pub const fn from_raw(value: u16) -> Self {
        Self { value }
    }

    /// Creates a new [`Color565`] by truncating 8-bit components.
    #[inline]
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            value: ((r as u16 & 0xF8) << 8) | ((g as u16 & 0xFC) << 3) | (b as u16 >> 3),
        }
    }

    /// Creates a new [`Color565`] by rounding 8-bit components to the nearest representable value.
    #[inline]
    pub const fn from_rgb_rounded(r: u8, g: u8, b: u8) -> Self {
        let r5 = (r as u16 * 31 + 127) / 255;
        let g6 = (g as u16 * 63 + 127) / 255;
        let b5 = (b as u16 * 31 + 127) / 255;
        Self {
            value: (r5 << 11) | (g6 << 5) | b5,
        }
    }

    /// Returns the raw 16-bit value
    #[inline]
    pub const fn raw_value(&self) -> u16 {
        self.value
    }

    /// Extracts the expanded 8-bit red component
    #[inline]
    pub const fn red(&self) -> u8 {
        let r = (self.value & 0b11111000_00000000) >> 11;
        ((r << 3) | (r >> 2)) as u8
    }

    /// Extracts the expanded 8-bit green component
    #[inline]
    pub const fn green(&self) -> u8 {
        let g = (self.value & 0b00000111_11100000) >> 5;
        ((g << 2) | (g >> 4)) as u8
    }

    /// Extracts the expanded 8-bit blue component
    #[inline]
    pub const fn blue(&self) -> u8 {
        let b = self.value & 0b00000000_00011111;
        ((b << 3) | (b >> 2)) as u8
    }

    /// Converts this [`Color565`] to a [`Color8888`] with full opacity (alpha=255)
    ///
    /// # Examples
    ///
    /// ```
    /// use basis_transcoder_common::color_565::Color565;
    ///
    /// let rgba = Color565::from_rgb(255, 0, 0).to_color_8888();
    /// assert_eq!((rgba.r, rgba.g, rgba.b, rgba.a), (255, 0, 0, 255));
    /// ```
    pub const fn to_color_8888(&self) -> Color8888 {
        Color8888::new(self.red(), self.green(), self.blue(), 255)
    }
}
