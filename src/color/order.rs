//! Wire order of color channels
//!
//! Adalight firmware copies payload bytes straight into the strip driver, so
//! the order must match the chip. WS2812 strips are natively GRB; most
//! Adalight sketches reorder on the device and expect RGB.

/// Order in which the three channels of one LED are written to the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChannelOrder {
    #[default]
    Rgb,
    Rbg,
    Grb,
    Gbr,
    Brg,
    Bgr,
}

impl ChannelOrder {
    /// Indices into an `[r, g, b]` triple, in wire order
    pub const fn indices(self) -> [usize; 3] {
        match self {
            Self::Rgb => [0, 1, 2],
            Self::Rbg => [0, 2, 1],
            Self::Grb => [1, 0, 2],
            Self::Gbr => [1, 2, 0],
            Self::Brg => [2, 0, 1],
            Self::Bgr => [2, 1, 0],
        }
    }

    /// Reorder an `[r, g, b]` triple into wire order
    #[inline]
    pub const fn arrange(self, rgb: [u8; 3]) -> [u8; 3] {
        let [a, b, c] = self.indices();
        [rgb[a], rgb[b], rgb[c]]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rgb => "rgb",
            Self::Rbg => "rbg",
            Self::Grb => "grb",
            Self::Gbr => "gbr",
            Self::Brg => "brg",
            Self::Bgr => "bgr",
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        Some(match s {
            "rgb" => Self::Rgb,
            "rbg" => Self::Rbg,
            "grb" => Self::Grb,
            "gbr" => Self::Gbr,
            "brg" => Self::Brg,
            "bgr" => Self::Bgr,
            _ => return None,
        })
    }
}
