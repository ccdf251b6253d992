//! Material Palette
//!
//! Flat-color materials shared by reference across the model. Colors are
//! the device palette from the schematics renderer; glass is the only
//! translucent entry.

/// Stable identifier for a material in the palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MaterialId {
    Base,
    Chip,
    Needle,
    Slider,
    Cap,
    Glass,
    PortBore,
}

impl MaterialId {
    /// Every palette entry, in display order.
    pub const ALL: [MaterialId; 7] = [
        MaterialId::Base,
        MaterialId::Chip,
        MaterialId::Needle,
        MaterialId::Slider,
        MaterialId::Cap,
        MaterialId::Glass,
        MaterialId::PortBore,
    ];

    /// Human-readable material name (export metadata only).
    pub fn label(&self) -> &'static str {
        match self {
            MaterialId::Base => "Cassette Base",
            MaterialId::Chip => "Microchip",
            MaterialId::Needle => "Needle/Port",
            MaterialId::Slider => "Sliding Track",
            MaterialId::Cap => "Top Cap",
            MaterialId::Glass => "Glass",
            MaterialId::PortBore => "Port Bore",
        }
    }

    /// Base color as RGBA in 0..1.
    pub fn color(&self) -> [f32; 4] {
        match self {
            MaterialId::Base => rgb(0xf2, 0xf2, 0xf2),
            MaterialId::Chip => rgb(0x2b, 0x2b, 0x2b),
            MaterialId::Needle => rgb(0xff, 0x41, 0x36),
            MaterialId::Slider => rgb(0x00, 0x77, 0xff),
            MaterialId::Cap => rgb(0xff, 0xdc, 0x00),
            MaterialId::Glass => [0xdb as f32 / 255.0, 0xfe as f32 / 255.0, 0xfe as f32 / 255.0, 0.3],
            MaterialId::PortBore => rgb(0x99, 0x22, 0x11),
        }
    }

    /// Whether the material needs alpha blending.
    pub fn is_transparent(&self) -> bool {
        self.color()[3] < 1.0
    }
}

fn rgb(r: u8, g: u8, b: u8) -> [f32; 4] {
    [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_glass_is_transparent() {
        for id in MaterialId::ALL {
            assert_eq!(id.is_transparent(), id == MaterialId::Glass);
        }
    }

    #[test]
    fn test_colors_in_range() {
        for id in MaterialId::ALL {
            for c in id.color() {
                assert!((0.0..=1.0).contains(&c));
            }
        }
    }
}
