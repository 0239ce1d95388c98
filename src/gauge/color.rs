/// Plain 8-bit RGB triple, kept free of any terminal color type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses `#rrggbb` (the leading `#` is optional).
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Self { r, g, b })
    }

    pub fn to_hsv(self) -> Hsv {
        let r = self.r as f64;
        let g = self.g as f64;
        let b = self.b as f64;
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;

        let saturation = if max == 0.0 {
            0
        } else {
            (255.0 * delta / max).round() as u8
        };

        // Achromatic colors report hue 0.
        let hue = if delta == 0.0 {
            0.0
        } else if max == r {
            60.0 * ((g - b) / delta)
        } else if max == g {
            60.0 * ((b - r) / delta + 2.0)
        } else {
            60.0 * ((r - g) / delta + 4.0)
        };
        let hue = (hue.round() as i32).rem_euclid(360) as u16;

        Hsv {
            hue,
            saturation,
            value: max as u8,
        }
    }
}

/// HSV on the 0-359 / 0-255 / 0-255 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hsv {
    pub hue: u16,
    pub saturation: u8,
    pub value: u8,
}

impl Hsv {
    pub fn to_rgb(self) -> Rgb {
        let s = self.saturation as f64 / 255.0;
        let v = self.value as f64;
        if self.saturation == 0 {
            let v = self.value;
            return Rgb::new(v, v, v);
        }

        let h = (self.hue % 360) as f64 / 60.0;
        let sector = h.floor();
        let f = h - sector;
        let p = v * (1.0 - s);
        let q = v * (1.0 - s * f);
        let t = v * (1.0 - s * (1.0 - f));

        let (r, g, b) = match sector as u8 {
            0 => (v, t, p),
            1 => (q, v, p),
            2 => (p, v, t),
            3 => (p, q, v),
            4 => (t, p, v),
            _ => (v, p, q),
        };
        Rgb::new(r.round() as u8, g.round() as u8, b.round() as u8)
    }
}

pub const TRACK_SATURATION_FACTOR: f64 = 0.65;
pub const TRACK_VALUE_FACTOR: f64 = 0.40;

/// Duller track color for a gauge: same hue, reduced saturation and brightness.
pub fn derive_track_hsv(foreground: Hsv) -> Hsv {
    Hsv {
        hue: foreground.hue,
        saturation: (foreground.saturation as f64 * TRACK_SATURATION_FACTOR).round() as u8,
        value: (foreground.value as f64 * TRACK_VALUE_FACTOR).round() as u8,
    }
}

pub fn derive_track_color(foreground: Rgb) -> Rgb {
    derive_track_hsv(foreground.to_hsv()).to_rgb()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_with_and_without_hash() {
        assert_eq!(Rgb::from_hex("#FF2D71"), Some(Rgb::new(255, 45, 113)));
        assert_eq!(Rgb::from_hex("cc53ff"), Some(Rgb::new(204, 83, 255)));
        assert_eq!(Rgb::from_hex("#FFF"), None);
        assert_eq!(Rgb::from_hex("#GG0000"), None);
    }

    #[test]
    fn rgb_to_hsv_matches_known_color() {
        let hsv = Rgb::new(255, 45, 113).to_hsv();
        assert_eq!(
            hsv,
            Hsv {
                hue: 341,
                saturation: 210,
                value: 255
            }
        );
    }

    #[test]
    fn grey_has_zero_saturation() {
        let hsv = Rgb::new(90, 90, 90).to_hsv();
        assert_eq!(hsv.saturation, 0);
        assert_eq!(hsv.value, 90);
        assert_eq!(hsv.to_rgb(), Rgb::new(90, 90, 90));
    }

    #[test]
    fn track_reduces_saturation_and_value() {
        let track = derive_track_hsv(Hsv {
            hue: 341,
            saturation: 210,
            value: 255,
        });
        assert_eq!(track.hue, 341);
        assert_eq!(track.saturation, 137);
        assert_eq!(track.value, 102);
    }

    #[test]
    fn derived_track_keeps_channel_order() {
        let track = derive_track_color(Rgb::new(255, 45, 113));
        assert_eq!(track.r, 102);
        assert!(track.g < track.b);
        assert!(track.b < track.r);
    }

    #[test]
    fn primary_colors_round_trip() {
        for rgb in [
            Rgb::new(255, 0, 0),
            Rgb::new(0, 255, 0),
            Rgb::new(0, 0, 255),
            Rgb::new(255, 255, 0),
        ] {
            assert_eq!(rgb.to_hsv().to_rgb(), rgb);
        }
    }
}
