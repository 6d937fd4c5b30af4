use crate::foundation::{
    core::Rgb8,
    error::{TokenArcError, TokenArcResult},
};

/// Rainbow palette the marquee arc and card halos are tinted with, red to violet.
pub const RAINBOW_COLORS: [Rgb8; 7] = [
    Rgb8::new(0xFF, 0x00, 0x00),
    Rgb8::new(0xFF, 0x7F, 0x00),
    Rgb8::new(0xFF, 0xFF, 0x00),
    Rgb8::new(0x00, 0xFF, 0x00),
    Rgb8::new(0x00, 0x00, 0xFF),
    Rgb8::new(0x4B, 0x00, 0x82),
    Rgb8::new(0x94, 0x00, 0xD3),
];

pub trait Lerp: Sized {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for Rgb8 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        fn lerp_u8(a: u8, b: u8, t: f64) -> u8 {
            let a = f64::from(a);
            let b = f64::from(b);
            (a + (b - a) * t).round().clamp(0.0, 255.0) as u8
        }

        Self {
            r: lerp_u8(a.r, b.r, t),
            g: lerp_u8(a.g, b.g, t),
            b: lerp_u8(a.b, b.b, t),
        }
    }
}

/// Blend two colors channel by channel; `t = 0` is `a`, `t = 1` is `b`.
pub fn interpolate_color(a: Rgb8, b: Rgb8, t: f64) -> Rgb8 {
    Rgb8::lerp(&a, &b, t)
}

/// Color of `palette` at normalized position `p`.
///
/// `p` is mapped to a fractional index into the palette and the two bracketing entries are
/// blended by the fractional part. Positions outside `[0, 1]` are clamped, so `p = 1` yields the
/// last entry.
pub fn palette_at(palette: &[Rgb8], p: f64) -> Rgb8 {
    let Some(last) = palette.len().checked_sub(1) else {
        return Rgb8::new(0, 0, 0);
    };
    let p = if p.is_finite() { p.clamp(0.0, 1.0) } else { 0.0 };

    let index = p * last as f64;
    let lower = (index.floor() as usize).min(last);
    let upper = (lower + 1).min(last);
    let t = index - lower as f64;

    interpolate_color(palette[lower], palette[upper], t)
}

pub fn rainbow_at(p: f64) -> Rgb8 {
    palette_at(&RAINBOW_COLORS, p)
}

/// Parse `#RRGGBB` (case-insensitive, leading `#` optional).
pub fn parse_hex(s: &str) -> TokenArcResult<Rgb8> {
    let s = s.trim();
    let s = s.strip_prefix('#').unwrap_or(s);

    fn hex_byte(pair: &str) -> TokenArcResult<u8> {
        u8::from_str_radix(pair, 16)
            .map_err(|_| TokenArcError::validation(format!("invalid hex byte \"{pair}\"")))
    }

    if s.len() != 6 || !s.is_ascii() {
        return Err(TokenArcError::validation(
            "hex color must be #RRGGBB (case-insensitive)",
        ));
    }

    Ok(Rgb8::new(
        hex_byte(&s[0..2])?,
        hex_byte(&s[2..4])?,
        hex_byte(&s[4..6])?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_with_and_without_hash() {
        assert_eq!(parse_hex("#ff0000").unwrap(), Rgb8::new(255, 0, 0));
        assert_eq!(parse_hex("4B0082").unwrap(), Rgb8::new(0x4B, 0x00, 0x82));
        assert!(parse_hex("#fff").is_err());
        assert!(parse_hex("#gg0000").is_err());
    }

    #[test]
    fn interpolation_endpoints_and_midpoint() {
        let a = Rgb8::new(255, 0, 0);
        let b = Rgb8::new(255, 127, 0);
        assert_eq!(interpolate_color(a, b, 0.0), a);
        assert_eq!(interpolate_color(a, b, 1.0), b);
        // 63.5 rounds up.
        assert_eq!(interpolate_color(a, b, 0.5), Rgb8::new(255, 64, 0));

        assert_eq!(
            interpolate_color(
                parse_hex("#000000").unwrap(),
                parse_hex("#FFFFFF").unwrap(),
                0.25
            ),
            Rgb8::new(64, 64, 64)
        );
    }

    #[test]
    fn rainbow_starts_at_red_and_approaches_violet() {
        assert_eq!(rainbow_at(0.0), RAINBOW_COLORS[0]);

        let near_end = rainbow_at(0.999_999);
        let violet = RAINBOW_COLORS[6];
        assert!(near_end.r.abs_diff(violet.r) <= 1);
        assert!(near_end.g.abs_diff(violet.g) <= 1);
        assert!(near_end.b.abs_diff(violet.b) <= 1);

        assert_eq!(rainbow_at(1.0), violet);
        assert_eq!(rainbow_at(2.0), violet);
    }

    #[test]
    fn rainbow_hits_palette_entries_at_knots() {
        for (i, expected) in RAINBOW_COLORS.iter().enumerate() {
            let p = i as f64 / 6.0;
            assert_eq!(rainbow_at(p), *expected, "knot {i}");
        }
    }

    #[test]
    fn rainbow_is_continuous() {
        let mut prev = rainbow_at(0.0);
        for step in 1..1000 {
            let c = rainbow_at(step as f64 / 1000.0);
            assert!(c.r.abs_diff(prev.r) <= 3);
            assert!(c.g.abs_diff(prev.g) <= 3);
            assert!(c.b.abs_diff(prev.b) <= 3);
            prev = c;
        }
    }

    #[test]
    fn empty_palette_is_black() {
        assert_eq!(palette_at(&[], 0.5), Rgb8::new(0, 0, 0));
    }
}
