//! The liquid-metal call-to-action button.
//!
//! A pill with a metallic, slowly rotating gradient border around a solid green core. The
//! border sweeps `repetition` bands of back/tint color; `speed` is turns per second and
//! `distortion` wobbles the band spacing over time.

use std::{f64::consts::TAU, fmt::Write as _};

use crate::{
    color::parse_hex,
    foundation::{
        core::Rgb8,
        error::{TokenArcError, TokenArcResult},
    },
    svg::{self, escape},
};

const CORE_FILL: &str = "#02FF40";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonSize {
    Sm,
    #[default]
    Md,
    Lg,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct SizeMetrics {
    pad_y: f64,
    pad_left: f64,
    pad_right: f64,
    gap: f64,
    font_size: f64,
    icon: f64,
}

impl ButtonSize {
    fn metrics(self) -> SizeMetrics {
        match self {
            Self::Sm => SizeMetrics {
                pad_y: 8.0,
                pad_left: 8.0,
                pad_right: 24.0,
                gap: 8.0,
                font_size: 18.0,
                icon: 32.0,
            },
            Self::Md => SizeMetrics {
                pad_y: 12.0,
                pad_left: 12.0,
                pad_right: 32.0,
                gap: 12.0,
                font_size: 20.0,
                icon: 40.0,
            },
            Self::Lg => SizeMetrics {
                pad_y: 16.0,
                pad_left: 16.0,
                pad_right: 40.0,
                gap: 16.0,
                font_size: 24.0,
                icon: 48.0,
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LiquidMetalConfig {
    pub color_back: String,
    pub color_tint: String,
    pub speed: f64,
    pub repetition: u32,
    pub distortion: f64,
    pub scale: f64,
}

impl Default for LiquidMetalConfig {
    fn default() -> Self {
        Self {
            color_back: CORE_FILL.to_owned(),
            color_tint: "#bbf7d0".to_owned(),
            speed: 0.4,
            repetition: 4,
            distortion: 0.15,
            scale: 1.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ButtonConfig {
    pub label: String,
    /// Optional single glyph shown in a round slot left of the label.
    pub icon: Option<String>,
    pub border_width: f64,
    pub size: ButtonSize,
    pub metal: LiquidMetalConfig,
    pub disabled: bool,
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self {
            label: "Launch a token".to_owned(),
            icon: None,
            border_width: 4.0,
            size: ButtonSize::Md,
            metal: LiquidMetalConfig::default(),
            disabled: false,
        }
    }
}

/// Pixel box of a laid-out button.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ButtonBox {
    pub width: f64,
    pub height: f64,
}

pub struct LiquidMetalButton {
    config: ButtonConfig,
    back: Rgb8,
    tint: Rgb8,
}

impl LiquidMetalButton {
    pub fn new(config: ButtonConfig) -> TokenArcResult<Self> {
        if !(config.border_width.is_finite() && config.border_width >= 0.0) {
            return Err(TokenArcError::validation("border width must be >= 0"));
        }
        if config.metal.repetition == 0 {
            return Err(TokenArcError::validation("repetition must be >= 1"));
        }
        if !(config.metal.scale.is_finite() && config.metal.scale > 0.0) {
            return Err(TokenArcError::validation("metal scale must be > 0"));
        }
        if !config.metal.speed.is_finite() || !config.metal.distortion.is_finite() {
            return Err(TokenArcError::validation(
                "metal speed and distortion must be finite",
            ));
        }
        let back = parse_hex(&config.metal.color_back)?;
        let tint = parse_hex(&config.metal.color_tint)?;
        Ok(Self { config, back, tint })
    }

    pub fn config(&self) -> &ButtonConfig {
        &self.config
    }

    /// Size of the whole button, border included. Text width is estimated from the label length.
    pub fn layout(&self) -> ButtonBox {
        let m = self.config.size.metrics();
        let text_w = 0.6 * m.font_size * self.config.label.chars().count() as f64;
        let icon_w = if self.config.icon.is_some() {
            m.icon + m.gap
        } else {
            0.0
        };
        let inner_h = if self.config.icon.is_some() {
            m.icon + 2.0 * m.pad_y
        } else {
            1.4 * m.font_size + 2.0 * m.pad_y
        };
        let inner_w = m.pad_left + icon_w + text_w + m.pad_right;
        let bw = self.config.border_width;

        ButtonBox {
            width: (inner_w + 2.0 * bw).ceil(),
            height: (inner_h + 2.0 * bw).ceil(),
        }
    }

    /// Border gradient rotation in degrees at time `t_secs`.
    pub fn sweep_degrees(&self, t_secs: f64) -> f64 {
        (45.0 + 360.0 * self.config.metal.speed * t_secs).rem_euclid(360.0)
    }

    /// Standalone SVG document for the button at time `t_secs`.
    pub fn svg_document(&self, t_secs: f64) -> String {
        let b = self.layout();
        let mut s = String::with_capacity(2048);
        svg::open_document(&mut s, b.width, b.height);
        s.push_str(&self.svg_fragment(t_secs));
        svg::close_document(&mut s);
        s
    }

    pub fn svg_fragment(&self, t_secs: f64) -> String {
        let cfg = &self.config;
        let m = cfg.size.metrics();
        let b = self.layout();
        let bw = cfg.border_width;
        let r = b.height / 2.0;

        let mut s = String::with_capacity(2048);

        // Metal bands: back/tint alternating `repetition` times, spacing wobbling with distortion.
        let reps = f64::from(cfg.metal.repetition);
        let wobble = cfg.metal.distortion * (TAU * cfg.metal.speed * t_secs).sin();
        s.push_str(r#"<defs><linearGradient id="metal" gradientUnits="objectBoundingBox" x1="0" y1="0" x2="1" y2="0" spreadMethod="repeat""#);
        let _ = write!(
            s,
            r#" gradientTransform="rotate({:.3} 0.5 0.5) scale({:.4} 1)">"#,
            self.sweep_degrees(t_secs),
            1.0 / (reps * cfg.metal.scale)
        );
        let stops = [
            (0.0, self.back),
            ((0.5 + wobble).clamp(0.05, 0.95), self.tint),
            (1.0, self.back),
        ];
        for (offset, color) in stops {
            let _ = write!(
                s,
                r#"<stop offset="{offset:.4}" stop-color="{}"/>"#,
                color.to_hex()
            );
        }
        s.push_str("</linearGradient></defs>");

        let group_opacity = if cfg.disabled { 0.5 } else { 1.0 };
        let _ = write!(s, r#"<g opacity="{group_opacity}">"#);

        let _ = write!(
            s,
            r#"<rect width="{}" height="{}" rx="{r}" fill="url(#metal)"/>"#,
            b.width, b.height
        );
        let _ = write!(
            s,
            r#"<rect x="{bw}" y="{bw}" width="{}" height="{}" rx="{}" fill="{CORE_FILL}"/>"#,
            b.width - 2.0 * bw,
            b.height - 2.0 * bw,
            (r - bw).max(0.0)
        );

        let mut text_x = bw + m.pad_left;
        let mid_y = b.height / 2.0;
        if let Some(icon) = &cfg.icon {
            let _ = write!(
                s,
                r##"<text x="{}" y="{}" text-anchor="middle" font-family="sans-serif" font-size="{}" fill="#000000">{}</text>"##,
                text_x + m.icon / 2.0,
                mid_y + m.font_size * 0.35,
                m.font_size,
                escape(icon)
            );
            text_x += m.icon + m.gap;
        }
        let _ = write!(
            s,
            r##"<text x="{text_x}" y="{}" font-family="sans-serif" font-size="{}" font-weight="600" fill="#000000">{}</text>"##,
            mid_y + m.font_size * 0.35,
            m.font_size,
            escape(&cfg.label)
        );

        s.push_str("</g>");
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_brand() {
        let cfg = ButtonConfig::default();
        assert_eq!(cfg.metal.color_back, "#02FF40");
        assert_eq!(cfg.metal.color_tint, "#bbf7d0");
        assert_eq!(cfg.metal.repetition, 4);
        assert_eq!(cfg.border_width, 4.0);
        assert_eq!(cfg.size, ButtonSize::Md);
    }

    #[test]
    fn rejects_bad_knobs() {
        let mut cfg = ButtonConfig::default();
        cfg.metal.color_tint = "green".to_owned();
        assert!(LiquidMetalButton::new(cfg).is_err());

        let mut cfg = ButtonConfig::default();
        cfg.metal.repetition = 0;
        assert!(LiquidMetalButton::new(cfg).is_err());

        let cfg = ButtonConfig {
            border_width: -2.0,
            ..ButtonConfig::default()
        };
        assert!(LiquidMetalButton::new(cfg).is_err());
    }

    #[test]
    fn larger_sizes_are_larger() {
        let boxes: Vec<ButtonBox> = [ButtonSize::Sm, ButtonSize::Md, ButtonSize::Lg]
            .into_iter()
            .map(|size| {
                LiquidMetalButton::new(ButtonConfig {
                    size,
                    ..ButtonConfig::default()
                })
                .unwrap()
                .layout()
            })
            .collect();
        assert!(boxes[0].width < boxes[1].width && boxes[1].width < boxes[2].width);
        assert!(boxes[0].height < boxes[1].height && boxes[1].height < boxes[2].height);
    }

    #[test]
    fn sweep_rotates_with_speed() {
        let button = LiquidMetalButton::new(ButtonConfig::default()).unwrap();
        assert_eq!(button.sweep_degrees(0.0), 45.0);
        // 0.4 turns/s for 2.5 s is a full turn.
        assert!((button.sweep_degrees(2.5) - 45.0).abs() < 1e-9);
    }

    #[test]
    fn document_contains_label_and_core() {
        let button = LiquidMetalButton::new(ButtonConfig {
            label: "Go <now>".to_owned(),
            icon: Some("$".to_owned()),
            disabled: true,
            ..ButtonConfig::default()
        })
        .unwrap();
        let doc = button.svg_document(1.0);
        assert!(doc.starts_with("<svg "));
        assert!(doc.contains("Go &lt;now&gt;"));
        assert!(doc.contains(r##"fill="#02FF40""##));
        assert!(doc.contains(r#"opacity="0.5""#));
    }
}
