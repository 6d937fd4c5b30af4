//! One marquee frame as a single SVG document.

use std::fmt::Write as _;

use crate::{
    card::{CARD_HEIGHT, CARD_WIDTH, CardView},
    color::RAINBOW_COLORS,
    foundation::core::{Placement, Vec2},
    marquee::{Marquee, MarqueeFrame},
    svg::{self, unit},
};

pub const BACKGROUND: &str = "#050507";

/// Distance from the container top to the card row.
const CARD_TOP: f64 = 50.0;
const EDGE_FADE_WIDTH: f64 = 128.0;

/// Compose `frame` of `marquee`: glow arc, cards back to front, edge fades.
///
/// Instances whose arc scale or opacity has gone non-positive (very high curvature) are left out;
/// visible ones get their opacity clamped to `[0, 1]`.
pub fn marquee_svg(marquee: &Marquee, frame: &MarqueeFrame) -> String {
    let config = marquee.config();
    let canvas = config.canvas();
    let (w, h) = (f64::from(canvas.width), f64::from(canvas.height));

    let mut s = String::with_capacity(4096 + frame.instances.len() * 2560);
    svg::open_document(&mut s, w, h);

    s.push_str("<defs>");
    s.push_str(r#"<filter id="halo" x="-50%" y="-50%" width="200%" height="200%"><feGaussianBlur stdDeviation="12"/></filter>"#);
    let _ = write!(
        s,
        r##"<linearGradient id="fade-l" x1="0" y1="0" x2="1" y2="0"><stop offset="0" stop-color="{BACKGROUND}"/><stop offset="1" stop-color="{BACKGROUND}" stop-opacity="0"/></linearGradient><linearGradient id="fade-r" x1="1" y1="0" x2="0" y2="0"><stop offset="0" stop-color="{BACKGROUND}"/><stop offset="1" stop-color="{BACKGROUND}" stop-opacity="0"/></linearGradient>"##
    );
    if config.show_rainbow_glow {
        s.push_str(r#"<linearGradient id="rainbow" x1="0%" y1="0%" x2="100%" y2="0%">"#);
        let last = (RAINBOW_COLORS.len() - 1) as f64;
        for (i, color) in RAINBOW_COLORS.iter().enumerate() {
            let _ = write!(
                s,
                r#"<stop offset="{:.3}%" stop-color="{}"/>"#,
                i as f64 / last * 100.0,
                color.to_hex()
            );
        }
        s.push_str("</linearGradient>");
        s.push_str(r#"<filter id="glow" x="-50%" y="-50%" width="200%" height="200%"><feGaussianBlur stdDeviation="20" result="coloredBlur"/><feMerge><feMergeNode in="coloredBlur"/><feMergeNode in="SourceGraphic"/></feMerge></filter>"#);
    }
    s.push_str("</defs>");

    let _ = write!(s, r#"<rect width="{w}" height="{h}" fill="{BACKGROUND}"/>"#);

    if config.show_rainbow_glow {
        let _ = write!(
            s,
            r#"<g opacity="0.3"><path d="{}" fill="none" stroke="url(#rainbow)" stroke-width="4" stroke-linecap="round" filter="url(#glow)"/></g>"#,
            config.geometry().glow_path_d()
        );
    }

    let views: Vec<CardView> = marquee.tokens().iter().map(CardView::from_token).collect();
    let anchor = Vec2::new(CARD_WIDTH / 2.0, CARD_HEIGHT / 2.0);
    let centre_x = w / 2.0;

    for inst in frame.paint_order() {
        let pos = inst.position;
        if pos.scale <= 0.0 || pos.opacity <= 0.0 {
            continue;
        }

        let placement = Placement {
            translate: Vec2::new(centre_x + pos.x - CARD_WIDTH / 2.0, CARD_TOP + pos.y),
            scale: pos.scale,
            anchor,
        };

        let _ = write!(
            s,
            r#"<g transform="{}" opacity="{:.4}">"#,
            placement.to_svg_matrix(),
            unit(pos.opacity)
        );
        let _ = write!(
            s,
            r#"<rect x="-10" y="-8" width="{}" height="{}" rx="16" fill="{}" opacity="0.3" filter="url(#halo)"/>"#,
            CARD_WIDTH + 20.0,
            CARD_HEIGHT + 16.0,
            inst.glow.to_hex()
        );
        s.push_str(&views[inst.token].svg_fragment(&format!("c{}", inst.slot)));
        s.push_str("</g>");
    }

    let _ = write!(
        s,
        r#"<rect width="{EDGE_FADE_WIDTH}" height="{h}" fill="url(#fade-l)"/><rect x="{}" width="{EDGE_FADE_WIDTH}" height="{h}" fill="url(#fade-r)"/>"#,
        w - EDGE_FADE_WIDTH
    );

    svg::close_document(&mut s);
    s
}
