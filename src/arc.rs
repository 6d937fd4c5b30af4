use std::f64::consts::PI;

/// Geometry of the arc the marquee cards travel along.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ArcGeometry {
    /// Higher is more curved; 0.3..0.8 reads best.
    pub curvature: f64,
    pub width: f64,
    pub arc_height: f64,
}

/// Where one card sits at a given loop position.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ArcPosition {
    pub x: f64,
    pub y: f64,
    pub scale: f64,
    pub opacity: f64,
    pub z_index: i64,
}

impl ArcGeometry {
    pub fn angle(&self, p: f64) -> f64 {
        (p - 0.5) * PI * self.curvature * 2.0
    }

    /// Map a normalized loop position `p` in `[0, 1)` onto the arc.
    ///
    /// `p = 0.5` is the apex: centred, full size, fully opaque and frontmost. Positions towards
    /// 0 or 1 move out to the edges, shrinking and fading. Scale and opacity are not clamped and
    /// go negative once the angle passes roughly ±0.4π (curvature above ~0.9 at the ends).
    pub fn position(&self, p: f64) -> ArcPosition {
        let angle = self.angle(p);
        let (sin, cos) = angle.sin_cos();

        let x = sin * (self.width / 2.0);
        let y = -cos * self.arc_height + self.arc_height;
        let scale = 0.6 + 0.4 * cos;
        let opacity = 0.3 + 0.7 * cos;
        let z_index = z_order(y);

        ArcPosition {
            x,
            y,
            scale,
            opacity,
            z_index,
        }
    }

    /// Quadratic SVG path for the glow stroke drawn behind the cards.
    pub fn glow_path_d(&self) -> String {
        let start_x = 50.0;
        let end_x = self.width - 50.0;
        let y = self.arc_height;
        let control_y = self.arc_height - self.arc_height * self.curvature * 2.0;

        format!(
            "M {start_x} {y} Q {} {control_y} {end_x} {y}",
            self.width / 2.0
        )
    }
}

/// Stacking order for a card `y` pixels below the apex. Halves round toward +inf.
fn z_order(y: f64) -> i64 {
    (100.0 - y + 0.5).floor() as i64
}
