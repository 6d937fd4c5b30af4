//! Rainbow arc marquee: cards orbit along an arc on a repeating loop.
//!
//! A [`Marquee`] owns the token list and its tuning knobs. Animation only happens while it is
//! mounted: [`Marquee::mount`] hands back a [`MountedMarquee`] guard bound to a [`TimeSource`],
//! and every [`MountedMarquee::tick`] re-reads the clock and lays out all card instances from
//! scratch. Dropping the guard ends the animation.

use std::time::Duration;

use crate::{
    arc::{ArcGeometry, ArcPosition},
    card::MarqueeToken,
    clock::{TimeSource, loop_progress},
    color::rainbow_at,
    foundation::{
        core::{Canvas, Rgb8},
        error::{TokenArcError, TokenArcResult},
    },
};

/// The token list is repeated this many times so the loop has no visible seam.
pub const COPIES: usize = 3;

/// Vertical room below the arc for the cards themselves.
pub const CARD_HEADROOM: f64 = 280.0;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct MarqueeConfig {
    /// Higher is more curved (0.3..0.8 recommended).
    pub curvature: f64,
    /// Seconds for one full loop.
    pub duration_secs: f64,
    pub width: f64,
    /// Depth of the arc curve.
    pub arc_height: f64,
    pub show_rainbow_glow: bool,
}

impl Default for MarqueeConfig {
    fn default() -> Self {
        Self {
            curvature: 0.5,
            duration_secs: 20.0,
            width: 1200.0,
            arc_height: 200.0,
            show_rainbow_glow: true,
        }
    }
}

impl MarqueeConfig {
    pub fn validate(&self) -> TokenArcResult<()> {
        if !self.curvature.is_finite() {
            return Err(TokenArcError::validation("curvature must be finite"));
        }
        if !(self.duration_secs.is_finite() && self.duration_secs > 0.0) {
            return Err(TokenArcError::validation("duration must be > 0 seconds"));
        }
        if Duration::try_from_secs_f64(self.duration_secs).is_err() {
            return Err(TokenArcError::validation(format!(
                "duration {}s is too long",
                self.duration_secs
            )));
        }
        if !(self.width.is_finite() && self.width > 0.0) {
            return Err(TokenArcError::validation("width must be > 0"));
        }
        if !(self.arc_height.is_finite() && self.arc_height >= 0.0) {
            return Err(TokenArcError::validation("arc height must be >= 0"));
        }
        Ok(())
    }

    pub fn geometry(&self) -> ArcGeometry {
        ArcGeometry {
            curvature: self.curvature,
            width: self.width,
            arc_height: self.arc_height,
        }
    }

    /// Saturates to `Duration::MAX` for durations `validate` rejects as too long.
    pub fn loop_duration(&self) -> Duration {
        Duration::try_from_secs_f64(self.duration_secs).unwrap_or(Duration::MAX)
    }

    /// Pixel size of the marquee container.
    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width.ceil() as u32,
            height: (self.arc_height + CARD_HEADROOM).ceil() as u32,
        }
    }
}

/// One rendered copy of a token at one point in time.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct MarqueeInstance {
    /// Index into the duplicated list, `0..COPIES * tokens.len()`.
    pub slot: usize,
    /// Index into the original token list.
    pub token: usize,
    pub progress: f64,
    pub position: ArcPosition,
    pub glow: Rgb8,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct MarqueeFrame {
    pub progress: f64,
    pub instances: Vec<MarqueeInstance>,
}

impl MarqueeFrame {
    /// Instances back to front (ascending z-index); ties keep slot order.
    pub fn paint_order(&self) -> Vec<&MarqueeInstance> {
        let mut order: Vec<&MarqueeInstance> = self.instances.iter().collect();
        order.sort_by_key(|inst| inst.position.z_index);
        order
    }
}

#[derive(Clone, Debug)]
pub struct Marquee {
    tokens: Vec<MarqueeToken>,
    config: MarqueeConfig,
}

impl Marquee {
    pub fn new(tokens: Vec<MarqueeToken>, config: MarqueeConfig) -> TokenArcResult<Self> {
        config.validate()?;
        Ok(Self { tokens, config })
    }

    pub fn tokens(&self) -> &[MarqueeToken] {
        &self.tokens
    }

    pub fn config(&self) -> &MarqueeConfig {
        &self.config
    }

    pub fn instance_count(&self) -> usize {
        self.tokens.len() * COPIES
    }

    /// Lay out every instance at loop progress `progress`.
    pub fn layout(&self, progress: f64) -> MarqueeFrame {
        let geometry = self.config.geometry();
        let total = self.instance_count();

        let instances = (0..total)
            .map(|slot| {
                let p = (slot as f64 / total as f64 + progress).rem_euclid(1.0);
                MarqueeInstance {
                    slot,
                    token: slot % self.tokens.len(),
                    progress: p,
                    position: geometry.position(p),
                    glow: rainbow_at(p),
                }
            })
            .collect();

        MarqueeFrame {
            progress,
            instances,
        }
    }

    /// Start animating against `clock`. The returned guard is the only handle on the running
    /// animation.
    pub fn mount<C: TimeSource>(&self, clock: C) -> MountedMarquee<'_, C> {
        let mounted_at = clock.now();
        tracing::debug!(
            tokens = self.tokens.len(),
            duration_secs = self.config.duration_secs,
            "marquee mounted"
        );
        MountedMarquee {
            marquee: self,
            clock,
            mounted_at,
            ticks: 0,
        }
    }
}

pub struct MountedMarquee<'a, C: TimeSource> {
    marquee: &'a Marquee,
    clock: C,
    mounted_at: Duration,
    ticks: u64,
}

impl<C: TimeSource> MountedMarquee<'_, C> {
    pub fn elapsed(&self) -> Duration {
        self.clock.now().saturating_sub(self.mounted_at)
    }

    pub fn progress(&self) -> f64 {
        loop_progress(self.elapsed(), self.marquee.config.loop_duration())
    }

    /// Recompute every instance from the current clock reading.
    pub fn tick(&mut self) -> MarqueeFrame {
        self.ticks += 1;
        self.marquee.layout(self.progress())
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Stop the animation, returning how many frames were produced.
    pub fn unmount(self) -> u64 {
        self.ticks
    }
}

impl<C: TimeSource> Drop for MountedMarquee<'_, C> {
    fn drop(&mut self) {
        tracing::debug!(ticks = self.ticks, "marquee unmounted");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    fn tokens(n: usize) -> Vec<MarqueeToken> {
        (0..n)
            .map(|i| MarqueeToken {
                id: i.to_string(),
                name: format!("Token {i}"),
                symbol: format!("T{i}"),
                token_image: String::new(),
                fee_earner_username: format!("user{i}"),
                fee_earner_avatar: String::new(),
                earnings_display: "$1.50".to_owned(),
                holders_display: "10".to_owned(),
            })
            .collect()
    }

    #[test]
    fn config_validation_catches_bad_values() {
        let ok = MarqueeConfig::default();
        assert!(ok.validate().is_ok());

        for bad in [
            MarqueeConfig {
                duration_secs: 0.0,
                ..MarqueeConfig::default()
            },
            MarqueeConfig {
                width: -1.0,
                ..MarqueeConfig::default()
            },
            MarqueeConfig {
                arc_height: f64::NAN,
                ..MarqueeConfig::default()
            },
            MarqueeConfig {
                curvature: f64::INFINITY,
                ..MarqueeConfig::default()
            },
            MarqueeConfig {
                duration_secs: 1e20,
                ..MarqueeConfig::default()
            },
        ] {
            assert!(bad.validate().is_err(), "{bad:?}");
            assert!(Marquee::new(vec![], bad).is_err());
        }
    }

    #[test]
    fn canvas_leaves_room_for_cards() {
        let c = MarqueeConfig::default().canvas();
        assert_eq!((c.width, c.height), (1200, 480));
    }

    #[test]
    fn renders_three_copies() {
        let m = Marquee::new(tokens(4), MarqueeConfig::default()).unwrap();
        let frame = m.layout(0.0);
        assert_eq!(frame.instances.len(), 12);

        let token_ids: Vec<usize> = frame.instances.iter().map(|i| i.token).collect();
        assert_eq!(token_ids, vec![0, 1, 2, 3, 0, 1, 2, 3, 0, 1, 2, 3]);
    }

    #[test]
    fn instance_progress_is_slot_offset_and_wraps() {
        let m = Marquee::new(tokens(2), MarqueeConfig::default()).unwrap();
        let frame = m.layout(0.5);
        let ps: Vec<f64> = frame.instances.iter().map(|i| i.progress).collect();

        let expected = [0.5, 0.5 + 1.0 / 6.0, 0.5 + 2.0 / 6.0, 0.0, 1.0 / 6.0, 2.0 / 6.0];
        for (got, want) in ps.iter().zip(expected) {
            assert!((got - want).abs() < 1e-9, "{got} vs {want}");
        }
        assert!(ps.iter().all(|p| (0.0..1.0).contains(p)));

        // Slot 0 sits at the apex at progress 0.5.
        assert_eq!(frame.instances[0].position.scale, 1.0);
        assert_eq!(frame.instances[0].position.z_index, 100);
    }

    #[test]
    fn oversized_duration_is_rejected_not_a_panic() {
        let huge = MarqueeConfig {
            duration_secs: 1e20,
            ..MarqueeConfig::default()
        };
        assert!(Marquee::new(tokens(2), huge.clone()).is_err());
        assert_eq!(huge.loop_duration(), Duration::MAX);

        // Anything `Duration` can hold still mounts and ticks.
        let long = MarqueeConfig {
            duration_secs: 1e15,
            ..MarqueeConfig::default()
        };
        let m = Marquee::new(tokens(2), long).unwrap();
        let clock = ManualClock::new();
        let mut mounted = m.mount(&clock);
        clock.advance(Duration::from_secs(1));
        assert_eq!(mounted.tick().instances.len(), 6);
    }

    #[test]
    fn empty_list_has_no_instances() {
        let m = Marquee::new(vec![], MarqueeConfig::default()).unwrap();
        let clock = ManualClock::new();
        let mut mounted = m.mount(&clock);
        assert!(mounted.tick().instances.is_empty());
    }

    #[test]
    fn progress_follows_clock_from_mount() {
        let m = Marquee::new(tokens(3), MarqueeConfig::default()).unwrap();
        let clock = ManualClock::new();
        clock.set(Duration::from_secs(7));

        let mut mounted = m.mount(&clock);
        assert_eq!(mounted.progress(), 0.0);

        clock.advance(Duration::from_secs(5));
        let frame = mounted.tick();
        assert_eq!(frame.progress, 0.25);

        // A full loop later the layout is identical.
        clock.advance(Duration::from_secs(20));
        assert_eq!(mounted.tick(), frame);

        assert_eq!(mounted.unmount(), 2);
    }

    #[test]
    fn dropped_ticks_self_correct() {
        let m = Marquee::new(tokens(2), MarqueeConfig::default()).unwrap();

        let steady = ManualClock::new();
        let mut a = m.mount(&steady);
        for _ in 0..10 {
            steady.advance(Duration::from_millis(16));
            a.tick();
        }
        let last_steady = a.tick();

        let jumpy = ManualClock::new();
        let mut b = m.mount(&jumpy);
        jumpy.advance(Duration::from_millis(160));
        assert_eq!(b.tick(), last_steady);
    }

    #[test]
    fn paint_order_is_back_to_front() {
        let m = Marquee::new(tokens(5), MarqueeConfig::default()).unwrap();
        let frame = m.layout(0.3);
        let order = frame.paint_order();
        assert_eq!(order.len(), frame.instances.len());
        assert!(
            order
                .windows(2)
                .all(|w| w[0].position.z_index <= w[1].position.z_index)
        );
    }
}
