//! # tokenarc guide
//!
//! A walkthrough of the crate's two halves and how data moves between them.
//!
//! ---
//!
//! ## The token feed
//!
//! [`DasClient`](crate::DasClient) makes exactly one JSON-RPC `getAssetsByAuthority` call per
//! invocation against a digital-asset-search endpoint, asking for the newest 12 assets created by
//! [`BAGS_AUTHORITY`](crate::feed::BAGS_AUTHORITY). Results are reshaped into
//! [`FeedToken`](crate::FeedToken)s:
//!
//! - `name` falls back from metadata name, to symbol, to the first six characters of the mint
//! - `image` falls back from `content.links.image` to the first attached file
//! - duplicates are dropped, first occurrence wins
//!
//! The HTTP route (`GET /api/bags/new-tokens`, see [`create_router`](crate::create_router))
//! wraps this and maps each [`FeedError`](crate::FeedError) to a status code:
//!
//! | error                 | status |
//! |-----------------------|--------|
//! | missing API key       | 500    |
//! | upstream non-2xx      | 502    |
//! | JSON-RPC error field  | 502    |
//! | anything else         | 500    |
//!
//! The API key is only checked when a request arrives, so a server without one still starts.
//!
//! ---
//!
//! ## The marquee
//!
//! A [`Marquee`](crate::Marquee) is a token list plus [`MarqueeConfig`](crate::MarqueeConfig)
//! knobs. It does nothing until mounted:
//!
//! ```no_run
//! use tokenarc::{Marquee, MarqueeConfig, MonotonicClock};
//!
//! let marquee = Marquee::new(vec![], MarqueeConfig::default())?;
//! let mut mounted = marquee.mount(MonotonicClock::new());
//! let frame = mounted.tick(); // re-run once per display refresh
//! # let _ = frame;
//! # Ok::<(), tokenarc::TokenArcError>(())
//! ```
//!
//! Each tick computes `progress = (elapsed mod loop) / loop` from the clock, so a late tick lands
//! exactly where an on-time one would have. The list is laid out three times over
//! ([`COPIES`](crate::marquee::COPIES)); instance `slot` sits at `(slot / 3N + progress) mod 1`
//! along the arc, positioned by [`ArcGeometry::position`](crate::ArcGeometry::position) and
//! tinted by [`rainbow_at`](crate::rainbow_at).
//!
//! Dropping the [`MountedMarquee`](crate::MountedMarquee) stops the animation. There is no
//! global clock.
//!
//! ---
//!
//! ## Rendering
//!
//! 1. [`marquee_svg`](crate::marquee_svg) turns one frame into an SVG document
//! 2. [`Rasterizer`](crate::Rasterizer) parses it with `usvg` and paints it with `resvg`
//!    (premultiplied RGBA8)
//! 3. [`write_png`](crate::write_png) or [`Mp4Encoder`](crate::Mp4Encoder) writes it out
//!
//! [`render_loop_to_mp4`](crate::render_loop_to_mp4) drives the marquee with a
//! [`ManualClock`](crate::ManualClock) seeked to each output frame, producing one seamless loop.
//!
//! At curvature above ~0.9 the arc formula yields negative scale/opacity near the ends. The layout
//! reports those values as computed; the scene leaves such instances out.
