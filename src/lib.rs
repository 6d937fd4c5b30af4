//! Token feed proxy and rainbow arc marquee renderer for a token-launch landing page.
//!
//! See [`guide`] for a walkthrough of how the pieces fit together.
#![forbid(unsafe_code)]

pub mod arc;
pub mod button;
pub mod card;
pub mod clock;
pub mod color;
pub mod encode_ffmpeg;
pub mod feed;
mod foundation;
pub mod guide;
pub mod marquee;
pub mod raster;
pub mod render;
pub mod scene;
pub mod server;
pub mod svg;

pub use arc::{ArcGeometry, ArcPosition};
pub use button::{ButtonConfig, ButtonSize, LiquidMetalButton, LiquidMetalConfig};
pub use card::{CardView, MarqueeToken, parse_token_list};
pub use clock::{ManualClock, MonotonicClock, TimeSource, loop_progress};
pub use color::{RAINBOW_COLORS, interpolate_color, rainbow_at};
pub use encode_ffmpeg::{EncodeConfig, Mp4Encoder, is_ffmpeg_on_path};
pub use feed::{DasClient, FeedError, FeedToken};
pub use foundation::core::{Canvas, Fps, FrameIndex, FrameRange, Placement, Rgb8, Vec2};
pub use foundation::error::{TokenArcError, TokenArcResult};
pub use marquee::{Marquee, MarqueeConfig, MarqueeFrame, MarqueeInstance, MountedMarquee};
pub use raster::{FrameRGBA, Rasterizer, write_png};
pub use render::{RenderLoopOpts, loop_frame_range, render_loop_to_mp4, render_still};
pub use scene::marquee_svg;
pub use server::{AppState, ServerConfig, create_router};
