//! Frame-stepped rendering of a marquee: stills and full-loop MP4s.

use std::{path::PathBuf, time::Duration};

use crate::{
    clock::ManualClock,
    encode_ffmpeg::{EncodeConfig, Mp4Encoder},
    foundation::{
        core::{FrameIndex, FrameRange, Fps},
        error::TokenArcResult,
    },
    marquee::Marquee,
    raster::{FrameRGBA, Rasterizer},
    scene::marquee_svg,
};

#[derive(Clone, Debug)]
pub struct RenderLoopOpts {
    pub fps: Fps,
    pub out_path: PathBuf,
    pub overwrite: bool,
    pub bg_rgba: [u8; 4],
}

/// Number of frames covering exactly one loop of `marquee` at `fps`.
pub fn loop_frame_range(marquee: &Marquee, fps: Fps) -> TokenArcResult<FrameRange> {
    let frames = fps.secs_to_frames_ceil(marquee.config().duration_secs).max(1);
    FrameRange::new(FrameIndex(0), FrameIndex(frames))
}

/// Render the marquee as it looks `elapsed` after mounting.
#[tracing::instrument(skip(marquee, rasterizer))]
pub fn render_still(
    marquee: &Marquee,
    rasterizer: &Rasterizer,
    elapsed: Duration,
) -> TokenArcResult<FrameRGBA> {
    let clock = ManualClock::new();
    let mut mounted = marquee.mount(&clock);
    clock.set(elapsed);
    let frame = mounted.tick();
    rasterizer.rasterize(&marquee_svg(marquee, &frame))
}

/// Render one seamless loop into an MP4, ticking the marquee once per output frame.
pub fn render_loop_to_mp4(
    marquee: &Marquee,
    rasterizer: &Rasterizer,
    opts: RenderLoopOpts,
) -> TokenArcResult<u64> {
    let range = loop_frame_range(marquee, opts.fps)?;
    let mut encoder = Mp4Encoder::spawn(EncodeConfig {
        canvas: marquee.config().canvas(),
        fps: opts.fps,
        out_path: opts.out_path,
        overwrite: opts.overwrite,
        bg_rgba: opts.bg_rgba,
    })?;

    let clock = ManualClock::new();
    let mut mounted = marquee.mount(&clock);
    for f in range.iter() {
        clock.seek_frame(opts.fps, f);
        let frame = mounted.tick();
        let rgba = rasterizer.rasterize(&marquee_svg(marquee, &frame))?;
        encoder.push_frame(&rgba)?;

        if f.0 % 60 == 0 {
            tracing::debug!(frame = f.0, of = range.len_frames(), "encoded");
        }
    }
    drop(mounted);

    let written = encoder.finish()?;
    tracing::info!(frames = written, "loop rendered");
    Ok(written)
}
