use std::{
    io::Write as _,
    path::{Path, PathBuf},
    process::{Child, ChildStdin, Command, Stdio},
};

use crate::{
    foundation::{
        core::{Canvas, Fps},
        error::{TokenArcError, TokenArcResult},
    },
    raster::FrameRGBA,
};

#[derive(Clone, Debug)]
pub struct EncodeConfig {
    pub canvas: Canvas,
    pub fps: Fps,
    pub out_path: PathBuf,
    pub overwrite: bool,
    /// Color transparent pixels are flattened onto.
    pub bg_rgba: [u8; 4],
}

impl EncodeConfig {
    pub fn validate(&self) -> TokenArcResult<()> {
        let Canvas { width, height } = self.canvas;
        if width == 0 || height == 0 {
            return Err(TokenArcError::validation(
                "encode width/height must be non-zero",
            ));
        }
        if !width.is_multiple_of(2) || !height.is_multiple_of(2) {
            // yuv420p subsamples chroma 2x2.
            return Err(TokenArcError::validation(
                "encode width/height must be even (required for yuv420p mp4 output)",
            ));
        }
        self.frame_bytes()?;
        Ok(())
    }

    /// Size of one raw RGBA frame on the ffmpeg pipe.
    pub fn frame_bytes(&self) -> TokenArcResult<usize> {
        let Canvas { width, height } = self.canvas;
        (width as usize)
            .checked_mul(height as usize)
            .and_then(|px| px.checked_mul(4))
            .ok_or_else(|| {
                TokenArcError::validation(format!("{width}x{height} frame is too large"))
            })
    }
}

pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

pub fn ensure_parent_dir(path: &Path) -> TokenArcResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Streams raw RGBA frames into a system `ffmpeg` producing H.264 MP4.
pub struct Mp4Encoder {
    cfg: EncodeConfig,
    child: Child,
    stdin: Option<ChildStdin>,
    scratch: Vec<u8>,
    frames: u64,
}

impl Mp4Encoder {
    pub fn spawn(cfg: EncodeConfig) -> TokenArcResult<Self> {
        cfg.validate()?;
        ensure_parent_dir(&cfg.out_path)?;

        if !cfg.overwrite && cfg.out_path.exists() {
            return Err(TokenArcError::validation(format!(
                "output file '{}' already exists",
                cfg.out_path.display()
            )));
        }

        if !is_ffmpeg_on_path() {
            return Err(TokenArcError::encode(
                "ffmpeg is required for MP4 encoding, but was not found on PATH",
            ));
        }

        let mut cmd = Command::new("ffmpeg");
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .arg(if cfg.overwrite { "-y" } else { "-n" });

        cmd.args([
            "-loglevel",
            "error",
            "-f",
            "rawvideo",
            "-pix_fmt",
            "rgba",
            "-s",
            &format!("{}x{}", cfg.canvas.width, cfg.canvas.height),
            "-r",
            &format!("{}/{}", cfg.fps.num, cfg.fps.den),
            "-i",
            "pipe:0",
            "-an",
            "-c:v",
            "libx264",
            "-pix_fmt",
            "yuv420p",
            "-movflags",
            "+faststart",
        ])
        .arg(&cfg.out_path);

        let mut child = cmd.spawn().map_err(|e| {
            TokenArcError::encode(format!(
                "failed to spawn ffmpeg (is it installed and on PATH?): {e}"
            ))
        })?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| TokenArcError::encode("failed to open ffmpeg stdin"))?;

        tracing::info!(out = %cfg.out_path.display(), "ffmpeg encoder started");

        Ok(Self {
            scratch: vec![0u8; cfg.frame_bytes()?],
            cfg,
            child,
            stdin: Some(stdin),
            frames: 0,
        })
    }

    pub fn push_frame(&mut self, frame: &FrameRGBA) -> TokenArcResult<()> {
        let Canvas { width, height } = self.cfg.canvas;
        if frame.width != width || frame.height != height {
            return Err(TokenArcError::validation(format!(
                "frame size mismatch: got {}x{}, expected {width}x{height}",
                frame.width, frame.height
            )));
        }

        flatten_to_opaque_rgba8(
            &mut self.scratch,
            &frame.data,
            frame.premultiplied,
            self.cfg.bg_rgba,
        )?;

        let Some(stdin) = self.stdin.as_mut() else {
            return Err(TokenArcError::encode("ffmpeg encoder is already finalized"));
        };
        stdin.write_all(&self.scratch).map_err(|e| {
            TokenArcError::encode(format!("failed to write frame to ffmpeg stdin: {e}"))
        })?;

        self.frames += 1;
        Ok(())
    }

    /// Close the pipe and wait for ffmpeg. Returns the number of frames written.
    pub fn finish(mut self) -> TokenArcResult<u64> {
        drop(self.stdin.take());

        let output = self.child.wait_with_output().map_err(|e| {
            TokenArcError::encode(format!("failed to wait for ffmpeg to finish: {e}"))
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(TokenArcError::encode(format!(
                "ffmpeg exited with status {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        Ok(self.frames)
    }
}

/// Composite `src` over an opaque background into `dst`.
fn flatten_to_opaque_rgba8(
    dst: &mut [u8],
    src: &[u8],
    src_is_premul: bool,
    bg_rgba: [u8; 4],
) -> TokenArcResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(TokenArcError::validation(
            "frame data size mismatch with width*height*4",
        ));
    }

    let bg = [bg_rgba[0] as u16, bg_rgba[1] as u16, bg_rgba[2] as u16];

    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let a = s[3] as u16;
        let inv = 255 - a;
        for c in 0..3 {
            let fg = if src_is_premul {
                s[c] as u16
            } else {
                mul_div255(s[c] as u16, a)
            };
            d[c] = (fg + mul_div255(bg[c], inv)).min(255) as u8;
        }
        d[3] = 255;
    }

    Ok(())
}

fn mul_div255(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg(width: u32, height: u32) -> EncodeConfig {
        EncodeConfig {
            canvas: Canvas { width, height },
            fps: Fps::new(30, 1).unwrap(),
            out_path: PathBuf::from("target/out.mp4"),
            overwrite: true,
            bg_rgba: [0, 0, 0, 255],
        }
    }

    #[test]
    fn config_validation_catches_bad_sizes() {
        assert!(cfg(0, 10).validate().is_err());
        assert!(cfg(11, 10).validate().is_err());
        assert!(cfg(1200, 480).validate().is_ok());
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn frame_bytes_widen_before_multiplying() {
        // 40000 * 30000 * 4 does not fit in a u32.
        let big = cfg(40000, 30000);
        assert_eq!(big.frame_bytes().unwrap(), 4_800_000_000);
        assert!(big.validate().is_ok());
        assert_eq!(cfg(1200, 480).frame_bytes().unwrap(), 1200 * 480 * 4);
    }

    #[test]
    fn flatten_premul_over_black() {
        let src = vec![128u8, 0, 0, 128];
        let mut dst = vec![0u8; 4];
        flatten_to_opaque_rgba8(&mut dst, &src, true, [0, 0, 0, 255]).unwrap();
        assert_eq!(dst, vec![128, 0, 0, 255]);
    }

    #[test]
    fn flatten_straight_over_background() {
        let src = vec![255u8, 0, 0, 128, 0, 0, 0, 0];
        let mut dst = vec![0u8; 8];
        flatten_to_opaque_rgba8(&mut dst, &src, false, [5, 5, 7, 255]).unwrap();
        assert_eq!(&dst[..4], &[130, 2, 3, 255]);
        assert_eq!(&dst[4..], &[5, 5, 7, 255]);
    }

    #[test]
    fn flatten_rejects_mismatched_buffers() {
        let mut dst = vec![0u8; 4];
        assert!(flatten_to_opaque_rgba8(&mut dst, &[0u8; 8], true, [0; 4]).is_err());
    }
}
