use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::error::{TokenArcError, TokenArcResult};

#[derive(Clone, Debug)]
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Straight-alpha copy of the pixel data, as PNG expects.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        if self.premultiplied {
            unpremultiply_rgba8_in_place(&mut out);
        }
        out
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y * self.width + x) * 4) as usize;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}

/// Turns SVG documents into RGBA frames. System fonts are loaded once, up front.
pub struct Rasterizer {
    options: usvg::Options<'static>,
}

impl Rasterizer {
    pub fn new() -> Self {
        let mut options = usvg::Options::default();
        options.fontdb_mut().load_system_fonts();
        tracing::debug!(faces = options.fontdb.len(), "loaded system fonts");
        Self { options }
    }

    /// Resolve relative `href`s (token images, avatars) against `dir`.
    pub fn with_resources_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.options.resources_dir = Some(dir.into());
        self
    }

    pub fn rasterize(&self, svg: &str) -> TokenArcResult<FrameRGBA> {
        let tree = usvg::Tree::from_str(svg, &self.options).context("parse svg tree")?;
        let size = tree.size().to_int_size();

        let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
            .ok_or_else(|| {
                TokenArcError::render(format!(
                    "cannot allocate {}x{} pixmap",
                    size.width(),
                    size.height()
                ))
            })?;
        resvg::render(
            &tree,
            resvg::tiny_skia::Transform::identity(),
            &mut pixmap.as_mut(),
        );

        Ok(FrameRGBA {
            width: size.width(),
            height: size.height(),
            data: pixmap.take(),
            premultiplied: true,
        })
    }
}

impl Default for Rasterizer {
    fn default() -> Self {
        Self::new()
    }
}

pub fn write_png(frame: &FrameRGBA, path: &Path) -> TokenArcResult<()> {
    crate::encode_ffmpeg::ensure_parent_dir(path)?;
    image::save_buffer_with_format(
        path,
        &frame.to_straight_rgba8(),
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((*c as u16 * 255 + a / 2) / a).min(255) as u8;
        }
    }
}
