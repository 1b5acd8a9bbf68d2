use std::io::Cursor;
use std::path::{Path, PathBuf};

use crate::{
    compose::plan::RenderPlan,
    foundation::{
        core::unpremultiply_in_place,
        error::{PitchcardError, PitchcardResult},
    },
    render::backend::{FrameRGBA, RenderBackend},
};

/// Render `plan` and write it as a PNG at `path`, replacing any existing file.
///
/// Missing parent directories are created. Returns the canonical path of the written file.
#[tracing::instrument(skip(plan, backend), fields(path = %path.display()))]
pub fn render_to_path(
    plan: &RenderPlan,
    backend: &mut dyn RenderBackend,
    path: &Path,
) -> PitchcardResult<PathBuf> {
    let frame = backend.render_plan(plan)?;
    let png = encode_png(frame)?;

    ensure_parent_dir(path)?;
    std::fs::write(path, &png).map_err(|e| PitchcardError::io(path, e))?;

    let written = path.canonicalize().map_err(|e| PitchcardError::io(path, e))?;
    tracing::debug!(bytes = png.len(), "wrote png");
    Ok(written)
}

/// Create `path`'s parent directory (and its ancestors) if missing.
pub fn ensure_parent_dir(path: &Path) -> PitchcardResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| PitchcardError::io(parent, e))?;
    }
    Ok(())
}

/// Encode a frame as straight-alpha RGBA8 PNG bytes.
pub fn encode_png(frame: FrameRGBA) -> PitchcardResult<Vec<u8>> {
    let FrameRGBA {
        width,
        height,
        mut data,
        premultiplied,
    } = frame;
    if premultiplied {
        unpremultiply_in_place(&mut data);
    }
    let img = image::RgbaImage::from_raw(width, height, data).ok_or_else(|| {
        PitchcardError::render(format!("frame buffer does not match {width}x{height}"))
    })?;

    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png)
        .map_err(|e| PitchcardError::render(format!("encode png: {e}")))?;
    Ok(out.into_inner())
}

#[cfg(test)]
#[path = "../../tests/unit/render/output.rs"]
mod tests;
