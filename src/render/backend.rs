use crate::{
    compose::plan::RenderPlan,
    foundation::error::PitchcardResult,
};

/// A rendered frame as RGBA8 pixels.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

/// A renderer that can execute a [`RenderPlan`] into a [`FrameRGBA`].
///
/// Any drawing surface a backend allocates lives only for one `render_plan` call.
pub trait RenderBackend {
    fn render_plan(&mut self, plan: &RenderPlan) -> PitchcardResult<FrameRGBA>;
}

/// Available backend kinds.
///
/// - `Cpu` requires the `cpu` cargo feature.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BackendKind {
    /// CPU raster backend powered by `vello_cpu`, with text through `resvg`.
    #[default]
    Cpu,
}

/// Backend-agnostic settings.
#[derive(Clone, Debug, Default)]
pub struct RenderSettings {
    /// If set, overrides the plan's background colour (straight RGBA8).
    pub clear_rgba: Option<[u8; 4]>,
}

/// Create a rendering backend implementation.
///
/// Fails with [`PitchcardError::CapabilityMissing`](crate::PitchcardError::CapabilityMissing) when the requested backend was compiled
/// out, before anything is drawn.
pub fn create_backend(
    kind: BackendKind,
    settings: &RenderSettings,
) -> PitchcardResult<Box<dyn RenderBackend>> {
    match kind {
        #[cfg(feature = "cpu")]
        BackendKind::Cpu => Ok(Box::new(crate::render::cpu::CpuBackend::new(
            settings.clone(),
        ))),
        #[cfg(not(feature = "cpu"))]
        BackendKind::Cpu => {
            let _ = settings;
            Err(crate::foundation::error::PitchcardError::capability(
                "cpu backend not compiled in (enable the `cpu` feature)",
            ))
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/backend.rs"]
mod tests;
