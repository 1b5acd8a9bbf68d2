//! Renderer: executes a [`RenderPlan`](crate::compose::RenderPlan) and writes the PNG.

pub mod backend;
#[cfg(feature = "cpu")]
pub mod cpu;
pub mod output;

pub use backend::{BackendKind, FrameRGBA, RenderBackend, RenderSettings, create_backend};
#[cfg(feature = "cpu")]
pub use cpu::CpuBackend;
pub use output::{encode_png, ensure_parent_dir, render_to_path};
