//! Render targets, output naming and the orchestration loop.

mod naming;
mod orchestrator;
mod sink;
mod state;
mod target;

pub use naming::TargetLabel;
pub use orchestrator::{AllRequest, ChainListRequest, Orchestrator};
pub use sink::{FileImageWriter, ImageSink, JPEG_QUALITY};
pub use state::{RenderState, StateSelector};
pub use target::RenderTarget;
