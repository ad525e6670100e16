//! Surface, pipelines and the per-frame draw

pub mod pipeline_manager;
pub mod render_engine;

pub use pipeline_manager::{PipelineConfig, PipelineManager};
pub use render_engine::{FrameStatus, RenderEngine};
