//! Error types for the house viewer
//!
//! Everything that can fail does so during start-up: window and GPU
//! initialisation, and resolving the control panel's identifiers into
//! commands. Interaction handlers themselves are infallible.

use thiserror::Error;

/// Fatal start-up and host errors
#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("failed to create event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("failed to create drawing surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("no suitable graphics adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),

    #[error("failed to request graphics device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    #[error("surface reports no supported texture formats")]
    NoSurfaceFormat,

    /// A control identifier with no matching command. This is a wiring
    /// mistake and is reported before the first frame is drawn.
    #[error("unknown control id '{0}'")]
    UnknownControl(String),
}

pub type Result<T> = std::result::Result<T, ViewerError>;
