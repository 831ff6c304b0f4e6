//! Errors raised by the shell around the simulation
//!
//! Gameplay itself cannot fail; these cover configuration and GPU setup.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid settings: {0}")]
    Settings(#[from] serde_json::Error),

    #[error("could not read settings file {path}: {source}")]
    SettingsFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("missing page element #{0}")]
    MissingElement(&'static str),

    #[error("browser API unavailable: {0}")]
    Dom(String),

    #[error("failed to create rendering surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("no compatible graphics adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),

    #[error("failed to open graphics device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    #[error("surface reports no supported {0}")]
    SurfaceUnsupported(&'static str),
}

pub type Result<T> = std::result::Result<T, Error>;
