use thiserror::Error;

/// Failure reported by a [`crate::RenderSurface`] implementation.
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("render surface lost")]
    Lost,
    #[error("render surface out of memory")]
    OutOfMemory,
    #[error("render backend: {0}")]
    Backend(String),
}

/// Fatal problems while mounting a gallery.
#[derive(Debug, Error)]
pub enum InitError {
    #[error("no render surface to mount the gallery on")]
    MissingSurface,
    #[error("render surface rejected the scene: {0}")]
    Surface(#[from] SurfaceError),
}

/// Per-asset failure. Never fatal: the panel falls back to an untextured look.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("network error: {0}")]
    Network(String),
    #[error("{url} responded with HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("could not decode image: {0}")]
    Decode(#[from] image::ImageError),
}
