//! Error types for the fallible edges of the desktop.
//!
//! Window operations themselves never fail: they clamp or ignore. Only
//! configuration, logging setup and terminal I/O can go wrong.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("minimum window size must be positive, got {width}x{height}")]
    MinimumSize { width: i32, height: i32 },
    #[error("default window size {width}x{height} is below the minimum {min_width}x{min_height}")]
    DefaultBelowMinimum {
        width: i32,
        height: i32,
        min_width: i32,
        min_height: i32,
    },
    #[error("title bar height must be positive, got {0}")]
    TitleBar(i32),
    #[error("snap margins must be non-negative, got edge {edge} and corner {corner}")]
    SnapMargins { edge: i32, corner: i32 },
    #[error("shake detector needs at least two samples and one reversal")]
    ShakeThresholds,
    #[error("cell metrics must be positive, got {width}x{height}")]
    CellMetrics { width: i32, height: i32 },
}

#[derive(Debug, Error)]
pub enum DesktopError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("could not install tracing subscriber: {0}")]
    Tracing(String),
}
