//! Error handling for the occlusion baking crate.
//!
//! Per-sample failures during a bake (query-buffer exhaustion, degenerate
//! cells) are absorbed where they happen and never cross this boundary.
//! The errors below cover hard failures surfaced before any baking work
//! begins, plus misuse of the baker API.

use thiserror::Error;

/// Occlusion-specific result type
pub type OcclusionResult<T> = Result<T, OcclusionError>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum OcclusionError {
    #[error("invalid occlusion volume {size_x}x{size_y}x{size_z}: every axis needs at least one block")]
    InvalidDimensions { size_x: u32, size_y: u32, size_z: u32 },

    #[error("cell height offset array has {got} entries, expected {expected} (size_x * size_y)")]
    HeightOffsetMismatch { expected: usize, got: usize },

    #[error("process_block called before start_build_occlusion")]
    BakeNotStarted,
}
