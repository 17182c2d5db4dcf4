/// Static Occlusion Baking Module
///
/// Precomputes, per cell of a subdivided scene volume, which objects are
/// visible, using frame-sliced GPU occlusion queries. Split DOP-style:
/// - visibility_data.rs: pure data structures
/// - visibility_operations.rs: pure functions over the table
/// - sample_builder.rs: camera placement generation
/// - capture.rs: in-flight query batches and resolution
/// - baker.rs: the per-frame state machine
pub mod baker;
pub mod camera;
pub mod capture;
pub mod interfaces;
pub mod sample_builder;
pub mod settings;
pub mod visibility_data;
pub mod visibility_operations;

// Re-export data structures
pub use settings::BakeSettings;
pub use visibility_data::{ObjectIndex, VisibilityData};

// Re-export table operations
pub use visibility_operations::{
    block_index, block_visibility_data, disable_visibility_for_object,
    enable_visibility_for_object, init_visibility_data, is_object_visible_from_block,
};

// Re-export sampling
pub use sample_builder::{build_block_samples, cell_bounds, view_direction, CameraSample, SIDE_COUNT};

// Re-export capture tracking
pub use capture::{release_captures, resolve_captures, FrameCapture};

// Re-export camera helpers
pub use camera::{
    build_projection_matrix, build_view_matrix, init_capture_camera, orient_camera,
    CaptureCameraData,
};

// Re-export collaborator seams
pub use interfaces::{
    OcclusionQueryBackend, OcclusionRenderPass, QueryBufferId, TerrainHeightSource,
};

// Re-export the baker
pub use baker::{BakeContext, BakeState, StaticOcclusionBaker};
