// Static Occlusion - frame-sliced visibility baking
//
// Precomputes a bit-packed block-by-object visibility table for a
// subdivided scene volume by sampling each cell's six faces with GPU
// occlusion queries. The baker is cooperatively scheduled: the host calls
// it once per frame tick and it never blocks on query results.
//
// The render pipeline, GPU query pool, and terrain height lookup are
// consumed through traits in occlusion::interfaces; this crate owns only
// the bake state machine and the table it fills.

pub mod bounds;
pub mod error;
pub mod occlusion;

pub use bounds::Aabb;
pub use error::{OcclusionError, OcclusionResult};
pub use occlusion::{
    BakeContext, BakeSettings, BakeState, CameraSample, CaptureCameraData, FrameCapture,
    ObjectIndex, OcclusionQueryBackend, OcclusionRenderPass, QueryBufferId, StaticOcclusionBaker,
    TerrainHeightSource, VisibilityData,
};
