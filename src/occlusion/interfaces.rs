//! Collaborator seams consumed by the occlusion baker.
//!
//! The baker drives rendering and query readback through these traits.
//! Production implementations wrap the engine render pipeline and GPU
//! query pool; tests substitute mocks.

use cgmath::Point3;

use super::camera::CaptureCameraData;
use super::capture::FrameCapture;

/// Opaque GPU occlusion-query buffer handle
///
/// Owned by exactly one `FrameCapture` from allocation until
/// `delete_query_buffer`; the baker never duplicates a live handle and
/// releases each one exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QueryBufferId(pub u32);

/// Render-pass submission service for occlusion captures
pub trait OcclusionRenderPass {
    /// Render all occlusion-candidate objects for a block from one camera,
    /// issuing one occlusion query per candidate.
    ///
    /// Returns `None` when no query buffer could be allocated; the caller
    /// drops the sample without scheduling a retry.
    fn draw_occlusion_frame(
        &mut self,
        camera: &CaptureCameraData,
        block_index: u32,
    ) -> Option<FrameCapture>;
}

/// GPU occlusion-query polling and release
///
/// Readiness is polled, never waited on; the baker calls these once per
/// tick per unresolved slot.
pub trait OcclusionQueryBackend {
    /// Whether the query in `slot` has a result available
    fn query_is_ready(&self, buffer: QueryBufferId, slot: u32) -> bool;

    /// Sample count of a ready query; nonzero means the object passed the
    /// depth test for at least one fragment
    fn query_value(&self, buffer: QueryBufferId, slot: u32) -> u32;

    /// Release a query buffer; `immediate` skips deferred deletion
    fn delete_query_buffer(&mut self, buffer: QueryBufferId, immediate: bool);
}

/// Terrain height lookup used to reject underground capture positions
pub trait TerrainHeightSource {
    /// Project `point` onto the terrain surface; `None` when the point is
    /// outside the terrain footprint
    fn place_point(&self, point: Point3<f32>) -> Option<Point3<f32>>;
}
