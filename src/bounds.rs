/// Axis-Aligned Bounding Box helpers for the baked volume
///
/// Pure functions over plain data - no methods, just transformations.
use cgmath::{Point3, Vector3};

/// Axis-aligned bounding box - pure data structure
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Point3<f32>,
    pub max: Point3<f32>,
}

/// Create new AABB from min/max points
pub fn create_aabb(min: Point3<f32>, max: Point3<f32>) -> Aabb {
    Aabb { min, max }
}

/// Get size of AABB along each axis
pub fn aabb_size(aabb: &Aabb) -> Vector3<f32> {
    aabb.max - aabb.min
}

/// Get center point of AABB
pub fn aabb_center(aabb: &Aabb) -> Point3<f32> {
    Point3::new(
        (aabb.min.x + aabb.max.x) * 0.5,
        (aabb.min.y + aabb.max.y) * 0.5,
        (aabb.min.z + aabb.max.z) * 0.5,
    )
}

/// Test if AABB contains a point
pub fn aabb_contains_point(aabb: &Aabb, point: Point3<f32>) -> bool {
    point.x >= aabb.min.x
        && point.x <= aabb.max.x
        && point.y >= aabb.min.y
        && point.y <= aabb.max.y
        && point.z >= aabb.min.z
        && point.z <= aabb.max.z
}
