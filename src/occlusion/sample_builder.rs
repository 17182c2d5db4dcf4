//! Camera sample set builder - six-face coverage of one grid cell.
//!
//! Each lateral face is captured from three effective directions (its own
//! plus its two lateral neighbors) while top and bottom use a single
//! direction; one camera per face per neighbor would re-capture the same
//! geometry from adjacent faces.

use cgmath::{ElementWise, Point3, Vector3};

use super::interfaces::TerrainHeightSource;
use super::settings::BakeSettings;
use crate::bounds::{aabb_size, create_aabb, Aabb};

/// Number of logical cell sides
pub const SIDE_COUNT: usize = 6;

/// Effective capture directions per side. Observed sampling density of the
/// reference bake; a tunable, not a hard constraint.
const EFFECTIVE_SIDE_COUNT: [usize; SIDE_COUNT] = [3, 3, 3, 3, 1, 1];
const EFFECTIVE_SIDES: [[usize; 3]; SIDE_COUNT] = [
    [0, 1, 3],
    [1, 0, 2],
    [2, 1, 3],
    [3, 0, 2],
    [4, 4, 4],
    [5, 5, 5],
];

/// View direction for a logical side: +x, +y, -x, -y, +z, -z
pub fn view_direction(side: usize) -> Vector3<f32> {
    match side {
        0 => Vector3::new(1.0, 0.0, 0.0),
        1 => Vector3::new(0.0, 1.0, 0.0),
        2 => Vector3::new(-1.0, 0.0, 0.0),
        3 => Vector3::new(0.0, -1.0, 0.0),
        4 => Vector3::new(0.0, 0.0, 1.0),
        _ => Vector3::new(0.0, 0.0, -1.0),
    }
}

/// One camera placement for a cell capture - value type
#[derive(Debug, Clone, Copy)]
pub struct CameraSample {
    /// Logical side (0..6) whose persistent camera renders this sample
    pub side: usize,
    pub position: Point3<f32>,
    pub direction: Vector3<f32>,
    pub up: Vector3<f32>,
    pub left: Vector3<f32>,
}

/// Bounds of one grid cell within the baked volume
///
/// Even subdivision of the volume bounds; the per-(x, y) height offset, when
/// present, shifts the cell's min-corner Z to follow the terrain.
pub fn cell_bounds(
    volume: &Aabb,
    size_x: u32,
    size_y: u32,
    size_z: u32,
    cell_height_offset: Option<&[f32]>,
    x: u32,
    y: u32,
    z: u32,
) -> Aabb {
    let mut size = aabb_size(volume);
    size.x /= size_x as f32;
    size.y /= size_y as f32;
    size.z /= size_z as f32;

    let mut min = Point3::new(
        volume.min.x + x as f32 * size.x,
        volume.min.y + y as f32 * size.y,
        volume.min.z + z as f32 * size.z,
    );
    if let Some(offsets) = cell_height_offset {
        min.z += offsets[(x + y * size_x) as usize];
    }

    create_aabb(min, min + size)
}

/// Generate the capture samples covering all six sides of one cell
///
/// Candidates sitting below the terrain surface are dropped (underground
/// viewpoints are always occluded). An empty result marks a degenerate
/// cell, not an error. Without terrain rejection the count is exactly
/// `(4 * 3 + 2 * 1) * (step_count + 1)^2`.
pub fn build_block_samples(
    cell: &Aabb,
    settings: &BakeSettings,
    terrain: Option<&dyn TerrainHeightSource>,
    samples: &mut Vec<CameraSample>,
) {
    let step_count = settings.step_count;
    let size = aabb_size(cell);
    let step_size = size / step_count as f32;

    for side in 0..SIDE_COUNT {
        // A zero extent along the side's normal collapses its min and max
        // faces into one; emit nothing for them
        if normal_extent(&size, side) == 0.0 {
            continue;
        }

        let (corner, tangent_x, tangent_y) = face_basis(cell, side);

        for effective in &EFFECTIVE_SIDES[side][..EFFECTIVE_SIDE_COUNT[side]] {
            let direction = view_direction(*effective);
            // Vertical directions keep a fixed world-up basis so the
            // query-buffer slot layout matches lateral captures
            let (up, left) = if *effective >= 4 {
                (Vector3::new(0.0, 1.0, 0.0), Vector3::new(1.0, 0.0, 0.0))
            } else {
                (Vector3::new(0.0, 0.0, 1.0), Vector3::new(1.0, 0.0, 0.0))
            };

            for step_x in 0..=step_count {
                for step_y in 0..=step_count {
                    let position = corner
                        + (tangent_x * step_x as f32).mul_element_wise(step_size)
                        + (tangent_y * step_y as f32).mul_element_wise(step_size);

                    if let Some(terrain) = terrain {
                        if let Some(ground) = terrain.place_point(position) {
                            if position.z < ground.z {
                                continue;
                            }
                        }
                    }

                    samples.push(CameraSample {
                        side,
                        position,
                        direction,
                        up,
                        left,
                    });
                }
            }
        }
    }
}

/// Cell extent along a side's outward normal axis
fn normal_extent(size: &Vector3<f32>, side: usize) -> f32 {
    match side {
        0 | 2 => size.x,
        1 | 3 => size.y,
        _ => size.z,
    }
}

/// Starting corner and tangent axes for walking one face of a cell
fn face_basis(cell: &Aabb, side: usize) -> (Point3<f32>, Vector3<f32>, Vector3<f32>) {
    let x_axis = Vector3::new(1.0, 0.0, 0.0);
    let y_axis = Vector3::new(0.0, 1.0, 0.0);
    let z_axis = Vector3::new(0.0, 0.0, 1.0);

    match side {
        // +x
        0 => (
            Point3::new(cell.max.x, cell.min.y, cell.min.z),
            y_axis,
            z_axis,
        ),
        // +y
        1 => (
            Point3::new(cell.min.x, cell.max.y, cell.min.z),
            x_axis,
            z_axis,
        ),
        // -x
        2 => (cell.min, y_axis, z_axis),
        // -y
        3 => (cell.min, x_axis, z_axis),
        // +z
        4 => (
            Point3::new(cell.min.x, cell.min.y, cell.max.z),
            x_axis,
            y_axis,
        ),
        // -z
        _ => (cell.min, x_axis, y_axis),
    }
}
