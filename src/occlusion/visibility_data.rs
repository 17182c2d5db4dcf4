//! Visibility table data structures - pure data, no methods.
//!
//! Storage layout matches the persisted format consumed by external
//! serializers: each block owns a row of `object_count / 32` u32 words,
//! with an object's bit at word `object / 32`, mask `1 << (object & 31)`.

use bit_vec::BitVec;

use crate::bounds::Aabb;

/// Index of a candidate object in the baked scene
pub type ObjectIndex = u32;

/// Bit-packed block-by-object visibility table - pure data
///
/// A bit is set iff the object has been observed visible from the block by
/// at least one capture. Bits only transition 0 -> 1 during a bake, so a
/// partially baked table is always safe to read: unset bits mean "not yet
/// proven visible" and at worst cause under-culling.
///
/// `Clone` is a full deep copy of both the bit array and the height-offset
/// array; instances never alias storage.
#[derive(Debug, Clone)]
pub struct VisibilityData {
    /// Cell-grid dimensions
    pub size_x: u32,
    pub size_y: u32,
    pub size_z: u32,

    /// Object capacity, rounded up to a multiple of 32 at init
    pub object_count: u32,

    /// size_x * size_y * size_z
    pub block_count: u32,

    /// World bounds of the baked volume
    pub bbox: Aabb,

    /// Optional per-(x, y) Z offset for terrain-following cell grids
    pub cell_height_offset: Option<Vec<f32>>,

    /// block_count * object_count bits, one word row per block
    pub bits: BitVec,
}
