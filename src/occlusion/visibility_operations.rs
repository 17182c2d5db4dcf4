//! Visibility table operations - pure functions over `VisibilityData`.
//!
//! All bit arithmetic lives here. Index misuse is a precondition violation
//! and fails fast with an assertion instead of reading out of bounds.

use bit_vec::BitVec;

use super::visibility_data::{ObjectIndex, VisibilityData};
use crate::bounds::Aabb;
use crate::error::{OcclusionError, OcclusionResult};

/// Bits per storage word
const WORD_BITS: u32 = 32;

/// Allocate a zeroed visibility table for the given grid
///
/// `object_count` is rounded up to the next multiple of 32 before
/// allocation so block rows always start on a word boundary. Dimension and
/// height-offset validation happens here, before any baking work.
pub fn init_visibility_data(
    size_x: u32,
    size_y: u32,
    size_z: u32,
    object_count: u32,
    bbox: Aabb,
    cell_height_offset: Option<&[f32]>,
) -> OcclusionResult<VisibilityData> {
    if size_x == 0 || size_y == 0 || size_z == 0 {
        return Err(OcclusionError::InvalidDimensions {
            size_x,
            size_y,
            size_z,
        });
    }

    if let Some(offsets) = cell_height_offset {
        let expected = (size_x * size_y) as usize;
        if offsets.len() != expected {
            return Err(OcclusionError::HeightOffsetMismatch {
                expected,
                got: offsets.len(),
            });
        }
    }

    let object_count = round_up_to_word(object_count);
    let block_count = size_x * size_y * size_z;

    Ok(VisibilityData {
        size_x,
        size_y,
        size_z,
        object_count,
        block_count,
        bbox,
        cell_height_offset: cell_height_offset.map(|offsets| offsets.to_vec()),
        bits: BitVec::from_elem((block_count * object_count) as usize, false),
    })
}

/// Round object capacity up to the next word boundary
fn round_up_to_word(count: u32) -> u32 {
    (count + (WORD_BITS - 1)) & !(WORD_BITS - 1)
}

/// Flatten grid coordinates to a block index (x fastest, then y, then z)
pub fn block_index(data: &VisibilityData, x: u32, y: u32, z: u32) -> u32 {
    x + y * data.size_x + z * data.size_x * data.size_y
}

fn bit_index(data: &VisibilityData, block_index: u32, object_index: ObjectIndex) -> usize {
    assert!(
        block_index < data.block_count,
        "block index {} out of range ({} blocks)",
        block_index,
        data.block_count
    );
    assert!(
        object_index < data.object_count,
        "object index {} out of range ({} objects)",
        object_index,
        data.object_count
    );
    (block_index * data.object_count + object_index) as usize
}

/// Test one visibility bit; O(1)
pub fn is_object_visible_from_block(
    data: &VisibilityData,
    block_index: u32,
    object_index: ObjectIndex,
) -> bool {
    data.bits.get(bit_index(data, block_index, object_index)) == Some(true)
}

/// Mark an object visible from a block; O(1), idempotent
pub fn enable_visibility_for_object(
    data: &mut VisibilityData,
    block_index: u32,
    object_index: ObjectIndex,
) {
    let index = bit_index(data, block_index, object_index);
    data.bits.set(index, true);
}

/// Clear one visibility bit; O(1)
///
/// Never called by the baker (bits only go 0 -> 1 during a bake); exists
/// for external editing tools.
pub fn disable_visibility_for_object(
    data: &mut VisibilityData,
    block_index: u32,
    object_index: ObjectIndex,
) {
    let index = bit_index(data, block_index, object_index);
    data.bits.set(index, false);
}

/// A block's raw word row, for bulk copy by runtime consumers
pub fn block_visibility_data(data: &VisibilityData, block_index: u32) -> &[u32] {
    assert!(
        block_index < data.block_count,
        "block index {} out of range ({} blocks)",
        block_index,
        data.block_count
    );
    let words_per_block = (data.object_count / WORD_BITS) as usize;
    let start = block_index as usize * words_per_block;
    &data.bits.storage()[start..start + words_per_block]
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::Point3;

    fn test_bbox() -> Aabb {
        crate::bounds::create_aabb(Point3::new(0.0, 0.0, 0.0), Point3::new(10.0, 10.0, 10.0))
    }

    #[test]
    fn test_init_rounds_object_count_up() {
        let data = init_visibility_data(2, 2, 2, 5, test_bbox(), None)
            .expect("Failed to init visibility data");
        assert_eq!(data.object_count, 32);
        assert_eq!(data.block_count, 8);
        assert_eq!(data.bits.len(), 8 * 32);

        let data = init_visibility_data(1, 1, 1, 33, test_bbox(), None)
            .expect("Failed to init visibility data");
        assert_eq!(data.object_count, 64);

        let data = init_visibility_data(1, 1, 1, 64, test_bbox(), None)
            .expect("Failed to init visibility data");
        assert_eq!(data.object_count, 64);
    }

    #[test]
    fn test_init_rejects_zero_dimension() {
        let result = init_visibility_data(2, 0, 2, 8, test_bbox(), None);
        assert_eq!(
            result.err(),
            Some(OcclusionError::InvalidDimensions {
                size_x: 2,
                size_y: 0,
                size_z: 2
            })
        );
    }

    #[test]
    fn test_init_rejects_short_height_offsets() {
        let offsets = [0.0f32; 3];
        let result = init_visibility_data(2, 2, 1, 8, test_bbox(), Some(&offsets));
        assert_eq!(
            result.err(),
            Some(OcclusionError::HeightOffsetMismatch {
                expected: 4,
                got: 3
            })
        );
    }

    #[test]
    fn test_bit_packing_non_word_object_count() {
        let mut data = init_visibility_data(2, 1, 1, 5, test_bbox(), None)
            .expect("Failed to init visibility data");

        enable_visibility_for_object(&mut data, 0, 4);
        assert!(is_object_visible_from_block(&data, 0, 4));
        for object in 0..4 {
            assert!(!is_object_visible_from_block(&data, 0, object));
        }
        for object in 0..32 {
            assert!(!is_object_visible_from_block(&data, 1, object));
        }
    }

    #[test]
    fn test_enable_disable_round_trip() {
        let mut data = init_visibility_data(1, 1, 1, 32, test_bbox(), None)
            .expect("Failed to init visibility data");

        enable_visibility_for_object(&mut data, 0, 7);
        assert!(is_object_visible_from_block(&data, 0, 7));
        disable_visibility_for_object(&mut data, 0, 7);
        assert!(!is_object_visible_from_block(&data, 0, 7));
    }

    #[test]
    fn test_block_row_word_layout() {
        let mut data = init_visibility_data(2, 1, 1, 64, test_bbox(), None)
            .expect("Failed to init visibility data");

        enable_visibility_for_object(&mut data, 1, 0);
        enable_visibility_for_object(&mut data, 1, 33);

        assert_eq!(block_visibility_data(&data, 0), &[0u32, 0u32]);
        let row = block_visibility_data(&data, 1);
        assert_eq!(row.len(), 2);
        assert_eq!(row[0], 1);
        assert_eq!(row[1], 1 << 1);
    }

    #[test]
    fn test_deep_copy_isolation() {
        let mut table_a = init_visibility_data(2, 2, 1, 8, test_bbox(), Some(&[0.0f32; 4]))
            .expect("Failed to init visibility data");
        let table_b = table_a.clone();

        enable_visibility_for_object(&mut table_a, 3, 2);
        assert!(is_object_visible_from_block(&table_a, 3, 2));
        assert!(!is_object_visible_from_block(&table_b, 3, 2));
    }

    #[test]
    fn test_block_index_raster_order() {
        let data = init_visibility_data(3, 4, 5, 8, test_bbox(), None)
            .expect("Failed to init visibility data");
        assert_eq!(block_index(&data, 0, 0, 0), 0);
        assert_eq!(block_index(&data, 2, 0, 0), 2);
        assert_eq!(block_index(&data, 0, 1, 0), 3);
        assert_eq!(block_index(&data, 0, 0, 1), 12);
        assert_eq!(block_index(&data, 2, 3, 4), 2 + 3 * 3 + 4 * 12);
    }

    #[test]
    #[should_panic(expected = "object index")]
    fn test_object_index_out_of_range_fails_fast() {
        let data = init_visibility_data(1, 1, 1, 32, test_bbox(), None)
            .expect("Failed to init visibility data");
        is_object_visible_from_block(&data, 0, 32);
    }
}
