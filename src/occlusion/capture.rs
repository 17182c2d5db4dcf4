//! In-flight capture tracking and occlusion query resolution.
//!
//! A `FrameCapture` is one rendered camera sample: a query buffer plus one
//! slot per candidate object. Results trickle in over multiple frames, so
//! resolution polls each slot and keeps the capture alive until every slot
//! has reported.

use super::interfaces::{OcclusionQueryBackend, QueryBufferId};
use super::visibility_data::{ObjectIndex, VisibilityData};
use super::visibility_operations::{enable_visibility_for_object, is_object_visible_from_block};

/// One in-flight GPU occlusion query batch
#[derive(Debug)]
pub struct FrameCapture {
    /// Block the capture was rendered from
    pub block_index: u32,

    /// Query buffer owned by this capture until resolution releases it
    pub query_buffer: QueryBufferId,

    /// Slot i holds the candidate awaiting query i; `None` means already
    /// resolved or skipped
    pub slots: Vec<Option<ObjectIndex>>,
}

/// Drain ready query results into the visibility table
///
/// Polls every in-flight capture once. A nonzero sample count marks the
/// object visible from the capture's block; the slot is then nulled so it
/// is never re-queried. Fully resolved captures release their query buffer
/// and drop out of the list.
///
/// Returns whether the list is now empty; this gates whether the bake may
/// touch the next cell this tick.
pub fn resolve_captures(
    captures: &mut Vec<FrameCapture>,
    data: &mut VisibilityData,
    queries: &mut dyn OcclusionQueryBackend,
) -> bool {
    let mut index = 0;
    while index < captures.len() {
        let capture = &mut captures[index];
        let mut resolved = 0;

        for (slot, entry) in capture.slots.iter_mut().enumerate() {
            let object = match entry {
                None => {
                    resolved += 1;
                    continue;
                }
                Some(object) => *object,
            };

            if !queries.query_is_ready(capture.query_buffer, slot as u32) {
                continue;
            }

            let samples = queries.query_value(capture.query_buffer, slot as u32);
            if samples != 0 {
                if !is_object_visible_from_block(data, capture.block_index, object) {
                    log::debug!(
                        "object {} visible from block {} (query value {})",
                        object,
                        capture.block_index,
                        samples
                    );
                }
                enable_visibility_for_object(data, capture.block_index, object);
            }

            *entry = None;
            resolved += 1;
        }

        if resolved == captures[index].slots.len() {
            let finished = captures.swap_remove(index);
            queries.delete_query_buffer(finished.query_buffer, true);
        } else {
            index += 1;
        }
    }

    captures.is_empty()
}

/// Release every outstanding capture's query buffer without resolving
///
/// The abort path: skipping this leaks GPU query resources.
pub fn release_captures(
    captures: &mut Vec<FrameCapture>,
    queries: &mut dyn OcclusionQueryBackend,
) {
    for capture in captures.drain(..) {
        queries.delete_query_buffer(capture.query_buffer, true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounds::create_aabb;
    use crate::occlusion::visibility_operations::init_visibility_data;
    use cgmath::Point3;
    use std::collections::HashSet;

    struct ScriptedBackend {
        /// Slots (buffer, slot) that report ready
        ready: HashSet<(u32, u32)>,
        /// Sample count reported for every ready slot
        value: u32,
        released: Vec<QueryBufferId>,
    }

    impl ScriptedBackend {
        fn new(value: u32) -> Self {
            Self {
                ready: HashSet::new(),
                value,
                released: Vec::new(),
            }
        }
    }

    impl OcclusionQueryBackend for ScriptedBackend {
        fn query_is_ready(&self, buffer: QueryBufferId, slot: u32) -> bool {
            self.ready.contains(&(buffer.0, slot))
        }

        fn query_value(&self, _buffer: QueryBufferId, _slot: u32) -> u32 {
            self.value
        }

        fn delete_query_buffer(&mut self, buffer: QueryBufferId, _immediate: bool) {
            assert!(
                !self.released.contains(&buffer),
                "query buffer {:?} released twice",
                buffer
            );
            self.released.push(buffer);
        }
    }

    fn test_data(blocks: u32, objects: u32) -> VisibilityData {
        let bbox = create_aabb(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0));
        init_visibility_data(blocks, 1, 1, objects, bbox, None)
            .expect("Failed to init visibility data")
    }

    #[test]
    fn test_unready_capture_stays_in_flight() {
        let mut data = test_data(1, 2);
        let mut backend = ScriptedBackend::new(1);
        let mut captures = vec![FrameCapture {
            block_index: 0,
            query_buffer: QueryBufferId(7),
            slots: vec![Some(0), Some(1)],
        }];

        assert!(!resolve_captures(&mut captures, &mut data, &mut backend));
        assert_eq!(captures.len(), 1);
        assert!(backend.released.is_empty());
        assert!(!is_object_visible_from_block(&data, 0, 0));
    }

    #[test]
    fn test_partial_resolution_spans_ticks() {
        let mut data = test_data(1, 2);
        let mut backend = ScriptedBackend::new(3);
        let mut captures = vec![FrameCapture {
            block_index: 0,
            query_buffer: QueryBufferId(1),
            slots: vec![Some(0), Some(1)],
        }];

        backend.ready.insert((1, 0));
        assert!(!resolve_captures(&mut captures, &mut data, &mut backend));
        assert!(is_object_visible_from_block(&data, 0, 0));
        assert!(!is_object_visible_from_block(&data, 0, 1));
        assert_eq!(captures[0].slots[0], None);

        backend.ready.insert((1, 1));
        assert!(resolve_captures(&mut captures, &mut data, &mut backend));
        assert!(is_object_visible_from_block(&data, 0, 1));
        assert_eq!(backend.released, vec![QueryBufferId(1)]);
    }

    #[test]
    fn test_zero_sample_count_is_not_visibility() {
        let mut data = test_data(1, 1);
        let mut backend = ScriptedBackend::new(0);
        backend.ready.insert((2, 0));
        let mut captures = vec![FrameCapture {
            block_index: 0,
            query_buffer: QueryBufferId(2),
            slots: vec![Some(0)],
        }];

        assert!(resolve_captures(&mut captures, &mut data, &mut backend));
        assert!(!is_object_visible_from_block(&data, 0, 0));
        assert_eq!(backend.released, vec![QueryBufferId(2)]);
    }

    #[test]
    fn test_null_slots_count_as_processed() {
        let mut data = test_data(1, 2);
        let mut backend = ScriptedBackend::new(1);
        backend.ready.insert((4, 1));
        let mut captures = vec![FrameCapture {
            block_index: 0,
            query_buffer: QueryBufferId(4),
            slots: vec![None, Some(1)],
        }];

        assert!(resolve_captures(&mut captures, &mut data, &mut backend));
        assert!(is_object_visible_from_block(&data, 0, 1));
    }

    #[test]
    fn test_release_captures_frees_every_buffer() {
        let mut backend = ScriptedBackend::new(1);
        let mut captures = vec![
            FrameCapture {
                block_index: 0,
                query_buffer: QueryBufferId(10),
                slots: vec![Some(0)],
            },
            FrameCapture {
                block_index: 1,
                query_buffer: QueryBufferId(11),
                slots: vec![Some(0)],
            },
        ];

        release_captures(&mut captures, &mut backend);
        assert!(captures.is_empty());
        assert_eq!(backend.released, vec![QueryBufferId(10), QueryBufferId(11)]);
    }
}
