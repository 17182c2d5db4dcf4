//! Mock-backed occlusion bake walkthrough.
//!
//! Drives the baker to completion against in-memory render and query
//! services whose queries report every candidate visible. Run with
//! `RUST_LOG=debug` to watch per-object visibility resolution.

use anyhow::Result;
use cgmath::Point3;
use static_occlusion::bounds::create_aabb;
use static_occlusion::occlusion::{
    init_visibility_data, is_object_visible_from_block, BakeContext, BakeSettings,
    CaptureCameraData, FrameCapture, OcclusionQueryBackend, OcclusionRenderPass, QueryBufferId,
    StaticOcclusionBaker,
};

struct DemoRenderPass {
    object_count: u32,
    next_buffer: u32,
}

impl OcclusionRenderPass for DemoRenderPass {
    fn draw_occlusion_frame(
        &mut self,
        _camera: &CaptureCameraData,
        block_index: u32,
    ) -> Option<FrameCapture> {
        let buffer = QueryBufferId(self.next_buffer);
        self.next_buffer += 1;
        Some(FrameCapture {
            block_index,
            query_buffer: buffer,
            slots: (0..self.object_count).map(Some).collect(),
        })
    }
}

#[derive(Default)]
struct DemoQueryBackend {
    released: u32,
}

impl OcclusionQueryBackend for DemoQueryBackend {
    fn query_is_ready(&self, _buffer: QueryBufferId, _slot: u32) -> bool {
        true
    }

    fn query_value(&self, _buffer: QueryBufferId, _slot: u32) -> u32 {
        1
    }

    fn delete_query_buffer(&mut self, _buffer: QueryBufferId, _immediate: bool) {
        self.released += 1;
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let object_count = 24;
    let bbox = create_aabb(Point3::new(0.0, 0.0, 0.0), Point3::new(64.0, 64.0, 16.0));
    let mut data = init_visibility_data(4, 4, 2, object_count, bbox, None)?;

    let settings = BakeSettings {
        step_count: 4,
        ..Default::default()
    };
    let mut baker = StaticOcclusionBaker::new(settings);
    baker.start_build_occlusion(&data);

    let mut render_pass = DemoRenderPass {
        object_count,
        next_buffer: 0,
    };
    let mut queries = DemoQueryBackend::default();

    let mut ticks = 0u32;
    loop {
        let mut ctx = BakeContext {
            data: &mut data,
            render_pass: &mut render_pass,
            queries: &mut queries,
            terrain: None,
        };
        let done = baker.process_block(&mut ctx)?;
        ticks += 1;

        if ticks % 50 == 0 || done {
            println!(
                "tick {}: block {}/{}",
                ticks,
                baker.current_steps_count(),
                baker.total_steps_count()
            );
        }
        if done {
            break;
        }
    }

    let visible = (0..data.block_count)
        .flat_map(|block| (0..object_count).map(move |object| (block, object)))
        .filter(|&(block, object)| is_object_visible_from_block(&data, block, object))
        .count();

    println!(
        "bake finished in {} ticks: {} visible (block, object) pairs, {} query buffers released",
        ticks,
        visible,
        queries.released
    );

    Ok(())
}
