//! Occlusion baker - the frame-sliced bake state machine.
//!
//! Driven by one `process_block` call per frame from the host loop; never
//! blocks and never spawns threads. Query readiness is polled, so resolving
//! a cell's captures spans however many ticks the GPU needs. All persistent
//! state (cell cursor, pending samples, in-flight captures) lives here
//! across ticks.

use std::time::Instant;

use rand::Rng;

use super::camera::{init_capture_camera, orient_camera, CaptureCameraData};
use super::capture::{release_captures, resolve_captures, FrameCapture};
use super::interfaces::{OcclusionQueryBackend, OcclusionRenderPass, TerrainHeightSource};
use super::sample_builder::{build_block_samples, cell_bounds, CameraSample, SIDE_COUNT};
use super::settings::BakeSettings;
use super::visibility_data::VisibilityData;
use crate::bounds::{create_aabb, Aabb};
use crate::error::{OcclusionError, OcclusionResult};
use cgmath::Point3;

/// Bake lifecycle phase, derived from baker state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BakeState {
    /// No bake bound
    Idle,
    /// Building or rendering samples for the current cell
    Sampling,
    /// Waiting on outstanding queries with no samples left to render
    Draining,
    /// Cursor advanced past the last cell, all queries resolved
    Complete,
}

/// Target table and collaborators for one bake tick
///
/// The table is owned by the caller; the baker only mutates it through
/// visibility enables during query resolution.
pub struct BakeContext<'a> {
    pub data: &'a mut VisibilityData,
    pub render_pass: &'a mut dyn OcclusionRenderPass,
    pub queries: &'a mut dyn OcclusionQueryBackend,
    pub terrain: Option<&'a dyn TerrainHeightSource>,
}

/// Frame-sliced static occlusion baker
pub struct StaticOcclusionBaker {
    settings: BakeSettings,

    /// One persistent camera per principal direction, re-oriented per sample
    cameras: [CaptureCameraData; SIDE_COUNT],

    // Volume snapshot taken at start_build_occlusion
    volume: Aabb,
    size_x: u32,
    size_y: u32,
    size_z: u32,
    cell_height_offset: Option<Vec<f32>>,

    // Cell cursor, raster order (x fastest, then y, then z)
    cursor_x: u32,
    cursor_y: u32,
    cursor_z: u32,

    /// Pending placements; only ever non-empty for the current cell
    pending_samples: Vec<CameraSample>,

    /// Captures whose queries are still in flight
    in_flight: Vec<FrameCapture>,

    started: bool,
    block_timer: Option<Instant>,
}

impl StaticOcclusionBaker {
    pub fn new(settings: BakeSettings) -> Self {
        Self {
            settings,
            cameras: [init_capture_camera(&settings); SIDE_COUNT],
            volume: create_aabb(Point3::new(0.0, 0.0, 0.0), Point3::new(0.0, 0.0, 0.0)),
            size_x: 0,
            size_y: 0,
            size_z: 0,
            cell_height_offset: None,
            cursor_x: 0,
            cursor_y: 0,
            cursor_z: 0,
            pending_samples: Vec::new(),
            in_flight: Vec::new(),
            started: false,
            block_timer: None,
        }
    }

    /// Bind a target table and reset the cursor to the first cell
    ///
    /// Copies the grid dimensions, bounds, and height offsets from the
    /// table; a previous bake must have completed or been aborted first.
    pub fn start_build_occlusion(&mut self, data: &VisibilityData) {
        assert!(
            self.in_flight.is_empty(),
            "abort the previous bake before starting a new one"
        );

        self.volume = data.bbox;
        self.size_x = data.size_x;
        self.size_y = data.size_y;
        self.size_z = data.size_z;
        self.cell_height_offset = data.cell_height_offset.clone();

        self.cursor_x = 0;
        self.cursor_y = 0;
        self.cursor_z = 0;
        self.pending_samples.clear();
        self.started = true;
        self.block_timer = None;

        log::info!(
            "static occlusion bake started: {}x{}x{} blocks, {} objects",
            self.size_x,
            self.size_y,
            self.size_z,
            data.object_count
        );
    }

    /// One bake tick; call once per frame until it returns `Ok(true)`
    ///
    /// Resolves in-flight captures first, then renders a random bounded
    /// subset of the current cell's pending samples, then advances the
    /// cursor once the cell is exhausted.
    pub fn process_block(&mut self, ctx: &mut BakeContext) -> OcclusionResult<bool> {
        if !self.started {
            return Err(OcclusionError::BakeNotStarted);
        }

        // Give outstanding queries frames to become ready instead of
        // stalling on them
        if !resolve_captures(&mut self.in_flight, ctx.data, ctx.queries) {
            return Ok(false);
        }

        if self.cursor_z >= self.size_z {
            return Ok(true);
        }

        if self.pending_samples.is_empty() {
            if let Some(timer) = self.block_timer.take() {
                log::info!("block processing time: {:.4}s", timer.elapsed().as_secs_f64());
            }
            self.block_timer = Some(Instant::now());
            self.build_samples_for_current_block(ctx.terrain);
        }

        if self.render_current_block(ctx) {
            self.advance_cursor();
        }

        Ok(false)
    }

    /// Abandon the bake, releasing every outstanding query buffer
    pub fn abort(&mut self, queries: &mut dyn OcclusionQueryBackend) {
        if !self.in_flight.is_empty() {
            log::info!(
                "occlusion bake aborted with {} captures in flight",
                self.in_flight.len()
            );
        }
        release_captures(&mut self.in_flight, queries);
        self.pending_samples.clear();
        self.started = false;
        self.block_timer = None;
    }

    /// Raster index of the cell cursor
    pub fn current_steps_count(&self) -> u32 {
        self.cursor_x + self.cursor_y * self.size_x + self.cursor_z * self.size_x * self.size_y
    }

    /// Total number of cells in the bake
    pub fn total_steps_count(&self) -> u32 {
        self.size_x * self.size_y * self.size_z
    }

    pub fn state(&self) -> BakeState {
        if !self.started {
            BakeState::Idle
        } else if self.cursor_z >= self.size_z {
            if self.in_flight.is_empty() {
                BakeState::Complete
            } else {
                BakeState::Draining
            }
        } else if self.pending_samples.is_empty() && !self.in_flight.is_empty() {
            BakeState::Draining
        } else {
            BakeState::Sampling
        }
    }

    fn build_samples_for_current_block(&mut self, terrain: Option<&dyn TerrainHeightSource>) {
        let cell = cell_bounds(
            &self.volume,
            self.size_x,
            self.size_y,
            self.size_z,
            self.cell_height_offset.as_deref(),
            self.cursor_x,
            self.cursor_y,
            self.cursor_z,
        );
        build_block_samples(&cell, &self.settings, terrain, &mut self.pending_samples);
        log::trace!(
            "block ({}, {}, {}): {} capture samples",
            self.cursor_x,
            self.cursor_y,
            self.cursor_z,
            self.pending_samples.len()
        );
    }

    /// Render a bounded random subset of the pending queue
    ///
    /// Returns whether the queue is now empty (cell finished for rendering
    /// purposes; its queries may still be in flight).
    fn render_current_block(&mut self, ctx: &mut BakeContext) -> bool {
        let block_index = self.current_steps_count();
        let max_renders = 1 + self.pending_samples.len() / 4;
        let mut renders = 0;
        let mut captured = 0;
        let mut rng = rand::thread_rng();

        // Uniform random draw: a fixed spatial order would bake visible
        // progress artifacts into the table
        while renders < max_renders && !self.pending_samples.is_empty() {
            let pick = rng.gen_range(0..self.pending_samples.len());
            let sample = self.pending_samples.swap_remove(pick);
            if self.perform_render(&sample, block_index, ctx) {
                captured += 1;
            }
            renders += 1;
        }

        // No attempt this tick captured anything: structurally empty cell,
        // nothing to learn from the rest of the queue
        if captured == 0 {
            self.pending_samples.clear();
        }

        self.pending_samples.is_empty()
    }

    fn perform_render(
        &mut self,
        sample: &CameraSample,
        block_index: u32,
        ctx: &mut BakeContext,
    ) -> bool {
        let camera = &mut self.cameras[sample.side];
        orient_camera(camera, sample.position, sample.direction, sample.up, sample.left);

        match ctx
            .render_pass
            .draw_occlusion_frame(&self.cameras[sample.side], block_index)
        {
            Some(capture) => {
                self.in_flight.push(capture);
                true
            }
            // Query buffer exhaustion: drop the sample, keep baking
            None => false,
        }
    }

    fn advance_cursor(&mut self) {
        self.cursor_x += 1;
        if self.cursor_x >= self.size_x {
            self.cursor_x = 0;
            self.cursor_y += 1;
            if self.cursor_y >= self.size_y {
                self.cursor_y = 0;
                self.cursor_z += 1;
            }
        }
    }
}
