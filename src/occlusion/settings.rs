//! Bake tuning parameters.

use serde::{Deserialize, Serialize};

/// Tunable parameters for one occlusion bake
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BakeSettings {
    /// Grid subdivisions per cell face (a face walks (step_count + 1)^2 points)
    pub step_count: u32,

    /// Vertical field of view for capture cameras, degrees
    pub camera_fov_degrees: f32,

    /// Near plane distance for capture cameras
    pub camera_near: f32,

    /// Far plane distance for capture cameras
    pub camera_far: f32,
}

impl Default for BakeSettings {
    fn default() -> Self {
        Self {
            step_count: 10,
            camera_fov_degrees: 95.0,
            camera_near: 1.0,
            camera_far: 2500.0,
        }
    }
}
