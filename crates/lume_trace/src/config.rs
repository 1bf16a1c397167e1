//! Tracer configuration.
//!
//! Lighting and bounce parameters are explicit config values rather than
//! module-level state, so two tracers with different setups can coexist and
//! a driver can deserialize a setup from its settings file.

use lume_core::{color, Color};
use lume_math::Vec3;
use serde::{Deserialize, Serialize};

/// Fixed-parameter Phong lighting: a single point light, no attenuation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhongLighting {
    pub light_position: Vec3,
    pub ambient: f32,
    pub diffuse: f32,
    pub specular: f32,
    pub shininess: f32,
}

impl Default for PhongLighting {
    fn default() -> Self {
        Self {
            light_position: Vec3::new(0.0, 1.9, 0.0),
            ambient: 0.1,
            diffuse: 0.5,
            specular: 0.5,
            shininess: 10.0,
        }
    }
}

/// Everything the tracer needs besides the scene itself.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TracerConfig {
    pub lighting: PhongLighting,
    /// Weight of the mirror-reflection color blended in at each bounce.
    pub reflectivity: f32,
    /// Color returned when a ray escapes the scene.
    pub background: Color,
    /// Offset applied to secondary-ray origins to dodge self-intersection.
    pub bias: f32,
}

impl Default for TracerConfig {
    fn default() -> Self {
        Self {
            lighting: PhongLighting::default(),
            reflectivity: 0.4,
            background: color::BLACK,
            bias: 1e-3,
        }
    }
}
