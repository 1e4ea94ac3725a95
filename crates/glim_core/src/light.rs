//! Light sources.

use glim_math::Vec3;

use crate::error::SceneError;

/// Illumination arriving at a surface point from one light.
#[derive(Debug, Clone, Copy)]
pub struct Illumination {
    /// Direction from the surface point toward the light (unit length)
    pub to_light: Vec3,
    /// RGB intensity arriving at the point
    pub intensity: Vec3,
    /// Distance from the point to the light; infinite for directional lights
    pub distance: f32,
}

/// A light source: either directional (parallel rays from infinity) or a
/// point light with quadratic falloff.
#[derive(Debug, Clone)]
pub enum Light {
    Directional {
        /// Direction the light travels in (unit length)
        direction: Vec3,
        color: Vec3,
    },
    Point {
        position: Vec3,
        color: Vec3,
        /// Quadratic falloff coefficient, strictly positive
        falloff: f32,
    },
}

impl Light {
    /// Create a directional light. The direction is the direction the light
    /// travels in, not the direction toward it.
    pub fn directional(direction: Vec3, color: Vec3) -> Self {
        Light::Directional {
            direction: direction.normalize(),
            color,
        }
    }

    /// Create a point light. A non-positive falloff would blow up the
    /// intensity division, so it is rejected at construction.
    pub fn point(position: Vec3, color: Vec3, falloff: f32) -> Result<Self, SceneError> {
        if falloff <= 0.0 {
            return Err(SceneError::InvalidFalloff(falloff));
        }
        Ok(Light::Point {
            position,
            color,
            falloff,
        })
    }

    /// Query the illumination this light delivers at `point`.
    pub fn illumination(&self, point: Vec3) -> Illumination {
        match self {
            Light::Directional { direction, color } => Illumination {
                to_light: -*direction,
                intensity: *color,
                distance: f32::INFINITY,
            },
            Light::Point {
                position,
                color,
                falloff,
            } => {
                let offset = *position - point;
                let distance = offset.length();
                Illumination {
                    to_light: offset / distance,
                    intensity: *color / (falloff * distance * distance),
                    distance,
                }
            }
        }
    }
}
