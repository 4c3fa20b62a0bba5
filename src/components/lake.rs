use std::f32::consts::TAU;

use glam::Vec2;
use serde::Deserialize;

use super::{LoadComponent, decode};

/// An elliptical lake with a jagged shoreline and an island near one focus.
///
/// The outlines are derived data: they are regenerated by [`Lake::generate`]
/// on every load and never read from scene files.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Lake {
    pub lake_axis_length: [f32; 2],
    /// Shoreline jaggedness frequency.
    pub lake_freq: f32,
    /// Shoreline jaggedness as a fraction of the radius.
    pub lake_amp: f32,
    pub island_radius: f32,
    pub island_freq: f32,
    pub island_amp: f32,
    #[serde(deserialize_with = "super::segment_count")]
    pub segments: u32,

    #[serde(skip)]
    pub lake_outline: Vec<Vec2>,
    #[serde(skip)]
    pub island_outline: Vec<Vec2>,
}

impl Default for Lake {
    fn default() -> Self {
        Self {
            lake_axis_length: [15.0, 25.0],
            lake_freq: 4.0,
            lake_amp: 0.15,
            island_radius: 6.0,
            island_freq: 3.0,
            island_amp: 0.25,
            segments: 200,
            lake_outline: Vec::new(),
            island_outline: Vec::new(),
        }
    }
}

fn smooth_noise(t: f32, frequency: f32, amplitude: f32) -> f32 {
    let v1 = (t * frequency * 1.3).sin();
    let v2 = (t * frequency * 0.7 + 2.0).sin();
    let v3 = (t * frequency * 2.1 + 1.3).sin();
    (v1 + v2 + v3) * 0.33 * amplitude
}

impl Lake {
    /// Rebuild both outlines from the shape parameters.
    pub fn generate(&mut self) {
        self.lake_outline.clear();
        self.island_outline.clear();

        let [first, second] = self.lake_axis_length;
        let a = first.max(second);
        let b = first.min(second);
        let c = (a * a - b * b).max(0.0).sqrt() / 2.0;
        let focus = Vec2::new(c, 0.0);

        for i in 0..self.segments {
            let t = i as f32 / self.segments as f32 * TAU;
            let (sin, cos) = t.sin_cos();

            let lake_r = 1.0 + smooth_noise(t, self.lake_freq, self.lake_amp);
            self.lake_outline
                .push(Vec2::new(a * cos * lake_r, b * sin * lake_r));

            let island_r =
                self.island_radius * (1.0 + smooth_noise(t, self.island_freq, self.island_amp));
            self.island_outline
                .push(focus + Vec2::new(cos, sin) * island_r);
        }
    }
}

impl LoadComponent for Lake {
    const NAME: &'static str = "Lake";

    fn load(&mut self, data: &serde_json::Value) -> Result<(), serde_json::Error> {
        *self = decode(data)?;
        self.generate();
        Ok(())
    }
}
