use std::any::Any;
use std::f32::consts::TAU;

use glam::Vec3;

use crate::components::{Geometry, Mesh, Topology};
use crate::engine::{Context, System};

/// Regenerates the `Mesh` of every dirty `Geometry`.
pub struct GeometrySystem;

/// Tessellate an ellipse with `segments` points, major axis along x.
///
/// Filled shapes become a triangle fan around the origin; outlines become a
/// line loop with the first point repeated at the end.
pub fn geometry_mesh(geometry: &Geometry) -> Mesh {
    let a = geometry.axis_a.max(geometry.axis_b);
    let b = geometry.axis_a.min(geometry.axis_b);
    let segments = geometry.segments as usize;

    let points: Vec<Vec3> = (0..segments)
        .map(|i| {
            let t = i as f32 / segments as f32 * TAU;
            Vec3::new(a * t.cos(), b * t.sin(), 0.0)
        })
        .collect();

    let mut mesh = Mesh {
        filled: geometry.filled,
        ..Mesh::default()
    };
    if points.is_empty() {
        return mesh;
    }

    if geometry.filled {
        mesh.topology = Topology::TriangleFan;
        mesh.vertices.push(Vec3::ZERO);
        for i in 0..segments {
            mesh.vertices.push(points[i]);
            mesh.vertices.push(points[(i + 1) % segments]);
        }
    } else {
        mesh.topology = Topology::LineLoop;
        mesh.vertices.extend_from_slice(&points);
        mesh.vertices.push(points[0]);
    }
    mesh.colours = vec![geometry.colour; mesh.vertices.len()];
    mesh
}

impl System for GeometrySystem {
    fn name(&self) -> &'static str {
        "geometry"
    }

    fn update(&mut self, ctx: &mut Context, _dt: f32) {
        let dirty: Vec<_> = ctx
            .registry
            .world()
            .view::<(Geometry,)>()
            .filter(|(_, geometry)| geometry.dirty)
            .map(|(entity, geometry)| (entity, geometry_mesh(geometry)))
            .collect();

        for (entity, mesh) in dirty {
            ctx.registry.add_component(entity, mesh);
            if let Some(geometry) = ctx.registry.world_mut().get_component_mut::<Geometry>(entity) {
                geometry.dirty = false;
            }
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
