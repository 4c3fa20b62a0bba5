use std::any::Any;

use glam::Vec2;

use crate::components::{Mesh, Topology, Track};
use crate::engine::{Context, System};

/// Regenerates the `Mesh` of every dirty `Track`.
pub struct TrackSystem;

/// Build the ribbon for `track` as an indexed triangle list.
///
/// Each centreline point contributes a left and a right vertex, offset by
/// half the width along the segment normal. Consecutive pairs form a quad of
/// two triangles. A closed track gets one more quad joining the last pair to
/// the first. Fewer than two points yield an empty mesh.
pub fn track_mesh(track: &Track) -> Mesh {
    let mut mesh = Mesh {
        topology: Topology::Triangles,
        filled: false,
        ..Mesh::default()
    };
    let points = &track.centreline;
    let n = points.len();
    if n < 2 {
        return mesh;
    }

    let half_width = track.width * 0.5;
    let mut push_pair = |at: Vec2, dir: Vec2| {
        let normal = dir.normalize_or_zero().perp();
        mesh.vertices.push((at + normal * half_width).extend(0.0));
        mesh.vertices.push((at - normal * half_width).extend(0.0));
    };

    for pair in points.windows(2) {
        push_pair(pair[0], pair[1] - pair[0]);
    }
    push_pair(points[n - 1], points[n - 1] - points[n - 2]);

    let mut quad = |a: u32, b: u32| {
        mesh.indices.extend_from_slice(&[a, a + 1, b + 1, a, b, b + 1]);
    };
    for i in 0..(n - 1) as u32 {
        quad(2 * i, 2 * i + 2);
    }
    if track.closed && n > 2 {
        quad(2 * (n as u32 - 1), 0);
    }

    mesh.colours = vec![track.colour; mesh.vertices.len()];
    mesh
}

impl System for TrackSystem {
    fn name(&self) -> &'static str {
        "track"
    }

    fn update(&mut self, ctx: &mut Context, _dt: f32) {
        let dirty: Vec<_> = ctx
            .registry
            .world()
            .view::<(Track,)>()
            .filter(|(_, track)| track.dirty)
            .map(|(entity, track)| {
                if track.centreline.len() < 2 {
                    log::warn!(
                        "track {entity} has {} points, at least 2 needed",
                        track.centreline.len()
                    );
                }
                (entity, track_mesh(track))
            })
            .collect();

        for (entity, mesh) in dirty {
            ctx.registry.add_component(entity, mesh);
            if let Some(track) = ctx.registry.world_mut().get_component_mut::<Track>(entity) {
                track.dirty = false;
            }
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn straight(closed: bool) -> Track {
        Track {
            centreline: vec![Vec2::ZERO, Vec2::new(1.0, 0.0), Vec2::new(2.0, 0.0)],
            width: 2.0,
            closed,
            colour: Vec3::ONE,
            dirty: true,
        }
    }

    #[test]
    fn ribbon_offsets_along_the_normal() {
        let mesh = track_mesh(&straight(false));
        assert_eq!(mesh.topology, Topology::Triangles);
        assert_eq!(mesh.vertex_count(), 6);
        assert_eq!(mesh.vertices[0], Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(mesh.vertices[1], Vec3::new(0.0, -1.0, 0.0));
        assert_eq!(mesh.vertices[5], Vec3::new(2.0, -1.0, 0.0));
    }

    #[test]
    fn each_segment_is_two_triangles() {
        let mesh = track_mesh(&straight(false));
        assert_eq!(mesh.indices, vec![0, 1, 3, 0, 2, 3, 2, 3, 5, 2, 4, 5]);
    }

    #[test]
    fn closed_track_joins_the_ends() {
        let mesh = track_mesh(&straight(true));
        assert_eq!(mesh.indices.len(), 18);
        assert_eq!(&mesh.indices[12..], &[4, 5, 1, 4, 0, 1]);
    }

    #[test]
    fn single_point_gives_empty_mesh() {
        let mut track = straight(false);
        track.centreline.truncate(1);
        let mesh = track_mesh(&track);
        assert!(mesh.vertices.is_empty());
        assert!(mesh.indices.is_empty());
    }
}
