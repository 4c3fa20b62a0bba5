use std::any::Any;

use glam::{Mat4, Vec2, Vec3};

use crate::components::{Lake, Mesh, Point, Topology, Transform, Triangle};
use crate::ecs::{Entity, World};
use crate::engine::{Context, System};

const LAKE_COLOUR: Vec3 = Vec3::new(0.0, 0.3, 1.0);
const ISLAND_COLOUR: Vec3 = Vec3::new(0.2, 0.8, 0.2);

// ── DrawList ──────────────────────────────────────────────────────────────────

/// A world-space primitive ready for a backend to submit.
#[derive(Clone, Debug, PartialEq)]
pub enum Primitive {
    Point {
        entity: Entity,
        position: Vec3,
        colour: Vec3,
    },
    Triangle {
        entity: Entity,
        vertices: [Vec3; 3],
        colour: Vec3,
    },
    Mesh {
        entity: Entity,
        topology: Topology,
        vertices: Vec<Vec3>,
        indices: Vec<u32>,
        colours: Vec<Vec3>,
    },
    /// A closed polyline.
    Outline {
        entity: Entity,
        points: Vec<Vec3>,
        colour: Vec3,
    },
}

/// Everything drawn in one frame, in submission order.
#[derive(Clone, Debug, Default)]
pub struct DrawList {
    primitives: Vec<Primitive>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, primitive: Primitive) {
        self.primitives.push(primitive);
    }

    pub fn clear(&mut self) {
        self.primitives.clear();
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Primitive> {
        self.primitives.iter()
    }
}

// ── RenderSystem ──────────────────────────────────────────────────────────────

/// Collects every drawable component into a [`DrawList`] each frame.
///
/// Vertices are moved into world space with the entity's `Transform`, or left
/// as they are when it has none.
#[derive(Default)]
pub struct RenderSystem {
    list: DrawList,
}

fn model_matrix(world: &World, entity: Entity) -> Mat4 {
    world
        .get_component::<Transform>(entity)
        .map_or(Mat4::IDENTITY, Transform::matrix)
}

fn outline(model: &Mat4, points: &[Vec2]) -> Vec<Vec3> {
    points
        .iter()
        .map(|p| model.transform_point3(p.extend(0.0)))
        .collect()
}

impl RenderSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// The list built by the most recent draw stage.
    pub fn draw_list(&self) -> &DrawList {
        &self.list
    }

    pub fn build(&mut self, world: &World) {
        self.list.clear();

        for (entity, point) in world.view::<(Point,)>() {
            let model = model_matrix(world, entity);
            self.list.push(Primitive::Point {
                entity,
                position: model.transform_point3(Vec3::ZERO),
                colour: point.colour,
            });
        }

        for (entity, triangle) in world.view::<(Triangle,)>() {
            let model = model_matrix(world, entity);
            self.list.push(Primitive::Triangle {
                entity,
                vertices: triangle.vertices().map(|v| model.transform_point3(v)),
                colour: triangle.colour,
            });
        }

        for (entity, mesh) in world.view::<(Mesh,)>() {
            if mesh.vertices.is_empty() {
                continue;
            }
            let model = model_matrix(world, entity);
            self.list.push(Primitive::Mesh {
                entity,
                topology: mesh.topology,
                vertices: mesh
                    .vertices
                    .iter()
                    .map(|&v| model.transform_point3(v))
                    .collect(),
                indices: mesh.indices.clone(),
                colours: mesh.colours.clone(),
            });
        }

        for (entity, lake) in world.view::<(Lake,)>() {
            let model = model_matrix(world, entity);
            self.list.push(Primitive::Outline {
                entity,
                points: outline(&model, &lake.lake_outline),
                colour: LAKE_COLOUR,
            });
            self.list.push(Primitive::Outline {
                entity,
                points: outline(&model, &lake.island_outline),
                colour: ISLAND_COLOUR,
            });
        }
    }
}

impl System for RenderSystem {
    fn name(&self) -> &'static str {
        "render"
    }

    fn draw(&mut self, ctx: &Context) {
        self.build(ctx.registry.world());
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
