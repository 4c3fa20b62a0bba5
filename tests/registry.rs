use std::any::{Any, TypeId};

use tessera::components::{self, Point, Transform, Triangle, Velocity};
use tessera::ecs::*;

fn registry() -> Registry {
    let mut registry = Registry::new();
    components::register_builtin(&mut registry);
    registry
}

fn count(registry: &Registry, entity: Entity, type_id: TypeId) -> usize {
    registry
        .component_types(entity)
        .map_or(0, |types| types.iter().filter(|t| **t == type_id).count())
}

#[test]
fn every_builtin_is_registered_by_name() {
    let registry = registry();
    let mut names: Vec<_> = registry.component_names().collect();
    names.sort_unstable();
    assert_eq!(
        names,
        vec![
            "Geometry", "Lake", "Level", "Mesh", "Point", "Track", "Transform", "Triangle",
            "Velocity"
        ]
    );
    assert_eq!(registry.type_id("Point"), Some(TypeId::of::<Point>()));
    assert_eq!(registry.type_id("PointComponent"), None);
}

#[test]
fn create_by_name_is_visible_to_typed_access() {
    let mut registry = registry();
    let e = registry.create_entity();
    for name in ["Point", "Transform", "Velocity", "Triangle"] {
        assert!(registry.create_component(e, name), "{name}");
    }
    let world = registry.world();
    assert_eq!(world.get_component::<Point>(e), Some(&Point::default()));
    assert_eq!(world.get_component::<Transform>(e), Some(&Transform::default()));
    assert!(world.has_component::<Velocity>(e));
    assert!(world.has_component::<Triangle>(e));
}

#[test]
fn membership_is_a_set() {
    let mut registry = registry();
    let e = registry.create_entity();
    registry.create_component(e, "Point");
    registry.create_component(e, "Point");
    registry.add_component(e, Point::default());
    assert_eq!(count(&registry, e, TypeId::of::<Point>()), 1);
    assert_eq!(registry.component_types(e).map(<[_]>::len), Some(1));
}

#[test]
fn create_component_resets_to_default() {
    let mut registry = registry();
    let e = registry.create_entity();
    registry.add_component(e, Velocity { speed: glam::Vec3::X });
    registry.create_component(e, "Velocity");
    assert_eq!(
        registry.world().get_component::<Velocity>(e),
        Some(&Velocity::default())
    );
}

#[test]
fn unknown_name_is_a_quiet_miss() {
    let mut registry = registry();
    let e = registry.create_entity();
    assert!(!registry.create_component(e, "Nope"));
    assert!(!registry.remove_component(e, "Nope"));
    assert!(!registry.with_component(e, "Nope", |_| panic!("visited")));
    assert_eq!(registry.component_types(e), Some(&[][..]));
}

#[test]
fn removal_is_deferred_until_flush() {
    let mut registry = registry();
    let e = registry.create_entity();
    registry.create_component(e, "Point");

    assert!(registry.remove_component(e, "Point"));
    assert!(registry.world().has_component::<Point>(e));
    assert_eq!(count(&registry, e, TypeId::of::<Point>()), 0);

    registry.flush();
    assert!(!registry.world().has_component::<Point>(e));
}

#[test]
fn remove_by_type_matches_remove_by_name() {
    let mut registry = registry();
    let e = registry.create_entity();
    registry.create_component(e, "Velocity");
    assert!(registry.remove_component_type(e, TypeId::of::<Velocity>()));
    registry.flush();
    assert!(!registry.world().has_component::<Velocity>(e));
    assert!(!registry.remove_component_type(e, TypeId::of::<String>()));
}

#[test]
fn removing_what_is_not_there_is_a_miss() {
    let mut registry = registry();
    // Never-issued handle, no membership record. Nothing gets queued.
    assert!(!registry.remove_component(Entity::from_raw(42), "Point"));
    assert!(registry.world().storage::<Point>().is_none());

    let e = registry.create_entity();
    assert!(!registry.remove_component(e, "Point"));

    registry.create_component(e, "Point");
    assert!(registry.remove_component(e, "Point"));
    registry.flush();
    assert!(!registry.remove_component(e, "Point"));
    assert!(!registry.remove_component_type(e, TypeId::of::<Point>()));
}

#[test]
fn failed_removal_does_not_doom_a_later_create() {
    let mut registry = registry();
    let e = registry.create_entity();
    assert!(!registry.remove_component(e, "Transform"));
    registry.create_component(e, "Transform");
    registry.flush();
    assert!(registry.world().has_component::<Transform>(e));
}

#[test]
fn typed_add_of_an_unnamed_type_is_removed_with_the_entity() {
    #[derive(Debug, Default, PartialEq)]
    struct Fuel(u32);

    let mut registry = registry();
    let e = registry.create_entity();
    registry.create_component(e, "Point");
    registry.add_component(e, Fuel(7));
    assert_eq!(registry.world().get_component::<Fuel>(e), Some(&Fuel(7)));
    // Gets a function table but no name.
    assert!(registry.type_id("Fuel").is_none());

    assert!(registry.remove_entity(e));
    registry.flush();
    assert!(!registry.world().has_component::<Point>(e));
    assert!(!registry.world().has_component::<Fuel>(e));
}

#[test]
fn remove_entity_cascades_to_every_store() {
    let mut registry = registry();
    let e = registry.create_entity();
    let keep = registry.create_entity();
    for name in ["Point", "Transform", "Triangle"] {
        registry.create_component(e, name);
        registry.create_component(keep, name);
    }

    assert!(registry.remove_entity(e));
    assert!(!registry.has_entity(e));
    // Still visible this frame.
    assert!(registry.world().has_component::<Triangle>(e));

    registry.flush();
    let world = registry.world();
    assert!(!world.has_component::<Point>(e));
    assert!(!world.has_component::<Transform>(e));
    assert!(!world.has_component::<Triangle>(e));
    assert!(world.has_component::<Point>(keep));
    assert_eq!(registry.component_types(keep).map(<[_]>::len), Some(3));

    assert!(!registry.remove_entity(e));
}

#[test]
fn with_component_hands_out_the_live_value() {
    let mut registry = registry();
    let e = registry.create_entity();
    registry.create_component(e, "Transform");

    let found = registry.with_component(e, "Transform", |component: &mut dyn Any| {
        let transform = component.downcast_mut::<Transform>().unwrap();
        transform.translation.x = 4.0;
    });
    assert!(found);
    assert_eq!(
        registry.world().get_component::<Transform>(e).unwrap().translation.x,
        4.0
    );

    let other = registry.create_entity();
    assert!(!registry.with_component(other, "Transform", |_| panic!("visited")));
}

#[test]
fn clear_is_a_full_reset() {
    let mut registry = registry();
    let e = registry.create_entity();
    registry.create_component(e, "Point");
    registry.clear();

    assert_eq!(registry.entity_count(), 0);
    assert_eq!(registry.world().view::<(Point,)>().count(), 0);
    assert_eq!(registry.create_entity().id(), 0);
    // Registrations survive.
    assert!(registry.is_registered("Point"));
}

#[test]
fn custom_function_table() {
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Default)]
    struct Marker;

    struct Counting {
        flushes: Rc<Cell<u32>>,
        inner: Registrar<Marker>,
    }

    impl ComponentFns for Counting {
        fn create(&self, world: &mut World, entity: Entity) {
            self.inner.create(world, entity);
        }
        fn remove(&self, world: &mut World, entity: Entity) {
            self.inner.remove(world, entity);
        }
        fn flush(&self, world: &mut World) {
            self.flushes.set(self.flushes.get() + 1);
            self.inner.flush(world);
        }
        fn visit(
            &self,
            world: &mut World,
            entity: Entity,
            visitor: &mut dyn FnMut(&mut dyn Any),
        ) -> bool {
            self.inner.visit(world, entity, visitor)
        }
    }

    let flushes = Rc::new(Cell::new(0));
    let mut registry = Registry::new();
    registry.register_funcs(
        "Marker",
        TypeId::of::<Marker>(),
        Box::new(Counting {
            flushes: flushes.clone(),
            inner: Registrar::new(),
        }),
    );

    let e = registry.create_entity();
    assert!(registry.create_component(e, "Marker"));
    assert!(registry.world().has_component::<Marker>(e));
    registry.flush();
    registry.flush();
    assert_eq!(flushes.get(), 2);
}
