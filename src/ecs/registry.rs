use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::marker::PhantomData;

use super::world::World;
use super::Entity;

// ---------------------------------------------------------------------------
// Component / ComponentFns — per-type function table
// ---------------------------------------------------------------------------

/// Anything that can be created by name: a `'static` value with a default.
pub trait Component: Default + 'static {}

impl<T: Default + 'static> Component for T {}

/// Type-erased lifecycle operations for one component type.
///
/// The registry keeps one of these per registered type and calls through it
/// whenever it only knows the type by name or `TypeId`.
pub trait ComponentFns {
    /// Store a default value for `entity`, overwriting any existing one.
    fn create(&self, world: &mut World, entity: Entity);
    /// Queue deferred removal of `entity`'s component.
    fn remove(&self, world: &mut World, entity: Entity);
    /// Apply this type's pending removals.
    fn flush(&self, world: &mut World);
    /// Call `visitor` with the component if `entity` has one. Returns whether
    /// it was found.
    fn visit(&self, world: &mut World, entity: Entity, visitor: &mut dyn FnMut(&mut dyn Any))
    -> bool;
}

/// The function table of a concrete component type.
pub struct Registrar<T>(PhantomData<fn() -> T>);

impl<T> Registrar<T> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for Registrar<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Component> ComponentFns for Registrar<T> {
    fn create(&self, world: &mut World, entity: Entity) {
        world.add_component(entity, T::default());
    }

    fn remove(&self, world: &mut World, entity: Entity) {
        world.remove_component::<T>(entity);
    }

    fn flush(&self, world: &mut World) {
        world.flush_components::<T>();
    }

    fn visit(
        &self,
        world: &mut World,
        entity: Entity,
        visitor: &mut dyn FnMut(&mut dyn Any),
    ) -> bool {
        match world.get_component_mut::<T>(entity) {
            Some(component) => {
                visitor(component);
                true
            }
            None => false,
        }
    }
}

// ---------------------------------------------------------------------------
// Registry — name dispatch and entity membership
// ---------------------------------------------------------------------------

/// Name-addressable layer over a [`World`].
///
/// Maps component names to types and types to their [`ComponentFns`], and
/// records which component types each entity carries so that destroying an
/// entity can fan out to every store it lives in.
///
/// Lookup misses (unknown name, unknown entity) are routine for data-driven
/// callers and are reported as `false`, never as errors.
pub struct Registry {
    world: World,
    type_lookup: HashMap<String, TypeId>,
    functions: HashMap<TypeId, Box<dyn ComponentFns>>,
    entity_types: HashMap<Entity, Vec<TypeId>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::with_world(World::new())
    }

    pub fn with_world(world: World) -> Self {
        Self {
            world,
            type_lookup: HashMap::new(),
            functions: HashMap::new(),
            entity_types: HashMap::new(),
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    // -- Registration -------------------------------------------------------

    /// Bind `name` to `type_id` and its function table. Registering the same
    /// name twice keeps the last table.
    pub fn register_funcs(&mut self, name: &str, type_id: TypeId, funcs: Box<dyn ComponentFns>) {
        log::debug!("registering component '{name}'");
        self.type_lookup.insert(name.to_string(), type_id);
        self.functions.insert(type_id, funcs);
    }

    pub fn register<T: Component>(&mut self, name: &str) {
        self.register_funcs(name, TypeId::of::<T>(), Box::new(Registrar::<T>::new()));
    }

    pub fn type_id(&self, name: &str) -> Option<TypeId> {
        self.type_lookup.get(name).copied()
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.type_lookup.contains_key(name)
    }

    pub fn component_names(&self) -> impl Iterator<Item = &str> {
        self.type_lookup.keys().map(String::as_str)
    }

    // -- Entities -----------------------------------------------------------

    pub fn create_entity(&mut self) -> Entity {
        let entity = self.world.create_entity();
        self.entity_types.insert(entity, Vec::new());
        entity
    }

    pub fn has_entity(&self, entity: Entity) -> bool {
        self.entity_types.contains_key(&entity)
    }

    /// Entities with a membership record.
    pub fn entity_count(&self) -> usize {
        self.entity_types.len()
    }

    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.entity_types.keys().copied()
    }

    /// Component types attached to `entity`, in no particular order.
    pub fn component_types(&self, entity: Entity) -> Option<&[TypeId]> {
        self.entity_types.get(&entity).map(Vec::as_slice)
    }

    /// Queue removal of every component `entity` carries and drop its
    /// membership record. The handle itself stays issued.
    pub fn remove_entity(&mut self, entity: Entity) -> bool {
        let Some(types) = self.entity_types.get(&entity).cloned() else {
            return false;
        };
        for type_id in types {
            self.remove_component_type(entity, type_id);
        }
        self.entity_types.remove(&entity);
        true
    }

    // -- Components ---------------------------------------------------------

    /// Attach a default-valued component by name.
    pub fn create_component(&mut self, entity: Entity, name: &str) -> bool {
        let Some(&type_id) = self.type_lookup.get(name) else {
            log::trace!("create_component: unknown component '{name}'");
            return false;
        };
        let Some(funcs) = self.functions.get(&type_id) else {
            return false;
        };
        funcs.create(&mut self.world, entity);
        self.record(entity, type_id);
        true
    }

    /// Typed creation that also records membership. A type without a function
    /// table gets one here, unnamed, so removal and flush still reach it.
    pub fn add_component<T: Component>(&mut self, entity: Entity, component: T) -> &mut T {
        let type_id = TypeId::of::<T>();
        self.functions
            .entry(type_id)
            .or_insert_with(|| Box::new(Registrar::<T>::new()));
        self.record(entity, type_id);
        self.world.add_component(entity, component)
    }

    pub fn remove_component(&mut self, entity: Entity, name: &str) -> bool {
        match self.type_lookup.get(name) {
            Some(&type_id) => self.remove_component_type(entity, type_id),
            None => false,
        }
    }

    /// Queue removal of one component type and drop it from the membership
    /// record. Returns `false` without queuing anything if `entity` has no
    /// record or its record lacks the type. Membership order is not preserved.
    pub fn remove_component_type(&mut self, entity: Entity, type_id: TypeId) -> bool {
        let Some(types) = self.entity_types.get_mut(&entity) else {
            return false;
        };
        let Some(pos) = types.iter().position(|t| *t == type_id) else {
            return false;
        };
        let Some(funcs) = self.functions.get(&type_id) else {
            return false;
        };
        types.swap_remove(pos);
        funcs.remove(&mut self.world, entity);
        true
    }

    /// Visit `entity`'s component named `name` without knowing its type.
    /// Returns `false` if the name is unknown or the entity lacks it.
    pub fn with_component<F>(&mut self, entity: Entity, name: &str, visitor: F) -> bool
    where
        F: FnOnce(&mut dyn Any),
    {
        let Some(type_id) = self.type_lookup.get(name) else {
            return false;
        };
        let Some(funcs) = self.functions.get(type_id) else {
            return false;
        };
        let mut visitor = Some(visitor);
        funcs.visit(&mut self.world, entity, &mut |component| {
            if let Some(visit) = visitor.take() {
                visit(component);
            }
        })
    }

    // -- Frame boundaries ---------------------------------------------------

    /// Apply every registered type's pending removals.
    pub fn flush(&mut self) {
        for funcs in self.functions.values() {
            funcs.flush(&mut self.world);
        }
    }

    /// Drop all membership records and clear the world.
    pub fn clear(&mut self) {
        self.entity_types.clear();
        self.world.clear();
    }

    fn record(&mut self, entity: Entity, type_id: TypeId) {
        let types = self.entity_types.entry(entity).or_default();
        if !types.contains(&type_id) {
            types.push(type_id);
        }
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
