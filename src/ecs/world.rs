use std::any::{Any, TypeId};
use std::collections::HashMap;

use super::store::{ComponentStore, Store};
use super::view::{ComponentSet, View, ViewMut};
use super::Entity;

// ---------------------------------------------------------------------------
// World — central container
// ---------------------------------------------------------------------------

/// Owner of all component data.
///
/// One [`Store`] exists per component type that has ever been written. Stores
/// are created on first write, so the set of component types never has to be
/// declared up front. Read-only accessors never allocate a store.
///
/// The world is not synchronised: lazy store creation mutates the store map
/// and must only happen on the thread that runs the frame.
pub struct World {
    next_id: u32,
    stores: HashMap<TypeId, Box<dyn ComponentStore>>,
    resources: HashMap<TypeId, Box<dyn Any>>,
}

impl World {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            stores: HashMap::new(),
            resources: HashMap::new(),
        }
    }

    // -- Entity lifecycle ---------------------------------------------------

    /// Issue the next unused handle. Handles are never recycled.
    pub fn create_entity(&mut self) -> Entity {
        let entity = Entity::from_raw(self.next_id);
        self.next_id += 1;
        entity
    }

    /// Number of handles issued since creation or the last [`World::clear`].
    pub fn entity_count(&self) -> u32 {
        self.next_id
    }

    /// Reset the handle counter and empty every store, live and pending
    /// entries alike. Resources survive.
    pub fn clear(&mut self) {
        self.next_id = 0;
        for store in self.stores.values_mut() {
            store.clear();
        }
    }

    // -- Components ---------------------------------------------------------

    pub fn add_component<T: 'static>(&mut self, entity: Entity, component: T) -> &mut T {
        self.storage_mut::<T>().add(entity, component)
    }

    pub fn get_component<T: 'static>(&self, entity: Entity) -> Option<&T> {
        self.storage::<T>()?.get(entity)
    }

    pub fn get_component_mut<T: 'static>(&mut self, entity: Entity) -> Option<&mut T> {
        self.storage_any_mut::<T>()?.get_mut(entity)
    }

    pub fn has_component<T: 'static>(&self, entity: Entity) -> bool {
        self.storage::<T>().is_some_and(|s| s.contains(entity))
    }

    /// Queue removal of `entity`'s `T`; it stays visible until
    /// [`World::flush_components`] runs for `T`.
    pub fn remove_component<T: 'static>(&mut self, entity: Entity) {
        self.storage_mut::<T>().remove(entity);
    }

    pub fn flush_components<T: 'static>(&mut self) {
        if let Some(store) = self.storage_any_mut::<T>() {
            store.flush();
        }
    }

    /// Apply every pending removal in every store.
    pub fn flush_all(&mut self) {
        for store in self.stores.values_mut() {
            store.flush();
        }
    }

    // -- Queries ------------------------------------------------------------

    /// Snapshot view over the entities holding every type in `S`.
    pub fn view<S: ComponentSet>(&self) -> View<'_, S> {
        View::new(self)
    }

    /// Mutable counterpart of [`World::view`].
    ///
    /// # Panics
    ///
    /// Panics if a component type appears more than once in `S`.
    pub fn view_mut<S: ComponentSet>(&mut self) -> ViewMut<'_, S> {
        ViewMut::new(self)
    }

    // -- Resources ----------------------------------------------------------

    pub fn insert_resource<T: 'static>(&mut self, resource: T) {
        self.resources.insert(TypeId::of::<T>(), Box::new(resource));
    }

    pub fn resource<T: 'static>(&self) -> Option<&T> {
        self.resources.get(&TypeId::of::<T>())?.downcast_ref::<T>()
    }

    pub fn resource_mut<T: 'static>(&mut self) -> Option<&mut T> {
        self.resources.get_mut(&TypeId::of::<T>())?.downcast_mut::<T>()
    }

    pub fn has_resource<T: 'static>(&self) -> bool {
        self.resources.contains_key(&TypeId::of::<T>())
    }

    pub fn remove_resource<T: 'static>(&mut self) -> Option<T> {
        let boxed = self.resources.remove(&TypeId::of::<T>())?;
        boxed.downcast::<T>().ok().map(|b| *b)
    }

    // -- Storage access -----------------------------------------------------

    pub fn storage<T: 'static>(&self) -> Option<&Store<T>> {
        self.stores
            .get(&TypeId::of::<T>())
            .and_then(|b| b.as_any().downcast_ref::<Store<T>>())
    }

    /// Store for `T`, allocated on first use.
    pub fn storage_mut<T: 'static>(&mut self) -> &mut Store<T> {
        self.stores
            .entry(TypeId::of::<T>())
            .or_insert_with(|| Box::new(Store::<T>::new()))
            .as_any_mut()
            .downcast_mut::<Store<T>>()
            .expect("type mismatch in component store")
    }

    fn storage_any_mut<T: 'static>(&mut self) -> Option<&mut Store<T>> {
        self.stores
            .get_mut(&TypeId::of::<T>())
            .and_then(|b| b.as_any_mut().downcast_mut::<Store<T>>())
    }

    /// Raw pointer to an existing store, for views that hand out mutable
    /// references into several stores at once.
    pub(crate) fn store_ptr<T: 'static>(&mut self) -> Option<*mut Store<T>> {
        self.storage_any_mut::<T>().map(|s| s as *mut Store<T>)
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
