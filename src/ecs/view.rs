use std::any::TypeId;
use std::marker::PhantomData;

use super::store::Store;
use super::world::World;
use super::Entity;

// ---------------------------------------------------------------------------
// ComponentSet — tuples of component types a view can iterate
// ---------------------------------------------------------------------------

/// A tuple of component types, `(A,)` through `(A, B, C, D, E, F)`.
///
/// The first type drives iteration: its store is scanned and every entity is
/// kept only if each remaining type's store also holds it.
pub trait ComponentSet: 'static {
    /// `(Entity, &A, &B, ...)`
    type Item<'w>;
    /// `(Entity, &mut A, &mut B, ...)`
    type ItemMut<'w>;
    /// Raw pointers to each type's store.
    #[doc(hidden)]
    type Stores: Copy;

    fn type_ids() -> Vec<TypeId>;

    /// Entities holding every type, in the first store's order.
    fn snapshot(world: &World) -> Vec<Entity>;

    fn fetch(world: &World, entity: Entity) -> Option<Self::Item<'_>>;

    #[doc(hidden)]
    fn stores(world: &mut World) -> Option<Self::Stores>;

    /// # Safety
    ///
    /// Every pointer in `stores` must point at a distinct live store that
    /// outlives `'w`, and no other reference to the fetched components may
    /// exist for `'w`.
    #[doc(hidden)]
    unsafe fn fetch_mut<'w>(stores: Self::Stores, entity: Entity) -> Option<Self::ItemMut<'w>>;
}

macro_rules! impl_component_set {
    ($first:ident $(, $rest:ident)*) => {
        #[allow(non_snake_case)]
        impl<$first: 'static $(, $rest: 'static)*> ComponentSet for ($first, $($rest,)*) {
            type Item<'w> = (Entity, &'w $first, $(&'w $rest,)*);
            type ItemMut<'w> = (Entity, &'w mut $first, $(&'w mut $rest,)*);
            type Stores = (*mut Store<$first>, $(*mut Store<$rest>,)*);

            fn type_ids() -> Vec<TypeId> {
                vec![TypeId::of::<$first>() $(, TypeId::of::<$rest>())*]
            }

            fn snapshot(world: &World) -> Vec<Entity> {
                let Some(primary) = world.storage::<$first>() else {
                    return Vec::new();
                };
                primary
                    .entities()
                    .iter()
                    .copied()
                    .filter(|&_entity| true $(&& world.has_component::<$rest>(_entity))*)
                    .collect()
            }

            fn fetch(world: &World, entity: Entity) -> Option<Self::Item<'_>> {
                Some((
                    entity,
                    world.get_component::<$first>(entity)?,
                    $(world.get_component::<$rest>(entity)?,)*
                ))
            }

            fn stores(world: &mut World) -> Option<Self::Stores> {
                Some((world.store_ptr::<$first>()?, $(world.store_ptr::<$rest>()?,)*))
            }

            unsafe fn fetch_mut<'w>(stores: Self::Stores, entity: Entity) -> Option<Self::ItemMut<'w>> {
                let ($first, $($rest,)*) = stores;
                // SAFETY: upheld by the caller; each pointer targets a different store.
                unsafe {
                    Some((
                        entity,
                        (&mut *$first).get_mut(entity)?,
                        $((&mut *$rest).get_mut(entity)?,)*
                    ))
                }
            }
        }
    };
}

impl_component_set!(A);
impl_component_set!(A, B);
impl_component_set!(A, B, C);
impl_component_set!(A, B, C, D);
impl_component_set!(A, B, C, D, E);
impl_component_set!(A, B, C, D, E, F);

// ---------------------------------------------------------------------------
// View
// ---------------------------------------------------------------------------

/// Read-only iteration over the entities holding every component in `S`.
///
/// The qualifying entities are captured when the view is built and never
/// recomputed. A component queued for removal still qualifies until the
/// store is flushed.
pub struct View<'w, S: ComponentSet> {
    world: &'w World,
    entities: Vec<Entity>,
    index: usize,
    _marker: PhantomData<S>,
}

impl<'w, S: ComponentSet> View<'w, S> {
    pub(crate) fn new(world: &'w World) -> Self {
        Self {
            world,
            entities: S::snapshot(world),
            index: 0,
            _marker: PhantomData,
        }
    }

    /// The captured entity set, including entries already iterated.
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn into_entities(self) -> Vec<Entity> {
        self.entities
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.entities.contains(&entity)
    }
}

impl<'w, S: ComponentSet> Iterator for View<'w, S> {
    type Item = S::Item<'w>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(&entity) = self.entities.get(self.index) {
            self.index += 1;
            if let Some(item) = S::fetch(self.world, entity) {
                return Some(item);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.entities.len() - self.index;
        (remaining, Some(remaining))
    }
}

impl<S: ComponentSet> ExactSizeIterator for View<'_, S> {}

// ---------------------------------------------------------------------------
// ViewMut
// ---------------------------------------------------------------------------

/// Mutable iteration over the entities holding every component in `S`.
///
/// Holds the world mutably for its whole lifetime, so the stores cannot
/// change underneath it.
pub struct ViewMut<'w, S: ComponentSet> {
    stores: Option<S::Stores>,
    entities: Vec<Entity>,
    index: usize,
    _marker: PhantomData<&'w mut World>,
}

impl<'w, S: ComponentSet> ViewMut<'w, S> {
    pub(crate) fn new(world: &'w mut World) -> Self {
        let ids = S::type_ids();
        for (i, id) in ids.iter().enumerate() {
            assert!(
                !ids[i + 1..].contains(id),
                "view_mut requires distinct component types"
            );
        }
        let entities = S::snapshot(world);
        let stores = S::stores(world);
        Self {
            stores,
            entities,
            index: 0,
            _marker: PhantomData,
        }
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }
}

impl<'w, S: ComponentSet> Iterator for ViewMut<'w, S> {
    type Item = S::ItemMut<'w>;

    fn next(&mut self) -> Option<Self::Item> {
        let stores = self.stores?;
        while let Some(&entity) = self.entities.get(self.index) {
            self.index += 1;
            // SAFETY: the stores are distinct (checked in `new`), the world is
            // mutably borrowed for 'w, and each snapshot entity is unique, so
            // no component is handed out twice.
            if let Some(item) = unsafe { S::fetch_mut(stores, entity) } {
                return Some(item);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.entities.len() - self.index;
        (remaining, Some(remaining))
    }
}

impl<S: ComponentSet> ExactSizeIterator for ViewMut<'_, S> {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct A(u32);
    #[derive(Debug, PartialEq)]
    struct B(u32);
    #[derive(Debug, PartialEq)]
    struct C(u32);

    fn abc_world() -> (World, Entity, Entity, Entity) {
        let mut world = World::new();
        let only_a = world.create_entity();
        world.add_component(only_a, A(1));
        let only_b = world.create_entity();
        world.add_component(only_b, B(2));
        let both = world.create_entity();
        world.add_component(both, A(3));
        world.add_component(both, B(4));
        (world, only_a, only_b, both)
    }

    #[test]
    fn intersection_yields_only_entities_with_all_types() {
        let (world, _, _, both) = abc_world();
        let items: Vec<_> = world.view::<(A, B)>().collect();
        assert_eq!(items, vec![(both, &A(3), &B(4))]);
    }

    #[test]
    fn single_type_view_lists_whole_store() {
        let (world, only_a, _, both) = abc_world();
        let entities: Vec<_> = world.view::<(A,)>().map(|(e, _)| e).collect();
        assert_eq!(entities, vec![only_a, both]);
    }

    #[test]
    fn missing_store_gives_empty_view() {
        let (world, ..) = abc_world();
        assert_eq!(world.view::<(C,)>().count(), 0);
        assert_eq!(world.view::<(A, C)>().count(), 0);
    }

    #[test]
    fn pending_removal_still_qualifies() {
        let (mut world, _, _, both) = abc_world();
        world.remove_component::<B>(both);
        assert!(world.view::<(A, B)>().contains(both));

        world.flush_components::<B>();
        assert_eq!(world.view::<(A, B)>().count(), 0);
    }

    #[test]
    fn snapshot_is_fixed_at_construction() {
        let (mut world, only_a, _, both) = abc_world();
        let snapshot = world.view::<(A, B)>().into_entities();

        world.add_component(only_a, B(9));
        assert_eq!(snapshot, vec![both]);
        assert_eq!(world.view::<(A, B)>().len(), 2);
    }

    #[test]
    fn view_mut_writes_through() {
        let (mut world, only_a, _, both) = abc_world();
        for (_, a, b) in world.view_mut::<(A, B)>() {
            a.0 += 100;
            b.0 += 100;
        }
        assert_eq!(world.get_component::<A>(both), Some(&A(103)));
        assert_eq!(world.get_component::<B>(both), Some(&B(104)));
        assert_eq!(world.get_component::<A>(only_a), Some(&A(1)));
    }

    #[test]
    fn view_mut_with_missing_store_is_empty() {
        let (mut world, ..) = abc_world();
        assert_eq!(world.view_mut::<(A, C)>().count(), 0);
    }

    #[test]
    #[should_panic(expected = "view_mut requires distinct component types")]
    fn view_mut_rejects_duplicate_types() {
        let (mut world, ..) = abc_world();
        let _ = world.view_mut::<(A, A)>();
    }
}
