use std::any::Any;

use super::Entity;

// ---------------------------------------------------------------------------
// ComponentStore — trait object interface for type-erased stores
// ---------------------------------------------------------------------------

/// The operations the [`World`](super::World) needs on a store without
/// knowing its component type.
pub(crate) trait ComponentStore {
    fn flush(&mut self);
    fn clear(&mut self);
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

// ---------------------------------------------------------------------------
// Store<T> — sparse set with deferred removal
// ---------------------------------------------------------------------------

const EMPTY: u32 = u32::MAX;

/// Per-component storage: a sparse set keyed by entity id plus a list of
/// entities waiting to be removed.
///
/// [`Store::remove`] only queues the entity. The component stays visible to
/// [`Store::get`] and to iteration until [`Store::flush`] runs, so code later
/// in the same frame still sees what earlier code saw.
pub struct Store<T> {
    sparse: Vec<u32>,
    dense: Vec<Entity>,
    data: Vec<T>,
    pending: Vec<Entity>,
}

impl<T: 'static> Store<T> {
    pub fn new() -> Self {
        Self {
            sparse: Vec::new(),
            dense: Vec::new(),
            data: Vec::new(),
            pending: Vec::new(),
        }
    }

    fn slot(&self, entity: Entity) -> Option<usize> {
        let idx = entity.id() as usize;
        match self.sparse.get(idx) {
            Some(&slot) if slot != EMPTY => Some(slot as usize),
            _ => None,
        }
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.slot(entity).is_some()
    }

    /// Insert or overwrite the component for `entity`.
    ///
    /// # Panics
    ///
    /// Panics if `entity` is [`Entity::INVALID`].
    pub fn add(&mut self, entity: Entity, value: T) -> &mut T {
        assert!(entity.is_valid(), "cannot store a component for the invalid entity");
        let idx = entity.id() as usize;
        if idx >= self.sparse.len() {
            self.sparse.resize(idx + 1, EMPTY);
        }
        let slot = if self.sparse[idx] != EMPTY {
            let slot = self.sparse[idx] as usize;
            self.data[slot] = value;
            slot
        } else {
            let slot = self.dense.len();
            self.sparse[idx] = slot as u32;
            self.dense.push(entity);
            self.data.push(value);
            slot
        };
        &mut self.data[slot]
    }

    pub fn get(&self, entity: Entity) -> Option<&T> {
        self.slot(entity).map(|slot| &self.data[slot])
    }

    pub fn get_mut(&mut self, entity: Entity) -> Option<&mut T> {
        self.slot(entity).map(|slot| &mut self.data[slot])
    }

    /// Queue `entity` for removal at the next [`Store::flush`].
    pub fn remove(&mut self, entity: Entity) {
        self.pending.push(entity);
    }

    pub fn is_pending(&self, entity: Entity) -> bool {
        self.pending.contains(&entity)
    }

    /// Physically erase every queued entity, then empty the queue.
    pub fn flush(&mut self) {
        let pending = std::mem::take(&mut self.pending);
        for entity in pending {
            self.erase(entity);
        }
    }

    fn erase(&mut self, entity: Entity) -> Option<T> {
        let slot = self.slot(entity)?;
        self.sparse[entity.id() as usize] = EMPTY;

        // Swap-remove to keep arrays packed.
        let last = self.dense.len() - 1;
        if slot != last {
            let moved = self.dense[last].id() as usize;
            self.sparse[moved] = slot as u32;
        }
        self.dense.swap_remove(slot);
        Some(self.data.swap_remove(slot))
    }

    /// Drop every component, including those still queued for removal.
    pub fn clear(&mut self) {
        self.sparse.clear();
        self.dense.clear();
        self.data.clear();
        self.pending.clear();
    }

    pub fn len(&self) -> usize {
        self.dense.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dense.is_empty()
    }

    /// Entities currently holding this component, pending removals included.
    pub fn entities(&self) -> &[Entity] {
        &self.dense
    }

    pub fn iter(&self) -> StoreIter<'_, T> {
        StoreIter {
            dense: &self.dense,
            data: &self.data,
            index: 0,
        }
    }

    pub fn iter_mut(&mut self) -> StoreIterMut<'_, T> {
        StoreIterMut {
            dense: self.dense.iter(),
            data: self.data.iter_mut(),
        }
    }

    pub fn for_each(&self, mut visitor: impl FnMut(Entity, &T)) {
        for (entity, value) in self.iter() {
            visitor(entity, value);
        }
    }

    pub fn for_each_mut(&mut self, mut visitor: impl FnMut(Entity, &mut T)) {
        for (entity, value) in self.iter_mut() {
            visitor(entity, value);
        }
    }
}

impl<T: 'static> Default for Store<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> ComponentStore for Store<T> {
    fn flush(&mut self) {
        Store::flush(self);
    }

    fn clear(&mut self) {
        Store::clear(self);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

// ---------------------------------------------------------------------------
// Iterators
// ---------------------------------------------------------------------------

/// Iterator over `(Entity, &T)` pairs of a store.
pub struct StoreIter<'a, T> {
    dense: &'a [Entity],
    data: &'a [T],
    index: usize,
}

impl<'a, T> Iterator for StoreIter<'a, T> {
    type Item = (Entity, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.dense.len() {
            return None;
        }
        let i = self.index;
        self.index += 1;
        Some((self.dense[i], &self.data[i]))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.dense.len() - self.index;
        (remaining, Some(remaining))
    }
}

impl<T> ExactSizeIterator for StoreIter<'_, T> {}

/// Iterator over `(Entity, &mut T)` pairs of a store.
pub struct StoreIterMut<'a, T> {
    dense: std::slice::Iter<'a, Entity>,
    data: std::slice::IterMut<'a, T>,
}

impl<'a, T> Iterator for StoreIterMut<'a, T> {
    type Item = (Entity, &'a mut T);

    fn next(&mut self) -> Option<Self::Item> {
        Some((*self.dense.next()?, self.data.next()?))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.data.size_hint()
    }
}

impl<T> ExactSizeIterator for StoreIterMut<'_, T> {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Health(i32);

    fn e(id: u32) -> Entity {
        Entity::from_raw(id)
    }

    #[test]
    fn add_and_get() {
        let mut store = Store::new();
        store.add(e(3), Health(10));
        assert_eq!(store.get(e(3)), Some(&Health(10)));
        assert!(store.get(e(0)).is_none());
        assert!(store.get(e(99)).is_none());
    }

    #[test]
    fn add_overwrites_existing() {
        let mut store = Store::new();
        store.add(e(1), Health(1));
        *store.add(e(1), Health(2)) = Health(5);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(e(1)), Some(&Health(5)));
    }

    #[test]
    #[should_panic(expected = "invalid entity")]
    fn add_rejects_the_invalid_handle() {
        let mut store = Store::new();
        store.add(Entity::INVALID, Health(1));
    }

    #[test]
    fn remove_is_deferred_until_flush() {
        let mut store = Store::new();
        store.add(e(0), Health(7));
        store.remove(e(0));

        assert!(store.is_pending(e(0)));
        assert_eq!(store.get(e(0)), Some(&Health(7)));
        assert_eq!(store.iter().count(), 1);

        store.flush();
        assert!(store.get(e(0)).is_none());
        assert!(!store.is_pending(e(0)));
        assert!(store.is_empty());
    }

    #[test]
    fn flush_with_nothing_pending_is_a_no_op() {
        let mut store = Store::new();
        store.add(e(0), Health(1));
        store.flush();
        store.flush();
        assert_eq!(store.get(e(0)), Some(&Health(1)));
    }

    #[test]
    fn removing_an_absent_entity_is_harmless() {
        let mut store: Store<Health> = Store::new();
        store.remove(e(4));
        store.remove(e(4));
        store.flush();
        assert!(store.is_empty());
    }

    #[test]
    fn swap_remove_keeps_the_moved_entry_addressable() {
        let mut store = Store::new();
        store.add(e(0), Health(0));
        store.add(e(1), Health(1));
        store.add(e(2), Health(2));

        store.remove(e(0));
        store.flush();

        assert!(store.get(e(0)).is_none());
        assert_eq!(store.get(e(1)), Some(&Health(1)));
        assert_eq!(store.get(e(2)), Some(&Health(2)));
        assert_eq!(store.entities(), &[e(2), e(1)]);
    }

    #[test]
    fn clear_drops_live_and_pending() {
        let mut store = Store::new();
        store.add(e(0), Health(0));
        store.add(e(1), Health(1));
        store.remove(e(1));
        store.clear();

        assert!(store.is_empty());
        assert!(!store.is_pending(e(1)));
        store.flush();
        assert!(store.is_empty());
    }

    #[test]
    fn iter_mut_visits_every_entry() {
        let mut store = Store::new();
        store.add(e(5), Health(1));
        store.add(e(2), Health(2));

        store.for_each_mut(|_, hp| hp.0 *= 10);

        let mut seen = Vec::new();
        store.for_each(|entity, hp| seen.push((entity.id(), hp.0)));
        assert_eq!(seen, vec![(5, 10), (2, 20)]);
        assert_eq!(store.iter_mut().len(), 2);
    }
}
