//! # Component Storage
//!
//! Sparse, per-type component storage indexed by slot index.
//!
//! The storage uses a sparse array strategy:
//! - One array per component type, created on first use of that type
//! - Access is O(1) via slot index
//! - An empty cell means the entity in that slot lacks the component

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;

use super::component::Component;

/// Sparse storage for a single component type.
///
/// # Type Parameters
///
/// * `C` - The component type to store
///
/// # Example
///
/// ```rust,ignore
/// let mut storage: ComponentStorage<Position> = ComponentStorage::new();
/// storage.set(7, Position { x: 1.0, y: 2.0 });
/// assert!(storage.contains(7));
/// ```
pub struct ComponentStorage<C: Component> {
    /// The sparse array of components, indexed by slot.
    data: Vec<Option<C>>,
    /// Number of occupied cells.
    len: usize,
}

impl<C: Component> ComponentStorage<C> {
    /// Creates empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self {
            data: Vec::new(),
            len: 0,
        }
    }

    /// Number of stored components.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no component is stored.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Gets the component in `slot`.
    #[inline]
    #[must_use]
    pub fn get(&self, slot: u32) -> Option<&C> {
        self.data.get(slot as usize)?.as_ref()
    }

    /// Gets the component in `slot` mutably.
    #[inline]
    pub fn get_mut(&mut self, slot: u32) -> Option<&mut C> {
        self.data.get_mut(slot as usize)?.as_mut()
    }

    /// Returns `true` if `slot` holds a component.
    #[inline]
    #[must_use]
    pub fn contains(&self, slot: u32) -> bool {
        self.get(slot).is_some()
    }

    /// Stores `component` in `slot`, overwriting unconditionally.
    ///
    /// # Returns
    ///
    /// The previous component, if any.
    pub fn set(&mut self, slot: u32, component: C) -> Option<C> {
        let index = slot as usize;
        if index >= self.data.len() {
            self.data.resize_with(index + 1, || None);
        }
        let previous = self.data[index].replace(component);
        if previous.is_none() {
            self.len += 1;
        }
        previous
    }

    /// Takes the component out of `slot`.
    ///
    /// # Returns
    ///
    /// The removed component, or `None` if the slot was empty.
    pub fn remove(&mut self, slot: u32) -> Option<C> {
        let removed = self.data.get_mut(slot as usize)?.take();
        if removed.is_some() {
            self.len -= 1;
        }
        removed
    }

    /// Iterates over stored components in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &C)> {
        self.data
            .iter()
            .enumerate()
            .filter_map(|(slot, cell)| cell.as_ref().map(|c| (slot as u32, c)))
    }

    /// Iterates mutably over stored components in slot order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (u32, &mut C)> {
        self.data
            .iter_mut()
            .enumerate()
            .filter_map(|(slot, cell)| cell.as_mut().map(|c| (slot as u32, c)))
    }

    /// Drops every stored component.
    pub fn clear(&mut self) {
        self.data.clear();
        self.len = 0;
    }
}

impl<C: Component> Default for ComponentStorage<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Component> fmt::Debug for ComponentStorage<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentStorage")
            .field("type", &C::name())
            .field("len", &self.len)
            .field("cells", &self.data.len())
            .finish()
    }
}

/// Type-erased view of a [`ComponentStorage`], used where the component
/// type is not known statically (entity destruction, clearing).
trait ErasedStorage {
    fn drop_slot(&mut self, slot: u32) -> bool;
    fn clear(&mut self);
    fn len(&self) -> usize;
    fn type_name(&self) -> &'static str;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<C: Component> ErasedStorage for ComponentStorage<C> {
    fn drop_slot(&mut self, slot: u32) -> bool {
        self.remove(slot).is_some()
    }

    fn clear(&mut self) {
        ComponentStorage::clear(self);
    }

    fn len(&self) -> usize {
        self.len
    }

    fn type_name(&self) -> &'static str {
        C::name()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Mapping from component type to its storage.
///
/// Storages are keyed by [`TypeId`]; the component type parameter of each
/// method selects the bucket.
#[derive(Default)]
pub struct Components {
    storages: HashMap<TypeId, Box<dyn ErasedStorage>>,
}

impl Components {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of component types seen so far.
    #[inline]
    #[must_use]
    pub fn type_count(&self) -> usize {
        self.storages.len()
    }

    /// Returns the storage for `C`, creating it if this is the first use.
    pub fn register<C: Component>(&mut self) -> &mut ComponentStorage<C> {
        let storage = self
            .storages
            .entry(TypeId::of::<C>())
            .or_insert_with(|| Box::new(ComponentStorage::<C>::new()));
        match storage.as_any_mut().downcast_mut::<ComponentStorage<C>>() {
            Some(storage) => storage,
            None => unreachable!("storage for {} keyed under a foreign type id", C::name()),
        }
    }

    /// Returns the storage for `C`, if it exists.
    #[must_use]
    pub fn storage<C: Component>(&self) -> Option<&ComponentStorage<C>> {
        self.storages
            .get(&TypeId::of::<C>())?
            .as_any()
            .downcast_ref::<ComponentStorage<C>>()
    }

    /// Returns the storage for `C` mutably, if it exists.
    pub fn storage_mut<C: Component>(&mut self) -> Option<&mut ComponentStorage<C>> {
        self.storages
            .get_mut(&TypeId::of::<C>())?
            .as_any_mut()
            .downcast_mut::<ComponentStorage<C>>()
    }

    /// Gets the `C` in `slot`. Unknown types are simply absent.
    #[inline]
    #[must_use]
    pub fn get<C: Component>(&self, slot: u32) -> Option<&C> {
        self.storage::<C>()?.get(slot)
    }

    /// Gets the `C` in `slot` mutably.
    #[inline]
    pub fn get_mut<C: Component>(&mut self, slot: u32) -> Option<&mut C> {
        self.storage_mut::<C>()?.get_mut(slot)
    }

    /// Returns `true` if `slot` holds a `C`.
    #[inline]
    #[must_use]
    pub fn contains<C: Component>(&self, slot: u32) -> bool {
        self.get::<C>(slot).is_some()
    }

    /// Stores `component` in `slot`, creating the storage on first use.
    ///
    /// # Returns
    ///
    /// The previous component, if any.
    pub fn set<C: Component>(&mut self, slot: u32, component: C) -> Option<C> {
        self.register::<C>().set(slot, component)
    }

    /// Takes the `C` out of `slot`.
    pub fn remove<C: Component>(&mut self, slot: u32) -> Option<C> {
        self.storage_mut::<C>()?.remove(slot)
    }

    /// Removes `slot` from every storage.
    ///
    /// Removed values are dropped. No release hook is invoked.
    ///
    /// # Returns
    ///
    /// Number of components removed.
    pub fn drop_all(&mut self, slot: u32) -> usize {
        self.storages
            .values_mut()
            .map(|storage| usize::from(storage.drop_slot(slot)))
            .sum()
    }

    /// Empties every storage, keeping the storages themselves registered.
    pub fn clear(&mut self) {
        for storage in self.storages.values_mut() {
            storage.clear();
        }
    }
}

impl fmt::Debug for Components {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(
                self.storages
                    .values()
                    .map(|storage| (storage.type_name(), storage.len())),
            )
            .finish()
    }
}
