//! # ECS World
//!
//! The central container for all entities and components.
//!
//! An entity id moves through two states only:
//!
//! ```text
//! absent --create/insert--> live --destroy--> absent (slot gets a new generation on reuse)
//! ```
//!
//! Reads, removals and destroys on an absent id return empty results.
//! [`World::set`] is the one call that refuses a dead id.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use super::allocator::SlotAllocator;
use super::bundle::Bundle;
use super::component::{Component, Dispose};
use super::entity::EntityId;
use super::query::{OwnedQuery, Query};
use super::storage::{ComponentStorage, Components};
use super::view::{View, Visit};
use crate::config::WorldConfig;
use crate::error::{EcsError, EcsResult};

/// The ECS World - container for entities, their components and cached views.
///
/// # Thread Safety
///
/// Single-threaded. The world is `!Send`; use one world per thread.
///
/// # Example
///
/// ```rust
/// use sprig_core::{Component, World};
///
/// #[derive(Clone)]
/// struct Health(u32);
/// impl Component for Health {}
///
/// let mut world = World::new();
/// let entity = world.create(Health(10));
/// assert_eq!(world.get::<Health>(entity).map(|h| h.0), Some(10));
///
/// world.destroy(entity);
/// assert!(!world.exists(entity));
/// assert!(world.get::<Health>(entity).is_none());
/// ```
pub struct World {
    /// Slot allocator handing out entity ids.
    entities: SlotAllocator,
    /// Per-type component storages.
    components: Components,
    /// Views keyed by the type id of their query signature.
    views: HashMap<TypeId, Rc<dyn Any>>,
    /// Configuration the world was built with.
    config: WorldConfig,
}

impl World {
    /// Creates an empty world with the default recycling policy.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(WorldConfig::default())
    }

    /// Creates an empty world with the given configuration.
    #[must_use]
    pub fn with_config(config: WorldConfig) -> Self {
        Self {
            entities: SlotAllocator::from_config(&config),
            components: Components::new(),
            views: HashMap::new(),
            config,
        }
    }

    /// Returns the configuration of this world.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Number of live entities.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Returns `true` if no entity is live.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Creates an entity and attaches every component of `bundle`.
    ///
    /// Pass `()` for an entity without components. A type repeated in the
    /// bundle keeps its last value.
    ///
    /// # Returns
    ///
    /// The new entity's ID, or `EntityId::NULL` if the slot space is
    /// exhausted.
    pub fn create<B: Bundle>(&mut self, bundle: B) -> EntityId {
        let entity = self.entities.allocate();
        if !entity.is_null() {
            bundle.write_into(&mut self.components, entity.index());
        }
        entity
    }

    /// Inserts the entity `entity`, attaching every component of `bundle`.
    ///
    /// If `entity` is live, the bundle is merged in: its components overwrite
    /// existing ones of the same type and other components are kept.
    /// Otherwise the slot named by `entity` is claimed if it is free, keeping
    /// its generation, and the entity is created there; if the slot is taken
    /// this behaves like [`World::create`].
    ///
    /// # Returns
    ///
    /// The id the components were attached to.
    pub fn insert<B: Bundle>(&mut self, entity: EntityId, bundle: B) -> EntityId {
        let entity = if self.exists(entity) {
            entity
        } else {
            self.entities.allocate_at(entity.index())
        };
        if !entity.is_null() {
            bundle.write_into(&mut self.components, entity.index());
        }
        entity
    }

    /// Returns `true` if `entity` is live in this world.
    #[inline]
    #[must_use]
    pub fn exists(&self, entity: EntityId) -> bool {
        !entity.is_null() && self.entities.is_live(entity.index(), entity.generation())
    }

    /// Destroys an entity and drops all its components.
    ///
    /// No [`Dispose`] hook is invoked on the dropped components.
    ///
    /// # Returns
    ///
    /// `true` if the entity was destroyed, `false` if it was already dead
    /// or the ID was invalid/stale.
    pub fn destroy(&mut self, entity: EntityId) -> bool {
        if entity.is_null() || !self.entities.free(entity.index(), entity.generation()) {
            return false;
        }
        let dropped = self.components.drop_all(entity.index());
        tracing::trace!(?entity, dropped, "entity destroyed");
        true
    }

    /// Gets the `C` of `entity`.
    ///
    /// `None` if the entity is dead or lacks the component.
    #[inline]
    #[must_use]
    pub fn get<C: Component>(&self, entity: EntityId) -> Option<&C> {
        if !self.exists(entity) {
            return None;
        }
        self.components.get::<C>(entity.index())
    }

    /// Gets the `C` of `entity` mutably.
    #[inline]
    pub fn get_mut<C: Component>(&mut self, entity: EntityId) -> Option<&mut C> {
        if !self.exists(entity) {
            return None;
        }
        self.components.get_mut::<C>(entity.index())
    }

    /// Returns `true` if `entity` is live and has a `C`.
    #[inline]
    #[must_use]
    pub fn has<C: Component>(&self, entity: EntityId) -> bool {
        self.get::<C>(entity).is_some()
    }

    /// Attaches `component` to `entity`, overwriting any existing `C`.
    ///
    /// Use [`World::has`] first if overwriting is undesirable.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::DeadEntity`] if `entity` is not live. Nothing is
    /// written in that case: a component parked in a free slot would be
    /// inherited by whichever entity gets that slot next.
    pub fn set<C: Component>(&mut self, entity: EntityId, component: C) -> EcsResult<()> {
        if !self.exists(entity) {
            return Err(EcsError::DeadEntity {
                component: C::name(),
                entity,
            });
        }
        self.components.set(entity.index(), component);
        Ok(())
    }

    /// Detaches the `C` of `entity` and hands it back.
    ///
    /// `None` if nothing was removed or the entity is dead. The component is
    /// not disposed; that is up to the caller.
    pub fn remove<C: Component>(&mut self, entity: EntityId) -> Option<C> {
        if !self.exists(entity) {
            return None;
        }
        self.components.remove::<C>(entity.index())
    }

    /// Detaches the `C` of `entity` and disposes it.
    ///
    /// # Returns
    ///
    /// `true` if a component was removed and disposed.
    pub fn remove_and_dispose<C: Component + Dispose>(&mut self, entity: EntityId) -> bool {
        match self.remove::<C>(entity) {
            Some(mut component) => {
                component.dispose();
                true
            }
            None => false,
        }
    }

    /// Returns the cached view for the signature `Q`.
    ///
    /// The same `Rc` is returned for every call with the same ordered
    /// signature. Storages for the requested types are created if missing.
    pub fn view<Q: Query>(&mut self) -> Rc<View<Q>> {
        let key = TypeId::of::<Q>();
        if let Some(view) = self
            .views
            .get(&key)
            .and_then(|view| Rc::clone(view).downcast::<View<Q>>().ok())
        {
            return view;
        }

        Q::register(&mut self.components);
        let view = Rc::new(View::<Q>::new());
        self.views.insert(key, Rc::clone(&view) as Rc<dyn Any>);
        view
    }

    /// Runs `visitor` over every entity matching `Q`.
    ///
    /// Shorthand for `world.view::<Q>().each(world, visitor)`.
    pub fn each<Q, F, R>(&mut self, visitor: F)
    where
        Q: OwnedQuery,
        F: FnMut(&mut World, EntityId, Q::Owned) -> R,
        R: Into<Visit>,
    {
        let view = self.view::<Q>();
        view.each(self, visitor);
    }

    /// Removes every entity and every component.
    ///
    /// Storages stay registered and cached views stay valid.
    pub fn clear(&mut self) {
        let entities = self.entities.len();
        self.entities.clear();
        self.components.clear();
        tracing::debug!(entities, "world cleared");
    }

    /// Returns the live id occupying `slot`, if any.
    #[inline]
    #[must_use]
    pub fn entity_at(&self, slot: u32) -> Option<EntityId> {
        self.entities.entity_at(slot)
    }

    /// Returns the slot indices of all live entities, in increasing order.
    ///
    /// The list is cached between structural changes and is a snapshot:
    /// creating or destroying entities afterwards does not alter it.
    #[inline]
    #[must_use]
    pub fn live_slots(&self) -> Rc<[u32]> {
        self.entities.live_slots()
    }

    /// Iterates over all live entities in slot order.
    pub fn iter_entities(&self) -> impl Iterator<Item = EntityId> + '_ {
        let slots = self.live_slots();
        (0..slots.len()).filter_map(move |i| self.entity_at(slots[i]))
    }

    /// Creates the storage for `C` ahead of first use.
    pub fn register<C: Component>(&mut self) {
        self.components.register::<C>();
    }

    /// Returns the storage for `C`, if any `C` was ever stored or queried.
    #[must_use]
    pub fn storage<C: Component>(&self) -> Option<&ComponentStorage<C>> {
        self.components.storage::<C>()
    }

    /// Read access to every storage.
    #[inline]
    #[must_use]
    pub fn components(&self) -> &Components {
        &self.components
    }

    /// Read access to the slot allocator.
    #[inline]
    #[must_use]
    pub fn allocator(&self) -> &SlotAllocator {
        &self.entities
    }

    // =========================================================================
    // Resources - singleton components layered on top of storage
    // =========================================================================

    /// Returns the resource `C`: the `C` of the lowest live slot holding one.
    #[must_use]
    pub fn resource<C: Component>(&self) -> Option<&C> {
        self.components.storage::<C>()?.iter().next().map(|(_, c)| c)
    }

    /// Returns the resource `C` mutably.
    pub fn resource_mut<C: Component>(&mut self) -> Option<&mut C> {
        self.components
            .storage_mut::<C>()?
            .iter_mut()
            .next()
            .map(|(_, c)| c)
    }

    /// Stores `value` as the resource `C`.
    ///
    /// Overwrites the current resource in place if there is one, otherwise
    /// creates an entity holding `value`.
    ///
    /// # Returns
    ///
    /// The entity holding the resource.
    pub fn insert_resource<C: Component>(&mut self, value: C) -> EntityId {
        let holder = self
            .components
            .storage::<C>()
            .and_then(|storage| storage.iter().next().map(|(slot, _)| slot))
            .and_then(|slot| self.entities.entity_at(slot));

        match holder {
            Some(entity) => {
                self.components.set(entity.index(), value);
                entity
            }
            None => self.create(value),
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for World {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("World")
            .field("len", &self.len())
            .field("capacity", &self.entities.capacity())
            .field("components", &self.components)
            .field("views", &self.views.len())
            .finish()
    }
}
