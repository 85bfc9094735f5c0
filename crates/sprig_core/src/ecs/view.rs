//! # Views
//!
//! A view is a cached, lazy query over a [`World`] for one fixed signature.
//! It stores no entity data: every pass walks the world's live slot list and
//! probes the requested storages slot by slot.
//!
//! ## Mutation during iteration
//!
//! ```text
//! each():
//!   snapshot = world.live_slots()     <- taken once, never refreshed
//!   for slot in snapshot:             <- increasing slot order
//!     probe every storage at slot     <- miss => skip
//!     visitor(world, entity, items)   <- may create/destroy/set freely
//! ```
//!
//! Entities created by the visitor land in a rebuilt live list, never in the
//! snapshot, so they are not visited by the running pass. Entities destroyed
//! by the visitor lose their components and are skipped when reached.

use std::fmt;
use std::marker::PhantomData;
use std::ops::ControlFlow;

use super::entity::EntityId;
use super::query::{OwnedQuery, Query};
use super::world::World;

/// What a visitor wants after handling one entity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Visit {
    /// Keep iterating.
    #[default]
    Continue,
    /// Halt this pass immediately.
    Stop,
}

impl From<()> for Visit {
    #[inline]
    fn from((): ()) -> Self {
        Self::Continue
    }
}

impl<B> From<ControlFlow<B>> for Visit {
    #[inline]
    fn from(flow: ControlFlow<B>) -> Self {
        match flow {
            ControlFlow::Continue(()) => Self::Continue,
            ControlFlow::Break(_) => Self::Stop,
        }
    }
}

/// Cached query for the component signature `Q`.
///
/// Obtained from [`World::view`], which hands out the same instance for the
/// same ordered signature. Order matters for caching only: `(A, B)` and
/// `(B, A)` are distinct views matching the same entities.
pub struct View<Q: Query> {
    type_names: Box<[&'static str]>,
    _query: PhantomData<fn() -> Q>,
}

impl<Q: Query> View<Q> {
    pub(crate) fn new() -> Self {
        Self {
            type_names: Q::type_names().into_boxed_slice(),
            _query: PhantomData,
        }
    }

    /// Names of the requested component types, in order.
    #[must_use]
    pub fn type_names(&self) -> &[&'static str] {
        &self.type_names
    }

    /// Visits every matching entity, handing the visitor the world itself.
    ///
    /// Components are cloned out before each call so the visitor may create,
    /// destroy and write entities. See the module docs for what such
    /// mutation does to the running pass.
    ///
    /// The snapshot holds slot indices only. A visitor that destroys an
    /// entity still ahead in the pass and then re-inserts the same id keeps
    /// that id's generation, so the re-inserted entity is visited.
    ///
    /// Storages are resolved once, then again after each visitor call,
    /// since the visitor may have registered new ones.
    ///
    /// The visitor returns `()` to continue or [`Visit::Stop`] to halt.
    pub fn each<F, R>(&self, world: &mut World, mut visitor: F)
    where
        Q: OwnedQuery,
        F: FnMut(&mut World, EntityId, Q::Owned) -> R,
        R: Into<Visit>,
    {
        let snapshot = world.live_slots();
        let mut slots = snapshot.iter();
        loop {
            let hit = {
                let Some(fetch) = Q::init_fetch(world.components()) else {
                    return;
                };
                slots.by_ref().find_map(|&slot| {
                    let items = Q::fetch_owned(&fetch, slot)?;
                    world.entity_at(slot).map(|entity| (entity, items))
                })
            };
            let Some((entity, items)) = hit else {
                return;
            };
            if visitor(&mut *world, entity, items).into() == Visit::Stop {
                return;
            }
        }
    }

    /// Visits every matching entity with borrowed components.
    ///
    /// The world is borrowed immutably for the whole pass, so no structural
    /// change can happen while it runs.
    pub fn each_ref<'w, F, R>(&self, world: &'w World, mut visitor: F)
    where
        F: FnMut(EntityId, Q::Item<'w>) -> R,
        R: Into<Visit>,
    {
        let Some(fetch) = Q::init_fetch(world.components()) else {
            return;
        };
        for &slot in world.live_slots().iter() {
            let Some(items) = Q::fetch(&fetch, slot) else {
                continue;
            };
            let entity = world.entity_at(slot).unwrap_or(EntityId::NULL);
            if visitor(entity, items).into() == Visit::Stop {
                return;
            }
        }
    }

    /// Number of entities currently matching.
    #[must_use]
    pub fn count(&self, world: &World) -> usize {
        let mut count = 0;
        self.each_ref(world, |_, _| count += 1);
        count
    }

    /// Ids of the entities currently matching, in slot order.
    #[must_use]
    pub fn entities(&self, world: &World) -> Vec<EntityId> {
        let mut entities = Vec::new();
        self.each_ref(world, |entity, _| entities.push(entity));
        entities
    }
}

impl<Q: Query> fmt::Debug for View<Q> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("View").field(&self.type_names).finish()
    }
}
