//! # Slot Allocator
//!
//! Hands out entity ids and recycles the slots of destroyed entities.
//!
//! Growth is preferred over reuse until the world is both large enough and
//! churned enough that reuse pays off:
//! - below `recycle_threshold` slots, always append
//! - while fewer than `1 / recycle_divisor` of the slots are reclaimed, append
//! - otherwise reuse the oldest reclaimed slot with a bumped generation
//!
//! Slots skipped by an explicit claim past the high-water mark are vacant,
//! not reclaimed: they never count toward reuse and are only handed out
//! by [`SlotAllocator::allocate_at`], or once the index space is exhausted.

use std::cell::OnceCell;
use std::collections::{BTreeSet, VecDeque};
use std::rc::Rc;

use super::entity::{EntityId, MAX_SLOT};
use crate::config::WorldConfig;

/// Per-index state of the allocator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Slot {
    occupied: bool,
    generation: u8,
}

/// Generational slot allocator.
///
/// Slots live in a dense array whose length is the high-water mark of slots
/// ever allocated. It never shrinks except through [`SlotAllocator::clear`].
///
/// # Thread Safety
///
/// Not thread-safe. The cached live list is shared through `Rc`.
#[derive(Clone, Debug)]
pub struct SlotAllocator {
    /// Slot state, indexed by slot index.
    slots: Vec<Slot>,
    /// Reclaimed slot indices, consumed oldest first.
    deleted: VecDeque<u32>,
    /// Never-occupied slots below the high-water mark.
    vacant: BTreeSet<u32>,
    /// Live slot indices in increasing order. Empty cell means dirty.
    live: OnceCell<Rc<[u32]>>,
    /// Slot count below which slots are never reused.
    recycle_threshold: usize,
    /// Reuse starts once `deleted * recycle_divisor >= slots`.
    recycle_divisor: usize,
}

impl SlotAllocator {
    /// Creates an allocator with the default recycling policy.
    #[must_use]
    pub fn new() -> Self {
        Self::from_config(&WorldConfig::default())
    }

    /// Creates an allocator with the recycling policy of `config`.
    #[must_use]
    pub fn from_config(config: &WorldConfig) -> Self {
        Self {
            slots: Vec::with_capacity(config.initial_capacity),
            deleted: VecDeque::new(),
            vacant: BTreeSet::new(),
            live: OnceCell::new(),
            recycle_threshold: config.recycle_threshold,
            recycle_divisor: config.recycle_divisor.max(1),
        }
    }

    /// Number of live slots. O(1).
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len() - self.deleted.len() - self.vacant.len()
    }

    /// Returns `true` if no slot is live.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// High-water mark of slots ever allocated.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of reclaimed slots waiting for reuse.
    #[inline]
    #[must_use]
    pub fn reclaimed(&self) -> usize {
        self.deleted.len()
    }

    /// Number of never-occupied slots left behind by explicit claims.
    #[inline]
    #[must_use]
    pub fn vacant(&self) -> usize {
        self.vacant.len()
    }

    /// Allocates a fresh or recycled id.
    ///
    /// # Returns
    ///
    /// The new id, or [`EntityId::NULL`] if the slot index space is
    /// exhausted and no reclaimed or vacant slot is left.
    pub fn allocate(&mut self) -> EntityId {
        let prefer_growth = self.slots.len() < self.recycle_threshold
            || self.deleted.len().saturating_mul(self.recycle_divisor) < self.slots.len();

        let id = if prefer_growth || self.deleted.is_empty() {
            self.grow()
                .or_else(|| self.recycle())
                .or_else(|| self.fill_vacant())
        } else {
            self.recycle()
        };

        match id {
            Some(id) => {
                self.live.take();
                id
            }
            None => {
                tracing::warn!(slots = self.slots.len(), "entity slot space exhausted");
                EntityId::NULL
            }
        }
    }

    /// Allocates the slot `preferred` if it is free.
    ///
    /// A free slot is occupied directly: its generation is kept and it is
    /// pulled out of the reclaimed queue or the vacant set. Asking for a slot
    /// past the high-water mark appends the slots in between as vacant, so
    /// later automatic ids still advance past `preferred`. An occupied
    /// or unrepresentable slot falls back to [`SlotAllocator::allocate`].
    pub fn allocate_at(&mut self, preferred: u32) -> EntityId {
        if preferred > MAX_SLOT {
            return self.allocate();
        }

        let index = preferred as usize;
        if let Some(slot) = self.slots.get(index) {
            if slot.occupied {
                return self.allocate();
            }
            if !self.vacant.remove(&preferred) {
                if let Some(pos) = self.deleted.iter().position(|&s| s == preferred) {
                    self.deleted.remove(pos);
                }
            }
            self.slots[index].occupied = true;
        } else {
            for filler in self.slots.len()..index {
                self.slots.push(Slot::default());
                self.vacant.insert(filler as u32);
            }
            self.slots.push(Slot {
                occupied: true,
                generation: 0,
            });
        }

        self.live.take();
        let generation = self.slots[index].generation;
        tracing::trace!(slot = preferred, generation, "slot claimed explicitly");
        EntityId::new(preferred, generation)
    }

    /// Returns `true` if `index` is occupied at exactly `generation`.
    #[inline]
    #[must_use]
    pub fn is_live(&self, index: u32, generation: u8) -> bool {
        self.slots
            .get(index as usize)
            .is_some_and(|slot| slot.occupied && slot.generation == generation)
    }

    /// Frees a slot.
    ///
    /// # Returns
    ///
    /// `true` if the slot was live at `generation` and is now reclaimed,
    /// `false` for double frees and stale generations.
    pub fn free(&mut self, index: u32, generation: u8) -> bool {
        if !self.is_live(index, generation) {
            return false;
        }

        self.slots[index as usize].occupied = false;
        self.deleted.push_back(index);
        self.live.take();
        tracing::trace!(slot = index, generation, "slot freed");
        true
    }

    /// Returns the id currently occupying `index`, if any.
    #[must_use]
    pub fn entity_at(&self, index: u32) -> Option<EntityId> {
        let slot = self.slots.get(index as usize)?;
        slot.occupied.then(|| EntityId::new(index, slot.generation))
    }

    /// Returns the current generation of an allocated slot, live or not.
    #[must_use]
    pub fn generation_of(&self, index: u32) -> Option<u8> {
        self.slots.get(index as usize).map(|slot| slot.generation)
    }

    /// Returns the live slot indices in increasing order.
    ///
    /// The list is rebuilt only on the first call after an allocation or free.
    /// The returned `Rc` is a snapshot: later rebuilds produce a new list.
    #[must_use]
    pub fn live_slots(&self) -> Rc<[u32]> {
        Rc::clone(self.live.get_or_init(|| {
            self.slots
                .iter()
                .enumerate()
                .filter(|(_, slot)| slot.occupied)
                .map(|(index, _)| index as u32)
                .collect()
        }))
    }

    /// Returns `true` if the live list will be rebuilt on next read.
    #[inline]
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.live.get().is_none()
    }

    /// Forgets every slot.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.deleted.clear();
        self.vacant.clear();
        self.live.take();
    }

    fn grow(&mut self) -> Option<EntityId> {
        let index = u32::try_from(self.slots.len())
            .ok()
            .filter(|&index| index <= MAX_SLOT)?;
        self.slots.push(Slot {
            occupied: true,
            generation: 0,
        });
        Some(EntityId::new(index, 0))
    }

    fn recycle(&mut self) -> Option<EntityId> {
        let index = self.deleted.pop_front()?;
        let slot = &mut self.slots[index as usize];
        slot.generation = slot.generation.wrapping_add(1);
        slot.occupied = true;
        tracing::trace!(slot = index, generation = slot.generation, "slot recycled");
        Some(EntityId::new(index, slot.generation))
    }

    fn fill_vacant(&mut self) -> Option<EntityId> {
        let index = self.vacant.pop_first()?;
        let slot = &mut self.slots[index as usize];
        slot.occupied = true;
        Some(EntityId::new(index, slot.generation))
    }
}

impl Default for SlotAllocator {
    fn default() -> Self {
        Self::new()
    }
}
