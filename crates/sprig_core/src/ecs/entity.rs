//! # Entity Identifiers
//!
//! Entities are lightweight identifiers consisting of:
//! - A slot index into the allocator and component arrays
//! - A generation counter for safe reuse of that slot

use std::fmt;

use bytemuck::{Pod, Zeroable};

/// Number of low bits holding the generation.
pub const GENERATION_BITS: u32 = 8;

/// Mask selecting the generation bits of a raw id.
pub const GENERATION_MASK: u32 = (1 << GENERATION_BITS) - 1;

/// Largest slot index an id can carry.
///
/// Slot `0xFF_FFFF` is never handed out so that no live id can ever equal
/// [`EntityId::NULL`].
pub const MAX_SLOT: u32 = (u32::MAX >> GENERATION_BITS) - 1;

/// Unique identifier for an entity.
///
/// The ID is split into two parts:
/// - Upper 24 bits: slot index
/// - Lower 8 bits: generation counter for detecting stale references
///
/// Generations wrap at 256. A slot recycled 256 times hands out an id equal
/// to one it issued before, so an id held across that many destroy/create
/// cycles of the same slot can alias the new occupant.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Pod, Zeroable)]
#[repr(transparent)]
pub struct EntityId(u32);

impl EntityId {
    /// Null/invalid entity ID.
    pub const NULL: Self = Self(u32::MAX);

    /// Creates a new entity ID from slot index and generation.
    ///
    /// # Arguments
    ///
    /// * `index` - The slot index (0 to 2^24-1, higher bits are discarded)
    /// * `generation` - The generation counter
    #[inline]
    #[must_use]
    pub const fn new(index: u32, generation: u8) -> Self {
        Self((index << GENERATION_BITS) | generation as u32)
    }

    /// Reinterprets a raw integer as an entity ID.
    ///
    /// Used when entities mirror externally numbered objects.
    #[inline]
    #[must_use]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the packed integer.
    #[inline]
    #[must_use]
    pub const fn to_raw(self) -> u32 {
        self.0
    }

    /// Returns the slot index portion of the entity ID.
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0 >> GENERATION_BITS
    }

    /// Returns the generation portion of the entity ID.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u8 {
        (self.0 & GENERATION_MASK) as u8
    }

    /// Checks if this entity ID is null/invalid.
    #[inline]
    #[must_use]
    pub const fn is_null(self) -> bool {
        self.0 == u32::MAX
    }

    /// Views a slice of IDs as their raw integers without copying.
    #[inline]
    #[must_use]
    pub fn as_raw_slice(ids: &[Self]) -> &[u32] {
        bytemuck::cast_slice(ids)
    }

    /// Views a slice of raw integers as IDs without copying.
    #[inline]
    #[must_use]
    pub fn from_raw_slice(raw: &[u32]) -> &[Self] {
        bytemuck::cast_slice(raw)
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::NULL
    }
}

impl From<u32> for EntityId {
    fn from(raw: u32) -> Self {
        Self::from_raw(raw)
    }
}

impl From<EntityId> for u32 {
    fn from(id: EntityId) -> Self {
        id.to_raw()
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            f.write_str("null")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            f.write_str("EntityId(NULL)")
        } else {
            write!(f, "EntityId({}v{})", self.index(), self.generation())
        }
    }
}
