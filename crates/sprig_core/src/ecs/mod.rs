//! # Entity Component System
//!
//! A sparse, generational entity component store.
//!
//! ## Design Philosophy
//!
//! - Entity IDs are slot indices with 8-bit generation counters
//! - Slots are recycled only once churn makes reuse worthwhile
//! - One sparse array per component type, probed by slot index
//! - Views iterate a snapshot of the live slots, so visitors may mutate

mod allocator;
mod bundle;
mod component;
mod entity;
mod query;
mod storage;
mod view;
mod world;

pub use allocator::SlotAllocator;
pub use bundle::Bundle;
pub use component::{Component, Dispose};
pub use entity::{EntityId, GENERATION_BITS, GENERATION_MASK, MAX_SLOT};
pub use query::{OwnedQuery, Query};
pub use storage::{ComponentStorage, Components};
pub use view::{View, Visit};
pub use world::World;
