//! # SPRIG Core
//!
//! An in-process entity component store:
//! - Lightweight generational entity IDs with safe slot recycling
//! - Sparse per-type component storage, cheap to probe
//! - Cached views that tolerate mutation from inside their visitor
//!
//! ## Error Policy
//!
//! 1. **Absence is not an error** - reads, removals and destroys on dead
//!    entities return empty results
//! 2. **Writing into a dead entity is** - [`World::set`] refuses it, so a
//!    recycled slot never inherits orphaned data
//!
//! ## Example
//!
//! ```rust
//! use sprig_core::{Component, World};
//!
//! #[derive(Clone)]
//! struct Fizz;
//! impl Component for Fizz {}
//!
//! #[derive(Clone)]
//! struct Buzz;
//! impl Component for Buzz {}
//!
//! let mut world = World::new();
//! for i in 0..30 {
//!     let entity = world.create(());
//!     if i % 3 == 0 {
//!         world.set(entity, Fizz).unwrap();
//!     }
//!     if i % 5 == 0 {
//!         world.set(entity, Buzz).unwrap();
//!     }
//! }
//!
//! let mut hits = Vec::new();
//! world.each::<(Fizz, Buzz), _, _>(|_, entity, _| hits.push(entity.index()));
//! assert_eq!(hits, vec![0, 15]);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod ecs;
pub mod error;

pub use config::WorldConfig;
pub use ecs::{
    Bundle, Component, ComponentStorage, Components, Dispose, EntityId, OwnedQuery, Query,
    SlotAllocator, View, Visit, World,
};
pub use error::{EcsError, EcsResult};
