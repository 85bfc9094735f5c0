//! # SPRIG
//!
//! The application layer on top of [`sprig_core`].
//!
//! ```text
//! App::tick(dt)
//!   accumulator += dt
//!   while accumulator >= fixed_step:     <- at most max_steps_per_tick
//!     plugin.on_fixed_update(world)      <- every plugin, in add order
//!   plugin.on_task_update(world)         <- once per tick
//! ```
//!
//! ## Modules
//!
//! - `app`: The fixed-step runner owning the world
//! - `config`: Runner tunables loaded from TOML
//! - `plugin`: The interface collaborators implement

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod app;
pub mod config;
pub mod plugin;

// Re-export the core
pub use sprig_core as core;

pub use app::App;
pub use config::AppConfig;
pub use plugin::Plugin;
