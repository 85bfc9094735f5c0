//! # Plugins
//!
//! A plugin bundles setup and per-tick behavior for a [`World`]. Every hook
//! has an empty default, so a plugin only implements what it needs.

use sprig_core::World;

/// A unit of behavior driven by an [`crate::App`].
///
/// # Example
///
/// ```rust
/// use sprig::{App, Plugin};
/// use sprig::core::{Component, World};
///
/// struct Score(u32);
/// impl Component for Score {}
///
/// struct Scoring;
///
/// impl Plugin for Scoring {
///     fn init(&mut self, world: &mut World) {
///         world.insert_resource(Score(0));
///     }
///
///     fn on_fixed_update(&mut self, world: &mut World) {
///         if let Some(score) = world.resource_mut::<Score>() {
///             score.0 += 1;
///         }
///     }
/// }
///
/// let mut app = App::new();
/// app.add_plugin(Scoring);
/// app.tick(1.0 / 30.0);
/// assert_eq!(app.world().resource::<Score>().map(|s| s.0), Some(2));
/// ```
pub trait Plugin {
    /// Name used in log output.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Runs once, when the plugin is added to an app.
    fn init(&mut self, _world: &mut World) {}

    /// Runs once, before the first tick.
    fn on_start(&mut self, _world: &mut World) {}

    /// Runs once per elapsed fixed step.
    fn on_fixed_update(&mut self, _world: &mut World) {}

    /// Runs once per tick, after the fixed steps.
    fn on_task_update(&mut self, _world: &mut World) {}
}
