//! # App
//!
//! Owns a [`World`] and the plugins that act on it, and turns wall-clock
//! deltas into a whole number of fixed steps.

use std::fmt;

use sprig_core::World;

use crate::config::AppConfig;
use crate::plugin::Plugin;

/// Fixed-timestep runner.
///
/// Plugins are called in the order they were added.
pub struct App {
    /// The world every plugin acts on.
    world: World,
    /// Registered plugins, in add order.
    plugins: Vec<Box<dyn Plugin>>,
    /// Configuration.
    config: AppConfig,
    /// Seconds not yet consumed by a fixed step.
    accumulator: f64,
    /// Whether `on_start` has run.
    started: bool,
    /// Fixed steps run so far.
    fixed_steps: u64,
    /// Ticks run so far.
    ticks: u64,
}

impl App {
    /// Creates an app with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// Creates an app with the given configuration.
    #[must_use]
    pub fn with_config(config: AppConfig) -> Self {
        Self {
            world: World::with_config(config.world.clone()),
            plugins: Vec::new(),
            config,
            accumulator: 0.0,
            started: false,
            fixed_steps: 0,
            ticks: 0,
        }
    }

    /// Returns the configuration of this app.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// The world plugins act on.
    #[inline]
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// The world, mutably.
    #[inline]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Number of registered plugins.
    #[inline]
    #[must_use]
    pub fn plugin_count(&self) -> usize {
        self.plugins.len()
    }

    /// Fixed steps run so far.
    #[inline]
    #[must_use]
    pub fn fixed_steps(&self) -> u64 {
        self.fixed_steps
    }

    /// Ticks run so far.
    #[inline]
    #[must_use]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Returns `true` once `on_start` has run.
    #[inline]
    #[must_use]
    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Fraction of a fixed step left in the accumulator, in `[0, 1)`.
    ///
    /// Useful to interpolate between the last two fixed states.
    #[must_use]
    pub fn step_fraction(&self) -> f64 {
        self.accumulator / self.config.fixed_step_secs
    }

    /// Registers `plugin` and runs its `init` hook right away.
    ///
    /// A plugin added after [`App::start`] also gets `on_start` immediately.
    pub fn add_plugin<P: Plugin + 'static>(&mut self, mut plugin: P) -> &mut Self {
        tracing::debug!(plugin = plugin.name(), "plugin added");
        plugin.init(&mut self.world);
        if self.started {
            plugin.on_start(&mut self.world);
        }
        self.plugins.push(Box::new(plugin));
        self
    }

    /// Runs `on_start` on every plugin. Does nothing after the first call.
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        for plugin in &mut self.plugins {
            plugin.on_start(&mut self.world);
        }
        tracing::debug!(plugins = self.plugins.len(), "app started");
    }

    /// Advances the app by `delta_secs` of wall-clock time.
    ///
    /// Starts the app if needed, runs `on_fixed_update` once per whole fixed
    /// step now in the accumulator, then `on_task_update` once. Negative or
    /// non-finite deltas count as zero.
    ///
    /// # Returns
    ///
    /// Number of fixed steps run.
    pub fn tick(&mut self, delta_secs: f64) -> u32 {
        self.start();

        if delta_secs.is_finite() && delta_secs > 0.0 {
            self.accumulator += delta_secs;
        }

        let step = self.config.fixed_step_secs;
        let mut steps = 0;
        while self.accumulator >= step {
            if steps == self.config.max_steps_per_tick {
                let dropped = self.accumulator;
                self.accumulator %= step;
                tracing::warn!(
                    max_steps = steps,
                    dropped_secs = dropped - self.accumulator,
                    "fixed step backlog clamped"
                );
                break;
            }
            for plugin in &mut self.plugins {
                plugin.on_fixed_update(&mut self.world);
            }
            self.accumulator -= step;
            steps += 1;
        }
        self.fixed_steps += u64::from(steps);

        for plugin in &mut self.plugins {
            plugin.on_task_update(&mut self.world);
        }
        self.ticks += 1;
        steps
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("world", &self.world)
            .field(
                "plugins",
                &self.plugins.iter().map(|p| p.name()).collect::<Vec<_>>(),
            )
            .field("config", &self.config)
            .field("fixed_steps", &self.fixed_steps)
            .field("ticks", &self.ticks)
            .finish()
    }
}
