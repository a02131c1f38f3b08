//! Fluent builder for constructing a [`Universe`].

use viv_core::SimConfig;
use viv_world::World;

use crate::universe::seed_rngs;
use crate::{SimError, SimResult, Universe};

/// Fluent builder for [`Universe`].
///
/// # Required inputs
///
/// - [`SimConfig`] — horizon, seed, audit flag
/// - [`World`] — from [`viv_world::PopulationBuilder`]
///
/// # Example
///
/// ```rust,ignore
/// let world = builder.build()?;
/// let mut universe = UniverseBuilder::new(SimConfig::new(7, 42), world).build()?;
/// universe.run(&mut NoopObserver)?;
/// ```
pub struct UniverseBuilder {
    config: SimConfig,
    world: World,
}

impl UniverseBuilder {
    pub fn new(config: SimConfig, world: World) -> Self {
        Self { config, world }
    }

    /// Validate the configuration and return a ready-to-run [`Universe`].
    pub fn build(self) -> SimResult<Universe> {
        if self.config.horizon_mins == 0 {
            return Err(SimError::Config("horizon must be at least one minute".into()));
        }
        // Catch a malformed world up front rather than mid-run.
        self.world.check_invariants()?;

        let rngs = seed_rngs(self.config.seed, self.world.persons.len());
        Ok(Universe::new(self.config, self.world, rngs))
    }
}
