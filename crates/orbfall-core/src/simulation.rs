//! Simulation module with the fixed-order tick.
//!
//! The `Simulation` struct owns the arena, the collision grid, the random
//! generator and the clock, and advances everything one frame per
//! [`Simulation::tick`]:
//!
//! 1. **GRID**: clear every cell
//! 2. **MOTION**: move projectiles, obstacles, then pickups (pickups that
//!    reach the agent are absorbed here)
//! 3. **BROAD PHASE**: register obstacles, then projectiles
//! 4. **NARROW PHASE**: resolve overlapping pairs cell by cell
//! 5. **DERIVE**: release pickups from obstacles destroyed this tick
//! 6. **INPUT**: rotate, thrust, fire
//! 7. **TIMER**: spawn an obstacle if the spawn interval has elapsed
//! 8. **COMPACT**: drop spent projectiles, destroyed or departed obstacles,
//!    absorbed pickups (scoring each)
//!
//! # Determinism
//!
//! Every random draw comes from a `ChaCha8Rng` seeded with
//! [`ArenaConfig::seed`], in phase order. With a [`FixedStepClock`] and the
//! same inputs, two simulations stay bit-identical.
//!
//! # Example
//!
//! ```
//! use orbfall_core::clock::FixedStepClock;
//! use orbfall_core::config::ArenaConfig;
//! use orbfall_core::input::InputState;
//! use orbfall_core::simulation::Simulation;
//!
//! let mut sim = Simulation::new(ArenaConfig::with_seed(42), FixedStepClock::from_hz(60)).unwrap();
//!
//! for _ in 0..10 {
//!     sim.tick(InputState::FIRE);
//! }
//!
//! assert_eq!(sim.ticks(), 10);
//! assert_eq!(sim.projectiles().len(), 10);
//! ```

use std::time::Duration;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use crate::arena::{Arena, Removed};
use crate::clock::{Clock, FixedStepClock, MonotonicClock};
use crate::config::ArenaConfig;
use crate::entity::{Agent, Obstacle, Pickup, Projectile};
use crate::error::Result;
use crate::grid::SpatialGrid;
use crate::hash::state_digest;
use crate::input::InputState;
use crate::lifecycle::{derive_pickups, fire, spawn_obstacle};
use crate::resolver::{resolve, ResolveStats};
use crate::view::{self, EntityView};

// =============================================================================
// TickReport
// =============================================================================

/// What happened during one tick.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickReport {
    /// Tick number, starting at 1 for the first tick
    pub tick: u64,
    /// Cumulative score after compaction
    pub score: u32,
    /// Narrow phase counters
    pub resolve: ResolveStats,
    /// Pickups that reached the agent while moving
    pub pickup_contacts: usize,
    /// Projectiles fired by input
    pub projectiles_fired: u32,
    /// Obstacles spawned by the timer
    pub obstacles_spawned: u32,
    /// Pickups released by destroyed obstacles
    pub pickups_derived: u32,
    /// Entities removed by compaction
    pub removed: Removed,
}

// =============================================================================
// Simulation
// =============================================================================

/// The arena simulation.
///
/// Generic over its [`Clock`] so tests can drive spawn timing
/// deterministically.
#[derive(Debug)]
pub struct Simulation<C: Clock = MonotonicClock> {
    config: ArenaConfig,
    arena: Arena,
    /// Rebuilt every tick; kept to reuse cell allocations.
    grid: SpatialGrid,
    rng: ChaCha8Rng,
    clock: C,
    /// Clock reading at the most recent obstacle spawn.
    last_spawn: Duration,
    ticks: u64,
    last_report: TickReport,
}

impl Simulation<MonotonicClock> {
    /// Creates a simulation timed by the wall clock.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`](crate::error::ConfigError) if `config` is
    /// rejected by [`ArenaConfig::validate`].
    pub fn realtime(config: ArenaConfig) -> Result<Self> {
        Self::new(config, MonotonicClock::new())
    }
}

impl Simulation<FixedStepClock> {
    /// Creates a simulation whose clock advances one `1 / hz` step per tick.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`](crate::error::ConfigError) if `config` is
    /// rejected by [`ArenaConfig::validate`].
    pub fn fixed_step(config: ArenaConfig, hz: u32) -> Result<Self> {
        Self::new(config, FixedStepClock::from_hz(hz))
    }
}

impl<C: Clock> Simulation<C> {
    /// Creates a simulation with only the agent in the arena.
    ///
    /// The spawn timer starts at zero, so the first obstacle appears once
    /// the clock has advanced past one spawn interval.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`](crate::error::ConfigError) if `config` is
    /// rejected by [`ArenaConfig::validate`].
    pub fn new(config: ArenaConfig, clock: C) -> Result<Self> {
        config.validate()?;

        let grid = SpatialGrid::for_config(&config);
        let (cols, rows) = grid.dimensions();
        info!(
            seed = config.seed,
            width = config.width,
            height = config.height,
            cols,
            rows,
            "simulation created"
        );

        Ok(Self {
            arena: Arena::new(&config),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            grid,
            clock,
            last_spawn: Duration::ZERO,
            ticks: 0,
            last_report: TickReport::default(),
            config,
        })
    }

    /// Advances the simulation one frame and returns the cumulative score.
    pub fn tick(&mut self, input: InputState) -> u32 {
        self.ticks += 1;
        let mut report = TickReport {
            tick: self.ticks,
            ..TickReport::default()
        };

        self.grid.clear();

        self.arena.advance_projectiles();
        self.arena.advance_obstacles();
        report.pickup_contacts = self
            .arena
            .advance_pickups(self.config.pickup_attraction, self.config.pickup_damping);

        self.arena.register_collidables(&mut self.grid);
        report.resolve = resolve(&self.grid, &mut self.arena);

        let rng = &mut self.rng;
        let burst = self.config.pickup_burst;
        report.pickups_derived = self
            .arena
            .derive_from_destroyed(|obstacle, out| derive_pickups(&mut *rng, obstacle, burst, out));

        report.projectiles_fired = self.apply_input(input);
        report.obstacles_spawned = self.spawn_on_timer();

        report.removed = self.arena.compact();
        report.score = self.arena.score();

        trace!(
            tick = report.tick,
            score = report.score,
            pairs = report.resolve.pairs_tested,
            contacts = report.resolve.contacts,
            entities = self.arena.entity_count(),
            "tick complete"
        );
        self.last_report = report;
        report.score
    }

    /// Applies one input snapshot to the agent. Returns projectiles fired.
    fn apply_input(&mut self, input: InputState) -> u32 {
        let step = self.config.rotate_step;
        let agent = self.arena.agent_mut();

        if input.contains(InputState::LEFT) {
            agent.rotate(-step);
        }
        if input.contains(InputState::RIGHT) {
            agent.rotate(step);
        }
        if input.contains(InputState::UP) {
            agent.thrust_forward();
        }
        if input.contains(InputState::DOWN) {
            agent.thrust_backward();
        }

        if input.contains(InputState::FIRE) {
            let shot = fire(self.arena.agent(), &self.config);
            self.arena.push_projectile(shot);
            return 1;
        }
        0
    }

    /// Spawns one obstacle if more than the spawn interval has passed since
    /// the previous spawn.
    fn spawn_on_timer(&mut self) -> u32 {
        let now = self.clock.now();
        if now.saturating_sub(self.last_spawn) <= self.config.spawn_interval {
            return 0;
        }
        self.last_spawn = now;

        let target = self.arena.agent().transform.position;
        let obstacle = spawn_obstacle(&mut self.rng, &self.config, target);
        debug!(
            x = obstacle.transform.position.x,
            y = obstacle.transform.position.y,
            width = obstacle.transform.extent().width,
            height = obstacle.transform.extent().height,
            "spawned obstacle"
        );
        self.arena.push_obstacle(obstacle);
        1
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// Number of ticks run so far.
    #[must_use]
    pub const fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Cumulative score.
    #[must_use]
    pub const fn score(&self) -> u32 {
        self.arena.score()
    }

    /// The configuration this simulation was built from.
    #[must_use]
    pub const fn config(&self) -> &ArenaConfig {
        &self.config
    }

    /// The arena.
    #[must_use]
    pub const fn arena(&self) -> &Arena {
        &self.arena
    }

    /// Mutable access to the arena, for scenario setup between ticks.
    pub fn arena_mut(&mut self) -> &mut Arena {
        &mut self.arena
    }

    /// The collision grid as left by the last tick.
    #[must_use]
    pub const fn grid(&self) -> &SpatialGrid {
        &self.grid
    }

    /// Report of the most recent tick.
    #[must_use]
    pub const fn last_report(&self) -> &TickReport {
        &self.last_report
    }

    /// The agent.
    #[must_use]
    pub const fn agent(&self) -> &Agent {
        self.arena.agent()
    }

    /// Live projectiles.
    #[must_use]
    pub fn projectiles(&self) -> &[Projectile] {
        self.arena.projectiles()
    }

    /// Live obstacles.
    #[must_use]
    pub fn obstacles(&self) -> &[Obstacle] {
        self.arena.obstacles()
    }

    /// Live pickups.
    #[must_use]
    pub fn pickups(&self) -> &[Pickup] {
        self.arena.pickups()
    }

    /// Render views of every entity.
    pub fn views(&self) -> impl Iterator<Item = EntityView> + '_ {
        view::views(&self.arena)
    }

    /// Digest of the arena state, see [`state_digest`].
    #[must_use]
    pub fn digest(&self) -> u64 {
        state_digest(&self.arena)
    }
}
