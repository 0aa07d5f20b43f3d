//! Integration tests for the full simulation pipeline.
//!
//! These tests drive [`Simulation::tick`] end to end and check the scenarios
//! the tick order is built around: kills, absorption, off-arena cleanup and
//! spawn timing.

use glam::Vec2;

use crate::arena::Arena;
use crate::config::ArenaConfig;
use crate::entity::{pursuit, EntityRef};
use crate::grid::SpatialGrid;
use crate::input::InputState;
use crate::resolver::resolve;
use crate::view::VisualState;

use super::helpers::{
    run_ticks, scripted_input, sim_with, spawn_test_obstacle, spawn_test_pickup,
    spawn_test_projectile, test_sim,
};

// =============================================================================
// Collision Scenarios
// =============================================================================

/// A projectile overlapping an obstacle after motion spends itself and
/// destroys the obstacle, which inherits the projectile's velocity.
#[test]
fn projectile_hit_flags_both_participants() {
    let config = ArenaConfig::default();
    let mut arena = Arena::new(&config);
    let rock = spawn_test_obstacle(&mut arena, Vec2::new(200.0, 200.0), 30, Vec2::ZERO);
    let shot = spawn_test_projectile(&mut arena, Vec2::new(210.0, 215.0), Vec2::new(0.0, 1.3));

    arena.advance_projectiles();
    arena.advance_obstacles();
    let mut grid = SpatialGrid::for_config(&config);
    arena.register_collidables(&mut grid);
    let stats = resolve(&grid, &mut arena);

    assert_eq!(stats.contacts, 1);
    assert!(arena.projectile(shot).spent);
    assert!(arena.obstacle(rock).destroyed);
    assert_eq!(arena.obstacle(rock).transform.velocity, Vec2::new(0.0, 1.3));

    let views: Vec<_> = crate::view::views(&arena).collect();
    assert_eq!(views[1].visual, VisualState::Damaged);
    assert_eq!(views[2].visual, VisualState::Damaged);
}

/// Through a full tick: the projectile and obstacle are compacted and the
/// obstacle's pickups appear at its last position.
#[test]
fn projectile_kills_obstacle_and_releases_pickups() {
    let mut sim = test_sim();
    spawn_test_obstacle(sim.arena_mut(), Vec2::new(200.0, 200.0), 30, Vec2::ZERO);
    spawn_test_projectile(sim.arena_mut(), Vec2::new(210.0, 215.0), Vec2::new(0.0, 1.3));

    sim.tick(InputState::empty());

    let report = *sim.last_report();
    assert_eq!(report.resolve.contacts, 1);
    assert_eq!(report.pickups_derived, 9);
    assert_eq!(report.removed.projectiles, 1);
    assert_eq!(report.removed.obstacles, 1);
    assert!(sim.projectiles().is_empty());
    assert!(sim.obstacles().is_empty());

    assert_eq!(sim.pickups().len(), 9);
    for pickup in sim.pickups() {
        let t = &pickup.transform;
        assert_eq!(t.position, Vec2::new(200.0, 200.0));
        // Obstacle velocity (0, 1.3) times the burst, plus scatter.
        let scatter = t.velocity - Vec2::new(0.0, 26.0);
        assert!(scatter.x.abs() <= 10.0 && scatter.y.abs() <= 10.0 + 1e-4);
    }
    assert_eq!(sim.score(), 0);
}

/// Obstacles smaller than 100 square pixels release nothing.
#[test]
fn small_obstacle_releases_no_pickups() {
    let mut sim = test_sim();
    spawn_test_obstacle(sim.arena_mut(), Vec2::new(300.0, 300.0), 9, Vec2::ZERO);
    spawn_test_projectile(sim.arena_mut(), Vec2::new(304.0, 305.0), Vec2::new(0.0, 1.0));

    sim.tick(InputState::empty());

    assert_eq!(sim.last_report().removed.obstacles, 1);
    assert!(sim.pickups().is_empty());
}

/// A projectile only touching an obstacle along an edge does not hit it.
#[test]
fn touching_edges_are_not_a_hit() {
    let mut sim = test_sim();
    spawn_test_obstacle(sim.arena_mut(), Vec2::new(100.0, 100.0), 20, Vec2::ZERO);
    // After moving, the projectile spans x 120..121, flush with the obstacle.
    spawn_test_projectile(sim.arena_mut(), Vec2::new(120.0, 111.0), Vec2::new(0.0, 1.0));

    sim.tick(InputState::empty());

    assert_eq!(sim.last_report().resolve.contacts, 0);
    assert_eq!(sim.obstacles().len(), 1);
    assert_eq!(sim.projectiles().len(), 1);
}

// =============================================================================
// Pickup Scenarios
// =============================================================================

/// A pickup overlapping the agent is absorbed and scores exactly one.
#[test]
fn pickup_absorption_scores_once() {
    let mut sim = test_sim();
    let start = sim.config().agent_start;
    spawn_test_pickup(sim.arena_mut(), start + Vec2::new(4.0, 3.0));

    assert_eq!(sim.tick(InputState::empty()), 1);
    assert!(sim.pickups().is_empty());

    assert_eq!(sim.tick(InputState::empty()), 1);
}

/// A distant pickup is pulled in and eventually absorbed.
#[test]
fn pickup_is_pulled_to_the_agent() {
    let mut sim = test_sim();
    let start = sim.config().agent_start;
    spawn_test_pickup(sim.arena_mut(), Vec2::new(100.0, start.y));

    let mut ticks = 0;
    while sim.score() == 0 && ticks < 300 {
        sim.tick(InputState::empty());
        ticks += 1;
    }
    assert_eq!(sim.score(), 1);
    assert!(sim.pickups().is_empty());
}

/// Pickups are never removed for leaving the arena.
#[test]
fn departed_pickup_is_kept() {
    let mut sim = test_sim();
    spawn_test_pickup(sim.arena_mut(), Vec2::new(-400.0, -400.0));
    sim.tick(InputState::empty());
    assert_eq!(sim.pickups().len(), 1);
}

// =============================================================================
// Cleanup Scenarios
// =============================================================================

/// An obstacle that drifts fully outside the arena is removed without a
/// collision.
#[test]
fn obstacle_leaving_arena_is_removed() {
    let mut sim = test_sim();
    spawn_test_obstacle(sim.arena_mut(), Vec2::new(955.0, 100.0), 20, Vec2::new(10.0, 0.0));

    sim.tick(InputState::empty());

    assert!(sim.obstacles().is_empty());
    assert_eq!(sim.last_report().removed.obstacles, 1);
    assert!(sim.pickups().is_empty());
}

/// An obstacle partly outside the arena stays.
#[test]
fn obstacle_straddling_border_is_kept() {
    let mut sim = test_sim();
    spawn_test_obstacle(sim.arena_mut(), Vec2::new(945.0, 100.0), 20, Vec2::new(1.0, 0.0));
    sim.tick(InputState::empty());
    assert_eq!(sim.obstacles().len(), 1);
}

/// A projectile flying off the top edge is removed on the tick its box
/// clears the arena.
#[test]
fn projectile_leaving_arena_is_removed() {
    let mut sim = test_sim();
    spawn_test_projectile(sim.arena_mut(), Vec2::new(5.0, 2.0), Vec2::new(0.0, 1.3));

    run_ticks(&mut sim, 3, |_| InputState::empty());
    assert_eq!(sim.projectiles().len(), 1);

    sim.tick(InputState::empty());
    assert!(sim.projectiles().is_empty());
}

// =============================================================================
// Spawn Scenarios
// =============================================================================

/// Obstacles spawn on the border, aimed at the agent.
#[test]
fn spawned_obstacle_aims_at_agent() {
    let mut sim = test_sim();
    run_ticks(&mut sim, 61, |_| InputState::empty());

    assert_eq!(sim.obstacles().len(), 1);
    let obstacle = &sim.obstacles()[0].transform;
    let agent = sim.agent().transform.position;
    assert_eq!(obstacle.velocity, pursuit(obstacle.position, agent, 0.9));

    let p = obstacle.position;
    assert!(p.x == 0.0 || p.x == 960.0 || p.y == 0.0 || p.y == 540.0);
}

/// A smaller arena provisions a smaller grid and still runs.
#[test]
fn small_arena_runs() {
    let mut sim = sim_with(ArenaConfig::with_size(200.0, 120.0));
    assert_eq!(sim.grid().dimensions(), (5, 3));
    run_ticks(&mut sim, 300, scripted_input);
    assert_eq!(sim.ticks(), 300);
}

// =============================================================================
// Long Runs
// =============================================================================

/// After every tick, no surviving entity satisfies its despawn predicate
/// and the score equals the number of pickups removed so far.
#[test]
fn compaction_leaves_only_live_entities() {
    let mut sim = test_sim();
    let (w, h) = (sim.config().width, sim.config().height);
    let mut absorbed = 0;

    for tick in 1..=1500 {
        sim.tick(scripted_input(tick));
        absorbed += sim.last_report().removed.pickups;

        assert!(sim.projectiles().iter().all(|p| !p.should_despawn(w, h)));
        assert!(sim.obstacles().iter().all(|o| !o.should_despawn(w, h)));
        assert!(sim.pickups().iter().all(|p| !p.should_despawn()));
        assert_eq!(sim.score() as usize, absorbed);
    }
}

/// Pickups are never registered in the grid.
#[test]
fn grid_holds_no_pickups() {
    let mut sim = test_sim();
    spawn_test_pickup(sim.arena_mut(), Vec2::new(20.0, 20.0));
    spawn_test_obstacle(sim.arena_mut(), Vec2::new(20.0, 20.0), 10, Vec2::ZERO);

    sim.tick(InputState::empty());

    let handles: Vec<EntityRef> = sim.grid().cells().flat_map(|(_, c)| c.iter().copied()).collect();
    assert_eq!(handles, vec![EntityRef::obstacle(0)]);
}
