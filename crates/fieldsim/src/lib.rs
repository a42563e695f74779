//! Field-zone (farm) simulation engine for the city grid.
//!
//! Headless Bevy library: the tile map, overlay block maps, census, demand
//! valves and RNG are resources owned by the surrounding simulation; the
//! field scanner runs on `FixedUpdate` and drives one per-tile callback per
//! zone centre. See `field::field_found` for the orchestration contract.

use bevy::prelude::*;

pub mod block_map;
pub mod budget;
pub mod census;
pub mod config;
pub mod field;
pub mod game_params;
pub mod grid;
pub mod sim_rng;
pub mod tiles;
pub mod tools;
pub mod traffic;
pub mod valves;

/// Global tick counter incremented each FixedUpdate, used for throttling
/// simulation systems.
#[derive(Resource, Default)]
pub struct TickCounter(pub u64);

/// Shared throttle for grid-wide scans that don't need to run every tick.
#[derive(Resource, Default)]
pub struct ScanTimer {
    pub counter: u32,
}

impl ScanTimer {
    pub const INTERVAL: u32 = 16;

    pub fn tick(&mut self) {
        self.counter += 1;
    }

    pub fn should_run(&self) -> bool {
        self.counter.is_multiple_of(Self::INTERVAL)
    }
}

pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TickCounter>()
            .init_resource::<ScanTimer>()
            .add_systems(FixedUpdate, tick_scan_timer)
            .add_plugins(field::FieldZonesPlugin);
    }
}

pub fn tick_scan_timer(mut timer: ResMut<ScanTimer>, mut tick: ResMut<TickCounter>) {
    timer.tick();
    tick.0 = tick.0.wrapping_add(1);
}
