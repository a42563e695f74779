//! Coarse overlay grids ("block maps") addressed by world tile coordinates.
//!
//! Land value, pollution density, population density and the rate-of-growth
//! accumulator all live at a resolution coarser than the tile grid; callers
//! query them with tile coordinates and the map divides by its block size.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::{
    LAND_VALUE_BLOCK, MAP_HEIGHT, MAP_WIDTH, POLLUTION_BLOCK, POPULATION_DENSITY_BLOCK,
    RATE_OF_GROWTH_BLOCK,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockMap {
    pub values: Vec<i16>,
    pub width: usize,
    pub height: usize,
    pub block_size: usize,
}

impl BlockMap {
    pub fn new(map_width: usize, map_height: usize, block_size: usize) -> Self {
        let width = map_width.div_ceil(block_size);
        let height = map_height.div_ceil(block_size);
        Self {
            values: vec![0; width * height],
            width,
            height,
            block_size,
        }
    }

    fn block_index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 {
            return None;
        }
        let bx = x as usize / self.block_size;
        let by = y as usize / self.block_size;
        if bx >= self.width || by >= self.height {
            return None;
        }
        Some(by * self.width + bx)
    }

    /// Value for the block containing world tile (x, y); 0 out of bounds.
    pub fn world_get(&self, x: i32, y: i32) -> i16 {
        self.block_index(x, y).map_or(0, |idx| self.values[idx])
    }

    /// Sets the block containing world tile (x, y); out-of-bounds writes are
    /// dropped.
    pub fn world_set(&mut self, x: i32, y: i32, value: i16) {
        if let Some(idx) = self.block_index(x, y) {
            self.values[idx] = value;
        }
    }
}

#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct LandValueMap(pub BlockMap);

impl Default for LandValueMap {
    fn default() -> Self {
        Self(BlockMap::new(MAP_WIDTH, MAP_HEIGHT, LAND_VALUE_BLOCK))
    }
}

#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct PollutionMap(pub BlockMap);

impl Default for PollutionMap {
    fn default() -> Self {
        Self(BlockMap::new(MAP_WIDTH, MAP_HEIGHT, POLLUTION_BLOCK))
    }
}

#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct PopulationDensityMap(pub BlockMap);

impl Default for PopulationDensityMap {
    fn default() -> Self {
        Self(BlockMap::new(MAP_WIDTH, MAP_HEIGHT, POPULATION_DENSITY_BLOCK))
    }
}

/// Per-area growth accumulator nudged by zone transitions; feeds the demand
/// valves elsewhere in the simulation.
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct RateOfGrowthMap(pub BlockMap);

impl Default for RateOfGrowthMap {
    fn default() -> Self {
        Self(BlockMap::new(MAP_WIDTH, MAP_HEIGHT, RATE_OF_GROWTH_BLOCK))
    }
}

impl RateOfGrowthMap {
    /// Stored rate moves by `delta * 4`, clamped to +/-200.
    pub fn adjust(&mut self, x: i32, y: i32, delta: i16) {
        let value = (self.0.world_get(x, y) + delta * 4).clamp(-200, 200);
        self.0.world_set(x, y, value);
    }
}
