//! Tool-side leftovers the scanner needs: the per-crop placement cost
//! sentinels and the map recording which cost was paid at each zone centre.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::{MAP_HEIGHT, MAP_WIDTH};
use crate::tiles::Crop;

pub const CORN_COST: u16 = 150;
pub const WHEAT_COST: u16 = 160;
pub const ORCHARD_COST: u16 = 170;
pub const POTATO_COST: u16 = 180;

/// Maps a recorded placement cost back to the crop it bought. Unknown costs
/// (including 0, "nothing recorded") resolve to `None`.
pub fn crop_for_cost(cost: u16) -> Option<Crop> {
    match cost {
        CORN_COST => Some(Crop::Corn),
        WHEAT_COST => Some(Crop::Wheat),
        ORCHARD_COST => Some(Crop::Orchard),
        POTATO_COST => Some(Crop::Potato),
        _ => None,
    }
}

/// Full-resolution record of the cost paid when a zone was placed, written by
/// the zoning tool and read back by the field scanner to recover crop type.
#[derive(Resource, Clone, Serialize, Deserialize)]
pub struct CostMap {
    costs: Vec<u16>,
    width: usize,
    height: usize,
}

impl Default for CostMap {
    fn default() -> Self {
        Self {
            costs: vec![0; MAP_WIDTH * MAP_HEIGHT],
            width: MAP_WIDTH,
            height: MAP_HEIGHT,
        }
    }
}

impl CostMap {
    pub fn get(&self, x: i32, y: i32) -> u16 {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return 0;
        }
        self.costs[y as usize * self.width + x as usize]
    }

    pub fn set(&mut self, x: i32, y: i32, cost: u16) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        self.costs[y as usize * self.width + x as usize] = cost;
    }
}
