use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::{MAP_HEIGHT, MAP_WIDTH};
use crate::tiles::{DIRT, TILE_CODE_MASK};

/// The city tile map. Each cell stores a raw `u16`: tile code in the low
/// bits, overlay flags in the high bits. Code and flags are only ever written
/// together through [`TileGrid::set_tile`], so a cell is never half-updated.
#[derive(Resource, Clone, Serialize, Deserialize)]
pub struct TileGrid {
    pub tiles: Vec<u16>,
    pub width: usize,
    pub height: usize,
}

impl Default for TileGrid {
    fn default() -> Self {
        Self::new(MAP_WIDTH, MAP_HEIGHT)
    }
}

impl TileGrid {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            tiles: vec![DIRT; width * height],
            width,
            height,
        }
    }

    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> usize {
        y as usize * self.width + x as usize
    }

    /// Tile code at (x, y) with overlay flags masked off; `None` out of
    /// bounds.
    #[inline]
    pub fn get_value(&self, x: i32, y: i32) -> Option<u16> {
        if !self.in_bounds(x, y) {
            return None;
        }
        Some(self.tiles[self.index(x, y)] & TILE_CODE_MASK)
    }

    /// Raw cell value including overlay flags; `None` out of bounds.
    #[inline]
    pub fn get_raw(&self, x: i32, y: i32) -> Option<u16> {
        if !self.in_bounds(x, y) {
            return None;
        }
        Some(self.tiles[self.index(x, y)])
    }

    /// Writes code and overlay flags as one unit. Out-of-bounds writes are
    /// silently dropped; the simulation must not fault on a bad coordinate.
    pub fn set_tile(&mut self, x: i32, y: i32, code: u16, flags: u16) {
        if !self.in_bounds(x, y) {
            return;
        }
        let idx = self.index(x, y);
        self.tiles[idx] = (code & TILE_CODE_MASK) | flags;
    }
}
