pub const MAP_WIDTH: usize = 120;
pub const MAP_HEIGHT: usize = 100;

/// Block sizes for the coarse overlay maps, in tiles per block edge.
pub const LAND_VALUE_BLOCK: usize = 2;
pub const POLLUTION_BLOCK: usize = 2;
pub const POPULATION_DENSITY_BLOCK: usize = 2;
pub const RATE_OF_GROWTH_BLOCK: usize = 8;
