use bevy::prelude::*;

use crate::block_map::{LandValueMap, PollutionMap, PopulationDensityMap, RateOfGrowthMap};
use crate::budget::FieldBudget;
use crate::census::Census;
use crate::game_params::{GameParams, GrowthPolicy};
use crate::grid::TileGrid;
use crate::sim_rng::SimRng;
use crate::tiles::{
    classify_tile, encode_tile, is_field_zone_centre, Crop, FieldTile, BULL_BIT, BURN_BIT,
    FARM_BASE, FIELD_BASE, FREE_FIELD, HIGHLIGHT_BIT, LAST_FARM, TILE_CODE_MASK, ZONE_BIT,
};
use crate::tools::{crop_for_cost, CostMap};
use crate::traffic::{TrafficProbe, TrafficResult};
use crate::valves::Valves;

use super::helpers::{
    build_farm, eval_field, land_pollution_rank, score_triggers_degrade, score_triggers_growth,
    zone_population,
};

/// Everything one scan pass borrows from the surrounding simulation. The
/// engine keeps no state of its own between passes; all effects land in these
/// grids and counters.
pub struct FieldScan<'a> {
    pub map: &'a mut TileGrid,
    pub land_value: &'a LandValueMap,
    pub pollution: &'a PollutionMap,
    pub population_density: &'a PopulationDensityMap,
    pub rate_of_growth: &'a mut RateOfGrowthMap,
    pub costs: &'a CostMap,
    pub census: &'a mut Census,
    pub valves: &'a Valves,
    pub budget: &'a FieldBudget,
    pub params: &'a GameParams,
    pub rng: &'a mut SimRng,
    pub traffic: &'a TrafficProbe,
}

fn place_centre(map: &mut TileGrid, x: i32, y: i32, crop: Crop, rank: u8, tier: u8) {
    let code = encode_tile(FieldTile::Mature { crop, rank, tier });
    map.set_tile(x, y, code, BURN_BIT | HIGHLIGHT_BIT | ZONE_BIT);
    trace!("field zone at ({x}, {y}) now {crop:?} rank {rank} tier {tier}");
}

/// Advances the zone at (x, y) one densification step, if pollution permits:
/// crop marker to mature centre, free zone to one more farm (or to a dense
/// centre under population pressure), mature centre to the next tier. The
/// `crop` is only needed to densify a free zone; markers and mature centres
/// carry their own, and farm accumulation is crop-agnostic.
pub fn grow_zone(
    ctx: &mut FieldScan,
    x: i32,
    y: i32,
    population: u16,
    rank: u8,
    crop: Option<Crop>,
) {
    // Too polluted; no-one wants to farm here.
    if ctx.pollution.0.world_get(x, y) > ctx.params.field.pollution_growth_gate {
        return;
    }

    let Some(code) = ctx.map.get_value(x, y) else {
        return;
    };
    match classify_tile(code) {
        Some(FieldTile::Marker(c)) => {
            place_centre(ctx.map, x, y, c, rank, 1);
            ctx.rate_of_growth.adjust(x, y, 8);
        }
        Some(FieldTile::FreeCentre) => {
            if population < ctx.params.field.farm_capacity {
                // Zone capacity not yet reached: build another farm.
                build_farm(ctx.map, ctx.rng, x, y, rank, ctx.params.field.tie_break_mask);
                ctx.rate_of_growth.adjust(x, y, 1);
            } else if ctx.population_density.0.world_get(x, y) > ctx.params.field.density_pressure {
                // Local demand for higher-density farming; needs a known crop.
                if let Some(crop) = crop {
                    place_centre(ctx.map, x, y, crop, rank, 1);
                    ctx.rate_of_growth.adjust(x, y, 8);
                }
            }
        }
        Some(FieldTile::Mature { crop: c, tier, .. }) if tier < 4 => {
            place_centre(ctx.map, x, y, c, rank, tier + 1);
            ctx.rate_of_growth.adjust(x, y, 8);
        }
        // Lots, farms, maxed-out centres, foreign tiles: no state change.
        _ => {}
    }
}

/// Column-major 3x3 scan position to row-major lot slot.
const SERPENTINE: [u16; 9] = [0, 3, 6, 1, 4, 7, 2, 5, 8];

/// Retreats the zone at (x, y) one step. Under the reduced policy this is the
/// single mature-to-marker transition; under the full policy it walks the
/// ladder downward: tier drop, collapse into individual farms, then farm
/// removal. Never moves more than one step per call.
pub fn degrade_zone(ctx: &mut FieldScan, x: i32, y: i32, population: u16, rank: u8) {
    let Some(code) = ctx.map.get_value(x, y) else {
        return;
    };
    let tile = classify_tile(code);

    if ctx.params.field.growth_policy == GrowthPolicy::Reduced {
        if let Some(FieldTile::Mature { crop, .. }) = tile {
            let marker = encode_tile(FieldTile::Marker(crop));
            ctx.map.set_tile(x, y, marker, BURN_BIT | HIGHLIGHT_BIT | ZONE_BIT);
            trace!("field zone at ({x}, {y}) degraded to {crop:?} marker");
        }
        return;
    }

    match tile {
        Some(FieldTile::Mature { crop, tier, .. }) if tier > 1 => {
            place_centre(ctx.map, x, y, crop, rank, tier - 1);
            ctx.rate_of_growth.adjust(x, y, -8);
        }
        Some(FieldTile::Mature { .. }) => {
            // Lowest tier: collapse into a free zone of individual farms.
            ctx.map.set_tile(x, y, FREE_FIELD, BULL_BIT | BURN_BIT | ZONE_BIT);
            for yy in y - 1..=y + 1 {
                for xx in x - 1..=x + 1 {
                    if xx == x && yy == y {
                        continue;
                    }
                    let farm = FARM_BASE + ctx.rng.get_random(2) as u16 + rank as u16 * 3;
                    ctx.map.set_tile(xx, yy, farm, BULL_BIT | BURN_BIT);
                }
            }
            ctx.rate_of_growth.adjust(x, y, -8);
            trace!("field zone at ({x}, {y}) collapsed to individual farms");
        }
        Some(FieldTile::FreeCentre) => {
            if population == 0 {
                return;
            }
            // Already down to individual farms: remove one.
            ctx.rate_of_growth.adjust(x, y, -1);
            let mut i = 0;
            for xx in x - 1..=x + 1 {
                for yy in y - 1..=y + 1 {
                    if let Some(value) = ctx.map.get_value(xx, yy) {
                        if (FARM_BASE..=LAST_FARM).contains(&value) {
                            let lot = FIELD_BASE + SERPENTINE[i];
                            ctx.map.set_tile(xx, yy, lot, BULL_BIT | BURN_BIT);
                            return;
                        }
                    }
                    i += 1;
                }
            }
        }
        // Markers are the terminal state; everything else is foreign.
        _ => {}
    }
}

/// Per-tile callback invoked by the scanner for every field-zone centre.
pub fn field_found(ctx: &mut FieldScan, x: i32, y: i32) {
    ctx.census.field_zones += 1;

    let Some(code) = ctx.map.get_value(x, y) else {
        return;
    };
    let tile = classify_tile(code);

    // Recover the crop chosen at placement time from the recorded tool cost,
    // falling back to whatever crop the tile already encodes.
    let crop = crop_for_cost(ctx.costs.get(x, y)).or(match tile {
        Some(FieldTile::Marker(c)) | Some(FieldTile::Mature { crop: c, .. }) => Some(c),
        _ => None,
    });

    let code = match (tile, crop) {
        // Fresh zone centre: stamp the crop's mature tile.
        (Some(FieldTile::Lot { .. }), Some(c)) | (None, Some(c)) => {
            let stamped = encode_tile(FieldTile::Mature {
                crop: c,
                rank: 0,
                tier: 1,
            });
            ctx.map
                .set_tile(x, y, stamped, BURN_BIT | HIGHLIGHT_BIT | ZONE_BIT);
            stamped
        }
        // Already crop-specific: refresh the overlay mask only. Re-stamping
        // the tier-1 code here would reset an established centre's density
        // tier every visit and the ladder could never climb.
        (Some(FieldTile::Marker(_)), _) | (Some(FieldTile::Mature { .. }), _) => {
            ctx.map
                .set_tile(x, y, code, BURN_BIT | HIGHLIGHT_BIT | ZONE_BIT);
            code
        }
        _ => code,
    };

    let population = zone_population(ctx.map, x, y, code);
    ctx.census.field_population += population as u32;

    if ctx.budget.should_degrade_fields() {
        let rank = land_pollution_rank(ctx.land_value, ctx.pollution, x, y);
        degrade_zone(ctx, x, y, population, rank);
        return;
    }

    if ctx.params.field.growth_policy == GrowthPolicy::Reduced {
        return;
    }

    // Occasionally verify the zone is still connected to the road network.
    // The check fires more often as population rises and never for an empty
    // zone, since zero exceeds no draw.
    let mut traffic = TrafficResult::RouteFound;
    if population as i32 > ctx.rng.get_random(ctx.params.field.traffic_check_span) {
        traffic = ctx.traffic.probe(x, y);
        if traffic == TrafficResult::NoRoadFound {
            // No road access: move out.
            let rank = land_pollution_rank(ctx.land_value, ctx.pollution, x, y);
            degrade_zone(ctx, x, y, population, rank);
            return;
        }
    }

    // Assess the zone occasionally, but always when it holds only individual
    // farms.
    let assess = matches!(classify_tile(code), Some(FieldTile::FreeCentre))
        || ctx.rng.get_chance(ctx.params.field.assess_mask);
    if !assess {
        return;
    }

    let score = ctx.valves.field() + eval_field(ctx.land_value, ctx.pollution, x, y, traffic);
    let window = ctx.params.field.score_window;
    let bias = ctx.params.field.score_bias;

    let draw = ctx.rng.get_random16_signed();
    if score_triggers_growth(score, draw, window, bias) {
        let rank = land_pollution_rank(ctx.land_value, ctx.pollution, x, y);
        grow_zone(ctx, x, y, population, rank, crop);
        return;
    }

    let draw = ctx.rng.get_random16_signed();
    if score_triggers_degrade(score, draw, window, bias) {
        let rank = land_pollution_rank(ctx.land_value, ctx.pollution, x, y);
        degrade_zone(ctx, x, y, population, rank);
    }
}

/// One whole scan pass: clears the per-pass census and visits every
/// field-zone centre. Fresh lot centres are recognised by their zone flag;
/// established centres by code alone.
pub fn run_field_scan(ctx: &mut FieldScan) {
    ctx.census.begin_pass();
    for y in 0..ctx.map.height as i32 {
        for x in 0..ctx.map.width as i32 {
            let Some(raw) = ctx.map.get_raw(x, y) else {
                continue;
            };
            let code = raw & TILE_CODE_MASK;
            let fresh_centre = raw & ZONE_BIT != 0
                && matches!(classify_tile(code), Some(FieldTile::Lot { .. }));
            if is_field_zone_centre(code) || fresh_centre {
                field_found(ctx, x, y);
            }
        }
    }
}

/// The scanner registration: walks the grid on the shared scan cadence and
/// dispatches [`field_found`] per centre tile.
#[allow(clippy::too_many_arguments)]
pub fn scan_field_zones(
    timer: Res<crate::ScanTimer>,
    mut map: ResMut<TileGrid>,
    land_value: Res<LandValueMap>,
    pollution: Res<PollutionMap>,
    population_density: Res<PopulationDensityMap>,
    mut rate_of_growth: ResMut<RateOfGrowthMap>,
    costs: Res<CostMap>,
    mut census: ResMut<Census>,
    valves: Res<Valves>,
    budget: Res<FieldBudget>,
    params: Res<GameParams>,
    mut rng: ResMut<SimRng>,
    traffic: Res<TrafficProbe>,
) {
    if !timer.should_run() {
        return;
    }

    let mut ctx = FieldScan {
        map: &mut map,
        land_value: &land_value,
        pollution: &pollution,
        population_density: &population_density,
        rate_of_growth: &mut rate_of_growth,
        costs: &costs,
        census: &mut census,
        valves: &valves,
        budget: &budget,
        params: &params,
        rng: &mut rng,
        traffic: &traffic,
    };
    run_field_scan(&mut ctx);

    debug!(
        "field scan: {} zone centres, population {}",
        census.field_zones, census.field_population
    );
}

pub struct FieldZonesPlugin;

impl Plugin for FieldZonesPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<crate::ScanTimer>()
            .init_resource::<TileGrid>()
            .init_resource::<LandValueMap>()
            .init_resource::<PollutionMap>()
            .init_resource::<PopulationDensityMap>()
            .init_resource::<RateOfGrowthMap>()
            .init_resource::<CostMap>()
            .init_resource::<Census>()
            .init_resource::<Valves>()
            .init_resource::<FieldBudget>()
            .init_resource::<GameParams>()
            .init_resource::<SimRng>()
            .init_resource::<TrafficProbe>()
            .add_systems(FixedUpdate, scan_field_zones.after(crate::tick_scan_timer));
    }
}
