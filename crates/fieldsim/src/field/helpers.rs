use crate::block_map::{LandValueMap, PollutionMap};
use crate::grid::TileGrid;
use crate::sim_rng::SimRng;
use crate::tiles::{
    classify_tile, zone_centre_population, FieldTile, BULL_BIT, BURN_BIT, DIRT, FARM_BASE,
    FIELD_BASE, LAST_LOT, LAST_ROAD,
};
use crate::traffic::TrafficResult;

/// Assesses a lot tile for farm suitability. Prefers lots near roads without
/// requiring one: base score 1, plus 1 per orthogonal road neighbour.
/// Returns the sentinel -1 for out-of-bounds coordinates and for any tile
/// outside the 9-code field-lot range.
pub fn eval_lot(map: &TileGrid, x: i32, y: i32) -> i16 {
    const X_DELTA: [i32; 4] = [0, 1, 0, -1];
    const Y_DELTA: [i32; 4] = [-1, 0, 1, 0];

    let Some(code) = map.get_value(x, y) else {
        return -1;
    };
    if !(FIELD_BASE..=LAST_LOT).contains(&code) {
        return -1;
    }

    let mut score = 1;
    for i in 0..4 {
        if let Some(edge) = map.get_value(x + X_DELTA[i], y + Y_DELTA[i]) {
            if edge != DIRT && edge <= LAST_ROAD {
                score += 1;
            }
        }
    }
    score
}

/// Picks the best lot in the 3x3 window around (x, y) and builds an
/// individual farm there. The centre is deliberately index 0: when it wins,
/// nothing is written. Equal scores displace the leader only on a
/// 1-in-(tie_break_mask + 1) roll so repeated calls don't always pick the
/// same lot.
pub fn build_farm(
    map: &mut TileGrid,
    rng: &mut SimRng,
    x: i32,
    y: i32,
    rank: u8,
    tie_break_mask: u16,
) {
    // Centre, then orthogonal, then diagonal.
    const X_DELTA: [i32; 9] = [0, 0, 1, 0, -1, -1, 1, -1, 1];
    const Y_DELTA: [i32; 9] = [0, -1, 0, 1, 0, -1, -1, 1, 1];

    let mut best = 0;
    let mut best_score = 0;
    for i in 0..9 {
        let score = eval_lot(map, x + X_DELTA[i], y + Y_DELTA[i]);
        if score > best_score {
            best_score = score;
            best = i;
        } else if score == best_score && rng.get_chance(tie_break_mask) {
            best = i;
        }
    }

    if best > 0 {
        let (bx, by) = (x + X_DELTA[best], y + Y_DELTA[best]);
        if map.in_bounds(bx, by) {
            let code = FARM_BASE + rng.get_random(2) as u16 + rank as u16 * 3;
            map.set_tile(bx, by, code, BULL_BIT | BURN_BIT);
        }
    }
}

/// Current occupancy of the zone centred at (x, y), usable by other zone
/// types as well. A mature centre derives population from its density tier;
/// everything else in the field ranges counts farm and crop-marker tiles in
/// the 3x3 window, centre included. Non-field codes report 0.
pub fn zone_population(map: &TileGrid, x: i32, y: i32, code: u16) -> u16 {
    match classify_tile(code) {
        Some(FieldTile::Mature { tier, .. }) => zone_centre_population(tier),
        Some(_) => free_zone_population(map, x, y),
        None => 0,
    }
}

fn free_zone_population(map: &TileGrid, x: i32, y: i32) -> u16 {
    let mut count = 0;
    for xx in x - 1..=x + 1 {
        for yy in y - 1..=y + 1 {
            if let Some(code) = map.get_value(xx, yy) {
                if matches!(
                    classify_tile(code),
                    Some(FieldTile::Farm { .. }) | Some(FieldTile::Marker(_))
                ) {
                    count += 1;
                }
            }
        }
    }
    count
}

/// Desirability of the zone at (x, y) in [-3000, 3000]: land value minus
/// pollution, scaled. An isolated zone (no road found) is never desirable and
/// pins to -3000.
pub fn eval_field(
    land_value: &LandValueMap,
    pollution: &PollutionMap,
    x: i32,
    y: i32,
    traffic: TrafficResult,
) -> i32 {
    if traffic == TrafficResult::NoRoadFound {
        return -3000;
    }

    let mut value = land_value.0.world_get(x, y) as i32 - pollution.0.world_get(x, y) as i32;
    if value < 0 {
        value = 0;
    } else {
        value = (value * 32).min(6000);
    }
    value - 3000
}

/// Land-pollution quality index in 0..=3, selecting which tile-code sub-run
/// a placement uses. Higher is better.
pub fn land_pollution_rank(
    land_value: &LandValueMap,
    pollution: &PollutionMap,
    x: i32,
    y: i32,
) -> u8 {
    let diff = land_value.0.world_get(x, y) as i32 - pollution.0.world_get(x, y) as i32;
    if diff < 30 {
        0
    } else if diff < 80 {
        1
    } else if diff < 150 {
        2
    } else {
        3
    }
}

/// Biased growth roll. The zone score lies in [-5500, 5000] (valve plus
/// desirability), so `score - bias` lies in [-31880, -21380] for the default
/// bias: about 9% of signed 16-bit draws fall below the whole range and can
/// always trigger growth, while roughly 82% lie above it and never can.
pub fn score_triggers_growth(score: i32, draw: i32, window: i32, bias: i32) -> bool {
    score > -window && score - bias > draw
}

/// Biased degrade roll, the mirror image: `score + bias` lies well inside the
/// positive draw range, leaving under 1% of draws able to trigger decay.
pub fn score_triggers_degrade(score: i32, draw: i32, window: i32, bias: i32) -> bool {
    score < window && score + bias < draw
}
