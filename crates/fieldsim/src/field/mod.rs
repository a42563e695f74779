mod helpers;
mod systems;

pub use helpers::{
    build_farm, eval_field, eval_lot, land_pollution_rank, score_triggers_degrade,
    score_triggers_growth, zone_population,
};
pub use systems::{
    degrade_zone, field_found, grow_zone, run_field_scan, scan_field_zones, FieldScan,
    FieldZonesPlugin,
};
