use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Per-pass census counters for field zones. Incremented only while a scan
/// pass runs; the scanner clears them at pass start.
#[derive(Resource, Default, Debug, Clone, Serialize, Deserialize)]
pub struct Census {
    pub field_zones: u32,
    pub field_population: u32,
}

impl Census {
    pub fn begin_pass(&mut self) {
        self.field_zones = 0;
        self.field_population = 0;
    }
}
