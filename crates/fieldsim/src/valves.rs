use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// City-wide demand valve range; per-tile scores add this on top of a
/// desirability score in [-3000, 3000].
pub const FIELD_VALVE_RANGE: i32 = 2000;

/// Global demand valves. Only the field valve lives here; the surrounding
/// simulation recomputes it from the rate-of-growth accumulator and city
/// statistics.
#[derive(Resource, Default, Debug, Clone, Serialize, Deserialize)]
pub struct Valves {
    field: i32,
}

impl Valves {
    pub fn field(&self) -> i32 {
        self.field
    }

    /// Writes are clamped so downstream score arithmetic stays within the
    /// range the biased-roll thresholds were designed for.
    pub fn set_field(&mut self, value: i32) {
        self.field = value.clamp(-FIELD_VALVE_RANGE, FIELD_VALVE_RANGE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valve_clamped() {
        let mut valves = Valves::default();
        valves.set_field(9999);
        assert_eq!(valves.field(), FIELD_VALVE_RANGE);
        valves.set_field(-9999);
        assert_eq!(valves.field(), -FIELD_VALVE_RANGE);
        valves.set_field(150);
        assert_eq!(valves.field(), 150);
    }
}
