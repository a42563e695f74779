//! Data-driven simulation parameters.
//!
//! Extracts the field-zone policy constants into a single [`GameParams`]
//! resource so they can be tuned at runtime without recompilation. The
//! defaults reproduce the reference policy numbers exactly; the biased-roll
//! constants in particular (`score_window`, `score_bias`) define the
//! grow/degrade probabilities and should not be changed casually.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Which decision policy the orchestrator runs after the budget check.
///
/// `Reduced` is the historically shipped wiring: crop resolution plus
/// degrade-on-budget-signal and nothing else. `Full` adds the traffic gate,
/// the biased grow/degrade rolls and the complete densification ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GrowthPolicy {
    Reduced,
    #[default]
    Full,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldZoneParams {
    pub growth_policy: GrowthPolicy,
    /// Local pollution above this hard-gates all growth.
    pub pollution_growth_gate: i16,
    /// Population-density pressure needed before a free zone densifies.
    pub density_pressure: i16,
    /// Individual farms a free zone accumulates before densifying.
    pub farm_capacity: u16,
    /// Zone scores within +/- this window are eligible for the biased rolls.
    pub score_window: i32,
    /// Offset applied to the zone score before comparing against a signed
    /// 16-bit draw; 26380 yields roughly 9% grow and under 1% degrade
    /// pressure across the designed score range.
    pub score_bias: i32,
    /// Mask for the 1-in-(mask+1) chance of assessing a non-empty zone.
    pub assess_mask: u16,
    /// Mask for the 1-in-(mask+1) chance of moving an equal-score farm lot.
    pub tie_break_mask: u16,
    /// Traffic is probed when population exceeds a draw in 0..=this span, so
    /// busier zones are checked more often and empty ones never.
    pub traffic_check_span: i32,
}

impl Default for FieldZoneParams {
    fn default() -> Self {
        Self {
            growth_policy: GrowthPolicy::default(),
            pollution_growth_gate: 128,
            density_pressure: 64,
            farm_capacity: 8,
            score_window: 350,
            score_bias: 26380,
            assess_mask: 7,
            tie_break_mask: 7,
            traffic_check_span: 35,
        }
    }
}

#[derive(Resource, Default, Debug, Clone, Serialize, Deserialize)]
pub struct GameParams {
    pub field: FieldZoneParams,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_policy() {
        let params = FieldZoneParams::default();
        assert_eq!(params.growth_policy, GrowthPolicy::Full);
        assert_eq!(params.pollution_growth_gate, 128);
        assert_eq!(params.density_pressure, 64);
        assert_eq!(params.farm_capacity, 8);
        assert_eq!(params.score_window, 350);
        assert_eq!(params.score_bias, 26380);
        assert_eq!(params.assess_mask, 7);
        assert_eq!(params.tie_break_mask, 7);
        assert_eq!(params.traffic_check_span, 35);
    }
}
