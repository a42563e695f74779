//! Interface boundary to the traffic module: the field engine only needs a
//! connectivity probe, not the route search itself.

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrafficResult {
    RouteFound,
    NoRoadFound,
}

/// Connectivity probe injected by the surrounding simulation. The default
/// reports every zone as connected; tests and the real traffic system swap in
/// their own closure.
#[derive(Resource)]
pub struct TrafficProbe(pub Box<dyn Fn(i32, i32) -> TrafficResult + Send + Sync>);

impl Default for TrafficProbe {
    fn default() -> Self {
        Self(Box::new(|_, _| TrafficResult::RouteFound))
    }
}

impl TrafficProbe {
    pub fn fixed(result: TrafficResult) -> Self {
        Self(Box::new(move |_, _| result))
    }

    pub fn probe(&self, x: i32, y: i32) -> TrafficResult {
        (self.0)(x, y)
    }
}
