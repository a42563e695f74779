use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Budget policy signal consumed each scan pass: when field funding has been
/// cut, field zones degrade this tick.
#[derive(Resource, Default, Debug, Clone, Serialize, Deserialize)]
pub struct FieldBudget {
    pub degrade_fields: bool,
}

impl FieldBudget {
    pub fn should_degrade_fields(&self) -> bool {
        self.degrade_fields
    }
}
