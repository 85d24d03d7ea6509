use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::{location::{Location, Schedule}, AFFIRMATIVE};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Volunteer {
    pub timestamp: NaiveDateTime,
    pub given_name: String,
    pub email: String,
    pub location: Location,
    pub services: String,
    pub transportation: String,
    pub radius_km: f64,
    pub schedule: Schedule,
    pub languages: String,
    pub reimbursement: String,
    pub about_me: String,
    pub health: String,
    pub availability: String,
}

impl Volunteer {
    /// Only healthy and available volunteers are offered on the map.
    pub fn is_eligible(&self) -> bool {
        self.health == AFFIRMATIVE && self.availability == AFFIRMATIVE
    }
}
