use geo_types::Point;
use serde::{Deserialize, Serialize};

/// Where a record sits. `position` is already jittered and is `None` when the
/// sheet had no coordinates for the row.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Location {
    pub country: String,
    pub city: String,
    pub position: Option<Point>,
}

impl Location {
    pub fn new(country: String, city: String, position: Option<Point>) -> Self {
        Self {
            country,
            city,
            position,
        }
    }

    pub fn latitude(&self) -> Option<f64> {
        self.position.map(|p| p.y())
    }

    pub fn longitude(&self) -> Option<f64> {
        self.position.map(|p| p.x())
    }
}

/// Preferred day and time as free text from the form.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct Schedule {
    pub day_of_week: String,
    pub time_of_day: String,
}
