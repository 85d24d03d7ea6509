use serde::{Deserialize, Serialize};

use crate::columns::{REQUESTS_WORKSHEET, VOLUNTEERS_WORKSHEET};

/// The kinds of records shown on the map. Each one gets its own worksheet,
/// marker color and cluster layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Volunteers,
    Requests,
}

impl Category {
    pub fn worksheet(&self) -> &'static str {
        match self {
            Category::Volunteers => VOLUNTEERS_WORKSHEET,
            Category::Requests => REQUESTS_WORKSHEET,
        }
    }

    /// Name of the toggleable map layer.
    pub fn layer_name(&self) -> &'static str {
        match self {
            Category::Volunteers => "Volunteers",
            Category::Requests => "Requests",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Category::Volunteers => "#00d700",
            Category::Requests => "#d77a00",
        }
    }
}

#[test]
fn categories_are_distinguishable() {
    assert_ne!(Category::Volunteers.color(), Category::Requests.color());
    assert_eq!(Category::Volunteers.worksheet(), "Volunteers");
    assert_eq!(Category::Requests.layer_name(), "Requests");
}
