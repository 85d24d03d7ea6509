use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::location::{Location, Schedule};

/// A delivery request. Requesters stay anonymous, so there are no identity fields.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Request {
    pub timestamp: NaiveDateTime,
    pub location: Location,
    pub services: String,
    pub request_type: String,
    pub schedule: Schedule,
    pub languages: String,
    pub reimbursement: String,
}
