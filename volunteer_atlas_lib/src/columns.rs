// Worksheet headers as they appear in the upstream sheet.

pub const VOLUNTEERS_WORKSHEET: &str = "Volunteers";
pub const REQUESTS_WORKSHEET: &str = "Requests";

pub const TIMESTAMP: &str = "Timestamp";
pub const GIVEN_NAME: &str = "Given Name";
pub const EMAIL_ADDRESS: &str = "Email Address";
pub const COUNTRY: &str = "Country";
pub const CITY: &str = "City/Town";
pub const LATITUDE: &str = "Latitude";
// Misspelled upstream
pub const LONGITUDE: &str = "Longtitude";
pub const LONGITUDE_FALLBACK: &str = "Longitude";
pub const SERVICES: &str = "Type of Services";
pub const REQUEST_TYPE: &str = "Type of Request";
pub const TRANSPORTATION: &str = "Mode of Transportation";
pub const RADIUS: &str = "Radius";
pub const DAY_OF_WEEK: &str = "Preferred Day of Week";
pub const TIME_OF_DAY: &str = "Preferred Time of Day";
pub const LANGUAGES: &str = "Languages Spoken";
pub const REIMBURSEMENT: &str = "Reimbursement Method";
pub const ABOUT_ME: &str = "About Me";
pub const HEALTH: &str = "Health";
pub const AVAILABILITY: &str = "Availability";
