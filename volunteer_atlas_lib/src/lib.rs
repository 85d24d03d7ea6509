pub mod category;
pub mod columns;
pub mod location;
pub mod request;
pub mod text;
pub mod volunteer;

/// Sheet value marking a volunteer as healthy or available.
pub const AFFIRMATIVE: &str = "Yes";
