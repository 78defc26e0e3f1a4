mod models;
mod options;

pub use models::*;
pub use options::{reading_level_options, summary_length_options, OptionEntry, INTEREST_CATEGORIES};
