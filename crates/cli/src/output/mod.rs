pub mod banner;
pub mod confirm;
mod format;
pub mod spinner;
mod table;
pub mod theme;

pub use format::{print_json, print_success, print_yaml, OutputMode};
pub use table::{build_table, condition_table};
