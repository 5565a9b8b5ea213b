pub mod generator;
pub mod stats;

pub use generator::{render_week_report, write_week_report};
