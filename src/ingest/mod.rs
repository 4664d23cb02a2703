pub mod report;

pub use report::{discover_reports, load_samples};
