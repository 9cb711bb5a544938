//! Rendering module for writing reports.

mod json;

pub use json::{to_json, write_report, JsonFormat};
