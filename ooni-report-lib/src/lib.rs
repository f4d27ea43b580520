#![forbid(unsafe_code)]

pub mod classify;
pub mod config;
pub mod error;
pub mod measurement;
pub mod report;
pub mod telemetry;

pub use classify::{classify, Classification, Reachability, Rule, RuleSet, Status};
pub use config::{load_from_path, Config, OutputFormat};
pub use error::{ReportError, Result};
pub use measurement::{
    parse_measurement, read_measurement, Accessible, Blocking, BlockingMethod, Measurement,
    MeasurementOutcome, TestKeys,
};
pub use report::Summary;
