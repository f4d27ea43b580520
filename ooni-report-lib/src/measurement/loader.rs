use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{ReportError, Result};
use crate::measurement::Measurement;

pub fn parse_measurement(txt: &str) -> Result<Measurement> {
    serde_json::from_str(txt)
        .map_err(|e| ReportError::Parse(format!("Failed to parse measurement: {e}")))
}

pub fn read_measurement<P: AsRef<Path>>(p: P) -> Result<Measurement> {
    let path = p.as_ref();
    let txt = fs::read_to_string(path)?;
    let measurement = parse_measurement(&txt)?;
    debug!(
        path = %path.display(),
        report_id = measurement.report_id.as_deref().unwrap_or("-"),
        "measurement loaded"
    );
    Ok(measurement)
}
