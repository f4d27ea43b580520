mod loader;
mod outcome;
mod types;

pub use loader::{parse_measurement, read_measurement};
pub use outcome::{Accessible, Blocking, BlockingMethod, MeasurementOutcome};
pub use types::{
    DnsAnswer, DnsQuery, HttpBody, HttpRequest, HttpResponse, HttpTransaction, Measurement,
    TcpConnect, TcpStatus, TestKeys,
};
