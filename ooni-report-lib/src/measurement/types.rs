use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::outcome::{Accessible, Blocking, MeasurementOutcome};

/// A web-connectivity measurement document as published by the measurement API.
/// Keys not modelled here are ignored.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Measurement {
    /// Target URL
    #[serde(default)]
    pub input: Option<String>,
    #[serde(default)]
    pub report_id: Option<String>,
    #[serde(default)]
    pub test_name: Option<String>,
    /// Two-letter country code of the probe
    #[serde(default)]
    pub probe_cc: Option<String>,
    #[serde(default)]
    pub measurement_start_time: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub test_keys: TestKeys,
}

/// Test-specific results of a web-connectivity run
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TestKeys {
    #[serde(default)]
    pub accessible: Accessible,
    #[serde(default)]
    pub blocking: Blocking,
    #[serde(default, deserialize_with = "null_as_default")]
    pub queries: Vec<DnsQuery>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tcp_connect: Vec<TcpConnect>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub requests: Vec<HttpTransaction>,
    /// Resolver address seen by the probe
    #[serde(default)]
    pub client_resolver: Option<String>,
    #[serde(default)]
    pub http_experiment_failure: Option<String>,
    #[serde(default)]
    pub dns_experiment_failure: Option<String>,
    #[serde(default)]
    pub control_failure: Option<String>,
}

impl TestKeys {
    pub fn outcome(&self) -> MeasurementOutcome {
        MeasurementOutcome::new(self.accessible, self.blocking.clone())
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DnsQuery {
    #[serde(default, deserialize_with = "null_as_default")]
    pub hostname: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub query_type: String,
    #[serde(default)]
    pub engine: Option<String>,
    #[serde(default)]
    pub failure: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub answers: Vec<DnsAnswer>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DnsAnswer {
    #[serde(default, deserialize_with = "null_as_default")]
    pub answer_type: String,
    #[serde(default)]
    pub ipv4: Option<String>,
    #[serde(default)]
    pub hostname: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TcpConnect {
    #[serde(default, deserialize_with = "null_as_default")]
    pub ip: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub port: u16,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: TcpStatus,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TcpStatus {
    #[serde(default, deserialize_with = "null_as_default")]
    pub success: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub blocked: bool,
    #[serde(default)]
    pub failure: Option<String>,
}

/// One HTTP request/response pair. `failure` is set when no response arrived.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct HttpTransaction {
    #[serde(default)]
    pub failure: Option<String>,
    #[serde(default)]
    pub request: Option<HttpRequest>,
    #[serde(default)]
    pub response: Option<HttpResponse>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct HttpRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub method: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct HttpResponse {
    #[serde(default)]
    pub code: Option<u16>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub headers: Map<String, Value>,
    #[serde(default)]
    pub body: Option<HttpBody>,
}

/// Response body. Non-UTF-8 bodies arrive as `{"format": "base64", "data": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum HttpBody {
    Text(String),
    Encoded { format: String, data: String },
}

impl HttpBody {
    /// Text to display. Encoded bodies are shown in their encoded form.
    pub fn as_text(&self) -> &str {
        match self {
            HttpBody::Text(s) => s,
            HttpBody::Encoded { data, .. } => data,
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
