use serde::Serialize;
use serde_json::{Map, Value};

use crate::classify::{classify, Classification, Reachability};
use crate::config::OutputConfig;
use crate::measurement::{DnsQuery, HttpTransaction, Measurement, TcpConnect};

pub const UNKNOWN_RESOLVER: &str = "(unknown)";

/// Report data for one measurement, ready to render.
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub input: Option<String>,
    pub report_id: Option<String>,
    pub probe_cc: Option<String>,
    pub classification: Classification,
    pub reachability: Reachability,
    pub summary_text: &'static str,
    pub failures: Failures,
    pub resolver: String,
    pub dns: Vec<DnsEntry>,
    pub tcp: Vec<TcpEntry>,
    pub http: Vec<HttpEntry>,
}

/// Experiment failure strings; `None` means the step succeeded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Failures {
    pub http_experiment: Option<String>,
    pub dns_experiment: Option<String>,
    pub control: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DnsEntry {
    pub hostname: String,
    pub query_type: String,
    pub engine: Option<String>,
    pub failure: Option<String>,
    /// IPv4 addresses for A records, target names for CNAME records
    pub answers: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TcpState {
    Successful,
    Blocked,
    Failed,
}

impl TcpState {
    pub fn as_str(&self) -> &'static str {
        match self {
            TcpState::Successful => "successful",
            TcpState::Blocked => "blocked",
            TcpState::Failed => "failed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TcpEntry {
    pub destination: String,
    pub state: TcpState,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HttpEntry {
    pub method: String,
    pub url: String,
    pub status_code: Option<u16>,
    pub headers: Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    pub body_truncated: bool,
}

impl Summary {
    pub fn from_measurement(measurement: &Measurement, output: &OutputConfig) -> Self {
        let keys = &measurement.test_keys;
        let classification = classify(&keys.outcome());

        Self {
            input: measurement.input.clone(),
            report_id: measurement.report_id.clone(),
            probe_cc: measurement.probe_cc.clone(),
            classification,
            reachability: classification.reachability(),
            summary_text: classification.hint,
            failures: Failures {
                http_experiment: non_empty(&keys.http_experiment_failure),
                dns_experiment: non_empty(&keys.dns_experiment_failure),
                control: non_empty(&keys.control_failure),
            },
            resolver: non_empty(&keys.client_resolver)
                .unwrap_or_else(|| UNKNOWN_RESOLVER.to_string()),
            dns: keys.queries.iter().map(DnsEntry::from).collect(),
            tcp: keys.tcp_connect.iter().map(TcpEntry::from).collect(),
            http: keys
                .requests
                .iter()
                .filter_map(|tx| HttpEntry::from_transaction(tx, output))
                .collect(),
        }
    }
}

impl From<&DnsQuery> for DnsEntry {
    fn from(query: &DnsQuery) -> Self {
        let answers = query
            .answers
            .iter()
            .filter_map(|answer| match answer.answer_type.as_str() {
                "A" => answer.ipv4.clone(),
                "CNAME" => answer.hostname.clone(),
                _ => None,
            })
            .collect();

        Self {
            hostname: query.hostname.clone(),
            query_type: query.query_type.clone(),
            engine: query.engine.clone(),
            failure: non_empty(&query.failure),
            answers,
        }
    }
}

impl From<&TcpConnect> for TcpEntry {
    fn from(connection: &TcpConnect) -> Self {
        let state = if connection.status.success {
            TcpState::Successful
        } else if connection.status.blocked {
            TcpState::Blocked
        } else {
            TcpState::Failed
        };

        Self { destination: format!("{}:{}", connection.ip, connection.port), state }
    }
}

impl HttpEntry {
    /// Transactions that failed carry no response worth showing and are skipped.
    fn from_transaction(tx: &HttpTransaction, output: &OutputConfig) -> Option<Self> {
        if tx.failure.as_deref().is_some_and(|f| !f.is_empty()) {
            return None;
        }
        let request = tx.request.clone().unwrap_or_default();
        let response = tx.response.clone().unwrap_or_default();

        let (body, body_truncated) = match (&response.body, output.include_bodies) {
            (Some(body), true) => {
                let (text, truncated) = truncate(body.as_text(), output.max_body_bytes);
                (Some(text.to_string()), truncated)
            }
            _ => (None, false),
        };

        Some(Self {
            method: request.method,
            url: request.url,
            status_code: response.code,
            headers: response.headers,
            body,
            body_truncated,
        })
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|s| !s.is_empty()).cloned()
}

/// Cut `s` to at most `max` bytes without splitting a character.
fn truncate(s: &str, max: usize) -> (&str, bool) {
    if s.len() <= max {
        return (s, false);
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    (&s[..end], true)
}
