use std::fmt;

use serde::Serialize;

pub const HINT_NO_CENSORSHIP: &str = "No Censorship Detected";
pub const HINT_MEASUREMENT_ERROR: &str = "Error In Measurement";
pub const HINT_SITE_DOWN: &str = "Site Unavailable";
pub const HINT_CENSORSHIP: &str = "Evidence of Possible Censorship";
pub const HINT_DNS: &str = "DNS Based Blocking";
pub const HINT_HTTP_DIFF: &str = "Different HTTP Response";
pub const HINT_HTTP_FAILURE: &str = "HTTP Request Failed";
pub const HINT_TCP_IP: &str = "TCP/IP Based Blocking";

/// Anomaly label attached to a measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Status {
    #[serde(rename = "SITEUP")]
    SiteUp,
    #[serde(rename = "UNKNOWN")]
    Unknown,
    #[serde(rename = "SITEDOWN")]
    SiteDown,
    #[serde(rename = "CENSORSHIP")]
    Censorship,
    #[serde(rename = "DNS")]
    Dns,
    #[serde(rename = "HTTPDIFF")]
    HttpDiff,
    #[serde(rename = "HTTPFAILURE")]
    HttpFailure,
    #[serde(rename = "TCPIP")]
    TcpIp,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::SiteUp => "SITEUP",
            Status::Unknown => "UNKNOWN",
            Status::SiteDown => "SITEDOWN",
            Status::Censorship => "CENSORSHIP",
            Status::Dns => "DNS",
            Status::HttpDiff => "HTTPDIFF",
            Status::HttpFailure => "HTTPFAILURE",
            Status::TcpIp => "TCPIP",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Presentation-level flag derived from a [`Classification`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Reachability {
    Reachable,
    Anomaly,
}

impl Reachability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Reachability::Reachable => "reachable",
            Reachability::Anomaly => "anomaly",
        }
    }
}

impl fmt::Display for Reachability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of classifying one measurement. `status: None` means no anomaly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Classification {
    pub status: Option<Status>,
    pub hint: &'static str,
}

impl Classification {
    pub const fn new(status: Option<Status>, hint: &'static str) -> Self {
        Self { status, hint }
    }

    pub const fn anomaly(status: Status, hint: &'static str) -> Self {
        Self::new(Some(status), hint)
    }

    pub const fn no_anomaly() -> Self {
        Self::new(None, HINT_NO_CENSORSHIP)
    }

    pub fn reachability(&self) -> Reachability {
        if self.status.is_some() {
            Reachability::Anomaly
        } else {
            Reachability::Reachable
        }
    }
}

impl Default for Classification {
    fn default() -> Self {
        Self::no_anomaly()
    }
}
