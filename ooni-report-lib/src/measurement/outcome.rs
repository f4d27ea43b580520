use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use tracing::warn;

/// Whether the target answered from the vantage point.
///
/// Wire values are `true`, `false` and `null`. A missing key, or a value of any
/// other JSON type, reads as [`Accessible::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Accessible {
    Yes,
    No,
    #[default]
    Unknown,
}

impl From<Option<bool>> for Accessible {
    fn from(value: Option<bool>) -> Self {
        match value {
            Some(true) => Accessible::Yes,
            Some(false) => Accessible::No,
            None => Accessible::Unknown,
        }
    }
}

impl From<Accessible> for Option<bool> {
    fn from(value: Accessible) -> Self {
        match value {
            Accessible::Yes => Some(true),
            Accessible::No => Some(false),
            Accessible::Unknown => None,
        }
    }
}

impl<'de> Deserialize<'de> for Accessible {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Null => Ok(Accessible::Unknown),
            Value::Bool(b) => Ok(Accessible::from(Some(b))),
            other => {
                warn!(value = %other, "unexpected `accessible` value, treating as null");
                Ok(Accessible::Unknown)
            }
        }
    }
}

impl Serialize for Accessible {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        Option::<bool>::from(*self).serialize(serializer)
    }
}

/// Mechanism named by a control-derived blocking verdict.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BlockingMethod {
    Dns,
    HttpDiff,
    HttpFailure,
    TcpIp,
    /// `blocking: true` with no mechanism attached.
    Unspecified,
    Other(String),
}

impl BlockingMethod {
    pub fn parse(value: &str) -> Self {
        match value {
            "dns" => BlockingMethod::Dns,
            "http-diff" => BlockingMethod::HttpDiff,
            "http-failure" => BlockingMethod::HttpFailure,
            "tcp-ip" => BlockingMethod::TcpIp,
            other => BlockingMethod::Other(other.to_string()),
        }
    }

    /// Wire spelling, `None` for [`BlockingMethod::Unspecified`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            BlockingMethod::Dns => Some("dns"),
            BlockingMethod::HttpDiff => Some("http-diff"),
            BlockingMethod::HttpFailure => Some("http-failure"),
            BlockingMethod::TcpIp => Some("tcp-ip"),
            BlockingMethod::Unspecified => None,
            BlockingMethod::Other(s) => Some(s),
        }
    }
}

/// Control-derived blocking verdict.
///
/// `null` and `false` are distinct on the wire and the classifier treats them
/// differently, so both are kept. Anything that is neither is a
/// [`Blocking::Blocked`] verdict, including unknown strings and the empty string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Blocking {
    #[default]
    Null,
    NotBlocked,
    Blocked(BlockingMethod),
}

impl Blocking {
    pub fn is_null(&self) -> bool {
        matches!(self, Blocking::Null)
    }

    /// `null` or `false`.
    pub fn is_clear(&self) -> bool {
        matches!(self, Blocking::Null | Blocking::NotBlocked)
    }

    pub fn method(&self) -> Option<&BlockingMethod> {
        match self {
            Blocking::Blocked(method) => Some(method),
            _ => None,
        }
    }
}

impl From<&str> for Blocking {
    fn from(value: &str) -> Self {
        Blocking::Blocked(BlockingMethod::parse(value))
    }
}

impl<'de> Deserialize<'de> for Blocking {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Null => Ok(Blocking::Null),
            Value::Bool(false) => Ok(Blocking::NotBlocked),
            Value::Bool(true) => Ok(Blocking::Blocked(BlockingMethod::Unspecified)),
            Value::String(s) => Ok(Blocking::from(s.as_str())),
            other => {
                warn!(value = %other, "unexpected `blocking` value, treating as null");
                Ok(Blocking::Null)
            }
        }
    }
}

impl Serialize for Blocking {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Blocking::Null => serializer.serialize_none(),
            Blocking::NotBlocked => serializer.serialize_bool(false),
            Blocking::Blocked(method) => match method.as_str() {
                Some(s) => serializer.serialize_str(s),
                None => serializer.serialize_bool(true),
            },
        }
    }
}

/// The two measurement fields the classifier reads.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct MeasurementOutcome {
    #[serde(default)]
    pub accessible: Accessible,
    #[serde(default)]
    pub blocking: Blocking,
}

impl MeasurementOutcome {
    pub fn new(accessible: Accessible, blocking: Blocking) -> Self {
        Self { accessible, blocking }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_string_is_a_blocking_verdict() {
        assert_eq!(
            Blocking::from(""),
            Blocking::Blocked(BlockingMethod::Other(String::new()))
        );
    }

    #[test]
    fn known_methods_keep_their_wire_spelling() {
        for s in ["dns", "http-diff", "http-failure", "tcp-ip", "mitm"] {
            assert_eq!(BlockingMethod::parse(s).as_str(), Some(s));
        }
        assert_eq!(BlockingMethod::Unspecified.as_str(), None);
    }

    #[test]
    fn clear_covers_null_and_false_only() {
        assert!(Blocking::Null.is_clear());
        assert!(Blocking::NotBlocked.is_clear());
        assert!(!Blocking::Blocked(BlockingMethod::Dns).is_clear());
        assert!(!Blocking::Blocked(BlockingMethod::Unspecified).is_clear());
    }
}
