use std::fmt;
use std::sync::LazyLock;

use tracing::debug;

use super::status::{
    Classification, Status, HINT_CENSORSHIP, HINT_DNS, HINT_HTTP_DIFF, HINT_HTTP_FAILURE,
    HINT_MEASUREMENT_ERROR, HINT_SITE_DOWN, HINT_TCP_IP,
};
use crate::measurement::{Accessible, Blocking, BlockingMethod, MeasurementOutcome};

static WEB_CONNECTIVITY: LazyLock<RuleSet> = LazyLock::new(RuleSet::web_connectivity);

/// A single classification rule: a predicate and the verdict it yields.
#[derive(Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    pub applies: fn(&MeasurementOutcome) -> bool,
    pub verdict: fn(&MeasurementOutcome) -> Classification,
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule").field("name", &self.name).finish()
    }
}

/// Ordered list of rules. Rules are evaluated in order, first match wins;
/// predicates may overlap, so order is part of the contract.
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<Rule>,
    fallback: Classification,
}

impl RuleSet {
    pub fn new(rules: Vec<Rule>, fallback: Classification) -> Self {
        Self { rules, fallback }
    }

    /// Rules for web-connectivity measurements:
    ///
    /// 1. `measurement-error`: `blocking` is null and `accessible` is true or null
    /// 2. `site-down`: `accessible` is false and `blocking` is null or false
    /// 3. `blocking-detected`: `blocking` is neither null nor false
    ///
    /// Anything else (`blocking: false` with a reachable or unknown target) falls
    /// back to "no anomaly".
    pub fn web_connectivity() -> Self {
        Self::new(
            vec![
                Rule {
                    name: "measurement-error",
                    applies: |o| o.blocking.is_null() && o.accessible != Accessible::No,
                    verdict: measurement_error,
                },
                Rule {
                    name: "site-down",
                    applies: |o| o.accessible == Accessible::No && o.blocking.is_clear(),
                    verdict: |_| Classification::anomaly(Status::SiteDown, HINT_SITE_DOWN),
                },
                Rule {
                    name: "blocking-detected",
                    applies: |o| !o.blocking.is_clear(),
                    verdict: blocking_detected,
                },
            ],
            Classification::no_anomaly(),
        )
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn fallback(&self) -> Classification {
        self.fallback
    }

    pub fn evaluate(&self, outcome: &MeasurementOutcome) -> Classification {
        self.evaluate_traced(outcome).0
    }

    /// Like [`RuleSet::evaluate`], also returning the name of the rule that
    /// matched (`None` when the fallback applied).
    pub fn evaluate_traced(
        &self,
        outcome: &MeasurementOutcome,
    ) -> (Classification, Option<&'static str>) {
        self.rules
            .iter()
            .find(|rule| (rule.applies)(outcome))
            .map(|rule| ((rule.verdict)(outcome), Some(rule.name)))
            .unwrap_or((self.fallback, None))
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::web_connectivity()
    }
}

fn measurement_error(outcome: &MeasurementOutcome) -> Classification {
    // A reachable site with no control verdict is still reported as a
    // measurement error, labelled SITEUP.
    let status = match outcome.accessible {
        Accessible::Yes => Status::SiteUp,
        Accessible::No | Accessible::Unknown => Status::Unknown,
    };
    Classification::anomaly(status, HINT_MEASUREMENT_ERROR)
}

fn blocking_detected(outcome: &MeasurementOutcome) -> Classification {
    match &outcome.blocking {
        Blocking::Blocked(BlockingMethod::Dns) => Classification::anomaly(Status::Dns, HINT_DNS),
        Blocking::Blocked(BlockingMethod::HttpDiff) => {
            Classification::anomaly(Status::HttpDiff, HINT_HTTP_DIFF)
        }
        Blocking::Blocked(BlockingMethod::HttpFailure) => {
            Classification::anomaly(Status::HttpFailure, HINT_HTTP_FAILURE)
        }
        Blocking::Blocked(BlockingMethod::TcpIp) => {
            Classification::anomaly(Status::TcpIp, HINT_TCP_IP)
        }
        Blocking::Blocked(BlockingMethod::Unspecified | BlockingMethod::Other(_))
        | Blocking::Null
        | Blocking::NotBlocked => Classification::anomaly(Status::Censorship, HINT_CENSORSHIP),
    }
}

/// Classify a web-connectivity outcome. Total and pure.
pub fn classify(outcome: &MeasurementOutcome) -> Classification {
    let (classification, rule) = WEB_CONNECTIVITY.evaluate_traced(outcome);
    debug!(
        accessible = ?outcome.accessible,
        blocking = ?outcome.blocking,
        rule = rule.unwrap_or("fallback"),
        status = classification.status.map(|s| s.as_str()).unwrap_or("null"),
        "measurement classified"
    );
    classification
}
