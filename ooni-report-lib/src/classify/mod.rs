mod rules;
mod status;

pub use rules::{classify, Rule, RuleSet};
pub use status::{
    Classification, Reachability, Status, HINT_CENSORSHIP, HINT_DNS, HINT_HTTP_DIFF,
    HINT_HTTP_FAILURE, HINT_MEASUREMENT_ERROR, HINT_NO_CENSORSHIP, HINT_SITE_DOWN, HINT_TCP_IP,
};
