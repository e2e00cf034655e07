use regex::Regex;
use std::sync::OnceLock;

// Local part and domain labels follow the RFC 5322 "dot-atom" shape, lower-case only.
const EMAIL_PATTERN: &str = r"[-a-z0-9!#$%&'*+/=?^_`{|}~]+(?:\.[-a-z0-9!#$%&'*+/=?^_`{|}~]+)*@(?:[a-z0-9](?:[a-z0-9-]*[a-z0-9])?\.)+[a-z0-9](?:[a-z0-9-]*[a-z0-9])?";

const NUMERIC_PATTERN: &str = r"^[0-9]+$";

/// Validation rules attached to a field when its schema is declared.
///
/// Absent rules (`false` / `None`) are treated as satisfied.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RuleSet {
    pub required: bool,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub is_email: bool,
    pub is_numeric: bool,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn min_length(mut self, n: usize) -> Self {
        self.min_length = Some(n);
        self
    }

    pub fn max_length(mut self, n: usize) -> Self {
        self.max_length = Some(n);
        self
    }

    pub fn email(mut self) -> Self {
        self.is_email = true;
        self
    }

    pub fn numeric(mut self) -> Self {
        self.is_numeric = true;
        self
    }
}

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("email pattern compiles"))
}

fn numeric_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(NUMERIC_PATTERN).expect("numeric pattern compiles"))
}

/// Check `value` against `rules`. A field without rules is always valid.
///
/// Every present rule is evaluated and the results are AND-ed together.
/// Lengths count chars; a zero length threshold counts as no rule.
pub fn validate(value: &str, rules: Option<&RuleSet>) -> bool {
    let Some(rules) = rules else {
        return true;
    };
    let len = value.chars().count();
    let mut valid = true;

    if rules.required {
        valid = !value.trim().is_empty() && valid;
    }
    if let Some(min) = rules.min_length.filter(|n| *n > 0) {
        valid = len >= min && valid;
    }
    if let Some(max) = rules.max_length.filter(|n| *n > 0) {
        valid = len <= max && valid;
    }
    if rules.is_email {
        valid = email_regex().is_match(value) && valid;
    }
    if rules.is_numeric {
        valid = numeric_regex().is_match(value) && valid;
    }
    valid
}
