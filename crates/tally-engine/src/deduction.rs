//! Per-title duration adjustment policies.
//!
//! One business rule ships today: instances of "MarryBrown Dandenong (PC)"
//! lasting at least five hours lose half an hour each. Rules live in a
//! lookup table keyed by normalized title; additional entries are accepted
//! but none are shipped.

use std::collections::HashMap;

use crate::title::normalize_title;

/// Threshold/deduction pair applied to individual event instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeductionPolicy {
    /// Minimum raw duration for the deduction to apply.
    pub threshold_seconds: i64,
    /// Seconds removed from each qualifying instance.
    pub deduction_seconds: i64,
}

/// Lookup table mapping normalized titles to adjustment policies.
///
/// Evaluation is strictly per instance: within one group, instances above
/// the threshold are adjusted while instances below it pass through.
#[derive(Debug, Clone, Default)]
pub struct DeductionTable {
    rules: HashMap<String, DeductionPolicy>,
}

impl DeductionTable {
    /// An empty table: every adjusted duration equals the raw duration.
    pub fn new() -> Self {
        Self::default()
    }

    /// The shipped rule set: "MarryBrown Dandenong (PC)" instances of five
    /// hours or more are reduced by half an hour each.
    pub fn standard() -> Self {
        Self::new().with_rule(
            "MarryBrown Dandenong (PC)",
            DeductionPolicy {
                threshold_seconds: 5 * 3600,
                deduction_seconds: 1800,
            },
        )
    }

    /// Add a rule for `title`. The key is normalized, so any case or
    /// whitespace variant of the title selects the same policy.
    #[must_use]
    pub fn with_rule(mut self, title: &str, policy: DeductionPolicy) -> Self {
        self.rules.insert(normalize_title(Some(title)), policy);
        self
    }

    /// Look up the policy for a normalized title key, if any.
    pub fn policy_for(&self, key: &str) -> Option<&DeductionPolicy> {
        self.rules.get(key)
    }

    /// Adjusted duration for one instance.
    ///
    /// When a policy exists for `key` and `raw_seconds` meets its threshold,
    /// the deduction is subtracted and the result clamped at zero; otherwise
    /// the raw duration passes through unchanged.
    pub fn adjusted_seconds(&self, key: &str, raw_seconds: i64) -> i64 {
        match self.rules.get(key) {
            Some(policy) if raw_seconds >= policy.threshold_seconds => {
                (raw_seconds - policy.deduction_seconds).max(0)
            }
            _ => raw_seconds,
        }
    }
}
