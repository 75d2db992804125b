//! Turning a class distribution into a verdict.
//!
//! With `p1` the top probability and `p2` the runner-up (0 for a single class), rules
//! are checked in order:
//!
//! 1. `p1 >= confident_at` -> [`Verdict::Confident`]
//! 2. `p1 - p2 < close_margin` -> [`Verdict::CloseCall`], top label kept
//! 3. `p1 < unknown_below` -> [`Verdict::Unknown`], label replaced by the unknown label
//! 4. otherwise -> [`Verdict::Moderate`]

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::classify::hits::Hits;
use crate::config::PolicyConfig;
use crate::selection::report::ConfidenceProfile;

pub const CONFIDENT_THRESHOLD: f64 = 0.60;
pub const CLOSE_CALL_MARGIN: f64 = 0.15;
pub const UNKNOWN_THRESHOLD: f64 = 0.45;
pub const SHORTLIST_LEN: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Confident,
    /// top two labels are too close to call apart
    CloseCall,
    Moderate,
    Unknown,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Verdict::Confident => "confident",
            Verdict::CloseCall => "close call",
            Verdict::Moderate => "moderate",
            Verdict::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

/// Outcome of one classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub label: String,
    /// probability of the top class, also when `label` is the unknown label
    pub confidence: f64,
    pub verdict: Verdict,
    /// best labels first
    pub shortlist: Vec<(String, f64)>,
    /// every class, in class order
    pub distribution: Vec<(String, f64)>,
    /// mean held-out confidence of the top class
    pub baseline: f64,
}

impl Prediction {
    /// Generic "could not classify" outcome.
    pub fn unclassified(unknown_label: &str) -> Self {
        Self {
            label: unknown_label.to_string(),
            confidence: 0.0,
            verdict: Verdict::Unknown,
            shortlist: Vec::new(),
            distribution: Vec::new(),
            baseline: 0.0,
        }
    }

    #[inline]
    pub fn is_unknown(&self) -> bool {
        self.verdict == Verdict::Unknown
    }
}

#[derive(Debug, Clone)]
pub struct ConfidencePolicy {
    config: PolicyConfig,
}

impl Default for ConfidencePolicy {
    fn default() -> Self {
        Self::new(PolicyConfig::default())
    }
}

impl ConfidencePolicy {
    pub fn new(config: PolicyConfig) -> Self {
        Self { config }
    }

    #[inline]
    pub fn config(&self) -> &PolicyConfig {
        &self.config
    }

    /// Verdict for top probability `p1` and runner-up `p2`.
    pub fn verdict(&self, p1: f64, p2: f64) -> Verdict {
        let c = &self.config;
        if p1 >= c.confident_at {
            Verdict::Confident
        } else if p1 - p2 < c.close_margin {
            Verdict::CloseCall
        } else if p1 < c.unknown_below {
            Verdict::Unknown
        } else {
            Verdict::Moderate
        }
    }

    /// Profile baseline for `label`, the neutral baseline when the profile lacks it.
    pub fn baseline(&self, profile: &ConfidenceProfile, label: &str) -> f64 {
        profile.get(label).unwrap_or(self.config.neutral_baseline)
    }

    /// `classes` and `distribution` are index-aligned; `classes` is in class order.
    pub fn decide(&self, classes: &[String], distribution: &[f64], profile: &ConfidenceProfile) -> Prediction {
        let mut hits = Hits::new(classes, distribution);
        hits.sort_by_score();
        let Some((top, p1)) = hits.list.first().cloned() else {
            return Prediction::unclassified(&self.config.unknown_label);
        };
        let p2 = hits.score_at(1);
        let verdict = self.verdict(p1, p2);
        let label = match verdict {
            Verdict::Unknown => self.config.unknown_label.clone(),
            _ => top.clone(),
        };

        Prediction {
            label,
            confidence: p1,
            verdict,
            shortlist: hits.top(self.config.shortlist_len).to_vec(),
            distribution: classes.iter().cloned().zip(distribution.iter().copied()).collect(),
            baseline: self.baseline(profile, &top),
        }
    }
}
