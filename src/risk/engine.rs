//! Combines p(leave) from the model with configurable thresholds; produces decision and risk tier.

use crate::config::RiskConfig;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    VeryLow,
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn from_score(p_leave: f64, config: &RiskConfig) -> Self {
        if p_leave >= config.high_threshold {
            RiskLevel::High
        } else if p_leave >= config.medium_threshold {
            RiskLevel::Medium
        } else if p_leave >= config.low_threshold {
            RiskLevel::Low
        } else {
            RiskLevel::VeryLow
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RiskLevel::VeryLow => "Very Low",
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Stay,
    Leave,
}

impl Decision {
    /// 1 for leave, 0 for stay
    pub fn label(self) -> u8 {
        match self {
            Decision::Stay => 0,
            Decision::Leave => 1,
        }
    }
}

/// Scored prediction for a single employee
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskResult {
    pub p_stay: f64,
    pub p_leave: f64,
    pub decision: Decision,
    pub level: RiskLevel,
}

pub struct RiskEngine {
    config: RiskConfig,
}

impl RiskEngine {
    pub fn new(config: RiskConfig) -> Self {
        Self { config }
    }

    pub fn score(&self, probability: [f64; 2]) -> RiskResult {
        let [p_stay, p_leave] = probability;
        let decision = if p_leave >= self.config.decision_threshold {
            Decision::Leave
        } else {
            Decision::Stay
        };
        RiskResult {
            p_stay,
            p_leave,
            decision,
            level: RiskLevel::from_score(p_leave, &self.config),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> RiskEngine {
        RiskEngine::new(RiskConfig::default())
    }

    #[test]
    fn tier_boundaries_are_inclusive() {
        let e = engine();
        assert_eq!(e.score([0.35, 0.65]).level, RiskLevel::High);
        assert_eq!(e.score([0.36, 0.64]).level, RiskLevel::Medium);
        assert_eq!(e.score([0.55, 0.45]).level, RiskLevel::Medium);
        assert_eq!(e.score([0.75, 0.25]).level, RiskLevel::Low);
        assert_eq!(e.score([0.76, 0.24]).level, RiskLevel::VeryLow);
    }

    #[test]
    fn decision_threshold_at_half() {
        let e = engine();
        assert_eq!(e.score([0.5, 0.5]).decision, Decision::Leave);
        assert_eq!(e.score([0.51, 0.49]).decision, Decision::Stay);
        assert_eq!(Decision::Leave.label(), 1);
    }

    #[test]
    fn medium_risk_can_still_predict_stay() {
        let r = engine().score([0.53, 0.47]);
        assert_eq!(r.decision, Decision::Stay);
        assert_eq!(r.level, RiskLevel::Medium);
        assert_eq!(r.level.to_string(), "Medium");
    }
}
