//! Leave/stay decision and qualitative risk tier from p(leave).

mod engine;

pub use engine::{Decision, RiskEngine, RiskLevel, RiskResult};
