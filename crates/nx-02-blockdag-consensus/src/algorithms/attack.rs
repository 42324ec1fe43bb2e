//! Attack assessment from the red ratio.
//!
//! Red blocks are blocks that exceeded the anticone bound: a sustained
//! share of them means someone is producing concurrent blocks faster than
//! honest latency explains.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AttackSeverity {
    None,
    Low,
    Medium,
    High,
}

impl AttackSeverity {
    pub fn from_red_ratio(ratio: f64) -> Self {
        if ratio >= 0.33 {
            Self::High
        } else if ratio >= 0.20 {
            Self::Medium
        } else if ratio >= 0.10 {
            Self::Low
        } else {
            Self::None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttackReport {
    pub total_blocks: usize,
    pub blue_blocks: usize,
    pub red_blocks: usize,
    pub red_ratio: f64,
    pub severity: AttackSeverity,
    pub attack_detected: bool,
}

impl AttackReport {
    pub fn assess(blue_blocks: usize, red_blocks: usize) -> Self {
        let total_blocks = blue_blocks + red_blocks;
        let red_ratio = if total_blocks == 0 {
            0.0
        } else {
            red_blocks as f64 / total_blocks as f64
        };
        let severity = AttackSeverity::from_red_ratio(red_ratio);
        Self {
            total_blocks,
            blue_blocks,
            red_blocks,
            red_ratio,
            severity,
            attack_detected: severity != AttackSeverity::None,
        }
    }
}
