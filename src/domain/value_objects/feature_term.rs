//! Feature term value object module
//!
//! A `FeatureTerm` is one parsed element of a job's constraint expression
//! (spec §4.3): a feature name, an optional required count, and the
//! operator connecting it to the next term.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum FeatureOp {
    And,
    Or,
    Xor,
    End,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeatureTerm {
    pub name: String,
    pub count: Option<u32>,
    pub op: FeatureOp,
}

impl FeatureTerm {
    pub fn new(name: impl Into<String>, count: Option<u32>, op: FeatureOp) -> Self {
        Self {
            name: name.into(),
            count,
            op,
        }
    }
}
