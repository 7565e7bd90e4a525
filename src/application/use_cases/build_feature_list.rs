//! Build feature list use case
//!
//! Thin wrapper around `FeatureParser` for the external `build_feature_list`
//! operation (spec §4.3): parse a job's raw constraint string and hand back
//! the sequence of terms, or a typed error if the expression doesn't parse.

use crate::application::services::FeatureParser;
use crate::domain::value_objects::FeatureTerm;
use crate::infrastructure::error::SchedulerError;

pub struct BuildFeatureList;

impl BuildFeatureList {
    pub fn new() -> Self {
        Self
    }

    pub fn execute(&self, constraint: &str) -> Result<Vec<FeatureTerm>, SchedulerError> {
        FeatureParser::parse(constraint)
    }
}

impl Default for BuildFeatureList {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::FeatureOp;

    #[test]
    fn parses_a_valid_expression() {
        let terms = BuildFeatureList::new().execute("gpu&ssd").unwrap();
        assert_eq!(terms.len(), 2);
        assert_eq!(terms[1].op, FeatureOp::End);
    }

    #[test]
    fn surfaces_the_parse_error() {
        assert!(BuildFeatureList::new().execute("gpu & ssd").is_err());
    }
}
