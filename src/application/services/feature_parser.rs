//! Feature constraint parser service
//!
//! Translates a job's raw constraint string into a sequence of
//! `FeatureTerm`s, mirroring `build_feature_list`/`_valid_feature_list` in
//! the original scheduler. Unlike the original, which tolerates stray
//! whitespace in some code paths and rejects it in others, this parser
//! treats any whitespace as a hard parse error (an explicit, intentional
//! deviation).
//!
//! Grammar: `NAME[*COUNT]` terms joined by `&` (AND), `|` (OR), or grouped
//! in `[A|B]` (XOR — the node must carry exactly one of the bracketed
//! features, enforced by whichever node selector plugin is wired in; this
//! parser only validates syntax and produces term sequences, it does not
//! itself choose which of the XOR options to demand).

use std::collections::HashMap;

use crate::domain::value_objects::{FeatureOp, FeatureTerm, NodeBitmap};
use crate::infrastructure::error::SchedulerError;

pub struct FeatureParser;

impl FeatureParser {
    /// Parses a raw constraint expression into its term sequence. Returns
    /// `Ok(vec![])` for an expression that is `None` upstream — callers
    /// pass an empty string only when a job truly has no constraint, which
    /// should be represented as `Option::None` rather than `Some("")`; an
    /// empty string here is a parse error.
    pub fn parse(expr: &str) -> Result<Vec<FeatureTerm>, SchedulerError> {
        if expr.chars().any(|c| c.is_whitespace()) {
            return Err(SchedulerError::InvalidFeature(format!(
                "whitespace is not permitted in constraint: {expr}"
            )));
        }
        if expr.is_empty() {
            return Err(SchedulerError::InvalidFeature(
                "empty constraint expression".to_string(),
            ));
        }

        let mut terms = Vec::new();
        let mut bracket = false;
        let mut name = String::new();
        let mut pending_count: Option<u32> = None;
        let mut saw_pipe = false;
        let mut saw_count = false;
        let mut chars = expr.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '[' => {
                    if bracket || !name.is_empty() {
                        return Err(invalid(expr));
                    }
                    bracket = true;
                }
                ']' => {
                    if !bracket || name.is_empty() {
                        return Err(invalid(expr));
                    }
                    terms.push(FeatureTerm::new(
                        std::mem::take(&mut name),
                        pending_count.take(),
                        FeatureOp::End,
                    ));
                    bracket = false;
                }
                '*' => {
                    let mut digits = String::new();
                    while let Some(d) = chars.peek() {
                        if d.is_ascii_digit() {
                            digits.push(*d);
                            chars.next();
                        } else {
                            break;
                        }
                    }
                    let count: u32 = digits.parse().unwrap_or(0);
                    if name.is_empty() || count == 0 {
                        return Err(invalid(expr));
                    }
                    pending_count = Some(count);
                    saw_count = true;
                }
                '&' => {
                    if name.is_empty() || bracket {
                        return Err(invalid(expr));
                    }
                    terms.push(FeatureTerm::new(
                        std::mem::take(&mut name),
                        pending_count.take(),
                        FeatureOp::And,
                    ));
                }
                '|' => {
                    if name.is_empty() {
                        return Err(invalid(expr));
                    }
                    saw_pipe = true;
                    let op = if bracket { FeatureOp::Xor } else { FeatureOp::Or };
                    terms.push(FeatureTerm::new(std::mem::take(&mut name), pending_count.take(), op));
                }
                c => name.push(c),
            }
        }

        if bracket {
            return Err(invalid(expr));
        }
        if !name.is_empty() {
            terms.push(FeatureTerm::new(name, pending_count.take(), FeatureOp::End));
        } else if terms.last().map(|t| t.op) != Some(FeatureOp::End) {
            return Err(invalid(expr));
        }

        if saw_pipe && saw_count {
            return Err(SchedulerError::InvalidFeature(format!(
                "counts may not be combined with `|` in constraint: {expr}"
            )));
        }

        Ok(terms)
    }

    /// Given a map of feature name to the nodes carrying it, returns the
    /// bitmap of nodes that could satisfy the parsed expression. AND
    /// intersects, OR/XOR union (this parser does not enforce the
    /// exactly-one-of-bracket rule; that belongs to node selection).
    pub fn candidate_nodes(terms: &[FeatureTerm], node_features: &HashMap<String, NodeBitmap>, node_count: usize) -> NodeBitmap {
        let mut result: Option<NodeBitmap> = None;
        let mut pending_op = FeatureOp::And;

        for term in terms {
            let have = node_features
                .get(&term.name)
                .cloned()
                .unwrap_or_else(|| NodeBitmap::empty(node_count));

            result = Some(match (result.take(), pending_op) {
                (None, _) => have,
                (Some(mut acc), FeatureOp::And) => {
                    acc.intersect_with(&have);
                    acc
                }
                (Some(mut acc), FeatureOp::Or) | (Some(mut acc), FeatureOp::Xor) => {
                    acc.union_with(&have);
                    acc
                }
                (Some(acc), FeatureOp::End) => acc,
            });
            pending_op = term.op;
        }

        result.unwrap_or_else(|| NodeBitmap::empty(node_count))
    }
}

fn invalid(expr: &str) -> SchedulerError {
    SchedulerError::InvalidFeature(format!("invalid constraint: {expr}"))
}
