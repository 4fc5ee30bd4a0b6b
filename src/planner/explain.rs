//! Explain plan output
//!
//! Deterministic, human-readable rendering of a plan or of the reason a
//! clause was rejected.

use std::fmt;

use serde::Serialize;

use crate::errors::HaloError;
use crate::predicate::PredicateTree;

use super::planner::QueryPlan;

/// Explain plan output
#[derive(Debug, Clone, Serialize)]
pub struct ExplainPlan {
    /// Whether planning succeeded
    pub accepted: bool,
    /// Table the clause was planned against
    pub table: String,
    /// Root strategy (if accepted)
    pub strategy: Option<String>,
    /// Condition structure, e.g. `(a OR b)`
    pub structure: Option<String>,
    /// Predicates in clause order
    pub predicates: Vec<String>,
    /// Number of storage scans execution will issue
    pub scans: Option<usize>,
    /// Indented plan tree
    pub steps: Vec<String>,
    /// Rejection reason (if rejected)
    pub rejection_reason: Option<String>,
    /// Rejection error code (if rejected)
    pub rejection_code: Option<String>,
}

impl ExplainPlan {
    /// Creates an explain plan from a successful plan
    pub fn from_plan(table: &str, tree: &PredicateTree, plan: &QueryPlan) -> Self {
        let structure = if tree.is_empty() {
            None
        } else {
            Some(tree.structure())
        };

        Self {
            accepted: true,
            table: table.to_string(),
            strategy: Some(plan.strategy().to_string()),
            structure,
            predicates: tree.predicates().iter().map(|p| p.to_string()).collect(),
            scans: Some(plan.scan_count()),
            steps: plan.describe(),
            rejection_reason: None,
            rejection_code: None,
        }
    }

    /// Creates an explain plan from a parse or planning error
    pub fn from_error(table: &str, err: &HaloError) -> Self {
        Self {
            accepted: false,
            table: table.to_string(),
            strategy: None,
            structure: None,
            predicates: Vec::new(),
            scans: None,
            steps: Vec::new(),
            rejection_reason: Some(err.to_string()),
            rejection_code: Some(err.code().code().to_string()),
        }
    }
}

impl fmt::Display for ExplainPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== EXPLAIN PLAN ===")?;
        writeln!(f, "Table: {}", self.table)?;

        if self.accepted {
            writeln!(f, "Status: ACCEPTED")?;
            if let Some(strategy) = &self.strategy {
                writeln!(f, "Strategy: {}", strategy)?;
            }
            if let Some(structure) = &self.structure {
                writeln!(f, "Condition: {}", structure)?;
            }
            if !self.predicates.is_empty() {
                writeln!(f, "Predicates:")?;
                for pred in &self.predicates {
                    writeln!(f, "  - {}", pred)?;
                }
            }
            if let Some(scans) = self.scans {
                writeln!(f, "Scans: {}", scans)?;
            }
            if !self.steps.is_empty() {
                writeln!(f, "Plan:")?;
                for step in &self.steps {
                    writeln!(f, "  {}", step)?;
                }
            }
        } else {
            writeln!(f, "Status: REJECTED")?;
            if let Some(code) = &self.rejection_code {
                writeln!(f, "Error Code: {}", code)?;
            }
            if let Some(reason) = &self.rejection_reason {
                writeln!(f, "Reason: {}", reason)?;
            }
        }

        Ok(())
    }
}
