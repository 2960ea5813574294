//! Declarative assertion plans loaded from YAML.
//!
//! A plan is a list of matcher invocations by name, dispatched through the
//! registry. It is a thin layer over the matcher engine: all matching and
//! message logic stays in [`crate::matchers`]; this module only
//! deserializes, validates the argument shape, and collects outcomes
//! without panicking.
//!
//! # Plan file format
//!
//! ```yaml
//! name: "cache reads go to the right bucket"
//! assertions:
//!   - matcher: to_have_received_command_times
//!     command: GetObjectCommand
//!     times: 2
//!   - matcher: to_have_received_command_with
//!     command: PutObjectCommand
//!     input:
//!       Bucket: foo
//!     negated: true
//!   - matcher: to_have_received_any_command
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use commandspy::plan::{load_plan, run_plan};
//!
//! let plan = load_plan(Path::new("plans/cache_reads.yaml"))?;
//! for outcome in run_plan(&plan, &ledger)? {
//!     assert!(outcome.pass, "{}", outcome.message.unwrap());
//! }
//! ```

use crate::ledger::CallLedger;
use crate::matchers::expected::ExpectedInput;
use crate::matchers::registry::{all_matchers_with_aliases, Matcher};
use crate::matchers::{MatchResult, MatcherContext};
use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Errors from dispatching a plan through the registry.
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    #[error("unknown matcher: '{0}'. Valid names are the to_have_received_*/to_receive_* spellings of: command, command_once, command_times, command_with, command_exactly_once_with, nth_command_with, last_command_with, any_command")]
    UnknownMatcher(String),

    #[error("matcher '{matcher}' requires the '{field}' field")]
    MissingField {
        matcher: String,
        field: &'static str,
    },

    #[error("matcher '{matcher}' expects 'input' to be a mapping of field names to values")]
    InputNotAMapping { matcher: String },
}

/// An assertion plan loaded from YAML.
#[derive(Debug, Deserialize)]
pub struct Plan {
    /// Human-readable name for this plan.
    pub name: String,
    /// Assertions to evaluate, in order.
    #[serde(default)]
    pub assertions: Vec<AssertionSpec>,
}

/// One matcher invocation by registry name.
#[derive(Debug, Deserialize)]
pub struct AssertionSpec {
    /// Registry name, e.g. `to_have_received_command_times`.
    pub matcher: String,
    /// Command name; required by every matcher except the any-command one.
    pub command: Option<String>,
    /// Count for the `*_times` matcher, 1-based index for `*_nth_*`.
    pub times: Option<usize>,
    /// Literal expected input fields for the `*_with` matchers.
    pub input: Option<Value>,
    /// Whether the assertion is negated (default false).
    #[serde(default)]
    pub negated: bool,
}

/// Result of one plan assertion.
#[derive(Debug, Clone)]
pub struct PlanOutcome {
    /// What was asserted, for reporting.
    pub description: String,
    /// Whether the assertion held (negation already applied).
    pub pass: bool,
    /// Failure report; `None` on success, so diff rendering only runs
    /// for failures.
    pub message: Option<String>,
}

/// Load a plan from a YAML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the YAML is malformed.
pub fn load_plan(path: &Path) -> Result<Plan> {
    let content = fs::read_to_string(path).context("Failed to read plan file")?;
    let plan: Plan = serde_yaml::from_str(&content).context("Failed to parse YAML")?;
    Ok(plan)
}

/// Run every assertion in the plan against a call ledger.
///
/// Unlike the fluent API this never panics; each assertion becomes a
/// [`PlanOutcome`] with negation already folded into `pass`.
pub fn run_plan(plan: &Plan, ledger: &CallLedger) -> Result<Vec<PlanOutcome>, PlanError> {
    let table = all_matchers_with_aliases();
    plan.assertions
        .iter()
        .map(|spec| {
            let matcher = table
                .get(spec.matcher.as_str())
                .copied()
                .ok_or_else(|| PlanError::UnknownMatcher(spec.matcher.clone()))?;
            run_assertion(matcher, spec, ledger)
        })
        .collect()
}

fn run_assertion(
    matcher: Matcher,
    spec: &AssertionSpec,
    ledger: &CallLedger,
) -> Result<PlanOutcome, PlanError> {
    let cx = if spec.negated {
        MatcherContext::negated()
    } else {
        MatcherContext::new()
    };

    let result = match matcher {
        Matcher::Whole(run) => run(&cx, ledger),
        Matcher::Simple(run) => run(&cx, ledger, command(spec)?),
        Matcher::Count(run) => run(&cx, ledger, command(spec)?, times(spec)?),
        Matcher::With(run) => run(&cx, ledger, command(spec)?, &expected_input(spec)?),
        Matcher::NthWith(run) => {
            let n = times(spec)?;
            run(&cx, ledger, command(spec)?, n, &expected_input(spec)?)
        }
    };

    Ok(outcome(spec, result))
}

fn outcome(spec: &AssertionSpec, result: MatchResult) -> PlanOutcome {
    let pass = if spec.negated {
        !result.pass()
    } else {
        result.pass()
    };
    PlanOutcome {
        description: describe(spec),
        pass,
        message: (!pass).then(|| result.message()),
    }
}

fn describe(spec: &AssertionSpec) -> String {
    let mut parts = Vec::new();
    if spec.negated {
        parts.push("not".to_string());
    }
    parts.push(spec.matcher.clone());
    if let Some(command) = &spec.command {
        parts.push(command.clone());
    }
    if let Some(times) = spec.times {
        parts.push(times.to_string());
    }
    if let Some(input) = &spec.input {
        parts.push(input.to_string());
    }
    parts.join(" ")
}

fn command(spec: &AssertionSpec) -> Result<&str, PlanError> {
    spec.command.as_deref().ok_or_else(|| PlanError::MissingField {
        matcher: spec.matcher.clone(),
        field: "command",
    })
}

fn times(spec: &AssertionSpec) -> Result<usize, PlanError> {
    spec.times.ok_or_else(|| PlanError::MissingField {
        matcher: spec.matcher.clone(),
        field: "times",
    })
}

/// Literal expected fields from the spec's `input` mapping.
fn expected_input(spec: &AssertionSpec) -> Result<ExpectedInput, PlanError> {
    let input = spec.input.as_ref().ok_or_else(|| PlanError::MissingField {
        matcher: spec.matcher.clone(),
        field: "input",
    })?;
    let object = input.as_object().ok_or_else(|| PlanError::InputNotAMapping {
        matcher: spec.matcher.clone(),
    })?;

    let mut expected = ExpectedInput::new();
    for (name, value) in object {
        expected = expected.field(name.clone(), value.clone());
    }
    Ok(expected)
}
