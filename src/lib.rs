//! # commandspy
//!
//! Jest-style assertion matchers for the command history of mocked clients.
//!
//! A mocked client records every command dispatched to it into a
//! [`CallLedger`] (command name + JSON input payload, in dispatch order).
//! This library answers questions about that history — how many times a
//! command was received, whether the nth or last call carried particular
//! arguments — and renders a diff-oriented report when an assertion fails.
//!
//! ## Quick Start
//!
//! ```rust
//! use commandspy::{expect, expected, CallLedger};
//! use serde_json::json;
//!
//! let mut ledger = CallLedger::new("S3Client");
//! // ...exercise the code under test, recording each dispatched command:
//! ledger.record("GetObjectCommand", json!({"Bucket": "foo", "Key": "test.txt"}));
//!
//! expect(&ledger).to_have_received_command_once("GetObjectCommand");
//! expect(&ledger).to_have_received_command_with(
//!     "GetObjectCommand",
//!     &expected! {"Bucket" => "foo"},
//! );
//! expect(&ledger).not().to_have_received_command("DeleteObjectCommand");
//! ```
//!
//! ## Partial matching
//!
//! Expected inputs are partial: only the fields you name are compared, and
//! each can be a literal, a regex, a glob, or a custom predicate — see
//! [`ExpectedValue`].
//!
//! ## Non-panicking use
//!
//! Every matcher is also available as a plain function returning a
//! [`matchers::MatchResult`] (`pass` + lazily rendered message), and the
//! whole set is exposed by name through [`all_matchers`] /
//! [`all_matchers_with_aliases`] for bulk registration or declarative
//! dispatch. With the default `yaml` feature, [`plan`] runs whole
//! assertion plans loaded from YAML files.

pub mod ledger;
pub mod matchers;

#[cfg(feature = "yaml")]
pub mod plan;

// Core types
pub use ledger::{CallLedger, Invocation};
pub use matchers::{expect, ExpectedInput, ExpectedValue, LedgerExpectation};

// Matcher functions under their primary and alias spellings
pub use matchers::{
    to_have_received_any_command, to_have_received_command,
    to_have_received_command_exactly_once_with, to_have_received_command_once,
    to_have_received_command_times, to_have_received_command_with,
    to_have_received_last_command_with, to_have_received_nth_command_with, to_receive_any_command,
    to_receive_command, to_receive_command_exactly_once_with, to_receive_command_once,
    to_receive_command_times, to_receive_command_with, to_receive_last_command_with,
    to_receive_nth_command_with,
};

// Registry bundle
pub use matchers::{all_matchers, all_matchers_with_aliases, Matcher};

// Plans (feature-gated)
#[cfg(feature = "yaml")]
pub use plan::{load_plan, run_plan, Plan, PlanError, PlanOutcome};
