//! The matcher engine: predicate evaluators, expected-input matching,
//! failure-report formatting, and the fluent `expect` front door.
//!
//! Matchers evaluate to a [`MatchResult`] (`pass` + lazy message) and
//! never panic themselves; panicking on failure belongs to the fluent
//! layer in [`expect`]. The [`registry`] exposes every matcher by name
//! for bulk registration and declarative dispatch.
//!
//! # Example
//!
//! ```rust
//! use commandspy::{expect, expected, CallLedger};
//! use serde_json::json;
//!
//! let mut ledger = CallLedger::new("S3Client");
//! ledger.record("GetObjectCommand", json!({"Bucket": "foo", "Key": "test.txt"}));
//!
//! // Panicking assertions for #[test] use:
//! expect(&ledger).to_have_received_command_once("GetObjectCommand");
//!
//! // Non-panicking evaluation:
//! use commandspy::matchers::{to_have_received_command, MatcherContext};
//! let result = to_have_received_command(&MatcherContext::new(), &ledger, "PutObjectCommand");
//! assert!(!result.pass());
//! ```

pub mod expect;
pub mod expected;
pub mod format;
pub mod predicates;
pub mod registry;

pub use expect::{expect, LedgerExpectation};
pub use expected::{ExpectedInput, ExpectedValue};
pub use format::{format_calls, ordinal_of};
pub use predicates::{
    to_have_received_any_command, to_have_received_command,
    to_have_received_command_exactly_once_with, to_have_received_command_once,
    to_have_received_command_times, to_have_received_command_with,
    to_have_received_last_command_with, to_have_received_nth_command_with, to_receive_any_command,
    to_receive_command, to_receive_command_exactly_once_with, to_receive_command_once,
    to_receive_command_times, to_receive_command_with, to_receive_last_command_with,
    to_receive_nth_command_with, MatchResult, MatcherContext,
};
pub use registry::{all_matchers, all_matchers_with_aliases, Matcher};

#[cfg(test)]
mod tests;
