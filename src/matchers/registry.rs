//! Name → matcher dispatch table.
//!
//! The registry is the bulk-registration surface: everything a host can
//! wire up by name, in one map. Matchers come in five shapes (plain
//! command, command + count, command + expected input, command + index +
//! expected input, and whole-ledger), so the table value is a small enum
//! over function pointers rather than a single signature.

use crate::ledger::CallLedger;
use crate::matchers::expected::ExpectedInput;
use crate::matchers::predicates::{self, MatchResult, MatcherContext};
use std::collections::BTreeMap;

/// A registered matcher, tagged by argument shape.
#[derive(Debug, Clone, Copy)]
pub enum Matcher {
    /// `(command)` — e.g. received at least once / exactly once.
    Simple(fn(&MatcherContext, &CallLedger, &str) -> MatchResult),
    /// `(command, times)`.
    Count(fn(&MatcherContext, &CallLedger, &str, usize) -> MatchResult),
    /// `(command, expected input)`.
    With(fn(&MatcherContext, &CallLedger, &str, &ExpectedInput) -> MatchResult),
    /// `(command, n, expected input)`.
    NthWith(fn(&MatcherContext, &CallLedger, &str, usize, &ExpectedInput) -> MatchResult),
    /// Whole ledger, no command filter.
    Whole(fn(&MatcherContext, &CallLedger) -> MatchResult),
}

/// The eight matchers under their primary spellings.
pub fn all_matchers() -> BTreeMap<&'static str, Matcher> {
    BTreeMap::from([
        (
            "to_have_received_command_times",
            Matcher::Count(predicates::to_have_received_command_times),
        ),
        (
            "to_have_received_command_once",
            Matcher::Simple(predicates::to_have_received_command_once),
        ),
        (
            "to_have_received_command",
            Matcher::Simple(predicates::to_have_received_command),
        ),
        (
            "to_have_received_command_with",
            Matcher::With(predicates::to_have_received_command_with),
        ),
        (
            "to_have_received_command_exactly_once_with",
            Matcher::With(predicates::to_have_received_command_exactly_once_with),
        ),
        (
            "to_have_received_nth_command_with",
            Matcher::NthWith(predicates::to_have_received_nth_command_with),
        ),
        (
            "to_have_received_last_command_with",
            Matcher::With(predicates::to_have_received_last_command_with),
        ),
        (
            "to_have_received_any_command",
            Matcher::Whole(predicates::to_have_received_any_command),
        ),
    ])
}

/// The full table: primary spellings plus the `to_receive_*` aliases.
pub fn all_matchers_with_aliases() -> BTreeMap<&'static str, Matcher> {
    let mut matchers = all_matchers();
    matchers.extend([
        (
            "to_receive_command_times",
            Matcher::Count(predicates::to_receive_command_times),
        ),
        (
            "to_receive_command_once",
            Matcher::Simple(predicates::to_receive_command_once),
        ),
        (
            "to_receive_command",
            Matcher::Simple(predicates::to_receive_command),
        ),
        (
            "to_receive_command_with",
            Matcher::With(predicates::to_receive_command_with),
        ),
        (
            "to_receive_command_exactly_once_with",
            Matcher::With(predicates::to_receive_command_exactly_once_with),
        ),
        (
            "to_receive_nth_command_with",
            Matcher::NthWith(predicates::to_receive_nth_command_with),
        ),
        (
            "to_receive_last_command_with",
            Matcher::With(predicates::to_receive_last_command_with),
        ),
        (
            "to_receive_any_command",
            Matcher::Whole(predicates::to_receive_any_command),
        ),
    ]);
    matchers
}
