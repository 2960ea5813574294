//! Fluent assertion entry point for Rust's native `#[test]` harness.
//!
//! The matchers themselves never panic and never invert their result;
//! this layer is the "host framework": it builds the [`MatcherContext`],
//! applies negation to the boolean outcome, and panics with the rendered
//! report when the assertion fails.
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
//! expect(&ledger).to_have_received_command("GetObjectCommand");
//! expect(&ledger).not().to_have_received_command("PutObjectCommand");
//! expect(&ledger)
//!     .to_have_received_command_with("GetObjectCommand", &expected! {"Bucket" => "foo"});
//! ```

use crate::ledger::CallLedger;
use crate::matchers::expected::ExpectedInput;
use crate::matchers::predicates::{self, MatchResult, MatcherContext};

/// Create an expectation over a client's call history.
pub fn expect(ledger: &CallLedger) -> LedgerExpectation<'_> {
    LedgerExpectation {
        ledger,
        negated: false,
    }
}

/// A pending assertion over one [`CallLedger`].
///
/// Terminal methods evaluate immediately and panic on failure; `.not()`
/// flips the expected polarity first.
#[derive(Debug, Clone, Copy)]
pub struct LedgerExpectation<'a> {
    ledger: &'a CallLedger,
    negated: bool,
}

impl<'a> LedgerExpectation<'a> {
    /// Negate the assertion: the underlying condition must NOT hold.
    pub fn not(mut self) -> Self {
        self.negated = !self.negated;
        self
    }

    fn context(&self) -> MatcherContext {
        if self.negated {
            MatcherContext::negated()
        } else {
            MatcherContext::new()
        }
    }

    /// Apply host polarity: a negated assertion passes when the matcher
    /// itself did not.
    fn check(&self, result: MatchResult) {
        let ok = if self.negated {
            !result.pass()
        } else {
            result.pass()
        };
        if !ok {
            panic!("{}", result.message());
        }
    }

    // =========================================================================
    // Terminal assertions (panic on failure)
    // =========================================================================

    /// Assert the command was received exactly `times` times.
    pub fn to_have_received_command_times(self, command: &str, times: usize) {
        self.check(predicates::to_have_received_command_times(
            &self.context(),
            self.ledger,
            command,
            times,
        ));
    }

    /// Assert the command was received exactly once.
    pub fn to_have_received_command_once(self, command: &str) {
        self.check(predicates::to_have_received_command_once(
            &self.context(),
            self.ledger,
            command,
        ));
    }

    /// Assert the command was received at least once.
    pub fn to_have_received_command(self, command: &str) {
        self.check(predicates::to_have_received_command(
            &self.context(),
            self.ledger,
            command,
        ));
    }

    /// Assert some call of the command partially matches `expected`.
    pub fn to_have_received_command_with(self, command: &str, expected: &ExpectedInput) {
        self.check(predicates::to_have_received_command_with(
            &self.context(),
            self.ledger,
            command,
            expected,
        ));
    }

    /// Assert the command was received exactly once, with a matching input.
    pub fn to_have_received_command_exactly_once_with(
        self,
        command: &str,
        expected: &ExpectedInput,
    ) {
        self.check(predicates::to_have_received_command_exactly_once_with(
            &self.context(),
            self.ledger,
            command,
            expected,
        ));
    }

    /// Assert the nth call (1-based) of the command matches `expected`.
    pub fn to_have_received_nth_command_with(
        self,
        command: &str,
        n: usize,
        expected: &ExpectedInput,
    ) {
        self.check(predicates::to_have_received_nth_command_with(
            &self.context(),
            self.ledger,
            command,
            n,
            expected,
        ));
    }

    /// Assert the most recent call of the command matches `expected`.
    pub fn to_have_received_last_command_with(self, command: &str, expected: &ExpectedInput) {
        self.check(predicates::to_have_received_last_command_with(
            &self.context(),
            self.ledger,
            command,
            expected,
        ));
    }

    /// Assert the client received at least one command of any kind.
    pub fn to_have_received_any_command(self) {
        self.check(predicates::to_have_received_any_command(
            &self.context(),
            self.ledger,
        ));
    }

    // =========================================================================
    // Non-panicking evaluation
    // =========================================================================

    /// Evaluate a matcher against this ledger without panicking.
    ///
    /// Polarity is NOT applied here; the returned [`MatchResult`] carries
    /// the raw outcome plus a message worded for this expectation's
    /// polarity.
    ///
    /// # Example
    ///
    /// ```rust
    /// use commandspy::{expect, CallLedger};
    /// use commandspy::matchers::to_have_received_command;
    ///
    /// let ledger = CallLedger::new("S3Client");
    /// let result = expect(&ledger)
    ///     .evaluate(|cx, ledger| to_have_received_command(cx, ledger, "GetObjectCommand"));
    /// assert!(!result.pass());
    /// ```
    pub fn evaluate(
        &self,
        matcher: impl FnOnce(&MatcherContext, &CallLedger) -> MatchResult,
    ) -> MatchResult {
        matcher(&self.context(), self.ledger)
    }
}
