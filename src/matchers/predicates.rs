//! The predicate evaluators.
//!
//! Every matcher here is a pure function of the ledger snapshot: it selects
//! the relevant calls, computes `pass`, and captures what the failure
//! report needs inside a lazy message thunk. Negation (`is_not`) changes
//! the wording only; inverting `pass` for a negated assertion is the
//! host's job (see [`crate::matchers::expect`]).

use crate::ledger::{CallLedger, Invocation};
use crate::matchers::expected::ExpectedInput;
use crate::matchers::format::{format_calls, ordinal_of};
use std::fmt;

/// Host-assertion context handed to every matcher.
///
/// `is_not` records whether the surrounding assertion was negated. It
/// affects message text only, never the boolean outcome.
#[derive(Debug, Clone, Copy, Default)]
pub struct MatcherContext {
    pub is_not: bool,
}

impl MatcherContext {
    /// Context for a plain (non-negated) assertion.
    pub fn new() -> Self {
        Self::default()
    }

    /// Context for a negated assertion.
    pub fn negated() -> Self {
        Self { is_not: true }
    }
}

/// Outcome of one matcher evaluation.
///
/// The report text is produced lazily: diffing and pretty-printing only
/// run when [`MatchResult::message`] is called, so the success path stays
/// cheap. The thunk holds its own snapshot of the selected calls, making
/// the message identical no matter how often (or how late) it is rendered.
pub struct MatchResult {
    pass: bool,
    message: Box<dyn Fn() -> String + Send + Sync>,
}

impl MatchResult {
    fn new(pass: bool, message: impl Fn() -> String + Send + Sync + 'static) -> Self {
        Self {
            pass,
            message: Box::new(message),
        }
    }

    /// Whether the (non-negated) condition held.
    pub fn pass(&self) -> bool {
        self.pass
    }

    /// Render the failure report.
    pub fn message(&self) -> String {
        (self.message)()
    }
}

impl fmt::Debug for MatchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MatchResult")
            .field("pass", &self.pass)
            .finish_non_exhaustive()
    }
}

fn snapshot(calls: Vec<&Invocation>) -> Vec<Invocation> {
    calls.into_iter().cloned().collect()
}

/// The command was received exactly `times` times. `times` may be 0.
pub fn to_have_received_command_times(
    cx: &MatcherContext,
    ledger: &CallLedger,
    command: &str,
    times: usize,
) -> MatchResult {
    let calls = snapshot(ledger.calls_of(command));
    let count = calls.len();
    let is_not = cx.is_not;
    let command = command.to_string();
    MatchResult::new(count == times, move || {
        let summary = if is_not {
            format!("expected \"{command}\" to not be called {times} times")
        } else {
            format!("expected \"{command}\" to be called {times} times, but got {count} times")
        };
        format_calls(&summary, &calls, None)
    })
}

/// The command was received exactly once.
pub fn to_have_received_command_once(
    cx: &MatcherContext,
    ledger: &CallLedger,
    command: &str,
) -> MatchResult {
    let calls = snapshot(ledger.calls_of(command));
    let count = calls.len();
    let is_not = cx.is_not;
    let command = command.to_string();
    MatchResult::new(count == 1, move || {
        let summary = if is_not {
            format!("expected \"{command}\" to not be called once")
        } else {
            format!("expected \"{command}\" to be called once, but got {count} times")
        };
        format_calls(&summary, &calls, None)
    })
}

/// The command was received at least once.
pub fn to_have_received_command(
    cx: &MatcherContext,
    ledger: &CallLedger,
    command: &str,
) -> MatchResult {
    let calls = snapshot(ledger.calls_of(command));
    let count = calls.len();
    let is_not = cx.is_not;
    let command = command.to_string();
    MatchResult::new(count >= 1, move || {
        let summary = if is_not {
            format!(
                "expected \"{command}\" to not be called at all, but actually been called {count} times"
            )
        } else {
            format!("expected \"{command}\" to be called at least once")
        };
        format_calls(&summary, &calls, None)
    })
}

/// Some call of the command partially matches the expected input.
pub fn to_have_received_command_with(
    cx: &MatcherContext,
    ledger: &CallLedger,
    command: &str,
    expected: &ExpectedInput,
) -> MatchResult {
    let calls = snapshot(ledger.calls_of(command));
    let pass = calls.iter().any(|call| expected.matches(&call.input));
    let is_not = cx.is_not;
    let command = command.to_string();
    let expected = expected.clone();
    MatchResult::new(pass, move || {
        let polarity = if is_not { "to not be" } else { "to be" };
        let summary =
            format!("expected \"{command}\" {polarity} called with arguments: {expected}");
        format_calls(&summary, &calls, Some(&expected))
    })
}

/// The command was received exactly once, and that one call matches.
pub fn to_have_received_command_exactly_once_with(
    cx: &MatcherContext,
    ledger: &CallLedger,
    command: &str,
    expected: &ExpectedInput,
) -> MatchResult {
    let calls = snapshot(ledger.calls_of(command));
    let pass = calls.len() == 1 && expected.matches(&calls[0].input);
    let is_not = cx.is_not;
    let command = command.to_string();
    let expected = expected.clone();
    MatchResult::new(pass, move || {
        let polarity = if is_not { "to not be" } else { "to be" };
        let summary =
            format!("expected \"{command}\" {polarity} called once with arguments: {expected}");
        format_calls(&summary, &calls, Some(&expected))
    })
}

/// The nth call (1-based) of the command matches the expected input.
///
/// `n` beyond the number of recorded calls (or `n == 0`) is an ordinary
/// failed match, not a panic.
pub fn to_have_received_nth_command_with(
    cx: &MatcherContext,
    ledger: &CallLedger,
    command: &str,
    n: usize,
    expected: &ExpectedInput,
) -> MatchResult {
    let calls = snapshot(ledger.calls_of(command));
    let nth = n.checked_sub(1).and_then(|index| calls.get(index));
    let pass = nth.map_or(false, |call| expected.matches(&call.input));
    let is_not = cx.is_not;
    let command = command.to_string();
    let expected = expected.clone();
    MatchResult::new(pass, move || {
        let polarity = if is_not { "to not be" } else { "to be" };
        let summary = format!(
            "expected {} \"{command}\" {polarity} called with arguments: {expected}",
            ordinal_of(n)
        );
        format_calls(&summary, &calls, Some(&expected))
    })
}

/// The most recent call of the command matches the expected input.
/// Zero recorded calls is a failed match, not a panic.
pub fn to_have_received_last_command_with(
    cx: &MatcherContext,
    ledger: &CallLedger,
    command: &str,
    expected: &ExpectedInput,
) -> MatchResult {
    let calls = snapshot(ledger.calls_of(command));
    let pass = calls.last().map_or(false, |call| expected.matches(&call.input));
    let is_not = cx.is_not;
    let command = command.to_string();
    let expected = expected.clone();
    MatchResult::new(pass, move || {
        let polarity = if is_not { "to not be" } else { "to be" };
        let summary =
            format!("expected last \"{command}\" {polarity} called with arguments: {expected}");
        format_calls(&summary, &calls, Some(&expected))
    })
}

/// The client received at least one command of any kind.
///
/// The only matcher that ignores command names; its report uses the
/// client display name and labels each listed call with that call's own
/// command.
pub fn to_have_received_any_command(cx: &MatcherContext, ledger: &CallLedger) -> MatchResult {
    let calls = snapshot(ledger.select(None));
    let count = calls.len();
    let is_not = cx.is_not;
    let client = ledger.client_name().to_string();
    MatchResult::new(count >= 1, move || {
        let summary = if is_not {
            format!("expected \"{client}\" to not receive any command, but received {count} commands")
        } else {
            format!("expected \"{client}\" to receive at least one command")
        };
        format_calls(&summary, &calls, None)
    })
}

// Alias spellings. Same functions, second name.
pub use self::to_have_received_any_command as to_receive_any_command;
pub use self::to_have_received_command as to_receive_command;
pub use self::to_have_received_command_exactly_once_with as to_receive_command_exactly_once_with;
pub use self::to_have_received_command_once as to_receive_command_once;
pub use self::to_have_received_command_times as to_receive_command_times;
pub use self::to_have_received_command_with as to_receive_command_with;
pub use self::to_have_received_last_command_with as to_receive_last_command_with;
pub use self::to_have_received_nth_command_with as to_receive_nth_command_with;
