use serde_json::Value;

/// One recorded command call: the command name and its input payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub command: String,
    pub input: Value,
}

impl Invocation {
    pub fn new(command: impl Into<String>, input: Value) -> Self {
        Self {
            command: command.into(),
            input,
        }
    }
}

/// The ordered call history of one mocked client.
///
/// A `CallLedger` is append-only: the hosting test (or the mocked client
/// it wires up) records commands as they are dispatched, and the matchers
/// only ever read the history back. The client name is used in failure
/// messages for whole-ledger assertions.
///
/// # Example
///
/// ```rust
/// use commandspy::CallLedger;
/// use serde_json::json;
///
/// let mut ledger = CallLedger::new("S3Client");
/// ledger.record("GetObjectCommand", json!({"Bucket": "foo", "Key": "test.txt"}));
///
/// assert_eq!(ledger.calls_of("GetObjectCommand").len(), 1);
/// assert_eq!(ledger.calls_of("PutObjectCommand").len(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct CallLedger {
    client_name: String,
    calls: Vec<Invocation>,
}

impl CallLedger {
    /// Create an empty ledger for a client with the given display name.
    pub fn new(client_name: impl Into<String>) -> Self {
        Self {
            client_name: client_name.into(),
            calls: Vec::new(),
        }
    }

    /// Append one command call to the history.
    pub fn record(&mut self, command: impl Into<String>, input: Value) {
        self.calls.push(Invocation::new(command, input));
    }

    /// The client display name, used in whole-ledger failure messages.
    pub fn client_name(&self) -> &str {
        &self.client_name
    }

    /// Every call in dispatch order, regardless of command.
    pub fn all_calls(&self) -> &[Invocation] {
        &self.calls
    }

    /// Calls of one command, in dispatch order. Other commands are
    /// silently excluded.
    pub fn calls_of(&self, command: &str) -> Vec<&Invocation> {
        self.select(Some(command))
    }

    /// The call selector: filter by command name, or take the whole
    /// history when no command is given.
    pub fn select(&self, command: Option<&str>) -> Vec<&Invocation> {
        self.calls
            .iter()
            .filter(|call| command.map_or(true, |name| call.command == name))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }
}
