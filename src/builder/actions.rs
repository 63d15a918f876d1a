//! Scheduled copy actions and the sink they are handed to.

use serde::Serialize;

/// A scheduled snapshot copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CopyAction {
    /// Tree-relative input path.
    pub input: String,
    /// Output-relative destination path.
    pub output: String,
}

impl CopyAction {
    /// Human-readable rule description.
    pub fn description(&self) -> String {
        format!("copy current.txt: {} => {}", self.input, self.output)
    }
}

/// Receiver for scheduled actions.
///
/// Scheduling is fire-and-forget: nothing in this crate waits on the result.
pub trait ActionSink {
    fn schedule_copy(&mut self, action: CopyAction);
}

/// Sink that records scheduled actions in order.
#[derive(Debug, Clone, Default)]
pub struct RecordedActions {
    actions: Vec<CopyAction>,
}

impl RecordedActions {
    pub fn new() -> Self {
        RecordedActions::default()
    }

    pub fn actions(&self) -> &[CopyAction] {
        &self.actions
    }

    pub fn into_actions(self) -> Vec<CopyAction> {
        self.actions
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl ActionSink for RecordedActions {
    fn schedule_copy(&mut self, action: CopyAction) {
        tracing::debug!(input = %action.input, output = %action.output, "scheduled snapshot copy");
        self.actions.push(action);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_preserves_order() {
        let mut sink = RecordedActions::new();
        sink.schedule_copy(CopyAction {
            input: "a/current.txt".to_string(),
            output: "a/gen/a.txt".to_string(),
        });
        sink.schedule_copy(CopyAction {
            input: "b/current.txt".to_string(),
            output: "b/gen/b.txt".to_string(),
        });

        assert_eq!(sink.len(), 2);
        assert_eq!(sink.actions()[0].input, "a/current.txt");
        assert_eq!(sink.actions()[1].output, "b/gen/b.txt");
    }

    #[test]
    fn test_description() {
        let action = CopyAction {
            input: "d/current.txt".to_string(),
            output: "d/gen/root.txt".to_string(),
        };
        assert_eq!(
            action.description(),
            "copy current.txt: d/current.txt => d/gen/root.txt"
        );
    }
}
