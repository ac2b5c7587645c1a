//! Linear undo/redo history of full diagram snapshots

use super::erd::ErdState;

/// Snapshot history with a cursor.
///
/// Every edit records a full copy of the state. Recording after an undo
/// discards the snapshots that could have been redone.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ErdHistory {
    snapshots: Vec<ErdState>,
    current: Option<usize>,
}

impl ErdHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new snapshot and make it current
    pub fn record(&mut self, state: ErdState) -> &ErdState {
        let keep = self.current.map_or(0, |i| i + 1);
        self.snapshots.truncate(keep);
        self.snapshots.push(state);
        let idx = self.snapshots.len() - 1;
        self.current = Some(idx);
        &self.snapshots[idx]
    }

    /// Step back one snapshot
    pub fn undo(&mut self) -> Option<&ErdState> {
        let idx = self.current.filter(|i| *i > 0)? - 1;
        self.current = Some(idx);
        self.snapshots.get(idx)
    }

    /// Step forward one snapshot
    pub fn redo(&mut self) -> Option<&ErdState> {
        let idx = self.current? + 1;
        if idx >= self.snapshots.len() {
            return None;
        }
        self.current = Some(idx);
        self.snapshots.get(idx)
    }

    pub fn can_undo(&self) -> bool {
        self.current.is_some_and(|i| i > 0)
    }

    pub fn can_redo(&self) -> bool {
        self.current.is_some_and(|i| i + 1 < self.snapshots.len())
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::erd::FieldType;

    fn edits(n: usize) -> (ErdHistory, Vec<ErdState>) {
        let mut history = ErdHistory::new();
        let mut states = Vec::new();
        let mut state = ErdState::new();
        for i in 0..n {
            state = state.with_custom_object(&format!("Obj{i}")).unwrap();
            history.record(state.clone());
            states.push(state.clone());
        }
        (history, states)
    }

    #[test]
    fn test_empty_history() {
        let mut history = ErdHistory::new();
        assert_eq!(history, ErdHistory::default());
        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert!(history.undo().is_none());
        assert!(history.redo().is_none());
    }

    #[test]
    fn test_single_snapshot_cannot_undo() {
        let (mut history, _) = edits(1);
        assert!(!history.can_undo());
        assert!(history.undo().is_none());
        assert!(!history.can_redo());
        assert!(history.redo().is_none());
    }

    #[test]
    fn test_undo_restores_exact_prior_snapshot() {
        let (mut history, states) = edits(4);

        assert_eq!(history.undo(), Some(&states[2]));
        assert_eq!(history.undo(), Some(&states[1]));
        assert_eq!(history.undo(), Some(&states[0]));
        assert!(history.undo().is_none());
        assert_eq!(history.redo(), Some(&states[1]));
    }

    #[test]
    fn test_redo_restores_undone_snapshot() {
        let (mut history, states) = edits(3);

        history.undo();
        history.undo();
        assert!(history.can_redo());
        assert_eq!(history.redo(), Some(&states[1]));
        assert_eq!(history.redo(), Some(&states[2]));
        assert!(!history.can_redo());
        assert!(history.redo().is_none());
    }

    #[test]
    fn test_record_after_undo_discards_redo_tail() {
        let (mut history, states) = edits(3);

        history.undo();
        let branched = states[1]
            .with_custom_field("Obj0", "Name", FieldType::String, "")
            .unwrap();
        assert_eq!(history.record(branched.clone()), &branched);

        assert!(!history.can_redo());
        assert_eq!(history.undo(), Some(&states[1]));
        assert_eq!(history.undo(), Some(&states[0]));
        assert!(history.undo().is_none());
        assert_eq!(history.redo(), Some(&states[1]));
        assert_eq!(history.redo(), Some(&branched));
    }

    #[test]
    fn test_clear_resets_cursor() {
        let (mut history, _) = edits(2);
        history.clear();
        assert_eq!(history, ErdHistory::new());

        let state = ErdState::new().with_annotation("fresh").unwrap();
        assert_eq!(history.record(state.clone()), &state);
        assert!(!history.can_undo());
        assert!(history.undo().is_none());
    }
}
