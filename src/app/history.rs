//! Undo/Redo über O(1)-Snapshots des Streckenzustands.

use super::SelectionState;
use crate::core::Spline;
use std::sync::Arc;

/// Snapshot reduziert auf die für Undo/Redo relevanten Teile.
///
/// Nutzt Arc-Clone (Copy-on-Write): Das Erstellen eines Snapshots ist O(1) —
/// der Spline-Klon findet erst beim nächsten `Arc::make_mut()` einer
/// mutierenden Operation statt. Mesh-Puffer sind abgeleiteter Zustand und
/// werden nie mitgesichert, sondern nach dem Wiederherstellen neu gebaut.
#[derive(Clone)]
pub struct Snapshot {
    /// Kontrollpunkt-Puffer (Arc-Klon für O(1)-Snapshot)
    pub spline: Arc<Spline>,
    /// Streckenbreite zum Zeitpunkt des Snapshots
    pub width: f32,
    /// Selektionszustand zum Zeitpunkt des Snapshots
    pub selection: SelectionState,
}

/// Einfacher Undo/Redo-Manager mit Snapshotting.
#[derive(Default)]
pub struct EditHistory {
    undo_stack: Vec<Snapshot>,
    redo_stack: Vec<Snapshot>,
    max_depth: usize,
}

impl EditHistory {
    /// Erstellt einen neuen History-Manager mit maximaler Tiefe.
    pub fn new_with_capacity(max_depth: usize) -> Self {
        Self {
            undo_stack: Vec::with_capacity(max_depth),
            redo_stack: Vec::with_capacity(max_depth),
            max_depth,
        }
    }

    /// Record a pre-built snapshot. Accepting a Snapshot avoids simultaneous
    /// mutable/immutable borrows on the full editor state.
    pub fn record_snapshot(&mut self, snap: Snapshot) {
        if self.undo_stack.len() >= self.max_depth {
            self.undo_stack.remove(0);
        }
        self.undo_stack.push(snap);
        self.redo_stack.clear();
    }

    /// Prüft ob Undo möglich ist.
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Prüft ob Redo möglich ist.
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Pop undo stack and push `current` onto redo stack; returns the snapshot to apply.
    pub fn pop_undo_with_current(&mut self, current: Snapshot) -> Option<Snapshot> {
        if let Some(prev) = self.undo_stack.pop() {
            if self.redo_stack.len() >= self.max_depth {
                self.redo_stack.remove(0);
            }
            self.redo_stack.push(current);
            Some(prev)
        } else {
            None
        }
    }

    /// Pop redo stack and push `current` onto undo stack; returns the snapshot to apply.
    pub fn pop_redo_with_current(&mut self, current: Snapshot) -> Option<Snapshot> {
        if let Some(next) = self.redo_stack.pop() {
            if self.undo_stack.len() >= self.max_depth {
                self.undo_stack.remove(0);
            }
            self.undo_stack.push(current);
            Some(next)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn snapshot_with_segments(segments: usize) -> Snapshot {
        let mut spline = Spline::new();
        for i in 1..segments {
            spline.add_segment(Vec3::new(2.0 + 2.0 * i as f32, 0.0, 0.0));
        }
        Snapshot {
            spline: Arc::new(spline),
            width: 1.0,
            selection: SelectionState::new(),
        }
    }

    #[test]
    fn empty_history_cannot_undo_or_redo() {
        let history = EditHistory::new_with_capacity(10);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn record_enables_undo() {
        let mut history = EditHistory::new_with_capacity(10);
        history.record_snapshot(snapshot_with_segments(1));
        assert!(history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn undo_restores_previous_snapshot() {
        let mut history = EditHistory::new_with_capacity(10);
        history.record_snapshot(snapshot_with_segments(2));

        let current = snapshot_with_segments(5);
        let restored = history
            .pop_undo_with_current(current)
            .expect("undo vorhanden");

        assert_eq!(restored.spline.segment_count(), 2);
        assert!(!history.can_undo());
        assert!(history.can_redo());
    }

    #[test]
    fn redo_restores_undone_snapshot() {
        let mut history = EditHistory::new_with_capacity(10);
        history.record_snapshot(snapshot_with_segments(2));

        let _restored = history.pop_undo_with_current(snapshot_with_segments(5));

        let redone = history
            .pop_redo_with_current(snapshot_with_segments(2))
            .expect("redo vorhanden");

        assert_eq!(redone.spline.segment_count(), 5);
        assert!(history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn new_record_clears_redo_stack() {
        let mut history = EditHistory::new_with_capacity(10);
        history.record_snapshot(snapshot_with_segments(1));

        let _restored = history.pop_undo_with_current(snapshot_with_segments(3));
        assert!(history.can_redo());

        history.record_snapshot(snapshot_with_segments(7));
        assert!(!history.can_redo());
    }

    #[test]
    fn respects_max_depth() {
        let mut history = EditHistory::new_with_capacity(3);

        for i in 1..=5 {
            history.record_snapshot(snapshot_with_segments(i));
        }

        // Nur 3 Undo-Schritte sollten möglich sein
        let mut undo_count = 0;
        while history.can_undo() {
            history.pop_undo_with_current(snapshot_with_segments(9));
            undo_count += 1;
        }
        assert_eq!(undo_count, 3);
    }

    #[test]
    fn pop_undo_on_empty_returns_none() {
        let mut history = EditHistory::new_with_capacity(10);
        assert!(history
            .pop_undo_with_current(snapshot_with_segments(1))
            .is_none());
    }

    #[test]
    fn pop_redo_on_empty_returns_none() {
        let mut history = EditHistory::new_with_capacity(10);
        assert!(history
            .pop_redo_with_current(snapshot_with_segments(1))
            .is_none());
    }
}
