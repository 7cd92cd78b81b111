//! Editor-Fassade: verbindet Spline, Änderungs-Kanal, Selektion, History und Mesh.
//!
//! Jede mutierende Operation sichert vorher einen O(1)-Snapshot, wendet die
//! Änderung per Copy-on-Write an, meldet sie über den Änderungs-Kanal und baut
//! das Mesh synchron im selben Aufruf neu. Es gibt genau einen Schreiber, der
//! Host serialisiert die Eingaben — kein Locking nötig.
//!
//! Topologie-Änderungen verschieben Punkt-Indizes; die Fassade verwirft deshalb
//! die Selektion nach Add/Split/Delete. Aufrufer müssen eigene gecachte Indizes
//! ebenfalls neu auflösen.

use crate::app::history::{EditHistory, Snapshot};
use crate::app::picking::{PickRay, SelectionState};
use crate::core::{Spline, TangentRule};
use crate::render::{Profile, RibbonMesh};
use crate::shared::{ChangeNotifier, TrackOptions};
use crate::xml::{parse_track_config, write_track_config};
use anyhow::Result;
use glam::Vec3;
use std::sync::Arc;

/// Zentrale Fassade für den interaktiven Host.
pub struct TrackEditor {
    spline: Arc<Spline>,
    selection: SelectionState,
    notifier: ChangeNotifier,
    mesh: RibbonMesh,
    history: EditHistory,
    pick_radius: f32,
}

impl TrackEditor {
    /// Erstellt einen Editor mit dem Standard-Segment und fertig gebautem Mesh.
    pub fn new(options: &TrackOptions) -> Self {
        let mut notifier = ChangeNotifier::new();
        let profile = if options.guardrails {
            Profile::Guardrail
        } else {
            Profile::Flat
        };
        let mut mesh = RibbonMesh::new(options.width, options.steps_per_segment, profile);
        mesh.attach(&mut notifier);

        let spline = Arc::new(Spline::new());
        mesh.rebuild(&spline);

        Self {
            spline,
            selection: SelectionState::new(),
            notifier,
            mesh,
            history: EditHistory::new_with_capacity(options.history_depth),
            pick_radius: options.pick_radius,
        }
    }

    /// Die aktuelle Spline (nur lesend; Mutation läuft über die Fassade).
    pub fn spline(&self) -> &Spline {
        &self.spline
    }

    /// Das aktuelle Strecken-Mesh (nach jeder Operation bereits aktuell).
    pub fn mesh(&self) -> &RibbonMesh {
        &self.mesh
    }

    /// Highlight- und Selektionszustand.
    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Zugriff auf den Änderungs-Kanal für Host-Hooks (Redraw, Undo-Commit).
    pub fn notifier_mut(&mut self) -> &mut ChangeNotifier {
        &mut self.notifier
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            spline: Arc::clone(&self.spline),
            width: self.mesh.width(),
            selection: self.selection.clone(),
        }
    }

    fn after_change(&mut self) {
        self.notifier.notify();
        self.mesh.flush(&self.spline);
    }

    /// Ersetzt einen Kontrollpunkt ohne Handle-Nachführung.
    pub fn set_point(&mut self, index: usize, position: Vec3) -> Result<()> {
        let snap = self.snapshot();
        Arc::make_mut(&mut self.spline).set_point(index, position)?;
        self.history.record_snapshot(snap);
        self.after_change();
        Ok(())
    }

    /// Verschiebt einen Punkt mit der gewählten Handle-Strategie.
    pub fn move_point(&mut self, index: usize, position: Vec3, rule: TangentRule) -> Result<()> {
        let snap = self.snapshot();
        Arc::make_mut(&mut self.spline).move_point(index, position, rule)?;
        self.history.record_snapshot(snap);
        self.after_change();
        Ok(())
    }

    /// Hängt ein Segment ans offene Ende an.
    pub fn add_segment(&mut self, new_anchor: Vec3) {
        let snap = self.snapshot();
        Arc::make_mut(&mut self.spline).add_segment(new_anchor);
        self.history.record_snapshot(snap);
        self.selection.clear();
        self.after_change();
    }

    /// Teilt ein Segment am neuen Anker.
    pub fn split_segment(&mut self, new_anchor: Vec3, segment_index: usize) -> Result<()> {
        let snap = self.snapshot();
        Arc::make_mut(&mut self.spline).split_segment(new_anchor, segment_index)?;
        self.history.record_snapshot(snap);
        self.selection.clear();
        self.after_change();
        Ok(())
    }

    /// Entfernt ein Segment; lehnt beim letzten Segment still ab.
    pub fn delete_segment(&mut self, segment_index: usize) -> bool {
        let snap = self.snapshot();
        let deleted = Arc::make_mut(&mut self.spline).delete_segment(segment_index);
        if deleted {
            self.history.record_snapshot(snap);
            self.selection.clear();
            self.after_change();
        }
        deleted
    }

    /// Setzt die Streckenbreite (persistenter Teil der Mesh-Konfiguration).
    pub fn set_width(&mut self, width: f32) {
        let snap = self.snapshot();
        self.mesh.set_width(width);
        self.history.record_snapshot(snap);
        self.after_change();
    }

    /// Aktualisiert das transiente Hover-Highlight für einen Pick-Strahl.
    pub fn hover(&mut self, ray: PickRay) -> Option<usize> {
        self.selection.hover(&self.spline, ray, self.pick_radius);
        self.selection.highlighted_segment
    }

    /// Übernimmt den Pick-Treffer als persistente Selektion.
    pub fn click(&mut self, ray: PickRay) -> Option<usize> {
        self.selection.click(&self.spline, ray, self.pick_radius);
        self.selection.selected_segment
    }

    /// Prüft ob Undo möglich ist.
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Prüft ob Redo möglich ist.
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Stellt den Zustand vor der letzten Operation wieder her.
    pub fn undo(&mut self) -> bool {
        let current = self.snapshot();
        match self.history.pop_undo_with_current(current) {
            Some(snap) => {
                self.apply_snapshot(snap);
                true
            }
            None => false,
        }
    }

    /// Wiederholt die zuletzt rückgängig gemachte Operation.
    pub fn redo(&mut self) -> bool {
        let current = self.snapshot();
        match self.history.pop_redo_with_current(current) {
            Some(snap) => {
                self.apply_snapshot(snap);
                true
            }
            None => false,
        }
    }

    fn apply_snapshot(&mut self, snap: Snapshot) {
        self.spline = snap.spline;
        self.mesh.set_width(snap.width);
        self.selection = snap.selection;
        self.after_change();
    }

    /// Serialisiert den persistenten Zustand (Punkte + Breite) als XML.
    pub fn to_xml(&self) -> String {
        write_track_config(&self.spline, self.mesh.width())
    }

    /// Lädt eine Strecke aus XML; der vorherige Zustand bleibt per Undo erreichbar.
    pub fn load_xml(&mut self, xml_content: &str) -> Result<()> {
        let config = parse_track_config(xml_content)?;
        let snap = self.snapshot();
        self.spline = Arc::new(config.spline);
        self.mesh.set_width(config.width);
        self.selection.clear();
        self.history.record_snapshot(snap);
        self.after_change();
        Ok(())
    }
}

impl Default for TrackEditor {
    fn default() -> Self {
        Self::new(&TrackOptions::default())
    }
}
