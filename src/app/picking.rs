//! Segment-Picking: nächstes Segment zu einem Pick-Strahl.
//!
//! Strategie Kontrollpunkt-Projektion: jeder Kontrollpunkt wird auf den Strahl
//! projiziert, Punkte hinter dem Ursprung fallen raus, der Punkt mit dem
//! kleinsten Abstand zur Projektion gewinnt. Sein Index geteilt durch 3 ergibt
//! das Segment; der End-Anker wird auf das letzte gültige Segment geklemmt.

use crate::core::Spline;
use glam::Vec3;

/// Pick-Strahl im lokalen Raum der Spline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickRay {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl PickRay {
    /// Erstellt einen Strahl; die Richtung wird normiert.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or(Vec3::X),
        }
    }
}

/// Findet das Segment, dessen Kontrollpunkt dem Strahl am nächsten liegt.
///
/// Kein Kandidat innerhalb von `max_distance` (oder keiner vor dem
/// Strahl-Ursprung) ergibt `None` — nie einen Fehler.
pub fn pick_segment(spline: &Spline, ray: PickRay, max_distance: f32) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;

    for (index, &point) in spline.points().iter().enumerate() {
        let along = ray.direction.dot(point - ray.origin);
        if along < 0.0 {
            continue; // hinter dem Strahl-Ursprung
        }

        let projected = ray.origin + ray.direction * along;
        let distance = point.distance(projected);
        if distance > max_distance {
            continue;
        }

        if best.map_or(true, |(_, best_distance)| distance < best_distance) {
            best = Some((index, distance));
        }
    }

    let last_segment = spline.segment_count().checked_sub(1)?;
    best.map(|(index, _)| (index / 3).min(last_segment))
}

/// Auswahlbezogener Editor-Zustand.
///
/// Beides ist abgeleiteter, transienter Zustand: das Highlight wird pro
/// Pointer-Move neu berechnet, die Selektion bleibt über Frames erhalten.
/// Nichts davon wird persistiert.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionState {
    /// Transientes Hover-Highlight (ein Segmentindex)
    pub highlighted_segment: Option<usize>,
    /// Persistente Selektion bis zum nächsten Klick
    pub selected_segment: Option<usize>,
}

impl SelectionState {
    /// Erstellt einen leeren Selektionszustand.
    pub fn new() -> Self {
        Self::default()
    }

    /// Berechnet das Hover-Highlight für die aktuelle Pointer-Position neu.
    pub fn hover(&mut self, spline: &Spline, ray: PickRay, max_distance: f32) {
        self.highlighted_segment = pick_segment(spline, ray, max_distance);
    }

    /// Übernimmt den Treffer als Selektion; Klick ins Leere deselektiert.
    pub fn click(&mut self, spline: &Spline, ray: PickRay, max_distance: f32) {
        self.selected_segment = pick_segment(spline, ray, max_distance);
    }

    /// Verwirft Highlight und Selektion (z.B. nach Topologie-Änderungen).
    pub fn clear(&mut self) {
        self.highlighted_segment = None;
        self.selected_segment = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_segment_spline() -> Spline {
        let mut spline = Spline::new();
        spline.add_segment(Vec3::new(4.0, 0.0, 0.0));
        spline
    }

    fn ray_down_at(x: f32, z: f32) -> PickRay {
        PickRay::new(Vec3::new(x, 10.0, z), Vec3::NEG_Y)
    }

    #[test]
    fn picks_segment_under_the_ray() {
        let spline = two_segment_spline();
        // Strahl direkt über dem ersten Anker (-2, 0, 0)
        assert_eq!(pick_segment(&spline, ray_down_at(-2.0, 0.0), 1.0), Some(0));
        // Strahl über dem Out-Handle des zweiten Segments (3, 0, 2)
        assert_eq!(pick_segment(&spline, ray_down_at(3.0, 2.0), 1.0), Some(1));
    }

    #[test]
    fn end_anchor_maps_to_last_segment() {
        let spline = two_segment_spline();
        // End-Anker (4, 0, 0) hat Index 6; 6 / 3 = 2 wird auf Segment 1 geklemmt
        assert_eq!(pick_segment(&spline, ray_down_at(4.0, 0.0), 1.0), Some(1));
    }

    #[test]
    fn nothing_within_threshold_yields_none() {
        let spline = two_segment_spline();
        assert_eq!(pick_segment(&spline, ray_down_at(50.0, 50.0), 1.0), None);
    }

    #[test]
    fn points_behind_ray_origin_are_skipped() {
        let spline = two_segment_spline();
        // Strahl zeigt von allen Punkten weg
        let ray = PickRay::new(Vec3::new(0.0, 10.0, 0.0), Vec3::Y);
        assert_eq!(pick_segment(&spline, ray, 100.0), None);
    }

    #[test]
    fn ray_direction_is_normalized_on_construction() {
        let ray = PickRay::new(Vec3::ZERO, Vec3::new(0.0, -7.0, 0.0));
        assert_eq!(ray.direction, Vec3::NEG_Y);
    }

    #[test]
    fn hover_is_transient_and_click_persists() {
        let spline = two_segment_spline();
        let mut selection = SelectionState::new();

        selection.hover(&spline, ray_down_at(-2.0, 0.0), 1.0);
        assert_eq!(selection.highlighted_segment, Some(0));
        assert_eq!(selection.selected_segment, None);

        selection.click(&spline, ray_down_at(-2.0, 0.0), 1.0);
        assert_eq!(selection.selected_segment, Some(0));

        // Pointer wandert ins Leere: Highlight weg, Selektion bleibt
        selection.hover(&spline, ray_down_at(50.0, 50.0), 1.0);
        assert_eq!(selection.highlighted_segment, None);
        assert_eq!(selection.selected_segment, Some(0));
    }

    #[test]
    fn click_into_empty_space_clears_selection() {
        let spline = two_segment_spline();
        let mut selection = SelectionState::new();
        selection.click(&spline, ray_down_at(-2.0, 0.0), 1.0);
        assert_eq!(selection.selected_segment, Some(0));

        selection.click(&spline, ray_down_at(50.0, 50.0), 1.0);
        assert_eq!(selection.selected_segment, None);
    }
}
