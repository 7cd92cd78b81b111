//! Die zentrale Spline-Datenstruktur: verkettete kubische Bezier-Segmente
//! über einem flachen Kontrollpunkt-Puffer.
//!
//! Invariante (offene Topologie): `point_count == 3 * segment_count + 1`.
//! Segment `i` besteht aus den vier aufeinanderfolgenden Punkten
//! `[3i, 3i+1, 3i+2, 3i+3]` (Anker, Out-Handle, In-Handle, Folge-Anker);
//! benachbarte Segmente teilen sich den Anker. Ob ein Punkt Anker oder
//! Handle ist, ergibt sich allein aus `index % 3`.

use anyhow::{bail, Result};
use glam::Vec3;

/// Strategie für die Handle-Nachführung beim Verschieben eines Punkts.
///
/// `Realign` ist die kanonische (richtungsbasierte) Variante, `MirrorDelta`
/// die schwächere Delta-Spiegelung, die über wiederholte Edits aus der
/// Kollinearität driften kann.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TangentRule {
    /// Punkt frei bewegen, keine Nachführung
    Free,
    /// Gegenüberliegenden Handle um das negierte Delta verschieben
    MirrorDelta,
    /// Handles aus den Nachbarpunkten neu ausrichten (kanonisch)
    #[default]
    Realign,
}

/// Berechnet einen Punkt auf einem kubischen Bezier-Segment (t ∈ [0, 1]).
pub fn cubic_bezier_point(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, t: f32) -> Vec3 {
    let t = t.clamp(0.0, 1.0);
    let u = 1.0 - t;
    u * u * u * p0 + 3.0 * u * u * t * p1 + 3.0 * u * t * t * p2 + t * t * t * p3
}

/// Erste Ableitung (Geschwindigkeit) auf einem kubischen Bezier-Segment.
pub fn cubic_bezier_velocity(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, t: f32) -> Vec3 {
    let t = t.clamp(0.0, 1.0);
    let u = 1.0 - t;
    3.0 * u * u * (p1 - p0) + 6.0 * u * t * (p2 - p1) + 3.0 * t * t * (p3 - p2)
}

/// Kontrollpunkt-Puffer einer offenen Bezier-Spline.
///
/// Der Puffer gehört exklusiv der Spline; andere Komponenten referenzieren
/// Punkte nur über Indizes. Insert/Delete verschieben Indizes — Aufrufer
/// müssen gecachte Indizes nach jeder Topologie-Änderung neu auflösen.
#[derive(Debug, Clone)]
pub struct Spline {
    points: Vec<Vec3>,
}

impl Spline {
    /// Erstellt eine Spline mit dem Standard-Segment.
    pub fn new() -> Self {
        Self {
            points: vec![
                Vec3::new(-2.0, 0.0, 0.0),
                Vec3::new(-1.0, 0.0, 2.0),
                Vec3::new(1.0, 0.0, -2.0),
                Vec3::new(2.0, 0.0, 0.0),
            ],
        }
    }

    /// Baut eine Spline aus einem vorhandenen Punktpuffer auf (z.B. beim Laden).
    ///
    /// Der Puffer muss die Invariante `3S + 1` mit mindestens einem Segment
    /// erfüllen, sonst schlägt der Aufbau fehl.
    pub fn from_points(points: Vec<Vec3>) -> Result<Self> {
        if points.len() < 4 || (points.len() - 1) % 3 != 0 {
            bail!(
                "Ungueltiger Punktpuffer: {} Punkte erfuellen nicht 3*S+1",
                points.len()
            );
        }
        Ok(Self { points })
    }

    /// Alle Kontrollpunkte in Segmentreihenfolge.
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    /// Anzahl der Kontrollpunkte.
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// Anzahl der Bezier-Segmente.
    pub fn segment_count(&self) -> usize {
        self.points.len() / 3
    }

    /// Liest einen Kontrollpunkt; Index außerhalb des Puffers ist ein Fehler.
    pub fn point(&self, index: usize) -> Result<Vec3> {
        match self.points.get(index) {
            Some(&p) => Ok(p),
            None => bail!(
                "Punktindex {} ausserhalb des Puffers (0..{})",
                index,
                self.points.len()
            ),
        }
    }

    /// Ersetzt einen Kontrollpunkt ohne Handle-Nachführung.
    ///
    /// Index außerhalb des Puffers ist ein Fehler — es wird nie geklemmt.
    pub fn set_point(&mut self, index: usize, position: Vec3) -> Result<()> {
        match self.points.get_mut(index) {
            Some(p) => {
                *p = position;
                Ok(())
            }
            None => bail!(
                "Punktindex {} ausserhalb des Puffers (0..{})",
                index,
                self.points.len()
            ),
        }
    }

    /// Verschiebt einen Punkt und führt je nach `rule` die Handles nach.
    ///
    /// Anker: beide angrenzenden Handles werden neu ausgerichtet.
    /// Innerer Handle: der gegenüberliegende Handle wird gespiegelt
    /// (`MirrorDelta`) bzw. durch den Anker neu ausgerichtet (`Realign`);
    /// Rand-Handles haben keinen Spiegelpartner und bleiben unberührt.
    pub fn move_point(&mut self, index: usize, position: Vec3, rule: TangentRule) -> Result<()> {
        let previous = self.point(index)?;
        let delta = position - previous;
        self.points[index] = position;

        if rule == TangentRule::Free {
            return Ok(());
        }

        let local = index % 3;
        if local == 0 {
            self.update_handles(index);
            return Ok(());
        }

        // Nur innere Handles besitzen einen Partner auf der anderen Anker-Seite
        if index <= 1 || index + 2 >= self.points.len() {
            return Ok(());
        }

        let (anchor, other) = if local == 1 {
            (index - 1, index - 2)
        } else {
            (index + 1, index + 2)
        };

        match rule {
            TangentRule::MirrorDelta => {
                // Delta-Spiegelung: Länge bleibt erhalten, Kollinearität nicht
                self.points[other] -= delta;
            }
            TangentRule::Realign => {
                // Partner-Handle durch den Anker zielen, eigene Länge behalten
                let anchor_pos = self.points[anchor];
                let direction = (anchor_pos - position).normalize_or_zero();
                let distance = (self.points[other] - anchor_pos).length();
                self.points[other] = anchor_pos + direction * distance;
            }
            TangentRule::Free => unreachable!(),
        }
        Ok(())
    }

    /// Richtet die beiden Handles um `anchor_index` neu aus.
    ///
    /// Tangente = Mittel aus normierter Richtung zum vorherigen und negierter
    /// normierter Richtung zum nächsten Nachbar-Kontrollpunkt; jeder Handle
    /// landet auf dieser Tangente im halben Abstand zu seinem Nachbarn.
    /// Seiten ohne Nachbar (Spline-Rand) werden übersprungen.
    pub fn update_handles(&mut self, anchor_index: usize) {
        debug_assert_eq!(anchor_index % 3, 0, "update_handles erwartet einen Anker");
        let Some(&anchor) = self.points.get(anchor_index) else {
            return;
        };

        let mut tangent = Vec3::ZERO;

        let mut prev_distance = 0.0f32;
        if anchor_index >= 2 {
            let offset = self.points[anchor_index - 2] - anchor;
            tangent += offset.normalize_or_zero();
            prev_distance = offset.length();
        }

        let mut next_distance = 0.0f32;
        if anchor_index + 2 < self.points.len() {
            let offset = self.points[anchor_index + 2] - anchor;
            tangent -= offset.normalize_or_zero();
            next_distance = -offset.length();
        }

        let tangent = tangent.normalize_or_zero();

        if anchor_index >= 1 {
            self.points[anchor_index - 1] = anchor + tangent * (prev_distance * 0.5);
        }
        if anchor_index + 1 < self.points.len() {
            self.points[anchor_index + 1] = anchor + tangent * (next_distance * 0.5);
        }
    }

    /// Hängt ein Segment ans offene Ende an.
    ///
    /// Der neue Out-Handle ist die Spiegelung des letzten Handles durch den
    /// End-Anker (Richtungskontinuität am Übergang); der neue In-Handle liegt
    /// auf halbem Weg zwischen Spiegelpunkt und neuem Anker (Längen-Heuristik).
    pub fn add_segment(&mut self, new_anchor: Vec3) {
        let prior_handle = self.points[self.points.len() - 2];
        let last_anchor = self.points[self.points.len() - 1];
        let reflected = 2.0 * last_anchor - prior_handle;
        let in_handle = (reflected + new_anchor) * 0.5;
        self.points.push(reflected);
        self.points.push(in_handle);
        self.points.push(new_anchor);
    }

    /// Teilt `segment_index` am neuen Anker in zwei Segmente.
    ///
    /// Fügt Platzhalter-Handles und den Anker hinter dem Start-Anker des
    /// Segments ein und ersetzt die Platzhalter anschließend über
    /// [`update_handles`](Self::update_handles). Alle späteren Indizes
    /// verschieben sich um 3.
    pub fn split_segment(&mut self, new_anchor: Vec3, segment_index: usize) -> Result<()> {
        if segment_index >= self.segment_count() {
            bail!(
                "Segmentindex {} ausserhalb der Spline (0..{})",
                segment_index,
                self.segment_count()
            );
        }
        let insert_at = segment_index * 3 + 2;
        self.points
            .splice(insert_at..insert_at, [Vec3::ONE, new_anchor, Vec3::NEG_ONE]);
        self.update_handles((segment_index + 1) * 3);
        Ok(())
    }

    /// Entfernt ein Segment (3 Punkte ab `3 * segment_index`).
    ///
    /// Lehnt still ab, wenn nur noch ein Segment existiert oder der Index
    /// ungültig ist — die Spline bleibt damit immer auswertbar.
    /// Gibt `true` zurück, wenn tatsächlich gelöscht wurde.
    pub fn delete_segment(&mut self, segment_index: usize) -> bool {
        if self.segment_count() <= 1 || segment_index >= self.segment_count() {
            log::debug!("delete_segment({segment_index}) abgelehnt: letztes oder unbekanntes Segment");
            return false;
        }
        let start = segment_index * 3;
        self.points.drain(start..start + 3);
        true
    }

    /// Wertet die Gesamtkurve an `t ∈ [0, 1]` aus.
    pub fn point_at(&self, t: f32) -> Vec3 {
        if self.points.len() < 4 {
            return Vec3::ZERO;
        }
        let (segment, local_t) = self.locate(t);
        self.segment_point_at(segment, local_t)
    }

    /// Geschwindigkeit (erste Ableitung) der Gesamtkurve an `t ∈ [0, 1]`.
    pub fn velocity_at(&self, t: f32) -> Vec3 {
        if self.points.len() < 4 {
            return Vec3::X;
        }
        let (segment, local_t) = self.locate(t);
        self.segment_velocity_at(segment, local_t)
    }

    /// Normierte Fahrtrichtung der Gesamtkurve an `t ∈ [0, 1]`.
    pub fn direction_at(&self, t: f32) -> Vec3 {
        self.velocity_at(t).try_normalize().unwrap_or(Vec3::X)
    }

    /// Punkt auf einem einzelnen Segment (lokales `t ∈ [0, 1]`).
    pub fn segment_point_at(&self, segment_index: usize, t: f32) -> Vec3 {
        let i = segment_index * 3;
        match self.points.get(i..i + 4) {
            Some(p) => cubic_bezier_point(p[0], p[1], p[2], p[3], t),
            None => Vec3::ZERO,
        }
    }

    /// Geschwindigkeit auf einem einzelnen Segment (lokales `t ∈ [0, 1]`).
    pub fn segment_velocity_at(&self, segment_index: usize, t: f32) -> Vec3 {
        let i = segment_index * 3;
        match self.points.get(i..i + 4) {
            Some(p) => cubic_bezier_velocity(p[0], p[1], p[2], p[3], t),
            None => Vec3::X,
        }
    }

    /// Normierte Richtung auf einem einzelnen Segment.
    pub fn segment_direction_at(&self, segment_index: usize, t: f32) -> Vec3 {
        self.segment_velocity_at(segment_index, t)
            .try_normalize()
            .unwrap_or(Vec3::X)
    }

    /// Bildet globales `t` auf (Segmentindex, lokales t) ab.
    ///
    /// Klemmt knapp unter die letzte Segmentgrenze, damit `t = 1` noch im
    /// letzten Segment landet statt eins dahinter.
    fn locate(&self, t: f32) -> (usize, f32) {
        let segment_count = self.segment_count() as f32;
        let s = (t * segment_count).clamp(0.0, segment_count - 1.0e-5);
        (s.floor() as usize, s.fract())
    }
}

impl Default for Spline {
    fn default() -> Self {
        Self::new()
    }
}
