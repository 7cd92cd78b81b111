//! Prozedurale Strassen-Mesh-Generierung: Querschnitts-Extrusion entlang der Spline.
//!
//! Das Mesh wird bei jeder Topologie- oder Positionsänderung komplett
//! verworfen und neu aufgebaut — kein inkrementelles Patchen. Die Gesamtzahl
//! der Vertices ist durch Segmente × Schritte × Profilbreite begrenzt, der
//! Neuaufbau bleibt damit linear und interaktionstauglich.

use crate::core::Spline;
use crate::shared::options::{GUARDRAIL_HEIGHT, SHOULDER_DROP, SHOULDER_EXTENT, STRIPE_UV_INSET};
use crate::shared::{ChangeNotifier, SubscriberId};
use glam::{Vec2, Vec3};
use std::cell::Cell;
use std::rc::Rc;

/// Querschnittsprofil der extrudierten Strecke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Profile {
    /// Flaches Band: 2 Vertices pro Querschnitt, 1 Quad pro Schritt
    Flat,
    /// Band mit Bankett und Leitplanken-Kante: 6 Vertices, 5 Quads pro Schritt
    #[default]
    Guardrail,
}

impl Profile {
    /// Vertices pro Querschnitt.
    pub fn vertices_per_section(self) -> usize {
        match self {
            Profile::Flat => 2,
            Profile::Guardrail => 6,
        }
    }

    /// Quads zwischen zwei aufeinanderfolgenden Querschnitten.
    pub fn quads_per_step(self) -> usize {
        match self {
            Profile::Flat => 1,
            Profile::Guardrail => 5,
        }
    }
}

/// Dreiecks-Mesh der Strecke als parallele Puffer.
///
/// `positions`, `uvs` und `normals` laufen parallel; `indices` verweist in
/// diese Puffer, je drei Indizes bilden ein Dreieck. Genau das Format, das
/// der Render-/Kollisions-Host konsumiert.
pub struct RibbonMesh {
    width: f32,
    steps_per_segment: usize,
    profile: Profile,
    positions: Vec<Vec3>,
    uvs: Vec<Vec2>,
    normals: Vec<Vec3>,
    indices: Vec<u32>,
    dirty: Rc<Cell<bool>>,
    subscription: Option<SubscriberId>,
}

impl RibbonMesh {
    /// Erstellt ein leeres Mesh; `rebuild` füllt die Puffer.
    pub fn new(width: f32, steps_per_segment: usize, profile: Profile) -> Self {
        Self {
            width: width.max(f32::EPSILON),
            steps_per_segment: steps_per_segment.max(1),
            profile,
            positions: Vec::new(),
            uvs: Vec::new(),
            normals: Vec::new(),
            indices: Vec::new(),
            dirty: Rc::new(Cell::new(true)),
            subscription: None,
        }
    }

    /// Abonniert den Änderungs-Kanal; jede Benachrichtigung markiert das Mesh
    /// als veraltet. Das Gegenstück ist [`detach`](Self::detach).
    pub fn attach(&mut self, notifier: &mut ChangeNotifier) {
        let dirty = Rc::clone(&self.dirty);
        let id = notifier.subscribe(Box::new(move || dirty.set(true)));
        self.subscription = Some(id);
    }

    /// Meldet das Abonnement explizit ab (Lebensende des Meshes).
    pub fn detach(&mut self, notifier: &mut ChangeNotifier) {
        if let Some(id) = self.subscription.take() {
            notifier.unsubscribe(id);
        }
    }

    /// Baut das Mesh neu auf, falls seit dem letzten Aufbau eine Änderung
    /// gemeldet wurde. Gibt zurück, ob neu gebaut wurde.
    pub fn flush(&mut self, spline: &Spline) -> bool {
        if self.dirty.get() {
            self.rebuild(spline);
            true
        } else {
            false
        }
    }

    /// Verwirft alle Puffer und extrudiert die komplette Strecke neu.
    pub fn rebuild(&mut self, spline: &Spline) {
        self.positions.clear();
        self.uvs.clear();
        self.normals.clear();
        self.indices.clear();

        for segment_index in 0..spline.segment_count() {
            self.build_segment(spline, segment_index);
        }

        self.dirty.set(false);
        log::debug!(
            "Ribbon-Mesh neu aufgebaut: {} Vertices, {} Dreiecke",
            self.positions.len(),
            self.indices.len() / 3
        );
    }

    fn build_segment(&mut self, spline: &Spline, segment_index: usize) {
        let per_section = self.profile.vertices_per_section();

        for i in 0..=self.steps_per_segment {
            let t = i as f32 / self.steps_per_segment as f32;
            self.push_cross_section(spline, segment_index, t);

            if i == 0 {
                continue;
            }

            // Quads zwischen vorherigem und aktuellem Querschnitt
            let current = self.positions.len() - per_section;
            let previous = current - per_section;
            for q in 0..self.profile.quads_per_step() {
                self.push_quad(previous + q, previous + q + 1, current + q, current + q + 1);
            }
        }
    }

    fn push_cross_section(&mut self, spline: &Spline, segment_index: usize, t: f32) {
        let pos = spline.segment_point_at(segment_index, t);
        let forward = spline.segment_direction_at(segment_index, t);
        let up = Vec3::Y;
        let right = forward.cross(up).normalize_or(Vec3::X);
        let offset = right * (self.width * 0.5);
        let left_pos = pos - offset;
        let right_pos = pos + offset;

        match self.profile {
            Profile::Flat => {
                self.push_vertex(left_pos, Vec2::new(0.0, t), up);
                self.push_vertex(right_pos, Vec2::new(1.0, t), up);
            }
            Profile::Guardrail => {
                let shoulder = right * SHOULDER_EXTENT;
                let drop = up * SHOULDER_DROP;
                let rail = up * GUARDRAIL_HEIGHT;
                let uv_left = Vec2::new(0.0, t);
                let uv_left_inner = Vec2::new(STRIPE_UV_INSET, t);
                let uv_right_inner = Vec2::new(1.0 - STRIPE_UV_INSET, t);
                let uv_right = Vec2::new(1.0, t);

                self.push_vertex(left_pos - shoulder - drop, uv_left, up);
                self.push_vertex(left_pos + rail, uv_left_inner, up);
                self.push_vertex(left_pos, uv_left_inner, up);
                self.push_vertex(right_pos, uv_right_inner, up);
                self.push_vertex(right_pos + rail, uv_right_inner, up);
                self.push_vertex(right_pos + shoulder - drop, uv_right, up);
            }
        }
    }

    fn push_vertex(&mut self, position: Vec3, uv: Vec2, normal: Vec3) {
        self.positions.push(position);
        self.uvs.push(uv);
        self.normals.push(normal);
    }

    //  v2 -- v3
    //  | \   |
    //  |  \  |
    //  v0 -- v1
    fn push_quad(&mut self, v0: usize, v1: usize, v2: usize, v3: usize) {
        self.indices.extend([
            v0 as u32, v1 as u32, v2 as u32, //
            v3 as u32, v2 as u32, v1 as u32,
        ]);
    }

    /// Markiert das Mesh manuell als veraltet (z.B. nach Breitenänderung).
    pub fn mark_dirty(&self) {
        self.dirty.set(true);
    }

    /// Ob seit dem letzten Aufbau eine Änderung gemeldet wurde.
    pub fn is_dirty(&self) -> bool {
        self.dirty.get()
    }

    /// Streckenbreite in Welteinheiten.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Setzt die Streckenbreite und markiert das Mesh als veraltet.
    pub fn set_width(&mut self, width: f32) {
        self.width = width.max(f32::EPSILON);
        self.dirty.set(true);
    }

    /// Aktives Querschnittsprofil.
    pub fn profile(&self) -> Profile {
        self.profile
    }

    /// Wechselt das Querschnittsprofil und markiert das Mesh als veraltet.
    pub fn set_profile(&mut self, profile: Profile) {
        self.profile = profile;
        self.dirty.set(true);
    }

    /// Vertex-Positionen (parallel zu `uvs` und `normals`).
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// UV-Koordinaten (Querrichtung, Segment-t).
    pub fn uvs(&self) -> &[Vec2] {
        &self.uvs
    }

    /// Vertex-Normalen.
    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    /// Dreiecks-Indizes; je drei bilden ein Dreieck.
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Anzahl der Dreiecke.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}
