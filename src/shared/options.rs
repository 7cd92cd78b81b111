//! Zentrale Konfiguration für den Strecken-Editor.
//!
//! `TrackOptions` enthält alle zur Laufzeit änderbaren Werte.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

// ── Strecke ─────────────────────────────────────────────────────────

/// Standard-Streckenbreite in Welteinheiten.
pub const TRACK_WIDTH: f32 = 1.0;
/// Abtastschritte pro Bezier-Segment beim Mesh-Aufbau.
pub const STEPS_PER_SEGMENT: usize = 200;

// ── Selektion ───────────────────────────────────────────────────────

/// Pick-Radius in Welteinheiten: Treffer weiter weg werden verworfen.
pub const PICK_RADIUS: f32 = 1.5;

// ── Bankett-Geometrie (Guardrail-Profil) ────────────────────────────

/// Seitliche Ausdehnung des abfallenden Banketts.
pub const SHOULDER_EXTENT: f32 = 25.0;
/// Absenkung der Bankett-Außenkante.
pub const SHOULDER_DROP: f32 = 5.0;
/// Höhe der Leitplanken-Kante über der Fahrbahn.
pub const GUARDRAIL_HEIGHT: f32 = 1.0;
/// UV-Einzug der Randstreifen-Bänder (Fahrbahn läuft von 0.08 bis 0.92).
pub const STRIPE_UV_INSET: f32 = 0.08;

// ── History ─────────────────────────────────────────────────────────

/// Maximale Undo/Redo-Tiefe.
pub const HISTORY_DEPTH: usize = 64;

/// Konfigurierbare Editor-Optionen; als TOML persistierbar.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TrackOptions {
    /// Streckenbreite in Welteinheiten
    pub width: f32,
    /// Abtastschritte pro Segment beim Mesh-Aufbau
    pub steps_per_segment: usize,
    /// Bankett- und Leitplanken-Geometrie mit erzeugen
    pub guardrails: bool,
    /// Pick-Radius in Welteinheiten
    pub pick_radius: f32,
    /// Maximale Undo/Redo-Tiefe
    pub history_depth: usize,
}

impl Default for TrackOptions {
    fn default() -> Self {
        Self {
            width: TRACK_WIDTH,
            steps_per_segment: STEPS_PER_SEGMENT,
            guardrails: true,
            pick_radius: PICK_RADIUS,
            history_depth: HISTORY_DEPTH,
        }
    }
}

impl TrackOptions {
    /// Lädt Optionen aus einem TOML-String; fehlende Felder fallen auf Defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).context("Fehler beim Parsen der Optionen-TOML")
    }

    /// Serialisiert die Optionen als TOML-String.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).context("Fehler beim Serialisieren der Optionen")
    }
}
