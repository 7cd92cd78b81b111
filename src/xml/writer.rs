//! Writer für Strecken-XML-Dateien.

use crate::core::Spline;

/// Schreibt Punktpuffer und Breite als Strecken-XML.
///
/// Structure of Arrays: die Koordinaten stehen als kommagetrennte Listen in
/// parallelen Tags. Gleitkommawerte werden im kürzesten Round-Trip-Format
/// geschrieben, damit Laden und Speichern verlustfrei bleiben.
pub fn write_track_config(spline: &Spline, width: f32) -> String {
    let mut output = String::new();
    output.push_str("<?xml version=\"1.0\" encoding=\"utf-8\" standalone=\"no\"?>\n");
    output.push_str("<SplineTrack>\n");
    output.push_str("    <version>1</version>\n");
    output.push_str(&format!("    <width>{}</width>\n", width));
    output.push_str("    <points>\n");

    for (tag, component) in [("x", 0usize), ("y", 1), ("z", 2)] {
        let values: Vec<String> = spline
            .points()
            .iter()
            .map(|p| p[component].to_string())
            .collect();
        output.push_str(&format!("        <{}>{}</{}>\n", tag, values.join(","), tag));
    }

    output.push_str("    </points>\n");
    output.push_str("</SplineTrack>\n");

    log::info!(
        "Strecke geschrieben: {} Punkte, Breite {}",
        spline.point_count(),
        width
    );
    output
}
