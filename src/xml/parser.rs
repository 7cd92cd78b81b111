//! Parser für Strecken-XML-Dateien.

use crate::core::Spline;
use crate::shared::options::TRACK_WIDTH;
use anyhow::{bail, Context, Result};
use glam::Vec3;
use quick_xml::events::Event;
use quick_xml::Reader;

/// Persistenter Streckenzustand: Punktpuffer und Breite.
///
/// Alles andere (Mesh-Puffer, Highlight/Selektion) ist abgeleitet und wird
/// nach dem Laden neu berechnet.
#[derive(Debug)]
pub struct TrackConfig {
    pub spline: Spline,
    pub width: f32,
}

/// Parsed eine Strecke aus einem XML-String.
pub fn parse_track_config(xml_content: &str) -> Result<TrackConfig> {
    let mut reader = Reader::from_str(xml_content);
    reader.config_mut().trim_text(true);

    let mut buffer = Vec::new();

    let mut in_points = false;
    let mut current_tag: Option<String> = None;

    let mut width_text = String::new();
    let mut points_x = String::new();
    let mut points_y = String::new();
    let mut points_z = String::new();

    loop {
        match reader.read_event_into(&mut buffer) {
            Ok(Event::Start(ref e)) => {
                let name = e.name();
                let tag = reader.decoder().decode(name.as_ref())?;
                if tag == "points" {
                    in_points = true;
                } else if tag != "SplineTrack" {
                    current_tag = Some(tag.to_string());
                }
            }
            Ok(Event::Text(e)) => {
                let text = e.xml_content()?.into_owned();
                if in_points {
                    match current_tag.as_deref() {
                        Some("x") => points_x.push_str(&text),
                        Some("y") => points_y.push_str(&text),
                        Some("z") => points_z.push_str(&text),
                        _ => {}
                    }
                } else if current_tag.as_deref() == Some("width") {
                    width_text.push_str(&text);
                }
            }
            Ok(Event::End(ref e)) => {
                let name = e.name();
                let tag = reader.decoder().decode(name.as_ref())?;
                if tag == "points" {
                    in_points = false;
                } else if current_tag.as_deref() == Some(tag.as_ref()) {
                    current_tag = None;
                }
            }
            Ok(Event::Eof) => break,
            Err(err) => return Err(err).context("Fehler beim Parsen des XML"),
            _ => {}
        }

        buffer.clear();
    }

    let xs = parse_float_list(&points_x).context("Fehler beim Parsen der X-Koordinaten")?;
    let ys = parse_float_list(&points_y).context("Fehler beim Parsen der Y-Koordinaten")?;
    let zs = parse_float_list(&points_z).context("Fehler beim Parsen der Z-Koordinaten")?;

    if xs.len() != ys.len() || xs.len() != zs.len() {
        bail!(
            "Laengen der Koordinaten-Listen stimmen nicht ueberein ({}/{}/{})",
            xs.len(),
            ys.len(),
            zs.len()
        );
    }

    let points: Vec<Vec3> = xs
        .iter()
        .zip(&ys)
        .zip(&zs)
        .map(|((&x, &y), &z)| Vec3::new(x, y, z))
        .collect();
    let spline =
        Spline::from_points(points).context("Punktpuffer aus der XML ist keine gueltige Spline")?;

    let width = if width_text.is_empty() {
        log::warn!(
            "Keine <width> in der Streckendatei, Standardbreite {} verwendet",
            TRACK_WIDTH
        );
        TRACK_WIDTH
    } else {
        width_text
            .trim()
            .parse::<f32>()
            .with_context(|| format!("Ungueltige Breite '{}'", width_text))?
    };

    log::info!(
        "Strecke geladen: {} Punkte, {} Segmente, Breite {}",
        spline.point_count(),
        spline.segment_count(),
        width
    );

    Ok(TrackConfig { spline, width })
}

/// Parst eine kommagetrennte Liste von Gleitkommawerten.
fn parse_float_list(text: &str) -> Result<Vec<f32>> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<f32>()
                .with_context(|| format!("Wert '{}' konnte nicht geparst werden", s))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIMPLE_TRACK: &str = r#"<?xml version="1.0" encoding="utf-8" standalone="no"?>
<SplineTrack>
    <version>1</version>
    <width>4.5</width>
    <points>
        <x>-2,-1,1,2</x>
        <y>0,0,0,0</y>
        <z>0,2,-2,0</z>
    </points>
</SplineTrack>
"#;

    #[test]
    fn parses_simple_track() {
        let config = parse_track_config(SIMPLE_TRACK).expect("Parse");
        assert_eq!(config.width, 4.5);
        assert_eq!(config.spline.point_count(), 4);
        assert_eq!(config.spline.segment_count(), 1);
        assert_eq!(config.spline.points()[0], Vec3::new(-2.0, 0.0, 0.0));
        assert_eq!(config.spline.points()[1], Vec3::new(-1.0, 0.0, 2.0));
    }

    #[test]
    fn missing_width_falls_back_to_default() {
        let xml = SIMPLE_TRACK.replace("    <width>4.5</width>\n", "");
        let config = parse_track_config(&xml).expect("Parse ohne width");
        assert_eq!(config.width, TRACK_WIDTH);
    }

    #[test]
    fn mismatched_list_lengths_are_an_error() {
        let xml = SIMPLE_TRACK.replace("<y>0,0,0,0</y>", "<y>0,0</y>");
        assert!(parse_track_config(&xml).is_err());
    }

    #[test]
    fn broken_point_invariant_is_an_error() {
        // 5 Punkte erfüllen 3*S+1 nicht
        let xml = SIMPLE_TRACK
            .replace("<x>-2,-1,1,2</x>", "<x>-2,-1,1,2,3</x>")
            .replace("<y>0,0,0,0</y>", "<y>0,0,0,0,0</y>")
            .replace("<z>0,2,-2,0</z>", "<z>0,2,-2,0,0</z>");
        assert!(parse_track_config(&xml).is_err());
    }

    #[test]
    fn garbage_coordinate_is_an_error() {
        let xml = SIMPLE_TRACK.replace("<x>-2,-1,1,2</x>", "<x>-2,breit,1,2</x>");
        assert!(parse_track_config(&xml).is_err());
    }
}
