//! Core-Domänentypen: Kontrollpunkt-Puffer und Bezier-Kurven-Auswertung.

pub mod spline;

pub use spline::{cubic_bezier_point, cubic_bezier_velocity, Spline, TangentRule};
