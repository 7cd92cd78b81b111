//! Mesh-Generierung für die Strecken-Geometrie.

mod ribbon;

pub use ribbon::{Profile, RibbonMesh};
