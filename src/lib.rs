//! Spline-Track-Editor Library.
//! Kurvenmodell, Segment-Picking und Mesh-Extrusion als Kern für einen
//! interaktiven Host (Eingabe, Rendering und Dialoge bleiben beim Host).

pub mod app;
pub mod core;
pub mod render;
pub mod shared;
pub mod xml;

pub use app::{
    pick_segment, ChangeNotifier, EditHistory, PickRay, SelectionState, Snapshot, SubscriberId,
    TrackEditor,
};
pub use core::{Spline, TangentRule};
pub use render::{Profile, RibbonMesh};
pub use shared::TrackOptions;
pub use xml::{parse_track_config, write_track_config, TrackConfig};
