//! Editor-Zustand: Picking/Selektion, History und Fassade.

pub mod editor;
pub mod history;
pub mod picking;

pub use crate::shared::{ChangeNotifier, SubscriberId};
pub use editor::TrackEditor;
pub use history::{EditHistory, Snapshot};
pub use picking::{pick_segment, PickRay, SelectionState};
