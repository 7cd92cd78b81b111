//! Geteilte Typen für layer-übergreifende Verträge.
//!
//! Enthält Konstanten, Optionen und den Änderungs-Kanal, die zwischen `app`
//! und `render` geteilt werden, um direkte Abhängigkeiten zu vermeiden.

pub mod notifier;
pub mod options;

pub use notifier::{ChangeNotifier, SubscriberId};
pub use options::TrackOptions;
