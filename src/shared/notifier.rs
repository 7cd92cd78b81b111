//! Änderungs-Kanal zwischen Spline-Mutationen und abgeleiteten Konsumenten.
//!
//! Explizite Registrierung mit Subscribe/Unsubscribe-Lebenszyklus: Der Kanal
//! gehört dem Editor, Abonnements sind an die Lebensdauer ihres Besitzers
//! gebunden und werden explizit abgemeldet statt als hängende Referenz
//! weiterzuleben.

/// Handle auf ein aktives Abonnement.
pub type SubscriberId = u64;

/// Ereignis-Kanal ohne Payload: Konsumenten lesen den Zustand selbst neu.
#[derive(Default)]
pub struct ChangeNotifier {
    subscribers: Vec<(SubscriberId, Box<dyn FnMut()>)>,
    next_id: SubscriberId,
}

impl ChangeNotifier {
    /// Erstellt einen leeren Kanal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registriert einen Callback und gibt das Abonnement-Handle zurück.
    pub fn subscribe(&mut self, callback: Box<dyn FnMut()>) -> SubscriberId {
        let id = self.next_id;
        self.next_id += 1;
        self.subscribers.push((id, callback));
        id
    }

    /// Meldet ein Abonnement ab; `false` wenn das Handle unbekannt ist.
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(subscriber_id, _)| *subscriber_id != id);
        self.subscribers.len() != before
    }

    /// Benachrichtigt alle Abonnenten synchron, in Registrierungsreihenfolge.
    pub fn notify(&mut self) {
        for (_, callback) in &mut self.subscribers {
            callback();
        }
    }

    /// Anzahl aktiver Abonnements.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}
