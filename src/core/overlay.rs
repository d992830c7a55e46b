use crate::domain::model::OverlayKind;
use crate::domain::ports::OverlayHost;

pub const ESCAPE_KEY: &str = "Escape";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentEvent {
    Click,
    KeyDown,
}

/// Document-level listeners that dismiss a visible overlay.
///
/// Each shown overlay owns one click and one keydown listener. Whichever path
/// dismisses the overlay detaches both, so nothing is left behind between
/// show/dismiss cycles.
#[derive(Debug, Default)]
pub struct DismissListeners {
    listeners: Vec<(DocumentEvent, OverlayKind)>,
}

impl DismissListeners {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` when the overlay already has listeners.
    pub fn attach(&mut self, kind: OverlayKind) -> bool {
        if self.is_attached(kind) {
            return false;
        }
        self.listeners.push((DocumentEvent::Click, kind));
        self.listeners.push((DocumentEvent::KeyDown, kind));
        true
    }

    pub fn is_attached(&self, kind: OverlayKind) -> bool {
        self.listeners.iter().any(|(_, owner)| *owner == kind)
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    pub fn count_for(&self, event: DocumentEvent) -> usize {
        self.listeners
            .iter()
            .filter(|(listener, _)| *listener == event)
            .count()
    }

    pub fn on_click(&mut self, host: &mut dyn OverlayHost) -> Vec<OverlayKind> {
        self.fire(DocumentEvent::Click, host)
    }

    pub fn on_key_down(&mut self, key: &str, host: &mut dyn OverlayHost) -> Vec<OverlayKind> {
        if key != ESCAPE_KEY {
            return Vec::new();
        }
        self.fire(DocumentEvent::KeyDown, host)
    }

    fn fire(&mut self, event: DocumentEvent, host: &mut dyn OverlayHost) -> Vec<OverlayKind> {
        let owners: Vec<OverlayKind> = self
            .listeners
            .iter()
            .filter(|(listener, _)| *listener == event)
            .map(|(_, owner)| *owner)
            .collect();

        for kind in &owners {
            host.remove(*kind);
            self.detach(*kind);
            tracing::debug!("{:?} overlay dismissed by {:?}", kind, event);
        }

        owners
    }

    fn detach(&mut self, kind: OverlayKind) {
        self.listeners.retain(|(_, owner)| *owner != kind);
    }
}
