// ============================================================================
// EVENT HANDLING - Sistema de eventos del documento
// ============================================================================
// Los listeners se guardan en el Document, indexados por (nodo, tipo).
// Cuando un subárbol se desmonta (replace_children/clear_children) sus
// listeners se eliminan con él, igual que hace el navegador.
// ============================================================================

use std::cell::Cell;
use std::rc::Rc;
use crate::dom::ElementRef;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    Submit,
    Change,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Click => "click",
            EventKind::Submit => "submit",
            EventKind::Change => "change",
        }
    }
}

pub type Listener = Rc<dyn Fn(&Event)>;

/// Evento despachado sobre un elemento
pub struct Event {
    kind: EventKind,
    target: ElementRef,
    default_prevented: Cell<bool>,
}

impl Event {
    pub fn new(kind: EventKind, target: ElementRef) -> Self {
        Self {
            kind,
            target,
            default_prevented: Cell::new(false),
        }
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }

    pub fn target(&self) -> &ElementRef {
        &self.target
    }

    pub fn prevent_default(&self) {
        self.default_prevented.set(true);
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented.get()
    }
}

/// Helper para registrar un click handler
pub fn on_click<F>(element: &ElementRef, handler: F)
where
    F: Fn(&Event) + 'static,
{
    element.add_event_listener(EventKind::Click, handler);
}

/// Helper para registrar un submit handler (formularios)
pub fn on_submit<F>(element: &ElementRef, handler: F)
where
    F: Fn(&Event) + 'static,
{
    element.add_event_listener(EventKind::Submit, handler);
}

/// Helper para registrar un change handler (inputs, selects)
pub fn on_change<F>(element: &ElementRef, handler: F)
where
    F: Fn(&Event) + 'static,
{
    element.add_event_listener(EventKind::Change, handler);
}
