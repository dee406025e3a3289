use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::types::Coord2;

/// Change notification pushed synchronously to attached listeners.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum BoardEvent {
    /// A cell's open or marked flag transitioned.
    CellChanged { coords: Coord2 },
    /// The board reached a terminal state.
    GameEnded { won: bool },
}

/// Capability for receiving change notifications. Handlers run re-entrantly
/// on the mutating call's own thread and must not call back into the board.
pub trait ChangeListener {
    fn on_changed(&mut self, event: &BoardEvent);
}

impl<F: FnMut(&BoardEvent)> ChangeListener for F {
    fn on_changed(&mut self, event: &BoardEvent) {
        self(event)
    }
}

/// What a listener is attached to.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ListenerScope {
    /// Every event the board emits.
    Board,
    /// Only `CellChanged` events for the given cell.
    Cell(Coord2),
}

impl ListenerScope {
    fn wants(self, event: &BoardEvent) -> bool {
        match self {
            Self::Board => true,
            Self::Cell(coords) => matches!(event, BoardEvent::CellChanged { coords: c } if *c == coords),
        }
    }
}

struct Registration {
    scope: ListenerScope,
    listener: Box<dyn ChangeListener>,
}

/// Listener registry. Cleared wholesale on reset and on game end, so stale
/// observers never outlive the grid they were watching.
#[derive(Default)]
pub(crate) struct Listeners {
    entries: Vec<Registration>,
}

impl Listeners {
    pub(crate) fn attach(&mut self, scope: ListenerScope, listener: Box<dyn ChangeListener>) {
        self.entries.push(Registration { scope, listener });
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    pub(crate) fn emit(&mut self, event: &BoardEvent) {
        for entry in &mut self.entries {
            if entry.scope.wants(event) {
                entry.listener.on_changed(event);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::vec;
    use core::cell::RefCell;

    fn recording(log: &Rc<RefCell<Vec<BoardEvent>>>) -> Box<dyn ChangeListener> {
        let log = Rc::clone(log);
        Box::new(move |event: &BoardEvent| log.borrow_mut().push(*event))
    }

    #[test]
    fn board_scope_receives_everything() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut listeners = Listeners::default();
        listeners.attach(ListenerScope::Board, recording(&log));

        listeners.emit(&BoardEvent::CellChanged { coords: (1, 2) });
        listeners.emit(&BoardEvent::GameEnded { won: true });

        assert_eq!(
            *log.borrow(),
            vec![
                BoardEvent::CellChanged { coords: (1, 2) },
                BoardEvent::GameEnded { won: true },
            ]
        );
    }

    #[test]
    fn cell_scope_filters_other_cells() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut listeners = Listeners::default();
        listeners.attach(ListenerScope::Cell((0, 0)), recording(&log));

        listeners.emit(&BoardEvent::CellChanged { coords: (0, 1) });
        listeners.emit(&BoardEvent::GameEnded { won: false });
        listeners.emit(&BoardEvent::CellChanged { coords: (0, 0) });

        assert_eq!(*log.borrow(), vec![BoardEvent::CellChanged { coords: (0, 0) }]);
    }

    #[test]
    fn clear_detaches_all() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut listeners = Listeners::default();
        listeners.attach(ListenerScope::Board, recording(&log));
        listeners.attach(ListenerScope::Cell((0, 0)), recording(&log));
        assert_eq!(listeners.len(), 2);

        listeners.clear();
        listeners.emit(&BoardEvent::GameEnded { won: true });

        assert_eq!(listeners.len(), 0);
        assert!(log.borrow().is_empty());
    }
}
