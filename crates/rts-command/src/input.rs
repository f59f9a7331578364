//! Input events and the controller bound to them.
//!
//! Input sources emit [`InputEvent`]s on an [`InputBus`].  A
//! [`CommandController`] subscribes on construction and buffers events; the
//! game loop calls [`CommandController::apply`] between ticks so commands
//! never interleave with a tick in progress.  Dropping the controller
//! detaches it from the bus.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use rts_core::{AgentId, PlayerId, Point, Signal, Subscription};
use rts_sim::Scene;

use crate::{Command, Commander, IssueReport, Selection};

#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    /// Click-select.
    Select { agents: Vec<AgentId>, additive: bool },
    /// Drag-select `owner`'s units inside a rectangle.
    SelectRect { owner: PlayerId, from: Point, to: Point, additive: bool },
    ClearSelection,
    /// Order for whatever is selected when the event is applied.
    Command(Command),
}

/// Broadcast channel for [`InputEvent`]s.
#[derive(Debug, Default)]
pub struct InputBus {
    signal: Signal<InputEvent>,
}

impl InputBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver `event` to every listener.  Returns how many received it.
    pub fn emit(&self, event: InputEvent) -> usize {
        self.signal.emit(&event)
    }

    pub fn subscribe(&self, handler: impl FnMut(&InputEvent) + 'static) -> Subscription {
        self.signal.subscribe(handler)
    }

    /// Number of attached listeners.
    pub fn listeners(&self) -> usize {
        self.signal.len()
    }
}

/// Owns a [`Selection`] and applies buffered input to a scene.
pub struct CommandController {
    selection: Selection,
    pending:   Rc<RefCell<VecDeque<InputEvent>>>,
    binding:   Subscription,
}

impl CommandController {
    /// Bind to `bus`.  The binding lasts until the controller is dropped or
    /// [`unbind`][Self::unbind] is called.
    pub fn new(bus: &InputBus) -> Self {
        let pending: Rc<RefCell<VecDeque<InputEvent>>> = Rc::default();
        let sink = Rc::clone(&pending);
        let binding = bus.subscribe(move |event| sink.borrow_mut().push_back(event.clone()));
        Self { selection: Selection::new(), pending, binding }
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut Selection {
        &mut self.selection
    }

    pub fn is_bound(&self) -> bool {
        self.binding.is_active()
    }

    /// Stop receiving events.  Already buffered events are kept.
    pub fn unbind(&mut self) {
        self.binding.unsubscribe();
    }

    /// Buffered events not yet applied.
    pub fn pending(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Apply buffered events in arrival order.
    pub fn apply(&mut self, scene: &mut Scene) -> IssueReport {
        let events: Vec<InputEvent> = self.pending.borrow_mut().drain(..).collect();
        let mut report = IssueReport::default();
        for event in events {
            match event {
                InputEvent::Select { agents, additive } => {
                    if !additive {
                        self.selection.clear();
                    }
                    for agent in agents.into_iter().filter(|&a| scene.agents.contains(a)) {
                        self.selection.select(agent);
                    }
                }
                InputEvent::SelectRect { owner, from, to, additive } => {
                    self.selection.select_in_rect(scene, owner, from, to, additive);
                }
                InputEvent::ClearSelection => self.selection.clear(),
                InputEvent::Command(command) => {
                    self.selection.retain_live(scene);
                    report.merge(Commander::issue(scene, &self.selection, &command));
                }
            }
        }
        report
    }
}

impl std::fmt::Debug for CommandController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandController")
            .field("selection", &self.selection)
            .field("pending", &self.pending())
            .field("bound", &self.is_bound())
            .finish()
    }
}
