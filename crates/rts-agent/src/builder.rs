//! Fluent builder for spawning agents from an action library.
//!
//! # Usage
//!
//! ```rust,ignore
//! let lib = ActionLibrary::standard();
//! let worker = AgentBuilder::new(&lib, unit, PlayerId(0))
//!     .only(&["move", "collect"])
//!     .with_action(CreateBuilding::new(info, params))
//!     .spawn(&mut store)?;
//! ```

use rts_action::{Action, ActionLibrary};
use rts_core::{AgentId, ObjectId, PlayerId};

use crate::{AgentError, AgentResult, AgentStore};

/// Collects an agent's possible actions, then inserts it into an
/// [`AgentStore`].
///
/// Every possible action is a fresh instance: library templates are
/// instantiated, extra actions are taken by value.
pub struct AgentBuilder<'l> {
    library: &'l ActionLibrary,
    unit:    ObjectId,
    owner:   PlayerId,
    only:    Option<Vec<String>>,
    extra:   Vec<Box<dyn Action>>,
}

impl<'l> AgentBuilder<'l> {
    /// By default the agent receives every template in `library`.
    pub fn new(library: &'l ActionLibrary, unit: ObjectId, owner: PlayerId) -> Self {
        Self { library, unit, owner, only: None, extra: Vec::new() }
    }

    /// Restrict library templates to `names`, in that order.
    pub fn only(mut self, names: &[&str]) -> Self {
        self.only = Some(names.iter().map(|n| (*n).to_owned()).collect());
        self
    }

    /// Append an action that is not in the library.
    pub fn with_action(mut self, action: impl Action + 'static) -> Self {
        self.extra.push(Box::new(action));
        self
    }

    /// Resolve the action list without inserting.
    pub fn actions(self) -> AgentResult<Vec<Box<dyn Action>>> {
        let mut actions = match &self.only {
            Some(names) => {
                let names: Vec<&str> = names.iter().map(String::as_str).collect();
                self.library.instantiate_named(&names)?
            }
            None => self.library.instantiate_all(),
        };
        actions.extend(self.extra);
        if actions.is_empty() {
            return Err(AgentError::NoActions(self.unit));
        }
        Ok(actions)
    }

    pub fn spawn(self, store: &mut AgentStore) -> AgentResult<AgentId> {
        let (unit, owner) = (self.unit, self.owner);
        let actions = self.actions()?;
        let id = store.insert(unit, owner, actions)?;
        tracing::debug!(agent = %id, %unit, %owner, "agent spawned");
        Ok(id)
    }
}
