//! `rts-command` — the player-facing command surface.
//!
//! # Crate layout
//!
//! | Module        | Contents                                               |
//! |---------------|--------------------------------------------------------|
//! | [`selection`] | `Selection` — ordered set of selected agents           |
//! | [`designate`] | `resolve_designation`, `available_actions`             |
//! | [`commander`] | `Command`, `Commander::issue`, `IssueReport`           |
//! | [`input`]     | `InputEvent`, `InputBus`, `CommandController`          |
//!
//! # Flow
//!
//! ```text
//! input source ──emit──► InputBus ──(scoped subscription)──► CommandController
//!                                                               │ apply(scene)
//!                                   Selection + Command ──► Commander::issue
//!                                                               │
//!                                     Scene::add_action / Scene::clear_actions
//! ```

pub mod commander;
pub mod designate;
pub mod input;
pub mod selection;


pub use commander::{Command, Commander, IssueReport};
pub use designate::{available_actions, resolve_designation};
pub use input::{CommandController, InputBus, InputEvent};
pub use selection::Selection;
