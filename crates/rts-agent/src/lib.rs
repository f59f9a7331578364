//! `rts-agent` — the per-unit AI runtime.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                        |
//! |-------------|-----------------------------------------------------------------|
//! | [`agent`]   | `Agent`, `ActionRequest`, `AddOutcome`, `Completion`, `AgentSnapshot` |
//! | [`store`]   | `AgentStore` — slot storage, one agent per unit                 |
//! | [`builder`] | `AgentBuilder` — possible actions from an `ActionLibrary`       |
//! | [`error`]   | `AgentError`, `AgentResult<T>`                                  |
//!
//! # State machine
//!
//! ```text
//! Idle ──add_action / evaluate_actions──► Active(A)
//! Active(A) ──select B──► exit A, enter + execute B ──► Active(B)
//! Active(A) ──completed, queue non-empty──► Active(next queued)
//! Active(A) ──completed, queue empty / clear_all_actions──► Idle
//! ```

pub mod agent;
pub mod builder;
pub mod error;
pub mod store;


pub use agent::{ActionRequest, AddOutcome, Agent, AgentSnapshot, Completion};
pub use builder::AgentBuilder;
pub use error::{AgentError, AgentResult};
pub use store::AgentStore;
