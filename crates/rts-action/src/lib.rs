//! `rts-action` — what a unit can do.
//!
//! Every capability is an [`Action`]: scored by `evaluate`, driven through
//! `enter` / `execute` / `update`, and released by `exit` / `cancel`.
//! Composite actions own their movement part by value:
//!
//! ```text
//! DirectedAttack ─► MoveToTarget ─► MoveToPoint
//! CollectResource ─► MoveToTarget ─► MoveToPoint
//! CreateBuilding ─► MoveToPoint
//! Patrol ─► MoveToPoint
//! ```
//!
//! # Crate layout
//!
//! | Module             | Contents                                             |
//! |--------------------|------------------------------------------------------|
//! | [`action`]         | `Action` trait, `ActionId`, `ActionInfo`, `UtilityWeights` |
//! | [`context`]        | `ActionContext<'a>` — tick, unit, owner, `&mut dyn Host` |
//! | [`move_to_point`]  | `MoveToPoint`                                        |
//! | [`move_to_target`] | `MoveToTarget`                                       |
//! | [`patrol`]         | `Patrol`                                             |
//! | [`attack`]         | `DirectedAttack`                                     |
//! | [`build`]          | `CreateBuilding`, `BuildState`                       |
//! | [`collect`]        | `CollectResource`                                    |
//! | [`library`]        | `ActionLibrary` — named templates                    |
//! | [`catalog`]        | `load_catalog_csv` / `load_catalog_reader`           |
//! | [`error`]          | `ActionError`, `ActionResult<T>`                     |

pub mod action;
pub mod attack;
pub mod build;
pub mod catalog;
pub mod collect;
pub mod context;
pub mod error;
pub mod library;
pub mod move_to_point;
pub mod move_to_target;
pub mod patrol;

#[cfg(test)]
mod tests;

pub use action::{Action, ActionId, ActionInfo, UtilityWeights};
pub use attack::{DirectedAttack, DirectedAttackParams};
pub use build::{BuildState, CreateBuilding, CreateBuildingParams};
pub use catalog::{load_catalog_csv, load_catalog_reader};
pub use collect::{CollectResource, CollectResourceParams};
pub use context::ActionContext;
pub use error::{ActionError, ActionResult};
pub use library::ActionLibrary;
pub use move_to_point::{MoveToPoint, MoveToPointParams};
pub use move_to_target::{MoveToTarget, MoveToTargetParams};
pub use patrol::{Patrol, PatrolParams};
