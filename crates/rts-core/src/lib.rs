//! `rts-core` — foundational types for the `rts-ai` workspace.
//!
//! This crate is a dependency of every other `rts-*` crate.  It intentionally
//! has no `rts-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module     | Contents                                                   |
//! |------------|------------------------------------------------------------|
//! | [`ids`]    | `AgentId`, `ObjectId`, `PrefabId`, `PlayerId`, `ResourceKind` |
//! | [`geo`]    | `Point`, `Layer`, `LayerMask`                              |
//! | [`time`]   | `Tick`, `SimClock`, `SimConfig`                            |
//! | [`rng`]    | `SimRng` (scene setup)                                     |
//! | [`signal`] | `Signal<T>`, `Subscription` (scoped observer)              |
//! | [`error`]  | `CoreError`, `CoreResult`                                  |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public value types.  |

pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod signal;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use geo::{Layer, LayerMask, Point};
pub use ids::{AgentId, ObjectId, PlayerId, PrefabId, ResourceKind};
pub use rng::SimRng;
pub use signal::{Signal, Subscription};
pub use time::{SimClock, SimConfig, Tick};
