//! `rts-sim` — AI manager and scene tick loop for the rts-ai workspace.
//!
//! # Tick loop
//!
//! ```text
//! for tick in 0..config.total_ticks:
//!   ① Movement   — World::step integrates every unit's navigation.
//!   ② Update     — update_action on each registered agent (insertion order),
//!                  then the completion check: dequeue the next command or
//!                  go idle.
//!   ③ Evaluate   — if the cadence says so, the AI manager picks a window of
//!                  the registry and each agent re-scores its actions.
//!   ④ Idle       — agents that went idle in ② are scored straight away.
//!   ⑤ Reap       — agents whose unit died are cleared and deregistered.
//!   ⑥ Observers  — on_tick_end, on_snapshot at the output interval.
//! ```
//!
//! # Crate layout
//!
//! | Module       | Contents                                                |
//! |--------------|---------------------------------------------------------|
//! | [`manager`]  | `AiManager`, `AiConfig`, `Cadence`, `Window`            |
//! | [`scene`]    | `Scene` — world, agents, manager and clock              |
//! | [`builder`]  | `SceneBuilder`                                          |
//! | [`observer`] | `SimObserver`, `NoopObserver`, `TickStats`              |
//! | [`error`]    | `SimError`, `SimResult<T>`                              |
//!
//! # Cargo features
//!
//! | Feature | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | `Serialize`/`Deserialize` on `AiConfig` and lower crates.    |

pub mod builder;
pub mod error;
pub mod manager;
pub mod observer;
pub mod scene;

#[cfg(test)]
mod tests;

pub use builder::SceneBuilder;
pub use error::{SimError, SimResult};
pub use manager::{AiConfig, AiManager, Cadence, Window};
pub use observer::{NoopObserver, SimObserver, TickStats};
pub use scene::Scene;
