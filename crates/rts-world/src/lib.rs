//! `rts-world` — what the unit AI acts upon.
//!
//! The AI core never moves units, deals damage or spends resources by
//! itself.  It calls the collaborator traits in [`services`], bundled as
//! [`Host`].  [`World`] is the in-memory implementation used by the scene
//! runner, the demo and the tests: a flat object table with straight-line
//! navigation, health with death notification, per-player ledgers and an
//! R-tree for proximity queries.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                |
//! |----------------|---------------------------------------------------------|
//! | [`services`]   | `Navigation`, `Combat`, `Economy`, `Spawner`, `SceneObjects`, `Host` |
//! | [`components`] | `Health`, `ResourcePile`, `NavAgent`                    |
//! | [`economy`]    | `Cost`, `Ledger`, `Treasury`                            |
//! | [`prefab`]     | `Prefab`, `PrefabKind`, `PrefabRegistry`                |
//! | [`object`]     | `WorldObject`                                           |
//! | [`world`]      | `World` (object table + spatial index)                  |
//! | [`error`]      | `WorldError`, `WorldResult<T>`                          |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on prefab and cost types.  |

pub mod components;
pub mod economy;
pub mod error;
pub mod object;
pub mod prefab;
pub mod services;
pub mod world;


pub use components::{Health, NavAgent, ResourcePile};
pub use economy::{Cost, Ledger, Treasury};
pub use error::{WorldError, WorldResult};
pub use object::WorldObject;
pub use prefab::{Prefab, PrefabKind, PrefabRegistry};
pub use services::{is_hostile, Combat, Economy, Host, Navigation, SceneObjects, Spawner};
pub use world::World;
