//! `viv-world` — the population: persons, homes, assets, and the bidding
//! broker that connects them.
//!
//! All entities live in arenas on [`World`]; cross-references are typed
//! indices from `viv-core`, so the back-referencing object graph (activity →
//! asset, person → activity, asset → occupants) has no ownership cycles.
//!
//! | Module      | Contents                                                 |
//! |-------------|----------------------------------------------------------|
//! | [`asset`]   | `Asset` capacity broker, `AssetKind`, `AssetStatus`      |
//! | [`person`]  | `Person`, `PersonState`, `Interruption`, `DiaryEntry`    |
//! | [`home`]    | `Home` advertisement broadcast broker                    |
//! | [`world`]   | `World` arenas, commit operations, invariant audit       |
//! | [`builder`] | `PopulationBuilder` fluent construction                  |
//! | [`loader`]  | CSV population loader                                    |
//! | [`error`]   | `WorldError`, `WorldResult`                              |

pub mod asset;
pub mod builder;
pub mod error;
pub mod home;
pub mod loader;
pub mod person;
pub mod world;

#[cfg(test)]
mod tests;

pub use asset::{Asset, AssetKind, AssetStatus};
pub use builder::{AssetSpec, PersonSpec, PopulationBuilder};
pub use error::{WorldError, WorldResult};
pub use home::Home;
pub use loader::{load_population_csv, load_population_reader};
pub use person::{DiaryEntry, Interruption, Person, PersonState};
pub use world::World;
