//! `rp-map` — static map geometry and simulation metadata access.
//!
//! Both the document store holding map geometry and the metadata table are
//! external collaborators.  This crate fixes the contract the rest of the
//! workspace relies on and ships two backends for each.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                  |
//! |--------------|-----------------------------------------------------------|
//! | [`document`] | `MapDocument`, `DocumentClass`, `MapHeader`, `LaneDoc`, `RoadDoc`, `AoiDoc` |
//! | [`query`]    | `LaneQuery`, the lane predicate pushed down to stores     |
//! | [`store`]    | `MapStore` trait                                          |
//! | [`meta`]     | `MetadataSource` trait                                    |
//! | [`memory`]   | `MemoryMapStore`, `MemoryMetadata`                        |
//! | [`sqlite`]   | `SqliteStore` (feature = `"sqlite"` only)                 |
//! | [`error`]    | `MapError`, `MapResult<T>`                                |
//!
//! # Feature flags
//!
//! | Flag     | Effect                                                     |
//! |----------|------------------------------------------------------------|
//! | `sqlite` | Enables the `rusqlite`-backed `SqliteStore`.               |

pub mod document;
pub mod error;
pub mod memory;
pub mod meta;
pub mod query;
pub mod store;

#[cfg(feature = "sqlite")]
pub mod sqlite;


pub use document::{AoiDoc, DocumentClass, LaneDoc, MapDocument, MapHeader, RoadDoc};
pub use error::{MapError, MapResult};
pub use memory::{MemoryMapStore, MemoryMetadata};
pub use meta::MetadataSource;
pub use query::LaneQuery;
pub use store::MapStore;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteStore;
