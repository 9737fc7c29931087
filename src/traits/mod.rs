//! Trait definitions for Insightly operations.
//!
//! Each entity type implements the traits it supports. The traits carry
//! default implementations built on [`Resource`], so an entity only states
//! its endpoint and page size.

mod create;
mod delete;
mod get;
mod links;
mod list;
mod update;

pub use create::Create;
pub use delete::Delete;
pub use get::Get;
pub use links::Links;
pub use list::{List, DEFAULT_PAGE_SIZE};
pub use update::Update;

use std::fmt::{Debug, Display};

use serde::de::DeserializeOwned;
use serde::Serialize;

/// An entity served from a collection endpoint.
pub trait Resource: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Human-readable entity name used in errors and logs.
    const ENTITY_TYPE: &'static str;

    /// Collection path relative to the API root (e.g. `Opportunities`).
    const PATH: &'static str;

    /// The identifier type for this entity.
    type Id: Display + Debug + Send + Sync;

    /// Path of a single record.
    fn item_path(id: &Self::Id) -> String {
        format!("{}/{}", Self::PATH, id)
    }
}
