//! DevCMS Core Library
//!
//! Schema graph and content snapshot models, plus the two loaders that build
//! them from a live database: [`schema::SchemaIntrospector`] and
//! [`content::ContentLoader`].

pub mod content;
pub mod error;
pub mod schema;

pub use content::model::ContentSnapshot;
pub use error::{DevcmsError, DevcmsResult};
pub use schema::model::SchemaGraph;
