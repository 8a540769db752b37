//! Core state machine for the record browser
//!
//! This crate owns the in-memory record set (the single source of truth),
//! the derived-field computations, and the synchronization step that
//! rebuilds both visual projections after every mutation. It is UI-free:
//! the rendering crates consume the projections produced here.

pub mod datasets;
pub mod derive;
pub mod error;
pub mod record;
pub mod schema;
pub mod session;
pub mod store;
pub mod sync;

// Re-export commonly used types
pub use error::CoreError;
pub use record::{FieldValue, RawRow, Record, RecordId};
pub use schema::{DatasetSchema, FieldSpec, FieldType, RatioSpec};
pub use session::{Language, Session, Texts};
pub use store::RecordStore;
pub use sync::{Encoding, ListProjection, ListRow, PlotProjection, Projections};
