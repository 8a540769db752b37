//! View widgets for the record browser
//!
//! These widgets consume the projections produced by `scout-core` and
//! emit events back to the shell. They never mutate record state
//! themselves; every mutation goes through the store, followed by one
//! sync.

pub mod colors;
pub mod controls;
pub mod form;
pub mod scatter;
pub mod table;

use scout_core::{RawRow, RecordId};

pub use controls::{means_strip, selection_strip, EncodingControls};
pub use form::AddForm;
pub use scatter::ScatterView;
pub use table::RecordTable;

/// Events emitted by the views, routed into store mutations by the shell
#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    /// A plot marker was clicked; carries the record id
    PointClicked(RecordId),
    /// The user asked to delete a row; the shell confirms first
    DeleteRequested(RecordId),
    /// A row was edited inline and saved
    RowEdited(RecordId, RawRow),
    /// The add form was submitted
    AddSubmitted(RawRow),
}
