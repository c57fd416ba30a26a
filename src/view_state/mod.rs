//! View-state layer - row cells, grid padding and hit-testing
//!
//! Pure derivations from [`AppState`](crate::state::AppState) that the
//! renderer and the mouse handler share.
//!
//! # Module Structure
//!
//! - `rows`: RowCells / RowSlot - item to display cells, padded grid rows
//! - `hit_test`: ColumnLayout / HitTarget - column geometry and click targets

pub mod rows;

pub use hit_test::{hit_test, Column, ColumnKind, ColumnLayout, HitTarget, COLUMN_SPACING};
pub use rows::{grid_rows, ImageGlyph, LinkCell, RowCells, RowSlot, MIN_ROWS};
