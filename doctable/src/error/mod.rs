//! Error types

mod config;
mod reconcile;
mod row;
mod table;

pub use config::*;
pub use reconcile::*;
pub use row::*;
pub use table::*;
