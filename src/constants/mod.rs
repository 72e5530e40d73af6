//! Generation constants organized by domain.
//!
//! Centralizing magic numbers makes tuning easier and documents intent.

mod corridors;
mod dungeon;

pub use corridors::*;
pub use dungeon::*;
