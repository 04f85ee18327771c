//! Archive catalog: album/track model, JSON loading and flattening.
//!
//! The catalog is read once at startup and never mutated. The flattened
//! `ArchiveItem` list is what the archive view renders.

mod flatten;
mod load;
mod model;

pub use flatten::flatten;
pub use load::{load, parse};
pub use model::*;

#[cfg(test)]
mod tests;
