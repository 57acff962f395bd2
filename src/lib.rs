//! Workspace placeholder crate.
//!
//! This crate exists so host applications can depend on `harmonium-workspace`
//! and pull in the playback core crates (`backend-traits`, `core-runtime`,
//! `core-playback`) without wiring each one individually.

pub use backend_traits;
pub use core_playback;
pub use core_runtime;
