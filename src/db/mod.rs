//! Storage layer: the master collection and its save file.

pub mod codec;
pub mod collection;
pub mod store;

pub use collection::{CollectionChange, CollectionObserver, RunCollection, RunEntry, RunId};
pub use store::DiaryStore;

/// Save file name used when no other path is configured.
pub const DEFAULT_SAVE_FILE: &str = "runningdiary.dat";
