//! # PrintCost Store
//!
//! 記憶體儲存與資料快照

pub mod memory;
pub mod snapshot;

// Re-export 主要類型
pub use memory::{MemoryProductStore, MemorySettingsStore};
pub use snapshot::Snapshot;
