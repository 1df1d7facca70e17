pub mod file;
pub mod memory;
pub mod port;
pub mod snapshot;

pub use file::FileSnapshotStorage;
pub use memory::MemorySnapshotStorage;
#[cfg(test)]
pub use port::MockSnapshotStorage;
pub use port::{Blob, SnapshotError, SnapshotStorage};
pub use snapshot::{load_snapshot, save_snapshot, PersonalitySnapshot, SnapshotKeys};
