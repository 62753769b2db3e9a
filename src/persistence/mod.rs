pub mod files;
pub mod metadata;
pub mod snapshot;

pub use files::{
    atomic_write, ensure_nudge_dir, get_nudge_dir, init_local_nudge, meta_file, read_file,
    tasks_file,
};
pub use metadata::{load_metadata, save_metadata, AppMetadata};
pub use snapshot::{FileStore, Store};
