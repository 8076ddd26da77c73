pub mod folder;
pub mod thought;

pub use folder::{registry, Folder, FolderKey, FOLDERS};
pub use thought::{Meta, MetaValue, Modality, Thought, ThoughtRecord, ThoughtStatus};
