//! Fixed folder registry.
//!
//! Folders are routing targets, not a persisted collection. The table lives in
//! code; user-defined folders would need a store-backed registry instead.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::BrainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FolderKey {
    Inbox,
    Reads,
    Notes,
    Ideas,
    Tasks,
}

impl FolderKey {
    pub const ALL: [FolderKey; 5] = [
        FolderKey::Inbox,
        FolderKey::Reads,
        FolderKey::Notes,
        FolderKey::Ideas,
        FolderKey::Tasks,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FolderKey::Inbox => "inbox",
            FolderKey::Reads => "reads",
            FolderKey::Notes => "notes",
            FolderKey::Ideas => "ideas",
            FolderKey::Tasks => "tasks",
        }
    }

    /// Registry entry for this key.
    pub fn folder(self) -> &'static Folder {
        // FOLDERS is declared in the same order as ALL
        &FOLDERS[self as usize]
    }
}

impl fmt::Display for FolderKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FolderKey {
    type Err = BrainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FolderKey::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| BrainError::Validation(format!("Unknown folder: {}", s)))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Folder {
    pub key: FolderKey,
    pub name: &'static str,
    /// Hex color used by clients.
    pub color: &'static str,
    /// Icon hint used by clients.
    pub icon: &'static str,
    pub priority: u8,
}

pub static FOLDERS: [Folder; 5] = [
    Folder {
        key: FolderKey::Inbox,
        name: "Inbox",
        color: "#94a3b8",
        icon: "inbox",
        priority: 0,
    },
    Folder {
        key: FolderKey::Reads,
        name: "Reads",
        color: "#ec4899",
        icon: "book-open",
        priority: 1,
    },
    Folder {
        key: FolderKey::Notes,
        name: "Notes",
        color: "#f59e0b",
        icon: "notepad",
        priority: 2,
    },
    Folder {
        key: FolderKey::Ideas,
        name: "Ideas",
        color: "#22c55e",
        icon: "sparkles",
        priority: 3,
    },
    Folder {
        key: FolderKey::Tasks,
        name: "Tasks",
        color: "#3b82f6",
        icon: "check-circle",
        priority: 4,
    },
];

pub fn registry() -> &'static [Folder] {
    &FOLDERS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_matches_keys() {
        for key in FolderKey::ALL {
            assert_eq!(key.folder().key, key);
        }
        assert_eq!(registry().len(), 5);
    }

    #[test]
    fn test_priorities() {
        let pairs: Vec<(&str, u8)> = registry().iter().map(|f| (f.key.as_str(), f.priority)).collect();
        assert_eq!(
            pairs,
            vec![("inbox", 0), ("reads", 1), ("notes", 2), ("ideas", 3), ("tasks", 4)]
        );
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!("ideas".parse::<FolderKey>().unwrap(), FolderKey::Ideas);
        assert_eq!(FolderKey::Tasks.to_string(), "tasks");
        assert!("Ideas".parse::<FolderKey>().is_err());
        assert!("nonexistent-key".parse::<FolderKey>().is_err());
    }

    #[test]
    fn test_folder_serializes_with_string_key() {
        let json = serde_json::to_value(FolderKey::Reads.folder()).unwrap();
        assert_eq!(json["key"], "reads");
        assert_eq!(json["name"], "Reads");
        assert_eq!(json["icon"], "book-open");
        assert_eq!(json["priority"], 1);
    }
}
