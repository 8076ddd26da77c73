//! Folder routing
//!
//! Deterministic, first-match-wins keyword routing. Content and tags are
//! compared case-insensitively; content keywords match as substrings
//! ("deadlines" hits "deadline"), tags must match exactly.

use std::collections::HashSet;

use brain_core::FolderKey;

/// Identifier recorded in `meta.routed_by` for thoughts routed by [`HeuristicRouter`].
pub const HEURISTIC_VERSION: &str = "heuristic-v0";

struct Rule {
    folder: FolderKey,
    keywords: &'static [&'static str],
    tag: &'static str,
}

/// Evaluated in order; the first matching rule wins.
const RULES: [Rule; 4] = [
    Rule {
        folder: FolderKey::Tasks,
        keywords: &["todo", "task", "next", "due", "deadline"],
        tag: "task",
    },
    Rule {
        folder: FolderKey::Ideas,
        keywords: &["idea", "concept", "brainstorm", "inspiration"],
        tag: "idea",
    },
    Rule {
        folder: FolderKey::Notes,
        keywords: &["meeting", "call", "note", "summary"],
        tag: "notes",
    },
    Rule {
        folder: FolderKey::Reads,
        keywords: &["article", "read", "bookmark", "link"],
        tag: "read",
    },
];

/// Map free text and tags to a folder. Never fails; falls back to inbox.
pub fn route(content: Option<&str>, tags: Option<&[String]>) -> FolderKey {
    let text = content.unwrap_or_default().to_lowercase();
    let tagset: HashSet<String> = tags
        .unwrap_or_default()
        .iter()
        .map(|t| t.to_lowercase())
        .collect();

    RULES
        .iter()
        .find(|rule| {
            rule.keywords.iter().any(|k| text.contains(k)) || tagset.contains(rule.tag)
        })
        .map_or(FolderKey::Inbox, |rule| rule.folder)
}

/// A classification policy. Implementations must be pure and thread-safe.
pub trait FolderRouter: Send + Sync {
    fn route(&self, content: Option<&str>, tags: Option<&[String]>) -> FolderKey;

    /// Provenance label stored with each routed thought.
    fn version(&self) -> &'static str;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicRouter;

impl FolderRouter for HeuristicRouter {
    fn route(&self, content: Option<&str>, tags: Option<&[String]>) -> FolderKey {
        route(content, tags)
    }

    fn version(&self) -> &'static str {
        HEURISTIC_VERSION
    }
}
