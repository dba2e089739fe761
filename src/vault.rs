//! Note Vault
//!
//! The document source the economy reads items from. A note is a markdown
//! file with optional `---` frontmatter (key: value pairs) and inline `#tags`.
//! `FsVault` loads a directory tree from disk; `MemoryVault` backs hosts and
//! tests that already hold note contents.

use std::collections::{BTreeSet, HashMap};
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{info, warn};

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#([A-Za-z][A-Za-z0-9_/-]*)").unwrap());

// ============================================================================
// Note
// ============================================================================

/// One document in the vault
#[derive(Debug, Clone)]
pub struct Note {
    /// Vault-relative path, forward slashes. This is the catalog identity.
    pub path: String,
    /// File stem, used as the item display name
    pub basename: String,
    /// Full text below the frontmatter block
    pub body: String,
    /// Frontmatter key/value pairs
    pub metadata: HashMap<String, String>,
    /// Frontmatter tags plus inline `#tag` occurrences
    pub tags: BTreeSet<String>,
}

/// Parse raw note text into a `Note` (frontmatter, tags, body)
pub fn parse_note(path: &str, raw: &str) -> Note {
    let (metadata, body) = split_frontmatter(raw);

    let mut tags = BTreeSet::new();
    if let Some(listed) = metadata.get("tags") {
        for tag in listed.trim_matches(['[', ']']).split(',') {
            let tag = tag.trim().trim_start_matches('#');
            if !tag.is_empty() {
                tags.insert(tag.to_string());
            }
        }
    }
    for capture in TAG_RE.captures_iter(&body) {
        tags.insert(capture[1].to_string());
    }

    let basename = Path::new(path)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(path)
        .to_string();

    Note {
        path: path.to_string(),
        basename,
        body,
        metadata,
        tags,
    }
}

/// Split a leading `---` frontmatter block off the body
fn split_frontmatter(raw: &str) -> (HashMap<String, String>, String) {
    let mut metadata = HashMap::new();

    let Some(rest) = raw.strip_prefix("---") else {
        return (metadata, raw.to_string());
    };
    let Some(end) = rest.find("\n---") else {
        return (metadata, raw.to_string());
    };

    for line in rest[..end].lines() {
        if let Some((key, value)) = line.split_once(':') {
            let key = key.trim();
            let value = value.trim().trim_matches('"');
            if !key.is_empty() {
                metadata.insert(key.to_string(), value.to_string());
            }
        }
    }

    let body = rest[end + 4..].trim_start_matches('\n').to_string();
    (metadata, body)
}

// ============================================================================
// Vault Source
// ============================================================================

/// Read access to the host's note collection
pub trait VaultSource {
    /// All notes in the vault
    fn all_notes(&self) -> Vec<Note>;

    /// Look up one note by its path identity
    fn note(&self, path: &str) -> Option<Note>;

    /// Notes whose path starts with the given folder prefix
    fn by_prefix(&self, prefix: &str) -> Vec<Note> {
        self.all_notes()
            .into_iter()
            .filter(|n| n.path.starts_with(prefix))
            .collect()
    }

    /// Notes carrying the given tag
    fn by_tag(&self, tag: &str) -> Vec<Note> {
        self.all_notes()
            .into_iter()
            .filter(|n| n.tags.contains(tag))
            .collect()
    }
}

// ============================================================================
// Filesystem Vault
// ============================================================================

/// Vault backed by a directory of markdown files
pub struct FsVault {
    notes: HashMap<String, Note>,
}

impl FsVault {
    pub fn new() -> Self {
        Self {
            notes: HashMap::new(),
        }
    }

    /// Load every `.md` file under the given root
    pub fn load_from_directory(&mut self, root: &Path) -> Result<(), String> {
        if !root.exists() {
            warn!("Vault directory does not exist: {:?}", root);
            return Ok(());
        }

        self.notes.clear();
        self.walk(root, root)?;
        info!("Loaded {} notes from vault", self.notes.len());
        Ok(())
    }

    fn walk(&mut self, root: &Path, dir: &Path) -> Result<(), String> {
        let entries = std::fs::read_dir(dir)
            .map_err(|e| format!("Failed to read vault directory {:?}: {}", dir, e))?;

        for entry in entries {
            let entry = entry.map_err(|e| format!("Failed to read entry: {}", e))?;
            let path = entry.path();

            if path.is_dir() {
                self.walk(root, &path)?;
            } else if path.extension().map_or(false, |ext| ext == "md") {
                let raw = std::fs::read_to_string(&path)
                    .map_err(|e| format!("Failed to read {:?}: {}", path, e))?;

                let rel = path
                    .strip_prefix(root)
                    .map_err(|e| format!("Path outside vault root: {}", e))?
                    .to_string_lossy()
                    .replace('\\', "/");

                self.notes.insert(rel.clone(), parse_note(&rel, &raw));
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}

impl Default for FsVault {
    fn default() -> Self {
        Self::new()
    }
}

impl VaultSource for FsVault {
    fn all_notes(&self) -> Vec<Note> {
        self.notes.values().cloned().collect()
    }

    fn note(&self, path: &str) -> Option<Note> {
        self.notes.get(path).cloned()
    }
}

// ============================================================================
// In-Memory Vault
// ============================================================================

/// Vault held entirely in memory
#[derive(Default)]
pub struct MemoryVault {
    notes: HashMap<String, Note>,
}

impl MemoryVault {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert raw note text, parsing frontmatter and tags
    pub fn insert(&mut self, path: &str, raw: &str) {
        self.notes.insert(path.to_string(), parse_note(path, raw));
    }
}

impl VaultSource for MemoryVault {
    fn all_notes(&self) -> Vec<Note> {
        self.notes.values().cloned().collect()
    }

    fn note(&self, path: &str) -> Option<Note> {
        self.notes.get(path).cloned()
    }
}
