//! Porcelain status parsing and the deduplicated status model.
//!
//! # Public API
//! - [`StatusParser`]: Turns `git status --porcelain` text into [`StatusEntry`] values
//! - [`StatusEntry`]: One path with its merged flags and optional rename/copy partner
//! - [`StatusCollection`]: Entries keyed by [`CanonicalPath`], merged with bitwise OR
//!
//! Parsing never fails: blank and malformed lines are skipped and unknown status codes
//! fall back to Untracked, so drift in git's output format degrades rather than breaks
//! status reporting.

use crate::core::file_status::FileStatus;
use crate::core::path::CanonicalPath;
use serde::{Serialize, Serializer};
use std::borrow::Cow;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// A path with its status flags
///
/// Rename and copy pairs reference each other by path; the partner entry lives in
/// the same [`StatusCollection`] and is looked up with [`StatusCollection::related`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusEntry {
    pub path: CanonicalPath,
    pub status: FileStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related: Option<CanonicalPath>,
}

impl StatusEntry {
    pub fn new(path: CanonicalPath, status: FileStatus) -> Self {
        Self {
            path,
            status,
            related: None,
        }
    }

    pub fn with_related(path: CanonicalPath, status: FileStatus, related: CanonicalPath) -> Self {
        Self {
            path,
            status,
            related: Some(related),
        }
    }
}

/// Line parser for `git status --porcelain` output
#[derive(Debug, Clone)]
pub struct StatusParser {
    base: CanonicalPath,
}

impl StatusParser {
    /// Relative paths in the output are resolved against `working_directory`
    pub fn new(working_directory: CanonicalPath) -> Self {
        Self {
            base: working_directory,
        }
    }

    pub fn parse(&self, output: &str) -> Vec<StatusEntry> {
        output
            .lines()
            .filter(|line| !line.trim().is_empty())
            .flat_map(|line| self.parse_line(line))
            .collect()
    }

    /// Parse one `<code> <path>` or `<code> <from> -> <to>` line into zero, one or two entries
    pub fn parse_line(&self, line: &str) -> Vec<StatusEntry> {
        let line = line.trim();
        let Some((code, rest)) = line.split_once([' ', '\t']) else {
            return Vec::new();
        };
        let rest = rest.trim_start_matches([' ', '\t']);
        if rest.is_empty() {
            return Vec::new();
        }

        let first = code.chars().next().map(|c| c.to_ascii_uppercase());
        let pair = match first {
            Some('C') => Some((FileStatus::COPY_SOURCE, FileStatus::COPY_DESTINATION)),
            Some('R') => Some((FileStatus::RENAME_SOURCE, FileStatus::RENAME_DESTINATION)),
            _ => None,
        };

        if let Some((source_status, destination_status)) = pair {
            return self
                .parse_pair(rest, source_status, destination_status)
                .unwrap_or_default();
        }

        let status = match first {
            Some('A') => FileStatus::ADDED,
            Some('D') => FileStatus::REMOVED,
            Some('M') => FileStatus::MODIFIED,
            Some('U') => FileStatus::CONFLICTED,
            Some('=') => FileStatus::NOT_MODIFIED,
            _ => FileStatus::UNTRACKED,
        };

        self.resolve(rest)
            .map(|path| vec![StatusEntry::new(path, status)])
            .unwrap_or_default()
    }

    fn parse_pair(
        &self,
        rest: &str,
        source_status: FileStatus,
        destination_status: FileStatus,
    ) -> Option<Vec<StatusEntry>> {
        let (from, to) = rest.split_once("->")?;
        let source = self.resolve(from.trim())?;
        let destination = self.resolve(to.trim())?;

        Some(vec![
            StatusEntry::with_related(source.clone(), source_status, destination.clone()),
            StatusEntry::with_related(destination, destination_status, source),
        ])
    }

    /// Resolve a porcelain path against the working directory
    pub fn resolve(&self, raw: &str) -> Option<CanonicalPath> {
        let text = unquote(raw);
        let path = match CanonicalPath::with_style(&text, self.base.style()) {
            Ok(path) => path,
            Err(e) => {
                log::debug!("Skipping status path {raw:?}: {e}");
                return None;
            }
        };

        if !path.is_relative() {
            return Some(path);
        }
        self.base.combine([text.as_ref()]).ok()
    }
}

/// Undo git's C-style quoting of paths with special characters
fn unquote(raw: &str) -> Cow<'_, str> {
    let Some(inner) = raw
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
    else {
        return Cow::Borrowed(raw);
    };

    let bytes = inner.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] != b'\\' || i + 1 == bytes.len() {
            out.push(bytes[i]);
            i += 1;
            continue;
        }

        i += 1;
        match bytes[i] {
            b'n' => out.push(b'\n'),
            b't' => out.push(b'\t'),
            b'r' => out.push(b'\r'),
            b'a' => out.push(0x07),
            b'b' => out.push(0x08),
            b'f' => out.push(0x0c),
            b'v' => out.push(0x0b),
            b'0'..=b'7' => {
                let digits = bytes[i..]
                    .iter()
                    .take(3)
                    .take_while(|b| (b'0'..=b'7').contains(*b))
                    .count();
                let value = bytes[i..i + digits]
                    .iter()
                    .fold(0u32, |acc, b| acc * 8 + u32::from(b - b'0'));
                out.push(value as u8);
                i += digits;
                continue;
            }
            other => out.push(other),
        }
        i += 1;
    }

    Cow::Owned(String::from_utf8_lossy(&out).into_owned())
}

/// Status entries keyed by canonical path
#[derive(Debug, Clone, Default)]
pub struct StatusCollection {
    entries: HashMap<CanonicalPath, StatusEntry>,
}

impl StatusCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold entries into the collection, OR-merging flags of repeated paths
    pub fn insert(&mut self, entry: StatusEntry) {
        match self.entries.entry(entry.path.clone()) {
            Entry::Vacant(slot) => {
                if entry.status.is_anomalous() {
                    log::warn!("{} is reported as {}", entry.path, entry.status);
                }
                slot.insert(entry);
            }
            Entry::Occupied(mut slot) => {
                let existing = slot.get_mut();
                existing.status |= entry.status;

                if let Some(incoming) = entry.related {
                    if existing.related.is_none() {
                        existing.related = Some(incoming);
                    } else if existing.related.as_ref() != Some(&incoming) {
                        log::error!(
                            "Conflicting rename/copy data for {}: {:?} vs {}",
                            existing.path,
                            existing.related,
                            incoming
                        );
                        debug_assert!(
                            false,
                            "conflicting related paths for {}",
                            existing.path
                        );
                    }
                }

                if existing.status.is_anomalous() {
                    log::warn!("{} is reported as {}", existing.path, existing.status);
                }
            }
        }
    }

    pub fn get(&self, path: &CanonicalPath) -> Option<&StatusEntry> {
        self.entries.get(path)
    }

    /// Flags for `path`, empty when git reported nothing for it
    pub fn status_of(&self, path: &CanonicalPath) -> FileStatus {
        self.get(path).map_or(FileStatus::NONE, |entry| entry.status)
    }

    pub fn contains(&self, path: &CanonicalPath) -> bool {
        self.entries.contains_key(path)
    }

    /// Rename/copy partner of `entry`
    pub fn related(&self, entry: &StatusEntry) -> Option<&StatusEntry> {
        entry.related.as_ref().and_then(|path| self.get(path))
    }

    pub fn ignored_paths(&self) -> impl Iterator<Item = &CanonicalPath> {
        self.entries
            .values()
            .filter(|entry| entry.status.contains(FileStatus::IGNORED))
            .map(|entry| &entry.path)
    }

    /// True for an ignored path or any path below an ignored directory
    pub fn is_ignored(&self, path: &CanonicalPath) -> bool {
        self.status_of(path).contains(FileStatus::IGNORED)
            || self.ignored_paths().any(|ignored| ignored.is_parent_of(path))
    }

    /// Entries carrying Ignored together with another flag
    pub fn anomalies(&self) -> impl Iterator<Item = &StatusEntry> {
        self.entries.values().filter(|entry| entry.status.is_anomalous())
    }

    /// Entries ordered by canonical path
    pub fn entries(&self) -> Vec<&StatusEntry> {
        let mut entries: Vec<_> = self.entries.values().collect();
        entries.sort_by(|a, b| a.path.cmp(&b.path));
        entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<StatusEntry> for StatusCollection {
    fn from_iter<I: IntoIterator<Item = StatusEntry>>(iter: I) -> Self {
        let mut collection = Self::new();
        for entry in iter {
            collection.insert(entry);
        }
        collection
    }
}

impl Extend<StatusEntry> for StatusCollection {
    fn extend<I: IntoIterator<Item = StatusEntry>>(&mut self, iter: I) {
        for entry in iter {
            self.insert(entry);
        }
    }
}

impl Serialize for StatusCollection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.entries())
    }
}
