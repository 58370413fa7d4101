//! Type-safe git file status flags.
//!
//! This module defines [`FileStatus`], a bitset rather than a single enumeration:
//! the same path can be reported by more than one git command (for example `status`
//! and the ignored-file enumeration of `clean -n -X`) and the reports are combined
//! with bitwise OR.
//!
//! # Public API
//! - [`FileStatus`]: Flag set with one bit per status kind
//!
//! # Key Features
//! - **Flag merging**: `|` and `|=` combine reports for one path
//! - **Display formatting**: short git-style code for the dominant flag, full flag
//!   names via `Display`
//! - **Sorting logic**: built-in priority ordering for status display
//! - **Anomaly detection**: Ignored combined with any tracked-status bit

use serde::{Serialize, Serializer};
use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign};

/// Set of status flags reported for a single path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FileStatus(u16);

impl FileStatus {
    pub const NONE: FileStatus = FileStatus(0);
    /// Not known to git (`??`)
    pub const UNTRACKED: FileStatus = FileStatus(1 << 0);
    /// Matched by an ignore rule (`!!`)
    pub const IGNORED: FileStatus = FileStatus(1 << 1);
    /// Tracked and unchanged (`=`)
    pub const NOT_MODIFIED: FileStatus = FileStatus(1 << 2);
    /// New file in the index (`A`)
    pub const ADDED: FileStatus = FileStatus(1 << 3);
    /// Deleted (`D`)
    pub const REMOVED: FileStatus = FileStatus(1 << 4);
    /// Modified (`M`)
    pub const MODIFIED: FileStatus = FileStatus(1 << 5);
    /// Left side of a copy (`C`)
    pub const COPY_SOURCE: FileStatus = FileStatus(1 << 6);
    /// Right side of a copy (`C`)
    pub const COPY_DESTINATION: FileStatus = FileStatus(1 << 7);
    /// Left side of a rename (`R`)
    pub const RENAME_SOURCE: FileStatus = FileStatus(1 << 8);
    /// Right side of a rename (`R`)
    pub const RENAME_DESTINATION: FileStatus = FileStatus(1 << 9);
    /// Unmerged, needs conflict resolution (`U`)
    pub const CONFLICTED: FileStatus = FileStatus(1 << 10);

    // Display priority: conflicts first, then index changes, then the rest.
    const FLAGS: [(FileStatus, &'static str, &'static str, &'static str); 11] = [
        (Self::CONFLICTED, "conflicted", "UU", "both modified"),
        (Self::ADDED, "added", "A", "new file"),
        (Self::REMOVED, "removed", "D", "deleted"),
        (Self::RENAME_DESTINATION, "rename-destination", "R", "renamed"),
        (Self::RENAME_SOURCE, "rename-source", "R", "renamed from"),
        (Self::COPY_DESTINATION, "copy-destination", "C", "copied"),
        (Self::COPY_SOURCE, "copy-source", "C", "copied from"),
        (Self::MODIFIED, "modified", "M", "modified"),
        (Self::UNTRACKED, "untracked", "??", "untracked"),
        (Self::IGNORED, "ignored", "!!", "ignored"),
        (Self::NOT_MODIFIED, "not-modified", "=", "unchanged"),
    ];

    pub const fn bits(self) -> u16 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// True when every flag of `other` is set
    pub const fn contains(self, other: FileStatus) -> bool {
        self.0 & other.0 == other.0
    }

    /// True when any flag of `other` is set
    pub const fn intersects(self, other: FileStatus) -> bool {
        self.0 & other.0 != 0
    }

    /// Flags of `self` that are not in `other`
    pub const fn difference(self, other: FileStatus) -> FileStatus {
        FileStatus(self.0 & !other.0)
    }

    /// Ignored combined with any other flag
    ///
    /// Git never reports a path as both ignored and tracked, so this only
    /// happens when two commands observed the tree at different moments.
    pub const fn is_anomalous(self) -> bool {
        self.contains(Self::IGNORED) && !self.difference(Self::IGNORED).is_empty()
    }

    /// Highest-priority single flag, used for short display
    pub fn primary(self) -> Option<FileStatus> {
        Self::FLAGS
            .iter()
            .map(|(flag, ..)| *flag)
            .find(|flag| self.contains(*flag) && !flag.is_empty())
    }

    /// Short git-style code of the dominant flag
    pub fn as_str(self) -> &'static str {
        self.entry().map_or("", |(_, _, code, _)| code)
    }

    /// Human-readable description of the dominant flag
    pub fn description(self) -> &'static str {
        self.entry().map_or("clean", |(_, _, _, description)| description)
    }

    /// Get sort priority for status ordering
    pub fn sort_priority(self) -> u8 {
        Self::FLAGS
            .iter()
            .position(|(flag, ..)| self.contains(*flag))
            .map_or(Self::FLAGS.len() as u8, |i| i as u8)
    }

    /// Names of all set flags, in priority order
    pub fn names(self) -> Vec<&'static str> {
        Self::FLAGS
            .iter()
            .filter(|(flag, ..)| self.contains(*flag))
            .map(|(_, name, ..)| *name)
            .collect()
    }

    fn entry(self) -> Option<(FileStatus, &'static str, &'static str, &'static str)> {
        Self::FLAGS.iter().find(|(flag, ..)| self.contains(*flag)).copied()
    }
}

impl BitOr for FileStatus {
    type Output = FileStatus;

    fn bitor(self, rhs: FileStatus) -> FileStatus {
        FileStatus(self.0 | rhs.0)
    }
}

impl BitOrAssign for FileStatus {
    fn bitor_assign(&mut self, rhs: FileStatus) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for FileStatus {
    type Output = FileStatus;

    fn bitand(self, rhs: FileStatus) -> FileStatus {
        FileStatus(self.0 & rhs.0)
    }
}

impl fmt::Display for FileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("none");
        }
        f.write_str(&self.names().join("|"))
    }
}

impl Serialize for FileStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.names())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_status_as_str() {
        assert_eq!(FileStatus::MODIFIED.as_str(), "M");
        assert_eq!(FileStatus::ADDED.as_str(), "A");
        assert_eq!(FileStatus::REMOVED.as_str(), "D");
        assert_eq!(FileStatus::RENAME_SOURCE.as_str(), "R");
        assert_eq!(FileStatus::COPY_DESTINATION.as_str(), "C");
        assert_eq!(FileStatus::UNTRACKED.as_str(), "??");
        assert_eq!(FileStatus::IGNORED.as_str(), "!!");
        assert_eq!(FileStatus::CONFLICTED.as_str(), "UU");
        assert_eq!(FileStatus::NONE.as_str(), "");
    }

    #[test]
    fn test_merge_is_order_independent() {
        let a = FileStatus::ADDED | FileStatus::MODIFIED;
        let b = FileStatus::MODIFIED | FileStatus::ADDED;
        assert_eq!(a, b);

        let mut merged = FileStatus::NONE;
        merged |= FileStatus::MODIFIED;
        merged |= FileStatus::ADDED;
        assert_eq!(merged, a);
    }

    #[test]
    fn test_contains_and_intersects() {
        let status = FileStatus::ADDED | FileStatus::MODIFIED;
        assert!(status.contains(FileStatus::ADDED));
        assert!(!status.contains(FileStatus::ADDED | FileStatus::IGNORED));
        assert!(status.intersects(FileStatus::ADDED | FileStatus::IGNORED));
        assert!(!status.intersects(FileStatus::IGNORED));
    }

    #[test]
    fn test_dominant_flag_wins_display() {
        let status = FileStatus::MODIFIED | FileStatus::CONFLICTED;
        assert_eq!(status.as_str(), "UU");
        assert_eq!(status.description(), "both modified");
        assert_eq!(status.primary(), Some(FileStatus::CONFLICTED));
    }

    #[test]
    fn test_display_joins_names() {
        assert_eq!(FileStatus::NONE.to_string(), "none");
        assert_eq!(FileStatus::UNTRACKED.to_string(), "untracked");
        assert_eq!(
            (FileStatus::IGNORED | FileStatus::MODIFIED).to_string(),
            "modified|ignored"
        );
    }

    #[test]
    fn test_anomaly_detection() {
        assert!(!FileStatus::IGNORED.is_anomalous());
        assert!(!FileStatus::MODIFIED.is_anomalous());
        assert!((FileStatus::IGNORED | FileStatus::MODIFIED).is_anomalous());
        assert!((FileStatus::IGNORED | FileStatus::UNTRACKED).is_anomalous());
    }

    #[test]
    fn test_sort_priority() {
        assert_eq!(FileStatus::CONFLICTED.sort_priority(), 0);
        assert!(FileStatus::ADDED.sort_priority() < FileStatus::MODIFIED.sort_priority());
        assert!(FileStatus::MODIFIED.sort_priority() < FileStatus::UNTRACKED.sort_priority());
        assert!(FileStatus::UNTRACKED.sort_priority() < FileStatus::NONE.sort_priority());
    }

    #[test]
    fn test_serialize_as_names() {
        let json = serde_json::to_string(&(FileStatus::RENAME_DESTINATION | FileStatus::MODIFIED)).unwrap();
        assert_eq!(json, r#"["rename-destination","modified"]"#);
    }
}
