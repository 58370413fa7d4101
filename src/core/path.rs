//! Canonical filesystem paths with platform-aware equivalence.
//!
//! This module provides [`CanonicalPath`], the key type used for status lookups and
//! change-set membership. Two spellings of the same location (different casing on a
//! case-insensitive filesystem, mixed separators, redundant `.`/`..` segments) compare
//! equal and hash identically.
//!
//! # Public API
//! - [`CanonicalPath`]: Immutable, normalized path value
//! - [`PathStyle`]: Separator and case rules of a platform's path syntax
//!
//! # Normalization
//! Components are processed left to right with a stack: `.` is dropped, `..` pops the
//! previous component unless there is none to pop (then it is kept), and a root
//! (`C:` drive token or leading separator) is never popped. Normalization is purely
//! lexical, so paths that no longer exist on disk behave exactly like existing ones.

use crate::core::error::{GitPulseError, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::path::Path;
use std::str::FromStr;

/// Separator and case rules of a platform's path syntax
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathStyle {
    separator: char,
    alt_separator: Option<char>,
    case_insensitive: bool,
    drive_roots: bool,
}

impl PathStyle {
    /// `\` separators (with `/` accepted), drive roots, case-insensitive
    pub const WINDOWS: PathStyle = PathStyle {
        separator: '\\',
        alt_separator: Some('/'),
        case_insensitive: true,
        drive_roots: true,
    };

    /// `/` separators, case-sensitive
    pub const POSIX: PathStyle = PathStyle {
        separator: '/',
        alt_separator: None,
        case_insensitive: false,
        drive_roots: false,
    };

    /// `/` separators on a case-insensitive filesystem
    pub const MACOS: PathStyle = PathStyle {
        case_insensitive: true,
        ..Self::POSIX
    };

    /// Style of the host platform
    pub const fn native() -> PathStyle {
        if cfg!(windows) {
            Self::WINDOWS
        } else if cfg!(target_os = "macos") {
            Self::MACOS
        } else {
            Self::POSIX
        }
    }

    pub fn separator(&self) -> char {
        self.separator
    }

    pub fn is_case_insensitive(&self) -> bool {
        self.case_insensitive
    }

    fn is_separator(&self, c: char) -> bool {
        c == self.separator || Some(c) == self.alt_separator
    }

    fn fold(&self, text: &str) -> String {
        if self.case_insensitive {
            text.to_lowercase()
        } else {
            text.to_string()
        }
    }

    fn is_invalid_char(&self, c: char) -> bool {
        if self.drive_roots {
            matches!(c, '"' | '<' | '>' | '|') || (c as u32) < 0x20
        } else {
            c == '\0'
        }
    }
}

impl Default for PathStyle {
    fn default() -> Self {
        Self::native()
    }
}

/// Immutable, normalized filesystem path compared by its canonical form
#[derive(Clone)]
pub struct CanonicalPath {
    actual: String,
    canonical: String,
    root: Option<String>,
    components: Vec<String>,
    style: PathStyle,
}

impl CanonicalPath {
    /// Parse a relative or absolute path using the host platform's rules
    pub fn new(relative_or_absolute: &str) -> Result<Self> {
        Self::with_style(relative_or_absolute, PathStyle::native())
    }

    /// Parse a relative or absolute path using an explicit path style
    pub fn with_style(relative_or_absolute: &str, style: PathStyle) -> Result<Self> {
        if relative_or_absolute.is_empty() {
            return Err(GitPulseError::invalid_path(relative_or_absolute, "path is empty"));
        }

        if relative_or_absolute.chars().any(|c| style.is_invalid_char(c)) {
            return Err(GitPulseError::invalid_path(
                relative_or_absolute,
                "path contains invalid characters",
            ));
        }

        let (root, components) = normalize(relative_or_absolute, style);
        Ok(Self::from_parts(root, components, style))
    }

    fn from_parts(root: Option<String>, components: Vec<String>, style: PathStyle) -> Self {
        let actual = render(root.as_deref(), &components, style);
        let canonical = style.fold(&actual);
        Self {
            actual,
            canonical,
            root,
            components,
            style,
        }
    }

    /// Display form: original casing, normalized separators and segments
    pub fn actual(&self) -> &str {
        &self.actual
    }

    /// Identity form used for equality, hashing and ordering
    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    pub fn style(&self) -> PathStyle {
        self.style
    }

    /// Path components below the root, in display form
    pub fn components(&self) -> &[String] {
        &self.components
    }

    pub fn is_relative(&self) -> bool {
        self.root.is_none()
    }

    /// Last component, unless the path ends at a root or a `..`
    pub fn file_name(&self) -> Option<&str> {
        self.components
            .last()
            .map(String::as_str)
            .filter(|name| *name != "..")
    }

    /// Extension of the file name without the leading dot
    pub fn extension(&self) -> Option<&str> {
        let name = self.file_name()?;
        let dot = name.rfind('.')?;
        let extension = &name[dot + 1..];
        (!extension.is_empty()).then_some(extension)
    }

    /// Containing directory, or `None` for roots and single relative components
    pub fn parent(&self) -> Option<CanonicalPath> {
        if self.components.is_empty() || (self.root.is_none() && self.components.len() == 1) {
            return None;
        }

        let components = self.components[..self.components.len() - 1].to_vec();
        Some(Self::from_parts(self.root.clone(), components, self.style))
    }

    /// Normalize `self` joined with each part in turn
    ///
    /// A rooted part replaces everything combined before it.
    pub fn combine<I, S>(&self, parts: I) -> Result<CanonicalPath>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut combined = self.actual.clone();
        for part in parts {
            let part = part.as_ref();
            let rooted = Self::with_style(part, self.style).is_ok_and(|p| !p.is_relative());
            if rooted {
                combined = part.to_string();
            } else {
                combined.push(self.style.separator);
                combined.push_str(part);
            }
        }
        Self::with_style(&combined, self.style)
    }

    /// Replace the file name's extension; `None` or an empty string removes it
    pub fn change_extension(&self, extension: Option<&str>) -> CanonicalPath {
        let Some(name) = self.file_name() else {
            return self.clone();
        };

        let stem = match name.rfind('.') {
            Some(dot) => &name[..dot],
            None => name,
        };

        let new_name = match extension.map(|e| e.trim_start_matches('.')) {
            Some(e) if !e.is_empty() => format!("{stem}.{e}"),
            _ => stem.to_string(),
        };

        let mut components = self.components.clone();
        if let Some(last) = components.last_mut() {
            *last = new_name;
        }
        Self::from_parts(self.root.clone(), components, self.style)
    }

    /// Express `self` relative to `base`
    ///
    /// Paths on different roots have no relative form; `self` is returned unchanged.
    pub fn relative_to(&self, base: &CanonicalPath) -> CanonicalPath {
        let same_root = match (&self.root, &base.root) {
            (None, None) => true,
            (Some(a), Some(b)) => self.style.fold(a) == self.style.fold(b),
            _ => false,
        };
        if !same_root {
            return self.clone();
        }

        let shared = self.shared_depth(base);
        let own = self.segments();
        let ups = base.segments().len() - shared;

        let components = std::iter::repeat("..")
            .take(ups)
            .chain(own[shared..].iter().copied())
            .map(str::to_string)
            .collect();
        Self::from_parts(None, components, self.style)
    }

    /// Longest shared leading part of both paths, `None` when they share no root
    pub fn common_prefix(&self, other: &CanonicalPath) -> Option<CanonicalPath> {
        let shared = self.shared_depth(other);
        if shared == 0 {
            return None;
        }

        let (root, components) = match &self.root {
            Some(root) => (Some(root.clone()), self.components[..shared - 1].to_vec()),
            None => (None, self.components[..shared].to_vec()),
        };
        Some(Self::from_parts(root, components, self.style))
    }

    /// True when `other` is `self` or lies below it
    pub fn is_parent_of(&self, other: &CanonicalPath) -> bool {
        self.common_prefix(other).as_ref() == Some(self)
    }

    pub fn as_std_path(&self) -> &Path {
        Path::new(&self.actual)
    }

    pub fn exists(&self) -> bool {
        self.as_std_path().exists()
    }

    pub fn is_directory(&self) -> bool {
        self.as_std_path().is_dir()
    }

    fn segments(&self) -> Vec<&str> {
        self.root
            .iter()
            .chain(self.components.iter())
            .map(String::as_str)
            .collect()
    }

    fn shared_depth(&self, other: &CanonicalPath) -> usize {
        self.segments()
            .iter()
            .zip(other.segments().iter())
            .take_while(|(a, b)| self.style.fold(a) == self.style.fold(b))
            .count()
    }
}

fn normalize(raw: &str, style: PathStyle) -> (Option<String>, Vec<String>) {
    let starts_with_separator = raw.chars().next().is_some_and(|c| style.is_separator(c));
    let mut root = starts_with_separator.then(|| style.separator.to_string());
    let mut stack: Vec<String> = Vec::new();

    for (i, component) in raw.split(|c| style.is_separator(c)).enumerate() {
        if i == 0 && style.drive_roots && component.len() > 1 && component.ends_with(':') {
            root = Some(component.to_string());
            continue;
        }

        match component {
            "" | "." => {}
            ".." => match stack.last() {
                Some(top) if top != ".." => {
                    stack.pop();
                }
                None if root.is_some() => {}
                _ => stack.push(component.to_string()),
            },
            _ => stack.push(component.to_string()),
        }
    }

    (root, stack)
}

fn render(root: Option<&str>, components: &[String], style: PathStyle) -> String {
    let separator = style.separator.to_string();
    let joined = components.join(&separator);
    match root {
        Some(root) if root == separator => format!("{root}{joined}"),
        Some(drive) => format!("{drive}{separator}{joined}"),
        None if joined.is_empty() => ".".to_string(),
        None => joined,
    }
}

impl PartialEq for CanonicalPath {
    fn eq(&self, other: &Self) -> bool {
        self.canonical == other.canonical
    }
}

impl Eq for CanonicalPath {}

impl Hash for CanonicalPath {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical.hash(state);
    }
}

impl PartialOrd for CanonicalPath {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CanonicalPath {
    fn cmp(&self, other: &Self) -> Ordering {
        self.canonical.cmp(&other.canonical)
    }
}

impl fmt::Display for CanonicalPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.actual)
    }
}

impl fmt::Debug for CanonicalPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CanonicalPath").field(&self.actual).finish()
    }
}

impl FromStr for CanonicalPath {
    type Err = GitPulseError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<&str> for CanonicalPath {
    type Error = GitPulseError;

    fn try_from(value: &str) -> Result<Self> {
        Self::new(value)
    }
}

impl TryFrom<&Path> for CanonicalPath {
    type Error = GitPulseError;

    fn try_from(value: &Path) -> Result<Self> {
        let text = value
            .to_str()
            .ok_or_else(|| GitPulseError::invalid_path(value.to_string_lossy(), "path is not valid UTF-8"))?;
        Self::new(text)
    }
}

impl AsRef<Path> for CanonicalPath {
    fn as_ref(&self) -> &Path {
        self.as_std_path()
    }
}

impl Serialize for CanonicalPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.actual)
    }
}

impl<'de> Deserialize<'de> for CanonicalPath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::new(&text).map_err(serde::de::Error::custom)
    }
}
