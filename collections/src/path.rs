//! Hierarchical, slash-separated path names.

use std::fmt;
use std::str::FromStr;

/// A hierarchical name composed of slash-separated segments.
///
/// A path name is either absolute (`/a/b/c`) or relative (`a/b/c`). Empty
/// segments produced by repeated separators are discarded, so `/a//b` parses
/// to the same name as `/a/b`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct PathName {
    absolute: bool,
    segments: Vec<String>,
}

impl PathName {
    /// Create an empty, relative path name.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a path name from its string form.
    ///
    /// A leading `/` makes the result absolute. Parsing never fails: an empty
    /// string is the empty relative name.
    pub fn parse(path: &str) -> Self {
        Self::parse_segments(path, usize::MAX)
    }

    /// Parse at most `limit` leading segments of `path`, discarding the rest.
    pub fn parse_to_limit(limit: usize, path: &str) -> Self {
        Self::parse_segments(path, limit)
    }

    fn parse_segments(path: &str, limit: usize) -> Self {
        let absolute = path.starts_with('/');
        let segments = path
            .split('/')
            .filter(|segment| !segment.is_empty())
            .take(limit)
            .map(String::from)
            .collect();
        Self { absolute, segments }
    }

    /// Append a segment to the end of the path.
    pub fn append(&mut self, segment: impl Into<String>) -> &mut Self {
        self.segments.push(segment.into());
        self
    }

    /// Prepend a segment to the beginning of the path.
    pub fn prepend(&mut self, segment: impl Into<String>) -> &mut Self {
        self.segments.insert(0, segment.into());
        self
    }

    /// Return a new path containing the first `n` segments.
    ///
    /// The result preserves this path's absolute flag. If `n` exceeds the
    /// number of segments the whole path is returned.
    pub fn head(&self, n: usize) -> Self {
        Self {
            absolute: self.absolute,
            segments: self.segments.iter().take(n).cloned().collect(),
        }
    }

    /// Return a new, relative path containing the last `n` segments.
    pub fn tail(&self, n: usize) -> Self {
        let skip = self.segments.len().saturating_sub(n);
        Self {
            absolute: false,
            segments: self.segments.iter().skip(skip).cloned().collect(),
        }
    }

    /// Returns true if the path is absolute.
    pub fn is_absolute(&self) -> bool {
        self.absolute
    }

    /// Set whether the path is absolute.
    pub fn make_absolute(&mut self, absolute: bool) -> &mut Self {
        self.absolute = absolute;
        self
    }

    /// Returns the number of segments in the path.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true if the path has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Iterate over the segments from first to last.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().map(String::as_str)
    }
}

impl fmt::Display for PathName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.absolute {
            write!(f, "/")?;
        }
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, "/")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

impl FromStr for PathName {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<&str> for PathName {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}
