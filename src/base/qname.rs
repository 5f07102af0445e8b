use std::fmt;

use smol_str::SmolStr;

/// A dotted qualified name, stored as ordered segments.
///
/// Keeping the segments rather than a joined string lets consumers
/// reconstruct either the qualified form (`ngu.nadag.Id`) or the simple
/// form (`Id`) without re-parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct QName(Vec<SmolStr>);

impl QName {
    /// Create a QName from pre-split segments
    pub fn from_segments(segments: Vec<SmolStr>) -> Self {
        Self(segments)
    }

    /// Parse a dotted name such as `ngu.nadag` into segments
    pub fn parse(dotted: &str) -> Self {
        Self(dotted.split('.').map(SmolStr::new).collect())
    }

    /// A single-segment name
    pub fn single(segment: impl Into<SmolStr>) -> Self {
        Self(vec![segment.into()])
    }

    pub fn segments(&self) -> &[SmolStr] {
        &self.0
    }

    /// The last segment, e.g. `Id` for `ngu.nadag.Id`
    pub fn simple_name(&self) -> &str {
        self.0.last().map(SmolStr::as_str).unwrap_or_default()
    }

    /// The joined dotted form
    pub fn join(&self) -> String {
        self.0.join(".")
    }

    /// A new QName with `segment` appended
    pub fn child(&self, segment: impl Into<SmolStr>) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment.into());
        Self(segments)
    }

    pub fn push(&mut self, segment: impl Into<SmolStr>) {
        self.0.push(segment.into());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            f.write_str(segment)?;
        }
        Ok(())
    }
}

impl From<&str> for QName {
    fn from(dotted: &str) -> Self {
        Self::parse(dotted)
    }
}
