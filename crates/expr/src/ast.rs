//! Parsed forms of property paths and interpolated strings.

/// A dotted property path such as `card.cardHeading`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyPath {
    /// Trimmed segments, in order. Never empty; an empty expression yields
    /// a single empty segment, which resolves to nothing.
    pub segments: Vec<String>,
}

impl PropertyPath {
    pub fn parse(expression: &str) -> Self {
        PropertyPath {
            segments: expression
                .trim()
                .split('.')
                .map(|segment| segment.trim().to_string())
                .collect(),
        }
    }
}

/// A piece of a string scanned for `${...}` placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextSegment {
    /// Text copied through unchanged.
    Literal(String),
    /// A `${...}` placeholder to resolve.
    Expression(PropertyPath),
    /// An escaped `\${...}` placeholder; holds the text without the
    /// backslash.
    Escaped(String),
}

/// A string split into literal text and placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Interpolation {
    pub segments: Vec<TextSegment>,
}

impl Interpolation {
    /// True if the string contained any placeholder, escaped or not.
    pub fn has_placeholders(&self) -> bool {
        self.segments
            .iter()
            .any(|segment| !matches!(segment, TextSegment::Literal(_)))
    }

    pub fn expressions(&self) -> impl Iterator<Item = &PropertyPath> {
        self.segments.iter().filter_map(|segment| match segment {
            TextSegment::Expression(path) => Some(path),
            _ => None,
        })
    }
}
