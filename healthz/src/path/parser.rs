//! Path expression parser.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A structured path into the device component tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Path {
    /// Elements in left-to-right order. Empty for the root path.
    #[serde(default, alias = "elem")]
    pub elements: Vec<PathElement>,
}

/// A single named step of a path, optionally narrowed by predicates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathElement {
    /// Element name (e.g., "component")
    pub name: String,
    /// Key/value predicates from the bracket qualifier (e.g., name=fan1)
    #[serde(default, alias = "key", skip_serializing_if = "BTreeMap::is_empty")]
    pub predicates: BTreeMap<String, String>,
}

/// Result of scanning one `/`-delimited segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Plain name, or anything that is not a well-formed `name[key=value]`.
    Plain(&'a str),
    /// `name[key=value]` with the value still carrying its quotes.
    Keyed {
        name: &'a str,
        key: &'a str,
        value: &'a str,
    },
}

/// Parse a path expression into a structured path.
///
/// Never fails: segments that do not match `name[key=value]` become plain
/// elements carrying the raw segment text as their name.
pub fn parse_path(input: &str) -> Path {
    let trimmed = input.strip_prefix('/').unwrap_or(input);

    let elements = trimmed
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| scan_segment(segment).into_element())
        .collect();

    Path { elements }
}

/// Scan a single segment (no `/` inside) into a tagged result.
///
/// The name runs up to the first `[`, the segment must end with `]`, and the
/// bracket content is split at its first `=`. An empty name or key is
/// treated as malformed.
pub fn scan_segment(segment: &str) -> Segment<'_> {
    let open = match segment.find('[') {
        Some(i) => i,
        None => return Segment::Plain(segment),
    };

    let name = &segment[..open];
    if name.is_empty() || !segment.ends_with(']') {
        return Segment::Plain(segment);
    }

    let content = &segment[open + 1..segment.len() - 1];
    match content.split_once('=') {
        Some((key, value)) if !key.is_empty() => Segment::Keyed { name, key, value },
        _ => Segment::Plain(segment),
    }
}

/// Remove one layer of matching single or double quotes.
fn strip_quotes(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

impl Segment<'_> {
    /// Build the path element this segment describes.
    pub fn into_element(self) -> PathElement {
        match self {
            Segment::Plain(name) => PathElement::new(name),
            Segment::Keyed { name, key, value } => {
                PathElement::new(name).with_predicate(key, strip_quotes(value))
            }
        }
    }

    /// Whether a keyed segment looks like it held more than one bracket
    /// group (`a[k1=v1][k2=v2]`).
    ///
    /// Only one predicate per element is supported; the trailing groups end
    /// up inside the first predicate's value.
    pub fn has_extra_groups(&self) -> bool {
        match self {
            Segment::Plain(_) => false,
            Segment::Keyed { value, .. } => value.contains("]["),
        }
    }
}

impl PathElement {
    /// Create an element with no predicates.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            predicates: BTreeMap::new(),
        }
    }

    /// Add a predicate to this element.
    pub fn with_predicate(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.predicates.insert(key.into(), value.into());
        self
    }

    /// Check if the element has no bracket qualifier.
    pub fn is_plain(&self) -> bool {
        self.predicates.is_empty()
    }
}

impl Path {
    /// Create a path from its elements.
    pub fn new(elements: Vec<PathElement>) -> Self {
        Self { elements }
    }

    /// The root path (no elements).
    pub fn root() -> Self {
        Self::default()
    }

    pub fn is_root(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Check whether `prefix` matches the leading elements of this path,
    /// predicates included.
    pub fn starts_with(&self, prefix: &Path) -> bool {
        self.elements.len() >= prefix.elements.len()
            && self
                .elements
                .iter()
                .zip(&prefix.elements)
                .all(|(a, b)| a == b)
    }

    /// Element names joined with `/`, predicates dropped.
    ///
    /// The root path renders as an empty string.
    pub fn to_name_string(&self) -> String {
        self.elements
            .iter()
            .map(|e| format!("/{}", e.name))
            .collect()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.elements.is_empty() {
            return write!(f, "/");
        }
        for element in &self.elements {
            write!(f, "/{}", element)?;
        }
        Ok(())
    }
}

impl fmt::Display for PathElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        for (key, value) in &self.predicates {
            write!(f, "[{}={}]", key, value)?;
        }
        Ok(())
    }
}

impl std::str::FromStr for Path {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(parse_path(s))
    }
}
