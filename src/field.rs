//! Structured field errors.
//!
//! Every finding produced by the validators is a [`FieldError`] that points at
//! the offending part of the object with a [`Path`] such as
//! `spec.rules[0].host`. Errors are collected into an ordered [`ErrorList`];
//! the order is part of the contract of each validator.

use std::fmt;

use serde::{Serialize, Serializer};

/// One segment of a field path
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Segment {
    Field(String),
    Index(usize),
}

/// Address of a field inside the validated object.
///
/// Paths are built by appending to a root, so every call site owns the
/// path it reports against:
///
/// ```
/// use ingress_validator::field::Path;
///
/// let host = Path::new("spec").child("rules").index(0).child("host");
/// assert_eq!(host.to_string(), "spec.rules[0].host");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Path {
    segments: Vec<Segment>,
}

impl Path {
    /// Create a root path with a single field name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            segments: vec![Segment::Field(name.into())],
        }
    }

    /// Path to a named child field
    pub fn child(&self, name: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(Segment::Field(name.into()));
        Self { segments }
    }

    /// Path to an element of a list field
    pub fn index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(Segment::Index(index));
        Self { segments }
    }
}

impl Serialize for Path {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Field(name) if i == 0 => write!(f, "{}", name)?,
                Segment::Field(name) => write!(f, ".{}", name)?,
                Segment::Index(index) => write!(f, "[{}]", index)?,
            }
        }
        Ok(())
    }
}

/// Classification of a field error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    /// A mandatory field is missing or empty
    Required,
    /// A field is present but fails a type, format or enum check
    Invalid,
    /// A value collides with an earlier occurrence
    Duplicate,
    /// A collection exceeds its cardinality bound
    TooMany,
    /// A field is present where policy disallows it
    Forbidden,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorKind::Required => "Required value",
            ErrorKind::Invalid => "Invalid value",
            ErrorKind::Duplicate => "Duplicate value",
            ErrorKind::TooMany => "Too many",
            ErrorKind::Forbidden => "Forbidden",
        };
        write!(f, "{}", s)
    }
}

/// The offending value attached to an error
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum BadValue {
    /// A string value, rendered quoted
    Str(String),
    /// A collection size, rendered bare
    Quantity(usize),
}

impl fmt::Display for BadValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BadValue::Str(value) => f.write_str(&quote(value)),
            BadValue::Quantity(n) => write!(f, "{}", n),
        }
    }
}

/// Quote a string the way the controller quotes values in its messages.
///
/// Printable characters are kept as they are. Quotes and backslashes are
/// escaped, and control or invisible characters use `\n`-style escapes,
/// `\xNN` below U+0080 and `\uNNNN` or `\UNNNNNNNN` above it.
pub fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{07}' => out.push_str("\\a"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0c}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{0b}' => out.push_str("\\v"),
            c if is_printable(c) => out.push(c),
            c if u32::from(c) < 0x80 => out.push_str(&format!("\\x{:02x}", u32::from(c))),
            c if u32::from(c) <= 0xffff => out.push_str(&format!("\\u{:04x}", u32::from(c))),
            c => out.push_str(&format!("\\U{:08x}", u32::from(c))),
        }
    }
    out.push('"');
    out
}

/// Graphic characters plus the ASCII space
fn is_printable(c: char) -> bool {
    if c == ' ' {
        return true;
    }
    let invisible = matches!(
        c,
        '\u{ad}'
            | '\u{200b}'..='\u{200f}'
            | '\u{2060}'..='\u{2064}'
            | '\u{feff}'
            | '\u{e0000}'..='\u{e007f}'
    );
    !(c.is_control() || c.is_whitespace() || invisible)
}

/// A single validation finding
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldError {
    pub kind: ErrorKind,
    pub path: Path,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bad_value: Option<BadValue>,
}

impl FieldError {
    pub fn new(
        kind: ErrorKind,
        path: Path,
        detail: impl Into<String>,
        bad_value: Option<BadValue>,
    ) -> Self {
        Self {
            kind,
            path,
            detail: detail.into(),
            bad_value,
        }
    }

    /// A required field is missing. `detail` may be empty.
    pub fn required(path: Path, detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::Required, path, detail, None)
    }

    pub fn invalid(path: Path, value: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::new(
            ErrorKind::Invalid,
            path,
            detail,
            Some(BadValue::Str(value.into())),
        )
    }

    pub fn duplicate(path: Path, value: impl Into<String>) -> Self {
        Self::new(
            ErrorKind::Duplicate,
            path,
            "",
            Some(BadValue::Str(value.into())),
        )
    }

    /// A collection holds `actual` items where at most `max` are allowed
    pub fn too_many(path: Path, actual: usize, max: usize) -> Self {
        Self::new(
            ErrorKind::TooMany,
            path,
            format!("must have at most {} items", max),
            Some(BadValue::Quantity(actual)),
        )
    }

    pub fn forbidden(path: Path, detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::Forbidden, path, detail, None)
    }

    /// Render the message without the field path
    pub fn body(&self) -> String {
        let mut body = match (self.kind, &self.bad_value) {
            (ErrorKind::Required | ErrorKind::Forbidden, _) | (_, None) => self.kind.to_string(),
            (_, Some(value)) => format!("{}: {}", self.kind, value),
        };
        if !self.detail.is_empty() {
            body.push_str(": ");
            body.push_str(&self.detail);
        }
        body
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.body())
    }
}

impl std::error::Error for FieldError {}

/// Ordered collection of field errors. An empty list means "valid".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ErrorList(Vec<FieldError>);

impl ErrorList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: FieldError) {
        self.0.push(error);
    }

    /// Append all errors of `other`, keeping their order
    pub fn append(&mut self, other: ErrorList) {
        self.0.extend(other.0);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldError> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[FieldError] {
        &self.0
    }

    /// Render each error as `<path>: <message>`
    pub fn messages(&self) -> Vec<String> {
        self.0.iter().map(ToString::to_string).collect()
    }
}

impl fmt::Display for ErrorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.as_slice() {
            [single] => write!(f, "{}", single),
            errors => {
                write!(f, "[")?;
                for (i, error) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", error)?;
                }
                write!(f, "]")
            }
        }
    }
}

impl From<Vec<FieldError>> for ErrorList {
    fn from(errors: Vec<FieldError>) -> Self {
        Self(errors)
    }
}

impl FromIterator<FieldError> for ErrorList {
    fn from_iter<I: IntoIterator<Item = FieldError>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<FieldError> for ErrorList {
    fn extend<I: IntoIterator<Item = FieldError>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl IntoIterator for ErrorList {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ErrorList {
    type Item = &'a FieldError;
    type IntoIter = std::slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
