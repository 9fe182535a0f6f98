use std::ops::Range;
use std::path::{Path, PathBuf};

use relsync_core::PackageManifest;
use serde_json::{Map, Value};

use crate::error::ManifestError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Indent {
    Spaces(usize),
    Tab,
}

impl Indent {
    const DEFAULT: Self = Self::Spaces(2);

    fn detect(content: &str) -> Self {
        content
            .lines()
            .skip(1)
            .find_map(|line| {
                if line.starts_with('\t') {
                    return Some(Self::Tab);
                }
                let spaces = line.len() - line.trim_start_matches(' ').len();
                (spaces > 0).then_some(Self::Spaces(spaces))
            })
            .unwrap_or(Self::DEFAULT)
    }

    fn render(self) -> String {
        match self {
            Self::Tab => "\t".to_string(),
            Self::Spaces(n) => " ".repeat(n),
        }
    }
}

/// A top-level member: where its key starts and the byte span of its value.
#[derive(Debug)]
struct Member {
    key: String,
    key_start: usize,
    value: Range<usize>,
}

/// Byte positions of the top-level object of a JSON document.
#[derive(Debug)]
struct ObjectLayout {
    open: usize,
    close: usize,
    members: Vec<Member>,
}

impl ObjectLayout {
    /// Scans `content`, which must already be known to be valid JSON.
    fn scan(content: &str) -> Option<Self> {
        let bytes = content.as_bytes();
        let open = skip_whitespace(bytes, 0);
        if bytes.get(open) != Some(&b'{') {
            return None;
        }

        let mut members = Vec::new();
        let mut pos = skip_whitespace(bytes, open + 1);
        if bytes.get(pos) == Some(&b'}') {
            return Some(Self {
                open,
                close: pos,
                members,
            });
        }

        loop {
            let key_start = pos;
            let key_end = skip_string(bytes, key_start)?;
            let key: String = serde_json::from_str(&content[key_start..key_end]).ok()?;

            pos = skip_whitespace(bytes, key_end);
            if bytes.get(pos) != Some(&b':') {
                return None;
            }
            let value_start = skip_whitespace(bytes, pos + 1);
            let value_end = skip_value(bytes, value_start)?;
            members.push(Member {
                key,
                key_start,
                value: value_start..value_end,
            });

            pos = skip_whitespace(bytes, value_end);
            match bytes.get(pos) {
                Some(b',') => pos = skip_whitespace(bytes, pos + 1),
                Some(b'}') => {
                    return Some(Self {
                        open,
                        close: pos,
                        members,
                    });
                }
                _ => return None,
            }
        }
    }

    /// The last occurrence wins, matching how the parser resolves duplicates.
    fn member(&self, key: &str) -> Option<&Member> {
        self.members.iter().rev().find(|m| m.key == key)
    }
}

fn skip_whitespace(bytes: &[u8], mut pos: usize) -> usize {
    while bytes
        .get(pos)
        .is_some_and(|b| matches!(b, b' ' | b'\t' | b'\n' | b'\r'))
    {
        pos += 1;
    }
    pos
}

/// Returns the position just past the string literal starting at `start`.
fn skip_string(bytes: &[u8], start: usize) -> Option<usize> {
    if bytes.get(start) != Some(&b'"') {
        return None;
    }
    let mut pos = start + 1;
    while let Some(byte) = bytes.get(pos) {
        match byte {
            b'\\' => pos += 2,
            b'"' => return Some(pos + 1),
            _ => pos += 1,
        }
    }
    None
}

/// Returns the position just past the value starting at `start`.
fn skip_value(bytes: &[u8], start: usize) -> Option<usize> {
    match bytes.get(start)? {
        b'"' => skip_string(bytes, start),
        b'{' | b'[' => {
            let mut depth = 0usize;
            let mut pos = start;
            while let Some(byte) = bytes.get(pos) {
                match byte {
                    b'"' => {
                        pos = skip_string(bytes, pos)?;
                        continue;
                    }
                    b'{' | b'[' => depth += 1,
                    b'}' | b']' => {
                        depth = depth.checked_sub(1)?;
                        if depth == 0 {
                            return Some(pos + 1);
                        }
                    }
                    _ => {}
                }
                pos += 1;
            }
            None
        }
        _ => {
            let mut pos = start;
            while bytes.get(pos).is_some_and(|b| {
                !matches!(b, b',' | b'}' | b']' | b' ' | b'\t' | b'\n' | b'\r')
            }) {
                pos += 1;
            }
            (pos > start).then_some(pos)
        }
    }
}

/// An editable package.json document.
///
/// Edits rewrite only the text of the touched value, or insert a new member
/// before the closing brace. Every other byte of the source is kept.
#[derive(Debug, Clone)]
pub struct PackageJson {
    path: PathBuf,
    source: String,
    fields: Map<String, Value>,
    indent: Indent,
}

impl PackageJson {
    /// # Errors
    ///
    /// Returns `ManifestError::ParseJson` if `content` is not valid JSON, or
    /// `ManifestError::NotAnObject` if the top-level value is not an object.
    pub fn parse(path: &Path, content: &str) -> Result<Self, ManifestError> {
        let value: Value =
            serde_json::from_str(content).map_err(|source| ManifestError::ParseJson {
                path: path.to_path_buf(),
                source,
            })?;

        let Value::Object(fields) = value else {
            return Err(ManifestError::NotAnObject {
                path: path.to_path_buf(),
            });
        };

        Ok(Self {
            path: path.to_path_buf(),
            source: content.to_string(),
            fields,
            indent: Indent::detect(content),
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.fields.get("version").and_then(Value::as_str)
    }

    #[must_use]
    pub fn is_private(&self) -> bool {
        self.fields
            .get("private")
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    /// Replaces the `version` value in place, or appends the key when absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be rendered or the document
    /// layout cannot be located.
    pub fn set_version(&mut self, version: &str) -> Result<(), ManifestError> {
        self.set_field("version", Value::String(version.to_string()))
    }

    /// # Errors
    ///
    /// Same as [`Self::set_version`].
    pub fn set_private(&mut self, private: bool) -> Result<(), ManifestError> {
        self.set_field("private", Value::Bool(private))
    }

    fn set_field(&mut self, key: &str, value: Value) -> Result<(), ManifestError> {
        let rendered_value = serde_json::to_string(&value).map_err(|source| {
            ManifestError::RenderJson {
                path: self.path.clone(),
                source,
            }
        })?;
        let layout =
            ObjectLayout::scan(&self.source).ok_or_else(|| ManifestError::UnsupportedLayout {
                path: self.path.clone(),
            })?;

        if let Some(member) = layout.member(key) {
            if self.source[member.value.clone()] != rendered_value {
                self.source
                    .replace_range(member.value.clone(), &rendered_value);
            }
        } else {
            let rendered_key = serde_json::to_string(key).map_err(|source| {
                ManifestError::RenderJson {
                    path: self.path.clone(),
                    source,
                }
            })?;
            self.insert_member(&layout, &rendered_key, &rendered_value);
        }

        self.fields.insert(key.to_string(), value);
        Ok(())
    }

    fn insert_member(&mut self, layout: &ObjectLayout, key: &str, value: &str) {
        let newline = if self.source.contains("\r\n") {
            "\r\n"
        } else {
            "\n"
        };
        let indent = self.indent.render();

        match layout.members.last() {
            Some(last) => {
                let first_key = layout.members.first().map_or(last.key_start, |m| m.key_start);
                let multiline = self.source[layout.open..first_key].contains('\n');
                let separator = if multiline {
                    format!(",{newline}{indent}")
                } else {
                    ", ".to_string()
                };
                self.source
                    .insert_str(last.value.end, &format!("{separator}{key}: {value}"));
            }
            None => {
                self.source.replace_range(
                    layout.open + 1..layout.close,
                    &format!("{newline}{indent}{key}: {value}{newline}"),
                );
            }
        }
    }

    #[must_use]
    pub fn to_manifest(&self) -> PackageManifest {
        PackageManifest::new(self.fields.clone())
    }

    /// The document text with every edit applied.
    #[must_use]
    pub fn render(&self) -> String {
        self.source.clone()
    }

    /// # Errors
    ///
    /// Returns `ManifestError::VerificationFailed` if the document does not
    /// carry `expected` as its version.
    pub fn verify_version(&self, expected: &str) -> Result<(), ManifestError> {
        match self.version() {
            Some(actual) if actual == expected => Ok(()),
            actual => Err(ManifestError::VerificationFailed {
                path: self.path.clone(),
                field: "version",
                expected: expected.to_string(),
                actual: actual.unwrap_or("<missing>").to_string(),
            }),
        }
    }

    /// # Errors
    ///
    /// Returns `ManifestError::VerificationFailed` if the document is not
    /// marked private.
    pub fn verify_private(&self) -> Result<(), ManifestError> {
        if self.is_private() {
            return Ok(());
        }
        Err(ManifestError::VerificationFailed {
            path: self.path.clone(),
            field: "private",
            expected: "true".to_string(),
            actual: self
                .fields
                .get("private")
                .map_or_else(|| "<missing>".to_string(), ToString::to_string),
        })
    }
}

/// # Errors
///
/// Returns `ManifestError::Read` if the file cannot be read, or a parse error
/// if its content is not a JSON object.
pub fn read_package_json(path: &Path) -> Result<PackageJson, ManifestError> {
    let content = std::fs::read_to_string(path).map_err(|source| ManifestError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    PackageJson::parse(path, &content)
}
