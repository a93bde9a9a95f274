//! Absolute path redaction
//!
//! Diagnostic payloads often carry paths such as `/home/john/rpi.img`, which
//! leak the layout (and user names) of the machine that produced them. The
//! functions here walk a payload and replace every absolute path string with
//! its basename. Detection is purely syntactic: nothing touches the
//! filesystem, and the path convention is an explicit argument so both
//! POSIX and Windows rules can be applied on any host.
//!
//! Device paths (`/dev/sdb`, `\\.\PHYSICALDRIVE1`) are kept as they are. A
//! device prefix followed by a `..` segment is not a device, since it can
//! climb back into a regular directory.

use std::borrow::Cow;
use std::fmt;

use serde_json::{Map, Value};

const POSIX_DEVICE_DIR: &str = "/dev";

/// Path syntax used to recognize absolute paths
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathConvention {
    Posix,
    Windows,
}

impl PathConvention {
    /// Convention of the platform this crate was compiled for
    pub fn host() -> Self {
        if cfg!(windows) {
            PathConvention::Windows
        } else {
            PathConvention::Posix
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PathConvention::Posix => "posix",
            PathConvention::Windows => "windows",
        }
    }

    fn is_separator(&self, c: char) -> bool {
        match self {
            PathConvention::Posix => c == '/',
            PathConvention::Windows => c == '\\' || c == '/',
        }
    }

    /// Length of a `C:` style drive prefix, if any
    fn drive_prefix_len(&self, path: &str) -> usize {
        let bytes = path.as_bytes();
        match self {
            PathConvention::Windows
                if bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' =>
            {
                2
            }
            _ => 0,
        }
    }

    /// Check whether a string is an absolute path under this convention
    ///
    /// - POSIX: a leading `/`
    /// - Windows: `C:\...`, a UNC path `\\server\share`, or a rooted `\...`
    pub fn is_absolute(&self, path: &str) -> bool {
        let rest = &path[self.drive_prefix_len(path)..];
        rest.starts_with(|c: char| self.is_separator(c))
    }

    /// Remainder of a `\\?\` long path, e.g. `C:\Users\rpi.img` for `\\?\C:\Users\rpi.img`
    fn strip_verbatim_prefix<'a>(&self, path: &'a str) -> Option<&'a str> {
        if *self != PathConvention::Windows {
            return None;
        }

        let mut chars = path.char_indices();
        match (chars.next(), chars.next(), chars.next(), chars.next()) {
            (Some((_, a)), Some((_, b)), Some((_, '?')), Some((i, d)))
                if self.is_separator(a) && self.is_separator(b) && self.is_separator(d) =>
            {
                Some(&path[i + d.len_utf8()..])
            }
            _ => None,
        }
    }

    /// Check whether the part after `\\?\` is an ordinary file path
    fn is_verbatim_file_path(&self, rest: &str) -> bool {
        let unc = rest
            .get(..3)
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case("UNC"))
            && rest[3..].starts_with(|c: char| self.is_separator(c));

        unc || (self.drive_prefix_len(rest) == 2 && self.is_absolute(rest))
    }

    fn climbs_out(&self, path: &str) -> bool {
        path.split(|c: char| self.is_separator(c))
            .any(|segment| segment == "..")
    }

    /// Check whether a string names a device rather than a regular file
    ///
    /// Devices such as `/dev/sdb` or `\\.\PHYSICALDRIVE1` identify hardware
    /// rather than a location on someone's disk, so they are kept as is.
    /// Long paths like `\\?\C:\Users\rpi.img` or `\\?\UNC\server\share` are
    /// files; other `\\?\` targets such as `\\?\Volume{...}` are devices.
    pub fn is_device_path(&self, path: &str) -> bool {
        if self.climbs_out(path) {
            return false;
        }

        match self {
            PathConvention::Posix => {
                path == POSIX_DEVICE_DIR
                    || path
                        .strip_prefix(POSIX_DEVICE_DIR)
                        .is_some_and(|rest| rest.starts_with('/'))
            }
            PathConvention::Windows => {
                if let Some(rest) = self.strip_verbatim_prefix(path) {
                    return !self.is_verbatim_file_path(rest);
                }

                let mut chars = path.chars();
                match (chars.next(), chars.next(), chars.next(), chars.next()) {
                    (Some(a), Some(b), Some('.'), Some(d)) => {
                        self.is_separator(a) && self.is_separator(b) && self.is_separator(d)
                    }
                    _ => false,
                }
            }
        }
    }

    /// Final component of a path, ignoring trailing separators
    ///
    /// Returns an empty string for roots such as `/` or `C:\`.
    pub fn basename<'a>(&self, path: &'a str) -> &'a str {
        let path = self.strip_verbatim_prefix(path).unwrap_or(path);
        let rest = &path[self.drive_prefix_len(path)..];
        let trimmed = rest.trim_end_matches(|c: char| self.is_separator(c));
        trimmed
            .rsplit(|c: char| self.is_separator(c))
            .next()
            .unwrap_or(trimmed)
    }
}

impl Default for PathConvention {
    fn default() -> Self {
        PathConvention::host()
    }
}

impl fmt::Display for PathConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Replaces absolute paths in payloads using a fixed [`PathConvention`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathRedactor {
    convention: PathConvention,
}

impl PathRedactor {
    pub fn new(convention: PathConvention) -> Self {
        Self { convention }
    }

    pub fn for_host() -> Self {
        Self::new(PathConvention::host())
    }

    pub fn convention(&self) -> PathConvention {
        self.convention
    }

    /// Redact a single string
    ///
    /// Absolute, non-device paths become their basename. Everything else,
    /// including relative paths and plain file names, is borrowed unchanged.
    pub fn redact_str<'a>(&self, value: &'a str) -> Cow<'a, str> {
        let convention = self.convention;
        if !convention.is_absolute(value) || convention.is_device_path(value) {
            return Cow::Borrowed(value);
        }

        match convention.basename(value) {
            "" => Cow::Borrowed(value),
            basename => Cow::Owned(basename.to_string()),
        }
    }

    fn redact_value(&self, value: &Value) -> Value {
        match value {
            Value::String(s) => Value::String(self.redact_str(s).into_owned()),
            Value::Array(items) => {
                Value::Array(items.iter().map(|item| self.redact_value(item)).collect())
            }
            Value::Object(object) => Value::Object(
                object
                    .iter()
                    .map(|(key, item)| (key.clone(), self.redact_value(item)))
                    .collect::<Map<String, Value>>(),
            ),
            primitive => primitive.clone(),
        }
    }

    /// Produce a copy of `value` with every absolute path replaced by its basename
    ///
    /// `None` and `null` are returned as they are. The input is never modified.
    pub fn redact(&self, value: Option<&Value>) -> Option<Value> {
        match value {
            None => None,
            Some(Value::Null) => Some(Value::Null),
            Some(value) => Some(self.redact_value(value)),
        }
    }
}

impl Default for PathRedactor {
    fn default() -> Self {
        Self::for_host()
    }
}

/// Replace absolute paths anywhere in `value` with their basename
pub fn hide_absolute_paths_in_object(
    value: Option<&Value>,
    convention: PathConvention,
) -> Option<Value> {
    PathRedactor::new(convention).redact(value)
}
