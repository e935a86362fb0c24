//! JSON output matching the layout the module files have always been written in
//!
//! The module files are consumed by Chataigne's script engine and diffed in
//! review, so the generator keeps the established formatting: two-space
//! indentation, `", "` / `": "` separators for single-line values and every
//! character outside printable ASCII escaped as `\uXXXX`.

use std::io::{self, Write};

use serde::Serialize;
use serde_json::ser::{Formatter, PrettyFormatter, Serializer};

/// Serialize `value` across multiple lines with two-space indentation.
pub fn to_pretty_string<T: ?Sized + Serialize>(value: &T) -> serde_json::Result<String> {
    write_with(value, AsciiPrettyFormatter::new())
}

/// Serialize `value` on a single line with spaced separators.
pub fn to_inline_string<T: ?Sized + Serialize>(value: &T) -> serde_json::Result<String> {
    write_with(value, InlineFormatter)
}

fn write_with<T, F>(value: &T, formatter: F) -> serde_json::Result<String>
where
    T: ?Sized + Serialize,
    F: Formatter,
{
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    // Every byte written is ASCII, so this never substitutes anything.
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Write an unescaped string fragment, escaping anything beyond `~`.
fn write_ascii_fragment<W: ?Sized + Write>(writer: &mut W, fragment: &str) -> io::Result<()> {
    let mut units = [0u16; 2];
    for ch in fragment.chars() {
        if u32::from(ch) < 0x7f {
            let mut byte = [0u8; 4];
            writer.write_all(ch.encode_utf8(&mut byte).as_bytes())?;
        } else {
            for unit in &*ch.encode_utf16(&mut units) {
                write!(writer, "\\u{unit:04x}")?;
            }
        }
    }
    Ok(())
}

struct InlineFormatter;

impl Formatter for InlineFormatter {
    fn begin_array_value<W: ?Sized + Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W: ?Sized + Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        writer.write_all(b": ")
    }

    fn write_string_fragment<W: ?Sized + Write>(
        &mut self,
        writer: &mut W,
        fragment: &str,
    ) -> io::Result<()> {
        write_ascii_fragment(writer, fragment)
    }
}

struct AsciiPrettyFormatter<'a> {
    inner: PrettyFormatter<'a>,
}

impl AsciiPrettyFormatter<'_> {
    fn new() -> Self {
        Self {
            inner: PrettyFormatter::with_indent(b"  "),
        }
    }
}

impl Formatter for AsciiPrettyFormatter<'_> {
    fn begin_array<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.begin_array(writer)
    }

    fn end_array<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_array(writer)
    }

    fn begin_array_value<W: ?Sized + Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        self.inner.begin_array_value(writer, first)
    }

    fn end_array_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_array_value(writer)
    }

    fn begin_object<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.begin_object(writer)
    }

    fn end_object<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_object(writer)
    }

    fn begin_object_key<W: ?Sized + Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        self.inner.begin_object_key(writer, first)
    }

    fn begin_object_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.begin_object_value(writer)
    }

    fn end_object_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_object_value(writer)
    }

    fn write_string_fragment<W: ?Sized + Write>(
        &mut self,
        writer: &mut W,
        fragment: &str,
    ) -> io::Result<()> {
        write_ascii_fragment(writer, fragment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_inline_uses_spaced_separators() {
        let value = json!({"fieldList": [["sceneName", "String"], ["sceneItemId", "Number"]]});
        assert_eq!(
            to_inline_string(&value).unwrap(),
            r#"{"fieldList": [["sceneName", "String"], ["sceneItemId", "Number"]]}"#
        );
    }

    #[test]
    fn test_inline_empty_containers() {
        assert_eq!(to_inline_string(&json!({"fieldList": []})).unwrap(), r#"{"fieldList": []}"#);
        assert_eq!(to_inline_string(&json!({})).unwrap(), "{}");
    }

    #[test]
    fn test_pretty_uses_two_space_indent() {
        let value = json!({"name": "OBS Advanced", "tags": ["a", "b"], "empty": {}});
        let expected = "{\n  \"name\": \"OBS Advanced\",\n  \"tags\": [\n    \"a\",\n    \"b\"\n  ],\n  \"empty\": {}\n}";
        assert_eq!(to_pretty_string(&value).unwrap(), expected);
    }

    #[test]
    fn test_non_ascii_is_escaped() {
        let value = json!({"label": "Sc\u{e8}ne \u{1f3ac}"});
        assert_eq!(
            to_inline_string(&value).unwrap(),
            r#"{"label": "Sc\u00e8ne \ud83c\udfac"}"#
        );
        assert!(to_pretty_string(&value).unwrap().is_ascii());
    }

    #[test]
    fn test_delete_character_is_escaped() {
        assert_eq!(to_inline_string(&json!("a\u{7f}")).unwrap(), r#""a\u007f""#);
    }

    #[test]
    fn test_existing_escapes_are_kept() {
        let value = json!("line\nnext \"quoted\" back\\slash");
        assert_eq!(
            to_inline_string(&value).unwrap(),
            r#""line\nnext \"quoted\" back\\slash""#
        );
    }
}
