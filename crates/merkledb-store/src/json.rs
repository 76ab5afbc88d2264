//! Compact JSON output with HTML-safe string escaping.
//!
//! Strings escape `<`, `>`, `&`, U+2028 and U+2029 as `\u003c`, `\u003e`,
//! `\u0026`, `\u2028` and `\u2029`. Hashes of stored objects depend on
//! this exact layout, so existing stores keep their object ids.

use std::io;

use serde::Serialize;
use serde_json::ser::Formatter;

use crate::error::{StoreError, StoreResult};

/// Compact formatter that additionally escapes HTML-sensitive characters.
#[derive(Clone, Copy, Debug, Default)]
pub struct HtmlSafeFormatter;

impl Formatter for HtmlSafeFormatter {
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let mut start = 0;
        for (i, ch) in fragment.char_indices() {
            let escape = match ch {
                '<' => "\\u003c",
                '>' => "\\u003e",
                '&' => "\\u0026",
                '\u{2028}' => "\\u2028",
                '\u{2029}' => "\\u2029",
                _ => continue,
            };
            writer.write_all(fragment[start..i].as_bytes())?;
            writer.write_all(escape.as_bytes())?;
            start = i + ch.len_utf8();
        }
        writer.write_all(fragment[start..].as_bytes())
    }
}

/// Append the canonical JSON encoding of `value` to `out`.
pub fn write_canonical<T: Serialize + ?Sized>(out: &mut Vec<u8>, value: &T) -> StoreResult<()> {
    let mut ser = serde_json::Serializer::with_formatter(out, HtmlSafeFormatter);
    value
        .serialize(&mut ser)
        .map_err(|e| StoreError::Serialization(e.to_string()))
}

/// Canonical JSON encoding of `value`.
pub fn to_canonical_vec<T: Serialize + ?Sized>(value: &T) -> StoreResult<Vec<u8>> {
    let mut out = Vec::with_capacity(128);
    write_canonical(&mut out, value)?;
    Ok(out)
}
