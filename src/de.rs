//! Duplex decoding.
//!
//! This module provides the [`Decoder`], a [`serde::Deserializer`] that
//! consumes values from a [`Target`] in the layout the [`Encoder`](crate::Encoder)
//! produced.
//!
//! ## Overview
//!
//! Neither format is self-describing, so the type being decoded drives the
//! parse: asking for a `Vec<Vec<i32>>` reads a sequence of sequences of
//! 32-bit integers, whatever the bytes actually contain.
//!
//! - **Binary**: mirrors the encoder byte for byte. Short input surfaces as a
//!   backend error; no other validation is possible.
//! - **Text**: single-pass recursive descent. Separators (space, `;`, tab,
//!   newline, carriage return) are skipped around every token, which is what
//!   makes pretty and compact output interchangeable. Grammar violations carry
//!   the stream position and a window of the surrounding input.
//!
//! ## Usage
//!
//! ```rust
//! use serde_duplex::{BufferTarget, CodecOptions, Decoder};
//!
//! let mut target = BufferTarget::from_bytes(b"[[1;2;3;][4;5;]] \"done\"; ".to_vec());
//! let mut decoder = Decoder::new(&mut target, CodecOptions::text());
//!
//! let nested: Vec<Vec<i32>> = decoder.read().unwrap();
//! let label: String = decoder.read().unwrap();
//! decoder.end().unwrap();
//!
//! assert_eq!(nested, vec![vec![1, 2, 3], vec![4, 5]]);
//! assert_eq!(label, "done");
//! ```

use crate::diagnostic::{position_at, Snippet};
use crate::scalar::Scalar;
use crate::{CodecOptions, Error, Format, Result, Target};
use serde::de::{self, DeserializeOwned, DeserializeSeed, SeqAccess, Visitor};
use std::any::type_name;

/// Upper bound on bytes reserved ahead of a binary string read, so a corrupt
/// length prefix cannot force a huge allocation before the target runs dry.
const MAX_PREALLOC: usize = 64 * 1024;

#[inline]
fn is_separator(byte: u8) -> bool {
    matches!(byte, b' ' | b';' | b'\n' | b'\t' | b'\r')
}

/// Length in bytes of the UTF-8 sequence introduced by `lead`.
fn utf8_width(lead: u8) -> Option<usize> {
    match lead {
        0x00..=0x7F => Some(1),
        0xC0..=0xDF => Some(2),
        0xE0..=0xEF => Some(3),
        0xF0..=0xF7 => Some(4),
        _ => None,
    }
}

/// The duplex decoder.
///
/// Borrows a [`Target`] and reads values from its current position, one per
/// call to [`Decoder::read`].
pub struct Decoder<'a, T: Target + ?Sized> {
    target: &'a mut T,
    options: CodecOptions,
}

impl<'a, T: Target + ?Sized> Decoder<'a, T> {
    pub fn new(target: &'a mut T, options: CodecOptions) -> Self {
        Decoder { target, options }
    }

    #[must_use]
    pub fn options(&self) -> &CodecOptions {
        &self.options
    }

    /// Decodes one value of type `V` from the current position.
    ///
    /// # Errors
    ///
    /// Fails on grammar violations (text mode), short input, or values that
    /// do not fit `V`. The target is left wherever consumption stopped.
    pub fn read<V: DeserializeOwned>(&mut self) -> Result<V> {
        V::deserialize(&mut *self)
    }

    /// Decodes one value into `value`, replacing its previous contents.
    ///
    /// `value` is left untouched when decoding fails.
    pub fn read_into<V: DeserializeOwned>(&mut self, value: &mut V) -> Result<()> {
        *value = self.read()?;
        Ok(())
    }

    /// Checks that the target holds nothing after the values read so far.
    ///
    /// In text mode trailing separators are allowed.
    pub fn end(&mut self) -> Result<()> {
        if self.is_text() {
            self.skip()?;
        }
        if self.target.eof()? {
            Ok(())
        } else {
            Err(Error::TrailingBytes {
                position: self.target.tell(),
            })
        }
    }

    fn is_text(&self) -> bool {
        self.options.format == Format::Text
    }

    fn skip(&mut self) -> Result<()> {
        while let Some(byte) = self.target.peek()? {
            if !is_separator(byte) {
                break;
            }
            self.target.read_byte()?;
        }
        Ok(())
    }

    fn snippet(&mut self, offset: i64) -> Snippet {
        Snippet::capture(&mut *self.target, self.options.context_radius, offset).unwrap_or_else(
            |err| {
                tracing::debug!("could not capture error context: {}", err);
                Snippet::default()
            },
        )
    }

    /// Builds a structural mismatch for the byte at `tell() + offset`.
    fn structural(&mut self, offset: i64, msg: &str) -> Error {
        let position = position_at(self.target.tell(), offset);
        let snippet = self.snippet(offset);
        tracing::debug!(position, found = ?snippet.found(), "structural mismatch: {}", msg);
        Error::StructuralMismatch {
            found: snippet.describe_found(),
            position,
            msg: msg.to_string(),
            context: snippet.render(),
        }
    }

    fn malformed(&mut self, offset: i64, msg: &str) -> Error {
        let position = position_at(self.target.tell(), offset);
        let snippet = self.snippet(offset);
        tracing::debug!(position, found = ?snippet.found(), "malformed numeral: {}", msg);
        Error::MalformedNumeral {
            found: snippet.describe_found(),
            position,
            msg: msg.to_string(),
            context: snippet.render(),
        }
    }

    /// Consumes `expected` or fails pointing at whatever is there instead.
    fn expect(&mut self, expected: u8, msg: &str) -> Result<()> {
        match self.target.peek()? {
            Some(byte) if byte == expected => {
                self.target.read_byte()?;
                Ok(())
            }
            _ => Err(self.structural(0, msg)),
        }
    }

    fn scalar<S: Scalar>(&mut self) -> Result<S>
    where
        S::Err: std::fmt::Display,
    {
        match self.options.format {
            Format::Binary => {
                let mut bytes = S::Bytes::default();
                self.target.read(bytes.as_mut())?;
                Ok(S::from_bytes(bytes, self.options.byte_order))
            }
            Format::Text => self.parse_numeral(),
        }
    }

    fn parse_numeral<S: Scalar>(&mut self) -> Result<S>
    where
        S::Err: std::fmt::Display,
    {
        self.skip()?;
        let mut token = String::new();
        while let Some(byte) = self.target.peek()? {
            if is_separator(byte) {
                break;
            }
            if !S::KIND.accepts(byte, token.is_empty()) {
                return Err(if token.is_empty() {
                    self.structural(0, "Expected a numeral.")
                } else {
                    self.malformed(0, "Expected a numeral.")
                });
            }
            self.target.read_byte()?;
            token.push(char::from(byte));
        }

        if token.is_empty() {
            return Err(self.structural(0, "Expected a numeral."));
        }

        match token.parse::<S>() {
            Ok(value) => {
                self.skip()?;
                Ok(value)
            }
            Err(err) => {
                let msg = format!("`{}` is not a valid {}: {}.", token, type_name::<S>(), err);
                Err(self.malformed(-(token.len() as i64), &msg))
            }
        }
    }

    fn read_len(&mut self) -> Result<usize> {
        let len: u64 = self.scalar()?;
        usize::try_from(len)
            .map_err(|_| Error::invalid_value(format!("length {} does not fit in memory", len)))
    }

    fn read_bool(&mut self) -> Result<bool> {
        match self.scalar::<u8>()? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(Error::invalid_value(format!(
                "expected 0 or 1 for a bool, found {}",
                other
            ))),
        }
    }

    fn read_char(&mut self) -> Result<char> {
        if !self.is_text() {
            let code: u32 = self.scalar()?;
            return char::from_u32(code)
                .ok_or_else(|| Error::invalid_value(format!("{:#x} is not a valid char", code)));
        }

        self.skip()?;
        let lead = match self.target.peek()? {
            Some(byte) => byte,
            None => return Err(self.structural(0, "Expected a character.")),
        };
        let width = utf8_width(lead).ok_or_else(|| {
            Error::invalid_value(format!("{:#04x} does not start a UTF-8 character", lead))
        })?;
        let mut utf8 = [0u8; 4];
        self.target.read(&mut utf8[..width])?;
        let ch = std::str::from_utf8(&utf8[..width])
            .ok()
            .and_then(|s| s.chars().next())
            .ok_or_else(|| Error::invalid_value("invalid UTF-8 in character"))?;
        self.skip()?;
        Ok(ch)
    }

    fn read_text(&mut self) -> Result<Vec<u8>> {
        if !self.is_text() {
            let len = self.read_len()?;
            let mut content = Vec::with_capacity(len.min(MAX_PREALLOC));
            while content.len() < len {
                let start = content.len();
                let chunk = (len - start).min(MAX_PREALLOC);
                content.resize(start + chunk, 0);
                self.target.read(&mut content[start..])?;
            }
            return Ok(content);
        }

        self.skip()?;
        self.expect(b'"', "Expected a '\"'.")?;
        let mut content = Vec::new();
        loop {
            let byte = match self.target.peek()? {
                Some(byte) => byte,
                None => {
                    return Err(self.structural(0, "Unterminated string, expected a closing '\"'."))
                }
            };
            self.target.read_byte()?;
            match byte {
                b'"' => break,
                b'\\' => match self.target.peek()? {
                    Some(escaped) => {
                        self.target.read_byte()?;
                        content.push(escaped);
                    }
                    None => return Err(self.structural(0, "Unterminated escape sequence.")),
                },
                other => content.push(other),
            }
        }
        self.skip()?;
        Ok(content)
    }

    fn read_string(&mut self) -> Result<String> {
        let bytes = self.read_text()?;
        String::from_utf8(bytes)
            .map_err(|err| Error::invalid_value(format!("string is not UTF-8: {}", err)))
    }

    /// Decodes a sequence whose elements are handed to `visitor`.
    ///
    /// `expected_len` is set for tuples and structs, whose element count is
    /// fixed by the type.
    fn sequence<'de, V>(&mut self, expected_len: Option<usize>, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        if !self.is_text() {
            let len = self.read_len()?;
            if let Some(expected) = expected_len {
                if len != expected {
                    return Err(Error::invalid_value(format!(
                        "expected {} elements, found {}",
                        expected, len
                    )));
                }
            }
            let mut access = BinarySeq {
                de: &mut *self,
                remaining: len,
            };
            let value = visitor.visit_seq(&mut access)?;
            if access.remaining != 0 {
                return Err(Error::invalid_value(format!(
                    "{} elements left unread in sequence",
                    access.remaining
                )));
            }
            return Ok(value);
        }

        self.skip()?;
        self.expect(b'[', "Expected '['.")?;
        let value = visitor.visit_seq(TextSeq { de: &mut *self })?;
        self.skip()?;
        self.expect(b']', "Expected ']'.")?;
        self.skip()?;
        Ok(value)
    }
}

fn unsupported<V>(shape: &str) -> Result<V> {
    Err(Error::unsupported_type(&format!(
        "{} has no duplex representation",
        shape
    )))
}

macro_rules! deserialize_scalar {
    ($($method:ident => $visit:ident($ty:ty),)*) => {$(
        fn $method<V>(self, visitor: V) -> Result<V::Value>
        where
            V: Visitor<'de>,
        {
            let value: $ty = self.scalar()?;
            visitor.$visit(value)
        }
    )*};
}

impl<'de, 'b, 'a, T: Target + ?Sized> de::Deserializer<'de> for &'b mut Decoder<'a, T> {
    type Error = Error;

    fn deserialize_any<V>(self, _visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        Err(Error::unsupported_type(
            "the duplex formats are not self-describing; decode into a concrete type",
        ))
    }

    fn deserialize_bool<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_bool(self.read_bool()?)
    }

    deserialize_scalar! {
        deserialize_i8 => visit_i8(i8),
        deserialize_i16 => visit_i16(i16),
        deserialize_i32 => visit_i32(i32),
        deserialize_i64 => visit_i64(i64),
        deserialize_i128 => visit_i128(i128),
        deserialize_u8 => visit_u8(u8),
        deserialize_u16 => visit_u16(u16),
        deserialize_u32 => visit_u32(u32),
        deserialize_u64 => visit_u64(u64),
        deserialize_u128 => visit_u128(u128),
        deserialize_f32 => visit_f32(f32),
        deserialize_f64 => visit_f64(f64),
    }

    fn deserialize_char<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_char(self.read_char()?)
    }

    fn deserialize_str<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_string(self.read_string()?)
    }

    fn deserialize_string<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_string(self.read_string()?)
    }

    fn deserialize_bytes<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_byte_buf(self.read_text()?)
    }

    fn deserialize_byte_buf<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_byte_buf(self.read_text()?)
    }

    fn deserialize_option<V>(self, _visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        unsupported("Option")
    }

    fn deserialize_unit<V>(self, _visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        unsupported("()")
    }

    fn deserialize_unit_struct<V>(self, name: &'static str, _visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        unsupported(name)
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_seq<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.sequence(None, visitor)
    }

    fn deserialize_tuple<V>(self, len: usize, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.sequence(Some(len), visitor)
    }

    fn deserialize_tuple_struct<V>(
        self,
        _name: &'static str,
        len: usize,
        visitor: V,
    ) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.sequence(Some(len), visitor)
    }

    fn deserialize_map<V>(self, _visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        unsupported("map")
    }

    fn deserialize_struct<V>(
        self,
        _name: &'static str,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.sequence(Some(fields.len()), visitor)
    }

    fn deserialize_enum<V>(
        self,
        name: &'static str,
        _variants: &'static [&'static str],
        _visitor: V,
    ) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        unsupported(name)
    }

    fn deserialize_identifier<V>(self, _visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        unsupported("identifier")
    }

    fn deserialize_ignored_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_any(visitor)
    }

    fn is_human_readable(&self) -> bool {
        self.is_text()
    }
}

struct BinarySeq<'b, 'a, T: Target + ?Sized> {
    de: &'b mut Decoder<'a, T>,
    remaining: usize,
}

impl<'de, 'b, 'a, T: Target + ?Sized> SeqAccess<'de> for BinarySeq<'b, 'a, T> {
    type Error = Error;

    fn next_element_seed<S>(&mut self, seed: S) -> Result<Option<S::Value>>
    where
        S: DeserializeSeed<'de>,
    {
        if self.remaining == 0 {
            return Ok(None);
        }
        self.remaining -= 1;
        seed.deserialize(&mut *self.de).map(Some)
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.remaining)
    }
}

struct TextSeq<'b, 'a, T: Target + ?Sized> {
    de: &'b mut Decoder<'a, T>,
}

impl<'de, 'b, 'a, T: Target + ?Sized> SeqAccess<'de> for TextSeq<'b, 'a, T> {
    type Error = Error;

    fn next_element_seed<S>(&mut self, seed: S) -> Result<Option<S::Value>>
    where
        S: DeserializeSeed<'de>,
    {
        self.de.skip()?;
        match self.de.target.peek()? {
            Some(b']') => Ok(None),
            Some(_) => seed.deserialize(&mut *self.de).map(Some),
            None => Err(self.de.structural(0, "Expected ']'.")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BufferTarget, ByteOrder};
    use serde::Deserialize;

    fn text_target(input: &str) -> BufferTarget {
        BufferTarget::from_bytes(input.as_bytes().to_vec())
    }

    fn decode<V: DeserializeOwned>(input: &str) -> Result<V> {
        let mut target = text_target(input);
        let mut decoder = Decoder::new(&mut target, CodecOptions::text());
        let value = decoder.read()?;
        decoder.end()?;
        Ok(value)
    }

    #[test]
    fn test_text_scalars() {
        assert_eq!(decode::<i32>("42;").unwrap(), 42);
        assert_eq!(decode::<i64>(" \n-7; ").unwrap(), -7);
        assert_eq!(decode::<u8>("255").unwrap(), 255);
        assert_eq!(decode::<f64>("1.5;").unwrap(), 1.5);
        assert_eq!(decode::<f32>("-0.25;").unwrap(), -0.25);
        assert!(decode::<bool>("1;").unwrap());
        assert!(!decode::<bool>("0;").unwrap());
    }

    #[test]
    fn test_text_non_finite_floats() {
        assert_eq!(decode::<f64>("inf;").unwrap(), f64::INFINITY);
        assert_eq!(decode::<f64>("-inf;").unwrap(), f64::NEG_INFINITY);
        assert!(decode::<f64>("NaN;").unwrap().is_nan());
    }

    #[test]
    fn test_misplaced_minus_is_malformed() {
        let err = decode::<i32>("1-2;").unwrap_err();
        assert!(err.is_malformed_numeral());
        assert_eq!(err.position(), Some(1));
    }

    #[test]
    fn test_decimal_point_in_integer_is_malformed() {
        let err = decode::<i32>("1.5;").unwrap_err();
        assert!(err.is_malformed_numeral());
        assert_eq!(err.position(), Some(1));
    }

    #[test]
    fn test_overflow_points_at_token_start() {
        let err = decode::<u8>("  300;").unwrap_err();
        assert!(err.is_malformed_numeral());
        assert_eq!(err.position(), Some(2));
        assert!(err.to_string().contains("`300` is not a valid u8"));
    }

    #[test]
    fn test_non_numeral_is_structural() {
        let err = decode::<i32>(" abc").unwrap_err();
        assert!(err.is_structural());
        assert_eq!(err.position(), Some(1));
    }

    #[test]
    fn test_lone_minus_is_malformed() {
        let err = decode::<i32>("-;").unwrap_err();
        assert!(err.is_malformed_numeral());
        assert_eq!(err.position(), Some(0));
    }

    #[test]
    fn test_empty_input_is_an_error() {
        let err = decode::<i32>("").unwrap_err();
        assert!(err.is_structural());
        assert_eq!(err.position(), Some(0));
        assert!(decode::<String>("").unwrap_err().is_structural());
        assert!(decode::<Vec<i32>>("").unwrap_err().is_structural());
        assert!(decode::<char>("").unwrap_err().is_structural());
    }

    #[test]
    fn test_bool_out_of_range() {
        assert!(matches!(decode::<bool>("2;"), Err(Error::InvalidValue(_))));
    }

    #[test]
    fn test_text_chars() {
        assert_eq!(decode::<char>("x").unwrap(), 'x');
        assert_eq!(decode::<char>(" é ").unwrap(), 'é');
        assert_eq!(decode::<Vec<char>>("[abc]").unwrap(), vec!['a', 'b', 'c']);
    }

    #[test]
    fn test_text_strings() {
        assert_eq!(decode::<String>("\"hello\"; ").unwrap(), "hello");
        assert_eq!(decode::<String>("\"\"").unwrap(), "");
        assert_eq!(
            decode::<String>(r#""the \"quoted\" \\path\\"; "#).unwrap(),
            r#"the "quoted" \path\"#
        );
        assert_eq!(decode::<String>(r#""\n""#).unwrap(), "n");
    }

    #[test]
    fn test_missing_opening_quote() {
        let err = decode::<String>("  abc").unwrap_err();
        assert!(err.is_structural());
        assert_eq!(err.position(), Some(2));
        assert!(err.to_string().starts_with("Unexpected character 'a' at position 2."));
    }

    #[test]
    fn test_missing_closing_quote() {
        let err = decode::<String>("\"abc").unwrap_err();
        assert!(err.is_structural());
        assert_eq!(err.position(), Some(4));
        assert_eq!(err.context(), Some("\"abc\n    |"));
    }

    #[test]
    fn test_dangling_escape() {
        let err = decode::<String>("\"abc\\").unwrap_err();
        assert!(err.is_structural());
        assert_eq!(err.position(), Some(5));
    }

    #[test]
    fn test_invalid_utf8_string() {
        let mut target = BufferTarget::from_bytes(vec![b'"', 0xFF, b'"']);
        let result: Result<String> = Decoder::new(&mut target, CodecOptions::text()).read();
        assert!(matches!(result, Err(Error::InvalidValue(_))));
    }

    #[test]
    fn test_nested_sequences() {
        let value: Vec<Vec<i32>> = decode("[[1;2;3;][4;5;]]").unwrap();
        assert_eq!(value, vec![vec![1, 2, 3], vec![4, 5]]);

        let value: Vec<Vec<i32>> = decode("[[1;2;][3;][]]").unwrap();
        assert_eq!(value, vec![vec![1, 2], vec![3], vec![]]);
    }

    #[test]
    fn test_pretty_sequences() {
        let input = "[\n\t[\n\t\t1;\n\t\t2;\n\t]\n\t[]\n]";
        let value: Vec<Vec<i32>> = decode(input).unwrap();
        assert_eq!(value, vec![vec![1, 2], vec![]]);
    }

    #[test]
    fn test_expected_open_bracket() {
        let err = decode::<Vec<i32>>("1;2;").unwrap_err();
        assert!(err.is_structural());
        assert_eq!(err.position(), Some(0));
        assert!(err.to_string().contains("Expected '['."));
    }

    #[test]
    fn test_unclosed_sequence() {
        let err = decode::<Vec<i32>>("[1;2;").unwrap_err();
        assert!(err.is_structural());
        assert_eq!(err.position(), Some(5));
        assert!(err.to_string().contains("end of input"));
    }

    #[test]
    fn test_tuple_with_extra_elements() {
        let err = decode::<(i32, i32)>("[1;2;3;]").unwrap_err();
        assert!(err.is_structural());
        assert_eq!(err.position(), Some(5));
    }

    #[test]
    fn test_positional_struct() {
        #[derive(Deserialize, Debug, PartialEq)]
        struct Point {
            x: i32,
            y: i32,
        }

        assert_eq!(decode::<Point>("[1;-2;]").unwrap(), Point { x: 1, y: -2 });
    }

    #[test]
    fn test_trailing_bytes() {
        let err = decode::<i32>("1; 2;").unwrap_err();
        assert!(matches!(err, Error::TrailingBytes { position: 3 }));
    }

    #[test]
    fn test_read_into() {
        let mut target = text_target("[1;2;]");
        let mut decoder = Decoder::new(&mut target, CodecOptions::text());
        let mut value = vec![9, 9, 9];
        decoder.read_into(&mut value).unwrap();
        assert_eq!(value, vec![1, 2]);
    }

    #[test]
    fn test_any_is_unsupported() {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Loose {
            Int(i32),
        }

        let result = decode::<Loose>("1;");
        assert!(matches!(result, Err(Error::UnsupportedType(_))));
    }

    #[test]
    fn test_binary_scalars_and_strings() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&0x0102u16.to_be_bytes());
        bytes.extend_from_slice(&3u64.to_be_bytes());
        bytes.extend_from_slice(b"abc");
        let mut target = BufferTarget::from_bytes(bytes);
        let options = CodecOptions::binary().with_byte_order(ByteOrder::Big);
        let mut decoder = Decoder::new(&mut target, options);
        assert_eq!(decoder.read::<u16>().unwrap(), 0x0102);
        assert_eq!(decoder.read::<String>().unwrap(), "abc");
        decoder.end().unwrap();
    }

    #[test]
    fn test_binary_short_read() {
        let mut target = BufferTarget::from_bytes(vec![1, 2]);
        let result: Result<u32> = Decoder::new(&mut target, CodecOptions::binary()).read();
        assert!(result.unwrap_err().is_backend());
    }

    #[test]
    fn test_binary_empty_target() {
        let mut target = BufferTarget::new();
        let result: Result<Vec<u8>> = Decoder::new(&mut target, CodecOptions::binary()).read();
        assert!(result.unwrap_err().is_backend());
    }

    #[test]
    fn test_binary_corrupt_length_does_not_preallocate() {
        let mut target = BufferTarget::from_bytes(u64::MAX.to_le_bytes().to_vec());
        let options = CodecOptions::binary().with_byte_order(ByteOrder::Little);
        let result: Result<String> = Decoder::new(&mut target, options).read();
        assert!(result.is_err());
    }

    #[test]
    fn test_binary_invalid_char() {
        let mut target = BufferTarget::from_bytes(0xD800u32.to_le_bytes().to_vec());
        let options = CodecOptions::binary().with_byte_order(ByteOrder::Little);
        let result: Result<char> = Decoder::new(&mut target, options).read();
        assert!(matches!(result, Err(Error::InvalidValue(_))));
    }

    #[test]
    fn test_binary_tuple_length_mismatch() {
        let mut bytes = 3u64.to_le_bytes().to_vec();
        bytes.extend_from_slice(&[1, 2, 3]);
        let mut target = BufferTarget::from_bytes(bytes);
        let options = CodecOptions::binary().with_byte_order(ByteOrder::Little);
        let result: Result<(u8, u8)> = Decoder::new(&mut target, options).read();
        assert!(matches!(result, Err(Error::InvalidValue(_))));
    }
}
