//! Duplex encoding.
//!
//! This module provides the [`Encoder`], a [`serde::Serializer`] that appends
//! the binary or text encoding of a value to a [`Target`].
//!
//! ## Overview
//!
//! The layout of a value is chosen by its shape alone:
//!
//! - **Scalars**: raw bytes in binary mode, a decimal token ended by `;` in text mode
//! - **Characters**: the code point as a `u32` in binary mode, the raw UTF-8 bytes in text mode
//! - **Strings**: an 8-byte length and the raw bytes, or a quoted and escaped literal
//! - **Sequences**: an 8-byte element count and the elements, or a bracketed list
//!
//! ## Usage
//!
//! ```rust
//! use serde_duplex::{BufferTarget, CodecOptions, Encoder};
//!
//! let mut target = BufferTarget::new();
//! let mut encoder = Encoder::new(&mut target, CodecOptions::text());
//! encoder.write(&vec![vec![1, 2, 3], vec![4, 5]]).unwrap();
//! encoder.write("done").unwrap();
//!
//! assert_eq!(target.as_bytes(), b"[[1;2;3;][4;5;]]\"done\"; ");
//! ```

use crate::scalar::Scalar;
use crate::{CodecOptions, Error, Format, Result, Target};
use serde::ser::{self, Impossible, Serialize};

/// The duplex encoder.
///
/// Borrows a [`Target`] for its whole lifetime and writes each value passed
/// to [`Encoder::write`] after the previous one.
pub struct Encoder<'a, T: Target + ?Sized> {
    target: &'a mut T,
    options: CodecOptions,
    depth: usize,
}

impl<'a, T: Target + ?Sized> Encoder<'a, T> {
    pub fn new(target: &'a mut T, options: CodecOptions) -> Self {
        Encoder {
            target,
            options,
            depth: 0,
        }
    }

    #[must_use]
    pub fn options(&self) -> &CodecOptions {
        &self.options
    }

    /// Appends the encoding of `value` to the target.
    ///
    /// # Errors
    ///
    /// Fails when the target cannot be written or the value's shape has no
    /// representation in this codec (maps, options, enums).
    pub fn write<V>(&mut self, value: &V) -> Result<()>
    where
        V: ?Sized + Serialize,
    {
        let depth = self.depth;
        let result = value.serialize(&mut *self);
        if result.is_err() {
            self.depth = depth;
        }
        result
    }

    fn is_text(&self) -> bool {
        self.options.format == Format::Text
    }

    fn write_scalar<S: Scalar>(&mut self, value: S) -> Result<()> {
        match self.options.format {
            Format::Binary => self
                .target
                .write(value.to_bytes(self.options.byte_order).as_ref()),
            Format::Text => {
                let mut token = value.to_string();
                token.push(';');
                self.target.write(token.as_bytes())
            }
        }
    }

    fn write_len(&mut self, len: usize) -> Result<()> {
        self.write_scalar(len as u64)
    }

    fn write_text(&mut self, bytes: &[u8]) -> Result<()> {
        if !self.is_text() {
            self.write_len(bytes.len())?;
            return self.target.write(bytes);
        }

        self.target.write(b"\"")?;
        let mut start = 0;
        for (i, &byte) in bytes.iter().enumerate() {
            if byte == b'"' || byte == b'\\' {
                self.target.write(&bytes[start..i])?;
                self.target.write(b"\\")?;
                start = i;
            }
        }
        self.target.write(&bytes[start..])?;
        self.target.write(b"\"; ")
    }

    fn write_indent(&mut self) -> Result<()> {
        for _ in 0..self.depth {
            self.target.write(b"\t")?;
        }
        Ok(())
    }

    fn write_newline(&mut self) -> Result<()> {
        if self.options.pretty {
            self.target.write(b"\n")?;
        }
        Ok(())
    }

    fn begin_sequence<'e>(&'e mut self, len: Option<usize>) -> Result<Compound<'e, 'a, T>> {
        if self.is_text() {
            self.target.write(b"[")?;
        } else {
            let len = len.ok_or_else(|| {
                Error::unsupported_type("sequence length must be known up front in binary mode")
            })?;
            self.write_len(len)?;
        }
        Ok(Compound {
            encoder: self,
            empty: true,
        })
    }
}

fn unsupported<V>(shape: &str) -> Result<V> {
    Err(Error::unsupported_type(&format!(
        "{} has no duplex representation",
        shape
    )))
}

impl<'e, 'a, T: Target + ?Sized> ser::Serializer for &'e mut Encoder<'a, T> {
    type Ok = ();
    type Error = Error;

    type SerializeSeq = Compound<'e, 'a, T>;
    type SerializeTuple = Compound<'e, 'a, T>;
    type SerializeTupleStruct = Compound<'e, 'a, T>;
    type SerializeTupleVariant = Impossible<(), Error>;
    type SerializeMap = Impossible<(), Error>;
    type SerializeStruct = Compound<'e, 'a, T>;
    type SerializeStructVariant = Impossible<(), Error>;

    fn serialize_bool(self, v: bool) -> Result<()> {
        self.write_scalar(u8::from(v))
    }

    fn serialize_i8(self, v: i8) -> Result<()> {
        self.write_scalar(v)
    }

    fn serialize_i16(self, v: i16) -> Result<()> {
        self.write_scalar(v)
    }

    fn serialize_i32(self, v: i32) -> Result<()> {
        self.write_scalar(v)
    }

    fn serialize_i64(self, v: i64) -> Result<()> {
        self.write_scalar(v)
    }

    fn serialize_i128(self, v: i128) -> Result<()> {
        self.write_scalar(v)
    }

    fn serialize_u8(self, v: u8) -> Result<()> {
        self.write_scalar(v)
    }

    fn serialize_u16(self, v: u16) -> Result<()> {
        self.write_scalar(v)
    }

    fn serialize_u32(self, v: u32) -> Result<()> {
        self.write_scalar(v)
    }

    fn serialize_u64(self, v: u64) -> Result<()> {
        self.write_scalar(v)
    }

    fn serialize_u128(self, v: u128) -> Result<()> {
        self.write_scalar(v)
    }

    fn serialize_f32(self, v: f32) -> Result<()> {
        self.write_scalar(v)
    }

    fn serialize_f64(self, v: f64) -> Result<()> {
        self.write_scalar(v)
    }

    fn serialize_char(self, v: char) -> Result<()> {
        if self.is_text() {
            let mut utf8 = [0u8; 4];
            self.target.write(v.encode_utf8(&mut utf8).as_bytes())
        } else {
            self.write_scalar(u32::from(v))
        }
    }

    fn serialize_str(self, v: &str) -> Result<()> {
        self.write_text(v.as_bytes())
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<()> {
        self.write_text(v)
    }

    fn serialize_none(self) -> Result<()> {
        unsupported("Option")
    }

    fn serialize_some<V>(self, _value: &V) -> Result<()>
    where
        V: ?Sized + Serialize,
    {
        unsupported("Option")
    }

    fn serialize_unit(self) -> Result<()> {
        unsupported("()")
    }

    fn serialize_unit_struct(self, name: &'static str) -> Result<()> {
        unsupported(name)
    }

    fn serialize_unit_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
    ) -> Result<()> {
        unsupported(name)
    }

    fn serialize_newtype_struct<V>(self, _name: &'static str, value: &V) -> Result<()>
    where
        V: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<V>(
        self,
        name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &V,
    ) -> Result<()>
    where
        V: ?Sized + Serialize,
    {
        unsupported(name)
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<Self::SerializeSeq> {
        self.begin_sequence(len)
    }

    fn serialize_tuple(self, len: usize) -> Result<Self::SerializeTuple> {
        self.begin_sequence(Some(len))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        self.begin_sequence(Some(len))
    }

    fn serialize_tuple_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        unsupported(name)
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        unsupported("map")
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<Self::SerializeStruct> {
        self.begin_sequence(Some(len))
    }

    fn serialize_struct_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        unsupported(name)
    }

    fn is_human_readable(&self) -> bool {
        self.is_text()
    }
}

/// Serializer for sequences, tuples and positional structs.
///
/// In text mode the nesting depth is raised when the first element arrives,
/// so an empty sequence is always written as `[]`.
pub struct Compound<'e, 'a, T: Target + ?Sized> {
    encoder: &'e mut Encoder<'a, T>,
    empty: bool,
}

impl<'e, 'a, T: Target + ?Sized> Compound<'e, 'a, T> {
    fn element<V>(&mut self, value: &V) -> Result<()>
    where
        V: ?Sized + Serialize,
    {
        if !self.encoder.is_text() {
            return value.serialize(&mut *self.encoder);
        }

        if self.empty {
            self.empty = false;
            self.encoder.write_newline()?;
            self.encoder.depth += 1;
        }
        if self.encoder.options.pretty {
            self.encoder.write_indent()?;
        }
        value.serialize(&mut *self.encoder)?;
        self.encoder.write_newline()
    }

    fn finish(self) -> Result<()> {
        if !self.encoder.is_text() {
            return Ok(());
        }

        if !self.empty {
            self.encoder.depth -= 1;
            if self.encoder.options.pretty {
                self.encoder.write_indent()?;
            }
        }
        self.encoder.target.write(b"]")
    }
}

impl<'e, 'a, T: Target + ?Sized> ser::SerializeSeq for Compound<'e, 'a, T> {
    type Ok = ();
    type Error = Error;

    fn serialize_element<V>(&mut self, value: &V) -> Result<()>
    where
        V: ?Sized + Serialize,
    {
        self.element(value)
    }

    fn end(self) -> Result<()> {
        self.finish()
    }
}

impl<'e, 'a, T: Target + ?Sized> ser::SerializeTuple for Compound<'e, 'a, T> {
    type Ok = ();
    type Error = Error;

    fn serialize_element<V>(&mut self, value: &V) -> Result<()>
    where
        V: ?Sized + Serialize,
    {
        self.element(value)
    }

    fn end(self) -> Result<()> {
        self.finish()
    }
}

impl<'e, 'a, T: Target + ?Sized> ser::SerializeTupleStruct for Compound<'e, 'a, T> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<V>(&mut self, value: &V) -> Result<()>
    where
        V: ?Sized + Serialize,
    {
        self.element(value)
    }

    fn end(self) -> Result<()> {
        self.finish()
    }
}

impl<'e, 'a, T: Target + ?Sized> ser::SerializeStruct for Compound<'e, 'a, T> {
    type Ok = ();
    type Error = Error;

    // Fields are positional; names are not written.
    fn serialize_field<V>(&mut self, _key: &'static str, value: &V) -> Result<()>
    where
        V: ?Sized + Serialize,
    {
        self.element(value)
    }

    fn end(self) -> Result<()> {
        self.finish()
    }
}
