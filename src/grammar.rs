//! Duplex Wire Layouts
//!
//! This module documents the two byte layouts produced by [`Encoder`](crate::Encoder)
//! and consumed by [`Decoder`](crate::Decoder).
//!
//! # Overview
//!
//! Neither layout is self-describing. The shape of the Rust type being read or
//! written picks the rule at every step, so a value must be decoded as the same
//! type (and with the same [`CodecOptions`](crate::CodecOptions)) it was encoded with.
//!
//! Each value falls into one of four shapes:
//!
//! | Shape | Rust types |
//! |-------|------------|
//! | Scalar | `i8`..`i128`, `u8`..`u128`, `f32`, `f64`, `bool` |
//! | Character | `char` |
//! | Text | `String`, `&str`, byte buffers via `serialize_bytes` |
//! | Sequence | `Vec<T>`, slices, `[T; N]`, tuples, tuple structs, structs |
//!
//! Newtype structs are transparent and use the shape of their inner value.
//!
//! # Binary Layout
//!
//! | Shape | Bytes |
//! |-------|-------|
//! | Scalar | the value's raw bytes in the configured [`ByteOrder`](crate::ByteOrder) |
//! | `bool` | one byte, `0` or `1` |
//! | Character | the code point as a 4-byte `u32` |
//! | Text | `u64` byte count, then the raw bytes |
//! | Sequence | `u64` element count, then each element in order |
//!
//! Lengths are always 8 bytes wide, whatever the platform's `usize`.
//! With little-endian order, `vec![1u16, 2]` is:
//!
//! ```text
//! 02 00 00 00 00 00 00 00  01 00  02 00
//! ```
//!
//! Structs and tuples carry a count too. The decoder checks it against the
//! number of fields it expects.
//!
//! # Text Layout
//!
//! ## Scalars
//!
//! A scalar is its decimal form followed by `;`:
//!
//! ```text
//! 42;-7;3.5;inf;NaN;
//! ```
//!
//! `bool` is written as `1;` or `0;`.
//!
//! Integer tokens admit digits and a leading `-`. Float tokens also admit
//! letters, `.`, `+` and `-`, so exponents and non-finite values come back intact.
//!
//! ## Characters
//!
//! A character is its UTF-8 encoding with no delimiter.
//!
//! ## Text
//!
//! Text is quoted. `"` and `\` inside it are prefixed with `\`, and the closing
//! quote is followed by `"; "`:
//!
//! ```text
//! "say \"hi\" \\ bye";
//! ```
//!
//! ## Sequences
//!
//! A sequence is `[`, its elements, then `]`. Nothing separates elements besides
//! their own terminators:
//!
//! ```text
//! [[1;2;3;][4;5;]]
//! ```
//!
//! ## Pretty Text
//!
//! With [`CodecOptions::pretty`](crate::CodecOptions::pretty), a newline follows
//! `[` and every element, and each element is indented with one tab per level:
//!
//! ```text
//! [
//! 	[
//! 		1;
//! 		2;
//! 	]
//! 	[]
//! ]
//! ```
//!
//! An empty sequence is always `[]`.
//!
//! ## Separators
//!
//! The decoder skips any run of space, `;`, `\n`, `\t` and `\r` before each
//! token. Compact and pretty output therefore decode identically, and extra
//! whitespace between tokens is harmless.
//!
//! # Errors
//!
//! Text decoding reports the byte offset of the failure and a window of the
//! surrounding input with a marker under the offending byte:
//!
//! ```text
//! Unexpected character 'x' at position 4. Expected '['.
//! [1;]x[2;]
//!     |
//! ```
//!
//! Numeral tokens that lex but do not parse (overflow, `1.2.3`) are reported as
//! malformed numerals at the token's first byte.
//!
//! # Limitations
//!
//! - **Not self-describing**: `deserialize_any` is unsupported
//! - **No options, maps or enums**: these shapes return [`Error::UnsupportedType`](crate::Error::UnsupportedType)
//! - **Separator characters**: in text mode a `char` that is itself a separator
//!   (space, `;`, tab, newline, carriage return) is skipped on read and does not round-trip,
//!   and a `]` character inside a sequence is read as the end of that sequence
//! - **No type tags**: reading a different type than was written is not detected in binary mode

// This module contains only documentation; no implementation code
