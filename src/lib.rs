//! # serde_duplex
//!
//! A Serde codec with two wire representations over pluggable byte targets.
//!
//! ## What is duplex?
//!
//! Every value can be written either as a compact **binary** layout (raw
//! fixed-width scalars and 8-byte length prefixes) or as a human-readable
//! **text** layout (decimal tokens, quoted strings, bracketed sequences). Both
//! layouts are driven by the static shape of the value; neither carries type
//! tags, so the reader must ask for the same type the writer wrote.
//!
//! ## Key Features
//!
//! - **Two formats, one model**: the same `Serialize`/`Deserialize` impls feed both layouts
//! - **Pluggable targets**: memory buffers, plain files and buffered files behind one [`Target`] trait
//! - **Pretty text**: optional newlines and tab indentation that decode exactly like compact text
//! - **Located errors**: text parse errors report the offset and a window of the surrounding input
//! - **No Unsafe Code**: written entirely in safe Rust
//!
//! ## Quick Start
//!
//! ```rust
//! use serde_duplex::{from_bytes, from_str, to_bytes, to_string};
//!
//! let nested = vec![vec![1, 2, 3], vec![4, 5]];
//!
//! // Text
//! let text = to_string(&nested).unwrap();
//! assert_eq!(text, "[[1;2;3;][4;5;]]");
//! let back: Vec<Vec<i32>> = from_str(&text).unwrap();
//! assert_eq!(back, nested);
//!
//! // Binary
//! let bytes = to_bytes(&nested).unwrap();
//! let back: Vec<Vec<i32>> = from_bytes(&bytes).unwrap();
//! assert_eq!(back, nested);
//! ```
//!
//! ### Working with Targets Directly
//!
//! Several values can share one target; each `write` appends and each `read`
//! consumes exactly one value.
//!
//! ```rust
//! use serde_duplex::{BufferTarget, CodecOptions, Decoder, Encoder};
//!
//! let mut target = BufferTarget::new();
//! {
//!     let mut encoder = Encoder::new(&mut target, CodecOptions::pretty());
//!     encoder.write("header").unwrap();
//!     encoder.write(&vec![1.5f64, -2.0]).unwrap();
//! }
//!
//! let mut decoder = Decoder::new(&mut target, CodecOptions::text());
//! let header: String = decoder.read().unwrap();
//! let values: Vec<f64> = decoder.read().unwrap();
//! assert_eq!(header, "header");
//! assert_eq!(values, vec![1.5, -2.0]);
//! ```
//!
//! ## Supported Shapes
//!
//! | Shape | Types | Binary | Text |
//! |-------|-------|--------|------|
//! | Scalar | integers, floats, `bool` | raw bytes | `42;` |
//! | Character | `char` | 4-byte code point | raw UTF-8 |
//! | Text | `String`, `&str`, byte buffers | `u64` length + bytes | `"esc\"aped"; ` |
//! | Sequence | `Vec`, slices, arrays, tuples, structs | `u64` count + elements | `[...]` |
//!
//! Options, maps and enums are rejected with [`Error::UnsupportedType`].
//! See the [`grammar`] module for the full layouts.

pub mod de;
mod diagnostic;
pub mod error;
pub mod file;
pub mod grammar;
pub mod options;
mod scalar;
pub mod ser;
pub mod target;

pub use de::Decoder;
pub use error::{Error, Result};
pub use file::{BufferedFileTarget, FileTarget};
pub use options::{ByteOrder, CodecOptions, Format};
pub use ser::Encoder;
pub use target::{BufferTarget, Target};

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io;
use std::path::Path;

/// Serialize any `T: Serialize` to bytes in the binary layout with default options.
///
/// # Examples
///
/// ```rust
/// use serde_duplex::to_bytes;
///
/// let bytes = to_bytes(&7u32).unwrap();
/// assert_eq!(bytes, 7u32.to_ne_bytes());
/// ```
///
/// # Errors
///
/// Returns an error if the value's shape is unsupported.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_bytes<T>(value: &T) -> Result<Vec<u8>>
where
    T: ?Sized + Serialize,
{
    to_bytes_with_options(value, &CodecOptions::binary())
}

/// Serialize any `T: Serialize` to bytes in the layout chosen by `options`.
///
/// # Errors
///
/// Returns an error if the value's shape is unsupported.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_bytes_with_options<T>(value: &T, options: &CodecOptions) -> Result<Vec<u8>>
where
    T: ?Sized + Serialize,
{
    let mut target = BufferTarget::with_capacity(256);
    Encoder::new(&mut target, options.clone()).write(value)?;
    Ok(target.into_inner())
}

/// Serialize any `T: Serialize` to compact text.
///
/// # Examples
///
/// ```rust
/// use serde_duplex::to_string;
///
/// assert_eq!(to_string(&vec!["a", "b"]).unwrap(), "[\"a\"; \"b\"; ]");
/// ```
///
/// # Errors
///
/// Returns an error if the value's shape is unsupported or it contains byte
/// buffers that are not valid UTF-8.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    text_to_string(value, &CodecOptions::text())
}

/// Serialize any `T: Serialize` to pretty-printed text.
///
/// Pretty-printing puts each sequence element on its own line, indented
/// with one tab per nesting level.
///
/// # Examples
///
/// ```rust
/// use serde_duplex::to_string_pretty;
///
/// let text = to_string_pretty(&vec![vec![1], vec![]]).unwrap();
/// assert_eq!(text, "[\n\t[\n\t\t1;\n\t]\n\t[]\n]");
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be encoded as UTF-8 text.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_pretty<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    text_to_string(value, &CodecOptions::pretty())
}

fn text_to_string<T>(value: &T, options: &CodecOptions) -> Result<String>
where
    T: ?Sized + Serialize,
{
    let bytes = to_bytes_with_options(value, options)?;
    String::from_utf8(bytes).map_err(|e| Error::invalid_value(e.to_string()))
}

/// Serialize any `T: Serialize` to a writer.
///
/// The value is encoded in memory first and handed to the writer in one call.
///
/// # Errors
///
/// Returns an error if encoding fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(mut writer: W, value: &T, options: &CodecOptions) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let bytes = to_bytes_with_options(value, options)?;
    writer.write_all(&bytes)?;
    Ok(())
}

/// Serialize any `T: Serialize` to a file, replacing its contents.
///
/// # Errors
///
/// Returns an error if encoding fails or the file cannot be written.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_path<P, T>(path: P, value: &T, options: &CodecOptions) -> Result<()>
where
    P: AsRef<Path>,
    T: ?Sized + Serialize,
{
    let mut target = BufferedFileTarget::create(path)?;
    Encoder::new(&mut target, options.clone()).write(value)?;
    target.flush()
}

/// Deserialize an instance of `T` from bytes in the binary layout with default options.
///
/// # Examples
///
/// ```rust
/// use serde_duplex::{from_bytes, to_bytes};
///
/// let bytes = to_bytes("duplex").unwrap();
/// let text: String = from_bytes(&bytes).unwrap();
/// assert_eq!(text, "duplex");
/// ```
///
/// # Errors
///
/// Returns an error if the bytes run out early or remain after the value.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_bytes<T>(bytes: &[u8]) -> Result<T>
where
    T: DeserializeOwned,
{
    from_bytes_with_options(bytes, &CodecOptions::binary())
}

/// Deserialize an instance of `T` from bytes in the layout chosen by `options`.
///
/// # Errors
///
/// Returns an error if the input does not hold exactly one valid `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_bytes_with_options<T>(bytes: &[u8], options: &CodecOptions) -> Result<T>
where
    T: DeserializeOwned,
{
    let mut target = BufferTarget::from_bytes(bytes);
    decode_whole(&mut target, options)
}

/// Deserialize an instance of `T` from text.
///
/// # Examples
///
/// ```rust
/// use serde_duplex::from_str;
///
/// let nested: Vec<Vec<i32>> = from_str("[[1;2;3;][4;5;]]").unwrap();
/// assert_eq!(nested, vec![vec![1, 2, 3], vec![4, 5]]);
/// ```
///
/// # Errors
///
/// Returns an error if the text is malformed. Error messages include the
/// byte offset and a window of the surrounding input.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<T>(s: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    from_bytes_with_options(s.as_bytes(), &CodecOptions::text())
}

/// Deserialize an instance of `T` from an I/O stream.
///
/// The stream is read to its end before decoding.
///
/// # Errors
///
/// Returns an error if reading fails or the data does not hold exactly one valid `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R, T>(mut reader: R, options: &CodecOptions) -> Result<T>
where
    R: io::Read,
    T: DeserializeOwned,
{
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    from_bytes_with_options(&bytes, options)
}

/// Deserialize an instance of `T` from a file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or does not hold exactly one valid `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_path<P, T>(path: P, options: &CodecOptions) -> Result<T>
where
    P: AsRef<Path>,
    T: DeserializeOwned,
{
    let mut target = BufferedFileTarget::open(path)?;
    decode_whole(&mut target, options)
}

fn decode_whole<T, D>(target: &mut D, options: &CodecOptions) -> Result<T>
where
    T: DeserializeOwned,
    D: Target + ?Sized,
{
    let mut decoder = Decoder::new(target, options.clone());
    let value = decoder.read()?;
    decoder.end()?;
    Ok(value)
}
