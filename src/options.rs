//! Configuration options for duplex encoding and decoding.
//!
//! This module provides types to choose and tune the wire representation:
//!
//! - [`CodecOptions`]: Main configuration struct
//! - [`Format`]: Binary or text layout
//! - [`ByteOrder`]: Byte order of binary scalars and length prefixes
//!
//! ## Examples
//!
//! ```rust
//! use serde_duplex::{to_bytes_with_options, ByteOrder, CodecOptions};
//!
//! // Portable binary payloads
//! let options = CodecOptions::binary().with_byte_order(ByteOrder::Little);
//! let bytes = to_bytes_with_options(&7u16, &options).unwrap();
//! assert_eq!(bytes, vec![7, 0]);
//!
//! // Indented text
//! let options = CodecOptions::pretty();
//! let bytes = to_bytes_with_options(&vec![1u8, 2], &options).unwrap();
//! assert_eq!(bytes, b"[\n\t1;\n\t2;\n]");
//! ```

/// Wire representation used by an encoder or decoder.
///
/// Streams are not self-identifying: a decoder must be configured with the
/// same format the data was written in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Format {
    /// Raw fixed-width scalars and 8-byte length prefixes.
    Binary,
    /// Delimited decimal text with quoted strings and bracketed sequences.
    #[default]
    Text,
}

/// Byte order of binary scalars and length prefixes.
///
/// [`ByteOrder::Native`] reproduces the in-memory layout of the host, which
/// makes payloads unportable between hosts of different endianness. Pick
/// [`ByteOrder::Little`] or [`ByteOrder::Big`] when data crosses machines.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ByteOrder {
    #[default]
    Native,
    Little,
    Big,
}

/// Configuration shared by [`Encoder`](crate::Encoder) and [`Decoder`](crate::Decoder).
///
/// # Examples
///
/// ```rust
/// use serde_duplex::{CodecOptions, Format};
///
/// let options = CodecOptions::new();
/// assert_eq!(options.format, Format::Text);
/// assert!(!options.pretty);
/// assert_eq!(options.context_radius, 10);
/// ```
#[derive(Clone, Debug)]
pub struct CodecOptions {
    pub format: Format,
    pub pretty: bool,
    pub byte_order: ByteOrder,
    /// Bytes shown on each side of a parse error's position.
    pub context_radius: usize,
}

impl Default for CodecOptions {
    fn default() -> Self {
        CodecOptions {
            format: Format::default(),
            pretty: false,
            byte_order: ByteOrder::default(),
            context_radius: 10,
        }
    }
}

impl CodecOptions {
    /// Creates default options (compact text, native byte order, 10-byte context).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Options for the binary layout.
    #[must_use]
    pub fn binary() -> Self {
        CodecOptions {
            format: Format::Binary,
            ..Default::default()
        }
    }

    /// Options for compact text.
    #[must_use]
    pub fn text() -> Self {
        Self::default()
    }

    /// Options for pretty-printed text with newlines and tab indentation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_duplex::{CodecOptions, Format};
    ///
    /// let options = CodecOptions::pretty();
    /// assert!(options.pretty);
    /// assert_eq!(options.format, Format::Text);
    /// ```
    #[must_use]
    pub fn pretty() -> Self {
        CodecOptions {
            pretty: true,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }

    /// Enables or disables pretty printing. Has no effect in binary mode.
    #[must_use]
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Sets the byte order for binary mode. Has no effect in text mode.
    #[must_use]
    pub fn with_byte_order(mut self, byte_order: ByteOrder) -> Self {
        self.byte_order = byte_order;
        self
    }

    /// Sets how many bytes of input are shown before and after a parse error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_duplex::CodecOptions;
    ///
    /// let options = CodecOptions::new().with_context_radius(4);
    /// assert_eq!(options.context_radius, 4);
    /// ```
    #[must_use]
    pub fn with_context_radius(mut self, radius: usize) -> Self {
        self.context_radius = radius;
        self
    }
}
