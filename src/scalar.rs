//! Fixed-width numeric scalars.
//!
//! Every numeric type the codec handles goes through [`Scalar`], which knows
//! its raw byte layout for binary mode and which bytes may appear in its
//! decimal token for text mode.

use crate::ByteOrder;
use std::fmt::Display;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum NumericKind {
    Integer,
    Float,
}

impl NumericKind {
    /// Whether `byte` may continue a numeric token of this kind.
    ///
    /// Integers admit digits and a leading `-`. Floats also admit the decimal
    /// point, exponent signs and the letters of `inf`/`NaN`; the final parse
    /// decides whether the token as a whole is valid.
    pub(crate) fn accepts(self, byte: u8, first: bool) -> bool {
        match self {
            NumericKind::Integer => byte.is_ascii_digit() || (byte == b'-' && first),
            NumericKind::Float => {
                byte.is_ascii_alphanumeric() || matches!(byte, b'.' | b'-' | b'+')
            }
        }
    }
}

pub(crate) trait Scalar: Copy + Display + FromStr {
    const KIND: NumericKind;

    type Bytes: AsRef<[u8]> + AsMut<[u8]> + Default;

    fn to_bytes(self, order: ByteOrder) -> Self::Bytes;

    fn from_bytes(bytes: Self::Bytes, order: ByteOrder) -> Self;
}

macro_rules! impl_scalar {
    ($kind:ident => $($ty:ty),* $(,)?) => {$(
        impl Scalar for $ty {
            const KIND: NumericKind = NumericKind::$kind;

            type Bytes = [u8; std::mem::size_of::<$ty>()];

            #[inline]
            fn to_bytes(self, order: ByteOrder) -> Self::Bytes {
                match order {
                    ByteOrder::Native => self.to_ne_bytes(),
                    ByteOrder::Little => self.to_le_bytes(),
                    ByteOrder::Big => self.to_be_bytes(),
                }
            }

            #[inline]
            fn from_bytes(bytes: Self::Bytes, order: ByteOrder) -> Self {
                match order {
                    ByteOrder::Native => <$ty>::from_ne_bytes(bytes),
                    ByteOrder::Little => <$ty>::from_le_bytes(bytes),
                    ByteOrder::Big => <$ty>::from_be_bytes(bytes),
                }
            }
        }
    )*};
}

impl_scalar!(Integer => i8, i16, i32, i64, i128, u8, u16, u32, u64, u128);
impl_scalar!(Float => f32, f64);
