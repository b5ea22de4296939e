// Stacks Codec Library
// Written in 2026 by
//   The stacks-codec developers
//
// To the extent possible under law, the author(s) have dedicated all
// copyright and related and neighboring rights to this software to
// the public domain worldwide. This software is distributed without
// any warranty.
//
// You should have received a copy of the CC0 Public Domain Dedication
// along with this software.
// If not, see <http://creativecommons.org/publicdomain/zero/1.0/>.
//

//! Consensus-encodable types
//!
//! Stacks wire encoding is big-endian throughout: lengths are `u32`, integers
//! are 16 bytes.
//!

use std::io::{Cursor, Read};
use std::{error, fmt, io};

use bitcoin::hex::HexToBytesError;

use crate::hex::{FromHex, ToHex};
use crate::names::{self, ClarityName};

/// Maximum size in bytes of a serialized Clarity value, and of any single
/// length prefix inside one.
pub const MAX_VALUE_SIZE: u32 = 1024 * 1024;

/// Encoding error
#[derive(Debug)]
pub enum Error {
    /// And I/O error
    Io(io::Error),
    /// We unexpectedly hit the end of the buffer
    UnexpectedEof,
    /// A length prefix exceeded the allowed maximum
    OversizedVectorAllocation {
        /// The length requested
        requested: usize,
        /// The maximum length
        max: usize,
    },
    /// Nested values went deeper than allowed
    DepthExceeded {
        /// The maximum depth
        max: u8,
    },
    /// Unknown Clarity type prefix
    BadTypePrefix(u8),
    /// A Clarity or contract name failed validation
    InvalidName(names::Error),
    /// A tuple carried the same key twice
    DuplicateTupleKey(ClarityName),
    /// A `string-utf8` payload was not valid UTF-8
    InvalidUtf8,
    /// Parsing error
    ParseFailed(&'static str),
    /// Hex parsing errors
    HexError(HexToBytesError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::Io(ref e) => write!(f, "I/O error: {}", e),
            Error::UnexpectedEof => write!(f, "unexpected EOF"),
            Error::OversizedVectorAllocation {
                requested: ref r,
                max: ref m,
            } => write!(f, "oversized vector allocation: requested {}, maximum {}", r, m),
            Error::DepthExceeded { max } => write!(f, "value nesting exceeds maximum depth {}", max),
            Error::BadTypePrefix(p) => write!(f, "bad type prefix: 0x{:02x}", p),
            Error::InvalidName(ref e) => write!(f, "invalid name: {}", e),
            Error::DuplicateTupleKey(ref k) => write!(f, "duplicate tuple key: {}", k),
            Error::InvalidUtf8 => write!(f, "invalid UTF-8 in string-utf8 value"),
            Error::ParseFailed(ref e) => write!(f, "parse failed: {}", e),
            Error::HexError(ref e) => write!(f, "Hex error {}", e),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            Error::Io(ref e) => Some(e),
            Error::InvalidName(ref e) => Some(e),
            Error::HexError(ref e) => Some(e),
            _ => None,
        }
    }
}

#[doc(hidden)]
impl From<io::Error> for Error {
    fn from(error: io::Error) -> Self {
        if error.kind() == io::ErrorKind::UnexpectedEof {
            Error::UnexpectedEof
        } else {
            Error::Io(error)
        }
    }
}

#[doc(hidden)]
impl From<names::Error> for Error {
    fn from(e: names::Error) -> Error {
        Error::InvalidName(e)
    }
}

#[doc(hidden)]
impl From<HexToBytesError> for Error {
    fn from(e: HexToBytesError) -> Self {
        Error::HexError(e)
    }
}

/// Data which can be encoded in a consensus-consistent way
pub trait Encodable {
    /// Encode an object with a well-defined format, should only ever error if
    /// the underlying `Write` errors. Returns the number of bytes written on
    /// success
    fn consensus_encode<W: io::Write>(&self, e: W) -> Result<usize, Error>;
}

/// Data which can be encoded in a consensus-consistent way
pub trait Decodable: Sized {
    /// Decode an object with a well-defined format
    fn consensus_decode<D: io::Read>(d: D) -> Result<Self, Error>;
}

/// Encode an object into a vector
pub fn serialize<T: Encodable + ?Sized>(data: &T) -> Vec<u8> {
    let mut encoder = Cursor::new(vec![]);
    data.consensus_encode(&mut encoder).expect("in-memory writers don't error");
    encoder.into_inner()
}

/// Encode an object into a hex-encoded string
pub fn serialize_hex<T: Encodable + ?Sized>(data: &T) -> String {
    serialize(data).to_hex()
}

/// Deserialize an object from a vector, will error if said deserialization
/// doesn't consume the entire vector.
pub fn deserialize<T: Decodable>(data: &[u8]) -> Result<T, Error> {
    let (rv, consumed) = deserialize_partial(data)?;

    // Fail if data are not consumed entirely.
    if consumed == data.len() {
        Ok(rv)
    } else {
        Err(Error::ParseFailed("data not consumed entirely when explicitly deserializing"))
    }
}

/// Deserialize an object from a vector, but will not report an error if said deserialization
/// doesn't consume the entire vector.
pub fn deserialize_partial<T: Decodable>(data: &[u8]) -> Result<(T, usize), Error> {
    let mut decoder = Cursor::new(data);
    let rv = Decodable::consensus_decode(&mut decoder)?;
    let consumed = decoder.position() as usize;

    Ok((rv, consumed))
}

/// Deserialize an object from a hex string, requiring every byte to be consumed.
pub fn deserialize_hex<T: Decodable>(s: &str) -> Result<T, Error> {
    let data = Vec::<u8>::from_hex(s)?;
    deserialize(&data)
}

/// Read a `u32` length prefix, rejecting anything over [`MAX_VALUE_SIZE`].
pub(crate) fn read_len<D: io::Read>(d: D) -> Result<u32, Error> {
    let len = u32::consensus_decode(d)?;
    if len > MAX_VALUE_SIZE {
        return Err(Error::OversizedVectorAllocation {
            requested: len as usize,
            max: MAX_VALUE_SIZE as usize,
        });
    }
    Ok(len)
}

/// Read a `u32` length-prefixed byte string.
///
/// Memory grows with the bytes actually present, never with the claimed
/// length alone.
pub(crate) fn read_sized_bytes<D: io::Read>(mut d: D) -> Result<Vec<u8>, Error> {
    let len = read_len(&mut d)? as usize;
    let mut ret = Vec::new();
    d.take(len as u64).read_to_end(&mut ret)?;
    if ret.len() != len {
        return Err(Error::UnexpectedEof);
    }
    Ok(ret)
}

/// Write a `u32` length prefix.
pub(crate) fn write_len<W: io::Write>(len: usize, w: W) -> Result<usize, Error> {
    (len as u32).consensus_encode(w)
}

/// Write a `u32` length-prefixed byte string.
pub(crate) fn consensus_encode_with_size<W: io::Write>(data: &[u8], mut w: W) -> Result<usize, Error> {
    let len = write_len(data.len(), &mut w)?;
    w.write_all(data)?;
    Ok(len + data.len())
}

macro_rules! impl_int {
    ($type: ty, $len: expr) => {
        impl Encodable for $type {
            #[inline]
            fn consensus_encode<W: io::Write>(&self, mut w: W) -> Result<usize, Error> {
                w.write_all(&self.to_be_bytes())?;
                Ok($len)
            }
        }

        impl Decodable for $type {
            #[inline]
            fn consensus_decode<D: io::Read>(mut d: D) -> Result<Self, Error> {
                let mut buf = [0u8; $len];
                d.read_exact(&mut buf)?;
                Ok(<$type>::from_be_bytes(buf))
            }
        }
    };
}
impl_int!(u8, 1);
impl_int!(u32, 4);
impl_int!(u128, 16);
impl_int!(i128, 16);

macro_rules! impl_array {
    ($size: expr) => {
        impl Encodable for [u8; $size] {
            #[inline]
            fn consensus_encode<W: io::Write>(&self, mut w: W) -> Result<usize, Error> {
                w.write_all(&self[..])?;
                Ok($size)
            }
        }

        impl Decodable for [u8; $size] {
            #[inline]
            fn consensus_decode<D: io::Read>(mut d: D) -> Result<Self, Error> {
                let mut ret = [0; $size];
                d.read_exact(&mut ret)?;
                Ok(ret)
            }
        }
    };
}
impl_array!(20);
