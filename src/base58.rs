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

//! # Base58
//!
//! Base58 and Base58Check encoding, as used by Bitcoin addresses.
//!
//! Conversion is done with schoolbook arithmetic over byte arrays, so inputs
//! of any length are supported.
//!

use std::{error, fmt, iter};

use bitcoin::hashes::{sha256d, Hash};

/// The base58 alphabet. `0`, `O`, `I` and `l` are not part of it.
pub const ALPHABET: &[u8; 58] = b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// Reverse lookup table from ASCII to digit value, `-1` for bytes outside the
/// alphabet.
static DIGITS: [i8; 128] = build_digits();

const fn build_digits() -> [i8; 128] {
    let mut table = [-1i8; 128];
    let mut i = 0;
    while i < ALPHABET.len() {
        table[ALPHABET[i] as usize] = i as i8;
        i += 1;
    }
    table
}

/// Base58 decoding error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A character outside the base58 alphabet was encountered.
    InvalidCharacter(char),
    /// The checksum did not match the data.
    ChecksumMismatch {
        /// Checksum computed over the decoded data.
        expected: [u8; 4],
        /// Checksum carried by the string.
        actual: [u8; 4],
    },
    /// The decoded data is shorter than the 4-byte checksum.
    TooShort(usize),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::InvalidCharacter(c) => write!(f, "invalid base58 character {:?}", c),
            Error::ChecksumMismatch { ref expected, ref actual } => write!(
                f,
                "base58ck checksum {:02x?} does not match computed checksum {:02x?}",
                actual, expected
            ),
            Error::TooShort(len) => {
                write!(f, "base58ck data of length {} is too short for a checksum", len)
            }
        }
    }
}

impl error::Error for Error {}

#[inline]
fn digit(c: char) -> Option<u8> {
    let idx = c as usize;
    if idx >= DIGITS.len() || DIGITS[idx] < 0 {
        None
    } else {
        Some(DIGITS[idx] as u8)
    }
}

/// First four bytes of `sha256d(data)`.
pub(crate) fn checksum(data: &[u8]) -> [u8; 4] {
    let hash = sha256d::Hash::hash(data).to_byte_array();
    [hash[0], hash[1], hash[2], hash[3]]
}

/// Encode bytes as a base58 string.
///
/// Every leading zero byte becomes one leading `1`.
pub fn encode(data: &[u8]) -> String {
    let zeros = data.iter().take_while(|&&b| b == 0).count();

    // base58 digits, least significant first
    let mut digits: Vec<u8> = Vec::with_capacity(1 + data.len() * 138 / 100);
    for &byte in &data[zeros..] {
        let mut carry = byte as u32;
        for d in digits.iter_mut() {
            carry += (*d as u32) << 8;
            *d = (carry % 58) as u8;
            carry /= 58;
        }
        while carry > 0 {
            digits.push((carry % 58) as u8);
            carry /= 58;
        }
    }

    iter::repeat('1')
        .take(zeros)
        .chain(digits.iter().rev().map(|&d| ALPHABET[d as usize] as char))
        .collect()
}

/// Decode a base58 string into bytes.
///
/// Every leading `1` becomes one leading zero byte.
pub fn decode(s: &str) -> Result<Vec<u8>, Error> {
    let zeros = s.bytes().take_while(|&b| b == b'1').count();

    // base256 digits, least significant first
    let mut bytes: Vec<u8> = Vec::with_capacity(1 + s.len() * 11 / 15);
    for c in s.chars().skip(zeros) {
        let mut carry = digit(c).ok_or(Error::InvalidCharacter(c))? as u32;
        for b in bytes.iter_mut() {
            carry += (*b as u32) * 58;
            *b = carry as u8;
            carry >>= 8;
        }
        while carry > 0 {
            bytes.push(carry as u8);
            carry >>= 8;
        }
    }

    bytes.extend(iter::repeat(0).take(zeros));
    bytes.reverse();
    Ok(bytes)
}

/// Encode bytes with a trailing 4-byte `sha256d` checksum.
pub fn encode_check(data: &[u8]) -> String {
    let mut buf = Vec::with_capacity(data.len() + 4);
    buf.extend_from_slice(data);
    buf.extend_from_slice(&checksum(data));
    encode(&buf)
}

/// Decode a base58check string, verifying and stripping the checksum.
pub fn decode_check(s: &str) -> Result<Vec<u8>, Error> {
    let mut ret = decode(s)?;
    if ret.len() < 4 {
        return Err(Error::TooShort(ret.len()));
    }
    let ck_start = ret.len() - 4;
    let expected = checksum(&ret[..ck_start]);
    let actual = [ret[ck_start], ret[ck_start + 1], ret[ck_start + 2], ret[ck_start + 3]];
    if expected != actual {
        return Err(Error::ChecksumMismatch { expected, actual });
    }
    ret.truncate(ck_start);
    Ok(ret)
}
