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

//! # C32
//!
//! Crockford-style base32 encoding used for Stacks addresses, and the
//! version-tagged, checksummed "c32check" form built on top of it.
//!
//! Decoding is case-insensitive and treats `O` as `0` and `I`/`L` as `1`.
//!

use std::{error, fmt, iter};

use bitcoin::hashes::{sha256d, Hash, HashEngine};

/// The c32 alphabet. `I`, `L`, `O` and `U` are not part of it.
pub const ALPHABET: &[u8; 32] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ";

/// The leading character of every Stacks address.
pub const ADDRESS_PREFIX: char = 'S';

/// Reverse lookup table from ASCII to digit value, `-1` for bytes outside the
/// normalized alphabet.
static DIGITS: [i8; 128] = build_digits();

const fn build_digits() -> [i8; 128] {
    let mut table = [-1i8; 128];
    let mut i = 0;
    while i < ALPHABET.len() {
        let c = ALPHABET[i];
        table[c as usize] = i as i8;
        if c >= b'A' && c <= b'Z' {
            table[(c + 32) as usize] = i as i8;
        }
        i += 1;
    }
    table[b'O' as usize] = 0;
    table[b'o' as usize] = 0;
    table[b'L' as usize] = 1;
    table[b'l' as usize] = 1;
    table[b'I' as usize] = 1;
    table[b'i' as usize] = 1;
    table
}

/// C32 decoding error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A non-ASCII character or a character outside the alphabet.
    InvalidCharacter(char),
    /// The checksum did not match the version and data.
    ChecksumMismatch {
        /// Checksum computed over the version and decoded data.
        expected: [u8; 4],
        /// Checksum carried by the string.
        actual: [u8; 4],
    },
    /// The string or its decoded body is too short to carry a version and
    /// checksum.
    TooShort(usize),
    /// The version does not fit in a single c32 digit.
    InvalidVersion(u8),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::InvalidCharacter(c) => write!(f, "invalid c32 character {:?}", c),
            Error::ChecksumMismatch { ref expected, ref actual } => write!(
                f,
                "c32check checksum {:02x?} does not match computed checksum {:02x?}",
                actual, expected
            ),
            Error::TooShort(len) => write!(f, "c32 input of length {} is too short", len),
            Error::InvalidVersion(v) => write!(f, "invalid c32 version {}, must be below 32", v),
        }
    }
}

impl error::Error for Error {}

#[inline]
fn digit(b: u8) -> Result<u8, Error> {
    match DIGITS.get(b as usize) {
        Some(&d) if d >= 0 => Ok(d as u8),
        _ => Err(Error::InvalidCharacter(b as char)),
    }
}

fn check_ascii(s: &str) -> Result<(), Error> {
    match s.chars().find(|c| !c.is_ascii()) {
        Some(c) => Err(Error::InvalidCharacter(c)),
        None => Ok(()),
    }
}

/// First four bytes of `sha256d(version || data)`.
fn checksum(version: u8, data: &[u8]) -> [u8; 4] {
    let mut engine = sha256d::Hash::engine();
    engine.input(&[version]);
    engine.input(data);
    let hash = sha256d::Hash::from_engine(engine).to_byte_array();
    [hash[0], hash[1], hash[2], hash[3]]
}

/// Encode bytes as a c32 string.
///
/// Bits are packed five at a time starting from the last byte. Leading zero
/// bytes each become exactly one leading `0`.
pub fn encode(data: &[u8]) -> String {
    // digits in reverse order
    let mut out: Vec<u8> = Vec::with_capacity(2 + data.len() * 8 / 5);
    let mut carry: u8 = 0;
    let mut carry_bits: u8 = 0;

    for &byte in data.iter().rev() {
        let low_bits_to_take = 5 - carry_bits;
        let low_bits = byte & ((1 << low_bits_to_take) - 1);
        out.push(ALPHABET[((low_bits << carry_bits) + carry) as usize]);

        carry_bits += 3;
        carry = byte >> (8 - carry_bits);

        if carry_bits >= 5 {
            out.push(ALPHABET[(carry & 0x1f) as usize]);
            carry_bits -= 5;
            carry >>= 5;
        }
    }
    if carry_bits > 0 {
        out.push(ALPHABET[carry as usize]);
    }

    // zero digits produced by the packing are not significant
    while out.last() == Some(&ALPHABET[0]) {
        out.pop();
    }
    let zeros = data.iter().take_while(|&&b| b == 0).count();
    out.extend(iter::repeat(ALPHABET[0]).take(zeros));

    out.iter().rev().map(|&c| c as char).collect()
}

/// Decode a c32 string into bytes.
///
/// Leading `0` digits each become exactly one leading zero byte.
pub fn decode(s: &str) -> Result<Vec<u8>, Error> {
    check_ascii(s)?;

    // digits in reverse order
    let digits = s.bytes().rev().map(digit).collect::<Result<Vec<u8>, Error>>()?;

    let mut out: Vec<u8> = Vec::with_capacity(1 + s.len() * 5 / 8);
    let mut carry: u16 = 0;
    let mut carry_bits: u8 = 0;
    for &d in &digits {
        carry += (d as u16) << carry_bits;
        carry_bits += 5;
        if carry_bits >= 8 {
            out.push((carry & 0xff) as u8);
            carry_bits -= 8;
            carry >>= 8;
        }
    }
    if carry_bits > 0 {
        out.push(carry as u8);
    }

    while out.last() == Some(&0) {
        out.pop();
    }
    let zeros = digits.iter().rev().take_while(|&&d| d == 0).count();
    out.extend(iter::repeat(0).take(zeros));

    out.reverse();
    Ok(out)
}

/// Encode `data` with a version digit and checksum, preceded by `prefix`.
///
/// The output is `prefix || c32(version) || c32(data || checksum)` where the
/// checksum covers `version || data`.
pub fn check_encode_prefixed(version: u8, data: &[u8], prefix: char) -> Result<String, Error> {
    if version >= 32 {
        return Err(Error::InvalidVersion(version));
    }

    let mut buf = Vec::with_capacity(data.len() + 4);
    buf.extend_from_slice(data);
    buf.extend_from_slice(&checksum(version, data));

    let body = encode(&buf);
    let mut ret = String::with_capacity(2 + body.len());
    ret.push(prefix);
    ret.push(ALPHABET[version as usize] as char);
    ret.push_str(&body);
    Ok(ret)
}

/// Decode a c32check string (without any prefix) into its version and data.
pub fn check_decode(s: &str) -> Result<(u8, Vec<u8>), Error> {
    check_ascii(s)?;
    if s.len() < 2 {
        return Err(Error::TooShort(s.len()));
    }

    let version = digit(s.as_bytes()[0])?;
    let mut data = decode(&s[1..])?;
    if data.len() < 4 {
        return Err(Error::TooShort(data.len()));
    }

    let ck_start = data.len() - 4;
    let expected = checksum(version, &data[..ck_start]);
    let actual = [data[ck_start], data[ck_start + 1], data[ck_start + 2], data[ck_start + 3]];
    if expected != actual {
        return Err(Error::ChecksumMismatch { expected, actual });
    }
    data.truncate(ck_start);
    Ok((version, data))
}

/// Encode a Stacks address: `'S' || c32check(version, data)`.
pub fn encode_address(version: u8, data: &[u8]) -> Result<String, Error> {
    check_encode_prefixed(version, data, ADDRESS_PREFIX)
}

/// Decode a Stacks address into its version and data.
///
/// The leading tag character is skipped without being checked.
pub fn decode_address(s: &str) -> Result<(u8, Vec<u8>), Error> {
    check_ascii(s)?;
    if s.len() <= 5 {
        return Err(Error::TooShort(s.len()));
    }
    check_decode(&s[1..])
}
