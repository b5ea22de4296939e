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

//! # Names
//!
//! Guarded identifier strings: Clarity names (tuple keys, function and
//! variable names) and contract names. Both are validated on construction and
//! immutable afterwards.
//!

use std::borrow::Borrow;
use std::convert::TryFrom;
use std::str::FromStr;
use std::{error, fmt, io};

use crate::encode::{self, Decodable, Encodable};

/// Maximum length of a Clarity name.
pub const MAX_STRING_LEN: usize = 128;

/// Minimum length of a contract name.
pub const CONTRACT_MIN_NAME_LENGTH: usize = 1;

/// Maximum length of a contract name.
pub const CONTRACT_MAX_NAME_LENGTH: usize = 40;

/// The one contract name allowed outside the regular grammar.
pub const TRANSIENT_CONTRACT_NAME: &str = "__transient";

/// Which kind of name failed validation.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub enum NameKind {
    /// A [`ClarityName`].
    Clarity,
    /// A [`ContractName`].
    Contract,
}

impl fmt::Display for NameKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            NameKind::Clarity => f.write_str("ClarityName"),
            NameKind::Contract => f.write_str("ContractName"),
        }
    }
}

/// Name validation error
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Error {
    /// The name does not match the grammar for its kind.
    InvalidName {
        /// The kind of name.
        kind: NameKind,
        /// The rejected name, lossily decoded if it was not UTF-8.
        name: String,
    },
    /// The name has a length outside the bounds for its kind.
    BadLength {
        /// The kind of name.
        kind: NameKind,
        /// The rejected length.
        len: usize,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::InvalidName { kind, ref name } => write!(f, "bad name value {}, {:?}", kind, name),
            Error::BadLength { kind, len } => write!(f, "bad name length {} for {}", len, kind),
        }
    }
}

impl error::Error for Error {}

/// Operators that are valid Clarity names on their own.
const OPERATOR_NAMES: [&str; 9] = ["-", "+", "=", "/", "*", "<", ">", "<=", ">="];

fn is_clarity_name(s: &str) -> bool {
    if OPERATOR_NAMES.contains(&s) {
        return true;
    }
    let mut bytes = s.bytes();
    match bytes.next() {
        Some(b) if b.is_ascii_alphabetic() => {}
        _ => return false,
    }
    bytes.all(|b| b.is_ascii_alphanumeric() || b"-_!?+<>=/*".contains(&b))
}

fn is_contract_name(s: &str) -> bool {
    let mut bytes = s.bytes();
    match bytes.next() {
        Some(b) if b.is_ascii_alphabetic() => {}
        _ => return false,
    }
    bytes.all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

/// Reads a `u8` length prefix followed by that many bytes, rejecting lengths
/// outside `min..=max` before reading the name itself.
fn read_name<D: io::Read>(mut d: D, kind: NameKind, min: usize, max: usize) -> Result<String, encode::Error> {
    let len = u8::consensus_decode(&mut d)? as usize;
    if len < min || len > max {
        return Err(Error::BadLength { kind, len }.into());
    }
    let mut buf = vec![0u8; len];
    d.read_exact(&mut buf)?;
    String::from_utf8(buf).map_err(|e| {
        Error::InvalidName { kind, name: String::from_utf8_lossy(e.as_bytes()).into_owned() }.into()
    })
}

fn write_name<W: io::Write>(name: &str, mut w: W) -> Result<usize, encode::Error> {
    // validated names are at most 128 bytes
    let len = (name.len() as u8).consensus_encode(&mut w)?;
    w.write_all(name.as_bytes())?;
    Ok(len + name.len())
}

macro_rules! impl_name_common {
    ($name:ident) => {
        impl $name {
            /// Returns the name as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "{}({:?})", stringify!($name), self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self, Error> {
                $name::new(s)
            }
        }

        impl TryFrom<String> for $name {
            type Error = Error;

            fn try_from(s: String) -> Result<Self, Error> {
                $name::new(&s)
            }
        }

        impl Encodable for $name {
            fn consensus_encode<W: io::Write>(&self, w: W) -> Result<usize, encode::Error> {
                write_name(&self.0, w)
            }
        }

        serde_string_impl!($name, stringify!($name));
    };
}

/// A validated Clarity name.
///
/// Either one of the operators `-`, `+`, `=`, `/`, `*`, `<`, `>`, `<=`, `>=`,
/// or an ASCII letter followed by letters, digits and `-_!?+<>=/*`, at most
/// 128 characters long.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClarityName(String);
impl_name_common!(ClarityName);

impl ClarityName {
    /// Validates `s` as a Clarity name.
    pub fn new(s: &str) -> Result<ClarityName, Error> {
        if s.len() > MAX_STRING_LEN {
            return Err(Error::BadLength { kind: NameKind::Clarity, len: s.len() });
        }
        if !is_clarity_name(s) {
            return Err(Error::InvalidName { kind: NameKind::Clarity, name: s.to_owned() });
        }
        Ok(ClarityName(s.to_owned()))
    }
}

impl Decodable for ClarityName {
    fn consensus_decode<D: io::Read>(d: D) -> Result<ClarityName, encode::Error> {
        let s = read_name(d, NameKind::Clarity, 0, MAX_STRING_LEN)?;
        Ok(ClarityName::new(&s)?)
    }
}

/// A validated contract name.
///
/// An ASCII letter followed by letters, digits, `-` and `_`, between 1 and 40
/// characters long, or exactly `__transient`.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ContractName(String);
impl_name_common!(ContractName);

impl ContractName {
    /// Validates `s` as a contract name.
    pub fn new(s: &str) -> Result<ContractName, Error> {
        if s == TRANSIENT_CONTRACT_NAME {
            return Ok(ContractName(s.to_owned()));
        }
        if s.len() < CONTRACT_MIN_NAME_LENGTH || s.len() > CONTRACT_MAX_NAME_LENGTH {
            return Err(Error::BadLength { kind: NameKind::Contract, len: s.len() });
        }
        if !is_contract_name(s) {
            return Err(Error::InvalidName { kind: NameKind::Contract, name: s.to_owned() });
        }
        Ok(ContractName(s.to_owned()))
    }

    /// Whether this is the reserved transient contract name.
    pub fn is_transient(&self) -> bool {
        self.0 == TRANSIENT_CONTRACT_NAME
    }
}

impl Decodable for ContractName {
    fn consensus_decode<D: io::Read>(d: D) -> Result<ContractName, encode::Error> {
        let s = read_name(d, NameKind::Contract, CONTRACT_MIN_NAME_LENGTH, CONTRACT_MAX_NAME_LENGTH)?;
        Ok(ContractName::new(&s)?)
    }
}
