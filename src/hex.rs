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

//! Hex Encoding and Decoding
//!
//! Thin helpers over `bitcoin::hex`. Buffers render as lowercase hex in
//! Clarity's textual format, and test vectors are written in hex.

use std::fmt;

use bitcoin::hex::{HexToArrayError, HexToBytesError};

/// Trait for objects that can be serialized as hex strings.
pub trait ToHex {
    /// Converts to a lowercase hexadecimal representation of the object.
    fn to_hex(&self) -> String;
}

/// Trait for objects that can be deserialized from hex strings.
pub trait FromHex: Sized {
    /// Error returned by [`FromHex::from_hex`], may differ depending
    /// on whether `Self` is fixed size of variable length.
    type Err;

    /// Produces an object from a hex string.
    fn from_hex(s: &str) -> Result<Self, Self::Err>;
}

/// Outputs lowercase hex into a formatter.
///
/// Precision truncates the output to that many hex characters.
pub fn format_hex(data: &[u8], f: &mut fmt::Formatter) -> fmt::Result {
    let prec = f.precision().unwrap_or(2 * data.len());
    for ch in data.iter().take(prec / 2) {
        write!(f, "{:02x}", *ch)?;
    }
    if prec < 2 * data.len() && prec % 2 == 1 {
        write!(f, "{:x}", data[prec / 2] / 16)?;
    }
    Ok(())
}

impl ToHex for [u8] {
    fn to_hex(&self) -> String {
        use bitcoin::hex::DisplayHex;
        self.to_lower_hex_string()
    }
}

impl ToHex for Vec<u8> {
    fn to_hex(&self) -> String {
        self[..].to_hex()
    }
}

impl FromHex for Vec<u8> {
    type Err = HexToBytesError;

    fn from_hex(s: &str) -> Result<Self, Self::Err> {
        bitcoin::hex::FromHex::from_hex(s)
    }
}

macro_rules! impl_fromhex_array {
    ($len:expr) => {
        impl FromHex for [u8; $len] {
            type Err = HexToArrayError;

            fn from_hex(s: &str) -> Result<Self, Self::Err> {
                bitcoin::hex::FromHex::from_hex(s)
            }
        }
    }
}

impl_fromhex_array!(4);
impl_fromhex_array!(20);
