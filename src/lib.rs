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

//! # Stacks Codec Library
//!
//! Encoding and decoding of Stacks addresses (c32check and legacy base58check)
//! and of Clarity values in their consensus binary format, together with
//! the canonical textual rendering of those values.
//!

// Coding conventions
#![deny(non_upper_case_globals)]
#![deny(non_camel_case_types)]
#![deny(non_snake_case)]
#![deny(unused_mut)]
#![deny(missing_docs)]

pub extern crate bitcoin;
#[cfg(feature = "serde")]
extern crate actual_serde as serde;
#[cfg(feature = "json")]
pub extern crate serde_json;

#[macro_use]
mod internal_macros;
pub mod address;
pub mod base58;
pub mod c32;
pub mod encode;
pub mod hex;
pub mod names;
pub mod value;

// export everything at the top level so it can be used as `stacks_codec::Value` etc.
pub use crate::address::{AddressError, AddressHashMode, BitcoinAddress, StacksAddress};
pub use crate::encode::{deserialize, deserialize_hex, serialize, serialize_hex, MAX_VALUE_SIZE};
pub use crate::names::{ClarityName, ContractName};
pub use crate::value::serialize::decode_value;
pub use crate::value::{
    ClarityValue, ContractPrincipalData, QualifiedContractIdentifier, StandardPrincipalData, TupleData,
    TypePrefix, Value, MAX_VALUE_DEPTH,
};
