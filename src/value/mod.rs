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

//! # Clarity Values
//!
//! The closed set of Clarity value variants, their canonical textual form
//! (`Display`) and their type signatures. Binary encoding lives in
//! [`serialize`], JSON summaries in `json` behind the `json` feature.
//!

use std::collections::btree_map::{self, BTreeMap};
use std::convert::TryFrom;
use std::fmt::{self, Write as _};
use std::ops::Range;

use crate::address::StacksAddress;
use crate::encode;
use crate::hex::format_hex;
use crate::names::{self, ClarityName, ContractName};

#[cfg(feature = "json")]
mod json;
pub mod serialize;

pub use self::serialize::MAX_VALUE_DEPTH;

/// Placeholder rendered where a type cannot be inferred from a single value.
pub const UNKNOWN_TYPE: &str = "UnknownType";

/// The one-byte wire discriminant preceding every serialized value.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
#[repr(u8)]
pub enum TypePrefix {
    /// `int`
    Int = 0,
    /// `uint`
    UInt = 1,
    /// `(buff N)`
    Buffer = 2,
    /// `true`
    BoolTrue = 3,
    /// `false`
    BoolFalse = 4,
    /// Standard principal
    PrincipalStandard = 5,
    /// Contract principal
    PrincipalContract = 6,
    /// `(ok x)`
    ResponseOk = 7,
    /// `(err x)`
    ResponseErr = 8,
    /// `none`
    OptionalNone = 9,
    /// `(some x)`
    OptionalSome = 10,
    /// `(list ...)`
    List = 11,
    /// `(tuple ...)`
    Tuple = 12,
    /// `(string-ascii N)`
    StringASCII = 13,
    /// `(string-utf8 N)`
    StringUTF8 = 14,
}

impl TypePrefix {
    /// Parses a wire discriminant. Bytes above 14 are not prefixes.
    pub fn from_u8(b: u8) -> Option<TypePrefix> {
        Some(match b {
            0 => TypePrefix::Int,
            1 => TypePrefix::UInt,
            2 => TypePrefix::Buffer,
            3 => TypePrefix::BoolTrue,
            4 => TypePrefix::BoolFalse,
            5 => TypePrefix::PrincipalStandard,
            6 => TypePrefix::PrincipalContract,
            7 => TypePrefix::ResponseOk,
            8 => TypePrefix::ResponseErr,
            9 => TypePrefix::OptionalNone,
            10 => TypePrefix::OptionalSome,
            11 => TypePrefix::List,
            12 => TypePrefix::Tuple,
            13 => TypePrefix::StringASCII,
            14 => TypePrefix::StringUTF8,
            _ => return None,
        })
    }

    /// The wire discriminant.
    pub fn to_u8(self) -> u8 {
        self as u8
    }
}

/// A standard principal is a Stacks address.
pub type StandardPrincipalData = StacksAddress;

/// A deployed contract: its issuer and its name.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QualifiedContractIdentifier {
    /// The account that deployed the contract.
    pub issuer: StandardPrincipalData,
    /// The contract name.
    pub name: ContractName,
}

impl QualifiedContractIdentifier {
    /// Creates a contract identifier.
    pub fn new(issuer: StandardPrincipalData, name: ContractName) -> QualifiedContractIdentifier {
        QualifiedContractIdentifier { issuer, name }
    }
}

impl fmt::Display for QualifiedContractIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}.{}", self.issuer, self.name)
    }
}

impl fmt::Debug for QualifiedContractIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// The payload of a contract principal value.
///
/// Unlike [`QualifiedContractIdentifier`], the name follows the wider Clarity
/// name grammar, which is what the wire format carries.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ContractPrincipalData {
    /// The account that deployed the contract.
    pub issuer: StandardPrincipalData,
    /// The contract name.
    pub name: ClarityName,
}

impl ContractPrincipalData {
    /// Creates a contract principal.
    pub fn new(issuer: StandardPrincipalData, name: ClarityName) -> ContractPrincipalData {
        ContractPrincipalData { issuer, name }
    }
}

impl TryFrom<QualifiedContractIdentifier> for ContractPrincipalData {
    type Error = names::Error;

    /// Fails only for the transient contract, whose name is not a Clarity name.
    fn try_from(id: QualifiedContractIdentifier) -> Result<ContractPrincipalData, names::Error> {
        let name = ClarityName::new(id.name.as_str())?;
        Ok(ContractPrincipalData { issuer: id.issuer, name })
    }
}

impl fmt::Display for ContractPrincipalData {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}.{}", self.issuer, self.name)
    }
}

impl fmt::Debug for ContractPrincipalData {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// A Clarity value.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Value {
    /// Signed 128-bit integer
    Int(i128),
    /// Unsigned 128-bit integer
    UInt(u128),
    /// Byte buffer
    Buffer(Vec<u8>),
    /// `true`
    BoolTrue,
    /// `false`
    BoolFalse,
    /// Account principal
    StandardPrincipal(StandardPrincipalData),
    /// Contract principal
    ContractPrincipal(ContractPrincipalData),
    /// Successful response
    ResponseOk(Box<ClarityValue>),
    /// Failed response
    ResponseErr(Box<ClarityValue>),
    /// Empty optional
    OptionalNone,
    /// Present optional
    OptionalSome(Box<ClarityValue>),
    /// List of values
    List(Vec<ClarityValue>),
    /// Named fields
    Tuple(TupleData),
    /// ASCII string, stored as raw bytes
    StringASCII(Vec<u8>),
    /// UTF-8 string, one UTF-8 encoded scalar per element
    StringUTF8(Vec<Vec<u8>>),
}

/// A [`Value`] together with the byte range it was decoded from, if the
/// decoder was asked to record it.
///
/// Equality ignores the recorded range.
#[derive(Clone, Debug)]
pub struct ClarityValue {
    /// The value.
    pub value: Value,
    span: Option<Range<usize>>,
}

impl ClarityValue {
    /// Wraps a value with no recorded byte range.
    pub fn new(value: Value) -> ClarityValue {
        ClarityValue { value, span: None }
    }

    pub(crate) fn with_span(value: Value, span: Option<Range<usize>>) -> ClarityValue {
        ClarityValue { value, span }
    }

    /// The range of the decoder input this value was read from, recorded only
    /// when decoding with byte capture.
    pub fn span(&self) -> Option<Range<usize>> {
        self.span.clone()
    }

    /// Re-slices `input`, the buffer this value was decoded from, to the exact
    /// bytes of this value's encoding.
    pub fn serialized_bytes<'a>(&self, input: &'a [u8]) -> Option<&'a [u8]> {
        self.span.clone().and_then(|span| input.get(span))
    }

    /// Drops the recorded byte range.
    pub fn into_value(self) -> Value {
        self.value
    }
}

impl PartialEq for ClarityValue {
    fn eq(&self, other: &ClarityValue) -> bool {
        self.value == other.value
    }
}

impl Eq for ClarityValue {}

impl From<Value> for ClarityValue {
    fn from(value: Value) -> ClarityValue {
        ClarityValue::new(value)
    }
}

impl fmt::Display for ClarityValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.value, f)
    }
}

/// Tuple fields, kept sorted by name.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct TupleData {
    data: BTreeMap<ClarityName, ClarityValue>,
}

impl TupleData {
    /// Builds a tuple, failing on a repeated field name.
    pub fn from_data<I>(fields: I) -> Result<TupleData, encode::Error>
    where
        I: IntoIterator<Item = (ClarityName, ClarityValue)>,
    {
        let mut data = BTreeMap::new();
        for (name, value) in fields {
            match data.entry(name) {
                btree_map::Entry::Vacant(e) => {
                    e.insert(value);
                }
                btree_map::Entry::Occupied(e) => {
                    return Err(encode::Error::DuplicateTupleKey(e.key().clone()))
                }
            }
        }
        Ok(TupleData { data })
    }

    /// Looks up a field.
    pub fn get(&self, name: &str) -> Option<&ClarityValue> {
        self.data.get(name)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the tuple has no fields.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Fields in name order.
    pub fn iter(&self) -> btree_map::Iter<'_, ClarityName, ClarityValue> {
        self.data.iter()
    }
}

impl<'a> IntoIterator for &'a TupleData {
    type Item = (&'a ClarityName, &'a ClarityValue);
    type IntoIter = btree_map::Iter<'a, ClarityName, ClarityValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

impl Value {
    /// `true` or `false`.
    pub fn bool(b: bool) -> Value {
        if b {
            Value::BoolTrue
        } else {
            Value::BoolFalse
        }
    }

    /// `(some v)`
    pub fn some(v: Value) -> Value {
        Value::OptionalSome(Box::new(v.into()))
    }

    /// `(ok v)`
    pub fn okay(v: Value) -> Value {
        Value::ResponseOk(Box::new(v.into()))
    }

    /// `(err v)`
    pub fn error(v: Value) -> Value {
        Value::ResponseErr(Box::new(v.into()))
    }

    /// `(list ...)`
    pub fn list(items: Vec<Value>) -> Value {
        Value::List(items.into_iter().map(ClarityValue::from).collect())
    }

    /// `(tuple ...)`, failing on a repeated field name.
    pub fn tuple<I>(fields: I) -> Result<Value, encode::Error>
    where
        I: IntoIterator<Item = (ClarityName, Value)>,
    {
        let data = TupleData::from_data(fields.into_iter().map(|(k, v)| (k, v.into())))?;
        Ok(Value::Tuple(data))
    }

    /// A `string-ascii` holding the bytes of `s`.
    pub fn string_ascii(s: &[u8]) -> Value {
        Value::StringASCII(s.to_vec())
    }

    /// A `string-utf8` holding `s`.
    pub fn string_utf8(s: &str) -> Value {
        let mut buf = [0; 4];
        Value::StringUTF8(s.chars().map(|c| c.encode_utf8(&mut buf).as_bytes().to_vec()).collect())
    }

    /// A `string-utf8` from raw bytes, failing if they are not UTF-8.
    pub fn string_utf8_from_bytes(bytes: Vec<u8>) -> Result<Value, encode::Error> {
        let s = String::from_utf8(bytes).map_err(|_| encode::Error::InvalidUtf8)?;
        Ok(Value::string_utf8(&s))
    }

    /// The wire discriminant of this value.
    pub fn type_prefix(&self) -> TypePrefix {
        match *self {
            Value::Int(_) => TypePrefix::Int,
            Value::UInt(_) => TypePrefix::UInt,
            Value::Buffer(_) => TypePrefix::Buffer,
            Value::BoolTrue => TypePrefix::BoolTrue,
            Value::BoolFalse => TypePrefix::BoolFalse,
            Value::StandardPrincipal(_) => TypePrefix::PrincipalStandard,
            Value::ContractPrincipal(_) => TypePrefix::PrincipalContract,
            Value::ResponseOk(_) => TypePrefix::ResponseOk,
            Value::ResponseErr(_) => TypePrefix::ResponseErr,
            Value::OptionalNone => TypePrefix::OptionalNone,
            Value::OptionalSome(_) => TypePrefix::OptionalSome,
            Value::List(_) => TypePrefix::List,
            Value::Tuple(_) => TypePrefix::Tuple,
            Value::StringASCII(_) => TypePrefix::StringASCII,
            Value::StringUTF8(_) => TypePrefix::StringUTF8,
        }
    }

    /// The type signature inferred from this value alone.
    ///
    /// Branches that cannot be inferred, such as the element type of an empty
    /// list or the other side of a response, render as `UnknownType`.
    pub fn type_signature(&self) -> String {
        let mut ret = String::new();
        self.write_type_signature(&mut ret).expect("writing to a string doesn't fail");
        ret
    }

    fn write_type_signature<W: fmt::Write>(&self, w: &mut W) -> fmt::Result {
        match *self {
            Value::Int(_) => w.write_str("int"),
            Value::UInt(_) => w.write_str("uint"),
            Value::BoolTrue | Value::BoolFalse => w.write_str("bool"),
            Value::Buffer(ref b) => write!(w, "(buff {})", b.len()),
            Value::StringASCII(ref s) => write!(w, "(string-ascii {})", s.len()),
            // worst case four bytes per scalar
            Value::StringUTF8(ref s) => write!(w, "(string-utf8 {})", s.len() * 4),
            Value::StandardPrincipal(_) | Value::ContractPrincipal(_) => w.write_str("principal"),
            Value::List(ref items) => {
                write!(w, "(list {} ", items.len())?;
                match items.first() {
                    Some(first) => first.value.write_type_signature(w)?,
                    None => w.write_str(UNKNOWN_TYPE)?,
                }
                w.write_str(")")
            }
            Value::Tuple(ref data) => {
                w.write_str("(tuple")?;
                for (name, value) in data {
                    write!(w, " ({} ", name)?;
                    value.value.write_type_signature(w)?;
                    w.write_str(")")?;
                }
                w.write_str(")")
            }
            Value::OptionalSome(ref v) => {
                w.write_str("(optional ")?;
                v.value.write_type_signature(w)?;
                w.write_str(")")
            }
            Value::OptionalNone => write!(w, "(optional {})", UNKNOWN_TYPE),
            Value::ResponseOk(ref v) => {
                w.write_str("(response ")?;
                v.value.write_type_signature(w)?;
                write!(w, " {})", UNKNOWN_TYPE)
            }
            Value::ResponseErr(ref v) => {
                write!(w, "(response {} ", UNKNOWN_TYPE)?;
                v.value.write_type_signature(w)?;
                w.write_str(")")
            }
        }
    }
}

/// Writes one byte of a string literal, escaping quotes, backslashes,
/// control characters and bytes outside printable ASCII.
fn write_escaped_byte(f: &mut fmt::Formatter, c: u8) -> fmt::Result {
    match c {
        0x07 => f.write_str("\\a"),
        0x08 => f.write_str("\\b"),
        b'\t' => f.write_str("\\t"),
        b'\n' => f.write_str("\\n"),
        0x0b => f.write_str("\\v"),
        0x0c => f.write_str("\\f"),
        b'\r' => f.write_str("\\r"),
        b'"' => f.write_str("\\\""),
        b'\\' => f.write_str("\\\\"),
        c if c < 32 || c >= 127 => write!(f, "\\x{:02x}", c),
        c => f.write_char(c as char),
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Value::Int(i) => write!(f, "{}", i),
            Value::UInt(u) => write!(f, "u{}", u),
            Value::BoolTrue => f.write_str("true"),
            Value::BoolFalse => f.write_str("false"),
            Value::Buffer(ref b) => format_hex(b, f),
            Value::StandardPrincipal(ref p) => match p.to_c32() {
                Ok(addr) => write!(f, "'{}", addr),
                Err(e) => write!(f, "ERROR: {}", e),
            },
            Value::ContractPrincipal(ref c) => match c.issuer.to_c32() {
                Ok(addr) => write!(f, "'{}.{}", addr, c.name),
                Err(e) => write!(f, "ERROR: {}", e),
            },
            Value::ResponseOk(ref v) => write!(f, "(ok {})", v),
            Value::ResponseErr(ref v) => write!(f, "(err {})", v),
            Value::OptionalNone => f.write_str("none"),
            Value::OptionalSome(ref v) => write!(f, "(some {})", v),
            Value::List(ref items) => {
                f.write_str("(list")?;
                for item in items {
                    write!(f, " {}", item)?;
                }
                f.write_str(")")
            }
            Value::Tuple(ref data) => {
                f.write_str("(tuple")?;
                for (name, value) in data {
                    write!(f, " ({} {})", name, value)?;
                }
                f.write_str(")")
            }
            Value::StringASCII(ref s) => {
                f.write_char('"')?;
                for &c in s {
                    write_escaped_byte(f, c)?;
                }
                f.write_char('"')
            }
            Value::StringUTF8(ref s) => {
                f.write_str("u\"")?;
                for c in s {
                    if c.len() > 1 {
                        f.write_str("\\u{")?;
                        format_hex(c, f)?;
                        f.write_char('}')?;
                    } else if let Some(&b) = c.first() {
                        write_escaped_byte(f, b)?;
                    }
                }
                f.write_char('"')
            }
        }
    }
}
