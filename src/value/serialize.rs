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

//! # Clarity Value Serialization
//!
//! A one-byte [`TypePrefix`] followed by the variant payload. Integers are 16
//! bytes big-endian, lengths and counts are `u32` big-endian and capped at
//! [`MAX_VALUE_SIZE`](crate::encode::MAX_VALUE_SIZE), names carry a `u8`
//! length. Nesting is capped at [`MAX_VALUE_DEPTH`].
//!

use std::io::{self, Cursor};

use super::{ClarityValue, ContractPrincipalData, TupleData, TypePrefix, Value};
use crate::address::StacksAddress;
use crate::encode::{self, consensus_encode_with_size, read_len, read_sized_bytes, write_len};
use crate::encode::{Decodable, Encodable, Error};
use crate::names::ClarityName;

/// Maximum nesting of values inside optionals, responses, lists and tuples.
pub const MAX_VALUE_DEPTH: u8 = 16;

/// Reader adapter tracking the absolute offset of the next byte.
struct PositionReader<R> {
    inner: R,
    pos: usize,
}

impl<R: io::Read> io::Read for PositionReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.pos += n;
        Ok(n)
    }
}

/// Decodes one value at the cursor position, leaving the cursor just past it.
///
/// With `with_bytes` set, every decoded node records the span of the cursor's
/// buffer it was read from, see [`ClarityValue::serialized_bytes`].
pub fn decode_value(d: &mut Cursor<&[u8]>, with_bytes: bool) -> Result<ClarityValue, Error> {
    let pos = d.position() as usize;
    let mut reader = PositionReader { inner: &mut *d, pos };
    decode_at_depth(&mut reader, 0, with_bytes)
}

fn decode_child<R: io::Read>(
    d: &mut PositionReader<R>,
    parent_depth: u8,
    with_bytes: bool,
) -> Result<ClarityValue, Error> {
    if parent_depth >= MAX_VALUE_DEPTH {
        return Err(Error::DepthExceeded { max: MAX_VALUE_DEPTH });
    }
    decode_at_depth(d, parent_depth + 1, with_bytes)
}

fn decode_at_depth<R: io::Read>(
    d: &mut PositionReader<R>,
    depth: u8,
    with_bytes: bool,
) -> Result<ClarityValue, Error> {
    let start = d.pos;
    let header = u8::consensus_decode(&mut *d)?;
    let prefix = TypePrefix::from_u8(header).ok_or(Error::BadTypePrefix(header))?;

    let value = match prefix {
        TypePrefix::Int => Value::Int(Decodable::consensus_decode(&mut *d)?),
        TypePrefix::UInt => Value::UInt(Decodable::consensus_decode(&mut *d)?),
        TypePrefix::Buffer => Value::Buffer(read_sized_bytes(&mut *d)?),
        TypePrefix::BoolTrue => Value::BoolTrue,
        TypePrefix::BoolFalse => Value::BoolFalse,
        TypePrefix::PrincipalStandard => Value::StandardPrincipal(Decodable::consensus_decode(&mut *d)?),
        TypePrefix::PrincipalContract => {
            let issuer = StacksAddress::consensus_decode(&mut *d)?;
            let name = ClarityName::consensus_decode(&mut *d)?;
            Value::ContractPrincipal(ContractPrincipalData { issuer, name })
        }
        TypePrefix::ResponseOk => Value::ResponseOk(Box::new(decode_child(d, depth, with_bytes)?)),
        TypePrefix::ResponseErr => Value::ResponseErr(Box::new(decode_child(d, depth, with_bytes)?)),
        TypePrefix::OptionalNone => Value::OptionalNone,
        TypePrefix::OptionalSome => Value::OptionalSome(Box::new(decode_child(d, depth, with_bytes)?)),
        TypePrefix::List => {
            let len = read_len(&mut *d)?;
            // every element takes at least one byte, so growth tracks the input
            let mut items = Vec::new();
            for _ in 0..len {
                items.push(decode_child(d, depth, with_bytes)?);
            }
            Value::List(items)
        }
        TypePrefix::Tuple => {
            let len = read_len(&mut *d)?;
            let mut fields = Vec::new();
            for _ in 0..len {
                let name = ClarityName::consensus_decode(&mut *d)?;
                let value = decode_child(d, depth, with_bytes)?;
                fields.push((name, value));
            }
            Value::Tuple(TupleData::from_data(fields)?)
        }
        TypePrefix::StringASCII => Value::StringASCII(read_sized_bytes(&mut *d)?),
        TypePrefix::StringUTF8 => Value::string_utf8_from_bytes(read_sized_bytes(&mut *d)?)?,
    };

    let span = if with_bytes { Some(start..d.pos) } else { None };
    Ok(ClarityValue::with_span(value, span))
}

impl ClarityValue {
    /// Decodes a value that must span all of `data`, recording byte spans.
    pub fn deserialize_with_bytes(data: &[u8]) -> Result<ClarityValue, Error> {
        let mut cursor = Cursor::new(data);
        let value = decode_value(&mut cursor, true)?;
        if cursor.position() as usize == data.len() {
            Ok(value)
        } else {
            Err(Error::ParseFailed("data not consumed entirely when explicitly deserializing"))
        }
    }
}

impl Decodable for ClarityValue {
    fn consensus_decode<D: io::Read>(d: D) -> Result<ClarityValue, Error> {
        decode_at_depth(&mut PositionReader { inner: d, pos: 0 }, 0, false)
    }
}

impl Decodable for Value {
    fn consensus_decode<D: io::Read>(d: D) -> Result<Value, Error> {
        ClarityValue::consensus_decode(d).map(ClarityValue::into_value)
    }
}

/// Writes one value. Children are written through the same `&mut W`.
fn encode_value<W: io::Write + ?Sized>(v: &Value, w: &mut W) -> Result<usize, Error> {
    let mut len = v.type_prefix().to_u8().consensus_encode(&mut *w)?;
    len += match *v {
        Value::Int(i) => i.consensus_encode(&mut *w)?,
        Value::UInt(u) => u.consensus_encode(&mut *w)?,
        Value::Buffer(ref b) | Value::StringASCII(ref b) => consensus_encode_with_size(b, &mut *w)?,
        Value::BoolTrue | Value::BoolFalse | Value::OptionalNone => 0,
        Value::StandardPrincipal(ref p) => p.consensus_encode(&mut *w)?,
        Value::ContractPrincipal(ref c) => {
            c.issuer.consensus_encode(&mut *w)? + c.name.consensus_encode(&mut *w)?
        }
        Value::ResponseOk(ref v) | Value::ResponseErr(ref v) | Value::OptionalSome(ref v) => {
            encode_value(&v.value, w)?
        }
        Value::List(ref items) => {
            let mut n = write_len(items.len(), &mut *w)?;
            for item in items {
                n += encode_value(&item.value, w)?;
            }
            n
        }
        Value::Tuple(ref data) => {
            let mut n = write_len(data.len(), &mut *w)?;
            for (name, value) in data {
                n += name.consensus_encode(&mut *w)?;
                n += encode_value(&value.value, w)?;
            }
            n
        }
        Value::StringUTF8(ref chars) => {
            let total = chars.iter().map(Vec::len).sum();
            let mut n = write_len(total, &mut *w)?;
            for c in chars {
                w.write_all(c)?;
                n += c.len();
            }
            n
        }
    };
    Ok(len)
}

impl Encodable for Value {
    fn consensus_encode<W: io::Write>(&self, mut w: W) -> Result<usize, encode::Error> {
        encode_value(self, &mut w)
    }
}

impl Encodable for ClarityValue {
    fn consensus_encode<W: io::Write>(&self, mut w: W) -> Result<usize, encode::Error> {
        encode_value(&self.value, &mut w)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::{deserialize, deserialize_hex, deserialize_partial, serialize, serialize_hex};
    use crate::hex::FromHex;

    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    fn hex(s: &str) -> Vec<u8> {
        Vec::<u8>::from_hex(s).unwrap()
    }

    fn name(s: &str) -> ClarityName {
        ClarityName::new(s).unwrap()
    }

    #[test]
    fn decode_vectors() {
        let v: Value = deserialize_hex("03").unwrap();
        assert_eq!(v, Value::BoolTrue);
        assert_eq!(v.to_string(), "true");

        let v: Value = deserialize_hex("0b00000002030a03").unwrap();
        assert_eq!(v, Value::list(vec![Value::BoolTrue, Value::some(Value::BoolTrue)]));
        assert_eq!(v.to_string(), "(list true (some true))");

        assert!(matches!(deserialize_hex::<Value>("ff"), Err(Error::BadTypePrefix(0xff))));
        assert!(matches!(deserialize_hex::<Value>("0f"), Err(Error::BadTypePrefix(0x0f))));
        assert!(matches!(deserialize_hex::<Value>("ff00000000"), Err(Error::BadTypePrefix(0xff))));

        let v: Value = deserialize_hex("000000000000000000000000000000000a").unwrap();
        assert_eq!(v, Value::Int(10));
        let v: Value = deserialize_hex("010000000000000000000000000000000f").unwrap();
        assert_eq!(v, Value::UInt(15));
        let v: Value = deserialize_hex("00fffffffffffffffffffffffffffffffe").unwrap();
        assert_eq!(v, Value::Int(-2));
        let v: Value = deserialize_hex("0200000003010203").unwrap();
        assert_eq!(v, Value::Buffer(vec![1, 2, 3]));
        let v: Value = deserialize_hex("0d0000000568656c6c6f").unwrap();
        assert_eq!(v.to_string(), "\"hello\"");
        let v: Value = deserialize_hex("0e0000000568c3a96c6c").unwrap();
        assert_eq!(v, Value::string_utf8("héll"));
        assert_eq!(deserialize_hex::<Value>("09").unwrap(), Value::OptionalNone);
        assert_eq!(deserialize_hex::<Value>("04").unwrap(), Value::BoolFalse);
        assert_eq!(deserialize_hex::<Value>("0703").unwrap(), Value::okay(Value::BoolTrue));
        assert_eq!(deserialize_hex::<Value>("0804").unwrap(), Value::error(Value::BoolFalse));
    }

    #[test]
    fn decode_principals() {
        let v: Value = deserialize_hex("0516a46ff88886c2ef9762d970b4d2c63678835bd39d").unwrap();
        assert_eq!(v.to_string(), "'SP2J6ZY48GV1EZ5V2V5RB9MP66SW86PYKKNRV9EJ7");

        let v: Value =
            deserialize_hex("0616a46ff88886c2ef9762d970b4d2c63678835bd39d08636f6e7472616374").unwrap();
        assert_eq!(v.to_string(), "'SP2J6ZY48GV1EZ5V2V5RB9MP66SW86PYKKNRV9EJ7.contract");
        assert_eq!(serialize_hex(&v), "0616a46ff88886c2ef9762d970b4d2c63678835bd39d08636f6e7472616374");

        // a version byte that does not fit one c32 digit still decodes
        let wide = "0520a46ff88886c2ef9762d970b4d2c63678835bd39d";
        match deserialize_hex::<Value>(wide).unwrap() {
            Value::StandardPrincipal(ref p) => assert_eq!(p.version(), 32),
            x => panic!("unexpected value {:?}", x),
        }
        assert_eq!(serialize_hex(&deserialize_hex::<Value>(wide).unwrap()), wide);

        assert!(matches!(
            deserialize_hex::<Value>("0616a46ff88886c2ef9762d970b4d2c63678835bd39d0261"),
            Err(Error::UnexpectedEof)
        ));
        assert!(matches!(
            deserialize_hex::<Value>("0616a46ff88886c2ef9762d970b4d2c63678835bd39d00"),
            Err(Error::InvalidName(_))
        ));
    }

    #[test]
    fn encode_nested_values() {
        let mut v = Value::BoolTrue;
        for _ in 0..MAX_VALUE_DEPTH {
            v = Value::some(v);
        }
        let expected = format!("{}03", "0a".repeat(MAX_VALUE_DEPTH as usize));
        assert_eq!(serialize_hex(&v), expected);
        assert_eq!(serialize_hex(&ClarityValue::new(v.clone())), expected);
        assert_eq!(deserialize_hex::<Value>(&expected).unwrap(), v);

        let v = Value::list(vec![
            Value::okay(Value::tuple(vec![(name("a"), Value::error(Value::UInt(1)))]).unwrap()),
            Value::OptionalNone,
        ]);
        let expected = concat!("0b00000002", "070c00000001", "0161", "08", "0100000000000000000000000000000001", "09");
        assert_eq!(serialize_hex(&v), expected);
        assert_eq!(v.consensus_encode(&mut Vec::new()).unwrap(), expected.len() / 2);
    }

    #[test]
    fn contract_names_use_clarity_grammar() {
        let issuer = "0616a46ff88886c2ef9762d970b4d2c63678835bd39d";

        // "a?!" is a Clarity name but not a contract name
        let data = format!("{}03613f21", issuer);
        let v: Value = deserialize_hex(&data).unwrap();
        assert_eq!(v.to_string(), "'SP2J6ZY48GV1EZ5V2V5RB9MP66SW86PYKKNRV9EJ7.a?!");
        assert_eq!(serialize_hex(&v), data);

        // 41 to 128 bytes are fine
        let long = "a".repeat(128);
        let data = format!("{}80{}", issuer, "61".repeat(128));
        match deserialize_hex::<Value>(&data).unwrap() {
            Value::ContractPrincipal(ref c) => assert_eq!(c.name.as_str(), long),
            x => panic!("unexpected value {:?}", x),
        }
        let data = format!("{}81{}", issuer, "61".repeat(129));
        assert!(matches!(deserialize_hex::<Value>(&data), Err(Error::InvalidName(_))));
    }

    #[test]
    fn decode_tuples() {
        // keys arrive out of order, rendering is sorted
        let v: Value = deserialize_hex("0c00000002016203016103").unwrap();
        assert_eq!(v.to_string(), "(tuple (a true) (b true))");
        // re-encoding writes keys in order
        assert_eq!(serialize_hex(&v), "0c00000002016103016203");

        match deserialize_hex::<Value>("0c00000002016103016104") {
            Err(Error::DuplicateTupleKey(k)) => assert_eq!(k.as_str(), "a"),
            x => panic!("unexpected result {:?}", x),
        }
        assert!(matches!(deserialize_hex::<Value>("0c00000001012403"), Err(Error::InvalidName(_))));
    }

    #[test]
    fn decode_failures() {
        // truncated at every position of a valid encoding
        let full = hex("0c0000000201610b00000002030a0301620e00000003e282ac");
        assert!(deserialize::<Value>(&full).is_ok());
        for i in 0..full.len() {
            assert!(
                matches!(deserialize::<Value>(&full[..i]), Err(Error::UnexpectedEof)),
                "prefix of length {} should be truncated",
                i
            );
        }

        assert!(matches!(deserialize_hex::<Value>("0e00000002c328"), Err(Error::InvalidUtf8)));
        assert!(matches!(deserialize_hex::<Value>("0303"), Err(Error::ParseFailed(_))));

        let (v, consumed) = deserialize_partial::<Value>(&hex("0303")).unwrap();
        assert_eq!((v, consumed), (Value::BoolTrue, 1));
    }

    #[test]
    fn size_limits() {
        for prefix in &["02", "0b", "0c", "0d", "0e"] {
            let data = hex(&format!("{}00100001", prefix));
            match deserialize::<Value>(&data) {
                Err(Error::OversizedVectorAllocation { requested, max }) => {
                    assert_eq!(requested, 1024 * 1024 + 1);
                    assert_eq!(max, 1024 * 1024);
                }
                x => panic!("unexpected result for prefix {}: {:?}", prefix, x),
            }
        }
        // at the limit the length is accepted and the missing payload is the error
        assert!(matches!(deserialize_hex::<Value>("0200100000"), Err(Error::UnexpectedEof)));

        let big = Value::Buffer(vec![0x5a; 1024 * 1024]);
        assert_eq!(deserialize::<Value>(&serialize(&big)).unwrap(), big);
    }

    #[test]
    fn depth_limit() {
        let nested = |n: usize| {
            let mut data = vec![0x0a; n];
            data.push(0x03);
            data
        };

        let v: Value = deserialize(&nested(16)).unwrap();
        let mut expected = Value::BoolTrue;
        for _ in 0..16 {
            expected = Value::some(expected);
        }
        assert_eq!(v, expected);

        assert!(matches!(
            deserialize::<Value>(&nested(17)),
            Err(Error::DepthExceeded { max: 16 })
        ));
        assert!(matches!(
            deserialize::<Value>(&nested(100)),
            Err(Error::DepthExceeded { max: 16 })
        ));

        // lists and tuples count the same way
        let mut lists = Vec::new();
        for _ in 0..17 {
            lists.extend_from_slice(&hex("0b00000001"));
        }
        lists.push(0x03);
        assert!(matches!(deserialize::<Value>(&lists), Err(Error::DepthExceeded { .. })));
        assert!(deserialize::<Value>(&lists[5..]).is_ok());

        let mut tuples = Vec::new();
        for _ in 0..17 {
            tuples.extend_from_slice(&hex("0c00000001016b"));
        }
        tuples.push(0x03);
        assert!(matches!(deserialize::<Value>(&tuples), Err(Error::DepthExceeded { .. })));
        assert!(deserialize::<Value>(&tuples[7..]).is_ok());
    }

    #[test]
    fn captured_spans() {
        let data = hex("0b00000002030a03");
        let v = ClarityValue::deserialize_with_bytes(&data).unwrap();
        assert_eq!(v.span(), Some(0..8));
        assert_eq!(v.serialized_bytes(&data), Some(&data[..]));

        match v.value {
            Value::List(ref items) => {
                assert_eq!(items[0].span(), Some(5..6));
                assert_eq!(items[1].span(), Some(6..8));
                match items[1].value {
                    Value::OptionalSome(ref inner) => assert_eq!(inner.span(), Some(7..8)),
                    _ => panic!("not an optional"),
                }
            }
            _ => panic!("not a list"),
        }

        // spans are offsets into the cursor's buffer, not into the value
        let mut buf = hex("ffff");
        buf.extend_from_slice(&data);
        let mut cursor = Cursor::new(&buf[..]);
        cursor.set_position(2);
        let v = decode_value(&mut cursor, true).unwrap();
        assert_eq!(cursor.position(), 10);
        assert_eq!(v.span(), Some(2..10));
        assert_eq!(v.serialized_bytes(&buf), Some(&data[..]));

        let mut cursor = Cursor::new(&data[..]);
        let v = decode_value(&mut cursor, false).unwrap();
        assert_eq!(v.span(), None);
    }

    /// Checks that every node's span re-slices to its own encoding.
    fn check_spans(v: &ClarityValue, input: &[u8]) {
        assert_eq!(v.serialized_bytes(input).unwrap(), &serialize(v)[..]);
        match v.value {
            Value::ResponseOk(ref c) | Value::ResponseErr(ref c) | Value::OptionalSome(ref c) => {
                check_spans(c, input)
            }
            Value::List(ref items) => items.iter().for_each(|c| check_spans(c, input)),
            Value::Tuple(ref data) => data.iter().for_each(|(_, c)| check_spans(c, input)),
            _ => {}
        }
    }

    fn random_value<R: Rng>(rng: &mut R, depth: u8) -> Value {
        let max_prefix = if depth >= MAX_VALUE_DEPTH { 6 } else { 14 };
        match rng.gen_range(0..=max_prefix) {
            0 => Value::Int(rng.gen()),
            1 => Value::UInt(rng.gen()),
            2 => Value::Buffer((0..rng.gen_range(0..40)).map(|_| rng.gen()).collect()),
            3 => Value::BoolTrue,
            4 => Value::BoolFalse,
            5 => Value::StandardPrincipal(
                StacksAddress::new(rng.gen_range(0..32), bitcoin::hashes::Hash::from_byte_array(rng.gen()))
                    .unwrap(),
            ),
            6 => Value::OptionalNone,
            7 => Value::okay(random_value(rng, depth + 1)),
            8 => Value::error(random_value(rng, depth + 1)),
            9 => Value::some(random_value(rng, depth + 1)),
            10 => Value::list((0..rng.gen_range(0..4)).map(|_| random_value(&mut *rng, depth + 1)).collect()),
            11 => {
                let fields = (0..rng.gen_range(0..4))
                    .map(|i| (name(&format!("f{}", i)), random_value(&mut *rng, depth + 1)))
                    .collect::<Vec<_>>();
                Value::tuple(fields).unwrap()
            }
            12 => Value::string_ascii(&(0..rng.gen_range(0..20)).map(|_| rng.gen()).collect::<Vec<u8>>()),
            13 => Value::string_utf8(&(0..rng.gen_range(0..8)).map(|_| rng.gen::<char>()).collect::<String>()),
            _ => Value::ContractPrincipal(ContractPrincipalData::new(
                StacksAddress::new(22, bitcoin::hashes::Hash::from_byte_array(rng.gen())).unwrap(),
                name("get-balance?"),
            )),
        }
    }

    #[test]
    fn random_values_roundtrip() {
        let mut rng = ChaCha8Rng::seed_from_u64(16);
        for _ in 0..300 {
            let value = random_value(&mut rng, 0);
            let data = serialize(&value);

            let decoded = ClarityValue::deserialize_with_bytes(&data).unwrap();
            assert_eq!(decoded.value, value);
            assert_eq!(decoded.to_string(), value.to_string());
            check_spans(&decoded, &data);
        }
    }
}
