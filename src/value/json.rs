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

//! JSON summaries of decoded values.

use bitcoin::hashes::Hash;
use serde_json::{json, Map, Value as Json};

use super::{ClarityValue, StandardPrincipalData, Value};
use crate::encode::serialize_hex;
use crate::hex::ToHex;

fn insert_principal(obj: &mut Map<String, Json>, p: &StandardPrincipalData) {
    obj.insert("address_version".to_owned(), json!(p.version()));
    obj.insert("address_hash_bytes".to_owned(), json!(p.hash160().as_byte_array()[..].to_hex()));
    // null when the version has no c32 form
    obj.insert("address".to_owned(), json!(p.to_c32().ok()));
}

impl ClarityValue {
    /// Summarizes the value as a JSON object.
    ///
    /// Every object carries `repr` (the textual form), `hex` (the encoding)
    /// and `type_id` (the type prefix). With `deep` set, variant fields are
    /// added: `value` for integers (as decimal strings), booleans, optionals
    /// and responses, `buffer` for buffers, `list` for lists, `data` for
    /// strings and tuples, and `address_version`, `address_hash_bytes`,
    /// `address` and `contract_name` for principals. Nested values are
    /// summarized the same way.
    pub fn to_json(&self, deep: bool) -> Json {
        let mut obj = Map::new();
        obj.insert("repr".to_owned(), json!(self.value.to_string()));
        obj.insert("hex".to_owned(), json!(serialize_hex(&self.value)));
        obj.insert("type_id".to_owned(), json!(self.value.type_prefix().to_u8()));

        if deep {
            match self.value {
                Value::Int(i) => {
                    obj.insert("value".to_owned(), json!(i.to_string()));
                }
                Value::UInt(u) => {
                    obj.insert("value".to_owned(), json!(u.to_string()));
                }
                Value::BoolTrue | Value::BoolFalse => {
                    obj.insert("value".to_owned(), json!(matches!(self.value, Value::BoolTrue)));
                }
                Value::Buffer(ref b) => {
                    obj.insert("buffer".to_owned(), json!(b.to_hex()));
                }
                Value::List(ref items) => {
                    let list = items.iter().map(|item| item.to_json(deep)).collect::<Vec<_>>();
                    obj.insert("list".to_owned(), Json::Array(list));
                }
                Value::StringASCII(ref s) => {
                    obj.insert("data".to_owned(), json!(String::from_utf8_lossy(s)));
                }
                Value::StringUTF8(ref chars) => {
                    let s = chars.concat();
                    obj.insert("data".to_owned(), json!(String::from_utf8_lossy(&s)));
                }
                Value::StandardPrincipal(ref p) => insert_principal(&mut obj, p),
                Value::ContractPrincipal(ref c) => {
                    insert_principal(&mut obj, &c.issuer);
                    obj.insert("contract_name".to_owned(), json!(c.name.as_str()));
                }
                Value::Tuple(ref data) => {
                    let fields =
                        data.iter().map(|(k, v)| (k.to_string(), v.to_json(deep))).collect::<Map<_, _>>();
                    obj.insert("data".to_owned(), Json::Object(fields));
                }
                Value::OptionalSome(ref v) | Value::ResponseOk(ref v) | Value::ResponseErr(ref v) => {
                    obj.insert("value".to_owned(), v.to_json(deep));
                }
                Value::OptionalNone => {}
            }
        }

        Json::Object(obj)
    }
}
