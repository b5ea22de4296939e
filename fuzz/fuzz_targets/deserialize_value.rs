extern crate stacks_codec;

use stacks_codec::encode::{deserialize, serialize};
use stacks_codec::{ClarityValue, Value};

fn do_test(data: &[u8]) {
    let value_result: Result<Value, _> = deserialize(data);
    match value_result {
        Err(_) => {
            assert!(ClarityValue::deserialize_with_bytes(data).is_err());
        }
        Ok(value) => {
            // tuple keys are re-encoded in name order, so only the second
            // encoding has to be stable
            let reser = serialize(&value);
            let redecoded: Value = deserialize(&reser).unwrap();
            assert_eq!(redecoded, value);
            assert_eq!(serialize(&redecoded), reser);

            let captured = ClarityValue::deserialize_with_bytes(data).unwrap();
            assert_eq!(captured.value, value);
            assert_eq!(captured.serialized_bytes(data), Some(data));
            let _ = value.to_string();
            let _ = value.type_signature();
        }
    }
}

#[cfg(feature = "afl")]
extern crate afl;
#[cfg(feature = "afl")]
fn main() {
    afl::read_stdio_bytes(|data| {
        do_test(&data);
    });
}

#[cfg(feature = "honggfuzz")]
#[macro_use]
extern crate honggfuzz;
#[cfg(feature = "honggfuzz")]
fn main() {
    loop {
        fuzz!(|data| {
            do_test(data);
        });
    }
}
