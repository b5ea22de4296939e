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

//! # Addresses
//!
//! Support for Stacks addresses (c32check, `S` prefix) and for legacy Bitcoin
//! base58check addresses that share their hash160 payload.
//!

use std::convert::TryFrom;
use std::str::FromStr;
use std::{error, fmt, io};

use bitcoin::hashes::{hash160, Hash};

use crate::encode::{self, Decodable, Encodable};
use crate::{base58, c32};

/// Mainnet single-signature address version (`SP`).
pub const C32_ADDRESS_VERSION_MAINNET_SINGLESIG: u8 = 22;
/// Mainnet multi-signature address version (`SM`).
pub const C32_ADDRESS_VERSION_MAINNET_MULTISIG: u8 = 20;
/// Testnet single-signature address version (`ST`).
pub const C32_ADDRESS_VERSION_TESTNET_SINGLESIG: u8 = 26;
/// Testnet multi-signature address version (`SN`).
pub const C32_ADDRESS_VERSION_TESTNET_MULTISIG: u8 = 21;

/// Address error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    /// c32check encoding error
    C32(c32::Error),
    /// Base58 encoding error
    Base58(base58::Error),
    /// The decoded payload has the wrong length.
    InvalidLength(usize),
    /// The version byte is not valid for this kind of address.
    InvalidVersion(u8),
    /// The byte is not a known address hash mode.
    InvalidHashMode(u8),
}

impl fmt::Display for AddressError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            AddressError::C32(ref e) => write!(f, "c32 error: {}", e),
            AddressError::Base58(ref e) => write!(f, "base58 error: {}", e),
            AddressError::InvalidLength(len) => write!(f, "invalid address payload length: {}", len),
            AddressError::InvalidVersion(v) => write!(f, "invalid address version: {}", v),
            AddressError::InvalidHashMode(m) => write!(f, "invalid address hash mode: {}", m),
        }
    }
}

impl error::Error for AddressError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            AddressError::C32(ref e) => Some(e),
            AddressError::Base58(ref e) => Some(e),
            _ => None,
        }
    }
}

#[doc(hidden)]
impl From<c32::Error> for AddressError {
    fn from(e: c32::Error) -> AddressError {
        AddressError::C32(e)
    }
}

#[doc(hidden)]
impl From<base58::Error> for AddressError {
    fn from(e: base58::Error) -> AddressError {
        AddressError::Base58(e)
    }
}

/// How a public key or script is hashed into an address.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
#[repr(u8)]
pub enum AddressHashMode {
    /// `hash160(public-key)`, as bitcoin's p2pkh.
    SerializeP2PKH = 0x00,
    /// `hash160(multisig-redeem-script)`, as bitcoin's multisig p2sh.
    SerializeP2SH = 0x01,
    /// `hash160(segwit-program-00(p2pkh))`, as bitcoin's p2sh-p2wpkh.
    SerializeP2WPKH = 0x02,
    /// `hash160(segwit-program-00(public-keys))`, as bitcoin's p2sh-p2wsh.
    SerializeP2WSH = 0x03,
    /// Multisig p2sh with non-sequential signing.
    SerializeP2SHNonSequential = 0x05,
    /// Multisig p2sh-p2wsh with non-sequential signing.
    SerializeP2WSHNonSequential = 0x07,
}

impl AddressHashMode {
    /// Whether the mode hashes a single public key.
    pub fn is_singlesig(self) -> bool {
        matches!(self, AddressHashMode::SerializeP2PKH | AddressHashMode::SerializeP2WPKH)
    }

    /// The mainnet address version for this hash mode.
    pub fn to_version_mainnet(self) -> u8 {
        if self.is_singlesig() {
            C32_ADDRESS_VERSION_MAINNET_SINGLESIG
        } else {
            C32_ADDRESS_VERSION_MAINNET_MULTISIG
        }
    }

    /// The testnet address version for this hash mode.
    pub fn to_version_testnet(self) -> u8 {
        if self.is_singlesig() {
            C32_ADDRESS_VERSION_TESTNET_SINGLESIG
        } else {
            C32_ADDRESS_VERSION_TESTNET_MULTISIG
        }
    }
}

impl TryFrom<u8> for AddressHashMode {
    type Error = AddressError;

    fn try_from(value: u8) -> Result<AddressHashMode, AddressError> {
        match value {
            0x00 => Ok(AddressHashMode::SerializeP2PKH),
            0x01 => Ok(AddressHashMode::SerializeP2SH),
            0x02 => Ok(AddressHashMode::SerializeP2WPKH),
            0x03 => Ok(AddressHashMode::SerializeP2WSH),
            0x05 => Ok(AddressHashMode::SerializeP2SHNonSequential),
            0x07 => Ok(AddressHashMode::SerializeP2WSHNonSequential),
            x => Err(AddressError::InvalidHashMode(x)),
        }
    }
}

impl From<AddressHashMode> for u8 {
    fn from(mode: AddressHashMode) -> u8 {
        mode as u8
    }
}

/// A Stacks address: a 5-bit version and a hash160.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StacksAddress {
    version: u8,
    hash160: hash160::Hash,
}

impl StacksAddress {
    /// Creates an address, rejecting versions of 32 or more.
    pub fn new(version: u8, hash160: hash160::Hash) -> Result<StacksAddress, AddressError> {
        if version >= 32 {
            return Err(AddressError::InvalidVersion(version));
        }
        Ok(StacksAddress { version, hash160 })
    }

    /// Creates the address for `hash160` hashed with `mode`.
    pub fn from_hash_mode(mode: AddressHashMode, mainnet: bool, hash160: hash160::Hash) -> StacksAddress {
        let version = if mainnet { mode.to_version_mainnet() } else { mode.to_version_testnet() };
        StacksAddress { version, hash160 }
    }

    /// The address version.
    pub fn version(&self) -> u8 {
        self.version
    }

    /// The hashed public key or script.
    pub fn hash160(&self) -> &hash160::Hash {
        &self.hash160
    }

    /// The c32check form of the address.
    ///
    /// Fails for versions of 32 or more, which only arrive from the wire.
    pub fn to_c32(&self) -> Result<String, AddressError> {
        Ok(c32::encode_address(self.version, self.hash160.as_byte_array())?)
    }

    /// Whether the version is one of the two mainnet versions.
    pub fn is_mainnet(&self) -> bool {
        self.version == C32_ADDRESS_VERSION_MAINNET_SINGLESIG
            || self.version == C32_ADDRESS_VERSION_MAINNET_MULTISIG
    }
}

impl fmt::Display for StacksAddress {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.to_c32() {
            Ok(s) => f.write_str(&s),
            Err(e) => write!(f, "ERROR: {}", e),
        }
    }
}

impl fmt::Debug for StacksAddress {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl FromStr for StacksAddress {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<StacksAddress, AddressError> {
        let (version, data) = c32::decode_address(s)?;
        let bytes = <[u8; 20]>::try_from(&data[..]).map_err(|_| AddressError::InvalidLength(data.len()))?;
        StacksAddress::new(version, hash160::Hash::from_byte_array(bytes))
    }
}

impl Encodable for StacksAddress {
    fn consensus_encode<W: io::Write>(&self, mut w: W) -> Result<usize, encode::Error> {
        let len = self.version.consensus_encode(&mut w)?;
        Ok(len + self.hash160.to_byte_array().consensus_encode(&mut w)?)
    }
}

impl Decodable for StacksAddress {
    fn consensus_decode<D: io::Read>(mut d: D) -> Result<StacksAddress, encode::Error> {
        // any version byte is accepted, rendering is what needs it below 32
        let version = u8::consensus_decode(&mut d)?;
        let bytes = <[u8; 20]>::consensus_decode(&mut d)?;
        Ok(StacksAddress { version, hash160: hash160::Hash::from_byte_array(bytes) })
    }
}

serde_string_impl!(StacksAddress, "a Stacks address");

/// Kind of legacy Bitcoin address.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
pub enum BitcoinAddressType {
    /// Pay to public key hash.
    PublicKeyHash,
    /// Pay to script hash.
    ScriptHash,
}

/// Bitcoin network a legacy address belongs to.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
pub enum BitcoinNetwork {
    /// Bitcoin mainnet.
    Mainnet,
    /// Bitcoin testnet.
    Testnet,
    /// Bitcoin regtest. Shares version bytes with testnet.
    Regtest,
}

/// The version bytes used by a Bitcoin network.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BitcoinAddressParams {
    /// The base58 prefix for p2pkh addresses.
    pub p2pkh_prefix: u8,
    /// The base58 prefix for p2sh addresses.
    pub p2sh_prefix: u8,
}

impl BitcoinAddressParams {
    /// Bitcoin mainnet address parameters.
    pub const MAINNET: BitcoinAddressParams = BitcoinAddressParams {
        p2pkh_prefix: 0,
        p2sh_prefix: 5,
    };

    /// Bitcoin testnet and regtest address parameters.
    pub const TESTNET: BitcoinAddressParams = BitcoinAddressParams {
        p2pkh_prefix: 111,
        p2sh_prefix: 196,
    };
}

impl BitcoinNetwork {
    /// The address parameters of this network.
    pub fn params(self) -> &'static BitcoinAddressParams {
        match self {
            BitcoinNetwork::Mainnet => &BitcoinAddressParams::MAINNET,
            BitcoinNetwork::Testnet | BitcoinNetwork::Regtest => &BitcoinAddressParams::TESTNET,
        }
    }
}

/// A legacy base58check Bitcoin address.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BitcoinAddress {
    /// The address type.
    pub addr_type: BitcoinAddressType,
    /// The network.
    pub network: BitcoinNetwork,
    /// The hashed public key or script.
    pub hash160: hash160::Hash,
}

impl BitcoinAddress {
    /// The version byte of this address.
    pub fn version(&self) -> u8 {
        let params = self.network.params();
        match self.addr_type {
            BitcoinAddressType::PublicKeyHash => params.p2pkh_prefix,
            BitcoinAddressType::ScriptHash => params.p2sh_prefix,
        }
    }

    /// Maps a version byte back to its type and network.
    ///
    /// Testnet version bytes always map to [`BitcoinNetwork::Testnet`].
    pub fn type_from_version(version: u8) -> Option<(BitcoinAddressType, BitcoinNetwork)> {
        for &network in &[BitcoinNetwork::Mainnet, BitcoinNetwork::Testnet] {
            let params = network.params();
            if version == params.p2pkh_prefix {
                return Some((BitcoinAddressType::PublicKeyHash, network));
            }
            if version == params.p2sh_prefix {
                return Some((BitcoinAddressType::ScriptHash, network));
            }
        }
        None
    }
}

impl fmt::Display for BitcoinAddress {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut prefixed = [0; 21];
        prefixed[0] = self.version();
        prefixed[1..].copy_from_slice(self.hash160.as_byte_array());
        f.write_str(&base58::encode_check(&prefixed[..]))
    }
}

impl fmt::Debug for BitcoinAddress {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl FromStr for BitcoinAddress {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<BitcoinAddress, AddressError> {
        let data = base58::decode_check(s)?;
        if data.len() != 21 {
            return Err(AddressError::InvalidLength(data.len()));
        }
        let (addr_type, network) =
            BitcoinAddress::type_from_version(data[0]).ok_or(AddressError::InvalidVersion(data[0]))?;
        let mut hash = [0; 20];
        hash.copy_from_slice(&data[1..]);
        Ok(BitcoinAddress { addr_type, network, hash160: hash160::Hash::from_byte_array(hash) })
    }
}

serde_string_impl!(BitcoinAddress, "a Bitcoin address");

#[cfg(test)]
mod test {
    use super::*;
    use crate::encode::{deserialize, serialize, serialize_hex};
    use crate::hex::FromHex;

    fn hash(s: &str) -> hash160::Hash {
        hash160::Hash::from_byte_array(<[u8; 20]>::from_hex(s).unwrap())
    }

    fn roundtrips<T>(addr: &T)
    where
        T: FromStr + fmt::Display + fmt::Debug + PartialEq,
        <T as FromStr>::Err: fmt::Debug,
    {
        assert_eq!(T::from_str(&addr.to_string()).unwrap(), *addr, "string round-trip failed for {}", addr);
    }

    #[test]
    fn stacks_address_strings() {
        let h = hash("a46ff88886c2ef9762d970b4d2c63678835bd39d");
        let cases = [
            (C32_ADDRESS_VERSION_MAINNET_SINGLESIG, "SP2J6ZY48GV1EZ5V2V5RB9MP66SW86PYKKNRV9EJ7"),
            (C32_ADDRESS_VERSION_MAINNET_MULTISIG, "SM2J6ZY48GV1EZ5V2V5RB9MP66SW86PYKKQVX8X0G"),
            (C32_ADDRESS_VERSION_TESTNET_SINGLESIG, "ST2J6ZY48GV1EZ5V2V5RB9MP66SW86PYKKQYAC0RQ"),
            (C32_ADDRESS_VERSION_TESTNET_MULTISIG, "SN2J6ZY48GV1EZ5V2V5RB9MP66SW86PYKKP6D2ZK9"),
        ];
        for &(version, s) in &cases {
            let addr = StacksAddress::new(version, h).unwrap();
            assert_eq!(addr.to_string(), s);
            assert_eq!(StacksAddress::from_str(s).unwrap(), addr);
            assert_eq!(addr.hash160(), &h);
            assert_eq!(addr.version(), version);
            roundtrips(&addr);
        }

        assert!(StacksAddress::from_str("SP2J6ZY48GV1EZ5V2V5RB9MP66SW86PYKKNRV9EJ7").unwrap().is_mainnet());
        assert!(!StacksAddress::from_str("ST2J6ZY48GV1EZ5V2V5RB9MP66SW86PYKKQYAC0RQ").unwrap().is_mainnet());
        assert_eq!(StacksAddress::new(32, h), Err(AddressError::InvalidVersion(32)));
    }

    #[test]
    fn stacks_address_bad_strings() {
        assert!(matches!(
            StacksAddress::from_str("SP2J6ZY48GV1EZ5V2V5RB9MP66SW86PYKKNRV9EJ8"),
            Err(AddressError::C32(c32::Error::ChecksumMismatch { .. }))
        ));
        assert!(matches!(StacksAddress::from_str("SP"), Err(AddressError::C32(_))));

        // a well-formed c32check address with a 1-byte payload
        let short = c32::encode_address(22, &[0x01]).unwrap();
        assert_eq!(StacksAddress::from_str(&short), Err(AddressError::InvalidLength(1)));
    }

    #[test]
    fn stacks_address_wire() {
        let addr = StacksAddress::from_str("SP2J6ZY48GV1EZ5V2V5RB9MP66SW86PYKKNRV9EJ7").unwrap();
        assert_eq!(serialize_hex(&addr), "16a46ff88886c2ef9762d970b4d2c63678835bd39d");
        let bytes = Vec::<u8>::from_hex("16a46ff88886c2ef9762d970b4d2c63678835bd39d").unwrap();
        assert_eq!(deserialize::<StacksAddress>(&bytes).unwrap(), addr);

        let mut wide = bytes.clone();
        wide[0] = 32;
        let addr = deserialize::<StacksAddress>(&wide).unwrap();
        assert_eq!(addr.version(), 32);
        assert_eq!(serialize(&addr), wide);
        assert_eq!(addr.to_c32(), Err(AddressError::C32(c32::Error::InvalidVersion(32))));
        assert_eq!(addr.to_string(), "ERROR: c32 error: invalid c32 version 32, must be below 32");
        assert!(matches!(
            deserialize::<StacksAddress>(&bytes[..20]),
            Err(encode::Error::UnexpectedEof)
        ));
    }

    #[test]
    fn hash_modes() {
        use super::AddressHashMode::*;

        let modes = [
            (0x00, SerializeP2PKH, 22, 26),
            (0x01, SerializeP2SH, 20, 21),
            (0x02, SerializeP2WPKH, 22, 26),
            (0x03, SerializeP2WSH, 20, 21),
            (0x05, SerializeP2SHNonSequential, 20, 21),
            (0x07, SerializeP2WSHNonSequential, 20, 21),
        ];
        for &(byte, mode, mainnet, testnet) in &modes {
            assert_eq!(AddressHashMode::try_from(byte), Ok(mode));
            assert_eq!(u8::from(mode), byte);
            assert_eq!(mode.to_version_mainnet(), mainnet);
            assert_eq!(mode.to_version_testnet(), testnet);
        }
        for &byte in &[0x04, 0x06, 0x08, 0xff] {
            assert_eq!(AddressHashMode::try_from(byte), Err(AddressError::InvalidHashMode(byte)));
        }

        let h = hash("a46ff88886c2ef9762d970b4d2c63678835bd39d");
        assert_eq!(
            StacksAddress::from_hash_mode(SerializeP2WSH, false, h).to_string(),
            "SN2J6ZY48GV1EZ5V2V5RB9MP66SW86PYKKP6D2ZK9"
        );
    }

    #[test]
    fn bitcoin_addresses() {
        let cases = [
            ("1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa", BitcoinAddressType::PublicKeyHash, BitcoinNetwork::Mainnet),
            ("3J98t1WpEZ73CNmQviecrnyiWrnqRhWNLy", BitcoinAddressType::ScriptHash, BitcoinNetwork::Mainnet),
            ("mzBc4XEFSdzCDcTxAgf6EZXgsZWpztRhef", BitcoinAddressType::PublicKeyHash, BitcoinNetwork::Testnet),
            ("2MzQwSSnBHWHqSAqtTVQ6v47XtaisrJa1Vc", BitcoinAddressType::ScriptHash, BitcoinNetwork::Testnet),
        ];
        for &(s, addr_type, network) in &cases {
            let addr = BitcoinAddress::from_str(s).unwrap();
            assert_eq!(addr.addr_type, addr_type);
            assert_eq!(addr.network, network);
            assert_eq!(addr.to_string(), s);
            roundtrips(&addr);
        }

        let genesis = BitcoinAddress::from_str("1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa").unwrap();
        assert_eq!(genesis.hash160, hash("62e907b15cbf27d5425399ebf6f0fb50ebb88f18"));
    }

    #[test]
    fn bitcoin_regtest_shares_testnet_versions() {
        let h = hash("62e907b15cbf27d5425399ebf6f0fb50ebb88f18");
        for &addr_type in &[BitcoinAddressType::PublicKeyHash, BitcoinAddressType::ScriptHash] {
            let regtest = BitcoinAddress { addr_type, network: BitcoinNetwork::Regtest, hash160: h };
            let testnet = BitcoinAddress { addr_type, network: BitcoinNetwork::Testnet, hash160: h };
            assert_eq!(regtest.version(), testnet.version());
            assert_eq!(regtest.to_string(), testnet.to_string());
            assert_eq!(BitcoinAddress::from_str(&regtest.to_string()).unwrap(), testnet);
        }
        assert_eq!(
            BitcoinAddress::type_from_version(196),
            Some((BitcoinAddressType::ScriptHash, BitcoinNetwork::Testnet))
        );
        assert_eq!(BitcoinAddress::type_from_version(1), None);
    }

    #[test]
    fn bitcoin_address_rejects() {
        let bad = [
            "",
            "1",
            "1QJQxDas5JhdiXhEbNS14iNjgZMGDweis",
            "1QJQxDas5JhdiXhEbNS14iNjgZMGDweisss",
            "1QJQxDas5JhdiXhEbNS14iNjgZMGDweiO0",
            "9QJQxDas5JhdiXhEbNS14iNjgZMGDweiss",
        ];
        for s in &bad {
            assert!(BitcoinAddress::from_str(s).is_err(), "{} should not parse", s);
        }

        // valid base58check, unknown version byte
        let mut data = [0u8; 21];
        data[0] = 1;
        let s = base58::encode_check(&data);
        assert_eq!(BitcoinAddress::from_str(&s), Err(AddressError::InvalidVersion(1)));

        let s = base58::encode_check(&data[..20]);
        assert_eq!(BitcoinAddress::from_str(&s), Err(AddressError::InvalidLength(20)));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_address() {
        use serde_test::{assert_tokens, Token};

        let addr = StacksAddress::from_str("SP2J6ZY48GV1EZ5V2V5RB9MP66SW86PYKKNRV9EJ7").unwrap();
        assert_tokens(&addr, &[Token::Str("SP2J6ZY48GV1EZ5V2V5RB9MP66SW86PYKKNRV9EJ7")]);

        let btc = BitcoinAddress::from_str("1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa").unwrap();
        let json = serde_json::to_string(&btc).unwrap();
        assert_eq!(json, "\"1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa\"");
        assert_eq!(serde_json::from_str::<BitcoinAddress>(&json).unwrap(), btc);
    }
}
