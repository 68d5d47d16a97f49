//! Solidity ABI encoding for the handful of types the funding contract uses.
//!
//! Values are carried as [`RawValue`]. Integers wider than `u128` are rejected
//! on decode rather than truncated.

use sha3::{Digest, Keccak256};

use crate::domain::AppError;
use crate::domain::proposal::{Address, RawValue};

const WORD: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbiType {
    Uint256,
    Bool,
    Address,
    String,
}

impl AbiType {
    fn is_dynamic(self) -> bool {
        matches!(self, AbiType::String)
    }

    fn name(self) -> &'static str {
        match self {
            AbiType::Uint256 => "uint256",
            AbiType::Bool => "bool",
            AbiType::Address => "address",
            AbiType::String => "string",
        }
    }
}

/// First four bytes of the Keccak-256 hash of a canonical signature,
/// e.g. `getProposalInfo(uint256)`.
pub fn selector(signature: &str) -> [u8; 4] {
    let digest = Keccak256::digest(signature.as_bytes());
    let mut out = [0u8; 4];
    out.copy_from_slice(&digest[..4]);
    out
}

/// Calldata for `signature` applied to `args`.
pub fn encode_call(signature: &str, args: &[RawValue]) -> Vec<u8> {
    let mut data = selector(signature).to_vec();
    data.extend(encode(args));
    data
}

/// Head/tail encoding of a value list, as used for both arguments and
/// return data.
pub fn encode(values: &[RawValue]) -> Vec<u8> {
    let head_len = values.len() * WORD;
    let mut head = Vec::with_capacity(head_len);
    let mut tail = Vec::new();

    for value in values {
        match value {
            RawValue::Uint(n) => head.extend(uint_word(*n)),
            RawValue::Bool(b) => head.extend(uint_word(u128::from(*b))),
            RawValue::Address(address) => {
                let mut word = [0u8; WORD];
                word[12..].copy_from_slice(&address.to_bytes());
                head.extend(word);
            }
            RawValue::Text(text) => {
                head.extend(uint_word((head_len + tail.len()) as u128));
                let bytes = text.as_bytes();
                tail.extend(uint_word(bytes.len() as u128));
                tail.extend_from_slice(bytes);
                tail.resize(tail.len() + padding(bytes.len()), 0);
            }
        }
    }

    head.extend(tail);
    head
}

/// Decode return data against the expected output types.
pub fn decode(types: &[AbiType], data: &[u8]) -> Result<Vec<RawValue>, AppError> {
    let head_len = types.len() * WORD;
    if data.len() < head_len {
        return Err(AppError::malformed(
            "ABI data",
            format!(
                "expected at least {} bytes for {} values, got {}",
                head_len,
                types.len(),
                data.len()
            ),
        ));
    }

    types
        .iter()
        .enumerate()
        .map(|(position, ty)| {
            let word = word_at(data, position * WORD)?;
            if ty.is_dynamic() {
                let offset = word_to_usize(word, "string offset")?;
                return decode_string(data, offset).map(RawValue::Text);
            }
            decode_static(*ty, word)
        })
        .collect()
}

fn decode_static(ty: AbiType, word: &[u8]) -> Result<RawValue, AppError> {
    match ty {
        AbiType::Uint256 => word_to_u128(word).map(RawValue::Uint),
        AbiType::Bool => match word_to_u128(word)? {
            0 => Ok(RawValue::Bool(false)),
            1 => Ok(RawValue::Bool(true)),
            other => Err(AppError::malformed("ABI bool", format!("value {} is not 0 or 1", other))),
        },
        AbiType::Address => {
            if word[..12].iter().any(|b| *b != 0) {
                return Err(AppError::malformed("ABI address", "upper 12 bytes are not zero"));
            }
            let mut bytes = [0u8; 20];
            bytes.copy_from_slice(&word[12..]);
            Ok(RawValue::Address(Address::from_bytes(bytes)))
        }
        AbiType::String => Err(AppError::malformed(ty.name(), "not a static type")),
    }
}

fn decode_string(data: &[u8], offset: usize) -> Result<String, AppError> {
    let len = word_to_usize(word_at(data, offset)?, "string length")?;
    let start = offset + WORD;
    let end = start
        .checked_add(len)
        .filter(|end| *end <= data.len())
        .ok_or_else(|| AppError::malformed("ABI string", "length runs past the end of the data"))?;

    String::from_utf8(data[start..end].to_vec())
        .map_err(|err| AppError::malformed("ABI string", err.to_string()))
}

fn word_at(data: &[u8], offset: usize) -> Result<&[u8], AppError> {
    offset.checked_add(WORD).and_then(|end| data.get(offset..end)).ok_or_else(|| {
        AppError::malformed("ABI data", format!("no 32-byte word at offset {}", offset))
    })
}

fn word_to_u128(word: &[u8]) -> Result<u128, AppError> {
    if word[..16].iter().any(|b| *b != 0) {
        return Err(AppError::malformed("ABI uint256", "value does not fit in 128 bits"));
    }
    let mut low = [0u8; 16];
    low.copy_from_slice(&word[16..]);
    Ok(u128::from_be_bytes(low))
}

fn word_to_usize(word: &[u8], what: &str) -> Result<usize, AppError> {
    let value = word_to_u128(word)?;
    usize::try_from(value)
        .map_err(|_| AppError::malformed("ABI data", format!("{} {} is too large", what, value)))
}

fn uint_word(value: u128) -> [u8; WORD] {
    let mut word = [0u8; WORD];
    word[16..].copy_from_slice(&value.to_be_bytes());
    word
}

fn padding(len: usize) -> usize {
    (WORD - len % WORD) % WORD
}

/// `0x`-prefixed lowercase hex, the JSON-RPC wire form of byte strings.
pub fn to_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

pub fn from_hex(value: &str) -> Result<Vec<u8>, AppError> {
    let digits = value.strip_prefix("0x").unwrap_or(value);
    hex::decode(digits).map_err(|err| AppError::malformed("hex data", err.to_string()))
}

/// Parse a JSON-RPC quantity such as `0x1a`.
pub fn parse_quantity(value: &str) -> Result<u128, AppError> {
    let digits = value.strip_prefix("0x").unwrap_or(value);
    if digits.is_empty() {
        return Ok(0);
    }
    u128::from_str_radix(digits, 16)
        .map_err(|err| AppError::malformed("quantity", format!("'{}': {}", value, err)))
}
