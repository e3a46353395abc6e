//! Minimal Solidity ABI codec.
//!
//! Covers exactly what the bug contract needs: `uint256`, `uint8`, `bool` and
//! `string` arguments, plus decoding of the `(string,string,uint8,bool)` record
//! returned by `getTask`.

use sha3::{Digest, Keccak256};

use crate::error::StoreError;
use crate::types::BugRecord;

pub const WORD: usize = 32;

pub const GET_BUG_COUNT: &str = "getBugCount()";
pub const GET_TASK: &str = "getTask(uint256)";
pub const ADD_BUG: &str = "addBug(string,string,uint8,bool)";
pub const DELETE_BUG: &str = "deleteBug(uint256)";

/// A single ABI-encodable argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Any unsigned integer type (`uint8` .. `uint256`) holding a value that fits in 64 bits.
    Uint(u64),
    Bool(bool),
    String(String),
}

/// First four bytes of the Keccak-256 hash of a canonical function signature.
pub fn selector(signature: &str) -> [u8; 4] {
    let hash = Keccak256::digest(signature.as_bytes());
    let mut out = [0u8; 4];
    out.copy_from_slice(&hash[..4]);
    out
}

/// Calldata for `signature` applied to `args`.
pub fn encode_call(signature: &str, args: &[Token]) -> Vec<u8> {
    let mut out = selector(signature).to_vec();
    out.extend(encode_args(args));
    out
}

/// Head/tail encoding of a flat argument list.
pub fn encode_args(args: &[Token]) -> Vec<u8> {
    let head_len = args.len() * WORD;
    let mut head = Vec::with_capacity(head_len);
    let mut tail = Vec::new();
    for arg in args {
        match arg {
            Token::Uint(v) => head.extend_from_slice(&uint_word(*v)),
            Token::Bool(b) => head.extend_from_slice(&uint_word(u64::from(*b))),
            Token::String(s) => {
                head.extend_from_slice(&uint_word((head_len + tail.len()) as u64));
                tail.extend_from_slice(&uint_word(s.len() as u64));
                tail.extend_from_slice(s.as_bytes());
                let padded = tail.len().div_ceil(WORD) * WORD;
                tail.resize(padded, 0);
            }
        }
    }
    head.extend(tail);
    head
}

pub fn uint_word(value: u64) -> [u8; WORD] {
    let mut word = [0u8; WORD];
    word[WORD - 8..].copy_from_slice(&value.to_be_bytes());
    word
}

fn word_at(data: &[u8], offset: usize) -> Result<&[u8], StoreError> {
    offset
        .checked_add(WORD)
        .and_then(|end| data.get(offset..end))
        .ok_or_else(|| {
            StoreError::Decode(format!(
                "expected a 32-byte word at offset {offset}, data is {} bytes",
                data.len()
            ))
        })
}

pub fn decode_u64(data: &[u8], offset: usize) -> Result<u64, StoreError> {
    let word = word_at(data, offset)?;
    if word[..WORD - 8].iter().any(|b| *b != 0) {
        return Err(StoreError::Decode(format!(
            "integer at offset {offset} does not fit in 64 bits"
        )));
    }
    let mut buf = [0u8; 8];
    buf.copy_from_slice(&word[WORD - 8..]);
    Ok(u64::from_be_bytes(buf))
}

fn decode_usize(data: &[u8], offset: usize) -> Result<usize, StoreError> {
    let value = decode_u64(data, offset)?;
    usize::try_from(value)
        .map_err(|_| StoreError::Decode(format!("offset {value} does not fit in usize")))
}

pub fn decode_bool(data: &[u8], offset: usize) -> Result<bool, StoreError> {
    match decode_u64(data, offset)? {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(StoreError::Decode(format!(
            "invalid bool value {other} at offset {offset}"
        ))),
    }
}

/// Decodes the string whose head word sits at `head_offset`. The head holds an
/// offset relative to `base`, the start of the enclosing tuple.
pub fn decode_string(data: &[u8], base: usize, head_offset: usize) -> Result<String, StoreError> {
    let rel = decode_usize(data, head_offset)?;
    let start = base
        .checked_add(rel)
        .ok_or_else(|| StoreError::Decode("string offset overflows".into()))?;
    let len = decode_usize(data, start)?;
    let bytes = (start + WORD)
        .checked_add(len)
        .and_then(|end| data.get(start + WORD..end))
        .ok_or_else(|| {
            StoreError::Decode(format!(
                "string of {len} bytes at offset {start} runs past the end of the data"
            ))
        })?;
    String::from_utf8(bytes.to_vec())
        .map_err(|e| StoreError::Decode(format!("string is not valid utf-8: {e}")))
}

/// Decodes the return value of `getTask`.
///
/// Accepts both the flat `(string,string,uint8,bool)` return and the same
/// tuple returned as a single struct, which the compiler prefixes with an
/// offset word of `0x20`. The flat form always starts with `0x80`.
pub fn decode_bug_record(data: &[u8]) -> Result<BugRecord, StoreError> {
    let base = match decode_u64(data, 0) {
        Ok(v) if v == WORD as u64 => WORD,
        _ => 0,
    };
    let bug_id = decode_string(data, base, base)?;
    let description = decode_string(data, base, base + WORD)?;
    let raw_criticality = decode_u64(data, base + 2 * WORD)?;
    let criticality = u8::try_from(raw_criticality).map_err(|_| {
        StoreError::Decode(format!("criticality {raw_criticality} is not a uint8"))
    })?;
    let is_done = decode_bool(data, base + 3 * WORD)?;
    Ok(BugRecord {
        bug_id,
        description,
        criticality,
        is_done,
    })
}

/// `0x`-prefixed lowercase hex.
pub fn encode_hex(bytes: &[u8]) -> String {
    const DIGITS: &[u8; 16] = b"0123456789abcdef";
    let mut out = String::with_capacity(2 + bytes.len() * 2);
    out.push_str("0x");
    for b in bytes {
        out.push(DIGITS[(b >> 4) as usize] as char);
        out.push(DIGITS[(b & 0x0f) as usize] as char);
    }
    out
}

/// Parses hex with or without a `0x` prefix.
pub fn decode_hex(s: &str) -> Result<Vec<u8>, StoreError> {
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    if digits.len() % 2 != 0 {
        return Err(StoreError::Decode(format!("odd-length hex string: {s}")));
    }
    let nibble = |c: u8| -> Result<u8, StoreError> {
        (c as char)
            .to_digit(16)
            .map(|d| d as u8)
            .ok_or_else(|| StoreError::Decode(format!("invalid hex digit in {s}")))
    };
    digits
        .as_bytes()
        .chunks_exact(2)
        .map(|pair| Ok((nibble(pair[0])? << 4) | nibble(pair[1])?))
        .collect()
}

/// Parses a JSON-RPC quantity such as `"0x1"`.
pub fn decode_quantity(s: &str) -> Result<u64, StoreError> {
    let digits = s.strip_prefix("0x").unwrap_or(s);
    if digits.is_empty() {
        return Err(StoreError::Decode(format!("empty quantity: {s}")));
    }
    u64::from_str_radix(digits, 16)
        .map_err(|e| StoreError::Decode(format!("invalid quantity {s}: {e}")))
}

pub fn encode_quantity(value: u64) -> String {
    format!("0x{value:x}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_tokens(id: &str, desc: &str, crit: u64, done: bool) -> Vec<Token> {
        vec![
            Token::String(id.into()),
            Token::String(desc.into()),
            Token::Uint(crit),
            Token::Bool(done),
        ]
    }

    #[test]
    fn selector_matches_known_erc20_transfer() {
        assert_eq!(selector("transfer(address,uint256)"), [0xa9, 0x05, 0x9c, 0xbb]);
    }

    #[test]
    fn add_bug_calldata_layout() {
        let data = encode_call(ADD_BUG, &record_tokens("B1", "crash on load", 2, false));
        assert_eq!(&data[..4], &selector(ADD_BUG));
        let args = &data[4..];
        // 4 head words, then (len + 1 padded word) per string
        assert_eq!(args.len(), 4 * WORD + 2 * 2 * WORD);
        assert_eq!(decode_u64(args, 0).unwrap(), 4 * WORD as u64);
        assert_eq!(decode_u64(args, WORD).unwrap(), 6 * WORD as u64);
        assert_eq!(decode_u64(args, 2 * WORD).unwrap(), 2);
        assert_eq!(decode_u64(args, 3 * WORD).unwrap(), 0);
        assert_eq!(decode_string(args, 0, 0).unwrap(), "B1");
        assert_eq!(decode_string(args, 0, WORD).unwrap(), "crash on load");
    }

    #[test]
    fn string_of_exactly_one_word_gets_no_extra_padding() {
        let s = "x".repeat(WORD);
        let data = encode_args(&[Token::String(s.clone())]);
        assert_eq!(data.len(), 3 * WORD);
        assert_eq!(decode_string(&data, 0, 0).unwrap(), s);
    }

    #[test]
    fn decodes_flat_and_struct_wrapped_records() {
        let flat = encode_args(&record_tokens("B7", "slow query", 1, true));
        let mut wrapped = uint_word(WORD as u64).to_vec();
        wrapped.extend_from_slice(&flat);

        let expected = BugRecord {
            bug_id: "B7".into(),
            description: "slow query".into(),
            criticality: 1,
            is_done: true,
        };
        assert_eq!(decode_bug_record(&flat).unwrap(), expected);
        assert_eq!(decode_bug_record(&wrapped).unwrap(), expected);
    }

    #[test]
    fn unknown_criticality_ordinal_survives_decoding() {
        let data = encode_args(&record_tokens("B9", "", 7, false));
        let record = decode_bug_record(&data).unwrap();
        assert_eq!(record.criticality, 7);
        assert_eq!(record.criticality_label(), "");
    }

    #[test]
    fn truncated_record_is_a_decode_error() {
        let data = encode_args(&record_tokens("B1", "crash on load", 2, false));
        let err = decode_bug_record(&data[..data.len() - WORD]).unwrap_err();
        assert!(matches!(err, StoreError::Decode(_)));
    }

    #[test]
    fn hex_and_quantities() {
        assert_eq!(encode_hex(&[0x00, 0xab, 0x10]), "0x00ab10");
        assert_eq!(decode_hex("0x00ab10").unwrap(), vec![0x00, 0xab, 0x10]);
        assert!(decode_hex("0xabc").is_err());
        assert!(decode_hex("0xgg").is_err());
        assert_eq!(decode_quantity("0x1").unwrap(), 1);
        assert_eq!(decode_quantity("0xf4240").unwrap(), 1_000_000);
        assert_eq!(encode_quantity(1_000_000), "0xf4240");
        assert!(decode_quantity("0x").is_err());
    }
}
