use std::fmt;

use log::{debug, trace};

use crate::core::decode::{DecodeBuffer, DecodeError, GROUP_LEN, group_value, take_group};

pub const SECRET: &[u8] = b"delabere";
pub const SEED_BYTE: u8 = b'd';
pub const KEY_PREFIX: &[u8] = b"00";
/// Longest key the prompt reads; [`validate`] itself takes any length.
pub const MAX_KEY_LEN: usize = 23;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    EmptyInput,
    PrefixMismatch,
    SecretMismatch,
    Decode(DecodeError),
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyInput => write!(f, "No key was read"),
            Self::PrefixMismatch => write!(f, "Key does not start with the expected prefix"),
            Self::SecretMismatch => write!(f, "Decoded bytes do not match the secret"),
            Self::Decode(e) => write!(f, "{e}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Accepted,
    Rejected(RejectReason),
}

impl Outcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }
}

/// Checks a key against the embedded secret. The key carries the secret's
/// bytes after the first as 3-digit decimal groups behind a "00" prefix;
/// the first byte is seeded, never transmitted.
pub fn validate(key: &[u8]) -> Outcome {
    if key.len() < KEY_PREFIX.len() || &key[..KEY_PREFIX.len()] != KEY_PREFIX {
        return Outcome::Rejected(RejectReason::PrefixMismatch);
    }

    let mut decoded = DecodeBuffer::new(SEED_BYTE);
    let mut i = KEY_PREFIX.len();
    // Gated on the visible length: a decoded zero freezes it, leaving key
    // exhaustion as the only exit.
    while decoded.terminated_len() < SECRET.len() && i < key.len() {
        let group = match take_group(key, i) {
            Ok(group) => group,
            Err(e) => return Outcome::Rejected(RejectReason::Decode(e)),
        };
        let byte = group_value(group) as u8;
        if let Err(e) = decoded.push(byte) {
            return Outcome::Rejected(RejectReason::Decode(e));
        }
        trace!("group at {i} decoded to {byte:#04x}, buffer now {decoded:?}");
        i += GROUP_LEN;
    }

    if decoded.as_c_str() == SECRET {
        Outcome::Accepted
    } else {
        debug!("decoded buffer {decoded:?} does not match the secret");
        Outcome::Rejected(RejectReason::SecretMismatch)
    }
}

/// Builds the key that [`validate`] accepts for the given secret: the
/// prefix, then each byte after the first as a zero-padded decimal group.
pub fn encode_key(secret: &[u8]) -> String {
    let groups = secret.len().saturating_sub(1);
    let mut key = String::with_capacity(KEY_PREFIX.len() + groups * GROUP_LEN);
    for &byte in KEY_PREFIX {
        key.push(char::from(byte));
    }
    for &byte in secret.get(1..).unwrap_or_default() {
        key.push_str(&format!("{byte:03}"));
    }
    key
}

mod test {
    #[allow(unused_imports)]
    use super::*;

    const GOOD_KEY: &[u8] = b"00101108097098101114101";

    #[test]
    fn test_canonical_key_accepted() {
        assert_eq!(validate(GOOD_KEY), Outcome::Accepted);
        assert!(validate(GOOD_KEY).is_accepted());
    }

    #[test]
    fn test_any_altered_digit_rejected() {
        for at in 0..GOOD_KEY.len() {
            let mut key = GOOD_KEY.to_vec();
            key[at] = (key[at] - b'0' + 1) % 10 + b'0';
            assert!(
                !validate(&key).is_accepted(),
                "altering position {at} should reject",
            );
        }
    }

    #[test]
    fn test_missing_prefix_rejected() {
        assert_eq!(
            validate(b"10101108097098101114101"),
            Outcome::Rejected(RejectReason::PrefixMismatch)
        );
        assert_eq!(
            validate(b"01101108097098101114101"),
            Outcome::Rejected(RejectReason::PrefixMismatch)
        );
        assert_eq!(validate(b"0"), Outcome::Rejected(RejectReason::PrefixMismatch));
        assert_eq!(validate(b""), Outcome::Rejected(RejectReason::PrefixMismatch));
    }

    #[test]
    fn test_prefix_alone_rejected() {
        assert_eq!(validate(b"00"), Outcome::Rejected(RejectReason::SecretMismatch));
    }

    #[test]
    fn test_truncated_key_rejected() {
        assert_eq!(
            validate(b"0010"),
            Outcome::Rejected(RejectReason::Decode(DecodeError::ShortGroup))
        );
        assert_eq!(
            validate(b"00101108097098101114"),
            Outcome::Rejected(RejectReason::SecretMismatch)
        );
    }

    #[test]
    fn test_trailing_bytes_after_valid_key_ignored() {
        // The loop stops once eight bytes are visible.
        let mut key = GOOD_KEY.to_vec();
        key.extend_from_slice(b"999");
        assert_eq!(validate(&key), Outcome::Accepted);
    }

    #[test]
    fn test_overlong_key_overflows_buffer() {
        let mut key = b"00".to_vec();
        for _ in 0..8 {
            key.extend_from_slice(b"000");
        }
        assert_eq!(
            validate(&key),
            Outcome::Rejected(RejectReason::Decode(DecodeError::BufferFull))
        );
    }

    #[test]
    fn test_zero_group_freezes_length() {
        // "000" decodes to a zero byte; the visible length never reaches
        // eight, so the loop drains the key and the compare fails.
        assert_eq!(
            validate(b"00000108097098101114101"),
            Outcome::Rejected(RejectReason::SecretMismatch)
        );
    }

    #[test]
    fn test_non_numeric_groups_decode_to_zero() {
        assert_eq!(
            validate(b"00abcdefghijklmnopqrstu"),
            Outcome::Rejected(RejectReason::SecretMismatch)
        );
    }

    #[test]
    fn test_validate_is_idempotent() {
        let first = validate(GOOD_KEY);
        let second = validate(GOOD_KEY);
        assert_eq!(first, second);
    }

    #[test]
    fn test_encode_key_round_trips() {
        let key = encode_key(SECRET);
        assert_eq!(key, "00101108097098101114101");
        assert_eq!(key.len(), MAX_KEY_LEN);
        assert_eq!(validate(key.as_bytes()), Outcome::Accepted);
    }

    #[test]
    fn test_encode_key_short_secret() {
        assert_eq!(encode_key(b""), "00");
        assert_eq!(encode_key(b"d"), "00");
        assert_eq!(encode_key(b"de"), "00101");
    }
}
