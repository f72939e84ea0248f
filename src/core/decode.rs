use std::fmt;

use memchr::memchr;

// Capacity of the reconstructed-secret buffer, terminator slot included.
pub const DECODE_BUFFER_CAP: usize = 9;
pub const GROUP_LEN: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    ShortGroup,
    BufferFull,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShortGroup => write!(f, "Key ends in the middle of a digit group"),
            Self::BufferFull => write!(f, "Decoded bytes exceed the comparison buffer"),
        }
    }
}

/// Fixed-capacity buffer for the reconstructed secret. The logical length
/// runs up to the first zero byte, not the write cursor, so a decoded zero
/// freezes the visible length while later groups still land behind it.
#[derive(Clone)]
pub struct DecodeBuffer {
    bytes: [u8; DECODE_BUFFER_CAP],
    cursor: usize,
}

impl DecodeBuffer {
    pub fn new(seed: u8) -> Self {
        let mut bytes = [0; DECODE_BUFFER_CAP];
        bytes[0] = seed;
        DecodeBuffer { bytes, cursor: 1 }
    }

    // The last slot is never written, so the buffer stays zero-terminated.
    pub fn push(&mut self, byte: u8) -> Result<(), DecodeError> {
        if self.cursor >= DECODE_BUFFER_CAP - 1 {
            return Err(DecodeError::BufferFull);
        }
        self.bytes[self.cursor] = byte;
        self.cursor += 1;
        Ok(())
    }

    pub fn terminated_len(&self) -> usize {
        memchr(0, &self.bytes).unwrap_or(DECODE_BUFFER_CAP)
    }

    pub fn as_c_str(&self) -> &[u8] {
        &self.bytes[..self.terminated_len()]
    }
}

impl fmt::Debug for DecodeBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DecodeBuffer({})", hex::encode(&self.bytes[..self.cursor]))
    }
}

pub fn is_space(byte: u8) -> bool {
    // The C isspace class: space, \t, \n, \v, \f, \r.
    matches!(byte, b' ' | b'\t' | b'\n' | 0x0b | 0x0c | b'\r')
}

pub fn take_group(key: &[u8], at: usize) -> Result<&[u8], DecodeError> {
    if key.len().saturating_sub(at) < GROUP_LEN {
        return Err(DecodeError::ShortGroup);
    }
    Ok(&key[at..at + GROUP_LEN])
}

/// Decimal value of one group with C `atoi` semantics: leading whitespace
/// skipped, optional sign, digits up to the first non-digit. Anything
/// unparsable is 0.
pub fn group_value(group: &[u8]) -> i32 {
    let mut i = 0;
    while i < group.len() && is_space(group[i]) {
        i += 1;
    }

    let mut sign = 1;
    if i < group.len() && (group[i] == b'+' || group[i] == b'-') {
        if group[i] == b'-' {
            sign = -1;
        }
        i += 1;
    }

    let mut value: i32 = 0;
    while i < group.len() && group[i].is_ascii_digit() {
        value = value * 10 + i32::from(group[i] - b'0');
        i += 1;
    }

    sign * value
}

mod test {
    #[allow(unused_imports)]
    use super::*;

    #[test]
    fn test_group_value_plain_digits() {
        assert_eq!(group_value(b"101"), 101);
        assert_eq!(group_value(b"065"), 65);
        assert_eq!(group_value(b"000"), 0);
        assert_eq!(group_value(b"999"), 999);
    }

    #[test]
    fn test_group_value_stops_at_non_digit() {
        assert_eq!(group_value(b"1a2"), 1);
        assert_eq!(group_value(b"10a"), 10);
        assert_eq!(group_value(b"abc"), 0);
        assert_eq!(group_value(b""), 0);
    }

    #[test]
    fn test_group_value_sign_and_whitespace() {
        assert_eq!(group_value(b"+65"), 65);
        assert_eq!(group_value(b"-65"), -65);
        assert_eq!(group_value(b" 65"), 65);
        assert_eq!(group_value(b"- 5"), 0);
        assert_eq!(group_value(b"-65") as u8, 0xbf);
    }

    #[test]
    fn test_take_group_bounds() {
        let key = b"00101108";
        assert_eq!(take_group(key, 2).unwrap(), b"101");
        assert_eq!(take_group(key, 5).unwrap(), b"108");
        assert_eq!(take_group(key, 6), Err(DecodeError::ShortGroup));
        assert_eq!(take_group(key, 8), Err(DecodeError::ShortGroup));
        assert_eq!(take_group(b"", 0), Err(DecodeError::ShortGroup));
    }

    #[test]
    fn test_buffer_starts_with_seed() {
        let buffer = DecodeBuffer::new(b'd');
        assert_eq!(buffer.terminated_len(), 1);
        assert_eq!(buffer.as_c_str(), b"d");
    }

    #[test]
    fn test_buffer_push_grows_terminated_len() {
        let mut buffer = DecodeBuffer::new(b'd');
        for &byte in b"elabere" {
            buffer.push(byte).unwrap();
        }
        assert_eq!(buffer.terminated_len(), 8);
        assert_eq!(buffer.as_c_str(), b"delabere");
    }

    #[test]
    fn test_buffer_zero_byte_freezes_terminated_len() {
        let mut buffer = DecodeBuffer::new(b'd');
        buffer.push(b'e').unwrap();
        buffer.push(0).unwrap();
        buffer.push(b'l').unwrap();
        assert_eq!(buffer.terminated_len(), 2);
        assert_eq!(buffer.as_c_str(), b"de");
    }

    #[test]
    fn test_buffer_rejects_overflow() {
        let mut buffer = DecodeBuffer::new(b'd');
        for byte in 1..=7 {
            buffer.push(byte).unwrap();
        }
        assert_eq!(buffer.push(8), Err(DecodeError::BufferFull));
    }

    #[test]
    fn test_buffer_debug_renders_hex() {
        let mut buffer = DecodeBuffer::new(b'd');
        assert_eq!(format!("{buffer:?}"), "DecodeBuffer(64)");
        buffer.push(b'e').unwrap();
        assert_eq!(format!("{buffer:?}"), "DecodeBuffer(6465)");
    }
}
