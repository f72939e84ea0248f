use std::io::{self, BufRead, Write};

use log::debug;

use crate::core::decode::is_space;
use crate::core::validate::{self, MAX_KEY_LEN, Outcome, RejectReason};

pub const PROMPT: &str = "Please enter key: ";
pub const ACCEPT_MSG: &str = "Good job.";
pub const REJECT_MSG: &str = "Nope.";

/// Reads one whitespace-delimited token of at most `max` bytes, `scanf`
/// `%s`-style: leading whitespace skipped, the token cut at the next
/// whitespace or at `max`, whichever comes first. Bytes past the cut stay
/// unread. None when the input ends before a token starts.
pub fn read_token<R: BufRead>(input: &mut R, max: usize) -> io::Result<Option<Vec<u8>>> {
    loop {
        let buffered = input.fill_buf()?;
        if buffered.is_empty() {
            return Ok(None);
        }
        let skip = buffered.iter().take_while(|&&b| is_space(b)).count();
        let exhausted = skip == buffered.len();
        input.consume(skip);
        if !exhausted {
            break;
        }
    }

    let mut token = Vec::with_capacity(max);
    while token.len() < max {
        let buffered = input.fill_buf()?;
        if buffered.is_empty() {
            break;
        }
        let take = buffered
            .iter()
            .take(max - token.len())
            .take_while(|&&b| !is_space(b))
            .count();
        let chunk_len = buffered.len();
        token.extend_from_slice(&buffered[..take]);
        input.consume(take);
        if take < chunk_len {
            break;
        }
    }

    Ok(Some(token))
}

/// Prompts for a key on `output`, reads it from `input` and reports the
/// verdict. Every rejection prints the same message; the reason only
/// reaches the log.
pub fn run<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> io::Result<Outcome> {
    write!(output, "{PROMPT}")?;
    output.flush()?;

    let outcome = match read_token(input, MAX_KEY_LEN) {
        Ok(Some(key)) => validate::validate(&key),
        Ok(None) => Outcome::Rejected(RejectReason::EmptyInput),
        Err(e) => {
            debug!("reading the key failed: {e}");
            Outcome::Rejected(RejectReason::EmptyInput)
        }
    };

    match outcome {
        Outcome::Accepted => writeln!(output, "{ACCEPT_MSG}")?,
        Outcome::Rejected(reason) => {
            debug!("key rejected: {reason}");
            writeln!(output, "{REJECT_MSG}")?;
        }
    }

    Ok(outcome)
}

mod test {
    #[allow(unused_imports)]
    use super::*;
    #[allow(unused_imports)]
    use std::io::Cursor;

    #[test]
    fn test_read_token_skips_leading_whitespace() {
        let mut input = Cursor::new(" \t\n\x0b\x0c\r key123\n");
        let token = read_token(&mut input, 23).unwrap();
        assert_eq!(token.as_deref(), Some(&b"key123"[..]));
    }

    #[test]
    fn test_read_token_truncates_and_leaves_remainder() {
        let mut input = Cursor::new("abcdefgh");
        let token = read_token(&mut input, 4).unwrap();
        assert_eq!(token.as_deref(), Some(&b"abcd"[..]));

        let rest = read_token(&mut input, 4).unwrap();
        assert_eq!(rest.as_deref(), Some(&b"efgh"[..]));
    }

    #[test]
    fn test_read_token_none_on_eof() {
        let mut input = Cursor::new("");
        assert_eq!(read_token(&mut input, 23).unwrap(), None);

        let mut blank = Cursor::new(" \n\t");
        assert_eq!(read_token(&mut blank, 23).unwrap(), None);
    }

    #[test]
    fn test_read_token_stops_at_whitespace() {
        let mut input = Cursor::new("first second");
        let token = read_token(&mut input, 23).unwrap();
        assert_eq!(token.as_deref(), Some(&b"first"[..]));
    }

    #[test]
    fn test_run_accepts_good_key() {
        let mut input = Cursor::new("00101108097098101114101\n");
        let mut output = Vec::new();
        let outcome = run(&mut input, &mut output).unwrap();
        assert_eq!(outcome, Outcome::Accepted);
        assert_eq!(output, b"Please enter key: Good job.\n");
    }

    #[test]
    fn test_run_rejects_bad_key() {
        let mut input = Cursor::new("wrong\n");
        let mut output = Vec::new();
        let outcome = run(&mut input, &mut output).unwrap();
        assert_eq!(outcome, Outcome::Rejected(RejectReason::PrefixMismatch));
        assert_eq!(output, b"Please enter key: Nope.\n");
    }

    #[test]
    fn test_run_rejects_empty_input() {
        let mut input = Cursor::new("");
        let mut output = Vec::new();
        let outcome = run(&mut input, &mut output).unwrap();
        assert_eq!(outcome, Outcome::Rejected(RejectReason::EmptyInput));
        assert_eq!(output, b"Please enter key: Nope.\n");
    }

    #[test]
    fn test_run_truncates_overlong_input() {
        // 23 good chars then junk in the same token; the junk stays unread.
        let mut input = Cursor::new("00101108097098101114101zzz\n");
        let mut output = Vec::new();
        let outcome = run(&mut input, &mut output).unwrap();
        assert_eq!(outcome, Outcome::Accepted);
        assert_eq!(output, b"Please enter key: Good job.\n");
    }
}
