//! Text I/O for `o`, `n` and `i`.

use std::collections::VecDeque;
use std::io::BufRead;

use crate::error::{Error, Result};

/// Shortest decimal text for a stack value: `3`, `0.5`, `-12.25`.
pub fn format_number (value: f64) -> String {
    // Avoid printing "-0".
    if value == 0.0 {
        return String::from("0");
    }
    format!("{value}")
}

/// The character whose code point is the truncated value, or U+FFFD when
/// there is none.
pub fn format_char (value: f64) -> char {
    if !(0.0..=u32::MAX as f64).contains(&value) {
        return char::REPLACEMENT_CHARACTER;
    }
    char::from_u32(value as u32).unwrap_or(char::REPLACEMENT_CHARACTER)
}

/// Splits an input stream into whitespace-delimited numeric tokens, pulling
/// further lines only when the buffered ones run out.
pub struct NumberReader<B> {
    input: B,
    pending: VecDeque<String>,
}

impl<B: BufRead> NumberReader<B> {
    pub fn new (input: B) -> Self {
        NumberReader { input, pending: VecDeque::new() }
    }

    pub fn read_number (&mut self) -> Result<f64> {
        while self.pending.is_empty() {
            let mut bytes = Vec::new();
            if self.input.read_until(b'\n', &mut bytes)? == 0 {
                return Err(Error::InputExhausted);
            }
            let line = String::from_utf8(bytes)
                .map_err(|e| Error::InvalidInput(String::from_utf8_lossy(e.as_bytes()).into_owned()))?;
            self.pending.extend(line.split_whitespace().map(String::from));
        }
        let token = self.pending.pop_front().ok_or(Error::InputExhausted)?;
        match token.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(v),
            _ => Err(Error::InvalidInput(token)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_print_without_trailing_zeroes () {
        assert_eq!(format_number(3.0), "3");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(0.5), "0.5");
        assert_eq!(format_number(-12.25), "-12.25");
    }

    #[test]
    fn chars_truncate_and_replace () {
        assert_eq!(format_char(72.0), 'H');
        assert_eq!(format_char(104.9), 'h');
        assert_eq!(format_char(-1.0), char::REPLACEMENT_CHARACTER);
        assert_eq!(format_char(f64::from(0xD800)), char::REPLACEMENT_CHARACTER);
    }

    #[test]
    fn reads_tokens_across_lines () {
        let mut reader = NumberReader::new("12 -3.5\n\n  7\n".as_bytes());
        assert_eq!(reader.read_number().unwrap(), 12.0);
        assert_eq!(reader.read_number().unwrap(), -3.5);
        assert_eq!(reader.read_number().unwrap(), 7.0);
        assert!(matches!(reader.read_number(), Err(Error::InputExhausted)));
    }

    #[test]
    fn rejects_garbage () {
        let mut reader = NumberReader::new("fish 1".as_bytes());
        assert!(matches!(reader.read_number(), Err(Error::InvalidInput(t)) if t == "fish"));
        assert_eq!(reader.read_number().unwrap(), 1.0);
        let mut reader = NumberReader::new("inf".as_bytes());
        assert!(matches!(reader.read_number(), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn non_utf8_input_is_malformed () {
        let bytes: &[u8] = &[0xff, b'\n', b'3'];
        let mut reader = NumberReader::new(bytes);
        assert!(matches!(reader.read_number(), Err(Error::InvalidInput(_))));
        assert_eq!(reader.read_number().unwrap(), 3.0);
    }
}
