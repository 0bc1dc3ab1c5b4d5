//! Whitespace-delimited token reading for PNM headers and ASCII samples.

use std::io::{self, BufRead};

/// Longest magic token accepted before giving up.
const MAX_TOKEN_LEN: usize = 1023;

/// Outcome of reading one decimal integer.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum IntToken {
    Value(i64),
    /// End of stream before any digit.
    Eof,
    /// Something other than digits where an integer was expected.
    Invalid,
}

/// Whitespace as the C locale defines it (includes vertical tab).
fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | 0x0b | 0x0c)
}

/// Magic tokens end at space, newline or tab only.
fn is_magic_delimiter(b: u8) -> bool {
    matches!(b, b' ' | b'\n' | b'\t')
}

fn peek<R: BufRead + ?Sized>(reader: &mut R) -> io::Result<Option<u8>> {
    Ok(reader.fill_buf()?.first().copied())
}

/// Read the magic identifier, leaving the delimiter unread.
///
/// Returns `None` for an empty or overlong token.
pub(crate) fn read_magic<R: BufRead + ?Sized>(reader: &mut R) -> io::Result<Option<Vec<u8>>> {
    let mut token = Vec::new();
    while let Some(b) = peek(reader)? {
        if is_magic_delimiter(b) {
            break;
        }
        if token.len() == MAX_TOKEN_LEN {
            return Ok(None);
        }
        token.push(b);
        reader.consume(1);
    }
    if token.is_empty() {
        return Ok(None);
    }
    Ok(Some(token))
}

/// Skip whitespace, then read an optionally signed decimal integer.
///
/// The byte after the last digit is left unread.
pub(crate) fn read_int<R: BufRead + ?Sized>(reader: &mut R) -> io::Result<IntToken> {
    loop {
        match peek(reader)? {
            None => return Ok(IntToken::Eof),
            Some(b) if is_space(b) => reader.consume(1),
            Some(_) => break,
        }
    }

    let mut negative = false;
    if let Some(sign @ (b'+' | b'-')) = peek(reader)? {
        negative = sign == b'-';
        reader.consume(1);
    }

    let mut value: i64 = 0;
    let mut digits = 0usize;
    while let Some(b) = peek(reader)? {
        if !b.is_ascii_digit() {
            break;
        }
        value = match value
            .checked_mul(10)
            .and_then(|v| v.checked_add(i64::from(b - b'0')))
        {
            Some(v) => v,
            None => return Ok(IntToken::Invalid),
        };
        digits += 1;
        reader.consume(1);
    }

    match digits {
        0 if peek(reader)?.is_none() => Ok(IntToken::Eof),
        0 => Ok(IntToken::Invalid),
        _ if negative => Ok(IntToken::Value(-value)),
        _ => Ok(IntToken::Value(value)),
    }
}

/// Consume one byte if present.
pub(crate) fn skip_byte<R: BufRead + ?Sized>(reader: &mut R) -> io::Result<()> {
    if peek(reader)?.is_some() {
        reader.consume(1);
    }
    Ok(())
}
