//! Property text parser
//!
//! Reads the line-oriented `key=value` format:
//! - `#` or `!` as the first non-blank character starts a comment line
//! - the key ends at the first unescaped `=`, `:` or whitespace
//! - a line ending in an odd number of backslashes continues on the next line
//! - `\t`, `\n`, `\r`, `\f` and `\uXXXX` escapes; any other `\c` yields `c`

use thiserror::Error;

/// Rejected property text, with the 1-based line where the problem starts
#[derive(Debug, Error, PartialEq, Eq)]
#[error("line {line}: {message}")]
pub struct PropertiesError {
    pub line: usize,
    pub message: String,
}

impl PropertiesError {
    fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}

/// Decode resource bytes and parse them
///
/// Valid UTF-8 is read as UTF-8; anything else is read as ISO-8859-1, which
/// maps every byte to the code point of the same value.
pub fn parse_bytes(bytes: &[u8]) -> Result<Vec<(String, String)>, PropertiesError> {
    match std::str::from_utf8(bytes) {
        Ok(text) => parse(text),
        Err(_) => parse(&bytes.iter().map(|&b| char::from(b)).collect::<String>()),
    }
}

/// Parse property text into `(key, value)` pairs in document order
///
/// Keys are returned exactly as written (after unescaping); duplicates are
/// kept so that the caller's last-write-wins merge applies.
pub fn parse(text: &str) -> Result<Vec<(String, String)>, PropertiesError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut entries = Vec::new();
    for (line, logical) in logical_lines(text) {
        entries.push(split_entry(line, &logical)?);
    }
    Ok(entries)
}

fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\u{000C}')
}

/// Split on `\n`, `\r` and `\r\n`, numbering lines from 1
fn physical_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut rest = text;
    while !rest.is_empty() {
        match rest.find(['\n', '\r']) {
            Some(end) => {
                lines.push(&rest[..end]);
                let skip = if rest[end..].starts_with("\r\n") { 2 } else { 1 };
                rest = &rest[end + skip..];
            }
            None => {
                lines.push(rest);
                break;
            }
        }
    }
    lines
}

fn ends_with_continuation(line: &str) -> bool {
    line.chars().rev().take_while(|&c| c == '\\').count() % 2 == 1
}

/// Join continuation lines, drop blanks and comments
fn logical_lines(text: &str) -> Vec<(usize, String)> {
    let physical = physical_lines(text);
    let mut logical = Vec::new();
    let mut index = 0;

    while index < physical.len() {
        let start_line = index + 1;
        let first = physical[index].trim_start_matches(is_blank);
        index += 1;

        if first.is_empty() || first.starts_with('#') || first.starts_with('!') {
            continue;
        }

        let mut joined = String::from(first);
        while ends_with_continuation(&joined) {
            joined.pop();
            match physical.get(index) {
                Some(next) => {
                    joined.push_str(next.trim_start_matches(is_blank));
                    index += 1;
                }
                None => break,
            }
        }

        logical.push((start_line, joined));
    }

    logical
}

fn split_entry(line: usize, logical: &str) -> Result<(String, String), PropertiesError> {
    let chars: Vec<char> = logical.chars().collect();
    let len = chars.len();

    let mut key_len = 0;
    let mut value_start = len;
    let mut has_separator = false;
    let mut preceding_backslash = false;

    while key_len < len {
        let c = chars[key_len];
        if !preceding_backslash {
            if c == '=' || c == ':' {
                value_start = key_len + 1;
                has_separator = true;
                break;
            }
            if is_blank(c) {
                value_start = key_len + 1;
                break;
            }
        }
        preceding_backslash = c == '\\' && !preceding_backslash;
        key_len += 1;
    }

    while value_start < len {
        let c = chars[value_start];
        if !is_blank(c) {
            if !has_separator && (c == '=' || c == ':') {
                has_separator = true;
            } else {
                break;
            }
        }
        value_start += 1;
    }

    let key = unescape(line, &chars[..key_len])?;
    let value = unescape(line, &chars[value_start.min(len)..])?;
    Ok((key, value))
}

fn unescape(line: usize, chars: &[char]) -> Result<String, PropertiesError> {
    let mut out = String::with_capacity(chars.len());
    let mut pos = 0;

    while pos < chars.len() {
        let c = chars[pos];
        pos += 1;
        if c != '\\' {
            out.push(c);
            continue;
        }

        let Some(&escaped) = chars.get(pos) else {
            // A lone trailing backslash at end of input
            break;
        };
        pos += 1;

        match escaped {
            't' => out.push('\t'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            'f' => out.push('\u{000C}'),
            'u' => {
                let unit = hex_unit(line, chars, pos)?;
                pos += 4;
                if (0xD800..0xDC00).contains(&unit) {
                    let low = match (chars.get(pos), chars.get(pos + 1)) {
                        (Some('\\'), Some('u')) => hex_unit(line, chars, pos + 2)?,
                        _ => return Err(PropertiesError::new(line, "unpaired surrogate in \\u escape")),
                    };
                    if !(0xDC00..0xE000).contains(&low) {
                        return Err(PropertiesError::new(line, "unpaired surrogate in \\u escape"));
                    }
                    pos += 6;
                    let code = 0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00);
                    out.push(char::from_u32(code).ok_or_else(|| {
                        PropertiesError::new(line, "invalid code point in \\u escape")
                    })?);
                } else {
                    out.push(char::from_u32(unit).ok_or_else(|| {
                        PropertiesError::new(line, "unpaired surrogate in \\u escape")
                    })?);
                }
            }
            other => out.push(other),
        }
    }

    Ok(out)
}

fn hex_unit(line: usize, chars: &[char], pos: usize) -> Result<u32, PropertiesError> {
    let digits = chars
        .get(pos..pos + 4)
        .ok_or_else(|| PropertiesError::new(line, "malformed \\uxxxx encoding"))?;

    digits.iter().try_fold(0u32, |acc, c| {
        c.to_digit(16)
            .map(|d| (acc << 4) | d)
            .ok_or_else(|| PropertiesError::new(line, "malformed \\uxxxx encoding"))
    })
}
