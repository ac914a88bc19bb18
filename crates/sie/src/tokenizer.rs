//! Line tokenizer for SIE's positional fields.
//!
//! Fields are whitespace-separated. A double-quoted field is atomic (it may
//! contain whitespace; `\"` escapes a quote, `\\` a backslash). A `{...}`
//! object list is a single token, kept with its braces.

use crate::error::SieError;

pub(crate) fn tokenize(line: &str, line_no: usize) -> Result<Vec<String>, SieError> {
    let mut tokens = Vec::new();
    let mut chars = line.chars().peekable();

    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }

        if c == '"' {
            chars.next();
            let mut field = String::new();
            let mut closed = false;
            while let Some(ch) = chars.next() {
                match ch {
                    '\\' => match chars.next() {
                        Some(escaped) => field.push(escaped),
                        None => break,
                    },
                    '"' => {
                        closed = true;
                        break;
                    }
                    _ => field.push(ch),
                }
            }
            if !closed {
                return Err(SieError::malformed(line_no, "unterminated quoted field"));
            }
            tokens.push(field);
            continue;
        }

        if c == '{' {
            let mut field = String::new();
            let mut closed = false;
            for ch in chars.by_ref() {
                field.push(ch);
                if ch == '}' {
                    closed = true;
                    break;
                }
            }
            if !closed {
                return Err(SieError::malformed(line_no, "unterminated object list"));
            }
            tokens.push(field);
            continue;
        }

        let mut field = String::new();
        while let Some(&ch) = chars.peek() {
            if ch.is_whitespace() || ch == '"' || ch == '{' {
                break;
            }
            field.push(ch);
            chars.next();
        }
        tokens.push(field);
    }

    Ok(tokens)
}
