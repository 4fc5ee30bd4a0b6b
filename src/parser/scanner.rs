//! Character-level scanning over a window of WHERE-clause text
//!
//! Positions are byte offsets into the full text; the scanner never reads at
//! or past `end`.

use crate::errors::{HaloError, HaloResult};

/// Cursor over `text[pos..end]`
pub(crate) struct Scanner<'a> {
    text: &'a str,
    pos: usize,
    end: usize,
}

fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r' | b'\n')
}

fn is_word(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

fn is_operator(b: u8) -> bool {
    matches!(b, b'!' | b'<' | b'>' | b'=')
}

/// Barewords in value position also admit sign and decimal point
fn is_value(b: u8) -> bool {
    is_word(b) || matches!(b, b'-' | b'+' | b'.')
}

impl<'a> Scanner<'a> {
    pub(crate) fn new(text: &'a str, start: usize, end: usize) -> Self {
        Self {
            text,
            pos: start,
            end,
        }
    }

    pub(crate) fn position(&self) -> usize {
        self.pos
    }

    pub(crate) fn rewind(&mut self, pos: usize) {
        self.pos = pos;
    }

    pub(crate) fn at_end(&self) -> bool {
        self.pos >= self.end
    }

    pub(crate) fn peek(&self) -> Option<u8> {
        if self.at_end() {
            None
        } else {
            Some(self.text.as_bytes()[self.pos])
        }
    }

    pub(crate) fn bump(&mut self) {
        if !self.at_end() {
            self.pos += 1;
        }
    }

    pub(crate) fn skip_spaces(&mut self) {
        while let Some(b) = self.peek() {
            if !is_space(b) {
                break;
            }
            self.pos += 1;
        }
    }

    fn take_while(&mut self, accept: fn(u8) -> bool) -> &'a str {
        self.skip_spaces();
        let start = self.pos;
        while let Some(b) = self.peek() {
            if !accept(b) {
                break;
            }
            self.pos += 1;
        }
        // Accepted bytes are all ASCII, so both ends are char boundaries
        &self.text[start..self.pos]
    }

    /// Maximal run of letters, digits and underscores
    pub(crate) fn word(&mut self) -> &'a str {
        self.take_while(is_word)
    }

    /// Maximal run of comparison operator characters
    pub(crate) fn operator_symbol(&mut self) -> &'a str {
        self.take_while(is_operator)
    }

    /// A quoted string or a bareword
    pub(crate) fn value(&mut self) -> HaloResult<Vec<u8>> {
        self.skip_spaces();
        if self.peek() == Some(b'"') {
            return self.quoted_string().map(String::into_bytes);
        }

        let at = self.pos;
        let bare = self.take_while(is_value);
        if bare.is_empty() {
            return Err(HaloError::bad_sql(format!(
                "Expecting a value at position {}",
                at
            )));
        }
        Ok(bare.as_bytes().to_vec())
    }

    /// Reads a `"`-quoted string starting at the current position
    ///
    /// Supported escapes: `\0 \b \n \r \t \" \\`.
    pub(crate) fn quoted_string(&mut self) -> HaloResult<String> {
        if self.peek() != Some(b'"') {
            return Err(HaloError::bad_sql(format!(
                "Expecting '\"' at position {}",
                self.pos
            )));
        }
        let body_start = self.pos + 1;

        let mut out = String::new();
        let mut escaped = false;
        for (offset, ch) in self.text[body_start..self.end].char_indices() {
            if escaped {
                escaped = false;
                match ch {
                    '0' => out.push('\0'),
                    'b' => out.push('\u{0008}'),
                    'n' => out.push('\n'),
                    'r' => out.push('\r'),
                    't' => out.push('\t'),
                    '"' => out.push('"'),
                    '\\' => out.push('\\'),
                    other => {
                        return Err(HaloError::bad_sql(format!(
                            "Unsupported escape character [\\{}]",
                            other
                        )))
                    }
                }
                continue;
            }

            match ch {
                '\\' => escaped = true,
                '"' => {
                    self.pos = body_start + offset + 1;
                    return Ok(out);
                }
                other => out.push(other),
            }
        }

        Err(HaloError::bad_sql("Unexpected end of quoted string"))
    }
}
