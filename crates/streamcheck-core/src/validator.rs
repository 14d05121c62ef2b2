//! The token-reading engine.
//!
//! A [`Validator`] wraps one buffered input stream and a [`Policy`]. Every
//! read either yields a value or a [`Rejection`]; callers propagate the
//! rejection with `?` so the first one ends the run and nothing else is read.
//!
//! In lenient mode whitespace runs are separators and are skipped before each
//! token. In whitespace-sensitive mode nothing is skipped: every space and
//! newline must be consumed with [`Validator::space`] or
//! [`Validator::newline`].

use std::io::{self, BufRead};

use crate::error::Rejection;
use crate::policy::Policy;
use crate::token::{self, is_space, quote};

/// Stateful reader that checks a stream against a client's expectations.
///
/// Pass `&mut reader` to keep ownership of the stream with the caller.
pub struct Validator<R> {
    input: R,
    policy: Policy,
}

impl<R: BufRead> Validator<R> {
    /// Bind a validator to an input stream.
    pub fn new(input: R, policy: Policy) -> Self {
        Self { input, policy }
    }

    /// The policy this validator was built with.
    pub fn policy(&self) -> Policy {
        self.policy
    }

    /// Look at the next byte without consuming it.
    fn peek_byte(&mut self) -> io::Result<Option<u8>> {
        loop {
            match self.input.fill_buf() {
                Ok(buf) => return Ok(buf.first().copied()),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }

    /// Consume and return the next byte.
    fn next_byte(&mut self) -> io::Result<Option<u8>> {
        let b = self.peek_byte()?;
        if b.is_some() {
            self.input.consume(1);
        }
        Ok(b)
    }

    fn skip_whitespace(&mut self) -> io::Result<()> {
        while let Some(b) = self.peek_byte()? {
            if !is_space(b) {
                break;
            }
            self.input.consume(1);
        }
        Ok(())
    }

    fn expect_byte(&mut self, wanted: u8, name: &str) -> Result<(), Rejection> {
        if self.policy.whitespace_sensitive {
            match self.next_byte()? {
                Some(b) if b == wanted => {}
                Some(b) => return Err(Rejection::expected(name, quote(b))),
                None => return Err(Rejection::expected(name, "EOF")),
            }
        }
        tracing::debug!("read {}", name);
        Ok(())
    }

    /// Consume one space. A no-op in lenient mode.
    pub fn space(&mut self) -> Result<(), Rejection> {
        self.expect_byte(b' ', "space")
    }

    /// Consume one newline. A no-op in lenient mode.
    pub fn newline(&mut self) -> Result<(), Rejection> {
        self.expect_byte(b'\n', "newline")
    }

    /// Read one whitespace-delimited token.
    pub fn read_string(&mut self) -> Result<String, Rejection> {
        self.read_string_labeled("string")
    }

    /// Read one token, naming it `label` in diagnostics.
    pub fn read_string_labeled(&mut self, label: &str) -> Result<String, Rejection> {
        let bytes = self.read_token_bytes(label)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Read one token as the raw bytes found in the stream.
    ///
    /// Unlike [`Validator::read_string`] nothing is decoded, so tokens that
    /// are not valid UTF-8 come back unchanged.
    pub fn read_token_bytes(&mut self, label: &str) -> Result<Vec<u8>, Rejection> {
        if self.policy.whitespace_sensitive {
            if matches!(self.peek_byte()?, Some(b) if is_space(b)) {
                return Err(Rejection::Whitespace {
                    expected: label.to_string(),
                });
            }
        } else {
            self.skip_whitespace()?;
        }

        let mut bytes = Vec::new();
        while let Some(b) = self.peek_byte()? {
            if is_space(b) {
                break;
            }
            bytes.push(b);
            self.input.consume(1);
        }

        if bytes.is_empty() {
            return Err(Rejection::Missing {
                expected: label.to_string(),
            });
        }

        tracing::debug!(token = %String::from_utf8_lossy(&bytes), "read token");
        Ok(bytes)
    }

    /// Read a token whose byte length lies in `[min, max]`.
    ///
    /// The length is measured on the raw bytes, before any decoding.
    pub fn read_string_bounded(&mut self, min: usize, max: usize) -> Result<String, Rejection> {
        let bytes = self.read_token_bytes("string")?;
        let s = String::from_utf8_lossy(&bytes).into_owned();
        if bytes.len() < min || bytes.len() > max {
            return Err(Rejection::Mismatch {
                expected: format!("string of length between {} and {}", min, max),
                found: s,
            });
        }
        Ok(s)
    }

    /// Read a token and require it to equal `expected` byte for byte.
    ///
    /// ASCII case is ignored unless the policy is case-sensitive.
    pub fn test_string(&mut self, expected: &str) -> Result<(), Rejection> {
        let bytes = self.read_token_bytes("string")?;
        let matches = if self.policy.case_sensitive {
            bytes == expected.as_bytes()
        } else {
            bytes.eq_ignore_ascii_case(expected.as_bytes())
        };
        if !matches {
            return Err(Rejection::Mismatch {
                expected: expected.to_string(),
                found: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }
        Ok(())
    }

    /// Read a 64-bit signed integer.
    pub fn read_integer(&mut self) -> Result<i64, Rejection> {
        let s = self.read_string_labeled("integer")?;
        token::check_integer_shape(&s)?;
        token::parse_integer(&s)
    }

    /// Read a 64-bit signed integer in `[low, high]`.
    pub fn read_integer_in(&mut self, low: i64, high: i64) -> Result<i64, Rejection> {
        let v = self.read_integer()?;
        if v < low || v > high {
            return Err(Rejection::Mismatch {
                expected: format!("integer between {} and {}", low, high),
                found: v.to_string(),
            });
        }
        Ok(v)
    }

    /// Test whether the next byte is `c` without consuming it.
    ///
    /// Lenient mode skips whitespace first. Returns false at end of stream.
    pub fn peek(&mut self, c: u8) -> Result<bool, Rejection> {
        if !self.policy.whitespace_sensitive {
            self.skip_whitespace()?;
        }
        Ok(self.peek_byte()? == Some(c))
    }

    /// Check that nothing but (in lenient mode) whitespace remains.
    ///
    /// Must be called once after the last expected token; [`crate::validate`]
    /// does this for you.
    pub fn finish(mut self) -> Result<(), Rejection> {
        if !self.policy.whitespace_sensitive {
            self.skip_whitespace()?;
        }
        match self.next_byte()? {
            None => Ok(()),
            Some(b) => Err(Rejection::TrailingContent { found: quote(b) }),
        }
    }
}
