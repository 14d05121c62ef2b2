//! Runs a [`Format`] against a [`Validator`].

use std::collections::HashMap;
use std::io::BufRead;

use streamcheck_core::{fail, Rejection, Validator};

use crate::format::{Count, Format, Item};

/// Walks format items in order, reading the matching tokens.
#[derive(Default)]
pub struct Interpreter {
    vars: HashMap<String, i64>,
}

impl Interpreter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check a stream against every item of `format`.
    pub fn run<R: BufRead>(
        &mut self,
        format: &Format,
        v: &mut Validator<R>,
    ) -> Result<(), Rejection> {
        self.run_items(&format.items, v)
    }

    /// Value bound to `name`, if any.
    pub fn var(&self, name: &str) -> Option<i64> {
        self.vars.get(name).copied()
    }

    fn run_items<R: BufRead>(
        &mut self,
        items: &[Item],
        v: &mut Validator<R>,
    ) -> Result<(), Rejection> {
        for item in items {
            self.run_item(item, v)?;
        }
        Ok(())
    }

    fn run_item<R: BufRead>(&mut self, item: &Item, v: &mut Validator<R>) -> Result<(), Rejection> {
        match item {
            Item::Space => v.space(),
            Item::Newline => v.newline(),
            Item::Token { label } => {
                v.read_string_labeled(label.as_deref().unwrap_or("string"))?;
                Ok(())
            }
            Item::String { min_len, max_len } => {
                v.read_string_bounded(*min_len, *max_len)?;
                Ok(())
            }
            Item::Literal { value } => v.test_string(value),
            Item::Integer { min, max, bind } => {
                let value = match (min, max) {
                    (None, None) => v.read_integer()?,
                    (low, high) => {
                        v.read_integer_in(low.unwrap_or(i64::MIN), high.unwrap_or(i64::MAX))?
                    }
                };
                if let Some(name) = bind {
                    tracing::trace!(name = %name, value, "bound variable");
                    self.vars.insert(name.clone(), value);
                }
                Ok(())
            }
            Item::Repeat { count, items } => {
                let times = self.resolve_count(count)?;
                for _ in 0..times {
                    self.run_items(items, v)?;
                }
                Ok(())
            }
            Item::Optional { when, items } => {
                // Load-time validation guarantees a single ASCII byte.
                let c = when.as_bytes().first().copied().unwrap_or(b'\0');
                if v.peek(c)? {
                    self.run_items(items, v)?;
                }
                Ok(())
            }
        }
    }

    fn resolve_count(&self, count: &Count) -> Result<u64, Rejection> {
        match count {
            Count::Fixed(n) => Ok(*n),
            Count::Variable(name) => {
                let Some(value) = self.var(name) else {
                    fail!("Repeat count ", name, " is not bound");
                };
                match u64::try_from(value) {
                    Ok(n) => Ok(n),
                    Err(_) => fail!("Repeat count ", name, " is negative: ", value),
                }
            }
        }
    }
}
