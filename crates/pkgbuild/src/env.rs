// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Variable environments used to resolve references inside values.
//!
//! The document never reads the host environment itself. Callers that want
//! host variables visible seed a [`MapEnviron`] and pass it in.

use indexmap::IndexMap;

use crate::error::ScanError;
use crate::node::{ValueElement, ValueFormatter};

/// The value of a shell variable.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Variable {
    #[default]
    Unset,
    String(String),
    Indexed(Vec<String>),
}

impl Variable {
    pub fn is_set(&self) -> bool {
        !matches!(self, Self::Unset)
    }

    /// The scalar view: a string itself, the first element of an array.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Unset => "",
            Self::String(s) => s,
            Self::Indexed(values) => values.first().map(String::as_str).unwrap_or(""),
        }
    }

    /// The list view: a string is a one-element list.
    pub fn values(&self) -> Vec<String> {
        match self {
            Self::Unset => Vec::new(),
            Self::String(s) => vec![s.clone()],
            Self::Indexed(values) => values.clone(),
        }
    }

    /// Unset, an empty string or an empty array.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Unset => true,
            Self::String(s) => s.is_empty(),
            Self::Indexed(values) => values.is_empty(),
        }
    }
}

/// A source and sink of variables.
pub trait Environ {
    /// Look up a variable; missing names are [`Variable::Unset`].
    fn get(&self, name: &str) -> Variable;

    fn set(&mut self, name: &str, value: Variable);

    /// Visit every set variable until the callback returns `false`.
    fn each(&self, f: &mut dyn FnMut(&str, &Variable) -> bool);
}

/// In-memory environment preserving insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MapEnviron {
    vars: IndexMap<String, Variable>,
}

impl MapEnviron {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, value: Variable) -> Self {
        self.set(name, value);
        self
    }

    /// Borrowing lookup; missing names are `None` rather than unset.
    pub fn lookup(&self, name: &str) -> Option<&Variable> {
        self.vars.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl Environ for MapEnviron {
    fn get(&self, name: &str) -> Variable {
        self.vars.get(name).cloned().unwrap_or_default()
    }

    fn set(&mut self, name: &str, value: Variable) {
        if value.is_set() {
            self.vars.insert(name.to_string(), value);
        } else {
            self.vars.shift_remove(name);
        }
    }

    fn each(&self, f: &mut dyn FnMut(&str, &Variable) -> bool) {
        for (name, value) in &self.vars {
            if !f(name, value) {
                break;
            }
        }
    }
}

/// Expand a raw shell word into a single string.
pub fn literal(env: &dyn Environ, word: &str) -> Result<String, ScanError> {
    Ok(ValueFormatter::from_word(word)?.resolve(env))
}

/// Expand raw shell words into fields.
///
/// A word made of one unquoted reference to an array contributes every
/// element of the array; any other word yields exactly one field.
pub fn fields(env: &dyn Environ, words: &[&str]) -> Result<Vec<String>, ScanError> {
    let mut out = Vec::new();
    for word in words {
        let value = ValueFormatter::from_word(word)?;
        expand_into(env, word, &value, &mut out);
    }
    Ok(out)
}

/// Expand one already split word, as [`fields`] does.
pub(crate) fn expand_into(env: &dyn Environ, raw: &str, value: &ValueFormatter, out: &mut Vec<String>) {
    if let [ValueElement::Reference(name)] = value.elements() {
        if !raw.starts_with('"') {
            if let Variable::Indexed(values) = env.get(name) {
                out.extend(values);
                return;
            }
        }
    }
    out.push(value.resolve(env));
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
