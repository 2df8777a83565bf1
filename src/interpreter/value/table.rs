use std::{cell::RefCell, collections::HashMap, mem, rc::Rc};

use ordered_float::OrderedFloat;

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::EvalResult,
        value::{
            core::Value,
            kind::ValueKind,
            teardown::{Garbage, release},
        },
    },
    util::num::f64_to_i64_exact,
};

/// Shared handle to a table. Tables are bound by sharing, so every name and
/// slot holding the same table sees the same entries.
pub type TableRef = Rc<RefCell<Table>>;

/// Hashable projection of a value used as a table key.
///
/// Two keys are equal exactly when the values they were made from are equal
/// under the language's `==`: numbers compare numerically (an integral real
/// becomes an integer key), strings by their characters and functions by
/// identity. Tables cannot be keys.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TableKey {
    /// `null`
    Null,
    /// A boolean such as `true`.
    Bool(bool),
    /// An integer, or a real with an integral value.
    Integer(i64),
    /// A real with a fractional part.
    Real(OrderedFloat<f64>),
    /// A string's characters at insertion time.
    String(String),
    /// The identity of a function body.
    Function(usize),
    /// A type.
    Type(ValueKind),
}

impl TableKey {
    /// Projects `value` onto a key.
    ///
    /// # Errors
    /// Returns `RuntimeError::UnhashableKey` if `value` is a table.
    pub fn from_value(value: &Value, line: usize) -> EvalResult<Self> {
        Ok(match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(*b),
            Value::Integer(n) => Self::Integer(*n),
            Value::Real(r) => f64_to_i64_exact(*r).map_or(Self::Real(OrderedFloat(*r)), Self::Integer),
            Value::String(s) => Self::String(s.borrow().iter().collect()),
            Value::Function(f) => Self::Function(f.identity()),
            Value::Type(kind) => Self::Type(*kind),
            Value::Table(_) => return Err(RuntimeError::UnhashableKey { line }),
        })
    }
}

/// A mutable mapping from values to values.
///
/// Entries are kept in insertion order, which is the order used when a table
/// is rendered as a string. Lookups go through a hashed index on
/// [`TableKey`].
#[derive(Debug, Default)]
pub struct Table {
    entries: Vec<(Value, Value)>,
    index:   HashMap<TableKey, usize>,
}

impl Table {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps `self` in a shared handle.
    #[must_use]
    pub fn into_ref(self) -> TableRef {
        Rc::new(RefCell::new(self))
    }

    /// The number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Looks up `key`, returning a handle to the stored value.
    ///
    /// # Errors
    /// Returns `RuntimeError::UnhashableKey` if `key` is a table.
    pub fn get(&self, key: &Value, line: usize) -> EvalResult<Option<Value>> {
        let key = TableKey::from_value(key, line)?;
        Ok(self.index.get(&key).map(|&i| self.entries[i].1.clone()))
    }

    /// Inserts or replaces the entry for `key`.
    ///
    /// Key and value are stored with binding semantics: strings and numbers
    /// are copied, tables and functions shared. Replacing an entry keeps its
    /// original position.
    ///
    /// # Errors
    /// Returns `RuntimeError::UnhashableKey` if `key` is a table.
    pub fn insert(&mut self, key: &Value, value: &Value, line: usize) -> EvalResult<()> {
        let hashed = TableKey::from_value(key, line)?;
        let value = value.for_binding();

        if let Some(&i) = self.index.get(&hashed) {
            self.entries[i].1 = value;
        } else {
            self.index.insert(hashed, self.entries.len());
            self.entries.push((key.for_binding(), value));
        }
        Ok(())
    }

    /// Removes the entry for `key`, returning its value if it existed.
    ///
    /// # Errors
    /// Returns `RuntimeError::UnhashableKey` if `key` is a table.
    pub fn remove(&mut self, key: &Value, line: usize) -> EvalResult<Option<Value>> {
        let hashed = TableKey::from_value(key, line)?;
        let Some(position) = self.index.remove(&hashed) else {
            return Ok(None);
        };

        let (_, value) = self.entries.remove(position);
        for slot in self.index.values_mut() {
            if *slot > position {
                *slot -= 1;
            }
        }
        Ok(Some(value))
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
    }

    /// Structural equality: same size, and every key maps to equal values in
    /// both tables. `depth` counts the tables already entered.
    ///
    /// # Errors
    /// Returns `RuntimeError::StackOverflow` if nested tables go too deep.
    pub(crate) fn same_entries(&self, other: &Self, depth: usize, line: usize) -> EvalResult<bool> {
        if self.len() != other.len() {
            return Ok(false);
        }
        for (key, &i) in &self.index {
            let Some(&j) = other.index.get(key) else {
                return Ok(false);
            };
            if !self.entries[i].1.equals_at(&other.entries[j].1, depth, line)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Iterates over the entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &(Value, Value)> {
        self.entries.iter()
    }

    /// Moves every entry out, leaving the table empty.
    pub(crate) fn take_entries(&mut self) -> Vec<(Value, Value)> {
        self.index.clear();
        mem::take(&mut self.entries)
    }
}

impl Drop for Table {
    /// A long chain of tables, each holding the next, is freed without one
    /// native stack frame per link.
    fn drop(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        release(self.take_entries()
                    .into_iter()
                    .flat_map(|(key, value)| [key, value])
                    .map(Garbage::Value)
                    .collect());
    }
}
