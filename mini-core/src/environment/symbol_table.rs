use std::collections::HashMap;
use std::fmt::Display;

use crate::eval::prelude::RuntimeErrorType;

use super::prelude::Value;

/// Identifiers and literal constants of a single run.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct SymbolTable {
    identifiers: HashMap<String, Value>,
    constants: HashMap<String, i64>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self {
            identifiers: HashMap::new(),
            constants: HashMap::new()
        }
    }

    /// Registers a lexed identifier as undefined unless it is already known.
    pub fn record_identifier(&mut self, name: &str) {
        if !self.identifiers.contains_key(name) {
            self.identifiers.insert(name.to_string(), Value::Undefined);
        }
    }

    /// Registers a lexed literal. The first value recorded for `text` is kept.
    pub fn record_constant(&mut self, text: &str, value: i64) {
        if !self.constants.contains_key(text) {
            self.constants.insert(text.to_string(), value);
        }
    }

    /// Sets `name` to 0, returning `true` if it had already been declared.
    pub fn declare(&mut self, name: &str) -> bool {
        let previous = self.identifiers.insert(name.to_string(), Value::Integer { value: 0 });

        previous.is_some_and(|value| value.is_defined())
    }

    pub fn get(&self, name: &str) -> Result<i64, RuntimeErrorType> {
        self.identifiers.get(name)
            .and_then(Value::as_integer)
            .ok_or_else(|| RuntimeErrorType::UndeclaredVariable { name: name.to_string() })
    }

    pub fn set(&mut self, name: &str, value: i64) {
        match self.identifiers.get_mut(name) {
            Some(var) => *var = Value::Integer { value },
            None => {
                self.identifiers.insert(name.to_string(), Value::Integer { value });
            }
        }
    }

    pub fn is_defined(&self, name: &str) -> bool {
        self.identifiers.get(name).is_some_and(Value::is_defined)
    }

    pub fn identifier(&self, name: &str) -> Option<&Value> {
        self.identifiers.get(name)
    }

    pub fn constant(&self, text: &str) -> Option<i64> {
        self.constants.get(text).copied()
    }

    pub fn identifiers(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.identifiers.iter()
    }

    pub fn constants(&self) -> impl Iterator<Item = (&String, &i64)> {
        self.constants.iter()
    }

    /// Identifiers holding a value, without the ones that were only lexed.
    pub fn defined(&self) -> HashMap<String, i64> {
        self.identifiers.iter()
            .filter_map(|(name, value)| value.as_integer().map(|value| (name.clone(), value)))
            .collect()
    }
}

impl Display for SymbolTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut identifiers = self.identifiers.iter().collect::<Vec<_>>();
        identifiers.sort_by(|a, b| a.0.cmp(b.0));

        let mut constants = self.constants.iter().collect::<Vec<_>>();
        constants.sort_by(|a, b| a.1.cmp(b.1).then_with(|| a.0.cmp(b.0)));

        writeln!(f, "Identifiers:")?;
        for (name, value) in identifiers {
            writeln!(f, "    {name} = {value}")?;
        }

        writeln!(f, "Constants:")?;
        for (text, value) in constants {
            writeln!(f, "    {text} = {value}")?;
        }

        Ok(())
    }
}
