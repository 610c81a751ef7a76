use colored::*;
use std::collections::HashMap;
use thiserror::Error;

use super::values::RuntimeVal;

#[derive(Error, Debug, PartialEq)]
pub enum EnvError {
    #[error("{} undefined variable: -{0}-. Variables must be assigned before being read.", "Error".red().bold())]
    UndefinedVariable(String),
}

// One flat namespace for the whole run: blocks and loop bodies read and
// write the same variables as the top level.
#[derive(Debug, PartialEq, Default)]
pub struct Env {
    vars: HashMap<String, RuntimeVal>,
}

impl Env {
    pub fn new() -> Self {
        Self {
            vars: HashMap::new(),
        }
    }

    pub fn lookup_var(&self, var: &str) -> Result<&RuntimeVal, EnvError> {
        self.vars
            .get(var)
            .ok_or_else(|| EnvError::UndefinedVariable(var.to_string()))
    }

    // Creates the variable or overwrites it, whatever its previous type
    pub fn assign_var(&mut self, var: String, value: RuntimeVal) {
        self.vars.insert(var, value);
    }

    pub fn contains(&self, var: &str) -> bool {
        self.vars.contains_key(var)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}
