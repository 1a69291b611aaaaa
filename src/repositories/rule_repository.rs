use std::{collections::HashMap, fmt};

use crate::{types::validations::RuleFn, validations::builtin_rules};

/// Named rule implementations available to the engine.
#[derive(Clone, Default)]
pub struct RuleRepository {
    rules: HashMap<String, RuleFn>,
}

impl RuleRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_builtins() -> Self {
        let mut repository = Self::new();
        for (name, rule) in builtin_rules() {
            repository.register(name, rule);
        }
        repository
    }

    /// Adds or replaces a rule.
    pub fn register(&mut self, name: impl Into<String>, rule: RuleFn) {
        let name = name.into();
        if self.rules.insert(name.clone(), rule).is_some() {
            log::debug!("Replaced validation rule '{name}'");
        }
    }

    pub fn get(&self, name: &str) -> Option<&RuleFn> {
        self.rules.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.rules.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for RuleRepository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleRepository")
            .field("rules", &self.names())
            .finish()
    }
}
