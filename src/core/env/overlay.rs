use std::collections::BTreeMap;

use super::fold_key;

/// Session-local variables that shadow, but never modify, the inherited environment.
///
/// Names compare case-insensitively. The spelling used when a name was first
/// set is kept for display; later assignments only replace the value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EnvOverlay {
    vars: BTreeMap<String, (String, String)>,
}

impl EnvOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: &str, value: &str) {
        self.vars
            .entry(fold_key(name))
            .and_modify(|(_, v)| *v = value.to_string())
            .or_insert_with(|| (name.to_string(), value.to_string()));
    }

    #[cfg(test)]
    pub(crate) fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(&fold_key(name)).map(|(_, v)| v.as_str())
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.vars.len()
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// `(name, value)` pairs ordered by folded name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.values().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
