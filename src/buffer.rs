//! Per-component accumulation of generated markdown.

use std::collections::HashMap;

/// Grouping key → ordered fragments.
///
/// Keys iterate in first-insertion order and fragments in arrival order, so
/// output is stable for a given input tree.
#[derive(Debug, Default)]
pub struct FragmentBuffer {
    index: HashMap<String, usize>,
    entries: Vec<(String, Vec<String>)>,
}

impl FragmentBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a fragment under `key`, creating the entry on first use.
    pub fn push(&mut self, key: &str, fragment: String) {
        match self.index.get(key) {
            Some(&i) => self.entries[i].1.push(fragment),
            None => {
                self.index.insert(key.to_string(), self.entries.len());
                self.entries.push((key.to_string(), vec![fragment]));
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.index.get(key).map(|&i| self.entries[i].1.as_slice())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Fragments for `key` joined by a single newline.
    pub fn joined(&self, key: &str) -> Option<String> {
        self.get(key).map(|fragments| fragments.join("\n"))
    }
}
