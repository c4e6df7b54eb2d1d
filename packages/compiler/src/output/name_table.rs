//! Name Table
//!
//! The `names` array of a source map: distinct symbol names, sorted so the
//! index of every name is independent of the order names were encountered.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NameTable {
    names: Vec<String>,
}

impl NameTable {
    /// Builds the table from any collection of names, sorting and
    /// deduplicating them.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut names: Vec<String> = names.into_iter().map(Into::into).collect();
        names.sort();
        names.dedup();
        NameTable { names }
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names
            .binary_search_by(|entry| entry.as_str().cmp(name))
            .ok()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.names
    }

    pub fn into_vec(self) -> Vec<String> {
        self.names
    }
}
