use std::collections::HashMap;

/// Index of a chromosome within its [`ChromosomeRegistry`].
///
/// Ids are only handed out by the registry, so a record holding a `ChromId`
/// always refers to a registered chromosome. The ordering of ids follows the
/// order of the length file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChromId(usize);

impl ChromId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChromosomeEntry {
    pub name: String,
    /// Unpadded length as read from the length file.
    pub raw_length: u64,
    /// Display length, `raw_length * padding_factor`.
    pub length: f64,
}

#[derive(Debug, Clone, Default)]
pub struct ChromosomeRegistry {
    entries: Vec<ChromosomeEntry>,
    index: HashMap<String, ChromId>,
}

impl ChromosomeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a chromosome, returning the id it was assigned.
    ///
    /// Returns the id of the existing entry as the error if the (already
    /// normalized) name is taken; the registry is left unchanged in that case.
    pub fn push(&mut self, entry: ChromosomeEntry) -> std::result::Result<ChromId, ChromId> {
        if let Some(&existing) = self.index.get(&entry.name) {
            return Err(existing);
        }
        let id = ChromId(self.entries.len());
        self.index.insert(entry.name.clone(), id);
        self.entries.push(entry);
        Ok(id)
    }

    pub fn id_of(&self, name: &str) -> Option<ChromId> {
        self.index.get(name).copied()
    }

    pub fn get(&self, id: ChromId) -> &ChromosomeEntry {
        &self.entries[id.0]
    }

    pub fn name(&self, id: ChromId) -> &str {
        &self.entries[id.0].name
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ChromId, &ChromosomeEntry)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, entry)| (ChromId(i), entry))
    }

    pub fn total_length(&self) -> f64 {
        self.entries.iter().map(|entry| entry.length).sum()
    }

    pub fn max_length(&self) -> f64 {
        self.entries
            .iter()
            .map(|entry| entry.length)
            .fold(0.0, f64::max)
    }
}
