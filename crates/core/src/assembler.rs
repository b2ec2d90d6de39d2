//! Master sequence assembly.

use crate::record::MasterRecord;

/// The reconciled output, grown one placement at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MasterSequence {
    records: Vec<MasterRecord>,
}

impl MasterSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Vec::with_capacity(capacity),
        }
    }

    /// Add a record after everything placed so far.
    pub fn append(&mut self, record: MasterRecord) {
        self.records.push(record);
    }

    /// Insert a record at `index`, shifting later records back.
    ///
    /// `index` must not exceed [`len`](Self::len).
    pub fn insert_at(&mut self, index: usize, record: MasterRecord) {
        self.records.insert(index, record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MasterRecord> {
        self.records.iter()
    }

    pub fn records(&self) -> &[MasterRecord] {
        &self.records
    }
}

impl<'a> IntoIterator for &'a MasterSequence {
    type Item = &'a MasterRecord;
    type IntoIter = std::slice::Iter<'a, MasterRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(log_id: &str) -> MasterRecord {
        MasterRecord {
            log_id: log_id.into(),
            ..Default::default()
        }
    }

    #[test]
    fn append_and_insert() {
        let mut seq = MasterSequence::new();
        assert!(seq.is_empty());

        seq.append(record("a"));
        seq.append(record("c"));
        seq.insert_at(1, record("b"));
        seq.insert_at(3, record("d"));

        let ids: Vec<&str> = seq.iter().map(|r| r.log_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c", "d"]);
        assert_eq!(seq.len(), 4);
    }
}
