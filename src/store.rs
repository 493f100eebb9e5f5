//! Compressed results, keyed by file name.

use crate::data_url::DataUrl;
use crate::utils::calculate_compression_ratio;
use std::collections::HashMap;

/// Outcome of recompressing one input file
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRecord {
    pub file_name: String,
    pub original_url: DataUrl,
    pub original_size: u64,
    pub compressed_url: DataUrl,
    pub compressed_size: u64,
    /// Media type the compressed bytes were written as
    pub media_type: String,
    pub width: u32,
    pub height: u32,
}

impl ResultRecord {
    /// Whole-percent size reduction, as shown on a result card ("N% smaller").
    pub fn savings_percent(&self) -> i64 {
        calculate_compression_ratio(self.original_size, self.compressed_size).round() as i64
    }
}

/// Insertion-ordered map from file name to its latest [`ResultRecord`].
///
/// Holds at most one record per file name. Re-inserting a name replaces the
/// record but keeps its original position.
#[derive(Debug, Clone, Default)]
pub struct ResultStore {
    generation: u64,
    records: Vec<ResultRecord>,
    index: HashMap<String, usize>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty store owned by the batch with the given generation.
    pub fn for_generation(generation: u64) -> Self {
        Self {
            generation,
            ..Self::default()
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Insert or replace by file name. Returns the record that was replaced.
    pub fn insert(&mut self, record: ResultRecord) -> Option<ResultRecord> {
        match self.index.get(&record.file_name) {
            Some(&pos) => Some(std::mem::replace(&mut self.records[pos], record)),
            None => {
                self.index.insert(record.file_name.clone(), self.records.len());
                self.records.push(record);
                None
            }
        }
    }

    pub fn get(&self, file_name: &str) -> Option<&ResultRecord> {
        self.index.get(file_name).map(|&pos| &self.records[pos])
    }

    pub fn contains(&self, file_name: &str) -> bool {
        self.index.contains_key(file_name)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResultRecord> {
        self.records.iter()
    }

    pub fn file_names(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.file_name.as_str()).collect()
    }

    pub fn total_original_size(&self) -> u64 {
        self.records.iter().map(|r| r.original_size).sum()
    }

    pub fn total_compressed_size(&self) -> u64 {
        self.records.iter().map(|r| r.compressed_size).sum()
    }
}

impl<'a> IntoIterator for &'a ResultStore {
    type Item = &'a ResultRecord;
    type IntoIter = std::slice::Iter<'a, ResultRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
