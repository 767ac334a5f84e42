use crate::error::Result;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::marker::PhantomData;
use std::path::Path;

/// Entry of a line based file, one entry per line.
pub trait IndexedEntry: Sized {
    fn from_str(s: &str, ix: usize) -> Result<Self>;
}

pub struct IndexedReader<T: IndexedEntry> {
    num_read: usize,
    reader: BufReader<File>,
    buffer: String,
    _phantom: PhantomData<T>,
}

impl<T: IndexedEntry> IndexedReader<T> {
    pub fn num_lines(path: &Path) -> Result<usize> {
        let mut reader = IndexedReader::<T>::new(path)?;
        while reader.next_entry()?.is_some() {}
        Ok(reader.num_read)
    }

    pub fn new(path: &Path) -> Result<Self> {
        Ok(Self {
            num_read: 0,
            reader: BufReader::new(File::open(path)?),
            buffer: String::new(),
            _phantom: PhantomData,
        })
    }

    /// Next entry, blank lines are skipped.
    pub fn next_entry(&mut self) -> Result<Option<T>> {
        loop {
            self.buffer.clear();
            if self.reader.read_line(&mut self.buffer)? == 0 {
                return Ok(None);
            }
            if !self.buffer.trim().is_empty() {
                break;
            }
        }
        self.num_read += 1;
        T::from_str(&self.buffer, self.last_entry_ix()).map(Some)
    }

    pub fn last_entry_ix(&self) -> usize {
        self.num_read - 1
    }
}

impl<T: IndexedEntry> Iterator for IndexedReader<T> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_entry().transpose()
    }
}
