use std::collections::HashMap;

use sncfrag_core::models::{ReadInterval, Region};
use sncfrag_core::{ReadSource, ReadSourceError};

///
/// Reads held in memory, keyed by contig. Handy for tests and for reads that come from
/// somewhere other than a file.
///
#[derive(Debug, Clone, Default)]
pub struct MemoryReadSource {
    reads: HashMap<String, Vec<ReadInterval>>,
}

impl MemoryReadSource {
    pub fn new() -> MemoryReadSource {
        MemoryReadSource::default()
    }

    pub fn insert(&mut self, chr: &str, read: ReadInterval) {
        self.reads.entry(chr.to_owned()).or_default().push(read);
    }

    pub fn with_reads(mut self, chr: &str, reads: impl IntoIterator<Item = ReadInterval>) -> MemoryReadSource {
        self.reads.entry(chr.to_owned()).or_default().extend(reads);
        self
    }
}

impl ReadSource for MemoryReadSource {
    fn fetch(&self, region: &Region) -> Result<Vec<ReadInterval>, ReadSourceError> {
        Ok(self
            .reads
            .get(&region.chr)
            .map(|reads| {
                reads
                    .iter()
                    .filter(|r| region.touches(r.start, r.stop))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    fn test_fetch_only_touching_reads() {
        let source = MemoryReadSource::new().with_reads(
            "chr1",
            vec![ReadInterval::new(0, 9), ReadInterval::new(10, 20), ReadInterval::new(25, 30)],
        );

        let reads = source.fetch(&Region::new("chr1", 15, 24)).unwrap();
        assert_eq!(reads, vec![ReadInterval::new(10, 20)]);
        assert!(source.fetch(&Region::new("chr2", 0, 100)).unwrap().is_empty());
    }
}
