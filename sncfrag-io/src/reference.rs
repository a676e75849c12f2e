use std::collections::HashMap;
use std::path::Path;

use log::debug;
use noodles::fasta;

use sncfrag_core::models::Region;
use sncfrag_core::utils::get_dynamic_reader;

use crate::error::ReferenceError;

///
/// Reference sequences of the regions, loaded from a (possibly gzipped) FASTA file and keyed
/// by entry name. Used to attach the sequence of each predicted fragment to the output.
///
#[derive(Debug, Clone, Default)]
pub struct ReferenceSequences {
    sequences: HashMap<String, Vec<u8>>,
}

impl ReferenceSequences {
    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.sequences.contains_key(name)
    }

    pub fn insert(&mut self, name: &str, sequence: &[u8]) {
        self.sequences.insert(name.to_owned(), sequence.to_vec());
    }

    ///
    /// Sequence of `[start, stop]` (0-based inclusive) on entry `name`.
    ///
    /// `None` when the entry is unknown or shorter than `stop + 1`.
    pub fn subsequence(&self, name: &str, start: u32, stop: u32) -> Option<String> {
        let sequence = self.sequences.get(name)?;
        let bases = sequence.get(start as usize..=stop as usize)?;
        Some(String::from_utf8_lossy(bases).into_owned())
    }

    /// Regions whose contig has no entry in the reference
    pub fn missing<'a, I>(&self, regions: I) -> Vec<&'a Region>
    where
        I: IntoIterator<Item = &'a Region>,
    {
        regions
            .into_iter()
            .filter(|region| !self.contains(&region.chr))
            .collect()
    }
}

impl TryFrom<&Path> for ReferenceSequences {
    type Error = ReferenceError;

    fn try_from(value: &Path) -> Result<Self, Self::Error> {
        let reader = get_dynamic_reader(value)
            .map_err(|e| ReferenceError::MissingFile(format!("{:#}", e)))?;
        let mut fa_in = fasta::io::Reader::new(reader);

        let mut reference = ReferenceSequences::default();
        for result in fa_in.records() {
            let record = result?;
            let name = String::from_utf8_lossy(record.name()).into_owned();
            if reference.contains(&name) {
                return Err(ReferenceError::DuplicateEntry(name));
            }
            reference.insert(&name, record.sequence().as_ref());
        }

        debug!("Loaded {} reference sequences from {}", reference.len(), value.display());
        Ok(reference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;
    use std::io::Write;

    #[fixture]
    fn reference() -> ReferenceSequences {
        ReferenceSequences::try_from(Path::new("../tests/data/reference.fa")).unwrap()
    }

    #[rstest]
    fn test_load_fasta(reference: ReferenceSequences) {
        assert_eq!(reference.len(), 3);
        assert!(reference.contains("MIR-TEST"));
        assert!(!reference.contains("MIR-TEST precursor"));
    }

    #[rstest]
    fn test_subsequence_is_inclusive(reference: ReferenceSequences) {
        assert_eq!(reference.subsequence("MIR-TEST", 0, 3).as_deref(), Some("ACGT"));
        assert_eq!(reference.subsequence("MIR-TEST", 5, 15).map(|s| s.len()), Some(11));
        assert_eq!(reference.subsequence("MIR-TEST", 50, 60), None);
        assert_eq!(reference.subsequence("unknown", 0, 3), None);
    }

    #[rstest]
    fn test_missing_regions(reference: ReferenceSequences) {
        let regions = vec![Region::new("MIR-TEST", 0, 59), Region::new("chrZ", 0, 10)];
        let missing = reference.missing(&regions);
        assert_eq!(missing.len(), 1);
        assert_eq!(missing[0].chr, "chrZ");
    }

    #[rstest]
    fn test_duplicate_entry_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, ">a\nACGT\n>a\nTTTT").unwrap();
        file.flush().unwrap();

        let result = ReferenceSequences::try_from(file.path());
        assert!(matches!(result, Err(ReferenceError::DuplicateEntry(_))));
    }
}
