use std::collections::HashMap;
use std::io::BufRead;
use std::path::Path;

use log::debug;

use sncfrag_core::models::{ReadInterval, Region};
use sncfrag_core::utils::get_dynamic_reader_w_stdin;
use sncfrag_core::{ReadSource, ReadSourceError};

fn parse_bed_read(line: &str) -> Result<(String, ReadInterval), ReadSourceError> {
    let parts: Vec<&str> = line.split('\t').collect();
    if parts.len() < 3 {
        return Err(ReadSourceError::MalformedRecord(format!(
            "expected at least 3 columns (chr, start, end): {}",
            line
        )));
    }

    let parse = |field: &str| {
        field
            .trim()
            .parse::<u32>()
            .map_err(|_| ReadSourceError::MalformedRecord(format!("invalid number '{}': {}", field, line)))
    };

    let start = parse(parts[1])?;
    let end = parse(parts[2])?;
    if end <= start {
        return Err(ReadSourceError::MalformedRecord(format!(
            "empty or inverted interval: {}",
            line
        )));
    }

    // BED is half-open
    let mut read = ReadInterval::new(start, end - 1);
    if let Some(name) = parts.get(3).map(|s| s.trim()).filter(|s| !s.is_empty() && *s != ".") {
        read.name = Some(name.to_string());
    }
    if let Some(count) = parts.get(4).map(|s| s.trim()).filter(|s| !s.is_empty() && *s != ".") {
        read.multiplicity = parse(count)?;
    }

    Ok((parts[0].to_string(), read))
}

///
/// Reads from a BED list of read intervals: `chr start end [name [count]]`.
///
/// The whole file is loaded up front, `count` becomes the multiplicity of the read.
///
#[derive(Debug, Clone, Default)]
pub struct BedReadSource {
    reads: HashMap<String, Vec<ReadInterval>>,
}

impl BedReadSource {
    pub fn n_reads(&self) -> usize {
        self.reads.values().map(|v| v.len()).sum()
    }
}

impl TryFrom<&str> for BedReadSource {
    type Error = ReadSourceError;

    /// Load a (possibly gzipped) BED file, `-` reads from stdin
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        if value != "-" && !Path::new(value).exists() {
            return Err(ReadSourceError::MissingFile(value.to_string()));
        }

        let reader = get_dynamic_reader_w_stdin(value)
            .map_err(|e| ReadSourceError::MissingFile(format!("{}: {}", value, e)))?;

        let mut reads: HashMap<String, Vec<ReadInterval>> = HashMap::new();
        for line in reader.lines() {
            let line = line?;
            let trimmed = line.trim_end();
            if trimmed.is_empty()
                || trimmed.starts_with('#')
                || trimmed.starts_with("track")
                || trimmed.starts_with("browser")
            {
                continue;
            }

            let (chr, read) = parse_bed_read(trimmed)?;
            reads.entry(chr).or_default().push(read);
        }

        for contig in reads.values_mut() {
            contig.sort_by_key(|r| (r.start, r.stop));
        }

        let source = BedReadSource { reads };
        debug!("Loaded {} reads from {}", source.n_reads(), value);
        Ok(source)
    }
}

impl TryFrom<&Path> for BedReadSource {
    type Error = ReadSourceError;

    fn try_from(value: &Path) -> Result<Self, Self::Error> {
        BedReadSource::try_from(value.to_string_lossy().as_ref())
    }
}

impl ReadSource for BedReadSource {
    fn fetch(&self, region: &Region) -> Result<Vec<ReadInterval>, ReadSourceError> {
        let Some(contig) = self.reads.get(&region.chr) else {
            return Ok(Vec::new());
        };

        // sorted by start, so everything past the region's stop can be skipped
        let end = contig.partition_point(|r| r.start <= region.stop);
        Ok(contig[..end]
            .iter()
            .filter(|r| r.stop >= region.start)
            .cloned()
            .collect())
    }
}
