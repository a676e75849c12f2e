use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use noodles::bam;
use noodles::core::Region as QueryRegion;
use noodles::sam::alignment::Record as SamRecord;

use sncfrag_core::models::{ReadInterval, Region};
use sncfrag_core::{ReadSource, ReadSourceError};

/// Path of the index noodles looks for next to `bam_path`
pub fn index_path(bam_path: &Path) -> PathBuf {
    let mut name = bam_path.as_os_str().to_owned();
    name.push(".bai");
    PathBuf::from(name)
}

fn is_stale(bam_path: &Path, bai_path: &Path) -> bool {
    let modified = |p: &Path| fs::metadata(p).and_then(|m| m.modified());
    match (modified(bam_path), modified(bai_path)) {
        (Ok(bam), Ok(bai)) => bai < bam,
        _ => true,
    }
}

///
/// Make sure `bam_path` has a usable `.bai` index, building one in-process when it is
/// missing, older than the BAM file or unreadable.
///
pub fn ensure_index(bam_path: &Path) -> Result<PathBuf, ReadSourceError> {
    if !bam_path.exists() {
        return Err(ReadSourceError::MissingFile(bam_path.display().to_string()));
    }

    let bai_path = index_path(bam_path);
    if bai_path.exists() && !is_stale(bam_path, &bai_path) && bam::bai::fs::read(&bai_path).is_ok() {
        debug!("Using existing index {}", bai_path.display());
        return Ok(bai_path);
    }

    info!("Indexing BAM file: {}", bam_path.display());
    let index_failed = |e: io::Error| ReadSourceError::IndexFailed {
        path: bam_path.display().to_string(),
        reason: e.to_string(),
    };
    let index = bam::fs::index(bam_path).map_err(index_failed)?;
    bam::bai::fs::write(&bai_path, &index).map_err(index_failed)?;

    Ok(bai_path)
}

///
/// Reads from one or more indexed BAM files.
///
/// Unmapped records are ignored. Each mapped record becomes one read spanning its alignment,
/// converted to 0-based inclusive coordinates.
///
#[derive(Debug, Clone)]
pub struct BamReadSource {
    paths: Vec<PathBuf>,
}

impl BamReadSource {
    ///
    /// Open the given BAM files, indexing those that need it.
    ///
    /// A missing file is an error. A file that can't be indexed is left out with a warning,
    /// so the remaining files are still used.
    ///
    pub fn new<P: AsRef<Path>>(paths: &[P]) -> Result<BamReadSource, ReadSourceError> {
        let mut usable = Vec::with_capacity(paths.len());

        for path in paths {
            let path = path.as_ref();
            match ensure_index(path) {
                Ok(_) => usable.push(path.to_path_buf()),
                Err(ReadSourceError::IndexFailed { path, reason }) => {
                    warn!("Skipping {}: couldn't index it ({})", path, reason);
                }
                Err(e) => return Err(e),
            }
        }

        Ok(BamReadSource { paths: usable })
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    fn fetch_from(&self, path: &Path, region: &Region) -> Result<Vec<ReadInterval>, ReadSourceError> {
        let mut reader = bam::io::indexed_reader::Builder::default().build_from_path(path)?;
        let header = reader.read_header()?;

        let has_contig = header
            .reference_sequences()
            .keys()
            .any(|name| name.as_slice() == region.chr.as_bytes());
        if !has_contig {
            debug!("{} has no contig named {}", path.display(), region.chr);
            return Ok(Vec::new());
        }

        let query: QueryRegion = format!("{}:{}-{}", region.chr, region.start + 1, region.stop + 1)
            .parse()
            .map_err(|_| ReadSourceError::InvalidRegion(region.as_string()))?;

        let mut reads = Vec::new();
        for result in reader.query(&header, &query)? {
            let record = result?;
            if record.flags().is_unmapped() {
                continue;
            }

            let (start, end) = match (record.alignment_start(), SamRecord::alignment_end(&record)) {
                (Some(start), Some(end)) => (start?, end?),
                _ => continue,
            };

            let mut read = ReadInterval::new(start.get() as u32 - 1, end.get() as u32 - 1);
            read.name = record.name().map(|n| n.to_string());
            if !record.sequence().is_empty() {
                read.sequence = Some(record.sequence().iter().map(char::from).collect());
            }
            reads.push(read);
        }

        Ok(reads)
    }
}

impl ReadSource for BamReadSource {
    fn fetch(&self, region: &Region) -> Result<Vec<ReadInterval>, ReadSourceError> {
        let mut reads = Vec::new();
        for path in &self.paths {
            reads.extend(self.fetch_from(path, region)?);
        }
        Ok(reads)
    }
}
