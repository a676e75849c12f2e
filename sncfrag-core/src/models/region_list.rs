use std::io::BufRead;
use std::path::{Path, PathBuf};

use log::debug;
use regex::Regex;

use crate::errors::CoreError;
use crate::models::Region;
use crate::utils::get_dynamic_reader;

///
/// RegionList struct, the ordered masked regions read from a GFF/GTF-like file.
///
#[derive(Clone, Debug)]
pub struct RegionList {
    pub regions: Vec<Region>,
    pub path: Option<PathBuf>,
}

///
/// Build the regex that pulls the precursor name out of the GFF attribute column.
///
pub fn gene_id_regex(gid: &str) -> Regex {
    // accepts both `gene_id=NAME` (GFF3) and `gene_id "NAME";` (GTF)
    Regex::new(&format!(r#"{}[= ]['" ]?([^'";]+)"#, regex::escape(gid)))
        .expect("escaped attribute key always compiles")
}

///
/// Extract the value of attribute `gid` from a GFF attribute column.
///
pub fn parse_gff_annotation_name(attributes: &str, gid_regex: &Regex) -> Option<String> {
    gid_regex
        .captures(attributes)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
}

///
/// Parse one GFF line into a [Region].
///
/// GFF uses 1-based inclusive coordinates; they are converted to 0-based inclusive.
/// A start position that is 0 (so negative after conversion) means the file is not
/// 1-based and is rejected.
///
pub fn parse_gff_line(line: &str, index: usize, gid_regex: &Regex) -> Result<Region, CoreError> {
    let parts: Vec<&str> = line.split('\t').collect();
    if parts.len() < 5 {
        return Err(CoreError::RegionParseError(format!(
            "expected at least 5 tab separated columns: {}",
            line
        )));
    }

    let start = parts[3].trim().parse::<i64>().map_err(|_| {
        CoreError::RegionParseError(format!("Error in parsing start position: {}", line))
    })? - 1;
    let stop = parts[4].trim().parse::<i64>().map_err(|_| {
        CoreError::RegionParseError(format!("Error in parsing end position: {}", line))
    })? - 1;

    if start < 0 {
        return Err(CoreError::RegionParseError(format!(
            "{}\nThis format must have 1-based coordinates.",
            line
        )));
    }
    if stop < start {
        return Err(CoreError::RegionParseError(format!(
            "end position lies before start position: {}",
            line
        )));
    }

    let start = u32::try_from(start)
        .map_err(|_| CoreError::RegionParseError(format!("start out of range: {}", line)))?;
    let stop = u32::try_from(stop)
        .map_err(|_| CoreError::RegionParseError(format!("end out of range: {}", line)))?;

    let name = parts
        .get(8)
        .and_then(|attributes| parse_gff_annotation_name(attributes, gid_regex));

    Ok(Region {
        chr: parts[0].to_owned(),
        start,
        stop,
        name,
        index,
    })
}

impl RegionList {
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Region> {
        self.regions.iter()
    }
}

impl TryFrom<&Path> for RegionList {
    type Error = CoreError;

    ///
    /// Create a new [RegionList] from a GFF/GTF file.
    ///
    /// # Arguments:
    /// - value: path to the (optionally gzipped) file on disk.
    fn try_from(value: &Path) -> Result<Self, CoreError> {
        let reader = get_dynamic_reader(value)
            .map_err(|e| CoreError::FileReadError(format!("{:#}", e)))?;
        let gid_regex = gene_id_regex("gene_id");

        let mut regions: Vec<Region> = Vec::new();
        for line in reader.lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let region = parse_gff_line(line, regions.len(), &gid_regex).map_err(|e| match e {
                CoreError::RegionParseError(msg) => CoreError::RegionParseError(format!(
                    "Masked regions (GTF/GFF) file \"{}\" is corrupt: {}",
                    value.display(),
                    msg
                )),
                other => other,
            })?;
            regions.push(region);
        }

        if regions.is_empty() {
            return Err(CoreError::EmptyRegionList(value.display().to_string()));
        }
        debug!("Read {} masked regions from {}", regions.len(), value.display());

        Ok(RegionList {
            regions,
            path: Some(value.to_owned()),
        })
    }
}

impl TryFrom<&str> for RegionList {
    type Error = CoreError;

    fn try_from(value: &str) -> Result<Self, CoreError> {
        RegionList::try_from(Path::new(value))
    }
}

impl<'a> IntoIterator for &'a RegionList {
    type Item = &'a Region;
    type IntoIter = std::slice::Iter<'a, Region>;

    fn into_iter(self) -> Self::IntoIter {
        self.regions.iter()
    }
}
