use std::collections::HashMap;
use std::fmt::{self, Display};
use std::io::BufRead;
use std::path::Path;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::utils::get_dynamic_reader;

/// Whether a reference annotation was confirmed experimentally or only inferred.
#[derive(Eq, PartialEq, Hash, Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Evidence {
    Experimental,
    NotExperimental,
}

impl Evidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Evidence::Experimental => "experimental",
            Evidence::NotExperimental => "not_experimental",
        }
    }
}

impl FromStr for Evidence {
    type Err = String;

    /// Only the literal `experimental` counts as experimental evidence.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "experimental" => Ok(Evidence::Experimental),
            _ => Ok(Evidence::NotExperimental),
        }
    }
}

impl Display for Evidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

///
/// A reference fragment (e.g. a mature miRNA) within a region.
///
#[derive(Eq, PartialEq, Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AnnotatedFragment {
    pub start: u32,
    pub stop: u32,
    pub evidence: Evidence,
    pub supporting_reads: u32,
    pub name: Option<String>,
}

impl AnnotatedFragment {
    pub fn new(start: u32, stop: u32, evidence: Evidence) -> AnnotatedFragment {
        AnnotatedFragment {
            start,
            stop,
            evidence,
            supporting_reads: 0,
            name: None,
        }
    }

    pub fn with_supporting_reads(mut self, supporting_reads: u32) -> AnnotatedFragment {
        self.supporting_reads = supporting_reads;
        self
    }
}

///
/// Reference annotations grouped by annotation key.
///
#[derive(Debug, Clone, Default)]
pub struct AnnotationIndex {
    pub index: HashMap<String, Vec<AnnotatedFragment>>,
}

impl AnnotationIndex {
    pub fn get(&self, key: &str) -> Option<&[AnnotatedFragment]> {
        self.index.get(key).map(|v| v.as_slice())
    }

    pub fn insert(&mut self, key: &str, fragment: AnnotatedFragment) {
        self.index.entry(key.to_owned()).or_default().push(fragment);
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

fn parse_annotation_line(line: &str) -> Result<(String, AnnotatedFragment), CoreError> {
    let parts: Vec<&str> = line.split('\t').collect();
    if parts.len() < 5 {
        return Err(CoreError::AnnotationParseError(format!(
            "expected at least 5 columns (key, start, stop, evidence, reads): {}",
            line
        )));
    }

    let parse_u32 = |field: &str, what: &str| {
        field.trim().parse::<u32>().map_err(|_| {
            CoreError::AnnotationParseError(format!("invalid {} '{}' in line: {}", what, field, line))
        })
    };

    let start = parse_u32(parts[1], "start")?;
    let stop = parse_u32(parts[2], "stop")?;
    if stop < start {
        return Err(CoreError::AnnotationParseError(format!(
            "stop lies before start in line: {}",
            line
        )));
    }

    let evidence = Evidence::from_str(parts[3].trim()).unwrap_or(Evidence::NotExperimental);
    let supporting_reads = parse_u32(parts[4], "supporting read count")?;
    let name = parts
        .get(5)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    Ok((
        parts[0].to_owned(),
        AnnotatedFragment {
            start,
            stop,
            evidence,
            supporting_reads,
            name,
        },
    ))
}

impl TryFrom<&Path> for AnnotationIndex {
    type Error = CoreError;

    ///
    /// Read an annotation table.
    ///
    /// Tab-delimited columns: `key start stop evidence supporting_reads [name]`,
    /// coordinates 0-based inclusive. Lines starting with `#` are skipped.
    fn try_from(value: &Path) -> Result<Self, CoreError> {
        let reader = get_dynamic_reader(value)
            .map_err(|e| CoreError::FileReadError(format!("{:#}", e)))?;

        let mut annotations = AnnotationIndex::default();
        for line in reader.lines() {
            let line = line?;
            let line = line.trim_end();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let (key, fragment) = parse_annotation_line(line)?;
            annotations.insert(&key, fragment);
        }

        Ok(annotations)
    }
}

impl TryFrom<&str> for AnnotationIndex {
    type Error = CoreError;

    fn try_from(value: &str) -> Result<Self, CoreError> {
        AnnotationIndex::try_from(Path::new(value))
    }
}
