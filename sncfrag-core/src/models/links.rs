use std::collections::HashMap;
use std::io::BufRead;
use std::path::Path;

use crate::errors::CoreError;
use crate::utils::get_dynamic_reader;

///
/// Maps region identifiers onto annotation keys, for when the region file and
/// the annotation table use different naming conventions.
///
#[derive(Debug, Clone, Default)]
pub enum NameLinks {
    /// Every region identifier is its own annotation key
    #[default]
    Identity,
    /// Only regions listed in the table are linked
    Table(HashMap<String, String>),
}

impl NameLinks {
    pub fn resolve<'a>(&'a self, identifier: &'a str) -> Option<&'a str> {
        match self {
            NameLinks::Identity => Some(identifier),
            NameLinks::Table(links) => links.get(identifier).map(|s| s.as_str()),
        }
    }
}

impl TryFrom<&Path> for NameLinks {
    type Error = CoreError;

    ///
    /// Read a two column, tab-delimited links table: `region_identifier annotation_key`.
    ///
    fn try_from(value: &Path) -> Result<Self, CoreError> {
        let reader = get_dynamic_reader(value)
            .map_err(|e| CoreError::FileReadError(format!("{:#}", e)))?;

        let mut links = HashMap::new();
        for line in reader.lines() {
            let line = line?;
            let line = line.trim_end();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let mut fields = line.split('\t');
            let (Some(identifier), Some(key)) = (fields.next(), fields.next()) else {
                return Err(CoreError::LinkParseError(line.to_string()));
            };
            if identifier.is_empty() || key.is_empty() {
                return Err(CoreError::LinkParseError(line.to_string()));
            }

            links.insert(identifier.to_owned(), key.to_owned());
        }

        Ok(NameLinks::Table(links))
    }
}
