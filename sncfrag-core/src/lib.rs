//! # sncfrag-core
//!
//! Shared data model for sncfrag, a tool that annotates fragments of small non-coding RNAs
//! (sncRNAs) from the start and stop positions of aligned sequencing reads.
//!
//! This crate holds the types every other crate in the workspace speaks:
//!
//! - [`models::Region`]: a masked region (usually one precursor sncRNA) to analyse
//! - [`models::ReadInterval`]: one aligned read reduced to its boundaries
//! - [`models::PredictedFragment`]: a fragment called by `sncfrag-detect`
//! - [`models::AnnotatedFragment`]: a reference fragment used by `sncfrag-eval`
//! - [`traits::ReadSource`]: the capability of producing reads for a region
//!
//! It also contains the parsers for the tab-delimited inputs (regions, annotations, name links).
//!
//! All coordinates are 0-based and inclusive on both ends.
//!
//! ## Example
//!
//! ```rust
//! use sncfrag_core::models::{ReadInterval, Region};
//!
//! let region = Region::new("MIR100", 0, 79);
//! let read = ReadInterval::new(5, 26);
//!
//! assert_eq!(region.width(), 80);
//! assert!(region.touches(read.start, read.stop));
//! ```
pub mod errors;
pub mod models;
pub mod traits;
pub mod utils;

pub use errors::{CoreError, ReadSourceError};
pub use traits::ReadSource;
