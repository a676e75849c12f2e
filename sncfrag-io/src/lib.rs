//! # Input/Output for sncfrag
//!
//! Read sources that feed the fragment detection, and exporters that write reads and predicted
//! fragments back out as text.
//!
//! - [`sources::BamReadSource`]: indexed BAM files, indexes are built in-process when missing
//! - [`sources::BedReadSource`]: a BED list of reads with an optional count column
//! - [`sources::MemoryReadSource`]: reads kept in memory
//!
//! The exporters write BED and SAM text for reads, and BED or a tab-delimited table for
//! fragments. See [`export::open_output`] for how output destinations are chosen.
//! [`reference::ReferenceSequences`] reads a FASTA file to add fragment sequences to the table.
//!
pub mod error;
pub mod export;
pub mod reference;
pub mod sources;

// re-expose core functions
pub use error::*;
pub use export::*;
pub use reference::ReferenceSequences;
pub use sources::*;
