//! # sncfrag
//!
//! Annotation of fragments derived from small non-coding RNAs (miRNAs, snoRNAs, tRNAs, ...).
//! Reads aligned to a precursor tend to start and stop at the same few positions; sncfrag
//! detects peaks in those start and stop densities and pairs them into fragments.
//!
//! The functionality lives in separate crates, re-exported here behind cargo features:
//!
//! - `core`: regions, reads, fragments, annotations and their parsers
//! - `detect`: density profiles, peak detection and fragment reconstruction
//! - `eval`: matching against reference annotations and error statistics
//! - `io`: BAM and BED read sources, BED/SAM/table exporters
#[cfg(feature = "core")]
#[doc(inline)]
pub use sncfrag_core as core;

#[cfg(feature = "detect")]
#[doc(inline)]
pub use sncfrag_detect as detect;

#[cfg(feature = "eval")]
#[doc(inline)]
pub use sncfrag_eval as eval;

#[cfg(feature = "io")]
#[doc(inline)]
pub use sncfrag_io as io;
