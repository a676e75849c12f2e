//! # sncfrag-eval
//!
//! Compares predicted fragments to reference annotations. Every annotation is matched to the
//! prediction overlapping it the most; the signed distances between their boundaries are
//! tallied per evidence category into a [stats::StatsTable], reduced to a root mean square
//! error, or reported one by one next to the read support of the prediction.
//!
//! ## Example
//!
//! ```rust
//! use sncfrag_core::models::{AnnotatedFragment, Evidence, PredictedFragment};
//! use sncfrag_eval::{AnnotationMatcher, ErrorAggregator};
//!
//! let annotations = vec![AnnotatedFragment::new(5, 15, Evidence::Experimental)];
//! let predictions = vec![PredictedFragment {
//!     start: 5,
//!     stop: 15,
//!     supporting_reads_start: 5,
//!     supporting_reads_stop: 5,
//!     supporting_reads: 5,
//! }];
//!
//! let matches = AnnotationMatcher::default().match_region(&annotations, &predictions);
//! let mut aggregator = ErrorAggregator::default();
//! aggregator.add_region(&matches);
//!
//! assert_eq!(aggregator.table.experimental.predicted, 1);
//! assert_eq!(aggregator.table.experimental.error_5p.get(0), 1);
//! ```
pub mod evaluation;
pub mod intensity;
pub mod matching;
pub mod rmse;
pub mod stats;

pub use self::evaluation::{Evaluation, Evaluator};
pub use self::intensity::IntensityRecord;
pub use self::matching::{AnnotationMatcher, MatchResult, find_closest_overlapping_fragment, overlap};
pub use self::rmse::{RmsAccumulator, RootMeanSquareError};
pub use self::stats::{ErrorAggregator, ErrorHistogram, ErrorRecord, EvidenceStats, StatsTable, find_errors};
