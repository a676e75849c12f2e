//! # sncfrag-detect
//!
//! Peak-based fragment detection. For every region the reads are reduced to two boundary
//! density arrays (5' starts and 3' stops), local maxima are called on both, and start peaks
//! are paired with stop peaks into a non-redundant set of predicted fragments.
//!
//! ## Example
//!
//! ```rust
//! use sncfrag_core::models::{ReadInterval, Region};
//! use sncfrag_detect::{DetectorConfig, FragmentFinder};
//!
//! let finder = FragmentFinder::new(DetectorConfig::default()).unwrap();
//! let region = Region::new("MIR-TEST", 0, 19);
//! let reads = vec![ReadInterval::new(5, 15); 5];
//!
//! let fragments = finder.find_fragments(&region, &reads);
//! assert_eq!(fragments.len(), 1);
//! assert_eq!(fragments[0].supporting_reads, 5);
//! ```
pub mod config;
pub mod finder;
pub mod peaks;
pub mod profile;
pub mod reconstruct;

// re-exports
pub use self::config::{ConfigError, DetectorConfig, ScoreFunction};
pub use self::finder::{DetectError, FragmentFinder, RegionFragments};
pub use self::peaks::{Peak, PeakDetector};
pub use self::profile::DensityProfile;
pub use self::reconstruct::FragmentReconstructor;
