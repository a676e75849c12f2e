use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info};
use rayon::prelude::*;
use thiserror::Error;

use sncfrag_core::ReadSource;
use sncfrag_core::ReadSourceError;
use sncfrag_core::models::{PredictedFragment, ReadInterval, Region, RegionList};

use crate::config::{ConfigError, DetectorConfig};
use crate::peaks::PeakDetector;
use crate::profile::DensityProfile;
use crate::reconstruct::FragmentReconstructor;

#[derive(Error, Debug)]
pub enum DetectError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Failed to fetch reads for {region}: {source}")]
    Fetch {
        region: String,
        #[source]
        source: ReadSourceError,
    },
    #[error("Failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

///
/// The fragments called in one region, together with the reads they were called from.
///
#[derive(Debug, Clone, PartialEq)]
pub struct RegionFragments {
    pub region: Region,
    pub fragments: Vec<PredictedFragment>,
    pub reads: Vec<ReadInterval>,
}

impl RegionFragments {
    /// Total multiplicity of the reads fetched for the region
    pub fn read_count(&self) -> u64 {
        self.reads.iter().map(|r| r.multiplicity as u64).sum()
    }
}

///
/// Runs the per-region pipeline: density profile, peak detection on both boundary arrays,
/// then fragment reconstruction.
///
#[derive(Debug, Clone)]
pub struct FragmentFinder {
    config: DetectorConfig,
    peak_detector: PeakDetector,
    reconstructor: FragmentReconstructor,
}

impl FragmentFinder {
    pub fn new(config: DetectorConfig) -> Result<FragmentFinder, ConfigError> {
        config.validate()?;
        Ok(FragmentFinder {
            peak_detector: PeakDetector::new(config.min_peak_support),
            reconstructor: FragmentReconstructor::new(config.clone()),
            config,
        })
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Call fragments in `region` from reads that were already fetched.
    pub fn find_fragments(&self, region: &Region, reads: &[ReadInterval]) -> Vec<PredictedFragment> {
        let profile = DensityProfile::from_reads(region, reads);
        if profile.has_no_evidence() {
            debug!("{}: no reads, nothing to call", region);
            return Vec::new();
        }

        let start_peaks = self.peak_detector.detect(&profile.start_counts);
        let stop_peaks = self.peak_detector.detect(&profile.stop_counts);

        self.reconstructor
            .reconstruct(region, &start_peaks, &stop_peaks, reads)
    }

    /// Fetch the reads of `region` from `source` and call its fragments.
    pub fn process_region<S>(&self, region: &Region, source: &S) -> Result<RegionFragments, DetectError>
    where
        S: ReadSource + ?Sized,
    {
        let reads = source.fetch(region).map_err(|e| DetectError::Fetch {
            region: region.as_string(),
            source: e,
        })?;

        let fragments = self.find_fragments(region, &reads);
        info!(
            "{} ({}): {} reads, {} fragments",
            region.name.as_deref().unwrap_or(region.identifier()),
            region,
            reads.len(),
            fragments.len()
        );

        Ok(RegionFragments {
            region: region.clone(),
            fragments,
            reads,
        })
    }

    ///
    /// Process every region of `regions` on a dedicated pool of `threads` workers.
    ///
    /// Results come back in the order of the region list. The first failing fetch aborts
    /// the run.
    ///
    pub fn process_regions<S>(
        &self,
        regions: &RegionList,
        source: &S,
        threads: usize,
        progress: bool,
    ) -> Result<Vec<RegionFragments>, DetectError>
    where
        S: ReadSource + ?Sized,
    {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads.max(1))
            .build()?;

        let bar = if progress {
            let bar = ProgressBar::new(regions.len() as u64);
            if let Ok(style) =
                ProgressStyle::default_bar().template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
            {
                bar.set_style(style);
            }
            bar.set_message("Detecting fragments");
            bar
        } else {
            ProgressBar::hidden()
        };

        let results = pool.install(|| {
            regions
                .regions
                .par_iter()
                .map(|region| {
                    let result = self.process_region(region, source);
                    bar.inc(1);
                    result
                })
                .collect::<Result<Vec<RegionFragments>, DetectError>>()
        });

        bar.finish_and_clear();
        results
    }
}
