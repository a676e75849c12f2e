///
/// A local maximum in a boundary density array.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Peak {
    /// Index into the density array (region relative)
    pub position: usize,
    pub support: u32,
}

///
/// Scans a density array for local maxima.
///
/// A run of equal, non-zero values whose flanking values (or the array edges) are both
/// strictly lower is one peak, reported at the leftmost position of the run.
///
#[derive(Debug, Clone, Copy)]
pub struct PeakDetector {
    pub min_support: u32,
}

impl Default for PeakDetector {
    fn default() -> Self {
        PeakDetector { min_support: 1 }
    }
}

impl PeakDetector {
    pub fn new(min_support: u32) -> PeakDetector {
        PeakDetector {
            min_support: min_support.max(1),
        }
    }

    /// Peaks of `counts` ordered by position
    pub fn detect(&self, counts: &[u32]) -> Vec<Peak> {
        let n = counts.len();
        let mut peaks = Vec::new();

        let mut i = 0;
        while i < n {
            let value = counts[i];
            if value == 0 {
                i += 1;
                continue;
            }

            let mut j = i;
            while j + 1 < n && counts[j + 1] == value {
                j += 1;
            }

            let left_lower = i == 0 || counts[i - 1] < value;
            let right_lower = j + 1 == n || counts[j + 1] < value;

            if left_lower && right_lower && value >= self.min_support {
                peaks.push(Peak {
                    position: i,
                    support: value,
                });
            }

            i = j + 1;
        }

        peaks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    fn positions(peaks: &[Peak]) -> Vec<usize> {
        peaks.iter().map(|p| p.position).collect()
    }

    #[rstest]
    #[case(vec![0, 0, 0], vec![])]
    #[case(vec![], vec![])]
    #[case(vec![0, 5, 0], vec![1])]
    #[case(vec![1, 2, 3], vec![2])]
    #[case(vec![3, 2, 1], vec![0])]
    #[case(vec![1, 3, 1, 3, 1], vec![1, 3])]
    #[case(vec![0, 3, 3, 1, 0, 5, 0], vec![1, 5])]
    #[case(vec![2, 2, 2], vec![0])]
    #[case(vec![3, 1, 1, 3], vec![0, 3])]
    #[case(vec![1, 4, 4, 4, 5, 0], vec![4])]
    fn test_detect_positions(#[case] counts: Vec<u32>, #[case] expected: Vec<usize>) {
        let peaks = PeakDetector::default().detect(&counts);
        assert_eq!(positions(&peaks), expected);
    }

    #[rstest]
    fn test_support_is_reported() {
        let peaks = PeakDetector::default().detect(&[0, 0, 5, 0, 2, 0]);
        assert_eq!(
            peaks,
            vec![
                Peak {
                    position: 2,
                    support: 5
                },
                Peak {
                    position: 4,
                    support: 2
                }
            ]
        );
    }

    #[rstest]
    fn test_min_support_filters() {
        let peaks = PeakDetector::new(3).detect(&[0, 5, 0, 2, 0, 3]);
        assert_eq!(positions(&peaks), vec![1, 5]);
    }

    #[rstest]
    fn test_detection_is_deterministic() {
        let counts: Vec<u32> = (0..200u32).map(|i| (i * 37 + 11) % 9).collect();
        let detector = PeakDetector::default();
        assert_eq!(detector.detect(&counts), detector.detect(&counts));
        assert!(detector.detect(&counts).iter().all(|p| p.support > 0));
    }
}
