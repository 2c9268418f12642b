use serde_json::Value as JsonValue;

use crate::error::StatsError;

// ---------------------------------------------------------------------------
// Index – the loaded clustering index
// ---------------------------------------------------------------------------

/// A clustering index as written by the index builder.
///
/// Centroid vectors and cluster members are kept as raw JSON values: this
/// tool only ever counts them.
#[derive(Debug, Clone, PartialEq)]
pub struct Index {
    /// One representative vector per cluster.
    pub centroids: Vec<JsonValue>,
    /// `clusters[i]` holds the members assigned to `centroids[i]`.
    pub clusters: Vec<Vec<JsonValue>>,
}

impl Index {
    /// Number of centroids (the nominal cluster count).
    pub fn centroid_count(&self) -> usize {
        self.centroids.len()
    }

    /// Member count of every cluster, in index order.
    pub fn cluster_sizes(&self) -> Vec<usize> {
        self.clusters.iter().map(Vec::len).collect()
    }
}

// ---------------------------------------------------------------------------
// ClusterSizeSample – derived view used by every statistic
// ---------------------------------------------------------------------------

/// Cluster sizes, one per cluster. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterSizeSample {
    sizes: Vec<usize>,
}

impl ClusterSizeSample {
    pub fn new(sizes: Vec<usize>) -> Result<Self, StatsError> {
        if sizes.is_empty() {
            return Err(StatsError::EmptyInput);
        }
        Ok(Self { sizes })
    }

    /// Derive the sample from a loaded index.
    ///
    /// Fails with [`StatsError::EmptyInput`] when there are no clusters and
    /// with [`StatsError::Inconsistent`] when the centroid and cluster lists
    /// disagree in length.
    pub fn from_index(index: &Index) -> Result<Self, StatsError> {
        let sample = Self::new(index.cluster_sizes())?;
        if index.centroid_count() != sample.len() {
            return Err(StatsError::Inconsistent {
                centroids: index.centroid_count(),
                clusters: sample.len(),
            });
        }
        Ok(sample)
    }

    pub fn sizes(&self) -> &[usize] {
        &self.sizes
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    /// Always false.
    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    /// Sizes as floats, in index order.
    pub fn values(&self) -> Vec<f64> {
        self.sizes.iter().map(|&s| s as f64).collect()
    }

    /// Sizes as floats, ascending.
    pub fn sorted_values(&self) -> Vec<f64> {
        let mut values = self.values();
        values.sort_by(f64::total_cmp);
        values
    }

    pub fn min(&self) -> usize {
        self.sizes.iter().copied().min().unwrap_or(0)
    }

    pub fn max(&self) -> usize {
        self.sizes.iter().copied().max().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.sizes.iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn index(centroids: usize, clusters: Vec<usize>) -> Index {
        Index {
            centroids: (0..centroids).map(|i| json!([i as f64, 0.0])).collect(),
            clusters: clusters
                .into_iter()
                .map(|n| (0..n).map(|m| json!(m)).collect())
                .collect(),
        }
    }

    #[test]
    fn sample_from_consistent_index() {
        let sample = ClusterSizeSample::from_index(&index(3, vec![2, 1, 3])).unwrap();
        assert_eq!(sample.sizes(), &[2, 1, 3]);
        assert_eq!(sample.len(), 3);
        assert_eq!(sample.min(), 1);
        assert_eq!(sample.max(), 3);
        assert_eq!(sample.total(), 6);
        assert_eq!(sample.sorted_values(), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn empty_clusters_is_empty_input() {
        let err = ClusterSizeSample::from_index(&index(0, vec![])).unwrap_err();
        assert!(matches!(err, StatsError::EmptyInput));
        assert!(matches!(
            ClusterSizeSample::new(Vec::new()),
            Err(StatsError::EmptyInput)
        ));
    }

    #[test]
    fn mismatched_lengths_are_rejected() {
        let err = ClusterSizeSample::from_index(&index(4, vec![1, 2, 3])).unwrap_err();
        match err {
            StatsError::Inconsistent { centroids, clusters } => {
                assert_eq!(centroids, 4);
                assert_eq!(clusters, 3);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_member_lists_count_as_zero() {
        let sample = ClusterSizeSample::from_index(&index(2, vec![0, 4])).unwrap();
        assert_eq!(sample.min(), 0);
        assert_eq!(sample.total(), 4);
    }
}
