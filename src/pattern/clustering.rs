//! Greedy single-linkage clustering of check-in locations.

use crate::domain::GeoPoint;

/// A group of nearby points.
///
/// The centroid is the first point assigned to the cluster and is never
/// recomputed; this is a deliberate simplification, not a k-means.
#[derive(Debug, Clone)]
pub struct Cluster {
    /// Reference point of the cluster
    pub centroid: GeoPoint,
    /// Points assigned to the cluster, in assignment order
    pub points: Vec<GeoPoint>,
}

impl Cluster {
    /// Number of points in the cluster.
    pub fn count(&self) -> usize {
        self.points.len()
    }
}

/// Greedily assign each point to the first cluster whose centroid lies
/// within `merge_radius_m`, otherwise start a new cluster at that point.
///
/// Returned clusters are sorted by descending point count.
pub fn cluster_points(points: &[GeoPoint], merge_radius_m: f64) -> Vec<Cluster> {
    let mut clusters: Vec<Cluster> = Vec::new();

    for point in points {
        match clusters
            .iter_mut()
            .find(|c| c.centroid.distance_to(point) <= merge_radius_m)
        {
            Some(cluster) => cluster.points.push(*point),
            None => clusters.push(Cluster {
                centroid: *point,
                points: vec![*point],
            }),
        }
    }

    clusters.sort_by(|a, b| b.count().cmp(&a.count()));
    clusters
}

#[cfg(test)]
mod tests {
    use super::*;

    // About 1.1 m of latitude.
    const TINY: f64 = 0.00001;

    #[test]
    fn test_five_nearby_points_form_one_cluster() {
        let base = GeoPoint::new(-6.914744, 107.609810);
        let points: Vec<GeoPoint> = (0..5)
            .map(|i| GeoPoint::new(base.latitude + i as f64 * TINY, base.longitude))
            .collect();

        let clusters = cluster_points(&points, 10.0);
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].count(), 5);
    }

    #[test]
    fn test_distant_points_form_separate_clusters() {
        let points = vec![
            GeoPoint::new(-6.914744, 107.609810),
            // ~500 m north.
            GeoPoint::new(-6.910248, 107.609810),
            // ~1 km south.
            GeoPoint::new(-6.923736, 107.609810),
        ];

        let clusters = cluster_points(&points, 10.0);
        assert_eq!(clusters.len(), 3);
    }

    #[test]
    fn test_clusters_sorted_by_descending_count() {
        let a = GeoPoint::new(-6.914744, 107.609810);
        let b = GeoPoint::new(-6.910248, 107.609810);

        // One point at a, three points around b.
        let points = vec![
            a,
            b,
            GeoPoint::new(b.latitude + TINY, b.longitude),
            GeoPoint::new(b.latitude - TINY, b.longitude),
        ];

        let clusters = cluster_points(&points, 10.0);
        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters[0].count(), 3);
        assert_eq!(clusters[1].count(), 1);
    }

    #[test]
    fn test_centroid_is_first_point_not_recomputed() {
        let first = GeoPoint::new(-6.914744, 107.609810);
        let points = vec![
            first,
            GeoPoint::new(first.latitude + 5.0 * TINY, first.longitude),
        ];

        let clusters = cluster_points(&points, 10.0);
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].centroid, first);
    }

    #[test]
    fn test_empty_input() {
        assert!(cluster_points(&[], 10.0).is_empty());
    }
}
