#[derive(Debug, Clone, PartialEq)]
pub struct NeighborhoodPolicy {
    /// Search radii tried in order, in miles.
    pub radius_tiers_miles: Vec<f64>,
    /// Result count at which the search stops widening.
    pub quorum: usize,
    pub miles_per_degree: f64,
}

impl Default for NeighborhoodPolicy {
    fn default() -> Self {
        Self {
            radius_tiers_miles: vec![3.0, 10.0, 25.0, 50.0],
            quorum: 20,
            miles_per_degree: 69.0,
        }
    }
}
