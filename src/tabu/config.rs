//! Tabu Search configuration.

/// Local move used to build the neighborhood of a route.
///
/// The start position is never touched by either move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Neighborhood {
    /// Exchange the venues at two positions. Tabu signature: the unordered
    /// pair of venue ids, so swapping them back is forbidden.
    #[default]
    Swap,
    /// Reverse the segment between two positions (2-opt). Tabu signature:
    /// the position pair.
    Reverse,
}

/// Configuration parameters for Tabu Search.
///
/// # Examples
///
/// ```
/// use u_itinerary::tabu::{Neighborhood, TabuConfig};
///
/// let config = TabuConfig::default()
///     .with_max_iterations(100)
///     .with_tabu_tenure(7)
///     .with_neighborhood(Neighborhood::Reverse);
/// assert_eq!(config.max_iterations, 100);
/// assert_eq!(config.tabu_tenure, 7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TabuConfig {
    /// Number of iterations. The run always performs exactly this many.
    #[cfg_attr(feature = "serde", serde(alias = "max_iter"))]
    pub max_iterations: usize,
    /// How many iterations an applied move stays in the tabu list.
    #[cfg_attr(feature = "serde", serde(alias = "tabu_tam"))]
    pub tabu_tenure: usize,
    /// Whether a tabu move may be taken when it beats the best cost so far.
    pub aspiration: bool,
    /// Move type.
    pub neighborhood: Neighborhood,
    /// Score only this many randomly drawn moves per iteration instead of
    /// the whole neighborhood.
    pub candidate_sample: Option<usize>,
    /// Seed for candidate sampling.
    pub seed: u64,
    /// Score the neighborhood on the rayon pool (needs the `parallel`
    /// feature; ignored otherwise). Results are identical either way.
    pub parallel: bool,
}

impl Default for TabuConfig {
    fn default() -> Self {
        Self {
            max_iterations: 20,
            tabu_tenure: 15,
            aspiration: true,
            neighborhood: Neighborhood::Swap,
            candidate_sample: None,
            seed: 42,
            parallel: false,
        }
    }
}

impl TabuConfig {
    /// Sets the number of iterations.
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    /// Sets the tabu tenure.
    pub fn with_tabu_tenure(mut self, tenure: usize) -> Self {
        self.tabu_tenure = tenure;
        self
    }

    /// Enables or disables the aspiration criterion.
    pub fn with_aspiration(mut self, aspiration: bool) -> Self {
        self.aspiration = aspiration;
        self
    }

    pub fn with_neighborhood(mut self, neighborhood: Neighborhood) -> Self {
        self.neighborhood = neighborhood;
        self
    }

    /// Limits each iteration to `n` sampled candidate moves.
    pub fn with_candidate_sample(mut self, n: usize) -> Self {
        self.candidate_sample = Some(n);
        self
    }

    /// Sets the sampling seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.candidate_sample == Some(0) {
            return Err("candidate_sample must be positive".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tabu_config_defaults() {
        let config = TabuConfig::default();
        assert_eq!(config.max_iterations, 20);
        assert_eq!(config.tabu_tenure, 15);
        assert!(config.aspiration);
        assert_eq!(config.neighborhood, Neighborhood::Swap);
        assert!(config.candidate_sample.is_none());
        assert_eq!(config.seed, 42);
        assert!(!config.parallel);
    }

    #[test]
    fn test_tabu_config_builder() {
        let config = TabuConfig::default()
            .with_max_iterations(1000)
            .with_tabu_tenure(10)
            .with_aspiration(false)
            .with_candidate_sample(50)
            .with_seed(123)
            .with_parallel(true);

        assert_eq!(config.max_iterations, 1000);
        assert_eq!(config.tabu_tenure, 10);
        assert!(!config.aspiration);
        assert_eq!(config.candidate_sample, Some(50));
        assert_eq!(config.seed, 123);
        assert!(config.parallel);
    }

    #[test]
    fn test_validate_zero_sample() {
        let config = TabuConfig::default().with_candidate_sample(0);
        assert!(config.validate().is_err());
    }
}
