//! Evaluation configuration
//!
//! Tolerances are passed explicitly into every evaluation call. Nothing is
//! read from global state.

/// Default sample count above which pointwise evaluation may use the
/// thread pool (only with the `parallel` feature)
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 4096;

/// Options controlling a single evaluation
#[derive(Clone, Debug, PartialEq)]
pub struct EvalConfig {
    /// Largest residual accepted by a grid layout check. `0.0` means exact
    /// equality; NaN coordinates never pass a check.
    pub grid_tolerance: f64,
    /// Relative tolerance for compressing univariate results
    pub simplify_tolerance: f64,
    /// Minimum number of samples for the parallel pointwise loop
    pub parallel_threshold: usize,
    /// Look for grid layouts in matrix and tensor inputs
    pub detect_grids: bool,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            grid_tolerance: 0.0,
            simplify_tolerance: f64::EPSILON,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            detect_grids: true,
        }
    }
}

impl EvalConfig {
    /// Create a configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the grid detection tolerance
    pub fn with_grid_tolerance(mut self, tol: f64) -> Self {
        self.grid_tolerance = tol;
        self
    }

    /// Set the tolerance used when simplifying univariate results
    pub fn with_simplify_tolerance(mut self, tol: f64) -> Self {
        self.simplify_tolerance = tol;
        self
    }

    /// Set the parallel threshold
    pub fn with_parallel_threshold(mut self, samples: usize) -> Self {
        self.parallel_threshold = samples;
        self
    }

    /// Enable or disable grid detection
    ///
    /// With detection off, matrix and tensor inputs always take the
    /// flatten-and-loop path.
    pub fn with_grid_detection(mut self, enabled: bool) -> Self {
        self.detect_grids = enabled;
        self
    }

    /// Whether grid checks require exact equality
    pub fn is_exact(&self) -> bool {
        self.grid_tolerance == 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EvalConfig::default();
        assert_eq!(config.grid_tolerance, 0.0);
        assert_eq!(config.simplify_tolerance, f64::EPSILON);
        assert!(config.detect_grids);
        assert!(config.is_exact());
    }

    #[test]
    fn test_builder() {
        let config = EvalConfig::new()
            .with_grid_tolerance(1e-12)
            .with_simplify_tolerance(1e-8)
            .with_parallel_threshold(16)
            .with_grid_detection(false);

        assert_eq!(config.grid_tolerance, 1e-12);
        assert_eq!(config.simplify_tolerance, 1e-8);
        assert_eq!(config.parallel_threshold, 16);
        assert!(!config.detect_grids);
        assert!(!config.is_exact());
    }
}
