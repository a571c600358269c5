use crate::defaults::*;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

fn default_random_guess() -> bool {
    RANDOM_GUESS
}
fn default_random_sigma() -> f64 {
    RANDOM_SIGMA
}
fn default_random_seed() -> u64 {
    RANDOM_SEED
}
fn default_spin_filter() -> bool {
    SPIN_FILTER
}
fn default_singularity_threshold() -> f64 {
    SINGULARITY_THRESHOLD
}
fn default_trial_factor() -> usize {
    TRIAL_FACTOR
}

/// Settings of the EOM preconditioner. Every field has a default, so an
/// empty TOML table yields a complete configuration.
#[derive(Serialize, Deserialize, Clone, Copy, Debug)]
pub struct EomSettings {
    /// Add Gaussian noise to every guess vector to break exact degeneracies.
    #[serde(default = "default_random_guess")]
    pub random_guess: bool,
    /// Standard deviation of the guess noise.
    #[serde(default = "default_random_sigma")]
    pub random_sigma: f64,
    #[serde(default = "default_random_seed")]
    pub random_seed: u64,
    /// Restrict guess vectors to spin-pure index combinations.
    #[serde(default = "default_spin_filter")]
    pub spin_filter: bool,
    /// Denominators below this magnitude are damped to zero in the
    /// Davidson correction.
    #[serde(default = "default_singularity_threshold")]
    pub singularity_threshold: f64,
    /// Each rank keeps `trial_factor * n_roots` candidates before the
    /// gather of the two-phase selection.
    #[serde(default = "default_trial_factor")]
    pub trial_factor: usize,
}

impl Default for EomSettings {
    fn default() -> Self {
        let settings: EomSettings = toml::from_str("").unwrap();
        settings
    }
}

impl EomSettings {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content: String = fs::read_to_string(path.as_ref())
            .with_context(|| format!("unable to read settings file {:?}", path.as_ref()))?;
        let settings: EomSettings = toml::from_str(&content)
            .with_context(|| format!("unable to parse settings file {:?}", path.as_ref()))?;
        Ok(settings)
    }
}

#[cfg(test)]
mod test {
    use super::EomSettings;
    use crate::defaults::{SINGULARITY_THRESHOLD, TRIAL_FACTOR};

    #[test]
    fn empty_input_yields_the_defaults() {
        let settings = EomSettings::default();
        assert!(!settings.random_guess);
        assert!(!settings.spin_filter);
        assert_eq!(settings.singularity_threshold, SINGULARITY_THRESHOLD);
        assert_eq!(settings.trial_factor, TRIAL_FACTOR);
    }

    #[test]
    fn fields_can_be_overridden_individually() {
        let settings: EomSettings = toml::from_str(
            "random_guess = true\nrandom_sigma = 0.01\nsingularity_threshold = 1e-3\n",
        )
        .unwrap();
        assert!(settings.random_guess);
        assert_eq!(settings.random_sigma, 0.01);
        assert_eq!(settings.singularity_threshold, 1e-3);
        assert_eq!(settings.trial_factor, TRIAL_FACTOR);
    }
}
