//! Configuration for agent creation.

use std::path::PathBuf;

use crate::{
    Result,
    error::Error,
    schema::Variant,
};

/// Configuration for creating a [`DuelAgent`](crate::agent::DuelAgent).
///
/// Hyperparameters are fixed for the agent's lifetime. Defaults match the
/// values the engine was tuned with: ε = 0.1, α = 0.1, γ = 0.9.
///
/// # Examples
///
/// ```no_run
/// use duelcore::{AgentConfig, Variant};
///
/// let config = AgentConfig::new(Variant::Advanced, "/data/agent")
///     .with_epsilon(0.05)
///     .with_seed(42);
/// ```
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// Difficulty variant fixing the state/action schema
    pub variant: Variant,
    /// Directory holding the persisted tables
    pub base_dir: PathBuf,
    /// Exploration rate ε
    pub epsilon: f64,
    /// Learning rate α
    pub learning_rate: f64,
    /// Discount factor γ
    pub discount_factor: f64,
    /// Random seed for reproducibility
    pub seed: Option<u64>,
}

impl AgentConfig {
    /// Create a configuration with default hyperparameters.
    pub fn new(variant: Variant, base_dir: impl Into<PathBuf>) -> Self {
        Self {
            variant,
            base_dir: base_dir.into(),
            epsilon: 0.1,
            learning_rate: 0.1,
            discount_factor: 0.9,
            seed: None,
        }
    }

    /// Set the exploration rate ε.
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Set the learning rate α.
    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    /// Set the discount factor γ.
    pub fn with_discount_factor(mut self, discount_factor: f64) -> Self {
        self.discount_factor = discount_factor;
        self
    }

    /// Set the random seed for deterministic behavior.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub(crate) fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("epsilon", self.epsilon),
            ("learning_rate", self.learning_rate),
            ("discount_factor", self.discount_factor),
        ] {
            if !(0.0..=1.0).contains(&value) || !value.is_finite() {
                return Err(Error::Config {
                    message: format!("{name} must lie in [0, 1], got {value}"),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_tuned_hyperparameters() {
        let config = AgentConfig::new(Variant::Basic, "/tmp");
        assert_eq!(config.epsilon, 0.1);
        assert_eq!(config.learning_rate, 0.1);
        assert_eq!(config.discount_factor, 0.9);
        assert!(config.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn out_of_range_hyperparameters_are_rejected() {
        let config = AgentConfig::new(Variant::Basic, "/tmp").with_epsilon(1.5);
        assert!(config.validate().is_err());
        let config = AgentConfig::new(Variant::Basic, "/tmp").with_learning_rate(-0.1);
        assert!(config.validate().is_err());
        let config = AgentConfig::new(Variant::Basic, "/tmp").with_discount_factor(f64::NAN);
        assert!(config.validate().is_err());
    }
}
