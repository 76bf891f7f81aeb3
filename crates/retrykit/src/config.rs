//! Serializable retry configuration.
//!
//! [`RetryConfig`] is the plain-data form of a [`RetryPolicy`], suitable for
//! embedding in an application's TOML or JSON configuration. Predicates and
//! sleepers are code, not data, so a policy built from configuration uses the
//! defaults for both; set them afterwards through [`RetryConfig::builder`].
//!
//! ```toml
//! max_attempts = 5
//! max_duration_ms = 30000
//!
//! [backoff]
//! kind = "exponential"
//! initial_delay_ms = 100
//! factor = 2.0
//! ```

use crate::error::ConfigError;
use crate::retry::{Backoff, RetryPolicy, RetryPolicyBuilder};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Retry budgets and backoff as plain data.
///
/// Every field is optional when deserializing; missing fields take the
/// [`RetryPolicy::default`] values. `0` disables either budget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Upper bound on invocations; 0 means unbounded.
    pub max_attempts: u32,

    /// Time budget in milliseconds; 0 means unbounded.
    pub max_duration_ms: u64,

    /// Delay between attempts.
    pub backoff: BackoffConfig,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            max_duration_ms: 0,
            backoff: BackoffConfig::default(),
        }
    }
}

impl RetryConfig {
    /// Validate and turn into a policy builder, so code-only settings
    /// (predicate, sleeper) can still be added.
    pub fn builder<E: 'static>(&self) -> Result<RetryPolicyBuilder<E>, ConfigError> {
        Ok(RetryPolicy::builder()
            .max_attempts(self.max_attempts)
            .max_duration(Duration::from_millis(self.max_duration_ms))
            .backoff(self.backoff.to_backoff()?))
    }

    /// Validate and build a policy with the default predicate and sleeper.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use retrykit::config::RetryConfig;
    /// use retrykit::retry::RetryPolicy;
    ///
    /// let config: RetryConfig = serde_json::from_str(
    ///     r#"{ "max_attempts": 5, "backoff": { "kind": "fixed", "delay_ms": 50 } }"#,
    /// ).unwrap();
    ///
    /// let policy: RetryPolicy<std::io::Error> = config.into_policy().unwrap();
    /// assert_eq!(policy.max_attempts(), 5);
    /// ```
    pub fn into_policy<E: 'static>(self) -> Result<RetryPolicy<E>, ConfigError> {
        Ok(self.builder()?.build())
    }
}

/// Backoff strategy as plain data, tagged by `kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BackoffConfig {
    /// Constant delay.
    Fixed {
        /// Delay in milliseconds.
        #[serde(default = "default_delay_ms")]
        delay_ms: u64,
    },

    /// Delay multiplied by `factor` after each backoff.
    Exponential {
        /// First delay in milliseconds.
        #[serde(default = "default_delay_ms")]
        initial_delay_ms: u64,
        /// Growth factor, at least 1.0.
        #[serde(default = "default_factor")]
        factor: f64,
    },
}

fn default_delay_ms() -> u64 {
    100
}

fn default_factor() -> f64 {
    2.0
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self::Fixed {
            delay_ms: default_delay_ms(),
        }
    }
}

impl BackoffConfig {
    /// Validate and convert into a [`Backoff`].
    pub fn to_backoff(&self) -> Result<Backoff, ConfigError> {
        match *self {
            Self::Fixed { delay_ms } => Ok(Backoff::fixed(Duration::from_millis(delay_ms))),
            Self::Exponential {
                initial_delay_ms,
                factor,
            } => {
                if !factor.is_finite() || factor < 1.0 {
                    return Err(ConfigError::InvalidFactor(factor));
                }
                Ok(Backoff::exponential(
                    Duration::from_millis(initial_delay_ms),
                    factor,
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: RetryConfig = toml::from_str("").unwrap();
        assert_eq!(config, RetryConfig::default());

        let policy: RetryPolicy<std::io::Error> = config.into_policy().unwrap();
        assert_eq!(policy.max_attempts(), 3);
        assert_eq!(policy.max_duration(), Duration::ZERO);
        assert!(matches!(
            policy.backoff(),
            Backoff::Fixed(fixed) if fixed.delay() == Duration::from_millis(100)
        ));
    }

    #[test]
    fn test_exponential_from_toml() {
        let config: RetryConfig = toml::from_str(
            r#"
            max_attempts = 5
            max_duration_ms = 30000

            [backoff]
            kind = "exponential"
            initial_delay_ms = 250
            factor = 1.5
            "#,
        )
        .unwrap();

        assert_eq!(
            config.backoff,
            BackoffConfig::Exponential {
                initial_delay_ms: 250,
                factor: 1.5,
            }
        );

        let policy: RetryPolicy<std::io::Error> = config.into_policy().unwrap();
        assert_eq!(policy.max_attempts(), 5);
        assert_eq!(policy.max_duration(), Duration::from_secs(30));
        match policy.backoff() {
            Backoff::Exponential(exponential) => {
                assert_eq!(exponential.initial_delay(), Duration::from_millis(250));
                assert_eq!(exponential.factor(), 1.5);
            }
            other => panic!("expected exponential backoff, got {:?}", other),
        }
    }

    #[test]
    fn test_backoff_field_defaults() {
        let config: RetryConfig = toml::from_str(
            r#"
            [backoff]
            kind = "exponential"
            "#,
        )
        .unwrap();

        assert_eq!(
            config.backoff,
            BackoffConfig::Exponential {
                initial_delay_ms: 100,
                factor: 2.0,
            }
        );
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let result: Result<RetryConfig, _> = toml::from_str(
            r#"
            [backoff]
            kind = "fibonacci"
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_shrinking_factor_rejected() {
        let config = RetryConfig {
            backoff: BackoffConfig::Exponential {
                initial_delay_ms: 100,
                factor: 0.5,
            },
            ..Default::default()
        };

        let err = config.into_policy::<std::io::Error>().unwrap_err();
        assert_eq!(err, ConfigError::InvalidFactor(0.5));
    }

    #[test]
    fn test_non_finite_factor_rejected() {
        let backoff = BackoffConfig::Exponential {
            initial_delay_ms: 1,
            factor: f64::INFINITY,
        };
        assert!(backoff.to_backoff().is_err());
    }

    #[test]
    fn test_builder_accepts_code_settings() {
        let config: RetryConfig =
            serde_json::from_str(r#"{ "max_attempts": 0, "max_duration_ms": 500 }"#).unwrap();

        let policy: RetryPolicy<std::io::Error> = config
            .builder()
            .unwrap()
            .retry_on(|err: &std::io::Error| err.kind() == std::io::ErrorKind::TimedOut)
            .build();

        assert_eq!(policy.max_attempts(), 0);
        assert_eq!(policy.max_duration(), Duration::from_millis(500));
        assert!(!policy.should_retry(Some(&std::io::Error::other("fatal"))));
    }

    #[test]
    fn test_serialize_round_trip_shape() {
        let json = serde_json::to_value(RetryConfig::default()).unwrap();
        assert_eq!(json["backoff"]["kind"], "fixed");
        assert_eq!(json["backoff"]["delay_ms"], 100);
    }
}
