//! Billing configuration.
//!
//! Values come from the environment with built-in fallbacks:
//!
//! | variable | default |
//! |---|---|
//! | `SHARETAB_DEFAULT_EXPENSE_NAME` | `Время, чай, вода` |
//! | `SHARETAB_REQUEST_GREETING` | `Посчитайте нас, пожалуйста.` |
//! | `SHARETAB_PEOPLE_SUFFIX` | `чел` |

use serde::{Deserialize, Serialize};
use tracing::warn;

pub const DEFAULT_EXPENSE_NAME: &str = "Время, чай, вода";
pub const DEFAULT_GREETING: &str = "Посчитайте нас, пожалуйста.";
pub const DEFAULT_PEOPLE_SUFFIX: &str = "чел";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingConfig {
    /// Name of the per-session expense every participant is auto-assigned to.
    /// It is left out of the request text since the head count covers it.
    pub default_expense_name: String,
    /// First line of the request text.
    pub greeting: String,
    /// Unit printed after the head count.
    pub people_suffix: String,
}

impl Default for BillingConfig {
    fn default() -> Self {
        Self {
            default_expense_name: DEFAULT_EXPENSE_NAME.to_string(),
            greeting: DEFAULT_GREETING.to_string(),
            people_suffix: DEFAULT_PEOPLE_SUFFIX.to_string(),
        }
    }
}

impl BillingConfig {
    /// Reads the configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`; unset or blank keys fall back
    /// to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str, default: &str| match lookup(key) {
            Some(value) if !value.trim().is_empty() => value.trim().to_string(),
            Some(_) => {
                warn!(key, default, "blank configuration value; using default");
                default.to_string()
            }
            None => default.to_string(),
        };

        Self {
            default_expense_name: read("SHARETAB_DEFAULT_EXPENSE_NAME", DEFAULT_EXPENSE_NAME),
            greeting: read("SHARETAB_REQUEST_GREETING", DEFAULT_GREETING),
            people_suffix: read("SHARETAB_PEOPLE_SUFFIX", DEFAULT_PEOPLE_SUFFIX),
        }
    }

    pub fn is_default_expense(&self, name: &str) -> bool {
        name == self.default_expense_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn lookup_overrides_and_blank_values_fall_back() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("SHARETAB_DEFAULT_EXPENSE_NAME", " Time "),
            ("SHARETAB_REQUEST_GREETING", "   "),
        ]);
        let config = BillingConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.default_expense_name, "Time");
        assert_eq!(config.greeting, DEFAULT_GREETING);
        assert_eq!(config.people_suffix, DEFAULT_PEOPLE_SUFFIX);
        assert!(config.is_default_expense("Time"));
        assert!(!config.is_default_expense(DEFAULT_EXPENSE_NAME));
    }

    #[test]
    fn empty_lookup_matches_default() {
        assert_eq!(BillingConfig::from_lookup(|_| None), BillingConfig::default());
    }
}
