//! Container-wide settings.

use crate::lifetime::Lifetime;

const DEFAULT_MAX_DEPTH: usize = 1024;

/// Settings shared by a root container and all of its descendants.
///
/// # Examples
///
/// ```rust
/// use ferrous_factory::{ContainerOptions, Lifetime, ServiceCollection};
///
/// let options = ContainerOptions {
///     max_depth: 64,
///     ..ContainerOptions::default()
/// };
/// assert_eq!(options.default_lifetime, Lifetime::Singleton);
///
/// let container = ServiceCollection::new().with_options(options).build();
/// assert_eq!(container.options().max_depth, 64);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct ContainerOptions {
    /// Maximum nesting of resolutions on one thread before giving up
    pub max_depth: usize,
    /// Lifetime used when the root auto-registers an undeclared constructor
    pub default_lifetime: Lifetime,
}

impl Default for ContainerOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            default_lifetime: Lifetime::Singleton,
        }
    }
}

#[cfg(feature = "config")]
impl ContainerOptions {
    /// Parses options from JSON; missing fields keep their defaults.
    ///
    /// ```rust
    /// use ferrous_factory::{ContainerOptions, Lifetime};
    ///
    /// let options = ContainerOptions::from_json(r#"{ "default_lifetime": "transient" }"#).unwrap();
    /// assert_eq!(options.default_lifetime, Lifetime::Transient);
    /// assert_eq!(options.max_depth, 1024);
    /// ```
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
