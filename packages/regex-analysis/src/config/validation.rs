//! Configuration validation

use super::error::{ConfigError, ConfigResult};

/// Trait for validatable configuration objects
///
/// # Example
/// ```rust,ignore
/// use regex_analysis::config::Validatable;
///
/// fn build<C: Validatable>(config: C) -> Result<(), ConfigError> {
///     config.validate()?;
///     Ok(())
/// }
/// ```
pub trait Validatable {
    /// Validate the configuration
    ///
    /// Returns `Ok(())` if valid, `Err(ConfigError)` with details if invalid.
    fn validate(&self) -> ConfigResult<()>;

    /// Get the configuration name for error messages
    fn config_name(&self) -> &'static str {
        "Config"
    }
}

/// Range check shared by the config structs
pub(crate) fn check_range<T>(field: &str, value: T, min: T, max: T, hint: &str) -> ConfigResult<()>
where
    T: PartialOrd + ToString,
{
    if value < min || value > max {
        return Err(ConfigError::range_with_hint(field, value, min, max, hint));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Depth(u32);

    impl Validatable for Depth {
        fn validate(&self) -> ConfigResult<()> {
            check_range("depth", self.0, 1, 10, "Depth must be positive")
        }
    }

    #[test]
    fn test_check_range_bounds_inclusive() {
        assert!(Depth(1).validate().is_ok());
        assert!(Depth(10).validate().is_ok());
        assert!(Depth(0).validate().is_err());
        assert!(Depth(11).validate().is_err());
    }

    #[test]
    fn test_default_config_name() {
        assert_eq!(Depth(1).config_name(), "Config");
    }
}
