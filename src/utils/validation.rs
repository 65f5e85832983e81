// Validation utilities
// Author: Gabriel Demetrios Lafis

/// Validate that a string value is not blank
pub fn validate_not_empty(value: &str, name: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("'{}' cannot be empty", name))
    } else {
        Ok(())
    }
}

/// Validate that a value is positive
pub fn validate_positive<T: PartialOrd + Default + std::fmt::Display>(
    value: T,
    name: &str,
) -> Result<(), String> {
    if value <= T::default() {
        Err(format!("'{}' must be positive, got {}", name, value))
    } else {
        Ok(())
    }
}

/// Validate that a value is in range
pub fn validate_range<T: PartialOrd + std::fmt::Display>(
    value: T,
    min: T,
    max: T,
    name: &str,
) -> Result<(), String> {
    if value < min || value > max {
        Err(format!(
            "'{}' must be between {} and {}, got {}",
            name, min, max, value
        ))
    } else {
        Ok(())
    }
}
