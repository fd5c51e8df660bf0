use super::sim_error::SimError;

/// Represents the wake-vortex category of an aircraft.

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum WakeVortexCategory {
    Light,
    Medium,
    Heavy,
}

impl WakeVortexCategory {
    /// Converts the `WakeVortexCategory` variant to its string
    /// representation.
    pub fn as_str(&self) -> &str {
        match self {
            WakeVortexCategory::Light => "light",
            WakeVortexCategory::Medium => "medium",
            WakeVortexCategory::Heavy => "heavy",
        }
    }

    /// Creates a `WakeVortexCategory` variant from a string slice.
    pub fn from_str(category: &str) -> Result<WakeVortexCategory, SimError> {
        match category.to_lowercase().as_str() {
            "l" | "light" => Ok(WakeVortexCategory::Light),
            "m" | "medium" => Ok(WakeVortexCategory::Medium),
            "h" | "heavy" => Ok(WakeVortexCategory::Heavy),
            _ => Err(SimError::InvalidCategory(category.to_string())),
        }
    }
}
