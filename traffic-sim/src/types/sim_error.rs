use std::fmt;

/// Represents errors that can occur in the traffic simulation.
#[derive(Debug, PartialEq)]
pub enum SimError {
    InvalidInput,
    InvalidFlight(String),     // For invalid flight details
    DuplicateFlight(String),   // A flight with the same call sign already exists
    InvalidMovement(String),   // Unknown movement type
    InvalidCategory(String),   // Unknown wake-vortex category
    InvalidDateFormat(String), // When the date format is incorrect
    InvalidDuration(String),   // Cuando se pasa una duración inválida
    LockError(String),         // Para errores de bloqueo de estado compartido
    TimerStartError(String),   // Para errores al iniciar el Timer
    Other(String),             // Generic error case with a custom message
}

/// Implement the Display trait for user-friendly error messages
impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::InvalidInput => {
                write!(f, "Invalid input. Please check your input and try again.")
            }
            SimError::InvalidFlight(ref flight) => write!(f, "Invalid flight details: {}", flight),
            SimError::DuplicateFlight(ref call_sign) => {
                write!(f, "A flight with call sign {} already exists", call_sign)
            }
            SimError::InvalidMovement(ref movement) => {
                write!(f, "Invalid movement type: {}", movement)
            }
            SimError::InvalidCategory(ref category) => {
                write!(f, "Invalid wake-vortex category: {}", category)
            }
            SimError::InvalidDateFormat(ref date_str) => {
                write!(f, "Invalid date format: {}", date_str)
            }
            SimError::InvalidDuration(msg) => write!(f, "Invalid duration: {}", msg),
            SimError::LockError(msg) => write!(f, "Lock error: {}", msg),
            SimError::TimerStartError(msg) => write!(f, "Timer start error: {}", msg),
            SimError::Other(ref message) => write!(f, "Error: {}", message),
        }
    }
}
