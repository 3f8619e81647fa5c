// Demo-host error type. Every variant states *where* things went wrong.
use std::fmt::{self, Display};

#[derive(Debug)]
pub enum AppError {
    WindowInit(String),            // Creating the window failed
    WindowUpdate(String),          // Pushing the frame to the window failed
    Image(String),                 // Loading or decoding a cover/prize/seed image failed
    Engine(scratch_card::Error),   // The scratch engine rejected its configuration
}

impl Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::WindowInit(s) => write!(f, "Window init error: {s}"),
            AppError::WindowUpdate(s) => write!(f, "Window update error: {s}"),
            AppError::Image(s) => write!(f, "Image error: {s}"),
            AppError::Engine(e) => write!(f, "Scratch engine error: {e}"),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Engine(e) => Some(e),
            _ => None,
        }
    }
}

impl From<scratch_card::Error> for AppError {
    fn from(e: scratch_card::Error) -> Self {
        AppError::Engine(e)
    }
}
