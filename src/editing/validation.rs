use std::fmt;

use crate::config::constants::{EMPTY_MAP_TITLE_MESSAGE, EMPTY_PLACE_DETAILS_MESSAGE, NO_MARKERS_MESSAGE};

/// User input that breaks a precondition. Shown to the user as a transient
/// message; nothing is mutated when one is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    EmptyMapTitle,
    EmptyPlaceDetails,
    NoMarkers,
}

impl ValidationError {
    pub fn message(&self) -> &'static str {
        match self {
            ValidationError::EmptyMapTitle => EMPTY_MAP_TITLE_MESSAGE,
            ValidationError::EmptyPlaceDetails => EMPTY_PLACE_DETAILS_MESSAGE,
            ValidationError::NoMarkers => NO_MARKERS_MESSAGE,
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for ValidationError {}

pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

pub fn validate_map_title(title: &str) -> Result<(), ValidationError> {
    if is_blank(title) {
        return Err(ValidationError::EmptyMapTitle);
    }
    Ok(())
}

pub fn validate_place_details(title: &str, description: &str) -> Result<(), ValidationError> {
    if is_blank(title) || is_blank(description) {
        return Err(ValidationError::EmptyPlaceDetails);
    }
    Ok(())
}
