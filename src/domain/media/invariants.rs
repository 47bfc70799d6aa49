use super::entity::MediaTitle;
use crate::domain::{DomainError, DomainResult};

/// Validates all MediaTitle invariants
pub fn validate_media_title(media: &MediaTitle) -> DomainResult<()> {
    validate_title(&media.title)?;
    validate_year(&media.year)?;
    Ok(())
}

/// Title cannot be empty
fn validate_title(title: &str) -> DomainResult<()> {
    if title.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "Media title cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// Year must be exactly four ASCII digits
fn validate_year(year: &str) -> DomainResult<()> {
    if year.len() != 4 || !year.chars().all(|c| c.is_ascii_digit()) {
        return Err(DomainError::InvariantViolation(format!(
            "Year '{}' is not a four-digit year",
            year
        )));
    }
    Ok(())
}
