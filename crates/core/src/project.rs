//! Input rules for project writes.
//!
//! Every create and update goes through [`ProjectDraft::new`] before the
//! repository opens a transaction, so the write path only ever sees trimmed
//! text and a duplicate-free technology id list.

use std::collections::HashSet;

use crate::error::CoreError;
use crate::types::DbId;

/// Maximum length of a project name, in characters.
pub const MAX_NAME_LEN: usize = 200;

/// Maximum length of a project description, in characters.
pub const MAX_DESCRIPTION_LEN: usize = 5000;

/// Maximum number of technology ids accepted in one write.
pub const MAX_TECHNOLOGY_IDS: usize = 100;

/// Normalised project fields, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDraft {
    pub name: String,
    pub description: String,
    pub technology_ids: Vec<DbId>,
}

impl ProjectDraft {
    /// Validate and normalise raw input.
    ///
    /// - `name` is trimmed and must be non-empty, at most [`MAX_NAME_LEN`].
    /// - `description` is trimmed; `None` becomes an empty string.
    /// - `technology_ids` must be positive, at most [`MAX_TECHNOLOGY_IDS`],
    ///   and are de-duplicated, keeping the first occurrence of each id.
    pub fn new(
        name: &str,
        description: Option<&str>,
        technology_ids: &[DbId],
    ) -> Result<Self, CoreError> {
        let name = validate_name(name)?;
        let description = validate_description(description.unwrap_or_default())?;
        let technology_ids = dedup_technology_ids(technology_ids)?;
        Ok(Self {
            name,
            description,
            technology_ids,
        })
    }
}

/// Validate a project name (non-empty after trimming, <= 200 chars).
pub fn validate_name(name: &str) -> Result<String, CoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("Name must not be empty".into()));
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "Name must be at most {MAX_NAME_LEN} characters"
        )));
    }
    Ok(trimmed.to_string())
}

/// Validate a project description (<= 5000 chars after trimming).
pub fn validate_description(description: &str) -> Result<String, CoreError> {
    let trimmed = description.trim();
    if trimmed.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(CoreError::Validation(format!(
            "Description must be at most {MAX_DESCRIPTION_LEN} characters"
        )));
    }
    Ok(trimmed.to_string())
}

/// Drop repeated technology ids, preserving first-occurrence order.
///
/// Rejects lists longer than [`MAX_TECHNOLOGY_IDS`] and non-positive ids,
/// since BIGSERIAL keys start at 1.
pub fn dedup_technology_ids(ids: &[DbId]) -> Result<Vec<DbId>, CoreError> {
    if ids.len() > MAX_TECHNOLOGY_IDS {
        return Err(CoreError::Validation(format!(
            "At most {MAX_TECHNOLOGY_IDS} technology ids are allowed, got {}",
            ids.len()
        )));
    }

    let mut seen: HashSet<DbId> = HashSet::with_capacity(ids.len());
    let mut out: Vec<DbId> = Vec::with_capacity(ids.len());
    for &id in ids {
        if id <= 0 {
            return Err(CoreError::Validation(format!(
                "Invalid technology id: {id}"
            )));
        }
        if seen.insert(id) {
            out.push(id);
        }
    }
    Ok(out)
}
