use thiserror::Error;

#[derive(Error, Debug)]
pub enum RuleTableError {
    #[error("invalid rule table json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("rule `{0}` has no trigger keywords")]
    NoTriggers(String),

    #[error("rule `{0}` has an empty trigger keyword")]
    EmptyTrigger(String),

    #[error("duplicate rule id `{0}`")]
    DuplicateRuleId(String),
}

/// Form submissions are only checked for presence of required fields.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("required field `{0}` is missing")]
    MissingField(&'static str),

    #[error("no {kind} with id `{id}`")]
    UnknownRecord { kind: &'static str, id: String },
}

impl ValidationError {
    pub fn unknown(kind: &'static str, id: impl Into<String>) -> Self {
        Self::UnknownRecord {
            kind,
            id: id.into(),
        }
    }
}

pub(crate) fn require(value: &str, field: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::MissingField(field))
    } else {
        Ok(())
    }
}
