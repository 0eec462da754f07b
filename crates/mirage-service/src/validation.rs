//! Input validation helpers shared by the services.

use validator::{Validate, ValidationError, ValidationErrors};

use mirage_core::error::AppError;
use mirage_core::result::AppResult;

/// Run the derived validation rules of `input`.
pub fn check(input: &impl Validate) -> AppResult<()> {
    input.validate().map_err(validation_error)
}

/// Collapse field errors into one Validation error, fields in name order.
pub fn validation_error(errors: ValidationErrors) -> AppError {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    let message = fields
        .iter()
        .filter_map(|(field, errs)| {
            errs.first().map(|e| match &e.message {
                Some(message) => message.to_string(),
                None => format!("{field} is invalid"),
            })
        })
        .collect::<Vec<_>>()
        .join("; ");

    AppError::validation(message)
}

/// ASCII letters and digits only.
pub(crate) fn alphanumeric(value: &str) -> Result<(), ValidationError> {
    if value.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Ok(());
    }
    let mut err = ValidationError::new("alphanumeric");
    err.message = Some("Username may only contain letters and digits".into());
    Err(err)
}

/// Trim `value` and drop it when nothing is left.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
