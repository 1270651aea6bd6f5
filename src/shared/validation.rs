//! Validation Utilities

use validator::ValidationErrors;

use super::error::AppError;

/// Convert validation errors to AppError.
///
/// The message names the alphabetically first failing field.
pub fn validation_error(errors: ValidationErrors) -> AppError {
    let field_errors = errors.field_errors();
    let message = field_errors
        .iter()
        .filter_map(|(field, errs)| errs.first().map(|e| (field, e)))
        .min_by(|(a, _), (b, _)| a.cmp(b))
        .map(|(field, e)| {
            let reason = e.message.as_deref().unwrap_or(&*e.code);
            format!("{}: {}", field, reason)
        })
        .unwrap_or_else(|| "Validation failed".into());

    AppError::Validation(message)
}

/// Returns true for `None`, empty or whitespace-only strings.
pub fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}
