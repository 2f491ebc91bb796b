use lazy_static::lazy_static;
use regex::Regex;

use super::dto::{CreateUserRequest, UpdateUserRequest};
use crate::error::{AppError, FieldError};

const NAME_MIN: usize = 2;
const NAME_MAX: usize = 255;
const PASSWORD_MIN: usize = 8;
const PASSWORD_MAX: usize = 100;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

fn length_message(min: usize, max: usize) -> String {
    format!("the length must be between {min} and {max}")
}

/// Required field: blank and out-of-range are distinct violations.
fn check_required(
    field: &'static str,
    value: &str,
    min: usize,
    max: usize,
    violations: &mut Vec<FieldError>,
) {
    if value.is_empty() {
        violations.push(FieldError::new(field, "cannot be blank"));
    } else if !(min..=max).contains(&value.chars().count()) {
        violations.push(FieldError::new(field, length_message(min, max)));
    }
}

/// Optional field: absent passes, present values (empty included) must be
/// in range.
fn check_optional(
    field: &'static str,
    value: Option<&str>,
    min: usize,
    max: usize,
    violations: &mut Vec<FieldError>,
) {
    if let Some(value) = value {
        if !(min..=max).contains(&value.chars().count()) {
            violations.push(FieldError::new(field, length_message(min, max)));
        }
    }
}

/// Validates a create request. All violations are collected; the caller
/// sees every defective field in one error.
pub fn create(input: &CreateUserRequest) -> Result<(), AppError> {
    let mut violations = Vec::new();

    check_required("first_name", &input.first_name, NAME_MIN, NAME_MAX, &mut violations);
    check_required("last_name", &input.last_name, NAME_MIN, NAME_MAX, &mut violations);

    if input.email.is_empty() {
        violations.push(FieldError::new("email", "cannot be blank"));
    } else if !is_valid_email(&input.email) {
        violations.push(FieldError::new("email", "must be a valid email address"));
    }

    check_required("password", &input.password, PASSWORD_MIN, PASSWORD_MAX, &mut violations);

    if violations.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(violations))
    }
}

/// Validates an update request; every field is optional.
pub fn update(input: &UpdateUserRequest) -> Result<(), AppError> {
    let mut violations = Vec::new();

    check_optional("first_name", input.first_name.as_deref(), NAME_MIN, NAME_MAX, &mut violations);
    check_optional("last_name", input.last_name.as_deref(), NAME_MIN, NAME_MAX, &mut violations);
    check_optional("password", input.password.as_deref(), PASSWORD_MIN, PASSWORD_MAX, &mut violations);

    if violations.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(violations))
    }
}
