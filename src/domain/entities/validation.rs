use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;
use validator::ValidationError;

use crate::entities::option_fields::OptionField;

pub const MAX_CODES: usize = 30;

static CODE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9][A-Za-z0-9 .&()/+-]{0,31}$").expect("valid code regex")
});
static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\+?[0-9][0-9 -]{6,19}$").expect("valid phone regex")
});
static ROLL_NUMBER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9/-]{1,32}$").expect("valid roll number regex")
});

pub fn new_validation_error(code: &'static str, msg: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(msg));
    err
}

pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(new_validation_error("blank", "Must not be blank"));
    }
    Ok(())
}

/// Branch and course codes such as `CSE` or `B.Tech`.
pub fn validate_code(code: &str) -> Result<(), ValidationError> {
    if !CODE_RE.is_match(code.trim()) {
        return Err(new_validation_error("invalid_code", "Must be a short alphanumeric code"));
    }
    Ok(())
}

pub fn validate_codes(codes: &[String]) -> Result<(), ValidationError> {
    if codes.is_empty() {
        return Err(new_validation_error("empty_codes", "At least one code is required"));
    }
    if codes.len() > MAX_CODES {
        return Err(new_validation_error("too_many_codes", "Too many codes provided"));
    }
    codes.iter().try_for_each(|c| validate_code(c))
}

pub fn validate_optional_code(value: &OptionField<String>) -> Result<(), ValidationError> {
    if let OptionField::SetToValue(code) = value {
        validate_code(code)?;
    }
    Ok(())
}

pub fn validate_optional_phone(value: &OptionField<String>) -> Result<(), ValidationError> {
    if let OptionField::SetToValue(phone) = value {
        if !PHONE_RE.is_match(phone.trim()) {
            return Err(new_validation_error("invalid_phone", "Invalid phone number"));
        }
    }
    Ok(())
}

pub fn validate_optional_roll_number(value: &OptionField<String>) -> Result<(), ValidationError> {
    if let OptionField::SetToValue(roll) = value {
        if !ROLL_NUMBER_RE.is_match(roll.trim()) {
            return Err(new_validation_error("invalid_roll_number", "Invalid roll number"));
        }
    }
    Ok(())
}

/// Trims each code and drops duplicates while keeping the given order.
pub fn normalize_codes(codes: Vec<String>) -> Vec<String> {
    let mut normalized: Vec<String> = Vec::with_capacity(codes.len());
    for code in codes {
        let code = code.trim().to_string();
        if !normalized.contains(&code) {
            normalized.push(code);
        }
    }
    normalized
}
