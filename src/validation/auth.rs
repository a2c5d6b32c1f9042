use crate::error::{AppError, Result};

/// Validates a provider-assigned uid.
///
/// # Arguments
///
/// * `uid` - The uid to validate.
///
/// # Returns
///
/// A `Result<()>` indicating whether the uid is valid.
pub fn validate_uid(uid: &str) -> Result<()> {
    if uid.is_empty() {
        return Err(AppError::Validation("Uid cannot be empty".to_string()));
    }

    if uid.len() > 128 {
        return Err(AppError::Validation(
            "Uid must be at most 128 characters".to_string(),
        ));
    }

    if !uid.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '-') {
        return Err(AppError::Validation(
            "Uid can only contain letters, numbers, underscores, and hyphens".to_string(),
        ));
    }

    Ok(())
}

/// Validates a display name.
pub fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(AppError::Validation("Name cannot be empty".to_string()));
    }

    if name.len() > 255 {
        return Err(AppError::Validation(
            "Name must be at most 255 characters".to_string(),
        ));
    }

    Ok(())
}

/// Validates an email address.
///
/// # Arguments
///
/// * `email` - The email address to validate.
///
/// # Returns
///
/// A `Result<()>` indicating whether the email address is valid.
pub fn validate_email(email: &str) -> Result<()> {
    if email.len() < 3 || email.len() > 255 {
        return Err(AppError::Validation(
            "Email must be between 3 and 255 characters".to_string(),
        ));
    }

    let Some((local, domain)) = email.split_once('@') else {
        return Err(AppError::Validation("Email must contain @".to_string()));
    };

    if local.is_empty() || domain.is_empty() || email.contains(char::is_whitespace) {
        return Err(AppError::Validation("Email is not valid".to_string()));
    }

    Ok(())
}

/// Validates an identity token string before it is sent to the provider.
pub fn validate_id_token(id_token: &str) -> Result<()> {
    if id_token.is_empty() {
        return Err(AppError::Validation(
            "Identity token cannot be empty".to_string(),
        ));
    }

    Ok(())
}
