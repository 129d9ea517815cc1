use std::str::FromStr;

use sea_orm::DbErr;

use crate::server::error::{internal::InternalError, AppError};

/// Parses a stored enum column into its typed value.
///
/// Used at the repository boundary when converting entities into domain models. A value
/// the application does not recognise indicates corrupted data and surfaces as a
/// `DbErr::Custom`, which the error layer turns into a 500.
///
/// # Arguments
/// - `column` - Column name, used in the error message
/// - `value` - The stored string
///
/// # Returns
/// - `Ok(T)` - Parsed value
/// - `Err(DbErr::Custom)` - Unknown stored value
pub fn parse_stored<T>(column: &'static str, value: &str) -> Result<T, DbErr>
where
    T: FromStr,
{
    value.parse::<T>().map_err(|_| {
        DbErr::Custom(
            InternalError::InvalidStoredValue {
                column,
                value: value.to_string(),
            }
            .to_string(),
        )
    })
}

/// Parses an optional stored enum column.
pub fn parse_stored_opt<T>(column: &'static str, value: Option<&str>) -> Result<Option<T>, DbErr>
where
    T: FromStr,
{
    value.map(|v| parse_stored(column, v)).transpose()
}

/// Parses a multipart text field into a typed value, mapping failure to a 400.
///
/// # Arguments
/// - `field` - Form field name, used in the error message
/// - `value` - Raw text of the field
///
/// # Returns
/// - `Ok(T)` - Parsed value
/// - `Err(AppError::BadRequest)` - The field could not be parsed
pub fn parse_form_field<T>(field: &str, value: &str) -> Result<T, AppError>
where
    T: FromStr,
{
    value
        .trim()
        .parse::<T>()
        .map_err(|_| AppError::BadRequest(format!("Invalid value for field '{}'", field)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::user::Role;

    #[test]
    fn parses_known_stored_value() {
        let role: Role = parse_stored("role", "RW").unwrap();
        assert_eq!(role, Role::Rw);
    }

    #[test]
    fn rejects_unknown_stored_value() {
        let result: Result<Role, DbErr> = parse_stored("role", "KADES");
        match result {
            Err(DbErr::Custom(msg)) => assert!(msg.contains("KADES")),
            other => panic!("Expected DbErr::Custom, got: {:?}", other),
        }
    }

    #[test]
    fn form_field_errors_are_bad_requests() {
        let result: Result<i32, AppError> = parse_form_field("resident_id", "abc");
        assert!(matches!(result, Err(AppError::BadRequest(_))));

        let parsed: i32 = parse_form_field("resident_id", " 42 ").unwrap();
        assert_eq!(parsed, 42);
    }
}
