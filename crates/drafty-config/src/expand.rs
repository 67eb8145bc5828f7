//! `${VAR}` and `${VAR:-default}` expansion in string settings.

use crate::ConfigError;

/// Unset variable named in a `${VAR}` reference.
struct Unset(String);

/// Expand variable references in `value` in place.
///
/// Strings without `${` are left alone, so a literal `$` needs no escaping.
pub(crate) fn expand_in_place(value: &mut String, field: &str) -> Result<(), ConfigError> {
    if !value.contains("${") {
        return Ok(());
    }

    let expanded = shellexpand::env_with_context(value.as_str(), |name| {
        std::env::var(name)
            .map(Some)
            .map_err(|_| Unset(name.to_owned()))
    })
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{}}} not set", e.cause.0),
    })?
    .into_owned();

    *value = expanded;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_expand_uses_environment() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::set_var("DRAFTY_TEST_ACTION_HOST", "chat.example.com");
        }
        let mut value = "${DRAFTY_TEST_ACTION_HOST}".to_owned();
        expand_in_place(&mut value, "actions.host").unwrap();
        assert_eq!(value, "chat.example.com");
        unsafe {
            std::env::remove_var("DRAFTY_TEST_ACTION_HOST");
        }
    }

    #[test]
    fn test_expand_falls_back_to_default() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::remove_var("DRAFTY_TEST_UNSET_SCHEME");
        }
        let mut value = "${DRAFTY_TEST_UNSET_SCHEME:-tinode}".to_owned();
        expand_in_place(&mut value, "actions.scheme").unwrap();
        assert_eq!(value, "tinode");
    }

    #[test]
    fn test_expand_unset_names_field_and_variable() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::remove_var("DRAFTY_TEST_MISSING");
        }
        let mut value = "${DRAFTY_TEST_MISSING}".to_owned();
        let err = expand_in_place(&mut value, "style.font_family").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("DRAFTY_TEST_MISSING"));
        assert!(err.to_string().contains("style.font_family"));
    }

    #[test]
    fn test_literal_dollar_untouched() {
        let mut value = "Price $5".to_owned();
        expand_in_place(&mut value, "labels.button").unwrap();
        assert_eq!(value, "Price $5");
    }
}
