//! Identifier checks for mapping descriptors.
//!
//! - Unquoted parts must match `[A-Za-z_][A-Za-z0-9_$]*`
//! - Quoted parts allow any characters except NUL and escape `"` as `""`
//! - Table and column names may be dotted (`schema.table`); property names,
//!   which become placeholder suffixes, must be a single unquoted fragment.

use crate::error::{CommandError, CommandResult};

/// Validate a table or column name, allowing dotted and quoted forms.
pub fn validate_sql_ident(s: &str) -> CommandResult<()> {
    if s.is_empty() {
        return Err(CommandError::invalid_identifier("identifier cannot be empty"));
    }
    if s.contains('\0') {
        return Err(CommandError::invalid_identifier("identifier cannot contain NUL character"));
    }

    let mut chars = s.chars().peekable();
    let mut first = true;

    while chars.peek().is_some() {
        if !first {
            match chars.next() {
                Some('.') if chars.peek().is_none() => {
                    return Err(CommandError::invalid_identifier(format!(
                        "trailing '.' in identifier '{s}'"
                    )));
                }
                Some('.') => {}
                Some(c) => {
                    return Err(CommandError::invalid_identifier(format!(
                        "expected '.' between identifier parts in '{s}', got '{c}'"
                    )));
                }
                None => break,
            }
        }
        first = false;

        if chars.peek() == Some(&'"') {
            chars.next();
            let mut len = 0usize;
            loop {
                match chars.next() {
                    Some('"') if chars.peek() == Some(&'"') => {
                        chars.next();
                        len += 1;
                    }
                    Some('"') => break,
                    Some(_) => len += 1,
                    None => {
                        return Err(CommandError::invalid_identifier(format!(
                            "unclosed quoted identifier in '{s}'"
                        )));
                    }
                }
            }
            if len == 0 {
                return Err(CommandError::invalid_identifier(format!(
                    "empty quoted identifier in '{s}'"
                )));
            }
            continue;
        }

        let mut len = 0usize;
        while let Some(&c) = chars.peek() {
            if c == '.' {
                break;
            }
            let ok = if len == 0 {
                c == '_' || c.is_ascii_alphabetic()
            } else {
                c == '_' || c == '$' || c.is_ascii_alphanumeric()
            };
            if !ok {
                return Err(CommandError::invalid_identifier(format!(
                    "invalid character '{c}' in identifier '{s}'"
                )));
            }
            len += 1;
            chars.next();
        }
        if len == 0 {
            return Err(CommandError::invalid_identifier(format!(
                "empty identifier segment in '{s}'"
            )));
        }
    }

    Ok(())
}

/// Validate a property name used verbatim after the parameter prefix.
pub fn validate_property_name(s: &str) -> CommandResult<()> {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c == '_' || c.is_ascii_alphabetic() => {}
        Some(c) => {
            return Err(CommandError::invalid_identifier(format!(
                "property name '{s}' cannot start with '{c}'"
            )));
        }
        None => {
            return Err(CommandError::invalid_identifier("property name cannot be empty"));
        }
    }
    if let Some(c) = chars.find(|c| !(*c == '_' || c.is_ascii_alphanumeric())) {
        return Err(CommandError::invalid_identifier(format!(
            "invalid character '{c}' in property name '{s}'"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ident_simple() {
        assert!(validate_sql_ident("users").is_ok());
        assert!(validate_sql_ident("public.users").is_ok());
        assert!(validate_sql_ident("my_var$1").is_ok());
    }

    #[test]
    fn ident_quoted() {
        assert!(validate_sql_ident(r#""CamelCase""#).is_ok());
        assert!(validate_sql_ident(r#""has""quote""#).is_ok());
        assert!(validate_sql_ident(r#"dbo."Order Lines".id"#).is_ok());
    }

    #[test]
    fn ident_rejects_malformed() {
        assert!(validate_sql_ident("").is_err());
        assert!(validate_sql_ident("1table").is_err());
        assert!(validate_sql_ident("my table").is_err());
        assert!(validate_sql_ident("schema..table").is_err());
        assert!(validate_sql_ident("schema.").is_err());
        assert!(validate_sql_ident(r#""unclosed"#).is_err());
        assert!(validate_sql_ident(r#""""#).is_err());
    }

    #[test]
    fn property_name_fragment() {
        assert!(validate_property_name("Id").is_ok());
        assert!(validate_property_name("_created_at2").is_ok());
        assert!(validate_property_name("").is_err());
        assert!(validate_property_name("2nd").is_err());
        assert!(validate_property_name("first.name").is_err());
        assert!(validate_property_name("a$b").is_err());
    }
}
