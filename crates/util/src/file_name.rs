//! Validation for user-typed file names.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Characters that may not appear in a new file name.
pub const RESERVED_CHARACTERS: &[char] = &['\\', '/', ':', ',', ';', '*', '?', '"', '<', '>', '|'];

static RESERVED: Lazy<Regex> = Lazy::new(|| Regex::new(r#"[\\/:,;*?"<>|]"#).expect("reserved character pattern"));

/// Reason a typed file name was refused.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("file name must not be empty")]
    Empty,

    #[error("file name contains a reserved character: {character}")]
    ReservedCharacter { name: String, character: char },
}

/// Accepts any non-empty name free of [`RESERVED_CHARACTERS`].
///
/// The name is used verbatim; surrounding whitespace is significant.
pub fn validate_file_name(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::Empty);
    }
    if let Some(found) = RESERVED.find(name) {
        let character = found.as_str().chars().next().unwrap_or_default();
        return Err(ValidationError::ReservedCharacter {
            name: name.to_string(),
            character,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_ordinary_names() {
        assert_eq!(validate_file_name("dictionary.json"), Ok(()));
        assert_eq!(validate_file_name(".json"), Ok(()));
        assert_eq!(validate_file_name("辞書 (copy).json"), Ok(()));
    }

    #[test]
    fn rejects_empty_name() {
        assert_eq!(validate_file_name(""), Err(ValidationError::Empty));
    }

    #[test]
    fn rejects_every_reserved_character() {
        for character in RESERVED_CHARACTERS {
            let name = format!("a{character}b.json");
            let err = validate_file_name(&name).unwrap_err();
            assert_eq!(
                err,
                ValidationError::ReservedCharacter {
                    name: name.clone(),
                    character: *character,
                }
            );
        }
    }
}
