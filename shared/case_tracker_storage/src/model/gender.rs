use std::fmt;

use thiserror::Error;

/// Token that is not one of the accepted gender values
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid gender: {token}")]
pub struct InvalidEnumValue {
    /// The rejected token, as received
    pub token: String,
}

/// Gender of an inmate, stored as its numeric code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gender {
    /// Code `0`
    Female,
    /// Code `1`
    Male,
}

impl Gender {
    /// Canonical numeric encoding
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Female => 0,
            Self::Male => 1,
        }
    }
}

/// Decodes a gender token
///
/// Accepts `"female"`/`"0"` and `"male"`/`"1"`, case-insensitive.
///
/// # Errors
///
/// Returns `InvalidEnumValue` for any other token
pub fn parse_gender(text: &str) -> Result<Gender, InvalidEnumValue> {
    match text.to_lowercase().as_str() {
        "female" | "0" => Ok(Gender::Female),
        "male" | "1" => Ok(Gender::Male),
        _ => Err(InvalidEnumValue {
            token: text.to_string(),
        }),
    }
}

impl TryFrom<u8> for Gender {
    type Error = InvalidEnumValue;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        parse_gender(&code.to_string())
    }
}

impl std::str::FromStr for Gender {
    type Err = InvalidEnumValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_gender(s)
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Female => f.write_str("female"),
            Self::Male => f.write_str("male"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_gender_accepts_aliases() {
        for token in ["male", "Male", "MALE", "1"] {
            assert_eq!(parse_gender(token), Ok(Gender::Male), "token {token}");
        }
        for token in ["female", "Female", "FEMALE", "0"] {
            assert_eq!(parse_gender(token), Ok(Gender::Female), "token {token}");
        }
    }

    #[test]
    fn test_parse_gender_rejects_other_tokens() {
        for token in ["", "2", "m", "f", "unknown", " male", "01"] {
            assert_eq!(
                parse_gender(token),
                Err(InvalidEnumValue {
                    token: token.to_string()
                }),
                "token {token:?}"
            );
        }
    }

    #[test]
    fn test_code_round_trip() {
        for gender in [Gender::Female, Gender::Male] {
            assert_eq!(Gender::try_from(gender.code()), Ok(gender));
            assert_eq!(gender.to_string().parse::<Gender>(), Ok(gender));
        }
        assert!(Gender::try_from(2).is_err());
    }
}
