//! Composite passport identifier.
//!
//! Clients send the identifier as one string, `"<serie> <number>"`; the store
//! keeps the two integer components in separate columns.

use std::fmt;
use std::str::FromStr;

/// Passport identifier made of a serie and a number.
///
/// # Examples
/// ```
/// use task_tracker::domain::{Passport, parse_identifier};
///
/// let passport = parse_identifier("2233 895044").expect("well formed");
/// assert_eq!(passport, Passport::new(2233, 895_044));
/// assert_eq!(passport.to_string(), "2233 895044");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Passport {
    serie: i32,
    number: i32,
}

impl Passport {
    /// Build an identifier from already-typed components.
    #[must_use]
    pub const fn new(serie: i32, number: i32) -> Self {
        Self { serie, number }
    }

    /// Passport serie component.
    #[must_use]
    pub const fn serie(&self) -> i32 {
        self.serie
    }

    /// Passport number component.
    #[must_use]
    pub const fn number(&self) -> i32 {
        self.number
    }
}

impl fmt::Display for Passport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.serie, self.number)
    }
}

/// Reasons a raw identifier is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PassportParseError {
    /// Fewer than two whitespace-separated tokens.
    #[error(
        "Incorrect passportNumber format. Passport serie and passport number should be divided with space"
    )]
    MissingSeparator,
    /// A component is not a base-10 integer.
    #[error(
        "Incorrect passportNumber format. Passport serie and passport number must be numbers, not strings"
    )]
    NonNumeric,
}

/// Parse `"<serie> <number>"` into a [`Passport`].
///
/// Tokens after the second one are ignored.
///
/// # Errors
/// [`PassportParseError::MissingSeparator`] when there is no second token,
/// [`PassportParseError::NonNumeric`] when either component is not an integer.
pub fn parse_identifier(raw: &str) -> Result<Passport, PassportParseError> {
    let mut tokens = raw.split_whitespace();
    let (Some(serie), Some(number)) = (tokens.next(), tokens.next()) else {
        return Err(PassportParseError::MissingSeparator);
    };
    let serie = serie
        .parse::<i32>()
        .map_err(|_| PassportParseError::NonNumeric)?;
    let number = number
        .parse::<i32>()
        .map_err(|_| PassportParseError::NonNumeric)?;
    Ok(Passport::new(serie, number))
}

impl FromStr for Passport {
    type Err = PassportParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_identifier(s)
    }
}
