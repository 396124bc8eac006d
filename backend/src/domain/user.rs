//! User records.
//!
//! A user is addressed by its store-assigned [`UserId`] and carries a unique
//! [`Passport`] identifier plus a given and family name.

use std::fmt;

use super::passport::Passport;

/// Store-assigned user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UserId(i32);

impl UserId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// Raw identifier value.
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for UserId {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

/// A persisted user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub passport: Passport,
    pub surname: String,
    pub name: String,
}

/// A user that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub passport: Passport,
    pub surname: String,
    pub name: String,
}

impl NewUser {
    /// Attach the identifier the store assigned on insert.
    #[must_use]
    pub fn into_user(self, id: UserId) -> User {
        User {
            id,
            passport: self.passport,
            surname: self.surname,
            name: self.name,
        }
    }
}
