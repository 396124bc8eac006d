//! Partial user updates.
//!
//! [`build_update`] turns a set of optional field values into an
//! [`UpdateSpec`]: the ordered list of `(field, value)` changes a store adapter
//! renders into its own statement syntax. Fields are visited in the fixed
//! order of [`UserField::ORDERED`], so two requests touching the same fields
//! always yield the same change list.

use super::passport::Passport;
use super::user::User;

/// Mutable user attributes, in rendering order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserField {
    PassportSerie,
    PassportNumber,
    Surname,
    Name,
}

impl UserField {
    /// Every mutable field in the order updates are assembled.
    pub const ORDERED: [Self; 4] = [
        Self::PassportSerie,
        Self::PassportNumber,
        Self::Surname,
        Self::Name,
    ];

    /// Store column backing the field.
    #[must_use]
    pub const fn column(self) -> &'static str {
        match self {
            Self::PassportSerie => "passport_serie",
            Self::PassportNumber => "passport_number",
            Self::Surname => "surname",
            Self::Name => "name",
        }
    }
}

/// New value for a single field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Integer(i32),
    Text(String),
}

/// Optional replacement values for a user; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    pub passport: Option<Passport>,
    pub surname: Option<String>,
    pub name: Option<String>,
}

impl UserChanges {
    fn value_for(&self, field: UserField) -> Option<FieldValue> {
        match field {
            UserField::PassportSerie => self.passport.map(|p| FieldValue::Integer(p.serie())),
            UserField::PassportNumber => self.passport.map(|p| FieldValue::Integer(p.number())),
            UserField::Surname => self.surname.clone().map(FieldValue::Text),
            UserField::Name => self.name.clone().map(FieldValue::Text),
        }
    }
}

/// Raised when an update would not change anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum UpdateSpecError {
    #[error("No fields to update")]
    NoFields,
}

/// Non-empty, ordered list of field changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateSpec {
    changes: Vec<(UserField, FieldValue)>,
}

impl UpdateSpec {
    /// Changes in rendering order.
    #[must_use]
    pub fn changes(&self) -> &[(UserField, FieldValue)] {
        &self.changes
    }

    /// Fields touched by the update, in rendering order.
    pub fn fields(&self) -> impl Iterator<Item = UserField> + '_ {
        self.changes.iter().map(|(field, _)| *field)
    }

    /// Number of changed fields; never zero.
    #[must_use]
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    /// Always `false`: a built spec holds at least one change.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Whether the update rewrites the passport identifier.
    #[must_use]
    pub fn touches_passport(&self) -> bool {
        self.fields()
            .any(|field| matches!(field, UserField::PassportSerie | UserField::PassportNumber))
    }

    /// Apply the changes to an in-memory user.
    pub fn apply_to(&self, user: &mut User) {
        for (field, value) in &self.changes {
            match (field, value) {
                (UserField::PassportSerie, FieldValue::Integer(serie)) => {
                    user.passport = Passport::new(*serie, user.passport.number());
                }
                (UserField::PassportNumber, FieldValue::Integer(number)) => {
                    user.passport = Passport::new(user.passport.serie(), *number);
                }
                (UserField::Surname, FieldValue::Text(surname)) => user.surname.clone_from(surname),
                (UserField::Name, FieldValue::Text(name)) => user.name.clone_from(name),
                // build_update never pairs a field with the other value kind.
                _ => {}
            }
        }
    }
}

/// Collect the present fields of `changes` into an [`UpdateSpec`].
///
/// # Errors
/// [`UpdateSpecError::NoFields`] when every field is absent.
///
/// # Examples
/// ```
/// use task_tracker::domain::{build_update, FieldValue, UserChanges, UserField};
///
/// let spec = build_update(&UserChanges {
///     name: Some("Ivan".to_owned()),
///     ..UserChanges::default()
/// })
/// .expect("one field present");
/// assert_eq!(spec.changes(), &[(UserField::Name, FieldValue::Text("Ivan".to_owned()))]);
/// ```
pub fn build_update(changes: &UserChanges) -> Result<UpdateSpec, UpdateSpecError> {
    let changes: Vec<_> = UserField::ORDERED
        .into_iter()
        .filter_map(|field| changes.value_for(field).map(|value| (field, value)))
        .collect();
    if changes.is_empty() {
        return Err(UpdateSpecError::NoFields);
    }
    Ok(UpdateSpec { changes })
}
