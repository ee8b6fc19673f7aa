//! Client entity: the person or company that places orders.

use chrono::{DateTime, Utc};
use validator::Validate;

/// Contact and address data of a client.
///
/// Shared by creation, storage and patch-merge so that every write path is
/// validated against the same rules.
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct ClientProfile {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[validate(length(min = 1, message = "surname must not be empty"))]
    pub surname: String,
    #[validate(length(equal = 11, message = "nationalId must have exactly 11 characters"))]
    pub national_id: String,
    #[validate(length(min = 1, message = "phone must not be empty"))]
    pub phone: String,
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    #[validate(length(min = 1, message = "streetType must not be empty"))]
    pub street_type: String,
    #[validate(length(min = 1, message = "street must not be empty"))]
    pub street: String,
    #[validate(length(min = 1, message = "number must not be empty"))]
    pub number: String,
    #[validate(length(min = 1, message = "district must not be empty"))]
    pub district: String,
    #[validate(length(min = 1, message = "city must not be empty"))]
    pub city: String,
    #[validate(length(equal = 2, message = "state must have exactly 2 characters"))]
    pub state: String,
    #[validate(length(equal = 8, message = "postalCode must have exactly 8 characters"))]
    pub postal_code: String,
}

/// A stored client.
#[derive(Debug, Clone)]
pub struct Client {
    pub id: i64,
    pub profile: ClientProfile,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Client {
    pub fn new(
        id: i64,
        profile: ClientProfile,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            profile,
            created_at,
            updated_at,
        }
    }
}

/// Partial update for a client.
///
/// `None` means the field was not supplied and keeps its stored value.
#[derive(Debug, Clone, Default)]
pub struct ClientPatch {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub national_id: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub street_type: Option<String>,
    pub street: Option<String>,
    pub number: Option<String>,
    pub district: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
}

impl ClientPatch {
    /// Merges supplied fields over `current`.
    pub fn apply(self, current: ClientProfile) -> ClientProfile {
        ClientProfile {
            name: self.name.unwrap_or(current.name),
            surname: self.surname.unwrap_or(current.surname),
            national_id: self.national_id.unwrap_or(current.national_id),
            phone: self.phone.unwrap_or(current.phone),
            email: self.email.unwrap_or(current.email),
            street_type: self.street_type.unwrap_or(current.street_type),
            street: self.street.unwrap_or(current.street),
            number: self.number.unwrap_or(current.number),
            district: self.district.unwrap_or(current.district),
            city: self.city.unwrap_or(current.city),
            state: self.state.unwrap_or(current.state),
            postal_code: self.postal_code.unwrap_or(current.postal_code),
        }
    }
}

#[cfg(test)]
pub(crate) fn sample_profile(national_id: &str) -> ClientProfile {
    ClientProfile {
        name: "Ana".to_string(),
        surname: "Souza".to_string(),
        national_id: national_id.to_string(),
        phone: "11999990000".to_string(),
        email: "ana@example.com".to_string(),
        street_type: "Avenida".to_string(),
        street: "Paulista".to_string(),
        number: "1000".to_string(),
        district: "Bela Vista".to_string(),
        city: "Sao Paulo".to_string(),
        state: "SP".to_string(),
        postal_code: "01310100".to_string(),
    }
}
