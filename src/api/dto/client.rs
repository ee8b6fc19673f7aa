//! DTOs for client endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::dto::fields::{PatchFields, RequiredFields, trimmed};
use crate::domain::entities::{Client, ClientPatch, ClientProfile};
use crate::error::AppError;

/// Request body for `POST /clientes`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateClientRequest {
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

impl CreateClientRequest {
    /// Checks that every field is present and trims the values.
    pub fn into_profile(self) -> Result<ClientProfile, AppError> {
        let mut required = RequiredFields::default();
        let profile = ClientProfile {
            name: trimmed(required.take(self.name, "name")),
            surname: trimmed(required.take(self.surname, "surname")),
            national_id: trimmed(required.take(self.national_id, "nationalId")),
            phone: trimmed(required.take(self.phone, "phone")),
            email: trimmed(required.take(self.email, "email")),
            street_type: trimmed(required.take(self.street_type, "streetType")),
            street: trimmed(required.take(self.street, "street")),
            number: trimmed(required.take(self.number, "number")),
            district: trimmed(required.take(self.district, "district")),
            city: trimmed(required.take(self.city, "city")),
            state: trimmed(required.take(self.state, "state")),
            postal_code: trimmed(required.take(self.postal_code, "postalCode")),
        };
        required.finish()?;

        Ok(profile)
    }
}

/// Request body for `PUT /clientes/{id}`. Absent keys keep their stored value.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClientRequest {
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub name: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub surname: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub national_id: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub phone: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub email: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub street_type: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub street: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub number: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub district: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub city: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub state: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub postal_code: Option<Option<String>>,
}

impl UpdateClientRequest {
    pub fn into_patch(self) -> Result<ClientPatch, AppError> {
        let mut fields = PatchFields::default();
        let patch = ClientPatch {
            name: fields.take(self.name, "name").map(trimmed),
            surname: fields.take(self.surname, "surname").map(trimmed),
            national_id: fields.take(self.national_id, "nationalId").map(trimmed),
            phone: fields.take(self.phone, "phone").map(trimmed),
            email: fields.take(self.email, "email").map(trimmed),
            street_type: fields.take(self.street_type, "streetType").map(trimmed),
            street: fields.take(self.street, "street").map(trimmed),
            number: fields.take(self.number, "number").map(trimmed),
            district: fields.take(self.district, "district").map(trimmed),
            city: fields.take(self.city, "city").map(trimmed),
            state: fields.take(self.state, "state").map(trimmed),
            postal_code: fields.take(self.postal_code, "postalCode").map(trimmed),
        };
        fields.finish()?;

        Ok(patch)
    }
}

/// Client as returned by the API.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientResponse {
    pub id: i64,
    pub name: String,
    pub surname: String,
    pub national_id: String,
    pub phone: String,
    pub email: String,
    pub street_type: String,
    pub street: String,
    pub number: String,
    pub district: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Client> for ClientResponse {
    fn from(c: Client) -> Self {
        let p = c.profile;
        Self {
            id: c.id,
            name: p.name,
            surname: p.surname,
            national_id: p.national_id,
            phone: p.phone,
            email: p.email,
            street_type: p.street_type,
            street: p.street,
            number: p.number,
            district: p.district,
            city: p.city,
            state: p.state,
            postal_code: p.postal_code,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

/// Response for `POST /clientes`.
#[derive(Debug, Serialize)]
pub struct ClientCreatedResponse {
    pub message: &'static str,
    pub id_cliente: i64,
    pub data: ClientResponse,
}
