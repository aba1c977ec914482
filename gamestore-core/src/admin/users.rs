use super::{AdminEntity, Mutation};
use crate::api::{StoreClient, Transport};
use crate::auth::Role;
use crate::error::ApiError;
use crate::forms::{FieldErrors, FormModel, is_valid_email, require};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminUser {
    #[serde(alias = "id")]
    pub user_id: i64,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl AdminEntity for AdminUser {
    const NOUN: &'static str = "user";

    fn id(&self) -> i64 {
        self.user_id
    }

    fn matches_term(&self, term: &str) -> bool {
        let needle = term.trim().to_lowercase();
        needle.is_empty()
            || self.username.to_lowercase().contains(&needle)
            || self.email.to_lowercase().contains(&needle)
    }

    fn category(&self) -> String {
        self.role.as_str().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserPayload {
    pub username: String,
    pub email: String,
    /// Left out on edit when unchanged.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub role: Role,
}

/// Add/Edit user modal. A password is required only when creating.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: String,
    pub editing: bool,
}

impl UserForm {
    #[must_use]
    pub fn from_user(user: &AdminUser) -> Self {
        Self {
            username: user.username.clone(),
            email: user.email.clone(),
            password: String::new(),
            role: user.role.as_str().to_string(),
            editing: true,
        }
    }
}

impl FormModel for UserForm {
    type Payload = UserPayload;

    fn set_field(&mut self, field: &str, value: String) {
        match field {
            "username" => self.username = value,
            "email" => self.email = value,
            "password" => self.password = value,
            "role" => self.role = value,
            _ => log::warn!("user form has no field `{field}`"),
        }
    }

    fn validate(&self) -> Result<UserPayload, FieldErrors> {
        let mut errors = FieldErrors::default();
        require(&mut errors, "username", &self.username, "Username is required");
        let email = self.email.trim();
        if email.is_empty() {
            errors.insert("email", "Email is required");
        } else if !is_valid_email(email) {
            errors.insert("email", "Enter a valid email address");
        }
        if !self.editing && self.password.is_empty() {
            errors.insert("password", "Password is required");
        }
        let role = self.role.trim();
        if !role.is_empty() && !matches!(role.to_ascii_lowercase().as_str(), "admin" | "user") {
            errors.insert("role", "Role must be admin or user");
        }
        errors.into_result(|| UserPayload {
            username: self.username.trim().to_string(),
            email: email.to_string(),
            password: (!self.password.is_empty()).then(|| self.password.clone()),
            role: Role::from_label(role),
        })
    }
}

/// Create (`editing == None`) or update a user.
///
/// # Errors
/// Returns the backend rejection or a transport failure.
pub async fn save_user<T: Transport>(
    client: &StoreClient<T>,
    editing: Option<i64>,
    payload: &UserPayload,
) -> Result<Mutation<AdminUser>, ApiError> {
    match editing {
        Some(id) => client
            .update_user(id, payload)
            .await
            .map(|row| Mutation::Updated(id, row)),
        None => client.create_user(payload).await.map(Mutation::Created),
    }
}
