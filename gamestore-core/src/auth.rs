//! Accounts, roles, and the login/signup forms.
use crate::forms::{FieldErrors, FormModel, is_valid_email};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Role gating which route family renders.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    User,
}

impl Role {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
        }
    }

    #[must_use]
    pub fn from_label(label: &str) -> Self {
        if label.trim().eq_ignore_ascii_case("admin") {
            Self::Admin
        } else {
            Self::User
        }
    }

    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().map(Self::from_label).unwrap_or_default())
    }
}

/// Basic profile of the signed-in account, also the persisted session snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    #[serde(alias = "user_id")]
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: Role,
}

impl SessionUser {
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// `GET /auth/status` payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AuthStatus {
    #[serde(rename = "isAuthenticated", default)]
    pub is_authenticated: bool,
    #[serde(default)]
    pub user: Option<SessionUser>,
}

impl AuthStatus {
    /// The signed-in user, only when the backend reports an authenticated session.
    #[must_use]
    pub fn authenticated_user(&self) -> Option<&SessionUser> {
        self.user.as_ref().filter(|_| self.is_authenticated)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewAccount {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl FormModel for LoginForm {
    type Payload = Credentials;

    fn set_field(&mut self, field: &str, value: String) {
        match field {
            "email" => self.email = value,
            "password" => self.password = value,
            _ => log::warn!("login form has no field `{field}`"),
        }
    }

    fn validate(&self) -> Result<Credentials, FieldErrors> {
        let mut errors = FieldErrors::default();
        let email = self.email.trim();
        if email.is_empty() {
            errors.insert("email", "Email is required");
        }
        if self.password.is_empty() {
            errors.insert("password", "Password is required");
        }
        errors.into_result(|| Credentials {
            email: email.to_string(),
            password: self.password.clone(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl FormModel for SignupForm {
    type Payload = NewAccount;

    fn set_field(&mut self, field: &str, value: String) {
        match field {
            "username" => self.username = value,
            "email" => self.email = value,
            "password" => self.password = value,
            "confirm_password" => self.confirm_password = value,
            _ => log::warn!("signup form has no field `{field}`"),
        }
    }

    fn validate(&self) -> Result<NewAccount, FieldErrors> {
        let mut errors = FieldErrors::default();
        let username = self.username.trim();
        let email = self.email.trim();
        if username.is_empty() {
            errors.insert("username", "Username is required");
        }
        if email.is_empty() {
            errors.insert("email", "Email is required");
        } else if !is_valid_email(email) {
            errors.insert("email", "Enter a valid email address");
        }
        if self.password.is_empty() {
            errors.insert("password", "Password is required");
        }
        if self.confirm_password != self.password {
            errors.insert("confirm_password", "Passwords do not match");
        }
        errors.into_result(|| NewAccount {
            username: username.to_string(),
            email: email.to_string(),
            password: self.password.clone(),
        })
    }
}
