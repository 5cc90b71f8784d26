use serde::{Deserialize, Serialize};

use super::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Role {
    User,
    Admin,
}

impl Role {
    /// Anything the database holds that is not `admin` degrades to the
    /// regular role rather than failing the whole row.
    pub(crate) fn from_db(raw: &str) -> Self {
        match raw {
            "admin" => Role::Admin,
            _ => Role::User,
        }
    }

    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }

    pub(crate) fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct RegisterRequest {
    pub(crate) username: String,
    pub(crate) email: String,
    pub(crate) password: String,
}

impl RegisterRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        let username = require("username", &self.username)?;
        let email = require("email", &self.email)?;
        if self.password.is_empty() {
            return Err(DomainError::Validation {
                field: "password",
                message: "must not be empty",
            });
        }
        Ok(Self {
            username,
            email,
            password: self.password,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct LoginRequest {
    pub(crate) email: String,
    pub(crate) password: String,
}

impl LoginRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        let email = require("email", &self.email)?;
        if self.password.is_empty() {
            return Err(DomainError::Validation {
                field: "password",
                message: "must not be empty",
            });
        }
        Ok(Self {
            email,
            password: self.password,
        })
    }
}

#[derive(Debug, Clone)]
pub(crate) struct User {
    pub(crate) id: i64,
    pub(crate) username: String,
    pub(crate) email: String,
    pub(crate) role: Role,
}

impl User {
    pub(crate) fn new(
        id: i64,
        username: impl Into<String>,
        email: impl Into<String>,
        role: Role,
    ) -> Result<Self, DomainError> {
        if id <= 0 {
            return Err(DomainError::Validation {
                field: "id",
                message: "must be > 0",
            });
        }
        let username = require("username", &username.into())?;
        let email = require("email", &email.into())?;

        Ok(Self {
            id,
            username,
            email,
            role,
        })
    }
}

fn require(field: &'static str, value: &str) -> Result<String, DomainError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(DomainError::Validation {
            field,
            message: "must not be empty",
        });
    }
    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::{LoginRequest, RegisterRequest, Role, User};

    #[test]
    fn role_from_db_defaults_to_user() {
        assert_eq!(Role::from_db("admin"), Role::Admin);
        assert_eq!(Role::from_db("user"), Role::User);
        assert_eq!(Role::from_db("something-else"), Role::User);
    }

    #[test]
    fn user_new_rejects_non_positive_id() {
        let result = User::new(0, "alice", "a@x.com", Role::User);
        assert!(result.is_err());
    }

    #[test]
    fn register_request_requires_all_fields() {
        let missing_email = RegisterRequest {
            username: "alice".to_string(),
            email: "   ".to_string(),
            password: "pw".to_string(),
        };
        assert!(missing_email.validate().is_err());

        let ok = RegisterRequest {
            username: "  alice  ".to_string(),
            email: "a@x.com".to_string(),
            password: "pw".to_string(),
        };
        let validated = ok.validate().expect("must be valid");
        assert_eq!(validated.username, "alice");
    }

    #[test]
    fn login_request_requires_password() {
        let req = LoginRequest {
            email: "a@x.com".to_string(),
            password: String::new(),
        };
        assert!(req.validate().is_err());
    }
}
