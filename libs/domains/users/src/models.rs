use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// User entity as stored in MongoDB.
///
/// The stored password is always a salted one-way hash; the plaintext is
/// discarded at registration time. The entity itself never crosses the API
/// boundary; responses use [`UserResponse`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier (stored as _id in MongoDB)
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    /// First name, trimmed
    pub fname: String,
    /// Last name, trimmed
    pub lname: String,
    /// Email address (unique)
    pub email: String,
    /// Phone number, exactly 10 digits (unique)
    pub phone: String,
    /// Argon2 hash of the password
    pub password_hash: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// DTO for registering a new user.
///
/// Validation collects every violated rule; see [`crate::validation`] for
/// the rule set.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RegisterUser {
    #[validate(custom(function = crate::validation::validate_first_name))]
    pub fname: String,
    #[validate(custom(function = crate::validation::validate_last_name))]
    pub lname: String,
    #[validate(custom(function = crate::validation::validate_email))]
    pub email: String,
    #[validate(custom(function = crate::validation::validate_phone))]
    pub phone: String,
    #[validate(custom(function = crate::validation::validate_password))]
    pub password: String,
}

/// DTO for updating an existing user.
///
/// Only names and phone are mutable; email and password are fixed at
/// registration. Present fields are re-validated with the registration
/// rules.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateUser {
    #[validate(custom(function = crate::validation::validate_first_name))]
    pub fname: Option<String>,
    #[validate(custom(function = crate::validation::validate_last_name))]
    pub lname: Option<String>,
    #[validate(custom(function = crate::validation::validate_phone))]
    pub phone: Option<String>,
}

/// User response DTO carrying every non-secret field.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: Uuid,
    pub fname: String,
    pub lname: String,
    pub email: String,
    pub phone: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            fname: user.fname,
            lname: user.lname,
            email: user.email,
            phone: user.phone,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl User {
    /// Build a new user from a validated registration request and the
    /// already-computed password hash. Field values are stored trimmed.
    pub fn new(input: RegisterUser, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            fname: input.fname.trim().to_string(),
            lname: input.lname.trim().to_string(),
            email: input.email.trim().to_string(),
            phone: input.phone.trim().to_string(),
            password_hash,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply the mutable fields from an update request.
    pub fn apply_update(&mut self, update: UpdateUser) {
        if let Some(fname) = update.fname {
            self.fname = fname.trim().to_string();
        }
        if let Some(lname) = update.lname {
            self.lname = lname.trim().to_string();
        }
        if let Some(phone) = update.phone {
            self.phone = phone.trim().to_string();
        }
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration() -> RegisterUser {
        RegisterUser {
            fname: "  Ally  ".to_string(),
            lname: "Smith".to_string(),
            email: "ally@example.com".to_string(),
            phone: "5551234567".to_string(),
            password: "Str0ng!Pass".to_string(),
        }
    }

    #[test]
    fn new_user_stores_trimmed_fields() {
        let user = User::new(registration(), "hashed".to_string());

        assert_eq!(user.fname, "Ally");
        assert_eq!(user.lname, "Smith");
        assert_eq!(user.password_hash, "hashed");
        assert_eq!(user.created_at, user.updated_at);
    }

    #[test]
    fn apply_update_only_touches_present_fields() {
        let mut user = User::new(registration(), "hashed".to_string());
        let before = user.email.clone();

        user.apply_update(UpdateUser {
            fname: Some(" Allison ".to_string()),
            lname: None,
            phone: None,
        });

        assert_eq!(user.fname, "Allison");
        assert_eq!(user.lname, "Smith");
        assert_eq!(user.email, before);
        assert!(user.updated_at >= user.created_at);
    }

    #[test]
    fn user_response_never_serializes_a_password() {
        let response = UserResponse::from(User::new(registration(), "hashed".to_string()));
        let json = serde_json::to_value(&response).unwrap();
        let object = json.as_object().unwrap();

        assert!(!object.contains_key("password"));
        assert!(!object.contains_key("password_hash"));
    }
}
