//! Registration service - business logic layer

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2,
};
use axum_helpers::collect_rule_messages;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{UserError, UserResult};
use crate::models::{RegisterUser, UpdateUser, User, UserResponse};
use crate::repository::UserRepository;

const EMAIL_TAKEN_MESSAGE: &str = "Email is already registered.";
const PHONE_TAKEN_MESSAGE: &str = "Phone number is already registered.";

/// Service implementing the registration pipeline:
/// validate → check uniqueness → mutate store → respond.
///
/// The repository is injected, so the pipeline runs against any
/// [`UserRepository`] implementation (MongoDB in production, a mock in
/// tests).
pub struct RegistrationService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> RegistrationService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Register a new user.
    ///
    /// Every violated validation rule is collected and reported together.
    /// The email and phone uniqueness pre-checks run concurrently; both
    /// collisions are reported when both fields are taken. The pre-check is
    /// best-effort only; concurrent registrations may still race it.
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn register(&self, input: RegisterUser) -> UserResult<UserResponse> {
        input
            .validate()
            .map_err(|e| UserError::Validation(collect_rule_messages(&e)))?;

        let (email_taken, phone_taken) = tokio::join!(
            self.repository.email_exists(input.email.trim()),
            self.repository.phone_exists(input.phone.trim()),
        );

        let mut collisions = Vec::new();
        if email_taken? {
            collisions.push(EMAIL_TAKEN_MESSAGE.to_string());
        }
        if phone_taken? {
            collisions.push(PHONE_TAKEN_MESSAGE.to_string());
        }
        if !collisions.is_empty() {
            return Err(UserError::Conflict(collisions));
        }

        let password_hash = hash_password(&input.password)?;
        let user = User::new(input, password_hash);
        let created = self.repository.insert(user).await?;

        tracing::info!(user_id = %created.id, "User registered");
        Ok(created.into())
    }

    /// List all users. Responses carry no password material.
    #[instrument(skip(self))]
    pub async fn list_users(&self) -> UserResult<Vec<UserResponse>> {
        let users = self.repository.list().await?;
        Ok(users.into_iter().map(Into::into).collect())
    }

    /// Update an existing user.
    ///
    /// Only names and phone are mutable. A changed phone number goes
    /// through the same uniqueness pre-check as registration.
    #[instrument(skip(self, input))]
    pub async fn update_user(&self, id: Uuid, input: UpdateUser) -> UserResult<UserResponse> {
        input
            .validate()
            .map_err(|e| UserError::Validation(collect_rule_messages(&e)))?;

        let mut user = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id))?;

        if let Some(ref phone) = input.phone {
            let phone = phone.trim();
            if phone != user.phone && self.repository.phone_exists(phone).await? {
                return Err(UserError::Conflict(vec![PHONE_TAKEN_MESSAGE.to_string()]));
            }
        }

        user.apply_update(input);
        let updated = self.repository.update(user).await?;

        tracing::info!(user_id = %id, "User updated");
        Ok(updated.into())
    }

    /// Delete a user. A second delete of the same id reports not-found.
    #[instrument(skip(self))]
    pub async fn delete_user(&self, id: Uuid) -> UserResult<()> {
        if !self.repository.delete(id).await? {
            return Err(UserError::NotFound(id));
        }

        tracing::info!(user_id = %id, "User deleted");
        Ok(())
    }
}

impl<R: UserRepository> Clone for RegistrationService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

/// Hash a password with a fresh random salt.
///
/// The plaintext is dropped by the caller right after this returns; only
/// the hash is ever stored.
fn hash_password(password: &str) -> UserResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| UserError::PasswordHash(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockUserRepository;

    fn registration() -> RegisterUser {
        RegisterUser {
            fname: "  Ally  ".to_string(),
            lname: "Smith".to_string(),
            email: "ally@example.com".to_string(),
            phone: "5551234567".to_string(),
            password: "Str0ng!Pass".to_string(),
        }
    }

    fn stored_user() -> User {
        User::new(registration(), "$argon2id$stub".to_string())
    }

    #[tokio::test]
    async fn test_register_hashes_password_and_trims_fields() {
        let mut mock_repo = MockUserRepository::new();

        mock_repo.expect_email_exists().returning(|_| Ok(false));
        mock_repo.expect_phone_exists().returning(|_| Ok(false));
        mock_repo
            .expect_insert()
            .withf(|user| {
                user.fname == "Ally"
                    && user.password_hash != "Str0ng!Pass"
                    && user.password_hash.starts_with("$argon2")
            })
            .returning(|user| Ok(user));

        let service = RegistrationService::new(mock_repo);
        let response = service.register(registration()).await.unwrap();

        assert_eq!(response.fname, "Ally");
        assert_eq!(response.email, "ally@example.com");
    }

    #[tokio::test]
    async fn test_register_reports_every_violated_rule() {
        // No expectations: the store must not be touched on invalid input.
        let service = RegistrationService::new(MockUserRepository::new());

        let input = RegisterUser {
            fname: "Al".to_string(),
            lname: "Yu".to_string(),
            email: "not-an-email".to_string(),
            phone: "123".to_string(),
            password: "weak".to_string(),
        };

        let err = service.register(input).await.unwrap_err();
        match err {
            UserError::Validation(rules) => {
                assert_eq!(rules.len(), 5, "expected all five rules: {:?}", rules)
            }
            other => panic!("expected Validation, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_register_rejects_temporary_email_regardless_of_other_fields() {
        let service = RegistrationService::new(MockUserRepository::new());

        let input = RegisterUser {
            email: "ally@mailinator.com".to_string(),
            ..registration()
        };

        let err = service.register(input).await.unwrap_err();
        match err {
            UserError::Validation(rules) => {
                assert_eq!(rules.len(), 1);
                assert!(rules[0].contains("Temporary email"));
            }
            other => panic!("expected Validation, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_register_conflict_on_duplicate_email() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo.expect_email_exists().returning(|_| Ok(true));
        mock_repo.expect_phone_exists().returning(|_| Ok(false));

        let service = RegistrationService::new(mock_repo);
        let err = service.register(registration()).await.unwrap_err();

        match err {
            UserError::Conflict(fields) => {
                assert_eq!(fields, vec![EMAIL_TAKEN_MESSAGE.to_string()])
            }
            other => panic!("expected Conflict, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_register_conflict_on_duplicate_phone() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo.expect_email_exists().returning(|_| Ok(false));
        mock_repo.expect_phone_exists().returning(|_| Ok(true));

        let service = RegistrationService::new(mock_repo);
        let err = service.register(registration()).await.unwrap_err();

        match err {
            UserError::Conflict(fields) => {
                assert_eq!(fields, vec![PHONE_TAKEN_MESSAGE.to_string()])
            }
            other => panic!("expected Conflict, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_register_reports_both_collisions_together() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo.expect_email_exists().returning(|_| Ok(true));
        mock_repo.expect_phone_exists().returning(|_| Ok(true));

        let service = RegistrationService::new(mock_repo);
        let err = service.register(registration()).await.unwrap_err();

        match err {
            UserError::Conflict(fields) => assert_eq!(fields.len(), 2),
            other => panic!("expected Conflict, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_list_responses_never_carry_password_fields() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_list()
            .returning(|| Ok(vec![stored_user()]));

        let service = RegistrationService::new(mock_repo);
        let responses = service.list_users().await.unwrap();

        let json = serde_json::to_value(&responses).unwrap();
        let record = json.as_array().unwrap()[0].as_object().unwrap().clone();
        assert!(!record.contains_key("password"));
        assert!(!record.contains_key("password_hash"));
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_not_found() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo.expect_get_by_id().returning(|_| Ok(None));

        let service = RegistrationService::new(mock_repo);
        let err = service
            .update_user(Uuid::now_v7(), UpdateUser::default())
            .await
            .unwrap_err();

        assert!(matches!(err, UserError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_rejects_taken_phone() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_get_by_id()
            .returning(|_| Ok(Some(stored_user())));
        mock_repo
            .expect_phone_exists()
            .withf(|phone| phone == "9998887777")
            .returning(|_| Ok(true));

        let service = RegistrationService::new(mock_repo);
        let input = UpdateUser {
            phone: Some("9998887777".to_string()),
            ..Default::default()
        };

        let err = service.update_user(Uuid::now_v7(), input).await.unwrap_err();
        assert!(matches!(err, UserError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_update_applies_mutable_fields_only() {
        let existing = stored_user();
        let email_before = existing.email.clone();

        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_get_by_id()
            .returning(move |_| Ok(Some(existing.clone())));
        mock_repo.expect_update().returning(|user| Ok(user));

        let service = RegistrationService::new(mock_repo);
        let input = UpdateUser {
            fname: Some("Allison".to_string()),
            ..Default::default()
        };

        let response = service.update_user(Uuid::now_v7(), input).await.unwrap();
        assert_eq!(response.fname, "Allison");
        assert_eq!(response.email, email_before);
    }

    #[tokio::test]
    async fn test_update_keeping_own_phone_skips_uniqueness_check() {
        let existing = stored_user();
        let phone = existing.phone.clone();

        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_get_by_id()
            .returning(move |_| Ok(Some(existing.clone())));
        // No phone_exists expectation: submitting the unchanged phone must
        // not trigger the duplicate check against the user's own record.
        mock_repo.expect_update().returning(|user| Ok(user));

        let service = RegistrationService::new(mock_repo);
        let input = UpdateUser {
            phone: Some(phone.clone()),
            ..Default::default()
        };

        let response = service.update_user(Uuid::now_v7(), input).await.unwrap();
        assert_eq!(response.phone, phone);
    }

    #[tokio::test]
    async fn test_delete_succeeds_when_record_matched() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo.expect_delete().returning(|_| Ok(true));

        let service = RegistrationService::new(mock_repo);
        assert!(service.delete_user(Uuid::now_v7()).await.is_ok());
    }

    #[tokio::test]
    async fn test_second_delete_of_same_id_is_not_found() {
        let mut mock_repo = MockUserRepository::new();
        let mut seq = mockall::Sequence::new();
        mock_repo
            .expect_delete()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(true));
        mock_repo
            .expect_delete()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(false));

        let service = RegistrationService::new(mock_repo);
        let id = Uuid::now_v7();

        assert!(service.delete_user(id).await.is_ok());
        let err = service.delete_user(id).await.unwrap_err();
        assert!(matches!(err, UserError::NotFound(_)));
    }
}
