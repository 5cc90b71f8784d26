use std::sync::Arc;

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{
        Error as PasswordHashError, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
        rand_core::OsRng,
    },
};

use crate::data::user_repository::{NewUser, UserRepository};
use crate::domain::error::DomainError;
use crate::domain::user::{LoginRequest, RegisterRequest, Role, User};
use crate::infrastructure::session::SessionStore;

#[derive(Debug, Clone)]
pub(crate) struct AuthResult {
    pub(crate) user: User,
    pub(crate) session_token: String,
}

pub(crate) struct AuthService<R: UserRepository> {
    repo: R,
    sessions: Arc<SessionStore>,
}

impl<R: UserRepository> AuthService<R> {
    const DUMMY_PASSWORD_HASH: &'static str = "$argon2id$v=19$m=19456,t=2,p=1$YWJjZGVmMDEyMzQ1Njc4OQ$q2P7kT1sNdk9kI95f7n2Gl3fL0qRmBf2Ffkj2r84/1M";

    pub(crate) fn new(repo: R, sessions: Arc<SessionStore>) -> Self {
        Self { repo, sessions }
    }

    pub(crate) async fn register(&self, req: RegisterRequest) -> Result<User, DomainError> {
        let req = req.validate()?;

        if self.repo.find_by_email(&req.email).await?.is_some() {
            return Err(DomainError::AlreadyExists("email".to_string()));
        }

        let password_hash = self.hash_password(&req.password)?;
        let new_user = NewUser {
            username: req.username,
            email: req.email,
            password_hash,
            role: Role::User,
        };

        // The unique constraint still backstops the pre-check under
        // concurrent registrations.
        self.repo.create_user(new_user).await
    }

    /// Startup seeding of the administrator account; registration never
    /// elevates a role, so this is the only path to `admin`. A no-op when
    /// the email is already taken, including losing the race to another
    /// instance.
    pub(crate) async fn ensure_admin(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<(), DomainError> {
        if self.repo.find_by_email(email).await?.is_some() {
            return Ok(());
        }

        let password_hash = self.hash_password(password)?;
        let new_user = NewUser {
            username: username.to_string(),
            email: email.to_string(),
            password_hash,
            role: Role::Admin,
        };

        match self.repo.create_user(new_user).await {
            Ok(_) | Err(DomainError::AlreadyExists(_)) => Ok(()),
            Err(err) => Err(err),
        }
    }

    pub(crate) async fn login(&self, req: LoginRequest) -> Result<AuthResult, DomainError> {
        let req = req.validate()?;

        let user_creds = match self.repo.find_by_email(&req.email).await? {
            Some(user_creds) => user_creds,
            None => {
                // Verify against a dummy hash so a missing user costs the
                // same as a password mismatch.
                match self.verify_password(&req.password, Self::DUMMY_PASSWORD_HASH) {
                    Ok(()) | Err(DomainError::InvalidCredentials) => {}
                    Err(err) => return Err(err),
                }
                return Err(DomainError::InvalidCredentials);
            }
        };

        self.verify_password(&req.password, &user_creds.password_hash)?;

        let session_token = self
            .sessions
            .create(user_creds.user.id, user_creds.user.role);

        Ok(AuthResult {
            user: user_creds.user,
            session_token,
        })
    }

    pub(crate) fn logout(&self, token: &str) {
        self.sessions.remove(token);
    }

    pub(crate) fn hash_password(&self, raw_password: &str) -> Result<String, DomainError> {
        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Self::argon2()?
            .hash_password(raw_password.as_bytes(), &salt)
            .map_err(|err| DomainError::Unexpected(err.to_string()))?;
        Ok(password_hash.to_string())
    }

    pub(crate) fn verify_password(
        &self,
        raw_password: &str,
        password_hash: &str,
    ) -> Result<(), DomainError> {
        let parsed_hash = PasswordHash::new(password_hash)
            .map_err(|err| DomainError::Unexpected(err.to_string()))?;
        Self::argon2()?
            .verify_password(raw_password.as_bytes(), &parsed_hash)
            .map_err(|err| match err {
                PasswordHashError::Password => DomainError::InvalidCredentials,
                _ => DomainError::Unexpected(err.to_string()),
            })?;

        Ok(())
    }

    fn argon2() -> Result<Argon2<'static>, DomainError> {
        let params = Params::new(19 * 1024, 2, 1, None)
            .map_err(|err| DomainError::Unexpected(err.to_string()))?;
        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;

    use super::AuthService;
    use crate::data::user_repository::{NewUser, UserCredentials, UserRepository};
    use crate::domain::error::DomainError;
    use crate::domain::user::{LoginRequest, RegisterRequest, Role, User};
    use crate::infrastructure::session::SessionStore;

    #[derive(Clone)]
    struct FakeUserRepo {
        created_input: Arc<Mutex<Option<NewUser>>>,
        stored_credentials: Arc<Mutex<Option<UserCredentials>>>,
        create_user_out: User,
    }

    impl FakeUserRepo {
        fn new(create_user_out: User) -> Self {
            Self {
                created_input: Arc::new(Mutex::new(None)),
                stored_credentials: Arc::new(Mutex::new(None)),
                create_user_out,
            }
        }

        fn set_credentials(&self, creds: Option<UserCredentials>) {
            *self
                .stored_credentials
                .lock()
                .expect("stored credentials mutex poisoned") = creds;
        }

        fn take_created_input(&self) -> Option<NewUser> {
            self.created_input
                .lock()
                .expect("created input mutex poisoned")
                .take()
        }
    }

    #[async_trait]
    impl UserRepository for FakeUserRepo {
        async fn create_user(&self, input: NewUser) -> Result<User, DomainError> {
            *self
                .created_input
                .lock()
                .expect("created input mutex poisoned") = Some(input);
            Ok(self.create_user_out.clone())
        }

        async fn find_by_email(
            &self,
            _email: &str,
        ) -> Result<Option<UserCredentials>, DomainError> {
            Ok(self
                .stored_credentials
                .lock()
                .expect("stored credentials mutex poisoned")
                .clone())
        }
    }

    #[tokio::test]
    async fn register_hashes_password_and_creates_user() {
        let repo = FakeUserRepo::new(sample_user(1, "alice", "a@x.com"));
        let service = AuthService::new(repo.clone(), Arc::new(SessionStore::new()));

        let req = RegisterRequest {
            username: "  alice  ".to_string(),
            email: "a@x.com".to_string(),
            password: "pw".to_string(),
        };

        let user = service.register(req).await.expect("register must succeed");
        assert_eq!(user.username, "alice");

        let created = repo
            .take_created_input()
            .expect("create_user must be called");
        assert_eq!(created.username, "alice");
        assert_eq!(created.email, "a@x.com");
        assert!(!created.password_hash.is_empty());
        assert_ne!(created.password_hash, "pw");
        assert!(!created.role.is_admin());
    }

    #[tokio::test]
    async fn ensure_admin_seeds_an_admin_account() {
        let repo = FakeUserRepo::new(sample_user(1, "admin", "admin@x.com"));
        let service = AuthService::new(repo.clone(), Arc::new(SessionStore::new()));

        service
            .ensure_admin("admin", "admin@x.com", "pw")
            .await
            .expect("seeding must succeed");

        let created = repo
            .take_created_input()
            .expect("create_user must be called");
        assert_eq!(created.username, "admin");
        assert_eq!(created.email, "admin@x.com");
        assert!(created.role.is_admin());
        assert_ne!(created.password_hash, "pw");
    }

    #[tokio::test]
    async fn ensure_admin_is_a_noop_when_the_account_exists() {
        let repo = FakeUserRepo::new(sample_user(1, "admin", "admin@x.com"));
        repo.set_credentials(Some(UserCredentials {
            user: sample_user(1, "admin", "admin@x.com"),
            password_hash: "irrelevant".to_string(),
        }));
        let service = AuthService::new(repo.clone(), Arc::new(SessionStore::new()));

        service
            .ensure_admin("admin", "admin@x.com", "pw")
            .await
            .expect("seeding must succeed");

        assert!(repo.take_created_input().is_none());
    }

    #[tokio::test]
    async fn register_rejects_duplicate_email() {
        let repo = FakeUserRepo::new(sample_user(1, "alice", "a@x.com"));
        repo.set_credentials(Some(UserCredentials {
            user: sample_user(1, "alice", "a@x.com"),
            password_hash: "irrelevant".to_string(),
        }));
        let service = AuthService::new(repo.clone(), Arc::new(SessionStore::new()));

        let req = RegisterRequest {
            username: "bob".to_string(),
            email: "a@x.com".to_string(),
            password: "pw".to_string(),
        };

        let err = service.register(req).await.expect_err("must conflict");
        assert!(matches!(err, DomainError::AlreadyExists(_)));
        assert!(repo.take_created_input().is_none());
    }

    #[tokio::test]
    async fn login_returns_invalid_credentials_for_missing_user() {
        let repo = FakeUserRepo::new(sample_user(1, "alice", "a@x.com"));
        repo.set_credentials(None);
        let service = AuthService::new(repo, Arc::new(SessionStore::new()));

        let req = LoginRequest {
            email: "a@x.com".to_string(),
            password: "some-password".to_string(),
        };

        let err = service.login(req).await.expect_err("login must fail");
        assert!(matches!(err, DomainError::InvalidCredentials));
    }

    #[tokio::test]
    async fn login_returns_invalid_credentials_for_wrong_password() {
        let repo = FakeUserRepo::new(sample_user(1, "alice", "a@x.com"));
        let service = AuthService::new(repo.clone(), Arc::new(SessionStore::new()));

        let hash = service
            .hash_password("correct-password")
            .expect("hash must be created");
        repo.set_credentials(Some(UserCredentials {
            user: sample_user(1, "alice", "a@x.com"),
            password_hash: hash,
        }));

        let req = LoginRequest {
            email: "a@x.com".to_string(),
            password: "wrong-password".to_string(),
        };

        let err = service.login(req).await.expect_err("login must fail");
        assert!(matches!(err, DomainError::InvalidCredentials));
    }

    #[tokio::test]
    async fn login_establishes_a_session_bound_to_the_user() {
        let repo = FakeUserRepo::new(sample_user(1, "alice", "a@x.com"));
        let sessions = Arc::new(SessionStore::new());
        let service = AuthService::new(repo.clone(), sessions.clone());

        let hash = service
            .hash_password("correct-password")
            .expect("hash must be created");
        repo.set_credentials(Some(UserCredentials {
            user: sample_user(1, "alice", "a@x.com"),
            password_hash: hash,
        }));

        let req = LoginRequest {
            email: "a@x.com".to_string(),
            password: "correct-password".to_string(),
        };

        let result = service.login(req).await.expect("login must succeed");
        assert_eq!(result.user.id, 1);

        let session = sessions
            .get(&result.session_token)
            .expect("session must be stored");
        assert_eq!(session.user_id, 1);
        assert!(!session.role.is_admin());
    }

    #[tokio::test]
    async fn logout_clears_the_session_and_is_idempotent() {
        let repo = FakeUserRepo::new(sample_user(1, "alice", "a@x.com"));
        let sessions = Arc::new(SessionStore::new());
        let service = AuthService::new(repo, sessions.clone());

        let token = sessions.create(1, Role::User);
        service.logout(&token);
        assert!(sessions.get(&token).is_none());

        service.logout(&token);
        service.logout("never-existed");
    }

    fn sample_user(id: i64, username: &str, email: &str) -> User {
        User::new(id, username.to_string(), email.to_string(), Role::User)
            .expect("sample user must be valid")
    }
}
