use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use credential_auth::AccessClaims;
use credential_auth::PasswordSettings;
use credential_auth::PasswordScheme;
use credential_auth::TokenSettings;
use login_service::config::Config;
use login_service::login::errors::LoginError;
use login_service::login::models::EmailAddress;
use login_service::login::models::UserAccount;
use login_service::login::models::UserId;
use login_service::login::ports::AccountRepository;
use login_service::login::service::LoginService;
use login_service::startup::build_login_service;

const TEST_SECRET: &str = "test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Account store standing in for the relational storage layer
#[derive(Default)]
pub struct InMemoryAccountRepository {
    accounts: Mutex<HashMap<String, UserAccount>>,
    roles: Mutex<HashMap<UserId, Vec<String>>>,
}

impl InMemoryAccountRepository {
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn insert(&self, account: UserAccount, roles: Vec<String>) {
        self.roles.lock().unwrap().insert(account.id.clone(), roles);
        self.accounts
            .lock()
            .unwrap()
            .insert(account.email.as_str().to_string(), account);
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<UserAccount>, LoginError> {
        Ok(self.accounts.lock().unwrap().get(email.as_str()).cloned())
    }

    async fn find_role_keys(&self, id: &UserId) -> Result<Vec<String>, LoginError> {
        Ok(self
            .roles
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .unwrap_or_default())
    }
}

/// Test application wired the same way a host process wires it
pub struct TestApp {
    pub config: Config,
    pub repository: Arc<InMemoryAccountRepository>,
    pub service: LoginService<InMemoryAccountRepository>,
}

impl TestApp {
    pub fn spawn() -> Self {
        let config = Config {
            jwt: TokenSettings::new(TEST_SECRET),
            password: PasswordSettings {
                scheme: PasswordScheme::Bcrypt,
                cost: Some(4),
            },
        };

        let repository = InMemoryAccountRepository::shared();
        let service = build_login_service(&config, Arc::clone(&repository))
            .expect("Failed to build login service");

        Self {
            config,
            repository,
            service,
        }
    }

    /// Store a user and return its id
    pub fn create_user(
        &self,
        email: &str,
        password: &str,
        is_active: bool,
        roles: &[&str],
    ) -> String {
        let authenticator = self
            .config
            .authenticator()
            .expect("Failed to build authenticator");
        let id = format!("user-{}", email);

        self.repository.insert(
            UserAccount {
                id: UserId::new(id.clone()),
                email: EmailAddress::new(email).expect("Invalid email"),
                password_hash: authenticator
                    .hash_password(password)
                    .expect("Failed to hash password"),
                is_active,
            },
            roles.iter().map(|r| r.to_string()).collect(),
        );

        id
    }

    pub fn decode(&self, token: &str) -> AccessClaims {
        self.config
            .authenticator()
            .expect("Failed to build authenticator")
            .validate_token(token)
            .expect("Failed to validate token")
    }
}
