mod common;

use chrono::Utc;
use common::TestApp;
use credential_auth::ConfigurationError;
use credential_auth::TokenSettings;
use login_service::config::Config;
use login_service::login::errors::LoginError;
use login_service::login::models::LoginCommand;
use login_service::login::ports::LoginServicePort;
use login_service::startup::build_login_service;

#[tokio::test]
async fn test_login_success() {
    let app = TestApp::spawn();
    let user_id = app.create_user("a@b.com", "Secret1!", true, &["admin"]);

    let outcome = app
        .service
        .login(LoginCommand::new("a@b.com", "Secret1!").unwrap())
        .await
        .expect("Login failed");

    assert_eq!(outcome.token_type, "bearer");
    assert_eq!(outcome.roles, vec!["admin".to_string()]);

    let claims = app.decode(&outcome.access_token);
    assert_eq!(claims.sub, user_id);
    assert_eq!(claims.roles, vec!["admin".to_string()]);
    assert!((claims.exp - (Utc::now().timestamp() + 3600)).abs() <= 2);
}

#[tokio::test]
async fn test_login_email_is_case_insensitive() {
    let app = TestApp::spawn();
    app.create_user("a@b.com", "Secret1!", true, &["admin"]);

    let result = app
        .service
        .login(LoginCommand::new("A@B.COM", "Secret1!").unwrap())
        .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_login_wrong_password() {
    let app = TestApp::spawn();
    app.create_user("a@b.com", "Secret1!", true, &["admin"]);

    let result = app
        .service
        .login(LoginCommand::new("a@b.com", "wrong").unwrap())
        .await;

    assert_eq!(result, Err(LoginError::InvalidCredentials));
}

#[tokio::test]
async fn test_login_inactive_user() {
    let app = TestApp::spawn();
    app.create_user("a@b.com", "Secret1!", false, &["admin"]);

    let result = app
        .service
        .login(LoginCommand::new("a@b.com", "Secret1!").unwrap())
        .await;

    assert_eq!(result, Err(LoginError::InvalidCredentials));
}

#[tokio::test]
async fn test_login_unknown_user_matches_wrong_password() {
    let app = TestApp::spawn();
    app.create_user("a@b.com", "Secret1!", true, &["admin"]);

    let unknown = app
        .service
        .login(LoginCommand::new("c@d.com", "Secret1!").unwrap())
        .await;
    let wrong = app
        .service
        .login(LoginCommand::new("a@b.com", "wrong").unwrap())
        .await;

    assert_eq!(unknown, wrong);
    assert_eq!(
        unknown.unwrap_err().to_string(),
        "Invalid credentials".to_string()
    );
}

#[tokio::test]
async fn test_login_multiple_roles() {
    let app = TestApp::spawn();
    let user_id = app.create_user("m@e.org", "pass_word!", true, &["admin", "analyst"]);

    let outcome = app
        .service
        .login(LoginCommand::new("m@e.org", "pass_word!").unwrap())
        .await
        .unwrap();

    let claims = app.decode(&outcome.access_token);
    assert_eq!(claims.sub, user_id);
    assert!(claims.has_role("admin"));
    assert!(claims.has_role("analyst"));
}

#[tokio::test]
async fn test_tokens_from_separate_logins_decode_to_same_identity() {
    let app = TestApp::spawn();
    app.create_user("a@b.com", "Secret1!", true, &["admin"]);

    let first = app
        .service
        .login(LoginCommand::new("a@b.com", "Secret1!").unwrap())
        .await
        .unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(1100)).await;
    let second = app
        .service
        .login(LoginCommand::new("a@b.com", "Secret1!").unwrap())
        .await
        .unwrap();

    assert_ne!(first.access_token, second.access_token);

    let first = app.decode(&first.access_token);
    let second = app.decode(&second.access_token);
    assert_eq!(first.sub, second.sub);
    assert_eq!(first.roles, second.roles);
}

#[test]
fn test_startup_fails_without_secret() {
    let config = Config {
        jwt: TokenSettings::default(),
        password: Default::default(),
    };

    let result = build_login_service(&config, common::InMemoryAccountRepository::shared());
    assert!(matches!(result, Err(ConfigurationError::MissingSecret)));
}
