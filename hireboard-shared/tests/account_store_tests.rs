/// Integration tests for account writes and authentication
///
/// Run with: cargo test -p hireboard-shared --test account_store_tests

#[macro_use]
mod common;

use common::{seed_account, unique_email};
use hireboard_shared::accounts::{
    create_account, create_staff_account, set_password, update_account, AccountChanges,
    AccountError, NewAccount,
};
use hireboard_shared::auth::backend::{authenticate, AuthError};
use hireboard_shared::auth::password::verify_password;
use hireboard_shared::models::account::Account;

#[tokio::test]
async fn test_create_account_stores_hash_not_plaintext() {
    let pool = require_db!();
    let email = unique_email("create");

    let account = create_account(
        &pool,
        NewAccount {
            email: email.clone(),
            name: "Casey".to_string(),
            password: "s3cret".to_string(),
        },
    )
    .await
    .expect("account should be created");

    assert_eq!(account.email, email);
    assert_eq!(account.name, "Casey");
    assert!(account.is_active);
    assert!(!account.is_staff);
    assert!(account.last_active.is_none());
    assert_ne!(account.password_hash, "s3cret");
    assert!(verify_password("s3cret", &account.password_hash).unwrap());

    Account::delete(&pool, account.id).await.unwrap();
}

#[tokio::test]
async fn test_duplicate_email_is_rejected_and_one_row_survives() {
    let pool = require_db!();
    let email = unique_email("dup");

    let first = create_account(
        &pool,
        NewAccount {
            email: email.clone(),
            name: "First".to_string(),
            password: "password1".to_string(),
        },
    )
    .await
    .unwrap();

    let second = create_account(
        &pool,
        NewAccount {
            email: email.to_uppercase(),
            name: "Second".to_string(),
            password: "password2".to_string(),
        },
    )
    .await;

    assert!(matches!(second, Err(AccountError::EmailTaken)));
    assert_eq!(Account::count_by_email(&pool, &email).await.unwrap(), 1);

    Account::delete(&pool, first.id).await.unwrap();
}

#[tokio::test]
async fn test_short_password_creates_nothing() {
    let pool = require_db!();
    let email = unique_email("short");

    let result = create_account(
        &pool,
        NewAccount {
            email: email.clone(),
            name: String::new(),
            password: "1234".to_string(),
        },
    )
    .await;

    assert!(matches!(result, Err(AccountError::InvalidPassword(_))));
    assert!(!Account::exists_by_email(&pool, &email).await.unwrap());
}

#[tokio::test]
async fn test_create_staff_account() {
    let pool = require_db!();

    let account = create_staff_account(
        &pool,
        NewAccount {
            email: unique_email("staff"),
            name: "Operator".to_string(),
            password: "operator-pass".to_string(),
        },
    )
    .await
    .unwrap();

    assert!(account.is_staff);
    Account::delete(&pool, account.id).await.unwrap();
}

#[tokio::test]
async fn test_authenticate_failures_are_indistinguishable() {
    let pool = require_db!();
    let account = seed_account(&pool, "right-pass").await;

    let ok = authenticate(&pool, &account.email, "right-pass").await.unwrap();
    assert_eq!(ok.id, account.id);

    let wrong = authenticate(&pool, &account.email, "wrong-pass").await.unwrap_err();
    let unknown = authenticate(&pool, &unique_email("ghost"), "right-pass")
        .await
        .unwrap_err();

    update_account(
        &pool,
        account.id,
        AccountChanges {
            is_active: Some(false),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    let inactive = authenticate(&pool, &account.email, "right-pass").await.unwrap_err();

    for err in [&wrong, &unknown, &inactive] {
        assert!(matches!(err, AuthError::InvalidCredentials));
    }
    assert_eq!(wrong.to_string(), unknown.to_string());
    assert_eq!(wrong.to_string(), inactive.to_string());

    Account::delete(&pool, account.id).await.unwrap();
}

#[tokio::test]
async fn test_authenticate_does_not_trim_password() {
    let pool = require_db!();
    let account = seed_account(&pool, " spaced ").await;

    assert!(authenticate(&pool, &account.email, " spaced ").await.is_ok());
    assert!(authenticate(&pool, &account.email, "spaced").await.is_err());

    Account::delete(&pool, account.id).await.unwrap();
}

#[tokio::test]
async fn test_set_password_rehashes() {
    let pool = require_db!();
    let account = seed_account(&pool, "old-pass").await;

    let updated = set_password(&pool, account.id, "new-pass").await.unwrap();
    assert_ne!(updated.password_hash, account.password_hash);
    assert_ne!(updated.password_hash, "new-pass");

    assert!(authenticate(&pool, &account.email, "new-pass").await.is_ok());
    assert!(authenticate(&pool, &account.email, "old-pass").await.is_err());

    Account::delete(&pool, account.id).await.unwrap();
}

#[tokio::test]
async fn test_update_missing_account_is_not_found() {
    let pool = require_db!();

    let result = update_account(
        &pool,
        uuid::Uuid::new_v4(),
        AccountChanges {
            name: Some("Nobody".to_string()),
            ..Default::default()
        },
    )
    .await;

    assert!(matches!(result, Err(AccountError::NotFound)));
}

#[tokio::test]
async fn test_touch_last_active() {
    let pool = require_db!();
    let account = seed_account(&pool, "active-pass").await;

    assert!(Account::touch_last_active(&pool, account.id).await.unwrap());

    let reloaded = Account::find_by_id(&pool, account.id).await.unwrap().unwrap();
    assert!(reloaded.last_active.is_some());

    Account::delete(&pool, account.id).await.unwrap();
}

#[tokio::test]
async fn test_list_and_count_include_new_account() {
    let pool = require_db!();
    let before = Account::count(&pool).await.unwrap();

    let account = seed_account(&pool, "hunter22").await;

    assert!(Account::count(&pool).await.unwrap() >= before + 1);
    let page = Account::list(&pool, 500, 0).await.unwrap();
    assert!(page.len() <= 500);
    assert!(Account::exists_by_email(&pool, &account.email).await.unwrap());

    Account::delete(&pool, account.id).await.unwrap();
}

#[tokio::test]
async fn test_email_lookups_ignore_case() {
    let pool = require_db!();
    let account = seed_account(&pool, "right-pass").await;
    let shouted = account.email.to_uppercase();

    assert!(Account::exists_by_email(&pool, &shouted).await.unwrap());
    assert_eq!(Account::count_by_email(&pool, &shouted).await.unwrap(), 1);

    let found = Account::find_by_email(&pool, &shouted).await.unwrap().unwrap();
    assert_eq!(found.id, account.id);

    let authenticated = authenticate(&pool, &shouted, "right-pass").await.unwrap();
    assert_eq!(authenticated.id, account.id);

    Account::delete(&pool, account.id).await.unwrap();
}
