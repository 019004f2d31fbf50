use std::sync::Arc;

use admin_users::auth::CallerIdentity;
use admin_users::services::{AdminUserLister, ListUsersError};
use admin_users::test_utils::{
    sample_users, user_record, FailingAdminStore, FailingUserDirectory, InMemoryAdminStore,
    StaticUserDirectory, ADMIN_UID, MEMBER_UID,
};

fn lister(
    admins: &Arc<InMemoryAdminStore>,
    directory: &Arc<StaticUserDirectory>,
) -> AdminUserLister {
    AdminUserLister::new(admins.clone(), directory.clone())
}

#[actix_rt::test]
async fn anonymous_caller_is_unauthenticated_even_when_admins_exist() {
    let admins = Arc::new(InMemoryAdminStore::new([ADMIN_UID]));
    let directory = Arc::new(StaticUserDirectory::new(sample_users()));

    let err = lister(&admins, &directory)
        .list_users(&CallerIdentity::Anonymous)
        .await
        .expect_err("anonymous caller must fail");
    assert_eq!(err, ListUsersError::Unauthenticated);
    assert_eq!(admins.lookups(), 0, "no admin lookup without a caller");
    assert_eq!(directory.calls(), 0);
}

#[actix_rt::test]
async fn anonymous_caller_is_unauthenticated_when_admin_store_is_down() {
    let directory = Arc::new(StaticUserDirectory::new(sample_users()));
    let lister = AdminUserLister::new(Arc::new(FailingAdminStore), directory.clone());

    let err = lister
        .list_users(&CallerIdentity::Anonymous)
        .await
        .expect_err("anonymous caller must fail");
    assert_eq!(err, ListUsersError::Unauthenticated);
}

#[actix_rt::test]
async fn non_admin_is_denied_without_listing() {
    let admins = Arc::new(InMemoryAdminStore::new([ADMIN_UID]));
    let directory = Arc::new(StaticUserDirectory::new(sample_users()));

    let err = lister(&admins, &directory)
        .list_users(&CallerIdentity::authenticated(MEMBER_UID))
        .await
        .expect_err("non-admin must fail");
    assert_eq!(err, ListUsersError::PermissionDenied);
    assert_eq!(admins.lookups(), 1);
    assert_eq!(directory.calls(), 0, "listing must not run before the admin check passes");
}

#[actix_rt::test]
async fn admin_receives_projected_users_in_directory_order() {
    let admins = Arc::new(InMemoryAdminStore::new([ADMIN_UID]));
    let directory = Arc::new(StaticUserDirectory::new(sample_users()));

    let resp = lister(&admins, &directory)
        .list_users(&CallerIdentity::authenticated(ADMIN_UID))
        .await
        .expect("admin listing");

    let uids: Vec<&str> = resp.users.iter().map(|u| u.uid.as_str()).collect();
    assert_eq!(uids, vec!["u-alice", "u-bob", "u-anon"]);

    let alice = &resp.users[0];
    assert_eq!(alice.display_name, "Alice Admin");
    assert_eq!(alice.email.as_deref(), Some("alice@example.com"));
    assert!(alice.email_verified);
    assert!(!alice.disabled);
    assert_eq!(alice.creation_time.as_deref(), Some("Tue, 02 Jan 2024 03:04:05 GMT"));
    assert_eq!(alice.provider_data.len(), 1);
    assert_eq!(alice.provider_data[0].provider_id, "password");

    let bob = &resp.users[1];
    assert_eq!(bob.display_name, "bob");
    assert!(bob.disabled);
    assert_eq!(bob.last_sign_in_time, None);

    assert_eq!(resp.users[2].display_name, "Unknown");
    assert_eq!(directory.calls(), 1);
}

#[actix_rt::test]
async fn admin_with_empty_directory_gets_empty_list() {
    let admins = Arc::new(InMemoryAdminStore::new([ADMIN_UID]));
    let directory = Arc::new(StaticUserDirectory::new(Vec::new()));

    let resp = lister(&admins, &directory)
        .list_users(&CallerIdentity::authenticated(ADMIN_UID))
        .await
        .expect("admin listing");
    assert!(resp.users.is_empty());
}

#[actix_rt::test]
async fn directory_failure_is_internal() {
    let admins = Arc::new(InMemoryAdminStore::new([ADMIN_UID]));
    let lister = AdminUserLister::new(admins, Arc::new(FailingUserDirectory));

    let err = lister
        .list_users(&CallerIdentity::authenticated(ADMIN_UID))
        .await
        .expect_err("directory failure must fail");
    assert_eq!(err, ListUsersError::Internal);
    assert_eq!(err.to_string(), "Error listing users");
}

#[actix_rt::test]
async fn admin_store_failure_is_internal() {
    let directory = Arc::new(StaticUserDirectory::new(sample_users()));
    let lister = AdminUserLister::new(Arc::new(FailingAdminStore), directory.clone());

    let err = lister
        .list_users(&CallerIdentity::authenticated(ADMIN_UID))
        .await
        .expect_err("store failure must fail");
    assert_eq!(err, ListUsersError::Internal);
    assert_eq!(directory.calls(), 0);
}

#[actix_rt::test]
async fn repeated_calls_return_identical_results() {
    let admins = Arc::new(InMemoryAdminStore::new([ADMIN_UID]));
    let directory = Arc::new(StaticUserDirectory::new(vec![
        user_record("u-1", Some("one@example.com"), None),
        user_record("u-2", None, Some("Two")),
    ]));
    let lister = lister(&admins, &directory);
    let caller = CallerIdentity::authenticated(ADMIN_UID);

    let first = lister.list_users(&caller).await.expect("first call");
    let second = lister.list_users(&caller).await.expect("second call");
    assert_eq!(first, second);
    assert_eq!(directory.calls(), 2);
}

#[test]
fn errors_map_to_callable_codes() {
    let cases = [
        (ListUsersError::Unauthenticated, "unauthenticated", 401),
        (ListUsersError::PermissionDenied, "permission-denied", 403),
        (ListUsersError::Internal, "internal", 500),
    ];
    for (err, code, http) in cases {
        assert_eq!(err.status().code(), code);
        assert_eq!(err.status().http_status(), http);
    }
}
