//! Authentication and authorization tests

use forgedesk::auth::{
    require_session, token, Access, ClientSession, CredentialRecord, CredentialStore, Guard,
    MemoryStore, Navigation, Profile, RouteClass, SessionContext, SessionEvidence, TokenClaims,
    UserRole,
};
use forgedesk::error::Error;
use forgedesk::ui::nav;

fn login_into(
    session: &mut ClientSession<MemoryStore>,
    email: &str,
    password: &str,
) -> forgedesk::error::Result<()> {
    let store = CredentialStore::demo();
    let user = store.authenticate(email, password)?;
    let token = token::issue(&user);
    session.persist(&forgedesk::auth::LoginResponse { user, token })
}

#[test]
fn test_every_record_logs_in_without_secret() {
    let store = CredentialStore::demo();
    for record in store.records() {
        let profile = store
            .authenticate(&record.email, &record.password)
            .expect("seed record should log in");

        let json = serde_json::to_value(&profile).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(profile.email, record.email);
        assert!(matches!(profile.role, UserRole::Admin | UserRole::Employee));
    }
}

#[test]
fn test_non_matching_pairs_fail() {
    let store = CredentialStore::demo();
    let attempts = [
        ("admin@elegantsteelhw.com", "wrong"),
        ("employee@elegantsteelhw.com", ""),
        ("nobody@elegantsteelhw.com", "password123"),
        ("", ""),
        (" admin@elegantsteelhw.com", "password123"),
        ("admin@elegantsteelhw.com", "password123 "),
    ];

    for (email, password) in attempts {
        let result = store.authenticate(email, password);
        assert!(
            matches!(result, Err(Error::Authentication)),
            "{:?}/{:?} should be rejected",
            email,
            password
        );
    }
}

#[test]
fn test_one_users_password_does_not_open_another_account() {
    let records = vec![
        CredentialRecord {
            id: 1,
            email: "a@elegantsteelhw.com".to_string(),
            password: "alpha".to_string(),
            name: "A".to_string(),
            role: UserRole::Admin,
            status: "Active".to_string(),
        },
        CredentialRecord {
            id: 2,
            email: "b@elegantsteelhw.com".to_string(),
            password: "beta".to_string(),
            name: "B".to_string(),
            role: UserRole::Employee,
            status: "Active".to_string(),
        },
    ];
    let store = CredentialStore::new(records).unwrap();
    assert!(store.authenticate("a@elegantsteelhw.com", "beta").is_err());
    assert_eq!(store.authenticate("b@elegantsteelhw.com", "beta").unwrap().id, 2);
}

#[test]
fn test_token_round_trip_for_many_profiles() {
    let emails = ["admin@elegantsteelhw.com", "ünïcødé@example.com", "a+b@c.d", ""];
    for (i, email) in emails.iter().enumerate() {
        let profile = Profile {
            id: i as u32 * 1000,
            email: email.to_string(),
            name: "Whoever".to_string(),
            role: if i % 2 == 0 { UserRole::Admin } else { UserRole::Employee },
            status: "Active".to_string(),
        };

        let claims = token::decode(&token::issue(&profile)).expect("issued token should decode");
        assert_eq!(
            claims,
            TokenClaims {
                user_id: profile.id,
                email: profile.email.clone()
            }
        );
    }
}

#[test]
fn test_malformed_tokens() {
    for bad in ["", "not-base64!", "aGVsbG8=", "e30="] {
        assert!(
            matches!(token::decode(bad), Err(Error::MalformedToken(_))),
            "{:?} should not decode",
            bad
        );
    }
}

#[test]
fn test_guard_redirects_without_session() {
    let guard = Guard::default();
    let access = guard.check("/dashboard/x", &SessionEvidence::default());
    assert_eq!(access, Access::Redirect("/login".to_string()));
}

#[test]
fn test_guard_allows_public_paths_regardless_of_session() {
    let guard = Guard::default();
    let with_session = SessionEvidence {
        token: Some("anything".to_string()),
        user: None,
    };
    for path in ["/login", "/", "/api/auth/login", "/about"] {
        assert_eq!(guard.classify(path), RouteClass::Public);
        assert!(guard.check(path, &SessionEvidence::default()).is_allowed());
        assert!(guard.check(path, &with_session).is_allowed());
    }
}

#[test]
fn test_guard_only_checks_presence() {
    let guard = Guard::default();
    let garbage = SessionEvidence {
        token: Some("definitely not a real token".to_string()),
        user: None,
    };
    assert!(guard.check("/finances", &garbage).is_allowed());
}

#[test]
fn test_logout_clears_session() {
    let mut session = ClientSession::new(MemoryStore::new(), "/login");
    login_into(&mut session, "employee@elegantsteelhw.com", "password123").unwrap();
    assert!(session.is_authenticated());

    assert_eq!(session.logout(), Navigation::To("/login".to_string()));
    assert!(!session.is_authenticated());
    assert!(session.get_user().is_none());
}

#[test]
fn test_is_admin_by_role() {
    let mut admin = ClientSession::new(MemoryStore::new(), "/login");
    login_into(&mut admin, "admin@elegantsteelhw.com", "password123").unwrap();
    assert!(admin.is_admin());

    let mut employee = ClientSession::new(MemoryStore::new(), "/login");
    login_into(&mut employee, "employee@elegantsteelhw.com", "password123").unwrap();
    assert!(!employee.is_admin());

    let nobody = ClientSession::new(MemoryStore::new(), "/login");
    assert!(!nobody.is_admin());
}

#[test]
fn test_admin_scenario_shows_manage_users() {
    let mut session = ClientSession::new(MemoryStore::new(), "/login");
    login_into(&mut session, "admin@elegantsteelhw.com", "password123").unwrap();

    let ctx = session.snapshot();
    assert_eq!(ctx.user.as_ref().unwrap().role, UserRole::Admin);
    assert!(ctx.is_admin());
    assert!(nav::compose(&ctx)
        .iter()
        .any(|item| item.href == nav::MANAGE_USERS_HREF));
}

#[test]
fn test_wrong_password_scenario_stays_on_login() {
    let mut session = ClientSession::new(MemoryStore::new(), "/login");
    let result = login_into(&mut session, "admin@elegantsteelhw.com", "nope");
    assert!(matches!(result, Err(Error::Authentication)));

    let ctx = session.snapshot();
    assert_eq!(ctx, SessionContext::anonymous());
    assert_eq!(
        require_session(&ctx, &Guard::default(), "/dashboard"),
        Some(Navigation::To("/login".to_string()))
    );
    assert!(nav::compose(&ctx).is_empty());
}

#[test]
fn test_server_and_page_checks_share_the_decision() {
    let guard = Guard::default();

    // Both layers deny an empty session on a protected path with the same redirect.
    let server = guard.check("/orders", &SessionEvidence::default());
    let page = guard.check("/orders", &SessionContext::anonymous());
    assert_eq!(server, page);

    // A user cookie on its own satisfies the server but the page still wants a token.
    let profile_cookie = urlencoding::encode(
        r#"{"id":2,"email":"employee@elegantsteelhw.com","name":"John Employee","role":"Employee","status":"Active"}"#,
    )
    .into_owned();
    let evidence = SessionEvidence {
        token: None,
        user: Some(profile_cookie),
    };
    assert!(guard.check("/orders", &evidence).is_allowed());

    let ctx = SessionContext::from_evidence(&evidence);
    assert_eq!(ctx.user.as_ref().map(|u| u.id), Some(2));
    assert!(!guard.check("/orders", &ctx).is_allowed());
}
