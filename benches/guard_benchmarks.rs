use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

use forgedesk::auth::{token, CredentialStore, Guard, SessionEvidence};

fn bench_classify(c: &mut Criterion) {
    let guard = Guard::default();
    let mut group = c.benchmark_group("route_guard");

    group.bench_function("classify_protected", |b| {
        b.iter(|| guard.classify(black_box("/customer-statements/2024/03")))
    });

    group.bench_function("classify_public", |b| {
        b.iter(|| guard.classify(black_box("/api/health")))
    });

    let evidence = SessionEvidence {
        token: Some("eyJ1c2VySWQiOjF9".to_string()),
        user: None,
    };
    group.bench_function("check_with_session", |b| {
        b.iter(|| guard.check(black_box("/dashboard"), black_box(&evidence)))
    });

    group.finish();
}

fn bench_token(c: &mut Criterion) {
    let store = CredentialStore::demo();
    let profile = store
        .authenticate("admin@elegantsteelhw.com", "password123")
        .unwrap();

    c.bench_function("token_issue", |b| b.iter(|| token::issue(black_box(&profile))));

    let issued = token::issue(&profile);
    c.bench_function("token_decode", |b| {
        b.iter(|| token::decode(black_box(&issued)))
    });
}

fn bench_authenticate(c: &mut Criterion) {
    let store = CredentialStore::demo();

    c.bench_function("authenticate_hit", |b| {
        b.iter(|| {
            store.authenticate(
                black_box("employee@elegantsteelhw.com"),
                black_box("password123"),
            )
        })
    });

    c.bench_function("authenticate_miss", |b| {
        b.iter(|| store.authenticate(black_box("nobody@elegantsteelhw.com"), black_box("x")))
    });
}

criterion_group!(benches, bench_classify, bench_token, bench_authenticate);
criterion_main!(benches);
