//! Full pipeline against a mocked GitHub REST API and raw content host

use gitstack::present::{Presentation, RecordingPresenter};
use gitstack::session::{ContextEvent, SessionOutcome};
use gitstack::{
    GitHubSource, ProfileStatus, ScanCache, ScanOrchestrator, SignatureRegistry, StackSession, TtlPolicy,
};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn session(server: &MockServer) -> (StackSession, Arc<RecordingPresenter>) {
    let source = GitHubSource::new(
        server.uri(),
        format!("{}/raw", server.uri()),
        None,
        Duration::from_secs(5),
    )
    .unwrap();
    let orchestrator = ScanOrchestrator::new(
        Arc::new(source),
        Arc::new(SignatureRegistry::with_defaults()),
        Arc::new(ScanCache::in_memory(TtlPolicy::default())),
    );
    let presenter = Arc::new(RecordingPresenter::new());
    let session = StackSession::new(Arc::new(orchestrator), presenter.clone(), Duration::ZERO)
        .with_settle_delay(Duration::ZERO);
    (session, presenter)
}

#[tokio::test]
async fn test_repository_page_runs_deep_scan() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/octo/app"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"default_branch": "main"})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/repos/octo/app/git/trees/main"))
        .and(query_param("recursive", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "truncated": false,
            "tree": [
                {"path": "src", "type": "tree"},
                {"path": "src/index.ts", "type": "blob"},
                {"path": "package.json", "type": "blob"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/raw/octo/app/HEAD/package.json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(r#"{"dependencies":{"react":"^18"}}"#),
        )
        .mount(&server)
        .await;
    // unmatched raw requests (alternate manifests) get wiremock's default 404

    let (session, presenter) = session(&server);
    let outcome = session.handle(ContextEvent::changed("/octo/app/tree/main")).await;

    let SessionOutcome::Repository(outcome) = outcome else {
        panic!("expected a repository outcome");
    };
    assert!(!outcome.from_cache);
    assert!(!outcome.partial);
    assert_eq!(outcome.technologies, vec!["TypeScript", "React"]);
    assert_eq!(presenter.stacks()[0].technologies, vec!["TypeScript", "React"]);

    // second visit is served from cache without another tree request
    let again = session.show_repository(&gitstack::RepoRef::new("octo", "app"), &[]).await;
    assert!(again.from_cache);
}

#[tokio::test]
async fn test_rate_limited_tree_uses_visible_files() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/octo/app"))
        .respond_with(
            ResponseTemplate::new(403)
                .insert_header("x-ratelimit-remaining", "0")
                .insert_header("x-ratelimit-reset", "1700000000"),
        )
        .mount(&server)
        .await;

    let (session, presenter) = session(&server);
    let outcome = session
        .handle(ContextEvent::Changed {
            path: "/octo/app".to_string(),
            visible_files: vec!["Dockerfile".to_string(), "README.md".to_string()],
        })
        .await;

    let SessionOutcome::Repository(outcome) = outcome else {
        panic!("expected a repository outcome");
    };
    assert!(outcome.partial);
    assert_eq!(outcome.technologies, vec!["Docker"]);
    assert!(presenter.stacks()[0].is_partial);
}

#[tokio::test]
async fn test_rate_limited_profile_is_surfaced() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/octo/repos"))
        .respond_with(
            ResponseTemplate::new(429)
                .insert_header("x-ratelimit-remaining", "0")
                .insert_header("x-ratelimit-reset", "1700000000"),
        )
        .mount(&server)
        .await;

    let (session, presenter) = session(&server);
    let outcome = session.handle(ContextEvent::changed("/octo")).await;

    let SessionOutcome::Profile(report) = outcome else {
        panic!("expected a profile outcome");
    };
    assert_eq!(report.status, ProfileStatus::RateLimited);
    assert_eq!(report.rate_limit_reset.map(|r| r.timestamp()), Some(1_700_000_000));
    assert!(matches!(presenter.last(), Some(Presentation::RateLimited { .. })));
}

#[tokio::test]
async fn test_profile_page_aggregates_repositories() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/octo/repos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"name": "api", "owner": {"login": "octo"}, "default_branch": "main",
             "stargazers_count": 10, "pushed_at": "2024-05-01T00:00:00Z"},
            {"name": "site", "owner": {"login": "octo"}, "default_branch": "gh-pages",
             "stargazers_count": 2, "pushed_at": "2024-06-01T00:00:00Z"}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/repos/octo/api/git/trees/main"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tree": [{"path": "go.mod", "type": "blob"}]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/repos/octo/site/git/trees/gh-pages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tree": [{"path": "Dockerfile", "type": "blob"}]
        })))
        .mount(&server)
        .await;

    let (session, _) = session(&server);
    let SessionOutcome::Profile(report) = session.handle(ContextEvent::changed("/octo")).await else {
        panic!("expected a profile outcome");
    };

    assert_eq!(report.status, ProfileStatus::Found);
    assert_eq!(report.repo_count, 2);
    assert!(!report.is_partial());
    assert_eq!(report.technologies, vec!["Go", "Docker"]);
}
