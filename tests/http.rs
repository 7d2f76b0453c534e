//! Sync runs against a mock HTTP server.

use std::fs;
use std::time::Duration;

use rule_sync::{
    FailureReason, HttpRuleSource, Outcome, RuleFilter, RuleManifest, RuleSyncer, SyncRequest,
};
use tempfile::tempdir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Serves `body` for `GET /rules/<identifier>`
async fn mount_rule(server: &MockServer, identifier: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/rules/{identifier}")))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

fn syncer_for(server: &MockServer, rules: &[&str], timeout: Duration) -> RuleSyncer<HttpRuleSource> {
    let source = HttpRuleSource::new(format!("{}/rules", server.uri()), timeout).unwrap();
    RuleSyncer::new(RuleManifest::new(rules.iter().copied()).unwrap(), source)
}

#[tokio::test]
async fn test_downloads_all_rules() {
    let server = MockServer::start().await;
    mount_rule(&server, "a.mdc", "# Alpha").await;
    mount_rule(&server, "b.mdc", "# Beta").await;

    let dir = tempdir().unwrap();
    let syncer = syncer_for(&server, &["a.mdc", "b.mdc"], Duration::from_secs(10));

    let summary = syncer.run(&SyncRequest::new(dir.path())).await.unwrap();

    assert_eq!(summary.downloaded(), 2);
    let rules_dir = dir.path().join(".cursor").join("rules");
    assert_eq!(fs::read_to_string(rules_dir.join("a.mdc")).unwrap(), "# Alpha");
    assert_eq!(fs::read_to_string(rules_dir.join("b.mdc")).unwrap(), "# Beta");
}

#[tokio::test]
async fn test_non_success_status_is_recorded() {
    let server = MockServer::start().await;
    mount_rule(&server, "a.mdc", "# Alpha").await;
    Mock::given(method("GET"))
        .and(path("/rules/b.mdc"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    let syncer = syncer_for(&server, &["a.mdc", "b.mdc"], Duration::from_secs(10));

    let summary = syncer.run(&SyncRequest::new(dir.path())).await.unwrap();

    assert_eq!(summary.outcome_of("a.mdc"), Some(&Outcome::Downloaded));
    assert_eq!(
        summary.outcome_of("b.mdc"),
        Some(&Outcome::Failed {
            reason: FailureReason::Status(404)
        })
    );
    assert!(!dir.path().join(".cursor/rules/b.mdc").exists());
}

#[tokio::test]
async fn test_slow_response_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rules/slow.mdc"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("late")
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;
    mount_rule(&server, "fast.mdc", "quick").await;

    let dir = tempdir().unwrap();
    let syncer = syncer_for(&server, &["slow.mdc", "fast.mdc"], Duration::from_millis(500));

    let summary = syncer.run(&SyncRequest::new(dir.path())).await.unwrap();

    assert_eq!(
        summary.outcome_of("slow.mdc"),
        Some(&Outcome::Failed {
            reason: FailureReason::Timeout
        })
    );
    assert_eq!(summary.outcome_of("fast.mdc"), Some(&Outcome::Downloaded));
    assert!(!dir.path().join(".cursor/rules/slow.mdc").exists());
}

#[tokio::test]
async fn test_unreachable_remote_is_transport_failure() {
    // Bind and drop a listener so its port is closed
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let source = HttpRuleSource::new(format!("http://127.0.0.1:{port}"), Duration::from_secs(5))
        .unwrap();
    let syncer = RuleSyncer::new(RuleManifest::new(["a.mdc"]).unwrap(), source);
    let dir = tempdir().unwrap();

    let summary = syncer.run(&SyncRequest::new(dir.path())).await.unwrap();

    assert_eq!(summary.failed(), 1);
    let (identifier, reason) = summary.failures().next().unwrap();
    assert_eq!(identifier, "a.mdc");
    assert!(matches!(
        reason,
        FailureReason::Transport(_) | FailureReason::Timeout
    ));
}

#[tokio::test]
async fn test_filter_only_requests_matching_rules() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rules/alpha.mdc"))
        .respond_with(ResponseTemplate::new(200).set_body_string("a"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rules/beta.mdc"))
        .respond_with(ResponseTemplate::new(200).set_body_string("b"))
        .expect(0)
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    let syncer = syncer_for(&server, &["alpha.mdc", "beta.mdc"], Duration::from_secs(10));
    let request =
        SyncRequest::new(dir.path()).with_filter(Some(RuleFilter::parse("a*").unwrap()));

    let summary = syncer.run(&request).await.unwrap();

    assert_eq!(summary.outcomes.len(), 1);
    server.verify().await;
}

#[tokio::test]
async fn test_nested_rule_path() {
    let server = MockServer::start().await;
    mount_rule(&server, "python/fastapi.mdc", "# FastAPI").await;

    let dir = tempdir().unwrap();
    let syncer = syncer_for(&server, &["python/fastapi.mdc"], Duration::from_secs(10));

    let summary = syncer.run(&SyncRequest::new(dir.path())).await.unwrap();

    assert_eq!(summary.downloaded(), 1);
    assert_eq!(
        fs::read_to_string(dir.path().join(".cursor/rules/python/fastapi.mdc")).unwrap(),
        "# FastAPI"
    );
}

#[tokio::test]
async fn test_reserved_characters_fetch_the_named_rule() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rules/c%23.mdc"))
        .respond_with(ResponseTemplate::new(200).set_body_string("# C#"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rules/c"))
        .respond_with(ResponseTemplate::new(200).set_body_string("other rule"))
        .expect(0)
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    let syncer = syncer_for(&server, &["c#.mdc"], Duration::from_secs(10));

    let summary = syncer.run(&SyncRequest::new(dir.path())).await.unwrap();

    assert_eq!(summary.outcome_of("c#.mdc"), Some(&Outcome::Downloaded));
    assert_eq!(
        fs::read_to_string(dir.path().join(".cursor/rules/c#.mdc")).unwrap(),
        "# C#"
    );
    server.verify().await;
}
