//! Boundary tests for the execution route

use atelier_core::{Preferences, EXECUTION_ENABLED};
use atelier_dispatch::{Dispatcher, EnvironmentRegistry};
use atelier_server::{exec_route, ServerState};
use atelier_test_utils::{test_user_auth, RecordingFactory, StaticFilter, TempMetaStore};
use std::sync::Arc;

struct Harness {
    fixture: TempMetaStore,
    factory: Arc<RecordingFactory>,
    state: Arc<ServerState>,
}

fn harness(enabled: bool, filter: StaticFilter) -> Harness {
    let fixture = TempMetaStore::new();
    let factory = Arc::new(RecordingFactory::new());
    let registry = Arc::new(EnvironmentRegistry::new(factory.clone()));
    let dispatcher = Dispatcher::new(
        Arc::new(fixture.metastore()),
        Arc::new(filter),
        registry,
    );
    let mut prefs = Preferences::new();
    if enabled {
        prefs.set(EXECUTION_ENABLED, true);
    }
    Harness {
        fixture,
        factory,
        state: Arc::new(ServerState { prefs, dispatcher }),
    }
}

async fn get(h: &Harness, path_and_query: &str, auth: Option<&str>) -> (u16, String) {
    let route = exec_route(h.state.clone());
    let mut req = warp::test::request().method("GET").path(path_and_query);
    if let Some(auth) = auth {
        req = req.header("authorization", auth);
    }
    let resp = req.reply(&route).await;
    (
        resp.status().as_u16(),
        String::from_utf8(resp.body().to_vec()).unwrap(),
    )
}

#[tokio::test]
async fn disabled_feature_short_circuits() {
    let h = harness(false, StaticFilter::passing());
    let (status, body) = get(
        &h,
        "/exec/ws1/proj1/main.py?command=run",
        Some(&test_user_auth()),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body, "Execution environment is disabled.\n");
    assert_eq!(h.factory.created_count(), 0);
}

#[tokio::test]
async fn missing_auth_is_rejected() {
    let h = harness(true, StaticFilter::passing());
    let (status, body) = get(&h, "/exec/ws1/proj1/main.py?command=run", None).await;
    assert_eq!(status, 200);
    assert_eq!(body, "Authentication required.\n");
}

#[tokio::test]
async fn missing_command_is_rejected() {
    let h = harness(true, StaticFilter::passing());
    let (_, body) = get(&h, "/exec/ws1/proj1/main.py", Some(&test_user_auth())).await;
    assert_eq!(body, "Missing command parameter.\n");
}

#[tokio::test]
async fn run_renders_notice_and_output() {
    let h = harness(true, StaticFilter::passing());
    h.fixture.write_file("ws1", "proj1", "src/main.py", "print(1)\n");

    let (status, body) = get(
        &h,
        "/exec/ws1/proj1/src/main.py?command=run",
        Some(&test_user_auth()),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body, "Using default configuration.\n");

    // Identity decoded from Basic auth reaches the registry
    let env = h.factory.environment("test").unwrap();
    assert_eq!(env.executions().len(), 1);
    assert_eq!(env.executions()[0].kind, "run");
}

#[tokio::test]
async fn invalid_path_renders_guidance() {
    let h = harness(true, StaticFilter::passing());
    let (status, body) = get(&h, "/exec/ws1?command=run", Some(&test_user_auth())).await;
    assert_eq!(status, 200);
    assert!(body.contains("/workspaceName/projectName"));
}

#[tokio::test]
async fn security_rejection_body_is_exactly_the_reason() {
    let h = harness(true, StaticFilter::rejecting("blocked import"));
    h.fixture.write_file("ws1", "proj1", "src/secret.py", "import os\n");

    let (status, body) = get(
        &h,
        "/exec/ws1/proj1/src/secret.py?command=run",
        Some(&test_user_auth()),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body, "blocked import\n");
    assert_eq!(h.factory.created_count(), 0);
}

#[tokio::test]
async fn cancel_needs_no_valid_path() {
    let h = harness(true, StaticFilter::rejecting("never consulted"));
    let (status, body) = get(&h, "/exec/anything?command=cancel", Some(&test_user_auth())).await;
    assert_eq!(status, 200);
    assert_eq!(body, "Execution cancelled.\n");
    let env = h.factory.environment("test").unwrap();
    assert_eq!(env.cancel_count(), 1);
}

#[tokio::test]
async fn config_parse_failure_surfaces_to_caller() {
    let h = harness(true, StaticFilter::passing());
    h.fixture
        .write_file("ws1", "proj1", "execution.conf", "interpreter = [broken");
    h.fixture.write_file("ws1", "proj1", "main.py", "");

    let (status, body) = get(
        &h,
        "/exec/ws1/proj1/main.py?command=run",
        Some(&test_user_auth()),
    )
    .await;
    assert_eq!(status, 200);
    assert!(body.starts_with("Could not parse"));
}
