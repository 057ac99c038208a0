use hub_client::{
    ClientConfig, ClientError, GraphQLExecutor, GraphQLRequest, BODY_EXCERPT_CHARS,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::time::Duration;
use wiremock::{
    matchers::{body_partial_json, header, method, path},
    Mock, MockServer, ResponseTemplate,
};

const ENDPOINT: &str = "/hub/graphql";

fn config(server: &MockServer) -> ClientConfig {
    ClientConfig {
        backoff_base: Duration::from_millis(5),
        timeout: Duration::from_secs(5),
        ..ClientConfig::new(server.uri())
    }
}

fn executor(config: ClientConfig) -> GraphQLExecutor {
    GraphQLExecutor::new(config).unwrap()
}

async fn received(server: &MockServer) -> usize {
    server.received_requests().await.unwrap_or_default().len()
}

fn ok_body() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "data": { "foundations": [{ "id": "f-1" }] },
        "extensions": { "queryComplexity": 7 }
    }))
}

#[tokio::test]
async fn retries_server_errors_until_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ok_body())
        .mount(&server)
        .await;

    let outcome = executor(config(&server))
        .execute(&GraphQLRequest::new("query { foundations { id } }"))
        .await
        .unwrap();

    assert_eq!(outcome.retries, 2);
    assert_eq!(outcome.response.query_complexity(), 7);
    assert_eq!(
        outcome.response.data,
        Some(json!({ "foundations": [{ "id": "f-1" }] }))
    );
    assert_eq!(received(&server).await, 3);
}

#[tokio::test]
async fn client_errors_fail_without_retry() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(404).set_body_string("not here"))
        .mount(&server)
        .await;

    let err = executor(config(&server))
        .execute(&GraphQLRequest::new("query { a }"))
        .await
        .unwrap_err();

    match err {
        ClientError::Upstream { status, ref body } => {
            assert_eq!(status, 404);
            assert_eq!(body, "not here");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(received(&server).await, 1);
}

#[tokio::test]
async fn error_pages_are_cut_to_an_excerpt() {
    let server = MockServer::start().await;
    let page = format!("<html><body>{}</body></html>", "Bad gateway ".repeat(500));
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(400).set_body_string(page))
        .mount(&server)
        .await;

    let err = executor(config(&server))
        .execute(&GraphQLRequest::new("query { a }"))
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "GraphQL API error: HTTP 400");
    match err {
        ClientError::Upstream { status, ref body } => {
            assert_eq!(status, 400);
            assert!(body.starts_with("<html><body>Bad gateway"));
            assert_eq!(body.chars().count(), BODY_EXCERPT_CHARS + 3);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn retry_budget_is_bounded() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let err = executor(ClientConfig {
        max_retries: 2,
        ..config(&server)
    })
    .execute(&GraphQLRequest::new("query { a }"))
    .await
    .unwrap_err();

    assert_eq!(err.code(), "UPSTREAM_ERROR");
    assert_eq!(received(&server).await, 3);
}

#[tokio::test]
async fn graphql_errors_are_failures() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": null,
            "errors": [{ "message": "Cannot query field 'nope'" }]
        })))
        .mount(&server)
        .await;

    let err = executor(config(&server))
        .execute(&GraphQLRequest::new("query { nope }"))
        .await
        .unwrap_err();

    assert_eq!(err.code(), "GRAPHQL_ERROR");
    assert!(err.to_string().contains("Cannot query field 'nope'"));
    assert_eq!(received(&server).await, 1);
}

#[tokio::test]
async fn slow_upstream_times_out_per_attempt() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ok_body().set_delay(Duration::from_millis(500)))
        .mount(&server)
        .await;

    let err = executor(ClientConfig {
        timeout: Duration::from_millis(50),
        max_retries: 1,
        ..config(&server)
    })
    .execute(&GraphQLRequest::new("query { a }"))
    .await
    .unwrap_err();

    assert!(matches!(err, ClientError::Timeout(_)), "{err:?}");
    assert_eq!(received(&server).await, 2);
}

#[tokio::test]
async fn sends_token_and_camel_case_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .and(header("authorization", "Bearer secret"))
        .and(body_partial_json(json!({
            "operationName": "Q",
            "variables": { "first": 10 }
        })))
        .respond_with(ok_body())
        .mount(&server)
        .await;

    let variables = json!({ "first": 10 }).as_object().cloned().unwrap();
    let request = GraphQLRequest::new("query Q($first: Int) { a(first: $first) }")
        .with_variables(variables)
        .with_operation_name("Q");

    let outcome = executor(ClientConfig {
        token: Some("secret".to_string()),
        ..config(&server)
    })
    .execute_query(&request)
    .await
    .unwrap();

    assert_eq!(outcome.retries, 0);
}

#[tokio::test]
async fn invalid_documents_never_reach_upstream() {
    let server = MockServer::start().await;
    let executor = executor(config(&server));

    let err = executor
        .execute_query(&GraphQLRequest::new("query { a "))
        .await
        .unwrap_err();
    assert_eq!(err.code(), "SYNTAX_ERROR");
    assert!(err.to_string().contains("missing 1 closing brace(s)"));

    let err = executor
        .execute_mutation(&GraphQLRequest::new("query { a }"))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("'mutation' keyword"));

    assert_eq!(received(&server).await, 0);
}

#[tokio::test]
async fn introspect_returns_data() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "__schema": { "types": [] } }
        })))
        .mount(&server)
        .await;

    let data = executor(config(&server))
        .introspect(hub_client::INTROSPECTION_QUERY)
        .await
        .unwrap();

    assert_eq!(data, json!({ "__schema": { "types": [] } }));
}
