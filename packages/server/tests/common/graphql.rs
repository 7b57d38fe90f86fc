//! GraphQL client for integration testing.
//!
//! Sends requests through the axum router in-process, so every query passes
//! the authorization gate exactly as it would over the network.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

pub struct GraphQLClient {
    router: Router,
}

/// Result of a GraphQL request.
#[derive(Debug)]
pub struct GraphQLResult {
    pub status: StatusCode,
    pub data: Option<Value>,
    pub errors: Vec<String>,
    pub body: Value,
}

impl GraphQLResult {
    fn from_response(status: StatusCode, body: Value) -> Self {
        let data = match &body["data"] {
            Value::Null => None,
            data => Some(data.clone()),
        };
        let errors = body["errors"]
            .as_array()
            .map(|errors| {
                errors
                    .iter()
                    .filter_map(|e| e["message"].as_str().map(String::from))
                    .collect()
            })
            .unwrap_or_default();

        Self {
            status,
            data,
            errors,
            body,
        }
    }

    /// Returns true if the execution had no errors.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// Unwraps the data, panicking if there were errors.
    pub fn unwrap(self) -> Value {
        if !self.errors.is_empty() {
            panic!("GraphQL errors: {:?}", self.errors);
        }
        self.data.expect("No data returned")
    }

    /// Gets a value at the given dotted path, e.g. `"authorLogin.token"`.
    pub fn get(&self, path: &str) -> Value {
        let data = self.data.as_ref().expect("No data returned");
        let mut current = data;
        for key in path.split('.') {
            current = &current[key];
        }
        current.clone()
    }

    /// The `extensions.code` of the first error, set on gate denials
    pub fn error_code(&self) -> Option<&str> {
        self.body["errors"][0]["extensions"]["code"].as_str()
    }
}

impl GraphQLClient {
    pub fn new(router: Router) -> Self {
        Self { router }
    }

    /// Anonymous request with no variables
    pub async fn query(&self, query: &str) -> GraphQLResult {
        self.execute(None, query, Value::Null).await
    }

    pub async fn query_as(&self, token: &str, query: &str) -> GraphQLResult {
        self.execute(Some(token), query, Value::Null).await
    }

    pub async fn execute(&self, token: Option<&str>, query: &str, variables: Value) -> GraphQLResult {
        let mut payload = json!({ "query": query });
        if !variables.is_null() {
            payload["variables"] = variables;
        }

        let (status, body) = self.post("/graphql", token, payload).await;
        GraphQLResult::from_response(status, body)
    }

    /// POST a batch and return one result per operation
    pub async fn batch(&self, token: Option<&str>, queries: &[&str]) -> (StatusCode, Vec<GraphQLResult>) {
        let payload = Value::Array(queries.iter().map(|q| json!({ "query": q })).collect());
        let (status, body) = self.post("/graphql/batch", token, payload).await;

        let results = body
            .as_array()
            .cloned()
            .unwrap_or_default()
            .into_iter()
            .map(|item| GraphQLResult::from_response(status, item))
            .collect();

        (status, results)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method(Method::GET)
            .uri(uri)
            .body(Body::empty())
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Router failed");
        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes();

        (status, String::from_utf8_lossy(&bytes).into_owned())
    }

    async fn post(&self, uri: &str, token: Option<&str>, payload: Value) -> (StatusCode, Value) {
        let mut builder = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = builder
            .body(Body::from(payload.to_string()))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Router failed");
        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes();

        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }
}
