use axum::{
    extract::Extension,
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use juniper::http::{GraphQLBatchRequest, GraphQLRequest};
use serde_json::{json, Value};
use tracing::{debug, error};

use crate::common::{AuthError, Operation, RequestContext};
use crate::server::app::AppState;
use crate::server::graphql::GraphQLContext;

/// GraphQL POST endpoint
pub async fn graphql_handler(
    Extension(state): Extension<AppState>,
    headers: HeaderMap,
    Json(request): Json<GraphQLRequest>,
) -> Response {
    let (status, body) = execute_gated(&state, &headers, request).await;
    (status, Json(body)).into_response()
}

/// GraphQL batch POST endpoint
///
/// Every operation in the batch is authorized on its own; one denial does not
/// stop the others from running.
pub async fn graphql_batch_handler(
    Extension(state): Extension<AppState>,
    headers: HeaderMap,
    Json(batch): Json<GraphQLBatchRequest>,
) -> Response {
    match batch {
        GraphQLBatchRequest::Single(request) => {
            let (status, body) = execute_gated(&state, &headers, request).await;
            (status, Json(body)).into_response()
        }
        GraphQLBatchRequest::Batch(requests) => {
            let mut status = StatusCode::OK;
            let mut bodies = Vec::with_capacity(requests.len());

            for request in requests {
                let (item_status, body) = execute_gated(&state, &headers, request).await;
                if status == StatusCode::OK {
                    status = item_status;
                }
                bodies.push(body);
            }

            (status, Json(Value::Array(bodies))).into_response()
        }
    }
}

/// Parse, authorize and (if admitted) execute one GraphQL request
async fn execute_gated(
    state: &AppState,
    headers: &HeaderMap,
    request: GraphQLRequest,
) -> (StatusCode, Value) {
    let operation = match Operation::parse(&request.query, request.operation_name.as_deref()) {
        Ok(operation) => operation,
        Err(e) => {
            debug!(error = %e, "Rejected unparseable GraphQL request");
            return (StatusCode::BAD_REQUEST, error_body(&e, "GRAPHQL_PARSE_FAILED"));
        }
    };

    let ctx = RequestContext::from_headers(headers, state.shutdown.child_token());
    let schema = state.schema.clone();
    let deps = state.deps.clone();

    let outcome = state
        .gate
        .authorize(ctx, &operation, |ctx| async move {
            let context = GraphQLContext::new(&deps, ctx);
            request.execute(&schema, &context).await
        })
        .await;

    match outcome {
        Ok(response) => {
            let status = if response.is_ok() {
                StatusCode::OK
            } else {
                StatusCode::BAD_REQUEST
            };
            match serde_json::to_value(&response) {
                Ok(body) => (status, body),
                Err(e) => {
                    error!(error = %e, "Failed to serialize GraphQL response");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        error_body("Internal server error", "INTERNAL"),
                    )
                }
            }
        }
        Err(denial) => denial_response(&denial),
    }
}

/// Render a gate denial as a GraphQL error response
pub fn denial_response(denial: &AuthError) -> (StatusCode, Value) {
    (denial.status_code(), error_body(denial, denial.code()))
}

fn error_body(message: impl std::fmt::Display, code: &str) -> Value {
    json!({
        "data": null,
        "errors": [{
            "message": message.to_string(),
            "extensions": { "code": code },
        }],
    })
}

/// GraphQL playground (GraphiQL)
pub async fn graphql_playground() -> Html<String> {
    Html(
        r#"
<!DOCTYPE html>
<html>
<head>
    <title>Blog GraphQL</title>
    <style>
        body {
            height: 100%;
            margin: 0;
            width: 100%;
            overflow: hidden;
        }
        #graphiql {
            height: 100vh;
        }
    </style>
    <script
        crossorigin
        src="https://unpkg.com/react@18/umd/react.production.min.js"
    ></script>
    <script
        crossorigin
        src="https://unpkg.com/react-dom@18/umd/react-dom.production.min.js"
    ></script>
    <link rel="stylesheet" href="https://unpkg.com/graphiql/graphiql.min.css" />
</head>
<body>
    <div id="graphiql">Loading...</div>
    <script
        src="https://unpkg.com/graphiql/graphiql.min.js"
        type="application/javascript"
    ></script>
    <script>
        const fetcher = GraphiQL.createFetcher({
            url: '/graphql',
            headers: { Authorization: localStorage.getItem('token') || '' },
        });

        ReactDOM.render(
            React.createElement(GraphiQL, { fetcher: fetcher }),
            document.getElementById('graphiql'),
        );
    </script>
</body>
</html>
"#
        .to_string(),
    )
}
