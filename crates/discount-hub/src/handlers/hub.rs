use crate::error::{HubError, Result};
use crate::model::invocation::{Completion, HubCall, Invocation};
use crate::state::AppState;
use axum::extract::ws::rejection::WebSocketUpgradeRejection;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use discount_core::CodeRegistry;
use serde_json::{json, Value};
use tracing::{debug, trace, warn};

/// Upgrades `GET /discountHub` to a hub connection.
///
/// Browsers do not apply CORS to WebSocket handshakes, so the page origin is
/// checked here before upgrading.
pub async fn hub_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    ws: std::result::Result<WebSocketUpgrade, WebSocketUpgradeRejection>,
) -> Response {
    if !state.admits_origin(&headers) {
        warn!(origin = ?headers.get(axum::http::header::ORIGIN), "refused hub connection");
        return HubError::ForbiddenOrigin.into_response();
    }

    match ws {
        Ok(ws) => ws.on_upgrade(move |socket| serve_socket(socket, state)),
        Err(rejection) => rejection.into_response(),
    }
}

/// Answers invocations on one connection, in arrival order, until the peer
/// closes it.
async fn serve_socket(mut socket: WebSocket, state: AppState) {
    debug!("hub connection opened");

    while let Some(message) = socket.recv().await {
        let message = match message {
            Ok(message) => message,
            Err(err) => {
                debug!(error = %err, "hub connection failed");
                break;
            }
        };

        let completion = match message {
            Message::Text(text) => handle_text(&state, text.as_str()).await,
            Message::Binary(_) => Completion::error(None, &HubError::BinaryFrame),
            Message::Ping(_) | Message::Pong(_) => continue,
            Message::Close(_) => break,
        };

        let payload = match serde_json::to_string(&completion) {
            Ok(payload) => payload,
            Err(err) => {
                warn!(error = %err, "failed to encode completion");
                continue;
            }
        };

        if socket.send(Message::Text(payload.into())).await.is_err() {
            break;
        }
    }

    debug!("hub connection closed");
}

/// Decodes one text frame and produces its completion.
pub async fn handle_text(state: &AppState, text: &str) -> Completion {
    let invocation: Invocation = match serde_json::from_str(text) {
        Ok(invocation) => invocation,
        Err(err) => {
            let err = HubError::MalformedMessage(err.to_string());
            warn!(error = %err, "rejected hub message");
            return Completion::error(None, &err);
        }
    };

    let invocation_id = invocation.invocation_id.clone();
    match dispatch(state, invocation).await {
        Ok(result) => Completion::result(invocation_id, result),
        Err(err) => {
            warn!(error = %err, invocation_id = ?invocation_id, "rejected hub invocation");
            Completion::error(invocation_id, &err)
        }
    }
}

/// Runs an invocation against the registry on the blocking pool.
///
/// Registry calls hold a lock and may write the snapshot, so they must not
/// run on an async worker thread.
pub async fn dispatch(state: &AppState, invocation: Invocation) -> Result<Value> {
    let call = HubCall::try_from(invocation)?;
    trace!(target_method = call.target(), "dispatching hub invocation");

    let registry = state.registry();
    tokio::task::spawn_blocking(move || execute(registry.as_ref(), call))
        .await
        .map_err(|e| HubError::Worker(e.to_string()))
}

fn execute(registry: &dyn CodeRegistry, call: HubCall) -> Value {
    match call {
        HubCall::GenerateCodes { count, length } => match registry.generate_batch(count, length) {
            Ok(_) => json!(true),
            Err(err) => {
                debug!(error = %err, count, length, "code generation refused");
                json!(false)
            }
        },
        HubCall::UseCode { code } => json!(registry.use_code(&code).as_byte()),
        HubCall::CheckIfCodeExists { code } => json!(registry.exists(&code)),
        HubCall::GetTotalCodes => json!(registry.count()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use discount_generator::RandomGenerator;
    use discount_registry::{RegistryService, RegistrySettings};
    use discount_storage::InMemoryStore;
    use std::sync::Arc;

    fn test_state() -> AppState {
        let settings = RegistrySettings::builder()
            .max_codes_per_request(10)
            .min_code_length(5)
            .max_code_length(10)
            .build();
        let registry =
            RegistryService::open(settings, InMemoryStore::new(), RandomGenerator::new()).unwrap();
        AppState::new(Arc::new(registry))
    }

    async fn call(state: &AppState, text: &str) -> Completion {
        handle_text(state, text).await
    }

    #[tokio::test]
    async fn generate_then_count() {
        let state = test_state();

        let completion = call(
            &state,
            r#"{"invocationId":"1","target":"generateCodes","arguments":[5,6]}"#,
        )
        .await;
        assert_eq!(completion, Completion::result(Some("1".to_string()), json!(true)));

        let completion = call(&state, r#"{"invocationId":"2","target":"getTotalCodes"}"#).await;
        assert_eq!(completion.result, Some(json!(5)));
    }

    #[tokio::test]
    async fn refused_generation_is_false_not_error() {
        let state = test_state();

        let too_many = call(&state, r#"{"target":"generateCodes","arguments":[50,6]}"#).await;
        let too_short = call(&state, r#"{"target":"generateCodes","arguments":[1,2]}"#).await;

        assert_eq!(too_many.result, Some(json!(false)));
        assert_eq!(too_many.error, None);
        assert_eq!(too_short.result, Some(json!(false)));
        assert_eq!(state.registry().count(), 0);
    }

    #[tokio::test]
    async fn use_code_reports_bytes() {
        let state = test_state();
        let code = state.registry().generate_batch(1, 7).unwrap().remove(0);
        let message = json!({"target": "useCode", "arguments": [code.as_str()]}).to_string();

        assert_eq!(call(&state, &message).await.result, Some(json!(1)));
        assert_eq!(call(&state, &message).await.result, Some(json!(0)));
    }

    #[tokio::test]
    async fn check_if_code_exists() {
        let state = test_state();
        let code = state.registry().generate_batch(1, 7).unwrap().remove(0);

        let present = json!({"target": "checkIfCodeExists", "arguments": [code.as_str()]});
        let absent = json!({"target": "checkIfCodeExists", "arguments": ["ZZZZZZ"]});

        assert_eq!(call(&state, &present.to_string()).await.result, Some(json!(true)));
        assert_eq!(call(&state, &absent.to_string()).await.result, Some(json!(false)));
    }

    #[tokio::test]
    async fn malformed_json_is_an_error_completion() {
        let state = test_state();

        let completion = call(&state, "{ nope").await;

        assert_eq!(completion.invocation_id, None);
        assert_eq!(completion.result, None);
        assert!(completion.error.unwrap().starts_with("malformed invocation"));
    }

    #[tokio::test]
    async fn unknown_target_echoes_invocation_id() {
        let state = test_state();

        let completion = call(&state, r#"{"invocationId":"9","target":"resetAll"}"#).await;

        assert_eq!(completion.invocation_id.as_deref(), Some("9"));
        assert_eq!(
            completion.error.as_deref(),
            Some("unknown hub method 'resetAll'")
        );
    }
}
