use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::http::HeaderValue;
use discount_core::SnapshotStore;
use discount_generator::RandomGenerator;
use discount_hub::model::invocation::Completion;
use discount_hub::{App, AppState};
use discount_registry::{RegistryService, RegistrySettings};
use discount_storage::JsonFileStore;
use futures_util::{SinkExt, StreamExt};
use serde_json::{json, Value};
use tempfile::TempDir;
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, tungstenite, MaybeTlsStream, WebSocketStream};

type Client = WebSocketStream<MaybeTlsStream<TcpStream>>;

struct Fixture {
    dir: TempDir,
    addr: SocketAddr,
}

impl Fixture {
    async fn start() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let settings = RegistrySettings::builder()
            .max_codes_per_request(10)
            .min_code_length(5)
            .max_code_length(10)
            .build();
        let registry = RegistryService::open(
            settings,
            JsonFileStore::new(dir.path().join("discountCodes.json")),
            RandomGenerator::new(),
        )
        .expect("valid settings");

        let state = AppState::new(Arc::new(registry));
        let router = App::router(state, &[HeaderValue::from_static("http://localhost:5004")]);

        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("serve");
        });

        Self { dir, addr }
    }

    fn storage_path(&self) -> PathBuf {
        self.dir.path().join("discountCodes.json")
    }

    fn url(&self) -> String {
        format!("ws://{}/discountHub", self.addr)
    }

    async fn connect(&self) -> Client {
        let (client, _) = connect_async(self.url()).await.expect("connect");
        client
    }

    async fn connect_from(&self, origin: &'static str) -> Result<Client, tungstenite::Error> {
        let mut request = self.url().into_client_request().expect("client request");
        request
            .headers_mut()
            .insert("origin", HeaderValue::from_static(origin));
        connect_async(request).await.map(|(client, _)| client)
    }
}

async fn invoke(client: &mut Client, id: &str, target: &str, arguments: Value) -> Completion {
    let message = json!({"invocationId": id, "target": target, "arguments": arguments});
    client
        .send(Message::text(message.to_string()))
        .await
        .expect("send");
    next_completion(client).await
}

async fn next_completion(client: &mut Client) -> Completion {
    loop {
        let message = client.next().await.expect("stream open").expect("frame");
        if message.is_text() {
            return serde_json::from_str(message.to_text().expect("utf-8")).expect("completion");
        }
    }
}

#[tokio::test]
async fn full_session_over_websocket() {
    let fixture = Fixture::start().await;
    let mut client = fixture.connect().await;

    let generated = invoke(&mut client, "1", "generateCodes", json!([5, 6])).await;
    assert_eq!(generated.invocation_id.as_deref(), Some("1"));
    assert_eq!(generated.result, Some(json!(true)));

    let total = invoke(&mut client, "2", "getTotalCodes", json!([])).await;
    assert_eq!(total.result, Some(json!(5)));

    let stored = JsonFileStore::new(fixture.storage_path()).load().unwrap();
    assert_eq!(stored.len(), 5);
    let code = stored.iter().next().unwrap().to_string();

    let exists = invoke(&mut client, "3", "checkIfCodeExists", json!([code])).await;
    assert_eq!(exists.result, Some(json!(true)));

    let used = invoke(&mut client, "4", "useCode", json!([code])).await;
    assert_eq!(used.result, Some(json!(1)));

    let used_again = invoke(&mut client, "5", "useCode", json!([code])).await;
    assert_eq!(used_again.result, Some(json!(0)));

    let exists = invoke(&mut client, "6", "checkIfCodeExists", json!([code])).await;
    assert_eq!(exists.result, Some(json!(false)));

    let reloaded = JsonFileStore::new(fixture.storage_path()).load().unwrap();
    assert_eq!(reloaded.len(), 4);
    assert!(!reloaded.contains(&code));
}

#[tokio::test]
async fn refused_requests_return_false() {
    let fixture = Fixture::start().await;
    let mut client = fixture.connect().await;

    let too_many = invoke(&mut client, "1", "generateCodes", json!([50, 6])).await;
    let too_short = invoke(&mut client, "2", "generateCodes", json!([1, 2])).await;
    let unknown = invoke(&mut client, "3", "useCode", json!(["ZZZZZZ"])).await;

    assert_eq!(too_many.result, Some(json!(false)));
    assert_eq!(too_short.result, Some(json!(false)));
    assert_eq!(unknown.result, Some(json!(0)));
    assert!(!fixture.storage_path().exists());
}

#[tokio::test]
async fn malformed_invocations_get_error_completions() {
    let fixture = Fixture::start().await;
    let mut client = fixture.connect().await;

    let missing = invoke(&mut client, "1", "generateCodes", json!([5])).await;
    assert_eq!(missing.invocation_id.as_deref(), Some("1"));
    assert!(missing.error.is_some());
    assert_eq!(missing.result, None);

    client
        .send(Message::binary(vec![1u8, 2, 3]))
        .await
        .expect("send");
    let binary = next_completion(&mut client).await;
    assert_eq!(binary.error.as_deref(), Some("binary frames are not supported"));

    // The connection stays usable after a rejected invocation.
    let total = invoke(&mut client, "2", "GetTotalCodes", json!([])).await;
    assert_eq!(total.result, Some(json!(0)));
}

#[tokio::test]
async fn connections_share_one_registry() {
    let fixture = Fixture::start().await;
    let mut first = fixture.connect().await;
    let mut second = fixture.connect().await;

    let (a, b) = tokio::join!(
        invoke(&mut first, "1", "generateCodes", json!([10, 7])),
        invoke(&mut second, "1", "generateCodes", json!([10, 7])),
    );
    assert_eq!(a.result, Some(json!(true)));
    assert_eq!(b.result, Some(json!(true)));

    let total = invoke(&mut first, "2", "getTotalCodes", json!([])).await;
    assert_eq!(total.result, Some(json!(20)));
}

#[tokio::test]
async fn browser_origin_must_be_allowed() {
    let fixture = Fixture::start().await;

    let mut allowed = fixture
        .connect_from("http://localhost:5004")
        .await
        .expect("allowed origin connects");
    let total = invoke(&mut allowed, "1", "getTotalCodes", json!([])).await;
    assert_eq!(total.result, Some(json!(0)));

    let refused = fixture.connect_from("http://evil.example").await;
    match refused {
        Err(tungstenite::Error::Http(response)) => assert_eq!(response.status(), 403),
        Err(err) => panic!("expected a 403 handshake failure, got {err}"),
        Ok(_) => panic!("handshake from a foreign origin succeeded"),
    }
}
