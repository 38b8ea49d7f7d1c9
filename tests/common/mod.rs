// In-process stand-in for the Ambari REST API.
// Replies are scripted in order; every request is recorded for assertions.
// The server runs on its own tokio runtime thread so tests can drive the
// blocking client from the test thread.
#![allow(dead_code)]

use ambari_client::AmbariClient;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::Router;
use serde_json::Value;
use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

pub const LOGIN: &str = "admin";
pub const PASSWORD: &str = "admin";

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, value)| value.as_str())
    }

    pub fn json_body(&self) -> Value {
        serde_json::from_str(&self.body).expect("request body is not JSON")
    }
}

#[derive(Debug, Clone)]
pub struct Reply {
    status: u16,
    body: String,
}

impl Reply {
    pub fn json(status: u16, body: Value) -> Self {
        Self {
            status,
            body: body.to_string(),
        }
    }

    pub fn raw(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
        }
    }

    pub fn empty(status: u16) -> Self {
        Self::raw(status, "")
    }
}

#[derive(Clone, Default)]
struct MockState {
    replies: Arc<Mutex<VecDeque<Reply>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

pub struct MockAmbari {
    addr: SocketAddr,
    state: MockState,
}

impl MockAmbari {
    pub fn start(replies: Vec<Reply>) -> Self {
        let state = MockState {
            replies: Arc::new(Mutex::new(replies.into())),
            requests: Arc::default(),
        };

        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind mock listener");
        listener.set_nonblocking(true).expect("nonblocking listener");
        let addr = listener.local_addr().expect("mock address");

        let router = Router::new().fallback(handle).with_state(state.clone());
        std::thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("mock runtime");
            runtime.block_on(async move {
                let listener = tokio::net::TcpListener::from_std(listener).expect("tokio listener");
                let _ = axum::serve(listener, router.into_make_service()).await;
            });
        });

        Self { addr, state }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}/api/v1", self.addr)
    }

    pub fn client(&self) -> AmbariClient {
        AmbariClient::new(&self.base_url(), LOGIN, PASSWORD).expect("build client")
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }
}

async fn handle(
    State(state): State<MockState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, String) {
    let query = uri
        .query()
        .map(|q| {
            reqwest::Url::parse(&format!("http://mock/?{}", q))
                .expect("query string")
                .query_pairs()
                .map(|(k, v)| (k.into_owned(), v.into_owned()))
                .collect()
        })
        .unwrap_or_default();

    let headers = headers
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_string(),
                value.to_str().unwrap_or_default().to_string(),
            )
        })
        .collect();

    state.requests.lock().unwrap().push(RecordedRequest {
        method: method.as_str().to_string(),
        path: uri.path().to_string(),
        query,
        headers,
        body,
    });

    match state.replies.lock().unwrap().pop_front() {
        Some(reply) => (
            StatusCode::from_u16(reply.status).expect("valid status"),
            reply.body,
        ),
        None => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "unexpected request".to_string(),
        ),
    }
}

pub fn privilege_json(id: i64, permission: &str, principal: &str, principal_type: &str) -> Value {
    serde_json::json!({
        "href": format!("http://ambari/api/v1/clusters/hdp/privileges/{}", id),
        "PrivilegeInfo": {
            "cluster_name": "hdp",
            "permission_label": format!("Label of {}", permission),
            "permission_name": permission,
            "principal_name": principal,
            "principal_type": principal_type,
            "privilege_id": id,
            "type": "CLUSTER"
        }
    })
}

pub fn privileges_json(items: Vec<Value>) -> Value {
    serde_json::json!({
        "href": "http://ambari/api/v1/clusters/hdp/privileges",
        "items": items
    })
}
