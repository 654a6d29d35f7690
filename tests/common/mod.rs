//! Shared fixtures: scripted transports and a mockito-backed server.
#![allow(dead_code)]

use async_trait::async_trait;
use mockito::{Server, ServerGuard};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tgbot_core::transport::{HttpRequest, HttpResponse, Transport, TransportError};
use tgbot_core::{BotClient, BotClientBuilder};

pub const TOKEN: &str = "1234567:TEST-token_abc";
pub const LOCAL_SERVER: &str = "http://localhost:8081";

type Handler = dyn Fn(&HttpRequest) -> Result<HttpResponse, TransportError> + Send + Sync;

/// Transport answering every request through a closure and recording what it saw.
pub struct MockTransport {
    handler: Box<Handler>,
    calls: AtomicUsize,
    seen: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    pub fn new<F>(handler: F) -> Arc<Self>
    where
        F: Fn(&HttpRequest) -> Result<HttpResponse, TransportError> + Send + Sync + 'static,
    {
        Arc::new(Self {
            handler: Box::new(handler),
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        })
    }

    /// Always answer with `status` and `body`.
    pub fn respond(status: u16, body: &'static str) -> Arc<Self> {
        Self::new(move |_| Ok(HttpResponse::new(status).with_body(body)))
    }

    /// Always fail with the error produced by `make`.
    pub fn fail<F>(make: F) -> Arc<Self>
    where
        F: Fn() -> TransportError + Send + Sync + 'static,
    {
        Self::new(move |_| Err(make()))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(request.clone());
        (self.handler)(&request)
    }
}

/// Transport that must never be reached.
pub struct UnreachableTransport;

#[async_trait]
impl Transport for UnreachableTransport {
    async fn send(&self, _request: HttpRequest) -> Result<HttpResponse, TransportError> {
        panic!("transport was invoked");
    }
}

pub fn client(transport: Arc<dyn Transport>) -> BotClient {
    BotClientBuilder::new()
        .token(TOKEN)
        .transport(transport)
        .build()
        .expect("client builds")
}

pub fn local_client(transport: Arc<dyn Transport>) -> BotClient {
    BotClientBuilder::new()
        .token(TOKEN)
        .base_url(LOCAL_SERVER)
        .transport(transport)
        .build()
        .expect("client builds")
}

/// mockito server plus a client using the real reqwest transport against it.
pub struct MockServerFixture {
    pub server: ServerGuard,
    pub client: BotClient,
}

impl MockServerFixture {
    pub async fn new() -> Self {
        let server = Server::new_async().await;
        let client = BotClientBuilder::new()
            .token(TOKEN)
            .base_url(server.url())
            .build()
            .expect("client builds");
        Self { server, client }
    }

    pub fn method_path(method: &str) -> String {
        format!("/bot{}/{}", TOKEN, method)
    }

    pub fn file_path(path: &str) -> String {
        format!("/file/bot{}/{}", TOKEN, path)
    }
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
