//! Fakes shared by the unit tests: an HTTP server on localhost and a
//! `Runner` that records invocations instead of spawning processes.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use crate::core::command::{Invocation, Runner};
use crate::error::{Error, Result};

#[derive(Default)]
struct Routes {
    responses: HashMap<String, (u16, Vec<u8>)>,
    requests: Vec<String>,
}

pub struct FakeServer {
    port: u16,
    routes: Arc<Mutex<Routes>>,
}

impl FakeServer {
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let routes = Arc::new(Mutex::new(Routes::default()));

        let shared = routes.clone();
        tokio::spawn(async move {
            while let Ok((mut stream, _)) = listener.accept().await {
                let routes = shared.clone();
                tokio::spawn(async move {
                    let mut head = Vec::new();
                    let mut buf = [0u8; 1024];
                    while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                        match stream.read(&mut buf).await {
                            Ok(0) | Err(_) => return,
                            Ok(n) => head.extend_from_slice(&buf[..n]),
                        }
                    }

                    let head = String::from_utf8_lossy(&head);
                    let target = head
                        .split_whitespace()
                        .nth(1)
                        .unwrap_or("/")
                        .to_string();
                    let path = target.split('?').next().unwrap_or("/").to_string();

                    let (status, body) = {
                        let mut routes = routes.lock().unwrap();
                        routes.requests.push(target);
                        routes
                            .responses
                            .get(&path)
                            .cloned()
                            .unwrap_or((404, b"not found".to_vec()))
                    };

                    let header = format!(
                        "HTTP/1.1 {} Fake\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                        status,
                        body.len()
                    );
                    let _ = stream.write_all(header.as_bytes()).await;
                    let _ = stream.write_all(&body).await;
                    let _ = stream.shutdown().await;
                });
            }
        });

        Self { port, routes }
    }

    pub fn url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    pub fn route(&self, path: &str, status: u16, body: impl Into<Vec<u8>>) {
        self.routes
            .lock()
            .unwrap()
            .responses
            .insert(path.to_string(), (status, body.into()));
    }

    /// Request targets (path and query) in arrival order.
    pub fn requests(&self) -> Vec<String> {
        self.routes.lock().unwrap().requests.clone()
    }
}

/// Client that never routes localhost through a proxy from the environment.
pub fn http_client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

/// How the fake runner answers for a given program.
#[derive(Clone, Copy)]
pub enum Outcome {
    Success,
    Missing,
    Fails,
}

pub struct FakeRunner {
    default: Outcome,
    overrides: HashMap<String, Outcome>,
    arg_overrides: HashMap<String, Outcome>,
    calls: Mutex<Vec<Invocation>>,
}

impl FakeRunner {
    pub fn new(default: Outcome) -> Self {
        Self {
            default,
            overrides: HashMap::new(),
            arg_overrides: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with(mut self, program: &str, outcome: Outcome) -> Self {
        self.overrides.insert(program.to_string(), outcome);
        self
    }

    /// Answers with `outcome` for any call passing `arg`, whatever the program.
    pub fn with_arg(mut self, arg: &str, outcome: Outcome) -> Self {
        self.arg_overrides.insert(arg.to_string(), outcome);
        self
    }

    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.lock().unwrap().clone()
    }

    pub fn programs(&self) -> Vec<String> {
        self.calls().into_iter().map(|call| call.program).collect()
    }
}

#[async_trait]
impl Runner for FakeRunner {
    async fn run(&self, invocation: &Invocation) -> Result<()> {
        self.calls.lock().unwrap().push(invocation.clone());

        let outcome = invocation
            .args
            .iter()
            .find_map(|arg| self.arg_overrides.get(arg))
            .or_else(|| self.overrides.get(&invocation.program))
            .copied()
            .unwrap_or(self.default);

        match outcome {
            Outcome::Success => Ok(()),
            Outcome::Missing => Err(Error::ToolNotFound(invocation.program.clone())),
            Outcome::Fails => Err(Error::Backend(format!("{} exited with 1", invocation.program))),
        }
    }
}
