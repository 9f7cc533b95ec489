//! Helpers shared by unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::api::{
    ContinueConversationRequest, ContinueConversationResponse, ConversationService,
    ServiceError, StartConversationRequest, StartConversationResponse,
    StartSingleConversationRequest,
};
use crate::core::characters::{Character, CharacterRegistry};
use crate::core::controller::ControllerSnapshot;
use crate::core::message::Message;

pub fn grandma() -> Character {
    CharacterRegistry::builtin()
        .find("grandma")
        .cloned()
        .expect("grandma is built in")
}

pub fn student() -> Character {
    CharacterRegistry::builtin()
        .find("student")
        .cloned()
        .expect("student is built in")
}

pub fn grandfa() -> Character {
    CharacterRegistry::builtin()
        .find("grandfa")
        .cloned()
        .expect("grandfa is built in")
}

/// A call the scripted service received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCall {
    Start(StartConversationRequest),
    StartSingle(StartSingleConversationRequest),
    Continue(ContinueConversationRequest),
}

/// Canned outcome for the next call of the scripted service.
#[derive(Debug, Clone)]
pub enum ScriptedReply {
    Started(String),
    Messages(Vec<Message>),
    Failed(ServiceError),
}

/// In-memory [`ConversationService`] that replays scripted replies in order
/// and records every request. When an observer is attached it also records
/// whether the controller reported `loading` while the call was in flight.
#[derive(Default)]
pub struct ScriptedService {
    replies: Mutex<VecDeque<ScriptedReply>>,
    calls: Mutex<Vec<RecordedCall>>,
    observer: Mutex<Option<watch::Receiver<ControllerSnapshot>>>,
    loading_during_calls: Mutex<Vec<bool>>,
}

impl ScriptedService {
    pub fn new(replies: Vec<ScriptedReply>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            ..Self::default()
        }
    }

    pub fn observe(&self, receiver: watch::Receiver<ControllerSnapshot>) {
        *self.observer.lock().unwrap() = Some(receiver);
    }

    pub fn push_reply(&self, reply: ScriptedReply) {
        self.replies.lock().unwrap().push_back(reply);
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn loading_during_calls(&self) -> Vec<bool> {
        self.loading_during_calls.lock().unwrap().clone()
    }

    fn record(&self, call: RecordedCall) -> ScriptedReply {
        if let Some(observer) = self.observer.lock().unwrap().as_ref() {
            let loading = observer.borrow().loading;
            self.loading_during_calls.lock().unwrap().push(loading);
        }
        self.calls.lock().unwrap().push(call);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| ScriptedReply::Failed(ServiceError::Transport("no reply scripted".into())))
    }
}

#[async_trait]
impl ConversationService for ScriptedService {
    async fn start_conversation(
        &self,
        request: &StartConversationRequest,
    ) -> Result<StartConversationResponse, ServiceError> {
        match self.record(RecordedCall::Start(request.clone())) {
            ScriptedReply::Started(conversation_id) => {
                Ok(StartConversationResponse { conversation_id })
            }
            ScriptedReply::Failed(err) => Err(err),
            ScriptedReply::Messages(_) => panic!("start answered with messages"),
        }
    }

    async fn start_single_conversation(
        &self,
        request: &StartSingleConversationRequest,
    ) -> Result<StartConversationResponse, ServiceError> {
        match self.record(RecordedCall::StartSingle(request.clone())) {
            ScriptedReply::Started(conversation_id) => {
                Ok(StartConversationResponse { conversation_id })
            }
            ScriptedReply::Failed(err) => Err(err),
            ScriptedReply::Messages(_) => panic!("start answered with messages"),
        }
    }

    async fn continue_conversation(
        &self,
        request: &ContinueConversationRequest,
    ) -> Result<ContinueConversationResponse, ServiceError> {
        match self.record(RecordedCall::Continue(request.clone())) {
            ScriptedReply::Messages(messages) => Ok(ContinueConversationResponse { messages }),
            ScriptedReply::Failed(err) => Err(err),
            ScriptedReply::Started(_) => panic!("continue answered with a conversation id"),
        }
    }
}

/// Response written by [`spawn_http_responder`].
pub struct CannedResponse {
    status: u16,
    body: String,
}

impl CannedResponse {
    pub fn json(status: u16, body: serde_json::Value) -> Self {
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
}

#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub request_line: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl CapturedRequest {
    pub fn header(&self, name: &str) -> Option<String> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.clone())
    }

    pub fn json_body(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("request body should be json")
    }
}

pub struct HttpResponder {
    pub base_url: String,
    task: JoinHandle<Result<Vec<CapturedRequest>, String>>,
}

impl HttpResponder {
    /// Wait for every canned response to be served and return what was sent.
    pub async fn finish(self) -> Vec<CapturedRequest> {
        self.task
            .await
            .expect("responder task should not panic")
            .expect("responder should serve every request")
    }
}

/// Serve one canned response per connection on a loopback port.
pub async fn spawn_http_responder(responses: Vec<CannedResponse>) -> HttpResponder {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("listener should bind");
    let addr = listener.local_addr().expect("local addr should resolve");

    let task = tokio::spawn(async move {
        let mut captured = Vec::new();
        for response in responses {
            let (mut stream, _) = listener.accept().await.map_err(|err| err.to_string())?;
            let request = read_http_request(&mut stream).await?;
            captured.push(request);

            let reply = format!(
                "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                response.status,
                reason_phrase(response.status),
                response.body.len(),
                response.body
            );
            stream
                .write_all(reply.as_bytes())
                .await
                .map_err(|err| err.to_string())?;
            stream.shutdown().await.map_err(|err| err.to_string())?;
        }
        Ok(captured)
    });

    HttpResponder {
        base_url: format!("http://{addr}"),
        task,
    }
}

fn reason_phrase(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}

async fn read_http_request(stream: &mut TcpStream) -> Result<CapturedRequest, String> {
    let mut buffer = Vec::new();
    let mut header_end = None;
    while header_end.is_none() {
        let mut chunk = [0_u8; 1024];
        let read = stream
            .read(&mut chunk)
            .await
            .map_err(|err| err.to_string())?;
        if read == 0 {
            return Err("Unexpected EOF while reading HTTP headers".to_string());
        }
        buffer.extend_from_slice(&chunk[..read]);
        header_end = buffer
            .windows(4)
            .position(|window| window == b"\r\n\r\n")
            .map(|index| index + 4);
    }

    let header_end = header_end.ok_or_else(|| "Missing header terminator".to_string())?;
    let header_text =
        std::str::from_utf8(&buffer[..header_end]).map_err(|err| err.to_string())?;
    let mut lines = header_text.split("\r\n").filter(|line| !line.is_empty());
    let request_line = lines
        .next()
        .ok_or_else(|| "Missing HTTP request line".to_string())?
        .to_string();

    let mut headers = Vec::new();
    let mut content_length = 0_usize;
    for line in lines {
        let Some((name, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim().to_string();
        if name.eq_ignore_ascii_case("content-length") {
            content_length = value.parse::<usize>().map_err(|err| err.to_string())?;
        }
        headers.push((name.to_string(), value));
    }

    let mut body = buffer[header_end..].to_vec();
    while body.len() < content_length {
        let mut chunk = vec![0_u8; content_length - body.len()];
        let read = stream
            .read(&mut chunk)
            .await
            .map_err(|err| err.to_string())?;
        if read == 0 {
            return Err("Unexpected EOF while reading HTTP body".to_string());
        }
        body.extend_from_slice(&chunk[..read]);
    }
    body.truncate(content_length);

    Ok(CapturedRequest {
        request_line,
        headers,
        body,
    })
}
