use actix_web::{get, post, web, App, HttpResponse, HttpServer};
use serde_json::json;
use std::net::TcpListener;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// How the fake generation service answers `/api/generate`.
#[derive(Clone)]
pub enum FakeOllamaMode {
    Reply(String),
    Malformed,
    Status(u16),
    Delay(Duration),
}

struct FakeState {
    mode: FakeOllamaMode,
    calls: Arc<AtomicUsize>,
    last_prompt: Arc<Mutex<Option<String>>>,
}

pub struct FakeOllama {
    pub base_url: String,
    calls: Arc<AtomicUsize>,
    last_prompt: Arc<Mutex<Option<String>>>,
}

impl FakeOllama {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().unwrap().clone()
    }
}

#[post("/api/generate")]
async fn generate(body: web::Json<serde_json::Value>, state: web::Data<FakeState>) -> HttpResponse {
    state.calls.fetch_add(1, Ordering::SeqCst);
    *state.last_prompt.lock().unwrap() = body["prompt"].as_str().map(str::to_string);

    match &state.mode {
        FakeOllamaMode::Reply(text) => HttpResponse::Ok().json(json!({
            "model": body["model"],
            "response": text,
            "done": true
        })),
        FakeOllamaMode::Malformed => HttpResponse::Ok()
            .content_type("application/json")
            .body("{\"response\": \"Medical Concl"),
        FakeOllamaMode::Status(code) => HttpResponse::build(
            actix_web::http::StatusCode::from_u16(*code).unwrap(),
        )
        .body("fake failure"),
        FakeOllamaMode::Delay(delay) => {
            tokio::time::sleep(*delay).await;
            HttpResponse::Ok().json(json!({ "response": "too late" }))
        }
    }
}

pub const FAKE_MODEL_NAME: &str = "gemma3:1b";

#[get("/api/tags")]
async fn tags() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "models": [
            { "name": "llama3.1:8b-instruct-q4_K_M" },
            { "name": FAKE_MODEL_NAME }
        ]
    }))
}

pub async fn spawn_fake_ollama(mode: FakeOllamaMode) -> FakeOllama {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let calls = Arc::new(AtomicUsize::new(0));
    let last_prompt = Arc::new(Mutex::new(None));

    let state = web::Data::new(FakeState {
        mode,
        calls: calls.clone(),
        last_prompt: last_prompt.clone(),
    });
    let server = HttpServer::new(move || App::new().app_data(state.clone()).service(generate).service(tags))
        .workers(1)
        .listen(listener)
        .expect("Failed to bind fake ollama")
        .run();
    let _ = tokio::spawn(server);

    FakeOllama {
        base_url: format!("http://127.0.0.1:{}", port),
        calls,
        last_prompt,
    }
}
