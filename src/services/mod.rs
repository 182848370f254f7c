pub mod ollama;
pub mod session_service;

pub use ollama::Ollama;
pub use session_service::{SessionService, StopResult};
