pub mod llm;
pub mod sensor;
pub mod session;
pub mod status;
