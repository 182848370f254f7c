pub mod llm;
pub mod settings;
