// HTTP/WebSocket server modules
pub mod config;
pub mod handlers;
pub mod models;
pub mod routes;

// Spreadsheet reader, prompt builder and the pipeline tying them together
pub mod pipeline;
pub mod prompt;
pub mod sheets;

// LLM abstraction layer
pub mod llm;
