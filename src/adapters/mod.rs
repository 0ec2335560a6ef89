// Adapters layer: concrete implementations of the domain ports against
// external systems (child process, headless Chrome, filesystem).

pub mod browser;
pub mod server;
pub mod storage;
