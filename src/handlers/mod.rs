//! Event handlers for portfolio valuations

pub mod console;

// Re-export for convenience
pub use console::ConsoleEventHandler;
