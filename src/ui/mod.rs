//! Terminal output for publish runs

pub mod console;
pub mod progress;

pub use console::ConsoleObserver;
pub use progress::StepProgress;
