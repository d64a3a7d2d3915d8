//! Ports (trait boundaries) for external dependencies.
//!
//! The engine owns these interfaces; infrastructure adapters implement them.
//! Storage and observation are the only two concerns the engine delegates.

pub mod observer;
pub mod repository;

pub use observer::DecisionObserver;
pub use repository::TableRepository;
