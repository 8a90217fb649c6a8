pub mod error;
pub mod identity;
pub mod repository;
pub mod wire;

// Re-exports
pub use error::{Error, Result};
pub use identity::SessionUser;
pub use repository::{HttpTaskRepository, TaskRepository};
pub use wire::{NewTodoRow, TodoRow};
