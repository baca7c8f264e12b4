//! `taskhub-todo` — the to-do domain.
//!
//! Entity, field validation/normalization, the repository seam, and the
//! command/query services that implement the conditional-update protocol.

pub mod command;
pub mod config;
pub mod normalize;
pub mod query;
pub mod repository;
pub mod todo;

pub use command::TodoCommandService;
pub use config::TodoConfig;
pub use query::{PagedTodos, TodoQueryService};
pub use repository::{InMemoryTodoRepository, TodoPage, TodoRepository};
pub use todo::Todo;
