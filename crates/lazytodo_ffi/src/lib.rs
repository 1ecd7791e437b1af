//! Flutter bridge for LazyTodo core.

pub mod api;
