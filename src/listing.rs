//! Generic list pages: filtering, pagination, sorting and row actions shared
//! by every entity.

pub mod command;
pub mod controller;
pub mod criteria;
pub mod dispatch;
pub mod fetch;
pub mod field;
pub mod filter_form;
pub mod message;
pub mod page;
pub mod render;
pub mod screen;
pub mod sort;

pub use page::{PageSize, PaginationStrategy};
pub use screen::EntityPage;
