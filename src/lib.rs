pub mod books;
pub mod catalog;
pub mod core;
pub mod summary;
pub mod utils;
