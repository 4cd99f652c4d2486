//! Request middleware.

pub mod buffer_body;

pub use buffer_body::buffer_body;
