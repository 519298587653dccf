pub mod config;
pub mod error;
pub mod parse;
pub mod render;
pub mod request;
pub mod session;
pub mod view;

pub use session::{Session, SubmitHandler};
