pub mod post_handler;
pub mod request;
