pub mod complaint_handler;

pub use complaint_handler::*;
