pub mod bank;
pub mod batch;
pub mod emit;
pub mod error;
pub mod message;
pub mod response;
pub mod result;
