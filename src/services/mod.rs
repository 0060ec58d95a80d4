pub mod backendless_service;

pub use backendless_service::*;
