pub mod procedure;
pub mod service;
