pub mod evaluation;
pub mod library;
pub mod session;
