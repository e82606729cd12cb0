pub mod error;
pub mod event;
pub mod question;
pub mod session;
