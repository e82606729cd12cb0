pub mod quiz_machine;
pub mod render;
pub mod runtime;
pub mod validation;
