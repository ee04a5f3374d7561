pub mod coordinator;
pub mod quick;
