pub mod maintenance;
pub mod notifications;
