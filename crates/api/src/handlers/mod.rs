pub mod auth;
pub mod dashboard;
pub mod habits;
pub mod journal;
pub mod profile;
pub mod progress;
pub mod recommendations;
