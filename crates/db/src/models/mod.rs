pub mod habit;
pub mod journal;
pub mod profile;
pub mod progress;
pub mod user;
