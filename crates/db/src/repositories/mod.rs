//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod habit_repo;
pub mod journal_repo;
pub mod profile_repo;
pub mod progress_repo;
pub mod user_repo;

pub use habit_repo::HabitRepo;
pub use journal_repo::JournalRepo;
pub use profile_repo::ProfileRepo;
pub use progress_repo::ProgressRepo;
pub use user_repo::UserRepo;
