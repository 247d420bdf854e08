pub mod event_repository;
pub mod poller_run_repository;
pub mod price_repository;

pub use poller_run_repository::LockOutcome;
