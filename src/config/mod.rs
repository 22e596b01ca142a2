pub mod app;
pub mod database;
pub mod storage;

pub use app::{AppConfig, WorkflowConfig};
pub use database::{run_migrations, DatabaseConfig};
pub use storage::{StorageConfig, DEFAULT_VIDEO_BUCKET};
