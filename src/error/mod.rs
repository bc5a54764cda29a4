mod app;
mod config;
mod export;
mod run;
mod template;
mod transport;

pub use app::{AppError, AppResult};
pub use config::ConfigError;
pub use export::ExportError;
pub use run::{DispatchError, RunError};
pub use template::TemplateError;
pub use transport::TransportError;
