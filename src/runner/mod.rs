//! The load-generation engine: dispatch loop, traced transport, run state
//! and live progress.

pub mod dispatcher;
pub mod progress;
pub mod record;
pub mod requester;
pub mod state;
pub mod template;
pub mod tracer;
pub mod transport;


pub use dispatcher::Dispatcher;
pub use record::Record;
pub use requester::Requester;
pub use state::RunSnapshot;
pub use template::RequestTemplate;
pub use tracer::{Event, Stage, Tracer};
