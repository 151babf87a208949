// Handlers module

pub mod health;
pub mod session;

pub use health::health_handler;
pub use session::{run_session, Session};
