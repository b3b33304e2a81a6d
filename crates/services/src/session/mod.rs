mod controller;
mod state;

pub use controller::{Effect, SessionController, SessionEvent, Trigger};
pub use state::{SessionSnapshot, SessionState};
