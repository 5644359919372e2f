//! Shop session lifecycle.
//!
//! [`SessionController`] is the only writer of [`Session`]; everything else
//! reads snapshots or subscribes. Async results are tagged with the session
//! epoch they started under and dropped if a login or logout happened in the
//! meantime.

mod controller;
mod state;

#[cfg(test)]
pub(crate) mod testing;

pub use controller::SessionController;
pub use state::{Session, SessionPhase, SessionStore};
