//! Presence client for a single Lanyard user.
//!
//! [`PresenceClient`] owns everything an activation creates: the session
//! task, its socket, and its heartbeat timer. `deactivate` (or dropping the
//! client) aborts the task; nothing is published after it returns.

mod handle;
mod session;
mod types;


pub use handle::PresenceClient;
pub use types::{ClientConfig, ClientState, PresenceEvent, PresenceSnapshot};
