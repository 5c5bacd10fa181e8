//! Session module
//!
//! Token persistence and the signed-in/signed-out state machine.

mod state;
mod token_store;

pub use state::{Session, SessionState, TOKEN_KEY};
pub use token_store::{FileTokenStore, MemoryTokenStore, TokenStore};
