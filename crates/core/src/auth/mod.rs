mod client;
mod types;

pub use client::{AuthApi, AuthClient};
pub use types::*;
