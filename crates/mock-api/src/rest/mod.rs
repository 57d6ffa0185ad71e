mod auth;
mod conditions;
mod health;
mod router;

pub use router::{router, AppState};
