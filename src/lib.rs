pub mod adapters;
pub mod app;
pub mod client;
pub mod config;
pub mod encoding;
pub mod logging;
pub mod ports;
pub mod push;
pub mod state;
pub mod types;
pub mod worker;

pub use app::{app, build_state, serve};
pub use push::vapid::{VapidCredentials, generate_vapid_credentials};
