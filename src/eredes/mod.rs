mod auth;
mod client;
mod collector;
mod extract;
mod headers;
mod json_path;
mod usage;
mod window;

pub use auth::{AuthClient, FixedTokenAuthClient, HttpAuthClient, FIXED_TEST_TOKEN};
pub use client::Transport;
pub use collector::LoadCurveCollector;
pub use extract::RecordExtractor;
pub use headers::ExtraHeaders;
pub use usage::UsageFetcher;
pub use window::{compute_window, RequestWindow, WindowConfig, PROVIDER_DATE_FORMAT};
