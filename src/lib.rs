//! Relays Alexa smart home directives to a Home Assistant style backend.
//!
//! Each invocation validates the directive, posts it to
//! `{BASE_URL}/api/alexa/smart_home` with the directive's bearer token, and
//! maps the backend reply back into a directive-shaped response.

pub mod api;
pub mod app;
pub mod error;
pub mod logging;
pub mod relay;
pub mod utils;

pub use api::models::{ErrorEnvelope, ErrorKind, RelayResponse};
pub use app::RelayConfig;
pub use error::{RelayError, Result};
pub use relay::Relay;
