//! The directive relay: validate, forward, map the reply.

use serde_json::Value;

use crate::api::client::{ApiClient, BackendReply, OutboundRequest, Transport};
use crate::api::events::IncomingEvent;
use crate::api::models::{ErrorEnvelope, RelayResponse};
use crate::app::RelayConfig;
use crate::error::{RelayError, Result};
use crate::logging::{LevelLogger, RelayLogger};

pub const SUPPORTED_PAYLOAD_VERSION: &str = "3";

pub struct Relay<T = ApiClient, L = LevelLogger> {
    config: RelayConfig,
    transport: T,
    logger: L,
}

impl Relay {
    /// Relay backed by a fresh reqwest client, logging through `log`.
    pub fn from_config(config: RelayConfig) -> Result<Self> {
        let transport = ApiClient::new(config.client_options()).map_err(RelayError::Client)?;
        let logger = LevelLogger::for_config(&config);
        Ok(Self::new(config, transport, logger))
    }
}

impl<T: Transport, L: RelayLogger> Relay<T, L> {
    pub fn new(config: RelayConfig, transport: T, logger: L) -> Self {
        Self { config, transport, logger }
    }

    /// Forwards one directive to the backend.
    ///
    /// Validation failures and transport failures come back as `Err`. Backend
    /// error statuses and unparsable bodies come back as `Ok` with an error
    /// envelope, so Alexa sees a well-formed directive response.
    pub async fn handle(&self, event: Value) -> Result<RelayResponse> {
        self.logger.event(&event);

        let url = self.config.endpoint()?;
        let event = IncomingEvent::new(event);
        let directive = event.directive().ok_or(RelayError::MissingDirective)?;

        if directive.payload_version() != Some(SUPPORTED_PAYLOAD_VERSION) {
            return Err(RelayError::UnsupportedPayloadVersion);
        }

        let scope = directive.scope().ok_or(RelayError::MissingScope)?;
        if !scope.is_bearer_token() {
            return Err(RelayError::UnsupportedScopeType);
        }

        let token = scope
            .token()
            .or_else(|| self.config.fallback_token())
            .ok_or(RelayError::MissingToken)?;

        let request = OutboundRequest {
            url: &url,
            token,
            body: event.as_value(),
        };

        match self.transport.send(request).await {
            Ok(reply) => {
                self.logger.response(reply.status, &reply.body);
                Ok(map_reply(reply))
            }
            Err(err) => {
                self.logger.request_error(err.message());
                Err(RelayError::RequestFailed(ErrorEnvelope::request_failed(err.message())))
            }
        }
    }
}

/// Turns a complete backend reply into what Alexa gets back.
pub fn map_reply(reply: BackendReply) -> RelayResponse {
    if reply.status >= 400 {
        return RelayResponse::Error(ErrorEnvelope::from_status(reply.status, &reply.body));
    }
    match serde_json::from_str::<Value>(&reply.body) {
        Ok(json) => RelayResponse::Backend(json),
        Err(_) => RelayResponse::Error(ErrorEnvelope::unparsable(&reply.body)),
    }
}
