use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;

use smart_home_relay::{Relay, RelayConfig, RelayError};

#[tokio::main]
async fn main() -> Result<(), Error> {
    smart_home_relay::logging::init(RelayConfig::from_env().debug);
    lambda_runtime::run(service_fn(handler)).await
}

async fn handler(event: LambdaEvent<Value>) -> Result<Value, Error> {
    let relay = Relay::from_config(RelayConfig::from_env())?;
    match relay.handle(event.payload).await {
        Ok(response) => Ok(response.into_value()),
        // Reject with the envelope itself so the failure keeps its directive shape.
        Err(RelayError::RequestFailed(envelope)) => Err(serde_json::to_string(&envelope)?.into()),
        Err(err) => Err(err.into()),
    }
}
