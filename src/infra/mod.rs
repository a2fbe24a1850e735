pub mod http_availability;
pub mod http_booking_sink;

use std::sync::Arc;

use crate::config::Config;
use crate::state::EngineState;
use http_availability::HttpAvailabilitySource;
use http_booking_sink::HttpBookingSink;

/// Wires the HTTP collaborators into an engine state from config.
pub fn bootstrap_state(config: &Config) -> EngineState {
    let source = Arc::new(HttpAvailabilitySource::new(
        config.availability_base_url.clone(),
    ));
    let sink = Arc::new(HttpBookingSink::new(
        config.booking_api_url.clone(),
        config.booking_api_token.clone(),
    ));
    EngineState::new(config.clone(), source, sink)
}
