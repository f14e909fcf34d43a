use std::{borrow::Cow, sync::Arc};

use axum::{Json, extract::State};
use schemars::JsonSchema;
use serde::Serialize;
use tracing::{Level, info, instrument};
use voyage_narrative::plan_itinerary;

use crate::{error::ApiError, extract::JsonBody, state::AppState};

use super::request::{ItineraryRequest, REQUIRED_FIELDS_MESSAGE};

#[derive(Serialize, JsonSchema)]
pub struct ItineraryResponse {
    pub itinerary: String,
}

#[instrument(skip_all, level = Level::INFO)]
pub async fn post_handler(
    State(state): State<Arc<AppState>>,
    JsonBody(body): JsonBody<ItineraryRequest>,
) -> Result<Json<ItineraryResponse>, ApiError> {
    let trip = body
        .trip_details()
        .ok_or_else(|| ApiError::BadRequest(REQUIRED_FIELDS_MESSAGE.to_string()))?;

    let stops = match &body.stops {
        Some(stops) if stops.locations.len() > state.max_request_stops => {
            return Err(ApiError::BadRequest(format!(
                "Invalid stops: at most {} stops are allowed, got {}",
                state.max_request_stops,
                stops.locations.len()
            )));
        }
        Some(stops) => Cow::Owned(stops.build_problem()?),
        None => Cow::Borrowed(&state.trip_stops),
    };

    let itinerary =
        plan_itinerary(&trip, &stops, &state.sequencer, state.narrator.as_ref()).await?;

    info!(
        "Generated itinerary for {} ({} characters)",
        trip.destination,
        itinerary.len()
    );

    Ok(Json(ItineraryResponse { itinerary }))
}
