use tracing::{Level, debug, instrument, warn};
use voyage_sequencer::{Location, Sequencer, SequencingProblem, TimeWindow};

use crate::{
    narrative_generator::{GenerationFailure, NarrativeGenerator},
    prompt::ItineraryPrompt,
};

/// What the traveller asked for, all fields already checked for presence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripDetails {
    pub destination: String,
    pub days: String,
    pub preferences: String,
    pub season: String,
    pub budget: String,
}

/// Stops used when neither the request nor the server configuration supplies
/// any. The travel costs are not derived from the destination.
pub fn placeholder_stops() -> SequencingProblem {
    let locations = ["Start", "Place A", "Place B", "Place C", "End"]
        .into_iter()
        .map(Location::new)
        .collect();
    let travel_times = vec![
        vec![0.0, 10.0, 20.0, 30.0, 40.0],
        vec![10.0, 0.0, 15.0, 25.0, 35.0],
        vec![20.0, 15.0, 0.0, 10.0, 20.0],
        vec![30.0, 25.0, 10.0, 0.0, 10.0],
        vec![40.0, 35.0, 20.0, 10.0, 0.0],
    ];
    let time_windows = [(0.0, 100.0), (10.0, 50.0), (20.0, 60.0), (30.0, 70.0), (40.0, 80.0)]
        .into_iter()
        .map(TimeWindow::from)
        .collect();

    // Valid by construction
    SequencingProblem::new(locations, travel_times, time_windows)
        .unwrap_or_else(|error| unreachable!("placeholder stops are invalid: {error}"))
}

/// Place names in the order they should be visited. Falls back to the input
/// order when the sequencer finds no feasible route.
pub fn ordered_places<'a>(problem: &'a SequencingProblem, sequencer: &Sequencer) -> Vec<&'a str> {
    let route = sequencer.solve(problem);

    if route.is_empty() {
        warn!("No feasible visiting order, keeping the input order of the stops");
        problem.location_names()
    } else {
        debug!("Visiting order {:?}", route.tour());
        route.location_names(problem)
    }
}

pub fn build_prompt(trip: &TripDetails, places: &[&str]) -> String {
    ItineraryPrompt {
        destination: &trip.destination,
        places,
        days: &trip.days,
        season: &trip.season,
        budget: &trip.budget,
        preferences: &trip.preferences,
    }
    .render()
}

/// Orders the stops, builds the prompt and asks the generator for the text.
#[instrument(skip_all, level = Level::DEBUG, fields(destination = %trip.destination))]
pub async fn plan_itinerary(
    trip: &TripDetails,
    stops: &SequencingProblem,
    sequencer: &Sequencer,
    generator: &dyn NarrativeGenerator,
) -> Result<String, GenerationFailure> {
    let places = ordered_places(stops, sequencer);
    let prompt = build_prompt(trip, &places);

    generator.generate(&prompt).await
}
