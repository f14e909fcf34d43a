use std::{path::PathBuf, time::Duration};

use anyhow::Context;
use clap::Args;
use tracing::info;
use voyage_narrative::{
    GeminiClient, GeminiClientParams, TripDetails,
    itinerary::{build_prompt, ordered_places},
    placeholder_stops, plan_itinerary,
};
use voyage_sequencer::{Sequencer, SequencingProblem};

use crate::file_utils::read_problem;

#[derive(Args)]
pub struct TripArgs {
    #[arg(long)]
    destination: String,

    /// Trip length in days
    #[arg(long)]
    days: String,

    #[arg(long)]
    season: String,

    #[arg(long)]
    budget: String,

    #[arg(long)]
    preferences: String,

    /// Stops to order, the placeholder stops are used otherwise
    #[arg(short = 'i', long)]
    input: Option<PathBuf>,
}

impl TripArgs {
    fn split(self) -> anyhow::Result<(TripDetails, SequencingProblem)> {
        let stops = match &self.input {
            Some(path) => read_problem(path)?,
            None => placeholder_stops(),
        };

        let trip = TripDetails {
            destination: self.destination,
            days: self.days,
            preferences: self.preferences,
            season: self.season,
            budget: self.budget,
        };

        Ok((trip, stops))
    }
}

pub fn run_prompt(args: TripArgs) -> anyhow::Result<()> {
    let (trip, stops) = args.split()?;

    let places = ordered_places(&stops, &Sequencer::default());
    println!("{}", build_prompt(&trip, &places));

    Ok(())
}

fn gemini_params() -> anyhow::Result<GeminiClientParams> {
    let api_key = std::env::var("GEMINI_API_KEY").context("GEMINI_API_KEY is not set")?;
    let mut params = GeminiClientParams::new(api_key);

    if let Ok(model) = std::env::var("GEMINI_MODEL") {
        params.model = model;
    }
    if let Ok(base_url) = std::env::var("GEMINI_BASE_URL") {
        params.base_url = base_url;
    }
    if let Ok(timeout) = std::env::var("GENERATION_TIMEOUT_SECS") {
        let seconds = timeout
            .parse::<u64>()
            .context("GENERATION_TIMEOUT_SECS must be a number of seconds")?;
        params.timeout = Duration::from_secs(seconds);
    }

    Ok(params)
}

pub async fn run_itinerary(args: TripArgs) -> anyhow::Result<()> {
    let (trip, stops) = args.split()?;
    let client = GeminiClient::new(gemini_params()?)?;

    info!("Generating itinerary for {} with {}", trip.destination, client.model());
    let itinerary = plan_itinerary(&trip, &stops, &Sequencer::default(), &client).await?;

    println!("{itinerary}");

    Ok(())
}
