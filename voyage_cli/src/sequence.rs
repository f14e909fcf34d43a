use std::path::PathBuf;

use clap::Args;
use comfy_table::Table;
use tracing::{info, warn};
use voyage_sequencer::{Route, Sequencer, SequencerParams, SequencingProblem};

use crate::file_utils::read_problem;

#[derive(Args)]
pub struct SequenceArgs {
    /// JSON file with locations, travel_times and time_windows
    #[arg(short = 'i', long)]
    input: PathBuf,

    /// Maximum number of partial tours explored before giving up
    #[arg(long)]
    search_limit: Option<usize>,
}

fn route_table(route: &Route, problem: &SequencingProblem) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["#", "Stop", "Cumulative cost"]);

    for (position, stop) in route.stops().iter().enumerate() {
        table.add_row(vec![
            position.to_string(),
            problem.location(stop.location_id).name().to_string(),
            stop.cumulative_cost.to_string(),
        ]);
    }

    table
}

pub fn run(args: SequenceArgs) -> anyhow::Result<()> {
    let problem = read_problem(&args.input)?;

    let mut params = SequencerParams::default();
    if let Some(search_limit) = args.search_limit {
        params.search_limit = search_limit;
    }

    let route = Sequencer::new(params).solve(&problem);

    if route.is_empty() {
        warn!(
            "No ordering available for the {} stops in {}",
            problem.num_locations(),
            args.input.display()
        );
        return Ok(());
    }

    println!("{}", route_table(&route, &problem));
    info!(
        "Visiting order {:?}, total cost {}",
        route.tour(),
        route.total_cost()
    );

    Ok(())
}
