use clap::{Parser, Subcommand};

use mimalloc::MiMalloc;

use crate::{itinerary::TripArgs, sequence::SequenceArgs};

mod file_utils;
mod itinerary;
mod sequence;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Order the stops of a problem file
    #[command(visible_alias = "s")]
    Sequence {
        #[command(flatten)]
        args: SequenceArgs,
    },
    /// Print the prompt that would be sent for a trip
    Prompt {
        #[command(flatten)]
        args: TripArgs,
    },
    /// Generate the itinerary text for a trip
    #[command(visible_alias = "i")]
    Itinerary {
        #[command(flatten)]
        args: TripArgs,
    },
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenvy::from_filename("./.env.local").ok();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    match cli.command {
        Some(Commands::Sequence { args }) => sequence::run(args)?,
        Some(Commands::Prompt { args }) => itinerary::run_prompt(args)?,
        Some(Commands::Itinerary { args }) => itinerary::run_itinerary(args).await?,
        None => {}
    }

    Ok(())
}
