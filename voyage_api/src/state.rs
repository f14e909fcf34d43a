use std::{fs::File, io::BufReader, path::Path, sync::Arc};

use anyhow::Context;
use tracing::info;
use voyage_accounts::{
    AccountService, CredentialStore, InMemoryCredentialStore, MongoCredentialStore,
    MongoStoreParams, ScryptPasswordHashing,
};
use voyage_narrative::{GeminiClient, GeminiClientParams, NarrativeGenerator, placeholder_stops};
use voyage_sequencer::{Sequencer, SequencingProblem, json::JsonSequencingProblem};

use crate::config::{AccountsBackend, Config, DEFAULT_MAX_REQUEST_STOPS};

/// Process wide handles, created once at startup and read-only afterwards.
pub struct AppState {
    pub accounts: AccountService,
    pub narrator: Arc<dyn NarrativeGenerator>,
    pub sequencer: Sequencer,
    /// Stops sequenced when a request does not bring its own
    pub trip_stops: SequencingProblem,
    pub max_request_stops: usize,
}

fn load_stops_file(path: &Path) -> anyhow::Result<SequencingProblem> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let content: JsonSequencingProblem = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing {}", path.display()))?;

    Ok(content.build_problem()?)
}

impl AppState {
    pub fn new(
        accounts: AccountService,
        narrator: Arc<dyn NarrativeGenerator>,
        trip_stops: SequencingProblem,
    ) -> Self {
        AppState {
            accounts,
            narrator,
            sequencer: Sequencer::default(),
            trip_stops,
            max_request_stops: DEFAULT_MAX_REQUEST_STOPS,
        }
    }

    pub fn with_max_request_stops(mut self, max_request_stops: usize) -> Self {
        self.max_request_stops = max_request_stops;
        self
    }

    pub async fn init(config: &Config) -> anyhow::Result<Arc<Self>> {
        let store: Arc<dyn CredentialStore> = match config.accounts_backend {
            AccountsBackend::Mongo => Arc::new(
                MongoCredentialStore::connect(&MongoStoreParams {
                    uri: config.mongo_uri.clone(),
                    database: config.mongo_database.clone(),
                })
                .await
                .context("connecting to MongoDB")?,
            ),
            AccountsBackend::Memory => {
                info!("Using the in-memory credential store, accounts are lost on restart");
                Arc::new(InMemoryCredentialStore::new())
            }
        };

        let narrator = GeminiClient::new(GeminiClientParams {
            api_key: config.gemini_api_key.clone(),
            model: config.gemini_model.clone(),
            base_url: config.gemini_base_url.clone(),
            timeout: config.generation_timeout,
        })
        .context("building the Gemini client")?;
        info!("Generating itineraries with {}", narrator.model());

        let trip_stops = match &config.stops_file {
            Some(path) => load_stops_file(path)?,
            None => placeholder_stops(),
        };
        info!("Loaded {} trip stops", trip_stops.num_locations());

        Ok(Arc::new(
            AppState::new(
                AccountService::new(store, Arc::new(ScryptPasswordHashing::default())),
                Arc::new(narrator),
                trip_stops,
            )
            .with_max_request_stops(config.max_request_stops),
        ))
    }

    pub async fn shutdown(&self) {
        self.accounts.store().shutdown().await;
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_load_stops_file() {
        let path = std::env::temp_dir().join(format!("voyage-stops-{}.json", std::process::id()));
        let mut file = File::create(&path).unwrap();
        file.write_all(
            br#"{
                "locations": ["Hotel", "Museum"],
                "travel_times": [[0, 12], [12, 0]],
                "time_windows": [[0, 500], [0, 500]]
            }"#,
        )
        .unwrap();

        let stops = load_stops_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(stops.location_names(), vec!["Hotel", "Museum"]);
    }

    #[test]
    fn test_load_missing_stops_file() {
        let result = load_stops_file(Path::new("/definitely/not/here.json"));

        assert!(result.is_err());
    }
}
