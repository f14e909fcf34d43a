use std::{fs::File, io::BufReader, path::Path};

use anyhow::Context;
use voyage_sequencer::{SequencingProblem, json::JsonSequencingProblem};

pub fn read_problem(path: &Path) -> anyhow::Result<SequencingProblem> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let content: JsonSequencingProblem = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing {}", path.display()))?;

    Ok(content.build_problem()?)
}

#[cfg(test)]
mod tests {
    use std::env;

    use super::*;

    #[test]
    fn test_read_problem() {
        let path = env::current_dir()
            .unwrap()
            .join("tests/fixtures/day_trip.json");

        let problem = read_problem(&path).unwrap();

        assert_eq!(problem.num_locations(), 4);
        assert_eq!(
            problem.location_names(),
            vec!["Hotel", "Cathedral", "Market", "Museum"]
        );
    }

    #[test]
    fn test_read_problem_missing_file() {
        let path = env::current_dir()
            .unwrap()
            .join("tests/fixtures/does_not_exist.json");

        assert!(read_problem(&path).is_err());
    }
}
