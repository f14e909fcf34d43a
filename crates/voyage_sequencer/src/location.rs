use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Position of a location in the problem, the depot is always `0`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct LocationIdx(usize);

pub const DEPOT: LocationIdx = LocationIdx(0);

impl LocationIdx {
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    pub const fn get(&self) -> usize {
        self.0
    }
}

impl std::fmt::Display for LocationIdx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for LocationIdx {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

impl std::ops::Index<LocationIdx> for [Location] {
    type Output = Location;
    fn index(&self, index: LocationIdx) -> &Self::Output {
        &self[index.0]
    }
}

impl std::ops::Index<LocationIdx> for Vec<Location> {
    type Output = Location;
    fn index(&self, index: LocationIdx) -> &Self::Output {
        &self[index.0]
    }
}

/// A named stop. There are no coordinates, travel costs are supplied directly.
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq, Eq)]
#[serde(transparent)]
pub struct Location {
    name: String,
}

impl Location {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl From<&str> for Location {
    fn from(name: &str) -> Self {
        Location::new(name)
    }
}

impl From<String> for Location {
    fn from(name: String) -> Self {
        Location { name }
    }
}
