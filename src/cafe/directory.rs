use std::{fs, path::Path};

use serde::Deserialize;
use tracing::info;

use crate::error::DirectoryError;

use super::{
    cafe::{Cafe, MAX_RATING},
    region::Region,
};

/// All cafes known to the service, grouped by region.
///
/// Built once at startup from the data file and shared read only afterwards.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct CafeDirectory {
    #[serde(default)]
    melbourne: Vec<Cafe>,
    #[serde(default)]
    new_zealand: Vec<Cafe>,
}

impl CafeDirectory {
    /// Builds a directory from cafes already in memory. Not validated; the
    /// formatter still reports a broken schedule when it is looked up.
    pub fn from_cafes(melbourne: Vec<Cafe>, new_zealand: Vec<Cafe>) -> Self {
        Self {
            melbourne,
            new_zealand,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, DirectoryError> {
        let directory: Self = serde_json::from_str(json)?;
        directory.validate()?;
        Ok(directory)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, DirectoryError> {
        let path = path.as_ref();
        let directory = Self::from_json(&fs::read_to_string(path)?)?;
        info!(
            path = %path.display(),
            melbourne = directory.melbourne.len(),
            new_zealand = directory.new_zealand.len(),
            "Loaded cafes"
        );
        Ok(directory)
    }

    pub fn cafes(&self, region: Region) -> &[Cafe] {
        match region {
            Region::Melbourne => &self.melbourne,
            Region::NewZealand => &self.new_zealand,
        }
    }

    /// Case insensitive lookup by exact name.
    pub fn find(&self, region: Region, name: &str) -> Option<&Cafe> {
        let name = name.trim().to_lowercase();
        self.cafes(region)
            .iter()
            .find(|cafe| cafe.name.to_lowercase() == name)
    }

    fn validate(&self) -> Result<(), DirectoryError> {
        for cafe in self.melbourne.iter().chain(self.new_zealand.iter()) {
            if cafe.rating > MAX_RATING {
                return Err(DirectoryError::InvalidRating {
                    name: cafe.name.clone(),
                    rating: cafe.rating,
                });
            }
            if !cafe.opening_hours.is_complete() {
                return Err(DirectoryError::InvalidSchedule {
                    name: cafe.name.clone(),
                    entries: cafe.opening_hours.len(),
                });
            }
        }
        Ok(())
    }
}
