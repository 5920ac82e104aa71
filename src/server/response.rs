use serde::Serialize;

use crate::{
    cafe::{cafe::Cafe, region::Region},
    presentation::detail::{rating_stars, HOURS_UNAVAILABLE},
    status::display::StatusDisplay,
};

/// One row of the /api/cafes list.
#[derive(Serialize, Clone, Debug)]
pub struct CafeSummary {
    name: String,
    address: String,
    rating: u8,
    rating_stars: String,
    hours_text: String,
    /// `None` when the cafe's schedule is unusable.
    status: Option<StatusDisplay>,
}

impl CafeSummary {
    pub fn new(cafe: &Cafe, status: Option<StatusDisplay>) -> Self {
        let hours_text = match &status {
            Some(status) => status.headline(),
            None => HOURS_UNAVAILABLE.to_string(),
        };
        Self {
            name: cafe.name.clone(),
            address: cafe.address.clone(),
            rating: cafe.rating,
            rating_stars: rating_stars(cafe.rating),
            hours_text,
            status,
        }
    }
}

/// Body of the /api/cafes endpoint.
#[derive(Serialize, Clone, Debug)]
pub struct CafeList {
    region: Region,
    cafes: Vec<CafeSummary>,
}

impl CafeList {
    pub fn new(region: Region, cafes: Vec<CafeSummary>) -> Self {
        Self { region, cafes }
    }
}
