use serde::Serialize;
use tracing::warn;

use crate::{
    cafe::{
        cafe::{Cafe, MAX_RATING},
        region::Region,
    },
    error::StatusError,
    status::formatter::CafeStatusFormatter,
    timing::clock::Clock,
};

use super::style::{RegionStyle, Rgb};

pub const HOURS_UNAVAILABLE: &str = "Hours unavailable";
const FULL_STAR: char = '\u{2605}';
const EMPTY_STAR: char = '\u{2606}';

/// Everything the detail screen binds for one cafe.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CafeDetail {
    pub name: String,
    pub region: Region,
    pub rating_stars: String,
    pub rating_color: Rgb,
    pub address: String,
    pub description: String,
    pub images: Vec<String>,
    pub hours_text: String,
    /// `None` when the hours could not be worked out.
    pub is_open: Option<bool>,
    pub status_color: Rgb,
    pub time_color: Rgb,
}

impl CafeDetail {
    /// Builds the detail model for `cafe`, reading `clock` in the region's timezone.
    ///
    /// A broken schedule shows as "Hours unavailable" instead of failing.
    /// Only a clock failure is passed on.
    pub fn build(
        formatter: &CafeStatusFormatter,
        region: Region,
        cafe: &Cafe,
        clock: &dyn Clock,
    ) -> Result<Self, StatusError> {
        let style = RegionStyle::for_region(region);
        let status = formatter.describe_status_at(cafe, clock, region.timezone());
        let (hours_text, is_open) = match status {
            Ok(display) => (display.headline(), Some(display.is_open)),
            Err(err @ StatusError::InvalidSchedule { .. }) => {
                warn!(cafe = %cafe.name, %region, %err, "Hours unavailable");
                (HOURS_UNAVAILABLE.to_string(), None)
            }
            Err(err) => return Err(err),
        };

        Ok(Self {
            name: cafe.name.clone(),
            region,
            rating_stars: rating_stars(cafe.rating),
            rating_color: style.rating,
            address: cafe.address.clone(),
            description: cafe.description.clone(),
            images: cafe.images.clone(),
            hours_text,
            is_open,
            status_color: style.status_color(is_open.unwrap_or(false)),
            time_color: style.secondary,
        })
    }
}

/// Full stars for the rating, padded with empty stars to five.
pub fn rating_stars(rating: u8) -> String {
    let full = rating.min(MAX_RATING) as usize;
    let mut stars = String::with_capacity(MAX_RATING as usize * FULL_STAR.len_utf8());
    stars.extend(std::iter::repeat(FULL_STAR).take(full));
    stars.extend(std::iter::repeat(EMPTY_STAR).take(MAX_RATING as usize - full));
    stars
}
