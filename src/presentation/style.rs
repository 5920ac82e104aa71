use std::fmt::Display;

use serde::{Serialize, Serializer};

use crate::cafe::region::Region;

/// An sRGB colour, serialized as `#RRGGBB`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Per region colours for the detail screen.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RegionStyle {
    pub open: Rgb,
    pub closed: Rgb,
    /// Opening/closing time text and description.
    pub secondary: Rgb,
    pub rating: Rgb,
}

const SECONDARY_GREY: Rgb = Rgb(110, 107, 106);
const RATING_BLUE: Rgb = Rgb(49, 95, 114);

impl RegionStyle {
    pub fn for_region(region: Region) -> Self {
        match region {
            Region::NewZealand => Self {
                open: Rgb(52, 92, 20),
                closed: Rgb(173, 0, 10),
                secondary: SECONDARY_GREY,
                rating: RATING_BLUE,
            },
            Region::Melbourne => Self {
                open: Rgb(0, 255, 0),
                closed: Rgb(255, 0, 0),
                secondary: SECONDARY_GREY,
                rating: RATING_BLUE,
            },
        }
    }

    pub fn status_color(&self, is_open: bool) -> Rgb {
        if is_open {
            self.open
        } else {
            self.closed
        }
    }
}
