//! Static rule tables. They live for the whole page and are never mutated.

use crate::domain::model::{Guests, LodgingType, RoomCount};

pub const TITLE_MIN_LENGTH: usize = 30;
pub const TITLE_MAX_LENGTH: usize = 100;

/// Price placeholder and slider start after a reset.
pub const BASELINE_PRICE: u32 = 1000;

/// Allowed `#capacity` values for a room count. The first entry is the default selection.
pub fn guest_options_for(rooms: RoomCount) -> &'static [Guests] {
    match rooms {
        RoomCount::One => &[Guests(1)],
        RoomCount::Two => &[Guests(1), Guests(2)],
        RoomCount::Three => &[Guests(1), Guests(2), Guests(3)],
        RoomCount::Hundred => &[Guests(0)],
    }
}

pub fn default_guests_for(rooms: RoomCount) -> Guests {
    guest_options_for(rooms)[0]
}

pub fn min_price_for(lodging: LodgingType) -> u32 {
    match lodging {
        LodgingType::Bungalow => 0,
        LodgingType::Flat => 1000,
        LodgingType::Hotel => 3000,
        LodgingType::House => 5000,
        LodgingType::Palace => 10000,
    }
}
