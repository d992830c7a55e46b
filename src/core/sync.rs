//! Handlers that keep related inputs consistent.

use crate::core::slider::RangeSlider;
use crate::domain::model::{LodgingType, OptionState, RoomCount};
use crate::domain::ports::FormView;
use crate::domain::rules::{guest_options_for, min_price_for};

/// Projects the room count onto the `#capacity` options.
pub fn sync_guests<V: FormView + ?Sized>(view: &mut V, rooms: RoomCount) {
    let allowed = guest_options_for(rooms);
    let default = allowed[0];

    for guests in view.guest_options() {
        let excluded = !allowed.contains(&guests);
        view.set_guest_option(
            guests,
            OptionState {
                selected: guests == default,
                disabled: excluded,
                hidden: excluded,
            },
        );
    }

    tracing::debug!("Guest options synced for {} rooms, default {}", rooms, default);
}

pub fn apply_lodging_type<V: FormView + ?Sized>(
    view: &mut V,
    slider: &mut RangeSlider,
    lodging: LodgingType,
) {
    let placeholder = min_price_for(lodging).to_string();
    view.set_price_placeholder(&placeholder);
    slider.set_from_text(&placeholder);
    tracing::debug!("Lodging type {} sets price placeholder {}", lodging, placeholder);
}

pub fn push_slider_to_price<V: FormView + ?Sized>(view: &mut V, slider: &RangeSlider) {
    view.set_price(&slider.get());
}

/// The typed value stays in the field as is; only the slider position is clamped.
pub fn push_price_to_slider<V: FormView + ?Sized>(view: &V, slider: &mut RangeSlider) {
    slider.set_from_text(&view.price());
}

pub fn reset_price<V: FormView + ?Sized>(view: &mut V, slider: &mut RangeSlider, baseline: u32) {
    view.set_price_placeholder(&baseline.to_string());
    slider.reset();
}

pub fn mirror_time_in<V: FormView + ?Sized>(view: &mut V) {
    let value = view.time_in();
    view.set_time_out(&value);
}

pub fn mirror_time_out<V: FormView + ?Sized>(view: &mut V) {
    let value = view.time_out();
    view.set_time_in(&value);
}
