//! In-memory page used by the CLI and by tests.
//!
//! `HeadlessForm` behaves like the ad form markup: `reset` restores the
//! default values and selection but leaves option `disabled`/`hidden` flags
//! alone, just as a native form reset does.

use crate::core::controller::Widgets;
use crate::domain::model::{Coordinates, Field, Guests, OptionState, OverlayKind};
use crate::domain::ports::{FilterForm, FormView, ImagePreviews, MapView, OverlayHost};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

const DEFAULT_LODGING_TYPE: &str = "flat";
const DEFAULT_ROOM_NUMBER: &str = "1";
const DEFAULT_TIME: &str = "12:00";
const DEFAULT_PLACEHOLDER: &str = "1000";
const CAPACITY_OPTIONS: [Guests; 4] = [Guests(3), Guests(2), Guests(1), Guests(0)];
const DEFAULT_CAPACITY: Guests = Guests(3);

#[derive(Debug, Clone)]
struct GuestOption {
    guests: Guests,
    state: OptionState,
}

#[derive(Debug, Clone)]
pub struct HeadlessForm {
    title: String,
    address: String,
    lodging_type: String,
    price: String,
    price_placeholder: String,
    room_number: String,
    capacity: Vec<GuestOption>,
    time_in: String,
    time_out: String,
    description: String,
    features: Vec<String>,
    errors: HashMap<Field, String>,
}

impl Default for HeadlessForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            address: String::new(),
            lodging_type: DEFAULT_LODGING_TYPE.to_string(),
            price: String::new(),
            price_placeholder: DEFAULT_PLACEHOLDER.to_string(),
            room_number: DEFAULT_ROOM_NUMBER.to_string(),
            capacity: CAPACITY_OPTIONS
                .iter()
                .map(|guests| GuestOption {
                    guests: *guests,
                    state: OptionState {
                        selected: *guests == DEFAULT_CAPACITY,
                        ..OptionState::default()
                    },
                })
                .collect(),
            time_in: DEFAULT_TIME.to_string(),
            time_out: DEFAULT_TIME.to_string(),
            description: String::new(),
            features: Vec::new(),
            errors: HashMap::new(),
        }
    }
}

impl HeadlessForm {
    pub fn type_title(&mut self, value: &str) {
        self.title = value.to_string();
    }

    pub fn type_price(&mut self, value: &str) {
        self.price = value.to_string();
    }

    pub fn select_lodging_type(&mut self, value: &str) {
        self.lodging_type = value.to_string();
    }

    pub fn select_room_number(&mut self, value: &str) {
        self.room_number = value.to_string();
    }

    pub fn select_time_in(&mut self, value: &str) {
        self.time_in = value.to_string();
    }

    pub fn select_time_out(&mut self, value: &str) {
        self.time_out = value.to_string();
    }

    /// Selects a capacity option the way a user can: disabled options refuse.
    pub fn select_guests(&mut self, guests: Guests) -> bool {
        let selectable = self
            .capacity
            .iter()
            .any(|option| option.guests == guests && !option.state.disabled);
        if selectable {
            for option in &mut self.capacity {
                option.state.selected = option.guests == guests;
            }
        }
        selectable
    }

    pub fn type_description(&mut self, value: &str) {
        self.description = value.to_string();
    }

    pub fn check_feature(&mut self, feature: &str) {
        if !self.features.iter().any(|f| f == feature) {
            self.features.push(feature.to_string());
        }
    }

    pub fn field_error(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }
}

impl FormView for HeadlessForm {
    fn title(&self) -> String {
        self.title.clone()
    }

    fn address(&self) -> String {
        self.address.clone()
    }

    fn set_address(&mut self, value: &str) {
        self.address = value.to_string();
    }

    fn lodging_type(&self) -> String {
        self.lodging_type.clone()
    }

    fn price(&self) -> String {
        self.price.clone()
    }

    fn set_price(&mut self, value: &str) {
        self.price = value.to_string();
    }

    fn price_placeholder(&self) -> String {
        self.price_placeholder.clone()
    }

    fn set_price_placeholder(&mut self, value: &str) {
        self.price_placeholder = value.to_string();
    }

    fn room_number(&self) -> String {
        self.room_number.clone()
    }

    fn guest_options(&self) -> Vec<Guests> {
        self.capacity.iter().map(|option| option.guests).collect()
    }

    fn guest_option_state(&self, guests: Guests) -> Option<OptionState> {
        self.capacity
            .iter()
            .find(|option| option.guests == guests)
            .map(|option| option.state)
    }

    fn set_guest_option(&mut self, guests: Guests, state: OptionState) {
        if let Some(option) = self.capacity.iter_mut().find(|option| option.guests == guests) {
            option.state = state;
        }
    }

    fn time_in(&self) -> String {
        self.time_in.clone()
    }

    fn set_time_in(&mut self, value: &str) {
        self.time_in = value.to_string();
    }

    fn time_out(&self) -> String {
        self.time_out.clone()
    }

    fn set_time_out(&mut self, value: &str) {
        self.time_out = value.to_string();
    }

    fn description(&self) -> String {
        self.description.clone()
    }

    fn features(&self) -> Vec<String> {
        self.features.clone()
    }

    fn show_field_error(&mut self, field: Field, message: Option<&str>) {
        match message {
            Some(message) => {
                self.errors.insert(field, message.to_string());
            }
            None => {
                self.errors.remove(&field);
            }
        }
    }

    fn reset(&mut self) {
        // the placeholder is a property, not a form value, and survives reset
        let placeholder = std::mem::take(&mut self.price_placeholder);
        let capacity_flags: Vec<(Guests, OptionState)> = self
            .capacity
            .iter()
            .map(|option| (option.guests, option.state))
            .collect();
        let errors = std::mem::take(&mut self.errors);

        *self = Self::default();
        self.price_placeholder = placeholder;
        self.errors = errors;
        for (guests, state) in capacity_flags {
            if let Some(option) = self.capacity.iter_mut().find(|o| o.guests == guests) {
                option.state.disabled = state.disabled;
                option.state.hidden = state.hidden;
            }
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct HeadlessOverlays {
    visible: Rc<RefCell<Vec<OverlayKind>>>,
    shown: Rc<Cell<usize>>,
    removals: Rc<Cell<usize>>,
}

impl HeadlessOverlays {
    pub fn shown(&self) -> usize {
        self.shown.get()
    }

    pub fn removals(&self) -> usize {
        self.removals.get()
    }
}

impl OverlayHost for HeadlessOverlays {
    fn show(&mut self, kind: OverlayKind) {
        let mut visible = self.visible.borrow_mut();
        if !visible.contains(&kind) {
            visible.push(kind);
        }
        self.shown.set(self.shown.get() + 1);
    }

    fn remove(&mut self, kind: OverlayKind) {
        let mut visible = self.visible.borrow_mut();
        let before = visible.len();
        visible.retain(|shown| *shown != kind);
        if visible.len() < before {
            self.removals.set(self.removals.get() + 1);
        }
    }

    fn is_visible(&self, kind: OverlayKind) -> bool {
        self.visible.borrow().contains(&kind)
    }
}

#[derive(Debug, Clone)]
pub struct HeadlessMap {
    center: Coordinates,
    marker: Rc<Cell<Coordinates>>,
    resets: Rc<Cell<usize>>,
}

impl HeadlessMap {
    pub fn new(center: Coordinates) -> Self {
        Self {
            center,
            marker: Rc::new(Cell::new(center)),
            resets: Rc::new(Cell::new(0)),
        }
    }

    pub fn move_marker(&self, coords: Coordinates) {
        self.marker.set(coords);
    }

    pub fn marker(&self) -> Coordinates {
        self.marker.get()
    }

    pub fn resets(&self) -> usize {
        self.resets.get()
    }
}

impl MapView for HeadlessMap {
    fn reset(&mut self) -> Coordinates {
        self.marker.set(self.center);
        self.resets.set(self.resets.get() + 1);
        self.center
    }
}

#[derive(Debug, Clone, Default)]
pub struct HeadlessFilters {
    resets: Rc<Cell<usize>>,
}

impl HeadlessFilters {
    pub fn resets(&self) -> usize {
        self.resets.get()
    }
}

impl FilterForm for HeadlessFilters {
    fn reset(&mut self) {
        self.resets.set(self.resets.get() + 1);
    }
}

#[derive(Debug, Clone, Default)]
pub struct HeadlessImages {
    staged: Rc<RefCell<Vec<String>>>,
}

impl HeadlessImages {
    pub fn stage(&self, name: &str) {
        self.staged.borrow_mut().push(name.to_string());
    }

    pub fn staged(&self) -> Vec<String> {
        self.staged.borrow().clone()
    }
}

impl ImagePreviews for HeadlessImages {
    fn reset(&mut self) {
        self.staged.borrow_mut().clear();
    }
}

/// Handles onto the headless widgets; clones share state with the boxed copies.
#[derive(Debug, Clone)]
pub struct HeadlessPage {
    overlays: HeadlessOverlays,
    map: HeadlessMap,
    filters: HeadlessFilters,
    images: HeadlessImages,
}

impl HeadlessPage {
    pub fn new(center: Coordinates) -> Self {
        Self {
            overlays: HeadlessOverlays::default(),
            map: HeadlessMap::new(center),
            filters: HeadlessFilters::default(),
            images: HeadlessImages::default(),
        }
    }

    pub fn widgets(&self) -> Widgets {
        Widgets {
            overlays: Box::new(self.overlays.clone()),
            map: Box::new(self.map.clone()),
            filters: Box::new(self.filters.clone()),
            images: Box::new(self.images.clone()),
        }
    }

    pub fn overlays(&self) -> &HeadlessOverlays {
        &self.overlays
    }

    pub fn map(&self) -> &HeadlessMap {
        &self.map
    }

    pub fn filters(&self) -> &HeadlessFilters {
        &self.filters
    }

    pub fn images(&self) -> &HeadlessImages {
        &self.images
    }
}
