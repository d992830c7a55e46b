use crate::core::overlay::DismissListeners;
use crate::core::slider::RangeSlider;
use crate::core::sync;
use crate::core::validators::{check_price, check_title, validate_snapshot};
use crate::domain::model::{
    Coordinates, Field, FormPayload, FormSnapshot, LodgingType, OverlayKind, PriceRange,
    RoomCount, SubmitMethod, ValidationReport,
};
use crate::domain::ports::{FilterForm, FormView, ImagePreviews, MapView, OverlayHost};
use crate::domain::rules::BASELINE_PRICE;
use crate::utils::error::Result;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq)]
pub struct FormSettings {
    pub price_range: PriceRange,
    /// Slider start and the placeholder restored on reset.
    pub baseline_price: u32,
    pub method: SubmitMethod,
}

impl Default for FormSettings {
    fn default() -> Self {
        Self {
            price_range: PriceRange::default(),
            baseline_price: BASELINE_PRICE,
            method: SubmitMethod::Post,
        }
    }
}

/// Page widgets the form resets alongside itself.
pub struct Widgets {
    pub overlays: Box<dyn OverlayHost>,
    pub map: Box<dyn MapView>,
    pub filters: Box<dyn FilterForm>,
    pub images: Box<dyn ImagePreviews>,
}

pub struct FormContext<V: FormView> {
    pub view: V,
    pub widgets: Widgets,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormEvent {
    TitleInput,
    RoomNumberChanged,
    LodgingTypeChanged,
    PriceChanged,
    SliderMoved(f64),
    TimeInChanged,
    TimeOutChanged,
    AddressPicked(Coordinates),
    Submit,
    ResetClicked,
    SubmissionSucceeded,
    SubmissionFailed,
    DocumentClick,
    KeyDown(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Dispatch {
    Handled,
    Ignored,
    Invalid(ValidationReport),
    /// Validation passed; the payload must be handed to the transport.
    Send(FormPayload),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Validating,
    Submitting,
    Success,
    Error,
}

impl Phase {
    pub fn can_transition_to(self, next: Phase) -> bool {
        matches!(
            (self, next),
            (Phase::Idle, Phase::Validating)
                | (Phase::Validating, Phase::Idle)
                | (Phase::Validating, Phase::Submitting)
                | (Phase::Submitting, Phase::Success)
                | (Phase::Submitting, Phase::Error)
                | (Phase::Submitting, Phase::Idle)
                | (Phase::Success, Phase::Idle)
                | (Phase::Error, Phase::Idle)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Succeeded,
    Failed,
    /// The caller stopped waiting before the transport answered.
    Abandoned,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionRecord {
    pub submitted_at: DateTime<Utc>,
    pub settled_at: Option<DateTime<Utc>>,
    pub outcome: Option<SubmissionOutcome>,
}

/// Event-driven controller for the ad form.
///
/// Every UI event goes through [`FormController::handle`]; nothing else
/// mutates the form. A `Submit` that returns [`Dispatch::Send`] leaves the
/// submission in flight until `SubmissionSucceeded` or `SubmissionFailed`
/// arrives, and other events keep being handled in between. Hosts that need
/// to interleave input with a pending request drive the controller this way;
/// [`crate::core::session::FormSession`] covers the sequential case.
pub struct FormController<V: FormView> {
    ctx: FormContext<V>,
    settings: FormSettings,
    slider: RangeSlider,
    listeners: DismissListeners,
    phase: Phase,
    in_flight: Option<SubmissionRecord>,
    last_submission: Option<SubmissionRecord>,
}

impl<V: FormView> FormController<V> {
    /// Builds the controller and runs the load-time guest sync.
    pub fn new(ctx: FormContext<V>, settings: FormSettings) -> Result<Self> {
        let slider = RangeSlider::new(settings.price_range, f64::from(settings.baseline_price))?;
        let mut controller = Self {
            ctx,
            settings,
            slider,
            listeners: DismissListeners::new(),
            phase: Phase::Idle,
            in_flight: None,
            last_submission: None,
        };
        controller.sync_rooms()?;
        Ok(controller)
    }

    pub fn view(&self) -> &V {
        &self.ctx.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.ctx.view
    }

    pub fn slider(&self) -> &RangeSlider {
        &self.slider
    }

    pub fn settings(&self) -> &FormSettings {
        &self.settings
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn listeners(&self) -> &DismissListeners {
        &self.listeners
    }

    pub fn overlay_visible(&self, kind: OverlayKind) -> bool {
        self.ctx.widgets.overlays.is_visible(kind)
    }

    pub fn last_submission(&self) -> Option<&SubmissionRecord> {
        self.last_submission.as_ref()
    }

    pub fn handle(&mut self, event: FormEvent) -> Result<Dispatch> {
        tracing::debug!("Handling {:?}", event);

        match event {
            FormEvent::TitleInput => {
                let message = check_title(&self.ctx.view.title());
                self.ctx.view.show_field_error(Field::Title, message.as_deref());
                Ok(Dispatch::Handled)
            }
            FormEvent::RoomNumberChanged => {
                self.sync_rooms()?;
                Ok(Dispatch::Handled)
            }
            FormEvent::LodgingTypeChanged => {
                let lodging = self.lodging_type()?;
                sync::apply_lodging_type(&mut self.ctx.view, &mut self.slider, lodging);
                self.revalidate_price(lodging);
                Ok(Dispatch::Handled)
            }
            FormEvent::PriceChanged => {
                sync::push_price_to_slider(&self.ctx.view, &mut self.slider);
                let lodging = self.lodging_type()?;
                self.revalidate_price(lodging);
                Ok(Dispatch::Handled)
            }
            FormEvent::SliderMoved(position) => {
                self.slider.set(position);
                sync::push_slider_to_price(&mut self.ctx.view, &self.slider);
                let lodging = self.lodging_type()?;
                self.revalidate_price(lodging);
                Ok(Dispatch::Handled)
            }
            FormEvent::TimeInChanged => {
                sync::mirror_time_in(&mut self.ctx.view);
                Ok(Dispatch::Handled)
            }
            FormEvent::TimeOutChanged => {
                sync::mirror_time_out(&mut self.ctx.view);
                Ok(Dispatch::Handled)
            }
            FormEvent::AddressPicked(coords) => {
                self.ctx.view.set_address(&coords.to_address());
                Ok(Dispatch::Handled)
            }
            FormEvent::Submit => self.submit(),
            FormEvent::ResetClicked => {
                self.reset_all()?;
                tracing::info!("Form reset by user");
                Ok(Dispatch::Handled)
            }
            FormEvent::SubmissionSucceeded => self.settle(SubmissionOutcome::Succeeded),
            FormEvent::SubmissionFailed => self.settle(SubmissionOutcome::Failed),
            FormEvent::DocumentClick => {
                let dismissed = self.listeners.on_click(self.ctx.widgets.overlays.as_mut());
                Ok(Self::dismissal(dismissed))
            }
            FormEvent::KeyDown(key) => {
                let dismissed = self
                    .listeners
                    .on_key_down(&key, self.ctx.widgets.overlays.as_mut());
                Ok(Self::dismissal(dismissed))
            }
        }
    }

    pub fn snapshot(&self) -> Result<FormSnapshot> {
        let view = &self.ctx.view;
        Ok(FormSnapshot {
            title: view.title(),
            address: view.address(),
            lodging_type: self.lodging_type()?,
            price: view.price(),
            room_number: self.room_count()?,
            capacity: view.selected_guests(),
            time_in: view.time_in(),
            time_out: view.time_out(),
            description: view.description(),
            features: view.features(),
        })
    }

    pub fn validate(&self) -> Result<ValidationReport> {
        Ok(validate_snapshot(&self.snapshot()?, &self.settings.price_range))
    }

    /// Drops the in-flight submission without an outcome overlay, so the
    /// form accepts the next `Submit`. Returns false when nothing was pending.
    pub fn abandon_submission(&mut self) -> bool {
        let Some(mut record) = self.in_flight.take() else {
            return false;
        };

        record.settled_at = Some(Utc::now());
        record.outcome = Some(SubmissionOutcome::Abandoned);
        tracing::warn!(
            "Submission started at {} abandoned before an outcome",
            record.submitted_at.to_rfc3339()
        );
        self.last_submission = Some(record);
        self.set_phase(Phase::Idle);
        true
    }

    fn submit(&mut self) -> Result<Dispatch> {
        if self.in_flight.is_some() {
            tracing::warn!("Submit ignored: a submission is already in flight");
            return Ok(Dispatch::Ignored);
        }

        self.set_phase(Phase::Validating);
        let snapshot = match self.snapshot() {
            Ok(snapshot) => snapshot,
            Err(e) => {
                self.set_phase(Phase::Idle);
                return Err(e);
            }
        };

        let report = validate_snapshot(&snapshot, &self.settings.price_range);
        for field in [Field::Title, Field::Price] {
            self.ctx
                .view
                .show_field_error(field, report.message_for(field));
        }

        if !report.is_valid() {
            tracing::info!("Submit blocked by {} invalid field(s)", report.errors.len());
            self.set_phase(Phase::Idle);
            return Ok(Dispatch::Invalid(report));
        }

        let submitted_at = Utc::now();
        self.in_flight = Some(SubmissionRecord {
            submitted_at,
            settled_at: None,
            outcome: None,
        });
        self.set_phase(Phase::Submitting);
        tracing::info!("Form submitted at {}", submitted_at.to_rfc3339());

        Ok(Dispatch::Send(FormPayload::from(&snapshot)))
    }

    fn settle(&mut self, outcome: SubmissionOutcome) -> Result<Dispatch> {
        let Some(mut record) = self.in_flight.take() else {
            tracing::warn!("{:?} received with no submission in flight", outcome);
            return Ok(Dispatch::Ignored);
        };

        let settled_at = Utc::now();
        record.settled_at = Some(settled_at);
        record.outcome = Some(outcome);
        tracing::info!(
            "Submission {:?} after {} ms",
            outcome,
            (settled_at - record.submitted_at).num_milliseconds()
        );
        self.last_submission = Some(record);

        let reset = match outcome {
            SubmissionOutcome::Succeeded => {
                self.set_phase(Phase::Success);
                self.show_overlay(OverlayKind::Success);
                self.reset_all()
            }
            SubmissionOutcome::Failed => {
                self.set_phase(Phase::Error);
                self.show_overlay(OverlayKind::Error);
                Ok(())
            }
            SubmissionOutcome::Abandoned => Ok(()),
        };

        self.set_phase(Phase::Idle);
        reset.map(|_| Dispatch::Handled)
    }

    fn show_overlay(&mut self, kind: OverlayKind) {
        if self.listeners.attach(kind) {
            self.ctx.widgets.overlays.show(kind);
        } else {
            tracing::debug!("{:?} overlay already visible", kind);
        }
    }

    /// Form, filters, map, slider and image previews back to their defaults.
    fn reset_all(&mut self) -> Result<()> {
        self.ctx.view.reset();
        self.ctx.widgets.filters.reset();
        let center = self.ctx.widgets.map.reset();
        self.ctx.view.set_address(&center.to_address());
        sync::reset_price(&mut self.ctx.view, &mut self.slider, self.settings.baseline_price);
        self.ctx.widgets.images.reset();

        self.ctx.view.show_field_error(Field::Title, None);
        self.ctx.view.show_field_error(Field::Price, None);
        self.sync_rooms()
    }

    fn sync_rooms(&mut self) -> Result<()> {
        let rooms = self.room_count()?;
        sync::sync_guests(&mut self.ctx.view, rooms);
        Ok(())
    }

    fn revalidate_price(&mut self, lodging: LodgingType) {
        let message = check_price(&self.ctx.view.price(), lodging, &self.settings.price_range);
        self.ctx.view.show_field_error(Field::Price, message.as_deref());
    }

    fn lodging_type(&self) -> Result<LodgingType> {
        self.ctx.view.lodging_type().parse()
    }

    fn room_count(&self) -> Result<RoomCount> {
        self.ctx.view.room_number().parse()
    }

    fn set_phase(&mut self, next: Phase) {
        debug_assert!(
            self.phase.can_transition_to(next),
            "illegal transition {:?} -> {:?}",
            self.phase,
            next
        );
        tracing::debug!("Phase {:?} -> {:?}", self.phase, next);
        self.phase = next;
    }

    fn dismissal(dismissed: Vec<OverlayKind>) -> Dispatch {
        if dismissed.is_empty() {
            Dispatch::Ignored
        } else {
            Dispatch::Handled
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::headless::{HeadlessForm, HeadlessPage};
    use crate::core::overlay::ESCAPE_KEY;
    use crate::domain::model::Guests;
    use crate::utils::error::FormError;

    fn controller() -> (FormController<HeadlessForm>, HeadlessPage) {
        let page = HeadlessPage::new(Coordinates::new(35.6895, 139.69171));
        let ctx = FormContext {
            view: HeadlessForm::default(),
            widgets: page.widgets(),
        };
        let controller = FormController::new(ctx, FormSettings::default()).unwrap();
        (controller, page)
    }

    fn fill_valid(controller: &mut FormController<HeadlessForm>) {
        controller.view_mut().type_title("Уютная квартира в центре Токио рядом с парком");
        controller.view_mut().type_price("1500");
        controller.handle(FormEvent::PriceChanged).unwrap();
    }

    #[test]
    fn test_load_syncs_guests_for_default_room() {
        let (controller, _page) = controller();
        assert_eq!(controller.view().selected_guests(), Some(Guests(1)));
        assert!(controller.view().guest_option_state(Guests(3)).unwrap().hidden);
    }

    #[test]
    fn test_phase_transitions() {
        assert!(Phase::Idle.can_transition_to(Phase::Validating));
        assert!(Phase::Validating.can_transition_to(Phase::Idle));
        assert!(Phase::Submitting.can_transition_to(Phase::Error));
        assert!(!Phase::Idle.can_transition_to(Phase::Submitting));
        assert!(!Phase::Success.can_transition_to(Phase::Submitting));
        assert!(Phase::Submitting.can_transition_to(Phase::Idle));
    }

    #[test]
    fn test_lodging_change_revalidates_price() {
        let (mut controller, _page) = controller();
        controller.view_mut().type_price("4000");
        controller.handle(FormEvent::PriceChanged).unwrap();
        assert_eq!(controller.view().field_error(Field::Price), None);

        controller.view_mut().select_lodging_type("house");
        controller.handle(FormEvent::LodgingTypeChanged).unwrap();
        assert_eq!(controller.view().price_placeholder(), "5000");
        assert_eq!(controller.slider().get(), "5000");
        assert_eq!(
            controller.view().field_error(Field::Price),
            Some("минимальная цена для данного типа жилья 5000 рублей")
        );
    }

    #[test]
    fn test_slider_move_clears_stale_price_error() {
        let (mut controller, _page) = controller();
        controller.view_mut().type_price("500");
        controller.handle(FormEvent::PriceChanged).unwrap();
        assert!(controller.view().field_error(Field::Price).is_some());

        controller.handle(FormEvent::SliderMoved(5000.0)).unwrap();
        assert_eq!(controller.view().price(), "5000");
        assert_eq!(controller.view().field_error(Field::Price), None);
    }

    #[test]
    fn test_slider_move_below_floor_shows_price_error() {
        let (mut controller, _page) = controller();
        controller.view_mut().select_lodging_type("hotel");
        controller.handle(FormEvent::LodgingTypeChanged).unwrap();

        controller.handle(FormEvent::SliderMoved(1200.0)).unwrap();
        assert_eq!(
            controller.view().field_error(Field::Price),
            Some("минимальная цена для данного типа жилья 3000 рублей")
        );
    }

    #[test]
    fn test_abandoned_submission_unlocks_the_form() {
        let (mut controller, page) = controller();
        fill_valid(&mut controller);
        controller.handle(FormEvent::Submit).unwrap();
        assert!(controller.is_submitting());

        assert!(controller.abandon_submission());
        assert!(!controller.is_submitting());
        assert_eq!(controller.phase(), Phase::Idle);
        assert_eq!(page.overlays().shown(), 0);
        assert_eq!(
            controller.last_submission().unwrap().outcome,
            Some(SubmissionOutcome::Abandoned)
        );

        assert!(matches!(
            controller.handle(FormEvent::Submit).unwrap(),
            Dispatch::Send(_)
        ));
        controller.handle(FormEvent::SubmissionSucceeded).unwrap();
        assert!(!controller.abandon_submission());
    }

    #[test]
    fn test_unknown_lodging_type_is_an_error() {
        let (mut controller, _page) = controller();
        controller.view_mut().select_lodging_type("castle");
        let err = controller.handle(FormEvent::LodgingTypeChanged).unwrap_err();
        assert!(matches!(err, FormError::UnknownLodgingType { .. }));
    }

    #[test]
    fn test_invalid_submit_shows_errors_and_returns_to_idle() {
        let (mut controller, _page) = controller();
        let dispatch = controller.handle(FormEvent::Submit).unwrap();
        match dispatch {
            Dispatch::Invalid(report) => assert_eq!(report.errors.len(), 2),
            other => panic!("unexpected dispatch {:?}", other),
        }
        assert_eq!(controller.phase(), Phase::Idle);
        assert!(!controller.is_submitting());
        assert!(controller.view().field_error(Field::Title).is_some());
    }

    #[test]
    fn test_second_submit_while_in_flight_is_ignored() {
        let (mut controller, _page) = controller();
        fill_valid(&mut controller);

        assert!(matches!(
            controller.handle(FormEvent::Submit).unwrap(),
            Dispatch::Send(_)
        ));
        assert_eq!(controller.phase(), Phase::Submitting);
        assert_eq!(
            controller.handle(FormEvent::Submit).unwrap(),
            Dispatch::Ignored
        );

        // other fields stay live while in flight
        controller.handle(FormEvent::SliderMoved(9000.0)).unwrap();
        assert_eq!(controller.view().price(), "9000");
    }

    #[test]
    fn test_success_resets_and_shows_overlay() {
        let (mut controller, page) = controller();
        fill_valid(&mut controller);
        controller.view_mut().select_room_number("3");
        controller.handle(FormEvent::RoomNumberChanged).unwrap();
        page.images().stage("flat.jpg");

        controller.handle(FormEvent::Submit).unwrap();
        controller.handle(FormEvent::SubmissionSucceeded).unwrap();

        assert_eq!(controller.phase(), Phase::Idle);
        assert!(controller.overlay_visible(OverlayKind::Success));
        assert_eq!(controller.view().title(), "");
        assert_eq!(controller.view().price_placeholder(), "1000");
        assert_eq!(controller.slider().get(), "1000");
        assert_eq!(controller.view().address(), "35.68950, 139.69171");
        assert_eq!(controller.view().selected_guests(), Some(Guests(1)));
        assert_eq!(page.filters().resets(), 1);
        assert_eq!(page.map().resets(), 1);
        assert!(page.images().staged().is_empty());

        let record = controller.last_submission().unwrap();
        assert_eq!(record.outcome, Some(SubmissionOutcome::Succeeded));
        assert!(record.settled_at.unwrap() >= record.submitted_at);
    }

    #[test]
    fn test_failure_keeps_form_and_shows_error_overlay() {
        let (mut controller, page) = controller();
        fill_valid(&mut controller);

        controller.handle(FormEvent::Submit).unwrap();
        controller.handle(FormEvent::SubmissionFailed).unwrap();

        assert!(controller.overlay_visible(OverlayKind::Error));
        assert!(!controller.overlay_visible(OverlayKind::Success));
        assert_eq!(controller.view().price(), "1500");
        assert_eq!(page.map().resets(), 0);
        assert!(!controller.is_submitting());
    }

    #[test]
    fn test_stale_outcome_is_ignored() {
        let (mut controller, _page) = controller();
        assert_eq!(
            controller.handle(FormEvent::SubmissionSucceeded).unwrap(),
            Dispatch::Ignored
        );
        assert!(!controller.overlay_visible(OverlayKind::Success));
    }

    #[test]
    fn test_escape_dismisses_success_without_residue() {
        let (mut controller, page) = controller();
        fill_valid(&mut controller);
        controller.handle(FormEvent::Submit).unwrap();
        controller.handle(FormEvent::SubmissionSucceeded).unwrap();
        assert_eq!(controller.listeners().len(), 2);

        let first = controller
            .handle(FormEvent::KeyDown(ESCAPE_KEY.to_string()))
            .unwrap();
        assert_eq!(first, Dispatch::Handled);
        assert!(!controller.overlay_visible(OverlayKind::Success));
        assert!(controller.listeners().is_empty());

        let second = controller
            .handle(FormEvent::KeyDown(ESCAPE_KEY.to_string()))
            .unwrap();
        assert_eq!(second, Dispatch::Ignored);
        assert_eq!(controller.handle(FormEvent::DocumentClick).unwrap(), Dispatch::Ignored);
        assert_eq!(page.overlays().removals(), 1);
    }

    #[test]
    fn test_manual_reset_shows_no_overlay() {
        let (mut controller, page) = controller();
        controller.view_mut().select_lodging_type("palace");
        controller.handle(FormEvent::LodgingTypeChanged).unwrap();

        controller.handle(FormEvent::ResetClicked).unwrap();

        assert_eq!(controller.view().price_placeholder(), "1000");
        assert_eq!(controller.slider().get(), "1000");
        assert_eq!(controller.view().lodging_type(), "flat");
        assert_eq!(page.overlays().shown(), 0);
        assert_eq!(page.filters().resets(), 1);
    }

    #[test]
    fn test_time_and_address_events() {
        let (mut controller, _page) = controller();
        controller.view_mut().select_time_in("14:00");
        controller.handle(FormEvent::TimeInChanged).unwrap();
        assert_eq!(controller.view().time_out(), "14:00");

        controller.view_mut().select_time_out("12:00");
        controller.handle(FormEvent::TimeOutChanged).unwrap();
        assert_eq!(controller.view().time_in(), "12:00");

        controller
            .handle(FormEvent::AddressPicked(Coordinates::new(35.7, 139.8)))
            .unwrap();
        assert_eq!(controller.view().address(), "35.70000, 139.80000");
    }
}
