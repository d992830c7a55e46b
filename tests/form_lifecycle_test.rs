use listing_form::core::overlay::ESCAPE_KEY;
use listing_form::domain::model::{Coordinates, Field, Guests, LodgingType, OverlayKind, RoomCount};
use listing_form::domain::ports::FormView;
use listing_form::domain::rules::{guest_options_for, min_price_for};
use listing_form::{
    Dispatch, FormContext, FormController, FormEvent, FormSettings, HeadlessForm, HeadlessPage,
    Phase,
};

const TITLE: &str = "Светлая квартира у станции метро с балконом";

fn mount() -> (FormController<HeadlessForm>, HeadlessPage) {
    let page = HeadlessPage::new(Coordinates::new(35.6895, 139.69171));
    let ctx = FormContext {
        view: HeadlessForm::default(),
        widgets: page.widgets(),
    };
    let controller = FormController::new(ctx, FormSettings::default()).unwrap();
    (controller, page)
}

#[test]
fn test_room_changes_project_guest_options() {
    let (mut controller, _page) = mount();

    for rooms in RoomCount::ALL {
        controller.view_mut().select_room_number(rooms.as_str());
        controller.handle(FormEvent::RoomNumberChanged).unwrap();

        let allowed = guest_options_for(rooms);
        let view = controller.view();
        let enabled: Vec<Guests> = view
            .guest_options()
            .into_iter()
            .filter(|guests| !view.guest_option_state(*guests).unwrap().disabled)
            .collect();

        let mut expected = allowed.to_vec();
        expected.sort();
        let mut enabled_sorted = enabled.clone();
        enabled_sorted.sort();
        assert_eq!(enabled_sorted, expected, "rooms {}", rooms);
        assert_eq!(view.selected_guests(), Some(allowed[0]));
    }
}

#[test]
fn test_every_lodging_type_moves_placeholder_and_slider() {
    let (mut controller, _page) = mount();

    for lodging in LodgingType::ALL {
        controller.view_mut().select_lodging_type(lodging.as_str());
        controller.handle(FormEvent::LodgingTypeChanged).unwrap();

        let min = min_price_for(lodging).to_string();
        assert_eq!(controller.view().price_placeholder(), min);
        assert_eq!(controller.slider().get(), min);
    }
}

#[test]
fn test_palace_price_boundary_through_submit() {
    let (mut controller, _page) = mount();
    controller.view_mut().type_title(TITLE);
    controller.view_mut().select_lodging_type("palace");
    controller.handle(FormEvent::LodgingTypeChanged).unwrap();

    controller.view_mut().type_price("9999");
    controller.handle(FormEvent::PriceChanged).unwrap();
    match controller.handle(FormEvent::Submit).unwrap() {
        Dispatch::Invalid(report) => assert_eq!(
            report.message_for(Field::Price),
            Some("минимальная цена для данного типа жилья 10000 рублей")
        ),
        other => panic!("expected invalid, got {:?}", other),
    }

    controller.view_mut().type_price("10000");
    controller.handle(FormEvent::PriceChanged).unwrap();
    assert!(matches!(
        controller.handle(FormEvent::Submit).unwrap(),
        Dispatch::Send(_)
    ));
    assert_eq!(controller.view().field_error(Field::Price), None);
}

#[test]
fn test_reset_is_independent_of_prior_state() {
    let (mut controller, page) = mount();
    controller.view_mut().type_title(TITLE);
    controller.view_mut().select_lodging_type("hotel");
    controller.handle(FormEvent::LodgingTypeChanged).unwrap();
    controller.handle(FormEvent::SliderMoved(87_000.0)).unwrap();
    controller.view_mut().select_room_number("100");
    controller.handle(FormEvent::RoomNumberChanged).unwrap();

    controller.handle(FormEvent::ResetClicked).unwrap();

    let view = controller.view();
    assert_eq!(view.price_placeholder(), "1000");
    assert_eq!(view.price(), "");
    assert_eq!(controller.slider().get(), "1000");
    assert_eq!(view.room_number(), "1");
    assert_eq!(view.selected_guests(), Some(Guests(1)));
    assert!(!view.guest_option_state(Guests(1)).unwrap().disabled);
    assert_eq!(page.map().resets(), 1);
    assert_eq!(controller.phase(), Phase::Idle);
}

#[test]
fn test_repeated_show_dismiss_cycles_leave_no_listeners() {
    let (mut controller, page) = mount();

    for round in 0..3 {
        controller.view_mut().type_title(TITLE);
        controller.view_mut().type_price("2000");
        controller.handle(FormEvent::Submit).unwrap();
        controller.handle(FormEvent::SubmissionSucceeded).unwrap();
        assert_eq!(controller.listeners().len(), 2, "round {}", round);

        if round % 2 == 0 {
            controller.handle(FormEvent::DocumentClick).unwrap();
        } else {
            controller
                .handle(FormEvent::KeyDown(ESCAPE_KEY.to_string()))
                .unwrap();
        }
        assert!(controller.listeners().is_empty());
        assert!(!controller.overlay_visible(OverlayKind::Success));
    }

    assert_eq!(page.overlays().shown(), 3);
    assert_eq!(page.overlays().removals(), 3);
}

#[test]
fn test_error_overlay_survives_other_keys_then_escape() {
    let (mut controller, _page) = mount();
    controller.view_mut().type_title(TITLE);
    controller.view_mut().type_price("2000");
    controller.handle(FormEvent::Submit).unwrap();
    controller.handle(FormEvent::SubmissionFailed).unwrap();

    assert_eq!(
        controller
            .handle(FormEvent::KeyDown("Enter".to_string()))
            .unwrap(),
        Dispatch::Ignored
    );
    assert!(controller.overlay_visible(OverlayKind::Error));

    controller
        .handle(FormEvent::KeyDown(ESCAPE_KEY.to_string()))
        .unwrap();
    assert!(!controller.overlay_visible(OverlayKind::Error));
    assert_eq!(controller.view().title(), TITLE);
}

#[test]
fn test_input_keeps_flowing_while_submission_pending() {
    let (mut controller, _page) = mount();
    controller.view_mut().type_title(TITLE);
    controller.view_mut().type_price("2000");

    let payload = match controller.handle(FormEvent::Submit).unwrap() {
        Dispatch::Send(payload) => payload,
        other => panic!("expected send, got {:?}", other),
    };
    assert_eq!(payload.price, "2000");
    assert_eq!(controller.phase(), Phase::Submitting);

    controller.view_mut().select_room_number("3");
    controller.handle(FormEvent::RoomNumberChanged).unwrap();
    controller.view_mut().type_price("500");
    controller.handle(FormEvent::PriceChanged).unwrap();
    assert!(controller.view().field_error(Field::Price).is_some());
    controller.handle(FormEvent::SliderMoved(4000.0)).unwrap();
    assert_eq!(controller.view().field_error(Field::Price), None);
    assert_eq!(controller.handle(FormEvent::Submit).unwrap(), Dispatch::Ignored);

    controller.handle(FormEvent::SubmissionFailed).unwrap();
    assert_eq!(controller.phase(), Phase::Idle);
    assert!(controller.overlay_visible(OverlayKind::Error));
    assert_eq!(controller.view().price(), "4000");
    assert_eq!(controller.view().room_number(), "3");
    assert!(!controller.is_submitting());
}

#[test]
fn test_abandoned_submission_accepts_next_submit() {
    let (mut controller, page) = mount();
    controller.view_mut().type_title(TITLE);
    controller.view_mut().type_price("2000");
    controller.handle(FormEvent::Submit).unwrap();

    assert!(controller.abandon_submission());
    assert_eq!(page.overlays().shown(), 0);
    assert!(matches!(
        controller.handle(FormEvent::Submit).unwrap(),
        Dispatch::Send(_)
    ));
}
