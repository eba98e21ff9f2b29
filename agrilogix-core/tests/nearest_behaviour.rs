//! Behavioural tests for nearest-facility and nearest-producer search.

use agrilogix_core::{
    Facility, FacilityKind, Location, NearestFacility, NearestProducer, Producer, haversine_km,
    nearest_facility, nearest_producers,
};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::cell::RefCell;

const KHORDHA_FARM: Location = Location::new(20.20, 85.72);
const BHUBANESWAR: Location = Location::new(20.30, 85.82);

#[fixture]
fn facilities() -> RefCell<Vec<Facility>> {
    RefCell::new(Vec::new())
}

#[fixture]
fn producers() -> RefCell<Vec<Producer>> {
    RefCell::new(Vec::new())
}

#[fixture]
fn nearest() -> RefCell<Option<NearestFacility>> {
    RefCell::new(None)
}

#[fixture]
fn ranked() -> RefCell<Vec<NearestProducer>> {
    RefCell::new(Vec::new())
}

#[given("a cold store in Bhubaneswar and a rice mill near Puri")]
fn given_odisha_facilities(#[from(facilities)] facilities: &RefCell<Vec<Facility>>) {
    *facilities.borrow_mut() = vec![
        Facility::new(
            "bbsr-cold",
            "Bhubaneswar cold store",
            FacilityKind::Storage,
            BHUBANESWAR,
            500.0,
        ),
        Facility::new(
            "puri-mill",
            "Puri rice mill",
            FacilityKind::Processing,
            Location::new(19.81, 85.83),
            800.0,
        ),
    ];
}

#[given("no facilities")]
fn given_no_facilities(#[from(facilities)] facilities: &RefCell<Vec<Facility>>) {
    facilities.borrow_mut().clear();
}

#[given("three producers around Khordha")]
fn given_producers(#[from(producers)] producers: &RefCell<Vec<Producer>>) {
    *producers.borrow_mut() = vec![
        Producer::new("khordha-1", "Sahu farm", KHORDHA_FARM, 45.0),
        Producer::new("pipili-1", "Pipili cooperative", Location::new(20.11, 85.83), 75.0),
        Producer::new("jatni-1", "Jatni smallholding", Location::new(20.17, 85.70), 12.0),
    ];
}

#[when("I search for the facility nearest to the Khordha farm")]
fn when_search_facility(
    #[from(facilities)] facilities: &RefCell<Vec<Facility>>,
    #[from(nearest)] nearest: &RefCell<Option<NearestFacility>>,
) {
    *nearest.borrow_mut() = nearest_facility(KHORDHA_FARM, &facilities.borrow());
}

#[when("I ask for the 5 producers nearest to Bhubaneswar")]
fn when_rank_producers(
    #[from(producers)] producers: &RefCell<Vec<Producer>>,
    #[from(ranked)] ranked: &RefCell<Vec<NearestProducer>>,
) {
    *ranked.borrow_mut() = nearest_producers(BHUBANESWAR, &producers.borrow(), 5);
}

#[then("the Bhubaneswar cold store is selected")]
fn then_cold_store(#[from(nearest)] nearest: &RefCell<Option<NearestFacility>>) {
    let nearest = nearest.borrow();
    let selected = nearest.as_ref().expect("a facility is selected");
    assert_eq!(selected.facility_id, "bbsr-cold");
}

#[then("the reported distance matches the haversine reference")]
fn then_reference_distance(#[from(nearest)] nearest: &RefCell<Option<NearestFacility>>) {
    let nearest = nearest.borrow();
    let selected = nearest.as_ref().expect("a facility is selected");
    let reference = 15.247_101_868_418_964;
    assert!(
        (selected.distance_km - reference).abs() < 1e-3,
        "expected {reference}, got {}",
        selected.distance_km
    );
    assert_eq!(selected.distance_km, haversine_km(KHORDHA_FARM, BHUBANESWAR));
}

#[then("no facility is selected")]
fn then_none(#[from(nearest)] nearest: &RefCell<Option<NearestFacility>>) {
    assert!(nearest.borrow().is_none());
}

#[then("all 3 producers are returned in ascending distance order")]
fn then_all_sorted(#[from(ranked)] ranked: &RefCell<Vec<NearestProducer>>) {
    let ranked = ranked.borrow();
    assert_eq!(ranked.len(), 3, "expected every producer without padding");
    assert!(
        ranked
            .windows(2)
            .all(|pair| pair[0].distance_km <= pair[1].distance_km),
        "expected ascending distances"
    );
}

#[scenario(path = "tests/features/nearest.feature", index = 0)]
fn scenario_khordha_farm(
    facilities: RefCell<Vec<Facility>>,
    nearest: RefCell<Option<NearestFacility>>,
) {
    let _ = (facilities, nearest);
}

#[scenario(path = "tests/features/nearest.feature", index = 1)]
fn scenario_more_than_available(
    producers: RefCell<Vec<Producer>>,
    ranked: RefCell<Vec<NearestProducer>>,
) {
    let _ = (producers, ranked);
}

#[scenario(path = "tests/features/nearest.feature", index = 2)]
fn scenario_empty_facilities(
    facilities: RefCell<Vec<Facility>>,
    nearest: RefCell<Option<NearestFacility>>,
) {
    let _ = (facilities, nearest);
}
