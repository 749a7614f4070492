use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{gp, init_db_with_resources, setup_test_db};

const DAY: &str = "2030-01-15";

fn book(db_path: &str, resource: &str, time: &str) -> assert_cmd::assert::Assert {
    gp().args([
        "--db", db_path, "book", resource, "--date", DAY, "--time", time, "--customer",
        "John Doe",
    ])
    .assert()
}

#[test]
fn test_slots_skip_break_and_fit_duration() {
    let db_path = setup_test_db("booking_slots");
    init_db_with_resources(&db_path);

    let out = gp()
        .args(["--db", &db_path, "slots", "sv1", "--date", DAY])
        .output()
        .expect("run slots");
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);

    assert!(stdout.contains("09:00"));
    assert!(stdout.contains("11:30"));
    assert!(!stdout.contains("12:00  "), "break start offered:\n{stdout}");
    assert!(stdout.contains("13:00"));
    assert!(stdout.contains("16:00"));
    assert!(!stdout.contains("16:30"), "60 minute slot past closing:\n{stdout}");
    assert!(stdout.contains("13 free slot(s)"));
    assert!(stdout.contains("No bookings yet for this date."));
}

#[test]
fn test_booking_earns_points_and_takes_slot() {
    let db_path = setup_test_db("booking_create");
    init_db_with_resources(&db_path);

    book(&db_path, "sv1", "10:00")
        .success()
        .stdout(
            contains("Booking BKG001 confirmed")
                .and(contains("+10 GreenPoints! Booked through GreenPoint Platform")),
        );

    gp().args(["--db", &db_path, "points", "balance"])
        .assert()
        .success()
        .stdout(contains("210"));

    gp().args(["--db", &db_path, "slots", "sv1", "--date", DAY])
        .assert()
        .success()
        .stdout(contains("12 free slot(s)").and(contains("Booked: 10:00")));

    book(&db_path, "sv1", "14:00").success();
    gp().args(["--db", &db_path, "slots", "sv1", "--date", DAY])
        .assert()
        .success()
        .stdout(contains("Booked: 10:00, 14:00"));

    book(&db_path, "sv1", "10:00")
        .failure()
        .stderr(contains("not available"));

    book(&db_path, "ch1", "10:00")
        .success()
        .stdout(contains("BKG003"));
}

#[test]
fn test_booking_outside_offer_fails() {
    let db_path = setup_test_db("booking_outside");
    init_db_with_resources(&db_path);

    book(&db_path, "sv1", "12:30").failure().stderr(contains("not available"));
    book(&db_path, "sv1", "07:00").failure().stderr(contains("not available"));
    book(&db_path, "ghost", "10:00")
        .failure()
        .stderr(contains("Resource not found"));

    // nothing earned on failure
    gp().args(["--db", &db_path, "points", "balance"])
        .assert()
        .success()
        .stdout(contains("200"));
}

#[test]
fn test_cancel_releases_slot() {
    let db_path = setup_test_db("booking_cancel");
    init_db_with_resources(&db_path);

    book(&db_path, "sv1", "10:00").success();

    gp().args(["--db", &db_path, "bookings", "status", "BKG001", "cancelled"])
        .assert()
        .success()
        .stdout(contains("now cancelled"));

    gp().args(["--db", &db_path, "slots", "sv1", "--date", DAY])
        .assert()
        .success()
        .stdout(contains("13 free slot(s)").and(contains("No bookings yet")));

    book(&db_path, "sv1", "10:00").success().stdout(contains("BKG002"));

    // the original booking cannot take the slot back
    gp().args(["--db", &db_path, "bookings", "status", "BKG001", "pending"])
        .assert()
        .failure()
        .stderr(contains("not available"));
}

#[test]
fn test_bookings_list_and_delete() {
    let db_path = setup_test_db("booking_list");
    init_db_with_resources(&db_path);

    book(&db_path, "sv1", "10:00").success();
    book(&db_path, "ch1", "08:00").success();

    gp().args(["--db", &db_path, "bookings", "list", "--resource", "ch1"])
        .assert()
        .success()
        .stdout(contains("BKG002").and(contains("BKG001").not()));

    gp().args(["--db", &db_path, "bookings", "del", "BKG001"])
        .assert()
        .success();

    gp().args(["--db", &db_path, "bookings", "del", "BKG001"])
        .assert()
        .failure()
        .stderr(contains("Booking not found: BKG001"));
}
