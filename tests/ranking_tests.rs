use busline::prelude::*;

const USER: Coordinate = Coordinate {
    latitude: 40.0,
    longitude: -74.0,
};

fn bus(id: &str, coordinate: Option<(f64, f64)>) -> Bus {
    Bus {
        id: id.into(),
        name: id.into(),
        coordinate: coordinate.map(Coordinate::from),
        ..Default::default()
    }
}

#[test]
fn end_to_end_test() {
    let repository = Repository::new().with_buses(vec![
        bus("C", None),
        bus("B", Some((40.045, -74.0))),
        bus("A", Some((40.00045, -74.0))),
    ]);
    let ranked = repository.departures(
        Some(&USER),
        None,
        &EtaPolicy::default(),
        &SeatCounts::new(),
    );

    let ids: Vec<_> = ranked.iter().map(|r| r.bus.id.as_ref()).collect();
    assert_eq!(ids, vec!["A", "B", "C"]);
    let labels: Vec<_> = ranked.iter().map(|r| r.label().to_string()).collect();
    assert_eq!(labels, vec!["Bus Arrived", "ETA: 6 mins", "ETA: Not available"]);
    assert!(ranked[2].distance.is_none());
}

#[test]
fn absent_last_regardless_of_order_test() {
    let input = vec![
        None,
        Some(Eta::Minutes(Minutes::new(3))),
        None,
        Some(Eta::Arrived),
        Some(Eta::Minutes(Minutes::new(1))),
        None,
    ];
    let ranked = rank_by_eta(input);
    assert_eq!(
        ranked,
        vec![
            Some(Eta::Arrived),
            Some(Eta::Minutes(Minutes::new(1))),
            Some(Eta::Minutes(Minutes::new(3))),
            None,
            None,
            None,
        ]
    );
}

#[test]
fn stable_for_equal_keys_test() {
    let repository = Repository::new().with_buses(vec![
        bus("x", None),
        bus("near-1", Some((40.0045, -74.0))),
        bus("y", None),
        bus("near-2", Some((40.0, -74.005))),
        bus("z", None),
        bus("near-3", Some((39.996, -74.0))),
    ]);
    let ranked = repository.departures(
        Some(&USER),
        None,
        &EtaPolicy::default(),
        &SeatCounts::new(),
    );
    let ids: Vec<_> = ranked.iter().map(|r| r.bus.id.as_ref()).collect();
    assert_eq!(ids, vec!["near-1", "near-2", "near-3", "x", "y", "z"]);
}

#[test]
fn no_user_keeps_order_test() {
    let repository = Repository::new().with_buses(vec![
        bus("b", Some((40.045, -74.0))),
        bus("a", Some((40.00045, -74.0))),
    ]);
    let ranked = repository.departures(None, None, &EtaPolicy::default(), &SeatCounts::new());
    let ids: Vec<_> = ranked.iter().map(|r| r.bus.id.as_ref()).collect();
    assert_eq!(ids, vec!["b", "a"]);
    assert!(ranked.iter().all(|r| r.eta.is_none()));
}

#[test]
fn reported_speed_test() {
    let mut fast = bus("fast", Some((40.09, -74.0)));
    fast.speed = Some(Speed::from_kmh(100.0));
    let slow = bus("slow", Some((40.045, -74.0)));
    let repository = Repository::new().with_buses(vec![slow, fast]);
    let ranked = repository.departures(
        Some(&USER),
        None,
        &EtaPolicy::default(),
        &SeatCounts::new(),
    );
    // 10 km at 100 km/h and 5 km at 50 km/h both take 6 minutes
    assert_eq!(ranked[0].eta, Some(Eta::Minutes(Minutes::new(6))));
    assert_eq!(ranked[1].eta, Some(Eta::Minutes(Minutes::new(6))));
    assert_eq!(ranked[0].bus.id.as_ref(), "slow");
}

#[test]
fn seat_availability_test() {
    let mut small = bus("small", Some((40.045, -74.0)));
    small.capacity = Some(30);
    let repository = Repository::new().with_buses(vec![
        bus("full", Some((40.045, -74.0))),
        small,
        bus("unknown", Some((40.045, -74.0))),
    ]);
    let mut seats = SeatCounts::new();
    seats.insert("full", 64);
    seats.insert("small", 12);
    let ranked = repository.departures(Some(&USER), None, &EtaPolicy::default(), &seats);
    assert_eq!(ranked[0].seats, SeatAvailability::Available(0));
    assert_eq!(ranked[1].seats, SeatAvailability::Available(18));
    assert_eq!(ranked[2].seats, SeatAvailability::Unknown);
}
