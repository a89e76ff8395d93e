use busline::prelude::*;

fn paris() -> Coordinate {
    Coordinate {
        latitude: 48.85800943005911,
        longitude: 2.3514350059357927,
    }
}

fn london() -> Coordinate {
    Coordinate {
        latitude: 51.5052389927712,
        longitude: -0.12495407345099824,
    }
}

#[test]
fn distance_test() {
    let d = distance_km(Some(&paris()), Some(&london())).unwrap();
    assert!((d - 343.0).abs() < 1.0);
}

#[test]
fn distance_symmetry_test() {
    let pairs = [
        (paris(), london()),
        (Coordinate::from((-33.86, 151.21)), Coordinate::from((35.68, 139.69))),
        (Coordinate::from((12.97, 77.59)), Coordinate::from((12.98, 77.60))),
    ];
    for (a, b) in pairs {
        let ab = distance_km(Some(&a), Some(&b)).unwrap();
        let ba = distance_km(Some(&b), Some(&a)).unwrap();
        assert!((ab - ba).abs() < 1e-9);
    }
}

#[test]
fn distance_to_self_test() {
    let d = distance_km(Some(&london()), Some(&london())).unwrap();
    assert_eq!(d, 0.0);
}

#[test]
fn distance_sentinel_test() {
    assert_eq!(distance_km(Some(&Coordinate::SENTINEL), Some(&paris())), None);
    assert_eq!(distance_km(Some(&paris()), Some(&Coordinate::default())), None);
}

#[test]
fn distance_absent_test() {
    assert_eq!(distance_km(None, Some(&paris())), None);
    assert_eq!(distance_km(Some(&paris()), None), None);
    assert_eq!(distance_km(None, None), None);
}

#[test]
fn distance_non_finite_test() {
    let broken = Coordinate::from((f64::NAN, 2.0));
    assert_eq!(distance_km(Some(&broken), Some(&paris())), None);
}
