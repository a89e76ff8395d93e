use busline::prelude::*;

#[test]
fn arrived_test() {
    assert_eq!(estimate_eta(Some(0.05), 50.0), Some(Eta::Arrived));
    assert_eq!(estimate_eta(Some(0.1), 50.0), Some(Eta::Arrived));
    assert_eq!(estimate_eta(Some(0.0), 20.0), Some(Eta::Arrived));
}

#[test]
fn short_range_test() {
    let short = Some(Eta::Minutes(Minutes::new(2)));
    assert_eq!(estimate_eta(Some(0.5), 50.0), short);
    assert_eq!(estimate_eta(Some(0.5), 5.0), short);
    assert_eq!(estimate_eta(Some(1.0), 50.0), short);
}

#[test]
fn linear_test() {
    assert_eq!(estimate_eta(Some(5.0), 50.0), Some(Eta::Minutes(Minutes::new(6))));
    assert_eq!(estimate_eta(Some(30.0), 60.0), Some(Eta::Minutes(Minutes::new(30))));
    assert_eq!(estimate_eta(Some(1.2), 50.0), Some(Eta::Minutes(Minutes::new(1))));
}

#[test]
fn default_speed_test() {
    let expected = Some(Eta::Minutes(Minutes::new(6)));
    assert_eq!(estimate_eta(Some(5.0), 0.0), expected);
    assert_eq!(estimate_eta(Some(5.0), -10.0), expected);
    assert_eq!(estimate_eta(Some(5.0), f64::NAN), expected);
}

#[test]
fn absent_test() {
    assert_eq!(estimate_eta(None, 50.0), None);
    assert_eq!(estimate_eta(Some(f64::NAN), 50.0), None);
    assert_eq!(estimate_eta(Some(-1.0), 50.0), None);
}

#[test]
fn monotonic_test() {
    let mut last = None;
    let mut distance = 1.01;
    while distance < 200.0 {
        let eta = estimate_eta(Some(distance), 42.0).unwrap();
        if let Some(last) = last {
            assert!(eta >= last, "{eta:?} < {last:?} at {distance} km");
        }
        last = Some(eta);
        distance += 0.37;
    }
}

#[test]
fn custom_policy_test() {
    let policy = EtaPolicy {
        short_range_eta: Minutes::new(4),
        ..Default::default()
    };
    assert_eq!(
        policy.estimate(Some(Distance::from_meters(600.0)), None),
        Some(Eta::Minutes(Minutes::new(4)))
    );
    assert_eq!(
        policy.estimate(
            Some(Distance::from_kilometers(10.0)),
            Some(Speed::from_kmh(20.0))
        ),
        Some(Eta::Minutes(Minutes::new(30)))
    );
}

#[test]
fn alert_radius_test() {
    let policy = EtaPolicy::default();
    assert!(policy.within_alert(Some(Distance::from_meters(150.0))));
    assert!(policy.within_alert(Some(Distance::from_meters(200.0))));
    assert!(!policy.within_alert(Some(Distance::from_meters(250.0))));
    assert!(!policy.within_alert(None));
}
