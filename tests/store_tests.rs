use busline::{prelude::*, store};

fn fleet_dir() -> String {
    format!("{}/tests/data/fleet", env!("CARGO_MANIFEST_DIR"))
}

fn fleet_zip() -> String {
    format!("{}/tests/data/fleet.zip", env!("CARGO_MANIFEST_DIR"))
}

fn check_repository(repository: &Repository) {
    // "No Id" is dropped, everything else is kept
    assert_eq!(repository.buses.len(), 5);
    assert_eq!(repository.stops.len(), 4);

    let arrived = repository.bus_by_id("bus-arrived").unwrap();
    assert_eq!(arrived.name.as_ref(), "Harbour Express");
    assert_eq!(arrived.route.as_deref(), Some("12A"));
    assert_eq!(arrived.status, BusStatus::Running);
    assert!(arrived.coordinate.is_some());

    let far = repository.bus_by_id("bus-far").unwrap();
    assert_eq!(far.status, BusStatus::NotRunning);
    assert_eq!(far.capacity, Some(40));
    assert_eq!(far.speed, Some(Speed::from_kmh(50.0)));
    assert_eq!(
        far.coordinate,
        Some(Coordinate {
            latitude: 40.045,
            longitude: -74.0
        })
    );

    let new = repository.bus_by_id("bus-new").unwrap();
    assert!(new.coordinate.is_none());
    assert!(new.occupancy.is_none());

    let unplaced = repository.stop_by_id("stop-unplaced").unwrap();
    assert!(unplaced.coordinate.is_none());
    assert_eq!(unplaced.city.as_deref(), Some("Springfield"));
}

#[test]
fn directory_store_test() {
    let store = FileStore::open(fleet_dir()).unwrap();
    let repository = Repository::new()
        .with_store(&store, &store::Config::default())
        .unwrap();
    check_repository(&repository);
    assert!(repository.timestamp().is_some());
}

#[test]
fn zip_store_test() {
    let store = FileStore::open(fleet_zip()).unwrap();
    assert!(matches!(store.storage(), store::StorageType::Zip(_)));
    let repository = Repository::new()
        .with_store(&store, &store::Config::default())
        .unwrap();
    check_repository(&repository);
}

#[test]
fn bus_by_number_test() {
    let store = FileStore::new().from_directory(fleet_dir());
    let repository = Repository::new()
        .with_store(&store, &store::Config::default())
        .unwrap();
    let bus = repository.bus_by_number(" KL-07-1002 ").unwrap();
    assert_eq!(bus.id.as_ref(), "bus-far");
    assert!(repository.bus_by_number("KL-00-0000").is_none());
}

#[test]
fn seat_counts_test() {
    let store = FileStore::new().from_zip(fleet_zip());
    let seats = seat_counts_from_store(&store, &store::Config::default()).unwrap();
    assert_eq!(seats.len(), 2);
    assert_eq!(seats.count_by_bus_id("bus-arrived"), Some(12));
    assert_eq!(seats.count_by_bus_id("bus-far"), Some(45));
    assert_eq!(seats.count_by_bus_id("bus-ghost"), None);
}

#[test]
fn document_by_id_test() {
    let store = FileStore::new().from_directory(fleet_dir());
    let doc = store.document("buses", "bus-far").unwrap().unwrap();
    assert_eq!(
        doc.get("route").and_then(|route| route.as_str()),
        Some("3")
    );
    assert!(store.document("buses", "missing").unwrap().is_none());
}

#[test]
fn missing_collection_test() {
    let store = FileStore::new().from_directory(fleet_dir());
    let err = store.collection("complaint").unwrap_err();
    assert!(matches!(err, store::Error::CollectionNotFound(name) if name == "complaint"));
}

#[test]
fn missing_path_test() {
    assert!(FileStore::open(format!("{}/does-not-exist", fleet_dir())).is_err());
}

#[test]
fn empty_store_test() {
    let repository = Repository::new()
        .with_store(&FileStore::new(), &store::Config::default())
        .unwrap();
    assert!(repository.buses.is_empty());
    assert!(repository.stops.is_empty());
}

#[test]
fn memory_store_test() {
    let mut store = MemoryStore::new()
        .with_collection("busStops", Vec::new())
        .with_collection("buses", Vec::new());
    let doc = serde_json::json!({
        "id": "bus-1",
        "bus_name": "Night Owl",
        "major_cities": ["Springfield"],
        "current_location": { "latitude": 40.2, "longitude": -74.1 }
    });
    let serde_json::Value::Object(doc) = doc else {
        unreachable!()
    };
    store.insert("buses", doc);
    let repository = Repository::new()
        .with_store(&store, &store::Config::default())
        .unwrap();
    assert_eq!(repository.buses.len(), 1);
    assert_eq!(repository.bus_by_id("bus-1").unwrap().name.as_ref(), "Night Owl");
}

#[test]
fn stops_by_distance_test() {
    let store = FileStore::new().from_directory(fleet_dir());
    let repository = Repository::new()
        .with_store(&store, &store::Config::default())
        .unwrap();
    let user = Coordinate::from((40.0, -74.0));
    let stops = repository.stops_by_distance(Some(&user));
    let ids: Vec<_> = stops.iter().map(|s| s.stop.id.as_ref()).collect();
    assert_eq!(ids, vec!["stop-near", "stop-mid", "stop-far", "stop-unplaced"]);
    assert_eq!(stops[0].distance.unwrap().to_string(), "0.11 km");
    assert!(stops[3].distance.is_none());
}
