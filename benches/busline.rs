use busline::{prelude::*, shared::DeclaredRoute, store};
use criterion::{Criterion, criterion_group, criterion_main};
use std::{env, hint::black_box, path::Path, time::Duration};

const CITIES: [&str; 6] = [
    "Springfield",
    "Shelbyville",
    "Ogdenville",
    "North Haverbrook",
    "Brockway",
    "Capital City",
];

/// Buses spread over roughly 50 km around the user, one in ten without a fix.
fn synthetic_fleet(count: usize) -> Repository {
    let buses = (0..count)
        .map(|i| {
            let offset = (i % 1000) as f64 / 1000.0 * 0.45;
            let coordinate = (i % 10 != 0).then(|| Coordinate::from((40.0 + offset, -74.0)));
            let route: DeclaredRoute = vec![
                CITIES[i % CITIES.len()].to_string(),
                CITIES[(i + 2) % CITIES.len()].to_string(),
            ]
            .into();
            Bus {
                id: format!("bus-{i}").into(),
                name: format!("Bus {i}").into(),
                declared_route: route,
                coordinate,
                ..Default::default()
            }
        })
        .collect();
    Repository::new().with_buses(buses)
}

fn departures(repository: &Repository, locality: &LocalityDescriptor, seats: &SeatCounts) {
    let user = Coordinate::from((40.0, -74.0));
    let _ = black_box(repository.departures(
        Some(&user),
        Some(locality),
        &EtaPolicy::default(),
        seats,
    ));
}

fn nearby_stops(repository: &Repository) {
    let user = Coordinate::from((40.0, -74.0));
    let _ = black_box(repository.stops_by_distance(Some(&user)));
}

fn criterion_benchmark(c: &mut Criterion) {
    let locality: LocalityDescriptor = ["Main Street", "Springfield", "Oregon"]
        .into_iter()
        .collect();
    let seats = SeatCounts::new();
    let fleet = synthetic_fleet(50_000);

    let mut group = c.benchmark_group("Ranking");
    group.warm_up_time(Duration::from_secs(3));
    group.measurement_time(Duration::from_secs(10));

    group.bench_function("Departures 50k buses", |b| {
        b.iter(|| departures(&fleet, &locality, &seats))
    });

    // Optional: a real export, e.g. BUSLINE_DATA_PATH=fleet.zip
    if let Ok(path_str) = env::var("BUSLINE_DATA_PATH") {
        let store = FileStore::open(Path::new(&path_str)).expect("Failed to open store");
        let repository = Repository::new()
            .with_store(&store, &store::Config::default())
            .expect("Failed to build repository");
        group.bench_function("Nearby stops", |b| b.iter(|| nearby_stops(&repository)));
    }

    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
