pub mod geo;
pub mod locality;
pub mod time;

pub use geo::*;
pub use locality::*;
pub use time::*;

use rayon::prelude::*;

/// Anything that runs along a declared list of cities.
pub trait Routed {
    fn declared_route(&self) -> &DeclaredRoute;
}

/// Keeps the entities whose declared route names a city found in the locality.
/// Input order is preserved.
pub fn filter_by_locality<'a, T>(entities: &'a [T], locality: &LocalityDescriptor) -> Vec<&'a T>
where
    T: Send + Sync + Routed,
{
    let tokens = locality.tokens();
    if tokens.is_empty() {
        return Vec::new();
    }
    entities
        .par_iter()
        .filter(|entity| entity.declared_route().serves(&tokens))
        .collect()
}
