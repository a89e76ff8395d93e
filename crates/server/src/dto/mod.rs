mod bus;
mod stop;

pub use bus::*;
pub use stop::*;
