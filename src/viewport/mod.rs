// viewport/ - Page geometry queries
//
// Scroll position, viewport size and the responsive layout rules derived
// from them. No simulation state lives here.

mod layout;
mod scroll;

pub use layout::*;
pub use scroll::*;
