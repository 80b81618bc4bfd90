//! DTOs mirroring the SPOT backend's JSON payloads.

mod academic;
mod attendance;
mod notification;
mod people;
mod seat;
pub mod time;

pub use academic::*;
pub use attendance::*;
pub use notification::*;
pub use people::*;
pub use seat::*;
