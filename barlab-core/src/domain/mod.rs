//! Domain types for the simulation core.

pub mod bar;
pub mod equity;
pub mod position;
pub mod trade;

pub use bar::Bar;
pub use equity::EquitySnapshot;
pub use position::{OpenPosition, Position, PositionSide};
pub use trade::{ExitReason, Trade};
