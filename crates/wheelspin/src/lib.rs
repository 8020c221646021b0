//! Spin engine for a weighted prize wheel: picking a winner, laying out sectors, planning the
//! rotation that lands the pointer on the winner, and timing the spin.

pub mod animator;
pub mod driver;
pub mod duration;
pub mod easing;
pub mod history;
pub mod ipc;
pub mod layout;
pub mod macros;
pub mod planner;
pub mod prize;
pub mod select;
pub mod session;

pub use animator::{SpinAnimator, SpinId, SpinState, SpinTicket};
pub use duration::{SpeedLabel, SpinDuration};
pub use history::{HistoryEntry, HistoryLedger};
pub use layout::{Sector, layout};
pub use prize::{Prize, PrizeColor, PrizeId, PrizeList, PrizeName, WheelError};
pub use session::{Session, SpinOutcome};
