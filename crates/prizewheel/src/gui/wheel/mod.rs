use std::time::Duration;

pub mod model;
pub mod view;

pub use model::WheelState;
pub use view::{WheelRenderer, draw};

pub const WHEEL_SIZE: f64 = 500.0; // logical size of the wheel graphic
pub const CENTER: f64 = WHEEL_SIZE / 2.0;
pub const RADIUS: f64 = CENTER - 30.0; // room for the outer ring
pub const OUTER_RING_WIDTH: f64 = 15.0;
pub const OUTER_GLOW_WIDTH: f64 = 25.0;
pub const INNER_RING_WIDTH: f64 = 10.0;
pub const HUB_RADIUS: f64 = 35.0;
pub const HUB_RING_RADIUS: f64 = 25.0;
pub const LABEL_INSET: f64 = 40.0; // label end, measured in from the rim
pub const LABEL_FONT_SIZE: f64 = 16.0;
pub const SECTOR_SHADE: i16 = -30; // rim end of the sector gradient
pub const POINTER_WIDTH: f64 = 40.0;
pub const POINTER_HEIGHT: f64 = 50.0;
pub const POINTER_LIFT: f64 = 24.0; // how far the pointer sticks out above the wheel
pub const CELEBRATION: Duration = Duration::from_millis(1500);
