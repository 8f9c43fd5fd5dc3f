//! Host-independent core of the holiday greeting widget.
//!
//! The browser and terminal hosts render what [`widget::GreetingWidget`]
//! reports; everything testable lives here.

#[path = "core/celebration.rs"]
pub mod celebration;

#[path = "core/clock.rs"]
pub mod clock;

#[path = "core/config.rs"]
pub mod config;

#[path = "core/countdown.rs"]
pub mod countdown;

#[path = "core/error.rs"]
pub mod error;

#[path = "core/particles.rs"]
pub mod particles;

#[path = "core/prng.rs"]
pub mod prng;

#[path = "core/schedule.rs"]
pub mod schedule;

#[path = "core/star.rs"]
pub mod star;

#[path = "core/widget.rs"]
pub mod widget;

#[path = "core/wish.rs"]
pub mod wish;

pub use config::WidgetConfig;
pub use error::{Error, Result};
pub use widget::{GreetingWidget, WidgetEvent};
