//! # slot-engine
//!
//! Deterministic slot finding for tasks on an externally maintained calendar.
//!
//! Given the busy intervals of a day, the engine computes the free gaps of the
//! day's work window and picks one slot under a morning/afternoon/none
//! preference. The sprint walker repeats this over the days of a sprint,
//! skipping excluded weekdays, until a slot is found.
//!
//! ## Modules
//!
//! - [`interval`]: Busy intervals, work windows, gaps and slots
//! - [`freebusy`]: Busy intervals → free gaps of a work window
//! - [`selector`]: Preference-aware choice of one slot among gaps
//! - [`walker`]: Day-by-day search across a sprint
//! - [`provider`]: The busy-interval source boundary
//! - [`cancel`]: Cooperative cancellation of a walk
//! - [`config`]: TOML scheduler configuration
//! - [`event`]: Provider event listings in, task event bodies out
//! - [`error`]: Error types

pub mod cancel;
pub mod config;
pub mod error;
pub mod event;
pub mod freebusy;
pub mod interval;
pub mod provider;
pub mod selector;
pub mod walker;

pub use cancel::CancelToken;
pub use config::SchedulerConfig;
pub use error::{ProviderError, SlotError};
pub use event::{parse_calendar, TaskEvent};
pub use freebusy::compute_gaps;
pub use interval::{hours_to_duration, BusyInterval, Gap, Slot, WorkWindow};
pub use provider::{BusySource, InMemoryCalendar};
pub use selector::{first_fit, select_slot, Preference};
pub use walker::{find_slot, SlotRequest, SprintWalker};
