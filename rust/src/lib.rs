//! Critical Path Method engine for small project schedules.
//!
//! Tasks are registered in a [`ScheduleNetwork`], which recalculates early
//! and late start/finish times, slack and the critical path after every
//! change. The [`layout`] module turns the result into a layered precedence
//! diagram, and [`report`] gathers what a renderer needs to display it.
//!
//! ```
//! use precedence_net::{LayoutConfig, ScheduleNetwork};
//!
//! let mut network = ScheduleNetwork::new();
//! network.add_task_from_text("Design", "5", "").unwrap();
//! network.add_task_from_text("Build", "3", "1").unwrap();
//! network.add_task_from_text("Ship", "2", "2").unwrap();
//!
//! assert_eq!(network.result().project_end, 10.0);
//! assert_eq!(network.result().critical_path.len(), 3);
//!
//! let layout = network.layout(&LayoutConfig::default()).unwrap();
//! assert_eq!(layout.layers.len(), 5);
//! ```

pub mod calendar;
mod config;
pub mod critical_path;
mod error;
pub mod generator;
pub mod layout;
pub mod logging;
mod models;
pub mod registry;
pub mod report;

#[cfg(feature = "python")]
mod python;

pub use calendar::{project_dates, project_end_date, CalendarError, TaskDates, TimeUnit};
pub use config::{LayoutConfig, NetworkConfig};
pub use critical_path::{calculate_network, NetworkError, NetworkResult, TaskTiming};
pub use error::{Error, Result};
pub use generator::random_tasks;
pub use layout::{plan_layout, Edge, Layout, LayoutError, NodeId, NodeStyle, PlacedNode};
pub use models::{Task, TaskId};
pub use registry::{filter_existing, parse_ids, ScheduleNetwork, TaskInput, ValidationError};
pub use report::{NetworkReport, TaskRow};
