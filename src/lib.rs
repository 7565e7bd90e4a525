pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

pub use application::use_cases;
pub use domain::entities;
pub use domain::ports;
pub use domain::repositories;
pub use domain::value_objects;
pub use infrastructure::{SchedulerConfig, SchedulerContext};
