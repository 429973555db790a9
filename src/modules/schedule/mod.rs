pub mod controller;
pub mod router;
pub mod service;

pub use coursebook_models::{ScheduleChangeDto, ScheduleResponse};
pub use router::init_schedule_router;
