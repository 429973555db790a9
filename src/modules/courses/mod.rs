pub mod controller;
pub mod router;
pub mod service;

pub use coursebook_models::{Course, CourseDraft, CoursePatch};
pub use router::init_courses_router;
