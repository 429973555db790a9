pub mod controller;
pub mod router;
pub mod service;

pub use coursebook_models::{LoginRequest, LoginResponse, RegisterUserDto, User};
pub use router::init_users_router;
