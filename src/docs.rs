use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use coursebook_core::ErrorResponse;
use coursebook_models::{
    Course, CourseDraft, CoursePatch, LoginRequest, LoginResponse, RegisterUserDto, Role,
    ScheduleChangeDto, ScheduleResponse, User,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::courses::controller::get_courses,
        crate::modules::courses::controller::create_course,
        crate::modules::courses::controller::update_course,
        crate::modules::courses::controller::delete_course,
        crate::modules::users::controller::register_user,
        crate::modules::users::controller::login_user,
        crate::modules::schedule::controller::get_schedule,
        crate::modules::schedule::controller::enroll_course,
        crate::modules::schedule::controller::drop_course,
    ),
    components(
        schemas(
            Course,
            CourseDraft,
            CoursePatch,
            User,
            Role,
            RegisterUserDto,
            LoginRequest,
            LoginResponse,
            ScheduleChangeDto,
            ScheduleResponse,
            ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Courses", description = "Course catalog; mutations require the teacher role"),
        (name = "Users", description = "Registration and login"),
        (name = "Schedule", description = "Per-user enrollment")
    ),
    info(
        title = "Coursebook API",
        version = "0.1.0",
        description = "Course catalog and enrollment API built with Rust, Axum, and PostgreSQL.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        for expected in [
            "/api/courses",
            "/api/courses/{id}",
            "/api/users/register",
            "/api/users/login",
            "/api/users/schedule",
            "/api/users/schedule/add",
            "/api/users/schedule/drop",
        ] {
            assert!(
                paths.iter().any(|p| p.as_str() == expected),
                "missing {}",
                expected
            );
        }
    }

    #[test]
    fn test_bearer_scheme_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }
}
