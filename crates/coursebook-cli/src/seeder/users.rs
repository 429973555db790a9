use coursebook_models::{NewUser, Role};
use fake::Fake;
use fake::faker::name::en::{FirstName, LastName};

/// Generates students sharing one pre-computed password hash.
pub fn generate_students(count: usize, password_hash: &str) -> Vec<NewUser> {
    (0..count)
        .map(|idx| {
            let first_name: String = FirstName().fake();
            let last_name: String = LastName().fake();
            let handle = format!(
                "{}.{}{}",
                first_name.to_lowercase(),
                last_name.to_lowercase(),
                idx
            );

            NewUser {
                email: format!("{}@example.com", handle),
                username: handle,
                password_hash: password_hash.to_string(),
                role: Role::Student,
            }
        })
        .collect()
}
