pub mod courses;
pub mod notes;
pub mod users;
