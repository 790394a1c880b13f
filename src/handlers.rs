pub mod health;
pub mod items;
pub mod resource;
pub mod students;
pub mod subjects;
pub mod teachers;
pub mod users;
