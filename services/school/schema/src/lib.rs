pub mod admins;
pub mod classes;
pub mod students;
pub mod teachers;
