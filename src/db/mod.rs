pub mod memory;
pub mod repository;
pub mod sqlite;

pub use memory::InMemoryCourseRepository;
pub use repository::CourseRepository;
pub use sqlite::SqliteCourseRepository;
