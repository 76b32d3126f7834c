pub mod course_service;
pub mod courses_table;
pub mod debounce;
pub mod notifier;
pub mod seed;

pub use course_service::{CourseService, MockCourseService, MockLatency};
pub use courses_table::{CoursesTable, TableOptions, TableSnapshot};
pub use debounce::Debouncer;
pub use notifier::{Notifier, TracingNotifier};
