pub mod action;
pub mod filter;
pub mod reducer;
pub mod state;
pub mod view;

pub use action::{Action, Update};
pub use filter::filter_courses;
pub use reducer::reduce;
pub use state::{CoursesTableState, Dialog, DialogKind};
pub use view::{PAGE_SIZE_OPTIONS, PageItem, TablePage};
