pub mod course;
pub mod filters;
pub mod reference;
pub mod table;

pub use course::{Course, CourseId, CourseQuery, NewCourse};
pub use filters::{CourseFilters, LastModified};
pub use reference::{NamedRef, SeatMap};
pub use table::{
    ColumnFilter, ColumnFilters, ColumnSort, CourseColumn, PaginationState, RowSelection,
    SortingState,
};
