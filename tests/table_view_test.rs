mod common;

use common::{course, course_with};
use courselist::models::{
    ColumnFilter, ColumnSort, Course, CourseColumn, PaginationState, RowSelection,
};
use courselist::table::{CoursesTableState, PageItem, TablePage};

fn state_with(courses: &[Course]) -> CoursesTableState {
    CoursesTableState {
        courses: courses.to_vec(),
        is_loading: false,
        ..Default::default()
    }
}

fn names(page: &TablePage) -> Vec<&str> {
    page.rows.iter().map(|c| c.name.as_str()).collect()
}

fn catalogue() -> Vec<Course> {
    vec![
        course_with(1, "beta", 4, None),
        course_with(2, "Alpha", 4, None),
        course_with(3, "gamma", 1, None),
    ]
}

#[test]
fn default_sort_is_name_ascending_ignoring_case() {
    let courses = catalogue();

    let page = TablePage::build(&courses, &state_with(&courses));

    assert_eq!(names(&page), vec!["Alpha", "beta", "gamma"]);
}

#[test]
fn later_sort_keys_break_ties() {
    let courses = catalogue();
    let mut state = state_with(&courses);
    state.sorting = vec![
        ColumnSort::desc(CourseColumn::TotalUnits),
        ColumnSort::asc(CourseColumn::Id),
    ];

    let page = TablePage::build(&courses, &state);

    assert_eq!(names(&page), vec!["beta", "Alpha", "gamma"]);
}

#[test]
fn global_filter_searches_several_columns() {
    let mut courses = catalogue();
    courses[2].assigned_companies = "Acme Brick".into();
    let mut state = state_with(&courses);
    state.global_filter = "ACME".into();

    let page = TablePage::build(&courses, &state);

    assert_eq!(names(&page), vec!["gamma"]);
}

#[test]
fn column_filters_match_their_column_only() {
    let courses = catalogue();
    let mut state = state_with(&courses);
    state.column_filters = vec![ColumnFilter {
        column: CourseColumn::TotalUnits,
        value: "4".into(),
    }];

    let page = TablePage::build(&courses, &state);

    assert_eq!(names(&page), vec!["Alpha", "beta"]);
}

#[test]
fn pagination_slices_sorted_rows() {
    let courses: Vec<Course> = (1..=23).map(|i| course(i, &format!("Course {:02}", i))).collect();
    let mut state = state_with(&courses);
    state.pagination = PaginationState {
        page_index: 2,
        page_size: 10,
    };

    let page = TablePage::build(&courses, &state);

    assert_eq!(page.total_rows, 23);
    assert_eq!(page.page_count, 3);
    assert_eq!(names(&page), vec!["Course 21", "Course 22", "Course 23"]);
    assert!(page.can_previous());
    assert!(!page.can_next());
    assert_eq!(page.page_numbers(), vec![PageItem::Page(1), PageItem::Page(2), PageItem::Page(3)]);
}

#[test]
fn empty_table_has_no_pages() {
    let page = TablePage::build(&[], &state_with(&[]));

    assert_eq!(page.page_count, 0);
    assert!(page.rows.is_empty());
    assert!(!page.can_next());
    assert!(page.page_numbers().is_empty());
}

#[test]
fn header_checkbox_selects_the_page() {
    let courses = catalogue();
    let page = TablePage::build(&courses, &state_with(&courses));
    let mut selection = RowSelection::new();

    selection.set_all(&page.rows, true);
    assert!(selection.is_all_selected(&page.rows));

    selection.set(page.rows[0].id, false);
    assert!(!selection.is_all_selected(&page.rows));
    assert!(selection.is_some_selected(&page.rows));
    assert_eq!(selection.len(), 2);
}

#[test]
fn price_labels() {
    let mut paid = course(1, "Paid");
    paid.is_paid = true;
    paid.price = Some(149.5);
    let mut zero = paid.clone();
    zero.price = Some(0.0);
    let mut unpaid_with_price = course(2, "Free");
    unpaid_with_price.price = Some(20.0);

    assert_eq!(paid.price_label(), "$149.50");
    assert_eq!(zero.price_label(), "Free");
    assert_eq!(unpaid_with_price.price_label(), "Free");
}
