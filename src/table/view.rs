use std::cmp::Ordering;

use serde::Serialize;

use crate::models::{ColumnFilter, ColumnSort, Course, CourseColumn};
use crate::table::state::CoursesTableState;

pub const PAGE_SIZE_OPTIONS: [usize; 4] = [10, 20, 30, 50];

/// Entry of the pagination strip; pages are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PageItem {
    Page(usize),
    Ellipsis,
}

/// One rendered page of the course table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TablePage {
    pub rows: Vec<Course>,
    pub total_rows: usize,
    pub page_index: usize,
    pub page_count: usize,
}

impl TablePage {
    /// Runs the table pipeline over already-filtered courses: global filter,
    /// column filters, sorting, then pagination.
    pub fn build(courses: &[Course], state: &CoursesTableState) -> Self {
        let global = state.global_filter.to_lowercase();
        let mut rows: Vec<Course> = courses
            .iter()
            .filter(|c| global.is_empty() || matches_global(c, &global))
            .filter(|c| state.column_filters.iter().all(|f| matches_column(c, f)))
            .cloned()
            .collect();

        sort_courses(&mut rows, &state.sorting);

        let total_rows = rows.len();
        let page_size = state.pagination.page_size.max(1);
        let page_count = total_rows.div_ceil(page_size);
        let page_index = state.pagination.page_index;
        let rows = rows
            .into_iter()
            .skip(page_index.saturating_mul(page_size))
            .take(page_size)
            .collect();

        Self {
            rows,
            total_rows,
            page_index,
            page_count,
        }
    }

    pub fn can_previous(&self) -> bool {
        self.page_index > 0
    }

    pub fn can_next(&self) -> bool {
        self.page_index + 1 < self.page_count
    }

    pub fn page_numbers(&self) -> Vec<PageItem> {
        page_numbers(self.page_index + 1, self.page_count)
    }
}

fn matches_global(course: &Course, needle: &str) -> bool {
    [
        CourseColumn::Id,
        CourseColumn::Name,
        CourseColumn::AssignedCompanies,
        CourseColumn::TotalUnits,
        CourseColumn::Price,
    ]
    .into_iter()
    .any(|column| column.text(course).to_lowercase().contains(needle))
}

fn matches_column(course: &Course, filter: &ColumnFilter) -> bool {
    filter.value.is_empty()
        || filter
            .column
            .text(course)
            .to_lowercase()
            .contains(&filter.value.to_lowercase())
}

/// Stable multi-column sort; earlier keys take precedence.
pub fn sort_courses(rows: &mut [Course], sorting: &[ColumnSort]) {
    rows.sort_by(|a, b| {
        sorting
            .iter()
            .map(|sort| {
                let ord = compare_column(a, b, sort.column);
                if sort.desc { ord.reverse() } else { ord }
            })
            .find(|ord| ord.is_ne())
            .unwrap_or(Ordering::Equal)
    });
}

fn compare_column(a: &Course, b: &Course, column: CourseColumn) -> Ordering {
    match column {
        CourseColumn::Id => a.id.cmp(&b.id),
        CourseColumn::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        CourseColumn::AssignedCompanies => a
            .assigned_companies
            .to_lowercase()
            .cmp(&b.assigned_companies.to_lowercase()),
        CourseColumn::TotalUnits => a.total_units.cmp(&b.total_units),
        CourseColumn::Price => a
            .price
            .unwrap_or(0.0)
            .total_cmp(&b.price.unwrap_or(0.0)),
        CourseColumn::UpdatedAt => a.updated_at.cmp(&b.updated_at),
    }
}

/// Pagination strip: all pages up to five, otherwise first and last page
/// around a window near the current one.
pub fn page_numbers(current: usize, total: usize) -> Vec<PageItem> {
    let mut items = Vec::new();
    if total <= 5 {
        items.extend((1..=total).map(PageItem::Page));
        return items;
    }

    items.push(PageItem::Page(1));
    if current <= 3 {
        items.extend([PageItem::Page(2), PageItem::Page(3), PageItem::Ellipsis]);
    } else if current >= total - 2 {
        items.extend([
            PageItem::Ellipsis,
            PageItem::Page(total - 2),
            PageItem::Page(total - 1),
        ]);
    } else {
        items.extend([
            PageItem::Ellipsis,
            PageItem::Page(current - 1),
            PageItem::Page(current),
            PageItem::Page(current + 1),
            PageItem::Ellipsis,
        ]);
    }
    items.push(PageItem::Page(total));

    items.dedup_by(|a, b| *a == PageItem::Ellipsis && *b == PageItem::Ellipsis);
    items
}
