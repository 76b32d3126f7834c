use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::models::{Course, CourseId};

/// Sortable, filterable columns of the course table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CourseColumn {
    Id,
    Name,
    AssignedCompanies,
    TotalUnits,
    Price,
    UpdatedAt,
}

impl CourseColumn {
    /// Cell text used for substring matching.
    pub fn text(self, course: &Course) -> String {
        match self {
            CourseColumn::Id => course.id.to_string(),
            CourseColumn::Name => course.name.clone(),
            CourseColumn::AssignedCompanies => course.assigned_companies.clone(),
            CourseColumn::TotalUnits => course.total_units.to_string(),
            CourseColumn::Price => course.price.map(|p| p.to_string()).unwrap_or_default(),
            CourseColumn::UpdatedAt => course
                .updated_at
                .map(|t| t.to_rfc3339())
                .unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSort {
    pub column: CourseColumn,
    pub desc: bool,
}

impl ColumnSort {
    pub fn asc(column: CourseColumn) -> Self {
        Self { column, desc: false }
    }

    pub fn desc(column: CourseColumn) -> Self {
        Self { column, desc: true }
    }
}

/// Ordered sort keys; the first entry wins ties last.
pub type SortingState = Vec<ColumnSort>;

pub fn default_sorting() -> SortingState {
    vec![ColumnSort::asc(CourseColumn::Name)]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationState {
    pub page_index: usize,
    pub page_size: usize,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self {
            page_index: 0,
            page_size: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnFilter {
    pub column: CourseColumn,
    pub value: String,
}

pub type ColumnFilters = Vec<ColumnFilter>;

/// Checked rows, keyed by course id so that sorting, filtering or a refresh
/// never moves a check mark onto another course.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowSelection(BTreeSet<CourseId>);

impl RowSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_ids(ids: impl IntoIterator<Item = CourseId>) -> Self {
        Self(ids.into_iter().collect())
    }

    /// Selects the rows at `positions` of a displayed list.
    /// Positions past the end are ignored.
    pub fn from_positions(rows: &[Course], positions: &[usize]) -> Self {
        Self(
            positions
                .iter()
                .filter_map(|&i| rows.get(i))
                .map(|course| course.id)
                .collect(),
        )
    }

    pub fn set(&mut self, id: CourseId, selected: bool) {
        if selected {
            self.0.insert(id);
        } else {
            self.0.remove(&id);
        }
    }

    pub fn toggle(&mut self, id: CourseId) {
        let selected = self.contains(id);
        self.set(id, !selected);
    }

    /// Header checkbox: checks or clears every row of a page.
    pub fn set_all(&mut self, rows: &[Course], selected: bool) {
        for course in rows {
            self.set(course.id, selected);
        }
    }

    pub fn is_all_selected(&self, rows: &[Course]) -> bool {
        !rows.is_empty() && rows.iter().all(|c| self.contains(c.id))
    }

    pub fn is_some_selected(&self, rows: &[Course]) -> bool {
        rows.iter().any(|c| self.contains(c.id))
    }

    pub fn contains(&self, id: CourseId) -> bool {
        self.0.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Selected courses of `rows`, in row order.
    pub fn resolve<'a>(&self, rows: &'a [Course]) -> Vec<&'a Course> {
        rows.iter().filter(|c| self.contains(c.id)).collect()
    }
}
