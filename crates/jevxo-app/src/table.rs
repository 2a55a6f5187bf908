// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Result, bail};

use crate::ids::EntityId;
use crate::model::{EntityKind, SortDirection};
use crate::record::{ColumnSpec, FieldKind, FieldValue, Record};

#[derive(Debug, Clone, PartialEq)]
pub struct TableCell {
    pub raw: FieldValue,
    pub display: String,
}

impl TableCell {
    pub fn new(raw: FieldValue) -> Self {
        let display = raw.display();
        Self { raw, display }
    }

    pub fn with_display(raw: FieldValue, display: impl Into<String>) -> Self {
        Self {
            raw,
            display: display.into(),
        }
    }

    fn matches(&self, needle: &str) -> bool {
        self.display.to_lowercase().contains(needle)
            || self.raw.raw_text().to_lowercase().contains(needle)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub id: i64,
    pub cells: Vec<TableCell>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageSnapshot {
    pub columns: Vec<ColumnSpec>,
    pub rows: Vec<TableRow>,
}

impl PageSnapshot {
    pub fn column_index(&self, key: &str) -> Option<usize> {
        self.columns.iter().position(|column| column.key == key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub key: &'static str,
    pub direction: SortDirection,
}

/// Search text and the single active sort for one page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableView {
    pub search: String,
    pub sort: Option<SortSpec>,
}

impl TableView {
    /// Same key flips direction; a different key starts ascending.
    pub fn toggle_sort(&mut self, column: &ColumnSpec) -> Result<SortSpec> {
        if !column.sortable {
            bail!("{} is not sortable -- pick another column and retry", column.label);
        }
        let next = match self.sort {
            Some(current) if current.key == column.key => SortSpec {
                key: column.key,
                direction: current.direction.flip(),
            },
            _ => SortSpec {
                key: column.key,
                direction: SortDirection::Asc,
            },
        };
        self.sort = Some(next);
        Ok(next)
    }

    pub fn clear_sort(&mut self) {
        self.sort = None;
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    pub fn is_filtered(&self) -> bool {
        !self.search.is_empty()
    }

    /// Filters by search, then stable-sorts by the active key. The search
    /// text is matched as typed, whitespace included.
    pub fn apply<'a>(&self, columns: &[ColumnSpec], rows: &'a [TableRow]) -> Vec<&'a TableRow> {
        let needle = self.search.to_lowercase();
        let mut visible = rows
            .iter()
            .filter(|row| needle.is_empty() || row.cells.iter().any(|cell| cell.matches(&needle)))
            .collect::<Vec<_>>();

        let Some(sort) = self.sort else {
            return visible;
        };
        let Some(index) = columns.iter().position(|column| column.key == sort.key) else {
            return visible;
        };
        visible.sort_by(|left, right| {
            let ordering = match (left.cells.get(index), right.cells.get(index)) {
                (Some(left), Some(right)) => left.raw.cmp_value(&right.raw),
                (None, Some(_)) => std::cmp::Ordering::Less,
                (Some(_), None) => std::cmp::Ordering::Greater,
                (None, None) => std::cmp::Ordering::Equal,
            };
            match sort.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });
        visible
    }
}

/// Builds table rows for records. Reference cells resolve through
/// `resolve`; a dangling reference renders as `N/A`.
pub fn record_rows<'a, T, F>(records: impl IntoIterator<Item = &'a T>, resolve: F) -> Vec<TableRow>
where
    T: Record + 'a,
    F: Fn(EntityKind, i64) -> Option<String>,
{
    records
        .into_iter()
        .map(|record| TableRow {
            id: record.id().get(),
            cells: T::columns()
                .iter()
                .map(|column| {
                    let value = record.value(column.key);
                    match (reference_kind::<T>(column.key), value) {
                        (Some(kind), FieldValue::Reference(id)) => {
                            let name = resolve(kind, id).unwrap_or_else(|| "N/A".to_owned());
                            TableCell::new(FieldValue::Text(name))
                        }
                        (Some(_), FieldValue::Empty) => {
                            TableCell::with_display(FieldValue::Empty, "N/A")
                        }
                        (_, value) => TableCell::new(value),
                    }
                })
                .collect(),
        })
        .collect()
}

fn reference_kind<T: Record>(key: &str) -> Option<EntityKind> {
    match T::field(key)?.kind {
        FieldKind::Reference(kind) => Some(kind),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::{PageSnapshot, TableCell, TableRow, TableView, record_rows};
    use crate::ids::{ClientId, ProjectId};
    use crate::model::{EntityKind, Project, SortDirection};
    use crate::record::{ColumnSpec, FieldValue, Record};
    use time::macros::date;

    const COLUMNS: &[ColumnSpec] = &[
        ColumnSpec::sortable("name", "Name"),
        ColumnSpec::sortable("amount", "Amount"),
        ColumnSpec::plain("note", "Note"),
    ];

    fn row(id: i64, name: &str, amount: i64, note: &str) -> TableRow {
        TableRow {
            id,
            cells: vec![
                TableCell::new(FieldValue::text(name)),
                TableCell::new(FieldValue::Money(amount)),
                TableCell::new(FieldValue::text(note)),
            ],
        }
    }

    fn rows() -> Vec<TableRow> {
        vec![
            row(1, "Northwind", 50_000, "renewal"),
            row(2, "acme", 10_000, ""),
            row(3, "Globex", 50_000, "Acme referral"),
            row(4, "Initech", 2_500, "rush"),
        ]
    }

    fn ids(view: &TableView, rows: &[TableRow]) -> Vec<i64> {
        view.apply(COLUMNS, rows).iter().map(|row| row.id).collect()
    }

    #[test]
    fn empty_search_keeps_input_order() {
        let rows = rows();
        assert_eq!(ids(&TableView::default(), &rows), vec![1, 2, 3, 4]);
    }

    #[test]
    fn search_is_case_insensitive_across_columns() {
        let rows = rows();
        let mut view = TableView::default();
        view.set_search("ACME");
        assert_eq!(ids(&view, &rows), vec![2, 3]);
        view.set_search("1,000");
        assert_eq!(ids(&view, &rows), Vec::<i64>::new());
        view.set_search("100.00");
        assert_eq!(ids(&view, &rows), vec![2]);
    }

    #[test]
    fn whitespace_search_is_matched_literally() {
        let rows = rows();
        let mut view = TableView::default();
        view.set_search(" ");
        assert!(view.is_filtered());
        assert_eq!(ids(&view, &rows), vec![3]);

        view.set_search("acme ");
        assert_eq!(ids(&view, &rows), vec![3]);

        view.set_search(" globex");
        assert_eq!(ids(&view, &rows), Vec::<i64>::new());

        view.set_search("");
        assert!(!view.is_filtered());
        assert_eq!(ids(&view, &rows), vec![1, 2, 3, 4]);
    }

    #[test]
    fn toggle_sort_flips_then_resets_on_new_key() -> anyhow::Result<()> {
        let mut view = TableView::default();
        let first = view.toggle_sort(&COLUMNS[1])?;
        assert_eq!(first.direction, SortDirection::Asc);
        let second = view.toggle_sort(&COLUMNS[1])?;
        assert_eq!(second.direction, SortDirection::Desc);
        let third = view.toggle_sort(&COLUMNS[1])?;
        assert_eq!(third.direction, SortDirection::Asc);
        let other = view.toggle_sort(&COLUMNS[0])?;
        assert_eq!(other.key, "name");
        assert_eq!(other.direction, SortDirection::Asc);
        Ok(())
    }

    #[test]
    fn sort_rejects_plain_columns() {
        let mut view = TableView::default();
        assert!(view.toggle_sort(&COLUMNS[2]).is_err());
        assert_eq!(view.sort, None);
    }

    #[test]
    fn sort_is_stable_in_both_directions() -> anyhow::Result<()> {
        let rows = rows();
        let mut view = TableView::default();
        view.toggle_sort(&COLUMNS[1])?;
        assert_eq!(ids(&view, &rows), vec![4, 2, 1, 3]);
        view.toggle_sort(&COLUMNS[1])?;
        assert_eq!(ids(&view, &rows), vec![1, 3, 2, 4]);
        view.toggle_sort(&COLUMNS[1])?;
        assert_eq!(ids(&view, &rows), vec![4, 2, 1, 3]);
        view.clear_sort();
        assert_eq!(ids(&view, &rows), vec![1, 2, 3, 4]);
        Ok(())
    }

    #[test]
    fn text_sort_ignores_case() -> anyhow::Result<()> {
        let rows = rows();
        let mut view = TableView::default();
        view.toggle_sort(&COLUMNS[0])?;
        assert_eq!(ids(&view, &rows), vec![2, 3, 4, 1]);
        Ok(())
    }

    #[test]
    fn record_rows_resolve_references() {
        let mut first = Project::blank(ProjectId::new(1), date!(2025 - 02 - 01));
        first.name = "Portal".to_owned();
        first.client_id = ClientId::new(7);
        let mut second = first.clone();
        second.id = ProjectId::new(2);
        second.client_id = ClientId::new(99);

        let projects = [first, second];
        let rows = record_rows(&projects, |kind, id| {
            (kind == EntityKind::Client && id == 7).then(|| "Acme".to_owned())
        });
        let snapshot = PageSnapshot {
            columns: Project::columns().to_vec(),
            rows,
        };
        let client = snapshot.column_index("client_id").expect("client column");
        assert_eq!(snapshot.rows[0].cells[client].display, "Acme");
        assert_eq!(snapshot.rows[1].cells[client].display, "N/A");
    }
}
