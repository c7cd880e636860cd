//! The state of a single list view: its rows, columns, sort, filter & pagination.
use primitives::{Filter, Row, SortField, SortState};
use std::collections::{BTreeSet, HashMap};

use crate::{
    columns::{
        default_width, observed_keys, ordered_columns, reconcile_visible, reconcile_widths,
    },
    extract::Page,
    filter::apply_filter,
    page::PageInfo,
    preferences::Preferences,
    resize::ResizeGesture,
    search::apply_search,
    sort::{detect_date_field, sort_rows, sortable_field},
    view::ViewSpec,
};

#[derive(Debug, Clone)]
pub struct ListState {
    view: &'static ViewSpec,
    preferences: Preferences,
    /// The row the listed rows belong to, e.g. the request of a campaigns list.
    parent: Option<Row>,
    rows: Vec<Row>,
    observed: BTreeSet<String>,
    columns: Vec<String>,
    visible: Vec<String>,
    widths: HashMap<String, u32>,
    sort: SortState,
    /// Resolved once per row set from the view's date candidates.
    date_field: Option<&'static str>,
    filter: Filter,
    page: PageInfo,
    loading: bool,
    resize: Option<ResizeGesture>,
}

impl ListState {
    /// The visible columns start as the persisted ones, or the view's defaults.
    pub fn new(view: &'static ViewSpec, preferences: Preferences, limit: u32) -> Self {
        let visible = preferences
            .load(view.storage_key)
            .filter(|stored| !stored.is_empty())
            .unwrap_or_else(|| view.default_visible.iter().map(ToString::to_string).collect());

        Self {
            view,
            preferences,
            parent: None,
            rows: Vec::new(),
            observed: BTreeSet::new(),
            columns: Vec::new(),
            visible,
            widths: HashMap::new(),
            sort: SortState::default(),
            date_field: None,
            filter: Filter::default(),
            page: PageInfo::new(1, limit),
            loading: false,
            resize: None,
        }
    }

    pub fn view(&self) -> &'static ViewSpec {
        self.view
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Replaces the rows with a freshly loaded page.
    pub fn set_page(&mut self, page_number: u64, page: Page) {
        self.page.page = page_number.max(1);
        self.page.total = page.total;
        self.set_rows(page.rows);
    }

    /// Replaces the rows, the columns are recomputed if the set of observed keys changed.
    pub fn set_rows(&mut self, rows: Vec<Row>) {
        self.rows = rows;
        self.date_field = detect_date_field(&self.rows, self.view.date_sort_candidates);

        let observed = observed_keys(&self.rows);
        if observed == self.observed {
            return;
        }
        self.columns = ordered_columns(&observed, self.view.preferred_order);
        self.observed = observed;
        self.widths = reconcile_widths(&self.widths, &self.columns);

        // the visible columns are kept when there are no rows
        if self.columns.is_empty() {
            return;
        }

        let reconciled = reconcile_visible(&self.visible, &self.columns, self.view.default_visible);
        if reconciled != self.visible {
            self.visible = reconciled;
            self.persist_visible();
        }
    }

    /// Drops all rows, e.g. after a failed load. Column preferences are left untouched.
    pub fn clear(&mut self) {
        self.page.total = 0;
        self.set_rows(Vec::new());
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn visible_columns(&self) -> &[String] {
        &self.visible
    }

    pub fn is_visible(&self, column: &str) -> bool {
        self.visible.iter().any(|visible| visible == column)
    }

    pub fn width(&self, column: &str) -> u32 {
        self.widths
            .get(column)
            .copied()
            .unwrap_or_else(|| default_width(column))
    }

    /// Shows or hides a column, returns whether anything changed.
    ///
    /// The last visible column can not be hidden.
    pub fn toggle_column(&mut self, column: &str) -> bool {
        if self.is_visible(column) {
            if self.visible.len() == 1 {
                return false;
            }
            self.visible.retain(|visible| visible != column);
        } else if self.columns.iter().any(|known| known == column) {
            let mut visible = std::mem::take(&mut self.visible);
            visible.push(column.to_string());
            self.visible = self.in_column_order(&visible);
        } else {
            return false;
        }

        self.persist_visible();

        true
    }

    /// Shows exactly the given columns, unknown ones are ignored.
    ///
    /// Returns `false` and changes nothing if none of them is a known column.
    pub fn set_visible_columns(&mut self, columns: &[String]) -> bool {
        let visible = self.in_column_order(columns);
        if visible.is_empty() {
            return false;
        }

        self.visible = visible;
        self.persist_visible();

        true
    }

    pub fn show_all_columns(&mut self) {
        if self.columns.is_empty() {
            return;
        }

        self.visible = self.columns.clone();
        self.persist_visible();
    }

    /// Back to the view's default columns.
    pub fn reset_columns(&mut self) {
        if self.columns.is_empty() {
            self.visible = self.view.default_visible.iter().map(ToString::to_string).collect();
        } else {
            self.visible = reconcile_visible(&[], &self.columns, self.view.default_visible);
        }
        self.persist_visible();
    }

    fn in_column_order(&self, columns: &[String]) -> Vec<String> {
        self.columns
            .iter()
            .filter(|column| columns.contains(column))
            .cloned()
            .collect()
    }

    fn persist_visible(&self) {
        self.preferences.save(self.view.storage_key, &self.visible);
    }

    /// Starts dragging the resize handle of a column, replacing any unfinished gesture.
    pub fn begin_resize(&mut self, column: &str, pointer_x: i32) {
        let start_width = self.width(column);

        self.resize = Some(ResizeGesture::begin(column, pointer_x, start_width));
    }

    /// The new width of the dragged column, `None` when there is no gesture.
    pub fn drag_to(&mut self, pointer_x: i32) -> Option<u32> {
        let gesture = self.resize.as_ref()?;
        let width = gesture.width_at(pointer_x);

        self.widths.insert(gesture.column().to_string(), width);

        Some(width)
    }

    /// Releases the handle, the dragged width stays for this session only.
    pub fn end_resize(&mut self) -> Option<u32> {
        let gesture = self.resize.take()?;

        Some(self.width(gesture.column()))
    }

    pub fn is_resizing(&self) -> bool {
        self.resize.is_some()
    }

    pub fn sort(&self) -> SortState {
        self.sort
    }

    pub fn date_field(&self) -> Option<&'static str> {
        self.date_field
    }

    pub fn sortable_field(&self, column: &str) -> Option<SortField> {
        sortable_field(self.view, self.date_field, column)
    }

    /// A click on a column header, returns whether the sort changed.
    ///
    /// Headers which are neither a name nor the date column are inert.
    pub fn toggle_sort(&mut self, column: &str) -> bool {
        match self.sortable_field(column) {
            Some(field) => {
                self.sort = self.sort.toggle(field);
                true
            }
            None => false,
        }
    }

    pub fn sort_by(&mut self, sort: SortState) {
        self.sort = sort;
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }

    pub fn parent(&self) -> Option<&Row> {
        self.parent.as_ref()
    }

    pub fn set_parent(&mut self, parent: Option<Row>) {
        self.parent = parent;
    }

    /// The rows to show: searched, then filtered, then sorted.
    pub fn visible_rows(&self, query: &str) -> Vec<Row> {
        let searched = apply_search(self.rows.clone(), self.view, query);
        let mut rows = apply_filter(searched, &self.filter, self.view, self.parent.as_ref());
        sort_rows(&mut rows, self.sort, self.view, self.date_field);

        rows
    }

    pub fn page_info(&self) -> PageInfo {
        self.page
    }

    pub fn set_limit(&mut self, limit: u32) {
        self.page.limit = limit;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }
}
