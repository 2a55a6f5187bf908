// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use jevxo_app::{
    AppCommand, AppEvent, AppMode, AppState, ColumnSpec, ConfirmDialog, EntityKind, FormDialog,
    FormMode, LeaveRequestId, PageKind, PageSnapshot, PageSummary, Patch, PermissionDraft,
    PermissionFlag, RolePermission, RolePermissionId, SettingId, SettingsDraft, SortDirection,
    SystemSetting, TableRow, TableView, record_rows,
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Tabs},
};
use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;
use time::Date;
use tracing::{debug, info};

const HALF_PAGE_ROWS: isize = 10;
const FULL_PAGE_ROWS: isize = 20;

/// Everything the screens need from the data layer.
pub trait AppRuntime {
    fn today(&self) -> Date;
    fn load_page(&mut self, page: PageKind) -> Result<PageSnapshot>;
    fn load_summary(&mut self, page: PageKind) -> Result<PageSummary>;
    fn form_dialog(&mut self, kind: EntityKind, id: Option<i64>) -> Result<FormDialog>;
    fn save_record(&mut self, kind: EntityKind, id: Option<i64>, patch: &Patch) -> Result<i64>;
    fn remove_record(&mut self, kind: EntityKind, id: i64) -> Result<bool>;
    fn record_label(&mut self, kind: EntityKind, id: i64) -> Result<Option<String>>;
    fn approve_leave(&mut self, id: LeaveRequestId) -> Result<()>;
    fn reject_leave(&mut self, id: LeaveRequestId) -> Result<()>;
    fn load_permissions(&mut self) -> Result<Vec<RolePermission>>;
    fn save_permissions(&mut self, changes: &[RolePermission]) -> Result<usize>;
    fn load_settings(&mut self) -> Result<Vec<SystemSetting>>;
    fn save_settings(&mut self, changes: &[(SettingId, String)]) -> Result<usize>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InternalEvent {
    ClearStatus { token: u64 },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct TableUiState {
    view: TableView,
    selected_row: usize,
    selected_col: usize,
}

/// Add/edit dialog plus the text typed into the focused field.
#[derive(Debug, Clone, PartialEq)]
struct FormUiState {
    dialog: FormDialog,
    input: String,
}

impl FormUiState {
    fn new(dialog: FormDialog) -> Self {
        let mut form = Self {
            dialog,
            input: String::new(),
        };
        form.reload_input();
        form
    }

    /// Fields without a numbered option list take typed input.
    fn takes_text(&self) -> bool {
        self.dialog
            .focused()
            .is_some_and(|spec| self.dialog.options(spec.key).is_empty())
    }

    fn reload_input(&mut self) {
        self.input = self
            .dialog
            .focused()
            .map(|spec| self.dialog.value(spec.key).raw_text())
            .unwrap_or_default();
    }

    fn commit_input(&mut self) -> Result<()> {
        let Some(spec) = self.dialog.focused() else {
            return Ok(());
        };
        if !self.takes_text() {
            return Ok(());
        }
        self.dialog.on_change_raw(spec.key, &self.input)
    }

    fn focus_next(&mut self) {
        self.dialog.focus_next();
        self.reload_input();
    }

    fn focus_prev(&mut self) {
        self.dialog.focus_prev();
        self.reload_input();
    }

    fn focus_message(&self) -> String {
        let total = self.dialog.fields().len();
        match self.dialog.focused() {
            Some(spec) => format!("field {} ({}/{total})", spec.label, self.dialog.focus() + 1),
            None => "form has no fields".to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct SettingEdit {
    id: SettingId,
    input: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
struct ViewData {
    today: Option<Date>,
    page: Option<PageKind>,
    snapshot: PageSnapshot,
    summary: PageSummary,
    table: TableUiState,
    search_input: String,
    form: Option<FormUiState>,
    setting_edit: Option<SettingEdit>,
    confirm: ConfirmDialog,
    permissions: PermissionDraft,
    settings: SettingsDraft,
    help_visible: bool,
    status_token: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TableCommand {
    MoveRow(isize),
    MoveColumn(isize),
    JumpFirstRow,
    JumpLastRow,
    CycleSort,
    ClearSort,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum TableStatus {
    SortUnavailable,
    NotSortable(&'static str),
    SortAsc(&'static str),
    SortDesc(&'static str),
    SortCleared,
}

impl TableStatus {
    fn message(self) -> String {
        match self {
            Self::SortUnavailable => "sort unavailable".to_owned(),
            Self::NotSortable(column) => format!("{column} not sortable"),
            Self::SortAsc(column) => format!("sort {column} asc"),
            Self::SortDesc(column) => format!("sort {column} desc"),
            Self::SortCleared => "sort cleared".to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum TableEvent {
    CursorUpdated,
    Status(TableStatus),
}

pub fn run_app<R: AppRuntime>(state: &mut AppState, runtime: &mut R) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    let mut view_data = ViewData {
        today: Some(runtime.today()),
        ..ViewData::default()
    };
    let (internal_tx, internal_rx) = mpsc::channel();

    if let Err(error) = refresh_view_data(state, runtime, &mut view_data) {
        state.dispatch(AppCommand::SetStatus(format!("load failed: {error}")));
    }
    info!(page = state.active_page.label(), "tui started");

    let mut result = Ok(());
    loop {
        process_internal_events(state, &mut view_data, &internal_rx);

        if let Err(error) = terminal.draw(|frame| render(frame, state, &view_data)) {
            result = Err(error).context("draw frame");
            break;
        }

        let has_event = event::poll(Duration::from_millis(120)).context("poll event")?;
        if has_event {
            match event::read().context("read event")? {
                Event::Key(key) => {
                    if handle_key_event(state, runtime, &mut view_data, &internal_tx, key) {
                        break;
                    }
                }
                Event::Resize(_, _) => {}
                _ => {}
            }
        }
    }

    disable_raw_mode().context("disable raw mode")?;
    execute!(io::stdout(), terminal::LeaveAlternateScreen).context("leave alternate screen")?;
    info!("tui stopped");
    result
}

fn process_internal_events(
    state: &mut AppState,
    view_data: &mut ViewData,
    rx: &Receiver<InternalEvent>,
) {
    while let Ok(event) = rx.try_recv() {
        match event {
            InternalEvent::ClearStatus { token } if token == view_data.status_token => {
                state.dispatch(AppCommand::ClearStatus);
            }
            InternalEvent::ClearStatus { .. } => {}
        }
    }
}

fn schedule_status_clear(internal_tx: &Sender<InternalEvent>, token: u64) {
    let sender = internal_tx.clone();
    thread::spawn(move || {
        thread::sleep(Duration::from_secs(4));
        let _ = sender.send(InternalEvent::ClearStatus { token });
    });
}

fn emit_status(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    message: impl Into<String>,
) {
    state.dispatch(AppCommand::SetStatus(message.into()));
    view_data.status_token = view_data.status_token.saturating_add(1);
    schedule_status_clear(internal_tx, view_data.status_token);
}

fn handle_key_event<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) -> bool {
    if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }

    if view_data.help_visible {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?')) {
            view_data.help_visible = false;
        }
        return false;
    }

    match state.mode {
        AppMode::Nav => handle_nav_key(state, runtime, view_data, internal_tx, key),
        AppMode::Search => handle_search_key(state, runtime, view_data, internal_tx, key),
        AppMode::Form(_) if view_data.setting_edit.is_some() => {
            handle_setting_edit_key(state, runtime, view_data, internal_tx, key);
        }
        AppMode::Form(_) => handle_form_key(state, runtime, view_data, internal_tx, key),
        AppMode::Confirm => handle_confirm_key(state, runtime, view_data, internal_tx, key),
    }
    false
}

fn handle_nav_key<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    if let Some(command) = table_command_for_key(key) {
        match apply_table_command(view_data, command) {
            TableEvent::CursorUpdated => {}
            TableEvent::Status(status) => {
                emit_status(state, view_data, internal_tx, status.message());
            }
        }
        return;
    }

    let page = state.active_page;
    match (key.code, key.modifiers) {
        (KeyCode::Char('?'), _) => view_data.help_visible = true,
        (KeyCode::Tab, _) => {
            dispatch_and_refresh(state, runtime, view_data, AppCommand::NextPage, internal_tx);
        }
        (KeyCode::BackTab, _) => {
            dispatch_and_refresh(state, runtime, view_data, AppCommand::PrevPage, internal_tx);
        }
        (KeyCode::Char(']'), _) => {
            dispatch_and_refresh(state, runtime, view_data, AppCommand::NextPanel, internal_tx);
        }
        (KeyCode::Char('['), _) => {
            dispatch_and_refresh(state, runtime, view_data, AppCommand::PrevPanel, internal_tx);
        }
        (KeyCode::Char('/'), _) => {
            view_data.search_input = view_data.table.view.search.clone();
            dispatch_and_refresh(state, runtime, view_data, AppCommand::OpenSearch, internal_tx);
        }
        (KeyCode::Char('a'), KeyModifiers::NONE) => {
            let Some(kind) = page.entity().filter(|_| page.has_form()) else {
                emit_status(
                    state,
                    view_data,
                    internal_tx,
                    format!("{} has no add form", page.label()),
                );
                return;
            };
            open_form(state, runtime, view_data, internal_tx, kind, None);
        }
        (KeyCode::Char('e'), KeyModifiers::NONE) | (KeyCode::Enter, _) => {
            open_edit(state, runtime, view_data, internal_tx);
        }
        (KeyCode::Char('d'), KeyModifiers::NONE) => {
            open_delete_confirm(state, runtime, view_data, internal_tx);
        }
        (KeyCode::Char('A'), _) => decide_leave(state, runtime, view_data, internal_tx, true),
        (KeyCode::Char('R'), _) => decide_leave(state, runtime, view_data, internal_tx, false),
        (KeyCode::Char(' '), _) if page == PageKind::Roles => {
            toggle_permission(state, view_data, internal_tx);
        }
        (KeyCode::Char('w'), KeyModifiers::NONE) => {
            save_draft(state, runtime, view_data, internal_tx);
        }
        _ => {}
    }
}

fn handle_search_key<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    match key.code {
        KeyCode::Esc => {
            view_data.search_input.clear();
            apply_search(view_data);
            dispatch_and_refresh(state, runtime, view_data, AppCommand::CloseSearch, internal_tx);
            emit_status(state, view_data, internal_tx, "search cleared");
        }
        KeyCode::Enter => {
            dispatch_and_refresh(state, runtime, view_data, AppCommand::CloseSearch, internal_tx);
            let message = if view_data.table.view.is_filtered() {
                format!(
                    "{} of {} rows match",
                    visible_rows(view_data).len(),
                    view_data.snapshot.rows.len()
                )
            } else {
                "search cleared".to_owned()
            };
            emit_status(state, view_data, internal_tx, message);
        }
        KeyCode::Backspace => {
            view_data.search_input.pop();
            apply_search(view_data);
        }
        KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            view_data.search_input.push(ch);
            apply_search(view_data);
        }
        _ => {}
    }
}

fn apply_search(view_data: &mut ViewData) {
    view_data
        .table
        .view
        .set_search(view_data.search_input.clone());
    view_data.table.selected_row = 0;
    clamp_table_cursor(view_data);
}

fn open_form<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    kind: EntityKind,
    id: Option<i64>,
) {
    match runtime.form_dialog(kind, id) {
        Ok(dialog) => {
            let form = FormUiState::new(dialog);
            let message = form.focus_message();
            view_data.form = Some(form);
            dispatch_and_refresh(state, runtime, view_data, AppCommand::OpenForm(kind), internal_tx);
            emit_status(state, view_data, internal_tx, message);
        }
        Err(error) => {
            emit_status(state, view_data, internal_tx, format!("load failed: {error}"));
        }
    }
}

fn open_edit<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
) {
    let page = state.active_page;
    let Some(id) = selected_row_id(view_data) else {
        emit_status(state, view_data, internal_tx, "no row selected");
        return;
    };
    match page {
        PageKind::Settings => {
            let id = SettingId::new(id);
            let input = view_data.settings.value(id).unwrap_or_default().to_owned();
            view_data.setting_edit = Some(SettingEdit { id, input });
            dispatch_and_refresh(
                state,
                runtime,
                view_data,
                AppCommand::OpenForm(EntityKind::SystemSetting),
                internal_tx,
            );
        }
        PageKind::Roles => {
            emit_status(state, view_data, internal_tx, "space toggles a permission | w saves");
        }
        _ => match page.entity().filter(|_| page.has_form()) {
            Some(kind) => open_form(state, runtime, view_data, internal_tx, kind, Some(id)),
            None => emit_status(
                state,
                view_data,
                internal_tx,
                format!("{} is read-only", page.label()),
            ),
        },
    }
}

fn handle_form_key<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    match (key.code, key.modifiers) {
        (KeyCode::Esc, _) => {
            view_data.form = None;
            dispatch_and_refresh(state, runtime, view_data, AppCommand::CloseForm, internal_tx);
            emit_status(state, view_data, internal_tx, "form cancelled");
        }
        (KeyCode::Enter, _) => submit_form(state, runtime, view_data, internal_tx),
        (KeyCode::Char('s'), modifiers) if modifiers.contains(KeyModifiers::CONTROL) => {
            submit_form(state, runtime, view_data, internal_tx);
        }
        (KeyCode::Tab, _) => move_form_focus(state, view_data, internal_tx, true),
        (KeyCode::BackTab, _) => move_form_focus(state, view_data, internal_tx, false),
        (KeyCode::Backspace, _) => {
            if let Some(form) = view_data.form.as_mut()
                && form.takes_text()
            {
                form.input.pop();
            }
        }
        (KeyCode::Char(ch), modifiers) if !modifiers.contains(KeyModifiers::CONTROL) => {
            type_form_char(state, view_data, internal_tx, ch);
        }
        _ => {}
    }
}

fn move_form_focus(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    forward: bool,
) {
    let Some(form) = view_data.form.as_mut() else {
        return;
    };
    if let Err(error) = form.commit_input() {
        emit_status(state, view_data, internal_tx, format!("form invalid: {error}"));
        return;
    }
    if forward {
        form.focus_next();
    } else {
        form.focus_prev();
    }
    let message = form.focus_message();
    emit_status(state, view_data, internal_tx, message);
}

/// Typed text for free-form fields; digits 1-9 pick from option lists.
fn type_form_char(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    ch: char,
) {
    let Some(form) = view_data.form.as_mut() else {
        return;
    };
    if form.takes_text() {
        form.input.push(ch);
        return;
    }
    let Some(spec) = form.dialog.focused() else {
        return;
    };
    let message = match ch.to_digit(10) {
        Some(digit @ 1..=9) => match form.dialog.choose_option(digit as usize - 1) {
            Ok(()) => format!("{}: {}", spec.label, form.dialog.display_value(spec)),
            Err(error) => format!("form invalid: {error}"),
        },
        _ => format!(
            "{} -- press 1-{} to choose",
            spec.label,
            form.dialog.options(spec.key).len().min(9)
        ),
    };
    emit_status(state, view_data, internal_tx, message);
}

fn submit_form<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
) {
    let Some(form) = view_data.form.as_mut() else {
        return;
    };
    let entity = form.dialog.entity;
    let id = match form.dialog.mode {
        FormMode::Create => None,
        FormMode::Edit(id) => Some(id),
    };
    let submitted = form.commit_input().and_then(|()| form.dialog.submit());
    let patch = match submitted {
        Ok(patch) => patch,
        Err(error) => {
            emit_status(state, view_data, internal_tx, format!("form invalid: {error}"));
            return;
        }
    };

    match runtime.save_record(entity, id, &patch) {
        Ok(saved) => {
            debug!(entity = entity.as_str(), id = saved, "form saved");
            view_data.form = None;
            dispatch_and_refresh(state, runtime, view_data, AppCommand::CloseForm, internal_tx);
            reload_view(state, runtime, view_data, internal_tx);
            select_row_by_id(view_data, saved);
            let verb = if id.is_some() { "updated" } else { "added" };
            emit_status(
                state,
                view_data,
                internal_tx,
                format!("{} {saved} {verb}", entity.label()),
            );
        }
        Err(error) => {
            emit_status(state, view_data, internal_tx, format!("save failed: {error}"));
        }
    }
}

fn open_delete_confirm<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
) {
    let page = state.active_page;
    let Some(kind) = page.entity().filter(|_| page.can_delete()) else {
        emit_status(
            state,
            view_data,
            internal_tx,
            format!("{} rows cannot be deleted", page.label()),
        );
        return;
    };
    let Some(id) = selected_row_id(view_data) else {
        emit_status(state, view_data, internal_tx, "no row selected");
        return;
    };
    let label = match runtime.record_label(kind, id) {
        Ok(label) => label.unwrap_or_else(|| format!("#{id}")),
        Err(error) => {
            emit_status(state, view_data, internal_tx, format!("load failed: {error}"));
            return;
        }
    };
    view_data.confirm.open(kind, id, label);
    dispatch_and_refresh(state, runtime, view_data, AppCommand::OpenConfirm, internal_tx);
}

fn handle_confirm_key<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    match key.code {
        KeyCode::Char('y' | 'Y') => {
            let target = view_data.confirm.confirm();
            dispatch_and_refresh(state, runtime, view_data, AppCommand::CloseConfirm, internal_tx);
            let Some((entity, id)) = target else {
                return;
            };
            let message = match runtime.remove_record(entity, id) {
                Ok(true) => {
                    debug!(entity = entity.as_str(), id, "record deleted");
                    reload_view(state, runtime, view_data, internal_tx);
                    format!("{} {id} deleted", entity.label())
                }
                Ok(false) => format!(
                    "{} {id} not found -- refresh the list and retry",
                    entity.label()
                ),
                Err(error) => format!("delete failed: {error}"),
            };
            emit_status(state, view_data, internal_tx, message);
        }
        KeyCode::Char('n' | 'N') | KeyCode::Esc => {
            view_data.confirm.cancel();
            dispatch_and_refresh(state, runtime, view_data, AppCommand::CloseConfirm, internal_tx);
            emit_status(state, view_data, internal_tx, "delete cancelled");
        }
        _ => {}
    }
}

fn decide_leave<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    approve: bool,
) {
    if state.active_page != PageKind::Leaves {
        emit_status(
            state,
            view_data,
            internal_tx,
            "approve and reject apply to leave requests only",
        );
        return;
    }
    let Some(id) = selected_row_id(view_data) else {
        emit_status(state, view_data, internal_tx, "no row selected");
        return;
    };
    let id = LeaveRequestId::new(id);
    let (result, action, done) = if approve {
        (runtime.approve_leave(id), "approve", "approved")
    } else {
        (runtime.reject_leave(id), "reject", "rejected")
    };
    let message = match result {
        Ok(()) => {
            reload_view(state, runtime, view_data, internal_tx);
            select_row_by_id(view_data, id.get());
            format!("leave request {id} {done}")
        }
        Err(error) => format!("{action} failed: {error}"),
    };
    emit_status(state, view_data, internal_tx, message);
}

fn permission_flag_for_column(key: &str) -> Option<PermissionFlag> {
    match key {
        "can_view" => Some(PermissionFlag::View),
        "can_create" => Some(PermissionFlag::Create),
        "can_edit" => Some(PermissionFlag::Edit),
        "can_delete" => Some(PermissionFlag::Delete),
        _ => None,
    }
}

fn toggle_permission(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
) {
    let Some(id) = selected_row_id(view_data) else {
        emit_status(state, view_data, internal_tx, "no row selected");
        return;
    };
    let flag = view_data
        .snapshot
        .columns
        .get(view_data.table.selected_col)
        .and_then(|column| permission_flag_for_column(column.key));
    let Some(flag) = flag else {
        emit_status(
            state,
            view_data,
            internal_tx,
            "move to a permission column to toggle",
        );
        return;
    };

    let id = RolePermissionId::new(id);
    let message = match view_data.permissions.toggle(id, flag) {
        Ok(enabled) => {
            let name = view_data
                .permissions
                .rows()
                .iter()
                .find(|permission| permission.id == id)
                .map(|permission| {
                    format!("{} {}", permission.role.label(), permission.module.label())
                })
                .unwrap_or_default();
            view_data.snapshot = permission_snapshot(&view_data.permissions);
            let state_label = if enabled { "on" } else { "off" };
            format!("{name} {} {state_label} (unsaved, w to save)", flag.label())
        }
        Err(error) => format!("toggle failed: {error}"),
    };
    emit_status(state, view_data, internal_tx, message);
}

/// Writes the staged permissions of the selected role, or the staged
/// settings of the selected category.
fn save_draft<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
) {
    let page = state.active_page;
    if !matches!(page, PageKind::Roles | PageKind::Settings) {
        emit_status(
            state,
            view_data,
            internal_tx,
            format!("{} has nothing staged to save", page.label()),
        );
        return;
    }
    let Some(id) = selected_row_id(view_data) else {
        emit_status(state, view_data, internal_tx, "no row selected");
        return;
    };
    let message = if page == PageKind::Roles {
        save_role(runtime, view_data, RolePermissionId::new(id))
    } else {
        save_category(runtime, view_data, SettingId::new(id))
    };
    reload_view(state, runtime, view_data, internal_tx);
    emit_status(state, view_data, internal_tx, message);
}

fn save_role<R: AppRuntime>(
    runtime: &mut R,
    view_data: &mut ViewData,
    id: RolePermissionId,
) -> String {
    let Some(role) = view_data
        .permissions
        .rows()
        .iter()
        .find(|permission| permission.id == id)
        .map(|permission| permission.role)
    else {
        return format!("permission {id} not found -- reload roles and retry");
    };
    let changes = view_data.permissions.changes_for_role(role);
    if changes.is_empty() {
        return format!("no unsaved changes for {}", role.label());
    }
    match runtime.save_permissions(&changes) {
        Ok(saved) => {
            view_data.permissions.mark_saved(role);
            format!("saved {saved} permissions for {}", role.label())
        }
        Err(error) => format!("save failed: {error}"),
    }
}

fn save_category<R: AppRuntime>(runtime: &mut R, view_data: &mut ViewData, id: SettingId) -> String {
    let Some(category) = view_data.settings.category_of(id) else {
        return format!("setting {id} not found -- reload settings and retry");
    };
    let changes = view_data.settings.changes_for_category(category);
    if changes.is_empty() {
        return format!("no unsaved {} settings", category.label());
    }
    match runtime.save_settings(&changes) {
        Ok(saved) => {
            view_data.settings.mark_saved(category);
            format!("saved {saved} {} settings", category.label())
        }
        Err(error) => format!("save failed: {error}"),
    }
}

fn handle_setting_edit_key<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    match key.code {
        KeyCode::Esc => {
            view_data.setting_edit = None;
            dispatch_and_refresh(state, runtime, view_data, AppCommand::CloseForm, internal_tx);
            emit_status(state, view_data, internal_tx, "edit cancelled");
        }
        KeyCode::Enter => {
            let Some(edit) = view_data.setting_edit.take() else {
                return;
            };
            dispatch_and_refresh(state, runtime, view_data, AppCommand::CloseForm, internal_tx);
            let message = match view_data.settings.edit(edit.id, edit.input.trim()) {
                Ok(()) => {
                    view_data.snapshot = setting_snapshot(&view_data.settings);
                    let key = view_data
                        .settings
                        .rows()
                        .into_iter()
                        .find(|setting| setting.id == edit.id)
                        .map(|setting| setting.key)
                        .unwrap_or_default();
                    format!("{key} staged (unsaved, w to save)")
                }
                Err(error) => format!("edit failed: {error}"),
            };
            emit_status(state, view_data, internal_tx, message);
        }
        KeyCode::Backspace => {
            if let Some(edit) = view_data.setting_edit.as_mut() {
                edit.input.pop();
            }
        }
        KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            if let Some(edit) = view_data.setting_edit.as_mut() {
                edit.input.push(ch);
            }
        }
        _ => {}
    }
}

fn table_command_for_key(key: KeyEvent) -> Option<TableCommand> {
    match (key.code, key.modifiers) {
        (KeyCode::Char('j'), _) | (KeyCode::Down, _) => Some(TableCommand::MoveRow(1)),
        (KeyCode::Char('k'), _) | (KeyCode::Up, _) => Some(TableCommand::MoveRow(-1)),
        (KeyCode::Char('h'), _) | (KeyCode::Left, _) => Some(TableCommand::MoveColumn(-1)),
        (KeyCode::Char('l'), _) | (KeyCode::Right, _) => Some(TableCommand::MoveColumn(1)),
        (KeyCode::Char('d'), modifiers) if modifiers.contains(KeyModifiers::CONTROL) => {
            Some(TableCommand::MoveRow(HALF_PAGE_ROWS))
        }
        (KeyCode::Char('u'), modifiers) if modifiers.contains(KeyModifiers::CONTROL) => {
            Some(TableCommand::MoveRow(-HALF_PAGE_ROWS))
        }
        (KeyCode::PageDown, _) => Some(TableCommand::MoveRow(FULL_PAGE_ROWS)),
        (KeyCode::PageUp, _) => Some(TableCommand::MoveRow(-FULL_PAGE_ROWS)),
        (KeyCode::Char('g'), _) => Some(TableCommand::JumpFirstRow),
        (KeyCode::Char('G'), _) => Some(TableCommand::JumpLastRow),
        (KeyCode::Char('s'), KeyModifiers::NONE) => Some(TableCommand::CycleSort),
        (KeyCode::Char('S'), _) => Some(TableCommand::ClearSort),
        _ => None,
    }
}

fn apply_table_command(view_data: &mut ViewData, command: TableCommand) -> TableEvent {
    match command {
        TableCommand::MoveRow(delta) => {
            move_row(view_data, delta);
            TableEvent::CursorUpdated
        }
        TableCommand::MoveColumn(delta) => {
            let columns = view_data.snapshot.columns.len();
            view_data.table.selected_col = view_data
                .table
                .selected_col
                .saturating_add_signed(delta)
                .min(columns.saturating_sub(1));
            TableEvent::CursorUpdated
        }
        TableCommand::JumpFirstRow => {
            view_data.table.selected_row = 0;
            TableEvent::CursorUpdated
        }
        TableCommand::JumpLastRow => {
            let rows = visible_rows(view_data).len();
            view_data.table.selected_row = rows.saturating_sub(1);
            TableEvent::CursorUpdated
        }
        TableCommand::CycleSort => TableEvent::Status(cycle_sort(view_data)),
        TableCommand::ClearSort => {
            let selected = selected_row_id(view_data);
            view_data.table.view.clear_sort();
            follow_selection(view_data, selected);
            TableEvent::Status(TableStatus::SortCleared)
        }
    }
}

fn move_row(view_data: &mut ViewData, delta: isize) {
    let rows = visible_rows(view_data).len();
    view_data.table.selected_row = view_data
        .table
        .selected_row
        .saturating_add_signed(delta)
        .min(rows.saturating_sub(1));
}

fn cycle_sort(view_data: &mut ViewData) -> TableStatus {
    let Some(column) = view_data
        .snapshot
        .columns
        .get(view_data.table.selected_col)
        .cloned()
    else {
        return TableStatus::SortUnavailable;
    };
    let selected = selected_row_id(view_data);
    let status = match view_data.table.view.toggle_sort(&column) {
        Ok(sort) => match sort.direction {
            SortDirection::Asc => TableStatus::SortAsc(column.label),
            SortDirection::Desc => TableStatus::SortDesc(column.label),
        },
        Err(_) => TableStatus::NotSortable(column.label),
    };
    follow_selection(view_data, selected);
    status
}

/// Keeps the cursor on the same record after the row order changes.
fn follow_selection(view_data: &mut ViewData, selected: Option<i64>) {
    clamp_table_cursor(view_data);
    if let Some(id) = selected {
        select_row_by_id(view_data, id);
    }
}

fn visible_rows(view_data: &ViewData) -> Vec<&TableRow> {
    view_data
        .table
        .view
        .apply(&view_data.snapshot.columns, &view_data.snapshot.rows)
}

fn selected_row_id(view_data: &ViewData) -> Option<i64> {
    visible_rows(view_data)
        .get(view_data.table.selected_row)
        .map(|row| row.id)
}

fn select_row_by_id(view_data: &mut ViewData, id: i64) {
    let index = visible_rows(view_data)
        .iter()
        .position(|row| row.id == id);
    if let Some(index) = index {
        view_data.table.selected_row = index;
    }
}

fn clamp_table_cursor(view_data: &mut ViewData) {
    let rows = visible_rows(view_data).len();
    let columns = view_data.snapshot.columns.len();
    view_data.table.selected_row = view_data.table.selected_row.min(rows.saturating_sub(1));
    view_data.table.selected_col = view_data.table.selected_col.min(columns.saturating_sub(1));
}

fn permission_snapshot(draft: &PermissionDraft) -> PageSnapshot {
    PageSnapshot {
        columns: EntityKind::RolePermission.columns().to_vec(),
        rows: record_rows(draft.rows(), |_, _| None),
    }
}

fn setting_snapshot(draft: &SettingsDraft) -> PageSnapshot {
    let settings = draft.rows();
    PageSnapshot {
        columns: EntityKind::SystemSetting.columns().to_vec(),
        rows: record_rows(&settings, |_, _| None),
    }
}

fn render(frame: &mut ratatui::Frame<'_>, state: &AppState, view_data: &ViewData) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(2),
        ])
        .split(frame.area());

    let panel = state.active_page.panel();
    let pages = PageKind::ALL
        .into_iter()
        .filter(|page| page.panel() == panel)
        .collect::<Vec<_>>();
    let selected = pages
        .iter()
        .position(|page| *page == state.active_page)
        .unwrap_or(0);
    let title = match view_data.today {
        Some(today) => format!("jevxo | {} | {today}", panel.label()),
        None => format!("jevxo | {}", panel.label()),
    };
    let tabs = Tabs::new(pages.iter().map(|page| page.label()))
        .block(Block::default().title(title).borders(Borders::ALL))
        .style(Style::default().fg(Color::White))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .select(selected);
    frame.render_widget(tabs, layout[0]);

    let summary = Paragraph::new(view_data.summary.line())
        .block(Block::default().borders(Borders::ALL).title("summary"));
    frame.render_widget(summary, layout[1]);

    render_table(frame, layout[2], state, view_data);

    let status_widget = Paragraph::new(status_text(state, view_data))
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::TOP));
    frame.render_widget(status_widget, layout[3]);

    if let Some(form) = &view_data.form {
        let area = centered_rect(60, 70, frame.area());
        frame.render_widget(Clear, area);
        let overlay = Paragraph::new(form_overlay_text(form)).block(
            Block::default()
                .title(form.dialog.title())
                .borders(Borders::ALL),
        );
        frame.render_widget(overlay, area);
    }

    if let Some(edit) = &view_data.setting_edit {
        let area = centered_rect(50, 20, frame.area());
        frame.render_widget(Clear, area);
        let overlay = Paragraph::new(format!("{}_\n\nenter stage | esc cancel", edit.input))
            .block(Block::default().title("edit setting").borders(Borders::ALL));
        frame.render_widget(overlay, area);
    }

    if let Some(prompt) = view_data.confirm.prompt() {
        let area = centered_rect(50, 20, frame.area());
        frame.render_widget(Clear, area);
        let overlay = Paragraph::new(prompt)
            .style(Style::default().fg(Color::Red))
            .block(Block::default().title("confirm").borders(Borders::ALL));
        frame.render_widget(overlay, area);
    }

    if view_data.help_visible {
        let area = centered_rect(70, 60, frame.area());
        frame.render_widget(Clear, area);
        let help = Paragraph::new(help_overlay_text())
            .block(Block::default().title("help").borders(Borders::ALL));
        frame.render_widget(help, area);
    }
}

fn help_overlay_text() -> &'static str {
    "global: ctrl+q quit | ? help\n\
nav: j/k/h/l g/G ctrl+d/u pgup/pgdn | tab/shift+tab page | [/] panel\n\
table: s sort | S clear sort | / search\n\
edit: a add | e or enter edit | d delete\n\
leaves: A approve | R reject\n\
roles: space toggle permission | w save role\n\
settings: e edit value | w save category\n\
form: tab/shift+tab field | 1-9 choose | ctrl+s or enter submit | esc cancel\n\
confirm: y delete | n or esc cancel"
}

fn header_label(column: &ColumnSpec, view: &TableView) -> String {
    match view.sort {
        Some(sort) if sort.key == column.key => {
            format!("{} ({})", column.label, sort.direction.as_str())
        }
        _ => column.label.to_owned(),
    }
}

fn render_table(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    state: &AppState,
    view_data: &ViewData,
) {
    let rows = visible_rows(view_data);
    let title = if view_data.table.view.is_filtered() {
        format!(
            "{} ({}/{}, search {:?})",
            state.active_page.label(),
            rows.len(),
            view_data.snapshot.rows.len(),
            view_data.table.view.search
        )
    } else {
        format!("{} ({})", state.active_page.label(), rows.len())
    };

    let columns = &view_data.snapshot.columns;
    if columns.is_empty() {
        let empty = Paragraph::new(String::new())
            .block(Block::default().borders(Borders::ALL).title(title));
        frame.render_widget(empty, area);
        return;
    }

    let widths = vec![Constraint::Min(8); columns.len()];
    let header = Row::new(columns.iter().map(|column| {
        Cell::from(header_label(column, &view_data.table.view)).style(
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
    }));

    let body = rows
        .iter()
        .enumerate()
        .map(|(row_index, row)| {
            let selected_row = row_index == view_data.table.selected_row;
            let cells = row
                .cells
                .iter()
                .enumerate()
                .map(|(column_index, cell)| {
                    let mut style = Style::default();
                    if selected_row {
                        style = style.bg(Color::DarkGray);
                    }
                    if selected_row && column_index == view_data.table.selected_col {
                        style = Style::default()
                            .fg(Color::Black)
                            .bg(Color::Cyan)
                            .add_modifier(Modifier::BOLD);
                    }
                    Cell::from(cell.display.clone()).style(style)
                })
                .collect::<Vec<_>>();
            Row::new(cells)
        })
        .collect::<Vec<_>>();

    let table = Table::new(body, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title));
    let selected = (!rows.is_empty()).then_some(view_data.table.selected_row);
    let mut table_state = TableState::default().with_selected(selected);
    frame.render_stateful_widget(table, area, &mut table_state);
}

fn form_overlay_text(form: &FormUiState) -> String {
    let mut lines = Vec::new();
    for (index, spec) in form.dialog.fields().iter().enumerate() {
        let focused = index == form.dialog.focus();
        let marker = if focused { ">" } else { " " };
        let required = if spec.required { "*" } else { "" };
        let value = if focused && form.takes_text() {
            format!("{}_", form.input)
        } else {
            form.dialog.display_value(spec)
        };
        lines.push(format!("{marker} {}{required}: {value}", spec.label));

        if focused {
            let options = form.dialog.options(spec.key);
            if options.is_empty() {
                lines.push(format!("    {}", spec.kind.hint()));
            } else {
                let listed = options
                    .iter()
                    .take(9)
                    .enumerate()
                    .map(|(option, (_, label))| format!("{} {label}", option + 1))
                    .collect::<Vec<_>>()
                    .join("  ");
                lines.push(format!("    {listed}"));
            }
        }
    }
    lines.push(String::new());
    lines.push("tab/shift+tab field | 1-9 choose | enter save | esc cancel".to_owned());
    lines.join("\n")
}

fn nav_hints(page: PageKind) -> &'static str {
    match page {
        PageKind::Leaves => "A approve | R reject | a add | e edit | / search | ? help",
        PageKind::Roles => "space toggle | w save role | s sort | / search | ? help",
        PageKind::Settings => "e edit | w save category | / search | ? help",
        PageKind::Dashboard | PageKind::Payroll => "tab page | s sort | / search | ? help",
        _ => "a add | e edit | d del | / search | ? help",
    }
}

fn status_text(state: &AppState, view_data: &ViewData) -> String {
    if view_data.help_visible {
        return String::new();
    }
    let (mode, hints) = match state.mode {
        AppMode::Nav => ("NAV", nav_hints(state.active_page).to_owned()),
        AppMode::Search => (
            "SEARCH",
            format!("/{}_ | enter keep | esc clear", view_data.search_input),
        ),
        AppMode::Form(_) => ("FORM", "enter save | esc cancel".to_owned()),
        AppMode::Confirm => ("CONFIRM", "y delete | n cancel".to_owned()),
    };
    match &state.status_line {
        Some(status) => format!("{mode} | {status} | {hints}"),
        None => format!("{mode} | {hints}"),
    }
}

fn dispatch_and_refresh<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    command: AppCommand,
    internal_tx: &Sender<InternalEvent>,
) {
    let events = state.dispatch(command);
    if should_refresh_view(&events) {
        reload_view(state, runtime, view_data, internal_tx);
    }
    if events
        .iter()
        .any(|event| matches!(event, AppEvent::StatusUpdated(_)))
    {
        view_data.status_token = view_data.status_token.saturating_add(1);
        schedule_status_clear(internal_tx, view_data.status_token);
    }
}

fn should_refresh_view(events: &[AppEvent]) -> bool {
    events
        .iter()
        .any(|event| matches!(event, AppEvent::PageChanged(_)))
}

fn reload_view<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
) {
    if let Err(error) = refresh_view_data(state, runtime, view_data) {
        emit_status(state, view_data, internal_tx, format!("load failed: {error}"));
    }
}

/// Reloads the active page. Staged role and setting edits survive
/// reloads until saved.
fn refresh_view_data<R: AppRuntime>(
    state: &AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
) -> Result<()> {
    let page = state.active_page;
    if view_data.page != Some(page) {
        view_data.page = Some(page);
        view_data.table = TableUiState::default();
        view_data.search_input.clear();
    }

    view_data.summary = runtime.load_summary(page)?;
    view_data.snapshot = match page {
        PageKind::Roles => {
            if !view_data.permissions.is_dirty() {
                view_data.permissions = PermissionDraft::new(runtime.load_permissions()?);
            }
            view_data.summary = view_data.permissions.modules_per_role().into_iter().fold(
                PageSummary::default(),
                |summary, (role, modules)| summary.count(role.label(), modules),
            );
            permission_snapshot(&view_data.permissions)
        }
        PageKind::Settings => {
            if !view_data.settings.is_dirty() {
                view_data.settings = SettingsDraft::new(runtime.load_settings()?);
            }
            setting_snapshot(&view_data.settings)
        }
        _ => runtime.load_page(page)?,
    };
    clamp_table_cursor(view_data);
    Ok(())
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::{
        AppRuntime, InternalEvent, ViewData, centered_rect, emit_status, handle_key_event,
        process_internal_events, refresh_view_data, selected_row_id, status_text, visible_rows,
    };
    use anyhow::{Result, bail};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use jevxo_app::{
        AccessRole, AppMode, AppState, ClientStatus, EntityKind, FieldValue, FormDialog,
        LeaveRequestId, ModuleKind, PageKind, PageSnapshot, PageSummary, Patch, RolePermission,
        RolePermissionId, SettingCategory, SettingId, SystemSetting, TableCell, TableRow,
    };
    use ratatui::layout::Rect;
    use std::sync::mpsc;
    use time::Date;
    use time::macros::date;

    #[derive(Debug, Default)]
    struct TestRuntime {
        page_loads: usize,
        fail_save: bool,
        saved: Vec<(EntityKind, Option<i64>, Patch)>,
        removed: Vec<(EntityKind, i64)>,
        approved: Vec<LeaveRequestId>,
        rejected: Vec<LeaveRequestId>,
        saved_permissions: Vec<RolePermission>,
        saved_settings: Vec<(SettingId, String)>,
    }

    fn row(id: i64, name: &str, width: usize) -> TableRow {
        let mut cells = vec![TableCell::new(FieldValue::text(name))];
        cells.resize(width, TableCell::new(FieldValue::Empty));
        TableRow { id, cells }
    }

    fn snapshot(kind: EntityKind, rows: &[(i64, &str)]) -> PageSnapshot {
        let columns = kind.columns().to_vec();
        let width = columns.len();
        PageSnapshot {
            columns,
            rows: rows
                .iter()
                .map(|(id, name)| row(*id, name, width))
                .collect(),
        }
    }

    impl AppRuntime for TestRuntime {
        fn today(&self) -> Date {
            date!(2026 - 02 - 19)
        }

        fn load_page(&mut self, page: PageKind) -> Result<PageSnapshot> {
            self.page_loads += 1;
            Ok(match page {
                PageKind::Leaves => snapshot(EntityKind::LeaveRequest, &[(7, "Amaka")]),
                _ => snapshot(EntityKind::Client, &[(1, "Acme"), (2, "Globex")]),
            })
        }

        fn load_summary(&mut self, _page: PageKind) -> Result<PageSummary> {
            Ok(PageSummary::default().count("total", 2))
        }

        fn form_dialog(&mut self, kind: EntityKind, id: Option<i64>) -> Result<FormDialog> {
            Ok(match id {
                Some(id) => FormDialog::edit(
                    kind,
                    id,
                    Patch::new()
                        .with("name", FieldValue::text("Acme"))
                        .with("email", FieldValue::text("ops@acme.test"))
                        .with("status", FieldValue::choice(ClientStatus::Active)),
                ),
                None => FormDialog::create(kind, Patch::new()),
            })
        }

        fn save_record(&mut self, kind: EntityKind, id: Option<i64>, patch: &Patch) -> Result<i64> {
            if self.fail_save {
                bail!("client 9 not found -- refresh the list and retry");
            }
            self.saved.push((kind, id, patch.clone()));
            Ok(id.unwrap_or(3))
        }

        fn remove_record(&mut self, kind: EntityKind, id: i64) -> Result<bool> {
            self.removed.push((kind, id));
            Ok(true)
        }

        fn record_label(&mut self, _kind: EntityKind, id: i64) -> Result<Option<String>> {
            Ok(Some(format!("record {id}")))
        }

        fn approve_leave(&mut self, id: LeaveRequestId) -> Result<()> {
            self.approved.push(id);
            Ok(())
        }

        fn reject_leave(&mut self, id: LeaveRequestId) -> Result<()> {
            self.rejected.push(id);
            Ok(())
        }

        fn load_permissions(&mut self) -> Result<Vec<RolePermission>> {
            Ok(vec![RolePermission {
                id: RolePermissionId::new(1),
                role: AccessRole::Editor,
                module: ModuleKind::Cms,
                can_view: true,
                can_create: false,
                can_edit: false,
                can_delete: false,
            }])
        }

        fn save_permissions(&mut self, changes: &[RolePermission]) -> Result<usize> {
            self.saved_permissions.extend_from_slice(changes);
            Ok(changes.len())
        }

        fn load_settings(&mut self) -> Result<Vec<SystemSetting>> {
            Ok(vec![SystemSetting {
                id: SettingId::new(1),
                key: "site_name".to_owned(),
                value: "JEVXO".to_owned(),
                category: SettingCategory::General,
            }])
        }

        fn save_settings(&mut self, changes: &[(SettingId, String)]) -> Result<usize> {
            self.saved_settings.extend_from_slice(changes);
            Ok(changes.len())
        }
    }

    fn internal_tx() -> mpsc::Sender<InternalEvent> {
        let (tx, _rx) = mpsc::channel();
        tx
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    struct Harness {
        state: AppState,
        runtime: TestRuntime,
        view_data: ViewData,
        tx: mpsc::Sender<InternalEvent>,
    }

    impl Harness {
        fn on(page: PageKind) -> Result<Self> {
            let state = AppState {
                active_page: page,
                ..AppState::default()
            };
            let mut runtime = TestRuntime::default();
            let mut view_data = ViewData::default();
            refresh_view_data(&state, &mut runtime, &mut view_data)?;
            Ok(Self {
                state,
                runtime,
                view_data,
                tx: internal_tx(),
            })
        }

        fn press(&mut self, event: KeyEvent) -> bool {
            handle_key_event(
                &mut self.state,
                &mut self.runtime,
                &mut self.view_data,
                &self.tx,
                event,
            )
        }

        fn type_text(&mut self, text: &str) {
            for ch in text.chars() {
                self.press(key(KeyCode::Char(ch)));
            }
        }

        fn status(&self) -> Option<&str> {
            self.state.status_line.as_deref()
        }
    }

    #[test]
    fn ctrl_q_quits() -> Result<()> {
        let mut harness = Harness::on(PageKind::Clients)?;
        assert!(harness.press(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL)));
        assert!(!harness.press(key(KeyCode::Char('q'))));
        Ok(())
    }

    #[test]
    fn tab_switches_page_and_resets_cursor() -> Result<()> {
        let mut harness = Harness::on(PageKind::Dashboard)?;
        harness.press(key(KeyCode::Char('j')));
        assert_eq!(harness.view_data.table.selected_row, 1);

        harness.press(key(KeyCode::Tab));
        assert_eq!(harness.state.active_page, PageKind::Clients);
        assert_eq!(harness.view_data.page, Some(PageKind::Clients));
        assert_eq!(harness.view_data.table.selected_row, 0);
        assert_eq!(harness.runtime.page_loads, 2);

        harness.press(key(KeyCode::BackTab));
        assert_eq!(harness.state.active_page, PageKind::Dashboard);
        Ok(())
    }

    #[test]
    fn bracket_keys_jump_between_panels() -> Result<()> {
        let mut harness = Harness::on(PageKind::Invoices)?;
        harness.press(key(KeyCode::Char(']')));
        assert_eq!(harness.state.active_page, PageKind::Staff);
        harness.press(key(KeyCode::Char('[')));
        assert_eq!(harness.state.active_page, PageKind::Dashboard);
        Ok(())
    }

    #[test]
    fn help_overlay_swallows_keys_until_closed() -> Result<()> {
        let mut harness = Harness::on(PageKind::Clients)?;
        harness.press(key(KeyCode::Char('?')));
        assert!(harness.view_data.help_visible);
        assert_eq!(status_text(&harness.state, &harness.view_data), "");

        harness.press(key(KeyCode::Char('j')));
        assert_eq!(harness.view_data.table.selected_row, 0);

        harness.press(key(KeyCode::Esc));
        assert!(!harness.view_data.help_visible);
        Ok(())
    }

    #[test]
    fn sort_cycles_and_clears() -> Result<()> {
        let mut harness = Harness::on(PageKind::Clients)?;

        harness.press(key(KeyCode::Char('s')));
        assert_eq!(harness.status(), Some("sort Name asc"));
        assert_eq!(selected_row_id(&harness.view_data), Some(1));

        harness.press(key(KeyCode::Char('s')));
        assert_eq!(harness.status(), Some("sort Name desc"));
        assert_eq!(selected_row_id(&harness.view_data), Some(1));
        assert_eq!(harness.view_data.table.selected_row, 1);

        harness.press(KeyEvent::new(KeyCode::Char('S'), KeyModifiers::SHIFT));
        assert_eq!(harness.status(), Some("sort cleared"));
        assert_eq!(harness.view_data.table.view.sort, None);
        assert_eq!(selected_row_id(&harness.view_data), Some(1));
        assert_eq!(harness.view_data.table.selected_row, 0);

        harness.press(key(KeyCode::Char('l')));
        harness.press(key(KeyCode::Char('s')));
        assert_eq!(harness.status(), Some("Email not sortable"));
        Ok(())
    }

    #[test]
    fn search_filters_rows_and_escape_clears() -> Result<()> {
        let mut harness = Harness::on(PageKind::Clients)?;

        harness.press(key(KeyCode::Char('/')));
        assert_eq!(harness.state.mode, AppMode::Search);
        harness.type_text("GLO");
        assert_eq!(visible_rows(&harness.view_data).len(), 1);

        harness.press(key(KeyCode::Enter));
        assert_eq!(harness.state.mode, AppMode::Nav);
        assert_eq!(harness.status(), Some("1 of 2 rows match"));
        assert_eq!(selected_row_id(&harness.view_data), Some(2));

        harness.press(key(KeyCode::Char('/')));
        assert_eq!(harness.view_data.search_input, "GLO");
        harness.press(key(KeyCode::Esc));
        assert_eq!(visible_rows(&harness.view_data).len(), 2);
        assert_eq!(harness.status(), Some("search cleared"));
        Ok(())
    }

    #[test]
    fn add_form_types_chooses_and_saves() -> Result<()> {
        let mut harness = Harness::on(PageKind::Clients)?;

        harness.press(key(KeyCode::Char('a')));
        assert_eq!(harness.state.mode, AppMode::Form(EntityKind::Client));
        assert_eq!(harness.status(), Some("field Name (1/4)"));

        harness.type_text("Acme");
        harness.press(key(KeyCode::Tab));
        harness.type_text("ops@acme.test");
        harness.press(key(KeyCode::Tab));
        harness.press(key(KeyCode::Tab));
        assert_eq!(harness.status(), Some("field Status (4/4)"));
        harness.press(key(KeyCode::Char('1')));
        assert_eq!(harness.status(), Some("Status: active"));

        harness.press(key(KeyCode::Enter));
        assert_eq!(harness.state.mode, AppMode::Nav);
        assert!(harness.view_data.form.is_none());
        assert_eq!(harness.status(), Some("client 3 added"));

        let (kind, id, patch) = &harness.runtime.saved[0];
        assert_eq!(*kind, EntityKind::Client);
        assert_eq!(*id, None);
        assert_eq!(patch.get("name"), Some(&FieldValue::text("Acme")));
        assert_eq!(patch.get("email"), Some(&FieldValue::text("ops@acme.test")));
        assert_eq!(patch.get("status"), Some(&FieldValue::choice(ClientStatus::Active)));
        Ok(())
    }

    #[test]
    fn invalid_form_stays_open() -> Result<()> {
        let mut harness = Harness::on(PageKind::Clients)?;
        harness.press(key(KeyCode::Char('a')));
        harness.press(key(KeyCode::Enter));

        assert_eq!(
            harness.status(),
            Some("form invalid: Name is required -- enter a value and retry")
        );
        assert_eq!(harness.state.mode, AppMode::Form(EntityKind::Client));
        assert!(harness.view_data.form.is_some());
        assert!(harness.runtime.saved.is_empty());

        harness.press(key(KeyCode::Esc));
        assert_eq!(harness.state.mode, AppMode::Nav);
        assert_eq!(harness.status(), Some("form cancelled"));
        Ok(())
    }

    #[test]
    fn option_fields_ignore_letters() -> Result<()> {
        let mut harness = Harness::on(PageKind::Clients)?;
        harness.press(key(KeyCode::Char('a')));
        harness.press(key(KeyCode::BackTab));
        assert_eq!(harness.status(), Some("field Status (4/4)"));

        harness.press(key(KeyCode::Char('x')));
        assert_eq!(harness.status(), Some("Status -- press 1-2 to choose"));
        harness.press(key(KeyCode::Char('7')));
        assert_eq!(
            harness.status(),
            Some("form invalid: Status has no option 7 -- pick a listed number and retry")
        );
        Ok(())
    }

    #[test]
    fn edit_failure_keeps_form_open() -> Result<()> {
        let mut harness = Harness::on(PageKind::Clients)?;
        harness.runtime.fail_save = true;

        harness.press(key(KeyCode::Char('e')));
        assert_eq!(harness.state.mode, AppMode::Form(EntityKind::Client));
        harness.press(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL));

        assert_eq!(
            harness.status(),
            Some("save failed: client 9 not found -- refresh the list and retry")
        );
        assert!(harness.view_data.form.is_some());
        Ok(())
    }

    #[test]
    fn edit_submits_with_row_id() -> Result<()> {
        let mut harness = Harness::on(PageKind::Clients)?;
        harness.press(key(KeyCode::Char('j')));
        harness.press(key(KeyCode::Enter));
        harness.press(key(KeyCode::Backspace));
        harness.press(key(KeyCode::Enter));

        let (_, id, patch) = &harness.runtime.saved[0];
        assert_eq!(*id, Some(2));
        assert_eq!(patch.get("name"), Some(&FieldValue::text("Acm")));
        assert_eq!(harness.status(), Some("client 2 updated"));
        Ok(())
    }

    #[test]
    fn delete_requires_confirmation() -> Result<()> {
        let mut harness = Harness::on(PageKind::Clients)?;

        harness.press(key(KeyCode::Char('d')));
        assert_eq!(harness.state.mode, AppMode::Confirm);
        assert_eq!(
            harness.view_data.confirm.prompt().as_deref(),
            Some("delete client \"record 1\"? this cannot be undone (y/n)")
        );
        harness.press(key(KeyCode::Char('n')));
        assert_eq!(harness.state.mode, AppMode::Nav);
        assert!(harness.runtime.removed.is_empty());

        harness.press(key(KeyCode::Char('d')));
        harness.press(key(KeyCode::Char('y')));
        assert_eq!(harness.state.mode, AppMode::Nav);
        assert_eq!(harness.runtime.removed, vec![(EntityKind::Client, 1)]);
        assert_eq!(harness.status(), Some("client 1 deleted"));
        Ok(())
    }

    #[test]
    fn leave_rows_are_approved_not_deleted() -> Result<()> {
        let mut harness = Harness::on(PageKind::Leaves)?;

        harness.press(key(KeyCode::Char('d')));
        assert_eq!(harness.state.mode, AppMode::Nav);
        assert_eq!(harness.status(), Some("leaves rows cannot be deleted"));

        harness.press(KeyEvent::new(KeyCode::Char('A'), KeyModifiers::SHIFT));
        assert_eq!(harness.runtime.approved, vec![LeaveRequestId::new(7)]);
        assert_eq!(harness.status(), Some("leave request 7 approved"));

        harness.press(KeyEvent::new(KeyCode::Char('R'), KeyModifiers::SHIFT));
        assert_eq!(harness.runtime.rejected, vec![LeaveRequestId::new(7)]);
        Ok(())
    }

    #[test]
    fn approve_outside_leaves_is_rejected() -> Result<()> {
        let mut harness = Harness::on(PageKind::Clients)?;
        harness.press(KeyEvent::new(KeyCode::Char('A'), KeyModifiers::SHIFT));
        assert!(harness.runtime.approved.is_empty());
        assert_eq!(
            harness.status(),
            Some("approve and reject apply to leave requests only")
        );
        Ok(())
    }

    #[test]
    fn permission_toggle_stages_until_saved() -> Result<()> {
        let mut harness = Harness::on(PageKind::Roles)?;

        harness.press(key(KeyCode::Char(' ')));
        assert_eq!(harness.status(), Some("move to a permission column to toggle"));

        harness.press(key(KeyCode::Char('l')));
        harness.press(key(KeyCode::Char('l')));
        harness.press(key(KeyCode::Char(' ')));
        assert_eq!(
            harness.status(),
            Some("Editor CMS view off (unsaved, w to save)")
        );
        assert!(harness.view_data.permissions.is_dirty());
        assert!(harness.runtime.saved_permissions.is_empty());

        harness.press(key(KeyCode::Char('w')));
        assert_eq!(harness.status(), Some("saved 1 permissions for Editor"));
        assert_eq!(harness.runtime.saved_permissions.len(), 1);
        assert!(!harness.runtime.saved_permissions[0].can_view);

        harness.press(key(KeyCode::Char('w')));
        assert_eq!(harness.status(), Some("no unsaved changes for Editor"));
        Ok(())
    }

    #[test]
    fn setting_edit_stages_until_saved() -> Result<()> {
        let mut harness = Harness::on(PageKind::Settings)?;

        harness.press(key(KeyCode::Char('e')));
        assert_eq!(
            harness.state.mode,
            AppMode::Form(EntityKind::SystemSetting)
        );
        for _ in 0.."JEVXO".len() {
            harness.press(key(KeyCode::Backspace));
        }
        harness.type_text("Acme Studio");
        harness.press(key(KeyCode::Enter));
        assert_eq!(harness.state.mode, AppMode::Nav);
        assert_eq!(harness.status(), Some("site_name staged (unsaved, w to save)"));
        assert!(harness.runtime.saved_settings.is_empty());

        harness.press(key(KeyCode::Char('w')));
        assert_eq!(
            harness.runtime.saved_settings,
            vec![(SettingId::new(1), "Acme Studio".to_owned())]
        );
        assert_eq!(harness.status(), Some("saved 1 General settings"));
        Ok(())
    }

    #[test]
    fn read_only_pages_refuse_forms() -> Result<()> {
        let mut harness = Harness::on(PageKind::Payroll)?;
        harness.press(key(KeyCode::Char('a')));
        assert_eq!(harness.status(), Some("payroll has no add form"));
        harness.press(key(KeyCode::Char('e')));
        assert_eq!(harness.status(), Some("payroll is read-only"));
        assert_eq!(harness.state.mode, AppMode::Nav);
        Ok(())
    }

    #[test]
    fn stale_clear_tokens_are_ignored() {
        let mut state = AppState::default();
        let mut view_data = ViewData::default();
        let (tx, rx) = mpsc::channel();

        emit_status(&mut state, &mut view_data, &tx, "saved");
        let stale = view_data.status_token - 1;
        tx.send(InternalEvent::ClearStatus { token: stale }).ok();
        process_internal_events(&mut state, &mut view_data, &rx);
        assert_eq!(state.status_line.as_deref(), Some("saved"));

        tx.send(InternalEvent::ClearStatus {
            token: view_data.status_token,
        })
        .ok();
        process_internal_events(&mut state, &mut view_data, &rx);
        assert_eq!(state.status_line, None);
    }

    #[test]
    fn status_text_shows_mode_status_and_hints() {
        let mut state = AppState::default();
        let view_data = ViewData::default();
        assert_eq!(
            status_text(&state, &view_data),
            "NAV | tab page | s sort | / search | ? help"
        );

        state.status_line = Some("saved".to_owned());
        state.mode = AppMode::Confirm;
        assert_eq!(
            status_text(&state, &view_data),
            "CONFIRM | saved | y delete | n cancel"
        );
    }

    #[test]
    fn centered_rect_stays_inside_area() {
        let area = Rect::new(0, 0, 100, 40);
        let popup = centered_rect(50, 50, area);
        assert_eq!(popup.width, 50);
        assert_eq!(popup.height, 20);
        assert_eq!(popup.x, 25);
    }
}
