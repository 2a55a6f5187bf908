// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::{AppMode, EntityKind, PageKind, Panel};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub mode: AppMode,
    pub active_page: PageKind,
    pub status_line: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            mode: AppMode::Nav,
            active_page: PageKind::Dashboard,
            status_line: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    NextPage,
    PrevPage,
    NextPanel,
    PrevPanel,
    SetActivePage(PageKind),
    OpenSearch,
    CloseSearch,
    OpenForm(EntityKind),
    CloseForm,
    OpenConfirm,
    CloseConfirm,
    SetStatus(String),
    ClearStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    ModeChanged(AppMode),
    PageChanged(PageKind),
    StatusUpdated(String),
    StatusCleared,
}

impl AppState {
    pub fn dispatch(&mut self, command: AppCommand) -> Vec<AppEvent> {
        match command {
            AppCommand::NextPage => self.rotate_page(1),
            AppCommand::PrevPage => self.rotate_page(-1),
            AppCommand::NextPanel => self.rotate_panel(1),
            AppCommand::PrevPanel => self.rotate_panel(-1),
            AppCommand::SetActivePage(page) => {
                if self.active_page == page {
                    return Vec::new();
                }
                self.active_page = page;
                vec![AppEvent::PageChanged(page)]
            }
            AppCommand::OpenSearch => self.set_mode(AppMode::Search),
            AppCommand::OpenForm(kind) => self.set_mode(AppMode::Form(kind)),
            AppCommand::OpenConfirm => self.set_mode(AppMode::Confirm),
            AppCommand::CloseSearch | AppCommand::CloseForm | AppCommand::CloseConfirm => {
                self.set_mode(AppMode::Nav)
            }
            AppCommand::SetStatus(message) => vec![self.set_status(&message)],
            AppCommand::ClearStatus => {
                self.status_line = None;
                vec![AppEvent::StatusCleared]
            }
        }
    }

    fn set_mode(&mut self, mode: AppMode) -> Vec<AppEvent> {
        self.mode = mode;
        vec![AppEvent::ModeChanged(mode)]
    }

    fn rotate_page(&mut self, delta: isize) -> Vec<AppEvent> {
        let pages = PageKind::ALL;
        let current = pages
            .iter()
            .position(|page| *page == self.active_page)
            .unwrap_or(0) as isize;
        let len = pages.len() as isize;
        let next = (current + delta).rem_euclid(len) as usize;
        self.active_page = pages[next];
        vec![AppEvent::PageChanged(self.active_page)]
    }

    /// Jumps to the first page of the neighbouring panel.
    fn rotate_panel(&mut self, delta: isize) -> Vec<AppEvent> {
        let panels = Panel::ALL;
        let current = panels
            .iter()
            .position(|panel| *panel == self.active_page.panel())
            .unwrap_or(0) as isize;
        let len = panels.len() as isize;
        let target = panels[(current + delta).rem_euclid(len) as usize];
        let Some(page) = PageKind::ALL
            .into_iter()
            .find(|page| page.panel() == target)
        else {
            return Vec::new();
        };
        self.active_page = page;
        vec![AppEvent::PageChanged(page)]
    }

    fn set_status(&mut self, message: &str) -> AppEvent {
        self.status_line = Some(message.to_owned());
        AppEvent::StatusUpdated(message.to_owned())
    }
}
