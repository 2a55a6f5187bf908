// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod fixtures;
pub mod record_store;
pub mod services;
mod summaries;

use anyhow::{Context, Result, anyhow, bail};
use jevxo_app::{
    AccessRole, Attendance, Banner, BlogPost, Branch, Client, CmsPage, ColumnSpec, Department,
    Designation, EmailCampaign, EntityId, EntityKind, FieldKind, FieldValue, FormDialog, Invoice,
    LeaveRequest, LeaveRequestId, LeaveStatus, PageKind, PageSnapshot, Partner, Patch,
    PayrollKind, PayrollReport, PortfolioItem, Project, ProjectStatus, Record, RolePermission,
    SettingId, Staff, StaffId, StaffRole, StaffStatus, SystemSetting, TableCell, TableRow, Ticket,
    record_rows, refresh_partner,
};
use time::Date;
use tracing::{debug, info};

pub use record_store::RecordStore;
pub use services::Entity;

pub const APP_NAME: &str = "jevxo";

const UUID_ALPHABET: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

const PAYROLL_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::sortable("jevxo_uuid", "JEVXO ID"),
    ColumnSpec::sortable("name", "Name"),
    ColumnSpec::sortable("kind", "Type"),
    ColumnSpec::sortable("gross", "Gross"),
    ColumnSpec::sortable("payable", "Payable"),
    ColumnSpec::sortable("arrears", "Arrears"),
    ColumnSpec::sortable("deductions", "Deductions"),
    ColumnSpec::sortable("net", "Net Pay"),
];

/// Dispatches on an [`EntityKind`], binding `$alias` to the record type.
macro_rules! with_entity {
    ($kind:expr, $alias:ident => $body:expr) => {
        match $kind {
            EntityKind::Client => {
                type $alias = Client;
                $body
            }
            EntityKind::Invoice => {
                type $alias = Invoice;
                $body
            }
            EntityKind::Project => {
                type $alias = Project;
                $body
            }
            EntityKind::Ticket => {
                type $alias = Ticket;
                $body
            }
            EntityKind::Staff => {
                type $alias = Staff;
                $body
            }
            EntityKind::Partner => {
                type $alias = Partner;
                $body
            }
            EntityKind::BlogPost => {
                type $alias = BlogPost;
                $body
            }
            EntityKind::CmsPage => {
                type $alias = CmsPage;
                $body
            }
            EntityKind::PortfolioItem => {
                type $alias = PortfolioItem;
                $body
            }
            EntityKind::Banner => {
                type $alias = Banner;
                $body
            }
            EntityKind::EmailCampaign => {
                type $alias = EmailCampaign;
                $body
            }
            EntityKind::Branch => {
                type $alias = Branch;
                $body
            }
            EntityKind::Department => {
                type $alias = Department;
                $body
            }
            EntityKind::Designation => {
                type $alias = Designation;
                $body
            }
            EntityKind::Attendance => {
                type $alias = Attendance;
                $body
            }
            EntityKind::LeaveRequest => {
                type $alias = LeaveRequest;
                $body
            }
            EntityKind::RolePermission => {
                type $alias = RolePermission;
                $body
            }
            EntityKind::SystemSetting => {
                type $alias = SystemSetting;
                $body
            }
        }
    };
}

/// Owns every collection for the lifetime of the process.
#[derive(Debug, Clone)]
pub struct Store {
    today: Date,
    uuid_state: u64,
    pub(crate) clients: RecordStore<Client>,
    pub(crate) invoices: RecordStore<Invoice>,
    pub(crate) projects: RecordStore<Project>,
    pub(crate) tickets: RecordStore<Ticket>,
    pub(crate) staff: RecordStore<Staff>,
    pub(crate) partners: RecordStore<Partner>,
    pub(crate) blog_posts: RecordStore<BlogPost>,
    pub(crate) cms_pages: RecordStore<CmsPage>,
    pub(crate) portfolio: RecordStore<PortfolioItem>,
    pub(crate) banners: RecordStore<Banner>,
    pub(crate) campaigns: RecordStore<EmailCampaign>,
    pub(crate) branches: RecordStore<Branch>,
    pub(crate) departments: RecordStore<Department>,
    pub(crate) designations: RecordStore<Designation>,
    pub(crate) attendance: RecordStore<Attendance>,
    pub(crate) leaves: RecordStore<LeaveRequest>,
    pub(crate) permissions: RecordStore<RolePermission>,
    pub(crate) settings: RecordStore<SystemSetting>,
}

impl Store {
    pub fn new(today: Date) -> Self {
        Self {
            today,
            uuid_state: u64::try_from(today.to_julian_day()).unwrap_or_default(),
            clients: RecordStore::new(),
            invoices: RecordStore::new(),
            projects: RecordStore::new(),
            tickets: RecordStore::new(),
            staff: RecordStore::new(),
            partners: RecordStore::new(),
            blog_posts: RecordStore::new(),
            cms_pages: RecordStore::new(),
            portfolio: RecordStore::new(),
            banners: RecordStore::new(),
            campaigns: RecordStore::new(),
            branches: RecordStore::new(),
            departments: RecordStore::new(),
            designations: RecordStore::new(),
            attendance: RecordStore::new(),
            leaves: RecordStore::new(),
            permissions: RecordStore::new(),
            settings: RecordStore::new(),
        }
    }

    pub fn today(&self) -> Date {
        self.today
    }

    /// Moves the clock and recomputes partner tenure against it.
    pub fn set_today(&mut self, today: Date) {
        self.today = today;
        self.refresh_partner_tenure();
    }

    pub fn refresh_partner_tenure(&mut self) {
        let today = self.today;
        for partner in self.partners.iter_mut() {
            refresh_partner(partner, today);
        }
    }

    pub fn records<T: Entity>(&self) -> &[T] {
        T::collection(self).list()
    }

    pub fn get<T: Entity>(&self, id: T::Id) -> Option<&T> {
        T::collection(self).get(id)
    }

    /// Creates (`id` is `None`) or updates a record through its service:
    /// patch merge, computed fields, cross-field checks, then persist.
    pub fn save<T: Entity>(&mut self, id: Option<T::Id>, patch: &Patch) -> Result<T::Id> {
        let existing = match id {
            Some(id) => Some(T::collection(self).get(id).cloned().ok_or_else(|| {
                anyhow!(
                    "{} {id} not found -- refresh the list and retry",
                    T::ENTITY.label()
                )
            })?),
            None => None,
        };

        let mut record = match &existing {
            Some(saved) => {
                let mut record = saved.clone();
                record
                    .merge(patch)
                    .with_context(|| format!("update {} {}", T::ENTITY.label(), saved.id()))?;
                record
            }
            None => T::collection(self).draft(patch, self.today)?,
        };
        record.finalize(self, existing.as_ref())?;

        let id = record.id();
        let collection = T::collection_mut(self);
        if existing.is_some() {
            collection.replace(record)?;
            debug!(entity = T::ENTITY.as_str(), %id, "record updated");
        } else {
            collection.insert(record)?;
            debug!(entity = T::ENTITY.as_str(), %id, "record created");
        }
        Ok(id)
    }

    pub fn remove<T: Entity>(&mut self, id: T::Id) -> Option<T> {
        let removed = T::collection_mut(self).remove(id);
        if removed.is_some() {
            debug!(entity = T::ENTITY.as_str(), %id, "record removed");
        }
        removed
    }

    pub fn save_entity(&mut self, kind: EntityKind, id: Option<i64>, patch: &Patch) -> Result<i64> {
        with_entity!(kind, T => self.save_raw::<T>(id, patch))
    }

    fn save_raw<T: Entity>(&mut self, id: Option<i64>, patch: &Patch) -> Result<i64> {
        self.save::<T>(id.map(T::Id::new), patch).map(|id| id.get())
    }

    /// Returns whether a record was removed.
    pub fn remove_entity(&mut self, kind: EntityKind, id: i64) -> bool {
        with_entity!(kind, T => self.remove_raw::<T>(id))
    }

    fn remove_raw<T: Entity>(&mut self, id: i64) -> bool {
        self.remove::<T>(T::Id::new(id)).is_some()
    }

    pub fn reference_name(&self, kind: EntityKind, id: i64) -> Option<String> {
        with_entity!(kind, T => self.label_of::<T>(id))
    }

    fn label_of<T: Entity>(&self, id: i64) -> Option<String> {
        self.get::<T>(T::Id::new(id)).map(Record::label)
    }

    /// `(id, name)` pairs for reference pickers.
    pub fn reference_options(&self, kind: EntityKind) -> Vec<(i64, String)> {
        with_entity!(kind, T => Self::options_of(self.records::<T>()))
    }

    fn options_of<T: Record>(records: &[T]) -> Vec<(i64, String)> {
        records
            .iter()
            .map(|record| (record.id().get(), record.label()))
            .collect()
    }

    /// Form values for a new record (`id` is `None`) or an existing one.
    pub fn form_values(&self, kind: EntityKind, id: Option<i64>) -> Result<Patch> {
        with_entity!(kind, T => self.values_of::<T>(id))
    }

    fn values_of<T: Entity>(&self, id: Option<i64>) -> Result<Patch> {
        match id {
            None => Ok(T::blank(T::collection(self).next_id(), self.today).values()),
            Some(raw) => self
                .get::<T>(T::Id::new(raw))
                .map(Record::values)
                .ok_or_else(|| {
                    anyhow!(
                        "{} {raw} not found -- refresh the list and retry",
                        T::ENTITY.label()
                    )
                }),
        }
    }

    /// Form dialog pre-filled for create or edit, with reference pickers
    /// populated from the current collections.
    pub fn form_dialog(&self, kind: EntityKind, id: Option<i64>) -> Result<FormDialog> {
        let values = self.form_values(kind, id)?;
        let mut form = match id {
            None => FormDialog::create(kind, values),
            Some(id) => FormDialog::edit(kind, id, values),
        };
        for spec in kind.fields() {
            if let FieldKind::Reference(target) = spec.kind {
                form = form.with_reference_options(spec.key, self.reference_options(target));
            }
        }
        Ok(form)
    }

    pub fn page_snapshot(&self, page: PageKind) -> PageSnapshot {
        match page {
            PageKind::Dashboard => self.snapshot_of(
                self.projects
                    .iter()
                    .filter(|project| project.status == ProjectStatus::Active),
            ),
            PageKind::Payroll => self.payroll_snapshot(),
            _ => match page.entity() {
                Some(kind) => with_entity!(kind, T => self.snapshot_of(self.records::<T>())),
                None => PageSnapshot::default(),
            },
        }
    }

    fn snapshot_of<'a, T: Record + 'a>(&self, records: impl IntoIterator<Item = &'a T>) -> PageSnapshot {
        PageSnapshot {
            columns: T::columns().to_vec(),
            rows: record_rows(records, |kind, id| self.reference_name(kind, id)),
        }
    }

    fn payroll_snapshot(&self) -> PageSnapshot {
        let report = self.payroll_report();
        let rows = report
            .lines
            .iter()
            .zip(1..)
            .map(|(line, id)| TableRow {
                id,
                cells: vec![
                    TableCell::new(FieldValue::text(&line.jevxo_uuid)),
                    TableCell::new(FieldValue::text(&line.name)),
                    TableCell::new(FieldValue::text(match line.kind {
                        PayrollKind::Partner => "partner",
                        PayrollKind::Staff => "staff",
                    })),
                    TableCell::new(FieldValue::Money(line.gross_cents)),
                    TableCell::new(FieldValue::Money(line.payable_cents)),
                    TableCell::new(FieldValue::Money(line.arrears_cents)),
                    TableCell::new(FieldValue::Money(line.deductions_cents)),
                    TableCell::new(FieldValue::Money(line.net_cents)),
                ],
            })
            .collect();
        PageSnapshot {
            columns: PAYROLL_COLUMNS.to_vec(),
            rows,
        }
    }

    pub fn payroll_report(&self) -> PayrollReport {
        PayrollReport::build(self.today, self.partners.iter(), self.staff.iter())
    }

    pub fn approve_leave(&mut self, id: LeaveRequestId) -> Result<()> {
        let approver = self.default_approver();
        let leave = self.pending_leave_mut(id)?;
        leave.status = LeaveStatus::Approved;
        leave.approved_by = approver;
        info!(%id, approver = ?approver, "leave approved");
        Ok(())
    }

    pub fn reject_leave(&mut self, id: LeaveRequestId) -> Result<()> {
        let leave = self.pending_leave_mut(id)?;
        leave.status = LeaveStatus::Rejected;
        info!(%id, "leave rejected");
        Ok(())
    }

    fn pending_leave_mut(&mut self, id: LeaveRequestId) -> Result<&mut LeaveRequest> {
        let leave = self
            .leaves
            .iter_mut()
            .find(|leave| leave.id == id)
            .ok_or_else(|| anyhow!("leave request {id} not found -- refresh the list and retry"))?;
        if leave.status != LeaveStatus::Pending {
            bail!(
                "leave request {id} is already {} -- only pending requests can change",
                leave.status.as_str()
            );
        }
        Ok(leave)
    }

    /// First active admin, used as the approver of leave requests.
    pub fn default_approver(&self) -> Option<StaffId> {
        self.staff
            .iter()
            .find(|member| member.role == StaffRole::Admin && member.status == StaffStatus::Active)
            .map(|member| member.id)
    }

    /// Writes staged permission rows; returns how many actually changed.
    pub fn save_role_permissions(&mut self, changes: &[RolePermission]) -> Result<usize> {
        let mut written = 0;
        for change in changes {
            let saved = self
                .permissions
                .iter_mut()
                .find(|permission| permission.id == change.id)
                .ok_or_else(|| {
                    anyhow!("permission {} not found -- reload roles and retry", change.id)
                })?;
            if saved.same_flags(change) {
                continue;
            }
            saved.can_view = change.can_view;
            saved.can_create = change.can_create;
            saved.can_edit = change.can_edit;
            saved.can_delete = change.can_delete;
            written += 1;
        }
        if written > 0 {
            info!(written, "role permissions saved");
        }
        Ok(written)
    }

    pub fn save_settings(&mut self, changes: &[(SettingId, String)]) -> Result<usize> {
        let mut written = 0;
        for (id, value) in changes {
            let setting = self
                .settings
                .iter_mut()
                .find(|setting| setting.id == *id)
                .ok_or_else(|| anyhow!("setting {id} not found -- reload settings and retry"))?;
            if setting.value == *value {
                continue;
            }
            setting.value = value.clone();
            written += 1;
        }
        if written > 0 {
            info!(written, "settings saved");
        }
        Ok(written)
    }

    pub fn permissions_for(&self, role: AccessRole) -> Vec<&RolePermission> {
        self.permissions
            .iter()
            .filter(|permission| permission.role == role)
            .collect()
    }

    /// `INV-<year>-<nnn>`, one past the highest number issued that year.
    pub(crate) fn next_invoice_number(&self, year: i32) -> String {
        let prefix = format!("INV-{year}-");
        let highest = self
            .invoices
            .iter()
            .filter_map(|invoice| invoice.invoice_number.strip_prefix(&prefix))
            .filter_map(|suffix| suffix.parse::<u32>().ok())
            .max()
            .unwrap_or(0);
        format!("{prefix}{:03}", highest + 1)
    }

    /// `JVX-PTR<nnnn>`, one past the highest partner number.
    pub(crate) fn next_partner_uuid(&self) -> String {
        let highest = self
            .partners
            .iter()
            .filter_map(|partner| partner.jevxo_uuid.strip_prefix("JVX-PTR"))
            .filter_map(|suffix| suffix.parse::<u32>().ok())
            .max()
            .unwrap_or(0);
        format!("JVX-PTR{:04}", highest + 1)
    }

    /// `JVX-` plus eight base-36 characters, unique among staff.
    pub(crate) fn next_staff_uuid(&mut self) -> String {
        loop {
            self.uuid_state = self.uuid_state.wrapping_add(0x9E37_79B9_7F4A_7C15);
            let mut mixed = self.uuid_state;
            mixed = (mixed ^ (mixed >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
            mixed = (mixed ^ (mixed >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
            mixed ^= mixed >> 31;

            let mut code = String::with_capacity(12);
            code.push_str("JVX-");
            for _ in 0..8 {
                code.push(char::from(UUID_ALPHABET[(mixed % 36) as usize]));
                mixed /= 36;
            }
            if !self.staff.iter().any(|member| member.jevxo_uuid == code) {
                return code;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Store;
    use time::macros::date;

    #[test]
    fn staff_uuids_have_expected_shape_and_differ() {
        let mut store = Store::new(date!(2025 - 06 - 01));
        let first = store.next_staff_uuid();
        let second = store.next_staff_uuid();
        assert_ne!(first, second);
        for code in [&first, &second] {
            assert_eq!(code.len(), 12);
            assert!(code.starts_with("JVX-"));
            assert!(
                code[4..]
                    .chars()
                    .all(|ch| ch.is_ascii_digit() || ch.is_ascii_uppercase())
            );
        }
    }

    #[test]
    fn invoice_numbers_continue_per_year() {
        let store = Store::new(date!(2025 - 06 - 01));
        assert_eq!(store.next_invoice_number(2025), "INV-2025-001");
    }
}
