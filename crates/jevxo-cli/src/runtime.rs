// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;
use jevxo_app::{
    EntityKind, FormDialog, LeaveRequestId, PageKind, PageSnapshot, PageSummary, Patch,
    RolePermission, SettingId, SystemSetting,
};
use jevxo_store::Store;
use time::Date;

pub struct StoreRuntime<'a> {
    store: &'a mut Store,
}

impl<'a> StoreRuntime<'a> {
    pub fn new(store: &'a mut Store) -> Self {
        Self { store }
    }
}

impl jevxo_tui::AppRuntime for StoreRuntime<'_> {
    fn today(&self) -> Date {
        self.store.today()
    }

    fn load_page(&mut self, page: PageKind) -> Result<PageSnapshot> {
        Ok(self.store.page_snapshot(page))
    }

    fn load_summary(&mut self, page: PageKind) -> Result<PageSummary> {
        Ok(self.store.summary(page))
    }

    fn form_dialog(&mut self, kind: EntityKind, id: Option<i64>) -> Result<FormDialog> {
        self.store.form_dialog(kind, id)
    }

    fn save_record(&mut self, kind: EntityKind, id: Option<i64>, patch: &Patch) -> Result<i64> {
        self.store.save_entity(kind, id, patch)
    }

    fn remove_record(&mut self, kind: EntityKind, id: i64) -> Result<bool> {
        Ok(self.store.remove_entity(kind, id))
    }

    fn record_label(&mut self, kind: EntityKind, id: i64) -> Result<Option<String>> {
        Ok(self.store.reference_name(kind, id))
    }

    fn approve_leave(&mut self, id: LeaveRequestId) -> Result<()> {
        self.store.approve_leave(id)
    }

    fn reject_leave(&mut self, id: LeaveRequestId) -> Result<()> {
        self.store.reject_leave(id)
    }

    fn load_permissions(&mut self) -> Result<Vec<RolePermission>> {
        Ok(self.store.records::<RolePermission>().to_vec())
    }

    fn save_permissions(&mut self, changes: &[RolePermission]) -> Result<usize> {
        self.store.save_role_permissions(changes)
    }

    fn load_settings(&mut self) -> Result<Vec<SystemSetting>> {
        Ok(self.store.records::<SystemSetting>().to_vec())
    }

    fn save_settings(&mut self, changes: &[(SettingId, String)]) -> Result<usize> {
        self.store.save_settings(changes)
    }
}

#[cfg(test)]
mod tests {
    use super::StoreRuntime;
    use anyhow::Result;
    use jevxo_app::{EntityKind, LeaveRequest, LeaveStatus, PageKind, PermissionFlag, Record};
    use jevxo_store::Store;
    use jevxo_testkit::{AgencyFaker, fixture_date};
    use jevxo_tui::AppRuntime;

    fn demo_store() -> Result<Store> {
        let mut store = Store::new(fixture_date());
        store.seed_demo_data()?;
        Ok(store)
    }

    #[test]
    fn save_and_remove_flow_through_to_store() -> Result<()> {
        let mut store = Store::new(fixture_date());
        let mut faker = AgencyFaker::new(7);
        let patch = faker.client();

        let mut runtime = StoreRuntime::new(&mut store);
        let id = runtime.save_record(EntityKind::Client, None, &patch)?;
        let snapshot = runtime.load_page(PageKind::Clients)?;
        assert_eq!(snapshot.rows.len(), 1);
        assert_eq!(snapshot.rows[0].id, id);
        assert!(runtime.record_label(EntityKind::Client, id)?.is_some());

        assert!(runtime.remove_record(EntityKind::Client, id)?);
        assert!(!runtime.remove_record(EntityKind::Client, id)?);
        assert!(runtime.load_page(PageKind::Clients)?.rows.is_empty());
        Ok(())
    }

    #[test]
    fn form_dialog_for_missing_record_fails() -> Result<()> {
        let mut store = Store::new(fixture_date());
        let mut runtime = StoreRuntime::new(&mut store);
        let error = runtime
            .form_dialog(EntityKind::Invoice, Some(99))
            .expect_err("missing invoice should fail");
        assert!(error.to_string().contains("not found"));
        Ok(())
    }

    #[test]
    fn pending_leave_can_be_approved_once() -> Result<()> {
        let mut store = demo_store()?;
        let pending = store
            .records::<LeaveRequest>()
            .iter()
            .find(|leave| leave.status == LeaveStatus::Pending)
            .map(Record::id)
            .ok_or_else(|| anyhow::anyhow!("demo data has a pending leave"))?;

        let mut runtime = StoreRuntime::new(&mut store);
        runtime.approve_leave(pending)?;
        let error = runtime
            .reject_leave(pending)
            .expect_err("approved leave cannot be rejected");
        assert!(error.to_string().contains("only pending requests can change"));
        Ok(())
    }

    #[test]
    fn staged_permission_round_trips() -> Result<()> {
        let mut store = demo_store()?;
        let mut runtime = StoreRuntime::new(&mut store);

        let mut permissions = runtime.load_permissions()?;
        let first = permissions
            .first_mut()
            .ok_or_else(|| anyhow::anyhow!("demo data has permissions"))?;
        let before = first.flag(PermissionFlag::Delete);
        first.set_flag(PermissionFlag::Delete, !before);
        let changed = first.clone();

        assert_eq!(runtime.save_permissions(&[changed.clone()])?, 1);
        let reloaded = runtime.load_permissions()?;
        assert_eq!(reloaded.first(), Some(&changed));
        Ok(())
    }

    #[test]
    fn summaries_and_settings_load_for_demo_data() -> Result<()> {
        let mut store = demo_store()?;
        let mut runtime = StoreRuntime::new(&mut store);

        let summary = runtime.load_summary(PageKind::Dashboard)?;
        assert!(summary.get("active clients").is_some());

        let settings = runtime.load_settings()?;
        let site_name = settings
            .iter()
            .find(|setting| setting.key == "site_name")
            .ok_or_else(|| anyhow::anyhow!("demo data has site_name"))?;
        assert_eq!(
            runtime.save_settings(&[(site_name.id, "Acme Studio".to_owned())])?,
            1
        );
        let reloaded = runtime.load_settings()?;
        assert!(
            reloaded
                .iter()
                .any(|setting| setting.key == "site_name" && setting.value == "Acme Studio")
        );
        assert_eq!(runtime.today(), jevxo_testkit::fixture_date());
        Ok(())
    }
}
