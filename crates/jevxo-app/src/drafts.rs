// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Staged edits for role permissions and system settings. Changes stay
//! in the draft until saved per role or per category.

use std::collections::BTreeMap;

use anyhow::{Result, anyhow};

use crate::ids::{RolePermissionId, SettingId};
use crate::model::{AccessRole, PermissionFlag, RolePermission, SettingCategory, SystemSetting};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionDraft {
    baseline: Vec<RolePermission>,
    staged: Vec<RolePermission>,
}

impl PermissionDraft {
    pub fn new(permissions: Vec<RolePermission>) -> Self {
        Self {
            baseline: permissions.clone(),
            staged: permissions,
        }
    }

    pub fn rows(&self) -> &[RolePermission] {
        &self.staged
    }

    pub fn toggle(&mut self, id: RolePermissionId, flag: PermissionFlag) -> Result<bool> {
        let permission = self
            .staged
            .iter_mut()
            .find(|permission| permission.id == id)
            .ok_or_else(|| anyhow!("permission {id} not found -- reload roles and retry"))?;
        let next = !permission.flag(flag);
        permission.set_flag(flag, next);
        Ok(next)
    }

    fn baseline(&self, id: RolePermissionId) -> Option<&RolePermission> {
        self.baseline.iter().find(|permission| permission.id == id)
    }

    pub fn is_dirty(&self) -> bool {
        self.staged.iter().any(|permission| {
            self.baseline(permission.id)
                .is_none_or(|saved| !saved.same_flags(permission))
        })
    }

    /// Staged rows for `role` whose flags differ from the last save.
    pub fn changes_for_role(&self, role: AccessRole) -> Vec<RolePermission> {
        self.staged
            .iter()
            .filter(|permission| permission.role == role)
            .filter(|permission| {
                self.baseline(permission.id)
                    .is_none_or(|saved| !saved.same_flags(permission))
            })
            .cloned()
            .collect()
    }

    pub fn mark_saved(&mut self, role: AccessRole) {
        for permission in self.staged.iter().filter(|permission| permission.role == role) {
            if let Some(saved) = self
                .baseline
                .iter_mut()
                .find(|saved| saved.id == permission.id)
            {
                *saved = permission.clone();
            }
        }
    }

    /// Modules with view access per role, in role order.
    pub fn modules_per_role(&self) -> Vec<(AccessRole, usize)> {
        AccessRole::ALL
            .iter()
            .map(|role| {
                let count = self
                    .staged
                    .iter()
                    .filter(|permission| permission.role == *role && permission.can_view)
                    .count();
                (*role, count)
            })
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsDraft {
    settings: Vec<SystemSetting>,
    edits: BTreeMap<SettingId, String>,
}

impl SettingsDraft {
    pub fn new(settings: Vec<SystemSetting>) -> Self {
        Self {
            settings,
            edits: BTreeMap::new(),
        }
    }

    /// Settings with staged values applied.
    pub fn rows(&self) -> Vec<SystemSetting> {
        self.settings
            .iter()
            .map(|setting| {
                let mut row = setting.clone();
                if let Some(value) = self.edits.get(&setting.id) {
                    row.value = value.clone();
                }
                row
            })
            .collect()
    }

    pub fn value(&self, id: SettingId) -> Option<&str> {
        self.edits.get(&id).map(String::as_str).or_else(|| {
            self.settings
                .iter()
                .find(|setting| setting.id == id)
                .map(|setting| setting.value.as_str())
        })
    }

    pub fn edit(&mut self, id: SettingId, value: impl Into<String>) -> Result<()> {
        let setting = self
            .settings
            .iter()
            .find(|setting| setting.id == id)
            .ok_or_else(|| anyhow!("setting {id} not found -- reload settings and retry"))?;
        let value = value.into();
        if setting.value == value {
            self.edits.remove(&id);
        } else {
            self.edits.insert(id, value);
        }
        Ok(())
    }

    pub fn category_of(&self, id: SettingId) -> Option<SettingCategory> {
        self.settings
            .iter()
            .find(|setting| setting.id == id)
            .map(|setting| setting.category)
    }

    pub fn is_dirty(&self) -> bool {
        !self.edits.is_empty()
    }

    pub fn changes_for_category(&self, category: SettingCategory) -> Vec<(SettingId, String)> {
        self.settings
            .iter()
            .filter(|setting| setting.category == category)
            .filter_map(|setting| {
                self.edits
                    .get(&setting.id)
                    .map(|value| (setting.id, value.clone()))
            })
            .collect()
    }

    pub fn mark_saved(&mut self, category: SettingCategory) {
        for setting in self
            .settings
            .iter_mut()
            .filter(|setting| setting.category == category)
        {
            if let Some(value) = self.edits.remove(&setting.id) {
                setting.value = value;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{PermissionDraft, SettingsDraft};
    use crate::ids::{RolePermissionId, SettingId};
    use crate::model::{
        AccessRole, ModuleKind, PermissionFlag, RolePermission, SettingCategory, SystemSetting,
    };

    fn permission(id: i64, role: AccessRole, module: ModuleKind, view: bool) -> RolePermission {
        RolePermission {
            id: RolePermissionId::new(id),
            role,
            module,
            can_view: view,
            can_create: false,
            can_edit: false,
            can_delete: false,
        }
    }

    fn setting(id: i64, key: &str, value: &str, category: SettingCategory) -> SystemSetting {
        SystemSetting {
            id: SettingId::new(id),
            key: key.to_owned(),
            value: value.to_owned(),
            category,
        }
    }

    #[test]
    fn toggles_stay_staged_until_saved() -> anyhow::Result<()> {
        let mut draft = PermissionDraft::new(vec![
            permission(1, AccessRole::Editor, ModuleKind::Cms, true),
            permission(2, AccessRole::Editor, ModuleKind::Crm, false),
            permission(3, AccessRole::Hr, ModuleKind::Hrm, true),
        ]);
        assert!(!draft.is_dirty());

        assert!(draft.toggle(RolePermissionId::new(2), PermissionFlag::View)?);
        draft.toggle(RolePermissionId::new(3), PermissionFlag::Edit)?;
        assert!(draft.is_dirty());

        let editor = draft.changes_for_role(AccessRole::Editor);
        assert_eq!(editor.len(), 1);
        assert_eq!(editor[0].id, RolePermissionId::new(2));

        draft.mark_saved(AccessRole::Editor);
        assert!(draft.changes_for_role(AccessRole::Editor).is_empty());
        assert_eq!(draft.changes_for_role(AccessRole::Hr).len(), 1);
        Ok(())
    }

    #[test]
    fn toggling_back_clears_the_change() -> anyhow::Result<()> {
        let mut draft =
            PermissionDraft::new(vec![permission(1, AccessRole::Client, ModuleKind::Crm, false)]);
        draft.toggle(RolePermissionId::new(1), PermissionFlag::Delete)?;
        draft.toggle(RolePermissionId::new(1), PermissionFlag::Delete)?;
        assert!(!draft.is_dirty());
        assert!(draft.toggle(RolePermissionId::new(9), PermissionFlag::View).is_err());
        Ok(())
    }

    #[test]
    fn modules_per_role_counts_view_access() {
        let draft = PermissionDraft::new(vec![
            permission(1, AccessRole::Admin, ModuleKind::Cms, true),
            permission(2, AccessRole::Admin, ModuleKind::Crm, true),
            permission(3, AccessRole::Client, ModuleKind::Crm, false),
        ]);
        let counts = draft.modules_per_role();
        assert_eq!(counts[0], (AccessRole::Admin, 2));
        assert!(counts.contains(&(AccessRole::Client, 0)));
    }

    #[test]
    fn settings_save_per_category() -> anyhow::Result<()> {
        let mut draft = SettingsDraft::new(vec![
            setting(1, "site_name", "Jevxo", SettingCategory::General),
            setting(2, "meta_title", "Jevxo Admin", SettingCategory::Seo),
        ]);
        draft.edit(SettingId::new(1), "Jevxo HQ")?;
        draft.edit(SettingId::new(2), "Console")?;
        assert_eq!(draft.value(SettingId::new(1)), Some("Jevxo HQ"));

        let general = draft.changes_for_category(SettingCategory::General);
        assert_eq!(general, vec![(SettingId::new(1), "Jevxo HQ".to_owned())]);

        draft.mark_saved(SettingCategory::General);
        assert!(draft.changes_for_category(SettingCategory::General).is_empty());
        assert_eq!(draft.changes_for_category(SettingCategory::Seo).len(), 1);
        assert_eq!(draft.rows()[0].value, "Jevxo HQ");
        Ok(())
    }

    #[test]
    fn editing_back_to_saved_value_drops_the_edit() -> anyhow::Result<()> {
        let mut draft =
            SettingsDraft::new(vec![setting(1, "currency", "USD", SettingCategory::Payments)]);
        draft.edit(SettingId::new(1), "EUR")?;
        draft.edit(SettingId::new(1), "USD")?;
        assert!(!draft.is_dirty());
        Ok(())
    }
}
