// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::model::EntityKind;

/// Two-state gate in front of a delete.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ConfirmDialog {
    #[default]
    Closed,
    Open {
        entity: EntityKind,
        id: i64,
        label: String,
    },
}

impl ConfirmDialog {
    pub fn open(&mut self, entity: EntityKind, id: i64, label: impl Into<String>) {
        *self = Self::Open {
            entity,
            id,
            label: label.into(),
        };
    }

    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open { .. })
    }

    pub fn prompt(&self) -> Option<String> {
        match self {
            Self::Closed => None,
            Self::Open { entity, label, .. } => Some(format!(
                "delete {} {label:?}? this cannot be undone (y/n)",
                entity.label()
            )),
        }
    }

    /// Closes the dialog and hands back the target to delete.
    pub fn confirm(&mut self) -> Option<(EntityKind, i64)> {
        match std::mem::take(self) {
            Self::Closed => None,
            Self::Open { entity, id, .. } => Some((entity, id)),
        }
    }

    pub fn cancel(&mut self) {
        *self = Self::Closed;
    }
}

#[cfg(test)]
mod tests {
    use super::ConfirmDialog;
    use crate::model::EntityKind;

    #[test]
    fn confirm_returns_target_once() {
        let mut dialog = ConfirmDialog::default();
        assert_eq!(dialog.confirm(), None);

        dialog.open(EntityKind::Client, 4, "Acme");
        assert!(dialog.is_open());
        assert_eq!(
            dialog.prompt().as_deref(),
            Some("delete client \"Acme\"? this cannot be undone (y/n)")
        );
        assert_eq!(dialog.confirm(), Some((EntityKind::Client, 4)));
        assert!(!dialog.is_open());
        assert_eq!(dialog.confirm(), None);
    }

    #[test]
    fn cancel_discards_target() {
        let mut dialog = ConfirmDialog::default();
        dialog.open(EntityKind::Banner, 2, "Spring Sale");
        dialog.cancel();
        assert_eq!(dialog, ConfirmDialog::Closed);
        assert_eq!(dialog.confirm(), None);
    }
}
