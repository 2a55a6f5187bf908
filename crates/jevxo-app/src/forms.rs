// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::collections::BTreeMap;

use anyhow::{Context, Result, anyhow, bail};

use crate::model::EntityKind;
use crate::record::{FieldKind, FieldSpec, FieldValue, Patch};

static EMPTY: FieldValue = FieldValue::Empty;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(i64),
}

/// Field-driven add/edit dialog for one entity.
#[derive(Debug, Clone, PartialEq)]
pub struct FormDialog {
    pub entity: EntityKind,
    pub mode: FormMode,
    fields: &'static [FieldSpec],
    values: Patch,
    focus: usize,
    references: BTreeMap<&'static str, Vec<(i64, String)>>,
}

impl FormDialog {
    pub fn create(entity: EntityKind, defaults: Patch) -> Self {
        Self::with_values(entity, FormMode::Create, defaults)
    }

    pub fn edit(entity: EntityKind, id: i64, current: Patch) -> Self {
        Self::with_values(entity, FormMode::Edit(id), current)
    }

    fn with_values(entity: EntityKind, mode: FormMode, initial: Patch) -> Self {
        let fields = entity.fields();
        let values = fields.iter().fold(Patch::new(), |patch, spec| {
            let value = initial.get(spec.key).cloned().unwrap_or(FieldValue::Empty);
            patch.with(spec.key, value)
        });
        Self {
            entity,
            mode,
            fields,
            values,
            focus: 0,
            references: BTreeMap::new(),
        }
    }

    /// Registers the pickable records for a reference field.
    pub fn with_reference_options(mut self, key: &'static str, options: Vec<(i64, String)>) -> Self {
        self.references.insert(key, options);
        self
    }

    pub fn title(&self) -> String {
        match self.mode {
            FormMode::Create => format!("new {}", self.entity.label()),
            FormMode::Edit(_) => format!("edit {}", self.entity.label()),
        }
    }

    pub fn fields(&self) -> &'static [FieldSpec] {
        self.fields
    }

    pub fn value(&self, key: &str) -> &FieldValue {
        self.values.get(key).unwrap_or(&EMPTY)
    }

    /// Rendered value, resolving references to their option names.
    pub fn display_value(&self, spec: &FieldSpec) -> String {
        match (spec.kind, self.value(spec.key)) {
            (FieldKind::Reference(_), FieldValue::Reference(id)) => self
                .references
                .get(spec.key)
                .and_then(|options| options.iter().find(|(option, _)| option == id))
                .map_or_else(|| format!("#{id}"), |(_, name)| name.clone()),
            (_, value) => value.display(),
        }
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn focused(&self) -> Option<&'static FieldSpec> {
        self.fields.get(self.focus)
    }

    pub fn focus_next(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + 1) % self.fields.len();
        }
    }

    pub fn focus_prev(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
        }
    }

    fn spec(&self, key: &str) -> Result<&'static FieldSpec> {
        self.fields
            .iter()
            .find(|spec| spec.key == key)
            .ok_or_else(|| anyhow!("{} form has no field {key:?}", self.entity.label()))
    }

    /// Replaces one value after checking it against the field kind.
    /// The bag is unchanged on error.
    pub fn on_change(&mut self, key: &str, value: FieldValue) -> Result<()> {
        let spec = self.spec(key)?;
        value
            .check_kind(spec.kind)
            .with_context(|| format!("{} -- expected {}", spec.label, spec.kind.hint()))?;
        self.values.insert(spec.key, value);
        Ok(())
    }

    /// Parses typed text into the field kind, then applies it.
    pub fn on_change_raw(&mut self, key: &str, raw: &str) -> Result<()> {
        let spec = self.spec(key)?;
        let value = FieldValue::parse(spec.kind, raw)
            .with_context(|| format!("{} -- expected {}", spec.label, spec.kind.hint()))?;
        self.on_change(key, value)
    }

    /// Options offered for a field: closed-set values, registered
    /// references, or yes/no.
    pub fn options(&self, key: &str) -> Vec<(FieldValue, String)> {
        let Ok(spec) = self.spec(key) else {
            return Vec::new();
        };
        match spec.kind {
            FieldKind::Choice(options) => options
                .iter()
                .map(|(value, label)| (FieldValue::Choice(*value), (*label).to_owned()))
                .collect(),
            FieldKind::Reference(_) => self
                .references
                .get(spec.key)
                .map(|options| {
                    options
                        .iter()
                        .map(|(id, name)| (FieldValue::Reference(*id), name.clone()))
                        .collect()
                })
                .unwrap_or_default(),
            FieldKind::Bool => vec![
                (FieldValue::Bool(true), "yes".to_owned()),
                (FieldValue::Bool(false), "no".to_owned()),
            ],
            _ => Vec::new(),
        }
    }

    /// Picks the zero-based option for the focused field.
    pub fn choose_option(&mut self, index: usize) -> Result<()> {
        let Some(spec) = self.focused() else {
            bail!("form has no fields");
        };
        let options = self.options(spec.key);
        if options.is_empty() {
            bail!("{} takes typed input -- type a value instead", spec.label);
        }
        let Some((value, _)) = options.into_iter().nth(index) else {
            bail!(
                "{} has no option {} -- pick a listed number and retry",
                spec.label,
                index + 1
            );
        };
        self.on_change(spec.key, value)
    }

    /// Returns every field value, failing on the first empty required field.
    pub fn submit(&self) -> Result<Patch> {
        let mut patch = Patch::new();
        for spec in self.fields {
            let value = self.value(spec.key);
            if spec.required && value.is_empty() {
                bail!("{} is required -- enter a value and retry", spec.label);
            }
            patch.insert(spec.key, value.clone());
        }
        Ok(patch)
    }
}

#[cfg(test)]
mod tests {
    use super::{FormDialog, FormMode};
    use crate::model::{Choice, ClientStatus, EntityKind, LeaveType};
    use crate::record::{FieldValue, Patch};

    fn client_form() -> FormDialog {
        FormDialog::create(
            EntityKind::Client,
            Patch::new().with("status", FieldValue::choice(ClientStatus::Active)),
        )
    }

    #[test]
    fn submit_requires_required_fields() {
        let mut form = client_form();
        let err = form.submit().expect_err("name is required");
        assert_eq!(err.to_string(), "Name is required -- enter a value and retry");

        form.on_change("name", FieldValue::text("Acme")).expect("name");
        let err = form.submit().expect_err("email is required");
        assert!(err.to_string().starts_with("Email is required"));
    }

    #[test]
    fn submit_returns_values_for_every_field() -> anyhow::Result<()> {
        let mut form = client_form();
        form.on_change_raw("name", " Acme Corp ")?;
        form.on_change_raw("email", "ops@acme.test")?;
        let patch = form.submit()?;
        assert_eq!(patch.get("name"), Some(&FieldValue::text("Acme Corp")));
        assert_eq!(patch.get("company"), Some(&FieldValue::Empty));
        assert_eq!(patch.get("status"), Some(&FieldValue::Choice("active")));
        Ok(())
    }

    #[test]
    fn kind_mismatch_leaves_bag_unchanged() {
        let mut form = FormDialog::create(EntityKind::Invoice, Patch::new());
        form.on_change_raw("amount", "120.50").expect("amount");
        assert!(form.on_change("amount", FieldValue::text("lots")).is_err());
        assert!(form.on_change_raw("amount", "-5").is_err());
        assert_eq!(form.value("amount"), &FieldValue::Money(12_050));
    }

    #[test]
    fn unknown_key_is_an_error() {
        let mut form = client_form();
        let err = form
            .on_change("budget", FieldValue::Money(1))
            .expect_err("clients have no budget");
        assert!(err.to_string().contains("no field"));
    }

    #[test]
    fn choose_option_uses_focused_field() -> anyhow::Result<()> {
        let mut form = FormDialog::create(EntityKind::LeaveRequest, Patch::new())
            .with_reference_options("staff_id", vec![(4, "Ana".to_owned()), (9, "Bo".to_owned())]);
        form.choose_option(1)?;
        assert_eq!(form.value("staff_id"), &FieldValue::Reference(9));
        assert_eq!(
            form.display_value(form.focused().expect("focused field")),
            "Bo"
        );

        form.focus_next();
        form.choose_option(LeaveType::OPTIONS.len() - 1)?;
        assert_eq!(form.value("leave_type"), &FieldValue::Choice("unpaid"));
        assert!(form.choose_option(99).is_err());
        Ok(())
    }

    #[test]
    fn focus_wraps_in_both_directions() {
        let mut form = client_form();
        form.focus_prev();
        assert_eq!(form.focus(), form.fields().len() - 1);
        form.focus_next();
        assert_eq!(form.focus(), 0);
    }

    #[test]
    fn edit_mode_prefills_and_titles() {
        let form = FormDialog::edit(
            EntityKind::Client,
            3,
            Patch::new().with("name", FieldValue::text("Globex")),
        );
        assert_eq!(form.mode, FormMode::Edit(3));
        assert_eq!(form.title(), "edit client");
        assert_eq!(form.value("name"), &FieldValue::text("Globex"));
    }
}
