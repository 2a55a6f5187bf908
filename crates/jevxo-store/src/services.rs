// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Per-entity computed fields and cross-field checks applied on save.

use anyhow::{Result, bail};
use jevxo_app::{
    Attendance, Banner, BlogPost, Branch, Client, CmsPage, Department, Designation, EmailCampaign,
    Invoice, LeaveRequest, Partner, PortfolioItem, Project, Record, RolePermission, Staff,
    SystemSetting, Ticket, refresh_partner,
};

use crate::{RecordStore, Store};

/// A record type owned by [`Store`].
pub trait Entity: Record {
    fn collection(store: &Store) -> &RecordStore<Self>;
    fn collection_mut(store: &mut Store) -> &mut RecordStore<Self>;

    /// Fills computed fields and rejects invalid combinations before the
    /// record is persisted. `existing` is the saved version on edit.
    fn finalize(&mut self, _store: &mut Store, _existing: Option<&Self>) -> Result<()> {
        Ok(())
    }
}

macro_rules! entity_collection {
    ($field:ident) => {
        fn collection(store: &Store) -> &RecordStore<Self> {
            &store.$field
        }

        fn collection_mut(store: &mut Store) -> &mut RecordStore<Self> {
            &mut store.$field
        }
    };
}

impl Entity for Client {
    entity_collection!(clients);
}

impl Entity for Invoice {
    entity_collection!(invoices);

    fn finalize(&mut self, store: &mut Store, existing: Option<&Self>) -> Result<()> {
        if self.invoice_number.trim().is_empty() {
            self.invoice_number = match existing {
                Some(saved) if !saved.invoice_number.is_empty() => saved.invoice_number.clone(),
                _ => store.next_invoice_number(self.created_at.year()),
            };
        }
        Ok(())
    }
}

impl Entity for Project {
    entity_collection!(projects);

    fn finalize(&mut self, _store: &mut Store, _existing: Option<&Self>) -> Result<()> {
        if self.tasks_completed > self.total_tasks {
            bail!(
                "tasks completed ({}) exceeds total tasks ({}) -- raise the total and retry",
                self.tasks_completed,
                self.total_tasks
            );
        }
        Ok(())
    }
}

impl Entity for Ticket {
    entity_collection!(tickets);

    fn finalize(&mut self, store: &mut Store, _existing: Option<&Self>) -> Result<()> {
        self.updated_at = store.today();
        Ok(())
    }
}

impl Entity for Staff {
    entity_collection!(staff);

    fn finalize(&mut self, store: &mut Store, existing: Option<&Self>) -> Result<()> {
        match existing {
            Some(saved) if !saved.jevxo_uuid.is_empty() => {
                self.jevxo_uuid = saved.jevxo_uuid.clone();
            }
            _ if self.jevxo_uuid.is_empty() => self.jevxo_uuid = store.next_staff_uuid(),
            _ => {}
        }
        Ok(())
    }
}

impl Entity for Partner {
    entity_collection!(partners);

    fn finalize(&mut self, store: &mut Store, existing: Option<&Self>) -> Result<()> {
        match existing {
            Some(saved) if !saved.jevxo_uuid.is_empty() => {
                self.jevxo_uuid = saved.jevxo_uuid.clone();
            }
            _ if self.jevxo_uuid.is_empty() => self.jevxo_uuid = store.next_partner_uuid(),
            _ => {}
        }
        refresh_partner(self, store.today());
        Ok(())
    }
}

impl Entity for BlogPost {
    entity_collection!(blog_posts);

    fn finalize(&mut self, store: &mut Store, _existing: Option<&Self>) -> Result<()> {
        self.updated_at = store.today();
        Ok(())
    }
}

impl Entity for CmsPage {
    entity_collection!(cms_pages);

    fn finalize(&mut self, store: &mut Store, _existing: Option<&Self>) -> Result<()> {
        self.updated_at = store.today();
        Ok(())
    }
}

impl Entity for PortfolioItem {
    entity_collection!(portfolio);
}

impl Entity for Banner {
    entity_collection!(banners);

    fn finalize(&mut self, _store: &mut Store, _existing: Option<&Self>) -> Result<()> {
        if let Some(end_date) = self.end_date
            && end_date < self.start_date
        {
            bail!("banner end date must be on/after start date");
        }
        self.is_active = true;
        Ok(())
    }
}

impl Entity for EmailCampaign {
    entity_collection!(campaigns);
}

impl Entity for Branch {
    entity_collection!(branches);
}

impl Entity for Department {
    entity_collection!(departments);
}

impl Entity for Designation {
    entity_collection!(designations);
}

impl Entity for Attendance {
    entity_collection!(attendance);

    fn finalize(&mut self, _store: &mut Store, _existing: Option<&Self>) -> Result<()> {
        if let (Some(check_in), Some(check_out)) = (self.check_in, self.check_out)
            && check_out < check_in
        {
            bail!("check out must be on/after check in");
        }
        Ok(())
    }
}

impl Entity for LeaveRequest {
    entity_collection!(leaves);

    fn finalize(&mut self, _store: &mut Store, _existing: Option<&Self>) -> Result<()> {
        if self.end_date < self.start_date {
            bail!("leave end date must be on/after start date");
        }
        Ok(())
    }
}

impl Entity for RolePermission {
    entity_collection!(permissions);
}

impl Entity for SystemSetting {
    entity_collection!(settings);
}
