// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::collections::BTreeSet;

use jevxo_app::{
    AccessRole, AttendanceStatus, BannerPosition, CampaignStatus, ClientStatus, InvoiceStatus,
    LeaveStatus, PageKind, PageStatus, PageSummary, PostStatus, ProjectStatus, SettingCategory,
    StaffStatus, TicketPriority, TicketStatus,
};

use crate::Store;

impl Store {
    /// Aggregates shown in the summary line above each page's table.
    pub fn summary(&self, page: PageKind) -> PageSummary {
        let summary = PageSummary::default();
        match page {
            PageKind::Dashboard => summary
                .money(
                    "paid revenue",
                    self.invoices
                        .iter()
                        .filter(|invoice| invoice.status == InvoiceStatus::Paid)
                        .map(|invoice| invoice.amount_cents)
                        .sum(),
                )
                .count(
                    "active clients",
                    count(self.clients.iter(), |c| c.status == ClientStatus::Active),
                )
                .count(
                    "active projects",
                    count(self.projects.iter(), |p| p.status == ProjectStatus::Active),
                )
                .count(
                    "open tickets",
                    count(self.tickets.iter(), |t| t.status == TicketStatus::Open),
                ),
            PageKind::Clients => summary
                .count("total", self.clients.len())
                .count(
                    "active",
                    count(self.clients.iter(), |c| c.status == ClientStatus::Active),
                )
                .money(
                    "total revenue",
                    self.clients.iter().map(|c| c.total_revenue_cents).sum(),
                )
                .count(
                    "total projects",
                    self.clients
                        .iter()
                        .map(|c| usize::try_from(c.total_projects).unwrap_or(0))
                        .sum(),
                ),
            PageKind::Invoices => {
                let amount_where = |status: InvoiceStatus| -> i64 {
                    self.invoices
                        .iter()
                        .filter(|invoice| invoice.status == status)
                        .map(|invoice| invoice.amount_cents)
                        .sum()
                };
                summary
                    .money("paid", amount_where(InvoiceStatus::Paid))
                    .money("pending", amount_where(InvoiceStatus::Pending))
                    .money("overdue", amount_where(InvoiceStatus::Overdue))
                    .money(
                        "total",
                        self.invoices.iter().map(|invoice| invoice.amount_cents).sum(),
                    )
            }
            PageKind::Projects => summary
                .count(
                    "active",
                    count(self.projects.iter(), |p| p.status == ProjectStatus::Active),
                )
                .count(
                    "completed",
                    count(self.projects.iter(), |p| p.status == ProjectStatus::Completed),
                )
                .count(
                    "on hold",
                    count(self.projects.iter(), |p| p.status == ProjectStatus::OnHold),
                )
                .money(
                    "total budget",
                    self.projects.iter().map(|p| p.budget_cents).sum(),
                ),
            PageKind::Tickets => summary
                .count(
                    "open",
                    count(self.tickets.iter(), |t| t.status == TicketStatus::Open),
                )
                .count(
                    "pending",
                    count(self.tickets.iter(), |t| t.status == TicketStatus::Pending),
                )
                .count(
                    "closed",
                    count(self.tickets.iter(), |t| t.status == TicketStatus::Closed),
                )
                .count(
                    "urgent",
                    count(self.tickets.iter(), |t| t.priority == TicketPriority::Urgent),
                ),
            PageKind::Staff => summary
                .count("total", self.staff.len())
                .count(
                    "active",
                    count(self.staff.iter(), |s| s.status == StaffStatus::Active),
                )
                .count(
                    "on leave",
                    count(self.staff.iter(), |s| s.status == StaffStatus::OnLeave),
                )
                .count(
                    "branches",
                    self.staff
                        .iter()
                        .map(|s| s.branch_id)
                        .collect::<BTreeSet<_>>()
                        .len(),
                ),
            PageKind::Partners => summary
                .count("total", self.partners.len())
                .count(
                    "equity eligible",
                    count(self.partners.iter(), |p| p.is_share_eligible),
                )
                .money(
                    "total payable",
                    self.partners.iter().map(|p| p.payable_cents).sum(),
                )
                .money(
                    "total arrears",
                    self.partners.iter().map(|p| p.arrears_cents).sum(),
                ),
            PageKind::Payroll => {
                let totals = self.payroll_report().totals;
                summary
                    .money("total payable", totals.total_payable_cents)
                    .money("staff payroll", totals.staff_payroll_cents)
                    .money("partner payroll", totals.partner_payroll_cents)
                    .money("total arrears", totals.total_arrears_cents)
            }
            PageKind::Attendance => {
                let today = self.today();
                let todays = || self.attendance.iter().filter(move |a| a.date == today);
                summary
                    .count(
                        "present today",
                        count(todays(), |a| {
                            matches!(a.status, AttendanceStatus::Present | AttendanceStatus::Remote)
                        }),
                    )
                    .count(
                        "absent today",
                        count(todays(), |a| a.status == AttendanceStatus::Absent),
                    )
                    .count(
                        "remote today",
                        count(todays(), |a| a.status == AttendanceStatus::Remote),
                    )
            }
            PageKind::Leaves => summary
                .count(
                    "pending",
                    count(self.leaves.iter(), |l| l.status == LeaveStatus::Pending),
                )
                .count(
                    "approved",
                    count(self.leaves.iter(), |l| l.status == LeaveStatus::Approved),
                )
                .count(
                    "days requested",
                    self.leaves
                        .iter()
                        .map(|l| usize::try_from(l.duration_days()).unwrap_or(0))
                        .sum(),
                ),
            PageKind::Branches | PageKind::Departments | PageKind::Designations => summary
                .count("branches", self.branches.len())
                .count("departments", self.departments.len())
                .count("designations", self.designations.len()),
            PageKind::Blog => summary
                .count("total", self.blog_posts.len())
                .count(
                    "published",
                    count(self.blog_posts.iter(), |p| p.status == PostStatus::Published),
                )
                .count(
                    "drafts",
                    count(self.blog_posts.iter(), |p| p.status == PostStatus::Draft),
                ),
            PageKind::Pages => summary
                .count(
                    "published",
                    count(self.cms_pages.iter(), |p| p.status == PageStatus::Published),
                )
                .count(
                    "drafts",
                    count(self.cms_pages.iter(), |p| p.status == PageStatus::Draft),
                )
                .count(
                    "archived",
                    count(self.cms_pages.iter(), |p| p.status == PageStatus::Archived),
                ),
            PageKind::Portfolio => summary
                .count("total", self.portfolio.len())
                .count(
                    "published",
                    count(self.portfolio.iter(), |p| p.status == PostStatus::Published),
                ),
            PageKind::Banners => summary
                .count("total", self.banners.len())
                .count("active", count(self.banners.iter(), |b| b.is_active))
                .count(
                    "hero",
                    count(self.banners.iter(), |b| b.position == BannerPosition::Hero),
                ),
            PageKind::Email => summary
                .count("total", self.campaigns.len())
                .count(
                    "sent",
                    count(self.campaigns.iter(), |c| c.status == CampaignStatus::Sent),
                )
                .count(
                    "scheduled",
                    count(self.campaigns.iter(), |c| c.status == CampaignStatus::Scheduled),
                )
                .count(
                    "recipients",
                    self.campaigns
                        .iter()
                        .map(|c| usize::try_from(c.recipients).unwrap_or(0))
                        .sum(),
                ),
            PageKind::Roles => AccessRole::ALL.iter().fold(summary, |summary, role| {
                summary.count(
                    role.label(),
                    count(self.permissions.iter(), |p| p.role == *role && p.can_view),
                )
            }),
            PageKind::Settings => self.settings_summary(summary),
        }
    }

    fn settings_summary(&self, summary: PageSummary) -> PageSummary {
        SettingCategory::ALL.iter().fold(summary, |summary, category| {
            summary.count(
                category.label(),
                count(self.settings.iter(), |s| s.category == *category),
            )
        })
    }
}

fn count<'a, T: 'a>(items: impl Iterator<Item = &'a T>, predicate: impl Fn(&T) -> bool) -> usize {
    items.filter(|item| predicate(*item)).count()
}
