// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Demo data loaded at startup unless the user asks for an empty store.

use anyhow::{Context, Result};
use jevxo_app::{
    AccessRole, Attendance, AttendanceId, AttendanceStatus, Banner, BannerId, BannerPosition,
    BlogCategory, BlogPost, BlogPostId, Branch, BranchId, CampaignStatus, Client, ClientId,
    ClientStatus, CmsPage, CmsPageId, Department, DepartmentId, Designation, DesignationId,
    EmailCampaign, EmailCampaignId, Invoice, InvoiceId, InvoiceStatus, LeaveRequest,
    LeaveRequestId, LeaveStatus, LeaveType, ModuleKind, PageStatus, Partner, PartnerId,
    PortfolioCategory, PortfolioItem, PortfolioItemId, PostStatus, Project, ProjectId,
    ProjectStatus, RolePermission, RolePermissionId, SettingCategory, SettingId, Staff, StaffId,
    StaffRole, StaffStatus, SystemSetting, Ticket, TicketId, TicketPriority, TicketStatus,
};
use time::macros::time;
use time::{Date, Duration};
use tracing::info;

use crate::Store;

const DEMO_BRANCHES: &[(&str, &str)] = &[
    ("Headquarters", "Lagos"),
    ("East Office", "Nairobi"),
    ("Remote Hub", "Remote"),
];

/// (name, branch)
const DEMO_DEPARTMENTS: &[(&str, i64)] = &[
    ("Engineering", 1),
    ("Design", 1),
    ("Sales", 2),
    ("Human Resources", 1),
];

/// (title, level, department)
const DEMO_DESIGNATIONS: &[(&str, i64, i64)] = &[
    ("Software Engineer", 2, 1),
    ("Lead Engineer", 4, 1),
    ("Product Designer", 2, 2),
    ("Account Executive", 2, 3),
    ("HR Generalist", 3, 4),
];

/// (role, module, view, create, edit, delete)
const DEMO_PERMISSIONS: &[(AccessRole, ModuleKind, bool, bool, bool, bool)] = &[
    (AccessRole::Admin, ModuleKind::Cms, true, true, true, true),
    (AccessRole::Admin, ModuleKind::Crm, true, true, true, true),
    (AccessRole::Admin, ModuleKind::Hrm, true, true, true, true),
    (AccessRole::Editor, ModuleKind::Cms, true, true, true, false),
    (AccessRole::Editor, ModuleKind::Crm, false, false, false, false),
    (AccessRole::Editor, ModuleKind::Hrm, false, false, false, false),
    (AccessRole::Manager, ModuleKind::Cms, true, false, false, false),
    (AccessRole::Manager, ModuleKind::Crm, true, true, true, false),
    (AccessRole::Manager, ModuleKind::Hrm, true, false, false, false),
    (AccessRole::Hr, ModuleKind::Cms, false, false, false, false),
    (AccessRole::Hr, ModuleKind::Crm, false, false, false, false),
    (AccessRole::Hr, ModuleKind::Hrm, true, true, true, false),
    (AccessRole::Partner, ModuleKind::Cms, false, false, false, false),
    (AccessRole::Partner, ModuleKind::Crm, true, false, false, false),
    (AccessRole::Partner, ModuleKind::Hrm, true, false, false, false),
    (AccessRole::Client, ModuleKind::Cms, false, false, false, false),
    (AccessRole::Client, ModuleKind::Crm, true, false, false, false),
    (AccessRole::Client, ModuleKind::Hrm, false, false, false, false),
];

const DEMO_SETTINGS: &[(&str, &str, SettingCategory)] = &[
    ("site_name", "JEVXO", SettingCategory::General),
    ("support_email", "support@jevxo.com", SettingCategory::General),
    ("timezone", "Africa/Lagos", SettingCategory::General),
    ("meta_title", "JEVXO | Digital Agency", SettingCategory::Seo),
    (
        "meta_description",
        "Websites, apps and brands built to grow.",
        SettingCategory::Seo,
    ),
    ("currency", "USD", SettingCategory::Payments),
    ("invoice_terms_days", "30", SettingCategory::Payments),
    ("ai_model", "default", SettingCategory::Ai),
    ("ai_enabled", "false", SettingCategory::Ai),
];

impl Store {
    /// Loads a small, internally consistent data set relative to
    /// [`Store::today`].
    pub fn seed_demo_data(&mut self) -> Result<()> {
        let today = self.today();

        let branches = self.branches.seed(DEMO_BRANCHES.iter().zip(1..).map(
            |(&(name, location), id)| Branch {
                id: BranchId::new(id),
                name: name.to_owned(),
                location: location.to_owned(),
                created_at: days_from(today, -400),
            },
        ))?;
        self.departments
            .seed(DEMO_DEPARTMENTS.iter().zip(1..).map(|(&(name, branch), id)| {
                Department {
                    id: DepartmentId::new(id),
                    name: name.to_owned(),
                    branch_id: BranchId::new(branch),
                    created_at: days_from(today, -380),
                }
            }))?;
        self.designations.seed(DEMO_DESIGNATIONS.iter().zip(1..).map(
            |(&(title, level, department), id)| Designation {
                id: DesignationId::new(id),
                title: title.to_owned(),
                level,
                department_id: DepartmentId::new(department),
            },
        ))?;

        let staff = self.staff.seed(demo_staff(today))?;
        self.partners.seed(demo_partners(today))?;
        self.refresh_partner_tenure();

        let clients = self.clients.seed(demo_clients(today))?;
        self.invoices.seed(demo_invoices(today))?;
        self.projects.seed(demo_projects(today))?;
        self.tickets.seed(demo_tickets(today))?;

        self.attendance.seed(demo_attendance(today))?;
        self.leaves.seed(demo_leaves(today))?;

        self.blog_posts.seed(demo_blog_posts(today))?;
        self.cms_pages.seed(demo_pages(today))?;
        self.portfolio.seed(demo_portfolio(today))?;
        self.banners.seed(demo_banners(today))?;
        self.campaigns.seed(demo_campaigns(today))?;

        self.permissions.seed(DEMO_PERMISSIONS.iter().zip(1..).map(
            |(&(role, module, can_view, can_create, can_edit, can_delete), id)| RolePermission {
                id: RolePermissionId::new(id),
                role,
                module,
                can_view,
                can_create,
                can_edit,
                can_delete,
            },
        ))?;
        self.settings
            .seed(DEMO_SETTINGS.iter().zip(1..).map(|(&(key, value, category), id)| {
                SystemSetting {
                    id: SettingId::new(id),
                    key: key.to_owned(),
                    value: value.to_owned(),
                    category,
                }
            }))
            .context("seed demo settings")?;

        info!(branches, staff, clients, "demo data seeded");
        Ok(())
    }
}

fn days_from(today: Date, offset: i64) -> Date {
    today.checked_add(Duration::days(offset)).unwrap_or(today)
}

fn demo_staff(today: Date) -> Vec<Staff> {
    let member = |id: i64,
                  jevxo_uuid: &str,
                  name: &str,
                  role: StaffRole,
                  (branch, department, designation): (i64, i64, i64),
                  salary_dollars: i64,
                  status: StaffStatus,
                  joined_days_ago: i64| Staff {
        id: StaffId::new(id),
        jevxo_uuid: jevxo_uuid.to_owned(),
        email: format!(
            "{}@jevxo.com",
            name.split_whitespace()
                .next()
                .unwrap_or(name)
                .to_ascii_lowercase()
        ),
        name: name.to_owned(),
        phone: format!("+234 801 555 {:04}", 1000 + id),
        role,
        branch_id: BranchId::new(branch),
        department_id: DepartmentId::new(department),
        designation_id: DesignationId::new(designation),
        base_salary_cents: salary_dollars * 100,
        status,
        joining_date: days_from(today, -joined_days_ago),
    };
    vec![
        member(1, "JVX-A7K2M9Q4", "Amara Okafor", StaffRole::Admin, (1, 1, 2), 9_500, StaffStatus::Active, 900),
        member(2, "JVX-B3N8P1R6", "Daniel Mensah", StaffRole::Manager, (1, 1, 1), 7_200, StaffStatus::Active, 540),
        member(3, "JVX-C5T0W2Y8", "Grace Wanjiru", StaffRole::Hr, (2, 4, 5), 5_800, StaffStatus::Active, 310),
        member(4, "JVX-D9F4H6J1", "Tunde Bakare", StaffRole::Manager, (1, 2, 3), 6_400, StaffStatus::OnLeave, 220),
        member(5, "JVX-E2G7L3V5", "Lina Haddad", StaffRole::Manager, (2, 3, 4), 5_100, StaffStatus::Active, 95),
        member(6, "JVX-F6Q1S8Z0", "Kofi Asante", StaffRole::Partner, (3, 1, 1), 4_000, StaffStatus::Active, 150),
    ]
}

fn demo_partners(today: Date) -> Vec<Partner> {
    let partner = |id: i64, name: &str, salary_dollars: i64, joined_days_ago: i64| Partner {
        id: PartnerId::new(id),
        jevxo_uuid: format!("JVX-PTR{id:04}"),
        name: name.to_owned(),
        email: format!(
            "{}@partners.jevxo.com",
            name.split_whitespace()
                .next()
                .unwrap_or(name)
                .to_ascii_lowercase()
        ),
        base_salary_cents: salary_dollars * 100,
        joining_date: days_from(today, -joined_days_ago),
        days_active: 0,
        payable_cents: 0,
        arrears_cents: 0,
        is_share_eligible: false,
    };
    vec![
        partner(1, "Kofi Asante", 5_000, 150),
        partner(2, "Zainab Bello", 8_000, 200),
        partner(3, "Marcus Reid", 3_500, 45),
    ]
}

fn demo_clients(today: Date) -> Vec<Client> {
    let client = |id: i64,
                  name: &str,
                  company: &str,
                  status: ClientStatus,
                  total_projects: i64,
                  revenue_dollars: i64| Client {
        id: ClientId::new(id),
        name: name.to_owned(),
        email: format!(
            "{}@{}.com",
            name.split_whitespace()
                .next()
                .unwrap_or(name)
                .to_ascii_lowercase(),
            company
                .split_whitespace()
                .next()
                .unwrap_or(company)
                .to_ascii_lowercase()
        ),
        company: company.to_owned(),
        status,
        total_projects,
        total_revenue_cents: revenue_dollars * 100,
        created_at: days_from(today, -(id * 37)),
    };
    vec![
        client(1, "Ngozi Eze", "Harbor Logistics", ClientStatus::Active, 3, 42_000),
        client(2, "Samuel Ortiz", "Brightline Health", ClientStatus::Active, 2, 27_500),
        client(3, "Priya Nair", "Nimbus Retail", ClientStatus::Active, 1, 12_800),
        client(4, "Oliver Grant", "Grant & Co", ClientStatus::Inactive, 1, 6_200),
        client(5, "Fatima Diallo", "Sahel Foods", ClientStatus::Active, 0, 0),
    ]
}

fn demo_invoices(today: Date) -> Vec<Invoice> {
    let year = today.year();
    let invoice = |id: i64,
                   client: i64,
                   amount_dollars: i64,
                   status: InvoiceStatus,
                   due_in_days: i64| Invoice {
        id: InvoiceId::new(id),
        invoice_number: format!("INV-{year}-{id:03}"),
        client_id: ClientId::new(client),
        amount_cents: amount_dollars * 100,
        status,
        due_date: days_from(today, due_in_days),
        created_at: days_from(today, due_in_days - 30),
    };
    vec![
        invoice(1, 1, 15_000, InvoiceStatus::Paid, -60),
        invoice(2, 1, 12_000, InvoiceStatus::Paid, -20),
        invoice(3, 2, 9_500, InvoiceStatus::Pending, 14),
        invoice(4, 3, 6_400, InvoiceStatus::Overdue, -5),
        invoice(5, 2, 18_000, InvoiceStatus::Paid, -45),
        invoice(6, 4, 3_100, InvoiceStatus::Pending, 21),
    ]
}

fn demo_projects(today: Date) -> Vec<Project> {
    let project = |id: i64,
                   name: &str,
                   client: i64,
                   status: ProjectStatus,
                   (tasks_completed, total_tasks): (i64, i64),
                   budget_dollars: i64,
                   deadline_in_days: i64| Project {
        id: ProjectId::new(id),
        name: name.to_owned(),
        client_id: ClientId::new(client),
        status,
        progress: if total_tasks == 0 {
            0
        } else {
            tasks_completed * 100 / total_tasks
        },
        budget_cents: budget_dollars * 100,
        deadline: days_from(today, deadline_in_days),
        tasks_completed,
        total_tasks,
    };
    vec![
        project(1, "Fleet tracking portal", 1, ProjectStatus::Active, (18, 30), 45_000, 60),
        project(2, "Patient booking app", 2, ProjectStatus::Active, (7, 24), 38_000, 90),
        project(3, "Storefront redesign", 3, ProjectStatus::Completed, (16, 16), 14_000, -10),
        project(4, "Brand refresh", 4, ProjectStatus::OnHold, (3, 12), 8_000, 30),
        project(5, "Warehouse dashboard", 1, ProjectStatus::Active, (2, 20), 22_000, 120),
    ]
}

fn demo_tickets(today: Date) -> Vec<Ticket> {
    let ticket = |id: i64,
                  title: &str,
                  description: &str,
                  client: i64,
                  status: TicketStatus,
                  priority: TicketPriority,
                  opened_days_ago: i64| Ticket {
        id: TicketId::new(id),
        title: title.to_owned(),
        description: description.to_owned(),
        client_id: ClientId::new(client),
        status,
        priority,
        created_at: days_from(today, -opened_days_ago),
        updated_at: days_from(today, -opened_days_ago / 2),
    };
    vec![
        ticket(1, "Login fails on Safari", "Users see a blank page after sign-in.", 2, TicketStatus::Open, TicketPriority::Urgent, 2),
        ticket(2, "Export invoices to CSV", "Finance wants a monthly export.", 1, TicketStatus::Pending, TicketPriority::Medium, 9),
        ticket(3, "Update hero imagery", "Swap the spring campaign photos.", 3, TicketStatus::Closed, TicketPriority::Low, 20),
        ticket(4, "Slow map rendering", "Route map takes 8s to load.", 1, TicketStatus::Open, TicketPriority::High, 4),
        ticket(5, "Add Swahili locale", "", 2, TicketStatus::Open, TicketPriority::Medium, 1),
    ]
}

fn demo_attendance(today: Date) -> Vec<Attendance> {
    let entry = |id: i64, staff: i64, days_ago: i64, status: AttendanceStatus| {
        let on_site = matches!(status, AttendanceStatus::Present | AttendanceStatus::Remote);
        Attendance {
            id: AttendanceId::new(id),
            staff_id: StaffId::new(staff),
            date: days_from(today, -days_ago),
            check_in: on_site.then_some(time!(09:00)),
            check_out: on_site.then_some(time!(17:30)),
            status,
            notes: String::new(),
        }
    };
    let mut records = vec![
        entry(1, 1, 0, AttendanceStatus::Present),
        entry(2, 2, 0, AttendanceStatus::Remote),
        entry(3, 3, 0, AttendanceStatus::Present),
        entry(4, 4, 0, AttendanceStatus::Absent),
        entry(5, 5, 0, AttendanceStatus::HalfDay),
        entry(6, 1, 1, AttendanceStatus::Present),
        entry(7, 2, 1, AttendanceStatus::Present),
    ];
    records[4].check_in = Some(time!(09:15));
    records[4].check_out = Some(time!(13:00));
    records[3].notes = "Approved leave".to_owned();
    records
}

fn demo_leaves(today: Date) -> Vec<LeaveRequest> {
    let leave = |id: i64,
                 staff: i64,
                 leave_type: LeaveType,
                 (start_in_days, length): (i64, i64),
                 reason: &str,
                 status: LeaveStatus| LeaveRequest {
        id: LeaveRequestId::new(id),
        staff_id: StaffId::new(staff),
        leave_type,
        start_date: days_from(today, start_in_days),
        end_date: days_from(today, start_in_days + length - 1),
        reason: reason.to_owned(),
        status,
        approved_by: (status == LeaveStatus::Approved).then_some(StaffId::new(1)),
        created_at: days_from(today, start_in_days - 14),
    };
    vec![
        leave(1, 4, LeaveType::Annual, (-3, 10), "Family travel", LeaveStatus::Approved),
        leave(2, 2, LeaveType::Sick, (5, 2), "Minor surgery", LeaveStatus::Pending),
        leave(3, 5, LeaveType::Personal, (12, 1), "Moving house", LeaveStatus::Pending),
        leave(4, 3, LeaveType::Unpaid, (-40, 5), "Extended break", LeaveStatus::Rejected),
    ]
}

fn demo_blog_posts(today: Date) -> Vec<BlogPost> {
    let post = |id: i64,
                title: &str,
                excerpt: &str,
                category: BlogCategory,
                status: PostStatus,
                author: &str| BlogPost {
        id: BlogPostId::new(id),
        title: title.to_owned(),
        slug: slugify(title),
        excerpt: excerpt.to_owned(),
        content: format!("{excerpt}\n\nFull article coming soon."),
        category,
        status,
        author: author.to_owned(),
        created_at: days_from(today, -(id * 12)),
        updated_at: days_from(today, -(id * 5)),
    };
    vec![
        post(1, "Why we ship weekly", "Small releases keep clients close.", BlogCategory::Business, PostStatus::Published, "Amara Okafor"),
        post(2, "Rust for agency backends", "Notes from our first Rust service.", BlogCategory::Technology, PostStatus::Published, "Daniel Mensah"),
        post(3, "Designing for slow networks", "Practical tips for low bandwidth.", BlogCategory::Tutorials, PostStatus::Draft, "Tunde Bakare"),
        post(4, "We opened in Nairobi", "Say hello to our East Office.", BlogCategory::News, PostStatus::Published, "Grace Wanjiru"),
    ]
}

fn demo_pages(today: Date) -> Vec<CmsPage> {
    let page = |id: i64, title: &str, status: PageStatus| CmsPage {
        id: CmsPageId::new(id),
        title: title.to_owned(),
        slug: slugify(title),
        content: format!("{title} page content."),
        status,
        author: "Amara Okafor".to_owned(),
        created_at: days_from(today, -300),
        updated_at: days_from(today, -(id * 9)),
    };
    vec![
        page(1, "About Us", PageStatus::Published),
        page(2, "Services", PageStatus::Published),
        page(3, "Careers", PageStatus::Draft),
        page(4, "Spring Offer 2024", PageStatus::Archived),
    ]
}

fn demo_portfolio(today: Date) -> Vec<PortfolioItem> {
    let item = |id: i64,
                title: &str,
                category: PortfolioCategory,
                client: &str,
                status: PostStatus| PortfolioItem {
        id: PortfolioItemId::new(id),
        title: title.to_owned(),
        description: format!("{title} for {client}."),
        category,
        client: client.to_owned(),
        status,
        created_at: days_from(today, -(id * 30)),
    };
    vec![
        item(1, "Harbor fleet portal", PortfolioCategory::WebDevelopment, "Harbor Logistics", PostStatus::Published),
        item(2, "Brightline patient app", PortfolioCategory::MobileDevelopment, "Brightline Health", PostStatus::Published),
        item(3, "Nimbus checkout flow", PortfolioCategory::UiUxDesign, "Nimbus Retail", PostStatus::Draft),
        item(4, "Sahel Foods identity", PortfolioCategory::Branding, "Sahel Foods", PostStatus::Published),
    ]
}

fn demo_banners(today: Date) -> Vec<Banner> {
    let banner = |id: i64,
                  title: &str,
                  subtitle: &str,
                  position: BannerPosition,
                  is_active: bool,
                  end_in_days: Option<i64>| Banner {
        id: BannerId::new(id),
        title: title.to_owned(),
        subtitle: subtitle.to_owned(),
        image_url: format!("/images/banners/{}.jpg", slugify(title)),
        link_url: "/contact".to_owned(),
        position,
        is_active,
        start_date: days_from(today, -30),
        end_date: end_in_days.map(|days| days_from(today, days)),
    };
    vec![
        banner(1, "Build something bold", "Web, mobile and brand in one team.", BannerPosition::Hero, true, None),
        banner(2, "Free discovery call", "Book 30 minutes with a lead.", BannerPosition::Sidebar, true, Some(45)),
        banner(3, "Holiday hours", "We close early on Fridays.", BannerPosition::Footer, false, Some(-2)),
    ]
}

fn demo_campaigns(today: Date) -> Vec<EmailCampaign> {
    let campaign = |id: i64,
                    name: &str,
                    subject: &str,
                    recipients: i64,
                    status: CampaignStatus,
                    rates: Option<(f64, f64)>| EmailCampaign {
        id: EmailCampaignId::new(id),
        name: name.to_owned(),
        subject: subject.to_owned(),
        content: format!("{subject}\n\nRead more on our blog."),
        recipients,
        status,
        open_rate: rates.map(|(open, _)| open),
        click_rate: rates.map(|(_, click)| click),
        created_at: days_from(today, -(id * 10)),
    };
    vec![
        campaign(1, "Quarterly newsletter", "What we shipped this quarter", 1_240, CampaignStatus::Sent, Some((42.5, 8.1))),
        campaign(2, "Nairobi launch", "We are now in Nairobi", 860, CampaignStatus::Scheduled, None),
        campaign(3, "Case study series", "How Harbor cut delivery times", 0, CampaignStatus::Draft, None),
    ]
}

fn slugify(title: &str) -> String {
    title
        .split(|ch: char| !ch.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::slugify;
    use crate::Store;
    use anyhow::Result;
    use jevxo_app::{PageKind, PartnerId, ProjectStatus};
    use time::macros::date;

    #[test]
    fn slugify_collapses_punctuation() {
        assert_eq!(slugify("Spring Offer 2024"), "spring-offer-2024");
        assert_eq!(slugify("Grant & Co"), "grant-co");
    }

    #[test]
    fn demo_data_is_consistent() -> Result<()> {
        let mut store = Store::new(date!(2025 - 06 - 01));
        store.seed_demo_data()?;

        for project in store.projects.iter() {
            assert!(store.clients.get(project.client_id).is_some());
            assert!(project.tasks_completed <= project.total_tasks);
        }
        let zainab = store.partners.get(PartnerId::new(2)).expect("seeded partner");
        assert!(zainab.is_share_eligible);
        assert_eq!(zainab.payable_cents, 240_000);
        let marcus = store.partners.get(PartnerId::new(3)).expect("seeded partner");
        assert!(!marcus.is_share_eligible);

        let dashboard = store.page_snapshot(PageKind::Dashboard);
        let active = store
            .projects
            .iter()
            .filter(|p| p.status == ProjectStatus::Active)
            .count();
        assert_eq!(dashboard.rows.len(), active);
        Ok(())
    }

    #[test]
    fn seeding_twice_is_rejected() -> Result<()> {
        let mut store = Store::new(date!(2025 - 06 - 01));
        store.seed_demo_data()?;
        assert!(store.seed_demo_data().is_err());
        Ok(())
    }
}
