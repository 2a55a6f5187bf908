// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};
use time::{Date, Time};

use crate::ids::*;

/// Closed value set backed by stable storage strings and human labels.
pub trait Choice: Copy + Sized + 'static {
    const OPTIONS: &'static [(&'static str, &'static str)];

    fn from_value(value: &str) -> Option<Self>;
    fn value(self) -> &'static str;
}

macro_rules! closed_set {
    ($name:ident { $($variant:ident => ($value:literal, $label:literal)),+ $(,)? }) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        pub enum $name {
            $(
                #[serde(rename = $value)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $value,)+
                }
            }

            pub const fn label(self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }

            pub fn parse(value: &str) -> Option<Self> {
                match value {
                    $($value => Some(Self::$variant),)+
                    _ => None,
                }
            }
        }

        impl Choice for $name {
            const OPTIONS: &'static [(&'static str, &'static str)] = &[$(($value, $label)),+];

            fn from_value(value: &str) -> Option<Self> {
                Self::parse(value)
            }

            fn value(self) -> &'static str {
                self.as_str()
            }
        }
    };
}

closed_set!(ClientStatus {
    Active => ("active", "Active"),
    Inactive => ("inactive", "Inactive"),
});

closed_set!(InvoiceStatus {
    Pending => ("pending", "Pending"),
    Paid => ("paid", "Paid"),
    Overdue => ("overdue", "Overdue"),
});

closed_set!(ProjectStatus {
    Active => ("active", "Active"),
    Completed => ("completed", "Completed"),
    OnHold => ("on-hold", "On Hold"),
    Cancelled => ("cancelled", "Cancelled"),
});

closed_set!(TicketStatus {
    Open => ("open", "Open"),
    Pending => ("pending", "Pending"),
    Closed => ("closed", "Closed"),
});

closed_set!(TicketPriority {
    Low => ("low", "Low"),
    Medium => ("medium", "Medium"),
    High => ("high", "High"),
    Urgent => ("urgent", "Urgent"),
});

closed_set!(StaffRole {
    Admin => ("admin", "Admin"),
    Manager => ("manager", "Manager"),
    Hr => ("hr", "HR"),
    Partner => ("partner", "Partner"),
});

closed_set!(StaffStatus {
    Active => ("active", "Active"),
    Inactive => ("inactive", "Inactive"),
    OnLeave => ("on-leave", "On Leave"),
});

closed_set!(PostStatus {
    Published => ("published", "Published"),
    Draft => ("draft", "Draft"),
});

closed_set!(PageStatus {
    Published => ("published", "Published"),
    Draft => ("draft", "Draft"),
    Archived => ("archived", "Archived"),
});

closed_set!(BlogCategory {
    News => ("News", "News"),
    Tutorials => ("Tutorials", "Tutorials"),
    Business => ("Business", "Business"),
    Technology => ("Technology", "Technology"),
});

closed_set!(PortfolioCategory {
    WebDevelopment => ("Web Development", "Web Development"),
    MobileDevelopment => ("Mobile Development", "Mobile Development"),
    UiUxDesign => ("UI/UX Design", "UI/UX Design"),
    Branding => ("Branding", "Branding"),
});

closed_set!(BannerPosition {
    Hero => ("hero", "Hero"),
    Sidebar => ("sidebar", "Sidebar"),
    Footer => ("footer", "Footer"),
});

closed_set!(CampaignStatus {
    Draft => ("draft", "Draft"),
    Scheduled => ("scheduled", "Scheduled"),
    Sent => ("sent", "Sent"),
});

closed_set!(AttendanceStatus {
    Present => ("present", "Present"),
    Absent => ("absent", "Absent"),
    HalfDay => ("half-day", "Half Day"),
    Remote => ("remote", "Remote"),
});

closed_set!(LeaveType {
    Annual => ("annual", "Annual"),
    Sick => ("sick", "Sick"),
    Personal => ("personal", "Personal"),
    Unpaid => ("unpaid", "Unpaid"),
});

closed_set!(LeaveStatus {
    Pending => ("pending", "Pending"),
    Approved => ("approved", "Approved"),
    Rejected => ("rejected", "Rejected"),
});

closed_set!(AccessRole {
    Admin => ("admin", "Admin"),
    Editor => ("editor", "Editor"),
    Manager => ("manager", "Manager"),
    Hr => ("hr", "HR"),
    Partner => ("partner", "Partner"),
    Client => ("client", "Client"),
});

closed_set!(ModuleKind {
    Cms => ("cms", "CMS"),
    Crm => ("crm", "CRM"),
    Hrm => ("hrm", "HRM"),
});

closed_set!(SettingCategory {
    General => ("general", "General"),
    Seo => ("seo", "SEO"),
    Payments => ("payments", "Payments"),
    Ai => ("ai", "AI"),
});

closed_set!(EntityKind {
    Client => ("client", "client"),
    Invoice => ("invoice", "invoice"),
    Project => ("project", "project"),
    Ticket => ("ticket", "ticket"),
    Staff => ("staff", "staff member"),
    Partner => ("partner", "partner"),
    BlogPost => ("blog_post", "blog post"),
    CmsPage => ("cms_page", "page"),
    PortfolioItem => ("portfolio_item", "portfolio item"),
    Banner => ("banner", "banner"),
    EmailCampaign => ("email_campaign", "campaign"),
    Branch => ("branch", "branch"),
    Department => ("department", "department"),
    Designation => ("designation", "designation"),
    Attendance => ("attendance", "attendance record"),
    LeaveRequest => ("leave_request", "leave request"),
    RolePermission => ("role_permission", "permission"),
    SystemSetting => ("system_setting", "setting"),
});

closed_set!(Panel {
    Crm => ("crm", "CRM"),
    Hrm => ("hrm", "HRM"),
    Admin => ("admin", "Admin"),
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PageKind {
    Dashboard,
    Clients,
    Invoices,
    Projects,
    Tickets,
    Staff,
    Partners,
    Payroll,
    Attendance,
    Leaves,
    Branches,
    Departments,
    Designations,
    Blog,
    Pages,
    Portfolio,
    Banners,
    Email,
    Roles,
    Settings,
}

impl PageKind {
    pub const ALL: [Self; 20] = [
        Self::Dashboard,
        Self::Clients,
        Self::Invoices,
        Self::Projects,
        Self::Tickets,
        Self::Staff,
        Self::Partners,
        Self::Payroll,
        Self::Attendance,
        Self::Leaves,
        Self::Branches,
        Self::Departments,
        Self::Designations,
        Self::Blog,
        Self::Pages,
        Self::Portfolio,
        Self::Banners,
        Self::Email,
        Self::Roles,
        Self::Settings,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Clients => "clients",
            Self::Invoices => "invoices",
            Self::Projects => "projects",
            Self::Tickets => "tickets",
            Self::Staff => "staff",
            Self::Partners => "partners",
            Self::Payroll => "payroll",
            Self::Attendance => "attendance",
            Self::Leaves => "leaves",
            Self::Branches => "branches",
            Self::Departments => "departments",
            Self::Designations => "designations",
            Self::Blog => "blog",
            Self::Pages => "pages",
            Self::Portfolio => "portfolio",
            Self::Banners => "banners",
            Self::Email => "email",
            Self::Roles => "roles",
            Self::Settings => "settings",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|page| page.label().eq_ignore_ascii_case(value.trim()))
    }

    pub const fn panel(self) -> Panel {
        match self {
            Self::Dashboard | Self::Clients | Self::Invoices | Self::Projects | Self::Tickets => {
                Panel::Crm
            }
            Self::Staff
            | Self::Partners
            | Self::Payroll
            | Self::Attendance
            | Self::Leaves
            | Self::Branches
            | Self::Departments
            | Self::Designations => Panel::Hrm,
            Self::Blog
            | Self::Pages
            | Self::Portfolio
            | Self::Banners
            | Self::Email
            | Self::Roles
            | Self::Settings => Panel::Admin,
        }
    }

    pub const fn entity(self) -> Option<EntityKind> {
        match self {
            Self::Dashboard | Self::Payroll => None,
            Self::Clients => Some(EntityKind::Client),
            Self::Invoices => Some(EntityKind::Invoice),
            Self::Projects => Some(EntityKind::Project),
            Self::Tickets => Some(EntityKind::Ticket),
            Self::Staff => Some(EntityKind::Staff),
            Self::Partners => Some(EntityKind::Partner),
            Self::Attendance => Some(EntityKind::Attendance),
            Self::Leaves => Some(EntityKind::LeaveRequest),
            Self::Branches => Some(EntityKind::Branch),
            Self::Departments => Some(EntityKind::Department),
            Self::Designations => Some(EntityKind::Designation),
            Self::Blog => Some(EntityKind::BlogPost),
            Self::Pages => Some(EntityKind::CmsPage),
            Self::Portfolio => Some(EntityKind::PortfolioItem),
            Self::Banners => Some(EntityKind::Banner),
            Self::Email => Some(EntityKind::EmailCampaign),
            Self::Roles => Some(EntityKind::RolePermission),
            Self::Settings => Some(EntityKind::SystemSetting),
        }
    }

    /// Pages whose rows come from an add/edit form.
    pub const fn has_form(self) -> bool {
        !matches!(
            self,
            Self::Dashboard | Self::Payroll | Self::Roles | Self::Settings
        )
    }

    pub const fn can_delete(self) -> bool {
        self.has_form() && !matches!(self, Self::Attendance | Self::Leaves)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppMode {
    Nav,
    Search,
    Form(EntityKind),
    Confirm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub const fn flip(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub id: ClientId,
    pub name: String,
    pub email: String,
    pub company: String,
    pub status: ClientStatus,
    pub total_projects: i64,
    pub total_revenue_cents: i64,
    pub created_at: Date,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: InvoiceId,
    pub invoice_number: String,
    pub client_id: ClientId,
    pub amount_cents: i64,
    pub status: InvoiceStatus,
    pub due_date: Date,
    pub created_at: Date,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub client_id: ClientId,
    pub status: ProjectStatus,
    pub progress: i64,
    pub budget_cents: i64,
    pub deadline: Date,
    pub tasks_completed: i64,
    pub total_tasks: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: TicketId,
    pub title: String,
    pub description: String,
    pub client_id: ClientId,
    pub status: TicketStatus,
    pub priority: TicketPriority,
    pub created_at: Date,
    pub updated_at: Date,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Staff {
    pub id: StaffId,
    pub jevxo_uuid: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: StaffRole,
    pub branch_id: BranchId,
    pub department_id: DepartmentId,
    pub designation_id: DesignationId,
    pub base_salary_cents: i64,
    pub status: StaffStatus,
    pub joining_date: Date,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partner {
    pub id: PartnerId,
    pub jevxo_uuid: String,
    pub name: String,
    pub email: String,
    pub base_salary_cents: i64,
    pub joining_date: Date,
    pub days_active: i64,
    pub payable_cents: i64,
    pub arrears_cents: i64,
    pub is_share_eligible: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogPost {
    pub id: BlogPostId,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    pub category: BlogCategory,
    pub status: PostStatus,
    pub author: String,
    pub created_at: Date,
    pub updated_at: Date,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CmsPage {
    pub id: CmsPageId,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub status: PageStatus,
    pub author: String,
    pub created_at: Date,
    pub updated_at: Date,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioItem {
    pub id: PortfolioItemId,
    pub title: String,
    pub description: String,
    pub category: PortfolioCategory,
    pub client: String,
    pub status: PostStatus,
    pub created_at: Date,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Banner {
    pub id: BannerId,
    pub title: String,
    pub subtitle: String,
    pub image_url: String,
    pub link_url: String,
    pub position: BannerPosition,
    pub is_active: bool,
    pub start_date: Date,
    pub end_date: Option<Date>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailCampaign {
    pub id: EmailCampaignId,
    pub name: String,
    pub subject: String,
    pub content: String,
    pub recipients: i64,
    pub status: CampaignStatus,
    pub open_rate: Option<f64>,
    pub click_rate: Option<f64>,
    pub created_at: Date,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branch {
    pub id: BranchId,
    pub name: String,
    pub location: String,
    pub created_at: Date,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub id: DepartmentId,
    pub name: String,
    pub branch_id: BranchId,
    pub created_at: Date,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Designation {
    pub id: DesignationId,
    pub title: String,
    pub level: i64,
    pub department_id: DepartmentId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attendance {
    pub id: AttendanceId,
    pub staff_id: StaffId,
    pub date: Date,
    pub check_in: Option<Time>,
    pub check_out: Option<Time>,
    pub status: AttendanceStatus,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveRequest {
    pub id: LeaveRequestId,
    pub staff_id: StaffId,
    pub leave_type: LeaveType,
    pub start_date: Date,
    pub end_date: Date,
    pub reason: String,
    pub status: LeaveStatus,
    pub approved_by: Option<StaffId>,
    pub created_at: Date,
}

impl LeaveRequest {
    /// Inclusive day count between start and end.
    pub fn duration_days(&self) -> i64 {
        (self.end_date - self.start_date).whole_days() + 1
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolePermission {
    pub id: RolePermissionId,
    pub role: AccessRole,
    pub module: ModuleKind,
    pub can_view: bool,
    pub can_create: bool,
    pub can_edit: bool,
    pub can_delete: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PermissionFlag {
    View,
    Create,
    Edit,
    Delete,
}

impl PermissionFlag {
    pub const ALL: [Self; 4] = [Self::View, Self::Create, Self::Edit, Self::Delete];

    pub const fn label(self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Create => "create",
            Self::Edit => "edit",
            Self::Delete => "delete",
        }
    }
}

impl RolePermission {
    pub const fn flag(&self, flag: PermissionFlag) -> bool {
        match flag {
            PermissionFlag::View => self.can_view,
            PermissionFlag::Create => self.can_create,
            PermissionFlag::Edit => self.can_edit,
            PermissionFlag::Delete => self.can_delete,
        }
    }

    pub fn set_flag(&mut self, flag: PermissionFlag, value: bool) {
        match flag {
            PermissionFlag::View => self.can_view = value,
            PermissionFlag::Create => self.can_create = value,
            PermissionFlag::Edit => self.can_edit = value,
            PermissionFlag::Delete => self.can_delete = value,
        }
    }

    pub fn same_flags(&self, other: &Self) -> bool {
        PermissionFlag::ALL
            .into_iter()
            .all(|flag| self.flag(flag) == other.flag(flag))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemSetting {
    pub id: SettingId,
    pub key: String,
    pub value: String,
    pub category: SettingCategory,
}

#[cfg(test)]
mod tests {
    use super::{Choice, EntityKind, PageKind, Panel, PortfolioCategory, ProjectStatus};

    #[test]
    fn closed_sets_round_trip_storage_values() {
        for status in ProjectStatus::ALL {
            assert_eq!(ProjectStatus::parse(status.as_str()), Some(*status));
        }
        assert_eq!(ProjectStatus::parse("On Hold"), None);
        assert_eq!(
            PortfolioCategory::from_value("UI/UX Design"),
            Some(PortfolioCategory::UiUxDesign)
        );
    }

    #[test]
    fn options_follow_declaration_order() {
        let values = ProjectStatus::OPTIONS
            .iter()
            .map(|(value, _)| *value)
            .collect::<Vec<_>>();
        assert_eq!(values, vec!["active", "completed", "on-hold", "cancelled"]);
    }

    #[test]
    fn every_page_belongs_to_one_panel() {
        let crm = PageKind::ALL
            .iter()
            .filter(|page| page.panel() == Panel::Crm)
            .count();
        let hrm = PageKind::ALL
            .iter()
            .filter(|page| page.panel() == Panel::Hrm)
            .count();
        let admin = PageKind::ALL
            .iter()
            .filter(|page| page.panel() == Panel::Admin)
            .count();
        assert_eq!(crm + hrm + admin, PageKind::ALL.len());
        assert_eq!(PageKind::Payroll.panel(), Panel::Hrm);
    }

    #[test]
    fn page_parse_accepts_labels_case_insensitively() {
        assert_eq!(PageKind::parse("Invoices"), Some(PageKind::Invoices));
        assert_eq!(PageKind::parse(" roles "), Some(PageKind::Roles));
        assert_eq!(PageKind::parse("shop"), None);
    }

    #[test]
    fn delete_is_unavailable_on_hr_logs_and_read_only_pages() {
        assert!(PageKind::Clients.can_delete());
        assert!(!PageKind::Attendance.can_delete());
        assert!(!PageKind::Leaves.can_delete());
        assert!(!PageKind::Payroll.can_delete());
        assert!(PageKind::Leaves.has_form());
        assert!(!PageKind::Roles.has_form());
        assert_eq!(PageKind::Roles.entity(), Some(EntityKind::RolePermission));
    }
}
