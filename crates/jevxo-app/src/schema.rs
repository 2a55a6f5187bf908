// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Field and column schemas plus `Record` impls for every entity.

use anyhow::{Result, anyhow};
use time::Date;

use crate::ids::*;
use crate::model::*;
use crate::payroll::days_until_eligible;
use crate::record::{ColumnSpec, FieldKind, FieldSpec, FieldValue, Record};

const LEVEL: FieldKind = FieldKind::Integer { min: 1, max: 5 };
const PROGRESS: FieldKind = FieldKind::Integer { min: 0, max: 100 };
const COUNT: FieldKind = FieldKind::Integer {
    min: 0,
    max: 1_000_000_000,
};

fn unknown_field(entity: EntityKind, key: &str) -> anyhow::Error {
    anyhow!("{} has no field {key:?}", entity.label())
}

fn reference_value<I: EntityId>(id: I) -> FieldValue {
    if id.get() > 0 {
        FieldValue::reference(id)
    } else {
        FieldValue::Empty
    }
}

fn count_or_zero(value: FieldValue, key: &str) -> Result<i64> {
    match value {
        FieldValue::Empty => Ok(0),
        other => other.into_integer(key),
    }
}

fn money_or_zero(value: FieldValue, key: &str) -> Result<i64> {
    match value {
        FieldValue::Empty => Ok(0),
        other => other.into_money(key),
    }
}

impl EntityKind {
    pub fn fields(self) -> &'static [FieldSpec] {
        match self {
            Self::Client => Client::fields(),
            Self::Invoice => Invoice::fields(),
            Self::Project => Project::fields(),
            Self::Ticket => Ticket::fields(),
            Self::Staff => Staff::fields(),
            Self::Partner => Partner::fields(),
            Self::BlogPost => BlogPost::fields(),
            Self::CmsPage => CmsPage::fields(),
            Self::PortfolioItem => PortfolioItem::fields(),
            Self::Banner => Banner::fields(),
            Self::EmailCampaign => EmailCampaign::fields(),
            Self::Branch => Branch::fields(),
            Self::Department => Department::fields(),
            Self::Designation => Designation::fields(),
            Self::Attendance => Attendance::fields(),
            Self::LeaveRequest => LeaveRequest::fields(),
            Self::RolePermission => RolePermission::fields(),
            Self::SystemSetting => SystemSetting::fields(),
        }
    }

    pub fn columns(self) -> &'static [ColumnSpec] {
        match self {
            Self::Client => Client::columns(),
            Self::Invoice => Invoice::columns(),
            Self::Project => Project::columns(),
            Self::Ticket => Ticket::columns(),
            Self::Staff => Staff::columns(),
            Self::Partner => Partner::columns(),
            Self::BlogPost => BlogPost::columns(),
            Self::CmsPage => CmsPage::columns(),
            Self::PortfolioItem => PortfolioItem::columns(),
            Self::Banner => Banner::columns(),
            Self::EmailCampaign => EmailCampaign::columns(),
            Self::Branch => Branch::columns(),
            Self::Department => Department::columns(),
            Self::Designation => Designation::columns(),
            Self::Attendance => Attendance::columns(),
            Self::LeaveRequest => LeaveRequest::columns(),
            Self::RolePermission => RolePermission::columns(),
            Self::SystemSetting => SystemSetting::columns(),
        }
    }
}

// ---------------------------------------------------------------------------
// CRM
// ---------------------------------------------------------------------------

const CLIENT_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("name", "Name", FieldKind::Text),
    FieldSpec::required("email", "Email", FieldKind::Text),
    FieldSpec::optional("company", "Company", FieldKind::Text),
    FieldSpec::required("status", "Status", FieldKind::Choice(ClientStatus::OPTIONS)),
];

const CLIENT_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::sortable("name", "Name"),
    ColumnSpec::plain("email", "Email"),
    ColumnSpec::plain("company", "Company"),
    ColumnSpec::sortable("status", "Status"),
    ColumnSpec::sortable("total_projects", "Projects"),
    ColumnSpec::sortable("total_revenue", "Revenue"),
];

impl Record for Client {
    type Id = ClientId;
    const ENTITY: EntityKind = EntityKind::Client;

    fn id(&self) -> ClientId {
        self.id
    }

    fn blank(id: ClientId, today: Date) -> Self {
        Self {
            id,
            name: String::new(),
            email: String::new(),
            company: String::new(),
            status: ClientStatus::Active,
            total_projects: 0,
            total_revenue_cents: 0,
            created_at: today,
        }
    }

    fn fields() -> &'static [FieldSpec] {
        CLIENT_FIELDS
    }

    fn columns() -> &'static [ColumnSpec] {
        CLIENT_COLUMNS
    }

    fn label(&self) -> String {
        self.name.clone()
    }

    fn value(&self, key: &str) -> FieldValue {
        match key {
            "name" => FieldValue::text(&self.name),
            "email" => FieldValue::text(&self.email),
            "company" => FieldValue::text(&self.company),
            "status" => FieldValue::choice(self.status),
            "total_projects" => FieldValue::Integer(self.total_projects),
            "total_revenue" => FieldValue::Money(self.total_revenue_cents),
            "created_at" => FieldValue::Date(self.created_at),
            _ => FieldValue::Empty,
        }
    }

    fn set(&mut self, key: &str, value: FieldValue) -> Result<()> {
        match key {
            "name" => self.name = value.into_text(key)?,
            "email" => self.email = value.into_text(key)?,
            "company" => self.company = value.into_text(key)?,
            "status" => self.status = value.into_choice(key)?,
            "total_projects" => self.total_projects = count_or_zero(value, key)?,
            "total_revenue" => self.total_revenue_cents = money_or_zero(value, key)?,
            _ => return Err(unknown_field(Self::ENTITY, key)),
        }
        Ok(())
    }
}

const INVOICE_FIELDS: &[FieldSpec] = &[
    FieldSpec::optional("invoice_number", "Invoice Number", FieldKind::Text),
    FieldSpec::required("client_id", "Client", FieldKind::Reference(EntityKind::Client)),
    FieldSpec::required("amount", "Amount ($)", FieldKind::Money),
    FieldSpec::required("status", "Status", FieldKind::Choice(InvoiceStatus::OPTIONS)),
    FieldSpec::required("due_date", "Due Date", FieldKind::Date),
];

const INVOICE_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::sortable("invoice_number", "Invoice #"),
    ColumnSpec::sortable("client_id", "Client"),
    ColumnSpec::sortable("amount", "Amount"),
    ColumnSpec::sortable("status", "Status"),
    ColumnSpec::sortable("due_date", "Due Date"),
    ColumnSpec::sortable("created_at", "Created"),
];

impl Record for Invoice {
    type Id = InvoiceId;
    const ENTITY: EntityKind = EntityKind::Invoice;

    fn id(&self) -> InvoiceId {
        self.id
    }

    fn blank(id: InvoiceId, today: Date) -> Self {
        Self {
            id,
            invoice_number: String::new(),
            client_id: ClientId::new(0),
            amount_cents: 0,
            status: InvoiceStatus::Pending,
            due_date: today,
            created_at: today,
        }
    }

    fn fields() -> &'static [FieldSpec] {
        INVOICE_FIELDS
    }

    fn columns() -> &'static [ColumnSpec] {
        INVOICE_COLUMNS
    }

    fn label(&self) -> String {
        self.invoice_number.clone()
    }

    fn value(&self, key: &str) -> FieldValue {
        match key {
            "invoice_number" => FieldValue::text(&self.invoice_number),
            "client_id" => reference_value(self.client_id),
            "amount" => FieldValue::Money(self.amount_cents),
            "status" => FieldValue::choice(self.status),
            "due_date" => FieldValue::Date(self.due_date),
            "created_at" => FieldValue::Date(self.created_at),
            _ => FieldValue::Empty,
        }
    }

    fn set(&mut self, key: &str, value: FieldValue) -> Result<()> {
        match key {
            "invoice_number" => self.invoice_number = value.into_text(key)?,
            "client_id" => self.client_id = value.into_reference(key)?,
            "amount" => self.amount_cents = value.into_money(key)?,
            "status" => self.status = value.into_choice(key)?,
            "due_date" => self.due_date = value.into_date(key)?,
            _ => return Err(unknown_field(Self::ENTITY, key)),
        }
        Ok(())
    }
}

const PROJECT_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("name", "Project Name", FieldKind::Text),
    FieldSpec::required("client_id", "Client", FieldKind::Reference(EntityKind::Client)),
    FieldSpec::required("status", "Status", FieldKind::Choice(ProjectStatus::OPTIONS)),
    FieldSpec::optional("progress", "Progress (%)", PROGRESS),
    FieldSpec::required("budget", "Budget ($)", FieldKind::Money),
    FieldSpec::required("deadline", "Deadline", FieldKind::Date),
    FieldSpec::optional("tasks_completed", "Tasks Completed", COUNT),
    FieldSpec::optional("total_tasks", "Total Tasks", COUNT),
];

const PROJECT_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::sortable("name", "Project"),
    ColumnSpec::sortable("client_id", "Client"),
    ColumnSpec::sortable("status", "Status"),
    ColumnSpec::sortable("progress", "Progress"),
    ColumnSpec::sortable("budget", "Budget"),
    ColumnSpec::sortable("deadline", "Deadline"),
    ColumnSpec::plain("tasks", "Tasks"),
];

impl Record for Project {
    type Id = ProjectId;
    const ENTITY: EntityKind = EntityKind::Project;

    fn id(&self) -> ProjectId {
        self.id
    }

    fn blank(id: ProjectId, today: Date) -> Self {
        Self {
            id,
            name: String::new(),
            client_id: ClientId::new(0),
            status: ProjectStatus::Active,
            progress: 0,
            budget_cents: 0,
            deadline: today,
            tasks_completed: 0,
            total_tasks: 0,
        }
    }

    fn fields() -> &'static [FieldSpec] {
        PROJECT_FIELDS
    }

    fn columns() -> &'static [ColumnSpec] {
        PROJECT_COLUMNS
    }

    fn label(&self) -> String {
        self.name.clone()
    }

    fn value(&self, key: &str) -> FieldValue {
        match key {
            "name" => FieldValue::text(&self.name),
            "client_id" => reference_value(self.client_id),
            "status" => FieldValue::choice(self.status),
            "progress" => FieldValue::Integer(self.progress),
            "budget" => FieldValue::Money(self.budget_cents),
            "deadline" => FieldValue::Date(self.deadline),
            "tasks_completed" => FieldValue::Integer(self.tasks_completed),
            "total_tasks" => FieldValue::Integer(self.total_tasks),
            "tasks" => FieldValue::Text(format!("{}/{}", self.tasks_completed, self.total_tasks)),
            _ => FieldValue::Empty,
        }
    }

    fn set(&mut self, key: &str, value: FieldValue) -> Result<()> {
        match key {
            "name" => self.name = value.into_text(key)?,
            "client_id" => self.client_id = value.into_reference(key)?,
            "status" => self.status = value.into_choice(key)?,
            "progress" => self.progress = count_or_zero(value, key)?,
            "budget" => self.budget_cents = value.into_money(key)?,
            "deadline" => self.deadline = value.into_date(key)?,
            "tasks_completed" => self.tasks_completed = count_or_zero(value, key)?,
            "total_tasks" => self.total_tasks = count_or_zero(value, key)?,
            _ => return Err(unknown_field(Self::ENTITY, key)),
        }
        Ok(())
    }
}

const TICKET_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("title", "Title", FieldKind::Text),
    FieldSpec::optional("description", "Description", FieldKind::Text),
    FieldSpec::required("client_id", "Client", FieldKind::Reference(EntityKind::Client)),
    FieldSpec::required("status", "Status", FieldKind::Choice(TicketStatus::OPTIONS)),
    FieldSpec::required("priority", "Priority", FieldKind::Choice(TicketPriority::OPTIONS)),
];

const TICKET_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::sortable("title", "Title"),
    ColumnSpec::sortable("client_id", "Client"),
    ColumnSpec::sortable("status", "Status"),
    ColumnSpec::sortable("priority", "Priority"),
    ColumnSpec::sortable("created_at", "Created"),
    ColumnSpec::sortable("updated_at", "Updated"),
];

impl Record for Ticket {
    type Id = TicketId;
    const ENTITY: EntityKind = EntityKind::Ticket;

    fn id(&self) -> TicketId {
        self.id
    }

    fn blank(id: TicketId, today: Date) -> Self {
        Self {
            id,
            title: String::new(),
            description: String::new(),
            client_id: ClientId::new(0),
            status: TicketStatus::Open,
            priority: TicketPriority::Medium,
            created_at: today,
            updated_at: today,
        }
    }

    fn fields() -> &'static [FieldSpec] {
        TICKET_FIELDS
    }

    fn columns() -> &'static [ColumnSpec] {
        TICKET_COLUMNS
    }

    fn label(&self) -> String {
        self.title.clone()
    }

    fn value(&self, key: &str) -> FieldValue {
        match key {
            "title" => FieldValue::text(&self.title),
            "description" => FieldValue::text(&self.description),
            "client_id" => reference_value(self.client_id),
            "status" => FieldValue::choice(self.status),
            "priority" => FieldValue::choice(self.priority),
            "created_at" => FieldValue::Date(self.created_at),
            "updated_at" => FieldValue::Date(self.updated_at),
            _ => FieldValue::Empty,
        }
    }

    fn set(&mut self, key: &str, value: FieldValue) -> Result<()> {
        match key {
            "title" => self.title = value.into_text(key)?,
            "description" => self.description = value.into_text(key)?,
            "client_id" => self.client_id = value.into_reference(key)?,
            "status" => self.status = value.into_choice(key)?,
            "priority" => self.priority = value.into_choice(key)?,
            _ => return Err(unknown_field(Self::ENTITY, key)),
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// HRM
// ---------------------------------------------------------------------------

const STAFF_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("name", "Full Name", FieldKind::Text),
    FieldSpec::required("email", "Email", FieldKind::Text),
    FieldSpec::required("phone", "Phone", FieldKind::Text),
    FieldSpec::required("role", "Role", FieldKind::Choice(StaffRole::OPTIONS)),
    FieldSpec::required("branch_id", "Branch", FieldKind::Reference(EntityKind::Branch)),
    FieldSpec::required(
        "department_id",
        "Department",
        FieldKind::Reference(EntityKind::Department),
    ),
    FieldSpec::required(
        "designation_id",
        "Designation",
        FieldKind::Reference(EntityKind::Designation),
    ),
    FieldSpec::required("base_salary", "Base Salary ($)", FieldKind::Money),
    FieldSpec::required("status", "Status", FieldKind::Choice(StaffStatus::OPTIONS)),
];

const STAFF_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::sortable("jevxo_uuid", "JEVXO ID"),
    ColumnSpec::sortable("name", "Name"),
    ColumnSpec::plain("email", "Email"),
    ColumnSpec::sortable("role", "Role"),
    ColumnSpec::sortable("branch_id", "Branch"),
    ColumnSpec::sortable("department_id", "Department"),
    ColumnSpec::sortable("status", "Status"),
    ColumnSpec::sortable("joining_date", "Joined"),
];

impl Record for Staff {
    type Id = StaffId;
    const ENTITY: EntityKind = EntityKind::Staff;

    fn id(&self) -> StaffId {
        self.id
    }

    fn blank(id: StaffId, today: Date) -> Self {
        Self {
            id,
            jevxo_uuid: String::new(),
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            role: StaffRole::Manager,
            branch_id: BranchId::new(0),
            department_id: DepartmentId::new(0),
            designation_id: DesignationId::new(0),
            base_salary_cents: 0,
            status: StaffStatus::Active,
            joining_date: today,
        }
    }

    fn fields() -> &'static [FieldSpec] {
        STAFF_FIELDS
    }

    fn columns() -> &'static [ColumnSpec] {
        STAFF_COLUMNS
    }

    fn label(&self) -> String {
        self.name.clone()
    }

    fn value(&self, key: &str) -> FieldValue {
        match key {
            "jevxo_uuid" => FieldValue::text(&self.jevxo_uuid),
            "name" => FieldValue::text(&self.name),
            "email" => FieldValue::text(&self.email),
            "phone" => FieldValue::text(&self.phone),
            "role" => FieldValue::choice(self.role),
            "branch_id" => reference_value(self.branch_id),
            "department_id" => reference_value(self.department_id),
            "designation_id" => reference_value(self.designation_id),
            "base_salary" => FieldValue::Money(self.base_salary_cents),
            "status" => FieldValue::choice(self.status),
            "joining_date" => FieldValue::Date(self.joining_date),
            _ => FieldValue::Empty,
        }
    }

    fn set(&mut self, key: &str, value: FieldValue) -> Result<()> {
        match key {
            "name" => self.name = value.into_text(key)?,
            "email" => self.email = value.into_text(key)?,
            "phone" => self.phone = value.into_text(key)?,
            "role" => self.role = value.into_choice(key)?,
            "branch_id" => self.branch_id = value.into_reference(key)?,
            "department_id" => self.department_id = value.into_reference(key)?,
            "designation_id" => self.designation_id = value.into_reference(key)?,
            "base_salary" => self.base_salary_cents = value.into_money(key)?,
            "status" => self.status = value.into_choice(key)?,
            _ => return Err(unknown_field(Self::ENTITY, key)),
        }
        Ok(())
    }
}

const PARTNER_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("name", "Full Name", FieldKind::Text),
    FieldSpec::required("email", "Email", FieldKind::Text),
    FieldSpec::required("base_salary", "Base Salary ($)", FieldKind::Money),
];

const PARTNER_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::sortable("jevxo_uuid", "JEVXO ID"),
    ColumnSpec::sortable("name", "Name"),
    ColumnSpec::plain("email", "Email"),
    ColumnSpec::sortable("joining_date", "Joined"),
    ColumnSpec::sortable("days_active", "Days Active"),
    ColumnSpec::sortable("base_salary", "Base Salary"),
    ColumnSpec::sortable("payable", "Payable (30%)"),
    ColumnSpec::sortable("arrears", "Arrears (70%)"),
    ColumnSpec::sortable("eligibility", "Equity Status"),
];

impl Partner {
    pub fn eligibility_label(&self) -> String {
        if self.is_share_eligible {
            "Eligible".to_owned()
        } else {
            format!("{} days left", days_until_eligible(self.days_active))
        }
    }
}

impl Record for Partner {
    type Id = PartnerId;
    const ENTITY: EntityKind = EntityKind::Partner;

    fn id(&self) -> PartnerId {
        self.id
    }

    fn blank(id: PartnerId, today: Date) -> Self {
        Self {
            id,
            jevxo_uuid: String::new(),
            name: String::new(),
            email: String::new(),
            base_salary_cents: 0,
            joining_date: today,
            days_active: 0,
            payable_cents: 0,
            arrears_cents: 0,
            is_share_eligible: false,
        }
    }

    fn fields() -> &'static [FieldSpec] {
        PARTNER_FIELDS
    }

    fn columns() -> &'static [ColumnSpec] {
        PARTNER_COLUMNS
    }

    fn label(&self) -> String {
        self.name.clone()
    }

    fn value(&self, key: &str) -> FieldValue {
        match key {
            "jevxo_uuid" => FieldValue::text(&self.jevxo_uuid),
            "name" => FieldValue::text(&self.name),
            "email" => FieldValue::text(&self.email),
            "base_salary" => FieldValue::Money(self.base_salary_cents),
            "joining_date" => FieldValue::Date(self.joining_date),
            "days_active" => FieldValue::Integer(self.days_active),
            "payable" => FieldValue::Money(self.payable_cents),
            "arrears" => FieldValue::Money(self.arrears_cents),
            "is_share_eligible" => FieldValue::Bool(self.is_share_eligible),
            "eligibility" => FieldValue::Text(self.eligibility_label()),
            _ => FieldValue::Empty,
        }
    }

    fn set(&mut self, key: &str, value: FieldValue) -> Result<()> {
        match key {
            "name" => self.name = value.into_text(key)?,
            "email" => self.email = value.into_text(key)?,
            "base_salary" => self.base_salary_cents = value.into_money(key)?,
            _ => return Err(unknown_field(Self::ENTITY, key)),
        }
        Ok(())
    }
}

const ATTENDANCE_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("staff_id", "Staff Member", FieldKind::Reference(EntityKind::Staff)),
    FieldSpec::required("date", "Date", FieldKind::Date),
    FieldSpec::optional("check_in", "Check In Time", FieldKind::Time),
    FieldSpec::optional("check_out", "Check Out Time", FieldKind::Time),
    FieldSpec::required("status", "Status", FieldKind::Choice(AttendanceStatus::OPTIONS)),
    FieldSpec::optional("notes", "Notes", FieldKind::Text),
];

const ATTENDANCE_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::sortable("staff_id", "Staff"),
    ColumnSpec::sortable("date", "Date"),
    ColumnSpec::plain("check_in", "Check In"),
    ColumnSpec::plain("check_out", "Check Out"),
    ColumnSpec::sortable("status", "Status"),
    ColumnSpec::plain("notes", "Notes"),
];

impl Record for Attendance {
    type Id = AttendanceId;
    const ENTITY: EntityKind = EntityKind::Attendance;

    fn id(&self) -> AttendanceId {
        self.id
    }

    fn blank(id: AttendanceId, today: Date) -> Self {
        Self {
            id,
            staff_id: StaffId::new(0),
            date: today,
            check_in: None,
            check_out: None,
            status: AttendanceStatus::Present,
            notes: String::new(),
        }
    }

    fn fields() -> &'static [FieldSpec] {
        ATTENDANCE_FIELDS
    }

    fn columns() -> &'static [ColumnSpec] {
        ATTENDANCE_COLUMNS
    }

    fn label(&self) -> String {
        format!("attendance on {}", self.date)
    }

    fn value(&self, key: &str) -> FieldValue {
        match key {
            "staff_id" => reference_value(self.staff_id),
            "date" => FieldValue::Date(self.date),
            "check_in" => FieldValue::optional_time(self.check_in),
            "check_out" => FieldValue::optional_time(self.check_out),
            "status" => FieldValue::choice(self.status),
            "notes" => FieldValue::text(&self.notes),
            _ => FieldValue::Empty,
        }
    }

    fn set(&mut self, key: &str, value: FieldValue) -> Result<()> {
        match key {
            "staff_id" => self.staff_id = value.into_reference(key)?,
            "date" => self.date = value.into_date(key)?,
            "check_in" => self.check_in = value.into_optional_time(key)?,
            "check_out" => self.check_out = value.into_optional_time(key)?,
            "status" => self.status = value.into_choice(key)?,
            "notes" => self.notes = value.into_text(key)?,
            _ => return Err(unknown_field(Self::ENTITY, key)),
        }
        Ok(())
    }
}

const LEAVE_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("staff_id", "Staff Member", FieldKind::Reference(EntityKind::Staff)),
    FieldSpec::required("leave_type", "Leave Type", FieldKind::Choice(LeaveType::OPTIONS)),
    FieldSpec::required("start_date", "Start Date", FieldKind::Date),
    FieldSpec::required("end_date", "End Date", FieldKind::Date),
    FieldSpec::required("reason", "Reason", FieldKind::Text),
];

const LEAVE_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::sortable("staff_id", "Staff"),
    ColumnSpec::sortable("leave_type", "Type"),
    ColumnSpec::sortable("start_date", "Start"),
    ColumnSpec::sortable("end_date", "End"),
    ColumnSpec::sortable("duration", "Days"),
    ColumnSpec::plain("reason", "Reason"),
    ColumnSpec::sortable("status", "Status"),
];

impl Record for LeaveRequest {
    type Id = LeaveRequestId;
    const ENTITY: EntityKind = EntityKind::LeaveRequest;

    fn id(&self) -> LeaveRequestId {
        self.id
    }

    fn blank(id: LeaveRequestId, today: Date) -> Self {
        Self {
            id,
            staff_id: StaffId::new(0),
            leave_type: LeaveType::Annual,
            start_date: today,
            end_date: today,
            reason: String::new(),
            status: LeaveStatus::Pending,
            approved_by: None,
            created_at: today,
        }
    }

    fn fields() -> &'static [FieldSpec] {
        LEAVE_FIELDS
    }

    fn columns() -> &'static [ColumnSpec] {
        LEAVE_COLUMNS
    }

    fn label(&self) -> String {
        format!(
            "{} leave {} to {}",
            self.leave_type.as_str(),
            self.start_date,
            self.end_date
        )
    }

    fn value(&self, key: &str) -> FieldValue {
        match key {
            "staff_id" => reference_value(self.staff_id),
            "leave_type" => FieldValue::choice(self.leave_type),
            "start_date" => FieldValue::Date(self.start_date),
            "end_date" => FieldValue::Date(self.end_date),
            "duration" => FieldValue::Integer(self.duration_days()),
            "reason" => FieldValue::text(&self.reason),
            "status" => FieldValue::choice(self.status),
            "approved_by" => FieldValue::optional_reference(self.approved_by),
            "created_at" => FieldValue::Date(self.created_at),
            _ => FieldValue::Empty,
        }
    }

    fn set(&mut self, key: &str, value: FieldValue) -> Result<()> {
        match key {
            "staff_id" => self.staff_id = value.into_reference(key)?,
            "leave_type" => self.leave_type = value.into_choice(key)?,
            "start_date" => self.start_date = value.into_date(key)?,
            "end_date" => self.end_date = value.into_date(key)?,
            "reason" => self.reason = value.into_text(key)?,
            _ => return Err(unknown_field(Self::ENTITY, key)),
        }
        Ok(())
    }
}

const BRANCH_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("name", "Branch Name", FieldKind::Text),
    FieldSpec::required("location", "Location", FieldKind::Text),
];

const BRANCH_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::sortable("name", "Name"),
    ColumnSpec::plain("location", "Location"),
    ColumnSpec::sortable("created_at", "Created"),
];

impl Record for Branch {
    type Id = BranchId;
    const ENTITY: EntityKind = EntityKind::Branch;

    fn id(&self) -> BranchId {
        self.id
    }

    fn blank(id: BranchId, today: Date) -> Self {
        Self {
            id,
            name: String::new(),
            location: String::new(),
            created_at: today,
        }
    }

    fn fields() -> &'static [FieldSpec] {
        BRANCH_FIELDS
    }

    fn columns() -> &'static [ColumnSpec] {
        BRANCH_COLUMNS
    }

    fn label(&self) -> String {
        self.name.clone()
    }

    fn value(&self, key: &str) -> FieldValue {
        match key {
            "name" => FieldValue::text(&self.name),
            "location" => FieldValue::text(&self.location),
            "created_at" => FieldValue::Date(self.created_at),
            _ => FieldValue::Empty,
        }
    }

    fn set(&mut self, key: &str, value: FieldValue) -> Result<()> {
        match key {
            "name" => self.name = value.into_text(key)?,
            "location" => self.location = value.into_text(key)?,
            _ => return Err(unknown_field(Self::ENTITY, key)),
        }
        Ok(())
    }
}

const DEPARTMENT_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("name", "Department Name", FieldKind::Text),
    FieldSpec::required("branch_id", "Branch", FieldKind::Reference(EntityKind::Branch)),
];

const DEPARTMENT_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::sortable("name", "Name"),
    ColumnSpec::sortable("branch_id", "Branch"),
    ColumnSpec::sortable("created_at", "Created"),
];

impl Record for Department {
    type Id = DepartmentId;
    const ENTITY: EntityKind = EntityKind::Department;

    fn id(&self) -> DepartmentId {
        self.id
    }

    fn blank(id: DepartmentId, today: Date) -> Self {
        Self {
            id,
            name: String::new(),
            branch_id: BranchId::new(0),
            created_at: today,
        }
    }

    fn fields() -> &'static [FieldSpec] {
        DEPARTMENT_FIELDS
    }

    fn columns() -> &'static [ColumnSpec] {
        DEPARTMENT_COLUMNS
    }

    fn label(&self) -> String {
        self.name.clone()
    }

    fn value(&self, key: &str) -> FieldValue {
        match key {
            "name" => FieldValue::text(&self.name),
            "branch_id" => reference_value(self.branch_id),
            "created_at" => FieldValue::Date(self.created_at),
            _ => FieldValue::Empty,
        }
    }

    fn set(&mut self, key: &str, value: FieldValue) -> Result<()> {
        match key {
            "name" => self.name = value.into_text(key)?,
            "branch_id" => self.branch_id = value.into_reference(key)?,
            _ => return Err(unknown_field(Self::ENTITY, key)),
        }
        Ok(())
    }
}

const DESIGNATION_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("title", "Title", FieldKind::Text),
    FieldSpec::required("level", "Level (1-5)", LEVEL),
    FieldSpec::required(
        "department_id",
        "Department",
        FieldKind::Reference(EntityKind::Department),
    ),
];

const DESIGNATION_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::sortable("title", "Title"),
    ColumnSpec::sortable("level", "Level"),
    ColumnSpec::sortable("department_id", "Department"),
];

impl Record for Designation {
    type Id = DesignationId;
    const ENTITY: EntityKind = EntityKind::Designation;

    fn id(&self) -> DesignationId {
        self.id
    }

    fn blank(id: DesignationId, _today: Date) -> Self {
        Self {
            id,
            title: String::new(),
            level: 1,
            department_id: DepartmentId::new(0),
        }
    }

    fn fields() -> &'static [FieldSpec] {
        DESIGNATION_FIELDS
    }

    fn columns() -> &'static [ColumnSpec] {
        DESIGNATION_COLUMNS
    }

    fn label(&self) -> String {
        self.title.clone()
    }

    fn value(&self, key: &str) -> FieldValue {
        match key {
            "title" => FieldValue::text(&self.title),
            "level" => FieldValue::Integer(self.level),
            "department_id" => reference_value(self.department_id),
            _ => FieldValue::Empty,
        }
    }

    fn set(&mut self, key: &str, value: FieldValue) -> Result<()> {
        match key {
            "title" => self.title = value.into_text(key)?,
            "level" => self.level = value.into_integer(key)?,
            "department_id" => self.department_id = value.into_reference(key)?,
            _ => return Err(unknown_field(Self::ENTITY, key)),
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Admin: CMS, marketing, access, settings
// ---------------------------------------------------------------------------

const BLOG_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("title", "Title", FieldKind::Text),
    FieldSpec::required("slug", "URL Slug", FieldKind::Text),
    FieldSpec::required("excerpt", "Excerpt", FieldKind::Text),
    FieldSpec::required("content", "Content", FieldKind::Text),
    FieldSpec::required("category", "Category", FieldKind::Choice(BlogCategory::OPTIONS)),
    FieldSpec::required("status", "Status", FieldKind::Choice(PostStatus::OPTIONS)),
    FieldSpec::required("author", "Author", FieldKind::Text),
];

const BLOG_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::sortable("title", "Title"),
    ColumnSpec::sortable("category", "Category"),
    ColumnSpec::sortable("status", "Status"),
    ColumnSpec::plain("author", "Author"),
    ColumnSpec::sortable("created_at", "Created"),
    ColumnSpec::sortable("updated_at", "Updated"),
];

impl Record for BlogPost {
    type Id = BlogPostId;
    const ENTITY: EntityKind = EntityKind::BlogPost;

    fn id(&self) -> BlogPostId {
        self.id
    }

    fn blank(id: BlogPostId, today: Date) -> Self {
        Self {
            id,
            title: String::new(),
            slug: String::new(),
            excerpt: String::new(),
            content: String::new(),
            category: BlogCategory::News,
            status: PostStatus::Draft,
            author: String::new(),
            created_at: today,
            updated_at: today,
        }
    }

    fn fields() -> &'static [FieldSpec] {
        BLOG_FIELDS
    }

    fn columns() -> &'static [ColumnSpec] {
        BLOG_COLUMNS
    }

    fn label(&self) -> String {
        self.title.clone()
    }

    fn value(&self, key: &str) -> FieldValue {
        match key {
            "title" => FieldValue::text(&self.title),
            "slug" => FieldValue::text(&self.slug),
            "excerpt" => FieldValue::text(&self.excerpt),
            "content" => FieldValue::text(&self.content),
            "category" => FieldValue::choice(self.category),
            "status" => FieldValue::choice(self.status),
            "author" => FieldValue::text(&self.author),
            "created_at" => FieldValue::Date(self.created_at),
            "updated_at" => FieldValue::Date(self.updated_at),
            _ => FieldValue::Empty,
        }
    }

    fn set(&mut self, key: &str, value: FieldValue) -> Result<()> {
        match key {
            "title" => self.title = value.into_text(key)?,
            "slug" => self.slug = value.into_text(key)?,
            "excerpt" => self.excerpt = value.into_text(key)?,
            "content" => self.content = value.into_text(key)?,
            "category" => self.category = value.into_choice(key)?,
            "status" => self.status = value.into_choice(key)?,
            "author" => self.author = value.into_text(key)?,
            _ => return Err(unknown_field(Self::ENTITY, key)),
        }
        Ok(())
    }
}

const PAGE_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("title", "Page Title", FieldKind::Text),
    FieldSpec::required("slug", "URL Slug", FieldKind::Text),
    FieldSpec::required("content", "Content", FieldKind::Text),
    FieldSpec::required("status", "Status", FieldKind::Choice(PageStatus::OPTIONS)),
    FieldSpec::required("author", "Author", FieldKind::Text),
];

const PAGE_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::sortable("title", "Title"),
    ColumnSpec::plain("path", "Slug"),
    ColumnSpec::sortable("status", "Status"),
    ColumnSpec::plain("author", "Author"),
    ColumnSpec::sortable("updated_at", "Updated"),
];

impl Record for CmsPage {
    type Id = CmsPageId;
    const ENTITY: EntityKind = EntityKind::CmsPage;

    fn id(&self) -> CmsPageId {
        self.id
    }

    fn blank(id: CmsPageId, today: Date) -> Self {
        Self {
            id,
            title: String::new(),
            slug: String::new(),
            content: String::new(),
            status: PageStatus::Draft,
            author: String::new(),
            created_at: today,
            updated_at: today,
        }
    }

    fn fields() -> &'static [FieldSpec] {
        PAGE_FIELDS
    }

    fn columns() -> &'static [ColumnSpec] {
        PAGE_COLUMNS
    }

    fn label(&self) -> String {
        self.title.clone()
    }

    fn value(&self, key: &str) -> FieldValue {
        match key {
            "title" => FieldValue::text(&self.title),
            "slug" => FieldValue::text(&self.slug),
            "path" => FieldValue::Text(format!("/{}", self.slug)),
            "content" => FieldValue::text(&self.content),
            "status" => FieldValue::choice(self.status),
            "author" => FieldValue::text(&self.author),
            "created_at" => FieldValue::Date(self.created_at),
            "updated_at" => FieldValue::Date(self.updated_at),
            _ => FieldValue::Empty,
        }
    }

    fn set(&mut self, key: &str, value: FieldValue) -> Result<()> {
        match key {
            "title" => self.title = value.into_text(key)?,
            "slug" => self.slug = value.into_text(key)?,
            "content" => self.content = value.into_text(key)?,
            "status" => self.status = value.into_choice(key)?,
            "author" => self.author = value.into_text(key)?,
            _ => return Err(unknown_field(Self::ENTITY, key)),
        }
        Ok(())
    }
}

const PORTFOLIO_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("title", "Title", FieldKind::Text),
    FieldSpec::required("description", "Description", FieldKind::Text),
    FieldSpec::required(
        "category",
        "Category",
        FieldKind::Choice(PortfolioCategory::OPTIONS),
    ),
    FieldSpec::optional("client", "Client", FieldKind::Text),
    FieldSpec::required("status", "Status", FieldKind::Choice(PostStatus::OPTIONS)),
];

const PORTFOLIO_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::sortable("title", "Title"),
    ColumnSpec::sortable("category", "Category"),
    ColumnSpec::plain("client", "Client"),
    ColumnSpec::sortable("status", "Status"),
    ColumnSpec::sortable("created_at", "Created"),
];

impl Record for PortfolioItem {
    type Id = PortfolioItemId;
    const ENTITY: EntityKind = EntityKind::PortfolioItem;

    fn id(&self) -> PortfolioItemId {
        self.id
    }

    fn blank(id: PortfolioItemId, today: Date) -> Self {
        Self {
            id,
            title: String::new(),
            description: String::new(),
            category: PortfolioCategory::WebDevelopment,
            client: String::new(),
            status: PostStatus::Draft,
            created_at: today,
        }
    }

    fn fields() -> &'static [FieldSpec] {
        PORTFOLIO_FIELDS
    }

    fn columns() -> &'static [ColumnSpec] {
        PORTFOLIO_COLUMNS
    }

    fn label(&self) -> String {
        self.title.clone()
    }

    fn value(&self, key: &str) -> FieldValue {
        match key {
            "title" => FieldValue::text(&self.title),
            "description" => FieldValue::text(&self.description),
            "category" => FieldValue::choice(self.category),
            "client" => FieldValue::text(&self.client),
            "status" => FieldValue::choice(self.status),
            "created_at" => FieldValue::Date(self.created_at),
            _ => FieldValue::Empty,
        }
    }

    fn set(&mut self, key: &str, value: FieldValue) -> Result<()> {
        match key {
            "title" => self.title = value.into_text(key)?,
            "description" => self.description = value.into_text(key)?,
            "category" => self.category = value.into_choice(key)?,
            "client" => self.client = value.into_text(key)?,
            "status" => self.status = value.into_choice(key)?,
            _ => return Err(unknown_field(Self::ENTITY, key)),
        }
        Ok(())
    }
}

const BANNER_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("title", "Title", FieldKind::Text),
    FieldSpec::optional("subtitle", "Subtitle", FieldKind::Text),
    FieldSpec::required("image_url", "Image URL", FieldKind::Text),
    FieldSpec::optional("link_url", "Link URL", FieldKind::Text),
    FieldSpec::required(
        "position",
        "Position",
        FieldKind::Choice(BannerPosition::OPTIONS),
    ),
    FieldSpec::required("start_date", "Start Date", FieldKind::Date),
    FieldSpec::optional("end_date", "End Date", FieldKind::Date),
];

const BANNER_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::sortable("title", "Title"),
    ColumnSpec::plain("subtitle", "Subtitle"),
    ColumnSpec::sortable("position", "Position"),
    ColumnSpec::sortable("is_active", "Active"),
    ColumnSpec::sortable("start_date", "Start"),
    ColumnSpec::sortable("end_date", "End"),
];

impl Record for Banner {
    type Id = BannerId;
    const ENTITY: EntityKind = EntityKind::Banner;

    fn id(&self) -> BannerId {
        self.id
    }

    fn blank(id: BannerId, today: Date) -> Self {
        Self {
            id,
            title: String::new(),
            subtitle: String::new(),
            image_url: String::new(),
            link_url: String::new(),
            position: BannerPosition::Hero,
            is_active: true,
            start_date: today,
            end_date: None,
        }
    }

    fn fields() -> &'static [FieldSpec] {
        BANNER_FIELDS
    }

    fn columns() -> &'static [ColumnSpec] {
        BANNER_COLUMNS
    }

    fn label(&self) -> String {
        self.title.clone()
    }

    fn value(&self, key: &str) -> FieldValue {
        match key {
            "title" => FieldValue::text(&self.title),
            "subtitle" => FieldValue::text(&self.subtitle),
            "image_url" => FieldValue::text(&self.image_url),
            "link_url" => FieldValue::text(&self.link_url),
            "position" => FieldValue::choice(self.position),
            "is_active" => FieldValue::Bool(self.is_active),
            "start_date" => FieldValue::Date(self.start_date),
            "end_date" => FieldValue::optional_date(self.end_date),
            _ => FieldValue::Empty,
        }
    }

    fn set(&mut self, key: &str, value: FieldValue) -> Result<()> {
        match key {
            "title" => self.title = value.into_text(key)?,
            "subtitle" => self.subtitle = value.into_text(key)?,
            "image_url" => self.image_url = value.into_text(key)?,
            "link_url" => self.link_url = value.into_text(key)?,
            "position" => self.position = value.into_choice(key)?,
            "is_active" => self.is_active = value.into_bool(key)?,
            "start_date" => self.start_date = value.into_date(key)?,
            "end_date" => self.end_date = value.into_optional_date(key)?,
            _ => return Err(unknown_field(Self::ENTITY, key)),
        }
        Ok(())
    }
}

const CAMPAIGN_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("name", "Campaign Name", FieldKind::Text),
    FieldSpec::required("subject", "Email Subject", FieldKind::Text),
    FieldSpec::required("content", "Content", FieldKind::Text),
    FieldSpec::optional("recipients", "Recipients", COUNT),
    FieldSpec::required("status", "Status", FieldKind::Choice(CampaignStatus::OPTIONS)),
];

const CAMPAIGN_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::sortable("name", "Campaign"),
    ColumnSpec::plain("subject", "Subject"),
    ColumnSpec::sortable("status", "Status"),
    ColumnSpec::sortable("recipients", "Recipients"),
    ColumnSpec::sortable("open_rate", "Open Rate"),
    ColumnSpec::sortable("click_rate", "Click Rate"),
    ColumnSpec::sortable("created_at", "Created"),
];

impl Record for EmailCampaign {
    type Id = EmailCampaignId;
    const ENTITY: EntityKind = EntityKind::EmailCampaign;

    fn id(&self) -> EmailCampaignId {
        self.id
    }

    fn blank(id: EmailCampaignId, today: Date) -> Self {
        Self {
            id,
            name: String::new(),
            subject: String::new(),
            content: String::new(),
            recipients: 0,
            status: CampaignStatus::Draft,
            open_rate: None,
            click_rate: None,
            created_at: today,
        }
    }

    fn fields() -> &'static [FieldSpec] {
        CAMPAIGN_FIELDS
    }

    fn columns() -> &'static [ColumnSpec] {
        CAMPAIGN_COLUMNS
    }

    fn label(&self) -> String {
        self.name.clone()
    }

    fn value(&self, key: &str) -> FieldValue {
        match key {
            "name" => FieldValue::text(&self.name),
            "subject" => FieldValue::text(&self.subject),
            "content" => FieldValue::text(&self.content),
            "recipients" => FieldValue::Integer(self.recipients),
            "status" => FieldValue::choice(self.status),
            "open_rate" => FieldValue::optional_percent(self.open_rate),
            "click_rate" => FieldValue::optional_percent(self.click_rate),
            "created_at" => FieldValue::Date(self.created_at),
            _ => FieldValue::Empty,
        }
    }

    fn set(&mut self, key: &str, value: FieldValue) -> Result<()> {
        match key {
            "name" => self.name = value.into_text(key)?,
            "subject" => self.subject = value.into_text(key)?,
            "content" => self.content = value.into_text(key)?,
            "recipients" => self.recipients = count_or_zero(value, key)?,
            "status" => self.status = value.into_choice(key)?,
            "open_rate" => self.open_rate = value.into_optional_percent(key)?,
            "click_rate" => self.click_rate = value.into_optional_percent(key)?,
            _ => return Err(unknown_field(Self::ENTITY, key)),
        }
        Ok(())
    }
}

const PERMISSION_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("role", "Role", FieldKind::Choice(AccessRole::OPTIONS)),
    FieldSpec::required("module", "Module", FieldKind::Choice(ModuleKind::OPTIONS)),
    FieldSpec::optional("can_view", "View", FieldKind::Bool),
    FieldSpec::optional("can_create", "Create", FieldKind::Bool),
    FieldSpec::optional("can_edit", "Edit", FieldKind::Bool),
    FieldSpec::optional("can_delete", "Delete", FieldKind::Bool),
];

const PERMISSION_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::sortable("role", "Role"),
    ColumnSpec::sortable("module", "Module"),
    ColumnSpec::plain("can_view", "View"),
    ColumnSpec::plain("can_create", "Create"),
    ColumnSpec::plain("can_edit", "Edit"),
    ColumnSpec::plain("can_delete", "Delete"),
];

impl Record for RolePermission {
    type Id = RolePermissionId;
    const ENTITY: EntityKind = EntityKind::RolePermission;

    fn id(&self) -> RolePermissionId {
        self.id
    }

    fn blank(id: RolePermissionId, _today: Date) -> Self {
        Self {
            id,
            role: AccessRole::Client,
            module: ModuleKind::Cms,
            can_view: false,
            can_create: false,
            can_edit: false,
            can_delete: false,
        }
    }

    fn fields() -> &'static [FieldSpec] {
        PERMISSION_FIELDS
    }

    fn columns() -> &'static [ColumnSpec] {
        PERMISSION_COLUMNS
    }

    fn label(&self) -> String {
        format!("{} {}", self.role.label(), self.module.label())
    }

    fn value(&self, key: &str) -> FieldValue {
        match key {
            "role" => FieldValue::choice(self.role),
            "module" => FieldValue::choice(self.module),
            "can_view" => FieldValue::Bool(self.can_view),
            "can_create" => FieldValue::Bool(self.can_create),
            "can_edit" => FieldValue::Bool(self.can_edit),
            "can_delete" => FieldValue::Bool(self.can_delete),
            _ => FieldValue::Empty,
        }
    }

    fn set(&mut self, key: &str, value: FieldValue) -> Result<()> {
        match key {
            "role" => self.role = value.into_choice(key)?,
            "module" => self.module = value.into_choice(key)?,
            "can_view" => self.can_view = value.into_bool(key)?,
            "can_create" => self.can_create = value.into_bool(key)?,
            "can_edit" => self.can_edit = value.into_bool(key)?,
            "can_delete" => self.can_delete = value.into_bool(key)?,
            _ => return Err(unknown_field(Self::ENTITY, key)),
        }
        Ok(())
    }
}

const SETTING_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("key", "Key", FieldKind::Text),
    FieldSpec::optional("value", "Value", FieldKind::Text),
    FieldSpec::required(
        "category",
        "Category",
        FieldKind::Choice(SettingCategory::OPTIONS),
    ),
];

const SETTING_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::sortable("category", "Category"),
    ColumnSpec::sortable("key", "Key"),
    ColumnSpec::plain("value", "Value"),
];

impl Record for SystemSetting {
    type Id = SettingId;
    const ENTITY: EntityKind = EntityKind::SystemSetting;

    fn id(&self) -> SettingId {
        self.id
    }

    fn blank(id: SettingId, _today: Date) -> Self {
        Self {
            id,
            key: String::new(),
            value: String::new(),
            category: SettingCategory::General,
        }
    }

    fn fields() -> &'static [FieldSpec] {
        SETTING_FIELDS
    }

    fn columns() -> &'static [ColumnSpec] {
        SETTING_COLUMNS
    }

    fn label(&self) -> String {
        self.key.clone()
    }

    fn value(&self, key: &str) -> FieldValue {
        match key {
            "key" => FieldValue::text(&self.key),
            "value" => FieldValue::text(&self.value),
            "category" => FieldValue::choice(self.category),
            _ => FieldValue::Empty,
        }
    }

    fn set(&mut self, key: &str, value: FieldValue) -> Result<()> {
        match key {
            "key" => self.key = value.into_text(key)?,
            "value" => self.value = value.into_text(key)?,
            "category" => self.category = value.into_choice(key)?,
            _ => return Err(unknown_field(Self::ENTITY, key)),
        }
        Ok(())
    }
}
