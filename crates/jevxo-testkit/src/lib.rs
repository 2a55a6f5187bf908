// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use jevxo_app::{
    BlogCategory, BranchId, ClientId, ClientStatus, DepartmentId, DesignationId, FieldValue,
    InvoiceStatus, LeaveType, Patch, PostStatus, ProjectStatus, StaffId, StaffRole, StaffStatus,
    TicketPriority, TicketStatus,
};
use std::path::PathBuf;
use time::{Date, Duration, Month};

const FIRST_NAMES: [&str; 16] = [
    "Amara", "Daniel", "Grace", "Tunde", "Lina", "Kofi", "Zainab", "Marcus", "Ngozi", "Samuel",
    "Priya", "Oliver", "Fatima", "Chidi", "Aisha", "Jonah",
];
const LAST_NAMES: [&str; 16] = [
    "Okafor", "Mensah", "Wanjiru", "Bakare", "Haddad", "Asante", "Bello", "Reid", "Eze",
    "Ortiz", "Nair", "Grant", "Diallo", "Obi", "Kamau", "Adeyemi",
];

const COMPANY_ADJECTIVES: [&str; 10] = [
    "Harbor", "Brightline", "Nimbus", "Sahel", "Summit", "Cobalt", "Evergreen", "Keystone",
    "Lumen", "Meridian",
];
const COMPANY_SUFFIXES: [&str; 6] = ["Logistics", "Health", "Retail", "Foods", "Labs", "Group"];

const PROJECT_NOUNS: [&str; 8] = [
    "portal",
    "mobile app",
    "storefront",
    "dashboard",
    "brand refresh",
    "booking flow",
    "intranet",
    "landing page",
];

const TICKET_TITLES: [&str; 8] = [
    "Login fails on Safari",
    "Export invoices to CSV",
    "Update hero imagery",
    "Slow map rendering",
    "Broken contact form",
    "Add dark mode",
    "Password reset email delayed",
    "Typo on pricing page",
];

const CITIES: [&str; 8] = [
    "Lagos", "Nairobi", "Accra", "Kigali", "Cape Town", "Cairo", "Dakar", "Remote",
];

const DEPARTMENTS: [&str; 6] = [
    "Engineering",
    "Design",
    "Sales",
    "Human Resources",
    "Marketing",
    "Operations",
];

const DESIGNATIONS: [&str; 6] = [
    "Software Engineer",
    "Lead Engineer",
    "Product Designer",
    "Account Executive",
    "HR Generalist",
    "Operations Analyst",
];

const PROJECT_STATUSES: [ProjectStatus; 3] = [
    ProjectStatus::Active,
    ProjectStatus::Completed,
    ProjectStatus::OnHold,
];

#[derive(Debug, Clone)]
struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    fn new(seed: u64) -> Self {
        let mut state = seed ^ 0x9E37_79B9_7F4A_7C15;
        if state == 0 {
            state = 0xA409_3822_299F_31D0;
        }
        Self { state }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);

        let mut x = self.state;
        x ^= x >> 13;
        x ^= x << 7;
        x ^= x >> 17;
        x
    }

    fn int_n(&mut self, n: usize) -> usize {
        if n <= 1 {
            return 0;
        }
        (self.next_u64() % (n as u64)) as usize
    }

    fn bool(&mut self) -> bool {
        (self.next_u64() & 1) == 1
    }
}

/// Seeded generator of form patches for every agency entity. The same
/// seed always yields the same sequence.
#[derive(Debug, Clone)]
pub struct AgencyFaker {
    rng: DeterministicRng,
}

impl AgencyFaker {
    pub fn new(seed: u64) -> Self {
        let normalized = if seed == 0 { 1 } else { seed };
        Self {
            rng: DeterministicRng::new(normalized),
        }
    }

    pub fn int_n(&mut self, n: usize) -> usize {
        self.rng.int_n(n)
    }

    pub fn person_name(&mut self) -> String {
        format!("{} {}", self.pick(&FIRST_NAMES), self.pick(&LAST_NAMES))
    }

    pub fn company(&mut self) -> String {
        format!(
            "{} {}",
            self.pick(&COMPANY_ADJECTIVES),
            self.pick(&COMPANY_SUFFIXES)
        )
    }

    pub fn client(&mut self) -> Patch {
        let name = self.person_name();
        let company = self.company();
        let status = if self.rng.bool() {
            ClientStatus::Active
        } else {
            ClientStatus::Inactive
        };
        Patch::new()
            .with("email", FieldValue::text(email_for(&name, &company)))
            .with("name", FieldValue::text(name))
            .with("company", FieldValue::text(company))
            .with("status", FieldValue::choice(status))
    }

    /// Invoice without a number, so the store assigns one.
    pub fn invoice(&mut self, client: ClientId) -> Patch {
        let status = InvoiceStatus::ALL[self.rng.int_n(InvoiceStatus::ALL.len())];
        Patch::new()
            .with("client_id", FieldValue::reference(client))
            .with("amount", FieldValue::Money(self.int_range_i64(50_000, 2_500_000)))
            .with("status", FieldValue::choice(status))
            .with(
                "due_date",
                FieldValue::Date(self.date_near(fixture_date(), 60)),
            )
    }

    pub fn project(&mut self, client: ClientId) -> Patch {
        let total_tasks = self.int_range_i64(1, 40);
        let tasks_completed = self.int_range_i64(0, total_tasks);
        let status = PROJECT_STATUSES[self.rng.int_n(PROJECT_STATUSES.len())];
        Patch::new()
            .with(
                "name",
                FieldValue::text(format!(
                    "{} {}",
                    self.pick(&COMPANY_ADJECTIVES),
                    self.pick(&PROJECT_NOUNS)
                )),
            )
            .with("client_id", FieldValue::reference(client))
            .with("status", FieldValue::choice(status))
            .with("progress", FieldValue::Integer(tasks_completed * 100 / total_tasks))
            .with("budget", FieldValue::Money(self.int_range_i64(100_000, 5_000_000)))
            .with(
                "deadline",
                FieldValue::Date(self.date_near(fixture_date(), 180)),
            )
            .with("tasks_completed", FieldValue::Integer(tasks_completed))
            .with("total_tasks", FieldValue::Integer(total_tasks))
    }

    pub fn ticket(&mut self, client: ClientId) -> Patch {
        let status = TicketStatus::ALL[self.rng.int_n(TicketStatus::ALL.len())];
        let priority = TicketPriority::ALL[self.rng.int_n(TicketPriority::ALL.len())];
        Patch::new()
            .with("title", FieldValue::text(self.pick(&TICKET_TITLES)))
            .with("description", FieldValue::text(self.sentence(6, 14)))
            .with("client_id", FieldValue::reference(client))
            .with("status", FieldValue::choice(status))
            .with("priority", FieldValue::choice(priority))
    }

    pub fn branch(&mut self) -> Patch {
        let city = self.pick(&CITIES);
        Patch::new()
            .with("name", FieldValue::text(format!("{city} Office")))
            .with("location", FieldValue::text(city))
    }

    pub fn department(&mut self, branch: BranchId) -> Patch {
        Patch::new()
            .with("name", FieldValue::text(self.pick(&DEPARTMENTS)))
            .with("branch_id", FieldValue::reference(branch))
    }

    pub fn designation(&mut self, department: DepartmentId) -> Patch {
        Patch::new()
            .with("title", FieldValue::text(self.pick(&DESIGNATIONS)))
            .with("level", FieldValue::Integer(self.int_range_i64(1, 5)))
            .with("department_id", FieldValue::reference(department))
    }

    pub fn staff(
        &mut self,
        role: StaffRole,
        branch: BranchId,
        department: DepartmentId,
        designation: DesignationId,
    ) -> Patch {
        let name = self.person_name();
        Patch::new()
            .with("email", FieldValue::text(email_for(&name, "jevxo")))
            .with("name", FieldValue::text(name))
            .with(
                "phone",
                FieldValue::text(format!(
                    "+234 {:03} {:03} {:04}",
                    self.int_range_i64(700, 909),
                    self.int_range_i64(100, 999),
                    self.int_range_i64(0, 9_999)
                )),
            )
            .with("role", FieldValue::choice(role))
            .with("branch_id", FieldValue::reference(branch))
            .with("department_id", FieldValue::reference(department))
            .with("designation_id", FieldValue::reference(designation))
            .with(
                "base_salary",
                FieldValue::Money(self.int_range_i64(300_000, 1_200_000)),
            )
            .with("status", FieldValue::choice(StaffStatus::Active))
    }

    pub fn partner(&mut self, base_salary_cents: i64) -> Patch {
        let name = self.person_name();
        Patch::new()
            .with("email", FieldValue::text(email_for(&name, "partners.jevxo")))
            .with("name", FieldValue::text(name))
            .with("base_salary", FieldValue::Money(base_salary_cents))
    }

    /// Leave of `days` inclusive days starting `start`.
    pub fn leave(&mut self, staff: StaffId, start: Date, days: i64) -> Patch {
        let leave_type = LeaveType::ALL[self.rng.int_n(LeaveType::ALL.len())];
        let end = start
            .checked_add(Duration::days(days.max(1) - 1))
            .unwrap_or(start);
        Patch::new()
            .with("staff_id", FieldValue::reference(staff))
            .with("leave_type", FieldValue::choice(leave_type))
            .with("start_date", FieldValue::Date(start))
            .with("end_date", FieldValue::Date(end))
            .with("reason", FieldValue::text(self.sentence(3, 8)))
    }

    pub fn blog_post(&mut self) -> Patch {
        let title = self.sentence(3, 6);
        let slug = title
            .trim_end_matches('.')
            .to_ascii_lowercase()
            .replace(' ', "-");
        let category = BlogCategory::ALL[self.rng.int_n(BlogCategory::ALL.len())];
        let status = if self.rng.bool() {
            PostStatus::Published
        } else {
            PostStatus::Draft
        };
        Patch::new()
            .with("title", FieldValue::text(title))
            .with("slug", FieldValue::text(slug))
            .with("excerpt", FieldValue::text(self.sentence(6, 12)))
            .with("content", FieldValue::text(self.sentence(20, 40)))
            .with("category", FieldValue::choice(category))
            .with("status", FieldValue::choice(status))
            .with("author", FieldValue::text(self.person_name()))
    }

    fn pick<'a>(&mut self, items: &'a [&'a str]) -> &'a str {
        items[self.rng.int_n(items.len())]
    }

    fn int_range_i64(&mut self, min: i64, max: i64) -> i64 {
        if max <= min {
            return min;
        }
        let span = max - min + 1;
        min + (self.rng.next_u64() % (span as u64)) as i64
    }

    fn date_near(&mut self, anchor: Date, spread_days: i64) -> Date {
        let offset = self.int_range_i64(-spread_days, spread_days);
        anchor.checked_add(Duration::days(offset)).unwrap_or(anchor)
    }

    fn sentence(&mut self, min_words: usize, max_words: usize) -> String {
        const WORDS: [&str; 24] = [
            "launch",
            "client",
            "design",
            "review",
            "deploy",
            "sprint",
            "roadmap",
            "brand",
            "campaign",
            "invoice",
            "support",
            "mobile",
            "web",
            "team",
            "release",
            "feedback",
            "content",
            "growth",
            "payroll",
            "partner",
            "office",
            "budget",
            "timeline",
            "quality",
        ];

        let count = self.int_range_i64(min_words as i64, max_words as i64) as usize;
        let mut parts = Vec::with_capacity(count);
        for _ in 0..count {
            parts.push(self.pick(&WORDS).to_owned());
        }
        let mut sentence = parts.join(" ");
        if let Some(first) = sentence.get_mut(0..1) {
            first.make_ascii_uppercase();
        }
        sentence.push('.');
        sentence
    }
}

fn email_for(name: &str, domain: &str) -> String {
    let local = name
        .split_whitespace()
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join(".");
    let domain = domain
        .split_whitespace()
        .next()
        .unwrap_or("example")
        .to_ascii_lowercase();
    format!("{local}@{domain}.com")
}

pub fn temp_config_path() -> Result<(tempfile::TempDir, PathBuf)> {
    let dir = tempfile::tempdir().context("create temp dir")?;
    let config_path = dir.path().join("config.toml");
    Ok((dir, config_path))
}

/// Stable "today" for tests that depend on the calendar.
pub fn fixture_date() -> Date {
    Date::from_calendar_date(2026, Month::February, 19).unwrap_or(Date::MIN)
}
