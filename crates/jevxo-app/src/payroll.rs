// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Partner split, equity eligibility and the payroll report.

use serde::Serialize;
use time::Date;

use crate::model::{Partner, Staff, StaffRole};
use crate::validation::percent_of_cents;

pub const PARTNER_PAYABLE_PERCENT: i64 = 30;
pub const PARTNER_DEDUCTION_PERCENT: i64 = 5;
pub const STAFF_DEDUCTION_PERCENT: i64 = 15;
pub const ELIGIBILITY_DAYS: i64 = 120;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PartnerSplit {
    pub payable_cents: i64,
    pub arrears_cents: i64,
}

/// Splits a partner base salary into the payable 30% and the 70% held
/// as arrears. The two halves always sum to the base.
pub fn partner_split(base_salary_cents: i64) -> PartnerSplit {
    let payable_cents = percent_of_cents(base_salary_cents, PARTNER_PAYABLE_PERCENT);
    PartnerSplit {
        payable_cents,
        arrears_cents: base_salary_cents - payable_cents,
    }
}

pub fn days_active(joining_date: Date, today: Date) -> i64 {
    (today - joining_date).whole_days()
}

pub const fn is_share_eligible(days_active: i64) -> bool {
    days_active >= ELIGIBILITY_DAYS
}

pub const fn days_until_eligible(days_active: i64) -> i64 {
    let remaining = ELIGIBILITY_DAYS - days_active;
    if remaining > 0 { remaining } else { 0 }
}

/// Recomputes tenure, split and eligibility for `today`.
pub fn refresh_partner(partner: &mut Partner, today: Date) {
    let split = partner_split(partner.base_salary_cents);
    partner.payable_cents = split.payable_cents;
    partner.arrears_cents = split.arrears_cents;
    partner.days_active = days_active(partner.joining_date, today);
    partner.is_share_eligible = is_share_eligible(partner.days_active);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PayrollKind {
    Partner,
    Staff,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PayrollLine {
    pub kind: PayrollKind,
    pub jevxo_uuid: String,
    pub name: String,
    pub gross_cents: i64,
    pub payable_cents: i64,
    pub arrears_cents: i64,
    pub deductions_cents: i64,
    pub net_cents: i64,
}

impl PayrollLine {
    pub fn for_partner(partner: &Partner) -> Self {
        let split = partner_split(partner.base_salary_cents);
        let deductions_cents =
            percent_of_cents(partner.base_salary_cents, PARTNER_DEDUCTION_PERCENT);
        Self {
            kind: PayrollKind::Partner,
            jevxo_uuid: partner.jevxo_uuid.clone(),
            name: partner.name.clone(),
            gross_cents: partner.base_salary_cents,
            payable_cents: split.payable_cents,
            arrears_cents: split.arrears_cents,
            deductions_cents,
            net_cents: split.payable_cents - deductions_cents,
        }
    }

    pub fn for_staff(staff: &Staff) -> Self {
        let deductions_cents = percent_of_cents(staff.base_salary_cents, STAFF_DEDUCTION_PERCENT);
        Self {
            kind: PayrollKind::Staff,
            jevxo_uuid: staff.jevxo_uuid.clone(),
            name: staff.name.clone(),
            gross_cents: staff.base_salary_cents,
            payable_cents: staff.base_salary_cents,
            arrears_cents: 0,
            deductions_cents,
            net_cents: staff.base_salary_cents - deductions_cents,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PayrollTotals {
    pub total_payable_cents: i64,
    pub staff_payroll_cents: i64,
    pub partner_payroll_cents: i64,
    pub total_arrears_cents: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PayrollReport {
    pub period: Date,
    pub lines: Vec<PayrollLine>,
    pub totals: PayrollTotals,
}

impl PayrollReport {
    /// Partners first, then non-partner staff. Staff with the partner role
    /// are paid through their partner record.
    pub fn build<'a>(
        period: Date,
        partners: impl IntoIterator<Item = &'a Partner>,
        staff: impl IntoIterator<Item = &'a Staff>,
    ) -> Self {
        let mut lines = partners
            .into_iter()
            .map(PayrollLine::for_partner)
            .collect::<Vec<_>>();
        lines.extend(
            staff
                .into_iter()
                .filter(|member| member.role != StaffRole::Partner)
                .map(PayrollLine::for_staff),
        );

        let mut totals = PayrollTotals::default();
        for line in &lines {
            match line.kind {
                PayrollKind::Partner => {
                    totals.partner_payroll_cents += line.net_cents;
                    totals.total_arrears_cents += line.arrears_cents;
                }
                PayrollKind::Staff => totals.staff_payroll_cents += line.net_cents,
            }
        }
        totals.total_payable_cents = totals.partner_payroll_cents + totals.staff_payroll_cents;

        Self {
            period,
            lines,
            totals,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::{BranchId, DepartmentId, DesignationId, PartnerId, StaffId};
    use crate::model::StaffStatus;
    use time::macros::date;

    fn partner(base: i64, joined: Date) -> Partner {
        Partner {
            id: PartnerId::new(1),
            jevxo_uuid: "JVX-PTR0001".to_owned(),
            name: "Dana Reyes".to_owned(),
            email: "dana@jevxo.test".to_owned(),
            base_salary_cents: base,
            joining_date: joined,
            days_active: 0,
            payable_cents: 0,
            arrears_cents: 0,
            is_share_eligible: false,
        }
    }

    fn staff(role: StaffRole, base: i64) -> Staff {
        Staff {
            id: StaffId::new(1),
            jevxo_uuid: "JVX-ABCDEFGH".to_owned(),
            name: "Sam Ortiz".to_owned(),
            email: "sam@jevxo.test".to_owned(),
            phone: "555-0100".to_owned(),
            role,
            branch_id: BranchId::new(1),
            department_id: DepartmentId::new(1),
            designation_id: DesignationId::new(1),
            base_salary_cents: base,
            status: StaffStatus::Active,
            joining_date: date!(2024 - 01 - 15),
        }
    }

    #[test]
    fn partner_split_thirty_seventy() {
        let split = partner_split(500_000);
        assert_eq!(split.payable_cents, 150_000);
        assert_eq!(split.arrears_cents, 350_000);
    }

    #[test]
    fn partner_split_halves_always_sum_to_base() {
        for base in [0, 1, 99, 333, 123_457, 999_999] {
            let split = partner_split(base);
            assert_eq!(split.payable_cents + split.arrears_cents, base, "base {base}");
        }
    }

    #[test]
    fn eligibility_threshold_is_inclusive() {
        assert!(is_share_eligible(120));
        assert!(!is_share_eligible(119));
        assert_eq!(days_until_eligible(119), 1);
        assert_eq!(days_until_eligible(400), 0);
    }

    #[test]
    fn refresh_partner_uses_today() {
        let mut record = partner(500_000, date!(2025 - 01 - 01));
        refresh_partner(&mut record, date!(2025 - 05 - 01));
        assert_eq!(record.days_active, 120);
        assert!(record.is_share_eligible);
        assert_eq!(record.payable_cents, 150_000);

        refresh_partner(&mut record, date!(2025 - 04 - 30));
        assert_eq!(record.days_active, 119);
        assert!(!record.is_share_eligible);
    }

    #[test]
    fn report_skips_partner_role_staff_and_totals_net() {
        let partners = [partner(500_000, date!(2025 - 01 - 01))];
        let members = [
            staff(StaffRole::Manager, 400_000),
            staff(StaffRole::Partner, 900_000),
        ];
        let report = PayrollReport::build(date!(2025 - 06 - 01), &partners, &members);

        assert_eq!(report.lines.len(), 2);
        // partner: payable 1500 - 5% of 5000 = 1250
        assert_eq!(report.lines[0].net_cents, 125_000);
        // staff: 4000 * 0.85
        assert_eq!(report.lines[1].net_cents, 340_000);
        assert_eq!(report.totals.partner_payroll_cents, 125_000);
        assert_eq!(report.totals.staff_payroll_cents, 340_000);
        assert_eq!(report.totals.total_payable_cents, 465_000);
        assert_eq!(report.totals.total_arrears_cents, 350_000);
    }
}
