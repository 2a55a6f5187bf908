// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::Hash;

pub trait EntityId: Copy + Ord + Hash + fmt::Debug + fmt::Display {
    fn new(value: i64) -> Self;
    fn get(self) -> i64;
}

macro_rules! entity_id {
    ($name:ident) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        pub struct $name(i64);

        impl $name {
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl EntityId for $name {
            fn new(value: i64) -> Self {
                Self(value)
            }

            fn get(self) -> i64 {
                self.0
            }
        }
    };
}

entity_id!(ClientId);
entity_id!(InvoiceId);
entity_id!(ProjectId);
entity_id!(TicketId);
entity_id!(StaffId);
entity_id!(PartnerId);
entity_id!(BlogPostId);
entity_id!(CmsPageId);
entity_id!(PortfolioItemId);
entity_id!(BannerId);
entity_id!(EmailCampaignId);
entity_id!(BranchId);
entity_id!(DepartmentId);
entity_id!(DesignationId);
entity_id!(AttendanceId);
entity_id!(LeaveRequestId);
entity_id!(RolePermissionId);
entity_id!(SettingId);
