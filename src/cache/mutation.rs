//! Mutation descriptors
//!
//! Each remote write operation is described by its name and the set of
//! cache-key resource prefixes it invalidates on success. The table below is
//! the single source of truth for which screens refresh after which action.

use crate::cache::key;

// == Mutation Descriptor ==
/// A named remote write with its invalidation targets. Targets are resource
/// names: a bare key is matched exactly, a parameterized family through its
/// resource name, so `admin-users` covers every paginated/filtered variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MutationDescriptor {
    pub name: &'static str,
    pub invalidates: &'static [&'static str],
}

// == Descriptor Table ==

pub const CREATE_CASE: MutationDescriptor = MutationDescriptor {
    name: "create_case",
    invalidates: &[key::ADMIN_CASES],
};

pub const UPDATE_CASE: MutationDescriptor = MutationDescriptor {
    name: "update_case",
    invalidates: &[key::ADMIN_CASES],
};

pub const DELETE_CASE: MutationDescriptor = MutationDescriptor {
    name: "delete_case",
    invalidates: &[key::ADMIN_CASES],
};

pub const DELETE_EMPTY_CASES: MutationDescriptor = MutationDescriptor {
    name: "delete_empty_cases",
    invalidates: &[key::ADMIN_CASES],
};

pub const CREATE_GIFT: MutationDescriptor = MutationDescriptor {
    name: "create_gift",
    invalidates: &[key::ADMIN_GIFTS],
};

pub const CREATE_PROMOCODE: MutationDescriptor = MutationDescriptor {
    name: "create_promocode",
    invalidates: &[key::ADMIN_PROMOCODES],
};

pub const UPDATE_PROMOCODE: MutationDescriptor = MutationDescriptor {
    name: "update_promocode",
    invalidates: &[key::ADMIN_PROMOCODES],
};

pub const DELETE_PROMOCODE: MutationDescriptor = MutationDescriptor {
    name: "delete_promocode",
    invalidates: &[key::ADMIN_PROMOCODES],
};

pub const CREATE_REFERRAL_LINK: MutationDescriptor = MutationDescriptor {
    name: "create_referral_link",
    invalidates: &[key::REFERRAL_LINKS],
};

pub const UPDATE_USER_BALANCE: MutationDescriptor = MutationDescriptor {
    name: "update_user_balance",
    invalidates: &[key::ADMIN_USERS],
};

pub const BLOCK_USER: MutationDescriptor = MutationDescriptor {
    name: "block_user",
    invalidates: &[key::ADMIN_USERS],
};
