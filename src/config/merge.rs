//! Defaults and override order.

pub mod merge_policy;
