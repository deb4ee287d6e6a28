//! Pending-change classification
//!
//! This module turns raw per-path change records reported by a shell into the
//! normalized status consumed by presentation.
//!
//! ## Components
//!
//! - `change_kind`: The change kind set and the shell's status codes
//! - `change_record`: Per-path records and the machine-readable line parser
//! - `classifier`: Record to normalized status (letters, tooltip, color, icon)
//! - `decoration`: Icon assets per theme and editor decorations

pub mod change_kind;
pub mod change_record;
pub mod classifier;
pub mod decoration;
