//! Rostering domain models.
//!
//! Value types consumed and produced by the roster engine. Workers and the
//! site configuration are immutable for a run; the grid is the mutable
//! solution, and per-worker counts live in a separate side-table.
//!
//! # Domain Mappings
//!
//! | shift-roster | Hospital ward | Security post | Call centre |
//! |--------------|---------------|---------------|-------------|
//! | Worker | Nurse | Guard | Agent |
//! | SiteConfig | Ward week | Post rota | Queue coverage |
//! | ScheduleGrid | Duty roster | Watch bill | Shift plan |

mod counts;
mod grid;
mod site;
mod worker;

pub use counts::AssignmentCounts;
pub use grid::{GridSignature, ScheduleGrid};
pub use site::{SiteConfig, SlotRef, DEFAULT_MAX_CONSECUTIVE_DAYS};
pub use worker::Worker;
