//! # Guild Roster Core
//!
//! Pure roster logic: no I/O, no async. Everything here takes plain values
//! and returns plain values.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  allocator   - place / swap / remove on one slot            │
//! │  assignment  - bulk "assign by hall" over the whole board   │
//! │  policy      - caller-side capacity checks                  │
//! │  grouping    - battle records → guild → team with summaries │
//! │  views       - filtering, sorting and report ordering       │
//! │  comparison  - name extraction and list diffing             │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod allocator;
pub mod assignment;
pub mod comparison;
pub mod grouping;
pub mod policy;
pub mod views;

pub use allocator::{AllocationEvent, SlotAllocator};
pub use assignment::{assign_by_hall, hall_buckets, AssignmentOutcome, UNASSIGNED_HALL};
pub use comparison::{compare_names, extract_names, ComparisonResult};
pub use grouping::{calculate_summary, flatten, group_by_guild, group_by_team};
pub use policy::ensure_capacity;
pub use views::{apply_filter, report_order, sort_records};
