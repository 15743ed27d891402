pub mod assignment;

pub use assignment::{Assignment, RoleAssignment, SlotAssignmentEngine, SlotBinding};
