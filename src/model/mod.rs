pub use self::assignments::Assignments;
pub use self::project::{Project, ProjectId};
pub use self::staff::{Affinity, Staff, StaffId};
pub use self::student::{Student, StudentId};

mod assignments;
mod project;
mod staff;
mod student;

#[cfg(test)]
pub(crate) mod testing;
