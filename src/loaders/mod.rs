pub use self::loader::Loader;
pub use self::records::{parse_projects, parse_staff, parse_students};

mod loader;
mod records;
