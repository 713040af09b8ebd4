pub mod cursor;
pub mod driver;
pub mod endpoint;
pub mod error;
pub mod model;
pub mod report;
pub mod session;

pub use cursor::{RowStream, ScrollCursor, Traversal};
pub use endpoint::Endpoint;
pub use error::{Diagnostics, ErrorKind, Result, UniversityError};
pub use model::{CourseCount, Instructor};
pub use session::{Instructors, Session, DEFAULT_INSTRUCTOR};
