//! Records read from the university schema.

use sqlx::mysql::MySqlRow;
use sqlx::types::Decimal;
use sqlx::Row;

/// Column names of the `instructor` table, in table order.
pub const INSTRUCTOR_COLUMNS: [&str; 4] = ["ID", "name", "dept_name", "salary"];

/// One row of `instructor`.
///
/// `dept_name` and `salary` are nullable in the schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instructor {
    pub id: String,
    pub name: String,
    pub department: Option<String>,
    pub salary: Option<Decimal>,
}

impl Instructor {
    /// Decode by column name.
    pub fn from_named_row(row: &MySqlRow) -> Result<Self, sqlx::Error> {
        let [id, name, department, salary] = INSTRUCTOR_COLUMNS;
        Ok(Self {
            id: row.try_get(id)?,
            name: row.try_get(name)?,
            department: row.try_get(department)?,
            salary: row.try_get(salary)?,
        })
    }

    /// Decode by column position.
    pub fn from_positional_row(row: &MySqlRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get(0)?,
            name: row.try_get(1)?,
            department: row.try_get(2)?,
            salary: row.try_get(3)?,
        })
    }
}

/// Result of `Count_Courses(name, count)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseCount {
    pub instructor_name: String,
    pub course_count: i64,
}
