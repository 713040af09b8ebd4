//! Line-oriented text output.
//!
//! Layout follows the classic JDBC demo: fixed-width instructor name, tab
//! separated fields, and a three-line error report. NULL fields print as
//! `null`.

use std::fmt::Display;
use std::io::Write;

use crate::error::{ErrorKind, Result, UniversityError};
use crate::model::{CourseCount, Instructor};

pub const AD_HOC_HEADER: &str = "getInstructor ...";
pub const PREPARED_HEADER: &str = "getPreparedInstructor ...";
pub const COUNT_COURSES_HEADER: &str = "Count_Courses ...";

fn or_null<T: Display>(value: Option<&T>) -> String {
    value.map_or_else(|| "null".to_string(), |v| v.to_string())
}

pub fn format_instructor(instructor: &Instructor) -> String {
    format!(
        "Instructor name: {:>13}\t ID: {}\t Department: {}\t Salary: ${}",
        instructor.name,
        instructor.id,
        or_null(instructor.department.as_ref()),
        or_null(instructor.salary.as_ref()),
    )
}

pub fn format_course_count(count: &CourseCount) -> String {
    format!(
        "Number of courses taught by {} is {}.",
        count.instructor_name, count.course_count
    )
}

/// Drain an instructor listing to `out`, one line per record.
///
/// Stops at the first record that fails to decode.
pub fn write_instructors<W, I>(out: &mut W, instructors: I) -> Result<usize>
where
    W: Write,
    I: IntoIterator<Item = Result<Instructor>>,
{
    let mut written = 0;
    for instructor in instructors {
        writeln!(out, "{}", format_instructor(&instructor?))?;
        written += 1;
    }
    Ok(written)
}

/// Prefix for the error report: connection failures are reported under
/// `getConnection`, everything else under `main`.
pub fn error_context(err: &UniversityError) -> &'static str {
    match err.kind() {
        ErrorKind::Connection => "getConnection",
        _ => "main",
    }
}

/// Print message, SQLSTATE and vendor code, each prefixed with `context`.
pub fn write_error<W: Write>(out: &mut W, context: &str, err: &UniversityError) -> Result<()> {
    let diagnostics = err.diagnostics();
    writeln!(out, "{context} SQLException: {}", diagnostics.message)?;
    writeln!(
        out,
        "{context} SQLState: {}",
        diagnostics.sql_state.as_deref().unwrap_or("null")
    )?;
    writeln!(
        out,
        "{context} VendorError: {}",
        diagnostics.vendor_code.unwrap_or(0)
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::types::Decimal;
    use std::str::FromStr;

    fn instructor(id: &str, name: &str, dept: &str, salary: &str) -> Instructor {
        Instructor {
            id: id.to_string(),
            name: name.to_string(),
            department: Some(dept.to_string()),
            salary: Some(Decimal::from_str(salary).unwrap()),
        }
    }

    #[test]
    fn instructor_line_pads_name_to_thirteen() {
        let line = format_instructor(&instructor("10001", "Srinivasan", "Comp. Sci.", "65000.00"));
        assert_eq!(
            line,
            "Instructor name:    Srinivasan\t ID: 10001\t Department: Comp. Sci.\t Salary: $65000.00"
        );
    }

    #[test]
    fn null_fields_print_as_null() {
        let mut record = instructor("76543", "Singh", "Finance", "80000.00");
        record.department = None;
        record.salary = None;

        let line = format_instructor(&record);
        assert!(line.ends_with("Department: null\t Salary: $null"));
    }

    #[test]
    fn course_count_line() {
        let count = CourseCount {
            instructor_name: "Brandt".to_string(),
            course_count: 3,
        };
        assert_eq!(
            format_course_count(&count),
            "Number of courses taught by Brandt is 3."
        );
    }

    #[test]
    fn write_instructors_stops_at_first_error() {
        let records = vec![
            Ok(instructor("15151", "Mozart", "Music", "40000.00")),
            Err(UniversityError::SessionClosed),
            Ok(instructor("10001", "Srinivasan", "Comp. Sci.", "65000.00")),
        ];
        let mut out = Vec::new();

        let err = write_instructors(&mut out, records).unwrap_err();
        assert!(matches!(err, UniversityError::SessionClosed));

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 1);
        assert!(text.contains("Mozart"));
    }

    #[test]
    fn error_report_has_three_prefixed_lines() {
        let refused = sqlx::Error::Io(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "connection refused",
        ));
        let err = UniversityError::connection(refused);
        let mut out = Vec::new();

        write_error(&mut out, "main", &err).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("main SQLException: "));
        assert_eq!(lines[1], "main SQLState: 08S01");
        assert_eq!(lines[2], "main VendorError: 0");
    }

    #[test]
    fn connection_failures_report_under_get_connection() {
        let refused = sqlx::Error::Io(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "connection refused",
        ));
        assert_eq!(
            error_context(&UniversityError::connection(refused)),
            "getConnection"
        );
        assert_eq!(
            error_context(&UniversityError::query(sqlx::Error::RowNotFound)),
            "main"
        );
        assert_eq!(error_context(&UniversityError::config("bad")), "main");
    }

    #[test]
    fn error_report_defaults_for_non_driver_errors() {
        let mut out = Vec::new();
        write_error(&mut out, "main", &UniversityError::SessionClosed).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("main SQLState: null"));
        assert!(text.contains("main VendorError: 0"));
    }
}
