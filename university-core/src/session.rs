//! Database session over the university schema.
//!
//! A `Session` owns one MySQL connection plus the two statements prepared
//! when it opens. It is `Open` until `close` is called, then `Closed` for
//! good. Retrieval on a closed session fails with `SessionClosed`.

use sqlx::mysql::{MySqlConnectOptions, MySqlConnection, MySqlRow, MySqlStatement};
use sqlx::{Connection, Executor, Statement};
use tracing::{debug, info};

use crate::cursor::{RowStream, ScrollCursor, Traversal};
use crate::driver;
use crate::endpoint::Endpoint;
use crate::error::{Result, UniversityError};
use crate::model::{CourseCount, Instructor};

pub const INSTRUCTOR_QUERY: &str = "SELECT * FROM instructor";

/// Procedure call with the OUT parameter bound to a session variable.
pub const COUNT_COURSES_CALL: &str = "CALL Count_Courses(?, @course_count)";

const RESET_COURSE_COUNT: &str = "SET @course_count = NULL";
const READ_COURSE_COUNT: &str = "SELECT CAST(@course_count AS SIGNED)";

/// Instructor the course count is asked for when no name is given.
pub const DEFAULT_INSTRUCTOR: &str = "Brandt";

type DecodeFn = fn(&MySqlRow) -> Result<Instructor>;

/// Instructor records, decoded lazily as the cursor reaches each row.
pub type Instructors = RowStream<MySqlRow, DecodeFn>;

struct Handles {
    conn: MySqlConnection,
    instructors: MySqlStatement<'static>,
    count_courses: MySqlStatement<'static>,
}

pub struct Session {
    handles: Option<Handles>,
}

impl Session {
    /// Connect to `endpoint` with the given credentials.
    pub async fn open(endpoint: &Endpoint, username: &str, password: &str) -> Result<Self> {
        info!(endpoint = %endpoint, user = username, "opening session");
        Self::open_with(endpoint.connect_options(username, password)).await
    }

    /// Connect with fully built options and prepare the statement handles.
    ///
    /// If either handle fails to prepare, the connection is released before
    /// the error is returned.
    pub async fn open_with(options: MySqlConnectOptions) -> Result<Self> {
        let driver = driver::register();
        debug!(driver = driver.name, scheme = driver.scheme, "connecting");

        let mut conn = MySqlConnection::connect_with(&options)
            .await
            .map_err(UniversityError::connection)?;

        let (instructors, count_courses) = match prepare_handles(&mut conn).await {
            Ok(handles) => handles,
            Err(err) => {
                discard_close(conn).await;
                return Err(UniversityError::connection(err));
            }
        };

        info!("session open");
        Ok(Self {
            handles: Some(Handles {
                conn,
                instructors,
                count_courses,
            }),
        })
    }

    pub fn is_open(&self) -> bool {
        self.handles.is_some()
    }

    fn handles(&mut self) -> Result<&mut Handles> {
        self.handles.as_mut().ok_or(UniversityError::SessionClosed)
    }

    /// `SELECT * FROM instructor` sent as plain text, walked from the last row
    /// back to the first, fields read by column name.
    pub async fn list_instructors_ad_hoc(&mut self) -> Result<Instructors> {
        let handles = self.handles()?;
        let rows = sqlx::raw_sql(INSTRUCTOR_QUERY)
            .fetch_all(&mut handles.conn)
            .await
            .map_err(UniversityError::query)?;

        debug!(rows = rows.len(), "ad-hoc instructor query");
        Ok(RowStream::new(
            ScrollCursor::new(rows),
            Traversal::Reverse,
            decode_named as DecodeFn,
        ))
    }

    /// The prepared instructor statement, walked forward, fields read by position.
    pub async fn list_instructors_prepared(&mut self) -> Result<Instructors> {
        let handles = self.handles()?;
        let rows = handles
            .instructors
            .query()
            .fetch_all(&mut handles.conn)
            .await
            .map_err(UniversityError::query)?;

        debug!(rows = rows.len(), "prepared instructor query");
        Ok(RowStream::new(
            ScrollCursor::new(rows),
            Traversal::Forward,
            decode_positional as DecodeFn,
        ))
    }

    /// Call `Count_Courses` for `instructor_name` and read back its OUT parameter.
    pub async fn count_courses(&mut self, instructor_name: &str) -> Result<CourseCount> {
        let handles = self.handles()?;

        sqlx::query(RESET_COURSE_COUNT)
            .execute(&mut handles.conn)
            .await
            .map_err(UniversityError::query)?;

        handles
            .count_courses
            .query()
            .bind(instructor_name.to_string())
            .execute(&mut handles.conn)
            .await
            .map_err(UniversityError::query)?;

        let count: Option<i64> = sqlx::query_scalar(READ_COURSE_COUNT)
            .fetch_one(&mut handles.conn)
            .await
            .map_err(UniversityError::query)?;

        let course_count = count.ok_or_else(|| UniversityError::MissingCount {
            instructor: instructor_name.to_string(),
        })?;

        debug!(instructor = instructor_name, course_count, "Count_Courses");
        Ok(CourseCount {
            instructor_name: instructor_name.to_string(),
            course_count,
        })
    }

    /// Release the statement handles and the connection.
    ///
    /// Errors raised while releasing are discarded. Calling this on a closed
    /// session does nothing.
    pub async fn close(&mut self) {
        let Some(handles) = self.handles.take() else {
            debug!("close on already closed session");
            return;
        };

        let Handles {
            conn,
            instructors,
            count_courses,
        } = handles;
        drop(instructors);
        drop(count_courses);
        discard_close(conn).await;
        info!("session closed");
    }
}

async fn prepare_handles(
    conn: &mut MySqlConnection,
) -> std::result::Result<(MySqlStatement<'static>, MySqlStatement<'static>), sqlx::Error> {
    let instructors = (&mut *conn).prepare(INSTRUCTOR_QUERY).await?;
    let count_courses = (&mut *conn).prepare(COUNT_COURSES_CALL).await?;
    debug!("prepared instructor and Count_Courses statements");
    Ok((instructors, count_courses))
}

async fn discard_close(conn: MySqlConnection) {
    if let Err(err) = conn.close().await {
        debug!(error = %err, "discarded error while closing connection");
    }
}

fn decode_named(row: &MySqlRow) -> Result<Instructor> {
    Instructor::from_named_row(row).map_err(UniversityError::query)
}

fn decode_positional(row: &MySqlRow) -> Result<Instructor> {
    Instructor::from_positional_row(row).map_err(UniversityError::query)
}
