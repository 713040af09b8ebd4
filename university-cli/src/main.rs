//! university CLI - list the instructor table and count courses
//!
//! Connects to the `university` schema (default `localhost:3306`) and prints:
//! - every instructor via an ad-hoc query, last row first
//! - every instructor via the prepared statement, first row first
//! - the number of courses taught by one instructor (`Count_Courses`)

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use university_core::report::{self, AD_HOC_HEADER, COUNT_COURSES_HEADER, PREPARED_HEADER};
use university_core::{Endpoint, Result, Session, DEFAULT_INSTRUCTOR};

mod tracing_setup;

use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "university",
    author,
    version,
    about = "Query the university schema: instructor listings and course counts"
)]
struct Cli {
    /// User name for the university schema
    username: String,

    /// Password for the university schema
    password: String,

    /// Database host
    #[arg(long, env = "UNIVERSITY_DB_HOST")]
    host: Option<String>,

    /// Database port
    #[arg(long, env = "UNIVERSITY_DB_PORT")]
    port: Option<u16>,

    /// Schema name
    #[arg(long, env = "UNIVERSITY_DB_DATABASE")]
    database: Option<String>,

    /// Endpoint config file (default: ~/.university/config.toml if present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Instructor passed to Count_Courses
    #[arg(long, default_value = DEFAULT_INSTRUCTOR)]
    instructor: String,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    if let Err(err) = tracing_setup::init(&TracingConfig { debug: cli.debug }) {
        eprintln!("failed to initialize tracing: {err}");
    }

    let mut out = io::stdout();
    match run(cli, &mut out).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(kind = ?err.kind(), "{err}");
            let context = report::error_context(&err);
            if let Err(report_err) = report::write_error(&mut out, context, &err) {
                eprintln!("failed to write error report: {report_err}");
            }
            ExitCode::FAILURE
        }
    }
}

async fn run<W: Write>(cli: Cli, out: &mut W) -> Result<()> {
    let endpoint = Endpoint::load(cli.config.as_deref())?.with_overrides(
        cli.host,
        cli.port,
        cli.database,
    );

    let mut session = Session::open(&endpoint, &cli.username, &cli.password).await?;
    let result = print_report(&mut session, out, &cli.instructor).await;
    session.close().await;
    result
}

async fn print_report<W: Write>(session: &mut Session, out: &mut W, instructor: &str) -> Result<()> {
    writeln!(out, "{AD_HOC_HEADER}")?;
    let listed = report::write_instructors(out, session.list_instructors_ad_hoc().await?)?;
    info!(records = listed, "ad-hoc listing done");

    writeln!(out, "{PREPARED_HEADER}")?;
    let listed = report::write_instructors(out, session.list_instructors_prepared().await?)?;
    info!(records = listed, "prepared listing done");

    writeln!(out, "{COUNT_COURSES_HEADER}")?;
    let count = session.count_courses(instructor).await?;
    writeln!(out, "{}", report::format_course_count(&count))?;

    out.flush()?;
    Ok(())
}
