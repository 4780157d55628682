#[macro_use]
extern crate log;

use std::path::PathBuf;

use anyhow::{Context, anyhow};
use chrono::NaiveDateTime;
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use worktrack_db::{DatabaseHandler, MediaStore};
use worktrack_types::{ActivityInfo, SearchActivityInfo};

#[derive(Parser)]
pub struct WorktrackCli {
    #[arg(env, long)]
    pub database_url: String,
    #[arg(env, long, default_value = "media")]
    pub media_root: PathBuf,
    #[clap(subcommand)]
    pub subcommand: WorktrackCommand,
}

#[derive(Subcommand)]
pub enum WorktrackCommand {
    ///
    /// Apply pending schema migrations
    ///
    Migrate,
    ///
    /// Roll back the most recent migrations
    ///
    Rollback {
        #[arg(long, default_value_t = 1)]
        steps: u32,
    },
    ///
    /// Print migrations that have not been applied yet
    ///
    Status,
    ///
    /// Register a new employee
    ///
    AddEmployee { username: String },
    ///
    /// Remove an employee along with all of their activity
    ///
    RemoveEmployee { username: String },
    ///
    /// Record an activity check-in, optionally with screenshot files
    ///
    Record {
        #[arg(long, env = "WORKTRACK_EMPLOYEE")]
        employee: String,
        screenshots: Vec<PathBuf>,
    },
    ///
    /// List recorded activity, oldest first
    ///
    List {
        #[arg(long)]
        employee: Option<String>,
        #[arg(long, value_parser = parse_datetime)]
        from: Option<NaiveDateTime>,
        #[arg(long, value_parser = parse_datetime)]
        to: Option<NaiveDateTime>,
        #[arg(long)]
        limit: Option<u64>,
        #[arg(long)]
        json: bool,
    },
    ///
    /// Delete an activity record, its screenshots and their files
    ///
    DeleteActivity { id: i32 },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(error) = dotenv() {
        println!("{}", error);
    }

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .filter_module("sqlx::query", log::LevelFilter::Off)
        .filter_module("sea_orm_migration::migrator", log::LevelFilter::Off)
        .init();

    let cli = WorktrackCli::parse();
    let media = MediaStore::new(cli.media_root);

    match cli.subcommand {
        WorktrackCommand::Migrate => {
            let db = DatabaseHandler::connect(cli.database_url).await?;
            db.migrate().await?;
            info!("Schema is up to date");
            Ok(())
        }
        WorktrackCommand::Rollback { steps } => {
            let db = DatabaseHandler::connect(cli.database_url).await?;
            db.rollback(steps).await?;
            info!("Rolled back {} migration(s)", steps);
            Ok(())
        }
        WorktrackCommand::Status => {
            let db = DatabaseHandler::connect(cli.database_url).await?;
            let pending = db.pending_migrations().await?;
            if pending.is_empty() {
                println!("No pending migrations");
            }
            for name in pending {
                println!("Pending: {}", name);
            }
            Ok(())
        }
        WorktrackCommand::AddEmployee { username } => {
            let db = DatabaseHandler::new(cli.database_url).await?;
            let employee = db.create_employee(&username).await?;
            println!("{}\t{}", employee.id, employee.username);
            Ok(())
        }
        WorktrackCommand::RemoveEmployee { username } => {
            let db = DatabaseHandler::new(cli.database_url).await?;
            let employee = find_employee(&db, &username).await?;

            let activity = db
                .search_activity(SearchActivityInfo::default().with_employee(employee.id))
                .await?;
            db.delete_employee(employee.id).await?;
            for record in &activity {
                remove_files(&media, record);
            }

            info!(
                "Removed {} and {} activity record(s)",
                employee.username,
                activity.len()
            );
            Ok(())
        }
        WorktrackCommand::Record {
            employee,
            screenshots,
        } => {
            let db = DatabaseHandler::new(cli.database_url).await?;
            let employee = find_employee(&db, &employee).await?;

            let mut images = Vec::with_capacity(screenshots.len());
            for path in &screenshots {
                let bytes = std::fs::read(path)
                    .with_context(|| format!("reading screenshot {}", path.display()))?;
                let file_name = path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .ok_or_else(|| anyhow!("invalid screenshot path {}", path.display()))?;
                images.push(media.save(file_name, &bytes)?);
            }

            match db
                .record_activity_with_screenshots(employee.id, images.clone())
                .await
            {
                Ok(activity) => {
                    println!("{}", format_activity(&activity));
                    Ok(())
                }
                Err(e) => {
                    for image in &images {
                        if let Err(error) = media.delete(image) {
                            warn!("{}", error);
                        }
                    }
                    Err(e)
                }
            }
        }
        WorktrackCommand::List {
            employee,
            from,
            to,
            limit,
            json,
        } => {
            let db = DatabaseHandler::new(cli.database_url).await?;
            let employee_id = match employee {
                Some(username) => Some(find_employee(&db, &username).await?.id),
                None => None,
            };

            let activity = db
                .search_activity(SearchActivityInfo {
                    employee_id,
                    from,
                    to,
                    limit,
                })
                .await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&activity)?);
            } else {
                for record in &activity {
                    println!("{}", format_activity(record));
                }
            }
            Ok(())
        }
        WorktrackCommand::DeleteActivity { id } => {
            let db = DatabaseHandler::new(cli.database_url).await?;
            let activity = db
                .get_activity(id)
                .await?
                .ok_or_else(|| anyhow!("Activity {} not found", id))?;

            db.delete_activity(id).await?;
            remove_files(&media, &activity);
            info!("Deleted activity {}", id);
            Ok(())
        }
    }
}

async fn find_employee(
    db: &DatabaseHandler,
    username: &str,
) -> anyhow::Result<worktrack_types::Employee> {
    db.find_employee(username)
        .await?
        .ok_or_else(|| anyhow!("Employee `{}` not found", username))
}

fn remove_files(media: &MediaStore, activity: &ActivityInfo) {
    for screenshot in &activity.screenshots {
        if let Err(error) = media.delete(&screenshot.image) {
            warn!("{}", error);
        }
    }
}

fn format_activity(activity: &ActivityInfo) -> String {
    let images = activity
        .screenshots
        .iter()
        .map(|s| s.image.as_str())
        .collect::<Vec<_>>()
        .join(",");

    format!(
        "{}\t{}\temployee={}\t{}",
        activity.id,
        activity.date.format("%Y-%m-%d %H:%M:%S"),
        activity.employee_id,
        images
    )
}

fn parse_datetime(value: &str) -> Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S"))
        .or_else(|_| {
            chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .map(|d| d.and_time(chrono::NaiveTime::MIN))
        })
        .map_err(|e| format!("expected YYYY-MM-DD[THH:MM:SS]: {e}"))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn parse_datetime_accepts_dates_and_times() {
        let midnight = NaiveDate::from_ymd_opt(2020, 7, 28)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(parse_datetime("2020-07-28").unwrap(), midnight);

        let noon = NaiveDate::from_ymd_opt(2020, 7, 28)
            .unwrap()
            .and_hms_opt(12, 17, 0)
            .unwrap();
        assert_eq!(parse_datetime("2020-07-28T12:17:00").unwrap(), noon);
        assert_eq!(parse_datetime("2020-07-28 12:17:00").unwrap(), noon);
        assert!(parse_datetime("28/07/2020").is_err());
    }

    #[test]
    fn cli_reads_subcommands() {
        let cli = WorktrackCli::try_parse_from([
            "worktrack",
            "--database-url",
            "sqlite::memory:",
            "record",
            "--employee",
            "alice",
            "a.png",
            "b.png",
        ])
        .unwrap();

        match cli.subcommand {
            WorktrackCommand::Record {
                employee,
                screenshots,
            } => {
                assert_eq!(employee, "alice");
                assert_eq!(screenshots, vec![PathBuf::from("a.png"), PathBuf::from("b.png")]);
            }
            _ => panic!("expected record"),
        }
    }
}
