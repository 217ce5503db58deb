mod api;
mod config;
mod database;
mod error;
mod exams;
mod homework;
mod lessons;
mod notifications;
mod schedule;
mod schema;
mod server;
mod tasks;
mod uploads;
mod utils;

use std::path::Path;

use clap::{Parser, Subcommand};
use directories::ProjectDirs;
use log::error;

use crate::config::Config;
use crate::database::Database;
use crate::error::StudyDeskError;
use crate::server::WebServer;
use crate::uploads::UploadStore;
use crate::utils::Utils;

#[derive(Parser)]
#[command(name = "studydesk", version, about = "Personal study planner web service")]
struct Args {
    #[command(subcommand)]
    command: StudyDeskCommand,
}

#[derive(Subcommand)]
enum StudyDeskCommand {
    /// Run the web server
    Serve {
        /// Address to bind (default: from config)
        #[arg(long = "host")]
        host: Option<String>,

        /// Port to bind (default: from config)
        #[arg(long = "port", short = 'p')]
        port: Option<u16>,

        /// Directory holding the database and uploads (default: from config)
        #[arg(long = "data-dir", short = 'd')]
        data_dir: Option<String>,
    },

    /// Print upcoming tasks, homework, and exams
    Notifications {
        /// Directory holding the database (default: from config)
        #[arg(long = "data-dir", short = 'd')]
        data_dir: Option<String>,
    },
}

fn main() {
    if let Err(err) = run() {
        error!("{:?}", err);
        eprintln!("{}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<(), StudyDeskError> {
    let args = Args::parse();

    let project_dirs = ProjectDirs::from("", "", "studydesk")
        .ok_or_else(|| StudyDeskError::Error("Could not determine home directory".to_string()))?;
    let config = Config::load_config(&project_dirs);

    // Keep the handle alive for the program's lifetime; dropping it would
    // shut logging down.
    let _logger = flexi_logger::Logger::try_with_str(&config.logging.studydesk)
        .map_err(|e| StudyDeskError::Error(format!("Invalid log spec: {}", e)))?
        .start()
        .map_err(|e| StudyDeskError::Error(format!("Failed to start logger: {}", e)))?;

    match args.command {
        StudyDeskCommand::Serve {
            host,
            port,
            data_dir,
        } => {
            let data_dir = data_dir.unwrap_or_else(|| config.storage.data_dir.clone());
            Database::init(Path::new(&data_dir))?;

            let uploads_dir = Path::new(&data_dir).join(&config.storage.uploads_dir);
            let uploads = UploadStore::new(uploads_dir)?;

            let host = host.unwrap_or_else(|| config.server.host.clone());
            let port = port.unwrap_or(config.server.port);

            let server = WebServer::new(host, port);
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(server.start(uploads))
        }

        StudyDeskCommand::Notifications { data_dir } => {
            let data_dir = data_dir.unwrap_or_else(|| config.storage.data_dir.clone());
            Database::init(Path::new(&data_dir))?;

            let conn = Database::get_connection()?;
            let items = notifications::upcoming(&conn, &Utils::today_string())?;
            if items.is_empty() {
                println!("Nothing upcoming.");
            } else {
                for item in items {
                    println!(
                        "{} {}  {} - {}",
                        item.date, item.time, item.subject, item.details
                    );
                }
            }
            Ok(())
        }
    }
}
