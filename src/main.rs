use clap::{Parser, Subcommand};

use pagespy::config::{get_config, init_config};
use pagespy::errors::PageSpyError;
use pagespy::services::AdminService;
use pagespy::storage::StorageFactory;
use pagespy::system::init_logging;

#[derive(Parser)]
#[command(name = "pagespy", version, about = "Covert page-tracking service")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server (default)
    Serve,
    /// Create an admin account from the terminal
    SeedAdmin {
        /// Email for the new admin
        #[arg(long)]
        email: String,
        /// Display name
        #[arg(long, default_value = "Admin")]
        name: String,
    },
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_config();
    let config = get_config();
    let _guard = init_logging(&config.logging);

    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            if let Err(e) = pagespy::runtime::run_server().await {
                match e.downcast_ref::<PageSpyError>() {
                    Some(err) => eprintln!("{}", err.format_colored()),
                    None => eprintln!("{}", e),
                }
                std::process::exit(1);
            }
        }
        Commands::SeedAdmin { email, name } => {
            let password = rpassword::prompt_password("Password: ")?;
            let confirm = rpassword::prompt_password("Confirm password: ")?;
            if password != confirm {
                anyhow::bail!("Passwords do not match");
            }

            let storage = StorageFactory::create().await?;
            let admin_service = AdminService::new(storage);
            let account = admin_service.create_admin(&name, &email, &password).await?;
            println!("Admin created: {} <{}>", account.name, account.email);
        }
    }

    Ok(())
}
