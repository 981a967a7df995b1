use clap::{Parser, Subcommand};
use serde_json::Value;

use site_gateway::config::{production_domain_or_default, RoutingConfig};
use site_gateway::routing::{resolve_root_component, subdomain_label};

#[derive(Parser)]
#[command(name = "site-cli")]
#[command(about = "Management CLI for the site gateway", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:3000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show app identity, feature flags and backing-service readiness
    Status,
    /// Print the route table
    Routes,
    /// Show the current session state
    Session,
    /// Resolve the root page for a hostname locally, without a server
    Resolve {
        hostname: String,
        /// Production domain (defaults to the built-in domain)
        #[arg(short, long)]
        domain: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    match cli.command {
        Commands::Status => {
            let res = client.get(format!("{}/api/status", cli.url)).send().await?;
            print_response(res).await?;
        }
        Commands::Routes => {
            let res = client.get(format!("{}/api/routes", cli.url)).send().await?;
            print_response(res).await?;
        }
        Commands::Session => {
            let res = client.get(format!("{}/api/session", cli.url)).send().await?;
            print_response(res).await?;
        }
        Commands::Resolve { hostname, domain } => {
            let routing = RoutingConfig::default();
            let domain = domain.unwrap_or(routing.production_domain);
            let domain = production_domain_or_default(&domain);
            let page = resolve_root_component(&hostname, domain, &routing.labels, routing.default_page);
            println!(
                "{} (label '{}', domain '{}')",
                page,
                subdomain_label(&hostname),
                domain
            );
        }
    }

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: site API returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
