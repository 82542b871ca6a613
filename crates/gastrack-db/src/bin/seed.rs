//! # Seed Data Generator
//!
//! Fills a cache database with demo customers and a format config for
//! development.
//!
//! ## Usage
//! ```bash
//! # 500 customers for org "demo" (default)
//! cargo run -p gastrack-db --bin seed
//!
//! # Custom amount and organization
//! cargo run -p gastrack-db --bin seed -- --count 5000 --org acme-gas
//!
//! # Specify database path
//! cargo run -p gastrack-db --bin seed -- --db ./data/gastrack-cache.db
//! ```
//!
//! ## Generated Customers
//! - ID: UUID v4
//! - Name: `{prefix} {suffix}` from the lists below, numbered past the first round
//! - Barcode: six digits ending in `A`, every fifth customer has none

use std::env;

use gastrack_core::{find_customers, CustomerRecord, FormatRule, OrganizationFormatConfig};
use gastrack_db::{Database, DbConfig};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

const NAME_PREFIXES: &[&str] = &[
    "Acme", "Harbor", "Summit", "Northwind", "Bayside", "Ironclad", "Prairie", "Redline",
    "Keystone", "Silverline",
];

const NAME_SUFFIXES: &[&str] = &[
    "Welding", "Gas Supply", "Fabrication", "Brewing", "Medical", "Labs", "Auto Body",
    "Hospital", "Diving Center", "Farms",
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,gastrack=debug,sqlx=warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args: Vec<String> = env::args().collect();

    let mut count: usize = 500;
    let mut org_id = "demo".to_string();
    let mut db_config = DbConfig::from_env();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    match args[i + 1].parse() {
                        Ok(n) => count = n,
                        Err(_) => warn!(value = %args[i + 1], "Ignoring invalid --count"),
                    }
                    i += 1;
                }
            }
            "--org" | "-o" => {
                if i + 1 < args.len() {
                    org_id = args[i + 1].clone();
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_config = DbConfig::new(&args[i + 1]);
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("GasTrack Cache Seeder");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of customers to generate (default: 500)");
                println!("  -o, --org <ID>     Organization ID (default: demo)");
                println!("  -d, --db <PATH>    Database file path (default: $GASTRACK_DB_PATH or ./gastrack-cache.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            other => warn!(arg = %other, "Ignoring unknown argument"),
        }
        i += 1;
    }

    info!(
        path = %db_config.database_path.display(),
        organization_id = %org_id,
        count,
        "Seeding cache"
    );

    let db = Database::new(db_config).await?;

    let customers: Vec<CustomerRecord> = (0..count).map(generate_customer).collect();
    db.customers().replace_all(&org_id, &customers).await?;

    let formats = OrganizationFormatConfig {
        barcode_format: Some(
            FormatRule::with_pattern(r"^\d{6}[Aa]$")
                .description("6 digits followed by A")
                .examples(["100001A", "100002A"]),
        ),
        order_number_format: Some(
            FormatRule::with_pattern(r"^SO-\d{5}$")
                .description("SO- followed by 5 digits")
                .examples(["SO-00001", "SO-00042"]),
        ),
    };
    db.format_configs().upsert(&org_id, &formats).await?;

    let cached = db.customers().list(&org_id).await?;
    info!(cached = cached.len(), "Customer snapshot written");

    for query in ["acme", "100001a", "weld"] {
        let hits = find_customers(query, &cached);
        info!(query, hits = hits.len(), "Sample search");
    }

    db.close().await;
    info!("Seed complete");
    Ok(())
}

/// Builds the `seed`-th demo customer.
fn generate_customer(seed: usize) -> CustomerRecord {
    let prefix = NAME_PREFIXES[seed % NAME_PREFIXES.len()];
    let suffix = NAME_SUFFIXES[(seed / NAME_PREFIXES.len()) % NAME_SUFFIXES.len()];
    let round = seed / (NAME_PREFIXES.len() * NAME_SUFFIXES.len());

    let name = if round == 0 {
        format!("{prefix} {suffix}")
    } else {
        format!("{prefix} {suffix} #{}", round + 1)
    };

    let barcode = (seed % 5 != 4).then(|| format!("{:06}A", 100_001 + seed));

    CustomerRecord {
        id: Uuid::new_v4().to_string(),
        name,
        barcode,
    }
}
