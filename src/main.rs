//! Command line front-end printing one page of a fleet listing as JSON.

use std::env;

use config::Config;
use dotenvy::dotenv;
use serde::Serialize;

use fleet_admin::db::establish_connection_pool;
use fleet_admin::domain::types::{HubId, VehicleId};
use fleet_admin::models::config::{AppConfig, PagingConfig};
use fleet_admin::pagination::Paginated;
use fleet_admin::query::PageResult;
use fleet_admin::repository::DieselRepository;
use fleet_admin::services::listing::parse_query;
use fleet_admin::services::maintenance_record::list_maintenance_records;
use fleet_admin::services::vehicle::list_vehicles;
use fleet_admin::services::vehicle_note::list_vehicle_notes;
use fleet_admin::services::{ServiceError, ServiceResult};

const USAGE: &str = "usage: fleet-admin <maintenances|notes|vehicles> <scope-id> [query-string]";

fn load_config() -> Result<AppConfig, config::ConfigError> {
    // Select config profile (defaults to `local`).
    let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());

    Config::builder()
        .add_source(config::File::with_name("config/default"))
        .add_source(config::File::with_name(&format!("config/{app_env}")).required(false))
        .add_source(config::Environment::with_prefix("APP"))
        .build()?
        .try_deserialize::<AppConfig>()
}

fn render<T: Serialize>(result: PageResult<T>) -> ServiceResult<String> {
    serde_json::to_string_pretty(&Paginated::from(result))
        .map_err(|err| ServiceError::Internal(format!("Failed to encode page: {err}")))
}

fn run_listing(
    repo: &DieselRepository,
    paging: &PagingConfig,
    listing: &str,
    scope_id: i32,
    query: &str,
) -> ServiceResult<String> {
    match listing {
        "maintenances" => {
            let vehicle_id = VehicleId::new(scope_id)?;
            render(list_maintenance_records(repo, vehicle_id, &parse_query(query)?, paging)?)
        }
        "notes" => {
            let vehicle_id = VehicleId::new(scope_id)?;
            render(list_vehicle_notes(repo, vehicle_id, &parse_query(query)?, paging)?)
        }
        "vehicles" => {
            let hub_id = HubId::new(scope_id)?;
            render(list_vehicles(repo, hub_id, &parse_query(query)?, paging)?)
        }
        other => Err(ServiceError::InvalidInput(format!("unknown listing `{other}`"))),
    }
}

fn main() {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let args: Vec<String> = env::args().skip(1).collect();
    let (listing, scope_id, query) = match args.as_slice() {
        [listing, scope] | [listing, scope, _] => match scope.parse::<i32>() {
            Ok(scope_id) => (
                listing.as_str(),
                scope_id,
                args.get(2).map(String::as_str).unwrap_or_default(),
            ),
            Err(_) => {
                eprintln!("{USAGE}");
                std::process::exit(2);
            }
        },
        _ => {
            eprintln!("{USAGE}");
            std::process::exit(2);
        }
    };

    let app_config = match load_config() {
        Ok(app_config) => app_config,
        Err(err) => {
            log::error!("Error loading app config: {err}");
            std::process::exit(1);
        }
    };

    let pool = match establish_connection_pool(&app_config.database_url, app_config.query_timeout())
    {
        Ok(pool) => pool,
        Err(err) => {
            log::error!("Failed to establish database connection: {err}");
            std::process::exit(1);
        }
    };

    let repo = DieselRepository::new(pool);

    match run_listing(&repo, &app_config.paging(), listing, scope_id, query) {
        Ok(json) => println!("{json}"),
        Err(err) => {
            log::error!("Listing {listing} failed: {err}");
            std::process::exit(if err.is_client_error() { 2 } else { 1 });
        }
    }
}
