use clap::{Parser, ValueEnum};
use waterreport_core::domain::{
    common::{DatabaseConfig, GeocodingConfig, ReportPolicy, WaterApiConfig, WaterReportConfig},
    contaminant::value_objects::ContaminantPolicy,
    geocoding::entities::Coordinates,
    neighborhood::value_objects::NeighborhoodPolicy,
    review::value_objects::ReviewPolicy,
};

#[derive(Debug, Clone, Parser)]
#[command(name = "waterreport-api", about = "Personalized water report service")]
pub struct Args {
    #[command(flatten)]
    pub server: ServerArgs,

    #[command(flatten)]
    pub auth: AuthArgs,

    #[command(flatten)]
    pub db: DatabaseArgs,

    #[command(flatten)]
    pub water_api: WaterApiArgs,

    #[command(flatten)]
    pub geocoding: GeocodingArgs,

    #[command(flatten)]
    pub policy: PolicyArgs,

    #[command(flatten)]
    pub log: LogArgs,
}

#[derive(Debug, Clone, clap::Args)]
pub struct ServerArgs {
    #[arg(long = "server-host", env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long = "server-port", env = "SERVER_PORT", default_value_t = 3333)]
    pub port: u16,

    #[arg(long = "server-root-path", env = "SERVER_ROOT_PATH", default_value = "")]
    pub root_path: String,

    #[arg(
        long = "allowed-origins",
        env = "ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:3000"
    )]
    pub allowed_origins: Vec<String>,

    /// Base of generated report links; the request's host is used when unset.
    #[arg(long = "public-base-url", env = "PUBLIC_BASE_URL")]
    pub public_base_url: Option<String>,

    /// Token handed to the page for map rendering.
    #[arg(long = "map-token", env = "MAPBOX_TOKEN")]
    pub map_token: Option<String>,
}

#[derive(Debug, Clone, clap::Args)]
pub struct AuthArgs {
    /// Bearer secret expected from the CRM on report creation.
    #[arg(long = "api-secret", env = "API_SECRET", hide_env_values = true)]
    pub api_secret: String,
}

#[derive(Debug, Clone, clap::Args)]
pub struct DatabaseArgs {
    #[arg(long = "database-host", env = "DATABASE_HOST", default_value = "localhost")]
    pub host: String,

    #[arg(long = "database-port", env = "DATABASE_PORT", default_value_t = 5432)]
    pub port: u16,

    #[arg(long = "database-user", env = "DATABASE_USER", default_value = "postgres")]
    pub user: String,

    #[arg(
        long = "database-password",
        env = "DATABASE_PASSWORD",
        default_value = "postgres",
        hide_env_values = true
    )]
    pub password: String,

    #[arg(long = "database-name", env = "DATABASE_NAME", default_value = "waterreport")]
    pub name: String,
}

#[derive(Debug, Clone, clap::Args)]
pub struct WaterApiArgs {
    #[arg(long = "water-api-key", env = "WATER_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    #[arg(
        long = "water-api-url",
        env = "WATER_API_URL",
        default_value = "https://api.gosimplelab.com"
    )]
    pub base_url: String,
}

#[derive(Debug, Clone, clap::Args)]
pub struct GeocodingArgs {
    #[arg(
        long = "census-geocoder-url",
        env = "CENSUS_GEOCODER_URL",
        default_value = "https://geocoding.geo.census.gov/geocoder/locations/onelineaddress"
    )]
    pub census_url: String,

    #[arg(
        long = "nominatim-url",
        env = "NOMINATIM_URL",
        default_value = "https://nominatim.openstreetmap.org/search"
    )]
    pub nominatim_url: String,

    #[arg(
        long = "geocoder-user-agent",
        env = "GEOCODER_USER_AGENT",
        default_value = "AquaClearWaterReports/1.0"
    )]
    pub user_agent: String,

    #[arg(long = "geocoder-timeout-secs", env = "GEOCODER_TIMEOUT_SECS", default_value_t = 5)]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, clap::Args)]
pub struct PolicyArgs {
    #[arg(
        long = "default-lat",
        env = "DEFAULT_LAT",
        default_value_t = 35.8868,
        allow_negative_numbers = true
    )]
    pub default_lat: f64,

    #[arg(
        long = "default-lng",
        env = "DEFAULT_LNG",
        default_value_t = -84.153,
        allow_negative_numbers = true
    )]
    pub default_lng: f64,

    #[arg(
        long = "radius-tiers",
        env = "RADIUS_TIERS_MILES",
        value_delimiter = ',',
        default_values_t = [3.0, 10.0, 25.0, 50.0]
    )]
    pub radius_tiers: Vec<f64>,

    #[arg(long = "customer-quorum", env = "CUSTOMER_QUORUM", default_value_t = 20)]
    pub customer_quorum: usize,

    #[arg(long = "miles-per-degree", env = "MILES_PER_DEGREE", default_value_t = 69.0)]
    pub miles_per_degree: f64,

    #[arg(long = "contaminant-limit", env = "CONTAMINANT_LIMIT", default_value_t = 8)]
    pub contaminant_limit: usize,

    #[arg(long = "warning-ratio", env = "WARNING_RATIO", default_value_t = 2)]
    pub warning_ratio: i64,

    #[arg(long = "exceeds-ratio", env = "EXCEEDS_RATIO", default_value_t = 10)]
    pub exceeds_ratio: i64,

    #[arg(long = "description-limit", env = "DESCRIPTION_LIMIT", default_value_t = 120)]
    pub description_limit: usize,

    #[arg(long = "review-target", env = "REVIEW_TARGET", default_value_t = 4)]
    pub review_target: usize,

    #[arg(long = "review-backfill-factor", env = "REVIEW_BACKFILL_FACTOR", default_value_t = 3)]
    pub review_backfill_factor: usize,

    #[arg(long = "review-rating", env = "REVIEW_RATING", default_value_t = 5)]
    pub review_rating: i32,

    /// Show pipeline failures on pages and mount the water API diagnostic route.
    #[arg(long = "diagnostics", env = "DIAGNOSTICS", default_value_t = false)]
    pub diagnostics: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone, clap::Args)]
pub struct LogArgs {
    #[arg(long = "log-format", env = "LOG_FORMAT", value_enum, default_value = "pretty")]
    pub format: LogFormat,

    #[arg(long = "log-filter", env = "RUST_LOG", default_value = "info")]
    pub filter: String,
}

impl From<Args> for WaterReportConfig {
    fn from(args: Args) -> Self {
        let policy = args.policy;
        WaterReportConfig {
            database: DatabaseConfig {
                host: args.db.host,
                port: args.db.port,
                username: args.db.user,
                password: args.db.password,
                name: args.db.name,
            },
            water_api: WaterApiConfig {
                api_key: args.water_api.api_key,
                base_url: args.water_api.base_url,
            },
            geocoding: GeocodingConfig {
                census_url: args.geocoding.census_url,
                nominatim_url: args.geocoding.nominatim_url,
                user_agent: args.geocoding.user_agent,
                timeout_secs: args.geocoding.timeout_secs,
            },
            policy: ReportPolicy {
                default_center: Coordinates::new(policy.default_lat, policy.default_lng),
                contaminants: ContaminantPolicy {
                    limit: policy.contaminant_limit,
                    warning_ratio: policy.warning_ratio,
                    exceeds_ratio: policy.exceeds_ratio,
                    description_limit: policy.description_limit,
                    ..ContaminantPolicy::default()
                },
                neighborhood: NeighborhoodPolicy {
                    radius_tiers_miles: policy.radius_tiers,
                    quorum: policy.customer_quorum,
                    miles_per_degree: policy.miles_per_degree,
                },
                reviews: ReviewPolicy {
                    target: policy.review_target,
                    backfill_factor: policy.review_backfill_factor,
                    rating: policy.review_rating,
                },
                diagnostics: policy.diagnostics,
            },
        }
    }
}
