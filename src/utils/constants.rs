/// Default input locations, relative to the project root
pub const DEFAULT_REFERENCE_PATH: &str = "data/input/municipalities.csv.gz";
pub const DEFAULT_FORECAST_PATH: &str = "data/output/daily_municipal_forecast.csv.gz";

pub const DEFAULT_DAILY_HISTORICAL_PATH: &str =
    "data/output/daily_station_historical_barcelona.csv.gz";
pub const DEFAULT_HOURLY_PATH: &str = "data/output/hourly_station_ongoing_barcelona.csv.gz";
pub const DEFAULT_DAILY_CURRENT_PATH: &str = "data/output/daily_station_current_barcelona.csv.gz";
pub const DEFAULT_FORECAST_BARCELONA_PATH: &str =
    "data/output/daily_municipal_forecast_barcelona.csv.gz";

/// Column names
pub const REFERENCE_ID_COLUMN: &str = "CUMUN";
pub const FORECAST_ID_COLUMN: &str = "municipio_id";
pub const DAILY_DATE_COLUMN: &str = "fecha";
pub const DAILY_STATION_COLUMN: &str = "indicativo";
pub const HOURLY_TIMESTAMP_COLUMN: &str = "fint";
pub const HOURLY_STATION_COLUMN: &str = "idema";
pub const FORECAST_DATE_COLUMN: &str = "fecha";
pub const COLLECTED_AT_COLUMN: &str = "collected_at";

/// Municipality code shape
pub const MUNICIPALITY_ID_WIDTH: usize = 5;

/// Report defaults
pub const DEFAULT_LAST_DAYS: usize = 7;
pub const MISSING_SAMPLE_LIMIT: usize = 20;
pub const DEFAULT_BUFFER_SIZE: usize = 8192 * 16; // 128KB

/// Municipalities created after the forecast catalogue was frozen
pub const NEW_MUNICIPALITIES: &[&str] = &[
    "11903", // San Martín del Tesorillo
    "14901", // Fuente Carreteros
    "14902", // La Guijarrosa
    "18077", // Fornes
    "21902", // La Zarza-Perrunal
    "41904", // El Palmar de Troya
];

/// Communal land codes (shared territories, no per-municipality forecast)
pub const COMMUNAL_CODES: &[&str] = &[
    "53000", "53001", "53002", "53003", "53004", "53005", "53006", "53007", "53008", "53009",
    "53010", "53011", "53012", "53013", "53014", "53015", "53016", "53017", "53018", "53019",
    "53020", "53021", "53022", "53023", "53024", "53025", "53026", "53027", "53028", "53029",
    "53031", "53032", "53033", "53034", "53035", "53036", "53037", "53038", "53039", "53040",
    "53041", "53042", "53043", "53044", "53045", "53046", "53047", "53048", "53049", "53050",
    "53051", "53052", "53053", "53054", "53055", "53056", "53057", "53058", "53059", "53060",
    "53061", "53062", "53063", "53064", "53065", "53066", "53067", "53068", "53069", "53070",
    "53071", "53072", "53073", "53074", "53075", "53076", "53077", "53078", "53080", "53081",
    "53083", "54001", "54002", "54003", "54004", "54005",
];
