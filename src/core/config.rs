use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub dataset: DatasetConfig,
    pub model: ModelConfig,
    pub prediction_log: PredictionLogConfig,
    pub swagger: SwaggerConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
    pub max_request_body_size: usize,
}

/// Source dataset used to fit the model at startup
#[derive(Debug, Clone)]
pub struct DatasetConfig {
    /// Path to the delimited dataset file
    pub path: PathBuf,
    /// Field delimiter of the dataset file
    pub delimiter: u8,
    /// Identifier/metadata columns excluded from the features
    pub ignore_columns: Vec<String>,
    /// Column the model is trained to predict
    pub target_column: String,
    /// Number of rows shown in the dataset preview
    pub preview_rows: usize,
}

/// Decision tree hyperparameters
#[derive(Debug, Clone)]
pub struct ModelConfig {
    pub seed: u64,
    pub max_depth: Option<u16>,
    pub min_samples_leaf: usize,
    pub min_samples_split: usize,
}

/// Location of the append-only prediction log
#[derive(Debug, Clone)]
pub struct PredictionLogConfig {
    pub folder: PathBuf,
    pub file_name: String,
}

#[derive(Debug, Clone)]
pub struct SwaggerConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found (optional for production)
        if let Err(e) = dotenvy::dotenv() {
            if !e.to_string().contains("not found") {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        Ok(Config {
            app: AppConfig::from_env()?,
            dataset: DatasetConfig::from_env()?,
            model: ModelConfig::from_env()?,
            prediction_log: PredictionLogConfig::from_env()?,
            swagger: SwaggerConfig::from_env()?,
        })
    }
}

impl AppConfig {
    const DEFAULT_MAX_REQUEST_BODY_SIZE: usize = 1024 * 1024; // 1MB

    pub fn from_env() -> Result<Self, String> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|e| format!("Invalid PORT: {}", e))?;

        let cors_allowed_origins = split_list(
            &env::var("CORS_ALLOWED_ORIGINS").unwrap_or_else(|_| "*".to_string()),
        );

        let max_request_body_size = env::var("MAX_REQUEST_BODY_SIZE")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_REQUEST_BODY_SIZE.to_string())
            .parse::<usize>()
            .map_err(|_| "MAX_REQUEST_BODY_SIZE must be a valid number".to_string())?;

        Ok(Self {
            host,
            port,
            cors_allowed_origins,
            max_request_body_size,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl DatasetConfig {
    const DEFAULT_IGNORE_COLUMNS: &'static str = "ID_Provinsi,Provinsi,Tahun";
    const DEFAULT_TARGET_COLUMN: &'static str = "Pengangguran";
    const DEFAULT_PREVIEW_ROWS: usize = 5;

    pub fn from_env() -> Result<Self, String> {
        let path = env::var("DATASET_PATH")
            .map(PathBuf::from)
            .map_err(|_| "DATASET_PATH must be set".to_string())?;

        let delimiter = parse_delimiter(
            &env::var("DATASET_DELIMITER").unwrap_or_else(|_| ";".to_string()),
        )?;

        let ignore_columns = split_list(
            &env::var("IGNORE_COLUMNS").unwrap_or_else(|_| Self::DEFAULT_IGNORE_COLUMNS.to_string()),
        );

        let target_column = env::var("TARGET_COLUMN")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| Self::DEFAULT_TARGET_COLUMN.to_string());

        let preview_rows = env::var("PREVIEW_ROWS")
            .unwrap_or_else(|_| Self::DEFAULT_PREVIEW_ROWS.to_string())
            .parse::<usize>()
            .map_err(|_| "PREVIEW_ROWS must be a valid number".to_string())?;

        Ok(Self {
            path,
            delimiter,
            ignore_columns,
            target_column,
            preview_rows,
        })
    }
}

impl ModelConfig {
    const DEFAULT_SEED: u64 = 42;
    const DEFAULT_MIN_SAMPLES_LEAF: usize = 1;
    const DEFAULT_MIN_SAMPLES_SPLIT: usize = 2;

    pub fn from_env() -> Result<Self, String> {
        let seed = env::var("MODEL_SEED")
            .unwrap_or_else(|_| Self::DEFAULT_SEED.to_string())
            .parse::<u64>()
            .map_err(|_| "MODEL_SEED must be a valid number".to_string())?;

        // Unset or empty means the tree grows until leaves are pure
        let max_depth = match env::var("MODEL_MAX_DEPTH").ok().filter(|s| !s.is_empty()) {
            Some(raw) => Some(
                raw.parse::<u16>()
                    .map_err(|_| "MODEL_MAX_DEPTH must be a valid number".to_string())?,
            ),
            None => None,
        };

        let min_samples_leaf = env::var("MODEL_MIN_SAMPLES_LEAF")
            .unwrap_or_else(|_| Self::DEFAULT_MIN_SAMPLES_LEAF.to_string())
            .parse::<usize>()
            .map_err(|_| "MODEL_MIN_SAMPLES_LEAF must be a valid number".to_string())?;

        let min_samples_split = env::var("MODEL_MIN_SAMPLES_SPLIT")
            .unwrap_or_else(|_| Self::DEFAULT_MIN_SAMPLES_SPLIT.to_string())
            .parse::<usize>()
            .map_err(|_| "MODEL_MIN_SAMPLES_SPLIT must be a valid number".to_string())?;

        Ok(Self {
            seed,
            max_depth,
            min_samples_leaf,
            min_samples_split,
        })
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            seed: Self::DEFAULT_SEED,
            max_depth: None,
            min_samples_leaf: Self::DEFAULT_MIN_SAMPLES_LEAF,
            min_samples_split: Self::DEFAULT_MIN_SAMPLES_SPLIT,
        }
    }
}

impl PredictionLogConfig {
    pub fn from_env() -> Result<Self, String> {
        let folder = PathBuf::from(
            env::var("PREDICTION_LOG_DIR").unwrap_or_else(|_| "predictions".to_string()),
        );
        let file_name =
            env::var("PREDICTION_LOG_FILE").unwrap_or_else(|_| "predictions.csv".to_string());

        if file_name.trim().is_empty() {
            return Err("PREDICTION_LOG_FILE must not be empty".to_string());
        }

        Ok(Self { folder, file_name })
    }

    pub fn file_path(&self) -> PathBuf {
        self.folder.join(&self.file_name)
    }
}

impl SwaggerConfig {
    pub fn from_env() -> Result<Self, String> {
        // Only use credentials if they are non-empty
        let username = env::var("SWAGGER_USERNAME").ok().filter(|s| !s.is_empty());
        let password = env::var("SWAGGER_PASSWORD").ok().filter(|s| !s.is_empty());
        let title =
            env::var("SWAGGER_TITLE").unwrap_or_else(|_| "Prediksi Pengangguran API".to_string());
        let version = env::var("SWAGGER_VERSION").unwrap_or_else(|_| "0.1.0".to_string());
        let description = env::var("SWAGGER_DESCRIPTION").unwrap_or_else(|_| {
            "Prediksi tingkat pengangguran berdasarkan faktor ekonomi".to_string()
        });

        Ok(Self {
            username,
            password,
            title,
            version,
            description,
        })
    }

    /// Returns credentials in "username:password" format if auth is enabled
    pub fn credentials(&self) -> Option<String> {
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) => Some(format!("{}:{}", user, pass)),
            _ => None,
        }
    }
}

/// Split a comma-separated list, dropping blanks
fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn parse_delimiter(raw: &str) -> Result<u8, String> {
    match raw {
        "\\t" | "tab" => Ok(b'\t'),
        s if s.len() == 1 && s.is_ascii() => Ok(s.as_bytes()[0]),
        _ => Err("DATASET_DELIMITER must be a single ASCII character".to_string()),
    }
}
