use std::{env, fmt, fmt::Display, net::SocketAddr, path::PathBuf, str::FromStr};

use tracing::info;

const DEFAULT_DATABASE_URL: &str = "sqlite://notes.db?mode=rwc";
const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8000";
const DEFAULT_BUCKET: &str = "hackchallengebucket";
const DEFAULT_MAX_UPLOAD_MB: &str = "10";

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("invalid {key} value {value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub database_url: String,
    pub listen_addr: SocketAddr,
    pub upload_dir: PathBuf,
    pub download_dir: PathBuf,
    pub max_upload_bytes: usize,
    pub storage: StorageSettings,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StorageSettings {
    S3(S3Settings),
    Local { root: PathBuf },
}

#[derive(Clone, PartialEq)]
pub struct S3Settings {
    pub bucket_name: String,
    pub region: String,
    pub endpoint_url: Option<String>,
    pub access_key: String,
    pub secret_access_key: String,
}

impl fmt::Debug for S3Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("S3Settings")
            .field("bucket_name", &self.bucket_name)
            .field("region", &self.region)
            .field("endpoint_url", &self.endpoint_url)
            .field("access_key", &self.access_key)
            .field("secret_access_key", &"<redacted>")
            .finish()
    }
}

impl Settings {
    /// Reads settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let vars = Vars(lookup);

        let max_upload_mb: usize = vars.parse("MAX_UPLOAD_MB", DEFAULT_MAX_UPLOAD_MB)?;
        let max_upload_bytes = max_upload_mb
            .checked_mul(1024 * 1024)
            .ok_or_else(|| ConfigError::Invalid {
                key: "MAX_UPLOAD_MB",
                value: max_upload_mb.to_string(),
                reason: String::from("too large"),
            })?;

        let storage = match vars.or("STORAGE_BACKEND", "s3").to_lowercase().as_str() {
            "s3" => StorageSettings::S3(S3Settings {
                bucket_name: vars.or("BUCKET_NAME", DEFAULT_BUCKET),
                region: vars.or("REGION", "us-east-1"),
                endpoint_url: vars.get("ENDPOINT_URL"),
                access_key: vars.required("ACCESS_KEY")?,
                secret_access_key: vars.required("SECRET_ACCESS_KEY")?,
            }),
            "local" => StorageSettings::Local {
                root: vars.or("LOCAL_STORAGE_DIR", "blobs").into(),
            },
            other => {
                return Err(ConfigError::Invalid {
                    key: "STORAGE_BACKEND",
                    value: other.to_string(),
                    reason: String::from("expected \"s3\" or \"local\""),
                })
            }
        };

        Ok(Self {
            database_url: vars.or("DATABASE_URL", DEFAULT_DATABASE_URL),
            listen_addr: vars.parse("LISTEN_ADDR", DEFAULT_LISTEN_ADDR)?,
            upload_dir: vars.or("UPLOAD_DIR", "uploads").into(),
            download_dir: vars.or("DOWNLOAD_DIR", "downloads").into(),
            max_upload_bytes,
            storage,
        })
    }
}

struct Vars<F>(F);

impl<F> Vars<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn get(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|value| !value.trim().is_empty())
    }

    fn or(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or_else(|| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
    }

    fn required(&self, key: &'static str) -> Result<String, ConfigError> {
        self.get(key).ok_or(ConfigError::Missing(key))
    }

    fn parse<T>(&self, key: &'static str, default: &str) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: Display,
    {
        let value = self.or(key, default);
        match value.trim().parse::<T>() {
            Ok(parsed) => Ok(parsed),
            Err(e) => Err(ConfigError::Invalid {
                key,
                reason: e.to_string(),
                value,
            }),
        }
    }
}
