use std::sync::Arc;

use aws_sdk_s3::{
    config::{BehaviorVersion, Credentials, Region},
    Config,
};

use crate::config::{S3Settings, StorageSettings};

use super::{local::LocalStorage, s3::S3Storage, SharedStorage};

pub fn setup_storage(settings: &StorageSettings) -> SharedStorage {
    match settings {
        StorageSettings::S3(s3) => {
            tracing::info!("using s3 bucket {}", s3.bucket_name);
            Arc::new(S3Storage::new(s3.bucket_name.clone(), s3_config(s3)))
        }
        StorageSettings::Local { root } => {
            tracing::info!("using local blob storage at {:?}", root);
            Arc::new(LocalStorage::new(root.clone()))
        }
    }
}

fn s3_config(settings: &S3Settings) -> Config {
    let credentials = Credentials::new(
        &settings.access_key,
        &settings.secret_access_key,
        None,
        None,
        "scribe-env",
    );

    let mut config = Config::builder()
        .behavior_version(BehaviorVersion::latest())
        .region(Region::new(settings.region.clone()))
        .force_path_style(true)
        .credentials_provider(credentials);

    if let Some(endpoint_url) = &settings.endpoint_url {
        config = config.endpoint_url(endpoint_url);
    }

    config.build()
}
