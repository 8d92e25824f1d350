use crate::config::{CrawlConfig, FileConfig, OutputTarget, S3Target};
use crate::{ConfigError, ConfigResult};
use std::path::PathBuf;
use url::Url;

/// CLI flag values layered over the file configuration
#[derive(Debug, Default)]
pub struct Overrides {
    pub output_dir: Option<PathBuf>,
    pub valid_domains: Option<Vec<String>>,
    pub skip_write: bool,
    pub single_page: bool,
    pub s3_bucket: Option<String>,
    pub s3_region: Option<String>,
    pub s3_access_key: Option<String>,
    pub s3_secret_key: Option<String>,
}

/// Resolves the final crawl configuration from seed URL, file, and flags
///
/// Flags take precedence over file values field by field. The domain
/// allow-list defaults to the seed URL's host when neither source provides
/// one. Errors here are the only fatal startup errors: an unparseable or
/// non-http(s) seed URL, or an S3 target missing credentials.
pub fn resolve_config(
    seed: &str,
    file: FileConfig,
    overrides: Overrides,
) -> ConfigResult<CrawlConfig> {
    let seed_url = Url::parse(seed).map_err(|e| ConfigError::InvalidSeed {
        url: seed.to_string(),
        message: e.to_string(),
    })?;

    if seed_url.scheme() != "http" && seed_url.scheme() != "https" {
        return Err(ConfigError::InvalidSeed {
            url: seed.to_string(),
            message: format!("unsupported scheme '{}'", seed_url.scheme()),
        });
    }

    let host = seed_url
        .host_str()
        .ok_or_else(|| ConfigError::InvalidSeed {
            url: seed.to_string(),
            message: "missing host".to_string(),
        })?
        .to_string();

    let valid_domains = overrides
        .valid_domains
        .clone()
        .or_else(|| {
            if file.crawl.valid_domains.is_empty() {
                None
            } else {
                Some(file.crawl.valid_domains.clone())
            }
        })
        .unwrap_or_else(|| vec![host]);

    let output = resolve_output(&file, &overrides)?;

    Ok(CrawlConfig {
        seed_url,
        valid_domains,
        output,
        skip_write: overrides.skip_write || file.crawl.skip_write,
        single_page: overrides.single_page || file.crawl.single_page,
    })
}

fn resolve_output(file: &FileConfig, overrides: &Overrides) -> ConfigResult<OutputTarget> {
    let file_s3 = file.output.s3.as_ref();

    let bucket = overrides
        .s3_bucket
        .clone()
        .or_else(|| file_s3.and_then(|s3| s3.bucket.clone()));

    if let Some(bucket) = bucket {
        let access_key_id = overrides
            .s3_access_key
            .clone()
            .or_else(|| file_s3.and_then(|s3| s3.access_key.clone()))
            .ok_or_else(|| missing_s3("access key"))?;

        let secret_access_key = overrides
            .s3_secret_key
            .clone()
            .or_else(|| file_s3.and_then(|s3| s3.secret_key.clone()))
            .ok_or_else(|| missing_s3("secret key"))?;

        let region = overrides
            .s3_region
            .clone()
            .or_else(|| file_s3.and_then(|s3| s3.region.clone()))
            .unwrap_or_else(|| "us-east-1".to_string());

        return Ok(OutputTarget::S3(S3Target {
            bucket,
            region,
            access_key_id,
            secret_access_key,
        }));
    }

    let directory = overrides
        .output_dir
        .clone()
        .or_else(|| file.output.directory.clone().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("crawl"));

    Ok(OutputTarget::Directory(directory))
}

fn missing_s3(what: &str) -> ConfigError {
    ConfigError::Validation(format!("S3 output requires an {}", what))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_seed() {
        let config =
            resolve_config("http://test.com/start", FileConfig::default(), Overrides::default())
                .unwrap();

        assert_eq!(config.seed_url.as_str(), "http://test.com/start");
        assert_eq!(config.valid_domains, vec!["test.com"]);
        assert!(!config.skip_write);
        assert!(!config.single_page);
        assert!(matches!(
            config.output,
            OutputTarget::Directory(ref dir) if dir == &PathBuf::from("crawl")
        ));
    }

    #[test]
    fn test_explicit_domains_override_seed_host() {
        let overrides = Overrides {
            valid_domains: Some(vec!["a.com".to_string(), "b.com".to_string()]),
            ..Overrides::default()
        };
        let config = resolve_config("http://test.com/", FileConfig::default(), overrides).unwrap();
        assert_eq!(config.valid_domains, vec!["a.com", "b.com"]);
    }

    #[test]
    fn test_flags_override_file_domains() {
        let file = FileConfig {
            crawl: crate::config::CrawlSection {
                valid_domains: vec!["file.com".to_string()],
                ..Default::default()
            },
            ..Default::default()
        };
        let overrides = Overrides {
            valid_domains: Some(vec!["flag.com".to_string()]),
            ..Overrides::default()
        };
        let config = resolve_config("http://test.com/", file, overrides).unwrap();
        assert_eq!(config.valid_domains, vec!["flag.com"]);
    }

    #[test]
    fn test_invalid_seed_is_fatal() {
        let result = resolve_config("not a url", FileConfig::default(), Overrides::default());
        assert!(matches!(result, Err(ConfigError::InvalidSeed { .. })));
    }

    #[test]
    fn test_non_http_seed_is_fatal() {
        let result = resolve_config("ftp://test.com/", FileConfig::default(), Overrides::default());
        assert!(matches!(result, Err(ConfigError::InvalidSeed { .. })));
    }

    #[test]
    fn test_s3_target_resolved() {
        let overrides = Overrides {
            s3_bucket: Some("mirror".to_string()),
            s3_access_key: Some("AKIA".to_string()),
            s3_secret_key: Some("SECRET".to_string()),
            s3_region: Some("eu-west-1".to_string()),
            ..Overrides::default()
        };
        let config = resolve_config("http://test.com/", FileConfig::default(), overrides).unwrap();

        match config.output {
            OutputTarget::S3(target) => {
                assert_eq!(target.bucket, "mirror");
                assert_eq!(target.region, "eu-west-1");
            }
            other => panic!("expected S3 target, got {:?}", other),
        }
    }

    #[test]
    fn test_s3_without_credentials_is_fatal() {
        let overrides = Overrides {
            s3_bucket: Some("mirror".to_string()),
            ..Overrides::default()
        };
        let result = resolve_config("http://test.com/", FileConfig::default(), overrides);
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_s3_region_defaults() {
        let overrides = Overrides {
            s3_bucket: Some("mirror".to_string()),
            s3_access_key: Some("AKIA".to_string()),
            s3_secret_key: Some("SECRET".to_string()),
            ..Overrides::default()
        };
        let config = resolve_config("http://test.com/", FileConfig::default(), overrides).unwrap();

        match config.output {
            OutputTarget::S3(target) => assert_eq!(target.region, "us-east-1"),
            other => panic!("expected S3 target, got {:?}", other),
        }
    }
}
