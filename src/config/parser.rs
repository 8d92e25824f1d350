use crate::config::FileConfig;
use crate::ConfigResult;
use std::fs;
use std::path::Path;

/// Loads and parses a TOML configuration file
///
/// # Example
///
/// ```no_run
/// use petrify::config::load_config;
/// use std::path::Path;
///
/// let file = load_config(Path::new("petrify.toml")).unwrap();
/// println!("{} configured domains", file.crawl.valid_domains.len());
/// ```
pub fn load_config(path: &Path) -> ConfigResult<FileConfig> {
    let content = fs::read_to_string(path)?;
    let config: FileConfig = toml::from_str(&content)?;
    Ok(config)
}
