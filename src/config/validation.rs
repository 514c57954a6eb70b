use crate::config::types::{Config, CrawlerConfig, ExtractionConfig, FilterConfig, OutputConfig};
use crate::ConfigError;
use scraper::Selector;

/// Deepest crawl the configuration accepts
const MAX_DEPTH_LIMIT: u32 = 20;

/// Upper bound for a single request timeout (seconds)
const MAX_REQUEST_TIMEOUT_SECS: u64 = 300;

/// Upper bound for the run deadline (one day)
const MAX_RUN_TIMEOUT_MINUTES: u64 = 24 * 60;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_filter_config(&config.filter)?;
    validate_extraction_config(&config.extraction)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.max_depth > MAX_DEPTH_LIMIT {
        return Err(ConfigError::Validation(format!(
            "max_depth must be <= {}, got {}",
            MAX_DEPTH_LIMIT, config.max_depth
        )));
    }

    if config.timeout_minutes > MAX_RUN_TIMEOUT_MINUTES {
        return Err(ConfigError::Validation(format!(
            "timeout_minutes must be <= {}, got {}",
            MAX_RUN_TIMEOUT_MINUTES, config.timeout_minutes
        )));
    }

    if config.request_timeout_secs < 1 || config.request_timeout_secs > MAX_REQUEST_TIMEOUT_SECS {
        return Err(ConfigError::Validation(format!(
            "request_timeout_secs must be between 1 and {}, got {}",
            MAX_REQUEST_TIMEOUT_SECS, config.request_timeout_secs
        )));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates link filter rules
fn validate_filter_config(config: &FilterConfig) -> Result<(), ConfigError> {
    for ext in &config.skip_extensions {
        if !ext.starts_with('.') || ext.len() < 2 {
            return Err(ConfigError::Validation(format!(
                "skip extension '{}' must start with '.' and name a suffix",
                ext
            )));
        }
    }

    if config.skip_paths.iter().any(|p| p.is_empty()) {
        return Err(ConfigError::Validation(
            "skip paths cannot contain empty entries".to_string(),
        ));
    }

    Ok(())
}

/// Validates extraction selectors
fn validate_extraction_config(config: &ExtractionConfig) -> Result<(), ConfigError> {
    if config.title_selectors.is_empty() {
        return Err(ConfigError::Validation(
            "title_selectors cannot be empty".to_string(),
        ));
    }

    if config.content_selectors.is_empty() {
        return Err(ConfigError::Validation(
            "content_selectors cannot be empty".to_string(),
        ));
    }

    for selector in config
        .title_selectors
        .iter()
        .chain(&config.content_selectors)
        .chain(&config.strip_selectors)
    {
        parse_selector(selector)?;
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.directory.is_empty() {
        return Err(ConfigError::Validation(
            "output directory cannot be empty".to_string(),
        ));
    }

    if config.document_title.trim().is_empty() {
        return Err(ConfigError::Validation(
            "document_title cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Parses a CSS selector, mapping failures into a configuration error
pub(crate) fn parse_selector(selector: &str) -> Result<Selector, ConfigError> {
    Selector::parse(selector).map_err(|e| ConfigError::InvalidSelector {
        selector: selector.to_string(),
        message: format!("{:?}", e),
    })
}
