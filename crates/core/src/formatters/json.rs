use crate::Result;
use crate::report::SiteReport;

/// Configuration for JSON output
#[derive(Debug, Clone, Default)]
pub struct JsonConfig {
    /// Pretty print JSON output
    pub pretty: bool,
}

/// Render a report as the canonical JSON payload
pub fn convert_to_json(report: &SiteReport, config: &JsonConfig) -> Result<String> {
    let output = if config.pretty { serde_json::to_string_pretty(report)? } else { serde_json::to_string(report)? };
    Ok(output)
}
