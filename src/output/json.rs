use crate::error::Result;
use crate::EvalReport;

/// Render a report as pretty-printed JSON.
pub fn render(report: &EvalReport) -> Result<String> {
    let json = serde_json::to_string_pretty(report)?;
    Ok(json)
}
