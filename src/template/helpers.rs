// ABOUTME: Handlebars helper functions available to every page, layout, and partial
// ABOUTME: Covers time formatting, casing, defaults, joins, nav highlighting, and JSON output

use chrono::{DateTime, TimeZone, Utc};
use handlebars::{Context, Handlebars, Helper, Output, RenderContext, RenderError};

/// Default display format for activity timestamps, e.g. "Jan 2, 3:04 PM"
pub const DEFAULT_TIME_FORMAT: &str = "%b %-d, %-I:%M %p";

/// Format time helper - formats an RFC3339 or unix timestamp
pub fn format_time_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _rc: &mut RenderContext,
    out: &mut dyn Output,
) -> std::result::Result<(), RenderError> {
    let value = h
        .param(0)
        .map(|v| v.value())
        .ok_or_else(|| RenderError::new("format_time helper requires timestamp parameter"))?;

    let format = h
        .param(1)
        .and_then(|v| v.value().as_str())
        .unwrap_or(DEFAULT_TIME_FORMAT);

    let datetime: DateTime<Utc> = if let Some(text) = value.as_str() {
        DateTime::parse_from_rfc3339(text)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| RenderError::new(format!("Failed to parse timestamp: {}", e)))?
    } else if let Some(seconds) = value.as_i64() {
        Utc.timestamp_opt(seconds, 0)
            .single()
            .ok_or_else(|| RenderError::new(format!("Timestamp out of range: {}", seconds)))?
    } else {
        return Err(RenderError::new(
            "format_time helper expects a string or integer timestamp",
        ));
    };

    out.write(&datetime.format(format).to_string())?;
    Ok(())
}

/// Uppercase helper
pub fn upper_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _rc: &mut RenderContext,
    out: &mut dyn Output,
) -> std::result::Result<(), RenderError> {
    let input = h
        .param(0)
        .and_then(|v| v.value().as_str())
        .ok_or_else(|| RenderError::new("upper helper requires input parameter"))?;

    out.write(&input.to_uppercase())?;
    Ok(())
}

/// Lowercase helper
pub fn lower_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _rc: &mut RenderContext,
    out: &mut dyn Output,
) -> std::result::Result<(), RenderError> {
    let input = h
        .param(0)
        .and_then(|v| v.value().as_str())
        .ok_or_else(|| RenderError::new("lower helper requires input parameter"))?;

    out.write(&input.to_lowercase())?;
    Ok(())
}

/// Join helper - joins array elements with separator
pub fn join_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _rc: &mut RenderContext,
    out: &mut dyn Output,
) -> std::result::Result<(), RenderError> {
    let separator = h.param(0).and_then(|v| v.value().as_str()).unwrap_or(",");

    let array = h
        .param(1)
        .and_then(|v| v.value().as_array())
        .ok_or_else(|| RenderError::new("join helper requires array parameter"))?;

    let strings: std::result::Result<Vec<&str>, RenderError> = array
        .iter()
        .map(|v| {
            v.as_str()
                .ok_or_else(|| RenderError::new("Array elements must be strings"))
        })
        .collect();

    out.write(&strings?.join(separator))?;
    Ok(())
}

/// Default helper - provides default value if variable is empty
pub fn default_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _rc: &mut RenderContext,
    out: &mut dyn Output,
) -> std::result::Result<(), RenderError> {
    let value = h.param(0).and_then(|v| v.value().as_str()).unwrap_or("");

    let default_value = h
        .param(1)
        .and_then(|v| v.value().as_str())
        .ok_or_else(|| RenderError::new("default helper requires default value parameter"))?;

    let result = if value.is_empty() {
        default_value
    } else {
        value
    };

    out.write(result)?;
    Ok(())
}

/// Active helper - writes "active" when the current page matches the nav id
pub fn active_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _rc: &mut RenderContext,
    out: &mut dyn Output,
) -> std::result::Result<(), RenderError> {
    let current = h.param(0).and_then(|v| v.value().as_str()).unwrap_or("");
    let nav_id = h
        .param(1)
        .and_then(|v| v.value().as_str())
        .ok_or_else(|| RenderError::new("active helper requires a navigation id"))?;

    if current == nav_id {
        out.write("active")?;
    }
    Ok(())
}

/// JSON helper - serializes any value, e.g. for data attributes
pub fn json_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _rc: &mut RenderContext,
    out: &mut dyn Output,
) -> std::result::Result<(), RenderError> {
    let value = h
        .param(0)
        .map(|v| v.value())
        .ok_or_else(|| RenderError::new("json helper requires a value"))?;

    let encoded = serde_json::to_string(value)
        .map_err(|e| RenderError::new(format!("JSON encode error: {}", e)))?;
    out.write(&encoded)?;
    Ok(())
}

/// Register all built-in helpers with a Handlebars instance
pub fn register_helpers(handlebars: &mut Handlebars) {
    handlebars.register_helper("format_time", Box::new(format_time_helper));
    handlebars.register_helper("upper", Box::new(upper_helper));
    handlebars.register_helper("lower", Box::new(lower_helper));
    handlebars.register_helper("join", Box::new(join_helper));
    handlebars.register_helper("default", Box::new(default_helper));
    handlebars.register_helper("active", Box::new(active_helper));
    handlebars.register_helper("json", Box::new(json_helper));
}
