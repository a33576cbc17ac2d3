use crate::error::{ChartError, ChartResult};

use super::{BackendConfig, ChartConfig, ChartStyle, LabelTimeZone, ProgressConfig};

pub(super) fn validate_chart_config(config: &ChartConfig) -> ChartResult<()> {
    config.canvas.validate()?;
    validate_label_timezone(config.timezone)?;
    validate_chart_style(config.style)?;
    validate_progress_config(&config.progress)?;
    validate_backend_config(&config.backend)
}

pub(super) fn validate_label_timezone(timezone: LabelTimeZone) -> ChartResult<LabelTimeZone> {
    let offset_minutes = i32::from(timezone.offset_minutes());
    if !(-14 * 60..=14 * 60).contains(&offset_minutes) {
        return Err(ChartError::InvalidData(
            "label timezone offset must be between -840 and 840 minutes".to_owned(),
        ));
    }
    Ok(timezone)
}

pub(super) fn validate_chart_style(style: ChartStyle) -> ChartResult<ChartStyle> {
    for color in [
        style.positive_color,
        style.negative_color,
        style.guide_color,
        style.marker_outline_color,
    ] {
        color.validate()?;
    }

    for (name, value) in [
        ("line_width", style.line_width),
        ("guide_width", style.guide_width),
        ("marker_radius", style.marker_radius),
        ("marker_outline_width", style.marker_outline_width),
        ("guide_dash.0", style.guide_dash.0),
    ] {
        if !value.is_finite() || value <= 0.0 {
            return Err(ChartError::InvalidData(format!(
                "style `{name}` must be finite and > 0"
            )));
        }
    }

    for (name, value) in [
        ("area_top_alpha", style.area_top_alpha),
        ("area_bottom_alpha", style.area_bottom_alpha),
    ] {
        if !value.is_finite() || !(0.0..=1.0).contains(&value) {
            return Err(ChartError::InvalidData(format!(
                "style `{name}` must be finite and in [0, 1]"
            )));
        }
    }

    if !style.guide_dash.1.is_finite() || style.guide_dash.1 < 0.0 {
        return Err(ChartError::InvalidData(
            "style `guide_dash.1` must be finite and >= 0".to_owned(),
        ));
    }

    Ok(style)
}

pub(super) fn validate_progress_config(config: &ProgressConfig) -> ChartResult<()> {
    if config.interval_ms == 0 {
        return Err(ChartError::InvalidData(
            "progress interval must be > 0 ms".to_owned(),
        ));
    }
    if config.stages.is_empty() {
        return Err(ChartError::InvalidData(
            "progress needs at least one stage".to_owned(),
        ));
    }
    if let Some(index) = config.stages.iter().position(|stage| stage.trim().is_empty()) {
        return Err(ChartError::InvalidData(format!(
            "progress stage {index} has an empty name"
        )));
    }
    Ok(())
}

pub(super) fn validate_backend_config(config: &BackendConfig) -> ChartResult<()> {
    let url = config.base_url.trim();
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(ChartError::InvalidData(format!(
            "backend url `{url}` must start with http:// or https://"
        )));
    }
    if config.timeout_ms == 0 {
        return Err(ChartError::InvalidData(
            "backend timeout must be > 0 ms".to_owned(),
        ));
    }
    Ok(())
}
