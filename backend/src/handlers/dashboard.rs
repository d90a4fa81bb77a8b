//! HTTP handlers for the dashboard

use axum::{extract::State, response::Html, Json};

use shared::models::SensorReading;

use crate::error::AppResult;
use crate::services::dashboard::{DashboardContext, DashboardService};
use crate::AppState;

/// Render the dashboard HTML page
pub async fn dashboard_page(State(state): State<AppState>) -> Html<String> {
    let service = DashboardService::new(state.thingspeak.clone());
    let context = service.load().await;
    Html(render_dashboard(&context))
}

/// Return the dashboard context as JSON
pub async fn get_dashboard(State(state): State<AppState>) -> Json<DashboardContext> {
    let service = DashboardService::new(state.thingspeak.clone());
    Json(service.load().await)
}

/// Return the raw latest sensor reading without the demo fallback.
///
/// Unlike the dashboard, fetch failures surface here as API errors.
pub async fn get_latest_reading(State(state): State<AppState>) -> AppResult<Json<SensorReading>> {
    let reading = state.thingspeak.fetch_latest().await?;
    Ok(Json(reading))
}

/// Server-side HTML rendering of one dashboard context.
///
/// Exactly one of {live data, demo banner, inline validation error} appears.
fn render_dashboard(context: &DashboardContext) -> String {
    let banner = match &context.warning {
        Some(warning) => format!(
            r#"<div class="banner warning">{}</div>"#,
            escape_html(warning)
        ),
        None => String::new(),
    };

    let analysis = if context.status {
        let classification = context
            .classification
            .map(|c| c.to_string())
            .unwrap_or_default();
        let urgency = context.urgency.map(|u| u.to_string()).unwrap_or_default();
        format!(
            r#"<section class="analysis">
      <h2>Soil Analysis</h2>
      <p class="classification {class_lower}">Condition: <strong>{classification}</strong></p>
      <p class="urgency">Urgency: <strong>{urgency}</strong></p>
      <p class="recommendation">{recommendation}</p>
    </section>"#,
            class_lower = classification.to_lowercase(),
            classification = classification,
            urgency = urgency,
            recommendation = escape_html(&context.recommendation),
        )
    } else {
        format!(
            r#"<section class="analysis error">
      <h2>Soil Analysis</h2>
      <p class="error-message">{}</p>
    </section>"#,
            escape_html(&context.recommendation)
        )
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Smart Farm Dashboard</title>
</head>
<body>
  <h1>Smart Farm Dashboard</h1>
  {banner}
  <section class="sensors">
    <h2>Latest Reading</h2>
    <ul>
      <li>Soil moisture: {soil_moisture}%</li>
      <li>Temperature: {temperature}&deg;C</li>
      <li>Humidity: {humidity}%</li>
    </ul>
    <p class="timestamp">Recorded: {timestamp}</p>
  </section>
  {analysis}
</body>
</html>"#,
        banner = banner,
        soil_moisture = context.soil_moisture,
        temperature = context.temperature,
        humidity = context.humidity,
        timestamp = escape_html(&context.timestamp),
        analysis = analysis,
    )
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external::thingspeak::FetchError;
    use crate::services::dashboard::build_context;

    #[test]
    fn test_render_live_reading() {
        let reading = SensorReading {
            soil_moisture: 45.0,
            temperature: 25.5,
            humidity: 65.0,
            timestamp: "2025-06-01T08:30:00Z".to_string(),
            is_demo: false,
        };
        let html = render_dashboard(&build_context(Ok(reading)));

        assert!(html.contains("Soil moisture: 45%"));
        assert!(html.contains("<strong>Optimal</strong>"));
        assert!(html.contains("<strong>Low</strong>"));
        assert!(!html.contains("banner warning"));
    }

    #[test]
    fn test_render_demo_banner() {
        let html = render_dashboard(&build_context(Err(FetchError::NoData)));
        assert!(html.contains("banner warning"));
        assert!(html.contains("Demo mode"));
        assert!(html.contains("<strong>Optimal</strong>"));
    }

    #[test]
    fn test_render_inline_validation_error() {
        // An out-of-range reading renders the error state, not a classification
        let reading = SensorReading {
            soil_moisture: 150.0,
            temperature: 25.5,
            humidity: 65.0,
            timestamp: "2025-06-01T08:30:00Z".to_string(),
            is_demo: false,
        };
        let context = build_context(Ok(reading));
        assert!(!context.status);

        let html = render_dashboard(&context);
        assert!(html.contains("analysis error"));
        assert!(html.contains("outside the measurable"));
        assert!(!html.contains("Condition:"));
        assert!(!html.contains("Urgency:"));
        assert!(!html.contains("banner warning"));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<b>&\"</b>"), "&lt;b&gt;&amp;&quot;&lt;/b&gt;");
    }
}
