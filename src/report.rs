/// Narrative report generation.
///
/// Formats a parameter's historical statistics and forecast listing into the
/// prompt payload for a generative-language API and posts it. The numeric
/// forecast never depends on this collaborator: any failure is recovered
/// locally by surfacing the error text in place of the narrative.

use serde::Deserialize;
use serde_json::json;

use crate::ingest::history::SeriesStats;
use crate::logging;
use crate::model::{ForecastPoint, PipelineError};
use crate::risk::RiskAssessment;

const DEFAULT_REPORT_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent";

// ============================================================================
// Prompt payload
// ============================================================================

/// Builds the textual summary the report collaborator consumes: parameter
/// identity, historical statistics, and the forecast listing with risk
/// tiers.
pub fn build_prompt(
    parameter: &str,
    unit: &str,
    stats: &SeriesStats,
    forecast: &[ForecastPoint],
    assessments: &[RiskAssessment],
) -> String {
    let mut prompt = format!(
        "Provide a comprehensive water quality report for {parameter} ({unit}).\n\
         \n\
         Historical data statistics:\n\
         - Mean: {:.4}\n\
         - Standard deviation: {:.4}\n\
         - Minimum: {:.4}\n\
         - Maximum: {:.4}\n\
         - Observations: {}\n\
         \n\
         Forecasted values:\n",
        stats.mean, stats.std_dev, stats.min, stats.max, stats.count
    );
    for (point, assessment) in forecast.iter().zip(assessments) {
        prompt.push_str(&format!(
            "Date: {}, Predicted value: {:.4}, Risk: {}\n",
            point.date.format("%Y-%m-%d"),
            point.value,
            assessment.tier
        ));
    }
    prompt.push_str(
        "\nFor each forecast date, analyze:\n\
         1. Potential water quality implications\n\
         2. Risk assessment\n\
         3. Recommended actions\n\
         4. Ecological impact\n\
         5. Potential sources of variation\n\
         \n\
         Format the report with clear headings and provide actionable insights.\n",
    );
    prompt
}

// ============================================================================
// API Client
// ============================================================================

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: String,
}

/// Posts the prompt to the generative-language API and returns the
/// narrative text.
pub fn generate_report(
    client: &reqwest::blocking::Client,
    api_url: &str,
    api_key: &str,
    prompt: &str,
) -> Result<String, Box<dyn std::error::Error>> {
    let url = format!("{}?key={}", api_url, api_key);
    let body = json!({
        "contents": [{"parts": [{"text": prompt}]}]
    });

    let response = client.post(&url).json(&body).send()?;
    if !response.status().is_success() {
        return Err(format!("Report API error: HTTP {}", response.status()).into());
    }

    let parsed: GenerateResponse = response.json()?;
    let text = parsed
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content.parts.into_iter().next())
        .map(|p| p.text)
        .ok_or("Report API returned no candidates")?;
    Ok(text)
}

/// Fail-open wrapper: on any failure, returns the error text as the
/// narrative so the numeric forecast still renders.
pub fn generate_report_or_error_text(
    client: &reqwest::blocking::Client,
    api_url: Option<&str>,
    api_key: &str,
    prompt: &str,
) -> String {
    let url = api_url.unwrap_or(DEFAULT_REPORT_URL);
    match generate_report(client, url, api_key, prompt) {
        Ok(text) => text,
        Err(err) => {
            logging::log_report_failure("report generation", err.as_ref());
            PipelineError::ReportGeneration(err.to_string()).to_string()
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
