//! Offline markdown summary derived from a semantic report alone.

use crate::semantic::{ComplexityLevel, SemanticReport};

pub fn render_summary(report: &SemanticReport) -> String {
    format!(
        "# {} API\n\n## Overview\n{}\n\n## Implementation Details\n{}\n\n## Security Profile\n{}\n\n## Usage Considerations\n{}\n",
        report.context.resource_type,
        overview(report),
        implementation_details(report),
        security_profile(report),
        usage_considerations(report)
    )
}

fn overview(report: &SemanticReport) -> String {
    let context = &report.context;
    let analysis = &report.analysis;
    let closing = if analysis.complexity.level == ComplexityLevel::Complex {
        "Due to its sophisticated implementation, careful attention to error handling and input validation is recommended."
    } else {
        "The straightforward implementation allows for easy integration and usage."
    };

    format!(
        "This {} API endpoint manages {} resources within the {} domain.\nIt implements a {} architecture with {} core operations.\n\n{}",
        context.version,
        context.resource_type,
        context.domain.as_deref().unwrap_or("main"),
        analysis.complexity.level,
        analysis.functionality.method_analysis.len(),
        closing
    )
}

fn implementation_details(report: &SemanticReport) -> String {
    let analysis = &report.analysis;
    let flow = &analysis.data_flow;
    let mut details = Vec::new();

    if analysis.patterns.asynchronous.present {
        if flow.async_operations.is_empty() {
            details.push("Implements asynchronous processing".to_string());
        } else {
            details.push(format!(
                "Implements asynchronous processing with {}",
                flow.async_operations.join(", ")
            ));
        }
    }

    if analysis.patterns.stream_processing.present {
        let directions: Vec<&str> = [
            (flow.has_input_stream, "input"),
            (flow.has_output_stream, "output"),
        ]
        .into_iter()
        .filter_map(|(present, name)| present.then_some(name))
        .collect();

        if directions.is_empty() {
            details.push("Utilizes stream-based data handling".to_string());
        } else {
            details.push(format!(
                "Utilizes stream-based data handling for {}",
                directions.join(" and ")
            ));
        }
    }

    if !flow.data_transformations.is_empty() {
        details.push(format!(
            "Performs data transformations: {}",
            flow.data_transformations.join(", ")
        ));
    }

    details.join("\n\n")
}

fn security_profile(report: &SemanticReport) -> String {
    let security = &report.analysis.security;
    let implemented = security.measures.implemented();

    let measures = if implemented.is_empty() {
        "Basic security implementation with standard measures".to_string()
    } else {
        let lines: Vec<String> = implemented.iter().map(|m| format!("- {}", m)).collect();
        format!("Implemented measures:\n{}", lines.join("\n"))
    };

    format!("Security Level: {}\n{}", security.level, measures)
}

fn usage_considerations(report: &SemanticReport) -> String {
    let analysis = &report.analysis;
    let mut considerations = Vec::new();

    if analysis.patterns.caching.present {
        considerations.push("Response caching available for performance optimization".to_string());
    }
    if !analysis.data_flow.async_operations.is_empty() {
        considerations.push(format!(
            "Asynchronous operations: {}",
            analysis.data_flow.async_operations.join(", ")
        ));
    }
    if analysis.patterns.monitoring.present {
        considerations.push("Performance metrics and monitoring enabled".to_string());
    }

    considerations.join("\n\n")
}
