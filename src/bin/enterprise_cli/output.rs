//! Output formatting for gatling-enterprise CLI
//!
//! Human-readable and JSON renderings of command results. Logs go to stderr,
//! these go to stdout.

use serde_json::json;
use std::path::Path;

use enterprise_types::SimulationStartResult;
use gatling_enterprise::UploadOutcome;
use package_scanner::ScanResult;

fn pretty(value: &serde_json::Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}

/// Format a started run
pub fn format_start_result(result: &SimulationStartResult, json_output: bool) -> String {
    if json_output {
        return serde_json::to_string_pretty(result).unwrap_or_else(|_| "{}".to_string());
    }

    let mut out = String::new();
    if result.created_simulation {
        out.push_str(&format!("\x1b[32m✓ Created and started {}\x1b[0m\n", result.simulation));
    } else {
        out.push_str(&format!("\x1b[32m✓ Started {}\x1b[0m\n", result.simulation));
    }
    out.push_str(&format!("  Class:   {}\n", result.run_summary.class_name));
    out.push_str(&format!("  Run id:  {}\n", result.run_summary.run_id));
    out.push_str(&format!("  Reports: {}", result.run_summary.reports_path));
    out
}

pub fn format_cancelled(json_output: bool) -> String {
    if json_output {
        pretty(&json!({ "success": false, "cancelled": true }))
    } else {
        "Operation cancelled".to_string()
    }
}

pub fn format_upload(outcome: UploadOutcome, json_output: bool) -> String {
    match (outcome, json_output) {
        (UploadOutcome::Uploaded(bytes), true) => {
            pretty(&json!({ "uploaded": true, "bytes": bytes }))
        }
        (UploadOutcome::Skipped, true) => pretty(&json!({ "uploaded": false, "bytes": 0 })),
        (UploadOutcome::Uploaded(bytes), false) => format!("Package uploaded ({} bytes)", bytes),
        (UploadOutcome::Skipped, false) => {
            "No code changes detected, package upload skipped".to_string()
        }
    }
}

pub fn format_checksum(file: &Path, checksum: &str, json_output: bool) -> String {
    if json_output {
        pretty(&json!({ "file": file.display().to_string(), "checksum": checksum }))
    } else {
        checksum.to_string()
    }
}

pub fn format_scan(result: &ScanResult, json_output: bool) -> String {
    if json_output {
        return pretty(&json!({
            "simulationClasses": result.simulation_classes,
            "highestJavaVersion": result.highest_java_version.as_ref().map(|h| json!({
                "className": h.class_name,
                "javaVersion": h.java_version,
            })),
        }));
    }

    let mut out = String::new();
    if result.simulation_classes.is_empty() {
        out.push_str("No simulation class found\n");
    } else {
        out.push_str("\x1b[1mSimulation classes:\x1b[0m\n");
        for class_name in &result.simulation_classes {
            out.push_str(&format!("  {}\n", class_name));
        }
    }
    if let Some(highest) = &result.highest_java_version {
        out.push_str(&format!(
            "Compiled for Java {} (highest: {})",
            highest.java_version, highest.class_name
        ));
    }
    out.trim_end().to_string()
}
