//! Text and JSON rendering of registration requests.

use anyhow::Result;
use dbsc_core::RegistrationParams;
use serde_json::json;
use std::fmt::Write as _;

/// Consumes `params` and renders them for stdout.
pub(super) fn render(params: Vec<RegistrationParams>, json: bool) -> Result<String> {
    if json {
        let entries: Vec<_> = params
            .into_iter()
            .map(|p| {
                let (endpoint, algorithms, challenge) = p.into_parts();
                json!({
                    "registration_endpoint": endpoint.as_str(),
                    "supported_algorithms": algorithms,
                    "challenge": challenge,
                })
            })
            .collect();
        return Ok(serde_json::to_string_pretty(&entries)? + "\n");
    }

    if params.is_empty() {
        return Ok("No valid registration requests.\n".to_string());
    }

    let mut out = String::new();
    for (i, p) in params.into_iter().enumerate() {
        let (endpoint, algorithms, challenge) = p.into_parts();
        let names: Vec<String> = algorithms.iter().map(|a| a.to_string()).collect();
        writeln!(out, "[{i}] endpoint:   {endpoint}")?;
        writeln!(out, "    algorithms: {}", names.join(", "))?;
        writeln!(out, "    challenge:  {challenge}")?;
    }
    Ok(out)
}
