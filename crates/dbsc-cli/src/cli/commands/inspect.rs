//! `dbsc inspect <url>` – fetch a URL and validate its registration headers.

use anyhow::{Context, Result};
use dbsc_core::config::DbscConfig;
use dbsc_core::fetch_head;
use dbsc_core::{JoseAlgorithms, RegistrationParams};
use url::Url;

use super::output::render;

pub async fn run_inspect(cfg: &DbscConfig, url: &str, json: bool) -> Result<()> {
    let request_url = Url::parse(url).with_context(|| format!("invalid URL: {url}"))?;

    let target = request_url.to_string();
    let fetch_cfg = cfg.fetch.clone();
    let fetched = tokio::task::spawn_blocking(move || fetch_head::fetch_headers(&target, &fetch_cfg))
        .await
        .context("header fetch task failed")??;

    let params = RegistrationParams::create_if_valid_with(
        &request_url,
        &fetched.headers,
        &cfg.endpoint,
        &JoseAlgorithms,
    );
    tracing::info!(
        url = %request_url,
        status = fetched.status,
        valid = params.len(),
        "inspected registration headers"
    );
    if !json {
        println!("HTTP {}", fetched.status);
    }
    print!("{}", render(params, json)?);
    Ok(())
}
