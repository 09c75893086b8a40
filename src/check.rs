//! Check pipeline
//!
//! Resolved request -> fetch -> extract -> evaluate. Every stage except the
//! fetcher is a pure function.

use log::{debug, info};

use crate::evaluate::evaluate;
use crate::extract::parse_response;
use crate::fetch::{build_url, redact, Fetcher, HttpFetcher};
use crate::models::{CheckError, CheckSettings, EvaluationResult, RequestConfig};

/// Run one check against the given fetcher
pub fn run<F: Fetcher>(
    request: &RequestConfig,
    fetcher: &F,
) -> Result<EvaluationResult, CheckError> {
    let url = build_url(request)?;
    debug!("Querying {} (auth: {})", redact(&url), request.auth.mode());

    let fetched = fetcher.fetch(&url, request.auth.token())?;
    let response = match parse_response(&fetched.body) {
        Ok(response) => response,
        // A non-2xx body that is not an OCS document came from something in front of Nextcloud
        Err(err) if !fetched.status.is_success() => {
            debug!("Discarding HTTP {} body: {}", fetched.status, err);
            return Err(CheckError::Unreachable(format!("HTTP {}", fetched.status)));
        }
        Err(err) => return Err(err),
    };
    debug!(
        "OCS status {} {:?}: {:?}",
        response.status.statuscode, response.status.status, response.status.message
    );

    let result = evaluate(&response.status, response.metrics.as_ref());
    if result.perf_data.is_empty() {
        info!("Nextcloud reported status code {}", response.status.statuscode);
    }
    Ok(result)
}

/// Run one check over HTTP with the configured timeout
pub fn execute(settings: &CheckSettings) -> Result<EvaluationResult, CheckError> {
    let fetcher = HttpFetcher::new(settings.timeout)?;
    run(&settings.request, &fetcher)
}
