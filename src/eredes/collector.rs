use chrono::{DateTime, Local};

use super::auth::AuthClient;
use super::extract::RecordExtractor;
use super::usage::UsageFetcher;
use super::window::{compute_window, WindowConfig};
use crate::error::CollectorError;
use crate::model::{emit_readings, Accumulator, Reading};

/// Runs one full collection cycle: window → sign-in → fetch → extract.
///
/// Every collaborator is injected at construction; there is no global
/// registry. Cycles are strictly sequential and carry no state from one to
/// the next — the window is recomputed and a fresh sign-in happens every
/// time.
pub struct LoadCurveCollector {
    auth: Box<dyn AuthClient>,
    fetcher: UsageFetcher,
    extractor: RecordExtractor,
    window: WindowConfig,
    cpe: String,
    dry_run: bool,
}

impl LoadCurveCollector {
    pub fn new(
        auth: Box<dyn AuthClient>,
        fetcher: UsageFetcher,
        extractor: RecordExtractor,
        window: WindowConfig,
        cpe: impl Into<String>,
        dry_run: bool,
    ) -> Self {
        Self {
            auth,
            fetcher,
            extractor,
            window,
            cpe: cpe.into(),
            dry_run,
        }
    }

    /// Collects all readings for the cycle anchored at `now`.
    ///
    /// Any failure discards the cycle; nothing partial is returned.
    pub async fn collect(&self, now: DateTime<Local>) -> Result<Vec<Reading>, CollectorError> {
        let window = compute_window(now, &self.window);
        tracing::debug!(start = %window.start, end = %window.end, "computed request window");

        let token = self.auth.sign_in().await?;
        if token.is_empty() {
            tracing::warn!("sign-in returned no token, skipping usage fetch");
            return Ok(Vec::new());
        }

        if self.dry_run {
            tracing::info!("dry run enabled, skipping usage fetch");
            return Ok(Vec::new());
        }

        let payload = self.fetcher.fetch(&window, &self.cpe, &token).await?;
        let mut readings = self
            .extractor
            .extract(&payload)?
            .collect::<Result<Vec<_>, _>>()?;
        for reading in &mut readings {
            reading.tags.insert("cpe".to_string(), self.cpe.clone());
        }

        tracing::info!(count = readings.len(), "extracted load-curve readings");
        Ok(readings)
    }

    /// One host-facing cycle: collect and emit.
    ///
    /// Failures are reported to the accumulator instead of propagating, so a
    /// bad cycle yields zero metrics and leaves the next cycle unaffected.
    pub async fn gather(&self, acc: &dyn Accumulator, now: DateTime<Local>) {
        match self.collect(now).await {
            Ok(readings) => emit_readings(acc, readings),
            Err(error) => acc.add_error(error),
        }
    }
}
