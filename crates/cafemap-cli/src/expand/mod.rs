//! Dataset expansion pipeline.
//!
//! For every region: geocode to a viewport, walk a grid of search points,
//! merge the hits by `place_id`, then fetch each new place's details once
//! and write it into every category it qualifies for. All calls are awaited
//! one at a time.

mod writer;

use cafemap_core::{AppConfig, Category, Region, ServiceFlags};
use cafemap_db::{DocumentStore, MemoryStore, PgDocumentStore};
use cafemap_places::{Deduplicator, GridSpec, PlaceCandidate, PlacesClient, PlacesError};

pub(crate) use writer::{DatasetWriter, WriteOutcome};

// ---------------------------------------------------------------------------
// Settings and summary
// ---------------------------------------------------------------------------

/// Search and classification parameters injected into the driver.
#[derive(Debug, Clone)]
pub(crate) struct ExpandSettings {
    pub categories: Vec<Category>,
    pub keyword: String,
    pub radius_m: u32,
    pub step_m: f64,
}

impl ExpandSettings {
    /// Settings from config; an empty `categories` means every category.
    pub(crate) fn from_config(config: &AppConfig, categories: &[Category]) -> Self {
        let mut categories = if categories.is_empty() {
            Category::ALL.to_vec()
        } else {
            categories.to_vec()
        };
        categories.sort();
        categories.dedup();

        Self {
            categories,
            keyword: config.search_keyword.clone(),
            radius_m: config.search_radius_m,
            step_m: config.grid_step_m,
        }
    }
}

/// Counters for one region or a whole run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RunSummary {
    pub regions_processed: usize,
    pub regions_failed: usize,
    pub grid_points: u64,
    pub raw_hits: usize,
    pub candidates: usize,
    pub details_fetched: usize,
    pub detail_failures: usize,
    pub written: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl RunSummary {
    fn record(&mut self, outcome: WriteOutcome) {
        match outcome {
            WriteOutcome::Written => self.written += 1,
            WriteOutcome::Skipped => self.skipped += 1,
            WriteOutcome::Failed => self.failed += 1,
        }
    }

    fn merge(&mut self, other: &RunSummary) {
        self.regions_processed += other.regions_processed;
        self.regions_failed += other.regions_failed;
        self.grid_points = self.grid_points.saturating_add(other.grid_points);
        self.raw_hits += other.raw_hits;
        self.candidates += other.candidates;
        self.details_fetched += other.details_fetched;
        self.detail_failures += other.detail_failures;
        self.written += other.written;
        self.skipped += other.skipped;
        self.failed += other.failed;
    }
}

// ---------------------------------------------------------------------------
// Driver
// ---------------------------------------------------------------------------

pub(crate) struct PipelineDriver<'a, S> {
    places: &'a PlacesClient,
    writer: DatasetWriter<S>,
    settings: ExpandSettings,
}

impl<'a, S: DocumentStore> PipelineDriver<'a, S> {
    pub(crate) fn new(
        places: &'a PlacesClient,
        writer: DatasetWriter<S>,
        settings: ExpandSettings,
    ) -> Self {
        Self {
            places,
            writer,
            settings,
        }
    }

    pub(crate) fn writer(&self) -> &DatasetWriter<S> {
        &self.writer
    }

    /// Processes every region in order. A region that cannot be resolved is
    /// logged and counted; the run continues with the next one.
    pub(crate) async fn run(&self, regions: &[Region]) -> RunSummary {
        let mut total = RunSummary::default();

        for region in regions {
            tracing::info!(city = %region.city, district = %region.district, "expanding region");
            match self.run_region(region).await {
                Ok(summary) => {
                    tracing::info!(
                        city = %region.city,
                        district = %region.district,
                        grid_points = summary.grid_points,
                        raw_hits = summary.raw_hits,
                        candidates = summary.candidates,
                        written = summary.written,
                        skipped = summary.skipped,
                        failed = summary.failed,
                        detail_failures = summary.detail_failures,
                        "finished region"
                    );
                    total.merge(&summary);
                }
                Err(e) => {
                    tracing::warn!(
                        city = %region.city,
                        district = %region.district,
                        error = %e,
                        "could not resolve region, skipping"
                    );
                    total.regions_failed += 1;
                }
            }
        }

        total
    }

    async fn run_region(&self, region: &Region) -> Result<RunSummary, PlacesError> {
        let bounds = self.places.resolve_region(region).await?;
        let grid = GridSpec::new(bounds, self.settings.step_m);
        tracing::debug!(
            city = %region.city,
            district = %region.district,
            rows = grid.rows(),
            cols = grid.cols(),
            "generated search grid"
        );

        let mut summary = RunSummary {
            regions_processed: 1,
            grid_points: grid.len(),
            ..RunSummary::default()
        };

        let candidates = self.search_grid(&grid, &mut summary).await;
        summary.candidates = candidates.len();

        for candidate in &candidates {
            self.process_candidate(region, candidate, &mut summary).await;
        }

        Ok(summary)
    }

    /// Radius-searches every grid point and merges the hits by `place_id`.
    async fn search_grid(
        &self,
        grid: &GridSpec,
        summary: &mut RunSummary,
    ) -> Vec<PlaceCandidate> {
        let mut dedup = Deduplicator::new();
        for point in grid.points() {
            let hits = self
                .places
                .search_nearby(point, self.settings.radius_m, &self.settings.keyword)
                .await;
            tracing::debug!(
                lat = point.lat,
                lng = point.lng,
                hits = hits.len(),
                "searched grid point"
            );
            summary.raw_hits += hits.len();
            dedup.extend(hits);
        }
        tracing::debug!(
            unique = dedup.len(),
            duplicates = dedup.duplicates(),
            "merged grid results"
        );
        dedup.into_candidates()
    }

    /// Writes one candidate into every configured category it qualifies for.
    ///
    /// Details are fetched at most once, and only when some category is
    /// still missing the place and needs the details payload to decide.
    async fn process_candidate(
        &self,
        region: &Region,
        candidate: &PlaceCandidate,
        summary: &mut RunSummary,
    ) {
        let mut pending = Vec::new();

        for &category in &self.settings.categories {
            if !category.uses_detail()
                && !category.qualifies(candidate.rating, &ServiceFlags::default())
            {
                summary.record(WriteOutcome::Skipped);
                continue;
            }
            match self.writer.exists(category, region, candidate).await {
                Ok(true) => summary.record(WriteOutcome::Skipped),
                Ok(false) => pending.push(category),
                Err(e) => {
                    tracing::warn!(
                        %category,
                        place_id = %candidate.place_id,
                        error = %e,
                        "existence check failed"
                    );
                    summary.record(WriteOutcome::Failed);
                }
            }
        }

        if pending.is_empty() {
            return;
        }

        let detail = match self.places.fetch_detail(&candidate.place_id).await {
            Ok(detail) => detail,
            Err(e) => {
                tracing::warn!(
                    city = %region.city,
                    district = %region.district,
                    place_id = %candidate.place_id,
                    error = %e,
                    "no details available, skipping place"
                );
                summary.detail_failures += 1;
                return;
            }
        };
        summary.details_fetched += 1;

        for category in pending {
            let outcome = self
                .writer
                .upsert_if_absent(category, region, candidate, &detail)
                .await;
            summary.record(outcome);
        }
    }
}

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

/// Arguments of `cafemap expand`.
#[derive(Debug, Default)]
pub(crate) struct ExpandArgs {
    pub city: Option<String>,
    pub district: Option<String>,
    pub categories: Vec<Category>,
    pub dry_run: bool,
}

/// Selects the regions matching the optional city/district filters.
pub(crate) fn filter_regions(
    regions: Vec<Region>,
    city: Option<&str>,
    district: Option<&str>,
) -> Vec<Region> {
    regions
        .into_iter()
        .filter(|r| city.is_none_or(|c| r.city == c))
        .filter(|r| district.is_none_or(|d| r.district == d))
        .collect()
}

/// Runs the expansion over the configured regions.
///
/// With `dry_run` the records go to an in-memory store and nothing is
/// persisted; otherwise Postgres is connected and migrated first.
///
/// # Errors
///
/// Returns an error if the regions file cannot be loaded, the filters match
/// no region, the places client cannot be built, or the database is
/// unreachable. Per-region and per-place failures are logged, not returned.
pub(crate) async fn run_expand(config: &AppConfig, args: ExpandArgs) -> anyhow::Result<()> {
    let regions_file = cafemap_core::load_regions(&config.regions_path)?;
    let regions = filter_regions(
        regions_file.regions(),
        args.city.as_deref(),
        args.district.as_deref(),
    );
    if regions.is_empty() {
        anyhow::bail!("no configured regions match the given filters");
    }

    let settings = ExpandSettings::from_config(config, &args.categories);
    let places = PlacesClient::new(
        &config.google_api_key,
        &config.language,
        config.request_timeout_secs,
    )?
    .with_retry(config.max_retries, config.retry_backoff_base_ms);

    println!(
        "Expanding {} region(s) into {} categor{}{}...",
        regions.len(),
        settings.categories.len(),
        if settings.categories.len() == 1 { "y" } else { "ies" },
        if args.dry_run { " (dry run)" } else { "" },
    );

    if args.dry_run {
        let writer = DatasetWriter::new(MemoryStore::new());
        let driver = PipelineDriver::new(&places, writer, settings);
        let summary = driver.run(&regions).await;
        report(&driver, &summary).await;
    } else {
        let pool = cafemap_db::connect_pool_from_config(config).await?;
        cafemap_db::run_migrations(&pool).await?;
        let store = PgDocumentStore::new(pool);
        let driver = PipelineDriver::new(&places, DatasetWriter::new(store), settings);
        let summary = driver.run(&regions).await;
        report(&driver, &summary).await;
    }

    Ok(())
}

async fn report<S: DocumentStore>(driver: &PipelineDriver<'_, S>, summary: &RunSummary) {
    println!(
        "Run complete: {} region(s) processed, {} failed; {} grid points, {} hits, {} unique places",
        summary.regions_processed,
        summary.regions_failed,
        summary.grid_points,
        summary.raw_hits,
        summary.candidates,
    );
    println!(
        "  writes: {} written, {} skipped, {} failed; details: {} fetched, {} unavailable",
        summary.written,
        summary.skipped,
        summary.failed,
        summary.details_fetched,
        summary.detail_failures,
    );

    for category in &driver.settings.categories {
        match driver.writer().store().count_under(category.as_str()).await {
            Ok(count) => println!("  {category:<14} {count:>6} records"),
            Err(e) => tracing::warn!(%category, error = %e, "could not count records"),
        }
    }
}

#[cfg(test)]
#[path = "expand_test.rs"]
mod tests;
