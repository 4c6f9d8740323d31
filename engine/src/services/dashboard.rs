// Dashboard service: one cached snapshot in, one full report out.
use crate::config::settings::EngineSettings;
use crate::data::sheet_parser::SnapshotParser;
use crate::data::snapshot_cache::{SnapshotCache, SourceKey};
use crate::error::EngineError;
use crate::metrics::{allocation, capital, company, concentration, loans, summary, timeline};
use shared::models::{DashboardReport, SnapshotTables};
use std::path::PathBuf;
use std::sync::Arc;

/// One CSV extract of the spreadsheet, identified for caching purposes by
/// id and version. Bump `version` after the sheet changed to force a
/// reload on the next render.
#[derive(Debug, Clone)]
pub struct SnapshotSource {
    pub path: PathBuf,
    pub source_id: String,
    pub version: u64,
}

impl SnapshotSource {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let source_id = path.display().to_string();
        SnapshotSource {
            path,
            source_id,
            version: 0,
        }
    }

    fn key(&self) -> SourceKey {
        SourceKey::new(self.source_id.clone(), self.version)
    }
}

/// Owns the snapshot cache and the engine settings. Every metric is
/// recomputed per call from the immutable cached tables; only the parsed
/// snapshot itself is reused between render cycles.
pub struct DashboardService {
    cache: SnapshotCache,
    settings: EngineSettings,
}

impl DashboardService {
    pub fn new(settings: EngineSettings) -> Self {
        DashboardService {
            cache: SnapshotCache::new(),
            settings,
        }
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Loads the snapshot through the cache. Repeated renders of the same
    /// source version reuse the parsed tables without touching the file.
    pub fn tables(&mut self, source: &SnapshotSource) -> Result<Arc<SnapshotTables>, EngineError> {
        let delimiter = self.settings.csv_delimiter as u8;
        let path = source.path.clone();
        self.cache
            .get_or_load(&source.key(), || SnapshotParser::load_csv(&path, delimiter))
    }

    /// Drops every cached version of the source.
    pub fn invalidate(&mut self, source: &SnapshotSource) {
        self.cache.invalidate(&source.source_id);
    }

    /// One full render-cycle computation: everything the dashboard views
    /// consume, derived from a single snapshot.
    pub fn report(&mut self, source: &SnapshotSource) -> Result<DashboardReport, EngineError> {
        let tables = self.tables(source)?;
        tracing::info!(
            investments = tables.investments.len(),
            share_rows = tables.share_totals.len(),
            loans = tables.loans.len(),
            warnings = tables.warnings.len(),
            "building dashboard report"
        );

        let capital = match capital::wacc(&tables.investments, &tables.loans, &self.settings) {
            Ok(structure) => Some(structure),
            Err(EngineError::ZeroCapital) => {
                tracing::warn!("total capital is zero, leaving WACC undefined");
                None
            }
            Err(err) => return Err(err),
        };

        Ok(DashboardReport {
            summary: summary::portfolio(&tables.investments),
            company_concentration: concentration::by_company(&tables.investments),
            source_concentration: concentration::by_source(&tables.investments),
            capital,
            companies: company::performance(&tables.investments, &tables.share_totals),
            repayment_plan: loans::repayment_plan(&tables.loans),
            growth_timeline: timeline::growth(&tables.investments),
            allocation: allocation::by_source(&tables.investments),
            warnings: tables.warnings.clone(),
        })
    }
}
