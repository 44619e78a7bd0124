//! Upload analysis as seen through the admin feature flags.

use std::path::PathBuf;
use tracing::{info, warn};

use crate::analysis::{self, AnalysisReport};
use crate::error::GatehouseError;
use crate::service::settings;
use crate::store::KeyValueStore;
use crate::types::Feature;

/// Analyze each uploaded sheet, honouring the stored admin settings.
///
/// Dashboard and upload must both be enabled and at most `maxUploads` files
/// may be submitted at once. With insights disabled only the KPIs are kept.
pub async fn analyze_uploads<S: KeyValueStore>(
    store: &S,
    paths: &[PathBuf],
) -> Result<Vec<AnalysisReport>, GatehouseError> {
    let settings = settings::load(store).await?;

    for feature in [Feature::Dashboard, Feature::Upload] {
        if !settings.is_enabled(feature) {
            warn!(%feature, "analysis refused: feature disabled");
            return Err(GatehouseError::FeatureDisabled(feature));
        }
    }

    if paths.len() > settings.max_uploads as usize {
        warn!(
            requested = paths.len(),
            max = settings.max_uploads,
            "analysis refused: too many uploads"
        );
        return Err(GatehouseError::UploadLimitExceeded {
            requested: paths.len(),
            max: settings.max_uploads,
        });
    }

    let with_charts = settings.is_enabled(Feature::Insights);
    paths
        .iter()
        .map(|path| {
            let mut report = analysis::analyze_file(path)?;
            if !with_charts {
                report.charts = None;
            }
            info!(path = %path.display(), revenue = report.kpis.revenue, "upload analyzed");
            Ok(report)
        })
        .collect()
}
