//! Download coordinator
//!
//! Sequences the remote calls of a run: catalog, per-feature overview and the
//! downloads for the selected features. Everything runs one request at a time.
//! Failures below the catalog level are reported and skipped, never fatal:
//!
//! - a feature that cannot be listed is skipped, later features still run
//! - a file that cannot be fetched or written is counted as failed, later
//!   files still run

use std::path::Path;

use tracing::{debug, info, warn};

use crate::app::client::local_destination;
use crate::app::models::{
    CatalogListing, DownloadedFile, FeatureListing, FeatureReport, FileReport,
};
use crate::app::source::FeatureSource;
use crate::errors::{DownloadError, DownloadResult, RemoteResult};

pub mod events;
pub mod signals;
pub mod stats;

pub use events::{Reporter, RunEvent};
pub use signals::{run_until, run_until_interrupted, wait_for_interrupt};
pub use stats::{DownloadStats, SummaryOutcome};

/// Everything that happened while downloading the selected features
#[derive(Debug, Default)]
pub struct DownloadReport {
    pub features: Vec<FeatureReport>,
    pub stats: DownloadStats,
}

/// Drives a `FeatureSource` through one run
#[derive(Debug)]
pub struct Coordinator<S> {
    source: S,
}

impl<S: FeatureSource> Coordinator<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetches the catalog; failure here ends the run
    pub async fn fetch_catalog(&self) -> RemoteResult<Vec<String>> {
        let features = self.source.fetch_available_features().await?;
        info!("Catalog lists {} features", features.len());
        Ok(features)
    }

    /// Lists the files of every feature for the overview
    ///
    /// Best effort: a feature that cannot be listed is reported and the
    /// overview moves on to the next one.
    pub async fn describe_catalog(
        &self,
        features: &[String],
        reporter: &mut dyn Reporter,
    ) -> CatalogListing {
        let mut listing = CatalogListing::default();

        for (index, feature) in features.iter().enumerate() {
            let position = index + 1;
            let files = self.source.fetch_feature_files(feature).await;

            match &files {
                Ok(files) => reporter.report(RunEvent::CatalogFeature {
                    position,
                    feature,
                    files,
                }),
                Err(error) => {
                    warn!("Could not list files for {}: {}", feature, error);
                    reporter.report(RunEvent::CatalogFeatureUnavailable {
                        position,
                        feature,
                        error,
                    });
                }
            }

            listing.features.push(FeatureListing {
                name: feature.clone(),
                files,
            });
        }

        listing
    }

    /// Downloads every file of every chosen feature into `target_dir`
    ///
    /// Features are processed in the order given and files in listing order.
    /// A file lands at `target_dir/<path relative to its feature>`.
    pub async fn download_features(
        &self,
        chosen: &[String],
        target_dir: &Path,
        reporter: &mut dyn Reporter,
    ) -> DownloadReport {
        let mut report = DownloadReport::default();

        for feature in chosen {
            reporter.report(RunEvent::FeatureStarted { feature });
            let feature_report = self
                .download_feature(feature, target_dir, &mut report.stats, reporter)
                .await;
            report.features.push(feature_report);
        }

        info!(
            "Downloaded {}/{} files",
            report.stats.successful_downloads, report.stats.total_files
        );
        report
    }

    async fn download_feature(
        &self,
        feature: &str,
        target_dir: &Path,
        stats: &mut DownloadStats,
        reporter: &mut dyn Reporter,
    ) -> FeatureReport {
        let files = match self.source.fetch_feature_files(feature).await {
            Ok(files) => files,
            Err(error) => {
                warn!("Skipping feature {}: {}", feature, error);
                reporter.report(RunEvent::FeatureFailed {
                    feature,
                    error: &error,
                });
                return FeatureReport {
                    name: feature.to_string(),
                    listing_error: Some(error),
                    files: Vec::new(),
                };
            }
        };

        let mut file_reports = Vec::with_capacity(files.len());
        for file in files {
            stats.record_attempt();
            let result = self.download_one(feature, &file, target_dir).await;

            match &result {
                Ok(downloaded) => {
                    stats.record_success();
                    reporter.report(RunEvent::FileDownloaded {
                        feature,
                        file: &file,
                        destination: &downloaded.destination,
                        bytes: downloaded.bytes,
                    });
                }
                Err(error) => {
                    warn!("Failed to download {}/{}: {}", feature, file, error);
                    reporter.report(RunEvent::FileFailed {
                        feature,
                        file: &file,
                        error,
                    });
                }
            }

            file_reports.push(FileReport { file, result });
        }

        FeatureReport {
            name: feature.to_string(),
            listing_error: None,
            files: file_reports,
        }
    }

    async fn download_one(
        &self,
        feature: &str,
        file: &str,
        target_dir: &Path,
    ) -> DownloadResult<DownloadedFile> {
        let url = self.source.file_url(feature, file)?;
        let destination = local_destination(target_dir, file).map_err(DownloadError::from)?;
        debug!("Fetching {} -> {}", url, destination.display());

        let bytes = self.source.download_file(&url, &destination).await?;
        Ok(DownloadedFile { destination, bytes })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{HashMap, HashSet};

    use tempfile::tempdir;
    use url::Url;

    use crate::app::client::write_file;
    use crate::errors::RemoteError;

    /// In-memory catalog: feature -> (relative path -> contents)
    #[derive(Default)]
    struct FakeSource {
        features: Vec<(String, Vec<(String, Vec<u8>)>)>,
        unlistable: HashSet<String>,
        broken_files: HashSet<String>,
    }

    impl FakeSource {
        fn with_feature(mut self, name: &str, files: &[(&str, &str)]) -> Self {
            self.features.push((
                name.to_string(),
                files
                    .iter()
                    .map(|(path, body)| (path.to_string(), body.as_bytes().to_vec()))
                    .collect(),
            ));
            self
        }

        fn unlistable(mut self, feature: &str) -> Self {
            self.unlistable.insert(feature.to_string());
            self
        }

        fn broken(mut self, url_path: &str) -> Self {
            self.broken_files.insert(url_path.to_string());
            self
        }

        fn contents(&self) -> HashMap<String, Vec<u8>> {
            self.features
                .iter()
                .flat_map(|(feature, files)| {
                    files
                        .iter()
                        .map(move |(path, body)| (format!("/{}/{}", feature, path), body.clone()))
                })
                .collect()
        }
    }

    fn status_error(path: &str, status: u16) -> RemoteError {
        RemoteError::Status {
            url: format!("fake://host{}", path),
            status,
        }
    }

    impl FeatureSource for FakeSource {
        async fn fetch_available_features(&self) -> RemoteResult<Vec<String>> {
            Ok(self.features.iter().map(|(name, _)| name.clone()).collect())
        }

        async fn fetch_feature_files(&self, feature: &str) -> RemoteResult<Vec<String>> {
            if self.unlistable.contains(feature) {
                return Err(status_error(feature, 500));
            }
            self.features
                .iter()
                .find(|(name, _)| name == feature)
                .map(|(_, files)| files.iter().map(|(path, _)| path.clone()).collect())
                .ok_or_else(|| status_error(feature, 404))
        }

        fn file_url(&self, feature: &str, file: &str) -> RemoteResult<Url> {
            Ok(Url::parse(&format!("fake://host/{}/{}", feature, file)).unwrap())
        }

        async fn download_file(&self, url: &Url, destination: &Path) -> DownloadResult<u64> {
            if self.broken_files.contains(url.path()) {
                return Err(status_error(url.path(), 502).into());
            }
            let body = self
                .contents()
                .remove(url.path())
                .ok_or_else(|| status_error(url.path(), 404))?;
            Ok(write_file(destination, &body).await?)
        }
    }

    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
    }

    impl Reporter for Recorder {
        fn report(&mut self, event: RunEvent<'_>) {
            let line = match event {
                RunEvent::CatalogFeature {
                    position,
                    feature,
                    files,
                } => format!("catalog {} {} {:?}", position, feature, files),
                RunEvent::CatalogFeatureUnavailable {
                    position, feature, ..
                } => format!("unavailable {} {}", position, feature),
                RunEvent::FeatureStarted { feature } => format!("start {}", feature),
                RunEvent::FeatureFailed { feature, .. } => format!("feature-failed {}", feature),
                RunEvent::FileDownloaded { file, bytes, .. } => format!("ok {} {}", file, bytes),
                RunEvent::FileFailed { file, .. } => format!("failed {}", file),
            };
            self.events.push(line);
        }
    }

    fn sample_source() -> FakeSource {
        FakeSource::default()
            .with_feature("auth", &[("main.py", "print('auth')\n"), ("sub/helper.py", "x = 1\n")])
            .with_feature("logging", &[("log.py", "import logging\n")])
    }

    #[tokio::test]
    async fn test_fetch_catalog_keeps_order() {
        let coordinator = Coordinator::new(sample_source());
        assert_eq!(
            coordinator.fetch_catalog().await.unwrap(),
            vec!["auth", "logging"]
        );
    }

    #[tokio::test]
    async fn test_describe_catalog_continues_past_unlistable_feature() {
        let source = sample_source()
            .with_feature("docker", &[("Dockerfile", "FROM python\n")])
            .unlistable("logging");
        let coordinator = Coordinator::new(source);
        let features = coordinator.fetch_catalog().await.unwrap();
        let mut recorder = Recorder::default();

        let listing = coordinator.describe_catalog(&features, &mut recorder).await;

        assert_eq!(
            recorder.events,
            vec![
                r#"catalog 1 auth ["main.py", "sub/helper.py"]"#,
                "unavailable 2 logging",
                r#"catalog 3 docker ["Dockerfile"]"#,
            ]
        );
        assert_eq!(listing.features.len(), 3);
        assert_eq!(listing.unavailable().count(), 1);
    }

    #[tokio::test]
    async fn test_download_selected_feature_mirrors_layout() {
        let temp_dir = tempdir().unwrap();
        let target = temp_dir.path().join("out");
        let coordinator = Coordinator::new(sample_source());
        let mut recorder = Recorder::default();

        let report = coordinator
            .download_features(&["auth".to_string()], &target, &mut recorder)
            .await;

        assert_eq!(report.stats, DownloadStats::new(2, 2));
        assert_eq!(report.stats.outcome(), SummaryOutcome::AllSucceeded);
        assert_eq!(
            std::fs::read_to_string(target.join("main.py")).unwrap(),
            "print('auth')\n"
        );
        assert_eq!(
            std::fs::read_to_string(target.join("sub").join("helper.py")).unwrap(),
            "x = 1\n"
        );
        assert_eq!(
            recorder.events,
            vec!["start auth", "ok main.py 14", "ok sub/helper.py 6"]
        );
    }

    #[tokio::test]
    async fn test_file_failure_does_not_stop_the_run() {
        let temp_dir = tempdir().unwrap();
        let source = sample_source().broken("/auth/main.py");
        let coordinator = Coordinator::new(source);
        let mut recorder = Recorder::default();
        let chosen = vec!["auth".to_string(), "logging".to_string()];

        let report = coordinator
            .download_features(&chosen, temp_dir.path(), &mut recorder)
            .await;

        assert_eq!(report.stats, DownloadStats::new(3, 2));
        assert!(report.stats.successful_downloads < report.stats.total_files);
        assert_eq!(
            report.stats.outcome(),
            SummaryOutcome::Partial {
                successful: 2,
                total: 3
            }
        );
        assert!(!temp_dir.path().join("main.py").exists());
        assert!(temp_dir.path().join("log.py").exists());

        let failed: Vec<_> = report.features[0]
            .files
            .iter()
            .filter(|f| !f.succeeded())
            .map(|f| f.file.as_str())
            .collect();
        assert_eq!(failed, vec!["main.py"]);
        assert!(matches!(
            report.features[0].files[0].error(),
            Some(DownloadError::Remote(RemoteError::Status { status: 502, .. }))
        ));
    }

    #[tokio::test]
    async fn test_unlistable_feature_is_skipped_without_counting() {
        let temp_dir = tempdir().unwrap();
        let coordinator = Coordinator::new(sample_source().unlistable("auth"));
        let mut recorder = Recorder::default();
        let chosen = vec!["auth".to_string(), "logging".to_string()];

        let report = coordinator
            .download_features(&chosen, temp_dir.path(), &mut recorder)
            .await;

        assert_eq!(report.stats, DownloadStats::new(1, 1));
        assert!(report.features[0].listing_error.is_some());
        assert!(report.features[0].files.is_empty());
        assert_eq!(
            recorder.events,
            vec![
                "start auth",
                "feature-failed auth",
                "start logging",
                "ok log.py 15"
            ]
        );
    }

    #[tokio::test]
    async fn test_local_write_failure_is_counted() {
        let temp_dir = tempdir().unwrap();
        // A file named "sub" blocks the directory the helper needs
        std::fs::write(temp_dir.path().join("sub"), "").unwrap();
        let coordinator = Coordinator::new(sample_source());
        let mut recorder = Recorder::default();

        let report = coordinator
            .download_features(&["auth".to_string()], temp_dir.path(), &mut recorder)
            .await;

        assert_eq!(report.stats, DownloadStats::new(2, 1));
        assert!(matches!(
            report.features[0].files[1].error(),
            Some(DownloadError::LocalWrite(_))
        ));
    }

    #[tokio::test]
    async fn test_unsafe_remote_path_is_rejected() {
        let temp_dir = tempdir().unwrap();
        let target = temp_dir.path().join("out");
        let source = FakeSource::default().with_feature("evil", &[("../escape.py", "boom")]);
        let coordinator = Coordinator::new(source);
        let mut recorder = Recorder::default();

        let report = coordinator
            .download_features(&["evil".to_string()], &target, &mut recorder)
            .await;

        assert_eq!(report.stats, DownloadStats::new(1, 0));
        assert_eq!(report.stats.outcome(), SummaryOutcome::NothingDownloaded);
        assert!(!temp_dir.path().join("escape.py").exists());
    }
}
