use std::{io::ErrorKind, path::PathBuf};

use async_trait::async_trait;

use crate::{error::StoreError, types::WrappedReport};

/// Append-only report snapshots per owner. Every report-generation request
/// produces a new snapshot; nothing here mutates or deduplicates.
#[async_trait]
pub trait ReportStore: Send + Sync {
    async fn append(&self, report: WrappedReport) -> Result<(), StoreError>;
    async fn history(&self, owner_id: &str) -> Result<Vec<WrappedReport>, StoreError>;
}

pub struct FileReportStore {
    root: PathBuf,
}

impl FileReportStore {
    pub fn new() -> Self {
        let mut root = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        root.push("wrappedcli/reports");
        Self { root }
    }

    pub fn with_root(root: PathBuf) -> Self {
        Self { root }
    }

    fn report_path(&self, owner_id: &str) -> PathBuf {
        self.root.join(format!("{}.json", owner_id))
    }
}

impl Default for FileReportStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReportStore for FileReportStore {
    async fn append(&self, report: WrappedReport) -> Result<(), StoreError> {
        let owner = report.owner.clone();
        let mut reports = self.history(&owner).await?;
        reports.push(report);

        async_fs::create_dir_all(&self.root).await?;
        let json = serde_json::to_string_pretty(&reports)?;
        async_fs::write(self.report_path(&owner), json).await?;
        Ok(())
    }

    async fn history(&self, owner_id: &str) -> Result<Vec<WrappedReport>, StoreError> {
        match async_fs::read_to_string(self.report_path(owner_id)).await {
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(StoreError::Io(e)),
        }
    }
}
