mod auth;
mod credentials;
mod profile;
mod report;

pub use auth::TokenManager;
pub use credentials::CredentialStore;
pub use credentials::FileCredentialStore;
pub use profile::FileProfileStore;
pub use profile::ProfileStore;
pub use report::FileReportStore;
pub use report::ReportStore;
