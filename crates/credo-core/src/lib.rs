pub mod error;
pub mod types;

pub use error::{CredoError, CredoResult};
pub use types::{
    AccountComparison, AccountReport, BotIndicator, ComparisonResult, Platform, ScoreFactor,
    VerificationRecord, VerificationReport,
};
