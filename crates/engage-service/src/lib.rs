//! # engage-service
//!
//! Application layer: the reaction toggle protocol, cached counter
//! maintenance, the recount/verify batch jobs, and the DTOs exposed over HTTP.

pub mod dto;
pub mod jobs;
pub mod services;

pub use jobs::{
    CancelFlag, DriftExample, KindRecount, KindVerification, ReconciliationJob,
    ReconciliationReport, VerificationJob, VerificationReport,
};
pub use services::{
    CounterAdjuster, ReactionService, ServiceContext, ServiceContextBuilder, ServiceError,
    ServiceResult, ToggleAction, ToggleOutcome,
};
