//! Storage rate schedule service

use std::sync::Arc;

use tracing::info;

use crate::domain::{DomainError, DomainResult, RateSchedule, RepositoryProvider};

/// Service for maintaining storage rate schedules
pub struct RateService {
    repos: Arc<dyn RepositoryProvider>,
}

impl RateService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub fn list(&self) -> DomainResult<Vec<RateSchedule>> {
        self.repos.rates().find_all()
    }

    /// Get a schedule by its rate number
    pub fn get(&self, rate_no: &str) -> DomainResult<RateSchedule> {
        self.repos
            .rates()
            .find_by_rate_no(rate_no)?
            .ok_or_else(|| DomainError::not_found("RateSchedule", "rate_no", rate_no))
    }

    /// Create a schedule. Rate numbers are unique.
    pub fn create(&self, rate: RateSchedule) -> DomainResult<RateSchedule> {
        rate.validate()?;
        self.ensure_unique(&rate)?;

        let rate = self.repos.rates().insert(rate)?;
        info!(
            rate_no = %rate.rate_no,
            tiers = rate.tiers.len(),
            "Rate schedule created"
        );
        Ok(rate)
    }

    pub fn update(&self, rate: RateSchedule) -> DomainResult<RateSchedule> {
        rate.validate()?;
        self.ensure_unique(&rate)?;

        self.repos.rates().update(rate.clone())?;
        info!(rate_no = %rate.rate_no, "Rate schedule updated");
        Ok(rate)
    }

    /// Delete a schedule. Contracts still naming it resolve with no tiers.
    pub fn delete(&self, rate_no: &str) -> DomainResult<()> {
        let rate = self.get(rate_no)?;
        self.repos.rates().delete(&rate.key)?;
        info!(rate_no, "Rate schedule deleted");
        Ok(())
    }

    fn ensure_unique(&self, rate: &RateSchedule) -> DomainResult<()> {
        match self.repos.rates().find_by_rate_no(&rate.rate_no)? {
            Some(existing) if existing.key != rate.key => Err(DomainError::Conflict(format!(
                "rate number {} already exists",
                rate.rate_no
            ))),
            _ => Ok(()),
        }
    }
}
