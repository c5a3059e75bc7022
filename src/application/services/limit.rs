//! Redemption limit service

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::info;

use crate::domain::{DomainError, DomainResult, RedemptionLimit, RepositoryProvider};

/// Service for redemption limits
pub struct LimitService {
    repos: Arc<dyn RepositoryProvider>,
}

impl LimitService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub fn list(&self) -> DomainResult<Vec<RedemptionLimit>> {
        self.repos.limits().find_all()
    }

    pub fn get(&self, code: &str) -> DomainResult<RedemptionLimit> {
        self.repos
            .limits()
            .find_by_code(code)?
            .ok_or_else(|| DomainError::not_found("RedemptionLimit", "code", code))
    }

    pub fn create(&self, limit: RedemptionLimit) -> DomainResult<RedemptionLimit> {
        limit.check()?;
        self.ensure_unique(&limit)?;

        let limit = self.repos.limits().insert(limit)?;
        info!(
            code = %limit.code,
            owner = %limit.owner,
            picker = %limit.picker,
            total = %limit.total_weight,
            "Redemption limit created"
        );
        Ok(limit)
    }

    pub fn update(&self, limit: RedemptionLimit) -> DomainResult<RedemptionLimit> {
        limit.check()?;
        self.ensure_unique(&limit)?;

        self.repos.limits().update(limit.clone())?;
        info!(code = %limit.code, total = %limit.total_weight, "Redemption limit updated");
        Ok(limit)
    }

    pub fn delete(&self, code: &str) -> DomainResult<()> {
        let limit = self.get(code)?;
        self.repos.limits().delete(&limit.key)?;
        info!(code, "Redemption limit deleted");
        Ok(())
    }

    /// Move `delta` tonnes onto (positive) or off (negative) the shipped
    /// weight of limit `code`, atomically.
    pub fn book(&self, code: &str, delta: Decimal) -> DomainResult<RedemptionLimit> {
        let mut outcome = Err(DomainError::not_found("RedemptionLimit", "code", code));
        self.repos.limits().modify_all(&mut |limits| {
            let Some(limit) = limits.iter_mut().find(|l| l.code == code) else {
                return 0;
            };
            if delta.is_sign_negative() {
                limit.refund(-delta);
            } else if let Err(e) = limit.draw(delta) {
                outcome = Err(e);
                return 0;
            }
            outcome = Ok(limit.clone());
            1
        })?;

        let limit = outcome?;
        info!(
            code,
            delta = %delta,
            out_weight = %limit.out_weight,
            remaining = %limit.remaining(),
            "Redemption limit booked"
        );
        Ok(limit)
    }

    fn ensure_unique(&self, limit: &RedemptionLimit) -> DomainResult<()> {
        match self.repos.limits().find_by_code(&limit.code)? {
            Some(existing) if existing.key != limit.key => Err(DomainError::Conflict(format!(
                "redemption limit {} already exists",
                limit.code
            ))),
            _ => Ok(()),
        }
    }
}
