//! Outbound handling settlement service

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::domain::{
    DomainError, DomainResult, OutboundFilter, OutboundSettlement, RepositoryProvider,
};

const OUT_ID_SPACE: i64 = 1_000_000;

/// Service for the outbound handling ledger
pub struct OutboundSettlementService {
    repos: Arc<dyn RepositoryProvider>,
}

impl OutboundSettlementService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub fn list(&self) -> DomainResult<Vec<OutboundSettlement>> {
        self.repos.outbound_settlements().find_all()
    }

    pub fn get(&self, key: &str) -> DomainResult<OutboundSettlement> {
        self.repos
            .outbound_settlements()
            .find_by_key(key)?
            .ok_or_else(|| DomainError::not_found("OutboundSettlement", "key", key))
    }

    pub fn get_by_out_id(&self, out_id: &str) -> DomainResult<OutboundSettlement> {
        self.repos
            .outbound_settlements()
            .find_by_out_id(out_id)?
            .ok_or_else(|| DomainError::not_found("OutboundSettlement", "out_id", out_id))
    }

    /// Create a settlement and assign it a fresh outbound id
    pub fn create(&self, draft: OutboundSettlement) -> DomainResult<OutboundSettlement> {
        let mut record = draft;
        record.key.clear();
        record.check()?;
        record.recompute();
        record.out_id = self.next_out_id()?;

        let record = self.repos.outbound_settlements().insert(record)?;
        info!(
            key = %record.key,
            out_id = %record.out_id,
            total = %record.total_fee(),
            unpaid = %record.unpaid_fee(),
            "Outbound settlement created"
        );
        Ok(record)
    }

    /// Replace a settlement; its outbound id is preserved
    pub fn update(&self, key: &str, draft: OutboundSettlement) -> DomainResult<OutboundSettlement> {
        let existing = self.get(key)?;
        let mut record = draft;
        record.key = key.to_string();
        record.out_id = existing.out_id;
        record.check()?;
        record.recompute();

        self.repos.outbound_settlements().update(record.clone())?;
        info!(key, out_id = %record.out_id, "Outbound settlement updated");
        Ok(record)
    }

    pub fn delete(&self, key: &str) -> DomainResult<()> {
        self.repos.outbound_settlements().delete(key)?;
        info!(key, "Outbound settlement deleted");
        Ok(())
    }

    pub fn search(&self, filter: &OutboundFilter) -> DomainResult<Vec<OutboundSettlement>> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|r| filter.matches(r))
            .collect())
    }

    /// `OUT` + the last six digits of the clock, bumped past ids in use.
    fn next_out_id(&self) -> DomainResult<String> {
        let taken: Vec<String> = self.list()?.into_iter().map(|r| r.out_id).collect();
        let mut n = Utc::now().timestamp_millis().rem_euclid(OUT_ID_SPACE);

        for _ in 0..OUT_ID_SPACE {
            let candidate = format!("OUT{:06}", n);
            if !taken.contains(&candidate) {
                return Ok(candidate);
            }
            n = (n + 1) % OUT_ID_SPACE;
        }
        Err(DomainError::Conflict("outbound id space exhausted".to_string()))
    }
}
