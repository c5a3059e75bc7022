//! Storage-fee settlement service
//!
//! Auto-fills records from their contract, resolves the tiered unit price
//! and keeps the derived day counts and fee in step with the inputs.

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::contract::ContractService;
use crate::domain::{
    resolve_unit_price, DomainError, DomainResult, RepositoryProvider, StorageSettlement,
    StorageSettlementFilter,
};

/// Service for the storage-fee ledger
pub struct StorageSettlementService {
    repos: Arc<dyn RepositoryProvider>,
    contracts: ContractService,
}

impl StorageSettlementService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        let contracts = ContractService::new(repos.clone());
        Self { repos, contracts }
    }

    pub fn list(&self) -> DomainResult<Vec<StorageSettlement>> {
        self.repos.storage_settlements().find_all()
    }

    pub fn get(&self, key: &str) -> DomainResult<StorageSettlement> {
        self.repos
            .storage_settlements()
            .find_by_key(key)?
            .ok_or_else(|| DomainError::not_found("StorageSettlement", "key", key))
    }

    /// Create a settlement from a form draft
    pub fn create(&self, draft: StorageSettlement) -> DomainResult<StorageSettlement> {
        let mut record = self.prepare(draft)?;
        record.key.clear();

        let record = self.repos.storage_settlements().insert(record)?;
        info!(
            key = %record.key,
            roll_no = %record.roll_no,
            contract = %record.contract_name,
            total_days = record.total_days,
            fee = %record.storage_fee,
            "Storage settlement created"
        );
        Ok(record)
    }

    /// Replace the settlement stored under `key` with an edited draft.
    ///
    /// Moving the date range or switching contract re-resolves the unit
    /// price unless the draft also carries a newly entered one.
    pub fn update(&self, key: &str, draft: StorageSettlement) -> DomainResult<StorageSettlement> {
        let existing = self.get(key)?;
        let mut draft = draft;
        let repriced = draft.start_date != existing.start_date
            || draft.end_date != existing.end_date
            || draft.contract_name != existing.contract_name;
        if repriced && draft.unit_price == existing.unit_price {
            draft.unit_price = None;
        }

        let mut record = self.prepare(draft)?;
        record.key = key.to_string();

        self.repos.storage_settlements().update(record.clone())?;
        info!(
            key,
            total_days = record.total_days,
            fee = %record.storage_fee,
            "Storage settlement updated"
        );
        Ok(record)
    }

    pub fn delete(&self, key: &str) -> DomainResult<()> {
        self.repos.storage_settlements().delete(key)?;
        info!(key, "Storage settlement deleted");
        Ok(())
    }

    /// Filter the ledger.
    ///
    /// With a month set, `monthly_days` of each returned record is the
    /// number of its days falling in that month.
    pub fn search(&self, filter: &StorageSettlementFilter) -> DomainResult<Vec<StorageSettlement>> {
        let mut found: Vec<_> = self
            .list()?
            .into_iter()
            .filter(|r| filter.matches(r))
            .collect();

        if let Some(month) = filter.month {
            for record in &mut found {
                record.monthly_days = record.day_counts_for(month).monthly_days;
            }
        }
        debug!(matches = found.len(), "Storage settlements searched");
        Ok(found)
    }

    /// Recompute derived fields of every stored record.
    ///
    /// Returns how many records changed; nothing is written when none did.
    pub fn refresh_all(&self) -> DomainResult<usize> {
        let changed = self.repos.storage_settlements().modify_all(&mut |records| {
            let mut changed = 0;
            for record in records.iter_mut() {
                if !record.is_consistent() {
                    record.recompute();
                    changed += 1;
                }
            }
            changed
        })?;

        if changed > 0 {
            info!(changed, "Storage settlements refreshed");
        }
        Ok(changed)
    }

    fn prepare(&self, mut record: StorageSettlement) -> DomainResult<StorageSettlement> {
        match self.contracts.find_terms(&record.contract_name)? {
            Some(terms) => {
                record.cargo_owner = terms.contract.customer_name.clone();
                record.contract_id = terms.contract.contract_id.clone();
                record.rate_no = terms.contract.rate_no.clone();
                record.rate_name = terms.rate_name();

                if record.unit_price.is_none() {
                    let total_days = record.day_counts().total_days;
                    record.unit_price = Some(resolve_unit_price(total_days, &terms.tiers()));
                }
            }
            None => warn!(
                contract = %record.contract_name,
                "Storage settlement names an unknown contract"
            ),
        }

        record.check()?;
        record.recompute();
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::test_repos;
    use crate::domain::fees::parse_date;
    use crate::domain::{Contract, RateSchedule, Tier, YearMonth};
    use rust_decimal_macros::dec;

    fn seeded_service() -> StorageSettlementService {
        let repos = test_repos();
        repos
            .rates()
            .insert(RateSchedule::new(
                "R001",
                "Standard paper",
                vec![
                    Tier::new(30, dec!(10)),
                    Tier::new(60, dec!(8)),
                    Tier::new(90, dec!(6)),
                ],
            ))
            .unwrap();
        repos
            .contracts()
            .insert(Contract::new(
                "Jianfa Paper Group",
                "R001",
                "2025 cooperation",
                "C001",
            ))
            .unwrap();
        StorageSettlementService::new(repos)
    }

    fn sample_draft(start: &str, end: &str) -> StorageSettlement {
        StorageSettlement {
            pickup_party: "Fengtu Ltd".into(),
            contract_name: "2025 cooperation".into(),
            roll_no: "J001".into(),
            start_date: parse_date(start),
            end_date: parse_date(end),
            weight: dec!(100),
            ..Default::default()
        }
    }

    #[test]
    fn create_fills_from_contract_and_resolves_price() {
        let service = seeded_service();
        let record = service
            .create(sample_draft("2025-06-01", "2025-07-15"))
            .unwrap();

        assert_eq!(record.cargo_owner, "Jianfa Paper Group");
        assert_eq!(record.contract_id, "C001");
        assert_eq!(record.rate_no, "R001");
        assert_eq!(record.rate_name, "Standard paper");
        assert_eq!(record.total_days, 45);
        assert_eq!(record.unit_price, Some(dec!(8)));
        assert_eq!(record.storage_fee, dec!(36000));
        assert_eq!(record.monthly_days, 0);
    }

    #[test]
    fn entered_price_is_kept() {
        let service = seeded_service();
        let mut draft = sample_draft("2025-06-01", "2025-06-15");
        draft.unit_price = Some(dec!(12));
        let record = service.create(draft).unwrap();
        assert_eq!(record.unit_price, Some(dec!(12)));
        assert_eq!(record.storage_fee, dec!(18000));
        assert_eq!(record.monthly_days, 15);
    }

    #[test]
    fn update_recomputes_and_keeps_key() {
        let service = seeded_service();
        let created = service
            .create(sample_draft("2025-06-01", "2025-06-15"))
            .unwrap();

        let mut edited = created.clone();
        edited.end_date = parse_date("2025-06-10");
        edited.weight = dec!(50);
        let updated = service.update(&created.key, edited).unwrap();

        assert_eq!(updated.key, created.key);
        assert_eq!(updated.total_days, 10);
        assert_eq!(updated.storage_fee, dec!(5000));
        assert_eq!(service.get(&created.key).unwrap(), updated);
    }

    #[test]
    fn update_reprices_when_range_crosses_tier() {
        let service = seeded_service();
        let created = service
            .create(sample_draft("2025-06-01", "2025-06-15"))
            .unwrap();
        assert_eq!(created.unit_price, Some(dec!(10)));

        let mut edited = created.clone();
        edited.end_date = parse_date("2025-07-15");
        let updated = service.update(&created.key, edited).unwrap();

        assert_eq!(updated.total_days, 45);
        assert_eq!(updated.unit_price, Some(dec!(8)));
        assert_eq!(updated.storage_fee, dec!(36000));
    }

    #[test]
    fn update_keeps_price_entered_with_new_range() {
        let service = seeded_service();
        let created = service
            .create(sample_draft("2025-06-01", "2025-06-15"))
            .unwrap();

        let mut edited = created.clone();
        edited.end_date = parse_date("2025-07-15");
        edited.unit_price = Some(dec!(9));
        let updated = service.update(&created.key, edited).unwrap();
        assert_eq!(updated.unit_price, Some(dec!(9)));
        assert_eq!(updated.storage_fee, dec!(40500));
    }

    #[test]
    fn invalid_range_is_rejected() {
        let service = seeded_service();
        assert!(matches!(
            service.create(sample_draft("2025-07-01", "2025-06-01")),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn search_by_month_rewrites_monthly_days() {
        let service = seeded_service();
        let mut cross = sample_draft("2025-06-20", "2025-07-05");
        cross.settlement_month = YearMonth::new(2025, 6);
        service.create(cross).unwrap();
        let mut august = sample_draft("2025-08-01", "2025-08-10");
        august.roll_no = "J002".into();
        service.create(august).unwrap();

        let filter = StorageSettlementFilter {
            month: YearMonth::new(2025, 7),
            ..Default::default()
        };
        let found = service.search(&filter).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].roll_no, "J001");
        assert_eq!(found[0].monthly_days, 5);
        assert_eq!(found[0].total_days, 16);

        let stored = service.get(&found[0].key).unwrap();
        assert_eq!(stored.monthly_days, 11);
    }

    #[test]
    fn search_by_customer_matches_either_party() {
        let service = seeded_service();
        service
            .create(sample_draft("2025-06-01", "2025-06-15"))
            .unwrap();

        let by_picker = StorageSettlementFilter {
            customer: Some("fengtu".into()),
            ..Default::default()
        };
        assert_eq!(service.search(&by_picker).unwrap().len(), 1);

        let by_other = StorageSettlementFilter {
            customer: Some("harbor".into()),
            ..Default::default()
        };
        assert!(service.search(&by_other).unwrap().is_empty());
    }

    #[test]
    fn refresh_all_repairs_stale_records() {
        let service = seeded_service();
        let created = service
            .create(sample_draft("2025-06-01", "2025-06-15"))
            .unwrap();
        assert_eq!(service.refresh_all().unwrap(), 0);

        let mut stale = created.clone();
        stale.storage_fee = dec!(1);
        stale.total_days = 99;
        service.repos.storage_settlements().update(stale).unwrap();

        assert_eq!(service.refresh_all().unwrap(), 1);
        let fixed = service.get(&created.key).unwrap();
        assert_eq!(fixed.total_days, 15);
        assert_eq!(fixed.storage_fee, dec!(15000));
    }

    #[test]
    fn delete_removes_record() {
        let service = seeded_service();
        let created = service
            .create(sample_draft("2025-06-01", "2025-06-15"))
            .unwrap();
        service.delete(&created.key).unwrap();
        assert!(service.list().unwrap().is_empty());
        assert!(matches!(
            service.get(&created.key),
            Err(DomainError::NotFound { .. })
        ));
    }
}
