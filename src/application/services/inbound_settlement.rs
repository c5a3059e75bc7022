//! Inbound handling settlement service

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::{
    DomainError, DomainResult, InboundFilter, InboundSettlement, RepositoryProvider,
};

/// Service for the inbound handling ledger
pub struct InboundSettlementService {
    repos: Arc<dyn RepositoryProvider>,
}

impl InboundSettlementService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub fn list(&self) -> DomainResult<Vec<InboundSettlement>> {
        self.repos.inbound_settlements().find_all()
    }

    pub fn get(&self, key: &str) -> DomainResult<InboundSettlement> {
        self.repos
            .inbound_settlements()
            .find_by_key(key)?
            .ok_or_else(|| DomainError::not_found("InboundSettlement", "key", key))
    }

    pub fn create(&self, draft: InboundSettlement) -> DomainResult<InboundSettlement> {
        let mut record = self.prepare(draft)?;
        record.key.clear();

        let record = self.repos.inbound_settlements().insert(record)?;
        info!(
            key = %record.key,
            bill_no = %record.bill_no,
            total = %record.itemized_total(),
            "Inbound settlement created"
        );
        Ok(record)
    }

    pub fn update(&self, key: &str, draft: InboundSettlement) -> DomainResult<InboundSettlement> {
        self.get(key)?;
        let mut record = self.prepare(draft)?;
        record.key = key.to_string();

        self.repos.inbound_settlements().update(record.clone())?;
        info!(key, bill_no = %record.bill_no, "Inbound settlement updated");
        Ok(record)
    }

    pub fn delete(&self, key: &str) -> DomainResult<()> {
        self.repos.inbound_settlements().delete(key)?;
        info!(key, "Inbound settlement deleted");
        Ok(())
    }

    pub fn search(&self, filter: &InboundFilter) -> DomainResult<Vec<InboundSettlement>> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|r| filter.matches(r))
            .collect())
    }

    fn prepare(&self, mut record: InboundSettlement) -> DomainResult<InboundSettlement> {
        match self.repos.contracts().find_by_name(&record.contract_name)? {
            Some(contract) => record.apply_contract(&contract),
            None => warn!(
                contract = %record.contract_name,
                "Inbound settlement names an unknown contract"
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
    use crate::domain::Contract;
    use rust_decimal_macros::dec;

    fn seeded_service() -> InboundSettlementService {
        let repos = test_repos();
        let mut contract = Contract::new("Jianfa Paper Group", "R001", "2025 cooperation", "C001");
        contract.in_fee = Some(dec!(10));
        contract.out_fee = Some(dec!(8));
        contract.box_fee = Some(dec!(200));
        repos.contracts().insert(contract).unwrap();
        InboundSettlementService::new(repos)
    }

    fn sample_draft() -> InboundSettlement {
        InboundSettlement {
            pickup_party: "Fengtu Ltd".into(),
            contract_name: "2025 cooperation".into(),
            bill_no: "B001".into(),
            in_weight: Some(dec!(500)),
            box_count: Some(dec!(20)),
            ..Default::default()
        }
    }

    #[test]
    fn create_applies_contract_prices() {
        let service = seeded_service();
        let record = service.create(sample_draft()).unwrap();

        assert_eq!(record.cargo_owner, "Jianfa Paper Group");
        assert_eq!(record.in_unit_price, Some(dec!(10)));
        assert_eq!(record.in_fee, dec!(5000));
        assert_eq!(record.out_fee, dec!(0));
        assert_eq!(record.box_total_fee, dec!(4000));
    }

    #[test]
    fn entered_prices_win_over_contract() {
        let service = seeded_service();
        let mut draft = sample_draft();
        draft.in_unit_price = Some(dec!(11));
        let record = service.create(draft).unwrap();
        assert_eq!(record.in_fee, dec!(5500));
    }

    #[test]
    fn unknown_contract_needs_owner() {
        let service = seeded_service();
        let mut draft = sample_draft();
        draft.contract_name = "elsewhere".into();
        assert!(matches!(
            service.create(draft.clone()),
            Err(DomainError::Validation(_))
        ));

        draft.cargo_owner = "Harbor Trading".into();
        let record = service.create(draft).unwrap();
        assert_eq!(record.in_fee, dec!(0));
    }

    #[test]
    fn update_and_search() {
        let service = seeded_service();
        let created = service.create(sample_draft()).unwrap();

        let mut edited = created.clone();
        edited.bill_no = "B002".into();
        edited.in_weight = Some(dec!(100));
        service.update(&created.key, edited).unwrap();

        let filter = InboundFilter {
            bill_no: Some("b002".into()),
            ..Default::default()
        };
        let found = service.search(&filter).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].in_fee, dec!(1000));

        service.delete(&created.key).unwrap();
        assert!(service.search(&filter).unwrap().is_empty());
    }
}
