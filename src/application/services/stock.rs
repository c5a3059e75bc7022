//! Stock view and cargo-ownership transfers

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::{DomainError, DomainResult, RepositoryProvider, StockFilter, StockItem};
use crate::shared::validations::require;

/// Service for rolls currently in the warehouse
pub struct StockService {
    repos: Arc<dyn RepositoryProvider>,
}

impl StockService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub fn list(&self) -> DomainResult<Vec<StockItem>> {
        self.repos.stock().find_all()
    }

    pub fn get(&self, key: &str) -> DomainResult<StockItem> {
        self.repos
            .stock()
            .find_by_key(key)?
            .ok_or_else(|| DomainError::not_found("StockItem", "key", key))
    }

    pub fn search(&self, filter: &StockFilter) -> DomainResult<Vec<StockItem>> {
        let found: Vec<_> = self
            .list()?
            .into_iter()
            .filter(|item| filter.matches(item))
            .collect();
        debug!(matches = found.len(), "Stock searched");
        Ok(found)
    }

    /// Put a received roll on the floor. A roll can be held only once.
    pub fn receive(&self, item: StockItem) -> DomainResult<StockItem> {
        let mut item = item;
        item.key.clear();
        item.check()?;
        if self
            .repos
            .stock()
            .find_roll(&item.roll_no, &item.bill_no)?
            .is_some()
        {
            return Err(DomainError::Conflict(format!(
                "roll {} of bill {} is already in stock",
                item.roll_no, item.bill_no
            )));
        }

        let item = self.repos.stock().insert(item)?;
        info!(
            key = %item.key,
            roll_no = %item.roll_no,
            bill_no = %item.bill_no,
            location = %item.location,
            "Roll received into stock"
        );
        Ok(item)
    }

    /// Take a roll off the floor; `None` when it is not held.
    pub fn release(&self, roll_no: &str, bill_no: &str) -> DomainResult<Option<StockItem>> {
        let mut released = None;
        self.repos.stock().modify_all(&mut |items| {
            match items.iter().position(|s| s.is_roll(roll_no, bill_no)) {
                Some(i) => {
                    released = Some(items.remove(i));
                    1
                }
                None => 0,
            }
        })?;

        match &released {
            Some(item) => info!(key = %item.key, roll_no, bill_no, "Roll released from stock"),
            None => warn!(roll_no, bill_no, "Released roll was not in stock"),
        }
        Ok(released)
    }

    /// Hand a roll to a new cargo owner and pickup party.
    pub fn transfer(&self, key: &str, owner: &str, picker: &str) -> DomainResult<StockItem> {
        require("owner", owner)?;
        require("picker", picker)?;

        let mut item = self.get(key)?;
        let (from_owner, from_picker) = (item.owner.clone(), item.picker.clone());
        item.owner = owner.to_string();
        item.picker = picker.to_string();
        self.repos.stock().update(item.clone())?;

        info!(
            key,
            roll_no = %item.roll_no,
            from_owner = %from_owner,
            from_picker = %from_picker,
            owner,
            picker,
            "Cargo ownership transferred"
        );
        Ok(item)
    }

    /// Remove the selected rolls in one write. Unknown keys are skipped.
    pub fn ship(&self, keys: &[String]) -> DomainResult<usize> {
        let removed = self.repos.stock().modify_all(&mut |items| {
            let before = items.len();
            items.retain(|item| !keys.contains(&item.key));
            before - items.len()
        })?;

        if removed < keys.len() {
            warn!(
                requested = keys.len(),
                removed,
                "Some selected rolls were not in stock"
            );
        }
        info!(removed, "Rolls shipped in batch");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::test_repos;
    use crate::domain::fees::parse_date;
    use crate::domain::Location;

    fn sample_item(roll_no: &str) -> StockItem {
        StockItem {
            roll_no: roll_no.into(),
            bill_no: "TD001".into(),
            in_date: parse_date("2025-06-23"),
            owner: "Jianfa Paper Group".into(),
            picker: "Fengtu Ltd".into(),
            location: Location::new("Baowan", "Hall 10", "A01"),
            ..Default::default()
        }
    }

    #[test]
    fn receive_rejects_same_roll_twice() {
        let service = StockService::new(test_repos());
        service.receive(sample_item("J001")).unwrap();
        assert!(matches!(
            service.receive(sample_item("J001")),
            Err(DomainError::Conflict(_))
        ));

        let mut other_bill = sample_item("J001");
        other_bill.bill_no = "TD002".into();
        assert!(service.receive(other_bill).is_ok());
    }

    #[test]
    fn transfer_changes_parties_only() {
        let service = StockService::new(test_repos());
        let item = service.receive(sample_item("J001")).unwrap();

        let moved = service
            .transfer(&item.key, "Fengtu Ltd", "Harbor Trading")
            .unwrap();
        assert_eq!(moved.owner, "Fengtu Ltd");
        assert_eq!(moved.picker, "Harbor Trading");
        assert_eq!(moved.location, item.location);
        assert_eq!(service.get(&item.key).unwrap(), moved);
    }

    #[test]
    fn transfer_needs_both_parties() {
        let service = StockService::new(test_repos());
        let item = service.receive(sample_item("J001")).unwrap();
        assert!(matches!(
            service.transfer(&item.key, "Fengtu Ltd", " "),
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            service.transfer("missing", "A", "B"),
            Err(DomainError::NotFound { .. })
        ));
    }

    #[test]
    fn ship_removes_selected_rolls() {
        let service = StockService::new(test_repos());
        let a = service.receive(sample_item("J001")).unwrap();
        service.receive(sample_item("J002")).unwrap();
        let c = service.receive(sample_item("J003")).unwrap();

        let removed = service
            .ship(&[a.key.clone(), c.key.clone(), "missing".into()])
            .unwrap();
        assert_eq!(removed, 2);
        let left: Vec<_> = service.list().unwrap().into_iter().map(|s| s.roll_no).collect();
        assert_eq!(left, vec!["J002"]);
    }

    #[test]
    fn release_by_roll() {
        let service = StockService::new(test_repos());
        service.receive(sample_item("J001")).unwrap();
        let released = service.release("J001", "TD001").unwrap().unwrap();
        assert_eq!(released.roll_no, "J001");
        assert!(service.release("J001", "TD001").unwrap().is_none());
        assert!(service.list().unwrap().is_empty());
    }

    #[test]
    fn search_by_owner() {
        let service = StockService::new(test_repos());
        service.receive(sample_item("J001")).unwrap();
        let filter = StockFilter {
            owner: Some("JIANFA".into()),
            ..Default::default()
        };
        assert_eq!(service.search(&filter).unwrap().len(), 1);
        let filter = StockFilter {
            owner: Some("fengtu".into()),
            ..Default::default()
        };
        assert!(service.search(&filter).unwrap().is_empty());
    }
}
