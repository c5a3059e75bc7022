//! Goods movement service
//!
//! Receiving a roll logs an inbound movement and puts the roll into stock.
//! Shipping logs an outbound movement, draws its weight from the redemption
//! limit and takes the roll out of stock.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::info;

use super::limit::LimitService;
use super::stock::StockService;
use super::warehouse::WarehouseService;
use crate::domain::{
    DomainError, DomainResult, InboundMovement, MovementFilter, OutboundMovement,
    RepositoryProvider,
};

/// Service for the inbound and outbound movement logs
pub struct MovementService {
    repos: Arc<dyn RepositoryProvider>,
    warehouse: WarehouseService,
    stock: StockService,
    limits: LimitService,
}

impl MovementService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self {
            warehouse: WarehouseService::new(repos.clone()),
            stock: StockService::new(repos.clone()),
            limits: LimitService::new(repos.clone()),
            repos,
        }
    }

    // ── Inbound ────────────────────────────────────────────────

    pub fn list_inbound(&self) -> DomainResult<Vec<InboundMovement>> {
        self.repos.inbound_movements().find_all()
    }

    pub fn get_inbound(&self, key: &str) -> DomainResult<InboundMovement> {
        self.repos
            .inbound_movements()
            .find_by_key(key)?
            .ok_or_else(|| DomainError::not_found("InboundMovement", "key", key))
    }

    pub fn search_inbound(&self, filter: &MovementFilter) -> DomainResult<Vec<InboundMovement>> {
        Ok(self
            .list_inbound()?
            .into_iter()
            .filter(|m| filter.matches_inbound(m))
            .collect())
    }

    /// Log a receipt and put the roll into stock
    pub fn receive(&self, draft: InboundMovement) -> DomainResult<InboundMovement> {
        let mut movement = draft;
        movement.key.clear();
        self.check_inbound(&movement)?;

        self.stock.receive(movement.to_stock_item())?;
        let movement = self.repos.inbound_movements().insert(movement)?;
        info!(
            key = %movement.key,
            in_no = %movement.in_no,
            roll_no = %movement.roll_no,
            "Inbound movement logged"
        );
        Ok(movement)
    }

    /// Correct a logged receipt. The stock item is left as it is.
    pub fn update_inbound(&self, key: &str, draft: InboundMovement) -> DomainResult<InboundMovement> {
        self.get_inbound(key)?;
        let mut movement = draft;
        movement.key = key.to_string();
        self.check_inbound(&movement)?;

        self.repos.inbound_movements().update(movement.clone())?;
        info!(key, in_no = %movement.in_no, "Inbound movement updated");
        Ok(movement)
    }

    pub fn delete_inbound(&self, key: &str) -> DomainResult<()> {
        self.repos.inbound_movements().delete(key)?;
        info!(key, "Inbound movement deleted");
        Ok(())
    }

    fn check_inbound(&self, movement: &InboundMovement) -> DomainResult<()> {
        movement.check()?;
        self.warehouse.check_location(&movement.location)?;
        match self.repos.inbound_movements().find_by_in_no(&movement.in_no)? {
            Some(existing) if existing.key != movement.key => Err(DomainError::Conflict(
                format!("inbound number {} already exists", movement.in_no),
            )),
            _ => Ok(()),
        }
    }

    // ── Outbound ───────────────────────────────────────────────

    pub fn list_outbound(&self) -> DomainResult<Vec<OutboundMovement>> {
        self.repos.outbound_movements().find_all()
    }

    pub fn get_outbound(&self, key: &str) -> DomainResult<OutboundMovement> {
        self.repos
            .outbound_movements()
            .find_by_key(key)?
            .ok_or_else(|| DomainError::not_found("OutboundMovement", "key", key))
    }

    pub fn search_outbound(&self, filter: &MovementFilter) -> DomainResult<Vec<OutboundMovement>> {
        Ok(self
            .list_outbound()?
            .into_iter()
            .filter(|m| filter.matches_outbound(m))
            .collect())
    }

    /// Log a shipment, draw its weight from the limit and release the roll
    pub fn ship(&self, draft: OutboundMovement) -> DomainResult<OutboundMovement> {
        let mut movement = draft;
        movement.key.clear();
        self.check_outbound(&movement)?;

        let limit = self.limits.book(&movement.limit_no, shipped_weight(&movement))?;
        let movement = self.repos.outbound_movements().insert(movement)?;
        self.stock.release(&movement.roll_no, &movement.bill_no)?;
        info!(
            key = %movement.key,
            out_no = %movement.out_no,
            roll_no = %movement.roll_no,
            limit = %limit.code,
            remaining = %limit.remaining(),
            "Outbound movement logged"
        );
        Ok(movement)
    }

    /// Correct a logged shipment, rebooking the weight when the limit or
    /// the weight changed.
    pub fn update_outbound(
        &self,
        key: &str,
        draft: OutboundMovement,
    ) -> DomainResult<OutboundMovement> {
        let existing = self.get_outbound(key)?;
        let mut movement = draft;
        movement.key = key.to_string();
        self.check_outbound(&movement)?;

        let (old, new) = (shipped_weight(&existing), shipped_weight(&movement));
        if existing.limit_no == movement.limit_no {
            if old != new {
                self.limits.book(&movement.limit_no, new - old)?;
            }
        } else {
            self.limits.book(&movement.limit_no, new)?;
            self.refund(&existing.limit_no, old)?;
        }

        self.repos.outbound_movements().update(movement.clone())?;
        info!(key, out_no = %movement.out_no, "Outbound movement updated");
        Ok(movement)
    }

    /// Delete a shipment and give its weight back to the limit
    pub fn delete_outbound(&self, key: &str) -> DomainResult<()> {
        let existing = self.get_outbound(key)?;
        self.repos.outbound_movements().delete(key)?;
        self.refund(&existing.limit_no, shipped_weight(&existing))?;
        info!(key, out_no = %existing.out_no, "Outbound movement deleted");
        Ok(())
    }

    fn refund(&self, code: &str, weight: Decimal) -> DomainResult<()> {
        match self.limits.book(code, -weight) {
            Ok(_) | Err(DomainError::NotFound { .. }) => Ok(()),
            Err(e) => Err(e),
        }
    }

    fn check_outbound(&self, movement: &OutboundMovement) -> DomainResult<()> {
        movement.check()?;
        self.warehouse.check_location(&movement.location)?;

        let limit = self.limits.get(&movement.limit_no)?;
        if limit.owner != movement.owner || limit.picker != movement.picker {
            return Err(DomainError::Validation(format!(
                "redemption limit {} is for {} to {}",
                limit.code, limit.owner, limit.picker
            )));
        }

        match self.repos.outbound_movements().find_by_out_no(&movement.out_no)? {
            Some(existing) if existing.key != movement.key => Err(DomainError::Conflict(
                format!("outbound number {} already exists", movement.out_no),
            )),
            _ => Ok(()),
        }
    }
}

fn shipped_weight(movement: &OutboundMovement) -> Decimal {
    movement.spec.weight.unwrap_or(Decimal::ZERO)
}
