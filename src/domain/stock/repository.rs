//! Stock and movement repository interfaces

use super::model::StockItem;
use super::movement::{InboundMovement, OutboundMovement};
use crate::domain::repositories::Repository;
use crate::domain::DomainResult;

pub trait StockRepository: Repository<StockItem> {
    fn find_roll(&self, roll_no: &str, bill_no: &str) -> DomainResult<Option<StockItem>> {
        Ok(self
            .find_all()?
            .into_iter()
            .find(|s| s.is_roll(roll_no, bill_no)))
    }
}

pub trait InboundMovementRepository: Repository<InboundMovement> {
    fn find_by_in_no(&self, in_no: &str) -> DomainResult<Option<InboundMovement>> {
        Ok(self.find_all()?.into_iter().find(|m| m.in_no == in_no))
    }
}

pub trait OutboundMovementRepository: Repository<OutboundMovement> {
    fn find_by_out_no(&self, out_no: &str) -> DomainResult<Option<OutboundMovement>> {
        Ok(self.find_all()?.into_iter().find(|m| m.out_no == out_no))
    }
}
