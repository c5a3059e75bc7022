//! Settlement repository interfaces

use super::inbound::InboundSettlement;
use super::outbound::OutboundSettlement;
use super::storage::StorageSettlement;
use crate::domain::repositories::Repository;
use crate::domain::DomainResult;

pub trait StorageSettlementRepository: Repository<StorageSettlement> {}

pub trait InboundSettlementRepository: Repository<InboundSettlement> {}

pub trait OutboundSettlementRepository: Repository<OutboundSettlement> {
    fn find_by_out_id(&self, out_id: &str) -> DomainResult<Option<OutboundSettlement>> {
        Ok(self.find_all()?.into_iter().find(|s| s.out_id == out_id))
    }
}
