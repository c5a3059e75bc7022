//! Contract repository interface

use super::model::Contract;
use crate::domain::repositories::Repository;
use crate::domain::DomainResult;

pub trait ContractRepository: Repository<Contract> {
    fn find_by_name(&self, contract_name: &str) -> DomainResult<Option<Contract>> {
        Ok(self
            .find_all()?
            .into_iter()
            .find(|c| c.contract_name == contract_name))
    }
}
