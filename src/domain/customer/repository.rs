//! Customer repository interfaces

use super::limit::RedemptionLimit;
use super::model::Customer;
use crate::domain::repositories::Repository;
use crate::domain::DomainResult;

pub trait CustomerRepository: Repository<Customer> {
    fn find_by_name(&self, name: &str) -> DomainResult<Option<Customer>> {
        Ok(self.find_all()?.into_iter().find(|c| c.name == name))
    }
}

pub trait LimitRepository: Repository<RedemptionLimit> {
    fn find_by_code(&self, code: &str) -> DomainResult<Option<RedemptionLimit>> {
        Ok(self.find_all()?.into_iter().find(|l| l.code == code))
    }
}
