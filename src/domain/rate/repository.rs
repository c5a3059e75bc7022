//! Rate schedule repository interface

use super::model::RateSchedule;
use crate::domain::repositories::Repository;
use crate::domain::DomainResult;

pub trait RateRepository: Repository<RateSchedule> {
    fn find_by_rate_no(&self, rate_no: &str) -> DomainResult<Option<RateSchedule>> {
        Ok(self.find_all()?.into_iter().find(|r| r.rate_no == rate_no))
    }
}
