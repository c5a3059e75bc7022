//! Warehouse topology repository interfaces

use super::model::{Area, Slot, Zone};
use crate::domain::repositories::Repository;
use crate::domain::DomainResult;

pub trait AreaRepository: Repository<Area> {
    fn find_by_name(&self, name: &str) -> DomainResult<Option<Area>> {
        Ok(self.find_all()?.into_iter().find(|a| a.name == name))
    }
}

pub trait ZoneRepository: Repository<Zone> {
    fn find_in_area(&self, area: &str, name: &str) -> DomainResult<Option<Zone>> {
        Ok(self
            .find_all()?
            .into_iter()
            .find(|z| z.area == area && z.name == name))
    }

    /// Zones of one area, ordered by index.
    fn find_by_area(&self, area: &str) -> DomainResult<Vec<Zone>> {
        let mut zones: Vec<Zone> = self
            .find_all()?
            .into_iter()
            .filter(|z| z.area == area)
            .collect();
        zones.sort_by_key(|z| z.index);
        Ok(zones)
    }
}

pub trait SlotRepository: Repository<Slot> {
    fn find_in_zone(&self, area: &str, zone: &str, name: &str) -> DomainResult<Option<Slot>> {
        Ok(self
            .find_all()?
            .into_iter()
            .find(|s| s.area == area && s.zone == zone && s.name == name))
    }

    fn find_by_zone(&self, area: &str, zone: &str) -> DomainResult<Vec<Slot>> {
        Ok(self
            .find_all()?
            .into_iter()
            .filter(|s| s.area == area && s.zone == zone)
            .collect())
    }
}
