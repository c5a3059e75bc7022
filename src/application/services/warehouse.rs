//! Warehouse topology service
//!
//! Areas, their zones and the slots inside each zone. Children refer to
//! their parent by name, so a parent with children cannot be renamed or
//! deleted.

use std::sync::Arc;

use tracing::info;

use crate::domain::{Area, DomainError, DomainResult, Location, RepositoryProvider, Slot, Zone};

/// Service for areas, zones and slots
pub struct WarehouseService {
    repos: Arc<dyn RepositoryProvider>,
}

impl WarehouseService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    // ── Areas ──────────────────────────────────────────────────

    pub fn list_areas(&self) -> DomainResult<Vec<Area>> {
        self.repos.areas().find_all()
    }

    pub fn get_area(&self, name: &str) -> DomainResult<Area> {
        self.repos
            .areas()
            .find_by_name(name)?
            .ok_or_else(|| DomainError::not_found("Area", "name", name))
    }

    pub fn create_area(&self, area: Area) -> DomainResult<Area> {
        area.check()?;
        self.ensure_unique_area(&area)?;

        let area = self.repos.areas().insert(area)?;
        info!(name = %area.name, code = %area.code, "Area created");
        Ok(area)
    }

    pub fn update_area(&self, area: Area) -> DomainResult<Area> {
        area.check()?;
        let existing = self
            .repos
            .areas()
            .find_by_key(&area.key)?
            .ok_or_else(|| DomainError::not_found("Area", "key", area.key.clone()))?;
        self.ensure_unique_area(&area)?;
        if existing.name != area.name && !self.repos.zones().find_by_area(&existing.name)?.is_empty()
        {
            return Err(DomainError::Conflict(format!(
                "area {} still has zones",
                existing.name
            )));
        }

        self.repos.areas().update(area.clone())?;
        info!(name = %area.name, "Area updated");
        Ok(area)
    }

    pub fn delete_area(&self, name: &str) -> DomainResult<()> {
        let area = self.get_area(name)?;
        if !self.repos.zones().find_by_area(name)?.is_empty() {
            return Err(DomainError::Conflict(format!("area {} still has zones", name)));
        }
        self.repos.areas().delete(&area.key)?;
        info!(name, "Area deleted");
        Ok(())
    }

    fn ensure_unique_area(&self, area: &Area) -> DomainResult<()> {
        let clash = self
            .list_areas()?
            .into_iter()
            .find(|a| a.key != area.key && (a.name == area.name || a.code == area.code));
        match clash {
            Some(a) => Err(DomainError::Conflict(format!(
                "area {} ({}) already exists",
                a.name, a.code
            ))),
            None => Ok(()),
        }
    }

    // ── Zones ──────────────────────────────────────────────────

    /// All zones, or the zones of one area ordered by index.
    pub fn list_zones(&self, area: Option<&str>) -> DomainResult<Vec<Zone>> {
        match area {
            Some(area) => self.repos.zones().find_by_area(area),
            None => self.repos.zones().find_all(),
        }
    }

    pub fn get_zone(&self, area: &str, name: &str) -> DomainResult<Zone> {
        self.repos
            .zones()
            .find_in_area(area, name)?
            .ok_or_else(|| DomainError::not_found("Zone", "name", format!("{}/{}", area, name)))
    }

    pub fn create_zone(&self, zone: Zone) -> DomainResult<Zone> {
        zone.check()?;
        self.get_area(&zone.area)?;
        self.ensure_unique_zone(&zone)?;

        let zone = self.repos.zones().insert(zone)?;
        info!(area = %zone.area, name = %zone.name, "Zone created");
        Ok(zone)
    }

    pub fn update_zone(&self, zone: Zone) -> DomainResult<Zone> {
        zone.check()?;
        let existing = self
            .repos
            .zones()
            .find_by_key(&zone.key)?
            .ok_or_else(|| DomainError::not_found("Zone", "key", zone.key.clone()))?;
        self.get_area(&zone.area)?;
        self.ensure_unique_zone(&zone)?;
        let moved = existing.area != zone.area || existing.name != zone.name;
        if moved
            && !self
                .repos
                .slots()
                .find_by_zone(&existing.area, &existing.name)?
                .is_empty()
        {
            return Err(DomainError::Conflict(format!(
                "zone {}/{} still has slots",
                existing.area, existing.name
            )));
        }

        self.repos.zones().update(zone.clone())?;
        info!(area = %zone.area, name = %zone.name, "Zone updated");
        Ok(zone)
    }

    pub fn delete_zone(&self, area: &str, name: &str) -> DomainResult<()> {
        let zone = self.get_zone(area, name)?;
        if !self.repos.slots().find_by_zone(area, name)?.is_empty() {
            return Err(DomainError::Conflict(format!(
                "zone {}/{} still has slots",
                area, name
            )));
        }
        self.repos.zones().delete(&zone.key)?;
        info!(area, name, "Zone deleted");
        Ok(())
    }

    fn ensure_unique_zone(&self, zone: &Zone) -> DomainResult<()> {
        match self.repos.zones().find_in_area(&zone.area, &zone.name)? {
            Some(existing) if existing.key != zone.key => Err(DomainError::Conflict(format!(
                "zone {}/{} already exists",
                zone.area, zone.name
            ))),
            _ => Ok(()),
        }
    }

    // ── Slots ──────────────────────────────────────────────────

    pub fn list_slots(&self, area: Option<&str>, zone: Option<&str>) -> DomainResult<Vec<Slot>> {
        Ok(self
            .repos
            .slots()
            .find_all()?
            .into_iter()
            .filter(|s| area.map_or(true, |a| s.area == a) && zone.map_or(true, |z| s.zone == z))
            .collect())
    }

    pub fn create_slot(&self, slot: Slot) -> DomainResult<Slot> {
        slot.check()?;
        self.get_zone(&slot.area, &slot.zone)?;
        self.ensure_unique_slot(&slot)?;

        let slot = self.repos.slots().insert(slot)?;
        info!(area = %slot.area, zone = %slot.zone, name = %slot.name, "Slot created");
        Ok(slot)
    }

    pub fn update_slot(&self, slot: Slot) -> DomainResult<Slot> {
        slot.check()?;
        self.get_zone(&slot.area, &slot.zone)?;
        self.ensure_unique_slot(&slot)?;

        self.repos.slots().update(slot.clone())?;
        info!(area = %slot.area, zone = %slot.zone, name = %slot.name, "Slot updated");
        Ok(slot)
    }

    pub fn delete_slot(&self, key: &str) -> DomainResult<()> {
        self.repos.slots().delete(key)?;
        info!(key, "Slot deleted");
        Ok(())
    }

    fn ensure_unique_slot(&self, slot: &Slot) -> DomainResult<()> {
        match self
            .repos
            .slots()
            .find_in_zone(&slot.area, &slot.zone, &slot.name)?
        {
            Some(existing) if existing.key != slot.key => Err(DomainError::Conflict(format!(
                "slot {}/{}/{} already exists",
                slot.area, slot.zone, slot.name
            ))),
            _ => Ok(()),
        }
    }

    /// Fail unless the area, its zone and the slot inside it all exist.
    pub fn check_location(&self, location: &Location) -> DomainResult<()> {
        self.get_area(&location.warehouse)?;
        self.get_zone(&location.warehouse, &location.zone)?;
        if self
            .repos
            .slots()
            .find_in_zone(&location.warehouse, &location.zone, &location.slot)?
            .is_none()
        {
            return Err(DomainError::not_found("Slot", "location", location.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::{sample_zone, seed_topology, test_repos};

    #[test]
    fn area_name_and_code_are_unique() {
        let service = WarehouseService::new(test_repos());
        service
            .create_area(Area::new("Baowan", "A001", "1 Harbor Rd"))
            .unwrap();
        assert!(matches!(
            service.create_area(Area::new("Taida", "A001", "2 Port Ave")),
            Err(DomainError::Conflict(_))
        ));
        assert!(matches!(
            service.create_area(Area::new("Baowan", "A002", "2 Port Ave")),
            Err(DomainError::Conflict(_))
        ));
    }

    #[test]
    fn zone_needs_existing_area() {
        let service = WarehouseService::new(test_repos());
        assert!(matches!(
            service.create_zone(sample_zone("Nowhere", "Hall 1", 1)),
            Err(DomainError::NotFound { entity: "Area", .. })
        ));
    }

    #[test]
    fn zones_listed_by_index() {
        let service = WarehouseService::new(test_repos());
        service
            .create_area(Area::new("Taida", "A002", "2 Port Ave"))
            .unwrap();
        service.create_zone(sample_zone("Taida", "Hall 3", 3)).unwrap();
        service.create_zone(sample_zone("Taida", "Hall 2", 2)).unwrap();

        let names: Vec<_> = service
            .list_zones(Some("Taida"))
            .unwrap()
            .into_iter()
            .map(|z| z.name)
            .collect();
        assert_eq!(names, vec!["Hall 2", "Hall 3"]);
    }

    #[test]
    fn same_zone_name_in_two_areas() {
        let service = WarehouseService::new(test_repos());
        seed_topology(&service);
        service
            .create_area(Area::new("Taida", "A002", "2 Port Ave"))
            .unwrap();
        assert!(service.create_zone(sample_zone("Taida", "Hall 10", 1)).is_ok());
        assert!(matches!(
            service.create_zone(sample_zone("Baowan", "Hall 10", 2)),
            Err(DomainError::Conflict(_))
        ));
    }

    #[test]
    fn parents_with_children_are_kept() {
        let service = WarehouseService::new(test_repos());
        seed_topology(&service);

        assert!(matches!(
            service.delete_area("Baowan"),
            Err(DomainError::Conflict(_))
        ));
        assert!(matches!(
            service.delete_zone("Baowan", "Hall 10"),
            Err(DomainError::Conflict(_))
        ));

        let mut renamed = service.get_area("Baowan").unwrap();
        renamed.name = "Baowan North".into();
        assert!(matches!(
            service.update_area(renamed),
            Err(DomainError::Conflict(_))
        ));

        for slot in service.list_slots(Some("Baowan"), Some("Hall 10")).unwrap() {
            service.delete_slot(&slot.key).unwrap();
        }
        service.delete_zone("Baowan", "Hall 10").unwrap();
        service.delete_area("Baowan").unwrap();
        assert!(service.list_areas().unwrap().is_empty());
    }

    #[test]
    fn address_change_keeps_zones() {
        let service = WarehouseService::new(test_repos());
        seed_topology(&service);
        let mut area = service.get_area("Baowan").unwrap();
        area.address = "9 Harbor Rd".into();
        service.update_area(area).unwrap();
        assert_eq!(service.get_area("Baowan").unwrap().address, "9 Harbor Rd");
    }

    #[test]
    fn location_check_walks_the_tree() {
        let service = WarehouseService::new(test_repos());
        seed_topology(&service);

        assert!(service
            .check_location(&Location::new("Baowan", "Hall 10", "A02"))
            .is_ok());
        assert!(matches!(
            service.check_location(&Location::new("Baowan", "Hall 10", "Z99")),
            Err(DomainError::NotFound { entity: "Slot", .. })
        ));
        assert!(matches!(
            service.check_location(&Location::new("Baowan", "Hall 2", "A01")),
            Err(DomainError::NotFound { entity: "Zone", .. })
        ));
        assert!(matches!(
            service.check_location(&Location::new("Taida", "Hall 10", "A01")),
            Err(DomainError::NotFound { entity: "Area", .. })
        ));
    }
}
