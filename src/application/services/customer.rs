//! Customer directory service

use std::sync::Arc;

use tracing::info;

use crate::domain::{Customer, DomainError, DomainResult, RepositoryProvider};

/// Service for the customer directory
pub struct CustomerService {
    repos: Arc<dyn RepositoryProvider>,
}

impl CustomerService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub fn list(&self) -> DomainResult<Vec<Customer>> {
        self.repos.customers().find_all()
    }

    /// Customers that may be named as cargo owner
    pub fn cargo_owners(&self) -> DomainResult<Vec<Customer>> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|c| c.cargo_owner)
            .collect())
    }

    /// Customers that may be named as pickup party
    pub fn pickup_parties(&self) -> DomainResult<Vec<Customer>> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|c| c.pickup_party)
            .collect())
    }

    pub fn get(&self, name: &str) -> DomainResult<Customer> {
        self.repos
            .customers()
            .find_by_name(name)?
            .ok_or_else(|| DomainError::not_found("Customer", "name", name))
    }

    pub fn create(&self, customer: Customer) -> DomainResult<Customer> {
        customer.check()?;
        self.ensure_unique(&customer)?;

        let customer = self.repos.customers().insert(customer)?;
        info!(code = %customer.code, name = %customer.name, "Customer created");
        Ok(customer)
    }

    pub fn update(&self, customer: Customer) -> DomainResult<Customer> {
        customer.check()?;
        self.ensure_unique(&customer)?;

        self.repos.customers().update(customer.clone())?;
        info!(name = %customer.name, "Customer updated");
        Ok(customer)
    }

    pub fn delete(&self, name: &str) -> DomainResult<()> {
        let customer = self.get(name)?;
        self.repos.customers().delete(&customer.key)?;
        info!(name, "Customer deleted");
        Ok(())
    }

    fn ensure_unique(&self, customer: &Customer) -> DomainResult<()> {
        match self.repos.customers().find_by_name(&customer.name)? {
            Some(existing) if existing.key != customer.key => Err(DomainError::Conflict(
                format!("customer {} already exists", customer.name),
            )),
            _ => Ok(()),
        }
    }
}
