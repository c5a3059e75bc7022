//! Contract service

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::{Contract, ContractTerms, DomainError, DomainResult, RepositoryProvider};

/// Service for customer contracts and the terms derived from them
pub struct ContractService {
    repos: Arc<dyn RepositoryProvider>,
}

impl ContractService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub fn list(&self) -> DomainResult<Vec<Contract>> {
        self.repos.contracts().find_all()
    }

    pub fn get(&self, contract_name: &str) -> DomainResult<Contract> {
        self.repos
            .contracts()
            .find_by_name(contract_name)?
            .ok_or_else(|| DomainError::not_found("Contract", "contract_name", contract_name))
    }

    pub fn create(&self, contract: Contract) -> DomainResult<Contract> {
        contract.check()?;
        self.ensure_unique(&contract)?;
        self.warn_on_unknown_rate(&contract)?;

        let contract = self.repos.contracts().insert(contract)?;
        info!(
            contract_name = %contract.contract_name,
            customer = %contract.customer_name,
            rate_no = %contract.rate_no,
            "Contract created"
        );
        Ok(contract)
    }

    pub fn update(&self, contract: Contract) -> DomainResult<Contract> {
        contract.check()?;
        self.ensure_unique(&contract)?;
        self.warn_on_unknown_rate(&contract)?;

        self.repos.contracts().update(contract.clone())?;
        info!(contract_name = %contract.contract_name, "Contract updated");
        Ok(contract)
    }

    pub fn delete(&self, contract_name: &str) -> DomainResult<()> {
        let contract = self.get(contract_name)?;
        self.repos.contracts().delete(&contract.key)?;
        info!(contract_name, "Contract deleted");
        Ok(())
    }

    /// Resolve a contract together with its storage rate
    pub fn terms(&self, contract_name: &str) -> DomainResult<ContractTerms> {
        self.find_terms(contract_name)?
            .ok_or_else(|| DomainError::not_found("Contract", "contract_name", contract_name))
    }

    /// Like [`ContractService::terms`], but `None` for an unknown contract
    pub fn find_terms(&self, contract_name: &str) -> DomainResult<Option<ContractTerms>> {
        let contract = match self.repos.contracts().find_by_name(contract_name)? {
            Some(contract) => contract,
            None => return Ok(None),
        };
        let rate = self.repos.rates().find_by_rate_no(&contract.rate_no)?;
        Ok(Some(ContractTerms { contract, rate }))
    }

    fn ensure_unique(&self, contract: &Contract) -> DomainResult<()> {
        match self.repos.contracts().find_by_name(&contract.contract_name)? {
            Some(existing) if existing.key != contract.key => Err(DomainError::Conflict(
                format!("contract {} already exists", contract.contract_name),
            )),
            _ => Ok(()),
        }
    }

    fn warn_on_unknown_rate(&self, contract: &Contract) -> DomainResult<()> {
        if self.repos.rates().find_by_rate_no(&contract.rate_no)?.is_none() {
            warn!(
                contract_name = %contract.contract_name,
                rate_no = %contract.rate_no,
                "Contract references an unknown rate schedule"
            );
        }
        Ok(())
    }
}
