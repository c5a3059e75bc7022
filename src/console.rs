//! Back-office console runtime.
//!
//! [`Console`] wires the configured key-value store into the repository
//! provider and the application services. The CLI and tests build one with
//! [`Console::open`] and drive the services from it.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::info;

use crate::application::services::{
    ContractService, CustomerService, InboundSettlementService, LimitService, MovementService,
    OutboundSettlementService, RateService, StockService, StorageSettlementService,
    WarehouseService,
};
use crate::config::{AppConfig, StorageBackend};
use crate::domain::fees::parse_date;
use crate::domain::{
    Area, Contact, Contract, Customer, DomainResult, RateSchedule, RedemptionLimit,
    RepositoryProvider, Slot, Tier, Zone,
};
use crate::infrastructure::{FileStore, InMemoryStore, KeyValueStore, StoreRepositoryProvider};
use crate::shared::errors::AppError;

/// Install the global tracing subscriber described by `config.logging`.
///
/// `RUST_LOG` overrides the configured level.
pub fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    match config.logging.format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }
}

/// Handle to an opened billing store and its services.
pub struct Console {
    /// Repository provider for direct data access.
    pub repos: Arc<dyn RepositoryProvider>,
    /// The configuration the console was opened with.
    pub config: AppConfig,

    pub rates: RateService,
    pub contracts: ContractService,
    pub customers: CustomerService,
    pub storage: StorageSettlementService,
    pub inbound: InboundSettlementService,
    pub outbound: OutboundSettlementService,
    pub warehouse: WarehouseService,
    pub stock: StockService,
    pub movements: MovementService,
    pub limits: LimitService,
}

impl Console {
    /// Open the configured store.
    ///
    /// This will:
    /// 1. Open the key-value backend (creating the data directory if needed)
    /// 2. Seed demo data into an empty store when enabled
    /// 3. Recompute stale storage-fee fields
    pub fn open(config: AppConfig) -> Result<Self, AppError> {
        let kv: Arc<dyn KeyValueStore> = match config.storage.backend {
            StorageBackend::File => {
                info!(data_dir = %config.storage.data_dir.display(), "Opening file store");
                Arc::new(FileStore::open(&config.storage.data_dir)?)
            }
            StorageBackend::Memory => {
                info!("Opening in-memory store");
                Arc::new(InMemoryStore::new())
            }
        };
        let repos: Arc<dyn RepositoryProvider> = Arc::new(StoreRepositoryProvider::new(kv));

        let console = Self::with_repos(repos, config);

        if console.config.storage.seed_demo_data {
            console.seed_demo_data()?;
        }

        let refreshed = console.storage.refresh_all()?;
        if refreshed > 0 {
            info!(refreshed, "Stale storage settlements recomputed");
        }

        Ok(console)
    }

    /// Build the services over an existing repository provider.
    pub fn with_repos(repos: Arc<dyn RepositoryProvider>, config: AppConfig) -> Self {
        Self {
            rates: RateService::new(repos.clone()),
            contracts: ContractService::new(repos.clone()),
            customers: CustomerService::new(repos.clone()),
            storage: StorageSettlementService::new(repos.clone()),
            inbound: InboundSettlementService::new(repos.clone()),
            outbound: OutboundSettlementService::new(repos.clone()),
            warehouse: WarehouseService::new(repos.clone()),
            stock: StockService::new(repos.clone()),
            movements: MovementService::new(repos.clone()),
            limits: LimitService::new(repos.clone()),
            repos,
            config,
        }
    }

    /// Insert a sample rate, contract, customers, warehouse layout and
    /// redemption limit into an empty store.
    ///
    /// Returns `false` without writing when rates already exist.
    pub fn seed_demo_data(&self) -> DomainResult<bool> {
        if !self.rates.list()?.is_empty() {
            return Ok(false);
        }
        info!("Seeding demo data...");

        self.rates.create(RateSchedule::new(
            "R001",
            "Standard paper storage",
            vec![
                Tier::new(30, Decimal::from(10)),
                Tier::new(60, Decimal::from(8)),
                Tier::new(90, Decimal::from(6)),
            ],
        ))?;

        let mut owner = Customer::new("JF001", "Jianfa Paper Group");
        owner.alias = "Jianfa".to_string();
        owner.cargo_owner = true;
        owner.paper = true;
        owner.contacts = vec![Contact {
            name: "Zhang Wei".to_string(),
            phone: "13800000001".to_string(),
        }];
        self.customers.create(owner)?;

        let mut picker = Customer::new("FT001", "Fengtu Logistics");
        picker.pickup_party = true;
        picker.bulk = true;
        self.customers.create(picker)?;

        let mut contract = Contract::new("Jianfa Paper Group", "R001", "Jianfa 2025", "HT-2025-001");
        contract.invoice_rate = Decimal::from(6);
        contract.in_fee = Some(Decimal::from(10));
        contract.out_fee = Some(Decimal::from(8));
        contract.box_fee = Some(Decimal::from(200));
        self.contracts.create(contract)?;

        for (name, code, address) in [
            ("Baowan", "A001", "Baowan Logistics Park"),
            ("Taida", "A002", "Taida Free Trade Zone"),
            ("Pengcheng", "A003", "Pengcheng Port"),
        ] {
            self.warehouse.create_area(Area::new(name, code, address))?;
        }
        for (area, zone, slot) in [("Baowan", "Hall 10", "A01"), ("Taida", "Hall 2", "B02")] {
            self.warehouse.create_zone(Zone {
                length: Decimal::from(120),
                width: Decimal::from(40),
                height: Decimal::from(12),
                ..Zone::new(area, zone, 1)
            })?;
            self.warehouse.create_slot(Slot::new(area, zone, slot, slot))?;
        }

        self.limits.create(RedemptionLimit {
            out_weight: Decimal::from(80),
            date: parse_date("2025-06-20"),
            ..RedemptionLimit::new("1", "Jianfa Paper Group", "Fengtu Logistics", Decimal::from(100))
        })?;

        info!("Demo data seeded");
        Ok(true)
    }
}
