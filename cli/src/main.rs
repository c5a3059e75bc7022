//! Depot Billing command-line console
//!
//! ```sh
//! # Default config (~/.config/depot-billing/config.toml)
//! depot-cli storage list --month 2025-06
//!
//! # Quote a storage fee against a contract's tiered rate
//! depot-cli quote --start 2025-06-20 --end 2025-07-05 --month 2025-06 \
//!     --weight 100 --contract "Jianfa 2025"
//!
//! # Hand a roll in stock to a new owner and pickup party
//! depot-cli stock transfer <KEY> --owner "Fengtu Logistics" --picker "Harbor Trading"
//!
//! # Validate config and exit
//! depot-cli check
//! ```

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use tracing::{error, info};

use depot_billing::config::AppConfig;
use depot_billing::domain::{
    compute_day_counts, compute_fee, resolve_unit_price, InboundFilter, MovementFilter,
    OutboundFilter, StockFilter, StorageSettlement, StorageSettlementFilter, Tier, YearMonth,
};
use depot_billing::{init_tracing, Console};

/// Warehouse back-office console: stock, movements, rates and settlement ledgers.
#[derive(Parser, Debug)]
#[command(
    name = "depot-cli",
    version,
    about = "Warehouse storage, inbound and outbound billing",
    long_about = "Depot Billing: tiered storage fees, contracts and settlement ledgers.\n\n\
                  Default config: ~/.config/depot-billing/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "DEPOT_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    /// Override the data directory of the file store.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate the configuration file and exit.
    Check,
    /// Compute day counts and the storage fee for a date range.
    Quote(QuoteArgs),
    /// Storage rate schedules.
    Rates {
        #[command(subcommand)]
        action: ListOnly,
    },
    /// Customer contracts.
    Contracts {
        #[command(subcommand)]
        action: ListOnly,
    },
    /// Customer directory.
    Customers {
        #[command(subcommand)]
        action: CustomerAction,
    },
    /// Storage-fee ledger.
    Storage {
        #[command(subcommand)]
        action: StorageAction,
    },
    /// Inbound handling ledger.
    Inbound {
        #[command(subcommand)]
        action: InboundAction,
    },
    /// Outbound handling ledger.
    Outbound {
        #[command(subcommand)]
        action: OutboundAction,
    },
    /// Warehouse areas, zones and slots.
    Warehouse {
        #[command(subcommand)]
        action: WarehouseAction,
    },
    /// Rolls currently in the warehouse.
    Stock {
        #[command(subcommand)]
        action: StockAction,
    },
    /// Inbound and outbound goods movement logs.
    Movements {
        #[command(subcommand)]
        action: MovementAction,
    },
    /// Redemption limits.
    Limits {
        #[command(subcommand)]
        action: ListOnly,
    },
}

#[derive(Subcommand, Debug)]
enum ListOnly {
    List,
}

#[derive(Subcommand, Debug)]
enum CustomerAction {
    List {
        /// Only customers that may be cargo owners.
        #[arg(long, conflicts_with = "pickers")]
        owners: bool,
        /// Only customers that may be pickup parties.
        #[arg(long)]
        pickers: bool,
    },
}

#[derive(Args, Debug)]
struct QuoteArgs {
    #[arg(long)]
    start: NaiveDate,
    #[arg(long)]
    end: NaiveDate,
    /// Settlement month (YYYY-MM).
    #[arg(long)]
    month: Option<YearMonth>,
    /// Weight in tonnes.
    #[arg(long)]
    weight: Decimal,
    /// Price from this contract's rate schedule.
    #[arg(long, conflicts_with_all = ["rate", "price"])]
    contract: Option<String>,
    /// Price from this rate schedule.
    #[arg(long, conflicts_with = "price")]
    rate: Option<String>,
    /// Fixed unit price per tonne per day.
    #[arg(long)]
    price: Option<Decimal>,
}

#[derive(Subcommand, Debug)]
enum StorageAction {
    List {
        #[arg(long)]
        contract: Option<String>,
        #[arg(long)]
        roll: Option<String>,
        /// Cargo owner or pickup party.
        #[arg(long)]
        customer: Option<String>,
        /// Only records overlapping this month (YYYY-MM).
        #[arg(long)]
        month: Option<YearMonth>,
    },
    Add {
        #[arg(long)]
        contract: String,
        #[arg(long)]
        roll: String,
        #[arg(long)]
        start: NaiveDate,
        #[arg(long)]
        end: NaiveDate,
        #[arg(long)]
        weight: Decimal,
        #[arg(long)]
        month: Option<YearMonth>,
        /// Overrides the contract's tiered price.
        #[arg(long)]
        price: Option<Decimal>,
        #[arg(long)]
        pickup: Option<String>,
        /// Required when the contract is unknown.
        #[arg(long)]
        owner: Option<String>,
        #[arg(long, default_value = "")]
        remark: String,
    },
    Delete {
        key: String,
    },
}

#[derive(Subcommand, Debug)]
enum InboundAction {
    List {
        #[arg(long)]
        bill: Option<String>,
        #[arg(long)]
        customer: Option<String>,
        #[arg(long)]
        contract: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
enum OutboundAction {
    List {
        #[arg(long)]
        bill: Option<String>,
        #[arg(long)]
        owner: Option<String>,
        #[arg(long)]
        picker: Option<String>,
        #[arg(long)]
        plate: Option<String>,
        /// Shipped on this day (YYYY-MM-DD).
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Show one settlement by its outbound id.
    Show {
        out_id: String,
    },
}

#[derive(Subcommand, Debug)]
enum WarehouseAction {
    Areas,
    Zones {
        #[arg(long)]
        area: Option<String>,
    },
    Slots {
        #[arg(long)]
        area: Option<String>,
        #[arg(long)]
        zone: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
enum StockAction {
    List {
        #[arg(long)]
        bill: Option<String>,
        #[arg(long)]
        roll: Option<String>,
        #[arg(long)]
        owner: Option<String>,
        #[arg(long)]
        picker: Option<String>,
    },
    /// Change the cargo owner and pickup party of a roll.
    Transfer {
        key: String,
        #[arg(long)]
        owner: String,
        #[arg(long)]
        picker: String,
    },
    /// Ship the given rolls in one batch.
    Ship {
        #[arg(required = true)]
        keys: Vec<String>,
    },
}

#[derive(Args, Debug)]
struct MovementArgs {
    #[arg(long)]
    bill: Option<String>,
    #[arg(long)]
    roll: Option<String>,
    /// Cargo owner or pickup party.
    #[arg(long)]
    customer: Option<String>,
}

impl MovementArgs {
    fn into_filter(self) -> MovementFilter {
        MovementFilter {
            bill_no: self.bill,
            roll_no: self.roll,
            customer: self.customer,
        }
    }
}

#[derive(Subcommand, Debug)]
enum MovementAction {
    In(MovementArgs),
    Out(MovementArgs),
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(depot_billing::default_config_path);

    let (mut config, load_error) = match AppConfig::load(&config_path) {
        Ok(cfg) => (cfg, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    // ── Apply CLI overrides ────────────────────────────────────
    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }
    if let Some(ref dir) = cli.data_dir {
        config.storage.data_dir = dir.clone();
    }

    init_tracing(&config);
    let loaded = load_error.is_none();
    match load_error {
        None => info!("Configuration loaded from {}", config_path.display()),
        Some(e) => {
            error!("Failed to load config from {}: {}", config_path.display(), e);
            error!("Using default configuration.");
        }
    }

    if let Command::Check = cli.command {
        if !loaded {
            return Err(format!("cannot load {}", config_path.display()).into());
        }
        config.validate()?;
        println!("Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   Backend     : {:?}", config.storage.backend);
        println!("   Data dir    : {}", config.storage.data_dir.display());
        println!("   Log level   : {}", config.logging.level);
        println!("   Log format  : {}", config.logging.format);
        return Ok(());
    }

    let console = Console::open(config)?;

    match cli.command {
        Command::Check => {}
        Command::Quote(args) => quote(&console, args)?,
        Command::Rates { action: ListOnly::List } => {
            for rate in console.rates.list()? {
                let tiers: Vec<String> = rate
                    .sorted_tiers()
                    .iter()
                    .map(|t| format!("<={}d:{}", t.threshold_days, t.unit_price))
                    .collect();
                println!("{:<8} {:<28} {}", rate.rate_no, rate.rate_name, tiers.join("  "));
            }
        }
        Command::Contracts { action: ListOnly::List } => {
            for c in console.contracts.list()? {
                println!(
                    "{:<24} {:<14} {:<24} {:<8} {:<10} invoice {}%",
                    c.contract_name, c.contract_id, c.customer_name, c.rate_no, c.contract_type,
                    c.invoice_rate
                );
            }
        }
        Command::Customers {
            action: CustomerAction::List { owners, pickers },
        } => {
            let customers = if owners {
                console.customers.cargo_owners()?
            } else if pickers {
                console.customers.pickup_parties()?
            } else {
                console.customers.list()?
            };
            for c in customers {
                println!("{:<8} {:<28} {}", c.code, c.name, c.display_name());
            }
        }
        Command::Storage { action } => storage(&console, action)?,
        Command::Inbound {
            action: InboundAction::List { bill, customer, contract },
        } => {
            let filter = InboundFilter {
                bill_no: bill,
                customer,
                contract_name: contract,
            };
            for r in console.inbound.search(&filter)? {
                println!(
                    "{:<10} {:<24} {:<24} in {:>10} out {:>10} box {:>10} total {:>10}",
                    r.bill_no,
                    r.cargo_owner,
                    r.contract_name,
                    r.in_fee,
                    r.out_fee,
                    r.box_total_fee,
                    r.itemized_total()
                );
            }
        }
        Command::Outbound {
            action: OutboundAction::Show { out_id },
        } => {
            let r = console.outbound.get_by_out_id(&out_id)?;
            println!("Outbound id  : {}", r.out_id);
            println!("Bill         : {}", r.bill_no);
            println!("Cargo owner  : {}", r.cargo_owner);
            println!("Pickup party : {}", r.pickup_party);
            println!("Plate        : {}", r.plate_number);
            println!("Total fee    : {}", r.total_fee());
            println!("Unpaid       : {}", r.unpaid_fee());
        }
        Command::Warehouse { action } => warehouse(&console, action)?,
        Command::Stock { action } => stock(&console, action)?,
        Command::Movements { action } => movements(&console, action)?,
        Command::Limits { action: ListOnly::List } => {
            for l in console.limits.list()? {
                println!(
                    "{:<6} {:<24} {:<24} total {:>8}t shipped {:>8}t left {:>8}t",
                    l.code,
                    l.owner,
                    l.picker,
                    l.total_weight,
                    l.out_weight,
                    l.remaining()
                );
            }
        }
        Command::Outbound {
            action:
                OutboundAction::List {
                    bill,
                    owner,
                    picker,
                    plate,
                    date,
                },
        } => {
            let filter = OutboundFilter {
                bill_no: bill,
                cargo_owner: owner,
                pickup_party: picker,
                plate_number: plate,
                date,
            };
            for r in console.outbound.search(&filter)? {
                let out_time = r.out_time.map(|t| t.to_string()).unwrap_or_default();
                println!(
                    "{:<10} {:<20} {:<10} {:<24} total {:>10} unpaid {:>10}",
                    r.out_id,
                    out_time,
                    r.bill_no,
                    r.cargo_owner,
                    r.total_fee(),
                    r.unpaid_fee()
                );
            }
        }
    }

    Ok(())
}

fn quote(console: &Console, args: QuoteArgs) -> Result<(), Box<dyn std::error::Error>> {
    let counts = compute_day_counts(Some(args.start), Some(args.end), args.month);

    let tiers: Vec<Tier> = if let Some(ref name) = args.contract {
        console.contracts.terms(name)?.tiers()
    } else if let Some(ref rate_no) = args.rate {
        console.rates.get(rate_no)?.sorted_tiers()
    } else {
        Vec::new()
    };
    let unit_price = args
        .price
        .unwrap_or_else(|| resolve_unit_price(counts.total_days, &tiers));
    let fee = compute_fee(Some(args.weight), Some(counts.total_days), Some(unit_price));

    println!("Total days   : {}", counts.total_days);
    println!("Monthly days : {}", counts.monthly_days);
    println!("Unit price   : {}", unit_price);
    println!("Storage fee  : {}", fee);
    Ok(())
}

fn storage(console: &Console, action: StorageAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        StorageAction::List {
            contract,
            roll,
            customer,
            month,
        } => {
            let filter = StorageSettlementFilter {
                contract_name: contract,
                roll_no: roll,
                customer,
                month,
            };
            let mut total = Decimal::ZERO;
            for r in console.storage.search(&filter)? {
                total += r.storage_fee;
                println!(
                    "{:<36} {:<8} {:<24} {} → {} {:>4}d ({:>2} in month) {:>8}t @ {:>6} = {:>10}",
                    r.key,
                    r.roll_no,
                    r.contract_name,
                    r.start_date.map(|d| d.to_string()).unwrap_or_default(),
                    r.end_date.map(|d| d.to_string()).unwrap_or_default(),
                    r.total_days,
                    r.monthly_days,
                    r.weight,
                    r.unit_price.unwrap_or_default(),
                    r.storage_fee
                );
            }
            println!("Total storage fee: {}", total);
        }
        StorageAction::Add {
            contract,
            roll,
            start,
            end,
            weight,
            month,
            price,
            pickup,
            owner,
            remark,
        } => {
            let record = console.storage.create(StorageSettlement {
                cargo_owner: owner.unwrap_or_default(),
                pickup_party: pickup.unwrap_or_default(),
                contract_name: contract,
                roll_no: roll,
                start_date: Some(start),
                end_date: Some(end),
                settlement_month: month,
                weight,
                unit_price: price,
                remark,
                ..Default::default()
            })?;
            println!(
                "Created {} ({} days, fee {})",
                record.key, record.total_days, record.storage_fee
            );
        }
        StorageAction::Delete { key } => {
            console.storage.delete(&key)?;
            println!("Deleted {}", key);
        }
    }
    Ok(())
}

fn warehouse(console: &Console, action: WarehouseAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        WarehouseAction::Areas => {
            for a in console.warehouse.list_areas()? {
                println!("{:<6} {:<16} {}", a.code, a.name, a.address);
            }
        }
        WarehouseAction::Zones { area } => {
            for z in console.warehouse.list_zones(area.as_deref())? {
                println!(
                    "{:<16} {:>3} {:<16} {}x{}x{} m",
                    z.area, z.index, z.name, z.length, z.width, z.height
                );
            }
        }
        WarehouseAction::Slots { area, zone } => {
            for s in console
                .warehouse
                .list_slots(area.as_deref(), zone.as_deref())?
            {
                println!("{:<16} {:<16} {:<8} {}", s.area, s.zone, s.name, s.code);
            }
        }
    }
    Ok(())
}

fn stock(console: &Console, action: StockAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        StockAction::List {
            bill,
            roll,
            owner,
            picker,
        } => {
            let filter = StockFilter {
                bill_no: bill,
                roll_no: roll,
                owner,
                picker,
            };
            for item in console.stock.search(&filter)? {
                println!(
                    "{:<36} {:<8} {:<14} {} {:<24} {:<24} {}",
                    item.key,
                    item.roll_no,
                    item.bill_no,
                    item.in_date.map(|d| d.to_string()).unwrap_or_default(),
                    item.owner,
                    item.picker,
                    item.location
                );
            }
        }
        StockAction::Transfer { key, owner, picker } => {
            let item = console.stock.transfer(&key, &owner, &picker)?;
            println!(
                "Roll {} now owned by {}, picked up by {}",
                item.roll_no, item.owner, item.picker
            );
        }
        StockAction::Ship { keys } => {
            let removed = console.stock.ship(&keys)?;
            println!("Shipped {} of {} rolls", removed, keys.len());
        }
    }
    Ok(())
}

fn movements(console: &Console, action: MovementAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        MovementAction::In(args) => {
            for m in console.movements.search_inbound(&args.into_filter())? {
                println!(
                    "{:<16} {} {:<8} {:<14} {:<24} {}",
                    m.in_no,
                    m.in_date.map(|d| d.to_string()).unwrap_or_default(),
                    m.roll_no,
                    m.bill_no,
                    m.owner,
                    m.location
                );
            }
        }
        MovementAction::Out(args) => {
            for m in console.movements.search_outbound(&args.into_filter())? {
                println!(
                    "{:<16} {} {:<8} {:<14} {:<24} limit {:<6} {}",
                    m.out_no,
                    m.out_date.map(|d| d.to_string()).unwrap_or_default(),
                    m.roll_no,
                    m.bill_no,
                    m.owner,
                    m.limit_no,
                    m.out_car_no
                );
            }
        }
    }
    Ok(())
}
