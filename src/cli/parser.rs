use crate::export::ExportFormat;
use crate::models::booking::BookingStatus;
use crate::models::promotion::PromotionKind;
use crate::models::resource::{ChargerType, Connector, ResourceKind};
use crate::models::transaction::TransactionKind;
use clap::{Args, Parser, Subcommand};

/// Command-line interface definition for GreenPoint
/// EV driver rewards, charger/service registry and slot bookings on SQLite
#[derive(Parser)]
#[command(
    name = "greenpoint",
    version = env!("CARGO_PKG_VERSION"),
    about = "GreenPoint: EV rewards ledger, charger map and service bookings using SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// GreenPoints balance, history, earning and redemption
    Points {
        #[command(subcommand)]
        action: PointsAction,
    },

    /// Manage chargers and services
    Resource {
        #[command(subcommand)]
        action: ResourceAction,
    },

    /// Show the free slots of a resource for one day
    Slots {
        /// Resource id
        resource: String,

        /// Date (YYYY-MM-DD or "today")
        #[arg(long, default_value = "today")]
        date: String,
    },

    /// Book a free slot (earns booking points)
    Book {
        /// Resource id
        resource: String,

        /// Date (YYYY-MM-DD or "today")
        #[arg(long)]
        date: String,

        /// Slot start (HH:MM)
        #[arg(long)]
        time: String,

        #[arg(long, help = "Customer name")]
        customer: String,
    },

    /// List and manage bookings
    Bookings {
        #[command(subcommand)]
        action: BookingsAction,
    },

    /// Filtered map markers with their current status
    Map(MapArgs),

    /// Manage the driver's vehicles
    Vehicle {
        #[command(subcommand)]
        action: VehicleAction,
    },

    /// Manage host promotion codes
    Promotion {
        #[command(subcommand)]
        action: PromotionAction,
    },
}

#[derive(Subcommand)]
pub enum PointsAction {
    /// Current balance
    Balance,

    /// Transactions, newest first
    History {
        #[arg(long, short, help = "Show only the N most recent transactions")]
        limit: Option<usize>,
    },

    /// Credit points manually
    Earn {
        amount: i64,
        #[arg(long, short)]
        description: String,
    },

    /// Debit points manually
    Spend {
        amount: i64,
        #[arg(long, short)]
        description: String,
    },

    /// Earn points for a charging session
    Charge {
        #[arg(long, help = "Energy delivered in kWh")]
        kwh: u32,
    },

    /// Earn points for visiting a partner service
    Visit {
        #[arg(long)]
        service: String,
    },

    /// Earn the referral bonus
    Referral,

    /// Spend points on a reward
    Redeem {
        #[command(subcommand)]
        reward: RedeemAction,
    },

    /// Export the history to CSV or JSON
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE", help = "Absolute output path")]
        file: String,

        #[arg(long, value_enum, help = "Only earned or only spent transactions")]
        kind: Option<TransactionKind>,

        #[arg(long, short = 'f')]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum RedeemAction {
    /// Charging discount
    Discount { points: i64 },

    /// Service partner voucher
    Voucher { points: i64 },

    /// Any other benefit
    Benefit {
        points: i64,
        #[arg(long)]
        name: String,
    },
}

#[derive(Subcommand)]
pub enum ResourceAction {
    /// Register a charger or service
    Add(ResourceAddArgs),

    /// List resources with their status
    List {
        #[arg(long, help = "Evaluate status at HH:MM instead of now")]
        at: Option<String>,
    },

    /// Switch a resource online/offline
    Toggle { id: String },

    /// Delete a resource and its bookings
    Del { id: String },
}

#[derive(Args)]
pub struct ResourceAddArgs {
    pub id: String,

    #[arg(long)]
    pub name: String,

    #[arg(long, value_enum, default_value = "charger")]
    pub kind: ResourceKind,

    #[arg(long, help = "Opening time (HH:MM)")]
    pub open: String,

    #[arg(long, help = "Closing time (HH:MM)")]
    pub close: String,

    #[arg(long = "break-start", requires = "break_end")]
    pub break_start: Option<String>,

    #[arg(long = "break-end", requires = "break_start")]
    pub break_end: Option<String>,

    #[arg(long, help = "Slot duration in minutes (default from config)")]
    pub duration: Option<u16>,

    #[arg(long = "type", value_enum)]
    pub charger_type: Option<ChargerType>,

    #[arg(long, value_enum)]
    pub connector: Option<Connector>,

    #[arg(long, default_value_t = 0.0)]
    pub price: f64,

    #[arg(long)]
    pub free: bool,

    #[arg(long, help = "Register as offline")]
    pub unavailable: bool,
}

#[derive(Subcommand)]
pub enum BookingsAction {
    /// List bookings
    List {
        #[arg(long)]
        resource: Option<String>,
    },

    /// Change the status of a booking
    Status {
        id: String,
        #[arg(value_enum)]
        status: BookingStatus,
    },

    /// Delete a booking
    Del { id: String },
}

#[derive(Args, Default)]
pub struct MapArgs {
    #[arg(long, help = "Case-insensitive name search")]
    pub search: Option<String>,

    #[arg(long = "type", value_enum, help = "Charger type (repeatable)")]
    pub types: Vec<ChargerType>,

    #[arg(long = "connector", value_enum, help = "Connector (repeatable)")]
    pub connectors: Vec<Connector>,

    #[arg(long, help = "Only resources available right now")]
    pub available: bool,

    #[arg(long, help = "Only free resources")]
    pub free: bool,

    #[arg(long, help = "Evaluate at HH:MM instead of now")]
    pub at: Option<String>,
}

#[derive(Subcommand)]
pub enum VehicleAction {
    /// Register a vehicle
    Add {
        #[arg(long)]
        make: String,

        #[arg(long)]
        model: String,

        #[arg(long, help = "Model year")]
        year: u16,

        #[arg(long, help = "Battery capacity in kWh")]
        battery: u32,

        #[arg(long, help = "Licence plate")]
        plate: String,
    },

    /// List registered vehicles
    List,

    /// Change one or more fields of a vehicle
    Edit {
        id: String,

        #[arg(long)]
        make: Option<String>,

        #[arg(long)]
        model: Option<String>,

        #[arg(long)]
        year: Option<u16>,

        #[arg(long, help = "Battery capacity in kWh")]
        battery: Option<u32>,

        #[arg(long)]
        plate: Option<String>,
    },

    /// Delete a vehicle
    Del { id: String },
}

#[derive(Subcommand)]
pub enum PromotionAction {
    /// Create a promotion code
    Add {
        #[arg(long)]
        code: String,

        #[arg(long, default_value = "")]
        description: String,

        #[arg(long, value_enum)]
        kind: PromotionKind,

        #[arg(long, help = "Percentage (0-100] or fixed amount off")]
        value: f64,

        #[arg(long, help = "Last valid day (YYYY-MM-DD)")]
        expires: Option<String>,

        #[arg(long, help = "Maximum number of uses (default: unlimited)")]
        limit: Option<u32>,
    },

    /// List promotions
    List,

    /// Delete a promotion
    Del { id: String },
}
