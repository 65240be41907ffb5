use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for stockpos
/// CLI application to track inventory and sales with SQLite
#[derive(Parser)]
#[command(
    name = "stockpos",
    version = env!("CARGO_PKG_VERSION"),
    about = "A simple inventory/POS CLI: track stock, record sales and compute metrics using SQLite",
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

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/vim/notepad)"
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

    /// Print the internal audit log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Manage catalog items
    Item {
        #[command(subcommand)]
        action: ItemCommands,
    },

    /// Record a single-item sale
    Sell {
        /// Item barcode or numeric id
        ident: String,

        /// Quantity sold
        quantity: i64,
    },

    /// Record a multi-line sale (all lines commit together or not at all)
    Checkout {
        /// Sale line as ITEM_ID:QTY (repeatable)
        #[arg(long = "line", value_name = "ITEM:QTY", required = true)]
        lines: Vec<String>,
    },

    /// List recorded sales
    Sales {
        #[arg(
            long,
            short,
            help = "Filter by year/month/day or a custom range (e.g. 2025-06, 2025-06-01:2025-06-15)"
        )]
        period: Option<String>,
    },

    /// Compute business metrics for a date window
    Metrics {
        #[arg(long = "from", help = "Window start (YYYY-MM-DD), default: 6 days ago")]
        from: Option<String>,

        #[arg(long = "to", help = "Window end (YYYY-MM-DD), default: today")]
        to: Option<String>,

        #[arg(
            long = "compare-from",
            requires = "compare_to",
            help = "Explicit comparison window start (default: preceding period of equal length)"
        )]
        compare_from: Option<String>,

        #[arg(long = "compare-to", requires = "compare_from")]
        compare_to: Option<String>,

        #[arg(long = "json", help = "Emit the report as JSON instead of tables")]
        json: bool,
    },

    /// Export sale lines
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(
            long,
            value_name = "RANGE",
            help = "Filter export by year/month/day or a custom range"
        )]
        range: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,

        #[arg(long, short = 'f', help = "Overwrite an existing backup without asking")]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum ItemCommands {
    /// Add a new item to the catalog
    Add {
        /// Item name
        name: String,

        #[arg(long, help = "Barcode (unique when present)")]
        barcode: Option<String>,

        #[arg(long, help = "Item description")]
        description: Option<String>,

        #[arg(long, default_value_t = 0, help = "Initial stock")]
        stock: i64,

        #[arg(long = "min-stock", help = "Low-stock alert threshold (default from config)")]
        min_stock: Option<i64>,

        #[arg(long, default_value_t = 0.0, help = "Unit price")]
        price: f64,
    },

    /// Edit an existing item (only the given fields change)
    Edit {
        /// Item barcode or numeric id
        ident: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long, help = "New barcode; pass an empty string to clear it")]
        barcode: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        stock: Option<i64>,

        #[arg(long = "min-stock")]
        min_stock: Option<i64>,

        #[arg(long)]
        price: Option<f64>,
    },

    /// Disable an item (kept for sale history, no longer sellable)
    Disable {
        /// Item barcode or numeric id
        ident: String,
    },

    /// Re-enable a disabled item
    Enable {
        /// Item barcode or numeric id
        ident: String,
    },

    /// List catalog items
    List {
        #[arg(long, help = "Only items at or below their alert threshold")]
        low: bool,

        #[arg(long, help = "Include disabled items")]
        all: bool,
    },
}
