use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use crate::domain::cable::{CableLengthMode, CableType};
use crate::domain::line_items::CostCategory;
use crate::domain::project::LaborMode;
use crate::domain::vendor::ItemCategory;
use crate::services::chart::ChartKind;
use crate::services::labor_cost::LaborPreset;

#[derive(Parser)]
#[command(author, version, about)]
pub struct CliArgs {
    /// Directory holding the project store
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,
    /// Configuration YAML file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the full calculation and print the project summary
    Calculate,
    /// Set one project input, e.g. `set num_cables 24`
    Set {
        /// Input field name (snake_case or camelCase)
        field: String,
        /// Raw value; unparseable text falls back to the field default
        value: String,
    },
    /// Edit the project header
    Header {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        number: Option<String>,
        #[arg(long)]
        customer: Option<String>,
        #[arg(long)]
        date: Option<String>,
    },
    /// Switch the labor or cable length mode
    Mode {
        #[arg(long, value_enum)]
        labor: Option<LaborModeArg>,
        #[arg(long, value_enum)]
        cable: Option<CableModeArg>,
    },
    /// Apply a labor rate preset
    LaborPreset {
        #[arg(value_enum)]
        preset: PresetArg,
    },
    /// Edit itemized cable rows
    Cable {
        #[command(subcommand)]
        action: CableAction,
    },
    /// Edit cost line items
    Item {
        #[command(subcommand)]
        action: ItemAction,
    },
    /// Edit staff assignments
    Staff {
        #[command(subcommand)]
        action: StaffAction,
    },
    /// Manage the three vendor slots and their order items
    Vendor {
        #[command(subcommand)]
        action: VendorAction,
    },
    /// Manage vendor quotes
    Quote {
        #[command(subcommand)]
        action: QuoteAction,
    },
    /// Compare required connector and cable quantities with active orders
    Reconcile,
    /// Write exports: workbook, reconciliation files, charts
    Export {
        #[command(subcommand)]
        action: ExportAction,
    },
    /// Save, open and exchange whole projects
    Project {
        #[command(subcommand)]
        action: ProjectAction,
    },
    /// Keep the cable constants as personal defaults
    Defaults {
        #[command(subcommand)]
        action: DefaultsAction,
    },
    /// Show the project event log
    History,
    /// Discard the working project and start over on defaults
    Reset,
    /// Turn periodic auto-save on or off
    AutoSave {
        #[arg(value_enum)]
        state: Switch,
    },
    /// Auto-save the working project periodically until Ctrl-C
    Watch {
        /// Seconds between snapshots; defaults to the configured interval
        #[arg(short, long)]
        interval: Option<u64>,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum CableAction {
    /// Append a cable row
    Add {
        /// 1855, 1505, 1694, cat6 or other
        #[arg(short = 't', long = "type")]
        cable_type: Option<CableType>,
        #[arg(short, long)]
        qty: String,
        #[arg(short, long)]
        length: String,
    },
    /// Remove the row at a 1-based position
    Remove { index: usize },
    /// List cable rows
    List,
}

#[derive(Subcommand)]
pub enum ItemAction {
    /// Append a cost line item
    Add {
        #[arg(value_enum)]
        category: CategoryArg,
        description: String,
        #[arg(short, long, default_value = "1")]
        qty: String,
        #[arg(short, long)]
        cost: String,
    },
    /// Remove the item at a 1-based position
    Remove {
        #[arg(value_enum)]
        category: CategoryArg,
        index: usize,
    },
}

#[derive(Subcommand)]
pub enum StaffAction {
    /// Append a staff assignment
    Add {
        description: String,
        #[arg(long)]
        hours: String,
        #[arg(short, long, default_value = "")]
        notes: String,
    },
    /// Remove the assignment at a 1-based position
    Remove { index: usize },
}

#[derive(Subcommand)]
pub enum VendorAction {
    /// List vendor slots, items and totals
    List,
    /// Rename a vendor slot
    Name { slot: usize, name: String },
    /// Flip whether a slot counts towards active orders
    Toggle { slot: usize },
    /// Make a slot the current one for new items
    Select { slot: usize },
    /// Add an order item to a slot (default: the current slot)
    AddItem {
        description: String,
        #[arg(short, long, default_value = "1")]
        qty: String,
        #[arg(short, long)]
        cost: String,
        #[arg(short, long)]
        slot: Option<usize>,
        /// connector, cable:<type> or other
        #[arg(long, value_parser = parse_item_category)]
        category: Option<ItemCategory>,
    },
    /// Change the fields given on an existing order item
    UpdateItem {
        slot: usize,
        id: u64,
        #[arg(long)]
        description: Option<String>,
        #[arg(short, long)]
        qty: Option<String>,
        #[arg(short, long)]
        cost: Option<String>,
        #[arg(long, value_parser = parse_item_category)]
        category: Option<ItemCategory>,
    },
    /// Remove an order item by id
    RemoveItem { slot: usize, id: u64 },
    /// Set a category on every item that has none, from its description
    Classify,
    /// Clear every vendor slot and quote
    Reset,
}

#[derive(Subcommand)]
pub enum QuoteAction {
    /// Record a quote
    Add {
        #[arg(long)]
        vendor: String,
        #[arg(long)]
        item: String,
        #[arg(long, default_value = "")]
        part_number: String,
        #[arg(long, default_value = "")]
        quote_number: String,
        #[arg(short, long)]
        amount: String,
    },
    /// Remove a quote by id
    Remove { id: u64 },
    /// Mark a quote approved
    Approve { id: u64 },
    /// Mark a quote pending
    Pending { id: u64 },
}

#[derive(Subcommand)]
pub enum ExportAction {
    /// Write the Summary and Breakdown sheets as CSV files
    Workbook {
        /// Output directory
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
    },
    /// Write all stored reconciliation runs as CSV
    ReconciliationHistory {
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Write the latest reconciliation report as CSV
    Reconciliation {
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Render the time breakdown or cost analysis as a PNG chart
    Chart {
        #[arg(value_enum)]
        kind: ChartArg,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum ProjectAction {
    /// Save the working project under a name
    Save { name: String },
    /// Replace the working project with a saved one
    Open { name: String },
    /// List saved projects
    List,
    /// Merge a project JSON file into the working project
    Load {
        #[arg(short, long)]
        input: PathBuf,
    },
    /// Write the working project as JSON
    Write {
        #[arg(short, long)]
        output: PathBuf,
    },
}

#[derive(Subcommand)]
pub enum DefaultsAction {
    /// Store the current cable constants as defaults
    Save,
    /// Apply the stored defaults to the working project
    Load,
    /// Forget the stored defaults and restore factory values
    Clear,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LaborModeArg {
    Single,
    Dual,
}

impl From<LaborModeArg> for LaborMode {
    fn from(value: LaborModeArg) -> Self {
        match value {
            LaborModeArg::Single => LaborMode::Single,
            LaborModeArg::Dual => LaborMode::Dual,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum CableModeArg {
    Average,
    Itemized,
}

impl From<CableModeArg> for CableLengthMode {
    fn from(value: CableModeArg) -> Self {
        match value {
            CableModeArg::Average => CableLengthMode::Average,
            CableModeArg::Itemized => CableLengthMode::Itemized,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum PresetArg {
    RateA,
    RateB,
    Zeroed,
}

impl From<PresetArg> for LaborPreset {
    fn from(value: PresetArg) -> Self {
        match value {
            PresetArg::RateA => LaborPreset::RateA,
            PresetArg::RateB => LaborPreset::RateB,
            PresetArg::Zeroed => LaborPreset::Zeroed,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum CategoryArg {
    Supplies,
    Materials,
    Equipment,
    Shipping,
    Admin,
}

impl From<CategoryArg> for CostCategory {
    fn from(value: CategoryArg) -> Self {
        match value {
            CategoryArg::Supplies => CostCategory::Supplies,
            CategoryArg::Materials => CostCategory::Materials,
            CategoryArg::Equipment => CostCategory::Equipment,
            CategoryArg::Shipping => CostCategory::Shipping,
            CategoryArg::Admin => CostCategory::Admin,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ChartArg {
    Time,
    Cost,
}

impl From<ChartArg> for ChartKind {
    fn from(value: ChartArg) -> Self {
        match value {
            ChartArg::Time => ChartKind::Time,
            ChartArg::Cost => ChartKind::Cost,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, ValueEnum)]
pub enum Switch {
    On,
    Off,
}

fn parse_item_category(value: &str) -> Result<ItemCategory, String> {
    let expected = "expected connector, cable:<type> or other";
    ItemCategory::from_code(value)
        .ok_or_else(|| format!("unknown item category {value}, {expected}"))
}

impl Commands {
    /// What the command was doing, for failure messages.
    pub fn action(&self) -> &'static str {
        match self {
            Commands::Calculate => "calculate project",
            Commands::Set { .. } => "set input",
            Commands::Header { .. } => "update project header",
            Commands::Mode { .. } => "switch mode",
            Commands::LaborPreset { .. } => "apply labor preset",
            Commands::Cable { .. } => "edit cable line items",
            Commands::Item { .. } => "edit cost line items",
            Commands::Staff { .. } => "edit staff assignments",
            Commands::Vendor { .. } => "update vendors",
            Commands::Quote { .. } => "update quotes",
            Commands::Reconcile => "reconcile quantities",
            Commands::Export { .. } => "export",
            Commands::Project { .. } => "manage projects",
            Commands::Defaults { .. } => "manage default settings",
            Commands::History => "read project history",
            Commands::Reset => "reset project",
            Commands::AutoSave { .. } => "change auto-save",
            Commands::Watch { .. } => "watch project",
            Commands::Completions { .. } => "generate completions",
        }
    }
}
