use clap::{Parser, Subcommand, ValueEnum};

use crate::export::ExportFormat;

/// Command-line interface definition for rJobCost
/// CLI application to roll up job hours and costs with SQLite
#[derive(Parser)]
#[command(
    name = "rjobcost",
    version = env!("CARGO_PKG_VERSION"),
    about = "A job costing CLI: record crew hours and cost rows, then roll them up into summaries, cost breakdowns and proposals",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    /// Act as this user id (overrides `user_id` in the config)
    #[arg(global = true, long = "user")]
    pub user: Option<i64>,

    /// Act with this role: office or crew (overrides `role` in the config)
    #[arg(global = true, long = "role")]
    pub role: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Grouping used by `summary --by`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum GroupBy {
    Date,
    Component,
    User,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        /// Print the current configuration file to stdout
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        /// Edit the configuration file with your preferred editor
        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        /// Specify the editor to use (overrides $EDITOR/$VISUAL).
        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage the database schema
    Db {
        /// Apply pending schema migrations
        #[arg(long = "migrate")]
        migrate: bool,

        /// Run SQLite integrity check
        #[arg(long = "check")]
        check: bool,

        /// Show file size, record counts and schema version
        #[arg(long = "info")]
        info: bool,
    },

    /// Print or manage the internal log table
    Log {
        /// Print rows from the internal `log` table
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Manage jobs
    Job {
        #[command(subcommand)]
        action: JobAction,
    },

    /// Manage the components (tasks) of a job
    Component {
        #[command(subcommand)]
        action: ComponentAction,
    },

    /// Manage users
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Record, edit and list time entries
    Entry {
        #[command(subcommand)]
        action: EntryAction,
    },

    /// Manage financial rows of a job
    Row {
        #[command(subcommand)]
        action: RowAction,
    },

    /// Labor pricing of a job
    Labor {
        #[command(subcommand)]
        action: LaborAction,
    },

    /// Material workbooks, sheets and items
    Material {
        #[command(subcommand)]
        action: MaterialAction,
    },

    /// Hours of a job grouped by date, component or user
    Summary {
        job: i64,

        /// Show a single grouping (default: all three)
        #[arg(long = "by", value_enum)]
        by: Option<GroupBy>,
    },

    /// Internal cost breakdown of a job
    Costs { job: i64 },

    /// Client-facing proposal of a job
    Proposal {
        job: i64,

        /// Job-wide markup percent (default: `default_markup_percent` from the config)
        #[arg(long = "markup")]
        markup: Option<f64>,
    },

    /// Clocked man-hours against the job estimate
    Progress { job: i64 },

    /// Export a job report
    Export {
        job: i64,

        /// Export format: csv (proposal lines) or json (full report)
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        /// Output file path (absolute path required)
        #[arg(long, value_name = "FILE")]
        file: String,

        /// Job-wide markup percent used for the proposal
        #[arg(long = "markup")]
        markup: Option<f64>,

        /// Overwrite output file without confirmation
        #[arg(long, short = 'f')]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum JobAction {
    /// Create a job
    Add {
        name: String,
        /// Estimated man-hours
        #[arg(long = "estimate")]
        estimate: Option<f64>,
    },
    /// Set or clear (omit HOURS) the estimated man-hours
    Estimate { job: i64, hours: Option<f64> },
    /// List jobs
    List,
}

#[derive(Subcommand)]
pub enum ComponentAction {
    /// Add a component to a job
    Add {
        job: i64,
        name: String,
        /// Mark the component as a task
        #[arg(long = "task")]
        task: bool,
    },
    /// List the components of a job
    List { job: i64 },
    /// Re-activate a component
    Activate { id: i64 },
    /// Deactivate a component
    Deactivate { id: i64 },
}

#[derive(Subcommand)]
pub enum UserAction {
    /// Add a user
    Add { name: String },
    /// List users
    List,
}

#[derive(Subcommand)]
pub enum EntryAction {
    /// Record a time entry for the acting user
    Add {
        job: i64,

        /// Component worked on (omit for a clock-in entry)
        #[arg(long = "component")]
        component: Option<i64>,

        /// Start (YYYY-MM-DD HH:MM, local time)
        #[arg(long = "start")]
        start: String,

        /// End (YYYY-MM-DD HH:MM, local time)
        #[arg(long = "end")]
        end: Option<String>,

        /// Hours typed by hand; overrides the start/end duration
        #[arg(long = "hours")]
        hours: Option<f64>,

        /// Crew size
        #[arg(long = "crew", conflicts_with = "workers")]
        crew: Option<i32>,

        /// Named worker (repeatable); the crew size is the number of names
        #[arg(long = "worker")]
        workers: Vec<String>,

        #[arg(long = "notes")]
        notes: Option<String>,
    },
    /// Edit a time entry
    Edit {
        id: i64,
        #[arg(long = "start")]
        start: Option<String>,
        #[arg(long = "end")]
        end: Option<String>,
        #[arg(long = "hours")]
        hours: Option<f64>,
        #[arg(long = "crew", conflicts_with = "workers")]
        crew: Option<i32>,
        #[arg(long = "worker")]
        workers: Vec<String>,
        #[arg(long = "notes")]
        notes: Option<String>,
    },
    /// List the time entries of a job
    List {
        job: i64,
        /// Only entries of the acting user
        #[arg(long = "mine")]
        mine: bool,
    },
}

#[derive(Subcommand)]
pub enum RowAction {
    /// Add a financial row
    Add {
        job: i64,
        /// labor, subcontractor, materials, equipment or other
        category: String,
        description: String,
        #[arg(long = "qty")]
        quantity: Option<f64>,
        #[arg(long = "unit-cost")]
        unit_cost: Option<f64>,
        /// Row markup percent (default 0)
        #[arg(long = "markup")]
        markup: Option<f64>,
        /// Insert right after the row with this number in `row list` (1-based)
        #[arg(long = "after")]
        after: Option<usize>,
        #[arg(long = "notes")]
        notes: Option<String>,
    },
    /// Edit a financial row
    Edit {
        id: i64,
        #[arg(long = "category")]
        category: Option<String>,
        #[arg(long = "description")]
        description: Option<String>,
        #[arg(long = "qty")]
        quantity: Option<f64>,
        #[arg(long = "unit-cost")]
        unit_cost: Option<f64>,
        #[arg(long = "markup")]
        markup: Option<f64>,
        #[arg(long = "notes")]
        notes: Option<String>,
    },
    /// Delete a financial row
    Del { id: i64 },
    /// List the financial rows of a job in display order
    List { job: i64 },
}

#[derive(Subcommand)]
pub enum LaborAction {
    /// Set the hourly rate used to price clocked labor
    Set { job: i64, rate: Option<f64> },
}

#[derive(Subcommand)]
pub enum MaterialAction {
    /// Create a new active workbook for a job
    Workbook { job: i64, name: String },
    /// Archive a workbook
    Archive { workbook: i64 },
    /// Add a sheet to a workbook
    Sheet { workbook: i64, name: String },
    /// Add an item to a sheet
    Item {
        sheet: i64,
        description: String,
        #[arg(long = "category", default_value = "")]
        category: String,
        #[arg(long = "qty")]
        quantity: f64,
        #[arg(long = "cost")]
        cost: f64,
        #[arg(long = "price")]
        price: f64,
    },
}
