use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "smokefree", version, author, about = "A terminal companion for quitting smoking")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// First-run setup wizard (smoking habit and quit plan)
    Setup {
        /// Enter a new habit and plan even if one exists
        #[arg(long)]
        reset: bool,
    },
    /// Create a local profile and log in
    Register {
        username: String,
    },
    /// Log in as an existing profile
    Login {
        username: String,
    },
    /// End the current session
    Logout,
    /// Show who is logged in
    Whoami,
    /// Smoking habit baseline
    Status {
        #[command(subcommand)]
        action: StatusCommands,
    },
    /// Quit plan management
    Plan {
        #[command(subcommand)]
        action: PlanCommands,
    },
    /// Quit plan stages
    Stage {
        #[command(subcommand)]
        action: StageCommands,
    },
    /// Record today's progress
    Record {
        /// Cigarettes smoked on the day
        cigarettes: u32,
        /// How you feel, free text
        #[arg(long)]
        health: Option<String>,
        /// Day to record (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,
    },
    /// Recorded progress history
    Progress {
        #[command(subcommand)]
        action: ProgressCommands,
    },
    /// Show days quit, savings, streak and plan progress
    Stats {
        /// Show the last 7 days
        #[arg(long)]
        week: bool,
    },
    /// Show earned badges
    Badges {
        /// Show every tier with earned marks
        #[arg(long)]
        all: bool,
        /// Only one ladder: days or money
        #[arg(long)]
        r#type: Option<String>,
    },
    /// Health improvements reached so far
    Health,
    /// Checklist of quit-plan and daily tasks
    Task {
        #[command(subcommand)]
        action: TaskCommands,
    },
    /// Export a summary to stdout
    Export {
        /// Machine-readable JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum StatusCommands {
    /// Record a new habit snapshot
    Set {
        /// Cigarettes per day
        #[arg(long)]
        cigarettes: u32,
        /// Cost of one pack
        #[arg(long)]
        cost: f64,
        /// Start date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        start: Option<String>,
    },
    /// Show the current habit and its history
    Show,
}

#[derive(Subcommand, Debug)]
pub enum PlanCommands {
    /// Create a new quit plan (becomes the active one)
    Create {
        #[arg(long)]
        name: String,
        /// Start date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        start: Option<String>,
        /// Target quit date (YYYY-MM-DD)
        #[arg(long)]
        target: String,
        #[arg(long)]
        reason: String,
    },
    /// Show the active plan (or another by id) and its stages
    Show {
        #[arg(long)]
        id: Option<i64>,
    },
    /// List every plan, newest first
    List,
    /// Change fields of the active plan
    Update {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        target: Option<String>,
        #[arg(long)]
        reason: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum StageCommands {
    /// Add a stage to the active plan
    Add {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        start: String,
        /// End date (YYYY-MM-DD)
        #[arg(long)]
        end: String,
    },
    /// List the active plan's stages
    List,
}

#[derive(Subcommand, Debug)]
pub enum ProgressCommands {
    /// List recorded days
    List {
        /// Only the most recent N days
        #[arg(long)]
        last: Option<usize>,
    },
    /// Change a recorded day
    Update {
        id: i64,
        #[arg(long)]
        cigarettes: Option<u32>,
        #[arg(long)]
        health: Option<String>,
    },
    /// Delete a recorded day
    Delete {
        id: i64,
    },
}

#[derive(Subcommand, Debug)]
pub enum TaskCommands {
    /// Add a task of your own
    Add {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<String>,
        /// low, medium or high
        #[arg(long, default_value = "medium")]
        priority: String,
        /// daily, habit, milestone or custom
        #[arg(long, default_value = "custom")]
        r#type: String,
        /// Points awarded on completion
        #[arg(long, default_value_t = 0)]
        points: u32,
    },
    /// List pending tasks
    List {
        /// Only tasks due today or later
        #[arg(long, conflicts_with = "overdue")]
        upcoming: bool,
        /// Only pending tasks past their due date
        #[arg(long)]
        overdue: bool,
        /// Include completed and skipped tasks
        #[arg(long, conflicts_with_all = ["upcoming", "overdue"])]
        all: bool,
        /// Maximum number of upcoming tasks
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
    /// Change a task
    Update {
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<String>,
        #[arg(long)]
        priority: Option<String>,
    },
    /// Mark a task completed
    Done {
        id: i64,
    },
    /// Mark a task skipped
    Skip {
        id: i64,
    },
    /// Delete a task
    Delete {
        id: i64,
    },
    /// Create the active plan's checklist and today's daily tasks
    Generate,
}
