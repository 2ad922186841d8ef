//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand, ValueEnum};

use homedash_types::{DisplayUnit, Mode, SwitchState};

/// Output format for commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Switch target for `fan` and `light`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OnOff {
    On,
    Off,
}

impl From<OnOff> for SwitchState {
    fn from(value: OnOff) -> Self {
        match value {
            OnOff::On => SwitchState::On,
            OnOff::Off => SwitchState::Off,
        }
    }
}

/// Mode target for `mode`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Auto,
    Manual,
}

impl From<ModeArg> for Mode {
    fn from(value: ModeArg) -> Self {
        match value {
            ModeArg::Auto => Mode::Auto,
            ModeArg::Manual => Mode::Manual,
        }
    }
}

/// Temperature unit flags
#[derive(Debug, Clone, Default, Args)]
pub struct UnitArgs {
    /// Show temperatures in Fahrenheit (overrides --celsius and config)
    #[arg(long, conflicts_with = "celsius")]
    pub fahrenheit: bool,

    /// Show temperatures in Celsius (overrides config)
    #[arg(long, conflicts_with = "fahrenheit")]
    pub celsius: bool,
}

impl UnitArgs {
    /// Resolve the display unit: explicit flags override config
    pub fn resolve(&self, config_unit: DisplayUnit) -> DisplayUnit {
        if self.fahrenheit {
            DisplayUnit::Fahrenheit
        } else if self.celsius {
            DisplayUnit::Celsius
        } else {
            config_unit
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "homedash")]
#[command(
    author,
    version,
    about = "Dashboard and client for a home-automation device",
    long_about = None
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Device base URL, e.g. http://192.168.0.114:5000
    #[arg(long, global = true, env = "HOMEDASH_URL")]
    pub url: Option<String>,

    /// Command to run (defaults to the interactive dashboard)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Open the interactive terminal dashboard
    Dashboard {
        #[command(flatten)]
        units: UnitArgs,
    },

    /// Poll the device once and print its state
    Status {
        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,

        #[command(flatten)]
        units: UnitArgs,
    },

    /// Switch the fan
    Fan {
        #[arg(value_enum)]
        state: OnOff,
    },

    /// Switch the light
    Light {
        #[arg(value_enum)]
        state: OnOff,
    },

    /// Change the operating mode
    Mode {
        #[arg(value_enum)]
        mode: ModeArg,
    },

    /// Save the automation threshold
    Threshold {
        /// Threshold value (Celsius unless --fahrenheit)
        #[arg(allow_negative_numbers = true)]
        value: String,

        /// The value is in Fahrenheit
        #[arg(long)]
        fahrenheit: bool,
    },

    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum ConfigAction {
    /// Print the configuration file path
    Path,

    /// Show the effective configuration
    Show,

    /// Write a configuration file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
