//! Command-line argument definitions using clap

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::pipeline::{PartitionMode, DEFAULT_DIRECTORY_URL, DEFAULT_P_THRESHOLD};

/// Misty - Test whether a column's missing values depend on the rest of the dataset
#[derive(Parser, Debug)]
#[command(name = "misty")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Input file path (CSV, gzipped CSV, or Parquet)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Target column whose missingness (or boolean value) is tested
    #[arg(short, long, default_value = "price")]
    pub target: String,

    /// Numeric column to group by categorical columns in the ANOVA step.
    /// Defaults to the target partition itself (0/1).
    #[arg(long)]
    pub outcome: Option<String>,

    /// Numeric columns to leave out of the t-tests (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub exclude_numerical: Vec<String>,

    /// Partition by the target's boolean value instead of its missingness.
    /// The target must be a boolean column without nulls.
    #[arg(long, default_value = "false")]
    pub for_value: bool,

    /// Significance level - features with p-values below it count as associated
    #[arg(long, default_value_t = DEFAULT_P_THRESHOLD, value_parser = validate_p_threshold)]
    pub p_threshold: f64,

    /// Run only the chi-square / t-test missingness check and print its table
    #[arg(long, default_value = "false")]
    pub standalone: bool,

    /// Write the results to a JSON file
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Number of rows to use for schema inference (CSV only).
    /// Use 0 for full table scan (very slow for large files).
    #[arg(long, default_value = "10000")]
    pub infer_schema_length: usize,

    /// Increase diagnostic output on stderr (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Download a city's listings from the Inside Airbnb data page
    Fetch {
        /// City to look up, e.g. "paris" or "new york city"
        #[arg(short, long, default_value = "Paris")]
        city: String,

        /// Directory page listing the datasets
        #[arg(long, default_value = DEFAULT_DIRECTORY_URL)]
        url: String,

        /// Where to save the listings (CSV or Parquet).
        /// Defaults to listings_<city>.csv in the current directory.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the parsed directory page instead of downloading
        #[arg(long, default_value = "false")]
        print_html: bool,

        /// Number of rows to use for schema inference
        #[arg(long, default_value = "10000")]
        infer_schema_length: usize,
    },

    /// Descriptive statistics and IQR outlier flags for numerical columns
    Describe {
        /// Input file path (CSV, gzipped CSV, or Parquet)
        #[arg(short, long)]
        input: PathBuf,

        /// Columns to describe (comma-separated). Defaults to every numeric column.
        #[arg(long, value_delimiter = ',')]
        columns: Vec<String>,

        /// Number of rows to use for schema inference
        #[arg(long, default_value = "10000")]
        infer_schema_length: usize,
    },

    /// Terminal charts: dtype distribution, skewness, or category counts
    Plot {
        /// Chart to draw
        #[arg(value_enum)]
        kind: PlotKind,

        /// Input file path (CSV, gzipped CSV, or Parquet)
        #[arg(short, long)]
        input: PathBuf,

        /// Column for the counts chart
        #[arg(long, required_if_eq("kind", "counts"))]
        column: Option<String>,

        /// Number of most frequent categories to show (0 shows all)
        #[arg(long, default_value = "15")]
        top: usize,

        /// Number of rows to use for schema inference
        #[arg(long, default_value = "10000")]
        infer_schema_length: usize,
    },
}

/// Charts available to `misty plot`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PlotKind {
    /// Share of columns per data type
    Dtypes,
    /// Skewness of every numerical column
    Skewness,
    /// Value counts of one categorical column
    Counts,
}

impl Cli {
    pub fn input(&self) -> Option<&PathBuf> {
        self.input.as_ref()
    }

    pub fn partition_mode(&self) -> PartitionMode {
        if self.for_value {
            PartitionMode::Value
        } else {
            PartitionMode::Missing
        }
    }
}

/// Default output path for a fetched city: `listings_<city>.csv`
pub fn default_fetch_output(city: &str) -> PathBuf {
    let slug: String = city
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect();
    PathBuf::from(format!("listings_{}.csv", slug))
}

/// Validator for p_threshold parameter
fn validate_p_threshold(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;

    if value > 0.0 && value < 1.0 {
        Ok(value)
    } else {
        Err(format!(
            "p_threshold must be strictly between 0.0 and 1.0, got {}",
            value
        ))
    }
}
