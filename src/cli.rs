use std::path::PathBuf;

use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use common::{PaymentMethod, TxnStatus, TxnType};
use state::{DateRange, ExportFormat, FilterChange};

pub mod commands;

use commands::{export, stats, transactions};

use crate::api::ApiClient;
use crate::config::Settings;

#[derive(Parser)]
#[command(name = "paydash")]
#[command(about = "Command line client for the payments analytics API")]
#[command(version)]
pub struct Cli {
    /// Configuration file
    ///
    /// Defaults to ./paydash.toml when present. PAYDASH_* environment
    /// variables override file values.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Base URL of the REST API (e.g., http://localhost:8080/api)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Rows per page for transaction listings
    #[arg(long, global = true)]
    pub page_size: Option<u32>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Optional date window, `YYYY-MM-DD` on both ends
#[derive(Args, Debug, Clone, Default)]
pub struct RangeArgs {
    /// First day of the range
    #[arg(long)]
    pub start: Option<NaiveDate>,

    /// Last day of the range
    #[arg(long)]
    pub end: Option<NaiveDate>,
}

impl RangeArgs {
    /// `None` when neither end was given. A missing end is taken from the
    /// default range ending `today`.
    pub fn resolve(&self, today: NaiveDate) -> Option<DateRange> {
        if self.start.is_none() && self.end.is_none() {
            return None;
        }
        Some(self.resolve_or_default(today))
    }

    pub fn resolve_or_default(&self, today: NaiveDate) -> DateRange {
        let default = DateRange::default_for(today);
        DateRange::new(
            self.start.unwrap_or(default.start),
            self.end.unwrap_or(default.end),
        )
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the KPI summary
    ///
    /// Without a range the all-time figures are shown; with --start/--end the
    /// filtered endpoint is used.
    Stats {
        #[command(flatten)]
        range: RangeArgs,
    },
    /// List one page of transactions
    Transactions {
        /// SUCCESS, FAILED or PENDING
        #[arg(long)]
        status: Option<TxnStatus>,

        /// UPI, CARD, NET_BANKING or WALLET
        #[arg(long)]
        payment_method: Option<PaymentMethod>,

        /// PAYIN, PAYOUT or REFUND
        #[arg(long = "type")]
        txn_type: Option<TxnType>,

        /// Substring of the customer email
        #[arg(long)]
        email: Option<String>,

        /// Only transactions created on or after this day
        #[arg(long)]
        start: Option<NaiveDate>,

        /// Only transactions created on or before this day
        #[arg(long)]
        end: Option<NaiveDate>,

        /// Page number, starting at 1. Clamped to the last page.
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },
    /// Export the analytics data set of a date range
    ///
    /// Runs the same four requests as the analytics page. The default range
    /// is the last seven days.
    Export {
        /// json or csv
        #[arg(short, long, default_value = "json")]
        format: ExportFormat,

        #[command(flatten)]
        range: RangeArgs,

        /// Output file; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

impl Commands {
    /// Filter edits in the order they are applied to the listing.
    fn filter_changes(&self) -> Vec<FilterChange> {
        match self {
            Commands::Transactions {
                status,
                payment_method,
                txn_type,
                email,
                start,
                end,
                ..
            } => vec![
                FilterChange::Status(*status),
                FilterChange::PaymentMethod(*payment_method),
                FilterChange::Type(*txn_type),
                FilterChange::UserEmail(email.clone().unwrap_or_default()),
                FilterChange::StartDate(*start),
                FilterChange::EndDate(*end),
            ],
            _ => Vec::new(),
        }
    }
}

impl Cli {
    pub async fn run(self, settings: Settings) -> Result<()> {
        let settings = settings.with_overrides(self.api_url.clone(), self.page_size);
        let client = ApiClient::from_settings(&settings)?;
        let today = Local::now().date_naive();

        match &self.command {
            Commands::Stats { range } => {
                stats(&client, range.resolve(today)).await?;
            }
            Commands::Transactions { page, .. } => {
                let changes = self.command.filter_changes();
                transactions(&client, settings.page_size, changes, page.saturating_sub(1)).await?;
            }
            Commands::Export {
                format,
                range,
                output,
            } => {
                export(&client, *format, range.resolve_or_default(today), output.as_deref()).await?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_transactions_command() {
        let cli = Cli::try_parse_from([
            "paydash",
            "--page-size",
            "20",
            "transactions",
            "--status",
            "failed",
            "--type",
            "REFUND",
            "--page",
            "3",
        ])
        .unwrap();

        assert_eq!(cli.page_size, Some(20));
        let Commands::Transactions { status, txn_type, page, .. } = &cli.command else {
            panic!("expected transactions command");
        };
        assert_eq!(*status, Some(TxnStatus::Failed));
        assert_eq!(*txn_type, Some(TxnType::Refund));
        assert_eq!(*page, 3);
    }

    #[test]
    fn test_unknown_enum_value_is_rejected() {
        assert!(Cli::try_parse_from(["paydash", "transactions", "--status", "LOST"]).is_err());
    }

    #[test]
    fn test_parse_export_command() {
        let cli = Cli::try_parse_from([
            "paydash", "export", "-f", "csv", "--start", "2024-05-01", "-o", "out.csv",
        ])
        .unwrap();
        let Commands::Export { format, range, output } = cli.command else {
            panic!("expected export command");
        };
        assert_eq!(format, ExportFormat::Csv);
        assert_eq!(range.start, Some(date(2024, 5, 1)));
        assert_eq!(output, Some(PathBuf::from("out.csv")));
    }

    #[test]
    fn test_range_resolution() {
        let today = date(2024, 5, 10);
        assert_eq!(RangeArgs::default().resolve(today), None);
        assert_eq!(
            RangeArgs::default().resolve_or_default(today),
            DateRange::new(date(2024, 5, 3), today)
        );

        let only_start = RangeArgs {
            start: Some(date(2024, 4, 1)),
            end: None,
        };
        assert_eq!(only_start.resolve(today), Some(DateRange::new(date(2024, 4, 1), today)));
    }
}
