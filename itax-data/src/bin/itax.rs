use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use itax_core::calculations::{
    AssetCategory, CapitalGainsInput, TdsEntry, calc_advance_tax, calc_capital_gains,
    calc_emi_schedule, calc_hra, calc_tds_reconciliation, compute_tax, generate_suggestions,
};
use itax_core::db::{StoreConfig, StoreRegistry};
use itax_core::{FiscalYear, ProfileStore, TaxProfile};
use itax_data::logging::init_logging;
use itax_data::report;
use itax_data::{ProfileLoader, parse_form16_text_for_year};
use itax_db_sqlite::SqliteStoreFactory;
use rust_decimal::Decimal;
use tracing::{info, warn};

/// Indian income-tax estimator: old vs new regime, capital gains, EMI,
/// advance tax, TDS and HRA.
#[derive(Parser, Debug)]
#[command(name = "itax")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    store: StoreArgs,

    /// Log filter, e.g. `debug` or `itax_core=trace` (overrides RUST_LOG)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Also append log records to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct StoreArgs {
    /// Profile store backend
    #[arg(long, global = true, default_value = "sqlite")]
    backend: String,

    /// Profile store location (file path or `:memory:`)
    #[arg(long, global = true, default_value = "itax-profiles.db")]
    db: String,
}

impl StoreArgs {
    async fn open(&self) -> Result<Box<dyn ProfileStore>> {
        let mut registry = StoreRegistry::new();
        registry.register(Box::new(SqliteStoreFactory));

        let config = StoreConfig {
            backend: self.backend.clone(),
            connection_string: self.db.clone(),
        };
        registry
            .create(&config)
            .await
            .with_context(|| format!("Failed to open {} store at {}", self.backend, self.db))
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compare both regimes for a profile and list suggestions
    Compute {
        /// Profile file (.csv or .toml); defaults to the last computed profile
        #[arg(short, long)]
        profile: Option<PathBuf>,

        /// Save the profile under this name
        #[arg(short, long)]
        save: Option<String>,
    },

    /// Capital gains on the sale of one asset
    CapitalGains {
        /// listed-equity, equity-mf, debt-mf, property or gold
        #[arg(long)]
        asset: String,

        /// Purchase date (YYYY-MM-DD)
        #[arg(long)]
        bought: NaiveDate,

        /// Sale date (YYYY-MM-DD)
        #[arg(long)]
        sold: NaiveDate,

        #[arg(long)]
        cost: Decimal,

        #[arg(long)]
        price: Decimal,

        /// Fair market value on 31 Jan 2018, for grandfathered equity
        #[arg(long)]
        fmv_2018: Option<Decimal>,

        /// The shares are not listed on a recognised exchange
        #[arg(long, default_value_t = false)]
        unlisted: bool,
    },

    /// Home-loan EMI and yearly amortization
    Emi {
        #[arg(long)]
        principal: Decimal,

        /// Annual interest rate in percent, e.g. 8.5
        #[arg(long)]
        rate: Decimal,

        #[arg(long)]
        years: u32,
    },

    /// Advance-tax installments
    AdvanceTax {
        /// Total tax for the year; computed from --profile when omitted
        #[arg(long, required_unless_present = "profile")]
        tax: Option<Decimal>,

        #[arg(short, long)]
        profile: Option<PathBuf>,

        #[arg(long, default_value = "0")]
        tds: Decimal,
    },

    /// Reconcile TDS deducted against the year's tax
    Tds {
        #[arg(long)]
        tax: Decimal,

        /// One deduction as SOURCE:SECTION:AMOUNT; repeatable
        #[arg(long = "entry", value_parser = parse_tds_entry)]
        entries: Vec<TdsEntry>,
    },

    /// HRA exemption breakdown
    Hra {
        #[arg(long)]
        basic: Decimal,

        #[arg(long)]
        hra: Decimal,

        #[arg(long)]
        rent: Decimal,

        #[arg(long, default_value_t = false)]
        non_metro: bool,
    },

    /// Extract a profile from Form 16 text and compute it
    Form16 {
        /// Text file holding the pasted Form 16
        file: PathBuf,

        #[arg(long, default_value = "2024-25", value_parser = parse_fiscal_year)]
        fiscal_year: FiscalYear,

        /// Save the extracted profile under this name
        #[arg(short, long)]
        save: Option<String>,
    },

    /// Manage saved profiles
    Profiles {
        #[command(subcommand)]
        action: ProfilesAction,
    },
}

#[derive(Subcommand, Debug)]
enum ProfilesAction {
    List,
    Show { name: String },
    Delete { name: String },
}

fn parse_fiscal_year(s: &str) -> Result<FiscalYear, String> {
    FiscalYear::parse(s).ok_or_else(|| {
        let known: Vec<_> = FiscalYear::ALL.iter().map(|fy| fy.as_str()).collect();
        format!("unknown fiscal year '{s}'; expected one of {known:?}")
    })
}

fn parse_tds_entry(s: &str) -> Result<TdsEntry, String> {
    let parts: Vec<&str> = s.rsplitn(3, ':').collect();
    let [amount, section, source] = parts.as_slice() else {
        return Err(format!("expected SOURCE:SECTION:AMOUNT, got '{s}'"));
    };
    let amount = amount
        .trim()
        .replace(',', "")
        .parse::<Decimal>()
        .map_err(|e| format!("invalid amount '{amount}': {e}"))?;

    Ok(TdsEntry {
        source: source.trim().to_string(),
        section: section.trim().to_string(),
        amount,
    })
}

fn load_profiles(path: &Path) -> Result<Vec<TaxProfile>> {
    let profiles = ProfileLoader::load_path(path)
        .with_context(|| format!("Failed to load profile: {}", path.display()))?;
    if profiles.is_empty() {
        bail!("No profiles found in {}", path.display());
    }
    Ok(profiles.into_iter().map(TaxProfile::normalized).collect())
}

fn print_computation(profile: &TaxProfile) {
    let result = compute_tax(profile);
    let suggestions = generate_suggestions(profile, &result);
    println!("{}", report::render_comparison(&result));
    print!("{}", report::render_suggestions(&suggestions));
}

async fn compute(
    store: &StoreArgs,
    profile: Option<PathBuf>,
    save: Option<String>,
) -> Result<()> {
    let store = store.open().await?;

    let profiles = match profile {
        Some(path) => load_profiles(&path)?,
        None => match store.load_last_used().await? {
            Some(profile) => {
                info!("using last computed profile");
                vec![profile]
            }
            None => bail!("No --profile given and no previously computed profile"),
        },
    };

    if save.is_some() && profiles.len() > 1 {
        bail!("--save needs a file with a single profile; found {}", profiles.len());
    }

    for (i, profile) in profiles.iter().enumerate() {
        if profiles.len() > 1 {
            println!("== Profile {} ==", i + 1);
        }
        print_computation(profile);
    }

    if let Some(last) = profiles.last() {
        if let Err(e) = store.save_last_used(last).await {
            warn!(error = %e, "could not remember last profile");
        }
    }
    if let (Some(name), Some(profile)) = (save, profiles.first()) {
        let snapshot = store
            .save(&name, profile)
            .await
            .with_context(|| format!("Failed to save profile '{name}'"))?;
        println!("Saved profile '{}' (id {})", snapshot.name, snapshot.id);
    }
    Ok(())
}

async fn profiles(
    store: &StoreArgs,
    action: ProfilesAction,
) -> Result<()> {
    let store = store.open().await?;

    match action {
        ProfilesAction::List => {
            let snapshots = store.list().await.context("Failed to list profiles")?;
            print!("{}", report::render_profiles(&snapshots));
        }
        ProfilesAction::Show { name } => {
            let snapshot = store
                .get_by_name(&name)
                .await
                .with_context(|| format!("Failed to load profile '{name}'"))?;
            let toml = toml::to_string_pretty(&snapshot.profile)
                .context("Failed to render profile")?;
            println!("# {} (saved {})", snapshot.name, snapshot.saved_at);
            println!("{toml}");
            print_computation(&snapshot.profile);
        }
        ProfilesAction::Delete { name } => {
            let snapshot = store
                .get_by_name(&name)
                .await
                .with_context(|| format!("Failed to find profile '{name}'"))?;
            store
                .delete(snapshot.id)
                .await
                .with_context(|| format!("Failed to delete profile '{name}'"))?;
            println!("Deleted profile '{name}'");
        }
    }
    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Compute { profile, save } => compute(&cli.store, profile, save).await?,

        Command::CapitalGains {
            asset,
            bought,
            sold,
            cost,
            price,
            fmv_2018,
            unlisted,
        } => {
            let Some(asset) = AssetCategory::parse(&asset) else {
                bail!(
                    "unknown asset '{asset}'; expected listed-equity, equity-mf, debt-mf, property or gold"
                );
            };
            if sold < bought {
                bail!("sale date {sold} is before purchase date {bought}");
            }
            let input = CapitalGainsInput {
                listed: !unlisted,
                fmv_2018,
                ..CapitalGainsInput::new(asset, bought, sold, cost, price)
            };
            print!("{}", report::render_capital_gains(&calc_capital_gains(&input)));
        }

        Command::Emi {
            principal,
            rate,
            years,
        } => print!("{}", report::render_emi(&calc_emi_schedule(principal, rate, years))),

        Command::AdvanceTax { tax, profile, tds } => {
            let total = match (tax, profile) {
                (Some(tax), _) => tax,
                (None, Some(path)) => {
                    let profiles = load_profiles(&path)?;
                    compute_tax(&profiles[0]).recommended_tax()
                }
                (None, None) => bail!("either --tax or --profile is required"),
            };
            print!("{}", report::render_advance_tax(&calc_advance_tax(total, tds)));
        }

        Command::Tds { tax, entries } => {
            print!("{}", report::render_tds(&calc_tds_reconciliation(&entries, tax)));
        }

        Command::Hra {
            basic,
            hra,
            rent,
            non_metro,
        } => print!("{}", report::render_hra(&calc_hra(basic, hra, rent, !non_metro))),

        Command::Form16 {
            file,
            fiscal_year,
            save,
        } => {
            let text = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read: {}", file.display()))?;
            let profile = parse_form16_text_for_year(&text, fiscal_year);
            println!(
                "{}",
                toml::to_string_pretty(&profile).context("Failed to render profile")?
            );
            print_computation(&profile);

            if let Some(name) = save {
                let store = cli.store.open().await?;
                let snapshot = store
                    .save(&name, &profile)
                    .await
                    .with_context(|| format!("Failed to save profile '{name}'"))?;
                println!("Saved profile '{}' (id {})", snapshot.name, snapshot.id);
            }
        }

        Command::Profiles { action } => profiles(&cli.store, action).await?,
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref(), cli.log_file.as_deref())?;
    run(cli).await
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn tds_entry_splits_on_last_two_colons() {
        let entry = parse_tds_entry("Acme: Pvt Ltd:192:1,20,000").unwrap();

        assert_eq!(entry.source, "Acme: Pvt Ltd");
        assert_eq!(entry.section, "192");
        assert_eq!(entry.amount, dec!(120000));
    }

    #[test]
    fn tds_entry_rejects_missing_parts() {
        assert!(parse_tds_entry("Bank:5000").is_err());
        assert!(parse_tds_entry("Bank:194A:lots").is_err());
    }

    #[test]
    fn fiscal_year_flag_is_validated() {
        assert_eq!(parse_fiscal_year("2025-26"), Ok(FiscalYear::Fy2025_26));
        assert!(parse_fiscal_year("2030-31").is_err());
    }

    #[test]
    fn store_flags_are_global() {
        let cli = Cli::try_parse_from(["itax", "profiles", "list", "--db", ":memory:"]).unwrap();

        assert_eq!(cli.store.db, ":memory:");
        assert_eq!(cli.store.backend, "sqlite");
    }
}
