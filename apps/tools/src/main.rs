use std::{collections::BTreeMap, fs, path::PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use client_core::{ApiTransport, ListQuery, SessionContext, DEFAULT_BASE_URL};
use shared::domain::{format_idr, NoFilter, PackageSort};

#[derive(Parser, Debug)]
struct Cli {
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    api_url: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Lists one page of the public package catalog.
    ListPackages {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 10)]
        limit: u32,
        /// One of: az, za, cheap, expensive.
        #[arg(long, default_value = "az")]
        sort: String,
        #[arg(long, default_value = "")]
        search: String,
    },
    /// Looks up one order by its order code.
    CheckOrder { code: String },
    /// Downloads the order report CSV and prints a per-status summary.
    ExportOrders {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },
}

fn parse_package_sort(raw: &str) -> Result<PackageSort> {
    Ok(match raw {
        "az" => PackageSort::NameAsc,
        "za" => PackageSort::NameDesc,
        "cheap" => PackageSort::Cheapest,
        "expensive" => PackageSort::MostExpensive,
        other => bail!("unknown sort {other:?}; expected az, za, cheap, or expensive"),
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let transport = ApiTransport::new(&cli.api_url, SessionContext::new());

    match cli.command {
        Command::ListPackages {
            page,
            limit,
            sort,
            search,
        } => {
            let query = ListQuery::<PackageSort, NoFilter> {
                page,
                limit,
                sort: parse_package_sort(&sort)?,
                search,
                status: None,
            };
            let envelope = transport.public_packages().fetch(&query).await?;
            for package in &envelope.data {
                println!(
                    "{}\t{}\t{}",
                    package.id,
                    package.name,
                    format_idr(package.price)
                );
            }
            println!(
                "page {} of {} ({} total)",
                envelope.meta.page, envelope.meta.page_count, envelope.meta.total
            );
        }
        Command::CheckOrder { code } => match transport.check_order_by_code(&code).await? {
            Some(view) => {
                println!("{}\t{}", view.order_code, view.package_name);
                println!("atas nama: {} <{}>", view.customer_name, view.customer_email);
                println!("total: {}", format_idr(view.total_price));
                println!(
                    "status: {} ({}%)",
                    view.progress.label_id(),
                    view.progress.step_percent()
                );
            }
            None => {
                println!("pesanan {code} tidak ditemukan");
            }
        },
        Command::ExportOrders {
            email,
            password,
            out_dir,
        } => {
            transport.login(&email, &password).await?;
            let download = transport.export_orders_csv().await?;
            let path = out_dir.join(&download.filename);
            fs::write(&path, &download.bytes)
                .with_context(|| format!("failed to write {}", path.display()))?;

            let mut reader = csv::Reader::from_reader(download.bytes.as_slice());
            let status_column = reader
                .headers()
                .context("report has no header row")?
                .iter()
                .position(|header| header.eq_ignore_ascii_case("status"));
            let mut rows = 0usize;
            let mut by_status: BTreeMap<String, usize> = BTreeMap::new();
            for record in reader.records() {
                let record = record.context("malformed report row")?;
                rows += 1;
                if let Some(index) = status_column {
                    if let Some(status) = record.get(index) {
                        *by_status.entry(status.to_string()).or_default() += 1;
                    }
                }
            }
            println!("saved {} ({rows} rows)", path.display());
            for (status, count) in by_status {
                println!("  {status}: {count}");
            }
        }
    }

    Ok(())
}
