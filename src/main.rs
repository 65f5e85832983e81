// Sales Dashboard Engine - Main executable
// Author: Gabriel Demetrios Lafis

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Arg, ArgMatches, Command};
use log::{error, info};

use sales_dashboard_engine::{
    api::{Server, ServerConfig},
    data::{Column, CsvSink, Region},
    processing::{PredicateSet, SummaryTable},
    report::{export_file_name, DashboardPage, DashboardRequest, DashboardService, RawDataRequest},
    source::{JsonFileSource, SalesQuery, SalesSource},
    utils::{init_logging, Config},
};

fn main() -> Result<()> {
    let matches = cli().get_matches();

    // Load configuration
    let config = match matches.value_of("config") {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("loading config file {}", path))?,
        None => Config::default(),
    };

    // Initialize logging
    if let Err(err) = init_logging(config.log_level_filter()) {
        eprintln!("Error initializing logger: {}", err);
    }

    match matches.subcommand() {
        Some(("serve", sub)) => serve(&config, sub),
        Some(("report", sub)) => report(&config, sub),
        Some(("export", sub)) => export(&config, sub),
        _ => {
            println!("No subcommand specified. Use --help for usage information.");
            Ok(())
        }
    }
}

fn cli() -> Command<'static> {
    let input = Arg::new("input")
        .short('i')
        .long("input")
        .value_name("FILE")
        .help("Read records from a saved JSON file instead of the remote API")
        .takes_value(true);

    let multi = |name: &'static str, help: &'static str| {
        Arg::new(name)
            .long(name)
            .value_name("VALUE")
            .help(help)
            .takes_value(true)
            .multiple_occurrences(true)
    };

    let single = |name: &'static str, help: &'static str| {
        Arg::new(name)
            .long(name)
            .value_name("VALUE")
            .help(help)
            .takes_value(true)
    };

    Command::new("Sales Dashboard Engine")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Gabriel Demetrios Lafis")
        .about("Sales reports over the remote products API")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Sets a custom config file")
                .takes_value(true),
        )
        .subcommand(
            Command::new("serve")
                .about("Run the API server")
                .arg(single("host", "Sets the server host"))
                .arg(single("port", "Sets the server port"))
                .arg(input.clone()),
        )
        .subcommand(
            Command::new("report")
                .about("Print the dashboard tables")
                .arg(single("region", "Region (Brasil, Centro-Oeste, Nordeste, Norte, Sudeste, Sul)"))
                .arg(single("year", "Year between 2020 and 2023"))
                .arg(multi("seller", "Keep only this seller (repeatable)"))
                .arg(single("top", "Number of sellers in the rankings (2-10)"))
                .arg(Arg::new("json").long("json").help("Print the report as JSON"))
                .arg(input.clone()),
        )
        .subcommand(
            Command::new("export")
                .about("Filter the raw records and write them as CSV")
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .value_name("NAME")
                        .help("Output file name; .csv is appended")
                        .takes_value(true),
                )
                .arg(multi("column", "Column to keep (repeatable, default all)"))
                .arg(multi("product", "Keep only this product (repeatable)"))
                .arg(multi("category", "Keep only this category (repeatable)"))
                .arg(multi("seller", "Keep only this seller (repeatable)"))
                .arg(multi("location", "Keep only this purchase location (repeatable)"))
                .arg(multi("payment", "Keep only this payment type (repeatable)"))
                .arg(single("price-min", "Lowest price"))
                .arg(single("price-max", "Highest price"))
                .arg(single("freight-min", "Lowest freight"))
                .arg(single("freight-max", "Highest freight"))
                .arg(single("from", "First purchase date (YYYY-MM-DD)"))
                .arg(single("to", "Last purchase date (YYYY-MM-DD)"))
                .arg(single("rating-min", "Lowest rating"))
                .arg(single("rating-max", "Highest rating"))
                .arg(single("installments-min", "Fewest installments"))
                .arg(single("installments-max", "Most installments"))
                .arg(input),
        )
}

fn source_for(config: &Config, matches: &ArgMatches) -> Arc<dyn SalesSource + Send + Sync> {
    match matches.value_of("input") {
        Some(path) => Arc::new(
            JsonFileSource::new(path).with_policy(config.source.malformed_records),
        ),
        None => Arc::new(config.http_source()),
    }
}

fn serve(config: &Config, matches: &ArgMatches) -> Result<()> {
    // Override config with command line arguments
    let host = matches.value_of("host").unwrap_or(&config.server.host).to_string();
    let port = match matches.value_of("port") {
        Some(port) => port.parse::<u16>().context("invalid --port")?,
        None => config.server.port,
    };

    let server_config = ServerConfig {
        host,
        port,
        workers: config.workers(),
        enable_cors: config.server.enable_cors,
        default_export_name: config.export.default_file_name.clone(),
    };

    let service = DashboardService::from_arc(source_for(config, matches));
    let server = Server::new(service, server_config);

    actix_web::rt::System::new()
        .block_on(server.run())
        .context("running API server")
}

fn report(config: &Config, matches: &ArgMatches) -> Result<()> {
    let region = matches
        .value_of("region")
        .map(str::parse::<Region>)
        .transpose()?;
    let year = parse_opt::<i32>(matches, "year")?;
    let query = SalesQuery::new(region, year)?;

    let mut request = DashboardRequest::new(query)
        .with_sellers(matches.values_of("seller").into_iter().flatten());
    if let Some(top) = parse_opt::<usize>(matches, "top")? {
        request = request.with_top_sellers(top);
    }

    let service = DashboardService::from_arc(source_for(config, matches));
    let page = service.dashboard(&request)?;

    if matches.is_present("json") {
        println!("{}", serde_json::to_string_pretty(&page)?);
    } else {
        print_page(&page);
    }

    if let Some(message) = &page.error {
        bail!("fetch failed: {}", message);
    }
    Ok(())
}

fn export(config: &Config, matches: &ArgMatches) -> Result<()> {
    let values = |name: &str| -> Vec<String> {
        matches.values_of(name).into_iter().flatten().map(str::to_string).collect()
    };

    let predicates = PredicateSet::new()
        .products(values("product"))
        .categories(values("category"))
        .sellers(values("seller"))
        .locations(values("location"))
        .payment_types(values("payment"))
        .price_between(parse_opt(matches, "price-min")?, parse_opt(matches, "price-max")?)
        .freight_between(parse_opt(matches, "freight-min")?, parse_opt(matches, "freight-max")?)
        .purchased_between(parse_date(matches, "from")?, parse_date(matches, "to")?)
        .rating_between(parse_opt(matches, "rating-min")?, parse_opt(matches, "rating-max")?)
        .installments_between(
            parse_opt(matches, "installments-min")?,
            parse_opt(matches, "installments-max")?,
        );

    let mut request = RawDataRequest::new(predicates);
    let columns = values("column");
    if !columns.is_empty() {
        let columns = columns
            .iter()
            .map(|name| name.parse::<Column>())
            .collect::<Result<Vec<_>, _>>()?;
        request = request.with_columns(columns);
    }

    let service = DashboardService::from_arc(source_for(config, matches));
    let view = service.raw_data(&request)?;
    if let Some(message) = &view.error {
        error!("Nothing exported: {}", message);
        bail!("fetch failed: {}", message);
    }

    let file_name = export_file_name(
        matches.value_of("output").unwrap_or(&config.export.default_file_name),
    );
    CsvSink::default()
        .write_file(&view.table, &file_name)
        .with_context(|| format!("writing {}", file_name))?;

    let (rows, columns) = view.shape();
    info!("Wrote {} rows and {} columns to {}", rows, columns, file_name);
    println!("A tabela possui {} linhas e {} colunas -> {}", rows, columns, file_name);
    Ok(())
}

fn parse_opt<T>(matches: &ArgMatches, name: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    matches
        .value_of(name)
        .map(|value| value.parse::<T>().with_context(|| format!("invalid --{}", name)))
        .transpose()
}

fn parse_date(matches: &ArgMatches, name: &str) -> Result<Option<NaiveDate>> {
    matches
        .value_of(name)
        .map(|value| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .with_context(|| format!("invalid --{}", name))
        })
        .transpose()
}

// Helper function to print a summary table
fn print_table<K>(title: &str, table: &SummaryTable<K>, label: impl Fn(&K) -> String) {
    println!("\n{}", title);
    println!("{}", "-".repeat(title.len()));
    if table.is_empty() {
        println!("(no data)");
    }
    for row in table.iter() {
        println!("{:<32} {:>14.2}", label(&row.key), row.value);
    }
}

fn print_page(page: &DashboardPage) {
    let report = &page.report;

    println!("Receita: {}", page.revenue_label);
    println!("Quantidade de vendas: {}", page.sales_label);

    print_table("Receita por estado", &report.revenue_by_location, |l| l.name.clone());
    print_table("Receita mensal", &report.revenue_by_month, |m| {
        format!("{} {}", m.month_name(), m.year)
    });
    print_table("Receita por categoria", &report.revenue_by_category, |c| c.clone());
    print_table("Vendas por estado", &report.sales_by_location, |l| l.name.clone());
    print_table("Vendas mensal", &report.sales_by_month, |m| {
        format!("{} {}", m.month_name(), m.year)
    });
    print_table("Vendas por categoria", &report.sales_by_category, |c| c.clone());

    println!("\nTop vendedores (receita)");
    for row in &page.top_sellers_by_revenue {
        println!("{:<32} {:>14.2}", row.seller, row.revenue);
    }

    println!("\nTop vendedores (quantidade de vendas)");
    for row in &page.top_sellers_by_sales {
        println!("{:<32} {:>14}", row.seller, row.sales);
    }
}
