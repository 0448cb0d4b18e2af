//! GrowthForecast CLI - bulk maintenance for GrowthForecast graphs.

mod commands;
mod observability;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{ClientArgs, Report, scope::split_url};
use observability::{LogFormat, TracingConfig, init_tracing};

/// GrowthForecast - bulk graph maintenance from URLs copied out of the web UI.
#[derive(Parser)]
#[command(name = "growthforecast")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress per-item progress lines
    #[arg(short = 'S', long, global = true)]
    silent: bool,

    #[command(flatten)]
    client: ClientArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Delete every graph and complex graph under a URL
    ///
    /// e.g. growthforecast delete 'http://{host}:{port}/list/{service}/{section}'
    Delete {
        /// URL of a list or view_graph page
        url: String,

        /// Only graphs with these names
        #[arg(short, long, num_args = 1..)]
        graph_names: Vec<String>,

        /// Only graphs in these sections
        #[arg(short, long, num_args = 1..)]
        section_names: Vec<String>,
    },

    /// Change the color of graphs under a URL
    ///
    /// e.g. growthforecast color 'http://{host}:{port}/list/{service}' -c '2xx_count:#1111cc' '3xx_count:#11cc11'
    Color {
        /// URL of a list or view_graph page
        url: String,

        /// GRAPH_NAME:COLOR pairs
        #[arg(
            short,
            long,
            required = true,
            num_args = 1..,
            value_parser = parse_color_arg
        )]
        colors: Vec<(String, String)>,
    },

    /// Create a complex graph in every section that has the source graphs
    ///
    /// e.g. growthforecast create_complex 'http://{host}:{port}/list/{service}' -f 2xx_count 3xx_count -t status_count
    #[command(name = "create_complex", alias = "create-complex")]
    CreateComplex {
        /// URL of a list page
        url: String,

        /// Source graph names, in stacking order
        #[arg(short, long, required = true, num_args = 1..)]
        from_graphs: Vec<String>,

        /// Name of the complex graph to create
        #[arg(short, long)]
        to_complex: String,

        /// Description of the complex graph
        #[arg(short, long)]
        description: Option<String>,
    },

    /// Post a JSON object of graph parameters to a graph
    Post {
        /// e.g. '{"number": 10, "mode": "count"}'
        json: String,

        /// URL naming the graph, e.g. http://{host}:{port}/api/{service}/{section}/{graph}
        api_url: String,
    },

    /// Post a vertical rule scoped by a URL
    Vrule {
        /// e.g. '{"time": 1360000000, "color": "#FF0000", "description": "deploy"}'
        json: String,

        /// URL naming the scope (service, section, graph all optional)
        url: String,
    },

    /// List vertical rules scoped by a URL
    #[command(name = "vrule-list")]
    VruleList {
        /// URL naming the scope
        url: String,
    },

    /// Post samples concurrently and report throughput
    Bench {
        /// URL naming the graph to post to
        url: String,

        /// Number of requests
        #[arg(short = 'n', long, default_value = "100")]
        count: usize,

        /// Requests in flight at once
        #[arg(short, long, default_value = "10")]
        concurrency: usize,

        /// Value to post
        #[arg(long, default_value = "1")]
        number: i64,
    },
}

fn parse_color_arg(pair: &str) -> Result<(String, String), String> {
    commands::color::parse_color(pair).map_err(|e| e.to_string())
}

fn setup_logging(verbosity: u8) -> Result<()> {
    let config = TracingConfig::for_verbosity(
        verbosity,
        std::env::var("RUST_LOG").ok(),
        LogFormat::from_env(),
    );
    init_tracing(&config)
}

/// Dispatch a parsed command line.
///
/// Server-side failures are recorded in the returned report. An error here
/// means the arguments, URL or JSON were unusable.
async fn run(cli: Cli) -> Result<Report> {
    let mut report = Report::new(cli.silent);

    match cli.command {
        Commands::Delete {
            url,
            graph_names,
            section_names,
        } => {
            let target = split_url(&url)?;
            let client = cli.client.client(&target.base_uri)?;
            commands::delete::run(
                &client,
                &target.scope,
                &graph_names,
                &section_names,
                &mut report,
            )
            .await?;
        }
        Commands::Color { url, colors } => {
            let target = split_url(&url)?;
            let client = cli.client.client(&target.base_uri)?;
            commands::color::run(&client, &target.scope, &colors, &mut report).await?;
        }
        Commands::CreateComplex {
            url,
            from_graphs,
            to_complex,
            description,
        } => {
            let target = split_url(&url)?;
            let client = cli.client.client(&target.base_uri)?;
            commands::create_complex::run(
                &client,
                &target.scope,
                &from_graphs,
                &to_complex,
                description.as_deref(),
                &mut report,
            )
            .await?;
        }
        Commands::Post { json, api_url } => {
            let params = commands::post::parse_params(&json)?;
            let target = split_url(&api_url)?;
            let client = cli.client.client(&target.base_uri)?;
            commands::post::run(&client, &target, &params, &mut report).await?;
        }
        Commands::Vrule { json, url } => {
            let params = commands::vrule::parse_params(&json)?;
            let target = split_url(&url)?;
            let client = cli.client.client(&target.base_uri)?;
            commands::vrule::post(&client, &target.scope, &params, &mut report).await?;
        }
        Commands::VruleList { url } => {
            let target = split_url(&url)?;
            let client = cli.client.client(&target.base_uri)?;
            commands::vrule::list(&client, &target.scope, &mut report).await?;
        }
        Commands::Bench {
            url,
            count,
            concurrency,
            number,
        } => {
            let target = split_url(&url)?;
            let client = cli.client.client(&target.base_uri)?;
            let summary =
                commands::bench::run(&client, &target, count, concurrency, number).await?;
            println!("{}", summary);
        }
    }

    Ok(report)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose)?;

    let report = run(cli).await?;
    if report.failed() > 0 {
        tracing::warn!(
            succeeded = report.succeeded(),
            failed = report.failed(),
            "Some items failed"
        );
    }

    Ok(())
}
