#![deny(rust_2018_idioms)]
#![deny(clippy::all)]

use std::{error::Error, sync::Arc, time::Instant};

use chrono::NaiveDate;
use clap::{crate_version, Arg, ArgMatches, Command};
use slog::{error, info, warn, Logger};

use list_manager::{
    DetailView, DisplayMode, FileStore, LoadOutcome, Manager, Options, Preferences, SearchContext,
    ViewKind,
};
use primitives::{
    config::{configuration, Environment},
    util::logging::{level_from_str, new_logger_with_level},
    DateRange, Filter, Platform, Row, SortDirection, SortField, SortState, StatusCategory,
};

mod render;

/// Bearer token for the backend, taken from the environment only.
const TOKEN_VAR: &str = "DASHBOARD_TOKEN";

fn cli() -> Command<'static> {
    Command::new("Dashboard")
        .version(crate_version!())
        .about("Loads a page of a campaigns dashboard list & prints its visible columns")
        .arg(
            Arg::new("config")
                .long("config")
                .help("the config file for the dashboard, defaults to the bundled one of the ENV")
                .takes_value(true),
        )
        .arg(
            Arg::new("view")
                .long("view")
                .short('v')
                .help("the list view to load")
                .default_value("requests")
                .possible_values(["requests", "request-campaigns", "approved-campaigns"])
                .takes_value(true),
        )
        .arg(
            Arg::new("request")
                .long("request")
                .short('r')
                .help("the request whose campaigns are listed, for the `request-campaigns` view")
                .takes_value(true),
        )
        .arg(
            Arg::new("request-platform")
                .long("request-platform")
                .help("platform of the request, used for its campaigns which have none")
                .requires("request")
                .takes_value(true),
        )
        .arg(
            Arg::new("page")
                .long("page")
                .short('p')
                .default_value("1")
                .takes_value(true),
        )
        .arg(
            Arg::new("limit")
                .long("limit")
                .help("rows per page, defaults to the configured page limit")
                .takes_value(true),
        )
        .arg(
            Arg::new("search")
                .long("search")
                .short('s')
                .help("case-insensitive free-text search")
                .takes_value(true),
        )
        .arg(
            Arg::new("status")
                .long("status")
                .help("status category to keep: Error or Created")
                .takes_value(true)
                .multiple_occurrences(true),
        )
        .arg(
            Arg::new("platform")
                .long("platform")
                .help("platform to keep, e.g. Taboola")
                .takes_value(true)
                .multiple_occurrences(true),
        )
        .arg(
            Arg::new("device")
                .long("device")
                .takes_value(true)
                .multiple_occurrences(true),
        )
        .arg(Arg::new("country").long("country").takes_value(true))
        .arg(Arg::new("client").long("client").takes_value(true))
        .arg(Arg::new("requester").long("requester").takes_value(true))
        .arg(
            Arg::new("from")
                .long("from")
                .help("first day of the request date range, YYYY-MM-DD")
                .takes_value(true),
        )
        .arg(
            Arg::new("to")
                .long("to")
                .help("last day of the request date range, YYYY-MM-DD")
                .takes_value(true),
        )
        .arg(Arg::new("campaign-from").long("campaign-from").takes_value(true))
        .arg(Arg::new("campaign-to").long("campaign-to").takes_value(true))
        .arg(
            Arg::new("sort")
                .long("sort")
                .possible_values(["name", "date"])
                .takes_value(true),
        )
        .arg(
            Arg::new("desc")
                .long("desc")
                .help("sort in descending order")
                .takes_value(false),
        )
        .arg(
            Arg::new("columns")
                .long("columns")
                .help("comma separated columns to show, stored as the view's preference")
                .takes_value(true)
                .use_value_delimiter(true),
        )
        .arg(
            Arg::new("detail")
                .long("detail")
                .help("prints the details of the row with this id")
                .takes_value(true),
        )
        .arg(
            Arg::new("prefs")
                .long("prefs")
                .help("directory for the column preferences, defaults to the configured one")
                .takes_value(true),
        )
}

fn date_arg(cli: &ArgMatches, name: &str) -> Result<Option<NaiveDate>, chrono::ParseError> {
    cli.value_of(name)
        .map(|date| NaiveDate::parse_from_str(date, "%Y-%m-%d"))
        .transpose()
}

fn filter_from(cli: &ArgMatches) -> Result<Filter, Box<dyn Error>> {
    let mut filter = Filter {
        requester: cli.value_of("requester").unwrap_or_default().to_string(),
        client_name: cli.value_of("client").unwrap_or_default().to_string(),
        country: cli.value_of("country").unwrap_or_default().to_string(),
        request_date: DateRange::new(date_arg(cli, "from")?, date_arg(cli, "to")?),
        campaign_date: DateRange::new(
            date_arg(cli, "campaign-from")?,
            date_arg(cli, "campaign-to")?,
        ),
        ..Default::default()
    };

    for status in cli.values_of("status").into_iter().flatten() {
        filter = filter.with_status(status.parse::<StatusCategory>()?);
    }
    for platform in cli.values_of("platform").into_iter().flatten() {
        filter = filter.with_platform(platform.parse::<Platform>()?.to_string());
    }
    for device in cli.values_of("device").into_iter().flatten() {
        filter = filter.with_device(device);
    }

    Ok(filter)
}

/// The request of the listed campaigns, as far as it's known from the arguments.
fn parent_from(cli: &ArgMatches) -> Result<Option<Row>, Box<dyn Error>> {
    let request = match cli.value_of("request") {
        Some(request) => request,
        None => return Ok(None),
    };

    let mut parent = Row::new();
    parent.insert("id", request);
    if let Some(platform) = cli.value_of("request-platform") {
        parent.insert("platform", platform.parse::<Platform>()?.to_string());
    }

    Ok(Some(parent))
}

fn sort_from(cli: &ArgMatches) -> Result<Option<SortState>, Box<dyn Error>> {
    let field = match cli.value_of("sort") {
        Some(field) => field.parse::<SortField>()?,
        None if cli.is_present("desc") => SortState::default().field,
        None => return Ok(None),
    };
    let direction = if cli.is_present("desc") {
        SortDirection::Desc
    } else {
        SortDirection::Asc
    };

    Ok(Some(SortState { field, direction }))
}

fn environment() -> Result<Environment, serde_json::Error> {
    match std::env::var("ENV") {
        Ok(env) => serde_json::from_value(serde_json::Value::String(env)),
        Err(_) => Ok(Environment::default()),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = cli().get_matches();

    let level = std::env::var("LOG_LEVEL").unwrap_or_default();
    let logger = new_logger_with_level("dashboard", level_from_str(&level));

    let environment = environment()?;
    let config = configuration(environment, cli.value_of("config"))?;

    let view: ViewKind = cli.value_of("view").unwrap_or("requests").parse()?;
    let page: u64 = cli.value_of("page").unwrap_or("1").parse()?;
    let limit = match cli.value_of("limit") {
        Some(limit) => limit.parse()?,
        None => config.page_limit,
    };

    let preferences = match cli.value_of("prefs").or(config.preferences_dir.as_deref()) {
        Some(dir) => Preferences::new(Arc::new(FileStore::new(dir))),
        None => Preferences::in_memory(),
    };

    let options = Options {
        backend_url: config.backend_url.clone(),
        view,
        request_id: cli.value_of("request").map(ToString::to_string),
        limit,
        auth_token: std::env::var(TOKEN_VAR).ok().filter(|token| !token.is_empty()),
        fetch_timeout: config.fetch_timeout(),
    };
    if options.auth_token.is_none() {
        warn!(&logger, "No backend token set, the request is sent without authorization"; "variable" => TOKEN_VAR);
    }

    let manager = Manager::new(options, preferences)?;
    if view == ViewKind::RequestCampaigns {
        manager.set_parent(parent_from(&cli)?).await;
    }

    info!(&logger, "Loading list page"; "view" => %view, "page" => page, "limit" => limit, "backend" => %config.backend_url);
    match manager.load_page(page).await {
        LoadOutcome::Loaded(info) => {
            info!(&logger, "Loaded list page"; "page" => info.page, "total" => info.total, "total_pages" => info.total_pages());
        }
        LoadOutcome::Stale => {
            warn!(&logger, "List page load was superseded"; "view" => %view);
        }
        LoadOutcome::Failed(err) => {
            error!(&logger, "Failed to load the list page"; "view" => %view, "error" => %err);

            return Err(err.into());
        }
    }

    let mut search = SearchContext::new(config.search_debounce());
    if let Some(query) = cli.value_of("search") {
        search.input(query, Instant::now());
        search.flush();
    }

    let mut state = manager.state().write().await;
    state.set_filter(filter_from(&cli)?);
    if let Some(sort) = sort_from(&cli)? {
        state.sort_by(sort);
    }
    if let Some(columns) = cli.values_of("columns") {
        let columns: Vec<String> = columns.map(|column| column.trim().to_string()).collect();

        if !state.set_visible_columns(&columns) {
            warn!(&logger, "None of the requested columns is present, keeping the current ones"; "columns" => ?columns);
        }
    }

    let rows = state.visible_rows(search.query());
    print!("{}", render::table(&state, &rows));
    println!("{}", render::footer(&state, rows.len()));

    if let Some(id) = cli.value_of("detail") {
        print_detail(&logger, &rows, id);
    }

    Ok(())
}

fn print_detail(logger: &Logger, rows: &[Row], id: &str) {
    let found = rows
        .iter()
        .find(|row| row.identity().map_or(false, |identity| identity.to_string() == id));

    match found {
        Some(row) => {
            println!();
            print!("{}", render::detail(&DetailView::project(row, DisplayMode::FullScreen)));
        }
        None => warn!(logger, "No row with this id among the shown rows"; "id" => id),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    fn matches(args: &[&str]) -> ArgMatches {
        cli().get_matches_from(std::iter::once("dashboard").chain(args.iter().copied()))
    }

    #[test]
    fn builds_the_filter() {
        let cli = matches(&[
            "--status",
            "error",
            "--status",
            "Created",
            "--platform",
            "mediago",
            "--country",
            "BG",
            "--from",
            "2024-02-01",
        ]);

        let filter = filter_from(&cli).expect("Should build the filter");

        let expected = Filter {
            country: "BG".into(),
            request_date: DateRange::new(NaiveDate::from_ymd_opt(2024, 2, 1), None),
            ..Default::default()
        }
        .with_status(StatusCategory::Error)
        .with_status(StatusCategory::Created)
        .with_platform("MediaGo");

        assert_eq!(expected, filter);
    }

    #[test]
    fn rejects_unknown_filter_values() {
        assert!(filter_from(&matches(&["--status", "pending"])).is_err());
        assert!(filter_from(&matches(&["--platform", "myspace"])).is_err());
        assert!(filter_from(&matches(&["--to", "01/02/2024"])).is_err());
    }

    #[test]
    fn builds_the_parent_request() {
        assert_eq!(None, parent_from(&matches(&[])).expect("Valid"));

        let parent = parent_from(&matches(&[
            "--view",
            "request-campaigns",
            "--request",
            "req-1",
            "--request-platform",
            "mediago",
        ]))
        .expect("Valid")
        .expect("Should have a parent");
        assert_eq!(Some("req-1".to_string()), parent.identity().map(ToString::to_string));
        assert_eq!("mediago", parent.search_text("platform"));

        assert!(parent_from(&matches(&["--request", "req-1", "--request-platform", "myspace"])).is_err());
    }

    #[test]
    fn builds_the_sort() {
        assert_eq!(None, sort_from(&matches(&[])).expect("Valid"));
        assert_eq!(
            Some(SortState {
                field: SortField::Name,
                direction: SortDirection::Asc
            }),
            sort_from(&matches(&["--sort", "name"])).expect("Valid")
        );
        assert_eq!(
            Some(SortState {
                field: SortField::Date,
                direction: SortDirection::Desc
            }),
            sort_from(&matches(&["--desc"])).expect("Valid")
        );
    }

    #[test]
    fn parses_columns() {
        let cli = matches(&["--view", "approved-campaigns", "--columns", "campaign_name,country"]);

        assert_eq!(Some("approved-campaigns"), cli.value_of("view"));
        assert_eq!(
            vec!["campaign_name", "country"],
            cli.values_of("columns").expect("Should have columns").collect::<Vec<_>>()
        );
    }
}
