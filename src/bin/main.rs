use airbb::availability::FilterCriteria;
use airbb::booking_db::BookingDB;
use airbb::config::{self, Config};
use airbb::web;
use chrono::NaiveDate;
use clap::{App, Arg, ArgMatches, SubCommand};
use std::error::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;

type CmdResult = Result<(), Box<dyn Error>>;

fn main() {
    let database_arg = Arg::with_name(config::ARG_DATABASE)
        .long("database")
        .short("d")
        .help("Path of the SQLite database file (defaults to $SQLITE_PATH or AirBB.db).")
        .global(true)
        .takes_value(true);
    let bind_arg = Arg::with_name(config::ARG_BIND)
        .long("bind")
        .help("Address the HTTP server listens on (defaults to $AIRBB_BIND or 127.0.0.1:5000).")
        .global(true)
        .takes_value(true);
    let session_timeout_arg = Arg::with_name(config::ARG_SESSION_TIMEOUT)
        .long("session-timeout")
        .help("Idle minutes after which a visitor session expires (defaults to 30).")
        .global(true)
        .takes_value(true);
    let booking_user_arg = Arg::with_name(config::ARG_BOOKING_USER)
        .long("booking-user")
        .help("Id of the user new reservations are booked for.")
        .global(true)
        .takes_value(true);

    let serve_cmd = SubCommand::with_name("serve").about("runs the booking site");
    let migrate_cmd = SubCommand::with_name("migrate")
        .about("creates or upgrades the database schema and prints its version");
    let seed_cmd =
        SubCommand::with_name("seed").about("fills an empty database with sample data");

    let residences_cmd = SubCommand::with_name("residences")
        .about("lists the residences matching the given filter")
        .arg(
            Arg::with_name("location")
                .long("location")
                .short("l")
                .help("Only residences in the location with this id.")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("guests")
                .long("guests")
                .short("g")
                .help("Only residences hosting at least this many guests.")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("check-in")
                .long("check-in")
                .help("Arrival date (YYYY-MM-DD), requires --check-out.")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("check-out")
                .long("check-out")
                .help("Departure date (YYYY-MM-DD), requires --check-in.")
                .takes_value(true),
        );

    let cli = App::new("AirBB")
        .version(env!("CARGO_PKG_VERSION"))
        .author(env!("CARGO_PKG_AUTHORS"))
        .about("Books residences for short stays")
        .arg(database_arg)
        .arg(bind_arg)
        .arg(session_timeout_arg)
        .arg(booking_user_arg)
        .subcommand(serve_cmd)
        .subcommand(migrate_cmd)
        .subcommand(seed_cmd)
        .subcommand(residences_cmd)
        .get_matches();

    init_logging();

    let result = match cli.subcommand() {
        ("serve", Some(cmd_cli)) => serve(cmd_cli),
        ("migrate", Some(cmd_cli)) => migrate(cmd_cli),
        ("seed", Some(cmd_cli)) => seed(cmd_cli),
        ("residences", Some(cmd_cli)) => list_residences(cmd_cli),
        _ => {
            println!("Please specify the command you want to perform.");
            println!("See --help for more information.");
            Ok(())
        }
    };

    if let Err(err) = result {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

/// Logs go to stderr, filtered by RUST_LOG (info if unset).
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn open_db(config: &Config) -> Result<BookingDB, Box<dyn Error>> {
    info!(path = %config.database_path, "opening database");
    Ok(BookingDB::open(&config.database_path)?)
}

fn serve(cmd_cli: &ArgMatches) -> CmdResult {
    let config = Config::from_matches(cmd_cli)?;
    let db = open_db(&config)?;

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(web::serve(&config, db))?;
    Ok(())
}

fn migrate(cmd_cli: &ArgMatches) -> CmdResult {
    let config = Config::from_matches(cmd_cli)?;
    let db = open_db(&config)?;
    println!("Database schema is at version {}.", db.db_version()?);
    Ok(())
}

fn seed(cmd_cli: &ArgMatches) -> CmdResult {
    let config = Config::from_matches(cmd_cli)?;
    let db = open_db(&config)?;
    if db.seed_sample_data()? {
        println!("Inserted the sample data set.");
    } else {
        println!("Database already contains data, nothing was inserted.");
    }
    Ok(())
}

fn list_residences(cmd_cli: &ArgMatches) -> CmdResult {
    let config = Config::from_matches(cmd_cli)?;
    let criteria = FilterCriteria {
        location_id: parse_arg(cmd_cli, "location")?,
        guest_number: parse_arg(cmd_cli, "guests")?,
        check_in_date: parse_date_arg(cmd_cli, "check-in")?,
        check_out_date: parse_date_arg(cmd_cli, "check-out")?,
    };
    if criteria.check_in_date.is_some() != criteria.check_out_date.is_some() {
        return Err("--check-in and --check-out must be given together".into());
    }

    let db = open_db(&config)?;
    let residences = db.find_residences(&criteria)?;
    if residences.is_empty() {
        println!("No residences match the given filter.");
    }
    for (residence, location) in residences {
        println!(
            "{}: {} ({}), {} guests, {:.2} per night",
            residence.id,
            residence.name,
            location.name,
            residence.guest_number,
            residence.price_per_night
        );
    }
    Ok(())
}

fn parse_arg<T>(cmd_cli: &ArgMatches, name: &str) -> Result<Option<T>, Box<dyn Error>>
where
    T: std::str::FromStr,
    T::Err: Error + 'static,
{
    match cmd_cli.value_of(name) {
        Some(value) => Ok(Some(value.parse::<T>()?)),
        None => Ok(None),
    }
}

fn parse_date_arg(cmd_cli: &ArgMatches, name: &str) -> Result<Option<NaiveDate>, Box<dyn Error>> {
    match cmd_cli.value_of(name) {
        Some(value) => Ok(Some(NaiveDate::parse_from_str(value, "%Y-%m-%d")?)),
        None => Ok(None),
    }
}
