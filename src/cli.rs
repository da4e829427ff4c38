use clap::{crate_authors, crate_description, crate_version, Arg, ArgAction, ArgMatches, Command};
use pretty_env_logger::env_logger::Builder;
use std::env;
use std::io::Write;
use std::process::exit;

use route53_cname::{ChangeAction, Config, DomainRecordManager, ENV_PREFIX};

/// Without `RUST_LOG`, only this crate's events are shown at info level.
fn init_logger(builder: &mut Builder) {
    if env::var("RUST_LOG").is_err() {
        builder
            .filter_level(log::LevelFilter::Warn)
            .filter_module("route53_cname", log::LevelFilter::Info);
    }
    builder.init();
}

/// Syslog priority prefix understood by journald.
fn journald_priority(level: log::Level) -> u8 {
    match level {
        log::Level::Error => 3,
        log::Level::Warn => 4,
        log::Level::Info => 6,
        log::Level::Debug | log::Level::Trace => 7,
    }
}

fn setup_logger() {
    let mut builder = match env::var("RUST_LOG_STYLE").as_deref() {
        Ok("SYSTEMD") => {
            let mut builder = pretty_env_logger::env_logger::builder();
            builder.format(|buf, record| {
                writeln!(
                    buf,
                    "<{}>{}: {}",
                    journald_priority(record.level()),
                    record.target(),
                    record.args()
                )
            });
            builder
        }
        _ => pretty_env_logger::formatted_builder(),
    };
    init_logger(&mut builder);
}

fn domain_command(name: &'static str, about: &'static str) -> Command {
    Command::new(name).about(about).arg(
        Arg::new("domain")
            .required(true)
            .help("Fully qualified subdomain, e.g. www.example.com"),
    )
}

fn load_config(args: &ArgMatches) -> Config {
    let mut config = match Config::from_env() {
        Ok(c) => c,
        Err(err) => {
            println!("{err}");
            exit(2);
        }
    };

    if let Some(endpoint) = args.get_one::<String>("endpoint") {
        config.endpoint = match url::Url::parse(endpoint) {
            Ok(url) => Some(url),
            Err(err) => {
                println!("Invalid endpoint {endpoint}: {err}");
                exit(2);
            }
        };
    }

    config
}

pub(crate) fn main() {
    let cli = Command::new("route53-cname")
        .about(format!(
            "{}\n{} {}",
            crate_description!(),
            "Credentials are read from AWS_ACCESS_KEY_ID and AWS_SECRET_ACCESS_KEY,",
            format!("or {ENV_PREFIX}_ACCESS_KEY_ID and {ENV_PREFIX}_SECRET_ACCESS_KEY."),
        ))
        .arg(
            Arg::new("check")
                .action(ArgAction::SetTrue)
                .short('t')
                .long("test")
                .help("Check the configuration"),
        )
        .arg(
            Arg::new("endpoint")
                .long("endpoint")
                .global(true)
                .help("Route 53 API endpoint to use instead of the public one"),
        )
        .subcommand(domain_command(
            "create",
            "Create a CNAME pointing the subdomain at its parent domain",
        ))
        .subcommand(domain_command(
            "delete",
            "Delete the CNAME for the subdomain",
        ))
        .version(crate_version!())
        .author(crate_authors!("\n"));

    let args = cli.get_matches();

    setup_logger();

    let config = load_config(&args);

    let manager = match config.into_manager() {
        Ok(m) => m,
        Err(err) => {
            println!("{err}");
            exit(2);
        }
    };

    if args.get_flag("check") {
        tracing::info!("Configuration is valid.");
        exit(0);
    }

    let (action, domain) = match args.subcommand() {
        Some(("create", sub)) => (ChangeAction::Create, sub),
        Some(("delete", sub)) => (ChangeAction::Delete, sub),
        _ => {
            println!("A subcommand is required, see --help");
            exit(2);
        }
    };
    let domain = match domain.get_one::<String>("domain") {
        Some(d) => d,
        None => exit(2),
    };

    run(&manager, action, domain);
}

fn run(manager: &DomainRecordManager, action: ChangeAction, domain: &str) {
    match manager.apply(action, domain) {
        Ok(info) => match serde_json::to_string_pretty(&info) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                println!("{err}");
                exit(1);
            }
        },
        Err(err) => {
            tracing::error!(domain = domain, action = action.as_str(), "{err}");
            exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn journald_priorities_follow_syslog() {
        assert_eq!(journald_priority(log::Level::Error), 3);
        assert_eq!(journald_priority(log::Level::Warn), 4);
        assert_eq!(journald_priority(log::Level::Info), 6);
        assert_eq!(journald_priority(log::Level::Trace), 7);
    }

    #[test]
    fn domain_is_required() {
        let cmd = domain_command("create", "Create");
        assert!(cmd.clone().try_get_matches_from(["create"]).is_err());

        let matches = cmd
            .try_get_matches_from(["create", "www.example.com"])
            .unwrap();
        assert_eq!(
            matches.get_one::<String>("domain").map(String::as_str),
            Some("www.example.com")
        );
    }
}
