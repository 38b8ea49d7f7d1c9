use ambari_client::api::privilege::Privilege;
use ambari_client::config::{CliConfig, Config};
use ambari_client::AmbariClient;
use anyhow::{anyhow, bail, Context, Result};
use crossterm::style::Stylize;
use std::path::PathBuf;

fn print_help() {
    println!(
        "{}",
        "ambari-privileges - manage Ambari cluster privileges".blue().bold()
    );
    println!();
    println!("{}", "Usage:".yellow());
    println!("  ambari-privileges [OPTIONS] <COMMAND> [ARGS]");
    println!();
    println!("{}", "Options:".yellow());
    println!("  {}    - Read config from FILE", "--config FILE".green());
    println!("  {}   - Cluster to act on", "--cluster NAME".green());
    println!("  {}        - Log requests to stderr", "--verbose".green());
    println!(
        "  {}    - Write default config file",
        "--init-config".green()
    );
    println!(
        "  {} - Write commented config template",
        "--generate-config".green()
    );
    println!("  {}           - Show this help", "--help".green());
    println!();
    println!("{}", "Commands:".yellow());
    println!("  {}", "get <id>".green());
    println!("  {}", "search <permission> <principal> <USER|GROUP>".green());
    println!("  {}", "create <permission> <principal> <USER|GROUP>".green());
    println!(
        "  {}",
        "update <id> <permission> <principal> <USER|GROUP>".green()
    );
    println!("  {}", "delete <id>".green());
    println!();
    println!("{}", "Examples:".yellow());
    println!("  ambari-privileges --cluster hdp create CLUSTER.USER alice USER");
    println!("  ambari-privileges --cluster hdp search CLUSTER.USER alice USER");
    println!();
}

#[derive(Debug, Default)]
struct Options {
    config_path: Option<PathBuf>,
    cluster: Option<String>,
    verbose: bool,
    words: Vec<String>,
}

#[derive(Debug, PartialEq)]
enum Command {
    Get(i64),
    Search(Privilege),
    Create(Privilege),
    Update(Privilege),
    Delete(i64),
}

#[derive(Debug, PartialEq)]
enum Outcome {
    Found(Privilege),
    NotFound,
    Deleted(i64),
}

fn parse_options(args: &[String]) -> Result<Options> {
    let mut options = Options::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => {
                let path = iter.next().ok_or_else(|| anyhow!("--config needs a file"))?;
                options.config_path = Some(PathBuf::from(path));
            }
            "--cluster" => {
                let name = iter.next().ok_or_else(|| anyhow!("--cluster needs a name"))?;
                options.cluster = Some(name.clone());
            }
            "--verbose" | "-v" => options.verbose = true,
            _ => options.words.push(arg.clone()),
        }
    }

    Ok(options)
}

/// `--cluster` wins over the configured default; an empty name counts as missing
fn resolve_cluster(cluster: Option<String>, cli: &CliConfig) -> Result<String> {
    cluster
        .or_else(|| cli.default_cluster.clone())
        .filter(|name| !name.is_empty())
        .ok_or_else(|| anyhow!("No cluster given: pass --cluster or set cli.default_cluster"))
}

fn parse_id(word: &str) -> Result<i64> {
    word.parse()
        .with_context(|| format!("Invalid privilege id '{}'", word))
}

fn parse_triple(words: &[String]) -> Result<Privilege> {
    let [permission, principal, principal_type] = words else {
        bail!("Expected <permission> <principal> <USER|GROUP>");
    };
    if permission.is_empty() || principal.is_empty() || principal_type.is_empty() {
        bail!("Permission, principal and principal type must not be empty");
    }
    Ok(Privilege::new(
        permission,
        principal,
        &principal_type.to_uppercase(),
    ))
}

fn parse_command(words: &[String]) -> Result<Command> {
    let (name, rest) = words
        .split_first()
        .ok_or_else(|| anyhow!("No command given, see --help"))?;

    match (name.as_str(), rest) {
        ("get", [id]) => Ok(Command::Get(parse_id(id)?)),
        ("delete", [id]) => Ok(Command::Delete(parse_id(id)?)),
        ("search", triple) => Ok(Command::Search(parse_triple(triple)?)),
        ("create", triple) => Ok(Command::Create(parse_triple(triple)?)),
        ("update", [id, triple @ ..]) => {
            let mut privilege = parse_triple(triple)?;
            privilege.privilege_info.privilege_id = parse_id(id)?;
            Ok(Command::Update(privilege))
        }
        _ => bail!("Unknown or incomplete command '{}', see --help", words.join(" ")),
    }
}

fn run(client: &AmbariClient, cluster: &str, command: Command) -> Result<Outcome> {
    let outcome: Outcome = match command {
        Command::Get(id) => client.privilege(cluster, id)?.into(),
        Command::Search(privilege) => {
            let info = &privilege.privilege_info;
            client
                .search_privilege(
                    cluster,
                    &info.permission_name,
                    &info.principal_name,
                    &info.principal_type,
                )?
                .into()
        }
        Command::Create(privilege) => Outcome::Found(client.create_privilege(cluster, &privilege)?),
        Command::Update(privilege) => Outcome::Found(client.update_privilege(cluster, &privilege)?),
        Command::Delete(id) => {
            client.delete_privilege(cluster, id)?;
            Outcome::Deleted(id)
        }
    };
    Ok(outcome)
}

impl From<Option<Privilege>> for Outcome {
    fn from(found: Option<Privilege>) -> Self {
        found.map_or(Outcome::NotFound, Outcome::Found)
    }
}

/// Print the outcome and return the process exit code
fn report(outcome: &Outcome, pretty_json: bool) -> Result<i32> {
    match outcome {
        Outcome::Found(privilege) => {
            let json = if pretty_json {
                serde_json::to_string_pretty(privilege)?
            } else {
                privilege.to_string()
            };
            println!("{}", json);
            Ok(0)
        }
        Outcome::NotFound => {
            eprintln!("{}", "not found".red());
            Ok(1)
        }
        Outcome::Deleted(id) => {
            println!("Privilege {} deleted", id);
            Ok(0)
        }
    }
}

fn write_config_file(contents: &str) -> Result<()> {
    let path = Config::get_config_path()?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Error creating config directory {:?}", parent))?;
    }
    std::fs::write(&path, contents).with_context(|| format!("Error writing {:?}", path))?;
    println!("Configuration file created at: {:?}", path);
    Ok(())
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = parse_options(&args)?;

    if options.verbose {
        ambari_client::logging::init_verbose_tracing();
    } else {
        ambari_client::logging::init_tracing();
    }

    if args.is_empty() || args.iter().any(|a| a == "--help" || a == "-h") {
        print_help();
        return Ok(());
    }

    if args.contains(&"--generate-config".to_string()) {
        return write_config_file(&Config::create_default_with_comments());
    }

    if args.contains(&"--init-config".to_string()) {
        return write_config_file(&toml::to_string_pretty(&Config::default())?);
    }

    let config = match &options.config_path {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let cluster = resolve_cluster(options.cluster, &config.cli)?;

    let command = parse_command(&options.words)?;
    let client = AmbariClient::from_config(&config.ambari)?;
    tracing::info!(target: "cli", "Using {} on cluster {}", client.base_url(), cluster);

    let outcome = run(&client, &cluster, command)?;
    let code = report(&outcome, config.cli.pretty_json)?;
    if code != 0 {
        std::process::exit(code);
    }

    Ok(())
}
