use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use iot_actions::{
    ArgumentList, Caller, Config, Error, NodeId, SecurityLevel, SessionKind, SessionRegistry,
    spawn_invoke,
};

/// Device node actions - list, inspect and invoke them
#[derive(Parser)]
#[command(name = "iot-actions", version, about)]
struct Cli {
    /// Path to the action catalog file
    #[arg(short, long, env = "IOT_ACTIONS_CONFIG")]
    config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List declared actions
    List,
    /// Show every property of one action
    Describe {
        /// Action id
        id: Uuid,
    },
    /// Invoke an action
    Invoke {
        /// Action id
        id: Uuid,
        /// Positional string arguments
        args: Vec<String>,
        /// Arguments as a JSON array of strings instead of positionals
        #[arg(long, conflicts_with = "args")]
        json: Option<String>,
        /// Node to invoke as
        #[arg(long)]
        node: Option<String>,
        /// Clearance tier to invoke with
        #[arg(long)]
        clearance: Option<u8>,
        /// Invoke as a remote caller
        #[arg(long)]
        remote: bool,
        /// Abandon the result after this many milliseconds
        #[arg(long, default_value = "30000")]
        timeout_ms: u64,
        /// Session id to track the invocation under
        #[arg(long, default_value = "1")]
        session: i32,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "warn,iot_actions=info",
        1 => "info,iot_actions=debug",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("fatal: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load(cli.config.as_deref())?;
    tracing::debug!(path = ?config.config_path, "loaded configuration");

    match cli.command {
        Command::List => cmd_list(&config),
        Command::Describe { id } => cmd_describe(&config, &id),
        Command::Invoke {
            id,
            args,
            json,
            node,
            clearance,
            remote,
            timeout_ms,
            session,
        } => {
            let args = match json {
                Some(text) => ArgumentList::parse_json(&text)?,
                None => ArgumentList::from(args),
            };

            let mut caller = config.caller.clone();
            if let Some(node) = node {
                caller.node = NodeId::new(node);
            }
            if let Some(level) = clearance {
                caller.clearance = SecurityLevel::new(level);
            }
            if remote {
                caller.local = false;
            }

            let options = InvokeOptions {
                session,
                timeout: Duration::from_millis(timeout_ms),
            };
            cmd_invoke(&config, &id, caller, args, options).await
        }
    }
}

fn cmd_list(config: &Config) -> anyhow::Result<()> {
    let catalog = config.build_catalog()?;

    if catalog.is_empty() {
        println!("No actions declared.");
        return Ok(());
    }

    for action in catalog.list() {
        let mut flags = Vec::new();
        if action.is_local() {
            flags.push("local");
        }
        if action.is_encrypted() {
            flags.push("encrypted");
        }
        if flags.is_empty() {
            println!("{action}");
        } else {
            println!("{action} [{}]", flags.join(", "));
        }
    }

    Ok(())
}

fn cmd_describe(config: &Config, id: &Uuid) -> anyhow::Result<()> {
    let catalog = config.build_catalog()?;
    let action = catalog.get(id).ok_or(Error::ActionNotFound(*id))?;

    let level = action.security_level();
    let join = |nodes: Vec<NodeId>| {
        nodes
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    };

    println!("Name:             {}", action.name());
    println!("ID:               {}", action.id());
    if !action.description().is_empty() {
        println!("Description:      {}", action.description());
    }
    println!(
        "Security level:   {level}{}",
        level.name().map(|n| format!(" ({n})")).unwrap_or_default()
    );
    println!("Arguments:        {}", action.argument_count());
    println!("Encrypted:        {}", action.is_encrypted());
    println!("Local only:       {}", action.is_local());
    println!("Allow by default: {}", action.allow_by_default());
    println!("Whitelist:        {}", join(action.whitelist()));
    println!("Blacklist:        {}", join(action.blacklist()));

    Ok(())
}

struct InvokeOptions {
    session: i32,
    timeout: Duration,
}

async fn cmd_invoke(
    config: &Config,
    id: &Uuid,
    caller: Caller,
    args: ArgumentList,
    options: InvokeOptions,
) -> anyhow::Result<()> {
    let catalog = config.build_catalog()?;
    let action = catalog.get(id).ok_or(Error::ActionNotFound(*id))?;

    let mut sessions = SessionRegistry::new();
    sessions.open(options.session, SessionKind::Action)?;

    let result = spawn_invoke(action, caller, args, Some(options.timeout)).await;

    sessions.touch(options.session, Utc::now())?;
    if let Some(session) = sessions.close(options.session) {
        tracing::debug!(
            session_id = session.id(),
            started_at = %session.started_at(),
            "invocation session finished"
        );
    }

    match result {
        Ok(output) => {
            println!("{output}");
            Ok(())
        }
        Err(e) if e.is_request_error() => Err(anyhow::anyhow!("request rejected: {e}")),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_flag_names_the_catalog_file() {
        let cli = Cli::try_parse_from(["iot-actions", "--config", "/tmp/actions.toml", "list"])
            .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/actions.toml")));
        assert!(matches!(cli.command, Command::List));
    }
}
