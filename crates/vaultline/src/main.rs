//! vaultline - Remote vault configuration, sealed at rest
//!
//! Commands:
//! - configure: Prompt for the vault URL and credentials, then seal them
//! - show [--json]: Print the stored configuration (secrets redacted)
//! - status: Where things live and how the key is held
//! - rekey: Rotate the key and re-seal the configuration
//! - reset [--yes]: Forget the configuration and the key

use std::io;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use vaultline::input;
use vaultline::{
    AuthMode, Capabilities, ConfigRecord, EphemeralPolicy, Recovery, SecretString, Session,
    StoreError,
};
use vaultline_core::{logging, Colors, Paths};

const REDACTED: &str = "<redacted>";

#[derive(Parser)]
#[command(name = "vaultline")]
#[command(about = "Remember which secret vault to use and how to reach it, sealed at rest")]
#[command(version)]
#[command(after_help = r#"AUTH MODES:
    automatic         Let the vault client discover credentials
    managed-identity  Platform identity (optional client id)
    client-secret     Tenant id + client id + client secret
    certificate       Tenant id + client id + certificate path

STORAGE:
    - Configuration is sealed with a per-user key before it hits disk
    - The key lives in the keychain, a DPAPI-protected file,
      or an owner-only file, whichever the platform supports first
    - Override the directory with --dir or VAULTLINE_DIR"#)]
struct Cli {
    /// Directory holding the sealed config and key files
    #[arg(long, global = true, env = "VAULTLINE_DIR")]
    dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactively set the vault URL and credentials
    Configure,

    /// Print the stored configuration with secrets redacted
    Show {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Show file locations, blob format and key source
    Status,

    /// Generate a new key and re-seal the configuration with it
    Rekey,

    /// Delete the configuration and the key
    Reset {
        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init();

    let paths = match cli.dir {
        Some(dir) => Paths::from_dir(dir),
        None => Paths::new(),
    };
    let mut session = Session::open(&paths, &Capabilities::probe(), EphemeralPolicy::Deny);

    match cli.command {
        Some(Commands::Configure) => cmd_configure(&mut session),
        Some(Commands::Show { json }) => cmd_show(&mut session, json),
        Some(Commands::Status) => cmd_status(&session, &paths),
        Some(Commands::Rekey) => cmd_rekey(&mut session),
        Some(Commands::Reset { yes }) => cmd_reset(&mut session, yes),
        None => cmd_show(&mut session, false),
    }
}

/// Make sure a key is resolved, offering a process-only key when nothing
/// can be persisted
fn ensure_key(session: &Session) -> Result<()> {
    match session.entropy().get_or_create_key() {
        Ok(_) => Ok(()),
        Err(StoreError::KeyUnavailable) => {
            let c = Colors::auto();
            println!(
                "{}warning:{} No key store is usable. A temporary key would make the saved configuration unreadable after this run.",
                c.yellow, c.reset
            );
            if !input::confirm("Continue with a temporary key?").context("Failed to read answer")? {
                bail!("No encryption key available");
            }
            session.entropy().accept_ephemeral();
            Ok(())
        }
        Err(e) => Err(e).context("Failed to resolve encryption key"),
    }
}

/// Ask what to do with a configuration that cannot be read
fn ask_recovery(error: &StoreError) -> Recovery {
    let c = Colors::auto();
    println!("{}error:{} {}", c.red, c.reset, error);
    println!("  [r] retry  (after restoring the key or config file)");
    println!("  [f] forget the configuration and key, start over");
    println!("  [a] abort");

    match input::read_line("Choice [a]: ") {
        Ok(answer) => parse_recovery(&answer),
        Err(_) => Recovery::Abort,
    }
}

fn parse_recovery(answer: &str) -> Recovery {
    match answer.trim().to_lowercase().as_str() {
        "r" | "retry" => Recovery::Retry,
        "f" | "forget" | "reset" => Recovery::Reset,
        _ => Recovery::Abort,
    }
}

fn load(session: &mut Session) -> Result<Option<ConfigRecord>> {
    ensure_key(session)?;
    session
        .load_with_recovery(ask_recovery)
        .context("Failed to load configuration")
}

/// Interactive configuration
fn cmd_configure(session: &mut Session) -> Result<()> {
    let existing = if session.store().exists() {
        load(session)?
    } else {
        None
    };
    let existing = existing.unwrap_or_default();

    let vault_url = prompt_field("Vault URL", non_empty(&existing.vault_url))?
        .context("Vault URL is required")?;

    let modes: Vec<&str> = AuthMode::ALL.iter().map(AuthMode::as_str).collect();
    let mode_prompt = format!("Auth mode ({})", modes.join(", "));
    let auth_mode: AuthMode = prompt_field(&mode_prompt, Some(existing.auth_mode.as_str()))?
        .unwrap_or_default()
        .parse()?;

    let mut record = ConfigRecord::new(vault_url, auth_mode);
    match auth_mode {
        AuthMode::Automatic => {}
        AuthMode::ManagedIdentity => {
            record.client_id = prompt_field(
                "Client id (empty for system-assigned)",
                existing.client_id.as_deref(),
            )?;
        }
        AuthMode::ClientSecret => {
            record.tenant_id = prompt_field("Tenant id", existing.tenant_id.as_deref())?;
            record.client_id = prompt_field("Client id", existing.client_id.as_deref())?;
            record.client_secret = prompt_secret("Client secret", existing.client_secret)?;
        }
        AuthMode::Certificate => {
            record.tenant_id = prompt_field("Tenant id", existing.tenant_id.as_deref())?;
            record.client_id = prompt_field("Client id", existing.client_id.as_deref())?;
            record.certificate_path =
                prompt_field("Certificate path", existing.certificate_path.as_deref())?;
            record.certificate_password =
                prompt_secret("Certificate password", existing.certificate_password)?;
        }
    }

    ensure_key(session)?;
    session.save(&record).context("Failed to save configuration")?;

    let c = Colors::auto();
    println!("{}success:{} Configuration saved", c.green, c.reset);
    println!("  {}{}{}", c.dim, session.store().path().display(), c.reset);
    Ok(())
}

/// Prompt for a plain value; empty input keeps `current`
fn prompt_field(label: &str, current: Option<&str>) -> Result<Option<String>> {
    let prompt = match current {
        Some(value) => format!("{} [{}]: ", label, value),
        None => format!("{}: ", label),
    };
    let answer = input::read_line(&prompt).with_context(|| format!("Failed to read {}", label))?;
    let answer = answer.trim();

    if answer.is_empty() {
        Ok(current.map(str::to_string))
    } else {
        Ok(Some(answer.to_string()))
    }
}

/// Prompt for a secret with masked echo; empty input keeps `current`
fn prompt_secret(label: &str, current: Option<SecretString>) -> Result<Option<SecretString>> {
    let prompt = if current.is_some() {
        format!("{} [keep current]: ", label)
    } else {
        format!("{}: ", label)
    };
    let value = match input::read_masked(&prompt) {
        Ok(value) => value,
        Err(e) if e.kind() == io::ErrorKind::Interrupted => bail!("Input cancelled"),
        Err(e) => return Err(e).with_context(|| format!("Failed to read {}", label)),
    };

    if value.is_empty() {
        Ok(current)
    } else {
        Ok(Some(SecretString::from(value)))
    }
}

fn non_empty(value: &str) -> Option<&str> {
    Some(value).filter(|v| !v.is_empty())
}

/// Printable view of a record; secrets are replaced by a marker
#[derive(Debug, Serialize, PartialEq, Eq)]
struct RecordView<'a> {
    vault_url: &'a str,
    auth_mode: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    tenant_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    client_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    client_secret: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    certificate_path: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    certificate_password: Option<&'static str>,
}

impl<'a> RecordView<'a> {
    fn new(record: &'a ConfigRecord) -> Self {
        Self {
            vault_url: &record.vault_url,
            auth_mode: record.auth_mode.as_str(),
            tenant_id: record.tenant_id.as_deref(),
            client_id: record.client_id.as_deref(),
            client_secret: record.client_secret.as_ref().map(|_| REDACTED),
            certificate_path: record.certificate_path.as_deref(),
            certificate_password: record.certificate_password.as_ref().map(|_| REDACTED),
        }
    }

    fn fields(&self) -> Vec<(&'static str, &str)> {
        let mut fields = vec![("Vault URL", self.vault_url), ("Auth mode", self.auth_mode)];
        let optional = [
            ("Tenant id", self.tenant_id),
            ("Client id", self.client_id),
            ("Client secret", self.client_secret),
            ("Certificate", self.certificate_path),
            ("Cert password", self.certificate_password),
        ];
        fields.extend(optional.into_iter().filter_map(|(k, v)| v.map(|v| (k, v))));
        fields
    }
}

/// Print the stored configuration
fn cmd_show(session: &mut Session, json: bool) -> Result<()> {
    let record = if session.store().exists() {
        load(session)?
    } else {
        None
    };

    let Some(record) = record else {
        if json {
            println!("null");
        } else {
            println!("No configuration stored. Create one with: vaultline configure");
        }
        return Ok(());
    };

    let view = RecordView::new(&record);
    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    let c = Colors::auto();
    println!("{}Vault Configuration{}", c.bold, c.reset);
    println!();
    for (label, value) in view.fields() {
        println!("  {:<14} {}{}{}", label, c.cyan, value, c.reset);
    }
    if let Some(source) = session.entropy().source() {
        if !source.is_persistent() {
            println!();
            println!(
                "{}warning:{} key is temporary; this configuration is lost on exit",
                c.yellow, c.reset
            );
        }
    }
    Ok(())
}

/// Where things live and how the key is held
fn cmd_status(session: &Session, paths: &Paths) -> Result<()> {
    let c = Colors::auto();
    let info = session
        .store()
        .inspect()
        .context("Failed to inspect configuration file")?;

    println!("{}vaultline status{}", c.bold, c.reset);
    println!();
    println!("  Directory:  {}", paths.dir.display());
    println!("  Config:     {}", session.store().path().display());

    match info {
        Some(info) => {
            let format = info.format.map_or("unknown", |f| f.as_str());
            println!(
                "  Stored:     {}yes{} ({} format, {} bytes)",
                c.green, c.reset, format, info.size
            );
            match session.entropy().find_persisted() {
                Some(source) => println!("  Key source: {}", source),
                None => println!(
                    "  Key source: {}missing{} (the stored configuration cannot be opened)",
                    c.red, c.reset
                ),
            }
        }
        None => {
            println!("  Stored:     {}no{}", c.dim, c.reset);
            match session.entropy().find_persisted() {
                Some(source) => println!("  Key source: {}", source),
                None => println!("  Key source: {}none yet{}", c.dim, c.reset),
            }
        }
    }
    Ok(())
}

/// Rotate the key
fn cmd_rekey(session: &mut Session) -> Result<()> {
    let resealed = session
        .rekey()
        .context("Failed to rekey (the current configuration must be readable)")?;

    let c = Colors::auto();
    if resealed {
        println!("{}success:{} New key generated, configuration re-sealed", c.green, c.reset);
    } else {
        println!("{}success:{} New key generated (no configuration stored)", c.green, c.reset);
    }
    Ok(())
}

/// Forget everything
fn cmd_reset(session: &mut Session, yes: bool) -> Result<()> {
    if !yes {
        let confirmed = input::confirm("Delete the stored configuration and key?")
            .context("Failed to read answer")?;
        if !confirmed {
            println!("Cancelled");
            return Ok(());
        }
    }

    session
        .forget_everything()
        .context("Failed to delete configuration and key")?;

    let c = Colors::auto();
    println!("{}success:{} Configuration and key deleted", c.green, c.reset);
    Ok(())
}
