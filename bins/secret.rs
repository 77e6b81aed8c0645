//! Operator tool for configuration secrets.
//!
//! - secret encrypt <plaintext>   prints an `ENC(...)` value for config.toml
//! - secret decrypt <value>       accepts a bare or `ENC(...)`-wrapped value

use clap::{Parser, Subcommand};
use common::crypto::{self, CipherConfig, SecretProvider, PASSPHRASE_ENV};

/// Encrypt or decrypt catalog configuration values
#[derive(Parser, Debug)]
#[command(name = "secret")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Master passphrase
    #[arg(long, env = PASSPHRASE_ENV, hide_env_values = true)]
    passphrase: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Encrypt a plaintext value
    Encrypt { plaintext: String },
    /// Decrypt a value produced by `encrypt`
    Decrypt { value: String },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Same cipher tuning as the server, so its output can be decrypted at startup
    let cipher: CipherConfig = configs::load_file_if_present(&configs::config_path())?
        .map(|c| c.crypto)
        .unwrap_or_default();
    let provider = SecretProvider::new(&cli.passphrase, cipher)?;

    match cli.command {
        Command::Encrypt { plaintext } => {
            println!("{}", crypto::wrap_enc(&provider.encrypt(&plaintext)?));
        }
        Command::Decrypt { value } => {
            let inner = crypto::unwrap_enc(&value).unwrap_or(&value);
            println!("{}", provider.decrypt(inner)?);
        }
    }
    Ok(())
}
