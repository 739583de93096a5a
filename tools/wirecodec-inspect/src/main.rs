// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! wirecodec-inspect - look at frames through a schema table
//!
//! ```bash
//! wirecodec-inspect list
//! wirecodec-inspect describe subscribe-request
//! wirecodec-inspect decode count-or-parser-errors2 0000000005
//! wirecodec-inspect encode session-id '[7, 42]'
//! wirecodec-inspect --table protocol.json --strict decode role-set 00000002...
//! ```

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use wirecodec::{values_to_json, CodecConfig, Resolver, SpecTable};

#[derive(Parser)]
#[command(name = "wirecodec-inspect")]
#[command(about = "Inspect, decode and encode frames against a schema table")]
#[command(version)]
struct Cli {
    /// JSON table file (defaults to the built-in catalogue)
    #[arg(long, value_name = "FILE", global = true)]
    table: Option<PathBuf>,

    /// Treat a set cut short by end of input as an error
    #[arg(long, global = true)]
    strict: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List schema names in the table
    List,

    /// Print the resolved codec tree of a schema
    Describe {
        schema: String,
    },

    /// Decode a hex frame and print the value tuple as JSON
    Decode {
        schema: String,

        /// Frame bytes as hex (whitespace allowed)
        #[arg(value_name = "HEX")]
        hex: String,

        /// Single-line JSON output
        #[arg(short, long)]
        compact: bool,
    },

    /// Encode a JSON value tuple and print the frame as hex
    Encode {
        schema: String,

        /// Value tuple as a JSON array
        #[arg(value_name = "JSON")]
        values: String,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let resolver = load_resolver(&cli)?;

    match cli.command {
        Commands::List => cmd_list(&resolver),
        Commands::Describe { schema } => cmd_describe(&resolver, &schema),
        Commands::Decode {
            schema,
            hex,
            compact,
        } => cmd_decode(&resolver, &schema, &hex, compact),
        Commands::Encode { schema, values } => cmd_encode(&resolver, &schema, &values),
    }
}

fn load_resolver(cli: &Cli) -> anyhow::Result<Resolver> {
    let resolver = match &cli.table {
        Some(path) => {
            let table = SpecTable::from_json_file(path)
                .with_context(|| format!("Failed to load table {}", path.display()))?;
            log::info!("Loaded {} schemas from {}", table.len(), path.display());
            Resolver::new(Arc::new(table))
        }
        None => Resolver::global().clone(),
    };
    let config = CodecConfig::default().with_strict_collections(cli.strict);
    Ok(resolver.with_config(config))
}

fn cmd_list(resolver: &Resolver) -> anyhow::Result<()> {
    for name in resolver.table().names() {
        println!("{}", name);
    }
    Ok(())
}

fn cmd_describe(resolver: &Resolver, schema: &str) -> anyhow::Result<()> {
    let codec = resolver
        .codec(schema)
        .with_context(|| format!("Failed to resolve {}", schema))?;
    print!("{}", codec.describe());
    Ok(())
}

fn cmd_decode(resolver: &Resolver, schema: &str, hex_frame: &str, compact: bool) -> anyhow::Result<()> {
    let codec = resolver
        .codec(schema)
        .with_context(|| format!("Failed to resolve {}", schema))?;

    let cleaned: String = hex_frame.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = hex::decode(&cleaned).context("Frame is not valid hex")?;

    let mut input = bytes.as_slice();
    let values = codec
        .read_all(&mut input)
        .with_context(|| format!("Failed to decode {} ({} bytes)", schema, bytes.len()))?;
    if !input.is_empty() {
        log::warn!("{} trailing bytes after {}", input.len(), schema);
    }

    let json = values_to_json(&values);
    if compact {
        println!("{}", serde_json::to_string(&json)?);
    } else {
        println!("{}", serde_json::to_string_pretty(&json)?);
    }
    Ok(())
}

fn cmd_encode(resolver: &Resolver, schema: &str, values: &str) -> anyhow::Result<()> {
    let codec = resolver
        .codec(schema)
        .with_context(|| format!("Failed to resolve {}", schema))?;

    let json: serde_json::Value = serde_json::from_str(values).context("Values are not valid JSON")?;
    if !json.is_array() {
        bail!("Values must be a JSON array (one element per field of {})", schema);
    }

    let values = codec
        .values_from_json(&json)
        .with_context(|| format!("Values do not match {}", schema))?;
    let bytes = codec
        .to_bytes(&values)
        .with_context(|| format!("Failed to encode {}", schema))?;
    println!("{}", hex::encode(bytes));
    Ok(())
}
