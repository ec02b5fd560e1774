// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! uatypes-dump - Dump the types declared by a legacy OPC UA dictionary
//!
//! Parses an OPC binary schema or XML schema document, validates every
//! declared type and prints the resulting descriptions.

use clap::Parser;
use colored::*;
use std::collections::HashMap;
use std::path::PathBuf;
use uatypes::dictionary::{declared_type_dictionary, parse_dictionary, DictionaryDefinition};
use uatypes::types::{NodeId, XmlQualifiedName};
use uatypes::{
    BuiltInType, DataTypeDefinition, DataTypeDescription, DictionaryKind, EncodingTriple,
    EnumDescription, StructureDescription,
};

/// Dump the types of an OPC UA legacy dictionary
#[derive(Parser, Debug)]
#[command(name = "uatypes-dump")]
#[command(version = "0.1.0")]
#[command(about = "Parse an OPC UA type dictionary and dump its type descriptions")]
struct Args {
    /// Dictionary document (OPC binary schema or XML schema)
    file: PathBuf,

    /// Dictionary kind: binary, xml
    #[arg(short, long, default_value = "binary")]
    kind: DictionaryKind,

    /// Namespace index assigned to the declared types
    #[arg(short, long, default_value = "1")]
    namespace: u16,

    /// Output format: pretty, json
    #[arg(short, long, default_value = "pretty")]
    format: OutputFormat,

    /// Only show types whose name contains this text
    #[arg(short = 't', long)]
    filter: Option<String>,

    /// Log parser decisions to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Debug)]
enum OutputFormat {
    Pretty,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" | "p" => Ok(OutputFormat::Pretty),
            "json" | "j" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

fn main() {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if let Err(e) = run(&args) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let bytes = std::fs::read(&args.file)?;
    // Servers pad dictionary values with trailing zeros.
    let end = bytes.iter().position(|b| *b == 0).unwrap_or(bytes.len());
    let document = String::from_utf8(bytes[..end].to_vec())?;

    let types = declared_type_dictionary(args.kind, &document, args.namespace)?;
    let parsed = parse_dictionary(args.kind, &document, &types)?;
    log::debug!(
        "[Dump] {}: {} declared, {} converted, {} rejected",
        parsed.target_namespace,
        types.len(),
        parsed.definitions.len(),
        parsed.errors.len()
    );

    let mut rejected: Vec<(XmlQualifiedName, String)> = parsed
        .errors
        .iter()
        .map(|(name, e)| (name.clone(), e.to_string()))
        .collect();
    let mut descriptions = Vec::new();
    for definition in &parsed.definitions {
        if !matches_filter(&definition.xml_name.name, args.filter.as_deref()) {
            continue;
        }
        match describe(args.kind, definition) {
            Ok(description) => descriptions.push(description),
            Err(e) => rejected.push((definition.xml_name.clone(), e.to_string())),
        }
    }
    rejected.retain(|(name, _)| matches_filter(&name.name, args.filter.as_deref()));
    descriptions.sort_by(|a, b| a.xml_name().name.cmp(&b.xml_name().name));

    let names: HashMap<NodeId, String> = types
        .iter()
        .map(|(name, entry)| (entry.type_id.clone(), name.name.clone()))
        .collect();

    match args.format {
        OutputFormat::Json => print_json(&parsed.target_namespace, &descriptions, &rejected)?,
        OutputFormat::Pretty => print_pretty(&parsed.target_namespace, &descriptions, &rejected, &names),
    }
    Ok(())
}

fn matches_filter(name: &str, filter: Option<&str>) -> bool {
    filter.map_or(true, |f| name.contains(f))
}

fn describe(
    kind: DictionaryKind,
    definition: &DictionaryDefinition,
) -> uatypes::Result<DataTypeDescription> {
    let encodings = match kind {
        DictionaryKind::Binary => EncodingTriple::binary_only(definition.encoding_id.clone()),
        DictionaryKind::Xml => EncodingTriple::new(
            NodeId::NULL,
            definition.encoding_id.clone(),
            NodeId::NULL,
        ),
    };
    Ok(match &definition.definition {
        DataTypeDefinition::Structure(structure) => StructureDescription::new(
            definition.type_id.clone(),
            definition.xml_name.clone(),
            encodings,
            false,
            structure,
        )?
        .into(),
        DataTypeDefinition::Enum(enumeration) => EnumDescription::new(
            definition.type_id.clone(),
            definition.xml_name.clone(),
            encodings,
            false,
            enumeration.clone(),
        )
        .into(),
    })
}

fn type_name(id: &NodeId, names: &HashMap<NodeId, String>) -> String {
    if let Some(name) = names.get(id) {
        return name.clone();
    }
    match BuiltInType::from_data_type(id) {
        Some(builtin) => builtin.to_string(),
        None => id.to_string(),
    }
}

fn print_pretty(
    namespace: &str,
    descriptions: &[DataTypeDescription],
    rejected: &[(XmlQualifiedName, String)],
    names: &HashMap<NodeId, String>,
) {
    println!();
    println!("{}", "=== Type Dictionary ===".bold());
    println!("  {} {}", "Namespace:".white(), namespace.cyan());
    println!();

    for description in descriptions {
        match description {
            DataTypeDescription::Structure(structure) => {
                println!(
                    "  {} {} {}",
                    "struct".yellow(),
                    structure.xml_name().name.green().bold(),
                    format!("({:?}, {})", structure.structure_type(), structure.type_id()).dimmed()
                );
                for field in structure.fields() {
                    let rank = match field.raw_value_rank() {
                        -1 => String::new(),
                        1 => "[]".to_string(),
                        n => format!("[{}]", ",".repeat((n - 1) as usize)),
                    };
                    let marker = if field.is_optional() { " ?" } else { "" };
                    println!(
                        "      {}: {}{}{}",
                        field.name(),
                        type_name(field.data_type(), names).cyan(),
                        rank,
                        marker.dimmed()
                    );
                }
            }
            DataTypeDescription::Enum(enumeration) => {
                println!(
                    "  {} {} {}",
                    "enum".yellow(),
                    enumeration.xml_name().name.green().bold(),
                    format!("({})", enumeration.type_id()).dimmed()
                );
                for field in enumeration.fields() {
                    println!("      {} = {}", field.name, field.value.to_string().cyan());
                }
            }
        }
        println!();
    }

    for (name, reason) in rejected {
        println!("  {} {}: {}", "rejected".red(), name.name.bold(), reason);
    }

    println!("{}", "--- Summary ---".dimmed());
    println!(
        "  {} types, {} rejected",
        descriptions.len().to_string().green(),
        rejected.len().to_string().red()
    );
    println!();
}

fn print_json(
    namespace: &str,
    descriptions: &[DataTypeDescription],
    rejected: &[(XmlQualifiedName, String)],
) -> Result<(), serde_json::Error> {
    let rejected: Vec<serde_json::Value> = rejected
        .iter()
        .map(|(name, reason)| serde_json::json!({ "name": name.name, "reason": reason }))
        .collect();
    let document = serde_json::json!({
        "namespace": namespace,
        "types": descriptions,
        "rejected": rejected,
    });
    println!("{}", serde_json::to_string_pretty(&document)?);
    Ok(())
}
