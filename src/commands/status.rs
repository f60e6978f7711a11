//! Read-only presence report for a list of packages. Never mutates anything.

use anyhow::Result;
use colored::Colorize;
use serde_json::json;

use crate::Context;
use crate::cli::StatusArgs;
use crate::commands::{create_client, fail};
use crate::ui;

pub fn run(ctx: &Context, args: StatusArgs) -> Result<()> {
    let client = match create_client(args.eopkg_bin) {
        Ok(c) => c,
        Err(msg) => fail(args.json, &msg),
    };

    let mut states = Vec::with_capacity(args.name.len());
    for name in &args.name {
        let installed = match client.is_installed(name) {
            Ok(v) => v,
            Err(e) => fail(args.json, &e.to_string()),
        };
        states.push((name.as_str(), installed));
    }

    if args.json {
        let map: serde_json::Map<String, serde_json::Value> = states
            .iter()
            .map(|(name, installed)| ((*name).to_string(), json!(installed)))
            .collect();
        println!("{}", serde_json::Value::Object(map));
        return Ok(());
    }

    for (name, installed) in &states {
        if *installed {
            println!("{} {}", "✓".green(), name);
        } else {
            println!("{} {}", "○".dimmed(), name.dimmed());
        }
    }

    if !ctx.quiet {
        let installed = states.iter().filter(|(_, i)| *i).count();
        ui::dim(&format!("{} of {} installed", installed, states.len()));
    }

    Ok(())
}
