//! Converge packages to a desired state and report a single changed/msg
//! result, the contract automation callers consume.

use anyhow::Result;
use serde::Serialize;

use crate::Context;
use crate::cli::ApplyArgs;
use crate::commands::{create_client, fail};
use crate::ui;
use eopkgkit::{Outcome, PackageRequest};

/// The structured per-invocation result.
#[derive(Debug, Serialize)]
struct Report {
    changed: bool,
    msg: String,
}

impl From<&Outcome> for Report {
    fn from(outcome: &Outcome) -> Self {
        Self {
            changed: outcome.changed(),
            msg: outcome.summary(),
        }
    }
}

pub fn run(ctx: &Context, args: ApplyArgs) -> Result<()> {
    let state = args.state.into();
    let request = match PackageRequest::new(args.name, state) {
        Ok(r) => r.with_upgrade_all(args.upgrade_all),
        Err(e) => fail(args.json, &e.to_string()),
    };

    let client = match create_client(args.eopkg_bin) {
        Ok(c) => c,
        Err(msg) => fail(args.json, &msg),
    };

    let outcome = match client.reconcile(&request) {
        Ok(o) => o,
        Err(e) => fail(args.json, &e.to_string()),
    };

    let report = Report::from(&outcome);
    if args.json {
        println!("{}", serde_json::to_string(&report)?);
    } else if report.changed {
        ui::success(&report.msg);
    } else if !ctx.quiet {
        ui::info(&report.msg);
    }

    if !args.json && ctx.verbose > 0 {
        ui::dim(&format!(
            "{} changed, {} already in desired state",
            outcome.changed_count, outcome.already_count
        ));
    }

    Ok(())
}
