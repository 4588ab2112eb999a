//! Check command handler.

use std::fmt::Write as _;

use color_eyre::Result;

use crate::config::Config;
use crate::context::Context;
use crate::di::FromRef;
use crate::models::{AntipatternCheck, Direction, EntityId, HypotheticalStatement};
use crate::repositories::LabelRepository;
use crate::services::AntipatternService;

use super::{App, CheckArgs};

impl App {
    /// Run the check command against the configured endpoint.
    pub async fn run_check(&self, args: &CheckArgs) -> Result<()> {
        let config = Config::load()?;
        let focal = EntityId::normalize(&args.entity)?;
        let hypothesis = HypotheticalStatement::from_parts(
            args.relation.as_deref(),
            args.object.as_deref(),
            &config.vocabulary,
        )?;

        let ctx = Context::from_config(config)?;
        let service = AntipatternService::from_ref(&ctx);

        let mut check = service
            .check(&focal, hypothesis.as_ref(), args.direction)
            .await
            .inspect_err(|e| tracing::error!(error = %e, focal = %focal, "AP1 check failed"))?;

        if args.labels {
            let items: Vec<Option<EntityId>> =
                check.mentioned_entities().into_iter().map(Some).collect();
            check.labels = LabelRepository::from_ref(&ctx)
                .labels(&items)
                .await?
                .into_iter()
                .collect();
        }

        if args.json {
            println!("{}", serde_json::to_string_pretty(&check)?);
        } else {
            print!("{}", render_text(&check));
        }
        Ok(())
    }
}

/// Human-readable summary of a check.
fn render_text(check: &AntipatternCheck) -> String {
    let focal = check.display(&check.focal);
    let mut out = String::new();

    if let Some(hypothesis) = &check.hypothesis {
        let _ = writeln!(
            out,
            "New statement: {} {} {}",
            focal,
            hypothesis.relation,
            check.display(&hypothesis.object)
        );
    }

    for set in &check.violations {
        let side = match set.direction {
            Direction::Up => "as a subclass",
            Direction::Down => "through its subclasses",
        };

        if set.is_violated() {
            let _ = writeln!(
                out,
                "{} is involved in AP1 {} with {}.",
                focal,
                side,
                join(check, &set.existent)
            );
        } else {
            let _ = writeln!(out, "{} is not involved in AP1 {}.", focal, side);
        }

        if set.would_be_violated() {
            let _ = writeln!(
                out,
                "{} would be involved in AP1 {} with {} regarding the new statement.",
                focal,
                side,
                join(check, &set.hypothetical)
            );
        } else if check.hypothesis.is_some() {
            let _ = writeln!(
                out,
                "{} would not be involved in AP1 {} regarding the new statement.",
                focal, side
            );
        }
    }
    out
}

fn join(check: &AntipatternCheck, ids: &[EntityId]) -> String {
    ids.iter()
        .map(|id| check.display(id))
        .collect::<Vec<_>>()
        .join(", ")
}
