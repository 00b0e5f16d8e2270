use std::process::ExitCode;

use anyhow::bail;
use courier_domain::HistoryFilter;

use crate::cli::{HistoryArgs, HistoryCommands};
use crate::commands::output::print_json;
use crate::commands::send::send_current;
use crate::context::CliContext;

pub async fn run(ctx: &mut CliContext, args: HistoryArgs) -> anyhow::Result<ExitCode> {
    match args.command {
        HistoryCommands::List {
            search,
            status,
            method,
        } => {
            let filter = HistoryFilter {
                search,
                status: status.status_class(),
                method,
            };
            list(ctx, &filter);
            Ok(ExitCode::SUCCESS)
        }
        HistoryCommands::Methods => {
            for method in ctx.session().history().methods() {
                println!("{method}");
            }
            Ok(ExitCode::SUCCESS)
        }
        HistoryCommands::Show { entry_id } => {
            let Some(entry) = ctx.session().history().get(&entry_id) else {
                bail!("history entry not found: {entry_id}");
            };
            print_json(entry)?;
            Ok(ExitCode::SUCCESS)
        }
        HistoryCommands::Send { entry_id, include } => {
            ctx.session_mut().load_history_entry(&entry_id)?;
            Ok(send_current(ctx, include).await)
        }
        HistoryCommands::Clear => {
            ctx.session_mut().history_mut().clear()?;
            println!("History cleared");
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn list(ctx: &CliContext, filter: &HistoryFilter) {
    let session = ctx.session();
    let now = session.now();
    let entries = session.history().filter(filter);

    if entries.is_empty() {
        println!("No history entries found");
        return;
    }
    for entry in entries {
        let status = entry
            .status()
            .map_or_else(|| "ERR".to_string(), |s| s.to_string());
        println!(
            "{}  {:<7} {:>3}  {:>6}  {:<10} {}",
            entry.id,
            entry.method.as_str(),
            status,
            entry.duration_display(),
            entry.time_ago(now),
            entry.url
        );
    }
}
