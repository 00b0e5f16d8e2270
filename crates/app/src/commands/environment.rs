use anyhow::bail;

use crate::cli::{EnvironmentArgs, EnvironmentCommands};
use crate::commands::output::print_json;
use crate::context::CliContext;

pub fn run(ctx: &mut CliContext, args: EnvironmentArgs) -> anyhow::Result<()> {
    match args.command {
        EnvironmentCommands::List => list(ctx),
        EnvironmentCommands::Show { environment_id } => show(ctx, &environment_id),
        EnvironmentCommands::Add { name } => add(ctx, &name),
        EnvironmentCommands::Rename {
            environment_id,
            name,
        } => {
            ctx.session_mut()
                .environments_mut()
                .rename(&environment_id, &name)?;
            println!("Renamed environment: {environment_id}");
            Ok(())
        }
        EnvironmentCommands::Set {
            environment_id,
            key,
            value,
        } => {
            ctx.session_mut()
                .environments_mut()
                .set_variable(&environment_id, &key, &value)?;
            println!("Set {key} in {environment_id}");
            Ok(())
        }
        EnvironmentCommands::Unset {
            environment_id,
            key,
        } => unset(ctx, &environment_id, &key),
        EnvironmentCommands::Delete { environment_id } => {
            ctx.session_mut().delete_environment(&environment_id)?;
            println!("Deleted environment: {environment_id}");
            Ok(())
        }
        EnvironmentCommands::Export { environment_id } => {
            let json = ctx.session().environments().export(&environment_id)?;
            println!("{json}");
            Ok(())
        }
    }
}

fn list(ctx: &CliContext) -> anyhow::Result<()> {
    let session = ctx.session();
    let environments = session.environments().list();
    if environments.is_empty() {
        println!("No environments found");
        return Ok(());
    }

    let active = session.composer().active_environment_id();
    for environment in environments {
        let marker = if active == Some(environment.id.as_str()) { "*" } else { " " };
        println!(
            "{marker} {} - {} ({} variables)",
            environment.id,
            environment.name,
            environment.variables.len()
        );
    }
    Ok(())
}

fn show(ctx: &CliContext, environment_id: &str) -> anyhow::Result<()> {
    let Some(environment) = ctx.session().environments().get(environment_id) else {
        bail!("environment not found: {environment_id}");
    };
    print_json(environment)
}

fn add(ctx: &mut CliContext, name: &str) -> anyhow::Result<()> {
    let environment = ctx.session_mut().environments_mut().create(name)?;
    println!("Created environment: {}", environment.id);
    Ok(())
}

fn unset(ctx: &mut CliContext, environment_id: &str, key: &str) -> anyhow::Result<()> {
    let removed = ctx
        .session_mut()
        .environments_mut()
        .unset_variable(environment_id, key)?;
    if !removed {
        bail!("no variable named {key} in {environment_id}");
    }
    println!("Removed {key} from {environment_id}");
    Ok(())
}
