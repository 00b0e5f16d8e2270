use std::process::ExitCode;

use anyhow::bail;

use crate::cli::{TemplateArgs, TemplateCommands};
use crate::commands::output::print_json;
use crate::commands::send::send_current;
use crate::context::CliContext;

pub async fn run(ctx: &mut CliContext, args: TemplateArgs) -> anyhow::Result<ExitCode> {
    match args.command {
        TemplateCommands::List { search } => list(ctx, search.as_deref()),
        TemplateCommands::Save { name, request } => {
            let session = ctx.session_mut();
            request.apply(session.composer_mut());
            let template = session.save_current_as_template(&name)?;
            println!("Saved template: {}", template.id);
            Ok(ExitCode::SUCCESS)
        }
        TemplateCommands::Show { template_id } => {
            let Some(template) = ctx.session().templates().get(&template_id) else {
                bail!("template not found: {template_id}");
            };
            print_json(template)?;
            Ok(ExitCode::SUCCESS)
        }
        TemplateCommands::Send {
            template_id,
            include,
        } => {
            ctx.session_mut().load_template(&template_id)?;
            Ok(send_current(ctx, include).await)
        }
        TemplateCommands::Delete { template_id } => {
            ctx.session_mut().templates_mut().delete(&template_id)?;
            println!("Deleted template: {template_id}");
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn list(ctx: &CliContext, search: Option<&str>) -> anyhow::Result<ExitCode> {
    let library = ctx.session().templates();
    let templates = match search {
        Some(query) => library.search(query),
        None => library.list().iter().collect(),
    };

    if templates.is_empty() {
        println!("No templates found");
    }
    for template in templates {
        println!(
            "{} - {} [{} {}]",
            template.id, template.name, template.method, template.url
        );
    }
    Ok(ExitCode::SUCCESS)
}
