use crate::cli::{Cli, Commands, PopulateArgs};
use anyhow::{Context, Result};
use cascade::{
    Applied, CascadeConfig, ChainedForm, Component, MemoryDom, Outcome, ParentId,
    SelectElement, SelectOption,
};
use std::sync::Arc;

pub async fn run(cli: Cli) -> Result<()> {
    let config = CascadeConfig::load(cli.config.as_deref()).context("failed to load config")?;
    tracing::debug!("using helper endpoints at {}", config.base_url);

    match cli.command {
        Commands::Departments(args) => cmd_populate(&config, Component::Department, args).await?,
        Commands::Designations(args) => cmd_populate(&config, Component::Designation, args).await?,
    }

    Ok(())
}

async fn cmd_populate(config: &CascadeConfig, component: Component, args: PopulateArgs) -> Result<()> {
    let parent = ParentId::from(args.parent_id.as_str());
    if parent.is_blank() {
        tracing::warn!(
            "blank {}; the server answers with an empty list",
            config.endpoint(component).query_param
        );
    }

    let dom = Arc::new(seeded_dom(config, args.selected.as_deref()));
    let form = ChainedForm::connect(config, Arc::clone(&dom))?;

    let outcome = match form.populator(component).populate(parent).await {
        Ok(outcome) => outcome,
        Err(err) if err.is_transport() => {
            return Err(anyhow::Error::new(err).context(format!(
                "{} failed, is {} reachable?",
                component.operation(),
                config.base_url
            )));
        }
        Err(err) => {
            return Err(anyhow::Error::new(err).context(format!("{} failed", component.operation())));
        }
    };

    match outcome {
        Outcome::Applied(applied) => {
            print_applied(config, component, &applied);
            if args.markup {
                print_markup(&dom, config.endpoint(component).control_id.as_str(), &applied);
            }
        }
        Outcome::Superseded { ticket, latest, .. } => {
            println!("request {ticket} superseded by {latest}");
        }
    }

    Ok(())
}

/// Control pre-filled with the value the user had picked, so the run shows
/// whether that value survives the refresh.
fn seeded_dom(config: &CascadeConfig, selected: Option<&str>) -> MemoryDom {
    let dom = MemoryDom::new();
    for component in [Component::Department, Component::Designation] {
        let mut options = vec![SelectOption::placeholder()];
        if let Some(value) = selected.filter(|v| !v.is_empty()) {
            options[0].selected = false;
            options.push(SelectOption::new(value, value).selected(true));
        }
        dom.insert(
            SelectElement::new(config.endpoint(component).control_id.as_str()).with_options(options),
        );
    }
    dom
}

fn print_applied(config: &CascadeConfig, component: Component, applied: &Applied) {
    println!(
        "#{} <- {}={} ({} options)",
        config.endpoint(component).control_id,
        config.endpoint(component).query_param,
        applied.parent,
        applied.options.len() - 1
    );

    for option in &applied.options {
        let marker = if option.selected { "*" } else { " " };
        let value = if option.is_placeholder() {
            "\"\"".to_string()
        } else {
            option.value.clone()
        };
        println!("{} {} -> {}", marker, value, option.label);
    }

    match &applied.reselected {
        Some(value) => println!("kept selection '{value}'"),
        None => println!("selection reset to placeholder"),
    }
}

/// Inserted option markup, then the control as it reads after the selection
/// was restored.
fn print_markup(dom: &MemoryDom, control_id: &str, applied: &Applied) {
    println!("{}", applied.markup);
    if let Some(control) = dom.control(control_id) {
        println!("{}", control.render());
    }
}
