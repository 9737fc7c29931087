//! Insightly API CLI binary.
//!
//! A command-line interface for interacting with the Insightly API.

use clap::Parser;
use insightly::cli::{Cli, Command, Entity};
use insightly::{
    CollectionFilter, Contact, Delete, Get, InsightlyClient, InsightlyError, Instance, Link,
    Links, List, Opportunity, PipelineStage, PrettyPrint, TeamMember, Update,
};
use serde::Serialize;
use std::process::ExitCode;
use tabled::{Table, Tabled};
use tracing::Level;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .init();

    let client = match InsightlyClient::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Hint: Set INSIGHTLY_API_KEY environment variable");
            return ExitCode::FAILURE;
        }
    };

    match run(&client, cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(client: &InsightlyClient, cli: Cli) -> insightly::Result<()> {
    let filter = cli.command.filter()?;
    match cli.command {
        Command::Get { entity, id } => handle_get(client, entity, id, cli.json).await,
        Command::List { entity, .. } => handle_list(client, entity, &filter, cli.json).await,
        Command::Update {
            entity,
            id,
            name,
            state,
        } => handle_update(client, entity, id, name, state, cli.json).await,
        Command::Delete { entity, id } => handle_delete(client, entity, id).await,
        Command::Links { entity, id } => handle_links(client, entity, id, cli.json).await,
    }
}

fn require_id(entity: Entity, id: Option<u64>) -> insightly::Result<u64> {
    id.ok_or_else(|| InsightlyError::InvalidArgument(format!("an ID is required to get a {entity:?}")))
}

async fn handle_get(
    client: &InsightlyClient,
    entity: Entity,
    id: Option<u64>,
    json: bool,
) -> insightly::Result<()> {
    match entity {
        Entity::Opportunity => {
            let opportunity = Opportunity::get(client, require_id(entity, id)?).await?;
            output_single(&opportunity, json)?;
        }
        Entity::Contact => {
            let contact = Contact::get(client, require_id(entity, id)?).await?;
            output_single(&contact, json)?;
        }
        Entity::PipelineStage => {
            let stage = PipelineStage::get(client, require_id(entity, id)?).await?;
            output_single(&stage, json)?;
        }
        Entity::TeamMember => {
            let member = TeamMember::get(client, require_id(entity, id)?).await?;
            output_single(&member, json)?;
        }
        Entity::Instance => {
            let instance = Instance::get(client).await?;
            output_single(&instance, json)?;
        }
    }
    Ok(())
}

async fn handle_list(
    client: &InsightlyClient,
    entity: Entity,
    filter: &CollectionFilter,
    json: bool,
) -> insightly::Result<()> {
    match entity {
        Entity::Opportunity => {
            let items = Opportunity::list_all(client, filter).await?;
            output_list(&items, json, |x| OpportunityRow::from(x))?;
        }
        Entity::Contact => {
            let items = Contact::list_all(client, filter).await?;
            output_list(&items, json, |x| ContactRow::from(x))?;
        }
        Entity::PipelineStage => {
            let items = PipelineStage::list_all(client, filter).await?;
            output_list(&items, json, |x| PipelineStageRow::from(x))?;
        }
        Entity::TeamMember => {
            let items = TeamMember::list_all(client, filter).await?;
            output_list(&items, json, |x| TeamMemberRow::from(x))?;
        }
        Entity::Instance => {
            eprintln!("Error: There is only one instance");
            eprintln!("Hint: Use 'insightly get instance'");
            return Err(InsightlyError::InvalidArgument(
                "instance cannot be listed".to_string(),
            ));
        }
    }
    Ok(())
}

async fn handle_update(
    client: &InsightlyClient,
    entity: Entity,
    id: u64,
    name: Option<String>,
    state: Option<String>,
    json: bool,
) -> insightly::Result<()> {
    match entity {
        Entity::Opportunity => {
            let mut opportunity = Opportunity::get(client, id).await?;
            if let Some(name) = name {
                opportunity.opportunity_name = name;
            }
            if let Some(state) = state {
                opportunity.opportunity_state = Some(state.to_uppercase());
            }
            if let Some(updated) = Opportunity::update(client, Some(&opportunity)).await? {
                output_single(&updated, json)?;
            }
        }
        _ => {
            eprintln!("Error: Only opportunities can be updated via CLI");
            return Err(InsightlyError::InvalidArgument(
                "only opportunities support update".to_string(),
            ));
        }
    }
    Ok(())
}

async fn handle_delete(client: &InsightlyClient, entity: Entity, id: u64) -> insightly::Result<()> {
    match entity {
        Entity::Opportunity => Opportunity::delete(client, id).await?,
        Entity::Contact => Contact::delete(client, id).await?,
        Entity::TeamMember => TeamMember::delete(client, id).await?,
        Entity::PipelineStage | Entity::Instance => {
            return Err(InsightlyError::InvalidArgument(format!(
                "{entity:?} cannot be deleted"
            )));
        }
    }
    eprintln!("Deleted {entity:?} {id}");
    Ok(())
}

async fn handle_links(
    client: &InsightlyClient,
    entity: Entity,
    id: u64,
    json: bool,
) -> insightly::Result<()> {
    let links = match entity {
        Entity::Opportunity => Opportunity::links(client, id).await?,
        Entity::Contact => Contact::links(client, id).await?,
        _ => {
            return Err(InsightlyError::InvalidArgument(format!(
                "{entity:?} has no links"
            )));
        }
    };
    output_list(&links, json, |l| LinkRow::from(l))
}

fn output_single<T: Serialize + PrettyPrint>(item: &T, json: bool) -> insightly::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(item)?);
    } else {
        println!("{}", item.pretty_print());
    }
    Ok(())
}

fn output_list<T, R, F>(items: &[T], json: bool, to_row: F) -> insightly::Result<()>
where
    T: Serialize,
    R: Tabled,
    F: Fn(&T) -> R,
{
    if json {
        println!("{}", serde_json::to_string_pretty(items)?);
    } else {
        let rows: Vec<R> = items.iter().map(to_row).collect();
        println!("{}", Table::new(rows));
        println!("\n{} records", items.len());
    }
    Ok(())
}

// Table row types for non-JSON output

#[derive(Tabled)]
struct OpportunityRow {
    id: u64,
    name: String,
    state: String,
    value: String,
}

impl From<&Opportunity> for OpportunityRow {
    fn from(o: &Opportunity) -> Self {
        Self {
            id: o.opportunity_id,
            name: o.opportunity_name.clone(),
            state: o.opportunity_state.clone().unwrap_or_default(),
            value: o
                .opportunity_value
                .map(|v| format!("{v:.2}"))
                .unwrap_or_default(),
        }
    }
}

#[derive(Tabled)]
struct ContactRow {
    id: u64,
    name: String,
    email: String,
}

impl From<&Contact> for ContactRow {
    fn from(c: &Contact) -> Self {
        Self {
            id: c.contact_id,
            name: c.full_name(),
            email: c.email_address.clone().unwrap_or_default(),
        }
    }
}

#[derive(Tabled)]
struct PipelineStageRow {
    id: u64,
    pipeline: u64,
    order: u32,
    name: String,
}

impl From<&PipelineStage> for PipelineStageRow {
    fn from(s: &PipelineStage) -> Self {
        Self {
            id: s.stage_id,
            pipeline: s.pipeline_id,
            order: s.stage_order,
            name: s.stage_name.clone(),
        }
    }
}

#[derive(Tabled)]
struct TeamMemberRow {
    id: u64,
    team: u64,
    user: u64,
}

impl From<&TeamMember> for TeamMemberRow {
    fn from(m: &TeamMember) -> Self {
        Self {
            id: m.permission_id,
            team: m.team_id,
            user: m.member_user_id,
        }
    }
}

#[derive(Tabled)]
struct LinkRow {
    id: u64,
    #[tabled(rename = "link")]
    summary: String,
}

impl From<&Link> for LinkRow {
    fn from(l: &Link) -> Self {
        Self {
            id: l.link_id,
            summary: l.pretty_print(),
        }
    }
}
