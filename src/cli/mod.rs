//! CLI argument parsing types.
//!
//! This module provides the command-line interface structure for the insightly binary.

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};

use crate::error::Result;
use crate::query::CollectionFilter;

/// Insightly API command-line interface.
#[derive(Parser, Debug)]
#[command(name = "insightly", about = "Insightly CRM API CLI", version)]
pub struct Cli {
    /// Output results as JSON instead of a table.
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    /// Log requests and pagination progress to stderr.
    #[arg(long, short, global = true, default_value = "false")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Get a single entity by ID.
    Get {
        /// The type of entity to get.
        entity: Entity,

        /// The record ID (not used for the instance).
        id: Option<u64>,
    },

    /// List every entity, optionally filtered.
    List {
        /// The type of entity to list.
        entity: Entity,

        /// Only records updated after this RFC 3339 timestamp.
        #[arg(long)]
        updated_after: Option<DateTime<Utc>>,

        /// Field to filter on (requires --field-value).
        #[arg(long, requires = "field_value")]
        field_name: Option<String>,

        /// Value the field must equal.
        #[arg(long, requires = "field_name")]
        field_value: Option<String>,
    },

    /// Update an entity.
    Update {
        /// The type of entity to update.
        entity: Entity,

        /// The ID of the entity to update.
        id: u64,

        /// New name for the entity.
        #[arg(long)]
        name: Option<String>,

        /// New state (OPEN, WON, LOST, SUSPENDED, ABANDONED).
        #[arg(long)]
        state: Option<String>,
    },

    /// Delete an entity.
    Delete {
        /// The type of entity to delete.
        entity: Entity,

        /// The ID of the entity to delete.
        id: u64,
    },

    /// List the links of an entity.
    Links {
        /// The type of entity.
        entity: Entity,

        /// The ID of the entity.
        id: u64,
    },
}

impl Command {
    /// The collection filter described by `list` arguments.
    ///
    /// # Errors
    ///
    /// Returns [`InsightlyError::InvalidArgument`](crate::InsightlyError::InvalidArgument)
    /// when only one of `--field-name` and `--field-value` is set.
    pub fn filter(&self) -> Result<CollectionFilter> {
        match self {
            Command::List {
                updated_after,
                field_name,
                field_value,
                ..
            } => CollectionFilter::from_parts(
                *updated_after,
                field_name.clone(),
                field_value.clone(),
            ),
            _ => Ok(CollectionFilter::default()),
        }
    }
}

/// Entity types that can be operated on.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Entity {
    /// A sales opportunity.
    #[value(alias = "opportunities")]
    Opportunity,
    /// A person.
    #[value(alias = "contacts")]
    Contact,
    /// A pipeline stage.
    #[value(alias = "pipeline-stages")]
    PipelineStage,
    /// A team membership.
    #[value(alias = "team-members")]
    TeamMember,
    /// The Insightly instance.
    Instance,
}
