use clap::Subcommand;
use color_eyre::eyre::bail;
use constellation_content::{
    ContentClient, ContentClientExt, ContentFeed, ContentNode, DEFAULT_PAGE_SIZE, Edge,
    sortable_list_setting,
};
use serde::Serialize;
use tracing::info;

use crate::{
    render::{CommandOutput, CommandResult},
    state::CliState,
};

#[derive(Subcommand, Clone)]
pub enum NodesCommands {
    #[command(long_about = "Load content nodes and print them in the saved order.")]
    List {
        #[arg(long, help = "Keep loading until the server has no further page.")]
        all: bool,

        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE, help = "Nodes requested per page.")]
        page_size: u32,
    },

    #[command(long_about = "Move the node at one position to another and save the new order.")]
    Move {
        #[arg(help = "Current position, starting at 0.")]
        from: usize,
        #[arg(help = "New position. Positions past the end move the node to the end.")]
        to: usize,
    },

    #[command(long_about = "Forget the saved node order.")]
    Reset,
}

impl NodesCommands {
    pub async fn run(self, state: &CliState) -> CommandResult {
        match self {
            NodesCommands::List { all, page_size } => {
                let mut feed = feed(state).with_page_size(page_size);
                feed.restore().await?;

                if all {
                    let loaded = feed.load_all().await?;
                    info!(loaded, "Loaded all content nodes");
                } else {
                    feed.load_more().await?;
                }

                Ok(rows(feed.items()))
            }
            NodesCommands::Move { from, to } => {
                let mut feed = feed(state);
                if feed.restore().await? == 0 {
                    bail!("No saved node order, run `cadmin nodes list` first");
                }

                feed.move_item(from, to).await?;
                Ok(rows(feed.items()))
            }
            NodesCommands::Reset => {
                sortable_list_setting(state.settings()).delete().await?;
                Ok("Saved node order removed".into())
            }
        }
    }
}

fn feed(state: &CliState) -> ContentFeed<ContentClient> {
    state
        .client()
        .content()
        .feed()
        .with_persistence(sortable_list_setting(state.settings()))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NodeRow {
    position: usize,
    id: String,
    title: Option<String>,
}

fn rows(items: &[Edge<ContentNode>]) -> CommandOutput {
    let rows: Vec<NodeRow> = items
        .iter()
        .enumerate()
        .map(|(position, edge)| NodeRow {
            position,
            id: edge.node.id.clone(),
            title: edge.node.title().map(str::to_owned),
        })
        .collect();

    CommandOutput::Object(Box::new(rows))
}
