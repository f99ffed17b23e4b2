use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use story_form::config::PublisherConfig;
use story_form::publish::{self, FormsClient, PublishPlan};
use story_form::demo;
use story_form::story::{PageIds, SceneKind, WorldState};

#[derive(Parser)]
#[command(name = "storyform")]
#[command(about = "Compile the bundled branching story into a questionnaire form")]
struct Cli {
    /// Override the form title
    #[arg(short, long, global = true)]
    title: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the page id allocated to every scene
    Ids,
    /// Print the publish requests as JSON without contacting the service
    Plan,
    /// Publish the form and print its id
    Publish {
        /// Base URL of the form service
        #[arg(long)]
        api_url: Option<String>,
    },
}

/// Initialize tracing with output to stderr (for plan/ids output) or stdout
fn init_tracing(use_stderr: bool) {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "story_form=info".into()),
    );

    if use_stderr {
        // Plan output is JSON on stdout, keep logs out of it
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

fn render_ids<W: WorldState>(ids: &PageIds<W>) -> String {
    let mut output = String::new();
    for range in ids.ranges() {
        let kind = match range.kind {
            SceneKind::Single => "single",
            SceneKind::PerState => "per-state",
        };
        let last = range.base.as_u32() + range.span.saturating_sub(1);
        output.push_str(&format!(
            "{:>5}..={:<5} {:<9} {}\n",
            range.base.as_u32(),
            last,
            kind,
            range.scene
        ));
    }
    output
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let use_stderr = !matches!(cli.command, Commands::Publish { .. });
    init_tracing(use_stderr);

    let mut story = demo::story()?;
    if let Some(title) = cli.title {
        story.set_title(title);
    }

    match cli.command {
        Commands::Ids => {
            print!("{}", render_ids(story.ids()));
            println!("start: {}", story.start());
        }
        Commands::Plan => {
            let assembled = story.assemble()?;
            let plan = PublishPlan::new(&assembled);
            println!("{}", serde_json::to_string_pretty(&plan)?);
        }
        Commands::Publish { api_url } => {
            let assembled = story.assemble()?;

            let mut config = PublisherConfig::from_env()?;
            if let Some(url) = api_url {
                config = config.with_api_url(url);
            }
            let client = FormsClient::from_config(&config);

            tracing::info!("Publishing \"{}\" to {}", story.title(), config.api_url);
            let form_id = publish::publish(&client, &assembled).await?;
            println!("form_id: {}", form_id);
        }
    }

    Ok(())
}
