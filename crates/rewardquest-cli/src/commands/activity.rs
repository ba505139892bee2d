use clap::Args;
use rewardquest_core::ui::ActivitySlot;
use rewardquest_core::{ActivityClient, Category, Config, UiState};
use serde_json::json;

#[derive(Args)]
pub struct ActivityArgs {
    /// Activity type (e.g. "education", "diy"); "random" for any
    #[arg(long, short)]
    pub category: Option<String>,
    /// Print the reward as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: ActivityArgs, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let client = ActivityClient::from_config(&config.activity);
    let category = Category::parse(
        args.category
            .as_deref()
            .unwrap_or(&config.activity.default_category),
    );

    let mut ui = UiState::default();
    ui.begin_fetch(&category);
    ui.finish_fetch(client.fetch_reward(&category).await);

    match (&ui.reward, &ui.activity) {
        (Some(reward), _) => {
            if args.json {
                let out = json!({ "category": category.tag(), "reward": reward });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                println!("{}", reward.text());
            }
            Ok(())
        }
        (None, ActivitySlot::Message(message)) => Err(message.clone().into()),
        (None, _) => Err("no activity".into()),
    }
}
