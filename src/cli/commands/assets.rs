//! Animation asset check command.

use console::style;

use crate::cli::icons::{error, success};
use crate::config::Settings;
use crate::http_client::AnimationFetcher;
use crate::models::AnimationSlot;

/// Fetch each animation once and print whether the page would show it.
pub async fn cmd_assets(settings: &Settings) -> anyhow::Result<()> {
    let mut builder = AnimationFetcher::builder(settings.request_timeout());
    if let Some(ref ua) = settings.user_agent {
        builder = builder.user_agent(ua);
    }
    let fetcher = builder.build()?;

    let mut missing = 0;
    for slot in AnimationSlot::all() {
        let url = settings.animations.url(*slot);
        match fetcher.try_fetch(url).await {
            Ok(payload) => {
                println!(
                    "{} {:<9} {} {}",
                    success(),
                    slot.as_str(),
                    url,
                    style(format!("({} bytes)", payload.to_json().len())).dim()
                );
            }
            Err(e) => {
                missing += 1;
                println!("{} {:<9} {}", error(), slot.as_str(), url);
                println!("    {}", style(e).dim());
            }
        }
    }

    if missing > 0 {
        println!(
            "\n{} {} of {} animations will show a fallback notice",
            style("!").yellow(),
            missing,
            AnimationSlot::all().len()
        );
    }

    Ok(())
}
