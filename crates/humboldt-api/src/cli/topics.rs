//! Topic listing command.

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};

use humboldt_core::topic::keywords_for;
use humboldt_infra::config::KNOWLEDGE_BASE_VARS;
use humboldt_types::topic::TopicBucket;

fn env_var_for(bucket: TopicBucket) -> &'static str {
    KNOWLEDGE_BASE_VARS
        .iter()
        .find(|(b, _)| *b == bucket)
        .map(|(_, var)| *var)
        .unwrap_or("-")
}

/// Print every topic, its slug, knowledge-base variable and keywords.
pub fn list_topics(json: bool) -> Result<()> {
    if json {
        let topics: Vec<serde_json::Value> = TopicBucket::ALL
            .iter()
            .map(|bucket| {
                serde_json::json!({
                    "name": bucket.display_name(),
                    "slug": bucket.slug(),
                    "knowledge_base_env": env_var_for(*bucket),
                    "default": *bucket == TopicBucket::default(),
                    "keywords": keywords_for(*bucket),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&topics)?);
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Topic").fg(Color::White),
        Cell::new("Slug").fg(Color::White),
        Cell::new("Knowledge Base").fg(Color::White),
        Cell::new("Keywords").fg(Color::White),
    ]);

    for bucket in TopicBucket::ALL {
        let name = if bucket == TopicBucket::default() {
            format!("{bucket} (default)")
        } else {
            bucket.to_string()
        };
        let keywords = keywords_for(bucket);

        table.add_row(vec![
            Cell::new(name).fg(Color::Cyan),
            Cell::new(bucket.slug()),
            Cell::new(env_var_for(bucket)).fg(Color::DarkGrey),
            Cell::new(format!("{} ({})", keywords.join(", "), keywords.len())),
        ]);
    }

    println!();
    println!("{table}");
    println!();
    println!(
        "  {}",
        console::style("Questions are routed to the first topic with a matching keyword.").dim()
    );
    println!();

    Ok(())
}
