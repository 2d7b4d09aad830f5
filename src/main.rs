use anyhow::{bail, Context};
use bluekai::core::types::ResponseBody;
use bluekai::{ApiResponse, BlueKai, BlueKaiConfig, RuleFilters};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: bluekai <list-categories PARTNER_ID VIEW | read-category ID | list-rules [KEY=VALUE]... | read-rule ID>";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Reads BLUEKAI_USER_KEY / BLUEKAI_PRIVATE_KEY, from .env if present
    let config = BlueKaiConfig::from_env_file("bluekai").context("loading credentials")?;
    let client = BlueKai::from_config(config)?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let response = match args.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
        ["list-categories", partner_id, view] => {
            client.categories.list_categories(partner_id, view).await?
        }
        ["read-category", id] => client.categories.read_category(id).await?,
        ["list-rules", filters @ ..] => {
            let mut rule_filters = RuleFilters::new();
            for filter in filters {
                let Some((key, value)) = filter.split_once('=') else {
                    bail!("filter '{}' is not KEY=VALUE\n{}", filter, USAGE);
                };
                rule_filters = rule_filters.filter(key, value);
            }
            client.rules.list_rules(rule_filters).await?
        }
        ["read-rule", id] => client.rules.read_rule(id).await?,
        _ => bail!(USAGE),
    };

    print_response(&response)?;
    Ok(())
}

fn print_response(response: &ApiResponse) -> anyhow::Result<()> {
    println!("HTTP {}", response.status);
    match &response.body {
        ResponseBody::Json(value) => println!("{}", serde_json::to_string_pretty(value)?),
        ResponseBody::Raw(bytes) => println!("{}", String::from_utf8_lossy(bytes)),
    }
    Ok(())
}
