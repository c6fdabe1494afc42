use anyhow::{anyhow, Result};
use serde_json::Value;

use portfolio_site::api::{PortfolioApi, Section};
use portfolio_site::config::Config;
use portfolio_site::loader::PortfolioLoader;
use portfolio_site::logging::{log, obj, v_str, Domain, Level};
use portfolio_site::section::SectionAccessor;
use portfolio_site::views::render_page;

const USAGE: &str = "usage: portfolio [page|json|section <name>]";

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let cfg = Config::from_env()?;
    log(
        Level::Info,
        Domain::System,
        "startup",
        obj(&[
            ("backend_url", v_str(&cfg.backend_url)),
            ("api_base", v_str(&cfg.api_base())),
        ]),
    );
    let api = PortfolioApi::new(&cfg)?;

    match args.first().map(String::as_str).unwrap_or("page") {
        "page" => {
            let loader = PortfolioLoader::new(api);
            let data = loader.load().await;
            println!("{}", render_page(&data));
        }
        "json" => {
            let loader = PortfolioLoader::new(api);
            let data = loader.load().await;
            println!("{}", serde_json::to_string_pretty(&*data)?);
        }
        "section" => {
            let name = args.get(1).ok_or_else(|| anyhow!(USAGE))?;
            let section: Section = name.parse()?;
            let mut accessor = SectionAccessor::new(api, section);
            let items = accessor.load_data().await?;
            println!("{}", serde_json::to_string_pretty(&Value::Array(items.to_vec()))?);
        }
        other => return Err(anyhow!("unknown command {:?}; {}", other, USAGE)),
    }
    Ok(())
}
