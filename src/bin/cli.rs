use colored::*;
use pulse8k::{eval, llm::OpenAiClient, Config};
use std::fs;
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(StructOpt, Debug)]
#[structopt(name = "pulse8k", about = "Analyze a company's latest SEC 8-K filing with an LLM")]
struct Opt {
    /// Company name or ticker symbol (e.g. "Apple" or AAPL)
    company: String,

    /// Write the JSON result to this file instead of stdout
    #[structopt(short, long, parse(from_os_str))]
    output: Option<PathBuf>,

    /// Emit compact JSON instead of pretty-printed
    #[structopt(long)]
    compact: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let opt = Opt::from_args();
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", format!("Error: {}", e).red());
            std::process::exit(1);
        }
    };

    let llm = OpenAiClient::from_config(&config);

    match eval::run(&opt.company, &config, &llm).await {
        Ok(result) => {
            let json = if opt.compact {
                serde_json::to_string(&result)?
            } else {
                serde_json::to_string_pretty(&result)?
            };
            match &opt.output {
                Some(path) => {
                    fs::write(path, &json)?;
                    eprintln!(
                        "{} {}",
                        "Wrote analysis to".green(),
                        path.display().to_string().bold()
                    );
                }
                None => println!("{}", json),
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("{}", format!("Error: {}", e).red());
            std::process::exit(1);
        }
    }
}
