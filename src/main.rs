mod output;
mod parser;
mod session;

use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use tracing::info;

use output::Report;
use session::{Loader, Session};

const CARTOON_URL: &str = "https://ekantipur.com/cartoon";
const ENTERTAINMENT_URL: &str = "https://ekantipur.com/entertainment";
const OUTPUT_PATH: &str = "output.json";

#[derive(Parser)]
#[command(
    name = "ekantipur_scraper",
    about = "Scrape ekantipur's cartoon of the day and top entertainment stories to JSON"
)]
struct Cli {
    /// Cartoon page [default: https://ekantipur.com/cartoon]
    #[arg(long, env = "EKANTIPUR_CARTOON_URL", default_value = CARTOON_URL, hide_default_value = true)]
    cartoon_url: String,
    /// Entertainment listing page [default: https://ekantipur.com/entertainment]
    #[arg(long, env = "EKANTIPUR_ENTERTAINMENT_URL", default_value = ENTERTAINMENT_URL, hide_default_value = true)]
    entertainment_url: String,
    /// Output file, overwritten on every run [default: output.json]
    #[arg(short, long, env = "EKANTIPUR_OUTPUT", default_value = OUTPUT_PATH, hide_default_value = true)]
    output: PathBuf,
    /// Category for articles that carry no category link [default: empty]
    #[arg(long)]
    fallback_category: Option<String>,
    /// How pages are loaded [default: http]
    #[arg(long, value_enum, default_value_t = Loader::Http, hide_default_value = true)]
    loader: Loader,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let report = {
        let session = Session::open(cli.loader).await?;

        let page = session.load(&cli.cartoon_url).await?;
        let cartoon = parser::process_cartoon(&page)?;

        let page = session.load(&cli.entertainment_url).await?;
        let entertainment_articles =
            parser::process_entertainment(&page, cli.fallback_category.as_deref())?;

        session.close().await?;
        Report {
            cartoon,
            entertainment_articles,
        }
    };

    log_summary(&report);
    let json = output::write_report(&cli.output, &report)?;
    info!("Wrote {}", cli.output.display());
    println!("{}", json);

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        info!("Done in {}", format_duration(elapsed));
    }
    Ok(())
}

fn log_summary(report: &Report) {
    let c = &report.cartoon;
    info!(
        "Cartoon: title={:?} image_url={:?} cartoonist={:?}",
        c.title, c.image_url, c.cartoonist
    );
    info!("{} entertainment articles", report.entertainment_articles.len());
    for (i, a) in report.entertainment_articles.iter().enumerate() {
        info!(
            "{}. title={:?} image_url={:?} category={:?} author={:?}",
            i + 1,
            a.title,
            a.image_url,
            a.category,
            a.author
        );
    }
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else {
        format!("{}m {}s", secs / 60, secs % 60)
    }
}
