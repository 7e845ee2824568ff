use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

const USER_AGENT: &str = concat!("ekantipur_scraper/", env!("CARGO_PKG_VERSION"));
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// A loaded page: final URL after redirects plus the document markup.
pub struct Page {
    pub url: String,
    pub html: String,
}

/// How pages are loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Loader {
    /// Plain HTTP GET of the served markup
    #[default]
    Http,
    /// Headless Chromium; markup after scripts have run (needs the `browser` feature)
    Browser,
}

enum Backend {
    Http(reqwest::Client),
    #[cfg(feature = "browser")]
    Browser(browser::Rendered),
}

/// Page-loading session. Acquired once at the start of a run and dropped at the end.
pub struct Session {
    backend: Backend,
}

impl Session {
    pub async fn open(loader: Loader) -> Result<Self> {
        let backend = match loader {
            Loader::Http => Backend::Http(
                reqwest::Client::builder()
                    .user_agent(USER_AGENT)
                    .connect_timeout(CONNECT_TIMEOUT)
                    .timeout(REQUEST_TIMEOUT)
                    .build()
                    .context("Failed to build HTTP client")?,
            ),
            #[cfg(feature = "browser")]
            Loader::Browser => Backend::Browser(browser::Rendered::launch().await?),
            #[cfg(not(feature = "browser"))]
            Loader::Browser => anyhow::bail!("Built without the `browser` feature"),
        };
        Ok(Self { backend })
    }

    /// Navigate to `url` and wait for the full document.
    pub async fn load(&self, url: &str) -> Result<Page> {
        let pb = ProgressBar::new_spinner();
        pb.set_style(ProgressStyle::default_spinner().template("{spinner} {msg} [{elapsed}]")?);
        pb.set_message(format!("Loading {}", url));
        pb.enable_steady_tick(Duration::from_millis(120));

        let start = Instant::now();
        let page = match &self.backend {
            Backend::Http(client) => load_http(client, url).await?,
            #[cfg(feature = "browser")]
            Backend::Browser(rendered) => rendered.load(url).await?,
        };
        pb.finish_and_clear();

        info!(
            "Loaded {} ({} bytes) in {}ms",
            page.url,
            page.html.len(),
            start.elapsed().as_millis()
        );
        Ok(page)
    }

    /// Release the session. Dropping it also releases everything, less gracefully.
    pub async fn close(self) -> Result<()> {
        match self.backend {
            Backend::Http(_) => Ok(()),
            #[cfg(feature = "browser")]
            Backend::Browser(rendered) => rendered.close().await,
        }
    }
}

async fn load_http(client: &reqwest::Client, url: &str) -> Result<Page> {
    let response = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("Failed to load {}", url))?
        .error_for_status()
        .with_context(|| format!("{} returned an error status", url))?;

    let final_url = response.url().to_string();
    let html = response
        .text()
        .await
        .with_context(|| format!("Failed to read body of {}", url))?;
    Ok(Page {
        url: final_url,
        html,
    })
}

#[cfg(feature = "browser")]
mod browser {
    use anyhow::{Context, Result};
    use chromiumoxide::{Browser, BrowserConfig};
    use futures::StreamExt;
    use tokio::task::JoinHandle;
    use tracing::debug;

    use super::Page;

    pub struct Rendered {
        browser: Browser,
        handler: JoinHandle<()>,
    }

    impl Rendered {
        pub async fn launch() -> Result<Self> {
            let config = BrowserConfig::builder()
                .no_sandbox()
                .build()
                .map_err(anyhow::Error::msg)
                .context("Browser config error")?;
            let (browser, mut handler) = Browser::launch(config)
                .await
                .context("Failed to launch browser")?;
            let handler = tokio::spawn(async move { while handler.next().await.is_some() {} });
            debug!("browser launched");
            Ok(Self { browser, handler })
        }

        pub async fn load(&self, url: &str) -> Result<Page> {
            let page = self
                .browser
                .new_page(url)
                .await
                .with_context(|| format!("Failed to load {}", url))?;
            page.wait_for_navigation()
                .await
                .with_context(|| format!("Navigation to {} did not finish", url))?;
            let html = page
                .content()
                .await
                .with_context(|| format!("Failed to read content of {}", url))?;
            let final_url = page.url().await?.unwrap_or_else(|| url.to_string());
            page.close().await?;
            Ok(Page {
                url: final_url,
                html,
            })
        }

        pub async fn close(mut self) -> Result<()> {
            self.browser.close().await.context("Failed to close browser")?;
            self.browser.wait().await?;
            self.handler.abort();
            Ok(())
        }
    }

    impl Drop for Rendered {
        fn drop(&mut self) {
            self.handler.abort();
        }
    }
}
