//! `summarize` -- submit a document to a summarizer server and print the
//! summary once the job completes.
//!
//! ```text
//! summarize <path-or-text>
//! ```
//!
//! # Environment variables
//!
//! | Variable               | Default                 | Description                      |
//! |------------------------|-------------------------|----------------------------------|
//! | `SUMMARIZER_URL`       | `http://127.0.0.1:5000` | Server base URL                  |
//! | `POLL_INTERVAL_MS`     | `500`                   | Delay between progress polls     |
//! | `REQUEST_TIMEOUT_SECS` | `30`                    | Per-request HTTP timeout         |
//! | `MAX_WAIT_SECS`        | unset                   | Give up after this many seconds  |

use std::path::Path;

use anyhow::{bail, Context};
use summarizer_client::backend::HttpBackend;
use summarizer_client::config::ClientConfig;
use summarizer_client::controller::{Controller, Phase};
use summarizer_client::form::FormData;
use summarizer_client::page::{Page, PageElements};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "summarizer_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let Some(input) = std::env::args().nth(1) else {
        bail!("usage: summarize <path-or-text>");
    };

    let config = ClientConfig::from_env();
    tracing::info!(url = %config.base_url, "Using summarizer server");

    let form = build_form(&input)?;
    let backend = HttpBackend::new(config.base_url.clone(), config.request_timeout)?;

    let elements = PageElements::default();
    let page = Page::with_elements(&elements);
    let controller = Controller::new(backend, page, elements.clone(), &config)?;

    let submit = controller.submit(form);
    tokio::pin!(submit);

    tokio::select! {
        result = &mut submit => { result?; }
        _ = tokio::signal::ctrl_c() => {
            controller.cancel().await;
            bail!("interrupted");
        }
    }

    let phase = tokio::select! {
        phase = controller.wait() => phase,
        _ = tokio::signal::ctrl_c() => {
            controller.cancel().await;
            bail!("interrupted");
        }
    };

    match phase {
        Phase::Done { .. } => {
            let page = controller.page().await;
            let summary = page
                .element(&elements.result_field)
                .map(|el| el.value.clone())
                .unwrap_or_default();
            println!("{summary}");
            Ok(())
        }
        Phase::Failed { message } => bail!(message),
        other => bail!("summarization did not finish: {other:?}"),
    }
}

/// Upload `input` as a file when it names one, otherwise send it as text.
fn build_form(input: &str) -> anyhow::Result<FormData> {
    let path = Path::new(input);
    if !path.is_file() {
        return Ok(FormData::new().text("text", input));
    }

    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload.txt".to_string());
    Ok(FormData::new().text("text", "").file("file", filename, bytes))
}
