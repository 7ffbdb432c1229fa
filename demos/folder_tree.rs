//! # Example: Folder Tree
//!
//! Three folder rows share one selection token. Clicking a row claims it; clicking the
//! selected row again releases it. A `LogWriter` records every change and a search box
//! is debounced so only the last keystroke of a burst runs the filter.
//!
//! Run with:
//! ```text
//! RUST_LOG=info cargo run --example folder_tree --features logging
//! ```

use std::sync::{Arc, Mutex};
use std::time::Duration;

use totem::{Claimant, Config, Debouncer, LogWriter, PollPolicy, Totem, wait_until};
use tracing_subscriber::EnvFilter;

/// One row of the tree; redraws whenever its own selection flips.
struct FolderRow {
    name: &'static str,
    claimant: Claimant<&'static str>,
}

impl FolderRow {
    fn new(totem: &Totem<&'static str>, name: &'static str) -> Self {
        let claimant = totem.claimant();
        claimant
            .on_ownership(move |selected| {
                let mark = if selected { "[x]" } else { "[ ]" };
                println!("  redraw {mark} {name}");
            })
            .detach();
        Self { name, claimant }
    }

    fn click(&self) {
        println!("click {}", self.name);
        if self.claimant.is_owner() {
            self.claimant.release();
        } else {
            self.claimant.claim(self.name);
        }
    }

    /// No-op for rows that are not selected.
    fn release_if_owner(&self) {
        self.claimant.release();
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cfg = Config::default();
    let folders = Totem::<&'static str>::with_config(&cfg);
    let log = LogWriter::new("folders");
    let _changes = log.observe(&folders);
    let selected = folders.watch();

    let rows: Vec<FolderRow> = ["docs", "music", "photos"]
        .into_iter()
        .map(|name| FolderRow::new(&folders, name))
        .collect();

    rows[0].click();
    rows[1].click();
    rows[1].click();
    rows[0].release_if_owner();

    println!("selected: {:?}", selected.current());

    let filtered = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&filtered);
    let search = Debouncer::new(cfg.debounce, move |query: String| {
        println!("filter rows by {query:?}");
        sink.lock().unwrap_or_else(|e| e.into_inner()).push(query);
    });
    for query in ["p", "ph", "pho"] {
        search.call(query.to_string());
        tokio::time::sleep(Duration::from_millis(50)).await;
    }

    let poll = PollPolicy::fixed(Duration::from_millis(50), 20);
    let checks = wait_until(
        || !filtered.lock().unwrap_or_else(|e| e.into_inner()).is_empty(),
        &poll,
    )
    .await?;
    println!("search settled after {checks} checks");

    Ok(())
}
