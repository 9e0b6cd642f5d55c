use anyhow::{Context, Result};
use clap::Parser;
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use rand::Rng;
use reqwest::Client;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Target URL (e.g., http://localhost:8080)
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    /// Number of requests to send
    #[arg(short, long, default_value_t = 200)]
    requests: usize,

    /// Number of concurrent requests
    #[arg(short, long, default_value_t = 10)]
    concurrency: usize,

    /// Highest candidate id to request detail pages for
    #[arg(long, default_value_t = 30)]
    max_candidate_id: u32,

    /// Wipe all votes before starting
    #[arg(long)]
    initialize: bool,
}

/// Picks one of the read pages, weighted towards the index.
fn pick_path(rng: &mut impl Rng, max_candidate_id: u32) -> String {
    match rng.gen_range(0..10) {
        0..=4 => "/".to_string(),
        5..=7 => format!("/candidates/{}", rng.gen_range(1..=max_candidate_id.max(1))),
        _ => "/vote".to_string(),
    }
}

async fn fetch(client: &Client, base_url: &str, path: &str) -> Result<()> {
    client
        .get(format!("{}{}", base_url, path))
        .send()
        .await
        .with_context(|| format!("Failed to send request to {}", path))?
        .error_for_status()
        .with_context(|| format!("Request to {} failed", path))?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    println!("🚀 Starting load test against {}", args.url);
    println!("📨 Requests: {}", args.requests);
    println!("⚡ Concurrency: {}", args.concurrency);

    let client = Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .context("Failed to build client")?;

    if args.initialize {
        fetch(&client, &args.url, "/initialize")
            .await
            .context("Failed to reset votes")?;
        println!("🧹 Votes reset via /initialize");
    }

    let base_url = Arc::new(args.url.clone());
    let success_count = Arc::new(AtomicUsize::new(0));
    let failure_count = Arc::new(AtomicUsize::new(0));

    let pb = ProgressBar::new(args.requests as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} ({eta}) {msg}")
            .context("Invalid progress bar template")?
            .progress_chars("=>-"),
    );

    let start_time = Instant::now();

    let results = stream::iter(0..args.requests)
        .map(|_| {
            let client = client.clone();
            let base_url = base_url.clone();
            let success_count = success_count.clone();
            let failure_count = failure_count.clone();
            let pb = pb.clone();
            let path = pick_path(&mut rand::thread_rng(), args.max_candidate_id);

            async move {
                match fetch(&client, &base_url, &path).await {
                    Ok(_) => {
                        success_count.fetch_add(1, Ordering::Relaxed);
                    }
                    Err(e) => {
                        failure_count.fetch_add(1, Ordering::Relaxed);
                        pb.set_message(format!(
                            "Errors: {} ({:#})",
                            failure_count.load(Ordering::Relaxed),
                            e
                        ));
                    }
                }
                pb.inc(1);
            }
        })
        .buffer_unordered(args.concurrency)
        .collect::<Vec<()>>();

    results.await;

    pb.finish_with_message("Done");

    let duration = start_time.elapsed();
    let successes = success_count.load(Ordering::Relaxed);
    let failures = failure_count.load(Ordering::Relaxed);
    let rps = successes as f64 / duration.as_secs_f64();

    println!("\n📊 Results:");
    println!("   Time taken: {:?}", duration);
    println!("   Total requests: {}", args.requests);
    println!("   Successful: {}", successes);
    println!("   Failed: {}", failures);
    println!("   Throughput: {:.2} req/sec", rps);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn picked_paths_stay_within_the_surface() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let path = pick_path(&mut rng, 30);
            let ok = path == "/"
                || path == "/vote"
                || path
                    .strip_prefix("/candidates/")
                    .and_then(|id| id.parse::<u32>().ok())
                    .is_some_and(|id| (1..=30).contains(&id));
            assert!(ok, "unexpected path {path}");
        }
    }
}
