use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use vidnet::algo::{degree_summary, page_rank, top_k_records, AlgoError, PageRankConfig};
use vidnet::graph::{save_gexf, GraphBuilder};
use vidnet::query::{QueryEngine, VideoQuery};
use vidnet::record::Attribute;
use vidnet::report::comparison_report;
use vidnet::stats::{attribute_samples, bucketize};
use vidnet::store::MemoryStore;

/// Analyze a crawled video dataset: queries, frequency tables, the
/// related-video graph, degree statistics, and PageRank influence ranking.
#[derive(Parser, Debug)]
#[command(name = "vidnet", version)]
struct Args {
    /// Tab-separated dataset files (9 scalar fields + related ids per line)
    #[arg(required = true)]
    datasets: Vec<PathBuf>,

    /// How many ranked videos to print
    #[arg(long, default_value_t = 5)]
    top: usize,

    /// Write the million-view subgraph as GEXF to this path
    #[arg(long)]
    gexf: Option<PathBuf>,

    /// Write the comparison report (top 30 per series) as JSON to this path
    #[arg(long)]
    report: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let mut store = MemoryStore::new();
    for path in &args.datasets {
        let videos = vidnet::ingest::load_file(path)
            .with_context(|| format!("loading {}", path.display()))?;
        println!("loaded {} records from {}", videos.len(), path.display());
        store.extend(videos);
    }

    let engine = QueryEngine::new();
    let all = engine.find(&store, &VideoQuery::new())?;
    println!("{} records total\n", all.len());

    let comedy = engine.find(&store, &VideoQuery::new().exact(Attribute::Category, "Comedy"))?;
    println!("{} videos in the Comedy category", comedy.len());

    let popular_music = engine.find(
        &store,
        &VideoQuery::new()
            .exact(Attribute::Category, "Music")
            .between(Attribute::Views, 100_000.0, f64::INFINITY)
            .between(Attribute::Ratings, 1_000.0, 20_000.0),
    )?;
    println!(
        "{} Music videos with >100k views and 1k-20k ratings\n",
        popular_music.len()
    );

    println!("Comedy ratings distribution:");
    let table = bucketize(
        &comedy,
        Attribute::Ratings,
        Some(&[0.0, 100.0, 500.0, 1000.0, 5000.0, 10000.0]),
    )?;
    println!("{table}\n");

    let million = engine.find(
        &store,
        &VideoQuery::new().between(Attribute::Views, 1_000_000.0, f64::INFINITY),
    )?;
    println!("category distribution of videos with over a million views:");
    let categories = bucketize(&million, Attribute::Category, None)?;
    println!("{categories}");
    let comment_samples = attribute_samples(&million, Attribute::Comments)?;
    println!(
        "({} comment-count samples collected for histogram rendering)\n",
        comment_samples.len()
    );

    println!(
        "building the subnetwork of {} videos with over a million views",
        million.len()
    );
    let graph = GraphBuilder::build(&million, Some(&million));
    println!("{} nodes, {} edges\n", graph.node_count(), graph.edge_count());

    match degree_summary(&graph) {
        Ok(summary) => println!("{summary}\n"),
        Err(AlgoError::EmptyGraph) => println!("graph is empty, no degree statistics\n"),
    }

    if !graph.is_empty() {
        let scores = page_rank(&graph, &PageRankConfig::default())?;
        if !scores.converged {
            println!("note: PageRank hit the iteration cap; scores are approximate");
        }
        for (rank, (ranked, detail)) in
            top_k_records(&graph, &scores, args.top, &all).iter().enumerate()
        {
            println!(
                "{}: Video ID: {} | PageRank Score: {}",
                rank + 1,
                ranked.id,
                ranked.score
            );
            match detail {
                Some(video) => println!(
                    "   {} | {} | {} views | {} ratings",
                    video.uploader, video.category, video.views, video.ratings
                ),
                None => println!("   video data not in database"),
            }
        }
        println!();
    }

    if let Some(path) = &args.gexf {
        save_gexf(&graph, Some(&million), path)
            .with_context(|| format!("writing {}", path.display()))?;
        println!("wrote graph to {}", path.display());
    }

    if let Some(path) = &args.report {
        let report = comparison_report(&all, 30, &PageRankConfig::default())?;
        std::fs::write(path, serde_json::to_string_pretty(&report)?)
            .with_context(|| format!("writing {}", path.display()))?;
        println!("wrote comparison report to {}", path.display());
    }

    Ok(())
}
