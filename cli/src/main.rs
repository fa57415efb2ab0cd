//! nftree CLI - inspect NFTree collections and the attestation cache
//!
//! # Main Commands
//!
//! ```bash
//! nftree projects                          # List every indexed project
//! nftree collections --owner 0xabc...      # Home page rows for an owner
//! nftree probe 0xedition...                # Resolve and probe collection artwork
//! ```
//!
//! # Cache Commands
//!
//! ```bash
//! nftree cache list                        # Show attested and pending collections
//! nftree cache attest 0xedition...         # Mark an edition as attested
//! nftree cache queue 0xedition... 12       # Queue a collection for attestation
//! nftree cache clear                       # Remove every cache entry
//! ```

use clap::{Parser, Subcommand};
use nftree_cli::config::{DEFAULT_CACHE_DIR, DEFAULT_INDEXER_URL};
use nftree_cli::report::{collections_table, projects_table};
use nftree_cli::{probe_image, CommandError, CommandResult, FileStore, HttpIndexer};
use nftree_core::image::DEFAULT_IPFS_GATEWAY;
use nftree_core::{
    image_after_probe, load_home, needs_probe, resolve_image_uri, AttestationCache, Collection,
    Indexer, ProjectIndex,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "nftree")]
#[command(about = "Inspect NFTree collections and the local attestation cache", long_about = None)]
struct Cli {
    /// GraphQL endpoint of the indexer
    #[arg(long, global = true, env = "NFTREE_INDEXER_URL", default_value = DEFAULT_INDEXER_URL)]
    indexer_url: String,

    /// Directory of the attestation cache
    #[arg(long, global = true, env = "NFTREE_CACHE_DIR", default_value = DEFAULT_CACHE_DIR)]
    cache_dir: PathBuf,

    /// Gateway used for ipfs:// artwork
    #[arg(long, global = true, env = "NFTREE_IPFS_GATEWAY", default_value = DEFAULT_IPFS_GATEWAY)]
    ipfs_gateway: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every indexed project
    Projects,

    /// Show the home page rows for an owner
    Collections {
        /// Owner wallet address
        #[arg(short, long)]
        owner: String,
    },

    /// Resolve and probe the artwork of a collection
    Probe {
        /// Edition address
        edition: String,
    },

    /// Inspect or edit the attestation cache
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
}

#[derive(Subcommand)]
enum CacheAction {
    /// Show attested and pending collections
    List,

    /// Mark an edition as attested
    Attest {
        /// Edition address
        edition: String,
    },

    /// Queue a collection for attestation
    Queue {
        /// Edition address
        edition: String,
        /// Token id
        token_id: String,
        /// Artwork URI
        #[arg(long)]
        image: Option<String>,
    },

    /// Remove every cache entry
    Clear,
}

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let indexer = HttpIndexer::new(cli.indexer_url);
    let cache = AttestationCache::new(FileStore::with_dir(&cli.cache_dir));

    let result = match cli.command {
        Commands::Projects => cmd_projects(&indexer).await,
        Commands::Collections { owner } => cmd_collections(&indexer, &cache, &owner).await,
        Commands::Probe { edition } => cmd_probe(&indexer, &edition, &cli.ipfs_gateway).await,
        Commands::Cache { action } => cmd_cache(&cache, action),
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

async fn cmd_projects(indexer: &HttpIndexer) -> CommandResult<()> {
    eprintln!("🔎 Querying {}", indexer.url());

    let index = ProjectIndex::new(indexer.all_projects().await?);
    eprintln!("✅ {} projects", index.len());

    print!("{}", projects_table(&index));
    Ok(())
}

async fn cmd_collections(
    indexer: &HttpIndexer,
    cache: &AttestationCache<FileStore>,
    owner: &str,
) -> CommandResult<()> {
    eprintln!("🔎 Loading collections of {}", owner);

    let data = load_home(indexer, cache, owner).await?;
    let attested = cache.attested().unwrap_or_else(|e| {
        eprintln!("⚠️  {}", e);
        Vec::new()
    });

    if data.collections.is_empty() {
        eprintln!("📋 No collections for this owner.");
        return Ok(());
    }

    eprintln!("✅ {} rows ({} projects indexed)\n", data.collections.len(), data.projects.len());
    print!("{}", collections_table(&data, &attested));
    Ok(())
}

async fn cmd_probe(
    indexer: &HttpIndexer,
    edition: &str,
    gateway: &str,
) -> CommandResult<()> {
    let index = ProjectIndex::new(indexer.all_projects().await?);
    if index.get(edition).is_none() {
        return Err(CommandError::UnknownEdition(edition.to_string()));
    }

    let resolved = resolve_image_uri(index.image_uri(edition), gateway);
    eprintln!("🖼️  Resolved: {}", resolved);

    let shown = if needs_probe(&resolved) {
        let outcome = probe_image(&resolved).await;
        eprintln!("   Probe: {:?}", outcome);
        image_after_probe(&resolved, outcome)
    } else {
        resolved
    };

    println!("{}", shown);
    Ok(())
}

fn cmd_cache(
    cache: &AttestationCache<FileStore>,
    action: CacheAction,
) -> CommandResult<()> {
    match action {
        CacheAction::List => {
            eprintln!("📂 {}", cache.store().path().display());
            if let Some(updated) = cache.store().updated_at()? {
                eprintln!("   Updated: {}", updated.to_rfc3339());
            }

            let attested = cache.attested()?;
            println!("Attested ({}):", attested.len());
            for edition in &attested {
                println!("  ✅ {}", edition);
            }

            let pending = cache.pending()?;
            println!("Pending ({}):", pending.len());
            for collection in &pending {
                println!("  ⏳ {} #{}", collection.edition_address, collection.token_id);
            }
        }

        CacheAction::Attest { edition } => {
            if cache.record_attested(&edition)? {
                eprintln!("✅ Cached attestation for {}", edition);
            } else {
                eprintln!("ℹ️  {} was already attested", edition);
            }
        }

        CacheAction::Queue {
            edition,
            token_id,
            image,
        } => {
            let collection = Collection {
                edition_address: edition.clone(),
                token_id: token_id.clone(),
                image_uri: image,
            };
            if cache.queue_pending(collection)? {
                eprintln!("⏳ Queued {} #{}", edition, token_id);
            } else {
                eprintln!("ℹ️  {} #{} is already queued", edition, token_id);
            }
        }

        CacheAction::Clear => {
            cache.clear()?;
            eprintln!("🗑️  Cache cleared");
        }
    }

    Ok(())
}
